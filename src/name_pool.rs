//! An interning store for decoded domain names.
//!
//! Names decoded straight from a packet borrow the packet buffer and die with
//! it. Interning a name copies its labels into owned storage, so RDATA names
//! can be kept after the raw datagram is dropped. The pool also caches every
//! name it decoded by the absolute offset the name starts at, so a compressed
//! target is walked at most once per packet.
use std::collections::HashMap;
use std::io::Cursor;

use crate::error::DNSResult;
use crate::network_order::FromNetworkOrder;
use crate::rfc1035::DomainName;

#[derive(Debug, Default)]
pub struct NamePool {
    // fully decoded names, keyed by their absolute offset in the message
    names: HashMap<usize, DomainName<'static>>,
}

impl NamePool {
    pub fn new() -> Self {
        NamePool::default()
    }

    /// Copy the labels of `name` into owned storage and return the owned name.
    pub fn intern(&mut self, name: &DomainName<'_>) -> DomainName<'static> {
        name.clone().into_owned()
    }

    /// Decode the name starting at the cursor position, or alias the one
    /// already decoded at that offset. The cursor advances past the name
    /// either way.
    pub fn decode_or_cache<'a>(
        &mut self,
        buffer: &mut Cursor<&'a [u8]>,
    ) -> DNSResult<DomainName<'static>> {
        let offset = buffer.position() as usize;

        // on a hit the wire bytes still have to be consumed, but there is
        // nothing to build
        if let Some(cached) = self.names.get(&offset) {
            DomainName::skip(buffer)?;
            return Ok(cached.clone());
        }

        let mut name = DomainName::default();
        name.from_network_bytes(buffer)?;

        let owned = self.intern(&name);
        self.names.insert(offset, owned.clone());
        Ok(owned)
    }

    /// Forget every name the pool holds.
    pub fn clear(&mut self) {
        self.names.clear();
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
