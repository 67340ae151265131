//! A dedicated error for all possible errors in DNS queries: I/O, malformed packets, etc
use std::io;
use std::net;
use std::str;

use crate::rfc1035::QType;

#[derive(Debug)]
pub enum DNSError {
    Io(io::Error),
    Utf8(str::Utf8Error),
    AddrParse(net::AddrParseError),
    DNS(String),
    DNSInternalError(InternalError),
}

/// Codec error kinds a caller can pattern-match on.
///
/// The first group are format errors: the input is malformed and the packet
/// should be discarded. `UnsupportedResourceType`/`UnknownResourceType` flag
/// well-formed RDATA the codec does not type; the opaque bytes stay available.
/// `MissingData` is a caller contract error on the encode side, and
/// `BufferFull` is the writer-side counterpart of `UnexpectedEof`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InternalError {
    UnexpectedEof,
    InvalidLabelType(u8),
    InvalidPointer,
    NameTooLong,
    LabelTooLong,
    EmptyDomainName,
    EmptyLabel,
    Overflow,
    UnsupportedResourceType(QType),
    UnknownResourceType(u16),
    MissingData,
    BufferFull,
}

impl DNSError {
    // Helper function to create a new DNS error from a string
    pub fn new(s: &str) -> Self {
        DNSError::DNS(String::from(s))
    }
}

/// A specific custom `Result` for all functions
pub type DNSResult<T> = Result<T, DNSError>;

// All conversions of inner errors to DNSError
impl From<io::Error> for DNSError {
    fn from(err: io::Error) -> Self {
        // a short read anywhere in a packet is one and the same condition
        match err.kind() {
            io::ErrorKind::UnexpectedEof => DNSError::DNSInternalError(InternalError::UnexpectedEof),
            _ => DNSError::Io(err),
        }
    }
}

impl From<str::Utf8Error> for DNSError {
    fn from(err: str::Utf8Error) -> Self {
        DNSError::Utf8(err)
    }
}

impl From<net::AddrParseError> for DNSError {
    fn from(err: net::AddrParseError) -> Self {
        DNSError::AddrParse(err)
    }
}

impl From<String> for DNSError {
    fn from(err: String) -> Self {
        DNSError::DNS(err)
    }
}

impl From<InternalError> for DNSError {
    fn from(err: InternalError) -> Self {
        DNSError::DNSInternalError(err)
    }
}
