//! Picking the recursive resolver and shuttling datagrams to it.
//!
//! Only the `nameserver` lines of resolv.conf matter here; options, search
//! domains and the rest of its grammar are somebody else's business.
use std::fs;
use std::net::{IpAddr, SocketAddr, UdpSocket};
use std::str::FromStr;
use std::time::Duration;

use log::debug;

use crate::error::{DNSError, DNSResult};
use crate::message::{DNSMessage, IncomingPacket};

pub const RESOLV_CONF: &str = "/etc/resolv.conf";

const DNS_PORT: u16 = 53;
const EXCHANGE_TIMEOUT: Duration = Duration::from_secs(5);

/// The `nameserver` entries of a resolv.conf-shaped text, in file order.
pub fn nameservers_from(contents: &str) -> Vec<IpAddr> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.starts_with('#') && !line.starts_with(';'))
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            match fields.next() {
                Some("nameserver") => fields.next().and_then(|ip| IpAddr::from_str(ip).ok()),
                _ => None,
            }
        })
        .collect()
}

/// The resolvers the system is configured with.
pub fn system_nameservers() -> DNSResult<Vec<IpAddr>> {
    let contents = fs::read_to_string(RESOLV_CONF)?;
    Ok(nameservers_from(&contents))
}

/// A UDP socket bound to an ephemeral local port and connected to the
/// resolver, with read & write timeouts armed.
pub fn connect(server: IpAddr) -> DNSResult<UdpSocket> {
    let local: SocketAddr = if server.is_ipv6() {
        "[::]:0".parse()?
    } else {
        "0.0.0.0:0".parse()?
    };

    let socket = UdpSocket::bind(local)?;
    socket.set_read_timeout(Some(EXCHANGE_TIMEOUT))?;
    socket.set_write_timeout(Some(EXCHANGE_TIMEOUT))?;
    socket.connect(SocketAddr::new(server, DNS_PORT))?;
    debug!("socket: {:?}", &socket);

    Ok(socket)
}

/// Send the query and wait for the matching reply.
pub fn exchange(socket: &UdpSocket, query: &DNSMessage) -> DNSResult<IncomingPacket> {
    query.send(socket)?;
    let incoming = IncomingPacket::receive(socket)?;

    // a datagram from someone else's conversation is not our reply
    let bytes = incoming.bytes();
    if bytes.len() < 2 || u16::from_be_bytes([bytes[0], bytes[1]]) != query.header.id {
        return Err(DNSError::new("reply id does not match the query id"));
    }

    Ok(incoming)
}
