//! The DNS message itself, plus the owning wrapper for received datagrams.
//!
//! DNS packets are called "messages" in RFC1035: "All communications inside
//! of the domain protocol are carried in a single format called a message".
use std::io::Cursor;
use std::net::UdpSocket;

use log::debug;
use rand::Rng;

use crate::error::DNSResult;
use crate::format_buffer;
use crate::network_order::{FromNetworkOrder, ToNetworkOrder};
use crate::rfc1035::{
    DNSPacketHeader, DNSQuestion, DNSResourceRecord, QType, MAX_DNS_PACKET_SIZE,
};

#[derive(Debug, Default, Clone, PartialEq)]
pub struct DNSMessage<'a> {
    pub header: DNSPacketHeader,
    pub questions: Vec<DNSQuestion<'a>>,
    pub answers: Vec<DNSResourceRecord<'a>>,
    pub nameservers: Vec<DNSResourceRecord<'a>>,
    pub additionals: Vec<DNSResourceRecord<'a>>,
}

impl<'a> DNSMessage<'a> {
    /// A recursion-desired query for `domain`, with a fresh random id.
    pub fn query(domain: &'a str, qtype: QType) -> DNSResult<Self> {
        let mut message = DNSMessage::default();

        // create a random ID
        let mut rng = rand::thread_rng();
        message.header.id = rng.gen::<u16>();

        // packet type and op code are Query by default
        message.header.flags.recursion_desired = true;

        message.push_question(DNSQuestion::new(domain, qtype, None)?);

        Ok(message)
    }

    // Add another question into the list of questions to send
    pub fn push_question(&mut self, question: DNSQuestion<'a>) {
        self.questions.push(question);

        // as we add a question, we need to increment the counter
        self.header.qd_count += 1;
    }

    // Mostly useful when building replies by hand (tests, servers)
    pub fn push_answer(&mut self, answer: DNSResourceRecord<'a>) {
        self.answers.push(answer);
        self.header.an_count += 1;
    }

    // Send the query through the wire, on an already connected socket
    pub fn send(&self, socket: &UdpSocket) -> DNSResult<usize> {
        // convert to network bytes
        let mut buffer: Vec<u8> = Vec::new();
        self.to_network_bytes(&mut buffer)?;
        debug!("query buffer: {}", format_buffer!("X", &buffer));
        debug!("query buffer: [{}]", format_buffer!("C", &buffer));

        // send packet through the wire
        Ok(socket.send(&buffer)?)
    }
}

/// A received datagram, owning its bytes.
///
/// Everything a decoded [`DNSMessage`] borrows (names on the zero-copy path,
/// every opaque RDATA slice) points into this buffer, so the packet has to
/// outlive the message. Names that must survive the packet go through a
/// [`crate::name_pool::NamePool`].
#[derive(Debug)]
pub struct IncomingPacket {
    buffer: Vec<u8>,
}

impl IncomingPacket {
    pub fn new(buffer: Vec<u8>) -> Self {
        IncomingPacket { buffer }
    }

    // Receive one datagram on a connected socket
    pub fn receive(socket: &UdpSocket) -> DNSResult<Self> {
        let mut buffer = [0u8; MAX_DNS_PACKET_SIZE];
        let received = socket.recv(&mut buffer)?;

        let slice = &buffer[..received];
        debug!("received buffer: {}", format_buffer!("X", &slice));
        debug!("received buffer: [{}]", format_buffer!("C", &slice));

        Ok(IncomingPacket::new(slice.to_vec()))
    }

    pub fn bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Decode the datagram. The message borrows from `self`.
    pub fn message(&self) -> DNSResult<DNSMessage<'_>> {
        let mut cursor = Cursor::new(self.buffer.as_slice());

        let mut message = DNSMessage::default();
        message.from_network_bytes(&mut cursor)?;
        Ok(message)
    }
}
