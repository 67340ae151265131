//! Wire-order conversions for the DNS structures themselves.
//!
//! Names are encoded uncompressed; on the decode path the RFC1035 §4.1.4
//! compression pointers are followed and resolved inline, so a fully decoded
//! name never contains a pointer.
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::borrow::Cow;
use std::io::{Cursor, Seek, SeekFrom};
use std::str;

use crate::derive_enum;
use crate::error::{DNSResult, InternalError};
use crate::message::DNSMessage;
use crate::network_order::{FromNetworkOrder, ToNetworkOrder};
use crate::rfc1035::{
    CharacterString, DNSPacketFlags, DNSQuestion, DNSResourceRecord, DomainName, OpCode,
    OpaqueRdata, PacketType, QClass, QType, RecordData, ResponseCode, MAX_LABEL_COUNT,
    MAX_LABEL_LENGTH, MAX_NAME_LENGTH,
};
use crate::util::is_pointer;

// constants data used for tests
// cfg(doctest) doesn't work as expected
pub const SAMPLE_DOMAIN: &str = "www.google.ie";
pub const SAMPLE_SLICE: &[u8; 15] = &[
    0x03, 0x77, 0x77, 0x77, 0x06, 0x67, 0x6f, 0x6f, 0x67, 0x6c, 0x65, 0x02, 0x69, 0x65, 0x00,
];

impl<'a> ToNetworkOrder for CharacterString<'a> {
    /// ```
    /// use dnsdig::network_order::ToNetworkOrder;
    /// use dnsdig::rfc1035::CharacterString;
    ///
    /// let mut buffer: Vec<u8> = Vec::new();
    /// let cs = CharacterString::from("www");
    /// assert_eq!(cs.to_network_bytes(&mut buffer).unwrap(), 4);
    /// assert_eq!(buffer, &[0x03, 0x77, 0x77, 0x77]);
    /// ```
    fn to_network_bytes(&self, buffer: &mut Vec<u8>) -> DNSResult<usize> {
        // a character string is length-prefixed with a single byte
        if self.len() > 255 {
            return Err(InternalError::Overflow.into());
        }

        buffer.write_u8(self.len() as u8)?;
        buffer.extend_from_slice(self.0.as_bytes());
        Ok(self.len() + 1)
    }
}

impl<'a> FromNetworkOrder<'a> for CharacterString<'a> {
    /// ```
    /// use std::io::Cursor;
    /// use dnsdig::network_order::FromNetworkOrder;
    /// use dnsdig::rfc1035::CharacterString;
    ///
    /// let mut buffer = Cursor::new([0x06_u8, 0x67, 0x6f, 0x6f, 0x67, 0x6c, 0x65].as_slice());
    /// let mut cs = CharacterString::default();
    /// assert!(cs.from_network_bytes(&mut buffer).is_ok());
    /// assert_eq!(cs, "google");
    /// ```
    fn from_network_bytes(&mut self, buffer: &mut Cursor<&'a [u8]>) -> DNSResult<()> {
        let size = buffer.read_u8()? as usize;

        let start = buffer.position() as usize;
        let data = buffer
            .get_ref()
            .get(start..start + size)
            .ok_or(InternalError::UnexpectedEof)?;

        self.0 = Cow::Borrowed(str::from_utf8(data)?);
        buffer.seek(SeekFrom::Start((start + size) as u64))?;
        Ok(())
    }
}

impl<'a> DomainName<'a> {
    /// Consume a name from the cursor without building it. Used when nobody
    /// cares about the labels, only about what comes after them.
    pub fn skip(buffer: &mut Cursor<&[u8]>) -> DNSResult<()> {
        let message = *buffer.get_ref();
        let mut index = buffer.position() as usize;

        loop {
            let length_byte = *message.get(index).ok_or(InternalError::UnexpectedEof)?;

            if length_byte == 0 {
                index += 1;
                break;
            }

            // a pointer ends the name in the primary reader
            if is_pointer(length_byte) {
                if index + 2 > message.len() {
                    return Err(InternalError::UnexpectedEof.into());
                }
                index += 2;
                break;
            }

            if length_byte & 0b1100_0000 != 0 {
                return Err(InternalError::InvalidLabelType(length_byte).into());
            }

            index += length_byte as usize + 1;
        }

        buffer.seek(SeekFrom::Start(index as u64))?;
        Ok(())
    }
}

impl<'a> ToNetworkOrder for DomainName<'a> {
    /// ```
    /// use dnsdig::rfc1035::DomainName;
    /// use dnsdig::network_order::ToNetworkOrder;
    /// use dnsdig::network_order::dns::{SAMPLE_DOMAIN, SAMPLE_SLICE};
    ///
    /// let dn = DomainName::try_from(SAMPLE_DOMAIN).unwrap();
    /// let mut buffer: Vec<u8> = Vec::new();
    ///
    /// assert_eq!(dn.to_network_bytes(&mut buffer).unwrap(), 15);
    /// assert_eq!(&buffer, SAMPLE_SLICE);
    /// ```
    fn to_network_bytes(&self, buffer: &mut Vec<u8>) -> DNSResult<usize> {
        // TODO: emit compression pointers for suffixes already written to this buffer
        if self.len() > MAX_NAME_LENGTH {
            return Err(InternalError::NameTooLong.into());
        }

        let mut length = 0usize;

        for label in &self.0 {
            if label.is_empty() {
                return Err(InternalError::EmptyLabel.into());
            }
            if label.len() > MAX_LABEL_LENGTH {
                return Err(InternalError::LabelTooLong.into());
            }

            // write length first, then the label itself
            buffer.write_u8(label.len() as u8)?;
            buffer.extend_from_slice(label.as_bytes());

            length += label.len() + 1;
        }

        // add sentinel 0x00: the empty name is exactly that single byte
        buffer.write_u8(0)?;

        Ok(length + 1)
    }
}

impl<'a> FromNetworkOrder<'a> for DomainName<'a> {
    /// ```
    /// use std::io::Cursor;
    /// use dnsdig::network_order::FromNetworkOrder;
    /// use dnsdig::rfc1035::DomainName;
    /// use dnsdig::network_order::dns::SAMPLE_SLICE;
    ///
    /// let mut buffer = Cursor::new(SAMPLE_SLICE.as_slice());
    /// let mut dn = DomainName::default();
    /// assert!(dn.from_network_bytes(&mut buffer).is_ok());
    /// assert_eq!(dn.0, ["www", "google", "ie"]);
    /// ```
    fn from_network_bytes(&mut self, buffer: &mut Cursor<&'a [u8]>) -> DNSResult<()> {
        // From RFC1035:
        //
        // The compression scheme allows a domain name in a message to be
        // represented as either:
        // - a sequence of labels ending in a zero octet
        // - a pointer
        // - a sequence of labels ending with a pointer
        let message: &'a [u8] = *buffer.get_ref();
        let mut index = buffer.position() as usize;

        // where the primary reader resumes: right after the terminating zero,
        // or right after the first pointer
        let mut resume_at: Option<usize> = None;

        // every pointer must jump strictly backwards, below its own position
        // and below any previous target. This is what bounds the walk and
        // turns a pointer cycle into an error instead of an endless loop.
        let mut last_target: Option<usize> = None;

        // the terminating zero counts against the 255-byte limit
        let mut wire_length = 1usize;

        loop {
            let length_byte = *message.get(index).ok_or(InternalError::UnexpectedEof)?;

            // we reached the sentinel
            if length_byte == 0 {
                index += 1;
                break;
            }

            if is_pointer(length_byte) {
                // The pointer takes the form of a two octet sequence:
                // +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
                // | 1  1|                OFFSET                   |
                // +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
                //
                // The OFFSET field specifies an offset from the start of the
                // message (i.e., the first octet of the ID field in the
                // domain header).
                let low = *message.get(index + 1).ok_or(InternalError::UnexpectedEof)?;
                let target = ((length_byte as usize & 0b0011_1111) << 8) | low as usize;

                if target >= index || last_target.map_or(false, |t| target >= t) {
                    return Err(InternalError::InvalidPointer.into());
                }

                if resume_at.is_none() {
                    resume_at = Some(index + 2);
                }
                last_target = Some(target);
                index = target;
                continue;
            }

            // the 10 and 01 combinations are reserved for future use
            if length_byte & 0b1100_0000 != 0 {
                return Err(InternalError::InvalidLabelType(length_byte).into());
            }

            // otherwise, regular processing: the first byte is the label length
            let size = length_byte as usize;
            let label = message
                .get(index + 1..index + 1 + size)
                .ok_or(InternalError::UnexpectedEof)?;

            self.0.push(Cow::Borrowed(str::from_utf8(label)?));

            wire_length += size + 1;
            if self.0.len() > MAX_LABEL_COUNT || wire_length > MAX_NAME_LENGTH {
                return Err(InternalError::NameTooLong.into());
            }

            index += size + 1;
        }

        buffer.seek(SeekFrom::Start(resume_at.unwrap_or(index) as u64))?;
        Ok(())
    }
}

// Impl QType & QClass enums (u16 on the wire)
derive_enum!(QType);
derive_enum!(QClass);

impl ToNetworkOrder for DNSPacketFlags {
    /// ```
    /// use dnsdig::network_order::ToNetworkOrder;
    /// use dnsdig::rfc1035::{DNSPacketFlags, ResponseCode, OpCode, PacketType};
    ///
    /// let flags = DNSPacketFlags {
    ///     packet_type: PacketType::Response,
    ///     op_code: OpCode::IQuery,
    ///     authorative_answer: true,
    ///     truncated: true,
    ///     recursion_desired: true,
    ///     recursion_available: true,
    ///     z: 0b111,
    ///     response_code: ResponseCode::NoError,
    /// };
    ///
    /// let mut buffer: Vec<u8> = Vec::new();
    /// assert!(flags.to_network_bytes(&mut buffer).is_ok());
    /// assert_eq!(buffer, &[0b1000_1111, 0b1111_0000]);
    /// ```
    fn to_network_bytes(&self, buffer: &mut Vec<u8>) -> DNSResult<usize> {
        // combine all flags according to structure
        //                               1  1  1  1  1  1
        // 0  1  2  3  4  5  6  7  8  9  0  1  2  3  4  5
        // +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
        // |QR|   Opcode  |AA|TC|RD|RA|   Z    |   RCODE   |
        // +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
        let mut flags = self.packet_type.code() << 15;
        flags |= self.op_code.code() << 11;
        flags |= (self.authorative_answer as u16) << 10;
        flags |= (self.truncated as u16) << 9;
        flags |= (self.recursion_desired as u16) << 8;
        flags |= (self.recursion_available as u16) << 7;
        flags |= (self.z as u16) << 4;
        flags |= self.response_code.code();

        buffer.write_u16::<BigEndian>(flags)?;
        Ok(2)
    }
}

impl<'a> FromNetworkOrder<'a> for DNSPacketFlags {
    /// ```
    /// use std::io::Cursor;
    /// use dnsdig::network_order::FromNetworkOrder;
    /// use dnsdig::rfc1035::{DNSPacketFlags, ResponseCode, OpCode, PacketType};
    ///
    /// let b = vec![0b1000_1111, 0b1111_0000];
    /// let mut buffer = Cursor::new(b.as_slice());
    /// let mut v = DNSPacketFlags::default();
    /// assert!(v.from_network_bytes(&mut buffer).is_ok());
    /// assert_eq!(v.packet_type, PacketType::Response);
    /// assert_eq!(v.op_code, OpCode::IQuery);
    /// assert!(v.authorative_answer);
    /// assert!(v.truncated);
    /// assert!(v.recursion_desired);
    /// assert!(v.recursion_available);
    /// assert_eq!(v.z, 0b111);
    /// assert_eq!(v.response_code, ResponseCode::NoError);
    /// ```
    fn from_network_bytes(&mut self, buffer: &mut Cursor<&'a [u8]>) -> DNSResult<()> {
        // read as u16
        let flags = buffer.read_u16::<BigEndian>()?;

        // unknown opcode & rcode values are kept numerically, never rejected:
        // the caller gets to see what the server actually said
        self.packet_type = PacketType::try_from(flags >> 15)?;
        self.op_code = OpCode::from(flags >> 11 & 0b1111);
        self.authorative_answer = (flags >> 10) & 1 == 1;
        self.truncated = (flags >> 9) & 1 == 1;
        self.recursion_desired = (flags >> 8) & 1 == 1;
        self.recursion_available = (flags >> 7) & 1 == 1;
        self.z = (flags >> 4 & 0b111) as u8;
        self.response_code = ResponseCode::from(flags & 0b1111);

        Ok(())
    }
}

impl<'a> ToNetworkOrder for DNSResourceRecord<'a> {
    fn to_network_bytes(&self, buffer: &mut Vec<u8>) -> DNSResult<usize> {
        let mut length = self.name.to_network_bytes(buffer)?;
        length += self.r#type.to_network_bytes(buffer)?;
        length += self.class.to_network_bytes(buffer)?;
        length += self.ttl.to_network_bytes(buffer)?;

        match &self.rd_data {
            // encode the body into a scratch buffer first to learn RDLENGTH
            RecordData::Typed(rdata) => {
                let mut scratch: Vec<u8> = Vec::new();
                rdata.to_network_bytes(&mut scratch)?;

                let rd_length =
                    u16::try_from(scratch.len()).map_err(|_| InternalError::Overflow)?;
                length += rd_length.to_network_bytes(buffer)?;
                buffer.extend_from_slice(&scratch);
                length += scratch.len();
            }
            // raw RDATA is copied through verbatim
            RecordData::Opaque(opaque) => {
                length += opaque.length.to_network_bytes(buffer)?;
                buffer.extend_from_slice(opaque.bytes());
                length += opaque.length as usize;
            }
        }

        Ok(length)
    }
}

impl<'a> FromNetworkOrder<'a> for DNSResourceRecord<'a> {
    fn from_network_bytes(&mut self, buffer: &mut Cursor<&'a [u8]>) -> DNSResult<()> {
        self.name.from_network_bytes(buffer)?;
        self.r#type.from_network_bytes(buffer)?;
        self.class.from_network_bytes(buffer)?;
        self.ttl.from_network_bytes(buffer)?;
        self.rd_length.from_network_bytes(buffer)?;

        // RDATA is captured, not typed: the caller asks for typing on the
        // records it cares about, and an exotic record can't poison the
        // packet it travels in
        let message = *buffer.get_ref();
        let offset = buffer.position() as usize;
        let end = offset + self.rd_length as usize;
        if end > message.len() {
            return Err(InternalError::UnexpectedEof.into());
        }

        self.rd_data = RecordData::Opaque(OpaqueRdata {
            message,
            offset,
            length: self.rd_length,
        });
        buffer.seek(SeekFrom::Start(end as u64))?;

        Ok(())
    }
}

impl<'a> ToNetworkOrder for DNSMessage<'a> {
    fn to_network_bytes(&self, buffer: &mut Vec<u8>) -> DNSResult<usize> {
        // the header counters are written as-is: the encoder trusts the
        // caller (push_question & friends) to have kept them in sync with the
        // section lengths
        let mut length = self.header.to_network_bytes(buffer)?;
        length += self.questions.to_network_bytes(buffer)?;
        length += self.answers.to_network_bytes(buffer)?;
        length += self.nameservers.to_network_bytes(buffer)?;
        length += self.additionals.to_network_bytes(buffer)?;
        Ok(length)
    }
}

impl<'a> FromNetworkOrder<'a> for DNSMessage<'a> {
    fn from_network_bytes(&mut self, buffer: &mut Cursor<&'a [u8]>) -> DNSResult<()> {
        self.header.from_network_bytes(buffer)?;

        for _ in 0..self.header.qd_count {
            let mut question = DNSQuestion::default();
            question.from_network_bytes(buffer)?;
            self.questions.push(question);
        }

        for (count, section) in [
            (self.header.an_count, &mut self.answers),
            (self.header.ns_count, &mut self.nameservers),
            (self.header.ar_count, &mut self.additionals),
        ] {
            for _ in 0..count {
                let mut record = DNSResourceRecord::default();
                record.from_network_bytes(buffer)?;
                section.push(record);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DNSError;
    use crate::rdata::RData;
    use crate::rfc1035::DNSPacketHeader;
    use crate::{test_from_network, test_to_network};
    use std::net::Ipv4Addr;

    // sample is taken from real data using wireshark to be able to test
    // domain name compression
    const SAMPLE: &[u8] = &[
        0x41, 0x2a, 0x81, 0x80, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x00, 0x01, 0x06, 0x67, 0x6f,
        0x6f, 0x67, 0x6c, 0x65, 0x03, 0x63, 0x6f, 0x6d, 0x00, 0x00, 0x05, 0x00, 0x01, 0xc0, 0x0c,
        0x00, 0x06, 0x00, 0x01, 0x00, 0x00, 0x00, 0x3c, 0x00, 0x26, 0x03, 0x6e, 0x73, 0x31, 0xc0,
        0x0c, 0x09, 0x64, 0x6e, 0x73, 0x2d, 0x61, 0x64, 0x6d, 0x69, 0x6e, 0xc0, 0x0c, 0x19, 0x1b,
        0xc0, 0x0c, 0x00, 0x00, 0x03, 0x84, 0x00, 0x00, 0x03, 0x84, 0x00, 0x00, 0x07, 0x08, 0x00,
        0x00, 0x00, 0x3c, 0x00, 0x00, 0x29, 0x02, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    ];

    #[test]
    fn dns_packet_header() {
        const PACKET: &str = r#"
0000   76 86 81 a0 00 01 00 08 00 00 00 01
"#;

        // from
        let header = test_from_network!(PACKET, DNSPacketHeader);
        assert_eq!(header.id, 0x7686);
        assert_eq!(header.flags.packet_type, PacketType::Response);
        assert_eq!(header.flags.op_code, OpCode::Query);
        assert!(!header.flags.authorative_answer);
        assert!(!header.flags.truncated);
        assert!(header.flags.recursion_desired);
        assert!(header.flags.recursion_available);
        assert_eq!(header.flags.response_code, ResponseCode::NoError);
        assert_eq!(header.qd_count, 1);
        assert_eq!(header.an_count, 8);
        assert_eq!(header.ns_count, 0);
        assert_eq!(header.ar_count, 1);

        // to
        let values = test_to_network!(header);
        assert_eq!(values.0, crate::util::get_sample_slice(PACKET));
        assert_eq!(values.1, 12);
    }

    fn decode_name_at(sample: &[u8], position: u64) -> (DomainName<'_>, u64) {
        let mut buffer = Cursor::new(sample);
        buffer.seek(SeekFrom::Start(position)).unwrap();

        let mut dn = DomainName::default();
        dn.from_network_bytes(&mut buffer).unwrap();
        (dn, buffer.position())
    }

    #[test]
    fn domain_name() {
        // plain labels: 0x06 google 0x03 com 0x00
        let (dn, position) = decode_name_at(SAMPLE, 12);
        assert_eq!(dn.0, ["google", "com"]);
        assert_eq!(dn.to_string(), "google.com.");
        assert_eq!(position, 24);

        // a lone pointer: 0xc0 0x0c
        let (dn, position) = decode_name_at(SAMPLE, 28);
        assert_eq!(dn.0, ["google", "com"]);
        assert_eq!(position, 30);

        // labels ending with a pointer: 0x03 ns1 0xc0 0x0c
        let (dn, position) = decode_name_at(SAMPLE, 40);
        assert_eq!(dn.0, ["ns1", "google", "com"]);
        assert_eq!(position, 46);

        let (dn, position) = decode_name_at(SAMPLE, 46);
        assert_eq!(dn.0, ["dns-admin", "google", "com"]);
        assert_eq!(position, 58);
    }

    #[test]
    fn skip_name() {
        let mut buffer = Cursor::new(SAMPLE);
        buffer.seek(SeekFrom::Start(12)).unwrap();
        DomainName::skip(&mut buffer).unwrap();
        assert_eq!(buffer.position(), 24);

        buffer.seek(SeekFrom::Start(40)).unwrap();
        DomainName::skip(&mut buffer).unwrap();
        assert_eq!(buffer.position(), 46);
    }

    #[test]
    fn name_roundtrip() {
        let dn = DomainName::try_from("mail.example.com").unwrap();

        let mut buffer: Vec<u8> = Vec::new();
        let written = dn.to_network_bytes(&mut buffer).unwrap();
        assert_eq!(written, dn.len());

        let mut cursor = Cursor::new(buffer.as_slice());
        let mut decoded = DomainName::default();
        decoded.from_network_bytes(&mut cursor).unwrap();
        assert_eq!(decoded, dn);
        assert_eq!(cursor.position() as usize, written);
    }

    #[test]
    fn empty_name() {
        let mut buffer: Vec<u8> = Vec::new();
        let dn = DomainName::default();
        assert_eq!(dn.to_network_bytes(&mut buffer).unwrap(), 1);
        assert_eq!(buffer, &[0x00]);

        let mut cursor = Cursor::new(buffer.as_slice());
        let mut decoded = DomainName::default();
        decoded.from_network_bytes(&mut cursor).unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn label_limits_on_the_wire() {
        // 0x3F + 63 bytes is the longest legal label
        let mut wire = vec![0x3F];
        wire.extend_from_slice(&[b'a'; 63]);
        wire.push(0x00);

        let mut buffer = Cursor::new(wire.as_slice());
        let mut dn = DomainName::default();
        dn.from_network_bytes(&mut buffer).unwrap();
        assert_eq!(dn.0.len(), 1);
        assert_eq!(dn.0[0].len(), 63);

        // 0x40 is not a length: the 01 top-bit combination is reserved
        let wire = [0x40, 0x00];
        let mut buffer = Cursor::new(wire.as_slice());
        let mut dn = DomainName::default();
        let err = dn.from_network_bytes(&mut buffer).unwrap_err();
        assert!(matches!(
            err,
            DNSError::DNSInternalError(InternalError::InvalidLabelType(0x40))
        ));

        // same for the 10 combination
        let wire = [0x80, 0x00];
        let mut buffer = Cursor::new(wire.as_slice());
        let mut dn = DomainName::default();
        let err = dn.from_network_bytes(&mut buffer).unwrap_err();
        assert!(matches!(
            err,
            DNSError::DNSInternalError(InternalError::InvalidLabelType(0x80))
        ));
    }

    #[test]
    fn name_length_limit_on_the_wire() {
        // three 63-byte labels + one 61-byte label = 255 wire bytes: accepted
        let mut wire = Vec::new();
        for _ in 0..3 {
            wire.push(0x3F);
            wire.extend_from_slice(&[b'a'; 63]);
        }
        wire.push(61);
        wire.extend_from_slice(&[b'a'; 61]);
        wire.push(0x00);
        assert_eq!(wire.len(), 255);

        let mut buffer = Cursor::new(wire.as_slice());
        let mut dn = DomainName::default();
        dn.from_network_bytes(&mut buffer).unwrap();
        assert_eq!(dn.len(), 255);

        // one more byte in the last label tips it over
        let mut wire = Vec::new();
        for _ in 0..3 {
            wire.push(0x3F);
            wire.extend_from_slice(&[b'a'; 63]);
        }
        wire.push(62);
        wire.extend_from_slice(&[b'a'; 62]);
        wire.push(0x00);

        let mut buffer = Cursor::new(wire.as_slice());
        let mut dn = DomainName::default();
        let err = dn.from_network_bytes(&mut buffer).unwrap_err();
        assert!(matches!(
            err,
            DNSError::DNSInternalError(InternalError::NameTooLong)
        ));
    }

    #[test]
    fn oversized_label_rejected_on_encode() {
        let mut dn = DomainName::default();
        dn.0.push(Cow::Owned("a".repeat(64)));

        let mut buffer: Vec<u8> = Vec::new();
        let err = dn.to_network_bytes(&mut buffer).unwrap_err();
        assert!(matches!(
            err,
            DNSError::DNSInternalError(InternalError::LabelTooLong)
        ));
    }

    #[test]
    fn forward_pointer_rejected() {
        // a pointer at offset 0 jumping forward to offset 12
        let wire = [0xC0, 0x0C, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];
        let mut buffer = Cursor::new(wire.as_slice());
        let mut dn = DomainName::default();
        let err = dn.from_network_bytes(&mut buffer).unwrap_err();
        assert!(matches!(
            err,
            DNSError::DNSInternalError(InternalError::InvalidPointer)
        ));
    }

    #[test]
    fn self_pointer_rejected() {
        // the name at offset 12 is a pointer to offset 12 itself
        let mut wire = vec![0u8; 12];
        wire.extend_from_slice(&[0xC0, 0x0C]);

        let mut buffer = Cursor::new(wire.as_slice());
        buffer.seek(SeekFrom::Start(12)).unwrap();
        let mut dn = DomainName::default();
        let err = dn.from_network_bytes(&mut buffer).unwrap_err();
        assert!(matches!(
            err,
            DNSError::DNSInternalError(InternalError::InvalidPointer)
        ));
    }

    #[test]
    fn pointer_cycle_rejected() {
        // offset 12 holds labels that run into a pointer back to offset 12:
        // following it twice would loop forever
        let mut wire = vec![0u8; 12];
        wire.extend_from_slice(&[0x01, b'a', 0xC0, 0x0C]);
        wire.extend_from_slice(&[0xC0, 0x0C]);

        let mut buffer = Cursor::new(wire.as_slice());
        buffer.seek(SeekFrom::Start(16)).unwrap();
        let mut dn = DomainName::default();
        let err = dn.from_network_bytes(&mut buffer).unwrap_err();
        assert!(matches!(
            err,
            DNSError::DNSInternalError(InternalError::InvalidPointer)
        ));
    }

    #[test]
    fn flags_word_roundtrip() {
        // every 16-bit word survives decode + encode unchanged, including
        // opcode/rcode values outside the registry and non-zero Z bits
        for word in 0..=u16::MAX {
            let bytes = word.to_be_bytes();
            let mut buffer = Cursor::new(&bytes[..]);

            let mut flags = DNSPacketFlags::default();
            flags.from_network_bytes(&mut buffer).unwrap();

            let mut encoded: Vec<u8> = Vec::new();
            flags.to_network_bytes(&mut encoded).unwrap();
            assert_eq!(encoded, bytes, "word {:#06x} did not round-trip", word);
        }
    }

    #[test]
    fn packet_decode() {
        // a reply for "example.com. IN A" with a compressed answer name
        let mut wire = vec![
            0x12, 0x34, 0x81, 0x80, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00,
        ];
        wire.extend_from_slice(&[
            0x07, b'e', b'x', b'a', b'm', b'p', b'l', b'e', 0x03, b'c', b'o', b'm', 0x00,
        ]);
        wire.extend_from_slice(&[0x00, 0x01, 0x00, 0x01]);
        wire.extend_from_slice(&[
            0xC0, 0x0C, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0x0E, 0x10, 0x00, 0x04, 0x5D, 0xB8,
            0xD8, 0x22,
        ]);

        let mut buffer = Cursor::new(wire.as_slice());
        let mut message = DNSMessage::default();
        message.from_network_bytes(&mut buffer).unwrap();

        // every section is as long as its header counter says
        assert_eq!(message.header.id, 0x1234);
        assert_eq!(message.questions.len(), message.header.qd_count as usize);
        assert_eq!(message.answers.len(), message.header.an_count as usize);
        assert_eq!(message.nameservers.len(), 0);
        assert_eq!(message.additionals.len(), 0);

        assert_eq!(message.questions[0].name.0, ["example", "com"]);
        assert_eq!(message.questions[0].r#type, QType::A);

        let answer = &message.answers[0];
        assert_eq!(answer.name.0, ["example", "com"]);
        assert_eq!(answer.ttl, 3600);
        assert_eq!(answer.rd_length, 4);

        // RDATA is captured untyped, with its absolute offset
        match &answer.rd_data {
            RecordData::Opaque(opaque) => {
                assert_eq!(opaque.offset, 41);
                assert_eq!(opaque.bytes(), &[0x5D, 0xB8, 0xD8, 0x22]);
            }
            RecordData::Typed(_) => panic!("decode must not type RDATA eagerly"),
        }

        // typed on demand
        assert_eq!(
            answer.rdata().unwrap(),
            RData::A(Ipv4Addr::new(93, 184, 216, 34))
        );
    }

    #[test]
    fn truncated_rdata_rejected() {
        // rd_length says 4 bytes but only 2 are left
        let mut wire = vec![0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0x0E, 0x10, 0x00, 0x04];
        wire.extend_from_slice(&[0x5D, 0xB8]);

        let mut buffer = Cursor::new(wire.as_slice());
        let mut record = DNSResourceRecord::default();
        let err = record.from_network_bytes(&mut buffer).unwrap_err();
        assert!(matches!(
            err,
            DNSError::DNSInternalError(InternalError::UnexpectedEof)
        ));
    }
}
