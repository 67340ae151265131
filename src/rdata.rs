//! Typed RDATA.
//!
//! Packet decoding leaves every RDATA as raw bytes plus its absolute offset
//! in the message. Typing happens here, on demand, so the caller only pays
//! for the records it reads and a record type the codec doesn't know can't
//! make the enclosing packet undecodable.
use std::io::{Cursor, Seek, SeekFrom};
use std::net::{Ipv4Addr, Ipv6Addr};

use crate::error::{DNSResult, InternalError};
use crate::name_pool::NamePool;
use crate::network_order::{FromNetworkOrder, ToNetworkOrder};
use crate::rfc1035::{CharacterString, DomainName, OpaqueRdata, QType, MX, SOA, SRV};

#[derive(Debug, Clone, PartialEq)]
pub enum RData<'a> {
    A(Ipv4Addr),
    AAAA(Ipv6Addr),
    NS(DomainName<'a>),
    CNAME(DomainName<'a>),
    PTR(DomainName<'a>),
    MD(DomainName<'a>),
    MF(DomainName<'a>),
    MB(DomainName<'a>),
    MG(DomainName<'a>),
    MR(DomainName<'a>),
    SOA(SOA<'a>),
    MX(MX<'a>),
    SRV(SRV<'a>),
    // a TXT RDATA is a sequence of character strings, in wire order
    TXT(Vec<CharacterString<'a>>),
}

impl<'a> RData<'a> {
    pub fn qtype(&self) -> QType {
        match self {
            RData::A(_) => QType::A,
            RData::AAAA(_) => QType::AAAA,
            RData::NS(_) => QType::NS,
            RData::CNAME(_) => QType::CNAME,
            RData::PTR(_) => QType::PTR,
            RData::MD(_) => QType::MD,
            RData::MF(_) => QType::MF,
            RData::MB(_) => QType::MB,
            RData::MG(_) => QType::MG,
            RData::MR(_) => QType::MR,
            RData::SOA(_) => QType::SOA,
            RData::MX(_) => QType::MX,
            RData::SRV(_) => QType::SRV,
            RData::TXT(_) => QType::TXT,
        }
    }

    /// Type an opaque RDATA. Names borrow from the packet buffer.
    ///
    /// The cursor is built over the whole message and seeked to the RDATA:
    /// that way a name inside the RDATA can follow its compression pointers
    /// into the earlier parts of the message.
    pub fn from_opaque(qtype: QType, opaque: &OpaqueRdata<'a>) -> DNSResult<RData<'a>> {
        let mut buffer = Cursor::new(opaque.message);
        buffer.seek(SeekFrom::Start(opaque.offset as u64))?;

        match qtype {
            QType::A => {
                if opaque.length != 4 {
                    return Err(InternalError::UnexpectedEof.into());
                }
                let mut octets = [0u8; 4];
                octets.from_network_bytes(&mut buffer)?;
                Ok(RData::A(Ipv4Addr::from(octets)))
            }
            QType::AAAA => {
                if opaque.length != 16 {
                    return Err(InternalError::UnexpectedEof.into());
                }
                let mut octets = [0u8; 16];
                octets.from_network_bytes(&mut buffer)?;
                Ok(RData::AAAA(Ipv6Addr::from(octets)))
            }
            QType::NS => Ok(RData::NS(decode_name(&mut buffer)?)),
            QType::CNAME => Ok(RData::CNAME(decode_name(&mut buffer)?)),
            QType::PTR => Ok(RData::PTR(decode_name(&mut buffer)?)),
            QType::MD => Ok(RData::MD(decode_name(&mut buffer)?)),
            QType::MF => Ok(RData::MF(decode_name(&mut buffer)?)),
            QType::MB => Ok(RData::MB(decode_name(&mut buffer)?)),
            QType::MG => Ok(RData::MG(decode_name(&mut buffer)?)),
            QType::MR => Ok(RData::MR(decode_name(&mut buffer)?)),
            QType::SOA => {
                let mut soa = SOA::default();
                soa.from_network_bytes(&mut buffer)?;
                Ok(RData::SOA(soa))
            }
            QType::MX => {
                let mut mx = MX::default();
                mx.from_network_bytes(&mut buffer)?;
                Ok(RData::MX(mx))
            }
            QType::SRV => {
                let mut srv = SRV::default();
                srv.from_network_bytes(&mut buffer)?;
                Ok(RData::SRV(srv))
            }
            QType::TXT => {
                let end = opaque.offset + opaque.length as usize;
                let mut strings = Vec::new();

                while (buffer.position() as usize) < end {
                    let mut string = CharacterString::default();
                    string.from_network_bytes(&mut buffer)?;
                    // a string may not run past its RDATA
                    if buffer.position() as usize > end {
                        return Err(InternalError::UnexpectedEof.into());
                    }
                    strings.push(string);
                }

                Ok(RData::TXT(strings))
            }
            // a numeric code we have no name for: the caller keeps the bytes
            QType::Unknown(code) => Err(InternalError::UnknownResourceType(code).into()),
            // a type we know of but don't type; the opaque bytes stay available
            unsupported => Err(InternalError::UnsupportedResourceType(unsupported).into()),
        }
    }

    /// Same as [`RData::from_opaque`], with every name interned into `pool`
    /// so the result does not borrow the packet buffer.
    pub fn from_opaque_pooled(
        qtype: QType,
        opaque: &OpaqueRdata<'_>,
        pool: &mut NamePool,
    ) -> DNSResult<RData<'static>> {
        Ok(RData::from_opaque(qtype, opaque)?.into_pooled(pool))
    }

    /// Move every borrowed name and string into owned storage via `pool`.
    pub fn into_pooled(self, pool: &mut NamePool) -> RData<'static> {
        match self {
            RData::A(ip) => RData::A(ip),
            RData::AAAA(ip) => RData::AAAA(ip),
            RData::NS(name) => RData::NS(pool.intern(&name)),
            RData::CNAME(name) => RData::CNAME(pool.intern(&name)),
            RData::PTR(name) => RData::PTR(pool.intern(&name)),
            RData::MD(name) => RData::MD(pool.intern(&name)),
            RData::MF(name) => RData::MF(pool.intern(&name)),
            RData::MB(name) => RData::MB(pool.intern(&name)),
            RData::MG(name) => RData::MG(pool.intern(&name)),
            RData::MR(name) => RData::MR(pool.intern(&name)),
            RData::SOA(soa) => RData::SOA(SOA {
                mname: pool.intern(&soa.mname),
                rname: pool.intern(&soa.rname),
                serial: soa.serial,
                refresh: soa.refresh,
                retry: soa.retry,
                expire: soa.expire,
                minimum: soa.minimum,
            }),
            RData::MX(mx) => RData::MX(MX {
                preference: mx.preference,
                exchange: pool.intern(&mx.exchange),
            }),
            RData::SRV(srv) => RData::SRV(SRV {
                priority: srv.priority,
                weight: srv.weight,
                port: srv.port,
                target: pool.intern(&srv.target),
            }),
            RData::TXT(strings) => {
                RData::TXT(strings.into_iter().map(|s| s.into_owned()).collect())
            }
        }
    }
}

fn decode_name<'a>(buffer: &mut Cursor<&'a [u8]>) -> DNSResult<DomainName<'a>> {
    let mut name = DomainName::default();
    name.from_network_bytes(buffer)?;
    Ok(name)
}

// a name-bearing RDATA with no name in it cannot be put on the wire
fn encode_name(name: &DomainName<'_>, buffer: &mut Vec<u8>) -> DNSResult<usize> {
    if name.is_empty() {
        return Err(InternalError::MissingData.into());
    }
    name.to_network_bytes(buffer)
}

impl<'a> ToNetworkOrder for RData<'a> {
    fn to_network_bytes(&self, buffer: &mut Vec<u8>) -> DNSResult<usize> {
        match self {
            RData::A(ip) => ip.octets().to_network_bytes(buffer),
            RData::AAAA(ip) => ip.octets().to_network_bytes(buffer),
            RData::NS(name)
            | RData::CNAME(name)
            | RData::PTR(name)
            | RData::MD(name)
            | RData::MF(name)
            | RData::MB(name)
            | RData::MG(name)
            | RData::MR(name) => encode_name(name, buffer),
            RData::SOA(soa) => {
                if soa.mname.is_empty() || soa.rname.is_empty() {
                    return Err(InternalError::MissingData.into());
                }
                soa.to_network_bytes(buffer)
            }
            RData::MX(mx) => {
                if mx.exchange.is_empty() {
                    return Err(InternalError::MissingData.into());
                }
                mx.to_network_bytes(buffer)
            }
            RData::SRV(srv) => {
                if srv.target.is_empty() {
                    return Err(InternalError::MissingData.into());
                }
                srv.to_network_bytes(buffer)
            }
            RData::TXT(strings) => {
                let mut length = 0usize;
                for string in strings {
                    length += string.to_network_bytes(buffer)?;
                }
                Ok(length)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DNSError;

    // a message whose question name "example.com." sits at offset 12, so
    // RDATA under test can point back at it with 0xC0 0x0C
    fn message_with_rdata(rdata: &[u8]) -> (Vec<u8>, usize) {
        let mut message = vec![0u8; 12];
        message.extend_from_slice(&[
            0x07, b'e', b'x', b'a', b'm', b'p', b'l', b'e', 0x03, b'c', b'o', b'm', 0x00,
        ]);
        let offset = message.len();
        message.extend_from_slice(rdata);
        (message, offset)
    }

    #[test]
    fn a_record() {
        let (message, offset) = message_with_rdata(&[93, 184, 216, 34]);
        let opaque = OpaqueRdata {
            message: message.as_slice(),
            offset,
            length: 4,
        };

        let rdata = RData::from_opaque(QType::A, &opaque).unwrap();
        assert_eq!(rdata, RData::A(Ipv4Addr::new(93, 184, 216, 34)));
        assert_eq!(rdata.qtype(), QType::A);

        // a wrong length is a malformed record
        let opaque = OpaqueRdata {
            message: message.as_slice(),
            offset,
            length: 3,
        };
        let err = RData::from_opaque(QType::A, &opaque).unwrap_err();
        assert!(matches!(
            err,
            DNSError::DNSInternalError(InternalError::UnexpectedEof)
        ));
    }

    #[test]
    fn mx_record_with_compressed_exchange() {
        // preference 10, exchange pointing at the question name
        let (message, offset) = message_with_rdata(&[0x00, 0x0A, 0xC0, 0x0C]);
        let opaque = OpaqueRdata {
            message: message.as_slice(),
            offset,
            length: 4,
        };

        let rdata = RData::from_opaque(QType::MX, &opaque).unwrap();
        match rdata {
            RData::MX(ref mx) => {
                assert_eq!(mx.preference, 10);
                assert_eq!(mx.exchange.0, ["example", "com"]);
            }
            _ => panic!("expected an MX body"),
        }
    }

    #[test]
    fn srv_record_with_compressed_target() {
        // priority 5, weight 10, port 8080, target pointing at the question name
        let (message, offset) = message_with_rdata(&[0x00, 0x05, 0x00, 0x0A, 0x1F, 0x90, 0xC0, 0x0C]);
        let opaque = OpaqueRdata {
            message: message.as_slice(),
            offset,
            length: 8,
        };

        let rdata = RData::from_opaque(QType::SRV, &opaque).unwrap();
        match rdata {
            RData::SRV(ref srv) => {
                assert_eq!(srv.priority, 5);
                assert_eq!(srv.weight, 10);
                assert_eq!(srv.port, 8080);
                assert_eq!(srv.target.0, ["example", "com"]);
            }
            _ => panic!("expected an SRV body"),
        }
    }

    #[test]
    fn txt_record_with_several_strings() {
        let (message, offset) = message_with_rdata(&[
            0x03, b'f', b'o', b'o', 0x05, b'h', b'e', b'l', b'l', b'o',
        ]);
        let opaque = OpaqueRdata {
            message: message.as_slice(),
            offset,
            length: 10,
        };

        let rdata = RData::from_opaque(QType::TXT, &opaque).unwrap();
        assert_eq!(
            rdata,
            RData::TXT(vec![
                CharacterString::from("foo"),
                CharacterString::from("hello")
            ])
        );
    }

    #[test]
    fn txt_string_must_stay_inside_its_rdata() {
        // the string claims 8 bytes but the RDATA holds 4
        let (message, offset) = message_with_rdata(&[0x08, b'f', b'o', b'o', 0x00, 0x00, 0x00, 0x00]);
        let opaque = OpaqueRdata {
            message: message.as_slice(),
            offset,
            length: 4,
        };

        let err = RData::from_opaque(QType::TXT, &opaque).unwrap_err();
        assert!(matches!(
            err,
            DNSError::DNSInternalError(InternalError::UnexpectedEof)
        ));
    }

    #[test]
    fn txt_length_limits() {
        let long = "a".repeat(255);
        let rdata = RData::TXT(vec![CharacterString::from(long.as_str())]);

        let mut buffer: Vec<u8> = Vec::new();
        assert_eq!(rdata.to_network_bytes(&mut buffer).unwrap(), 256);

        // and back
        let opaque = OpaqueRdata {
            message: buffer.as_slice(),
            offset: 0,
            length: 256,
        };
        assert_eq!(RData::from_opaque(QType::TXT, &opaque).unwrap(), rdata);

        // one byte more does not fit the length prefix
        let too_long = "a".repeat(256);
        let rdata = RData::TXT(vec![CharacterString::from(too_long.as_str())]);
        let mut buffer: Vec<u8> = Vec::new();
        let err = rdata.to_network_bytes(&mut buffer).unwrap_err();
        assert!(matches!(
            err,
            DNSError::DNSInternalError(InternalError::Overflow)
        ));
    }

    #[test]
    fn unsupported_and_unknown_types() {
        let (message, offset) = message_with_rdata(&[0x00, 0x00]);
        let opaque = OpaqueRdata {
            message: message.as_slice(),
            offset,
            length: 2,
        };

        let err = RData::from_opaque(QType::HINFO, &opaque).unwrap_err();
        assert!(matches!(
            err,
            DNSError::DNSInternalError(InternalError::UnsupportedResourceType(QType::HINFO))
        ));

        let err = RData::from_opaque(QType::Unknown(999), &opaque).unwrap_err();
        assert!(matches!(
            err,
            DNSError::DNSInternalError(InternalError::UnknownResourceType(999))
        ));
    }

    #[test]
    fn missing_name_rejected_on_encode() {
        let mut buffer: Vec<u8> = Vec::new();
        let err = RData::MX(MX::default())
            .to_network_bytes(&mut buffer)
            .unwrap_err();
        assert!(matches!(
            err,
            DNSError::DNSInternalError(InternalError::MissingData)
        ));

        let mut buffer: Vec<u8> = Vec::new();
        let err = RData::CNAME(DomainName::default())
            .to_network_bytes(&mut buffer)
            .unwrap_err();
        assert!(matches!(
            err,
            DNSError::DNSInternalError(InternalError::MissingData)
        ));
    }

    #[test]
    fn typed_rdata_roundtrip() {
        let rdata = RData::MX(MX {
            preference: 10,
            exchange: DomainName::try_from("mail.example.com").unwrap(),
        });

        let mut buffer: Vec<u8> = Vec::new();
        let written = rdata.to_network_bytes(&mut buffer).unwrap();
        assert_eq!(written, buffer.len());

        let opaque = OpaqueRdata {
            message: buffer.as_slice(),
            offset: 0,
            length: written as u16,
        };
        assert_eq!(RData::from_opaque(QType::MX, &opaque).unwrap(), rdata);
    }

    #[test]
    fn pooled_rdata_outlives_the_message() {
        let mut pool = NamePool::new();

        let owned = {
            let (message, offset) = message_with_rdata(&[0x00, 0x0A, 0xC0, 0x0C]);
            let opaque = OpaqueRdata {
                message: message.as_slice(),
                offset,
                length: 4,
            };
            RData::from_opaque_pooled(QType::MX, &opaque, &mut pool).unwrap()
            // message is dropped here
        };

        match owned {
            RData::MX(ref mx) => assert_eq!(mx.exchange.0, ["example", "com"]),
            _ => panic!("expected an MX body"),
        }
    }
}
