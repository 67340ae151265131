//! Base structures for DNS messages. Taken from https://datatracker.ietf.org/doc/html/rfc1035
//!
//! The DnsStruct procedural macro automatically implements the ToNetworkOrder
//! & FromNetworkOrder traits field by field. The DnsEnum procedural macro
//! implements Default, the numeric conversions, FromStr and Display for the
//! code enums.
use std::borrow::Cow;
use std::fmt;

use crate::error::{DNSError, DNSResult, InternalError};
use crate::name_pool::NamePool;
use crate::network_order::{FromNetworkOrder, ToNetworkOrder};
use crate::rdata::RData;

use dnsdig_derive::{DnsEnum, DnsStruct};

// DNS packets carried over UDP are limited to 512 bytes (RFC1035 §4.2.1)
pub const MAX_DNS_PACKET_SIZE: usize = 512;

// limits on domain names (RFC1035 §2.3.4)
pub const MAX_LABEL_LENGTH: usize = 63;
pub const MAX_NAME_LENGTH: usize = 255;
pub const MAX_LABEL_COUNT: usize = 127;

// DNS packet header: https://datatracker.ietf.org/doc/html/rfc1035#section-4.1.1
#[derive(Debug, Default, Clone, Copy, PartialEq, DnsStruct)]
pub struct DNSPacketHeader {
    pub id: u16, // A 16 bit identifier assigned by the program that
    //   generates any kind of query.  This identifier is copied
    //   the corresponding reply and can be used by the requester
    //   to match up replies to outstanding queries.
    pub flags: DNSPacketFlags,
    pub qd_count: u16, // an unsigned 16 bit integer specifying the number of
    //    entries in the question section.
    pub an_count: u16, // an unsigned 16 bit integer specifying the number of
    // resource records in the answer section.
    pub ns_count: u16, // an unsigned 16 bit integer specifying the number of name
    // server resource records in the authority records section.
    pub ar_count: u16, // an unsigned 16 bit integer specifying the number of
                       // resource records in the additional records section.
}

// Flags: https://datatracker.ietf.org/doc/html/rfc1035#section-4.1.1
//
//                                1  1  1  1  1  1
//  0  1  2  3  4  5  6  7  8  9  0  1  2  3  4  5
// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
// |QR|   Opcode  |AA|TC|RD|RA|   Z    |   RCODE   |
// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct DNSPacketFlags {
    pub packet_type: PacketType, // A one bit field that specifies whether this message is a query (0), or a response (1).
    pub op_code: OpCode, // A four bit field that specifies kind of query in this
    //  message.  This value is set by the originator of a query
    //  and copied into the response.
    pub authorative_answer: bool, // Authoritative Answer - this bit is valid in responses,
    // and specifies that the responding name server is an
    // authority for the domain name in question section.
    pub truncated: bool, // TrunCation - specifies that this message was truncated
    // due to length greater than that permitted on the
    // transmission channel.
    pub recursion_desired: bool, // Recursion Desired - this bit may be set in a query and
    // is copied into the response.  If RD is set, it directs
    // the name server to pursue the query recursively.
    pub recursion_available: bool, // Recursion Available - this bit is set or cleared in a
    // response, and denotes whether recursive query support is
    // available in the name server.
    pub z: u8, // Reserved for future use.  Must be zero in all queries and responses.
    pub response_code: ResponseCode, // Response code - this 4 bit field is set as part of responses.
}

/// The flags' first bit is 0 or 1 meaning a question or a response. Better is to use an enum which is
/// both clearer and type oriented.
#[derive(Debug, Clone, Copy, PartialEq, DnsEnum)]
#[repr(u16)]
pub enum PacketType {
    Query = 0,
    Response = 1,
}

// op codes: https://www.iana.org/assignments/dns-parameters/dns-parameters.xhtml#dns-parameters-5
//
// Values outside the registry stay numeric in the Reserved wildcard so a
// reply carrying them still decodes and can be surfaced to the caller.
#[derive(Debug, Clone, Copy, PartialEq, DnsEnum)]
#[repr(u16)]
pub enum OpCode {
    Query = 0,  // [RFC1035]
    IQuery = 1, // (Inverse Query, OBSOLETE)	[RFC3425]
    Status = 2, // [RFC1035]
    Notify = 4, // [RFC1996]
    Update = 5, // [RFC2136]
    Reserved(u16),
}

// response codes: https://www.iana.org/assignments/dns-parameters/dns-parameters.xhtml#dns-parameters-6
#[derive(Debug, Clone, Copy, PartialEq, DnsEnum)]
#[repr(u16)]
pub enum ResponseCode {
    NoError = 0,  // No Error	[RFC1035]
    FormErr = 1,  // Format Error	[RFC1035]
    ServFail = 2, // Server Failure	[RFC1035]
    NXDomain = 3, // Non-Existent Domain	[RFC1035]
    NotImp = 4,   // Not Implemented	[RFC1035]
    Refused = 5,  // Query Refused	[RFC1035]
    Reserved(u16),
}

// RR type codes: https://www.iana.org/assignments/dns-parameters/dns-parameters.xhtml#dns-parameters-4
#[derive(Debug, Copy, Clone, PartialEq, DnsEnum)]
#[repr(u16)]
pub enum QType {
    A = 1,        // a host address	[RFC1035]
    NS = 2,       // an authoritative name server	[RFC1035]
    MD = 3,       // a mail destination (OBSOLETE - use MX)	[RFC1035]
    MF = 4,       // a mail forwarder (OBSOLETE - use MX)	[RFC1035]
    CNAME = 5,    // the canonical name for an alias	[RFC1035]
    SOA = 6,      // marks the start of a zone of authority	[RFC1035]
    MB = 7,       // a mailbox domain name (EXPERIMENTAL)	[RFC1035]
    MG = 8,       // a mail group member (EXPERIMENTAL)	[RFC1035]
    MR = 9,       // a mail rename domain name (EXPERIMENTAL)	[RFC1035]
    NULL = 10,    // a null RR (EXPERIMENTAL)	[RFC1035]
    WKS = 11,     // a well known service description	[RFC1035]
    PTR = 12,     // a domain name pointer	[RFC1035]
    HINFO = 13,   // host information	[RFC1035]
    MINFO = 14,   // mailbox or mail list information	[RFC1035]
    MX = 15,      // mail exchange	[RFC1035]
    TXT = 16,     // text strings	[RFC1035]
    AAAA = 28,    // IP6 Address	[RFC3596]
    SRV = 33,     // Server Selection	[RFC2782]
    OPT = 41,     // OPT pseudo-RR	[RFC6891]
    AXFR = 252,   // transfer of an entire zone	[RFC1035][RFC5936]
    MAILB = 253,  // mailbox-related RRs (MB, MG or MR)	[RFC1035]
    MAILA = 254,  // mail agent RRs (OBSOLETE - see MX)	[RFC1035]
    ANY = 255,    // A request for some or all records the server has available	[RFC1035]
    Unknown(u16), // anything else the IANA registry knows and we don't
}

// RR Class values: https://datatracker.ietf.org/doc/html/rfc1035#section-3.2.4
#[derive(Debug, Copy, Clone, PartialEq, DnsEnum)]
#[repr(u16)]
pub enum QClass {
    IN = 1, // the Internet
    CS = 2, // the CSNET class (Obsolete - used only for examples in some obsolete RFCs)
    CH = 3, // the CHAOS class
    HS = 4, // Hesiod [Dyer 87]
    ANY = 255,
    Unknown(u16),
}

// Character string as described in: https://datatracker.ietf.org/doc/html/rfc1035#section-3.3
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CharacterString<'a>(pub Cow<'a, str>);

impl<'a> CharacterString<'a> {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_owned(self) -> CharacterString<'static> {
        CharacterString(Cow::Owned(self.0.into_owned()))
    }
}

/// ```
/// use dnsdig::rfc1035::CharacterString;
///
/// let cs = CharacterString::from("www");
/// assert_eq!(cs.len(), 3);
/// assert_eq!(cs.to_string(), "www");
/// ```
impl<'a> From<&'a str> for CharacterString<'a> {
    fn from(s: &'a str) -> Self {
        CharacterString(Cow::Borrowed(s))
    }
}

impl<'a> PartialEq<&str> for CharacterString<'a> {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl<'a> fmt::Display for CharacterString<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Domain name: https://datatracker.ietf.org/doc/html/rfc1035#section-3.1
//
// The root name is the empty label list. Labels borrow from the packet buffer
// (or the caller's string) on the zero-copy path and are owned once a
// NamePool interned them.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DomainName<'a>(pub Vec<Cow<'a, str>>);

impl<'a> DomainName<'a> {
    /// The length of the name on the wire, terminating zero included.
    pub fn len(&self) -> usize {
        self.0.iter().map(|label| label.len() + 1).sum::<usize>() + 1
    }

    /// True for the root name.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_owned(self) -> DomainName<'static> {
        DomainName(
            self.0
                .into_iter()
                .map(|label| Cow::Owned(label.into_owned()))
                .collect(),
        )
    }
}

/// ```
/// use dnsdig::rfc1035::DomainName;
///
/// let dn = DomainName::try_from("www.example.com").unwrap();
/// assert_eq!(dn.0, ["www", "example", "com"]);
/// assert_eq!(dn.to_string(), "www.example.com.");
///
/// // a single trailing dot is allowed and ignored
/// let dn = DomainName::try_from("www.google.ie.").unwrap();
/// assert_eq!(dn.to_string(), "www.google.ie.");
///
/// // the root
/// let dn = DomainName::try_from(".").unwrap();
/// assert!(dn.is_empty());
///
/// assert!(DomainName::try_from("").is_err());
/// assert!(DomainName::try_from("a..b").is_err());
/// ```
impl<'a> TryFrom<&'a str> for DomainName<'a> {
    type Error = DNSError;

    fn try_from(domain: &'a str) -> Result<Self, Self::Error> {
        // safeguard
        if domain.is_empty() {
            return Err(InternalError::EmptyDomainName.into());
        }

        // handle case for root domain
        if domain == "." {
            return Ok(DomainName::default());
        }

        let mut labels: Vec<&str> = domain.split('.').collect();

        // drop a single trailing empty label: "com." is "com"
        if labels.last() == Some(&"") {
            labels.pop();
        }

        let mut dn = DomainName::default();
        for label in labels {
            if label.is_empty() {
                return Err(InternalError::EmptyLabel.into());
            }
            if label.len() > MAX_LABEL_LENGTH {
                return Err(InternalError::LabelTooLong.into());
            }
            dn.0.push(Cow::Borrowed(label));
        }

        if dn.0.len() > MAX_LABEL_COUNT || dn.len() > MAX_NAME_LENGTH {
            return Err(InternalError::NameTooLong.into());
        }

        Ok(dn)
    }
}

impl<'a> fmt::Display for DomainName<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // if only the root
        if self.is_empty() {
            write!(f, ".")?;
        } else {
            for label in &self.0 {
                write!(f, "{}.", label)?;
            }
        }
        Ok(())
    }
}

//--------------------------------------------------------------------------------
// Question structure: https://datatracker.ietf.org/doc/html/rfc1035#section-4.1.2
//--------------------------------------------------------------------------------
#[derive(Debug, Default, Clone, PartialEq, DnsStruct)]
pub struct DNSQuestion<'a> {
    pub name: DomainName<'a>,
    pub r#type: QType,
    pub class: QClass,
}

impl<'a> DNSQuestion<'a> {
    /// Create a new question. By default, the IN class is used if None is provided
    /// as the qclass parameter
    pub fn new(domain: &'a str, qtype: QType, qclass: Option<QClass>) -> DNSResult<Self> {
        let dn = DomainName::try_from(domain)?;
        let question = DNSQuestion {
            name: dn,
            r#type: qtype,
            class: qclass.unwrap_or(QClass::IN),
        };

        Ok(question)
    }
}

//------------------------------------------------------------------------
// Resource records: https://datatracker.ietf.org/doc/html/rfc1035#section-4.1.3
//------------------------------------------------------------------------

// The raw RDATA of a record, kept untyped until the caller asks for it.
//
// A subslice of the message is not enough on its own: names inside RDATA may
// point back at earlier message bytes. So the whole message is kept alongside
// the (offset, length) pair locating the RDATA inside it.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct OpaqueRdata<'a> {
    pub message: &'a [u8],
    pub offset: usize,
    pub length: u16,
}

impl<'a> OpaqueRdata<'a> {
    /// The raw RDATA bytes.
    pub fn bytes(&self) -> &'a [u8] {
        &self.message[self.offset..self.offset + self.length as usize]
    }
}

// What a record carries: decoding always yields the opaque form, encoding
// accepts both.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordData<'a> {
    Opaque(OpaqueRdata<'a>),
    Typed(RData<'a>),
}

impl<'a> Default for RecordData<'a> {
    fn default() -> Self {
        RecordData::Opaque(OpaqueRdata::default())
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct DNSResourceRecord<'a> {
    pub name: DomainName<'a>, // an owner name, i.e., the name of the node to which this resource record pertains.
    pub r#type: QType,        // two octets containing one of the RR TYPE codes.
    pub class: QClass,        // two octets containing one of the RR CLASS codes.
    pub ttl: i32, // a 32 bit integer that specifies the time interval that the
    // resource record may be cached before the source of the
    // information should again be consulted.  Zero values are
    // interpreted to mean that the RR can only be used for the
    // transaction in progress, and should not be cached.
    pub rd_length: u16, // an unsigned 16 bit integer that specifies the length in octets of the RDATA field.
    pub rd_data: RecordData<'a>,
}

impl<'a> DNSResourceRecord<'a> {
    /// Type the record's RDATA, borrowing names from the packet buffer.
    pub fn rdata(&self) -> DNSResult<RData<'a>> {
        match &self.rd_data {
            RecordData::Typed(rdata) => Ok(rdata.clone()),
            RecordData::Opaque(opaque) => RData::from_opaque(self.r#type, opaque),
        }
    }

    /// Type the record's RDATA with every name interned into `pool`, so the
    /// result outlives the packet buffer.
    pub fn rdata_pooled(&self, pool: &mut NamePool) -> DNSResult<RData<'static>> {
        match &self.rd_data {
            RecordData::Typed(rdata) => Ok(rdata.clone().into_pooled(pool)),
            RecordData::Opaque(opaque) => RData::from_opaque_pooled(self.r#type, opaque, pool),
        }
    }
}

impl<'a> fmt::Display for DNSResourceRecord<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "NAME:{} TYPE:{} CLASS:{} TTL:{} RDLENGTH={}",
            self.name, self.r#type, self.class, self.ttl, self.rd_length
        )
    }
}

//------------------------------------------------------------------------
// The RR bodies the codec types, from RFC1035 and friends
//------------------------------------------------------------------------

// SOA RR: https://datatracker.ietf.org/doc/html/rfc1035#section-3.3.13
#[derive(Debug, Default, Clone, PartialEq, DnsStruct)]
pub struct SOA<'a> {
    pub mname: DomainName<'a>, // The <domain-name> of the name server that was the
    // original or primary source of data for this zone.
    pub rname: DomainName<'a>, // A <domain-name> which specifies the mailbox of the
    // person responsible for this zone.
    pub serial: u32, // The unsigned 32 bit version number of the original copy
    // of the zone.  Zone transfers preserve this value.
    pub refresh: u32, // A 32 bit time interval before the zone should be refreshed.
    pub retry: u32, // A 32 bit time interval that should elapse before a
    // failed refresh should be retried.
    pub expire: u32, // A 32 bit time value that specifies the upper limit on
    // the time interval that can elapse before the zone is no
    // longer authoritative.
    pub minimum: u32, // The unsigned 32 bit minimum TTL field that should be
                      // exported with any RR from this zone.
}

// MX RR: https://datatracker.ietf.org/doc/html/rfc1035#section-3.3.9
#[derive(Debug, Default, Clone, PartialEq, DnsStruct)]
pub struct MX<'a> {
    pub preference: u16, // A 16 bit integer which specifies the preference given to
    // this RR among others at the same owner.  Lower values are preferred.
    pub exchange: DomainName<'a>, // A <domain-name> which specifies a host willing to act as a mail exchange for the owner name.
}

// SRV RR: https://datatracker.ietf.org/doc/html/rfc2782
#[derive(Debug, Default, Clone, PartialEq, DnsStruct)]
pub struct SRV<'a> {
    pub priority: u16, // The priority of this target host.  A client MUST attempt to
    // contact the target host with the lowest-numbered priority it can reach.
    pub weight: u16, // A server selection mechanism, specifying a relative weight for
    // entries with the same priority.
    pub port: u16,                // The port on this target host of this service.
    pub target: DomainName<'a>,   // The domain name of the target host.
}
