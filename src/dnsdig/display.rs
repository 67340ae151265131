//! Display method: as we can't impl the Display trait outside the module where it's defined, and
//! to not put these methods in the lib, use a wrapper
use std::fmt;

use dnsdig::rdata::RData;
use dnsdig::rfc1035::{DNSPacketFlags, DNSPacketHeader, DNSResourceRecord, PacketType};

pub struct DisplayWrapper<'a, T>(pub &'a T);

impl fmt::Display for DisplayWrapper<'_, DNSPacketHeader> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // output depends on whether it's a query or a response
        // because some fields are unnecessary when Query or Response
        write!(f, "id:{:X}({}) ", self.0.id, self.0.id)?;
        write!(f, "flags:[{}] ", DisplayWrapper(&self.0.flags))?;

        if self.0.flags.packet_type == PacketType::Query {
            write!(f, "qd:{}", self.0.qd_count)
        } else {
            write!(
                f,
                "qd:{} an:{} ns:{} ar:{}",
                self.0.qd_count, self.0.an_count, self.0.ns_count, self.0.ar_count
            )
        }
    }
}

impl fmt::Display for DisplayWrapper<'_, DNSPacketFlags> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ", self.0.packet_type)?;

        if self.0.packet_type == PacketType::Query {
            write!(
                f,
                "opcode:{} rd:{}",
                self.0.op_code, self.0.recursion_desired
            )
        } else {
            write!(
                f,
                "opcode:{} tc:{} ra:{} rcode:{}",
                self.0.op_code, self.0.truncated, self.0.recursion_available, self.0.response_code
            )
        }
    }
}

impl fmt::Display for DisplayWrapper<'_, RData<'_>> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            RData::A(ip) => write!(f, "{}", ip),
            RData::AAAA(ip) => write!(f, "{}", ip),
            RData::NS(name)
            | RData::CNAME(name)
            | RData::PTR(name)
            | RData::MD(name)
            | RData::MF(name)
            | RData::MB(name)
            | RData::MG(name)
            | RData::MR(name) => write!(f, "{}", name),
            RData::SOA(soa) => write!(
                f,
                "{} {} {} {} {} {} {}",
                soa.mname, soa.rname, soa.serial, soa.refresh, soa.retry, soa.expire, soa.minimum
            ),
            RData::MX(mx) => write!(f, "{} {}", mx.preference, mx.exchange),
            RData::SRV(srv) => write!(
                f,
                "{} {} {} {}",
                srv.priority, srv.weight, srv.port, srv.target
            ),
            RData::TXT(strings) => {
                let quoted: Vec<String> = strings.iter().map(|s| format!("\"{}\"", s)).collect();
                write!(f, "{}", quoted.join(" "))
            }
        }
    }
}

// One answer as a zone-file line
pub fn zone_line(record: &DNSResourceRecord, rdata: &RData) -> String {
    format!(
        "{}\t{}\t{}\t{}\t{}",
        record.name,
        record.ttl,
        record.class,
        record.r#type,
        DisplayWrapper(rdata)
    )
}
