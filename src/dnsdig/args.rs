//! Manage command line arguments here.
use clap::{App, Arg};
use std::net::IpAddr;
use std::str::FromStr;

use dnsdig::{error::DNSResult, rfc1035::QType};

/// This structure holds the command line arguments.
#[derive(Debug, Default)]
pub struct CliOptions {
    pub domain: String,
    pub qtype: QType,
    pub servers: Vec<IpAddr>,
    pub debug: bool,
}

impl CliOptions {
    pub fn options() -> DNSResult<Self> {
        let matches = App::new("dnsdig")
            .version("0.1")
            .about("A simple DNS query client")
            .arg(
                Arg::new("domain")
                    .required(true)
                    .index(1)
                    .long_help("Domain to query"),
            )
            .arg(
                Arg::new("qtype")
                    .required(true)
                    .index(2)
                    .long_help("Query type: A, AAAA, MX, SRV, TXT, NS, CNAME, PTR, SOA, ..."),
            )
            .arg(
                Arg::new("dns")
                    .short('s')
                    .long("dns")
                    .required(false)
                    .takes_value(true)
                    .multiple_occurrences(true)
                    .long_help("DNS server to address instead of the resolv.conf ones (repeatable)"),
            )
            .get_matches();

        // save all cli options into a structure
        let mut options = CliOptions::default();

        options.domain = String::from(matches.value_of("domain").unwrap());
        options.qtype = QType::from_str(&matches.value_of("qtype").unwrap().to_uppercase())?;
        if let Some(servers) = matches.values_of("dns") {
            for server in servers {
                options.servers.push(IpAddr::from_str(server)?);
            }
        }
        options.debug = std::env::var("DEBUG").map_or(false, |v| v == "1");

        Ok(options)
    }
}
