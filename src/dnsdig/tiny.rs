//! Minimal lookup front-end: one A/AAAA address per line, nothing else.
use std::env;
use std::process;

use dnsdig::{
    error::{DNSError, DNSResult},
    message::DNSMessage,
    rdata::RData,
    resolver,
    rfc1035::{QType, ResponseCode},
};

fn main() {
    let debug = env::var("DEBUG").map_or(false, |v| v == "1");
    let level = if debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new().filter_level(level).init();

    let domain = match env::args().nth(1) {
        Some(domain) => domain,
        None => {
            eprintln!("usage: dnsdig-tiny <name>");
            process::exit(2);
        }
    };

    match run(&domain) {
        // no address at all is a failure for scripts piping us
        Ok(0) => process::exit(1),
        Ok(_) => {}
        Err(err) => {
            eprintln!("dnsdig-tiny: {:?}", err);
            process::exit(1);
        }
    }
}

fn run(domain: &str) -> DNSResult<usize> {
    let servers = resolver::system_nameservers()?;
    let server = servers
        .first()
        .ok_or_else(|| DNSError::new("no nameserver in /etc/resolv.conf"))?;
    let socket = resolver::connect(*server)?;

    let mut printed = 0usize;
    for qtype in [QType::A, QType::AAAA] {
        let query = DNSMessage::query(domain, qtype)?;
        let incoming = resolver::exchange(&socket, &query)?;
        let response = incoming.message()?;

        if response.header.flags.response_code != ResponseCode::NoError {
            continue;
        }

        for answer in &response.answers {
            match answer.rdata() {
                Ok(RData::A(ip)) => {
                    println!("{}", ip);
                    printed += 1;
                }
                Ok(RData::AAAA(ip)) => {
                    println!("{}", ip);
                    printed += 1;
                }
                // CNAMEs and friends in the answer section are not addresses
                _ => {}
            }
        }
    }

    Ok(printed)
}
