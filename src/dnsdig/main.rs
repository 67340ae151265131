//! A DNS resource query tool: ask a recursive resolver and print the answer
//! section in zone-file form.
use std::io::Cursor;
use std::process;

use log::debug;

use dnsdig::{
    error::{DNSError, DNSResult},
    message::DNSMessage,
    resolver,
    rfc1035::ResponseCode,
    util::pretty_cursor,
};

mod args;
use args::CliOptions;

mod display;
use display::{zone_line, DisplayWrapper};

fn main() {
    // DEBUG=1 in the environment switches verbose logging on
    let debug = std::env::var("DEBUG").map_or(false, |v| v == "1");
    let level = if debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new().filter_level(level).init();

    if let Err(err) = run() {
        eprintln!("dnsdig: {:?}", err);
        process::exit(1);
    }
}

fn run() -> DNSResult<()> {
    // manage arguments from command line
    let options = CliOptions::options()?;
    debug!("options: {:?}", &options);

    // servers from the command line beat the resolv.conf ones
    let servers = if options.servers.is_empty() {
        resolver::system_nameservers()?
    } else {
        options.servers.clone()
    };
    if servers.is_empty() {
        return Err(DNSError::new(
            "no DNS server on the command line or in /etc/resolv.conf",
        ));
    }

    // create the query from command line arguments
    let query = DNSMessage::query(&options.domain, options.qtype)?;
    debug!("query: {:?}", &query);
    println!("QUERY: {}", DisplayWrapper(&query.header));

    // try each server in turn until one of them answers
    let mut incoming = None;
    for server in &servers {
        debug!("trying server {}", server);

        let socket = match resolver::connect(*server) {
            Ok(socket) => socket,
            Err(err) => {
                eprintln!("dnsdig: cannot reach {}: {:?}", server, err);
                continue;
            }
        };

        match resolver::exchange(&socket, &query) {
            Ok(packet) => {
                incoming = Some(packet);
                break;
            }
            Err(err) => eprintln!("dnsdig: no reply from {}: {:?}", server, err),
        }
    }
    let incoming = incoming.ok_or_else(|| DNSError::new("no server answered"))?;

    if options.debug {
        pretty_cursor(&Cursor::new(incoming.bytes()));
    }

    let response = incoming.message()?;
    println!("ANSWER: {}", DisplayWrapper(&response.header));

    // check return code
    if response.header.flags.response_code != ResponseCode::NoError {
        eprintln!(
            "dnsdig: server answered {}",
            response.header.flags.response_code
        );
        process::exit(1);
    }

    // display the answer section, one zone-file line per record
    for answer in &response.answers {
        match answer.rdata() {
            Ok(rdata) => println!("{}", zone_line(answer, &rdata)),
            // an answer the codec can't type is reported, not fatal
            Err(err) => println!("; {} record skipped ({:?})", answer.r#type, err),
        }
    }

    Ok(())
}
