//! A client-side DNS library: the RFC1035 wire codec (serialize/deserialize
//! DNS messages, domain name compression on the decode path, lazily typed
//! RDATA) plus the thin plumbing the `dnsdig` front-ends need to query a
//! recursive resolver over UDP.
pub mod error;
pub mod macros;
pub mod message;
pub mod name_pool;
pub mod network_order;
pub mod rdata;
pub mod resolver;
pub mod rfc1035;
pub mod util;
