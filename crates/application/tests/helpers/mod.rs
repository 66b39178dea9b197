#![allow(dead_code)]

mod mock_ports;

pub use mock_ports::{MemoryMailHostCache, MockDnsLookup, RecordingAlertSink};

use ferrous_mx_domain::{DnsMessage, DnsRecord, ResponseCode};
use std::net::Ipv4Addr;

pub fn ok_message(answers: Vec<DnsRecord>) -> DnsMessage {
    let mut message = DnsMessage::new(1, ResponseCode::NoError);
    message.answers = answers;
    message
}

pub fn ok_with_glue(answers: Vec<DnsRecord>, additionals: Vec<DnsRecord>) -> DnsMessage {
    let mut message = ok_message(answers);
    message.additionals = additionals;
    message
}

pub fn ip(a: u8, b: u8, c: u8, d: u8) -> Ipv4Addr {
    Ipv4Addr::new(a, b, c, d)
}
