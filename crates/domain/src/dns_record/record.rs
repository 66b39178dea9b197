use super::RecordType;
use std::net::Ipv4Addr;

/// Type-specific payload of a resource record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordData {
    A(Ipv4Addr),
    Cname(String),
    Mx { preference: u16, exchange: String },
    Ptr(String),
    /// Payload of a type this resolver does not interpret; only its length is kept.
    Unknown { raw_len: u16 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsRecord {
    pub name: String,

    pub rtype: RecordType,

    pub class: u16,

    pub ttl: u32,

    pub data: RecordData,
}

impl DnsRecord {
    pub fn new(name: impl Into<String>, rtype: RecordType, class: u16, ttl: u32, data: RecordData) -> Self {
        Self {
            name: name.into(),
            rtype,
            class,
            ttl,
            data,
        }
    }

    pub fn a(name: impl Into<String>, ttl: u32, ip: Ipv4Addr) -> Self {
        Self::new(name, RecordType::A, super::CLASS_IN, ttl, RecordData::A(ip))
    }

    pub fn cname(name: impl Into<String>, ttl: u32, target: impl Into<String>) -> Self {
        Self::new(
            name,
            RecordType::CNAME,
            super::CLASS_IN,
            ttl,
            RecordData::Cname(target.into()),
        )
    }

    pub fn mx(name: impl Into<String>, ttl: u32, preference: u16, exchange: impl Into<String>) -> Self {
        Self::new(
            name,
            RecordType::MX,
            super::CLASS_IN,
            ttl,
            RecordData::Mx {
                preference,
                exchange: exchange.into(),
            },
        )
    }

    pub fn ptr(name: impl Into<String>, ttl: u32, target: impl Into<String>) -> Self {
        Self::new(
            name,
            RecordType::PTR,
            super::CLASS_IN,
            ttl,
            RecordData::Ptr(target.into()),
        )
    }

    pub fn ipv4(&self) -> Option<Ipv4Addr> {
        match self.data {
            RecordData::A(ip) => Some(ip),
            _ => None,
        }
    }

    /// Target name of a CNAME or PTR record.
    pub fn target(&self) -> Option<&str> {
        match &self.data {
            RecordData::Cname(target) | RecordData::Ptr(target) => Some(target),
            _ => None,
        }
    }

    pub fn name_matches(&self, other: &str) -> bool {
        self.name.eq_ignore_ascii_case(other)
    }
}
