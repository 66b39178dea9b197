use crate::dns_record::{DnsRecord, RecordData, RecordType, ResponseCode};

/// A decoded DNS response, or a locally synthesized failure carrying only an rcode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsMessage {
    pub id: u16,
    pub authoritative: bool,
    pub truncated: bool,
    pub rcode: ResponseCode,
    pub answers: Vec<DnsRecord>,
    pub authorities: Vec<DnsRecord>,
    pub additionals: Vec<DnsRecord>,
}

impl DnsMessage {
    pub fn new(id: u16, rcode: ResponseCode) -> Self {
        Self {
            id,
            authoritative: false,
            truncated: false,
            rcode,
            answers: Vec::new(),
            authorities: Vec::new(),
            additionals: Vec::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.rcode.is_success()
    }

    pub fn answers_of(&self, rtype: RecordType) -> impl Iterator<Item = &DnsRecord> {
        self.answers.iter().filter(move |r| r.rtype == rtype)
    }

    /// Records of `rtype` from every section, answers first.
    pub fn records_of(&self, rtype: RecordType) -> impl Iterator<Item = &DnsRecord> {
        self.answers
            .iter()
            .chain(&self.authorities)
            .chain(&self.additionals)
            .filter(move |r| r.rtype == rtype)
    }

    pub fn has_answers_of(&self, rtype: RecordType) -> bool {
        self.answers_of(rtype).next().is_some()
    }

    /// First A record in the additional section whose owner matches `name`, ignoring case.
    pub fn find_additional_a(&self, name: &str) -> Option<&DnsRecord> {
        self.additionals
            .iter()
            .find(|r| matches!(r.data, RecordData::A(_)) && r.name_matches(name))
    }

    /// Smallest TTL among the answers of `rtype`.
    pub fn min_ttl_of(&self, rtype: RecordType) -> Option<u32> {
        self.answers_of(rtype).map(|r| r.ttl).min()
    }
}
