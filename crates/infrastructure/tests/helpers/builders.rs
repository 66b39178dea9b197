use ferrous_mx_application::ports::{AlertSeverity, AlertSink, HostAddrLookup};
use ferrous_mx_domain::NameServerSpec;
use ferrous_mx_infrastructure::dns::wire::encode_name;
use ferrous_mx_infrastructure::dns::NameServerRegistry;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

/// Assembles raw response datagrams.
#[derive(Debug, Clone)]
pub struct ResponseBuilder {
    id: u16,
    flags: u8,
    rcode: u8,
    question: Option<(String, u16)>,
    answers: Vec<Vec<u8>>,
    authorities: Vec<Vec<u8>>,
    additionals: Vec<Vec<u8>>,
}

impl Default for ResponseBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseBuilder {
    pub fn new() -> Self {
        Self {
            id: 0,
            flags: 0x81,
            rcode: 0,
            question: None,
            answers: Vec::new(),
            authorities: Vec::new(),
            additionals: Vec::new(),
        }
    }

    pub fn id(mut self, id: u16) -> Self {
        self.id = id;
        self
    }

    pub fn rcode(mut self, rcode: u8) -> Self {
        self.rcode = rcode;
        self
    }

    pub fn authoritative(mut self) -> Self {
        self.flags |= 0x04;
        self
    }

    pub fn truncated(mut self) -> Self {
        self.flags |= 0x02;
        self
    }

    pub fn question(mut self, name: &str, qtype: u16) -> Self {
        self.question = Some((name.to_string(), qtype));
        self
    }

    pub fn answer_mx(mut self, owner: &str, ttl: u32, preference: u16, exchange: &str) -> Self {
        let mut rdata = preference.to_be_bytes().to_vec();
        encode_name(&mut rdata, exchange).unwrap();
        self.answers.push(record(owner, 15, ttl, &rdata));
        self
    }

    pub fn answer_a(mut self, owner: &str, ttl: u32, ip: [u8; 4]) -> Self {
        self.answers.push(record(owner, 1, ttl, &ip));
        self
    }

    pub fn answer_cname(mut self, owner: &str, ttl: u32, target: &str) -> Self {
        let mut rdata = Vec::new();
        encode_name(&mut rdata, target).unwrap();
        self.answers.push(record(owner, 5, ttl, &rdata));
        self
    }

    pub fn answer_ptr(mut self, owner: &str, ttl: u32, target: &str) -> Self {
        let mut rdata = Vec::new();
        encode_name(&mut rdata, target).unwrap();
        self.answers.push(record(owner, 12, ttl, &rdata));
        self
    }

    pub fn answer_raw(mut self, owner: &str, rtype: u16, ttl: u32, rdata: &[u8]) -> Self {
        self.answers.push(record(owner, rtype, ttl, rdata));
        self
    }

    pub fn authority_raw(mut self, owner: &str, rtype: u16, ttl: u32, rdata: &[u8]) -> Self {
        self.authorities.push(record(owner, rtype, ttl, rdata));
        self
    }

    pub fn additional_a(mut self, owner: &str, ttl: u32, ip: [u8; 4]) -> Self {
        self.additionals.push(record(owner, 1, ttl, &ip));
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut out = self.id.to_be_bytes().to_vec();
        out.push(self.flags);
        out.push(0x80 | (self.rcode & 0x0F));
        let qdcount: u16 = if self.question.is_some() { 1 } else { 0 };
        for count in [
            qdcount,
            self.answers.len() as u16,
            self.authorities.len() as u16,
            self.additionals.len() as u16,
        ] {
            out.extend_from_slice(&count.to_be_bytes());
        }
        if let Some((name, qtype)) = &self.question {
            encode_name(&mut out, name).unwrap();
            out.extend_from_slice(&qtype.to_be_bytes());
            out.extend_from_slice(&1u16.to_be_bytes());
        }
        for rr in self
            .answers
            .iter()
            .chain(&self.authorities)
            .chain(&self.additionals)
        {
            out.extend_from_slice(rr);
        }
        out
    }
}

fn record(owner: &str, rtype: u16, ttl: u32, rdata: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    encode_name(&mut out, owner).unwrap();
    out.extend_from_slice(&rtype.to_be_bytes());
    out.extend_from_slice(&1u16.to_be_bytes());
    out.extend_from_slice(&ttl.to_be_bytes());
    out.extend_from_slice(&(rdata.len() as u16).to_be_bytes());
    out.extend_from_slice(rdata);
    out
}

/// Host lookup backed by a fixed table.
#[derive(Default)]
pub struct StaticHostLookup {
    table: HashMap<String, SocketAddr>,
}

impl StaticHostLookup {
    pub fn new(entries: &[(&str, SocketAddr)]) -> Self {
        Self {
            table: entries
                .iter()
                .map(|(host, addr)| (host.to_string(), *addr))
                .collect(),
        }
    }
}

impl HostAddrLookup for StaticHostLookup {
    fn resolve(&self, host: &str, _port: u16) -> Option<SocketAddr> {
        self.table.get(host).copied()
    }
}

/// Registry of servers `ns0`, `ns1`, ... mapped onto `addrs`.
pub fn static_registry(addrs: &[SocketAddr]) -> Arc<NameServerRegistry> {
    let names: Vec<String> = (0..addrs.len()).map(|i| format!("ns{}", i)).collect();
    let entries: Vec<(&str, SocketAddr)> = names
        .iter()
        .map(String::as_str)
        .zip(addrs.iter().copied())
        .collect();
    let specs = names.iter().map(|n| NameServerSpec::new(n.clone(), 53)).collect();
    Arc::new(NameServerRegistry::new(specs, Arc::new(StaticHostLookup::new(&entries))).unwrap())
}

#[derive(Default)]
pub struct RecordingAlertSink {
    alerts: Mutex<Vec<(AlertSeverity, String)>>,
}

impl RecordingAlertSink {
    pub fn alerts(&self) -> Vec<(AlertSeverity, String)> {
        self.alerts.lock().unwrap().clone()
    }
}

impl AlertSink for RecordingAlertSink {
    fn raise(&self, severity: AlertSeverity, alert_code: &str, _message: &str) {
        self.alerts
            .lock()
            .unwrap()
            .push((severity, alert_code.to_string()));
    }
}
