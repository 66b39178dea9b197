use crate::ports::DnsLookup;
use crate::services::reverse_name;
use ferrous_mx_domain::{DomainError, RecordType, ResponseCode};
use std::net::Ipv4Addr;
use std::sync::Arc;
use tracing::debug;

pub struct ReverseLookupUseCase {
    lookup: Arc<dyn DnsLookup>,
}

impl ReverseLookupUseCase {
    pub fn new(lookup: Arc<dyn DnsLookup>) -> Self {
        Self { lookup }
    }

    /// First PTR target for `ip`, `None` when the address has no reverse entry.
    pub fn execute(&self, ip: Ipv4Addr) -> Result<Option<String>, DomainError> {
        let name = reverse_name(ip);
        debug!(ip = %ip, reverse_domain = %name, "Performing PTR lookup");

        let message = self.lookup.lookup(&name, RecordType::PTR);
        match message.rcode {
            ResponseCode::NoError => Ok(message
                .answers_of(RecordType::PTR)
                .find_map(|r| r.target())
                .map(str::to_string)),
            ResponseCode::NameError => Ok(None),
            rcode => Err(DomainError::LookupFailed { name, rcode }),
        }
    }
}
