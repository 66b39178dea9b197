use ferrous_mx_domain::{DnsMessage, RecordType};

/// A blocking DNS query against the configured name servers.
///
/// Failures are reported through the returned message's rcode, never as a
/// panic or error value: a locally synthesized `IoFailure` means nobody
/// answered, `NameError` means the server said the name does not exist.
pub trait DnsLookup: Send + Sync {
    fn lookup(&self, name: &str, record_type: RecordType) -> DnsMessage;
}
