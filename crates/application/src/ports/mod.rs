mod alert_sink;
mod dns_lookup;
mod host_addr_lookup;
mod mail_host_cache;

pub use alert_sink::{AlertSeverity, AlertSink};
pub use dns_lookup::DnsLookup;
pub use host_addr_lookup::HostAddrLookup;
pub use mail_host_cache::MailHostCache;
