//! Ferrous MX Domain Layer
pub mod config;
pub mod dns_message;
pub mod dns_record;
pub mod errors;
pub mod mail_host;

pub use config::{
    CliOverrides, Config, ConfigError, EscalationRule, LoggingConfig, NameServerSpec,
    ResolverConfig,
};
pub use dns_message::DnsMessage;
pub use dns_record::{DnsRecord, RecordData, RecordType, ResponseCode};
pub use errors::DomainError;
pub use mail_host::{MailHost, MailHostIter, MailHostList, ResolutionStatus};
