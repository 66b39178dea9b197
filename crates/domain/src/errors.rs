use crate::dns_record::ResponseCode;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid IP address: {0}")]
    InvalidIpAddress(String),

    #[error("Cannot encode name '{name}': {reason}")]
    NameEncoding { name: String, reason: &'static str },

    #[error("Malformed DNS message: {0}")]
    FormatError(String),

    #[error("Transport timeout talking to {server}")]
    TransportTimeout { server: String },

    #[error("Transport I/O error with {server}: {reason}")]
    TransportIo { server: String, reason: String },

    #[error("Lookup of {name} failed: {rcode}")]
    LookupFailed { name: String, rcode: ResponseCode },

    #[error("No configured name server could be resolved")]
    NoResolvableNameServer,

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

