#![allow(dead_code)]
pub mod builders;
pub mod dns_server_mock;
pub mod scripted_transport;

pub use builders::{static_registry, RecordingAlertSink, ResponseBuilder, StaticHostLookup};
pub use dns_server_mock::MockDnsServer;
pub use scripted_transport::{Reply, ScriptedTransportFactory, SentQuery};

/// Transaction id of an encoded request or response.
pub fn message_id(bytes: &[u8]) -> u16 {
    u16::from_be_bytes([bytes[0], bytes[1]])
}
