use super::StubResolverConfig;
use crate::dns::escalation::FailureEscalation;
use crate::dns::name_server::{NameServerRegistry, SelectedServer};
use crate::dns::transport::{PoolStats, PooledTransport, TransportPool};
use crate::dns::wire::{decode_message, encode_query};
use ferrous_mx_application::ports::DnsLookup;
use ferrous_mx_domain::{DnsMessage, RecordType, ResponseCode};
use std::sync::atomic::{AtomicU16, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Alert code raised when no configured name server has a usable address.
pub const NO_NAME_SERVER_ALERT: &str = "DNS_NO_NAME_SERVER";

/// Bytes needed to read the rcode out of a response header.
const MIN_RESPONSE_LEN: usize = 4;

enum Attempt {
    /// Structurally valid response with the expected id.
    Answer(DnsMessage),
    /// Final local failure; trying another server would not help.
    Reject(DnsMessage),
    /// This server attempt failed; move on to the next one.
    Retry,
}

/// Blocking DNS client over UDP with retry and failover.
pub struct StubResolver {
    registry: Arc<NameServerRegistry>,
    pool: Arc<TransportPool>,
    escalation: Arc<FailureEscalation>,
    config: StubResolverConfig,
    next_id: AtomicU16,
}

impl StubResolver {
    pub fn new(
        registry: Arc<NameServerRegistry>,
        pool: Arc<TransportPool>,
        escalation: Arc<FailureEscalation>,
        config: StubResolverConfig,
    ) -> Self {
        info!(
            servers = registry.len(),
            timeout_ms = config.timeout.as_millis() as u64,
            retries = config.retries,
            "Stub resolver created"
        );

        Self {
            registry,
            pool,
            escalation,
            config,
            next_id: AtomicU16::new(fastrand::u16(..)),
        }
    }

    pub fn config(&self) -> StubResolverConfig {
        self.config
    }

    pub fn registry(&self) -> &NameServerRegistry {
        &self.registry
    }

    pub fn pool_stats(&self) -> PoolStats {
        self.pool.stats()
    }

    fn allocate_id(&self) -> u16 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    fn attempt(
        &self,
        transport: &mut PooledTransport<'_>,
        id: u16,
        request: &[u8],
        server: SelectedServer,
        timeout: Duration,
    ) -> Attempt {
        let bytes = match transport.exchange(server.addr, request, timeout) {
            Ok(bytes) => bytes,
            Err(e) => {
                debug!(server = %server.addr, error = %e, "DNS exchange failed");
                return Attempt::Retry;
            }
        };

        if bytes.len() < MIN_RESPONSE_LEN {
            debug!(server = %server.addr, len = bytes.len(), "Response too short");
            return Attempt::Retry;
        }
        let rcode = ResponseCode::from_wire(bytes[3]);
        if !rcode.is_acceptable_answer() {
            debug!(server = %server.addr, rcode = %rcode, "Server did not answer");
            return Attempt::Retry;
        }

        let message = match decode_message(&bytes) {
            Ok(message) => message,
            Err(e) => {
                warn!(server = %server.addr, error = %e, "Undecodable DNS response");
                return Attempt::Reject(DnsMessage::new(id, ResponseCode::FormatError));
            }
        };

        if message.id != id {
            warn!(
                server = %server.addr,
                expected = id,
                received = message.id,
                "DNS response id mismatch"
            );
            return Attempt::Reject(DnsMessage::new(id, ResponseCode::WrongId));
        }

        if message.truncated {
            debug!(server = %server.addr, "Truncated response used as-is");
        }
        Attempt::Answer(message)
    }
}

impl DnsLookup for StubResolver {
    fn lookup(&self, name: &str, record_type: RecordType) -> DnsMessage {
        let id = self.allocate_id();
        let request = match encode_query(id, name, record_type) {
            Ok(request) => request,
            Err(e) => {
                debug!(name, error = %e, "Query not sent");
                return DnsMessage::new(id, ResponseCode::FormatError);
            }
        };

        let mut transport = match self.pool.acquire() {
            Ok(transport) => transport,
            Err(e) => {
                warn!(error = %e, "No transport available");
                self.escalation.record_failure();
                return DnsMessage::new(id, ResponseCode::IoFailure);
            }
        };

        let mut timeout = self.config.timeout;
        let attempts = self.config.attempts();

        for attempt in 1..=attempts {
            let server = match self.registry.select() {
                Ok(server) => server,
                Err(e) => {
                    self.escalation.record_failure();
                    self.escalation.report_fatal(NO_NAME_SERVER_ALERT, &e.to_string());
                    return DnsMessage::new(id, ResponseCode::IoFailure);
                }
            };

            debug!(
                name,
                record_type = %record_type,
                server = %server.addr,
                attempt,
                timeout_ms = timeout.as_millis() as u64,
                "Sending DNS query"
            );

            match self.attempt(&mut transport, id, &request, server, timeout) {
                Attempt::Answer(message) => {
                    self.escalation.record_success();
                    return message;
                }
                Attempt::Reject(message) => {
                    transport.mark_failed();
                    self.escalation.record_failure();
                    return message;
                }
                Attempt::Retry => {
                    transport.mark_failed();
                    self.registry.mark_failure(server.index);
                    timeout = timeout.saturating_mul(2);
                }
            }
        }

        let failures = self.escalation.record_failure();
        warn!(
            name,
            record_type = %record_type,
            attempts,
            consecutive_failures = failures,
            "DNS lookup failed on every attempt"
        );
        DnsMessage::new(id, ResponseCode::IoFailure)
    }
}
