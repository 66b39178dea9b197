pub mod pool;
pub mod udp;

use ferrous_mx_domain::DomainError;
use std::net::SocketAddr;
use std::time::Duration;

pub use pool::{PoolStats, PooledTransport, TransportPool};
pub use udp::{UdpTransport, UdpTransportFactory};

/// One request/response exchange with a name server.
///
/// Implementations must only return a datagram that came from `server`, and
/// must give up once `timeout` has elapsed.
pub trait DnsTransport: Send {
    fn exchange(
        &mut self,
        server: SocketAddr,
        request: &[u8],
        timeout: Duration,
    ) -> Result<Vec<u8>, DomainError>;

    fn protocol_name(&self) -> &'static str {
        "UDP"
    }
}

/// Creates fresh transports for the pool.
pub trait TransportFactory: Send + Sync {
    fn create(&self) -> Result<Box<dyn DnsTransport>, DomainError>;
}
