pub mod alert;
pub mod cache;
pub mod escalation;
pub mod name_server;
pub mod resolver;
pub mod transport;
pub mod wire;

pub use alert::TracingAlertSink;
pub use cache::{CacheStats, HostListCache};
pub use escalation::FailureEscalation;
pub use name_server::{NameServer, NameServerRegistry, SelectedServer};
pub use resolver::{StubResolver, StubResolverConfig};
pub use transport::{
    DnsTransport, PoolStats, PooledTransport, TransportFactory, TransportPool, UdpTransport,
    UdpTransportFactory,
};
