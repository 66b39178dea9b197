use std::net::SocketAddr;

/// Resolves a configured name-server host to a socket address.
pub trait HostAddrLookup: Send + Sync {
    /// `None` when the host does not resolve to an IPv4 address right now.
    fn resolve(&self, host: &str, port: u16) -> Option<SocketAddr>;
}
