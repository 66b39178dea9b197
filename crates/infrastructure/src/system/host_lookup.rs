use ferrous_mx_application::ports::HostAddrLookup;
use std::net::{SocketAddr, ToSocketAddrs};
use tracing::debug;

/// Resolves name-server hosts through the operating system resolver.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemHostLookup;

impl HostAddrLookup for SystemHostLookup {
    fn resolve(&self, host: &str, port: u16) -> Option<SocketAddr> {
        match (host, port).to_socket_addrs() {
            Ok(mut addrs) => addrs.find(SocketAddr::is_ipv4),
            Err(e) => {
                debug!(host, port, error = %e, "Name server host did not resolve");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ip_literal_resolves_without_dns() {
        let addr = SystemHostLookup.resolve("192.0.2.53", 5353).unwrap();
        assert_eq!(addr, "192.0.2.53:5353".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn test_ipv6_literal_is_ignored() {
        assert!(SystemHostLookup.resolve("::1", 53).is_none());
    }
}
