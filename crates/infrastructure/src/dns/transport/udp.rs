//! UDP transport for DNS queries (RFC 1035 §4.2.1)
//!
//! Messages are sent as-is, one datagram each way, at most 512 bytes.
//! Truncated responses are returned to the caller unchanged.

use super::{DnsTransport, TransportFactory};
use crate::dns::wire::MAX_UDP_MESSAGE_SIZE;
use ferrous_mx_domain::DomainError;
use socket2::{Domain, Protocol, Socket, Type};
use std::io::ErrorKind;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4, UdpSocket};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

pub struct UdpTransport {
    socket: UdpSocket,
}

impl UdpTransport {
    /// Binds an IPv4 socket to an ephemeral port.
    pub fn bind() -> Result<Self, DomainError> {
        let socket = Self::create_socket().map_err(|e| DomainError::TransportIo {
            server: "0.0.0.0:0".to_string(),
            reason: format!("failed to bind UDP socket: {}", e),
        })?;
        Ok(Self { socket })
    }

    fn create_socket() -> std::io::Result<UdpSocket> {
        let socket = Socket::new(Domain::IPV4, Type::DGRAM, Some(Protocol::UDP))?;
        let bind_addr = SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 0));
        socket.bind(&bind_addr.into())?;
        Ok(socket.into())
    }

    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.socket.local_addr().ok()
    }

    fn io_error(server: SocketAddr, action: &str, e: std::io::Error) -> DomainError {
        DomainError::TransportIo {
            server: server.to_string(),
            reason: format!("{} failed: {}", action, e),
        }
    }
}

impl DnsTransport for UdpTransport {
    fn exchange(
        &mut self,
        server: SocketAddr,
        request: &[u8],
        timeout: Duration,
    ) -> Result<Vec<u8>, DomainError> {
        let bytes_sent = self
            .socket
            .send_to(request, server)
            .map_err(|e| Self::io_error(server, "send", e))?;

        debug!(server = %server, bytes_sent, "UDP query sent");

        let deadline = Instant::now() + timeout;
        let mut recv_buf = vec![0u8; MAX_UDP_MESSAGE_SIZE];

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Err(DomainError::TransportTimeout {
                    server: server.to_string(),
                });
            }
            self.socket
                .set_read_timeout(Some(remaining))
                .map_err(|e| Self::io_error(server, "set_read_timeout", e))?;

            match self.socket.recv_from(&mut recv_buf) {
                Ok((bytes_received, from_addr)) if from_addr == server => {
                    recv_buf.truncate(bytes_received);
                    debug!(server = %server, bytes_received, "UDP response received");
                    return Ok(recv_buf);
                }
                Ok((_, from_addr)) => {
                    warn!(
                        expected = %server,
                        received_from = %from_addr,
                        "Ignoring UDP datagram from unexpected source"
                    );
                }
                // The deadline check at the top of the loop decides when to give up.
                Err(e)
                    if matches!(
                        e.kind(),
                        ErrorKind::WouldBlock | ErrorKind::TimedOut | ErrorKind::Interrupted
                    ) => {}
                Err(e) => return Err(Self::io_error(server, "receive", e)),
            }
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct UdpTransportFactory;

impl TransportFactory for UdpTransportFactory {
    fn create(&self) -> Result<Box<dyn DnsTransport>, DomainError> {
        Ok(Box::new(UdpTransport::bind()?))
    }
}
