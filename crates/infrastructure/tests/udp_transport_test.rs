use ferrous_mx_application::ports::DnsLookup;
use ferrous_mx_domain::{DomainError, NameServerSpec, RecordType, ResponseCode};
use ferrous_mx_infrastructure::dns::{
    DnsTransport, FailureEscalation, NameServerRegistry, StubResolver, StubResolverConfig,
    TracingAlertSink, TransportPool, UdpTransport, UdpTransportFactory,
};
use ferrous_mx_infrastructure::system::SystemHostLookup;
use std::net::{SocketAddr, UdpSocket};
use std::sync::Arc;
use std::time::Duration;

mod helpers;
use helpers::{message_id, MockDnsServer, ResponseBuilder};

fn loopback_resolver(server: SocketAddr, timeout: Duration, retries: u32) -> StubResolver {
    let registry = NameServerRegistry::new(
        vec![NameServerSpec::new(server.ip().to_string(), server.port())],
        Arc::new(SystemHostLookup),
    )
    .unwrap();
    let pool = TransportPool::new(Arc::new(UdpTransportFactory), 2);
    let escalation = FailureEscalation::new(vec![], Arc::new(TracingAlertSink));

    StubResolver::new(
        Arc::new(registry),
        Arc::new(pool),
        Arc::new(escalation),
        StubResolverConfig::new(timeout, retries),
    )
}

#[test]
fn test_mx_lookup_over_loopback_udp() {
    let server = MockDnsServer::start(|request| {
        Some(
            ResponseBuilder::new()
                .id(message_id(request))
                .question("example.com", 15)
                .answer_mx("example.com", 300, 5, "mx1.example.com")
                .answer_mx("example.com", 300, 10, "mx2.example.com")
                .additional_a("mx1.example.com", 60, [198, 51, 100, 1])
                .build(),
        )
    })
    .unwrap();

    let resolver = loopback_resolver(server.addr(), Duration::from_secs(2), 1);
    let msg = resolver.lookup("example.com", RecordType::MX);

    assert_eq!(msg.rcode, ResponseCode::NoError);
    assert_eq!(msg.answers_of(RecordType::MX).count(), 2);
    assert!(msg.find_additional_a("MX1.example.com").is_some());
    assert_eq!(resolver.pool_stats().idle, 1);
}

#[test]
fn test_silent_server_yields_io_failure() {
    let server = MockDnsServer::start(|_| None).unwrap();

    let resolver = loopback_resolver(server.addr(), Duration::from_millis(30), 1);
    let msg = resolver.lookup("example.com", RecordType::A);

    assert_eq!(msg.rcode, ResponseCode::IoFailure);
    assert_eq!(resolver.pool_stats().total_discarded, 1);
}

#[test]
fn test_datagram_from_other_source_is_ignored() {
    let server = MockDnsServer::start(|request| {
        std::thread::sleep(Duration::from_millis(100));
        Some(ResponseBuilder::new().id(message_id(request)).build())
    })
    .unwrap();

    let mut transport = UdpTransport::bind().unwrap();
    let local_port = transport.local_addr().unwrap().port();
    let stranger = UdpSocket::bind("127.0.0.1:0").unwrap();

    let request = [0x12, 0x34, 0x01, 0, 0, 0, 0, 0, 0, 0, 0, 0];
    let sender = std::thread::spawn(move || {
        std::thread::sleep(Duration::from_millis(20));
        stranger
            .send_to(&[0xDE, 0xAD, 0x81, 0x80], ("127.0.0.1", local_port))
            .unwrap();
    });

    let reply = transport
        .exchange(server.addr(), &request, Duration::from_secs(2))
        .unwrap();
    sender.join().unwrap();

    assert_eq!(message_id(&reply), 0x1234);
    assert_eq!(reply.len(), 12);
}

#[test]
fn test_exchange_with_silent_server_times_out() {
    let server = MockDnsServer::start(|_| None).unwrap();
    let mut transport = UdpTransport::bind().unwrap();

    let err = transport
        .exchange(server.addr(), &[0u8; 12], Duration::from_millis(40))
        .unwrap_err();
    assert!(matches!(err, DomainError::TransportTimeout { .. }));
}
