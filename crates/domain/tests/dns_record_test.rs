use ferrous_mx_domain::{DnsRecord, RecordData, RecordType, ResponseCode};
use std::net::Ipv4Addr;

#[test]
fn test_record_type_codes() {
    assert_eq!(RecordType::A.to_u16(), 1);
    assert_eq!(RecordType::CNAME.to_u16(), 5);
    assert_eq!(RecordType::PTR.to_u16(), 12);
    assert_eq!(RecordType::MX.to_u16(), 15);
    assert_eq!(RecordType::from_u16(15), RecordType::MX);
    assert_eq!(RecordType::from_u16(99), RecordType::Other(99));
    assert_eq!(RecordType::Other(99).to_u16(), 99);
}

#[test]
fn test_record_type_parsing() {
    assert_eq!("mx".parse::<RecordType>().unwrap(), RecordType::MX);
    assert_eq!("TYPE257".parse::<RecordType>().unwrap(), RecordType::Other(257));
    assert!("bogus".parse::<RecordType>().is_err());
    assert_eq!(RecordType::Other(257).to_string(), "TYPE257");
}

#[test]
fn test_response_code_wire_mapping() {
    assert_eq!(ResponseCode::from_wire(0), ResponseCode::NoError);
    assert_eq!(ResponseCode::from_wire(3), ResponseCode::NameError);
    assert_eq!(ResponseCode::from_wire(0x83), ResponseCode::NameError);
    assert_eq!(ResponseCode::from_wire(9), ResponseCode::Other(9));
    assert_eq!(ResponseCode::IoFailure.to_wire(), None);
    assert!(ResponseCode::WrongId.is_local());
    assert!(ResponseCode::NameError.is_acceptable_answer());
    assert!(!ResponseCode::ServerFailure.is_acceptable_answer());
}

#[test]
fn test_record_accessors() {
    let a = DnsRecord::a("host.example.com", 60, Ipv4Addr::new(192, 0, 2, 10));
    assert_eq!(a.ipv4(), Some(Ipv4Addr::new(192, 0, 2, 10)));
    assert_eq!(a.target(), None);

    let cname = DnsRecord::cname("www.example.com", 60, "web.example.com");
    assert_eq!(cname.target(), Some("web.example.com"));
    assert!(cname.name_matches("WWW.EXAMPLE.COM"));

    let mx = DnsRecord::mx("example.com", 60, 10, "mx.example.com");
    assert!(matches!(
        mx.data,
        RecordData::Mx { preference: 10, ref exchange } if exchange == "mx.example.com"
    ));
}
