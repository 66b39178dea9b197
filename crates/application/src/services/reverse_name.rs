use std::net::Ipv4Addr;

/// `in-addr.arpa` owner name used for PTR queries of `ip`.
pub fn reverse_name(ip: Ipv4Addr) -> String {
    let octets = ip.octets();
    format!(
        "{}.{}.{}.{}.in-addr.arpa",
        octets[3], octets[2], octets[1], octets[0]
    )
}
