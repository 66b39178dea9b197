use ferrous_mx_domain::DomainError;
use std::net::Ipv4Addr;

const MIN_LITERAL_LEN: usize = "[0.0.0.0]".len();

/// Recognises an address literal such as `[192.0.2.1]`.
///
/// Returns `Ok(None)` when `domain` is not bracketed at all, and an error when
/// it is bracketed but the address inside is not a well-formed dotted quad.
pub fn parse_domain_literal(domain: &str) -> Result<Option<Ipv4Addr>, DomainError> {
    if !domain.starts_with('[') {
        return Ok(None);
    }

    let invalid = || DomainError::InvalidIpAddress(domain.to_string());

    if domain.len() < MIN_LITERAL_LEN || !domain.ends_with(']') {
        return Err(invalid());
    }

    let inner = &domain[1..domain.len() - 1];
    let mut octets = [0u8; 4];
    let mut count = 0;

    for part in inner.split('.') {
        if count == 4 || part.is_empty() || part.len() > 3 {
            return Err(invalid());
        }
        if !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        octets[count] = part.parse::<u8>().map_err(|_| invalid())?;
        count += 1;
    }

    if count != 4 {
        return Err(invalid());
    }
    Ok(Some(Ipv4Addr::from(octets)))
}
