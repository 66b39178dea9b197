use super::{WireBuffer, MAX_LABEL_LEN, MAX_NAME_LEN};
use ferrous_mx_domain::dns_record::CLASS_IN;
use ferrous_mx_domain::{DnsMessage, DnsRecord, DomainError, RecordData, RecordType, ResponseCode};
use std::net::Ipv4Addr;

/// Requests and responses both fit in a plain UDP datagram; no EDNS0.
pub const MAX_UDP_MESSAGE_SIZE: usize = 512;
pub const HEADER_LEN: usize = 12;

const FLAG_RD: u8 = 0x01;
const FLAG_TC: u8 = 0x02;
const FLAG_AA: u8 = 0x04;
const RCODE_MASK: u8 = 0x0F;

/// Smallest possible resource record: root name, fixed fields, empty RDATA.
const MIN_RECORD_LEN: usize = 11;

/// Builds a recursive query for `name` with a single question.
pub fn encode_query(id: u16, name: &str, record_type: RecordType) -> Result<Vec<u8>, DomainError> {
    let mut out = Vec::with_capacity(MAX_UDP_MESSAGE_SIZE);
    out.extend_from_slice(&id.to_be_bytes());
    out.push(FLAG_RD);
    out.push(0);
    out.extend_from_slice(&1u16.to_be_bytes());
    out.extend_from_slice(&[0; 6]);

    encode_name(&mut out, name)?;
    out.extend_from_slice(&record_type.to_u16().to_be_bytes());
    out.extend_from_slice(&CLASS_IN.to_be_bytes());
    Ok(out)
}

/// Appends `name` as uncompressed labels. A single trailing dot is accepted.
pub fn encode_name(out: &mut Vec<u8>, name: &str) -> Result<(), DomainError> {
    let reject = |reason: &'static str| DomainError::NameEncoding {
        name: name.to_string(),
        reason,
    };

    let relative = name.strip_suffix('.').unwrap_or(name);
    if relative.is_empty() {
        out.push(0);
        return Ok(());
    }
    // Length byte of the first label plus the terminating root label.
    if relative.len() + 2 > MAX_NAME_LEN {
        return Err(reject("name longer than 255 bytes"));
    }

    let start = out.len();
    for label in relative.split('.') {
        if label.is_empty() {
            out.truncate(start);
            return Err(reject("empty label"));
        }
        if label.len() > MAX_LABEL_LEN {
            out.truncate(start);
            return Err(reject("label longer than 63 bytes"));
        }
        out.push(label.len() as u8);
        out.extend_from_slice(label.as_bytes());
    }
    out.push(0);
    Ok(())
}

/// Decodes a complete response. Any structural problem, including a read
/// that ran past the end of the datagram, is a format error.
pub fn decode_message(bytes: &[u8]) -> Result<DnsMessage, DomainError> {
    if bytes.len() < HEADER_LEN {
        return Err(DomainError::FormatError(format!(
            "message of {} bytes is shorter than a header",
            bytes.len()
        )));
    }

    let mut buf = WireBuffer::new(bytes);
    let id = buf.read_u16();
    let flags_hi = buf.read_u8();
    let flags_lo = buf.read_u8();
    let qdcount = buf.read_u16();
    let ancount = buf.read_u16();
    let nscount = buf.read_u16();
    let arcount = buf.read_u16();

    let mut message = DnsMessage::new(id, ResponseCode::from_wire(flags_lo & RCODE_MASK));
    message.authoritative = flags_hi & FLAG_AA != 0;
    message.truncated = flags_hi & FLAG_TC != 0;

    for _ in 0..qdcount {
        buf.read_name()?;
        buf.skip(4);
    }

    message.answers = decode_section(&mut buf, ancount)?;
    message.authorities = decode_section(&mut buf, nscount)?;
    message.additionals = decode_section(&mut buf, arcount)?;

    if buf.is_past_end() {
        return Err(DomainError::FormatError(
            "message ends before its declared contents".to_string(),
        ));
    }
    Ok(message)
}

fn decode_section(buf: &mut WireBuffer<'_>, count: u16) -> Result<Vec<DnsRecord>, DomainError> {
    let mut records = Vec::with_capacity(usize::from(count).min(buf.remaining() / MIN_RECORD_LEN));
    for _ in 0..count {
        records.push(decode_record(buf)?);
    }
    Ok(records)
}

fn decode_record(buf: &mut WireBuffer<'_>) -> Result<DnsRecord, DomainError> {
    let name = buf.read_name()?;
    let rtype = RecordType::from_u16(buf.read_u16());
    let class = buf.read_u16();
    let ttl = buf.read_u32();
    let rdlength = buf.read_u16();

    let rdata_end = buf.offset() + usize::from(rdlength);
    if rdata_end > buf.length() {
        return Err(DomainError::FormatError(format!(
            "{} record for {} overruns the message",
            rtype, name
        )));
    }

    let data = match rtype {
        RecordType::A => {
            if rdlength != 4 {
                return Err(DomainError::FormatError(format!(
                    "A record for {} has {} bytes of data",
                    name, rdlength
                )));
            }
            RecordData::A(Ipv4Addr::new(
                buf.read_u8(),
                buf.read_u8(),
                buf.read_u8(),
                buf.read_u8(),
            ))
        }
        RecordType::CNAME => RecordData::Cname(buf.read_name()?),
        RecordType::PTR => RecordData::Ptr(buf.read_name()?),
        RecordType::MX => {
            let preference = buf.read_u16();
            let exchange = buf.read_name()?;
            RecordData::Mx {
                preference,
                exchange,
            }
        }
        _ => {
            buf.skip(usize::from(rdlength));
            RecordData::Unknown { raw_len: rdlength }
        }
    };

    if buf.offset() > rdata_end {
        return Err(DomainError::FormatError(format!(
            "{} record for {} reads beyond its data length",
            rtype, name
        )));
    }
    buf.seek(rdata_end);

    Ok(DnsRecord {
        name,
        rtype,
        class,
        ttl,
        data,
    })
}
