use ferrous_mx_application::ports::DnsLookup;
use ferrous_mx_domain::dns_record::CLASS_IN;
use ferrous_mx_domain::{DnsMessage, DnsRecord, RecordData, RecordType};

pub fn run_lookup(lookup: &dyn DnsLookup, name: &str, record_type: RecordType) -> anyhow::Result<()> {
    let message = lookup.lookup(name, record_type);
    print!("{}", render_message(&message));

    if message.rcode.is_local() {
        anyhow::bail!("{} {}: {}", name, record_type, message.rcode);
    }
    Ok(())
}

fn render_message(message: &DnsMessage) -> String {
    let mut out = format!(
        ";; id: {} rcode: {} aa: {} tc: {}\n",
        message.id, message.rcode, message.authoritative, message.truncated
    );
    for (title, records) in [
        ("ANSWER", &message.answers),
        ("AUTHORITY", &message.authorities),
        ("ADDITIONAL", &message.additionals),
    ] {
        if records.is_empty() {
            continue;
        }
        out.push_str(&format!(";; {} SECTION:\n", title));
        for record in records {
            out.push_str(&render_record(record));
            out.push('\n');
        }
    }
    out
}

fn render_record(record: &DnsRecord) -> String {
    let class = if record.class == CLASS_IN {
        "IN".to_string()
    } else {
        format!("CLASS{}", record.class)
    };
    let data = match &record.data {
        RecordData::A(ip) => ip.to_string(),
        RecordData::Cname(target) | RecordData::Ptr(target) => target.clone(),
        RecordData::Mx {
            preference,
            exchange,
        } => format!("{} {}", preference, exchange),
        RecordData::Unknown { raw_len } => format!("\\# {}", raw_len),
    };
    format!(
        "{}\t{}\t{}\t{}\t{}",
        record.name, record.ttl, class, record.rtype, data
    )
}
