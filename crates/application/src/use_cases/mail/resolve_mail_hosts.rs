use crate::ports::{DnsLookup, MailHostCache};
use crate::services::parse_domain_literal;
use ferrous_mx_domain::{
    DnsMessage, MailHost, MailHostList, RecordData, RecordType, ResolutionStatus, ResponseCode,
};
use std::net::IpAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

const DOMAIN_LITERAL_TTL: Duration = Duration::from_secs(24 * 60 * 60);
const MAX_ADDRESS_FALLBACK_HOSTS: usize = 2;

/// Turns a mail domain into a ranked list of deliverable hosts.
///
/// Order of attempts: address literal, MX, MX of the CNAME target, A records
/// of the domain itself. Successful and bad-domain results are cached;
/// temporary failures never are.
pub struct ResolveMailHostsUseCase {
    lookup: Arc<dyn DnsLookup>,
    cache: Option<Arc<dyn MailHostCache>>,
    negative_ttl: Duration,
}

enum Step {
    Done(MailHostList),
    Continue,
}

impl ResolveMailHostsUseCase {
    pub fn new(lookup: Arc<dyn DnsLookup>, negative_ttl: Duration) -> Self {
        Self {
            lookup,
            cache: None,
            negative_ttl,
        }
    }

    pub fn with_cache(mut self, cache: Arc<dyn MailHostCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn execute(&self, domain: &str) -> Arc<MailHostList> {
        match parse_domain_literal(domain) {
            Ok(Some(ip)) => {
                debug!(domain = %domain, "Address literal, no lookup needed");
                return Arc::new(MailHostList::new(
                    ResolutionStatus::Success,
                    vec![MailHost::with_address(
                        domain,
                        0,
                        ip,
                        DOMAIN_LITERAL_TTL.as_secs() as u32,
                    )],
                    DOMAIN_LITERAL_TTL,
                ));
            }
            Ok(None) => {}
            Err(e) => {
                info!(domain = %domain, error = %e, "Rejecting malformed address literal");
                return Arc::new(MailHostList::bad_domain(self.negative_ttl));
            }
        }

        let key = normalize(domain);
        if key.is_empty() {
            return Arc::new(MailHostList::bad_domain(self.negative_ttl));
        }

        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.get(&key) {
                debug!(domain = %key, status = %hit.status(), "Mail host cache hit");
                return hit;
            }
        }

        let list = Arc::new(self.resolve(&key));

        if list.status() != ResolutionStatus::TemporaryError {
            if let Some(cache) = &self.cache {
                if let Some((evicted, _)) = cache.put(&key, Arc::clone(&list)) {
                    debug!(domain = %key, evicted = %evicted, "Mail host cache evicted entry");
                }
            }
        }
        list
    }

    /// Current address of `host`, issuing an A query once the cached one has expired.
    pub fn host_address(&self, host: &MailHost) -> Option<IpAddr> {
        if let Ok(Some(ip)) = parse_domain_literal(host.name()) {
            return Some(IpAddr::V4(ip));
        }

        let now = Instant::now();
        if !host.needs_refresh_at(now) {
            return host.cached_addr_at(now);
        }

        let response = self.lookup.lookup(host.name(), RecordType::A);
        match response.rcode {
            ResponseCode::NoError => {
                let first = response
                    .answers_of(RecordType::A)
                    .find_map(|r| r.ipv4().map(|ip| (ip, r.ttl)));
                match first {
                    Some((ip, ttl)) => host.store_address(Some(ip), ttl, now),
                    None => host.store_address(None, self.negative_ttl_secs(), now),
                }
            }
            ResponseCode::NameError => host.store_address(None, self.negative_ttl_secs(), now),
            rcode => {
                warn!(host = %host.name(), rcode = %rcode, "Address refresh failed");
                return None;
            }
        }
        host.cached_addr_at(now)
    }

    fn resolve(&self, domain: &str) -> MailHostList {
        let mx = self.lookup.lookup(domain, RecordType::MX);
        if let Step::Done(list) = self.from_mx_response(domain, &mx) {
            return list;
        }

        let cname_target = match mx.answers_of(RecordType::CNAME).find_map(|r| r.target()) {
            Some(target) => Some(target.to_string()),
            None => {
                let cname = self.lookup.lookup(domain, RecordType::CNAME);
                if !cname.rcode.is_acceptable_answer() {
                    return self.temporary(domain, cname.rcode);
                }
                let target = cname
                    .answers_of(RecordType::CNAME)
                    .find_map(|r| r.target())
                    .map(str::to_string);
                target
            }
        };

        if let Some(target) = cname_target {
            debug!(domain = %domain, target = %target, "Following CNAME for MX");
            let redirected = self.lookup.lookup(&target, RecordType::MX);
            if let Step::Done(list) = self.from_mx_response(&target, &redirected) {
                return list;
            }
        }

        let a = self.lookup.lookup(domain, RecordType::A);
        if !a.rcode.is_acceptable_answer() {
            return self.temporary(domain, a.rcode);
        }
        let hosts: Vec<MailHost> = a
            .answers_of(RecordType::A)
            .filter_map(|r| r.ipv4().map(|ip| MailHost::with_address(domain, 0, ip, r.ttl)))
            .take(MAX_ADDRESS_FALLBACK_HOSTS)
            .collect();

        if hosts.is_empty() {
            info!(domain = %domain, "No MX, CNAME or A records");
            return MailHostList::bad_domain(self.negative_ttl);
        }

        let ttl = a.min_ttl_of(RecordType::A).unwrap_or(0);
        debug!(domain = %domain, hosts = hosts.len(), "Using A records as mail hosts");
        MailHostList::new(
            ResolutionStatus::Success,
            hosts,
            Duration::from_secs(u64::from(ttl)),
        )
    }

    fn from_mx_response(&self, domain: &str, response: &DnsMessage) -> Step {
        match response.rcode {
            ResponseCode::NoError => {}
            ResponseCode::NameError => {
                info!(domain = %domain, "Domain does not exist");
                return Step::Done(MailHostList::bad_domain(self.negative_ttl));
            }
            rcode => return Step::Done(self.temporary(domain, rcode)),
        }

        if !response.has_answers_of(RecordType::MX) {
            return Step::Continue;
        }

        let hosts: Vec<MailHost> = response
            .answers_of(RecordType::MX)
            .filter_map(|record| match &record.data {
                RecordData::Mx {
                    preference,
                    exchange,
                } if !exchange.is_empty() => Some(host_from_mx(response, *preference, exchange)),
                _ => None,
            })
            .collect();

        if hosts.is_empty() {
            info!(domain = %domain, "MX set names no usable exchange");
            return Step::Done(MailHostList::bad_domain(self.negative_ttl));
        }

        let ttl = response.min_ttl_of(RecordType::MX).unwrap_or(0);
        debug!(domain = %domain, hosts = hosts.len(), ttl, "Resolved MX hosts");
        Step::Done(MailHostList::new(
            ResolutionStatus::Success,
            hosts,
            Duration::from_secs(u64::from(ttl)),
        ))
    }

    fn temporary(&self, domain: &str, rcode: ResponseCode) -> MailHostList {
        warn!(domain = %domain, rcode = %rcode, "Temporary failure resolving mail hosts");
        MailHostList::temporary_error()
    }

    fn negative_ttl_secs(&self) -> u32 {
        u32::try_from(self.negative_ttl.as_secs()).unwrap_or(u32::MAX)
    }
}

fn host_from_mx(response: &DnsMessage, preference: u16, exchange: &str) -> MailHost {
    match response
        .find_additional_a(exchange)
        .and_then(|glue| glue.ipv4().map(|ip| (ip, glue.ttl)))
    {
        Some((ip, ttl)) => MailHost::with_address(exchange, preference, ip, ttl),
        None => MailHost::new(exchange, preference),
    }
}

fn normalize(domain: &str) -> String {
    domain.trim().trim_end_matches('.').to_ascii_lowercase()
}
