use super::DnsServices;
use ferrous_mx_application::use_cases::{ResolveMailHostsUseCase, ReverseLookupUseCase};
use ferrous_mx_domain::Config;
use std::sync::Arc;
use std::time::Duration;

pub struct UseCases {
    pub resolve_mail_hosts: Arc<ResolveMailHostsUseCase>,
    pub reverse_lookup: Arc<ReverseLookupUseCase>,
}

impl UseCases {
    pub fn new(config: &Config, dns: &DnsServices) -> Self {
        let negative_ttl = Duration::from_secs(config.resolver.negative_ttl_secs);

        Self {
            resolve_mail_hosts: Arc::new(
                ResolveMailHostsUseCase::new(dns.resolver.clone(), negative_ttl)
                    .with_cache(dns.cache.clone()),
            ),
            reverse_lookup: Arc::new(ReverseLookupUseCase::new(dns.resolver.clone())),
        }
    }
}
