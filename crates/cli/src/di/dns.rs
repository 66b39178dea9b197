use ferrous_mx_domain::Config;
use ferrous_mx_infrastructure::dns::{
    FailureEscalation, HostListCache, NameServerRegistry, StubResolver, StubResolverConfig,
    TracingAlertSink, TransportPool, UdpTransportFactory,
};
use ferrous_mx_infrastructure::system::SystemHostLookup;
use std::sync::Arc;
use tracing::{debug, info};

pub struct DnsServices {
    pub resolver: Arc<StubResolver>,
    pub cache: Arc<HostListCache>,
}

impl DnsServices {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        info!("Initializing DNS services");

        let resolver_config = &config.resolver;
        let registry = Arc::new(NameServerRegistry::new(
            resolver_config.name_server_specs()?,
            Arc::new(SystemHostLookup),
        )?);
        let pool = Arc::new(TransportPool::new(
            Arc::new(UdpTransportFactory),
            resolver_config.pool_size,
        ));
        let escalation = Arc::new(FailureEscalation::new(
            resolver_config.escalation.clone(),
            Arc::new(TracingAlertSink),
        ));

        let resolver = Arc::new(StubResolver::new(
            registry,
            pool,
            escalation,
            StubResolverConfig::from(resolver_config),
        ));
        let cache = Arc::new(HostListCache::with_capacity(resolver_config.cache_capacity));

        Ok(Self { resolver, cache })
    }

    pub fn log_stats(&self) {
        let pool = self.resolver.pool_stats();
        let cache = self.cache.stats();
        debug!(
            transports_created = pool.total_created,
            transport_reuse_rate = pool.reuse_rate(),
            cache_entries = cache.entries,
            cache_hit_rate = cache.hit_rate(),
            "DNS service statistics"
        );
    }
}
