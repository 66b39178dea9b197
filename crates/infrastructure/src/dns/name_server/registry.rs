use ferrous_mx_application::ports::HostAddrLookup;
use ferrous_mx_domain::{DomainError, NameServerSpec};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};
use tracing::{debug, info, warn};

/// A configured name server. Its address is resolved on first use and then
/// kept for the life of the process; a failed resolution is retried later.
#[derive(Debug)]
pub struct NameServer {
    spec: NameServerSpec,
    resolved: OnceLock<SocketAddr>,
    consecutive_failures: AtomicU32,
}

impl NameServer {
    pub fn new(spec: NameServerSpec) -> Self {
        Self {
            spec,
            resolved: OnceLock::new(),
            consecutive_failures: AtomicU32::new(0),
        }
    }

    pub fn spec(&self) -> &NameServerSpec {
        &self.spec
    }

    pub fn resolved_addr(&self) -> Option<SocketAddr> {
        self.resolved.get().copied()
    }

    /// Never reset; only used to spread attempts away from a bad server.
    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures.load(Ordering::Relaxed)
    }

    fn resolve(&self, lookup: &dyn HostAddrLookup) -> Option<SocketAddr> {
        if let Some(addr) = self.resolved.get() {
            return Some(*addr);
        }
        let addr = lookup.resolve(&self.spec.host, self.spec.port)?;
        let addr = *self.resolved.get_or_init(|| addr);
        debug!(server = %self.spec, addr = %addr, "Name server address resolved");
        Some(addr)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectedServer {
    pub index: usize,
    pub addr: SocketAddr,
}

/// Ordered, immutable set of name servers with round-robin selection.
pub struct NameServerRegistry {
    servers: Vec<NameServer>,
    host_lookup: Arc<dyn HostAddrLookup>,
    cursor: AtomicUsize,
}

impl NameServerRegistry {
    pub fn new(
        specs: Vec<NameServerSpec>,
        host_lookup: Arc<dyn HostAddrLookup>,
    ) -> Result<Self, DomainError> {
        if specs.is_empty() {
            return Err(DomainError::ConfigError(
                "at least one name server is required".to_string(),
            ));
        }
        info!(count = specs.len(), "Name server registry initialized");

        Ok(Self {
            servers: specs.into_iter().map(NameServer::new).collect(),
            host_lookup,
            cursor: AtomicUsize::new(0),
        })
    }

    /// Next server in rotation whose address resolves. Each call advances the
    /// cursor, so a retry after a failure goes to a different server when
    /// more than one is configured.
    pub fn select(&self) -> Result<SelectedServer, DomainError> {
        let count = self.servers.len();
        let start = self.cursor.fetch_add(1, Ordering::Relaxed);

        for step in 0..count {
            let index = start.wrapping_add(step) % count;
            let server = &self.servers[index];
            if let Some(addr) = server.resolve(self.host_lookup.as_ref()) {
                if step > 0 {
                    self.cursor.fetch_add(step, Ordering::Relaxed);
                }
                return Ok(SelectedServer { index, addr });
            }
            warn!(server = %server.spec, "Skipping unresolvable name server");
        }

        Err(DomainError::NoResolvableNameServer)
    }

    pub fn mark_failure(&self, index: usize) {
        if let Some(server) = self.servers.get(index) {
            let failures = server.consecutive_failures.fetch_add(1, Ordering::Relaxed) + 1;
            debug!(server = %server.spec, failures, "Name server attempt failed");
        }
    }

    pub fn servers(&self) -> &[NameServer] {
        &self.servers
    }

    pub fn len(&self) -> usize {
        self.servers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }
}
