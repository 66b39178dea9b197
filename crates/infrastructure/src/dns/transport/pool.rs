use super::{DnsTransport, TransportFactory};
use ferrous_mx_domain::DomainError;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tracing::{debug, info};

/// Bounded pool of reusable transports.
///
/// A transport is handed out exclusively by `acquire` and goes back to the
/// pool when the guard is dropped, unless it was marked failed or the pool
/// already holds `max_idle` transports.
pub struct TransportPool {
    factory: Arc<dyn TransportFactory>,
    idle: Mutex<Vec<Box<dyn DnsTransport>>>,
    max_idle: usize,
    total_created: AtomicU64,
    total_reused: AtomicU64,
    total_discarded: AtomicU64,
}

impl TransportPool {
    pub fn new(factory: Arc<dyn TransportFactory>, max_idle: usize) -> Self {
        info!(max_idle, "Initializing transport pool");

        Self {
            factory,
            idle: Mutex::new(Vec::with_capacity(max_idle)),
            max_idle,
            total_created: AtomicU64::new(0),
            total_reused: AtomicU64::new(0),
            total_discarded: AtomicU64::new(0),
        }
    }

    /// Takes an idle transport or creates a new one.
    pub fn acquire(&self) -> Result<PooledTransport<'_>, DomainError> {
        if let Some(transport) = self.lock_idle().pop() {
            self.total_reused.fetch_add(1, Ordering::Relaxed);
            debug!("Reusing transport from pool");
            return Ok(PooledTransport::new(transport, self));
        }

        let transport = self.factory.create()?;
        self.total_created.fetch_add(1, Ordering::Relaxed);
        debug!(protocol = transport.protocol_name(), "Created new transport");

        Ok(PooledTransport::new(transport, self))
    }

    fn release(&self, transport: Box<dyn DnsTransport>, reusable: bool) {
        if !reusable {
            self.total_discarded.fetch_add(1, Ordering::Relaxed);
            debug!("Discarding failed transport");
            return;
        }

        let mut idle = self.lock_idle();
        if idle.len() < self.max_idle {
            idle.push(transport);
            debug!(pool_size = idle.len(), "Returned transport to pool");
        } else {
            self.total_discarded.fetch_add(1, Ordering::Relaxed);
            debug!("Pool full, dropping transport");
        }
    }

    fn lock_idle(&self) -> MutexGuard<'_, Vec<Box<dyn DnsTransport>>> {
        self.idle.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn idle_count(&self) -> usize {
        self.lock_idle().len()
    }

    pub fn max_idle(&self) -> usize {
        self.max_idle
    }

    pub fn stats(&self) -> PoolStats {
        PoolStats {
            total_created: self.total_created.load(Ordering::Relaxed),
            total_reused: self.total_reused.load(Ordering::Relaxed),
            total_discarded: self.total_discarded.load(Ordering::Relaxed),
            idle: self.idle_count(),
        }
    }
}

/// Transport on loan from a `TransportPool`, released on drop.
pub struct PooledTransport<'a> {
    transport: Option<Box<dyn DnsTransport>>,
    pool: &'a TransportPool,
    failed: bool,
}

impl<'a> PooledTransport<'a> {
    fn new(transport: Box<dyn DnsTransport>, pool: &'a TransportPool) -> Self {
        Self {
            transport: Some(transport),
            pool,
            failed: false,
        }
    }

    /// The transport is dropped instead of returned to the pool.
    pub fn mark_failed(&mut self) {
        self.failed = true;
    }

    pub fn is_failed(&self) -> bool {
        self.failed
    }

    pub fn exchange(
        &mut self,
        server: SocketAddr,
        request: &[u8],
        timeout: Duration,
    ) -> Result<Vec<u8>, DomainError> {
        match self.transport.as_mut() {
            Some(transport) => transport.exchange(server, request, timeout),
            None => Err(DomainError::TransportIo {
                server: server.to_string(),
                reason: "transport already released".to_string(),
            }),
        }
    }
}

impl<'a> Drop for PooledTransport<'a> {
    fn drop(&mut self) {
        if let Some(transport) = self.transport.take() {
            self.pool.release(transport, !self.failed);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStats {
    pub total_created: u64,
    pub total_reused: u64,
    pub total_discarded: u64,
    pub idle: usize,
}

impl PoolStats {
    pub fn reuse_rate(&self) -> f64 {
        if self.total_created == 0 {
            0.0
        } else {
            self.total_reused as f64 / self.total_created as f64
        }
    }
}
