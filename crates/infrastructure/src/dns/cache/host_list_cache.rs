use super::metrics::{CacheMetrics, CacheStats};
use ferrous_mx_application::ports::MailHostCache;
use ferrous_mx_domain::MailHostList;
use lru::LruCache;
use rustc_hash::FxBuildHasher;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;
use tracing::{debug, info};

/// Capacity-bounded LRU of domain -> host list, honouring each list's expiry.
///
/// Keys are stored exactly as given. Recency is updated under the same lock
/// as the lookup that touches the entry.
pub struct HostListCache {
    entries: Mutex<LruCache<String, Arc<MailHostList>, FxBuildHasher>>,
    metrics: CacheMetrics,
}

impl HostListCache {
    pub fn new(capacity: NonZeroUsize) -> Self {
        info!(capacity = capacity.get(), "Host list cache initialized");

        Self {
            entries: Mutex::new(LruCache::with_hasher(capacity, FxBuildHasher)),
            metrics: CacheMetrics::default(),
        }
    }

    /// Zero is rounded up to a single entry.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::new(NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN))
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<String, Arc<MailHostList>, FxBuildHasher>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn get_at(&self, domain: &str, now: Instant) -> Option<Arc<MailHostList>> {
        let mut entries = self.lock();

        match entries.get(domain) {
            Some(list) if !list.is_expired_at(now) => {
                let list = Arc::clone(list);
                CacheMetrics::bump(&self.metrics.hits);
                return Some(list);
            }
            Some(_) => {}
            None => {
                CacheMetrics::bump(&self.metrics.misses);
                return None;
            }
        }

        entries.pop(domain);
        CacheMetrics::bump(&self.metrics.expirations);
        CacheMetrics::bump(&self.metrics.misses);
        debug!(domain, "Expired host list evicted");
        None
    }

    pub fn put_at(
        &self,
        domain: &str,
        list: Arc<MailHostList>,
        now: Instant,
    ) -> Option<(String, Arc<MailHostList>)> {
        if list.is_expired_at(now) {
            debug!(domain, "Refusing to cache an expired host list");
            return None;
        }

        let mut entries = self.lock();
        let replacing = entries.contains(domain);
        let displaced = entries.push(domain.to_string(), list);
        CacheMetrics::bump(&self.metrics.insertions);

        if replacing {
            return None;
        }
        if let Some((evicted, _)) = &displaced {
            CacheMetrics::bump(&self.metrics.evictions);
            debug!(domain, evicted = %evicted, "Evicted least recently used host list");
        }
        displaced
    }

    pub fn capacity(&self) -> usize {
        self.lock().cap().get()
    }

    pub fn stats(&self) -> CacheStats {
        let entries = self.lock().len();
        self.metrics.snapshot(entries)
    }
}

impl MailHostCache for HostListCache {
    fn get(&self, domain: &str) -> Option<Arc<MailHostList>> {
        self.get_at(domain, Instant::now())
    }

    fn put(&self, domain: &str, list: Arc<MailHostList>) -> Option<(String, Arc<MailHostList>)> {
        self.put_at(domain, list, Instant::now())
    }

    fn len(&self) -> usize {
        self.lock().len()
    }
}
