mod host_list_cache;
mod metrics;

pub use host_list_cache::HostListCache;
pub use metrics::{CacheMetrics, CacheStats};
