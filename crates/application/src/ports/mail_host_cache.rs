use ferrous_mx_domain::MailHostList;
use std::sync::Arc;

/// Port for the domain -> resolved host list cache.
pub trait MailHostCache: Send + Sync {
    /// Live entry for `domain`; expired entries are dropped and reported as a miss.
    fn get(&self, domain: &str) -> Option<Arc<MailHostList>>;

    /// Stores `list` unless it has already expired. Returns the entry evicted to make room.
    fn put(&self, domain: &str, list: Arc<MailHostList>) -> Option<(String, Arc<MailHostList>)>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
