use ferrous_mx_domain::ResolverConfig;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StubResolverConfig {
    /// Timeout of the first attempt; every retry doubles it.
    pub timeout: Duration,
    /// Attempts beyond the first.
    pub retries: u32,
}

impl StubResolverConfig {
    pub fn new(timeout: Duration, retries: u32) -> Self {
        Self { timeout, retries }
    }

    pub fn attempts(&self) -> u32 {
        self.retries.saturating_add(1)
    }
}

impl Default for StubResolverConfig {
    fn default() -> Self {
        Self::new(Duration::from_secs(5), 2)
    }
}

impl From<&ResolverConfig> for StubResolverConfig {
    fn from(config: &ResolverConfig) -> Self {
        Self::new(Duration::from_secs(config.timeout_secs), config.retries)
    }
}
