use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::errors::ConfigError;

pub const DEFAULT_DNS_PORT: u16 = 53;
pub const MAX_TIMEOUT_SECS: u64 = 300;
pub const MAX_NEGATIVE_TTL_SECS: u64 = 7 * 24 * 60 * 60;

/// A configured name server as `host` and `port`; the host may still need resolving.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NameServerSpec {
    pub host: String,
    pub port: u16,
}

impl NameServerSpec {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl FromStr for NameServerSpec {
    type Err = String;

    /// Accepts `host`, `host:port`, `[host]` and `[host]:port`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("Empty name server address".to_string());
        }

        if let Some(rest) = s.strip_prefix('[') {
            let end = rest
                .find(']')
                .ok_or_else(|| format!("Unterminated '[' in name server '{}'", s))?;
            let host = &rest[..end];
            let tail = &rest[end + 1..];
            let port = match tail.strip_prefix(':') {
                Some(port_str) => parse_port(s, port_str)?,
                None if tail.is_empty() => DEFAULT_DNS_PORT,
                None => return Err(format!("Invalid name server '{}'", s)),
            };
            if host.is_empty() {
                return Err(format!("Empty host in name server '{}'", s));
            }
            return Ok(Self::new(host, port));
        }

        match s.rsplit_once(':') {
            Some((host, port_str)) if !host.contains(':') => {
                if host.is_empty() {
                    return Err(format!("Empty host in name server '{}'", s));
                }
                Ok(Self::new(host, parse_port(s, port_str)?))
            }
            Some(_) => Err(format!(
                "Invalid name server '{}'. IPv6 servers are not supported",
                s
            )),
            None => Ok(Self::new(s, DEFAULT_DNS_PORT)),
        }
    }
}

fn parse_port(s: &str, port_str: &str) -> Result<u16, String> {
    match port_str.parse::<u16>() {
        Ok(0) | Err(_) => Err(format!("Invalid port in name server '{}'", s)),
        Ok(port) => Ok(port),
    }
}

impl fmt::Display for NameServerSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Raise `alert_code` once `threshold` consecutive lookups have failed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EscalationRule {
    pub threshold: u32,
    pub alert_code: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    #[serde(default = "default_name_servers")]
    pub name_servers: Vec<String>,

    /// Timeout of the first attempt; doubled on every retry.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_retries")]
    pub retries: u32,

    /// Idle UDP transports kept for reuse.
    #[serde(default = "default_pool_size")]
    pub pool_size: usize,

    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,

    #[serde(default = "default_negative_ttl_secs")]
    pub negative_ttl_secs: u64,

    #[serde(default = "default_escalation")]
    pub escalation: Vec<EscalationRule>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            name_servers: default_name_servers(),
            timeout_secs: default_timeout_secs(),
            retries: default_retries(),
            pool_size: default_pool_size(),
            cache_capacity: default_cache_capacity(),
            negative_ttl_secs: default_negative_ttl_secs(),
            escalation: default_escalation(),
        }
    }
}

impl ResolverConfig {
    pub fn name_server_specs(&self) -> Result<Vec<NameServerSpec>, ConfigError> {
        self.name_servers
            .iter()
            .map(|s| s.parse::<NameServerSpec>().map_err(ConfigError::Validation))
            .collect()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name_servers.is_empty() {
            return Err(ConfigError::Validation(
                "No name servers configured".to_string(),
            ));
        }
        self.name_server_specs()?;

        if self.timeout_secs == 0 || self.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ConfigError::Validation(format!(
                "timeout_secs must be between 1 and {}",
                MAX_TIMEOUT_SECS
            )));
        }
        if self.negative_ttl_secs > MAX_NEGATIVE_TTL_SECS {
            return Err(ConfigError::Validation(format!(
                "negative_ttl_secs must not exceed {}",
                MAX_NEGATIVE_TTL_SECS
            )));
        }
        if self.cache_capacity == 0 {
            return Err(ConfigError::Validation(
                "cache_capacity must be at least 1".to_string(),
            ));
        }
        if let Some(rule) = self.escalation.iter().find(|r| r.threshold == 0) {
            return Err(ConfigError::Validation(format!(
                "Escalation rule '{}' has a zero threshold",
                rule.alert_code
            )));
        }
        Ok(())
    }
}

fn default_name_servers() -> Vec<String> {
    vec!["8.8.8.8:53".to_string(), "1.1.1.1:53".to_string()]
}

fn default_timeout_secs() -> u64 {
    5
}

fn default_retries() -> u32 {
    2
}

fn default_pool_size() -> usize {
    4
}

fn default_cache_capacity() -> usize {
    1000
}

fn default_negative_ttl_secs() -> u64 {
    10
}

fn default_escalation() -> Vec<EscalationRule> {
    vec![EscalationRule {
        threshold: 10,
        alert_code: "DNS_FAILURE".to_string(),
    }]
}
