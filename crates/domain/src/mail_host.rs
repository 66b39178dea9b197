//! Resolved mail exchanger lists.
//!
//! A [`MailHostList`] is built once by the MX resolution use case and is
//! immutable afterwards, apart from the per-host address slot which is
//! refreshed when its TTL runs out.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Mutex;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolutionStatus {
    Success,
    TemporaryError,
    BadDomain,
}

impl ResolutionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionStatus::Success => "SUCCESS",
            ResolutionStatus::TemporaryError => "TEMPORARY_ERROR",
            ResolutionStatus::BadDomain => "BAD_DOMAIN",
        }
    }
}

impl fmt::Display for ResolutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
struct AddressSlot {
    ip: Option<String>,
    addr: Option<IpAddr>,
    expires_at: Instant,
}

impl AddressSlot {
    fn empty(now: Instant) -> Self {
        Self {
            ip: None,
            addr: None,
            expires_at: now,
        }
    }

    fn filled(ip: Option<Ipv4Addr>, ttl_secs: u32, now: Instant) -> Self {
        // A zero TTL would force a fresh lookup on every use.
        let ttl = Duration::from_secs(u64::from(ttl_secs.max(1)));
        Self {
            ip: ip.map(|ip| ip.to_string()),
            addr: ip.map(IpAddr::V4),
            expires_at: now + ttl,
        }
    }
}

/// One mail exchanger with its preference and a lazily refreshed address.
#[derive(Debug)]
pub struct MailHost {
    name: String,
    preference: u16,
    address: Mutex<AddressSlot>,
}

impl MailHost {
    pub fn new(name: impl Into<String>, preference: u16) -> Self {
        Self {
            name: name.into(),
            preference,
            address: Mutex::new(AddressSlot::empty(Instant::now())),
        }
    }

    /// Host seeded with an address, typically from glue in the additional section.
    pub fn with_address(name: impl Into<String>, preference: u16, ip: Ipv4Addr, ttl_secs: u32) -> Self {
        Self {
            name: name.into(),
            preference,
            address: Mutex::new(AddressSlot::filled(Some(ip), ttl_secs, Instant::now())),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn preference(&self) -> u16 {
        self.preference
    }

    /// Last known dotted-quad address, fresh or not.
    pub fn ip(&self) -> Option<String> {
        self.slot().ip
    }

    pub fn ip_expires_at(&self) -> Instant {
        self.slot().expires_at
    }

    /// Cached address if it has not expired at `now`.
    pub fn cached_addr_at(&self, now: Instant) -> Option<IpAddr> {
        let slot = self.slot();
        if now < slot.expires_at {
            slot.addr
        } else {
            None
        }
    }

    pub fn needs_refresh_at(&self, now: Instant) -> bool {
        now >= self.slot().expires_at
    }

    /// Replaces the address slot; `ip` and the parsed address always change together.
    pub fn store_address(&self, ip: Option<Ipv4Addr>, ttl_secs: u32, now: Instant) {
        let slot = AddressSlot::filled(ip, ttl_secs, now);
        match self.address.lock() {
            Ok(mut guard) => *guard = slot,
            Err(poisoned) => *poisoned.into_inner() = slot,
        }
    }

    fn slot(&self) -> AddressSlot {
        match self.address.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Clone for MailHost {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            preference: self.preference,
            address: Mutex::new(self.slot()),
        }
    }
}

impl PartialEq for MailHost {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.preference == other.preference
    }
}

impl fmt::Display for MailHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ip() {
            Some(ip) => write!(f, "{} {} [{}]", self.preference, self.name, ip),
            None => write!(f, "{} {}", self.preference, self.name),
        }
    }
}

/// Outcome of resolving the mail hosts of one domain.
#[derive(Debug, Clone)]
pub struct MailHostList {
    status: ResolutionStatus,
    hosts: Vec<MailHost>,
    expires_at: Instant,
    lowest_preference_group_size: usize,
}

impl MailHostList {
    /// Builds a list valid for `ttl`; hosts are stable-sorted by ascending preference.
    pub fn new(status: ResolutionStatus, hosts: Vec<MailHost>, ttl: Duration) -> Self {
        Self::with_expiry(status, hosts, Instant::now() + ttl)
    }

    pub fn with_expiry(status: ResolutionStatus, mut hosts: Vec<MailHost>, expires_at: Instant) -> Self {
        hosts.sort_by_key(|h| h.preference());
        let lowest_preference_group_size = match hosts.first() {
            Some(first) => hosts
                .iter()
                .take_while(|h| h.preference() == first.preference())
                .count(),
            None => 0,
        };
        Self {
            status,
            hosts,
            expires_at,
            lowest_preference_group_size,
        }
    }

    pub fn temporary_error() -> Self {
        Self::with_expiry(ResolutionStatus::TemporaryError, Vec::new(), Instant::now())
    }

    pub fn bad_domain(ttl: Duration) -> Self {
        Self::new(ResolutionStatus::BadDomain, Vec::new(), ttl)
    }

    pub fn status(&self) -> ResolutionStatus {
        self.status
    }

    pub fn is_success(&self) -> bool {
        self.status == ResolutionStatus::Success
    }

    /// Hosts in ascending preference order.
    pub fn hosts(&self) -> &[MailHost] {
        &self.hosts
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    pub fn expires_at(&self) -> Instant {
        self.expires_at
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    /// Visits every host once, starting at a random member of the lowest-preference group.
    pub fn iter(&self) -> MailHostIter<'_> {
        let first = if self.lowest_preference_group_size > 1 {
            fastrand::usize(..self.lowest_preference_group_size)
        } else {
            0
        };
        self.iter_starting_at(first)
    }

    /// Same order as [`iter`](Self::iter) with a fixed starting index.
    ///
    /// `first` is clamped into the lowest-preference group.
    pub fn iter_starting_at(&self, first: usize) -> MailHostIter<'_> {
        let first = first.min(self.lowest_preference_group_size.saturating_sub(1));
        MailHostIter {
            hosts: &self.hosts,
            first,
            position: 0,
        }
    }
}

impl<'a> IntoIterator for &'a MailHostList {
    type Item = &'a MailHost;
    type IntoIter = MailHostIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Preference-ordered walk with index 0 and the chosen first index swapped.
pub struct MailHostIter<'a> {
    hosts: &'a [MailHost],
    first: usize,
    position: usize,
}

impl<'a> Iterator for MailHostIter<'a> {
    type Item = &'a MailHost;

    fn next(&mut self) -> Option<Self::Item> {
        if self.position >= self.hosts.len() {
            return None;
        }
        let index = if self.position == 0 {
            self.first
        } else if self.position == self.first {
            0
        } else {
            self.position
        };
        self.position += 1;
        self.hosts.get(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.hosts.len() - self.position;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for MailHostIter<'_> {}
