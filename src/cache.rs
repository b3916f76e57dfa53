//! Time-bounded memoization of resolvers that proved unresponsive.

use std::collections::HashSet;
use std::net::IpAddr;
use std::time::{Duration, Instant};

/// Resolvers to skip on subsequent runs, cleared wholesale once every
/// [`Config::cache_clear_interval`](crate::Config::cache_clear_interval).
///
/// Single-owner: only [`crate::DiscoveryEngine::discover`] reads or writes
/// this, so no internal locking is needed.
#[derive(Debug)]
pub struct FailedResolverCache {
    entries: HashSet<IpAddr>,
    last_cleared_at: Instant,
}

impl FailedResolverCache {
    pub fn new() -> Self {
        Self {
            entries: HashSet::new(),
            last_cleared_at: Instant::now(),
        }
    }

    pub fn contains(&self, resolver: &IpAddr) -> bool {
        self.entries.contains(resolver)
    }

    pub fn add_all(&mut self, resolvers: impl IntoIterator<Item = IpAddr>) {
        self.entries.extend(resolvers);
    }

    /// Clears `entries` if more than `interval` has elapsed since the last
    /// clear (or construction).
    pub fn maybe_clear(&mut self, now: Instant, interval: Duration) {
        if now.duration_since(self.last_cleared_at) > interval {
            self.entries.clear();
            self.last_cleared_at = now;
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

impl Default for FailedResolverCache {
    fn default() -> Self {
        Self::new()
    }
}
