//! Tunable constants, collected behind a `Config` so tests can shrink
//! timeouts and batch sizes without touching the algorithm.

use std::time::Duration;

/// Subnets larger than this are rejected outright (`discover()` returns `[]`).
pub const MAX_ADDRESSES: usize = 2048;

/// Number of PTR queries launched concurrently per resolver before the next
/// chunk starts.
pub const QUERY_BUCKET_SIZE: usize = 64;

/// Per-query timeout for a single PTR lookup.
pub const DNS_RESPONSE_TIMEOUT: Duration = Duration::from_secs(2);

/// How long to wait, after sending priming datagrams, before re-reading the
/// kernel neighbor table.
pub const ARP_CACHE_POPULATE_TIME: Duration = Duration::from_secs(10);

/// Wall-clock timeout for the `arp -a -n` subprocess backend.
pub const ARP_TIMEOUT: Duration = Duration::from_secs(10);

/// How often the failed-resolver cache is cleared.
pub const CACHE_CLEAR_INTERVAL: Duration = Duration::from_secs(86_400);

/// Standard DNS port.
pub const DNS_PORT: u16 = 53;

/// Runtime-overridable version of the constants above. `DiscoveryEngine::new`
/// uses [`Config::default`], which is bit-exact with the constants; tests
/// construct a [`Config`] directly to run the pipeline on a small, fast
/// clock.
#[derive(Debug, Clone)]
pub struct Config {
    pub max_addresses: usize,
    pub query_bucket_size: usize,
    pub dns_response_timeout: Duration,
    pub arp_cache_populate_time: Duration,
    pub arp_timeout: Duration,
    pub cache_clear_interval: Duration,
    pub dns_port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_addresses: MAX_ADDRESSES,
            query_bucket_size: QUERY_BUCKET_SIZE,
            dns_response_timeout: DNS_RESPONSE_TIMEOUT,
            arp_cache_populate_time: ARP_CACHE_POPULATE_TIME,
            arp_timeout: ARP_TIMEOUT,
            cache_clear_interval: CACHE_CLEAR_INTERVAL,
            dns_port: DNS_PORT,
        }
    }
}
