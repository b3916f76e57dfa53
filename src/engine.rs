//! The top-level discovery pipeline.

use std::collections::{HashMap, HashSet};
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::cache::FailedResolverCache;
use crate::config::Config;
use crate::dns::{short_hostname, PTRBatch, PtrTransport, UdpPtrTransport};
use crate::error::Result;
use crate::neighbor::{NeighborBackend, NeighborCollector};
use crate::net::mac::MacAddr;
use crate::resolver_selector;
use crate::system::{SystemNetworkInfo, SystemNetworkInfoSource};

/// One discovered host: an IPv4 address with both a MAC (from the neighbor
/// table) and a hostname (from reverse DNS).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredHost {
    pub ip: String,
    pub mac: String,
    pub hostname: String,
}

/// Long-lived driver of discovery runs. `SystemNetworkInfo` is fetched once,
/// lazily, on the first call to [`DiscoveryEngine::discover`] and reused;
/// the failed-resolver cache persists for the lifetime of the engine.
pub struct DiscoveryEngine {
    source: Arc<dyn SystemNetworkInfoSource>,
    config: Config,
    info: Option<SystemNetworkInfo>,
    failed_resolvers: FailedResolverCache,
    transport: Arc<dyn PtrTransport>,
    // `None` means "dispatch on `SystemNetworkInfo::has_netlink` as usual".
    // Set by tests that want to observe the neighbor-table side of a run
    // without netlink or `arp` being available in CI.
    neighbor_backend: Option<Arc<dyn NeighborBackend>>,
    // Built lazily alongside `info` on the first `discover()` call, then
    // held for the engine's lifetime — one netlink handle (or one `arp`
    // backend) per engine, per `SPEC_FULL.md` §5, not one per call.
    neighbors: Option<NeighborCollector>,
}

impl DiscoveryEngine {
    /// Builds an engine around the given `SystemNetworkInfo` provider, using
    /// bit-exact default timeouts and batch sizes.
    pub fn with_source(source: Arc<dyn SystemNetworkInfoSource>) -> Self {
        Self::with_source_and_config(source, Config::default())
    }

    pub fn with_source_and_config(source: Arc<dyn SystemNetworkInfoSource>, config: Config) -> Self {
        Self {
            source,
            config,
            info: None,
            failed_resolvers: FailedResolverCache::new(),
            transport: Arc::new(UdpPtrTransport),
            neighbor_backend: None,
            neighbors: None,
        }
    }

    /// Test-only constructor: substitutes the PTR transport and neighbor
    /// backend so a full `discover()` run can be exercised without real
    /// sockets, netlink, or `arp` being reachable.
    #[cfg(test)]
    fn with_overrides(
        source: Arc<dyn SystemNetworkInfoSource>,
        config: Config,
        transport: Arc<dyn PtrTransport>,
        neighbor_backend: Arc<dyn NeighborBackend>,
    ) -> Self {
        Self {
            source,
            config,
            info: None,
            failed_resolvers: FailedResolverCache::new(),
            transport,
            neighbor_backend: Some(neighbor_backend),
            neighbors: None,
        }
    }

    /// Runs one discovery pass. Safe to call repeatedly on the same engine;
    /// `SystemNetworkInfo` is cached after the first successful load and the
    /// failed-resolver cache carries over between calls.
    pub async fn discover(&mut self) -> Result<Vec<DiscoveredHost>> {
        if self.info.is_none() {
            self.info = Some(self.source.load().await?);
        }
        let info = self.info.clone().expect("just populated above");

        if info.network.num_addresses() > self.config.max_addresses {
            warn!(
                num_addresses = info.network.num_addresses(),
                max = self.config.max_addresses,
                "network too large, skipping discovery run"
            );
            return Ok(Vec::new());
        }

        let now = std::time::Instant::now();
        self.failed_resolvers
            .maybe_clear(now, self.config.cache_clear_interval);

        if self.neighbors.is_none() {
            self.neighbors = Some(match &self.neighbor_backend {
                Some(backend) => NeighborCollector::with_backend(Arc::clone(backend)),
                None => NeighborCollector::new(info.has_netlink),
            });
        }
        let neighbors = self.neighbors.as_ref().expect("just populated above");

        // Step (d) only matters when the router isn't already covered by
        // (a)-(c); skip the probe (and its up-to-`ARP_CACHE_POPULATE_TIME`
        // cost) entirely when `resolver_selector::pick` would ignore it.
        let router_answers_arp = match resolver_selector::needs_router_arp_probe(&info) {
            Some(router_ip) => {
                let probe = neighbors.get(&[router_ip], &self.config).await;
                probe.contains_key(&router_ip)
            }
            None => false,
        };
        let resolvers = resolver_selector::pick(&info, router_answers_arp);

        let hosts: Vec<Ipv4Addr> = info.network.hosts().collect();
        let mut hostnames: HashMap<Ipv4Addr, String> = HashMap::new();
        let mut failed_this_run: HashSet<IpAddr> = HashSet::new();

        for resolver in &resolvers {
            if self.failed_resolvers.contains(resolver) {
                debug!(%resolver, "skipping resolver in failed cache");
                continue;
            }

            let pending: Vec<Ipv4Addr> = hosts
                .iter()
                .copied()
                .filter(|ip| !hostnames.contains_key(ip))
                .collect();
            if pending.is_empty() {
                break;
            }

            let replies = PTRBatch::run_with(self.transport.as_ref(), *resolver, &pending, &self.config).await;
            if replies.is_empty() {
                failed_this_run.insert(*resolver);
                continue;
            }

            for (ip, reply) in pending.iter().zip(replies.iter()) {
                if let Some(reply) = reply {
                    let hostname = short_hostname(reply);
                    if !hostname.is_empty() {
                        hostnames.insert(*ip, hostname);
                    }
                }
            }

            if !hostnames.is_empty() {
                info!(%resolver, resolved = hostnames.len(), "resolver answered, stopping fan-out");
                break;
            }
            // Every reply for this resolver was null: the resolver did
            // respond (the result wasn't empty) but named nothing, so it is
            // not recorded as a candidate failure — see SPEC_FULL.md's open
            // question on malformed-only responses.
        }

        if !hostnames.is_empty() {
            self.failed_resolvers.add_all(failed_this_run);
        }

        let resolved_ips: Vec<Ipv4Addr> = hostnames.keys().copied().collect();
        let macs = neighbors.get(&resolved_ips, &self.config).await;

        Ok(hostnames
            .into_iter()
            .filter_map(|(ip, hostname)| {
                macs.get(&ip).map(|mac: &MacAddr| DiscoveredHost {
                    ip: ip.to_string(),
                    mac: mac.to_string(),
                    hostname,
                })
            })
            .collect())
    }
}
