//! The kernel neighbor (ARP) table collector: a dual-backend adapter with
//! an optional ARP-priming step.

mod arp_subprocess;
mod netlink;
mod prime;

use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::Arc;

use crate::config::Config;
use crate::net::mac::MacAddr;
use crate::net::network::is_excluded_category;

/// A backend that can enumerate the kernel's current `ip -> mac` neighbor
/// entries. Implementations never raise on partial failure — an
/// unreadable table is an empty map, not an error, per `SPEC_FULL.md` §7.
/// Public so tests (and embedders with their own neighbor source) can
/// substitute a fake without going through netlink or `arp`.
#[async_trait::async_trait]
pub trait NeighborBackend: Send + Sync {
    async fn enumerate(&self) -> HashMap<Ipv4Addr, MacAddr>;
}

/// Produces `ip -> mac` maps from kernel state, preferring the netlink
/// backend and falling back to shelling out to `arp -a -n`.
pub struct NeighborCollector {
    backend: Arc<dyn NeighborBackend>,
}

impl NeighborCollector {
    /// Selects netlink when available, otherwise the subprocess backend.
    /// Netlink availability is a construction-time capability probe (per
    /// the "no runtime reflection" design note) — callers that already know
    /// `has_netlink` from `SystemNetworkInfo` should prefer
    /// [`NeighborCollector::with_netlink`] /
    /// [`NeighborCollector::with_subprocess`] directly.
    pub fn new(has_netlink: bool) -> Self {
        if has_netlink {
            Self::with_netlink()
        } else {
            Self::with_subprocess()
        }
    }

    pub fn with_netlink() -> Self {
        Self { backend: Arc::new(netlink::NetlinkBackend::new()) }
    }

    pub fn with_subprocess() -> Self {
        Self { backend: Arc::new(arp_subprocess::ArpSubprocessBackend::new()) }
    }

    pub fn with_backend(backend: Arc<dyn NeighborBackend>) -> Self {
        Self { backend }
    }

    /// Returns the current `ip -> mac` map, restricted to entries that pass
    /// the §3 invariants (non-ignored MAC, non-excluded address category).
    /// `ips` is consulted only to decide whether ARP priming is worthwhile:
    /// if every requested IP is already present, priming is skipped.
    pub async fn get(&self, ips: &[Ipv4Addr], config: &Config) -> HashMap<Ipv4Addr, MacAddr> {
        let mut neighbours = self.filtered(self.backend.enumerate().await);

        let missing: Vec<Ipv4Addr> = ips
            .iter()
            .copied()
            .filter(|ip| !neighbours.contains_key(ip))
            .collect();
        if !missing.is_empty() {
            prime::prime_arp(&missing, config).await;
            neighbours = self.filtered(self.backend.enumerate().await);
        }
        neighbours
    }

    fn filtered(&self, raw: HashMap<Ipv4Addr, MacAddr>) -> HashMap<Ipv4Addr, MacAddr> {
        raw.into_iter()
            .filter(|(ip, mac)| !is_excluded_category(*ip) && !mac.is_ignored())
            .collect()
    }
}
