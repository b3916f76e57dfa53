//! Decides the ordered list of resolvers a discovery run should try.

use std::net::{IpAddr, Ipv4Addr};

use crate::system::SystemNetworkInfo;

/// The router is only a fallback candidate — per §4.2 steps (a)-(c) — when
/// it isn't already among the configured nameservers and none of those
/// nameservers are already in-network. Returns `None` when the router can't
/// possibly end up in the picked list, regardless of whether it answers ARP.
fn router_fallback_candidate(info: &SystemNetworkInfo) -> Option<Ipv4Addr> {
    let router_ip = info.router_ip?;
    let router_addr = IpAddr::V4(router_ip);

    if info.nameservers.contains(&router_addr) {
        return None;
    }
    let any_in_network = info.nameservers.iter().any(|ns| match ns {
        IpAddr::V4(v4) => info.network.contains(*v4),
        IpAddr::V6(_) => false,
    });
    if any_in_network {
        return None;
    }
    Some(router_ip)
}

/// Whether step (d) — the router ARP probe — is even worth running. `None`
/// means the router is already covered by (a)-(c), so callers should skip
/// the (potentially `ARP_CACHE_POPULATE_TIME`-costly) probe entirely; `Some`
/// carries the router address the probe should target.
pub fn needs_router_arp_probe(info: &SystemNetworkInfo) -> Option<Ipv4Addr> {
    router_fallback_candidate(info)
}

/// Picks `info.nameservers`, appending the default gateway only when the
/// configured nameservers are all off-subnet and the gateway itself answers
/// ARP (`router_answers_arp`). See `SPEC_FULL.md` §4.2 for the full
/// rationale.
pub fn pick(info: &SystemNetworkInfo, router_answers_arp: bool) -> Vec<IpAddr> {
    let mut resolvers = info.nameservers.clone();

    let Some(router_ip) = router_fallback_candidate(info) else {
        return resolvers;
    };
    if router_answers_arp {
        resolvers.push(IpAddr::V4(router_ip));
    }
    resolvers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::net::network::Network;
    use std::net::Ipv4Addr;

    fn info(nameservers: &[&str], router_ip: Option<&str>) -> SystemNetworkInfo {
        SystemNetworkInfo {
            network: Network::new(Ipv4Addr::new(192, 168, 0, 0), 24).unwrap(),
            nameservers: nameservers.iter().map(|s| s.parse().unwrap()).collect(),
            router_ip: router_ip.map(|s| s.parse().unwrap()),
            has_netlink: true,
        }
    }

    #[test]
    fn in_network_resolver_wins() {
        let info = info(&["192.168.0.254", "172.0.0.4"], Some("192.168.0.1"));
        let picked = pick(&info, true);
        let expected: Vec<IpAddr> = vec!["192.168.0.254".parse().unwrap(), "172.0.0.4".parse().unwrap()];
        assert_eq!(picked, expected);
    }

    #[test]
    fn router_fallback_when_all_external_and_reachable() {
        let info = info(&["172.0.0.3", "172.0.0.4"], Some("192.168.0.1"));
        let picked = pick(&info, true);
        let expected: Vec<IpAddr> = vec![
            "172.0.0.3".parse().unwrap(),
            "172.0.0.4".parse().unwrap(),
            "192.168.0.1".parse().unwrap(),
        ];
        assert_eq!(picked, expected);
    }

    #[test]
    fn router_not_appended_when_unreachable() {
        let info = info(&["172.0.0.3", "172.0.0.4"], Some("192.168.0.1"));
        let picked = pick(&info, false);
        let expected: Vec<IpAddr> = vec!["172.0.0.3".parse().unwrap(), "172.0.0.4".parse().unwrap()];
        assert_eq!(picked, expected);
    }

    #[test]
    fn router_not_appended_when_already_configured() {
        let info = info(&["172.0.0.3", "192.168.0.1"], Some("192.168.0.1"));
        let picked = pick(&info, true);
        let expected: Vec<IpAddr> = vec!["172.0.0.3".parse().unwrap(), "192.168.0.1".parse().unwrap()];
        assert_eq!(picked, expected);
    }

    #[test]
    fn no_router_ip_returns_nameservers_unchanged() {
        let info = info(&["172.0.0.3"], None);
        let picked = pick(&info, true);
        assert_eq!(picked, vec!["172.0.0.3".parse::<IpAddr>().unwrap()]);
    }
}
