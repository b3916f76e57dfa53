//! The `SystemNetworkInfo` the engine is built around, and the provider
//! trait that supplies it.
//!
//! Actually walking network adapters and the routing table to discover the
//! host's own address, attached subnet, and default gateway is out of scope
//! for this crate (see `SPEC_FULL.md` §1) — callers implement
//! [`SystemNetworkInfoSource`] for their platform and hand it to
//! [`crate::DiscoveryEngine::with_source`]. The one piece of that collection
//! that *is* implemented here is [`parse_resolv_conf`]: a small, pure,
//! OS-independent line parser with a literal test case in the spec.

use std::net::IpAddr;

use crate::net::network::Network;
use crate::Result;

/// Everything the engine needs to know about the host's network attachment
/// for a single discovery run. Treated as immutable once obtained.
#[derive(Debug, Clone)]
pub struct SystemNetworkInfo {
    pub network: Network,
    pub nameservers: Vec<IpAddr>,
    pub router_ip: Option<std::net::Ipv4Addr>,
    pub has_netlink: bool,
}

/// External collaborator that produces a [`SystemNetworkInfo`]. Gathering
/// this involves OS-specific, possibly-blocking I/O (reading
/// `/etc/resolv.conf`, enumerating adapters, inspecting the routing table),
/// so implementations should expect to be called via `spawn_blocking` or
/// similar — `DiscoveryEngine` awaits this once per engine lifetime and
/// caches the result.
#[async_trait::async_trait]
pub trait SystemNetworkInfoSource: Send + Sync {
    async fn load(&self) -> Result<SystemNetworkInfo>;
}

/// Parses `/etc/resolv.conf`-style lines into an ordered list of nameserver
/// addresses. Blank lines and lines starting with `#` or `;` (after leading
/// whitespace is stripped) are ignored; only the `nameserver <addr>` keyword
/// is recognized, matching the subset every recursive resolver's resolv.conf
/// actually uses.
pub fn parse_resolv_conf<I, S>(lines: I) -> Vec<IpAddr>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut nameservers = Vec::new();
    for line in lines {
        let line = line.as_ref().trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }
        let mut parts = line.split_whitespace();
        let Some(keyword) = parts.next() else {
            continue;
        };
        if keyword != "nameserver" {
            continue;
        }
        let Some(addr) = parts.next() else {
            continue;
        };
        if let Ok(ip) = addr.parse::<IpAddr>() {
            nameservers.push(ip);
        }
    }
    nameservers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nameservers_ignoring_comments_and_whitespace() {
        let lines = [
            "# comment",
            "; comment",
            " ; comment",
            "nameserver 3.3.4.3",
            "   nameserver   32.2.1.1   ",
            " nameserver 2001:4860:4860::8888",
        ];
        let parsed = parse_resolv_conf(lines);
        assert_eq!(
            parsed,
            vec![
                "3.3.4.3".parse::<IpAddr>().unwrap(),
                "32.2.1.1".parse::<IpAddr>().unwrap(),
                "2001:4860:4860::8888".parse::<IpAddr>().unwrap(),
            ]
        );
    }

    #[test]
    fn ignores_blank_lines_and_unknown_keywords() {
        let lines = ["", "   ", "domain example.com", "nameserver 1.1.1.1"];
        let parsed = parse_resolv_conf(lines);
        assert_eq!(parsed, vec!["1.1.1.1".parse::<IpAddr>().unwrap()]);
    }

    #[test]
    fn skips_malformed_address() {
        let lines = ["nameserver not-an-ip", "nameserver 8.8.8.8"];
        let parsed = parse_resolv_conf(lines);
        assert_eq!(parsed, vec!["8.8.8.8".parse::<IpAddr>().unwrap()]);
    }
}
