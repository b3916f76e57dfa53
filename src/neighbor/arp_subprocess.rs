//! Kernel neighbor table via the `arp -a -n` subprocess, used when netlink
//! is unavailable.

use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, warn};

use super::NeighborBackend;
use crate::config::ARP_TIMEOUT;
use crate::net::mac::MacAddr;

pub struct ArpSubprocessBackend;

impl ArpSubprocessBackend {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl NeighborBackend for ArpSubprocessBackend {
    async fn enumerate(&self) -> HashMap<Ipv4Addr, MacAddr> {
        let mut child = match Command::new("arp")
            .args(["-a", "-n"])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
        {
            Ok(child) => child,
            Err(e) => {
                debug!(error = %e, "arp binary not available");
                return HashMap::new();
            }
        };

        let output = match tokio::time::timeout(ARP_TIMEOUT, child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                debug!(error = %e, "arp subprocess failed");
                return HashMap::new();
            }
            Err(_) => {
                warn!("arp -a -n timed out after {:?}", ARP_TIMEOUT);
                return HashMap::new();
            }
        };

        parse_arp_output(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Parses lines of the form `hostname (1.2.3.4) at aa:bb:cc:dd:ee:ff [ether] on eth0`.
/// Column 1 stripped of parens is the IP, column 3 is the MAC; lines that
/// don't fit this shape are skipped rather than treated as an error.
fn parse_arp_output(stdout: &str) -> HashMap<Ipv4Addr, MacAddr> {
    let mut map = HashMap::new();
    for line in stdout.lines() {
        let columns: Vec<&str> = line.split_whitespace().collect();
        if columns.len() < 4 {
            continue;
        }
        let ip_str = columns[1].trim_start_matches('(').trim_end_matches(')');
        let (Ok(ip), Ok(mac)) = (ip_str.parse::<Ipv4Addr>(), columns[3].parse::<MacAddr>()) else {
            continue;
        };
        map.insert(ip, mac);
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_typical_arp_a_n_output() {
        let stdout = "host.lan (192.168.0.12) at 00:1a:2b:3c:4d:5e [ether] on eth0\n\
                       ? (192.168.0.13) at <incomplete> on eth0\n";
        let map = parse_arp_output(stdout);
        assert_eq!(map.len(), 1);
        assert_eq!(
            map.get(&"192.168.0.12".parse().unwrap()).unwrap().to_string(),
            "00:1a:2b:3c:4d:5e"
        );
    }

    #[test]
    fn empty_output_yields_empty_map() {
        assert!(parse_arp_output("").is_empty());
    }
}
