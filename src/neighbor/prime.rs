//! ARP priming: provoke the kernel into resolving addresses missing from
//! the neighbor table by sending harmless unicast datagrams.

use std::net::Ipv4Addr;

use tokio::net::UdpSocket;
use tracing::{debug, trace};

use crate::config::Config;

/// Throwaway destination port; nothing needs to be listening there, the
/// datagram only needs to leave the host so the kernel resolves the
/// destination's link-layer address.
const PRIME_PORT: u16 = 9;

pub async fn prime_arp(missing: &[Ipv4Addr], config: &Config) {
    let socket = match UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0)).await {
        Ok(socket) => socket,
        Err(e) => {
            debug!(error = %e, "could not open priming socket, skipping ARP prime");
            return;
        }
    };

    for ip in missing {
        // Best-effort: a send error (e.g. unreachable route) never aborts
        // priming for the remaining addresses.
        if let Err(e) = socket.send_to(&[], (*ip, PRIME_PORT)).await {
            trace!(%ip, error = %e, "arp-prime datagram failed to send");
        }
    }

    tokio::time::sleep(config.arp_cache_populate_time).await;
    // `socket` drops here, releasing the file descriptor before the caller
    // re-reads the neighbor table.
}
