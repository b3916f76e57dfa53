//! Kernel neighbor table via a netlink socket (`rtnetlink`).

use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr};

use futures::TryStreamExt;
use netlink_packet_route::neighbour::NeighbourAttribute;
use rtnetlink::Handle;
use tokio::sync::OnceCell;
use tracing::{debug, warn};

use super::NeighborBackend;
use crate::net::mac::MacAddr;

/// Holds one netlink connection for its whole lifetime — `SPEC_FULL.md` §5
/// calls for a single handle per `NeighborCollector`, with concurrent
/// `enumerate()` calls serialized through the cooperative scheduler rather
/// than each opening its own socket. The connection is opened lazily, on the
/// first call, and reused by every call after.
pub struct NetlinkBackend {
    handle: OnceCell<Option<Handle>>,
}

impl NetlinkBackend {
    pub fn new() -> Self {
        Self { handle: OnceCell::new() }
    }

    async fn handle(&self) -> Option<Handle> {
        self.handle
            .get_or_init(|| async {
                match rtnetlink::new_connection() {
                    Ok((connection, handle, _)) => {
                        tokio::spawn(connection);
                        Some(handle)
                    }
                    Err(e) => {
                        warn!(error = %e, "failed to open netlink connection, neighbor table will read empty");
                        None
                    }
                }
            })
            .await
            .clone()
    }
}

#[async_trait::async_trait]
impl NeighborBackend for NetlinkBackend {
    async fn enumerate(&self) -> HashMap<Ipv4Addr, MacAddr> {
        let Some(handle) = self.handle().await else {
            return HashMap::new();
        };

        let mut neighbours = handle.neighbours().get().execute();
        let mut map = HashMap::new();
        loop {
            match neighbours.try_next().await {
                Ok(Some(message)) => {
                    if let Some((ip, mac)) = extract(&message) {
                        map.insert(ip, mac);
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    debug!(error = %e, "netlink neighbour dump ended with an error");
                    break;
                }
            }
        }
        map
    }
}

fn extract(message: &netlink_packet_route::neighbour::NeighbourMessage) -> Option<(Ipv4Addr, MacAddr)> {
    let mut ip = None;
    let mut mac = None;
    for attr in &message.attributes {
        match attr {
            NeighbourAttribute::Destination(IpAddr::V4(addr)) => ip = Some(*addr),
            NeighbourAttribute::LinkLocalAddress(bytes) if bytes.len() == 6 => {
                let octets: [u8; 6] = bytes.as_slice().try_into().ok()?;
                mac = Some(MacAddr::from_octets(octets));
            }
            _ => {}
        }
    }
    Some((ip?, mac?))
}
