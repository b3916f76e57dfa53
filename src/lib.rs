//! LAN host discovery.
//!
//! Combines two independent observations about a locally attached IPv4
//! subnet — the kernel's neighbor (ARP) table, and reverse-DNS (PTR)
//! answers from the resolvers the host is configured to use — into a
//! list of `(ip, mac, hostname)` triples.
//!
//! The entry point is [`DiscoveryEngine`]. Everything the engine needs
//! from the host (its attached network, configured nameservers, default
//! gateway) is injected through [`system::SystemNetworkInfoSource`]; this
//! crate does not itself enumerate network adapters or routing tables.
//!
//! ```no_run
//! # use std::sync::Arc;
//! # async fn run(source: Arc<dyn landiscover::SystemNetworkInfoSource>) -> landiscover::Result<()> {
//! use landiscover::DiscoveryEngine;
//!
//! let mut engine = DiscoveryEngine::with_source(source);
//! for host in engine.discover().await? {
//!     println!("{} {} {}", host.ip, host.mac, host.hostname);
//! }
//! # Ok(())
//! # }
//! ```

mod cache;
mod config;
mod dns;
mod engine;
mod error;
mod neighbor;
mod net;
mod resolver_selector;
mod system;

pub use cache::FailedResolverCache;
pub use config::Config;
pub use engine::{DiscoveredHost, DiscoveryEngine};
pub use error::{Error, Result};
pub use net::mac::MacAddr;
pub use net::network::Network;
pub use system::{SystemNetworkInfo, SystemNetworkInfoSource, parse_resolv_conf};
