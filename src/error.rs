//! Error taxonomy for the discovery engine.
//!
//! Per the design, almost every failure inside the core (a timed-out PTR
//! query, an unreachable resolver, a dead `arp` binary) is swallowed and
//! turned into an empty/`None` result rather than an [`Error`] — see
//! `SPEC_FULL.md` §7. This type exists for the handful of places that
//! really do need to surface a failure to the caller: system-info
//! initialization and netlink connection setup.

use std::net::AddrParseError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read system network info")]
    Io(#[from] std::io::Error),

    #[error("malformed /etc/resolv.conf entry: {0}")]
    ResolvConf(String),

    #[error("failed to open netlink connection")]
    Netlink(#[source] std::io::Error),

    #[error("invalid address: {0}")]
    Addr(#[from] AddrParseError),

    #[error("dns wire format error")]
    Dns(#[from] hickory_proto::ProtoError),
}
