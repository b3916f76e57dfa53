//! An IPv4 network (address + prefix length) and its usable host range.

use std::net::Ipv4Addr;

#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    #[error("prefix length {0} out of range [0, 32]")]
    PrefixOutOfRange(u8),
}

/// An IPv4 address plus prefix length, e.g. `192.168.0.0/24`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Network {
    address: Ipv4Addr,
    prefix_len: u8,
}

impl Network {
    pub fn new(address: Ipv4Addr, prefix_len: u8) -> Result<Self, NetworkError> {
        if prefix_len > 32 {
            return Err(NetworkError::PrefixOutOfRange(prefix_len));
        }
        Ok(Self { address, prefix_len })
    }

    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    fn mask(&self) -> u32 {
        if self.prefix_len == 0 {
            0
        } else {
            u32::MAX << (32 - self.prefix_len)
        }
    }

    fn network_addr(&self) -> u32 {
        u32::from(self.address) & self.mask()
    }

    /// Total number of addresses in the network, including network and
    /// broadcast (`2^(32 - prefix_len)`).
    pub fn num_addresses(&self) -> usize {
        1usize << (32 - self.prefix_len as u32)
    }

    pub fn contains(&self, ip: Ipv4Addr) -> bool {
        u32::from(ip) & self.mask() == self.network_addr()
    }

    /// Usable host addresses: for `/31` and `/32` every address in the range
    /// is returned (point-to-point / single-host conventions), otherwise the
    /// network and broadcast addresses are excluded.
    pub fn hosts(&self) -> impl Iterator<Item = Ipv4Addr> + '_ {
        let base = self.network_addr();
        let count = self.num_addresses() as u32;
        let (start, end) = if self.prefix_len >= 31 {
            (0, count)
        } else {
            (1, count.saturating_sub(1))
        };
        (start..end).map(move |offset| Ipv4Addr::from(base + offset))
    }
}

/// Address categories excluded from discovery output regardless of their
/// subnet membership (loopback, link-local, multicast, unspecified).
pub fn is_excluded_category(ip: Ipv4Addr) -> bool {
    ip.is_loopback() || ip.is_link_local() || ip.is_multicast() || ip.is_unspecified()
}
