//! Canonical MAC address representation.

use std::fmt;
use std::str::FromStr;

/// MACs the discovery pipeline never reports, regardless of where they came
/// from (broadcast, or a netlink/`arp` quirk reporting an all-zero entry).
const IGNORED: [[u8; 6]; 2] = [[0, 0, 0, 0, 0, 0], [0xff, 0xff, 0xff, 0xff, 0xff, 0xff]];

/// A 6-octet link-layer address, always held and displayed in canonical
/// lowercase `xx:xx:xx:xx:xx:xx` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MacAddr([u8; 6]);

impl MacAddr {
    pub fn from_octets(octets: [u8; 6]) -> Self {
        Self(octets)
    }

    pub fn octets(&self) -> [u8; 6] {
        self.0
    }

    /// `true` for the ignore set `{00:00:00:00:00:00, ff:ff:ff:ff:ff:ff}`.
    pub fn is_ignored(&self) -> bool {
        IGNORED.contains(&self.0)
    }
}

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}

#[derive(Debug, thiserror::Error)]
#[error("invalid mac address: {0}")]
pub struct ParseMacError(String);

/// Parses a colon- or hyphen-separated MAC, normalizing short components
/// (e.g. `a:b:c:d:e:f`) by zero-padding each octet to two hex digits.
impl FromStr for MacAddr {
    type Err = ParseMacError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(|c| c == ':' || c == '-').collect();
        if parts.len() != 6 {
            return Err(ParseMacError(s.to_string()));
        }
        let mut octets = [0u8; 6];
        for (i, part) in parts.iter().enumerate() {
            if part.is_empty() || part.len() > 2 {
                return Err(ParseMacError(s.to_string()));
            }
            octets[i] = u8::from_str_radix(part, 16).map_err(|_| ParseMacError(s.to_string()))?;
        }
        Ok(MacAddr(octets))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_unpadded_octets() {
        let mac: MacAddr = "a:b:c:d:e:f".parse().unwrap();
        assert_eq!(mac.to_string(), "0a:0b:0c:0d:0e:0f");
    }

    #[test]
    fn canonical_form_round_trips() {
        let mac: MacAddr = "de:ad:be:ef:00:01".parse().unwrap();
        assert_eq!(mac.to_string(), "de:ad:be:ef:00:01");
    }

    #[test]
    fn rejects_wrong_component_count() {
        assert!("de:ad:be:ef:00".parse::<MacAddr>().is_err());
    }

    #[test]
    fn broadcast_and_zero_are_ignored() {
        let zero: MacAddr = "00:00:00:00:00:00".parse().unwrap();
        let broadcast: MacAddr = "ff:ff:ff:ff:ff:ff".parse().unwrap();
        assert!(zero.is_ignored());
        assert!(broadcast.is_ignored());

        let real: MacAddr = "00:1a:2b:3c:4d:5e".parse().unwrap();
        assert!(!real.is_ignored());
    }
}
