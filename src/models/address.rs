//! The `Address` value type.
//!
//! An [`Address`] is a `(family, value)` pair. Both families share one integer
//! representation (`u128`) and the family carries the bit width, so every
//! operation runs the same arithmetic for IPv4 and IPv6.

use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use super::Family;
use crate::error::{AddressError, Result};

/// `::ffff:0:0`, the prefix of an IPv4-mapped IPv6 address.
pub const MAPPED_PREFIX: u128 = 0xffff << 32;

/// Low 32 bits of a 128-bit value.
pub const LOW32: u128 = u32::MAX as u128;

/// IPv4 or IPv6 address. Immutable once built.
///
/// Equality, ordering and hashing use `(family, value)` only; the optional
/// source text is kept for diagnostics.
#[derive(Debug, Clone)]
pub struct Address {
    family: Family,
    value: u128,
    source: Option<String>,
}

impl Address {
    /// Build an address, rejecting values wider than the family.
    pub fn new(family: Family, value: u128) -> Result<Address> {
        if value > family.max_value() {
            return Err(AddressError::invalid(value));
        }
        Ok(Address {
            family,
            value,
            source: None,
        })
    }

    /// Build an address from a value, promoting to IPv6 when it does not fit
    /// in 32 bits regardless of the requested family.
    pub fn widen(value: u128, family: Family) -> Address {
        let family = match Family::for_value(value) {
            Family::V6 => Family::V6,
            Family::V4 => family,
        };
        Address {
            family,
            value,
            source: None,
        }
    }

    /// `0.0.0.0` or `::`.
    pub const fn unspecified(family: Family) -> Address {
        Address {
            family,
            value: 0,
            source: None,
        }
    }

    /// Attach the original input for diagnostics.
    pub fn with_source(mut self, source: impl Into<String>) -> Address {
        self.source = Some(source.into());
        self
    }

    pub fn family(&self) -> Family {
        self.family
    }

    pub fn value(&self) -> u128 {
        self.value
    }

    /// Original input this address was parsed from, if any.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn is_ipv4(&self) -> bool {
        self.family == Family::V4
    }

    pub fn is_ipv6(&self) -> bool {
        self.family == Family::V6
    }

    /// True for an IPv6 address of the form `::ffff:a.b.c.d`.
    pub fn is_ipv4_mapped(&self) -> bool {
        self.family == Family::V6 && self.value & !LOW32 == MAPPED_PREFIX
    }

    /// The IPv4-mapped IPv6 form of an IPv4 address; IPv6 addresses are returned unchanged.
    pub fn to_ipv4_mapped(&self) -> Address {
        match self.family {
            Family::V4 => Address::widen(MAPPED_PREFIX | self.value, Family::V6),
            Family::V6 => Address::widen(self.value, Family::V6),
        }
    }

    /// Big-endian bytes: 4 for IPv4, 16 for IPv6.
    pub fn to_bytes(&self) -> Vec<u8> {
        let len = self.family.byte_len();
        self.value.to_be_bytes()[16 - len..].to_vec()
    }

    /// Write the big-endian bytes into `buf` starting at `offset`.
    pub fn write_bytes(&self, buf: &mut [u8], offset: usize) -> Result<()> {
        let bytes = self.to_bytes();
        let end = offset.saturating_add(bytes.len());
        if buf.len() < end {
            return Err(AddressError::BufferTooSmall {
                family: self.family,
                needed: end,
                available: buf.len(),
            });
        }
        buf[offset..end].copy_from_slice(&bytes);
        Ok(())
    }

    /// Lowercase hex of [`Address::to_bytes`].
    pub fn to_hex(&self) -> String {
        self.to_bytes().iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Standard library view of this address.
    pub fn to_ip_addr(&self) -> IpAddr {
        match self.family {
            Family::V4 => IpAddr::V4(Ipv4Addr::from(self.value as u32)),
            Family::V6 => IpAddr::V6(Ipv6Addr::from(self.value)),
        }
    }
}

impl PartialEq for Address {
    fn eq(&self, other: &Address) -> bool {
        self.family == other.family && self.value == other.value
    }
}

impl Eq for Address {}

impl Hash for Address {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.family.hash(state);
        self.value.hash(state);
    }
}

impl PartialOrd for Address {
    fn partial_cmp(&self, other: &Address) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Address {
    fn cmp(&self, other: &Address) -> Ordering {
        (self.family, self.value).cmp(&(other.family, other.value))
    }
}

impl From<Ipv4Addr> for Address {
    fn from(addr: Ipv4Addr) -> Address {
        Address::widen(u32::from(addr) as u128, Family::V4)
    }
}

impl From<Ipv6Addr> for Address {
    fn from(addr: Ipv6Addr) -> Address {
        Address {
            family: Family::V6,
            value: u128::from(addr),
            source: None,
        }
    }
}

impl From<IpAddr> for Address {
    fn from(addr: IpAddr) -> Address {
        match addr {
            IpAddr::V4(v4) => v4.into(),
            IpAddr::V6(v6) => v6.into(),
        }
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Address> {
        crate::parser::parse_str(s)
    }
}

impl Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Address, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Address::from_str(&s).map_err(|e| de::Error::custom(format!("invalid address {s}: {e}")))
    }
}
