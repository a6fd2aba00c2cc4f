//! Subnet record derived from an address and a mask.

use num_bigint::BigUint;
use serde::{Serialize, Serializer};

use super::address::{LOW32, MAPPED_PREFIX};
use super::{Address, Family};
use crate::error;

/// CIDR metadata of a block. Built by [`crate::subnet`]; never mutated afterwards.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Subnet {
    /// Family of the mask the block was computed with.
    pub family: Family,
    /// Lowest address of the block.
    pub network: Address,
    /// First usable host (equals `network` for blocks of 1 or 2 addresses).
    pub first: Address,
    /// Last usable host (equals `broadcast` for blocks of 1 or 2 addresses).
    pub last: Address,
    /// Highest address of the block.
    pub broadcast: Address,
    /// The mask as given.
    pub mask: Address,
    /// Prefix length derived from the mask's trailing zero run.
    pub prefix_length: u32,
    /// Usable hosts.
    pub host_count: u128,
    /// Addresses in the block, `2^(bits - prefix_length)`. An IPv6 `/0` holds 2^128.
    #[serde(serialize_with = "serialize_block_size")]
    pub block_size: BigUint,
}

/// A JSON number while it fits in `u128`, the decimal string beyond.
fn serialize_block_size<S: Serializer>(size: &BigUint, serializer: S) -> Result<S::Ok, S::Error> {
    match u128::try_from(size) {
        Ok(n) => serializer.serialize_u128(n),
        Err(_) => serializer.serialize_str(&size.to_string()),
    }
}

impl Subnet {
    /// True if `addr` lies within `network..=broadcast`.
    ///
    /// An IPv4 address is checked against an IPv6 block through its
    /// `::ffff:a.b.c.d` form; an IPv6 address is only inside an IPv4 block
    /// when it is IPv4-mapped.
    pub fn contains(&self, addr: &Address) -> bool {
        let value = match (self.family, addr.family()) {
            (Family::V4, Family::V4) | (Family::V6, Family::V6) => addr.value(),
            (Family::V6, Family::V4) => MAPPED_PREFIX | addr.value(),
            (Family::V4, Family::V6) => {
                if !addr.is_ipv4_mapped() {
                    return false;
                }
                addr.value() & LOW32
            }
        };
        self.network.value() <= value && value <= self.broadcast.value()
    }

    /// Parse `addr` and test membership.
    pub fn contains_str(&self, addr: &str) -> error::Result<bool> {
        let addr: Address = addr.parse()?;
        Ok(self.contains(&addr))
    }

    /// Same family and inside the block, with no cross-family normalization.
    pub fn contains_same_family(&self, addr: &Address) -> bool {
        self.family == addr.family() && self.contains(addr)
    }
}

impl std::fmt::Display for Subnet {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.network, self.prefix_length)
    }
}
