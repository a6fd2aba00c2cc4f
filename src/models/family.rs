//! Address family and its bit width.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AddressError;

/// Whether an address lives in the 32-bit or the 128-bit space.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Family {
    /// IPv4, 32 bits.
    #[serde(rename = "ipv4")]
    V4,
    /// IPv6, 128 bits.
    #[serde(rename = "ipv6")]
    V6,
}

impl Family {
    /// Number of bits in an address of this family.
    pub const fn bits(self) -> u32 {
        match self {
            Family::V4 => 32,
            Family::V6 => 128,
        }
    }

    /// Number of bytes in an address of this family.
    pub const fn byte_len(self) -> usize {
        match self {
            Family::V4 => 4,
            Family::V6 => 16,
        }
    }

    /// All-ones value of this family's width.
    pub const fn max_value(self) -> u128 {
        match self {
            Family::V4 => u32::MAX as u128,
            Family::V6 => u128::MAX,
        }
    }

    /// Smallest family able to hold `value`.
    pub const fn for_value(value: u128) -> Family {
        if value > u32::MAX as u128 {
            Family::V6
        } else {
            Family::V4
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Family::V4 => f.write_str("IPv4"),
            Family::V6 => f.write_str("IPv6"),
        }
    }
}

/// Accepts `4`, `6`, `ipv4`, `ipv6` in any case.
impl FromStr for Family {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Family, AddressError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "4" | "ipv4" => Ok(Family::V4),
            "6" | "ipv6" => Ok(Family::V6),
            _ => Err(AddressError::InvalidFamily(s.to_string())),
        }
    }
}
