//! Error taxonomy shared by every address operation.

use thiserror::Error;

use crate::models::Family;

/// Result alias used across the library.
pub type Result<T> = std::result::Result<T, AddressError>;

/// Failure of an address operation. Nothing is partially built when one is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    /// Malformed or ambiguous textual/numeric input.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Byte sequence whose length is neither 4 nor 16.
    #[error("Invalid buffer length {0}, must be 4 (IPv4) or 16 (IPv6)")]
    InvalidBufferLength(usize),

    /// Malformed `addr/len` string.
    #[error("Invalid CIDR: {0}")]
    InvalidCidr(String),

    /// Prefix length outside `0..=bits` for the family.
    #[error("Invalid prefix length for {family}: {len}")]
    InvalidPrefixLength { family: Family, len: u32 },

    /// Value does not fit the family it was asked to be rendered as.
    #[error("Address is wider than IPv4: {0}")]
    AddressTooWide(String),

    /// Operand families outside the combinations an operation defines.
    /// Unreachable while `Family` has two variants: `mask` defines all four pairs.
    #[error("Unsupported family combination: {addr} with {mask}")]
    UnsupportedFamilyCombination { addr: Family, mask: Family },

    /// Unrecognized family alias.
    #[error("Invalid family: {0}")]
    InvalidFamily(String),

    /// Caller buffer cannot hold the address at the requested offset.
    #[error("Buffer too small for {family}: need {needed} bytes, have {available}")]
    BufferTooSmall {
        family: Family,
        needed: usize,
        available: usize,
    },
}

impl AddressError {
    pub(crate) fn invalid(input: impl std::fmt::Display) -> Self {
        AddressError::InvalidAddress(input.to_string())
    }
}
