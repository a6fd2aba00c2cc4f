//! Domain models for address arithmetic.
//!
//! This module contains the core data structures used throughout the library:
//! - [`Family`] - IPv4 or IPv6 with its bit width
//! - [`Address`] - family-tagged address value
//! - [`Subnet`] - CIDR block metadata

pub(crate) mod address;
mod family;
mod subnet;

// Re-export public types
pub use address::{Address, MAPPED_PREFIX};
pub use family::Family;
pub use subnet::Subnet;
