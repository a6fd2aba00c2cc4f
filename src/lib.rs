// cargo watch -x 'fmt' -x 'test'

//! IPv4/IPv6 address toolkit.
//!
//! - [`models`] - `Address`, `Family` and `Subnet`
//! - [`parser`] - text, integer and byte inputs
//! - [`format`] - canonical text rendering
//! - [`processing`] - CIDR, subnet and bitwise operations
//! - [`classify`] - special-purpose ranges
//! - [`config`], [`output`], [`commands`] - the command line front end

pub mod classify;
pub mod commands;
pub mod config;
pub mod error;
pub mod format;
pub mod models;
pub mod output;
pub mod parser;
pub mod processing;

pub use classify::{classify, is_loopback, is_private, is_public, is_special, loopback, Special};
pub use error::{AddressError, Result};
pub use models::{Address, Family, Subnet};
pub use parser::{
    is_ip, is_ipv4, is_ipv6, normalize_to_long, parse, parse_as, parse_str, AddressInput,
};
pub use processing::{
    cidr, from_prefix_len, is_equal, mask, not, or, parse_cidr, parse_cidr_subnet, subnet,
    subnet_of,
};
