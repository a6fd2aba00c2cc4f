//! Address arithmetic.
//!
//! This module contains the operations that combine addresses:
//! - [`cidr`] - CIDR parsing, prefix masks and subnet computation
//! - [`bitwise`] - mask, complement, OR and cross-family equality

mod bitwise;
mod cidr;

// Re-export public functions
pub use bitwise::{is_equal, mask, not, or};
pub use cidr::{cidr, from_prefix_len, parse_cidr, parse_cidr_subnet, subnet, subnet_of};
