//! Conversion of strings, integers and byte sequences into [`Address`].
//!
//! Every accepted input shape is one variant of [`AddressInput`]; [`parse`]
//! resolves it with a single match.
//! - [`ipv4`] - dotted and shorthand IPv4 text
//! - [`ipv6`] - compressed IPv6 text with embedded IPv4

mod ipv4;
mod ipv6;

pub use ipv4::normalize_to_long;

use crate::error::{AddressError, Result};
use crate::models::{Address, Family};

/// Anything that can be turned into an [`Address`].
#[derive(Debug, Clone, Copy)]
pub enum AddressInput<'a> {
    /// IPv4 or IPv6 text.
    Text(&'a str),
    /// Machine integer; negative values are rejected.
    Int(i128),
    /// Unsigned 128-bit integer.
    Big(u128),
    /// Arbitrary-precision unsigned integer written in decimal digits.
    Decimal(&'a str),
    /// Big-endian bytes, 4 for IPv4 or 16 for IPv6.
    Bytes(&'a [u8]),
    /// Loosely typed octets (4 or 16), each checked to be in `0..=255`.
    Octets(&'a [i64]),
    /// An existing address.
    Address(&'a Address),
}

impl<'a> From<&'a str> for AddressInput<'a> {
    fn from(s: &'a str) -> Self {
        AddressInput::Text(s)
    }
}

impl<'a> From<&'a String> for AddressInput<'a> {
    fn from(s: &'a String) -> Self {
        AddressInput::Text(s)
    }
}

impl From<u32> for AddressInput<'_> {
    fn from(n: u32) -> Self {
        AddressInput::Big(n as u128)
    }
}

impl From<u64> for AddressInput<'_> {
    fn from(n: u64) -> Self {
        AddressInput::Big(n as u128)
    }
}

impl From<u128> for AddressInput<'_> {
    fn from(n: u128) -> Self {
        AddressInput::Big(n)
    }
}

impl From<i32> for AddressInput<'_> {
    fn from(n: i32) -> Self {
        AddressInput::Int(n as i128)
    }
}

impl From<i64> for AddressInput<'_> {
    fn from(n: i64) -> Self {
        AddressInput::Int(n as i128)
    }
}

impl From<i128> for AddressInput<'_> {
    fn from(n: i128) -> Self {
        AddressInput::Int(n)
    }
}

impl<'a> From<&'a [u8]> for AddressInput<'a> {
    fn from(b: &'a [u8]) -> Self {
        AddressInput::Bytes(b)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for AddressInput<'a> {
    fn from(b: &'a [u8; N]) -> Self {
        AddressInput::Bytes(b)
    }
}

impl<'a> From<&'a Vec<u8>> for AddressInput<'a> {
    fn from(b: &'a Vec<u8>) -> Self {
        AddressInput::Bytes(b)
    }
}

impl<'a> From<&'a [i64]> for AddressInput<'a> {
    fn from(o: &'a [i64]) -> Self {
        AddressInput::Octets(o)
    }
}

impl<'a> From<&'a Address> for AddressInput<'a> {
    fn from(a: &'a Address) -> Self {
        AddressInput::Address(a)
    }
}

/// Parse any supported input into an [`Address`].
pub fn parse<'a>(input: impl Into<AddressInput<'a>>) -> Result<Address> {
    parse_as(input, None)
}

/// Parse with an optional family demand.
///
/// Integers up to `u32::MAX` are IPv4 unless IPv6 is demanded; wider values
/// are always IPv6. For other inputs a demanded family must match the parsed one.
pub fn parse_as<'a>(input: impl Into<AddressInput<'a>>, family: Option<Family>) -> Result<Address> {
    let input = input.into();
    let addr = match input {
        AddressInput::Text(s) => parse_str(s)?,
        AddressInput::Int(n) => {
            let n = u128::try_from(n).map_err(|_| AddressError::invalid(n))?;
            return parse_number(n, family);
        }
        AddressInput::Big(n) => return parse_number(n, family),
        AddressInput::Decimal(digits) => {
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(AddressError::invalid(digits));
            }
            let n: u128 = digits.parse().map_err(|_| AddressError::invalid(digits))?;
            return parse_number(n, family);
        }
        AddressInput::Bytes(bytes) => parse_bytes(bytes)?,
        AddressInput::Octets(octets) => {
            let bytes = octets
                .iter()
                .map(|o| u8::try_from(*o).map_err(|_| AddressError::invalid(format!("byte value {o}"))))
                .collect::<Result<Vec<u8>>>()?;
            parse_bytes(&bytes)?
        }
        AddressInput::Address(a) => a.clone(),
    };

    match family {
        Some(f) if f != addr.family() => Err(AddressError::invalid(format!(
            "{} is not {f}",
            addr.source().map(str::to_string).unwrap_or_else(|| addr.to_string())
        ))),
        _ => Ok(addr),
    }
}

fn parse_number(n: u128, family: Option<Family>) -> Result<Address> {
    Ok(Address::widen(n, family.unwrap_or(Family::V4)))
}

fn parse_bytes(bytes: &[u8]) -> Result<Address> {
    let family = match bytes.len() {
        4 => Family::V4,
        16 => Family::V6,
        len => return Err(AddressError::InvalidBufferLength(len)),
    };
    let value = bytes.iter().fold(0u128, |acc, b| (acc << 8) | *b as u128);
    Address::new(family, value)
}

/// Parse IPv4 or IPv6 text.
pub fn parse_str(s: &str) -> Result<Address> {
    log::debug!("parse_str({s})");
    let text = s.to_ascii_lowercase();

    let addr = match text.as_str() {
        "::" => Address::unspecified(Family::V6),
        "0" => Address::unspecified(Family::V4),
        "" => return Err(AddressError::invalid(s)),
        t if t.contains(':') => {
            let value = ipv6::parse(t).ok_or_else(|| AddressError::invalid(s))?;
            Address::new(Family::V6, value)?
        }
        t => {
            let value = normalize_to_long(t).ok_or_else(|| AddressError::invalid(s))?;
            Address::new(Family::V4, value as u128)?
        }
    };
    Ok(addr.with_source(s))
}

/// True if `s` is valid IPv4 or IPv6 text.
pub fn is_ip(s: &str) -> bool {
    parse_str(s).is_ok()
}

/// True if `s` parses as IPv4 text.
pub fn is_ipv4(s: &str) -> bool {
    parse_str(s).map(|a| a.is_ipv4()).unwrap_or(false)
}

/// True if `s` parses as IPv6 text.
pub fn is_ipv6(s: &str) -> bool {
    parse_str(s).map(|a| a.is_ipv6()).unwrap_or(false)
}
