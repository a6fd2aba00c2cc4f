//! Bitwise combinators over addresses of possibly different families.

use std::ops::{BitAnd, BitOr, Not};

use crate::error::Result;
use crate::models::address::{LOW32, MAPPED_PREFIX};
use crate::models::{Address, Family};
use crate::parser::{parse, AddressInput};

/// Mask an address.
///
/// Same family: plain AND. IPv6 address with IPv4 mask: only the low 32 bits
/// are masked. IPv4 address with IPv6 mask: the low 32 bits of the mask apply
/// and the result is the IPv4-mapped IPv6 address.
impl BitAnd for &Address {
    type Output = Address;

    fn bitand(self, mask: Self) -> Address {
        let (a, m) = (self.value(), mask.value());
        match (self.family(), mask.family()) {
            (Family::V4, Family::V4) | (Family::V6, Family::V6) => {
                Address::widen(a & m & self.family().max_value(), self.family())
            }
            (Family::V6, Family::V4) => Address::widen((a & !LOW32) | (a & LOW32 & m), Family::V6),
            (Family::V4, Family::V6) => Address::widen(MAPPED_PREFIX | (a & m & LOW32), Family::V6),
        }
    }
}

/// Complement within the address's own width.
impl Not for &Address {
    type Output = Address;

    fn not(self) -> Address {
        let family = self.family();
        Address::widen(!self.value() & family.max_value(), family)
    }
}

/// Same family: plain OR. Mixed: the IPv4 operand is zero-extended (no
/// `::ffff:` prefix) and the result is IPv6.
impl BitOr for &Address {
    type Output = Address;

    fn bitor(self, other: Self) -> Address {
        if self.family() == other.family() {
            let family = self.family();
            Address::widen((self.value() | other.value()) & family.max_value(), family)
        } else {
            Address::widen(self.value() | other.value(), Family::V6)
        }
    }
}

impl Address {
    /// Equality across families: an IPv4 address equals an IPv6 address holding
    /// either its zero-extended (`::a.b.c.d`) or its mapped (`::ffff:a.b.c.d`) value.
    pub fn is_equal(&self, other: &Address) -> bool {
        if self.family() == other.family() {
            return self.value() == other.value();
        }
        let (v4, v6) = match self.family() {
            Family::V4 => (self, other),
            Family::V6 => (other, self),
        };
        v6.value() == v4.value() || v6.value() == MAPPED_PREFIX | v4.value()
    }
}

/// Parse both operands and apply [`BitAnd`].
pub fn mask<'a, 'b>(
    addr: impl Into<AddressInput<'a>>,
    mask: impl Into<AddressInput<'b>>,
) -> Result<Address> {
    let addr = parse(addr)?;
    let mask = parse(mask)?;
    log::debug!("mask({addr}, {mask})");
    Ok(&addr & &mask)
}

/// Parse and complement.
pub fn not<'a>(addr: impl Into<AddressInput<'a>>) -> Result<Address> {
    Ok(!&parse(addr)?)
}

/// Parse both operands and apply [`BitOr`].
pub fn or<'a, 'b>(a: impl Into<AddressInput<'a>>, b: impl Into<AddressInput<'b>>) -> Result<Address> {
    Ok(&parse(a)? | &parse(b)?)
}

/// Parse both operands and compare with [`Address::is_equal`].
pub fn is_equal<'a, 'b>(a: impl Into<AddressInput<'a>>, b: impl Into<AddressInput<'b>>) -> Result<bool> {
    Ok(parse(a)?.is_equal(&parse(b)?))
}
