//! CIDR parsing and subnet computation.

use num_bigint::BigUint;

use crate::error::{AddressError, Result};
use crate::models::{Address, Family, Subnet};
use crate::parser::{parse, parse_str, AddressInput};

/// Value with the low `n` bits set.
fn low_bits(n: u32) -> u128 {
    if n >= u128::BITS {
        u128::MAX
    } else {
        (1u128 << n) - 1
    }
}

/// Mask of `len` leading one bits in the family's width.
///
/// The family defaults to IPv6 when `len > 32`, IPv4 otherwise.
///
/// # Examples
/// ```
/// use ip_address_kit::from_prefix_len;
/// assert_eq!(from_prefix_len(24, None).unwrap().to_string(), "255.255.255.0");
/// assert_eq!(from_prefix_len(64, None).unwrap().to_string(), "ffff:ffff:ffff:ffff::");
/// ```
pub fn from_prefix_len(len: u32, family: Option<Family>) -> Result<Address> {
    let family = family.unwrap_or(if len > 32 { Family::V6 } else { Family::V4 });
    let bits = family.bits();
    if len > bits {
        return Err(AddressError::InvalidPrefixLength { family, len });
    }
    let value = family.max_value() & !low_bits(bits - len);
    Address::new(family, value)
}

impl Address {
    /// See [`from_prefix_len`].
    pub fn from_prefix_len(len: u32, family: Option<Family>) -> Result<Address> {
        from_prefix_len(len, family)
    }
}

/// Split `addr/len` into the address and its prefix mask.
pub fn parse_cidr(cidr: &str) -> Result<(Address, Address)> {
    log::debug!("parse_cidr({cidr})");
    let parts: Vec<&str> = cidr.split('/').collect();
    if parts.len() != 2 {
        return Err(AddressError::InvalidCidr(cidr.to_string()));
    }
    let (ip, prefix) = (parts[0], parts[1]);
    if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AddressError::InvalidCidr(cidr.to_string()));
    }

    let addr = parse_str(ip)?;
    let len: u32 = prefix
        .parse()
        .map_err(|_| AddressError::InvalidCidr(cidr.to_string()))?;
    if len > addr.family().bits() {
        return Err(AddressError::InvalidCidr(cidr.to_string()));
    }
    let mask = from_prefix_len(len, Some(addr.family()))?;
    Ok((addr, mask))
}

/// Compute the block `addr` falls into under `mask`.
///
/// The prefix length is the mask width minus the mask's trailing zero run,
/// so a non-contiguous mask such as `255.0.255.0` yields `/24`.
pub fn subnet_of(addr: &Address, mask: &Address) -> Subnet {
    let family = mask.family();
    let bits = family.bits();
    let mask_value = mask.value() & family.max_value();
    let host_bits = if mask_value == 0 {
        bits
    } else {
        mask_value.trailing_zeros().min(bits)
    };
    let host_mask = low_bits(host_bits);

    let network = addr.value() & mask_value;
    let broadcast = network | host_mask;
    let small = host_mask <= 1;
    let (first, last) = if small {
        (network, broadcast)
    } else {
        (network + 1, broadcast - 1)
    };

    let subnet = Subnet {
        family,
        network: Address::widen(network, family),
        first: Address::widen(first, family),
        last: Address::widen(last, family),
        broadcast: Address::widen(broadcast, family),
        mask: mask.clone(),
        prefix_length: bits - host_bits,
        host_count: if small { host_mask + 1 } else { host_mask - 1 },
        block_size: BigUint::from(1u8) << host_bits,
    };
    log::trace!("subnet_of({addr}, {mask}) = {subnet:?}");
    subnet
}

/// Parse both operands and compute their [`Subnet`].
pub fn subnet<'a, 'b>(
    addr: impl Into<AddressInput<'a>>,
    mask: impl Into<AddressInput<'b>>,
) -> Result<Subnet> {
    let addr = parse(addr)?;
    let mask = parse(mask)?;
    Ok(subnet_of(&addr, &mask))
}

/// [`Subnet`] of an `addr/len` string.
pub fn parse_cidr_subnet(cidr: &str) -> Result<Subnet> {
    let (addr, mask) = parse_cidr(cidr)?;
    Ok(subnet_of(&addr, &mask))
}

/// Network address of an `addr/len` string in canonical text.
///
/// # Examples
/// ```
/// assert_eq!(ip_address_kit::cidr("192.168.1.134/26").unwrap(), "192.168.1.128");
/// ```
pub fn cidr(cidr: &str) -> Result<String> {
    let (addr, mask) = parse_cidr(cidr)?;
    Ok((&addr & &mask).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_low_bits() {
        assert_eq!(low_bits(0), 0);
        assert_eq!(low_bits(8), 0xff);
        assert_eq!(low_bits(128), u128::MAX);
    }

    #[test]
    fn test_from_prefix_len() {
        assert_eq!(from_prefix_len(0, None).unwrap().to_string(), "0.0.0.0");
        assert_eq!(from_prefix_len(32, None).unwrap().to_string(), "255.255.255.255");
        assert_eq!(from_prefix_len(24, None).unwrap().to_string(), "255.255.255.0");
        assert_eq!(
            from_prefix_len(64, None).unwrap().to_string(),
            "ffff:ffff:ffff:ffff::"
        );
        assert_eq!(from_prefix_len(0, Some(Family::V6)).unwrap().to_string(), "::");
        assert_eq!(
            from_prefix_len(8, Some(Family::V6)).unwrap().to_string(),
            "ff00::"
        );
        assert_eq!(
            from_prefix_len(33, Some(Family::V4)).unwrap_err(),
            AddressError::InvalidPrefixLength {
                family: Family::V4,
                len: 33
            }
        );
        assert!(from_prefix_len(129, None).is_err());
    }

    #[test]
    fn test_parse_cidr() {
        let (addr, mask) = parse_cidr("192.168.1.134/26").unwrap();
        assert_eq!(addr.to_string(), "192.168.1.134");
        assert_eq!(mask.to_string(), "255.255.255.192");

        let (addr, mask) = parse_cidr("::ffff:0/64").unwrap();
        assert_eq!(addr.to_string(), "::ffff:0");
        assert_eq!(mask.to_string(), "ffff:ffff:ffff:ffff::");

        let (addr, mask) = parse_cidr("::ffff:192.168.1.134/122").unwrap();
        assert_eq!(addr.to_string(), "::ffff:c0a8:186");
        assert_eq!(mask.to_string(), "ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffc0");
    }

    #[test]
    fn test_parse_cidr_errors() {
        for input in [
            "",
            "0/",
            "0/0/",
            "192.168.1.134",
            "192.168.1.134/",
            "::1",
            "192.168.1.134/abc",
            "192.168.1.134/33",
            "2607:f0d0:1002:51::4/129",
            "ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff/1000",
            "10.0.0.0/-1",
        ] {
            assert!(
                matches!(parse_cidr(input), Err(AddressError::InvalidCidr(_))),
                "{input} should be an invalid CIDR"
            );
        }
        for input in ["not-an-ip/24", "::gggg/64", "1:2:3:4:5:6:7:8:9/64", "1.2.3.4::5/64"] {
            assert!(
                matches!(parse_cidr(input), Err(AddressError::InvalidAddress(_))),
                "{input} should be an invalid address"
            );
        }
    }

    #[test]
    fn test_cidr() {
        assert_eq!(cidr("192.168.1.134/26").unwrap(), "192.168.1.128");
        assert_eq!(cidr("2607:f0d0:1002:51::4/56").unwrap(), "2607:f0d0:1002::");
        assert!(cidr("1.2.3/64").is_err());
    }

    #[test]
    fn test_subnet_v4() {
        let s = subnet("192.168.1.134", "255.255.255.192").unwrap();
        assert_eq!(s.network.to_string(), "192.168.1.128");
        assert_eq!(s.first.to_string(), "192.168.1.129");
        assert_eq!(s.last.to_string(), "192.168.1.190");
        assert_eq!(s.broadcast.to_string(), "192.168.1.191");
        assert_eq!(s.mask.to_string(), "255.255.255.192");
        assert_eq!(s.prefix_length, 26);
        assert_eq!(s.host_count, 62);
        assert_eq!(s.block_size, BigUint::from(64u8));
        assert_eq!(s.family, Family::V4);
        assert!(s.contains_str("192.168.1.180").unwrap());
        assert!(s.contains_str("192.168.1.128").unwrap());
        assert!(!s.contains_str("192.168.1.192").unwrap());

        let s = subnet("10.10.10.10", "255.255.0.0").unwrap();
        assert_eq!(s.first.to_string(), "10.10.0.1");
        assert_eq!(s.last.to_string(), "10.10.255.254");
        assert_eq!(s.host_count, 65534);
    }

    #[test]
    fn test_subnet_small_blocks() {
        let s = subnet("192.168.1.134", "255.255.255.255").unwrap();
        assert_eq!(s.first.to_string(), "192.168.1.134");
        assert_eq!(s.last.to_string(), "192.168.1.134");
        assert_eq!(s.host_count, 1);
        assert!(s.contains_str("192.168.1.134").unwrap());

        let s = subnet("192.168.1.134", "255.255.255.254").unwrap();
        assert_eq!(s.first.to_string(), "192.168.1.134");
        assert_eq!(s.last.to_string(), "192.168.1.135");
        assert_eq!(s.host_count, 2);
    }

    #[test]
    fn test_subnet_v6() {
        let s = subnet("::1:1", "::ffff:0").unwrap();
        assert_eq!(s.first.to_string(), "::1:1");
        assert_eq!(s.last.to_string(), "::1:fffe");
        assert_eq!(s.host_count, 65534);
        assert!(s.contains_str("::1:1010").unwrap());

        let s = parse_cidr_subnet("::/0").unwrap();
        assert_eq!(s.prefix_length, 0);
        assert_eq!(s.broadcast.to_string(), "ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff");
        assert_eq!(s.host_count, u128::MAX - 1);
        assert_eq!(
            s.block_size.to_string(),
            "340282366920938463463374607431768211456"
        );
        assert_eq!(s.block_size, BigUint::from(s.host_count) + 2u8);
    }

    #[test]
    fn test_non_contiguous_mask() {
        let s = subnet("10.20.30.40", "255.0.255.0").unwrap();
        assert_eq!(s.prefix_length, 24);
        assert_eq!(s.network.to_string(), "10.0.30.0");
        assert_eq!(s.broadcast.to_string(), "10.0.30.255");
    }

    #[test]
    fn test_cidr_subnet_contains() {
        let cases = [
            ("efef::/64", "efef::1", true),
            ("efef::/64", "abcd::1", false),
            ("192.168.0.0/16", "192.168.1.1", true),
            ("192.168.0.0/16", "10.0.0.1", false),
            ("::ffff:192.168.0.0/112", "::ffff:192.168.0.1", true),
            ("::ffff:192.168.0.0/112", "::ffff:10.0.0.1", false),
            ("127.0.0.0/8", "127.0.0.1", true),
            ("::ffff:127.0.0.0/104", "::ffff:127.0.0.1", true),
            ("10.0.0.0/24", "10.0.0.0", true),
            ("10.0.0.0/24", "10.0.0.255", true),
            ("::ffff:127.0.0.0/104", "127.0.0.1", true),
            ("127.0.0.0/8", "::ffff:127.0.0.1", true),
            ("127.0.0.0/8", "::7f00:1", false),
        ];
        for (block, addr, expected) in cases {
            let s = parse_cidr_subnet(block).unwrap();
            assert_eq!(s.contains_str(addr).unwrap(), expected, "{block} contains {addr}");
        }

        let s = parse_cidr_subnet("192.168.1.134/26").unwrap();
        assert_eq!(s.network.to_string(), "192.168.1.128");
        assert_eq!(s.block_size, BigUint::from(64u8));
        assert!(s.contains_str("not-an-ip").is_err());
        assert!(parse_cidr_subnet("efef::efef::/64").is_err());
        assert!(parse_cidr_subnet("192.168.0.0/500").is_err());
    }
}
