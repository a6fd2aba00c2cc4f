//! Canonical text rendering.
//!
//! IPv4 is four dotted decimal octets. IPv6 is eight lowercase hex groups
//! with the longest run of two or more zero groups collapsed to `::`; on a
//! tie the leftmost run is collapsed (RFC 5952 section 4.2).

use itertools::Itertools;
use std::fmt;

use crate::error::{AddressError, Result};
use crate::models::{Address, Family};

fn format_ipv4(value: u32) -> String {
    value.to_be_bytes().iter().join(".")
}

/// Leftmost longest run of zero groups, as `(start, len)`, when at least 2 long.
fn longest_zero_run(groups: &[u16; 8]) -> Option<(usize, usize)> {
    let mut best: Option<(usize, usize)> = None;
    let mut start = 0;
    while start < groups.len() {
        if groups[start] != 0 {
            start += 1;
            continue;
        }
        let len = groups[start..].iter().take_while(|g| **g == 0).count();
        if len >= 2 && best.map_or(true, |(_, best_len)| len > best_len) {
            best = Some((start, len));
        }
        start += len;
    }
    best
}

fn format_ipv6(value: u128) -> String {
    let mut groups = [0u16; 8];
    for (i, group) in groups.iter_mut().enumerate() {
        *group = (value >> ((7 - i) * 16)) as u16;
    }

    let hex = |gs: &[u16]| gs.iter().map(|g| format!("{g:x}")).join(":");
    match longest_zero_run(&groups) {
        Some((start, len)) => format!(
            "{}::{}",
            hex(&groups[..start]),
            hex(&groups[start + len..])
        ),
        None => hex(&groups),
    }
}

impl Address {
    /// Render as `family`.
    ///
    /// `mapped` defaults to true when an IPv4 address is rendered as IPv6, which
    /// produces `::ffff:a.b.c.d`. Rendering a value wider than 32 bits as IPv4
    /// fails with [`AddressError::AddressTooWide`].
    pub fn to_string_as(&self, family: Family, mapped: Option<bool>) -> Result<String> {
        let mapped = mapped.unwrap_or(family == Family::V6 && self.family() != family);
        let value = self.value();
        match family {
            Family::V4 => {
                let value =
                    u32::try_from(value).map_err(|_| AddressError::AddressTooWide(self.to_string()))?;
                Ok(format_ipv4(value))
            }
            Family::V6 if mapped && value <= u32::MAX as u128 => {
                Ok(format!("::ffff:{}", format_ipv4(value as u32)))
            }
            Family::V6 => Ok(format_ipv6(value)),
        }
    }

    /// The value as a 32-bit integer.
    pub fn to_long(&self) -> Result<u32> {
        u32::try_from(self.value()).map_err(|_| AddressError::AddressTooWide(self.to_string()))
    }
}

/// Canonical form in the address's own family.
impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.family() {
            Family::V4 => f.write_str(&format_ipv4(self.value() as u32)),
            Family::V6 => f.write_str(&format_ipv6(self.value())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    fn render(input: &str, family: Family) -> Result<String> {
        parse(input).unwrap().to_string_as(family, None)
    }

    #[test]
    fn test_to_string_as() {
        assert_eq!(render("::", Family::V6).unwrap(), "::");
        assert_eq!(render("::", Family::V4).unwrap(), "0.0.0.0");
        assert_eq!(render("::1", Family::V6).unwrap(), "::1");
        assert_eq!(render("::1", Family::V4).unwrap(), "0.0.0.1");
        assert_eq!(render("1.2.3.4", Family::V4).unwrap(), "1.2.3.4");
        assert_eq!(render("1.2.3.4", Family::V6).unwrap(), "::ffff:1.2.3.4");
        assert_eq!(render("::0a0a:0a0a", Family::V4).unwrap(), "10.10.10.10");
        assert!(matches!(
            render("ff::", Family::V4),
            Err(AddressError::AddressTooWide(_))
        ));
    }

    #[test]
    fn test_mapped_flag() {
        let v4 = parse("1.2.3.4").unwrap();
        assert_eq!(v4.to_string_as(Family::V6, Some(false)).unwrap(), "::102:304");
        let v6 = parse("::102:304").unwrap();
        assert_eq!(
            v6.to_string_as(Family::V6, Some(true)).unwrap(),
            "::ffff:1.2.3.4"
        );
        let wide = parse("1::").unwrap();
        assert_eq!(wide.to_string_as(Family::V6, Some(true)).unwrap(), "1::");
    }

    #[test]
    fn test_ipv6_compression() {
        assert_eq!(format_ipv6(u128::MAX), "ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff");
        assert_eq!(format_ipv6(0), "::");
        assert_eq!(format_ipv6(1), "::1");
        assert_eq!(format_ipv6(0xffff_ffff << 96), "ffff:ffff::");
        assert_eq!(parse("1:0:2:3:4:5:6:7").unwrap().to_string(), "1:0:2:3:4:5:6:7");
        assert_eq!(parse("1:0:0:2:0:0:0:3").unwrap().to_string(), "1:0:0:2::3");
        assert_eq!(parse("1:0:0:2:3:0:0:4").unwrap().to_string(), "1::2:3:0:0:4");
        assert_eq!(parse("2607:f0d0:1002::").unwrap().to_string(), "2607:f0d0:1002::");
        assert_eq!(parse("::ffff:0:0").unwrap().to_string(), "::ffff:0:0");
    }

    #[test]
    fn test_to_long() {
        assert_eq!(parse("::ff").unwrap().to_long().unwrap(), 255);
        assert_eq!(parse("::ffff:ffff").unwrap().to_long().unwrap(), 4294967295);
        assert!(matches!(
            parse("ff::").unwrap().to_long(),
            Err(AddressError::AddressTooWide(_))
        ));
    }

    #[test]
    fn test_round_trip() {
        for text in [
            "0.0.0.0",
            "10.0.0.1",
            "255.255.255.255",
            "::",
            "::1",
            "fe80::f2de:f1ff:fe3f:307e",
            "2001:db8::8a2e:370:7334",
            "ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff",
        ] {
            let addr = parse(text).unwrap();
            assert_eq!(addr.to_string(), text);
            assert_eq!(parse(addr.to_string().as_str()).unwrap(), addr);
        }
    }
}
