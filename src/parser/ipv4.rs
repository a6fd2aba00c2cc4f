//! IPv4 text parsing.
//!
//! Four-group addresses are strict: plain decimal octets without leading zeros.
//! The one to three group shorthand forms (`a`, `a.b`, `a.b.c`) also accept
//! `0x` hex and leading-zero octal groups, each bounded so the combined value
//! fits in 32 bits. Octal-looking octets in the four-group form are rejected
//! outright instead of being read as decimal.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref HEX_RE: Regex = Regex::new(r"^0x[0-9a-f]+$").expect("Invalid Regex?");
    static ref DEC_RE: Regex = Regex::new(r"^(0|[1-9][0-9]*)$").expect("Invalid Regex?");
    static ref OCT_RE: Regex = Regex::new(r"^0[0-7]+$").expect("Invalid Regex?");
}

/// Longest accepted dotted text: `255.255.255.255`.
pub const MAX_DOTTED_LEN: usize = 15;

/// Value of a strict decimal group, no leading zeros.
fn decimal_group(group: &str) -> Option<u64> {
    if !DEC_RE.is_match(group) {
        return None;
    }
    group.parse().ok()
}

/// Value of a hex, decimal or octal group.
fn any_base_group(group: &str) -> Option<u64> {
    let (digits, radix) = if HEX_RE.is_match(group) {
        (&group[2..], 16)
    } else if DEC_RE.is_match(group) {
        (group, 10)
    } else if OCT_RE.is_match(group) {
        (&group[1..], 8)
    } else {
        return None;
    };
    u64::from_str_radix(digits, radix).ok()
}

/// Strict `a.b.c.d` with decimal octets in `0..=255`.
pub fn parse_dotted_quad(text: &str) -> Option<u32> {
    if text.len() > MAX_DOTTED_LEN {
        return None;
    }
    let groups: Vec<&str> = text.split('.').collect();
    if groups.len() != 4 {
        return None;
    }
    let mut value: u32 = 0;
    for group in groups {
        let octet = decimal_group(group).filter(|o| *o <= 0xff)?;
        value = (value << 8) | octet as u32;
    }
    Some(value)
}

/// Evaluate IPv4 text in any of the accepted forms into its 32-bit value.
///
/// Returns `None` for anything that is not an unambiguous IPv4 address.
///
/// ```
/// use ip_address_kit::normalize_to_long;
/// assert_eq!(normalize_to_long("127.1"), Some(0x7f00_0001));
/// assert_eq!(normalize_to_long("0x7f.1"), Some(0x7f00_0001));
/// assert_eq!(normalize_to_long("192.168.01.1"), None);
/// ```
pub fn normalize_to_long(text: &str) -> Option<u32> {
    let text = text.to_ascii_lowercase();
    let groups: Vec<&str> = text.split('.').collect();
    log::trace!("ipv4 groups={:?}", groups);

    if groups.len() == 4 {
        return parse_dotted_quad(&text);
    }

    let values = groups
        .iter()
        .map(|g| any_base_group(g))
        .collect::<Option<Vec<u64>>>()?;

    let value = match values[..] {
        [a] if a <= 0xffff_ffff => a,
        [a, b] if a <= 0xff && b <= 0xff_ffff => (a << 24) | b,
        [a, b, c] if a <= 0xff && b <= 0xff && c <= 0xffff => (a << 24) | (b << 16) | c,
        _ => return None,
    };
    Some(value as u32)
}
