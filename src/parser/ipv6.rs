//! IPv6 text parsing (RFC 4291 section 2.2).
//!
//! At most one `::` may appear and it stands for one or more zero hextets.
//! A trailing dotted group is an embedded IPv4 address, accepted only as
//! `::ffff:a.b.c.d` (IPv4-mapped) or `::a.b.c.d` (zero-extended).

use super::ipv4::parse_dotted_quad;

const HEXTETS: usize = 8;

/// Longest accepted text: `0000:0000:0000:0000:0000:ffff:255.255.255.255`.
pub const MAX_TEXT_LEN: usize = 45;

fn hextet(group: &str) -> Option<u16> {
    if group.is_empty() || group.len() > 4 || !group.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u16::from_str_radix(group, 16).ok()
}

fn split_groups(part: &str) -> Vec<&str> {
    if part.is_empty() {
        Vec::new()
    } else {
        part.split(':').collect()
    }
}

fn parse_hextets(groups: &[&str]) -> Option<Vec<u16>> {
    groups.iter().map(|g| hextet(g)).collect()
}

/// Split a trailing dotted group off `groups` into two hextets.
fn take_embedded_ipv4(groups: &mut Vec<&str>) -> Option<Option<[u16; 2]>> {
    match groups.last() {
        Some(last) if last.contains('.') => {
            let v4 = parse_dotted_quad(last)?;
            groups.pop();
            Some(Some([(v4 >> 16) as u16, v4 as u16]))
        }
        _ => Some(None),
    }
}

/// Evaluate IPv6 text (already lowercased) into its 128-bit value.
pub fn parse(text: &str) -> Option<u128> {
    if text.len() > MAX_TEXT_LEN {
        return None;
    }

    let mut halves = text.split("::");
    let head = halves.next()?;
    let tail = halves.next();
    if halves.next().is_some() {
        log::trace!("more than one '::' in {text}");
        return None;
    }

    let compressed = tail.is_some();
    let mut head_groups = split_groups(head);
    let mut tail_groups = tail.map(split_groups).unwrap_or_default();

    let embedded = if compressed {
        take_embedded_ipv4(&mut tail_groups)?
    } else {
        take_embedded_ipv4(&mut head_groups)?
    };

    let mut head = parse_hextets(&head_groups)?;
    let mut tail = parse_hextets(&tail_groups)?;
    if let Some(pair) = embedded {
        let last = if compressed { &mut tail } else { &mut head };
        last.extend_from_slice(&pair);
    }

    let explicit = head.len() + tail.len();
    let hextets: Vec<u16> = if compressed {
        if explicit >= HEXTETS {
            return None;
        }
        let zeros = HEXTETS - explicit;
        head.iter()
            .copied()
            .chain(std::iter::repeat(0).take(zeros))
            .chain(tail.iter().copied())
            .collect()
    } else {
        if explicit != HEXTETS {
            return None;
        }
        head
    };
    log::trace!("ipv6 hextets={:x?}", hextets);

    let value = hextets
        .iter()
        .fold(0u128, |acc, h| (acc << 16) | *h as u128);

    if embedded.is_some() {
        let prefix = value >> 48;
        let marker = (value >> 32) & 0xffff;
        if prefix != 0 || (marker != 0 && marker != 0xffff) {
            log::trace!("embedded IPv4 in unsupported position: {text}");
            return None;
        }
    }

    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_and_compressed() {
        assert_eq!(parse("::1"), Some(1));
        assert_eq!(parse("::ff"), Some(255));
        assert_eq!(parse("::"), Some(0));
        assert_eq!(parse("f::f"), Some(77884452878022414427957444938301455));
        assert_eq!(parse("ff::"), Some(1324035698926381045275276563951124480));
        assert_eq!(
            parse("ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff"),
            Some(u128::MAX)
        );
        assert_eq!(parse("1:2:3:4:5:6:7:8"), Some(0x0001_0002_0003_0004_0005_0006_0007_0008));
        assert_eq!(parse("2607:f0d0:1002:51::4"), Some(0x2607_f0d0_1002_0051_0000_0000_0000_0004));
    }

    #[test]
    fn test_embedded_ipv4() {
        assert_eq!(parse("::ffff:0.0.0.1"), Some(281470681743361));
        assert_eq!(parse("0:0:0:0:0:ffff:0.0.0.1"), Some(281470681743361));
        assert_eq!(
            parse("0000:0000:0000:0000:0000:ffff:255.255.255.255"),
            Some(281474976710655)
        );
        assert_eq!(parse("::1.2.3.4"), Some(0x0102_0304));
        assert_eq!(parse("::ffff:127.0.0.1"), Some(0xffff_7f00_0001));
    }

    #[test]
    fn test_rejects_malformed() {
        for text in [
            ":ff",
            ":::f",
            "f:::f",
            "ff:::",
            "ff:",
            "ff::f:",
            ":ff:",
            "ff:ff",
            "efef::efef::",
            "1:2:3:4:5:6:7:8:9",
            "::1:2:3:4:5:6:7:8",
            "1:2:3:4::5:6:7:8",
            "ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffffff",
            "::gggg",
            "1.2.3.4::5",
        ] {
            assert_eq!(parse(text), None, "{text} should be rejected");
        }
    }

    #[test]
    fn test_rejects_misplaced_ipv4() {
        for text in [
            "::ff:0.0.0.1",
            "::ffff:ffff:0.0.0.1",
            "0:0:0:0:0:0:ffff:0.0.0.1",
            "::ffff:0.0.0.256",
            "ffff:ffff:ffff:ffff:ffff:ffff:255.255.255.255",
            "1::ffff:1.2.3.4",
            "::1.2.3.4:ffff",
            "::ffff:01.2.3.4",
        ] {
            assert_eq!(parse(text), None, "{text} should be rejected");
        }
    }
}
