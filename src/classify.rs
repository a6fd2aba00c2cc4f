//! Special-purpose address ranges (IANA registries).
//!
//! The table is built once on first use. Every IPv4 block is also listed in its
//! IPv4-mapped IPv6 form (`::ffff:a.b.c.d/96+len`), so mapped addresses classify
//! like the IPv4 address they carry.

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Result;
use crate::models::address::MAPPED_PREFIX;
use crate::models::{Address, Family, Subnet};
use crate::parser::{parse, AddressInput};
use crate::processing::{from_prefix_len, parse_cidr_subnet, subnet_of};

/// Category of a special-purpose range.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Special {
    Unspecified,
    Loopback,
    Private,
    Linklocal,
    Multicast,
    Documentation,
    Reserved,
}

impl Special {
    /// All categories in lookup order.
    pub const ALL: [Special; 7] = [
        Special::Unspecified,
        Special::Loopback,
        Special::Private,
        Special::Linklocal,
        Special::Multicast,
        Special::Documentation,
        Special::Reserved,
    ];

    fn cidrs(self) -> &'static [&'static str] {
        match self {
            Special::Unspecified => &["0.0.0.0/8", "::/128"],
            Special::Loopback => &["127.0.0.0/8", "::1/128"],
            Special::Private => &[
                "10.0.0.0/8",
                "172.16.0.0/12",
                "192.168.0.0/16",
                "100.64.0.0/10", // carrier-grade NAT
                "fc00::/7",
                "198.18.0.0/15", // benchmarking
            ],
            Special::Linklocal => &["169.254.0.0/16", "fe80::/64"],
            Special::Multicast => &["224.0.0.0/4", "ff00::/8"],
            Special::Documentation => &[
                "192.0.0.0/24",
                "192.0.2.0/24",
                "192.88.99.0/24",
                "198.51.100.0/24",
                "203.0.113.0/24",
                "2001:db8::/32",
            ],
            Special::Reserved => &[
                "240.0.0.0/4",
                "255.255.255.255/32",
                "::ffff:0:0/96",
                "64:ff9b::/96",
                "64:ff9b:1::/48",
                "100::/64",
                "2001::/32",
                "2001:20::/28",
                "2002::/16",
                "3fff::/20",
                "5f00::/16",
            ],
        }
    }

    /// Subnets of this category, IPv4 blocks followed by their mapped form.
    pub fn subnets(self) -> &'static [Subnet] {
        let index = Special::ALL
            .iter()
            .position(|s| *s == self)
            .unwrap_or_default();
        &SPECIAL_SUBNETS[index].1
    }
}

impl fmt::Display for Special {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Special::Unspecified => "unspecified",
            Special::Loopback => "loopback",
            Special::Private => "private",
            Special::Linklocal => "linklocal",
            Special::Multicast => "multicast",
            Special::Documentation => "documentation",
            Special::Reserved => "reserved",
        };
        f.write_str(name)
    }
}

/// `::ffff:base/(96 + len)` for an IPv4 block.
fn mapped_subnet(subnet: &Subnet) -> Subnet {
    let network = Address::widen(MAPPED_PREFIX | subnet.network.value(), Family::V6);
    let mask = from_prefix_len(96 + subnet.prefix_length, Some(Family::V6))
        .expect("mapped prefix fits in 128 bits");
    subnet_of(&network, &mask)
}

fn build_table() -> Vec<(Special, Vec<Subnet>)> {
    let table: Vec<(Special, Vec<Subnet>)> = Special::ALL
        .iter()
        .map(|special| {
            let subnets = special
                .cidrs()
                .iter()
                .flat_map(|cidr| {
                    let subnet = parse_cidr_subnet(cidr).expect("Invalid special-range CIDR?");
                    match subnet.family {
                        Family::V4 => {
                            let mapped = mapped_subnet(&subnet);
                            vec![subnet, mapped]
                        }
                        Family::V6 => vec![subnet],
                    }
                })
                .collect();
            (*special, subnets)
        })
        .collect();
    log::debug!(
        "special-range table built: {} subnets",
        table.iter().map(|(_, s)| s.len()).sum::<usize>()
    );
    table
}

lazy_static! {
    static ref SPECIAL_SUBNETS: Vec<(Special, Vec<Subnet>)> = build_table();
}

fn matches(addr: &Address, special: Special) -> bool {
    special
        .subnets()
        .iter()
        .any(|subnet| subnet.contains_same_family(addr))
}

/// First category containing `addr`, in [`Special::ALL`] order.
pub fn classify(addr: &Address) -> Option<Special> {
    Special::ALL.into_iter().find(|special| matches(addr, *special))
}

impl Address {
    /// Special-purpose category of this address, if any.
    pub fn range(&self) -> Option<Special> {
        classify(self)
    }
}

/// True if `addr` lies in any of `categories`, or in any category when empty.
pub fn is_special<'a>(addr: impl Into<AddressInput<'a>>, categories: &[Special]) -> Result<bool> {
    let addr = parse(addr)?;
    let all = Special::ALL;
    let categories = if categories.is_empty() {
        &all[..]
    } else {
        categories
    };
    Ok(categories.iter().any(|special| matches(&addr, *special)))
}

/// Private, link-local, loopback or unspecified.
pub fn is_private<'a>(addr: impl Into<AddressInput<'a>>) -> Result<bool> {
    is_special(
        addr,
        &[
            Special::Private,
            Special::Linklocal,
            Special::Loopback,
            Special::Unspecified,
        ],
    )
}

pub fn is_public<'a>(addr: impl Into<AddressInput<'a>>) -> Result<bool> {
    Ok(!is_private(addr)?)
}

/// Loopback, unspecified or link-local.
pub fn is_loopback<'a>(addr: impl Into<AddressInput<'a>>) -> Result<bool> {
    is_special(
        addr,
        &[Special::Loopback, Special::Unspecified, Special::Linklocal],
    )
}

/// Loopback literal of a family.
pub fn loopback(family: Family) -> &'static str {
    match family {
        Family::V4 => "127.0.0.1",
        Family::V6 => "::1",
    }
}
