//! Command line dispatch.
//!
//! `main` only wires up logging and configuration; everything a command does
//! happens in [`run`] so it can be tested without a process.

use colored::Colorize;
use serde::Serialize;
use serde_json::json;
use std::error::Error;

use crate::config::{Config, OutputFormat};
use crate::output::{format_fields, to_json};
use crate::{
    classify, cidr, from_prefix_len, is_equal, mask, not, or, parse, parse_cidr_subnet, subnet,
    Address, Family, Special, Subnet,
};

pub const USAGE: &str = "Usage: ip-address-kit <command> [args]

Commands:
  parse    <addr>                  parse and describe an address
  format   <addr> <family> [mapped] render as ipv4/ipv6, mapped=true|false
  long     <addr>                  32-bit integer value
  mask     <addr> <mask>           addr AND mask
  not      <addr>                  bitwise complement
  or       <a> <b>                 bitwise OR
  equal    <a> <b>                 equality across families
  prefix   <len> [family]          mask for a prefix length
  cidr     <addr/len>              network address of a CIDR
  subnet   <addr> <mask>           subnet details
  subnet   <addr/len>              subnet details
  contains <addr/len> <addr>       membership test
  classify <addr>                  special-purpose category";

#[derive(Serialize, Debug)]
struct AddressReport {
    address: Address,
    family: Family,
    long: Option<u32>,
    hex: String,
    special: Option<Special>,
}

fn render<T: Serialize>(
    config: &Config,
    value: &T,
    fields: &[(&str, String)],
) -> Result<String, Box<dyn Error>> {
    match config.output {
        OutputFormat::Json => Ok(to_json(value)?),
        OutputFormat::Text => Ok(format_fields(fields, config.color)),
    }
}

fn render_one<T: Serialize + ToString>(
    config: &Config,
    name: &str,
    value: T,
) -> Result<String, Box<dyn Error>> {
    let mut map = serde_json::Map::new();
    map.insert(name.to_string(), serde_json::to_value(&value)?);
    render(config, &map, &[(name, value.to_string())])
}

fn render_subnet(config: &Config, s: &Subnet) -> Result<String, Box<dyn Error>> {
    let fields = [
        ("family", s.family.to_string()),
        ("network", s.network.to_string()),
        ("first", s.first.to_string()),
        ("last", s.last.to_string()),
        ("broadcast", s.broadcast.to_string()),
        ("mask", s.mask.to_string()),
        ("prefix_length", s.prefix_length.to_string()),
        ("host_count", s.host_count.to_string()),
        ("block_size", s.block_size.to_string()),
    ];
    render(config, s, &fields)
}

fn arg<'a>(args: &'a [String], index: usize, name: &str) -> Result<&'a str, Box<dyn Error>> {
    args.get(index)
        .map(String::as_str)
        .ok_or_else(|| format!("missing <{name}>\n\n{USAGE}").into())
}

fn parse_bool(text: &str) -> Result<bool, Box<dyn Error>> {
    match text.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(format!("expected true or false, got {other}").into()),
    }
}

/// Run one command. `args` excludes the program name.
pub fn run(args: &[String], config: &Config) -> Result<String, Box<dyn Error>> {
    let command = args.first().map(String::as_str).unwrap_or("");
    log::debug!("run({command}) args={:?}", args);

    match command {
        "parse" => {
            let addr = parse(arg(args, 1, "addr")?)?;
            let report = AddressReport {
                long: addr.to_long().ok(),
                hex: addr.to_hex(),
                special: addr.range(),
                family: addr.family(),
                address: addr,
            };
            let fields = [
                ("address", report.address.to_string()),
                ("family", report.family.to_string()),
                (
                    "long",
                    report.long.map(|l| l.to_string()).unwrap_or_default(),
                ),
                ("hex", report.hex.clone()),
                (
                    "special",
                    report.special.map(|s| s.to_string()).unwrap_or_default(),
                ),
            ];
            render(config, &report, &fields)
        }
        "format" => {
            let addr = parse(arg(args, 1, "addr")?)?;
            let family: Family = arg(args, 2, "family")?.parse()?;
            let mapped = match args.get(3) {
                Some(m) => Some(parse_bool(m)?),
                None => None,
            };
            render_one(config, "address", addr.to_string_as(family, mapped)?)
        }
        "long" => {
            let addr = parse(arg(args, 1, "addr")?)?;
            render_one(config, "long", addr.to_long()?)
        }
        "mask" => render_one(
            config,
            "address",
            mask(arg(args, 1, "addr")?, arg(args, 2, "mask")?)?,
        ),
        "not" => render_one(config, "address", not(arg(args, 1, "addr")?)?),
        "or" => render_one(config, "address", or(arg(args, 1, "a")?, arg(args, 2, "b")?)?),
        "equal" => render_one(
            config,
            "equal",
            is_equal(arg(args, 1, "a")?, arg(args, 2, "b")?)?,
        ),
        "prefix" => {
            let len: u32 = arg(args, 1, "len")?
                .parse()
                .map_err(|e| format!("invalid <len>: {e}"))?;
            let family = match args.get(2) {
                Some(f) => Some(f.parse::<Family>()?),
                None => None,
            };
            render_one(config, "mask", from_prefix_len(len, family)?)
        }
        "cidr" => render_one(config, "network", cidr(arg(args, 1, "addr/len")?)?),
        "subnet" => {
            let first = arg(args, 1, "addr")?;
            let s = match args.get(2) {
                Some(m) => subnet(first, m)?,
                None => parse_cidr_subnet(first)?,
            };
            render_subnet(config, &s)
        }
        "contains" => {
            let s = parse_cidr_subnet(arg(args, 1, "addr/len")?)?;
            let inside = s.contains_str(arg(args, 2, "addr")?)?;
            render_one(config, "contains", inside)
        }
        "classify" => {
            let addr = parse(arg(args, 1, "addr")?)?;
            let special = classify(&addr);
            let text = special.map(|s| s.to_string()).unwrap_or_default();
            render(config, &json!({ "special": special }), &[("special", text)])
        }
        "help" | "-h" | "--help" => Ok(USAGE.to_string()),
        "" => Err(USAGE.into()),
        other => {
            log::warn!("{} command {other}", "unknown".red());
            Err(format!("unknown command: {other}\n\n{USAGE}").into())
        }
    }
}
