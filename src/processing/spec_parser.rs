//! Spec token parsing.
//!
//! A spec token is one of:
//! - `ADDR` - a single host
//! - `ADDR/MASK` - a prefix length or an explicit (possibly wildcard) mask
//! - `ADDR1,ADDR2` or `ADDR1:ADDR2` - an inclusive address range
//! - `ADDR,+N` or `ADDR:+N` - the range `[ADDR, ADDR + N]`
//!
//! `ADDR` is an IPv6 literal, an IPv4 literal in `inet_aton` form (dotted,
//! decimal, `0`-octal or `0x`-hex parts) or a hostname.

use super::range::decompose_range;
use super::resolve::Resolver;
use crate::error::NetmaskError;
use crate::models::{codec, AddressSet, Block, Family, WideAddress};
use regex::Regex;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;
use std::sync::OnceLock;

/// Regex for a single unsigned number in C literal notation.
static NUMBER_REGEX: OnceLock<Regex> = OnceLock::new();

/// Regex for names worth handing to the resolver.
static HOSTNAME_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_number_regex() -> &'static Regex {
    NUMBER_REGEX.get_or_init(|| {
        Regex::new(r"^(?:0[xX]([0-9a-fA-F]+)|(0[0-7]*)|([1-9][0-9]*))$").expect("Invalid Regex")
    })
}

fn get_hostname_regex() -> &'static Regex {
    HOSTNAME_REGEX.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9_]([A-Za-z0-9_-]*[A-Za-z0-9_])?(\.[A-Za-z0-9_]([A-Za-z0-9_-]*[A-Za-z0-9_])?)*\.?$")
            .expect("Invalid Regex")
    })
}

/// Parse one spec token into a canonical set.
///
/// `resolver` is consulted for tokens that are not address literals; pass
/// `None` to disable name lookups. On any error the token contributes
/// nothing.
pub fn parse_spec(token: &str, resolver: Option<&dyn Resolver>) -> Result<AddressSet, NetmaskError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(NetmaskError::Parse(token.to_string()));
    }
    log::trace!("parse_spec({token})");

    if let Some((addr, mask)) = token.split_once('/') {
        let hosts = parse_address(addr, resolver, token)?;
        let mut set = AddressSet::new();
        for host in hosts.iter() {
            set = set.insert(apply_mask(*host, mask, token)?);
        }
        return Ok(set);
    }

    if let Some((first, second)) = token.split_once(',') {
        return parse_range(first, second, resolver, token);
    }

    match parse_address(token, resolver, token) {
        Ok(set) => Ok(set),
        Err(e) => match token.split_once(':') {
            Some((first, second)) => parse_range(first, second, resolver, token),
            None => Err(e),
        },
    }
}

/// Parse an address literal or resolve a hostname into host blocks.
fn parse_address(
    text: &str,
    resolver: Option<&dyn Resolver>,
    token: &str,
) -> Result<AddressSet, NetmaskError> {
    if let Some(block) = parse_literal(text) {
        return Ok(AddressSet::from_block(block));
    }
    match resolver {
        Some(resolver) if get_hostname_regex().is_match(text) => {
            let addrs = resolver.resolve(text);
            if addrs.is_empty() {
                return Err(NetmaskError::Resolution(text.to_string()));
            }
            Ok(addrs.into_iter().map(Block::from_ip).collect())
        }
        _ => Err(NetmaskError::Parse(token.to_string())),
    }
}

/// Parse an address literal: IPv6 first, then the IPv4 forms.
fn parse_literal(text: &str) -> Option<Block> {
    if let Ok(v6) = Ipv6Addr::from_str(text) {
        return Some(Block::from_v6(v6));
    }
    parse_v4(text).map(Block::from_v4)
}

/// Parse an IPv4 address the way `inet_aton` does.
///
/// `a.b.c.d`, `a.b.c` (c is 16 bits), `a.b` (b is 24 bits) and `a` (32 bits)
/// are all accepted; every part may be decimal, octal or hex.
fn parse_v4(text: &str) -> Option<Ipv4Addr> {
    let parts: Vec<u64> = text
        .split('.')
        .map(parse_number)
        .collect::<Option<Vec<u64>>>()?;
    let (last, leading) = parts.split_last()?;
    if parts.len() > 4 || leading.iter().any(|&p| p > 0xff) {
        return None;
    }
    let last_bits = 8 * (4 - leading.len() as u32);
    if *last >= 1u64 << last_bits {
        return None;
    }
    let value = leading
        .iter()
        .enumerate()
        .fold(*last, |acc, (i, &p)| acc | p << (24 - 8 * i as u32));
    Some(Ipv4Addr::from(value as u32))
}

/// Parse a decimal, `0`-prefixed octal or `0x`-prefixed hex number.
fn parse_number(text: &str) -> Option<u64> {
    let caps = get_number_regex().captures(text)?;
    if let Some(hex) = caps.get(1) {
        u64::from_str_radix(hex.as_str(), 16).ok()
    } else if let Some(octal) = caps.get(2) {
        u64::from_str_radix(octal.as_str(), 8).ok()
    } else {
        caps.get(3)?.as_str().parse::<u64>().ok()
    }
}

/// Apply the text after `/` to a host block.
fn apply_mask(block: Block, text: &str, token: &str) -> Result<Block, NetmaskError> {
    let parse_error = || NetmaskError::Parse(token.to_string());

    let (mask, family) = if let Some(len) = parse_number(text) {
        let len = match block.family {
            Family::V4 if len <= 32 => len + codec::V4_MAPPED_LENGTH as u64,
            Family::V6 if len <= codec::MAX_LENGTH as u64 => len,
            _ => return Err(parse_error()),
        };
        (codec::prefix_mask(len as u32), block.family)
    } else if let Ok(v6) = Ipv6Addr::from_str(text) {
        (codec::v6_mask_literal(codec::from_v6(v6)), Family::V6)
    } else if block.family == Family::V4 {
        let v4 = parse_v4(text).ok_or_else(parse_error)?;
        (codec::v4_mask_literal(u32::from(v4)), Family::V4)
    } else {
        return Err(parse_error());
    };

    Block::new(block.network, mask, family).map_err(|_| parse_error())
}

/// Build the range `[first, second]` or `[first, first + N]`.
fn parse_range(
    first: &str,
    second: &str,
    resolver: Option<&dyn Resolver>,
    token: &str,
) -> Result<AddressSet, NetmaskError> {
    let low = endpoint(first, resolver, token)?;

    let high = match second.strip_prefix('+') {
        // `ADDR:+-N` has no agreed meaning
        Some(offset) if offset.starts_with('-') => {
            return Err(NetmaskError::Parse(token.to_string()));
        }
        Some(offset) => {
            let offset = parse_literal(offset).ok_or_else(|| NetmaskError::Parse(token.to_string()))?;
            add_offset(low, offset, token)?
        }
        None => endpoint(second, resolver, token)?.network,
    };

    Ok(decompose_range(low.network, high))
}

/// First address a range endpoint stands for.
fn endpoint(text: &str, resolver: Option<&dyn Resolver>, token: &str) -> Result<Block, NetmaskError> {
    let set = parse_address(text, resolver, token)?;
    set.blocks()
        .first()
        .copied()
        .ok_or_else(|| NetmaskError::Parse(token.to_string()))
}

/// `low + offset`; an IPv4 offset counts only its 32-bit value.
fn add_offset(low: Block, offset: Block, token: &str) -> Result<WideAddress, NetmaskError> {
    let offset = if offset.is_v4() {
        WideAddress::new(offset.network.low32() as u128)
    } else {
        offset.network
    };
    let (sum, carry) = low.network.add(offset);
    if carry || (low.is_v4() && !codec::is_v4_mapped(sum, WideAddress::MAX)) {
        return Err(NetmaskError::Overflow(token.to_string()));
    }
    Ok(sum)
}
