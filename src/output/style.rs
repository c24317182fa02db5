//! Per-style rendering of address sets.

use super::terminal::{format_field, Align};
use crate::error::NetmaskError;
use crate::models::{AddressSet, Family};
use itertools::Itertools;
use std::net::IpAddr;

/// Address count of `::/0`, which does not fit in a `u128`.
const WHOLE_V6_SPACE: &str = "340282366920938463463374607431768211456";

/// Output encodings selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputStyle {
    /// `address/netmask`
    Standard,
    /// `address/prefix`
    #[default]
    Cidr,
    /// `address wildcard`
    Cisco,
    /// `first-last (count)`
    Range,
    Hex,
    Octal,
    Binary,
    /// JSON array of CIDR strings
    Json,
}

/// Render every block of `set` as output lines, lowest network first.
pub fn render(set: &AddressSet, style: OutputStyle) -> Result<Vec<String>, NetmaskError> {
    if style == OutputStyle::Json {
        let json = serde_json::to_string(set).map_err(|e| NetmaskError::Invariant(e.to_string()))?;
        return Ok(vec![json]);
    }
    let mut lines = Vec::with_capacity(set.len());
    set.walk(|family, network, mask| lines.push(format_block(style, family, network, mask)))?;
    Ok(lines)
}

/// Format one block in the given style.
pub fn format_block(style: OutputStyle, family: Family, network: IpAddr, mask: IpAddr) -> String {
    match style {
        OutputStyle::Standard => format!(
            "{}/{}",
            format_field(network, 15, Align::Right),
            format_field(mask, 15, Align::Left)
        ),
        OutputStyle::Cidr | OutputStyle::Json => format!(
            "{}/{}",
            format_field(network, 15, Align::Right),
            to_bits(mask).count_ones()
        ),
        OutputStyle::Cisco => format!(
            "{} {}",
            format_field(network, 15, Align::Right),
            format_field(from_bits(family, !to_bits(mask)), 15, Align::Left)
        ),
        OutputStyle::Range => {
            let host_bits = !to_bits(mask) & family_bits(family);
            let broadcast = from_bits(family, to_bits(network) | host_bits);
            let count = host_bits
                .checked_add(1)
                .map(|c| c.to_string())
                .unwrap_or_else(|| WHOLE_V6_SPACE.to_string());
            format!(
                "{}-{} ({})",
                format_field(network, 15, Align::Right),
                format_field(broadcast, 15, Align::Left),
                count
            )
        }
        OutputStyle::Hex => match family {
            Family::V4 => format!("0x{:08x}/0x{:08x}", to_bits(network), to_bits(mask)),
            Family::V6 => format!("0x{:032x}/0x{:032x}", to_bits(network), to_bits(mask)),
        },
        OutputStyle::Octal => match family {
            Family::V4 => format!("0{:011o}/0{:011o}", to_bits(network), to_bits(mask)),
            Family::V6 => format!("0{}/0{}", octal_bytes(network), octal_bytes(mask)),
        },
        OutputStyle::Binary => format!("{} / {}", binary_bytes(network), binary_bytes(mask)),
    }
}

fn family_bits(family: Family) -> u128 {
    match family {
        Family::V4 => u32::MAX as u128,
        Family::V6 => u128::MAX,
    }
}

fn to_bits(addr: IpAddr) -> u128 {
    match addr {
        IpAddr::V4(v4) => u32::from(v4) as u128,
        IpAddr::V6(v6) => u128::from(v6),
    }
}

fn from_bits(family: Family, bits: u128) -> IpAddr {
    match family {
        Family::V4 => IpAddr::from((bits as u32).to_be_bytes()),
        Family::V6 => IpAddr::from(bits.to_be_bytes()),
    }
}

fn octets(addr: IpAddr) -> Vec<u8> {
    match addr {
        IpAddr::V4(v4) => v4.octets().to_vec(),
        IpAddr::V6(v6) => v6.octets().to_vec(),
    }
}

fn octal_bytes(addr: IpAddr) -> String {
    octets(addr).iter().map(|b| format!("{b:03o}")).join("")
}

fn binary_bytes(addr: IpAddr) -> String {
    octets(addr).iter().map(|b| format!("{b:08b}")).join(" ")
}
