//! Conversions between [`WideAddress`] and the two wire address families.
//!
//! IPv4 addresses are carried in the IPv4-mapped IPv6 range
//! `::ffff:0:0/96`, so one 128-bit space holds both families.

use super::WideAddress;
use crate::error::NetmaskError;
use std::net::{Ipv4Addr, Ipv6Addr};

/// Length of the IPv4-mapped prefix.
pub const V4_MAPPED_LENGTH: u8 = 96;

/// Network address of `::ffff:0:0/96`.
pub const V4_MAPPED_PREFIX: WideAddress = WideAddress::from_parts(0, 0x0000_ffff_0000_0000);

/// Maximum prefix length in the shared 128-bit space.
pub const MAX_LENGTH: u8 = 128;

/// Embed an IPv4 address as `::ffff:a.b.c.d`.
pub fn from_v4(addr: Ipv4Addr) -> WideAddress {
    V4_MAPPED_PREFIX | WideAddress::new(u32::from(addr) as u128)
}

pub fn from_v6(addr: Ipv6Addr) -> WideAddress {
    WideAddress::new(u128::from(addr))
}

/// Extract the IPv4 address from an IPv4-mapped value.
///
/// Fails when the value lies outside `::ffff:0:0/96`; renderers only call
/// this after [`is_v4_mapped`] said yes.
pub fn to_v4(value: WideAddress) -> Result<Ipv4Addr, NetmaskError> {
    if value & prefix_mask(V4_MAPPED_LENGTH as u32) != V4_MAPPED_PREFIX {
        return Err(NetmaskError::Invariant(format!(
            "{:?} is not an IPv4-mapped address",
            value
        )));
    }
    Ok(Ipv4Addr::from(value.low32()))
}

pub fn to_v6(value: WideAddress) -> Ipv6Addr {
    Ipv6Addr::from(value.value())
}

/// True when `network/mask` lies entirely inside `::ffff:0:0/96`.
pub fn is_v4_mapped(network: WideAddress, mask: WideAddress) -> bool {
    let v4_mask = prefix_mask(V4_MAPPED_LENGTH as u32);
    mask >= v4_mask && network & v4_mask == V4_MAPPED_PREFIX
}

/// Mask with the top `len` bits set. `len` is clamped to 128.
pub const fn prefix_mask(len: u32) -> WideAddress {
    if len == 0 {
        WideAddress::ZERO
    } else if len >= MAX_LENGTH as u32 {
        WideAddress::MAX
    } else {
        WideAddress::new(u128::MAX << (MAX_LENGTH as u32 - len))
    }
}

/// Number of leading one-bits, or `None` if `mask` is not a prefix mask.
pub fn prefix_length(mask: WideAddress) -> Option<u8> {
    let len = mask.value().leading_ones();
    if prefix_mask(len) == mask {
        Some(len as u8)
    } else {
        None
    }
}

/// Turn an explicit IPv4 mask literal into a 128-bit mask.
///
/// A value with its low bit set and high bit clear is a Cisco host-mask and
/// is complemented first. The result may still be invalid; check it with
/// [`prefix_length`].
pub fn v4_mask_literal(value: u32) -> WideAddress {
    let value = if value & 1 == 1 && value >> 31 == 0 {
        !value
    } else {
        value
    };
    WideAddress::from_parts(u64::MAX, 0xffff_ffff_0000_0000 | value as u64)
}

/// Turn an explicit IPv6 mask literal into a mask, complementing host-masks.
pub fn v6_mask_literal(value: WideAddress) -> WideAddress {
    let low_set = value & WideAddress::ONE == WideAddress::ONE;
    let high_clear = value & prefix_mask(1) == WideAddress::ZERO;
    if low_set && high_clear {
        !value
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_from_v4_mapping() {
        let wide = from_v4(Ipv4Addr::new(192, 168, 1, 2));
        assert_eq!(
            to_v6(wide),
            Ipv6Addr::from_str("::ffff:192.168.1.2").unwrap()
        );
        assert_eq!(to_v4(wide).unwrap(), Ipv4Addr::new(192, 168, 1, 2));
    }

    #[test]
    fn test_to_v4_outside_mapped_range() {
        let wide = from_v6(Ipv6Addr::from_str("2001:db8::1").unwrap());
        assert!(matches!(to_v4(wide), Err(NetmaskError::Invariant(_))));
    }

    #[test]
    fn test_is_v4_mapped() {
        let net = from_v4(Ipv4Addr::new(10, 0, 0, 0));
        assert!(is_v4_mapped(net, prefix_mask(104)));
        assert!(is_v4_mapped(V4_MAPPED_PREFIX, prefix_mask(96)));
        assert!(
            !is_v4_mapped(WideAddress::ZERO, prefix_mask(95)),
            "wider than the mapped /96"
        );
        let v6 = from_v6(Ipv6Addr::from_str("2001:db8::").unwrap());
        assert!(!is_v4_mapped(v6, prefix_mask(128)));
    }

    #[test]
    fn test_prefix_mask() {
        assert_eq!(prefix_mask(0), WideAddress::ZERO);
        assert_eq!(prefix_mask(128), WideAddress::MAX);
        assert_eq!(prefix_mask(200), WideAddress::MAX);
        assert_eq!(prefix_mask(64), WideAddress::from_parts(u64::MAX, 0));
        assert_eq!(
            prefix_mask(120),
            WideAddress::from_parts(u64::MAX, 0xffff_ffff_ffff_ff00)
        );
    }

    #[test]
    fn test_prefix_length_round_trip_all_lengths() {
        for len in 0..=128u32 {
            assert_eq!(prefix_length(prefix_mask(len)), Some(len as u8));
        }
    }

    #[test]
    fn test_prefix_length_rejects_holes() {
        assert_eq!(prefix_length(WideAddress::ONE), None);
        assert_eq!(prefix_length(WideAddress::from_parts(u64::MAX, 1)), None);
    }

    #[test]
    fn test_v4_mask_literal() {
        // 255.255.255.0
        assert_eq!(prefix_length(v4_mask_literal(0xffff_ff00)), Some(120));
        // 0.0.0.255 is the wildcard form of 255.255.255.0
        assert_eq!(prefix_length(v4_mask_literal(0x0000_00ff)), Some(120));
        assert_eq!(prefix_length(v4_mask_literal(0)), Some(96));
        assert_eq!(prefix_length(v4_mask_literal(u32::MAX)), Some(128));
        // 255.0.255.0 has a hole
        assert_eq!(prefix_length(v4_mask_literal(0xff00_ff00)), None);
    }

    #[test]
    fn test_v6_mask_literal() {
        let host_mask = from_v6(Ipv6Addr::from_str("::ffff").unwrap());
        assert_eq!(prefix_length(v6_mask_literal(host_mask)), Some(112));
        let net_mask = from_v6(Ipv6Addr::from_str("ffff:ffff::").unwrap());
        assert_eq!(prefix_length(v6_mask_literal(net_mask)), Some(32));
    }
}
