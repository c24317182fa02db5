//! Integration tests for netmask
//!
//! These tests drive the whole pipeline from spec tokens to rendered output
//! and check the set laws on random input.

use netmask::collect_specs;
use netmask::models::{
    from_v4, prefix_length, prefix_mask, AddressSet, Block, Family, WideAddress,
};
use netmask::output::{render, OutputStyle};
use netmask::processing::{decompose_range, merge, parse_spec, StaticResolver};
use quickcheck_macros::quickcheck;
use std::net::{IpAddr, Ipv4Addr};

fn cidrs(set: &AddressSet) -> Vec<String> {
    set.iter().map(|b| b.to_string()).collect()
}

fn v4_set(items: &[(u32, u8)]) -> AddressSet {
    items
        .iter()
        .map(|&(addr, len)| {
            Block::new(
                from_v4(Ipv4Addr::from(addr)),
                prefix_mask(96 + (len % 33) as u32),
                Family::V4,
            )
            .expect("prefix masks are always valid")
        })
        .collect()
}

fn v6_set(items: &[(u64, u8)]) -> AddressSet {
    items
        .iter()
        .map(|&(high, len)| {
            Block::new(
                WideAddress::from_parts(high, 0),
                prefix_mask((len % 129) as u32),
                Family::V6,
            )
            .expect("prefix masks are always valid")
        })
        .collect()
}

/// Alignment, mask validity, ordering, no overlap and no joinable neighbours.
fn is_canonical(set: &AddressSet) -> bool {
    let blocks = set.blocks();
    let each_ok = blocks
        .iter()
        .all(|b| b.network & b.mask == b.network && prefix_length(b.mask).is_some());
    let pairs_ok = blocks.windows(2).all(|w| {
        w[0].network < w[1].network
            && w[0].broadcast() < w[1].network
            && !w[0].is_joinable_with(&w[1])
    });
    each_ok && pairs_ok
}

/// Addresses at and around every block edge in the given sets.
fn probe_points(sets: &[&AddressSet]) -> Vec<WideAddress> {
    let mut points = Vec::new();
    for set in sets {
        for block in set.iter() {
            points.push(block.network);
            points.push(block.broadcast());
            points.push(block.network.add(WideAddress::MAX).0);
            points.push(block.broadcast().add(WideAddress::ONE).0);
        }
    }
    points
}

#[test]
fn test_scenario_single_cidr() {
    let set = collect_specs(["192.168.0.0/24"], None);
    assert_eq!(set.len(), 1);
    assert_eq!(set.blocks()[0].network, from_v4(Ipv4Addr::new(192, 168, 0, 0)));
    assert_eq!(set.blocks()[0].display_prefix_length(), 24);
}

#[test]
fn test_scenario_coalesce_v4() {
    let set = collect_specs(["192.168.0.0/23", "192.168.1.0/24"], None);
    assert_eq!(cidrs(&set), vec!["192.168.0.0/23"]);
}

#[test]
fn test_scenario_range() {
    let set = collect_specs(["10.0.0.1:10.0.0.4"], None);
    assert_eq!(cidrs(&set), vec!["10.0.0.1/32", "10.0.0.2/31", "10.0.0.4/32"]);
}

#[test]
fn test_scenario_coalesce_v6() {
    let set = collect_specs(["2001:db8::/33", "2001:db8:8000::/33"], None);
    assert_eq!(cidrs(&set), vec!["2001:db8::/32"]);
}

#[test]
fn test_scenario_absorb() {
    let set = collect_specs(["10.0.0.0/24", "10.0.0.128/25"], None);
    assert_eq!(cidrs(&set), vec!["10.0.0.0/24"]);
}

#[test]
fn test_scenario_mapped_v6_is_v4() {
    let set = collect_specs(["::ffff:10.0.0.0/120"], None);
    assert!(set.blocks()[0].is_v4());
    let mut seen = Vec::new();
    set.walk(|family, network, _| seen.push((family, network)))
        .unwrap();
    assert_eq!(
        seen,
        vec![(Family::V4, IpAddr::V4(Ipv4Addr::new(10, 0, 0, 0)))]
    );
    assert_eq!(
        render(&set, OutputStyle::Cidr).unwrap(),
        vec!["       10.0.0.0/24"]
    );
}

#[test]
fn test_mixed_batch_with_failures() {
    let resolver = StaticResolver::new().with_host(
        "host.example",
        vec![IpAddr::V4(Ipv4Addr::new(10, 0, 0, 5))],
    );
    let set = collect_specs(
        [
            "10.0.0.0/30",
            "nowhere.example",
            "255.255.255.255:+1",
            "10.0.0.0/40",
            "host.example",
            "10.0.0.4",
            "10.0.0.6,10.0.0.7",
            "2001:db8::1",
        ],
        Some(&resolver),
    );
    assert_eq!(cidrs(&set), vec!["10.0.0.0/29", "2001:db8::1/128"]);
    assert!(is_canonical(&set));
}

#[test]
fn test_rendered_range_output() {
    let set = collect_specs(["10.0.0.0/24", "10.0.1.0/25"], None);
    assert_eq!(
        render(&set, OutputStyle::Range).unwrap(),
        vec![
            "       10.0.0.0-10.0.0.255      (256)",
            "       10.0.1.0-10.0.1.127      (128)",
        ]
    );
}

#[test]
fn test_parse_spec_errors_do_not_leak_blocks() {
    assert!(parse_spec("10.0.0.1:10.0.0.x", None).is_err());
    let set = collect_specs(["10.0.0.1:10.0.0.x"], None);
    assert!(set.is_empty());
}

#[quickcheck]
fn prop_merge_is_canonical(a: Vec<(u32, u8)>, b: Vec<(u64, u8)>) -> bool {
    let set = merge(v4_set(&a), v6_set(&b));
    is_canonical(&set)
}

#[quickcheck]
fn prop_merge_identity(a: Vec<(u32, u8)>) -> bool {
    let set = v4_set(&a);
    merge(set.clone(), AddressSet::new()) == set && merge(AddressSet::new(), set.clone()) == set
}

#[quickcheck]
fn prop_merge_idempotent(a: Vec<(u32, u8)>) -> bool {
    let set = v4_set(&a);
    merge(set.clone(), set.clone()) == set
}

#[quickcheck]
fn prop_merge_covers_union(a: Vec<(u32, u8)>, b: Vec<(u32, u8)>) -> bool {
    let left = v4_set(&a);
    let right = v4_set(&b);
    let merged = merge(left.clone(), right.clone());
    probe_points(&[&left, &right, &merged])
        .into_iter()
        .all(|p| merged.contains(p) == (left.contains(p) || right.contains(p)))
}

#[quickcheck]
fn prop_range_covers_interval(a: u32, b: u32) -> bool {
    let low = from_v4(Ipv4Addr::from(a.min(b)));
    let high = from_v4(Ipv4Addr::from(a.max(b)));
    let set = decompose_range(from_v4(Ipv4Addr::from(a)), from_v4(Ipv4Addr::from(b)));
    let blocks = set.blocks();
    is_canonical(&set)
        && blocks.first().map(|f| f.network) == Some(low)
        && blocks.last().map(|l| l.broadcast()) == Some(high)
        && blocks
            .windows(2)
            .all(|w| w[0].broadcast().add(WideAddress::ONE).0 == w[1].network)
}

#[test]
fn test_prefix_mask_round_trip() {
    for n in 0..=128u32 {
        assert_eq!(prefix_length(prefix_mask(n)), Some(n as u8));
    }
}
