//! Range to CIDR decomposition.
//!
//! Converts an address interval into the shortest ascending list of aligned
//! blocks covering exactly that interval.

use crate::models::{codec, AddressSet, Block, Family, WideAddress};

/// Decompose `[a, b]` (either order) into canonical blocks.
///
/// The blocks are tagged [`Family::V4`] only when both endpoints are
/// IPv4-mapped.
pub fn decompose_range(a: WideAddress, b: WideAddress) -> AddressSet {
    let (low, high) = if a <= b { (a, b) } else { (b, a) };
    let family = if is_mapped(low) && is_mapped(high) {
        Family::V4
    } else {
        Family::V6
    };

    let mut blocks = Vec::new();
    let mut cursor = low;
    loop {
        let (block, top) = widest_block_at(cursor, high, family);
        blocks.push(block);
        if top >= high {
            break;
        }
        // top < high, so this cannot carry
        cursor = top.add(WideAddress::ONE).0;
    }
    AddressSet::from_canonical(blocks)
}

/// Largest aligned block starting at `start` that ends at or before `high`.
///
/// Returns the block and its last address.
fn widest_block_at(start: WideAddress, high: WideAddress, family: Family) -> (Block, WideAddress) {
    let mut mask = WideAddress::MAX;
    let mut top = start;
    while top < high {
        let wider = mask.shl1();
        let network = start & wider;
        let broadcast = start | !wider;
        if network < start || broadcast > high {
            break;
        }
        mask = wider;
        top = broadcast;
        log::trace!("widen {:?}/{}", start, mask.value().leading_ones());
    }
    let block = Block {
        network: start,
        mask,
        family,
    };
    (block, top)
}

fn is_mapped(addr: WideAddress) -> bool {
    codec::is_v4_mapped(addr, WideAddress::MAX)
}
