//! Set-merge engine.
//!
//! Inserts blocks into a canonical [`AddressSet`], absorbing subsets and
//! coalescing sibling halves into their parent block.

use crate::models::{AddressSet, Block, Family};

/// Merge `src` into `dst`, consuming both and returning the canonical union.
///
/// Each block of `src` is scanned against `dst` from the lowest network up:
/// 1. end of `dst`: append
/// 2. block inside the current entry: drop it
/// 3. current entry inside the block: remove the entry, keep scanning
/// 4. block and entry are sibling halves: remove the entry, widen the block
///    one bit and rescan `dst` from the start
/// 5. block sorts before the entry: insert it there
///
/// Every coalescing step shrinks `dst` and every finished block shrinks
/// `src`, so the loop terminates. Cost is `O(n^2)` in block count.
pub fn merge(dst: AddressSet, src: AddressSet) -> AddressSet {
    let mut dst = dst.into_blocks();

    'blocks: for mut s in src.into_blocks() {
        let mut pos = 0;
        loop {
            let Some(cur) = dst.get(pos).copied() else {
                dst.push(s);
                continue 'blocks;
            };

            if s.is_subset_of(&cur) {
                log::trace!(
                    "found {:?}/{} a subset of {:?}/{}",
                    s.network,
                    s.prefix_length(),
                    cur.network,
                    cur.prefix_length()
                );
                if s.family != Family::V4 {
                    dst[pos].family = s.family;
                }
                continue 'blocks;
            }

            if cur.is_subset_of(&s) {
                dst.remove(pos);
                continue;
            }

            if s.is_joinable_with(&cur) {
                log::trace!(
                    "joinable {:?}/{} and {:?}/{}",
                    s.network,
                    s.prefix_length(),
                    cur.network,
                    cur.prefix_length()
                );
                dst.remove(pos);
                s = widen(s, cur);
                pos = 0;
                continue;
            }

            if s.network < cur.network {
                dst.insert(pos, s);
                continue 'blocks;
            }

            pos += 1;
        }
    }

    AddressSet::from_canonical(dst)
}

/// Parent block of the sibling pair `s` and `cur`.
fn widen(s: Block, cur: Block) -> Block {
    let family = if s.family == Family::V4 {
        cur.family
    } else {
        s.family
    };
    let mask = s.mask.shl1();
    Block {
        network: s.network & mask,
        mask,
        family,
    }
}
