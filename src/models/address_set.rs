//! Canonical, sorted, fully coalesced sets of [`Block`]s.

use super::{Block, Family, WideAddress};
use crate::error::NetmaskError;
use crate::processing;
use serde::Serialize;
use std::fmt;
use std::net::IpAddr;

/// Ordered, non-overlapping blocks with no joinable neighbours.
///
/// Only [`processing::merge`] and the range decomposer build non-trivial
/// sets, so the invariants hold for every value handed out.
#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct AddressSet {
    blocks: Vec<Block>,
}

impl AddressSet {
    pub fn new() -> AddressSet {
        AddressSet { blocks: Vec::new() }
    }

    pub fn from_block(block: Block) -> AddressSet {
        AddressSet {
            blocks: vec![block],
        }
    }

    /// Wrap blocks that are already canonical, e.g. decomposer output.
    pub(crate) fn from_canonical(blocks: Vec<Block>) -> AddressSet {
        AddressSet { blocks }
    }

    pub(crate) fn into_blocks(self) -> Vec<Block> {
        self.blocks
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Merge `other` into this set, consuming both.
    pub fn merge(self, other: AddressSet) -> AddressSet {
        processing::merge(self, other)
    }

    /// Merge a single block into this set.
    pub fn insert(self, block: Block) -> AddressSet {
        processing::merge(self, AddressSet::from_block(block))
    }

    /// True when some block covers `addr`.
    pub fn contains(&self, addr: WideAddress) -> bool {
        self.blocks.iter().any(|b| b.contains(addr))
    }

    /// Call `visitor(family, network, mask)` for each block in ascending order.
    ///
    /// The family and the address types come from [`Block::is_v4`], not from
    /// the stored tag.
    pub fn walk<F>(&self, mut visitor: F) -> Result<(), NetmaskError>
    where
        F: FnMut(Family, IpAddr, IpAddr),
    {
        for block in &self.blocks {
            let (network, mask) = block.to_ip_pair()?;
            visitor(block.display_family(), network, mask);
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a AddressSet {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}

impl FromIterator<Block> for AddressSet {
    fn from_iter<I: IntoIterator<Item = Block>>(iter: I) -> Self {
        iter.into_iter().fold(AddressSet::new(), AddressSet::insert)
    }
}

impl fmt::Display for AddressSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for block in &self.blocks {
            writeln!(f, "{block}")?;
        }
        Ok(())
    }
}
