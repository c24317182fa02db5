//! One aligned CIDR block in the shared 128-bit address space.

use super::codec::{self, V4_MAPPED_LENGTH};
use super::WideAddress;
use crate::error::NetmaskError;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

/// Address family hint carried by a block.
///
/// The tag only records how an address was written. Whether a block is
/// displayed as IPv4 is decided by [`Block::is_v4`].
#[derive(Eq, PartialEq, Debug, Copy, Clone, Hash, Serialize, Deserialize)]
pub enum Family {
    V4,
    V6,
}

/// An aligned network: `network & mask == network`, `mask` a prefix mask.
#[derive(Eq, PartialEq, Debug, Copy, Clone, Hash)]
pub struct Block {
    pub network: WideAddress,
    pub mask: WideAddress,
    pub family: Family,
}

impl Block {
    /// Create a block, aligning `network` down to `mask`.
    pub fn new(
        network: WideAddress,
        mask: WideAddress,
        family: Family,
    ) -> Result<Block, NetmaskError> {
        if codec::prefix_length(mask).is_none() {
            return Err(NetmaskError::Parse(format!("{:?} is not a prefix mask", mask)));
        }
        Ok(Block {
            network: network & mask,
            mask,
            family,
        })
    }

    /// A single-address block.
    pub fn host(addr: WideAddress, family: Family) -> Block {
        Block {
            network: addr,
            mask: WideAddress::MAX,
            family,
        }
    }

    pub fn from_v4(addr: Ipv4Addr) -> Block {
        Block::host(codec::from_v4(addr), Family::V4)
    }

    pub fn from_v6(addr: Ipv6Addr) -> Block {
        Block::host(codec::from_v6(addr), Family::V6)
    }

    pub fn from_ip(addr: IpAddr) -> Block {
        match addr {
            IpAddr::V4(v4) => Block::from_v4(v4),
            IpAddr::V6(v6) => Block::from_v6(v6),
        }
    }

    /// Prefix length in the 128-bit space.
    pub fn prefix_length(&self) -> u8 {
        self.mask.value().leading_ones() as u8
    }

    /// Prefix length as written for the display family (IPv4 drops 96).
    pub fn display_prefix_length(&self) -> u8 {
        if self.is_v4() {
            self.prefix_length() - V4_MAPPED_LENGTH
        } else {
            self.prefix_length()
        }
    }

    /// Last address in the block.
    pub fn broadcast(&self) -> WideAddress {
        self.network | !self.mask
    }

    pub fn contains(&self, addr: WideAddress) -> bool {
        addr & self.mask == self.network
    }

    /// True when every address of `self` is inside `other`.
    pub fn is_subset_of(&self, other: &Block) -> bool {
        self.mask >= other.mask && other.network == self.network & other.mask
    }

    /// True when `self` and `other` are the two halves of one parent block.
    pub fn is_joinable_with(&self, other: &Block) -> bool {
        self.mask == other.mask
            && self.network != other.network
            && (self.network ^ other.network) & self.mask.shl1() == WideAddress::ZERO
    }

    /// True when the block lies inside `::ffff:0:0/96`, whatever its tag says.
    pub fn is_v4(&self) -> bool {
        codec::is_v4_mapped(self.network, self.mask)
    }

    /// Family used for display, recomputed from the value.
    pub fn display_family(&self) -> Family {
        if self.is_v4() {
            Family::V4
        } else {
            Family::V6
        }
    }

    /// Network and mask as wire addresses of the display family.
    pub fn to_ip_pair(&self) -> Result<(IpAddr, IpAddr), NetmaskError> {
        if self.is_v4() {
            let network = codec::to_v4(self.network)?;
            let mask = Ipv4Addr::from(self.mask.low32());
            Ok((IpAddr::V4(network), IpAddr::V4(mask)))
        } else {
            Ok((
                IpAddr::V6(codec::to_v6(self.network)),
                IpAddr::V6(codec::to_v6(self.mask)),
            ))
        }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let len = self.display_prefix_length();
        match self.to_ip_pair() {
            Ok((network, _)) => write!(f, "{}/{}", network, len),
            Err(_) => write!(f, "{}/{}", codec::to_v6(self.network), self.prefix_length()),
        }
    }
}

/// Parse a single CIDR block such as `10.0.0.0/8` without name lookups.
impl FromStr for Block {
    type Err = NetmaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let set = crate::processing::parse_spec(s, None)?;
        match set.blocks() {
            [block] => Ok(*block),
            _ => Err(NetmaskError::Parse(s.to_string())),
        }
    }
}

impl Serialize for Block {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Block {
    fn deserialize<D>(deserializer: D) -> Result<Block, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Block::from_str(&s).map_err(|e| de::Error::custom(format!("invalid CIDR block: {e}")))
    }
}
