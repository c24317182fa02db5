//! 128-bit unsigned arithmetic for addresses and masks.
//!
//! Every address handled by the crate, IPv4 included, is a [`WideAddress`].
//! Values are big-endian: bit 127 is the first bit on the wire.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitXor, Not};

/// A 128-bit unsigned address or mask value.
#[derive(Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Hash, Default)]
pub struct WideAddress(u128);

impl WideAddress {
    /// All bits clear.
    pub const ZERO: WideAddress = WideAddress(0);
    /// The value one.
    pub const ONE: WideAddress = WideAddress(1);
    /// All bits set.
    pub const MAX: WideAddress = WideAddress(u128::MAX);

    pub const fn new(value: u128) -> WideAddress {
        WideAddress(value)
    }

    /// Build from the high and low 64-bit halves.
    pub const fn from_parts(high: u64, low: u64) -> WideAddress {
        WideAddress((high as u128) << 64 | low as u128)
    }

    pub const fn value(self) -> u128 {
        self.0
    }

    /// Add two values, returning the sum and whether a carry left bit 127.
    ///
    /// Callers must inspect the carry; the sum alone wraps.
    pub fn add(self, other: WideAddress) -> (WideAddress, bool) {
        let (sum, carry) = self.0.overflowing_add(other.0);
        (WideAddress(sum), carry)
    }

    /// Shift left by one bit; the top bit is lost.
    pub fn shl1(self) -> WideAddress {
        WideAddress(self.0 << 1)
    }

    /// Low 32 bits, used for IPv4 rendering and IPv4 offsets.
    pub fn low32(self) -> u32 {
        self.0 as u32
    }

    pub fn to_be_bytes(self) -> [u8; 16] {
        self.0.to_be_bytes()
    }
}

impl BitAnd for WideAddress {
    type Output = WideAddress;
    fn bitand(self, rhs: WideAddress) -> WideAddress {
        WideAddress(self.0 & rhs.0)
    }
}

impl BitOr for WideAddress {
    type Output = WideAddress;
    fn bitor(self, rhs: WideAddress) -> WideAddress {
        WideAddress(self.0 | rhs.0)
    }
}

impl BitXor for WideAddress {
    type Output = WideAddress;
    fn bitxor(self, rhs: WideAddress) -> WideAddress {
        WideAddress(self.0 ^ rhs.0)
    }
}

impl Not for WideAddress {
    type Output = WideAddress;
    fn not(self) -> WideAddress {
        WideAddress(!self.0)
    }
}

impl From<u128> for WideAddress {
    fn from(value: u128) -> Self {
        WideAddress(value)
    }
}

// Trace lines print the two halves the way a packet dump would.
impl fmt::Debug for WideAddress {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:016x} {:016x}", (self.0 >> 64) as u64, self.0 as u64)
    }
}
