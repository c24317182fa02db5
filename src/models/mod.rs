//! Address data model.
//!
//! - [`WideAddress`] - 128-bit address/mask arithmetic
//! - [`codec`] - IPv4/IPv6 conversions and prefix masks
//! - [`Block`] - one aligned CIDR block
//! - [`AddressSet`] - canonical ordered set of blocks

mod address_set;
mod block;
pub mod codec;
mod wide;

// Re-export public types
pub use address_set::AddressSet;
pub use block::{Block, Family};
pub use codec::{
    from_v4, from_v6, is_v4_mapped, prefix_length, prefix_mask, to_v4, to_v6, MAX_LENGTH,
    V4_MAPPED_LENGTH, V4_MAPPED_PREFIX,
};
pub use wide::WideAddress;
