//! Address set processing.
//!
//! - [`merge`] - merging blocks into a canonical set
//! - [`range`] - decomposing an address range into blocks
//! - [`spec_parser`] - turning spec tokens into sets
//! - [`resolve`] - hostname lookups

mod merge;
mod range;
mod resolve;
mod spec_parser;

// Re-export public functions
pub use merge::merge;
pub use range::decompose_range;
pub use resolve::{Resolver, StaticResolver, SystemResolver};
pub use spec_parser::parse_spec;
