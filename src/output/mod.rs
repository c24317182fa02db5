//! Output formatting for address sets.
//!
//! - [`style`] - one formatter per output style
//! - [`terminal`] - column padding helpers

mod style;
mod terminal;

pub use style::{format_block, render, OutputStyle};
pub use terminal::{format_field, Align};
