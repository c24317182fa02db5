//! Address netmask generation.
//!
//! Spec tokens (addresses, CIDR blocks, ranges, hostnames) are parsed into
//! [`models::AddressSet`]s and merged into one canonical, fully coalesced
//! set of CIDR blocks, ready to be printed in one of several styles.
//!
//! ```
//! use netmask::collect_specs;
//!
//! let set = collect_specs(["10.0.0.1:10.0.0.4"], None);
//! let blocks: Vec<String> = set.iter().map(|b| b.to_string()).collect();
//! assert_eq!(blocks, vec!["10.0.0.1/32", "10.0.0.2/31", "10.0.0.4/32"]);
//! ```

pub mod cli;
pub mod diagnostics;
pub mod error;
pub mod models;
pub mod output;
pub mod processing;

use models::AddressSet;
use processing::{parse_spec, Resolver};

pub use error::NetmaskError;

/// Parse every token and merge the results into one set.
///
/// Tokens that fail to parse are reported as warnings and contribute
/// nothing; the remaining tokens are still merged.
pub fn collect_specs<'a, I>(tokens: I, resolver: Option<&dyn Resolver>) -> AddressSet
where
    I: IntoIterator<Item = &'a str>,
{
    let mut set = AddressSet::new();
    for token in tokens {
        match parse_spec(token, resolver) {
            Ok(parsed) => {
                log::debug!("{token} -> {} block(s)", parsed.len());
                set = set.merge(parsed);
            }
            Err(e) => diagnostics::report(&e),
        }
    }
    set
}
