//! Reading the query tool's listing
//!
//! - `preamble` - the fixed banner that precedes entries
//! - `reader` - line-numbered reader that validates the banner
//! - `entry` - parsing of a single entry line

mod entry;
pub mod preamble;
mod reader;

pub use entry::Entry;
pub use reader::ListingReader;
