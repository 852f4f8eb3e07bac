//! Directory trees built from a flat listing
//!
//! Entries are sorted into four independent trees, one per [`Bucket`], held
//! in a single [`Forest`]:
//!
//! - `node` - arena directory and child types
//! - `cache` - last-parent cache that skips re-walking shared prefixes
//! - `forest` - insertion and inspection
//!
//! [`Bucket`]: crate::flags::Bucket

mod cache;
mod config;
mod forest;
mod node;

pub use config::BuilderConfig;
pub use forest::{BLOCK_SIZE, Forest, InsertOutcome, ROOT_NAME};
pub use node::{Node, NodeId};
