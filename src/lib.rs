//! boxdu - Box Backup store usage by file status, as an ncdu export

pub mod error;
pub mod flags;
pub mod listing;
pub mod metrics;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod run;
pub mod source;
pub mod string_utils;
pub mod tree;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use error::{BoxduError, Result};
pub use flags::{Bucket, classify};
pub use listing::{Entry, ListingReader};
pub use metrics::Timings;
pub use output::{NcduWriter, WriteSummary, write_ncdu};
pub use pipeline::{BuildStats, build_forest};
pub use progress::Progress;
pub use run::{Destination, RunConfig, RunReport, run};
pub use source::{ListingSource, Visualizer};
pub use tree::{BLOCK_SIZE, BuilderConfig, Forest, InsertOutcome};
