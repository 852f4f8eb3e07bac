//! Error types for boxdu
//!
//! Only fatal conditions are errors. Structural conflicts in the listing are
//! reported through [`crate::tree::InsertOutcome`] and never abort a run.

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

#[derive(Debug, thiserror::Error)]
pub enum BoxduError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("cannot open '{}': {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("line {line}: expected {expected}, found {found:?}")]
    Preamble {
        line: usize,
        expected: &'static str,
        found: String,
    },

    #[error("line {line}: listing ended inside the preamble")]
    TruncatedPreamble { line: usize },

    #[error("cannot run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("'{program}' exited with {status}")]
    ChildFailed { program: String, status: ExitStatus },
}

pub type Result<T> = std::result::Result<T, BoxduError>;
