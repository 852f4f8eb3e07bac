//! External programs: where listings come from and where documents go
//!
//! A listing is read from a file, from stdin, or from the stdout of the
//! Box Backup query tool. Documents are either written to a file or handed
//! to ncdu through a temporary file.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use tempfile::NamedTempFile;

use crate::error::{BoxduError, Result};

/// Commands passed to the query tool: recursive listing of current, deleted
/// and old entries with sizes from the store root, then quit.
pub const QUERY_COMMANDS: [&str; 2] = ["list -rdos /", "quit"];

/// Where the listing is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingSource {
    Stdin,
    File(PathBuf),
    /// Run this query tool binary.
    Query(String),
}

impl ListingSource {
    /// `-` means stdin, no input means running `query_bin`.
    pub fn from_input(input: Option<&Path>, query_bin: &str) -> Self {
        match input {
            Some(path) if path == Path::new("-") => ListingSource::Stdin,
            Some(path) => ListingSource::File(path.to_path_buf()),
            None => ListingSource::Query(query_bin.to_string()),
        }
    }

    pub fn open(&self) -> Result<OpenListing> {
        match self {
            ListingSource::Stdin => Ok(OpenListing {
                reader: Box::new(io::stdin().lock()),
                child: None,
            }),
            ListingSource::File(path) => {
                let file = File::open(path).map_err(|source| BoxduError::Open {
                    path: path.clone(),
                    source,
                })?;
                Ok(OpenListing {
                    reader: Box::new(BufReader::new(file)),
                    child: None,
                })
            }
            ListingSource::Query(program) => {
                tracing::info!("running {} {:?}", program, QUERY_COMMANDS);
                let mut child = Command::new(program)
                    .args(QUERY_COMMANDS)
                    .stdin(Stdio::null())
                    .stdout(Stdio::piped())
                    .spawn()
                    .map_err(|source| BoxduError::Spawn {
                        program: program.clone(),
                        source,
                    })?;
                let stdout = child
                    .stdout
                    .take()
                    .ok_or_else(|| io::Error::other("query tool stdout not captured"))?;
                Ok(OpenListing {
                    reader: Box::new(BufReader::new(stdout)),
                    child: Some((program.clone(), child)),
                })
            }
        }
    }
}

/// An opened listing. A running query tool is killed if this is dropped
/// without [`OpenListing::finish`].
pub struct OpenListing {
    reader: Box<dyn BufRead>,
    child: Option<(String, Child)>,
}

impl OpenListing {
    pub fn reader(&mut self) -> &mut dyn BufRead {
        &mut *self.reader
    }

    /// Wait for the query tool, failing if it did not exit cleanly.
    pub fn finish(mut self) -> Result<()> {
        let Some((program, mut child)) = self.child.take() else {
            return Ok(());
        };
        let status = child.wait()?;
        if status.success() {
            Ok(())
        } else {
            Err(BoxduError::ChildFailed { program, status })
        }
    }
}

impl Drop for OpenListing {
    fn drop(&mut self) {
        if let Some((program, mut child)) = self.child.take() {
            tracing::debug!("stopping {}", program);
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

/// The interactive viewer that opens finished documents.
#[derive(Debug, Clone)]
pub struct Visualizer {
    program: String,
}

impl Visualizer {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Run `<program> -f <document>` and wait for it to exit.
    pub fn show(&self, document: &Path) -> Result<()> {
        tracing::info!("running {} -f {}", self.program, document.display());
        let status = Command::new(&self.program)
            .arg("-f")
            .arg(document)
            .status()
            .map_err(|source| BoxduError::Spawn {
                program: self.program.clone(),
                source,
            })?;
        if status.success() {
            Ok(())
        } else {
            Err(BoxduError::ChildFailed {
                program: self.program.clone(),
                status,
            })
        }
    }
}

/// A temporary file for a document, removed when dropped.
pub fn temp_document() -> Result<NamedTempFile> {
    let file = tempfile::Builder::new()
        .prefix("boxdu-")
        .suffix(".json")
        .tempfile()?;
    Ok(file)
}
