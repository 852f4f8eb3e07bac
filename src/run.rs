//! One complete run: read, build, write, show

use std::fs::File;
use std::path::PathBuf;

use serde::Serialize;

use crate::error::{BoxduError, Result};
use crate::metrics::Timings;
use crate::output::{WriteSummary, write_ncdu};
use crate::pipeline::{BuildStats, build_forest};
use crate::progress::Progress;
use crate::source::{ListingSource, Visualizer, temp_document};
use crate::tree::{BuilderConfig, Forest};

/// Where the finished document goes.
#[derive(Debug, Clone)]
pub enum Destination {
    File(PathBuf),
    /// Write a temporary file and open it with this viewer binary.
    Visualizer(String),
}

/// Everything a run needs, assembled from the command line.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub source: ListingSource,
    pub destination: Destination,
    pub builder: BuilderConfig,
    pub show_progress: bool,
}

/// What a run did.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub build: BuildStats,
    pub written: WriteSummary,
}

/// Build the forest from the configured source, then write it out.
///
/// The destination is only touched once the whole listing has been read,
/// so a bad listing never creates or truncates an output file.
pub fn run(config: &RunConfig, timings: &mut Timings) -> Result<RunReport> {
    let mut progress = Progress::new(config.show_progress);
    let (forest, build) = timings.time("read+build", || -> Result<(Forest, BuildStats)> {
        let mut listing = config.source.open()?;
        let built = build_forest(listing.reader(), config.builder.clone(), &mut progress)?;
        listing.finish()?;
        Ok(built)
    })?;
    progress.finish();

    tracing::info!(
        "read {} lines: {} entries, {} stored, {} empty, {} conflicts, {} duplicates",
        build.lines,
        build.entries,
        build.stored,
        build.zero_size,
        build.conflicts,
        build.duplicates
    );
    if build.removal_flagged > 0 {
        tracing::info!("{} entries are marked for removal", build.removal_flagged);
    }
    if build.undecodable > 0 {
        tracing::info!("{} lines had undecodable names", build.undecodable);
    }
    log_json("build stats", &build);

    let written = match &config.destination {
        Destination::File(path) => {
            let file = File::create(path).map_err(|source| BoxduError::Open {
                path: path.clone(),
                source,
            })?;
            timings.time("serialize", || write_ncdu(file, forest))?
        }
        Destination::Visualizer(program) => {
            let mut document = temp_document()?;
            let written = timings.time("serialize", || write_ncdu(document.as_file_mut(), forest))?;
            timings.time("visualize", || Visualizer::new(program).show(document.path()))?;
            written
        }
    };

    log_json("write summary", &written);
    Ok(RunReport { build, written })
}

/// Log `value` as one line of JSON at debug level.
fn log_json<T: Serialize>(label: &str, value: &T) {
    if !tracing::enabled!(tracing::Level::DEBUG) {
        return;
    }
    match serde_json::to_string(value) {
        Ok(json) => tracing::debug!("{}: {}", label, json),
        Err(e) => tracing::debug!("{}: not serializable: {}", label, e),
    }
}
