//! Reading a listing into a [`Forest`]

use std::collections::BTreeMap;
use std::io::BufRead;

use serde::Serialize;

use crate::error::Result;
use crate::flags::Bucket;
use crate::listing::{Entry, ListingReader};
use crate::progress::Progress;
use crate::tree::{BuilderConfig, Forest, InsertOutcome};

/// Counters collected while building.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildStats {
    /// Lines read, banner included.
    pub lines: usize,
    /// Lines that parsed as entries.
    pub entries: usize,
    /// Entries whose size is now in the forest.
    pub stored: usize,
    pub zero_size: usize,
    /// Entries colliding with a node of the other kind, or with no path.
    pub conflicts: usize,
    /// Current entries listed twice at the same path.
    pub duplicates: usize,
    /// Entries the server has marked for removal.
    pub removal_flagged: usize,
    /// Non-blank lines that are not entries.
    pub malformed: usize,
    /// Lines whose undecodable bytes were replaced.
    pub undecodable: usize,
    /// Parsed entries per bucket.
    pub by_bucket: BTreeMap<Bucket, usize>,
    /// Bytes stored per bucket once the build is done.
    pub bytes_by_bucket: BTreeMap<Bucket, u64>,
}

impl BuildStats {
    fn record(&mut self, outcome: InsertOutcome) {
        match outcome {
            InsertOutcome::Inserted | InsertOutcome::Accumulated => self.stored += 1,
            InsertOutcome::SkippedEmpty => self.zero_size += 1,
            InsertOutcome::EmptyPath | InsertOutcome::Conflict => self.conflicts += 1,
            InsertOutcome::DuplicateCurrent => self.duplicates += 1,
        }
    }
}

/// Validate the banner of `input`, then insert every entry into a new forest.
///
/// Fails only on I/O errors and banner mismatches; bad entries are counted
/// and skipped. Blank lines are skipped without counting.
pub fn build_forest<R: BufRead>(
    input: R,
    config: BuilderConfig,
    progress: &mut Progress,
) -> Result<(Forest, BuildStats)> {
    let mut reader = ListingReader::open(input)?;
    let mut forest = Forest::new(config);
    let mut stats = BuildStats::default();

    while let Some((line_no, line)) = reader.next_line()? {
        let Some(entry) = Entry::parse(line) else {
            if line.trim().is_empty() {
                continue;
            }
            tracing::warn!("line {}: not a listing entry: {:?}", line_no, line);
            stats.malformed += 1;
            continue;
        };

        let bucket = entry.bucket();
        stats.entries += 1;
        *stats.by_bucket.entry(bucket).or_default() += 1;
        if entry.is_marked_for_removal() {
            stats.removal_flagged += 1;
            tracing::info!("{} is marked for removal on the server", entry.path);
        }

        let segments: Vec<&str> = entry.segments().collect();
        let outcome = forest.insert(bucket, &segments, entry.size_units);
        if outcome == InsertOutcome::EmptyPath {
            tracing::warn!("line {}: entry has an empty path", line_no);
        }
        stats.record(outcome);
        progress.tick();
    }

    stats.lines = reader.lines_read();
    stats.undecodable = reader.lossy_lines();
    for bucket in Bucket::ALL {
        stats.bytes_by_bucket.insert(bucket, forest.total(bucket));
    }
    let (hits, misses) = forest.cache_stats();
    tracing::debug!("path cache: {} hits, {} misses", hits, misses);
    Ok((forest, stats))
}
