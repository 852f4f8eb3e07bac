//! Test utilities for writing listings.
//!
//! This module is only compiled for tests and benchmarks.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::listing::preamble;

/// Builds the text of a query tool listing, banner included.
#[derive(Debug, Clone)]
pub struct Listing {
    text: String,
    next_id: u64,
}

impl Listing {
    pub fn new() -> Self {
        Self {
            text: preamble::sample().to_string(),
            next_id: 1,
        }
    }

    /// Listing text without the banner.
    pub fn without_banner() -> Self {
        Self {
            text: String::new(),
            next_id: 1,
        }
    }

    /// Append an entry with the next object id.
    pub fn entry(mut self, flags: &str, size: u64, path: &str) -> Self {
        let _ = writeln!(self.text, "{:08x} {} {:05} {}", self.next_id, flags, size, path);
        self.next_id += 1;
        self
    }

    /// Append a raw line.
    pub fn line(mut self, line: &str) -> Self {
        self.text.push_str(line);
        self.text.push('\n');
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Default for Listing {
    fn default() -> Self {
        Self::new()
    }
}

/// A listing spread over `dirs` directories of `files` files each, in
/// directory order, with some old versions and deletions mixed in.
pub fn synthetic_listing(dirs: usize, files: usize) -> Listing {
    let mut listing = Listing::new();
    for d in 0..dirs {
        let dir = format!("home/user{}/project{}/src", d % 7, d);
        for f in 0..files {
            let path = format!("{}/file{}.rs", dir, f);
            listing = listing.entry("f", (f as u64 % 13) + 1, &path);
            if f % 5 == 0 {
                listing = listing.entry("fo", 1, &path);
            }
            if f % 11 == 0 {
                listing = listing.entry("fX", 2, &format!("{}/removed{}.rs", dir, f));
            }
        }
    }
    listing
}

/// A temporary directory holding listing files.
pub struct TestDir {
    dir: TempDir,
}

impl TestDir {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `listing` under `name` and return its path.
    pub fn add_listing(&self, name: &str, listing: &Listing) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, listing.text()).expect("Failed to write listing");
        path
    }
}

impl Default for TestDir {
    fn default() -> Self {
        Self::new()
    }
}
