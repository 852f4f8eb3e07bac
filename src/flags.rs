//! Status flag classification
//!
//! Every listing entry carries a short flag string such as `f`, `fo` or
//! `fX-a`. Each character is an independent attribute; the bucket an entry
//! lands in is decided by a fixed priority so flag order never matters.

use std::fmt;

use serde::Serialize;

/// Entry has been deleted on the client.
pub const FLAG_DELETED: char = 'X';
/// Entry has attributes that make its status ambiguous.
pub const FLAG_UNCLEAR: char = 'a';
/// Entry is a superseded older version.
pub const FLAG_OLD: char = 'o';
/// Entry is eligible for removal by the server. Informational only.
pub const FLAG_REMOVE_ASAP: char = 'R';

/// One of the four top-level categories of the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    Current,
    Deleted,
    Unclear,
    Old,
}

impl Bucket {
    /// All buckets in output order.
    pub const ALL: [Bucket; 4] = [
        Bucket::Current,
        Bucket::Deleted,
        Bucket::Unclear,
        Bucket::Old,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Bucket::Current => "current",
            Bucket::Deleted => "deleted",
            Bucket::Unclear => "unclear",
            Bucket::Old => "old",
        }
    }

    /// Position of this bucket in [`Bucket::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Pick the bucket for a flag string.
///
/// `X` wins over `a`, which wins over `o`; anything else is `current`.
pub fn classify(flags: &str) -> Bucket {
    if flags.contains(FLAG_DELETED) {
        Bucket::Deleted
    } else if flags.contains(FLAG_UNCLEAR) {
        Bucket::Unclear
    } else if flags.contains(FLAG_OLD) {
        Bucket::Old
    } else {
        Bucket::Current
    }
}

/// True when the server has marked the entry for removal.
pub fn is_marked_for_removal(flags: &str) -> bool {
    flags.contains(FLAG_REMOVE_ASAP)
}
