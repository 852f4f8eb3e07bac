//! Parsing of a single listing line

use crate::flags::{self, Bucket};

/// One entry line of a recursive listing: `<id> <flags> <size> <path>`.
///
/// Borrows from the line it was parsed from; entries are consumed straight
/// into the tree and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry<'a> {
    /// Object id as printed by the query tool (hexadecimal).
    pub id: u64,
    pub flags: &'a str,
    /// Size in server blocks.
    pub size_units: u64,
    /// Path exactly as listed, may contain spaces.
    pub path: &'a str,
}

impl<'a> Entry<'a> {
    /// Split a line into its four fields.
    ///
    /// The path is everything after the third space, verbatim. Returns `None`
    /// when a field is missing or a number does not parse.
    pub fn parse(line: &'a str) -> Option<Self> {
        let mut fields = line.splitn(4, ' ');
        let id = u64::from_str_radix(fields.next()?, 16).ok()?;
        let flags = fields.next()?;
        let size_units = fields.next()?.parse().ok()?;
        let path = fields.next()?;
        if flags.is_empty() || path.is_empty() {
            return None;
        }
        Some(Self {
            id,
            flags,
            size_units,
            path,
        })
    }

    pub fn bucket(&self) -> Bucket {
        flags::classify(self.flags)
    }

    pub fn is_marked_for_removal(&self) -> bool {
        flags::is_marked_for_removal(self.flags)
    }

    /// Path segments, skipping empty ones produced by stray slashes.
    pub fn segments(self) -> impl Iterator<Item = &'a str> {
        self.path.split('/').filter(|s| !s.is_empty())
    }
}
