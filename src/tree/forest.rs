//! Building the four bucket trees from listing entries

use crate::flags::Bucket;

use super::cache::PathCache;
use super::config::BuilderConfig;
use super::node::{Dir, Node, NodeId};

/// Bytes per size unit reported by the query tool.
pub const BLOCK_SIZE: u64 = 4096;

/// Name of the synthetic directory wrapping the four buckets.
pub const ROOT_NAME: &str = "boxbackup";

const ROOT: NodeId = NodeId(0);

/// What happened to one entry passed to [`Forest::insert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// A new leaf was created.
    Inserted,
    /// Added to an existing leaf of a non-current bucket.
    Accumulated,
    /// Size was zero; nothing changed.
    SkippedEmpty,
    /// The path had no segments.
    EmptyPath,
    /// A path segment is a file where a directory is needed, or the other way round.
    Conflict,
    /// A second current entry at the same path.
    DuplicateCurrent,
}

/// Four bucket trees under one synthetic root.
///
/// Built once from a whole listing, then handed by value to
/// [`crate::output::NcduWriter`], which drains it.
#[derive(Debug)]
pub struct Forest {
    dirs: Vec<Dir>,
    roots: [NodeId; 4],
    caches: [PathCache; 4],
    config: BuilderConfig,
    cache_hits: u64,
    cache_misses: u64,
}

impl Default for Forest {
    fn default() -> Self {
        Self::new(BuilderConfig::default())
    }
}

impl Forest {
    pub fn new(config: BuilderConfig) -> Self {
        let mut forest = Self {
            dirs: vec![Dir::default()],
            roots: [ROOT; 4],
            caches: Default::default(),
            config,
            cache_hits: 0,
            cache_misses: 0,
        };
        for bucket in Bucket::ALL {
            let id = forest.alloc_dir();
            forest.dirs[ROOT.0].insert(bucket.name(), Node::Dir(id));
            forest.roots[bucket.index()] = id;
        }
        forest
    }

    fn alloc_dir(&mut self) -> NodeId {
        self.dirs.push(Dir::default());
        NodeId(self.dirs.len() - 1)
    }

    /// Add `size_units` blocks at `segments` in the tree of `bucket`.
    ///
    /// Missing directories are created on the way. Structural problems skip
    /// this entry only and are reported through the returned outcome.
    pub fn insert(&mut self, bucket: Bucket, segments: &[&str], size_units: u64) -> InsertOutcome {
        if size_units == 0 {
            return InsertOutcome::SkippedEmpty;
        }
        let Some((name, parents)) = segments.split_last() else {
            return InsertOutcome::EmptyPath;
        };
        let Some(parent) = self.resolve_parent(bucket, parents) else {
            tracing::warn!(
                "{}: {} is below a file, skipping",
                bucket,
                segments.join("/")
            );
            return InsertOutcome::Conflict;
        };

        let bytes = size_units.saturating_mul(BLOCK_SIZE);
        let dir = &mut self.dirs[parent.0];
        match dir.get_mut(name) {
            None => {
                dir.insert(name, Node::Leaf(bytes));
                InsertOutcome::Inserted
            }
            Some(Node::Dir(_)) => {
                tracing::warn!(
                    "{}: {} is already a directory, skipping",
                    bucket,
                    segments.join("/")
                );
                InsertOutcome::Conflict
            }
            Some(Node::Leaf(_)) if bucket == Bucket::Current => {
                tracing::warn!(
                    "{}: {} listed twice, skipping",
                    bucket,
                    segments.join("/")
                );
                InsertOutcome::DuplicateCurrent
            }
            Some(Node::Leaf(total)) => {
                *total = total.saturating_add(bytes);
                InsertOutcome::Accumulated
            }
        }
    }

    /// Find or create the directory for `parents`, `None` if a file is in the way.
    fn resolve_parent(&mut self, bucket: Bucket, parents: &[&str]) -> Option<NodeId> {
        let slot = bucket.index();
        if self.config.path_cache {
            if let Some(id) = self.caches[slot].lookup(parents) {
                self.cache_hits += 1;
                return Some(id);
            }
        }
        self.cache_misses += 1;
        tracing::debug!("{}: walking to '{}'", bucket, parents.join("/"));

        let mut current = self.roots[slot];
        for segment in parents {
            current = match self.dirs[current.0].get(segment) {
                Some(Node::Dir(id)) => id,
                Some(Node::Leaf(_)) => return None,
                None => {
                    let id = self.alloc_dir();
                    self.dirs[current.0].insert(segment, Node::Dir(id));
                    id
                }
            };
        }

        if self.config.path_cache {
            self.caches[slot].store(parents, current);
        }
        Some(current)
    }

    /// Size of the leaf at `path` (slash-separated) in `bucket`.
    pub fn leaf(&self, bucket: Bucket, path: &str) -> Option<u64> {
        let mut node = Node::Dir(self.roots[bucket.index()]);
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            let Node::Dir(id) = node else {
                return None;
            };
            node = self.dirs[id.0].get(segment)?;
        }
        match node {
            Node::Leaf(bytes) => Some(bytes),
            Node::Dir(_) => None,
        }
    }

    /// True if `path` names a directory in `bucket`.
    pub fn is_dir(&self, bucket: Bucket, path: &str) -> bool {
        let mut id = self.roots[bucket.index()];
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            match self.dirs[id.0].get(segment) {
                Some(Node::Dir(child)) => id = child,
                _ => return false,
            }
        }
        true
    }

    pub fn is_empty(&self, bucket: Bucket) -> bool {
        self.dirs[self.roots[bucket.index()].0].is_empty()
    }

    /// Total bytes stored under `bucket`.
    pub fn total(&self, bucket: Bucket) -> u64 {
        self.fold(self.roots[bucket.index()], 0, |acc, bytes| acc.saturating_add(bytes))
    }

    /// Number of leaves in all buckets.
    pub fn leaf_count(&self) -> usize {
        self.fold(ROOT, 0, |acc, _| acc + 1)
    }

    /// Number of directories in all buckets, bucket roots included.
    pub fn dir_count(&self) -> usize {
        self.dirs.len() - 1
    }

    /// (hits, misses) of the path cache so far.
    pub fn cache_stats(&self) -> (u64, u64) {
        (self.cache_hits, self.cache_misses)
    }

    fn fold<T>(&self, start: NodeId, init: T, mut f: impl FnMut(T, u64) -> T) -> T {
        let mut acc = init;
        let mut pending = vec![start];
        while let Some(id) = pending.pop() {
            for (_, node) in self.dirs[id.0].iter() {
                match node {
                    Node::Leaf(bytes) => acc = f(acc, bytes),
                    Node::Dir(child) => pending.push(child),
                }
            }
        }
        acc
    }

    pub(crate) fn root(&self) -> NodeId {
        ROOT
    }

    /// Detach the children of `id` for draining.
    pub(crate) fn take_children(&mut self, id: NodeId) -> Vec<(String, Node)> {
        self.dirs[id.0].take()
    }
}
