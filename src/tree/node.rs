//! Arena node types
//!
//! Directories live in a flat arena owned by [`super::Forest`] and refer to
//! each other by [`NodeId`], so a resolved directory can be remembered across
//! insertions without holding a borrow into the tree.

use std::collections::HashMap;
use std::mem;

/// Index of a directory in the forest arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// A named child of a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node {
    /// Cumulative usage in bytes.
    Leaf(u64),
    Dir(NodeId),
}

/// Children of one directory, kept in first-insertion order.
#[derive(Debug, Default)]
pub(crate) struct Dir {
    entries: Vec<(String, Node)>,
    index: HashMap<String, usize>,
}

impl Dir {
    pub fn get(&self, name: &str) -> Option<Node> {
        self.index.get(name).map(|&i| self.entries[i].1)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Node> {
        let i = *self.index.get(name)?;
        Some(&mut self.entries[i].1)
    }

    /// Add a child. The caller has checked that `name` is absent.
    pub fn insert(&mut self, name: &str, node: Node) {
        debug_assert!(!self.index.contains_key(name));
        self.index.insert(name.to_string(), self.entries.len());
        self.entries.push((name.to_string(), node));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Node)> {
        self.entries.iter().map(|(name, node)| (name.as_str(), *node))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove and return every child, leaving the directory empty.
    pub fn take(&mut self) -> Vec<(String, Node)> {
        self.index = HashMap::new();
        mem::take(&mut self.entries)
    }
}
