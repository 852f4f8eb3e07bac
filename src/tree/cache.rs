//! Last-parent cache
//!
//! Listings come out in directory order, so consecutive entries of a bucket
//! almost always share a parent. One slot per bucket remembers the parent
//! path last resolved and the directory it resolved to.

use super::node::NodeId;

#[derive(Debug, Default)]
pub(crate) struct PathCache {
    parents: Vec<String>,
    node: Option<NodeId>,
}

impl PathCache {
    /// The cached directory, if `parents` is exactly the cached segment list.
    pub fn lookup(&self, parents: &[&str]) -> Option<NodeId> {
        let node = self.node?;
        let same = self.parents.len() == parents.len()
            && self.parents.iter().zip(parents).all(|(a, b)| a == b);
        same.then_some(node)
    }

    /// Remember `node` for `parents`, reusing the old segment buffers.
    pub fn store(&mut self, parents: &[&str], node: NodeId) {
        self.parents.truncate(parents.len());
        for (i, segment) in parents.iter().enumerate() {
            match self.parents.get_mut(i) {
                Some(slot) => {
                    slot.clear();
                    slot.push_str(segment);
                }
                None => self.parents.push(segment.to_string()),
            }
        }
        self.node = Some(node);
    }
}
