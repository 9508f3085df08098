//! Merkle tree structure and shape bookkeeping

use super::arena::{Node, NodeArena, NodeId};
use crate::config::TreeConfig;
use crate::hashing::digest_pair;
use crate::model::{Digest, Entry};
use crate::Result;

/// An append-biased binary Merkle tree
///
/// Leaves sit left-to-right on the deepest level in insertion order. The
/// shape depends only on the sequence of entries present, so two trees holding
/// the same entries in the same order have the same root digest.
///
/// Internal nodes with a single child ("hanging" nodes) pad the rightmost
/// subtree down to leaf depth and pass their child's digest through.
#[derive(Clone, Debug)]
pub struct MerkleTree {
    pub(crate) config: TreeConfig,
    pub(crate) arena: NodeArena,
    pub(crate) root: Option<NodeId>,
    /// Cached digest of `root`
    pub(crate) root_hash: Digest,
    /// Number of levels, counting the leaf level; zero when empty
    pub(crate) depth: usize,
    /// Leaf ids in insertion order
    pub(crate) leaves: Vec<NodeId>,
}

impl Default for MerkleTree {
    fn default() -> Self {
        Self::new()
    }
}

impl MerkleTree {
    /// Create an empty tree with the default config
    pub fn new() -> Self {
        Self::with_config(TreeConfig::default())
    }

    /// Create an empty tree
    pub fn with_config(config: TreeConfig) -> Self {
        MerkleTree {
            config,
            arena: NodeArena::new(),
            root: None,
            root_hash: Digest::ZERO,
            depth: 0,
            leaves: Vec::new(),
        }
    }

    /// Build a tree by inserting `entries` in order
    pub fn from_entries<I>(config: TreeConfig, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = Entry>,
    {
        let mut tree = Self::with_config(config);
        for entry in entries {
            tree.insert(entry)?;
        }
        Ok(tree)
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Current root digest, [`Digest::ZERO`] for an empty tree
    pub fn root_hash(&self) -> Digest {
        self.root_hash
    }

    /// Number of levels including the leaf level
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Number of leaves
    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// Entries in leaf (insertion) order
    pub fn entries(&self) -> impl Iterator<Item = &Entry> + '_ {
        self.leaves.iter().map(move |&id| {
            self.arena
                .get(id)
                .entry()
                .expect("leaf registry points at an internal node")
        })
    }

    /// Leaf position of the earliest leaf equal to `entry`
    pub fn position(&self, entry: &Entry) -> Option<usize> {
        self.entries().position(|e| e == entry)
    }

    pub fn contains(&self, entry: &Entry) -> bool {
        self.position(entry).is_some()
    }

    /// Remove every leaf
    pub fn clear(&mut self) {
        if self.root.is_some() {
            log::debug!("resetting tree with {} leaves", self.leaves.len());
        }
        self.arena.clear();
        self.root = None;
        self.root_hash = Digest::ZERO;
        self.depth = 0;
        self.leaves.clear();
    }

    // === Internal helpers ===

    /// Whether the deepest level has no free slot left
    pub(crate) fn is_full(&self) -> bool {
        self.depth > 0 && self.leaves.len() == capacity(self.depth)
    }

    /// Root-to-leaf path that always prefers the right child
    ///
    /// Ends at the last leaf in leaf order.
    pub(crate) fn rightmost_path(&self) -> Vec<NodeId> {
        let mut path = Vec::with_capacity(self.depth);
        let mut current = self.root;
        while let Some(id) = current {
            path.push(id);
            let node = self.arena.get(id);
            current = node.right().or_else(|| node.left());
        }
        path
    }

    /// Root-to-leaf path of the earliest leaf equal to `entry`
    ///
    /// Exhaustive left-first search with an explicit stack.
    pub(crate) fn find_path(&self, entry: &Entry) -> Option<Vec<NodeId>> {
        let mut stack = vec![(self.root?, 0usize)];
        let mut path = Vec::with_capacity(self.depth);

        while let Some((id, level)) = stack.pop() {
            path.truncate(level);
            path.push(id);

            match self.arena.get(id) {
                Node::Leaf { entry: e, .. } => {
                    if e == entry {
                        return Some(path);
                    }
                }
                Node::Internal { left, right, .. } => {
                    if let Some(right) = right {
                        stack.push((*right, level + 1));
                    }
                    stack.push((*left, level + 1));
                }
            }
        }
        None
    }

    /// Registry position of a leaf id
    pub(crate) fn leaf_position(&self, leaf: NodeId) -> usize {
        self.leaves
            .iter()
            .position(|&id| id == leaf)
            .expect("leaf missing from registry")
    }

    /// Recompute an internal node's digest from its children
    pub(crate) fn refresh(&mut self, id: NodeId) {
        let (left, right) = match self.arena.get(id) {
            Node::Leaf { .. } => return,
            Node::Internal { left, right, .. } => (*left, *right),
        };
        let left_digest = self.arena.digest(left);
        let new_digest = match right {
            Some(right) => digest_pair(&left_digest, &self.arena.digest(right)),
            None => left_digest,
        };
        if let Node::Internal { digest, .. } = self.arena.get_mut(id) {
            *digest = new_digest;
        }
    }

    /// Recompute digests along a root-to-leaf path, deepest first
    pub(crate) fn refresh_path(&mut self, path: &[NodeId]) {
        for &id in path.iter().rev() {
            self.refresh(id);
        }
    }

    pub(crate) fn sync_root_hash(&mut self) {
        self.root_hash = match self.root {
            Some(root) => self.arena.digest(root),
            None => Digest::ZERO,
        };
        debug_assert_eq!(self.depth, depth_for(self.leaves.len()));
    }

    /// Build `levels` hanging nodes stacked over `leaf`; returns the topmost
    /// node, or `leaf` itself when `levels` is zero.
    pub(crate) fn hanging_chain(&mut self, leaf: NodeId, levels: usize) -> NodeId {
        let digest = self.arena.digest(leaf);
        let mut top = leaf;
        for _ in 0..levels {
            top = self.arena.alloc(Node::hanging(top, digest));
        }
        top
    }

    /// Live arena nodes, for leak accounting
    #[cfg(test)]
    pub(crate) fn node_count(&self) -> usize {
        self.arena.live()
    }
}

/// Leaf capacity of a tree with `depth` levels
pub(crate) fn capacity(depth: usize) -> usize {
    debug_assert!(depth > 0);
    1usize << (depth - 1)
}

/// Depth of the canonical tree holding `leaf_count` leaves
pub(crate) fn depth_for(leaf_count: usize) -> usize {
    match leaf_count {
        0 => 0,
        n => n.next_power_of_two().trailing_zeros() as usize + 1,
    }
}
