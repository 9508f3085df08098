//! Deletion: remove a leaf by value and restore the canonical shape
//!
//! Removing the last leaf only unlinks it (collapsing padding nodes it leaves
//! empty) and, when it was the only leaf in the right half, drops a level.
//! Removing any other leaf detaches every later leaf, removes the target as
//! the new last leaf, and re-inserts the detached entries in order, so the
//! result is always the tree that inserting the surviving entries would build.

use super::arena::{Node, NodeId};
use super::merkle::{capacity, MerkleTree};
use crate::model::{Digest, Entry};
use crate::{Error, Result};

impl MerkleTree {
    /// Remove the earliest leaf equal to `entry` and return the new root
    /// digest ([`Digest::ZERO`] once the tree is empty)
    pub fn delete(&mut self, entry: &Entry) -> Result<Digest> {
        if self.is_empty() {
            return Err(Error::EmptyTree);
        }
        let path = self.find_path(entry).ok_or(Error::EntryNotFound)?;
        let target = *path.last().expect("search path ends at a leaf");
        let position = self.leaf_position(target);

        match self.leaves.len() {
            1 => self.clear(),
            2 => {
                self.keep_only(1 - position);
            }
            n if position + 1 == n => {
                self.remove_last_along(path);
            }
            _ => self.rebuild_without(position)?,
        }

        self.sync_root_hash();
        log::trace!(
            "deleted leaf {}, {} left, root {}",
            position,
            self.leaves.len(),
            self.root_hash.short()
        );
        Ok(self.root_hash)
    }

    /// Remove the last leaf and return its entry
    fn pop_last(&mut self) -> Entry {
        let path = self.rightmost_path();
        let entry = self.remove_last_along(path);
        self.sync_root_hash();
        entry
    }

    /// Remove the last leaf, reached through `path` (root to leaf)
    fn remove_last_along(&mut self, mut path: Vec<NodeId>) -> Entry {
        let leaf = *path.last().expect("removal path is never empty");
        debug_assert_eq!(Some(&leaf), self.leaves.last());

        match self.leaves.len() {
            0 => unreachable!("removal from an empty tree"),
            1 => {
                let entry = self.take_leaf(leaf);
                self.clear();
                return entry;
            }
            2 => return self.keep_only(0),
            _ => {}
        }

        let n = self.leaves.len();
        let root = path[0];
        let root_right = self.arena.get(root).right();
        if n == capacity(self.depth) / 2 + 1
            && root_right.map(|r| self.arena.digest(r)) == Some(self.arena.digest(leaf))
        {
            return self.drop_right_half(root);
        }

        self.leaves.pop();
        path.pop();
        let entry = self.take_leaf(leaf);

        // Unlink upward; padding nodes left without children go too.
        let mut child = leaf;
        while let Some(parent) = path.pop() {
            if self.detach_child(parent, child) {
                path.push(parent);
                break;
            }
            self.arena.remove(parent);
            child = parent;
        }
        assert!(!path.is_empty(), "unlinking the last leaf emptied the root");

        self.refresh_path(&path);
        entry
    }

    /// The last leaf is alone in the root's right half: discard that half and
    /// promote the left subtree to root.
    fn drop_right_half(&mut self, root: NodeId) -> Entry {
        let (left, right) = match self.arena.remove(root) {
            Node::Internal {
                left,
                right: Some(right),
                ..
            } => (left, right),
            _ => unreachable!("root of a multi-leaf tree has two children"),
        };

        let mut removed = self.arena.remove_subtree(right);
        assert_eq!(removed.len(), 1, "right half held more than the last leaf");

        self.leaves.pop();
        self.root = Some(left);
        self.depth -= 1;
        log::debug!(
            "right half emptied at {} leaves, depth shrinks to {}",
            self.leaves.len(),
            self.depth
        );
        removed.remove(0)
    }

    /// Two leaves: keep the one at `survivor` as a single-leaf tree and return
    /// the other's entry
    fn keep_only(&mut self, survivor: usize) -> Entry {
        debug_assert_eq!(self.leaves.len(), 2);
        let root = self.root.expect("two-leaf tree has a root");
        let kept = self.leaves[survivor];
        let removed = self.leaves[1 - survivor];

        self.arena.remove(root);
        let entry = self.take_leaf(removed);

        self.root = Some(kept);
        self.leaves = vec![kept];
        self.depth = 1;
        entry
    }

    /// Remove the leaf at `position` (not the last) by truncating the tree to
    /// the leaves before it and re-inserting the ones after it.
    fn rebuild_without(&mut self, position: usize) -> Result<()> {
        let mut detached = Vec::with_capacity(self.leaves.len() - position - 1);
        while self.leaves.len() > position + 1 {
            detached.push(self.pop_last());
        }
        self.pop_last();

        log::debug!(
            "rebuilding after leaf {}: re-inserting {} leaves",
            position,
            detached.len()
        );
        for entry in detached.into_iter().rev() {
            self.append(entry)?;
        }
        Ok(())
    }

    /// Detach `child` from `parent`, moving a remaining right child into the
    /// left slot. Returns whether `parent` still has a child.
    fn detach_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        match self.arena.get_mut(parent) {
            Node::Internal { left, right, .. } => {
                if *right == Some(child) {
                    *right = None;
                    true
                } else if *left == child {
                    match right.take() {
                        Some(r) => {
                            *left = r;
                            true
                        }
                        None => false,
                    }
                } else {
                    panic!("node {child} is not a child of {parent}")
                }
            }
            Node::Leaf { .. } => unreachable!("leaf on an ancestor path"),
        }
    }

    fn take_leaf(&mut self, id: NodeId) -> Entry {
        match self.arena.remove(id) {
            Node::Leaf { entry, .. } => entry,
            Node::Internal { .. } => panic!("node {id} is not a leaf"),
        }
    }
}
