//! Insertion: append a leaf and repair the shape

use super::arena::{Node, NodeId};
use super::merkle::MerkleTree;
use crate::config::DuplicatePolicy;
use crate::hashing::digest_entry;
use crate::model::{Digest, Entry};
use crate::{Error, Result};

impl MerkleTree {
    /// Append an entry as the new last leaf and return the new root digest
    ///
    /// Existing leaves are never moved. With [`DuplicatePolicy::Reject`] an
    /// entry equal to one already present fails with
    /// [`Error::DuplicateEntry`] and the tree is left untouched.
    pub fn insert(&mut self, entry: Entry) -> Result<Digest> {
        if self.config.duplicates == DuplicatePolicy::Reject && self.contains(&entry) {
            return Err(Error::DuplicateEntry);
        }
        self.append(entry)
    }

    /// Insert without the duplicate check; used when re-inserting leaves
    /// that were already in the tree.
    pub(crate) fn append(&mut self, entry: Entry) -> Result<Digest> {
        let digest = digest_entry(&entry)?;
        let leaf = self.arena.alloc(Node::leaf(entry, digest));

        match self.root {
            None => {
                self.root = Some(leaf);
                self.depth = 1;
            }
            Some(old_root) if self.is_full() => self.grow_new_root(old_root, leaf),
            Some(_) => self.grow_in_place(leaf),
        }

        self.leaves.push(leaf);
        self.sync_root_hash();
        log::trace!(
            "inserted leaf {} (depth {}), root {}",
            self.leaves.len(),
            self.depth,
            self.root_hash.short()
        );
        Ok(self.root_hash)
    }

    /// The deepest level is full: the current tree becomes the left subtree
    /// of a new root and the leaf hangs off a right spine of the same height.
    fn grow_new_root(&mut self, old_root: NodeId, leaf: NodeId) {
        let spine = self.hanging_chain(leaf, self.depth - 1);
        let root = self.arena.alloc(Node::Internal {
            digest: Digest::ZERO,
            left: old_root,
            right: Some(spine),
        });
        self.refresh(root);
        self.root = Some(root);
        self.depth += 1;
        log::debug!(
            "tree full at {} leaves, depth grows to {}",
            self.leaves.len(),
            self.depth
        );
    }

    /// Attach the leaf in the next free slot of the deepest level.
    ///
    /// Ascends the rightmost path to the first ancestor with a free right
    /// slot and hangs the leaf there through one padding node per skipped
    /// level. With an odd leaf count the immediate parent is free and nothing
    /// is skipped; with an even count at least one level is.
    fn grow_in_place(&mut self, leaf: NodeId) {
        let mut ancestors = self.rightmost_path();
        ancestors.pop();

        let mut skipped = 0;
        let mut level = ancestors.len();
        let found = loop {
            level = level
                .checked_sub(1)
                .expect("non-full tree has an ancestor with a free right slot");
            if self.arena.get(ancestors[level]).right().is_none() {
                break level;
            }
            skipped += 1;
        };
        debug_assert_eq!(skipped == 0, self.leaves.len() % 2 == 1);

        let chain = self.hanging_chain(leaf, skipped);
        match self.arena.get_mut(ancestors[found]) {
            Node::Internal { right, .. } => *right = Some(chain),
            Node::Leaf { .. } => unreachable!("ancestor on the rightmost path is a leaf"),
        }

        ancestors.truncate(found + 1);
        self.refresh_path(&ancestors);
    }
}
