//! Merkle path generation and verification

use super::merkle::MerkleTree;
use crate::hashing::{digest_entry, digest_pair};
use crate::model::{Digest, Entry};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Inclusion proof for one leaf
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerklePath {
    /// Leaf position of the entry (insertion order, 0-based)
    pub position: usize,
    /// Sibling digests, nearest the leaf first; padding levels contribute none
    pub siblings: Vec<Digest>,
}

impl MerklePath {
    /// Check this path for `entry` against a tree of `leaf_count` leaves with
    /// root `root`
    pub fn verify(&self, entry: &Entry, leaf_count: usize, root: &Digest) -> bool {
        match digest_entry(entry) {
            Ok(leaf) => verify_inclusion(&leaf, self.position, leaf_count, &self.siblings, root),
            Err(_) => false,
        }
    }
}

impl MerkleTree {
    /// Sibling digests from the leaf holding `entry` up to (not including)
    /// the root
    pub fn generate_merkle_path(&self, entry: &Entry) -> Result<MerklePath> {
        if self.is_empty() {
            return Err(Error::EmptyTree);
        }
        let path = self.find_path(entry).ok_or(Error::EntryNotFound)?;

        let mut nodes = path.iter().rev().copied();
        let mut child = nodes.next().expect("search path ends at a leaf");
        let position = self.leaf_position(child);

        let mut siblings = Vec::with_capacity(path.len().saturating_sub(1));
        for ancestor in nodes {
            let node = self.arena.get(ancestor);
            // Hanging nodes only pass a digest through.
            if let Some(right) = node.right() {
                let sibling = if right == child {
                    node.left().expect("internal node has a left child")
                } else {
                    right
                };
                siblings.push(self.arena.digest(sibling));
            }
            child = ancestor;
        }

        Ok(MerklePath { position, siblings })
    }

    /// Recompute the root from `entry`, its leaf `position` and `siblings`, and
    /// compare it with this tree's root
    pub fn verify_merkle_path(&self, entry: &Entry, position: usize, siblings: &[Digest]) -> bool {
        match digest_entry(entry) {
            Ok(leaf) => verify_inclusion(&leaf, position, self.len(), siblings, &self.root_hash),
            Err(_) => false,
        }
    }
}

/// Verify an inclusion proof against an expected root
///
/// The tree shape is implied by `leaf_count`: at every level a subtree with
/// an odd index combines with its left sibling, and one with an even index
/// combines with its right sibling only if that sibling covers at least one
/// leaf. Levels without a sibling consume no proof element.
///
/// Returns `false` when `position` is out of range or `siblings` has the
/// wrong length.
pub fn verify_inclusion(
    leaf: &Digest,
    position: usize,
    leaf_count: usize,
    siblings: &[Digest],
    expected_root: &Digest,
) -> bool {
    if position >= leaf_count {
        return false;
    }

    let mut siblings = siblings.iter();
    let mut current = *leaf;
    let mut index = position;
    // Leaves covered by one subtree at the current level
    let mut span = 1usize;

    while span < leaf_count {
        if index % 2 == 1 {
            let Some(sibling) = siblings.next() else {
                return false;
            };
            current = digest_pair(sibling, &current);
        } else if (index + 1) * span < leaf_count {
            let Some(sibling) = siblings.next() else {
                return false;
            };
            current = digest_pair(&current, sibling);
        }
        index /= 2;
        span *= 2;
    }

    siblings.next().is_none() && current == *expected_root
}
