//! Text rendering of a tree
//!
//! ```text
//! Merkle Tree (root 3f1c0a9e, 3 leaves, depth 3)
//! └── 3f1c0a9e
//!     ├── 8b0e51c2 (hanging)
//!     │   └── 8b0e51c2 "Node3"
//!     └── 51d7c3aa
//!         ├── 0c9f2e17 "Node2"
//!         └── e4b1d6a0 "Node1"
//! ```
//!
//! Right children are printed above left children.

use super::arena::{Node, NodeId};
use super::merkle::MerkleTree;
use std::fmt;

impl fmt::Display for MerkleTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(root) = self.root else {
            return writeln!(f, "Merkle Tree (empty)");
        };
        writeln!(
            f,
            "Merkle Tree (root {}, {} leaves, depth {})",
            self.root_hash.short(),
            self.len(),
            self.depth
        )?;
        self.write_node(f, root, "", true)
    }
}

impl MerkleTree {
    fn write_node(
        &self,
        f: &mut fmt::Formatter<'_>,
        id: NodeId,
        prefix: &str,
        last: bool,
    ) -> fmt::Result {
        let connector = if last { "└── " } else { "├── " };
        match self.arena.get(id) {
            Node::Leaf { entry, digest } => {
                writeln!(
                    f,
                    "{prefix}{connector}{} {:?}",
                    digest.short(),
                    entry.value_lossy()
                )
            }
            Node::Internal {
                digest,
                left,
                right,
            } => {
                let marker = if right.is_none() { " (hanging)" } else { "" };
                writeln!(f, "{prefix}{connector}{}{marker}", digest.short())?;

                let child_prefix = format!("{prefix}{}", if last { "    " } else { "│   " });
                if let Some(right) = right {
                    self.write_node(f, *right, &child_prefix, false)?;
                }
                self.write_node(f, *left, &child_prefix, true)
            }
        }
    }
}
