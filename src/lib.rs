//! # canopy
//!
//! An append-biased Merkle tree with deletion and inclusion proofs.
//!
//! Entries are appended left-to-right on the deepest level of a binary hash
//! tree. The tree's shape is a pure function of the entries it holds and
//! their order, so any two trees built from the same history share a root
//! digest.
//!
//! ## Core Concepts
//!
//! - **Entries**: a 32-byte key plus a value, matched by both
//! - **Root digest**: SHA-256 commitment to every entry and its position
//! - **Merkle paths**: sibling digests proving one entry is in the tree
//! - **Canonical encoding**: fixed byte layout so other implementations agree
//!
//! ## Example
//!
//! ```
//! use canopy::{Entry, MerkleTree};
//!
//! let mut tree = MerkleTree::new();
//! for i in 1..=5 {
//!     tree.insert(Entry::labeled(format!("key{i}"), format!("Node{i}")))?;
//! }
//!
//! let entry = Entry::labeled("key3", "Node3");
//! let path = tree.generate_merkle_path(&entry)?;
//! assert!(tree.verify_merkle_path(&entry, path.position, &path.siblings));
//!
//! tree.delete(&entry)?;
//! assert_eq!(tree.len(), 4);
//! # Ok::<(), canopy::Error>(())
//! ```

pub mod config;
pub mod hashing;
pub mod model;
pub mod shared;
pub mod tree;

mod error;

pub use config::{DuplicatePolicy, TreeConfig};
pub use error::{Error, Result};
pub use hashing::{digest_entry, digest_pair, encode_entry};
pub use model::{Digest, Entry};
pub use shared::SharedMerkleTree;
pub use tree::{verify_inclusion, MerklePath, MerkleTree};
