//! Append-biased Merkle tree
//!
//! This implements a binary hash tree where:
//! - Leaves hold entries in insertion order on the deepest level
//! - Each internal node's digest is the hash of its two children, or its
//!   single child's digest for padding ("hanging") nodes
//! - The root digest authenticates every entry and their order
//!
//! Nodes live in an arena; the tree keeps a registry of leaf ids alongside.

mod arena;
mod delete;
mod insert;
mod merkle;
mod proof;
mod render;

pub use merkle::MerkleTree;
pub use proof::{verify_inclusion, MerklePath};
