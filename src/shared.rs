//! Lock-guarded handle for sharing one tree between threads
//!
//! Mutations take the write lock, so there is only ever one writer and no
//! reader observes a half-applied insert or delete.

use crate::model::{Digest, Entry};
use crate::tree::{MerklePath, MerkleTree};
use crate::Result;
use parking_lot::RwLock;
use std::sync::Arc;

/// A cloneable, thread-safe handle to a [`MerkleTree`]
#[derive(Clone, Default)]
pub struct SharedMerkleTree {
    inner: Arc<RwLock<MerkleTree>>,
}

impl SharedMerkleTree {
    pub fn new(tree: MerkleTree) -> Self {
        SharedMerkleTree {
            inner: Arc::new(RwLock::new(tree)),
        }
    }

    pub fn insert(&self, entry: Entry) -> Result<Digest> {
        self.inner.write().insert(entry)
    }

    pub fn delete(&self, entry: &Entry) -> Result<Digest> {
        self.inner.write().delete(entry)
    }

    pub fn root_hash(&self) -> Digest {
        self.inner.read().root_hash()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn generate_merkle_path(&self, entry: &Entry) -> Result<MerklePath> {
        self.inner.read().generate_merkle_path(entry)
    }

    pub fn verify_merkle_path(&self, entry: &Entry, position: usize, siblings: &[Digest]) -> bool {
        self.inner.read().verify_merkle_path(entry, position, siblings)
    }

    /// Run `f` with shared access to the tree
    pub fn read<R>(&self, f: impl FnOnce(&MerkleTree) -> R) -> R {
        f(&self.inner.read())
    }

    /// Run `f` with exclusive access, for multi-step mutations that must not
    /// interleave with other writers
    pub fn write<R>(&self, f: impl FnOnce(&mut MerkleTree) -> R) -> R {
        f(&mut self.inner.write())
    }
}
