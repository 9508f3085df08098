//! Core data model types for canopy

mod digest;
mod entry;

pub use digest::{Digest, DIGEST_SIZE};
pub use entry::Entry;
