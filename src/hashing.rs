//! Canonical entry encoding and the two tree hash functions
//!
//! ```text
//! encode(entry)     = key (32 bytes) || len(value) as u64 BE (8 bytes) || value
//! digest_entry(e)   = SHA-256(encode(e))
//! digest_pair(a, b) = SHA-256(a || b)          (64 bytes, no delimiter)
//! ```
//!
//! These layouts are fixed: any other implementation that follows them
//! produces the same root digests.

use crate::model::{Digest, Entry, DIGEST_SIZE};
use crate::{Error, Result};

/// Length of the value-length prefix in the canonical encoding
pub const LENGTH_PREFIX_SIZE: usize = 8;

/// Canonical byte encoding of an entry
pub fn encode_entry(entry: &Entry) -> Result<Vec<u8>> {
    let len = u64::try_from(entry.value.len()).map_err(|_| {
        Error::Encoding(format!(
            "value of {} bytes does not fit the length prefix",
            entry.value.len()
        ))
    })?;

    let mut out = Vec::with_capacity(DIGEST_SIZE + LENGTH_PREFIX_SIZE + entry.value.len());
    out.extend_from_slice(entry.key.as_bytes());
    out.extend_from_slice(&len.to_be_bytes());
    out.extend_from_slice(&entry.value);
    Ok(out)
}

/// Leaf digest of an entry
pub fn digest_entry(entry: &Entry) -> Result<Digest> {
    Ok(Digest::of(&encode_entry(entry)?))
}

/// Parent digest of two children, left operand first
pub fn digest_pair(left: &Digest, right: &Digest) -> Digest {
    Digest::of_many(&[left.as_bytes().as_slice(), right.as_bytes().as_slice()])
}
