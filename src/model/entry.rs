//! Entry type - the unit stored in a tree leaf

use super::Digest;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A key/value pair held by a leaf
///
/// Entries are matched by the full `(key, value)` pair, never by key alone:
/// two entries sharing a key but differing in value are distinct.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entry {
    /// 32-byte key, usually the digest of some label
    pub key: Digest,
    /// Raw value bytes
    #[serde(with = "hex_bytes")]
    pub value: Vec<u8>,
}

impl Entry {
    /// Create an entry from a key and value
    pub fn new(key: Digest, value: impl Into<Vec<u8>>) -> Self {
        Entry {
            key,
            value: value.into(),
        }
    }

    /// Create an entry whose key is the SHA-256 of `label`
    pub fn labeled(label: impl AsRef<[u8]>, value: impl Into<Vec<u8>>) -> Self {
        Entry::new(Digest::of(label.as_ref()), value)
    }

    /// Value rendered as (lossy) UTF-8, for display
    pub fn value_lossy(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.value)
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("key", &self.key)
            .field("value", &self.value_lossy())
            .finish()
    }
}

mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        hex::decode(s).map_err(serde::de::Error::custom)
    }
}
