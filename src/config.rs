//! Tree configuration
//!
//! Loaded from JSON; every field is optional and falls back to its default.
//!
//! ```json
//! { "duplicates": "reject" }
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// What Insert does with an entry equal (key and value) to one already present
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Accept it as a distinct leaf
    #[default]
    Allow,
    /// Fail with [`Error::DuplicateEntry`] and leave the tree unchanged
    Reject,
}

/// Configuration for a [`MerkleTree`](crate::MerkleTree)
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    pub duplicates: DuplicatePolicy,
}

impl TreeConfig {
    /// Parse a config from a JSON string
    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Load a config from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::Config(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn with_duplicates(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicates = policy;
        self
    }
}
