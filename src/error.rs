//! Error types for canopy

use thiserror::Error;

/// Result type alias for canopy operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in canopy operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Entry not found")]
    EntryNotFound,

    #[error("Tree is empty")]
    EmptyTree,

    #[error("Encoding failure: {0}")]
    Encoding(String),

    #[error("Duplicate entry rejected by policy")]
    DuplicateEntry,

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
