//! # Storage Errors
//!
//! Failures of durable client storage.
//!
//! These never reach a cart user: [`crate::CartStore`] logs and swallows
//! them, falling back to an empty cart on read and keeping the in-memory
//! cart on write. They are surfaced only to code that talks to a
//! [`crate::KeyValueStore`] directly.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing a backing file failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The key can't be mapped to a storage slot (e.g. it contains a path
    /// separator).
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    /// A stored value isn't valid JSON for the expected type.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The platform has no per-user data directory.
    #[error("No data directory available on this platform")]
    NoDataDir,

    /// The store can't be used at all (e.g. a poisoned lock).
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}
