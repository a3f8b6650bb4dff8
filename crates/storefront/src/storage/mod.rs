//! Key-value blob storage backing the stores.
//!
//! Each store keeps its whole collection as one JSON blob under a fixed key,
//! the way a browser keeps it in local storage. Three backends are provided:
//!
//! - [`FileStore`] - one `<key>.json` file per key in a data directory
//! - [`MemoryStore`] - a process-local map, for tests and throwaway runs
//! - [`DetachedStore`] - no durable storage at all; every call fails with
//!   [`StorageError::Unavailable`]
//!
//! Backends only move opaque strings; versioning and typing live in
//! [`crate::stores::Collection`].

mod detached;
mod file;
mod memory;

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

pub use detached::DetachedStore;
pub use file::FileStore;
pub use memory::MemoryStore;

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The execution context has no durable storage.
    #[error("durable storage is not available")]
    Unavailable,

    /// Reading or writing a blob failed.
    #[error("storage I/O error for key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The key cannot be mapped onto the backend.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),
}

/// A string-to-string blob store.
///
/// `set` replaces the whole value; there are no partial writes.
pub trait KeyValueStore: Send + Sync {
    /// Read the blob stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the blob stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Shared handle to a storage backend.
pub type SharedStorage = Arc<dyn KeyValueStore>;

/// Which storage backend to open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    /// JSON files in the given directory.
    File(PathBuf),
    /// In-process map, lost on exit.
    Memory,
    /// No durable storage.
    Detached,
}

impl StorageBackend {
    /// Open the backend.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the data directory cannot be created.
    pub fn open(&self) -> Result<SharedStorage, StorageError> {
        Ok(match self {
            Self::File(dir) => Arc::new(FileStore::open(dir)?),
            Self::Memory => Arc::new(MemoryStore::new()),
            Self::Detached => Arc::new(DetachedStore),
        })
    }
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(dir) => write!(f, "file ({})", dir.display()),
            Self::Memory => f.write_str("memory"),
            Self::Detached => f.write_str("none"),
        }
    }
}
