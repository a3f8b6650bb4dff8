//! Store-level errors.

use thiserror::Error;

use crate::storage::StorageError;

/// Errors returned by the stores.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The operation needs durable storage and there is none.
    #[error("durable storage is not available")]
    Unavailable,

    /// The storage backend failed.
    #[error(transparent)]
    Storage(StorageError),

    /// A stored blob could not be parsed.
    #[error("stored data under {key} is corrupt: {source}")]
    Corrupt {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A collection could not be serialized.
    #[error("failed to serialize {key}: {source}")]
    Serialize {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A blob was written by a newer schema than this build understands.
    #[error("stored data under {key} has version {found}, newest supported is {supported}")]
    UnsupportedVersion {
        key: &'static str,
        found: u64,
        supported: u32,
    },
}

impl StoreError {
    /// Whether the failure is the absence of durable storage.
    #[must_use]
    pub const fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable)
    }
}

impl From<StorageError> for StoreError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Unavailable => Self::Unavailable,
            other => Self::Storage(other),
        }
    }
}

/// Treat missing durable storage as "nothing stored".
///
/// Reads of the cart and order list, like the browser storefront they model,
/// come back empty rather than failing when there is nowhere to read from.
pub(crate) fn or_default_when_unavailable<T: Default>(
    result: Result<T, StoreError>,
) -> Result<T, StoreError> {
    match result {
        Err(StoreError::Unavailable) => Ok(T::default()),
        other => other,
    }
}
