//! Storage for contexts with no durable storage.

use super::{KeyValueStore, StorageError};

/// Fails every read and write with [`StorageError::Unavailable`].
///
/// Stores decide per operation whether that is fatal (adding a testimonial,
/// creating an order) or means "nothing stored" (reading the cart).
#[derive(Debug, Clone, Copy, Default)]
pub struct DetachedStore;

impl KeyValueStore for DetachedStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }
}
