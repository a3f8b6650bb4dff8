//! Typed, versioned collections over a blob store.
//!
//! # Blob format
//!
//! ```json
//! {"version": 1, "items": [ ... ]}
//! ```
//!
//! A bare JSON array is the unversioned layout written by the browser
//! storefront and is read as version 0. It is rewritten in the current
//! layout on the next write, or eagerly by [`Collection::migrate`].

use std::marker::PhantomData;
use std::sync::{Mutex, PoisonError};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::StoreError;
use crate::storage::SharedStorage;

/// Newest blob layout this build reads and the only one it writes.
pub const CURRENT_VERSION: u32 = 1;

/// A decoded blob together with the layout version it was stored in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loaded<T> {
    pub version: u32,
    pub items: Vec<T>,
}

/// Whether a mutation should be written back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome<R> {
    /// Persist the modified collection, then return the value.
    Write(R),
    /// Leave storage untouched and return the value.
    Keep(R),
}

/// What [`Collection::migrate`] did to one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationOutcome {
    /// Nothing stored under the key.
    Missing,
    /// Already in the current layout.
    Current { records: usize },
    /// Rewritten from an older layout.
    Upgraded { from: u32, records: usize },
}

#[derive(Serialize)]
struct Envelope<'a, T> {
    version: u32,
    items: &'a [T],
}

/// A `Vec<T>` persisted as one blob under a fixed key.
///
/// Every read goes back to storage. Mutations run their read-modify-write
/// cycle under a mutex so two callers in this process cannot interleave on
/// the same blob.
pub struct Collection<T> {
    storage: SharedStorage,
    key: &'static str,
    write_lock: Mutex<()>,
    _items: PhantomData<fn() -> T>,
}

impl<T> std::fmt::Debug for Collection<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collection").field("key", &self.key).finish()
    }
}

impl<T> Collection<T>
where
    T: Serialize + DeserializeOwned,
{
    #[must_use]
    pub fn new(storage: SharedStorage, key: &'static str) -> Self {
        Self {
            storage,
            key,
            write_lock: Mutex::new(()),
            _items: PhantomData,
        }
    }

    /// The storage key.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        self.key
    }

    /// Read the collection; an absent blob is an empty collection.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if storage fails or the blob cannot be decoded.
    pub fn read(&self) -> Result<Vec<T>, StoreError> {
        Ok(self.load()?.map(|loaded| loaded.items).unwrap_or_default())
    }

    /// Read, let `mutate` change the items, and write back if asked to.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if storage fails or the blob cannot be decoded
    /// or encoded.
    pub fn modify<R>(&self, mutate: impl FnOnce(&mut Vec<T>) -> Outcome<R>) -> Result<R, StoreError> {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let mut items = self.read()?;
        match mutate(&mut items) {
            Outcome::Write(value) => {
                self.write(&items)?;
                Ok(value)
            }
            Outcome::Keep(value) => Ok(value),
        }
    }

    /// Replace the collection outright.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the items cannot be encoded or written.
    pub fn replace(&self, items: &[T]) -> Result<(), StoreError> {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        self.write(items)
    }

    /// Rewrite the blob in the current layout if it is older.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if storage fails or the blob cannot be decoded.
    pub fn migrate(&self) -> Result<MigrationOutcome, StoreError> {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let Some(loaded) = self.load()? else {
            return Ok(MigrationOutcome::Missing);
        };
        let records = loaded.items.len();
        if loaded.version == CURRENT_VERSION {
            return Ok(MigrationOutcome::Current { records });
        }

        self.write(&loaded.items)?;
        tracing::info!(
            key = self.key,
            from = loaded.version,
            to = CURRENT_VERSION,
            records,
            "Collection migrated"
        );
        Ok(MigrationOutcome::Upgraded {
            from: loaded.version,
            records,
        })
    }

    /// Decode the stored blob, keeping its layout version.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if storage fails, the blob is malformed, or it
    /// declares a version newer than [`CURRENT_VERSION`].
    pub fn load(&self) -> Result<Option<Loaded<T>>, StoreError> {
        let Some(raw) = self.storage.get(self.key)? else {
            return Ok(None);
        };
        let corrupt = |source| StoreError::Corrupt {
            key: self.key,
            source,
        };

        let value: Value = serde_json::from_str(&raw).map_err(corrupt)?;
        let (version, items) = match value {
            Value::Array(items) => (0, Value::Array(items)),
            Value::Object(mut envelope) => {
                let version = envelope
                    .get("version")
                    .and_then(Value::as_u64)
                    .unwrap_or_default();
                if version > u64::from(CURRENT_VERSION) {
                    return Err(StoreError::UnsupportedVersion {
                        key: self.key,
                        found: version,
                        supported: CURRENT_VERSION,
                    });
                }
                let items = envelope.remove("items").unwrap_or(Value::Array(Vec::new()));
                // Bounded by CURRENT_VERSION above.
                (u32::try_from(version).unwrap_or(CURRENT_VERSION), items)
            }
            // `null` reads as an empty collection.
            Value::Null => (0, Value::Array(Vec::new())),
            other => (0, other),
        };

        let items = serde_json::from_value(items).map_err(corrupt)?;
        Ok(Some(Loaded { version, items }))
    }

    fn write(&self, items: &[T]) -> Result<(), StoreError> {
        let blob = serde_json::to_string(&Envelope {
            version: CURRENT_VERSION,
            items,
        })
        .map_err(|source| StoreError::Serialize {
            key: self.key,
            source,
        })?;
        self.storage.set(self.key, &blob)?;
        Ok(())
    }
}
