//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::StorefrontConfig;
use crate::error::AppError;
use crate::storage::{SharedStorage, StorageError};
use crate::stores::{CartStore, CatalogStore, OrderStore, Stores, TestimonialStore};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and gives handlers the stores
/// built once at startup.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<Stores>,
}

impl AppState {
    /// Open the configured storage and build the stores on top of it.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the storage backend cannot be opened.
    pub fn new(config: &StorefrontConfig) -> Result<Self, StorageError> {
        let storage = config.storage.open()?;
        Ok(Self::with_storage(config, &storage))
    }

    /// Build the stores over an already opened storage handle.
    #[must_use]
    pub fn with_storage(config: &StorefrontConfig, storage: &SharedStorage) -> Self {
        Self {
            inner: Arc::new(Stores::new(storage, config.catalog_latency)),
        }
    }

    /// Run store work on the blocking thread pool.
    ///
    /// The cart, testimonial and order stores do synchronous storage I/O
    /// under a mutex, so handlers hand that work off here instead of running
    /// it on an executor thread. The caller's tracing span is kept.
    ///
    /// # Errors
    ///
    /// Returns the error produced by `work`, or `AppError::Internal` if the
    /// task panicked or was cancelled.
    pub async fn blocking<T, F>(&self, work: F) -> Result<T, AppError>
    where
        F: FnOnce(&Self) -> Result<T, AppError> + Send + 'static,
        T: Send + 'static,
    {
        let state = self.clone();
        let span = tracing::Span::current();
        tokio::task::spawn_blocking(move || span.in_scope(|| work(&state)))
            .await
            .map_err(|e| AppError::Internal(format!("store task failed: {e}")))?
    }

    #[must_use]
    pub fn catalog(&self) -> &CatalogStore {
        &self.inner.catalog
    }

    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.inner.cart
    }

    #[must_use]
    pub fn testimonials(&self) -> &TestimonialStore {
        &self.inner.testimonials
    }

    #[must_use]
    pub fn orders(&self) -> &OrderStore {
        &self.inner.orders
    }
}
