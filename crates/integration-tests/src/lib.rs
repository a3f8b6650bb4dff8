//! Integration tests for Boutique.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p boutique-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `storefront_api` - HTTP flows through the full router
//! - `file_storage` - Persistence and migration on a real data directory
//! - `concurrent_cart` - Parallel cart mutations
//!
//! The router is driven in process with `tower::ServiceExt::oneshot`; no
//! server or network is needed.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, Bytes};
use axum::http::{Method, Request, StatusCode, header};
use boutique_storefront::config::StorefrontConfig;
use boutique_storefront::routes;
use boutique_storefront::state::AppState;
use boutique_storefront::storage::{DetachedStore, MemoryStore, SharedStorage};
use boutique_storefront::stores::CatalogLatency;
use serde_json::Value;
use tower::ServiceExt;

/// The storefront router over a chosen storage backend.
///
/// Clones share the same stores, so tasks can drive one app concurrently.
#[derive(Clone)]
pub struct TestApp {
    router: Router,
}

impl TestApp {
    /// An app with fresh in-memory storage.
    #[must_use]
    pub fn memory() -> Self {
        Self::with_storage(Arc::new(MemoryStore::new()))
    }

    /// An app with no durable storage.
    #[must_use]
    pub fn detached() -> Self {
        Self::with_storage(Arc::new(DetachedStore))
    }

    /// An app over `storage`, with catalog latency disabled.
    #[must_use]
    pub fn with_storage(storage: SharedStorage) -> Self {
        let config = StorefrontConfig {
            catalog_latency: CatalogLatency::none(),
            ..StorefrontConfig::default()
        };
        let state = AppState::with_storage(&config, &storage);
        Self {
            router: routes::app(state),
        }
    }

    /// Send a GET request.
    ///
    /// # Panics
    ///
    /// Panics if the router fails to answer.
    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, Body::empty(), None).await
    }

    /// Send a POST request with a JSON body.
    ///
    /// # Panics
    ///
    /// Panics if the router fails to answer.
    pub async fn post(&self, uri: &str, body: &Value) -> TestResponse {
        self.send(
            Method::POST,
            uri,
            Body::from(body.to_string()),
            Some("application/json"),
        )
        .await
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Body,
        content_type: Option<&str>,
    ) -> TestResponse {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(content_type) = content_type {
            request = request.header(header::CONTENT_TYPE, content_type);
        }
        let request = request.body(body).expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router failed to respond");
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");

        TestResponse { status, body }
    }
}

/// A buffered response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

impl TestResponse {
    /// The body parsed as JSON.
    ///
    /// # Panics
    ///
    /// Panics if the body is not JSON.
    #[must_use]
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("Response body is not JSON")
    }

    /// The body as text.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}
