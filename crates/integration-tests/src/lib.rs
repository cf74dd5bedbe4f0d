//! Integration tests for Phantom Spares.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p phantom-spares-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `storefront_api` - HTTP routes driven in-process through the router
//! - `end_to_end` - Generator, catalog view, cart and checkout without HTTP
//!
//! Everything runs in-process; no server or network is needed.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use phantom_spares_storefront::app;
use phantom_spares_storefront::catalog::Catalog;
use phantom_spares_storefront::config::StorefrontConfig;
use phantom_spares_storefront::services::{AcceptAnyCredentials, CredentialVerifier};
use phantom_spares_storefront::state::AppState;
use phantom_spares_storefront::storage::{MemoryStore, SharedStorage};

/// Seed shared by every test catalog.
pub const TEST_SEED: u64 = 2024;

/// An in-process storefront over in-memory storage.
pub struct TestContext {
    pub router: Router,
    pub state: AppState,
    pub storage: Arc<MemoryStore>,
}

/// A decoded response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: Value,
}

impl TestContext {
    /// A storefront with a seeded 100-product catalog and no checkout delay.
    #[must_use]
    pub fn new() -> Self {
        Self::with_storage(Arc::new(MemoryStore::new()))
    }

    /// A storefront reusing existing storage, as after a restart.
    ///
    /// # Panics
    ///
    /// Panics if the persisted state cannot be opened.
    #[must_use]
    pub fn with_storage(storage: Arc<MemoryStore>) -> Self {
        Self::build(storage, Arc::new(AcceptAnyCredentials), Duration::ZERO)
    }

    /// A storefront signing shoppers in through `verifier`.
    #[must_use]
    pub fn with_verifier(verifier: Arc<dyn CredentialVerifier>) -> Self {
        Self::build(Arc::new(MemoryStore::new()), verifier, Duration::ZERO)
    }

    /// A storefront whose checkout takes `delay` to process.
    #[must_use]
    pub fn with_checkout_delay(delay: Duration) -> Self {
        Self::build(
            Arc::new(MemoryStore::new()),
            Arc::new(AcceptAnyCredentials),
            delay,
        )
    }

    #[allow(clippy::expect_used)]
    fn build(
        storage: Arc<MemoryStore>,
        verifier: Arc<dyn CredentialVerifier>,
        checkout_delay: Duration,
    ) -> Self {
        let config = StorefrontConfig {
            data_dir: None,
            catalog_seed: Some(TEST_SEED),
            checkout_delay,
            ..StorefrontConfig::default()
        };
        let catalog = Catalog::generate(config.catalog_size, config.catalog_seed);
        let shared: SharedStorage = storage.clone();
        let state =
            AppState::with_verifier(config, catalog, shared, verifier).expect("failed to open state");

        Self {
            router: app(state.clone()),
            state,
            storage,
        }
    }

    /// Send a GET request.
    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, None).await
    }

    /// Send a POST request with an optional JSON body.
    pub async fn post(&self, uri: &str, body: Option<Value>) -> TestResponse {
        self.send(Method::POST, uri, body).await
    }

    #[allow(clippy::expect_used)]
    async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(request.body(body).expect("invalid request"))
            .await
            .expect("router is infallible");

        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("failed to read body");
        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

        TestResponse {
            status,
            location,
            body,
        }
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
