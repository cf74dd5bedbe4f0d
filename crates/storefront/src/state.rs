//! Application state shared across handlers.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::catalog::Catalog;
use crate::config::StorefrontConfig;
use crate::services::auth::{AcceptAnyCredentials, AuthError, AuthStore, CredentialVerifier};
use crate::services::cart::{CartError, CartStore};
use crate::storage::SharedStorage;

/// Error opening the shopper's persisted stores.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("failed to open cart: {0}")]
    Cart(#[from] CartError),
    #[error("failed to open session: {0}")]
    Auth(#[from] AuthError),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The catalog is immutable and
/// read without locking; the cart and auth stores sit behind async mutexes so
/// each mutation runs to completion before the next one starts.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    cart: Mutex<CartStore>,
    auth: Mutex<AuthStore>,
}

impl AppState {
    /// Create a new application state that accepts any credentials.
    ///
    /// # Arguments
    ///
    /// * `config` - Storefront configuration
    /// * `catalog` - Product catalog served by the storefront
    /// * `storage` - Backend holding the persisted cart and user
    ///
    /// # Errors
    ///
    /// Returns an error if the persisted stores cannot be read.
    pub fn new(
        config: StorefrontConfig,
        catalog: Catalog,
        storage: SharedStorage,
    ) -> Result<Self, StateError> {
        Self::with_verifier(config, catalog, storage, Arc::new(AcceptAnyCredentials))
    }

    /// Create a new application state with a custom credential verifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the persisted stores cannot be read.
    pub fn with_verifier(
        config: StorefrontConfig,
        catalog: Catalog,
        storage: SharedStorage,
        verifier: Arc<dyn CredentialVerifier>,
    ) -> Result<Self, StateError> {
        let cart = CartStore::open(Arc::clone(&storage))?;
        let auth = AuthStore::open(storage, verifier)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                cart: Mutex::new(cart),
                auth: Mutex::new(auth),
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// The shopper's cart.
    #[must_use]
    pub fn cart(&self) -> &Mutex<CartStore> {
        &self.inner.cart
    }

    /// The shopper's session.
    #[must_use]
    pub fn auth(&self) -> &Mutex<AuthStore> {
        &self.inner.auth
    }
}
