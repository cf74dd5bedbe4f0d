//! CLI command implementations.
//!
//! Each command opens the shopper's persisted state, performs one operation
//! and writes a plain-text report. Rendering is kept separate from printing so
//! the output can be tested.

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod products;

use std::sync::Arc;

use thiserror::Error;

use phantom_spares_core::ProductId;
use phantom_spares_storefront::catalog::Catalog;
use phantom_spares_storefront::config::{ConfigError, StorefrontConfig};
use phantom_spares_storefront::services::{
    AcceptAnyCredentials, AuthError, AuthStore, CartError, CartStore, CheckoutError,
};
use phantom_spares_storefront::storage::{self, StorageError};

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    #[error("no product with id {0}")]
    ProductNotFound(ProductId),

    #[error("{0}")]
    InvalidArgument(String),
}

/// The shopper's catalog, cart and session for one invocation.
pub struct Shop {
    pub config: StorefrontConfig,
    pub catalog: Catalog,
    pub cart: CartStore,
    pub auth: AuthStore,
}

impl Shop {
    /// Open the persisted stores described by `config` and generate the
    /// catalog.
    ///
    /// # Errors
    ///
    /// Returns `CliError` if the data directory or a store cannot be opened.
    pub fn open(config: StorefrontConfig) -> Result<Self, CliError> {
        let storage = storage::open_shared(config.data_dir.as_deref())?;
        let catalog = Catalog::generate(config.catalog_size, config.catalog_seed);
        let cart = CartStore::open(Arc::clone(&storage))?;
        let auth = AuthStore::open(storage, Arc::new(AcceptAnyCredentials))?;

        Ok(Self {
            config,
            catalog,
            cart,
            auth,
        })
    }

    /// Look up a product or fail with `CliError::ProductNotFound`.
    ///
    /// # Errors
    ///
    /// Returns `CliError::ProductNotFound` for an unknown id.
    pub fn product(&self, id: ProductId) -> Result<&phantom_spares_core::Product, CliError> {
        self.catalog.find(id).ok_or(CliError::ProductNotFound(id))
    }
}

/// Write a rendered report to stdout.
#[allow(clippy::print_stdout)]
pub fn emit(report: &str) {
    println!("{report}");
}
