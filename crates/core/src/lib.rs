//! Phantom Spares Core - Shared domain types.
//!
//! This crate provides the types used across all Phantom Spares components:
//! - `storefront` - Catalog, cart, auth and checkout (library + HTTP binary)
//! - `cli` - Command-line access to the same stores
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no
//! randomness. Stores and generators live in the storefront crate.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, ratings, emails, categories and the
//!   product, cart line and user records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
