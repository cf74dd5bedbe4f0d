//! Core types for Phantom Spares.
//!
//! This module provides type-safe wrappers for the storefront's domain concepts.

pub mod cart;
pub mod category;
pub mod email;
pub mod id;
pub mod price;
pub mod product;
pub mod rating;
pub mod user;

pub use cart::CartLine;
pub use category::{Category, CategoryParseError, SellingUnit};
pub use email::{Email, EmailError};
pub use id::*;
pub use price::Price;
pub use product::{Product, ProductSpecs};
pub use rating::{Rating, RatingError};
pub use user::User;
