//! Storefront services.
//!
//! # Services
//!
//! - `cart` - Cart store with write-through persistence
//! - `auth` - Current-user store and the credential verifier seam
//! - `checkout` - Simulated, auth-gated checkout

pub mod auth;
pub mod cart;
pub mod checkout;

pub use auth::{
    AcceptAnyCredentials, AuthError, AuthStore, CredentialVerifier, RequireValidEmail,
};
pub use cart::{CartError, CartStore, OrderSummary};
pub use checkout::{CheckoutError, OrderConfirmation, PendingOrder, checkout};
