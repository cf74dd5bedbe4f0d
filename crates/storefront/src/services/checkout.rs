//! Simulated checkout.
//!
//! No payment is taken. Checkout waits for the configured processing delay,
//! clears the cart and hands back a confirmation pointing at the success
//! page. Dropping the future during the delay leaves the cart untouched.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::instrument;
use uuid::Uuid;

use phantom_spares_core::{CartLine, User};

use super::cart::{CartError, CartStore, OrderSummary};

/// Where unauthenticated shoppers are sent, returning to the cart afterwards.
pub const LOGIN_REDIRECT: &str = "/auth/login?redirect=/cart";

/// Where a completed checkout lands.
pub const SUCCESS_REDIRECT: &str = "/checkout/success";

/// Default simulated processing time.
pub const DEFAULT_PROCESSING_DELAY: Duration = Duration::from_millis(2000);

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("login required to check out")]
    LoginRequired,

    #[error("cart is empty")]
    EmptyCart,

    #[error(transparent)]
    Cart(#[from] CartError),
}

impl CheckoutError {
    /// Redirect target for errors that send the shopper elsewhere.
    #[must_use]
    pub const fn redirect(&self) -> Option<&'static str> {
        match self {
            Self::LoginRequired => Some(LOGIN_REDIRECT),
            Self::EmptyCart | Self::Cart(_) => None,
        }
    }
}

/// Receipt for a placed order.
#[derive(Debug, Clone, Serialize)]
pub struct OrderConfirmation {
    pub order_id: Uuid,
    pub placed_at: DateTime<Utc>,
    pub email: String,
    pub lines: Vec<CartLine>,
    pub summary: OrderSummary,
    pub redirect: &'static str,
}

/// An order that passed validation and is waiting out the processing delay.
///
/// Holds a snapshot of the cart, so the cart itself need not stay borrowed
/// while the order is pending.
#[derive(Debug, Clone)]
pub struct PendingOrder {
    email: String,
    lines: Vec<CartLine>,
    summary: OrderSummary,
}

impl PendingOrder {
    /// Check the shopper and snapshot the cart.
    ///
    /// # Errors
    ///
    /// - `CheckoutError::LoginRequired` when `user` is `None`
    /// - `CheckoutError::EmptyCart` when there is nothing to buy
    #[instrument(skip_all, fields(user_id = tracing::field::Empty))]
    pub fn begin(cart: &CartStore, user: Option<&User>) -> Result<Self, CheckoutError> {
        let Some(user) = user else {
            tracing::debug!("Checkout attempted while signed out");
            return Err(CheckoutError::LoginRequired);
        };
        tracing::Span::current().record("user_id", tracing::field::display(user.id));

        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        Ok(Self {
            email: user.email.clone(),
            lines: cart.lines().to_vec(),
            summary: cart.summary(),
        })
    }

    /// Empty the cart and issue the confirmation.
    ///
    /// The whole cart is cleared, including anything added after
    /// [`Self::begin`]; the confirmation lists the snapshot.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::Cart` when the emptied cart cannot be
    /// persisted; the cart is left as it was.
    pub fn complete(self, cart: &mut CartStore) -> Result<OrderConfirmation, CheckoutError> {
        cart.clear()?;

        let confirmation = OrderConfirmation {
            order_id: Uuid::new_v4(),
            placed_at: Utc::now(),
            email: self.email,
            lines: self.lines,
            summary: self.summary,
            redirect: SUCCESS_REDIRECT,
        };
        tracing::info!(
            order_id = %confirmation.order_id,
            items = confirmation.summary.item_count,
            total = %confirmation.summary.total,
            "Order placed"
        );
        Ok(confirmation)
    }
}

/// Place an order for everything in `cart`.
///
/// # Errors
///
/// - `CheckoutError::LoginRequired` when `user` is `None`
/// - `CheckoutError::EmptyCart` when there is nothing to buy
/// - `CheckoutError::Cart` when the emptied cart cannot be persisted
#[instrument(skip(cart, user))]
pub async fn checkout(
    cart: &mut CartStore,
    user: Option<&User>,
    delay: Duration,
) -> Result<OrderConfirmation, CheckoutError> {
    let order = PendingOrder::begin(cart, user)?;
    tokio::time::sleep(delay).await;
    order.complete(cart)
}
