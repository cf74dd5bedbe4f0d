//! Checkout route handler.

use axum::{Json, extract::State};
use tracing::instrument;

use crate::error::{Result, add_breadcrumb};
use crate::services::checkout::{OrderConfirmation, PendingOrder};
use crate::state::AppState;

/// Place an order for the current cart.
///
/// Signed-out shoppers get a 303 to the login page with a redirect back to
/// the cart. Neither the auth nor the cart lock is held across the
/// processing delay, so cart and session reads stay responsive while an
/// order is pending.
#[instrument(skip(state))]
pub async fn place_order(State(state): State<AppState>) -> Result<Json<OrderConfirmation>> {
    let user = state.auth().lock().await.current_user().cloned();
    let order = PendingOrder::begin(&*state.cart().lock().await, user.as_ref())?;

    tokio::time::sleep(state.config().checkout_delay).await;

    let confirmation = order.complete(&mut *state.cart().lock().await)?;

    let order_id = confirmation.order_id.to_string();
    add_breadcrumb("checkout", "Order placed", Some(&[("order_id", order_id.as_str())]));
    Ok(Json(confirmation))
}
