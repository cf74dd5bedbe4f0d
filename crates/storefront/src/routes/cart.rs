//! Cart route handlers.
//!
//! Every mutation answers with the full cart so clients can redraw the line
//! list and the order summary from one response.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use phantom_spares_core::{CartLine, ProductId};

use crate::error::{AppError, Result, add_breadcrumb};
use crate::services::cart::{CartStore, OrderSummary};
use crate::state::AppState;

/// Cart contents and price breakdown.
#[derive(Debug, Serialize)]
pub struct CartView {
    pub lines: Vec<CartLine>,
    pub summary: OrderSummary,
    /// Whether the request changed the cart.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changed: Option<bool>,
}

impl CartView {
    fn of(cart: &CartStore) -> Self {
        Self {
            lines: cart.lines().to_vec(),
            summary: cart.summary(),
            changed: None,
        }
    }

    const fn with_changed(mut self, changed: bool) -> Self {
        self.changed = Some(changed);
        self
    }
}

/// Cart count badge.
#[derive(Debug, Serialize)]
pub struct CartCount {
    pub count: u32,
}

/// Add to cart request body.
#[derive(Debug, Deserialize)]
pub struct AddToCart {
    pub product_id: ProductId,
    pub quantity: Option<u32>,
}

/// Update quantity request body.
#[derive(Debug, Deserialize)]
pub struct UpdateCart {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Remove line request body.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCart {
    pub product_id: ProductId,
}

/// Display the cart.
pub async fn show(State(state): State<AppState>) -> Json<CartView> {
    let cart = state.cart().lock().await;
    Json(CartView::of(&cart))
}

/// Total number of items in the cart.
pub async fn count(State(state): State<AppState>) -> Json<CartCount> {
    let cart = state.cart().lock().await;
    Json(CartCount {
        count: cart.item_count(),
    })
}

/// Add a product to the cart, merging with an existing line.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    Json(body): Json<AddToCart>,
) -> Result<Json<CartView>> {
    let product = state
        .catalog()
        .find(body.product_id)
        .ok_or_else(|| AppError::NotFound(format!("product {}", body.product_id)))?;

    let mut cart = state.cart().lock().await;
    cart.add(product, body.quantity.unwrap_or(1))?;

    let product_id = body.product_id.to_string();
    add_breadcrumb("cart", "Added to cart", Some(&[("product_id", product_id.as_str())]));
    Ok(Json(CartView::of(&cart).with_changed(true)))
}

/// Replace a line's quantity.
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    Json(body): Json<UpdateCart>,
) -> Result<Json<CartView>> {
    let mut cart = state.cart().lock().await;
    let changed = cart.update_quantity(body.product_id, body.quantity)?;
    Ok(Json(CartView::of(&cart).with_changed(changed)))
}

/// Remove a line.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Json(body): Json<RemoveFromCart>,
) -> Result<Json<CartView>> {
    let mut cart = state.cart().lock().await;
    let changed = cart.remove(body.product_id)?;
    Ok(Json(CartView::of(&cart).with_changed(changed)))
}

/// Empty the cart.
#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>) -> Result<Json<CartView>> {
    let mut cart = state.cart().lock().await;
    let changed = !cart.is_empty();
    cart.clear()?;
    Ok(Json(CartView::of(&cart).with_changed(changed)))
}
