//! HTTP route handlers for storefront.
//!
//! Every handler answers with JSON.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check
//!
//! # Catalog
//! GET  /products               - Listing (?q=&sort=&page=)
//! GET  /products/{id}          - Product detail with related products
//! GET  /categories             - Categories with slug and selling unit
//!
//! # Cart
//! GET  /cart                   - Lines and order summary
//! GET  /cart/count             - Item count badge
//! POST /cart/add               - Add a product
//! POST /cart/update            - Replace a line's quantity
//! POST /cart/remove            - Remove a line
//! POST /cart/clear             - Empty the cart
//!
//! # Auth
//! POST /auth/login             - Sign in (?redirect=)
//! POST /auth/register          - Create account and sign in (?redirect=)
//! POST /auth/logout            - Sign out
//! GET  /auth/me                - Current shopper
//!
//! # Checkout (requires auth)
//! POST /checkout               - Place the order
//! ```

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/count", get(cart::count))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/register", post(auth::register))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        // Catalog
        .nest("/products", product_routes())
        .route("/categories", get(products::categories))
        // Cart
        .nest("/cart", cart_routes())
        // Auth
        .nest("/auth", auth_routes())
        // Checkout
        .route("/checkout", post(checkout::place_order))
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running.
async fn health() -> &'static str {
    "ok"
}
