//! Checkout command.
//!
//! # Usage
//!
//! ```bash
//! phantom-cli checkout
//! ```

use std::fmt::Write as _;

use phantom_spares_storefront::services::checkout;

use super::{CliError, Shop};

/// Place an order for everything in the cart.
///
/// # Errors
///
/// Returns `CliError::Checkout` when signed out, when the cart is empty or
/// when the emptied cart cannot be written.
pub async fn run(shop: &mut Shop) -> Result<String, CliError> {
    let user = shop.auth.current_user();
    let confirmation = checkout(&mut shop.cart, user, shop.config.checkout_delay).await?;

    let summary = confirmation.summary;
    let shipping = if summary.free_shipping() {
        "Free".to_string()
    } else {
        summary.shipping.display()
    };

    let mut out = String::new();
    let _ = writeln!(out, "Order {} placed.", confirmation.order_id);
    let _ = writeln!(
        out,
        "{} items, total {} (shipping {shipping})",
        summary.item_count,
        summary.total.display(),
    );
    let _ = write!(out, "Confirmation sent to {}", confirmation.email);
    Ok(out)
}
