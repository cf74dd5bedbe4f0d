//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! phantom-cli --seed 7 cart add 12 --quantity 2
//! phantom-cli cart update 12 5
//! phantom-cli cart remove 12
//! phantom-cli cart show
//! phantom-cli cart clear
//! ```

use std::fmt::Write as _;

use phantom_spares_core::ProductId;
use phantom_spares_storefront::services::CartStore;

use super::{CliError, Shop};

/// Render the cart with its order summary.
#[must_use]
pub fn show(cart: &CartStore) -> String {
    if cart.is_empty() {
        return "Your cart is empty.".to_string();
    }

    let mut out = String::new();
    for line in cart.lines() {
        let _ = writeln!(
            out,
            "{:>4}  {:<36} {:>3} x {:>12} = {:>12}",
            line.product_id,
            line.name,
            line.quantity,
            line.price.display(),
            line.line_total().display()
        );
    }

    let summary = cart.summary();
    let shipping = if summary.free_shipping() {
        "Free".to_string()
    } else {
        summary.shipping.display()
    };
    let _ = writeln!(out, "\nItems:    {}", summary.item_count);
    let _ = writeln!(out, "Subtotal: {}", summary.subtotal.display());
    let _ = writeln!(out, "Shipping: {shipping}");
    let _ = write!(out, "Total:    {}", summary.total.display());
    out
}

/// Add a catalog product to the cart.
///
/// # Errors
///
/// Returns `CliError` for an unknown product, a zero quantity or a failed
/// write.
pub fn add(shop: &mut Shop, id: ProductId, quantity: u32) -> Result<String, CliError> {
    let product = shop.catalog.find(id).ok_or(CliError::ProductNotFound(id))?;
    let now = shop.cart.add(product, quantity)?;
    Ok(format!("{} now in cart x{now}", product.name))
}

/// Replace the quantity of a line.
///
/// # Errors
///
/// Returns `CliError` for a zero quantity or a failed write.
pub fn update(shop: &mut Shop, id: ProductId, quantity: u32) -> Result<String, CliError> {
    Ok(if shop.cart.update_quantity(id, quantity)? {
        format!("Product {id} quantity set to {quantity}")
    } else {
        format!("Product {id} is not in the cart")
    })
}

/// Remove a line.
///
/// # Errors
///
/// Returns `CliError` if the cart cannot be written.
pub fn remove(shop: &mut Shop, id: ProductId) -> Result<String, CliError> {
    Ok(if shop.cart.remove(id)? {
        format!("Removed product {id}")
    } else {
        format!("Product {id} is not in the cart")
    })
}

/// Empty the cart.
///
/// # Errors
///
/// Returns `CliError` if the cart cannot be written.
pub fn clear(shop: &mut Shop) -> Result<String, CliError> {
    shop.cart.clear()?;
    Ok("Cart cleared".to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use phantom_spares_storefront::config::StorefrontConfig;

    use super::*;

    fn shop_in(dir: &std::path::Path) -> Shop {
        let config = StorefrontConfig {
            data_dir: Some(dir.to_path_buf()),
            catalog_seed: Some(21),
            ..StorefrontConfig::default()
        };
        Shop::open(config).unwrap()
    }

    #[test]
    fn test_cart_persists_between_invocations() {
        let dir = tempfile::tempdir().unwrap();

        let mut shop = shop_in(dir.path());
        add(&mut shop, ProductId::new(3), 2).unwrap();
        let report = add(&mut shop, ProductId::new(3), 1).unwrap();
        assert!(report.ends_with("x3"));

        let shop = shop_in(dir.path());
        assert_eq!(shop.cart.item_count(), 3);
        assert!(show(&shop.cart).contains("Items:    3"));
    }

    #[test]
    fn test_update_and_remove_absent_line() {
        let dir = tempfile::tempdir().unwrap();
        let mut shop = shop_in(dir.path());
        assert_eq!(
            update(&mut shop, ProductId::new(9), 4).unwrap(),
            "Product 9 is not in the cart"
        );
        assert_eq!(
            remove(&mut shop, ProductId::new(9)).unwrap(),
            "Product 9 is not in the cart"
        );
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut shop = shop_in(dir.path());
        add(&mut shop, ProductId::new(1), 1).unwrap();
        assert!(matches!(
            update(&mut shop, ProductId::new(1), 0),
            Err(CliError::Cart(_))
        ));
        assert_eq!(shop.cart.item_count(), 1);
    }

    #[test]
    fn test_empty_cart_report() {
        let dir = tempfile::tempdir().unwrap();
        let mut shop = shop_in(dir.path());
        clear(&mut shop).unwrap();
        assert_eq!(show(&shop.cart), "Your cart is empty.");
    }
}
