//! Cart store.
//!
//! Holds the shopper's cart lines and writes the full line list through to
//! storage under [`keys::CART`] after every mutation. A mutation is applied to
//! a copy first and only becomes visible once it has been persisted, so a
//! failed write leaves the cart exactly as it was.

use serde::Serialize;
use thiserror::Error;
use tracing::instrument;

use phantom_spares_core::{CartLine, Price, Product, ProductId};

use crate::storage::{SharedStorage, StorageError, keys, load_json, save_json};

/// Orders with a subtotal above this ship free.
pub const FREE_SHIPPING_THRESHOLD: Price = Price::new(100);

/// Shipping charged at or below [`FREE_SHIPPING_THRESHOLD`].
pub const FLAT_SHIPPING_FEE: Price = Price::new(10);

/// Errors from cart mutations.
#[derive(Debug, Error)]
pub enum CartError {
    /// Quantities must be at least 1.
    #[error("quantity must be at least 1 (got {0})")]
    InvalidQuantity(u32),

    /// Persisting the cart failed; the cart is unchanged.
    #[error("failed to persist cart: {0}")]
    Storage(#[from] StorageError),
}

/// Price breakdown shown next to the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderSummary {
    /// Sum of all line quantities.
    pub item_count: u32,
    pub subtotal: Price,
    pub shipping: Price,
    pub total: Price,
}

impl OrderSummary {
    /// Summary for a cart with `item_count` items worth `subtotal`.
    ///
    /// An empty cart has nothing to ship and costs nothing.
    #[must_use]
    pub fn new(item_count: u32, subtotal: Price) -> Self {
        let shipping = if item_count == 0 || subtotal > FREE_SHIPPING_THRESHOLD {
            Price::ZERO
        } else {
            FLAT_SHIPPING_FEE
        };
        Self {
            item_count,
            subtotal,
            shipping,
            total: subtotal + shipping,
        }
    }

    /// Whether shipping is free for this order.
    #[must_use]
    pub fn free_shipping(&self) -> bool {
        self.shipping == Price::ZERO
    }
}

/// The shopper's cart.
///
/// At most one line per product; every line has a quantity of at least 1.
pub struct CartStore {
    storage: SharedStorage,
    lines: Vec<CartLine>,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("lines", &self.lines)
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Open the cart persisted in `storage`.
    ///
    /// A missing value is an empty cart. A value that fails to decode is
    /// logged and ignored; it is overwritten by the next mutation.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the backend cannot be read.
    pub fn open(storage: SharedStorage) -> Result<Self, CartError> {
        let lines = match load_json::<Vec<CartLine>>(storage.as_ref(), keys::CART) {
            Ok(lines) => lines.map(sanitize).unwrap_or_default(),
            Err(err @ StorageError::Corrupt { .. }) => {
                tracing::warn!(error = %err, "Ignoring unreadable persisted cart");
                Vec::new()
            }
            Err(err) => return Err(err.into()),
        };
        tracing::debug!(lines = lines.len(), "Opened cart");
        Ok(Self { storage, lines })
    }

    /// Current lines, in the order they were first added.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// The line for `product_id`, if any.
    #[must_use]
    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product_id == product_id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Add `quantity` of `product`, merging into an existing line.
    ///
    /// Returns the line's new quantity.
    ///
    /// # Errors
    ///
    /// Returns `CartError::InvalidQuantity` for a quantity of 0 and
    /// `CartError::Storage` if the cart cannot be persisted.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add(&mut self, product: &Product, quantity: u32) -> Result<u32, CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity(quantity));
        }

        let mut next = self.lines.clone();
        let new_quantity = if let Some(line) = next.iter_mut().find(|l| l.product_id == product.id) {
            line.quantity = line.quantity.saturating_add(quantity);
            line.quantity
        } else {
            next.push(CartLine::snapshot(product, quantity));
            quantity
        };

        self.commit(next)?;
        tracing::debug!(quantity = new_quantity, "Added to cart");
        Ok(new_quantity)
    }

    /// Replace the quantity of an existing line.
    ///
    /// Returns `false` without touching storage when the product is not in
    /// the cart.
    ///
    /// # Errors
    ///
    /// Returns `CartError::InvalidQuantity` for a quantity below 1 (the line
    /// is left unchanged) and `CartError::Storage` if the cart cannot be
    /// persisted.
    #[instrument(skip(self))]
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: u32) -> Result<bool, CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity(quantity));
        }

        let mut next = self.lines.clone();
        let Some(line) = next.iter_mut().find(|l| l.product_id == product_id) else {
            return Ok(false);
        };
        line.quantity = quantity;

        self.commit(next)?;
        Ok(true)
    }

    /// Remove the line for `product_id`. Returns whether a line was removed.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the cart cannot be persisted.
    #[instrument(skip(self))]
    pub fn remove(&mut self, product_id: ProductId) -> Result<bool, CartError> {
        if self.line(product_id).is_none() {
            return Ok(false);
        }
        let next = self
            .lines
            .iter()
            .filter(|line| line.product_id != product_id)
            .cloned()
            .collect();
        self.commit(next)?;
        Ok(true)
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the cart cannot be persisted.
    #[instrument(skip(self))]
    pub fn clear(&mut self) -> Result<(), CartError> {
        self.commit(Vec::new())
    }

    /// Sum of `price * quantity` over all lines.
    #[must_use]
    pub fn total(&self) -> Price {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Sum of all quantities.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |count, line| count.saturating_add(line.quantity))
    }

    /// Subtotal, shipping and total for the current cart.
    #[must_use]
    pub fn summary(&self) -> OrderSummary {
        OrderSummary::new(self.item_count(), self.total())
    }

    fn commit(&mut self, next: Vec<CartLine>) -> Result<(), CartError> {
        save_json(self.storage.as_ref(), keys::CART, &next)?;
        self.lines = next;
        Ok(())
    }
}

/// Drop lines that break the cart's invariants: zero quantities and
/// duplicate product ids (the first line wins).
fn sanitize(lines: Vec<CartLine>) -> Vec<CartLine> {
    let mut kept: Vec<CartLine> = Vec::with_capacity(lines.len());
    for line in lines {
        if line.quantity == 0 {
            tracing::warn!(product_id = %line.product_id, "Dropping persisted cart line with zero quantity");
        } else if kept.iter().any(|k| k.product_id == line.product_id) {
            tracing::warn!(product_id = %line.product_id, "Dropping duplicate persisted cart line");
        } else {
            kept.push(line);
        }
    }
    kept
}
