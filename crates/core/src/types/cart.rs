//! Cart line record.

use serde::{Deserialize, Serialize};

use super::{Category, Price, Product, ProductId};

/// One row of the cart.
///
/// Holds a snapshot of the product's display fields taken when the line was
/// first added; later catalog changes do not touch it. Persisted as
/// `{"id", "name", "price", "image", "category", "quantity"}`; unknown fields
/// in stored data are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(rename = "id")]
    pub product_id: ProductId,
    pub name: String,
    pub price: Price,
    pub image: String,
    pub category: Category,
    pub quantity: u32,
}

impl CartLine {
    /// Snapshot `product` into a new line.
    #[must_use]
    pub fn snapshot(product: &Product, quantity: u32) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
            category: product.category,
            quantity,
        }
    }

    /// `price * quantity`.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_ignores_extra_product_fields() {
        let json = r#"{
            "id": 4,
            "name": "Premium Brake Pads D",
            "price": 9100,
            "image": "/products/default-product.svg",
            "category": "Brakes",
            "rating": 4.4,
            "inStock": true,
            "quantity": 2
        }"#;
        let line: CartLine = serde_json::from_str(json).unwrap();
        assert_eq!(line.product_id, ProductId::new(4));
        assert_eq!(line.quantity, 2);
        assert_eq!(line.line_total(), Price::new(18_200));
    }

    #[test]
    fn test_serialize_uses_id_key() {
        let line = CartLine {
            product_id: ProductId::new(9),
            name: "Alloy Wheel Set I".to_string(),
            price: Price::new(80_000),
            image: "/products/default-product.svg".to_string(),
            category: Category::Wheels,
            quantity: 1,
        };
        let value = serde_json::to_value(&line).unwrap();
        assert_eq!(value["id"], 9);
        assert_eq!(value["category"], "Wheels");
    }
}
