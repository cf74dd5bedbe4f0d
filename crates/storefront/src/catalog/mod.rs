//! Product catalog.
//!
//! The catalog is generated once at startup and never changes afterwards, so
//! it is shared behind an `Arc` and read without locking.

pub mod generator;
pub mod view;

use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;

use phantom_spares_core::{Product, ProductId};

pub use generator::{ProductTemplate, TEMPLATES, generate, generate_with};
pub use view::{CatalogPage, CatalogView, PageLink, SortKey, SortKeyParseError};

/// Number of related products shown on a product page.
pub const RELATED_LIMIT: usize = 4;

/// An immutable, cheaply cloneable product list.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Arc<[Product]>,
}

impl Catalog {
    /// Wrap an existing product list.
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products: products.into(),
        }
    }

    /// Generate `count` products, reproducibly when `seed` is given.
    #[must_use]
    pub fn generate(count: u32, seed: Option<u64>) -> Self {
        let products = match seed {
            Some(seed) => generate_with(count, &mut StdRng::seed_from_u64(seed)),
            None => generate(count),
        };
        tracing::info!(count, seeded = seed.is_some(), "Generated product catalog");
        Self::new(products)
    }

    /// All products in generation order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Look up a product by id.
    #[must_use]
    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Up to `limit` other products from the same category, in catalog order.
    #[must_use]
    pub fn related(&self, product: &Product, limit: usize) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.category == product.category && p.id != product.id)
            .take(limit)
            .collect()
    }

    /// Apply a listing view to the catalog.
    #[must_use]
    pub fn page(&self, view: &CatalogView) -> CatalogPage<'_> {
        view.apply(&self.products)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_catalog_is_reproducible() {
        let a = Catalog::generate(25, Some(3));
        let b = Catalog::generate(25, Some(3));
        assert_eq!(a.products(), b.products());
        assert_eq!(a.len(), 25);
    }

    #[test]
    fn test_find() {
        let catalog = Catalog::generate(10, Some(1));
        assert_eq!(catalog.find(ProductId::new(10)).unwrap().id, ProductId::new(10));
        assert!(catalog.find(ProductId::new(11)).is_none());
        assert!(catalog.find(ProductId::new(0)).is_none());
    }

    #[test]
    fn test_related_same_category_excluding_self() {
        let catalog = Catalog::generate(100, Some(9));
        let product = catalog.find(ProductId::new(1)).unwrap();
        let related = catalog.related(product, RELATED_LIMIT);
        assert!(related.len() <= RELATED_LIMIT);
        assert!(!related.is_empty());
        for other in &related {
            assert_eq!(other.category, product.category);
            assert_ne!(other.id, product.id);
        }
        assert!(related.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::generate(0, None);
        assert!(catalog.is_empty());
        assert!(catalog.page(&CatalogView::default()).no_results);
    }
}
