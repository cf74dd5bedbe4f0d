//! Product route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use phantom_spares_core::{Category, Product, ProductId};

use crate::catalog::{CatalogView, RELATED_LIMIT, SortKey};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Listing query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ListingQuery {
    pub q: Option<String>,
    pub sort: Option<String>,
    pub page: Option<usize>,
}

impl ListingQuery {
    /// Build the catalog view this query describes.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` for an unknown sort key.
    pub fn to_view(&self, page_size: usize) -> Result<CatalogView> {
        let sort = self
            .sort
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(str::parse::<SortKey>)
            .transpose()
            .map_err(|e| AppError::BadRequest(e.to_string()))?
            .unwrap_or_default();

        Ok(CatalogView::new(page_size)
            .with_query(self.q.clone().unwrap_or_default())
            .with_sort(sort)
            .with_page(self.page.unwrap_or(1)))
    }
}

/// Product detail response.
#[derive(Debug, Serialize)]
pub struct ProductDetail {
    pub product: Product,
    /// "set", "pair" or "piece".
    pub selling_unit: &'static str,
    pub related: Vec<Product>,
}

/// Category listing entry.
#[derive(Debug, Serialize)]
pub struct CategoryView {
    pub name: &'static str,
    pub slug: String,
    pub selling_unit: &'static str,
    pub product_count: usize,
}

/// Filtered, sorted and paginated product listing.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> Result<Json<serde_json::Value>> {
    let view = query.to_view(state.config().page_size)?;
    let page = state.catalog().page(&view);
    tracing::debug!(
        total_items = page.total_items,
        page = page.page,
        "Catalog listing"
    );
    serde_json::to_value(&page)
        .map(Json)
        .map_err(|e| AppError::Internal(e.to_string()))
}

/// Product detail with related products from the same category.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<ProductDetail>> {
    let catalog = state.catalog();
    let product = catalog
        .find(id)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    Ok(Json(ProductDetail {
        product: product.clone(),
        selling_unit: product.category.selling_unit().label(),
        related: catalog
            .related(product, RELATED_LIMIT)
            .into_iter()
            .cloned()
            .collect(),
    }))
}

/// All categories, including ones with no products.
pub async fn categories(State(state): State<AppState>) -> Json<Vec<CategoryView>> {
    let products = state.catalog().products();
    Json(
        Category::ALL
            .iter()
            .map(|category| CategoryView {
                name: category.name(),
                slug: category.slug(),
                selling_unit: category.selling_unit().label(),
                product_count: products.iter().filter(|p| p.category == *category).count(),
            })
            .collect(),
    )
}
