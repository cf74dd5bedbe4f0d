//! Catalog browsing commands.
//!
//! # Usage
//!
//! ```bash
//! phantom-cli --seed 7 products list --query brake --sort price-low --page 2
//! phantom-cli --seed 7 products show 12
//! phantom-cli products categories
//! ```

use std::fmt::Write as _;

use phantom_spares_core::{Category, Product, ProductId};
use phantom_spares_storefront::catalog::{CatalogPage, CatalogView, PageLink, RELATED_LIMIT, SortKey};

use super::{CliError, Shop};

/// Render one listing page.
///
/// # Errors
///
/// Returns `CliError::InvalidArgument` for an unknown sort key.
pub fn list(shop: &Shop, query: &str, sort: Option<&str>, page: usize) -> Result<String, CliError> {
    let sort = sort
        .map(str::parse::<SortKey>)
        .transpose()
        .map_err(|e| CliError::InvalidArgument(e.to_string()))?
        .unwrap_or_default();

    let view = CatalogView::new(shop.config.page_size)
        .with_query(query)
        .with_sort(sort)
        .with_page(page);

    Ok(render_listing(&shop.catalog.page(&view)))
}

/// Render a product with its related products.
///
/// # Errors
///
/// Returns `CliError::ProductNotFound` for an unknown id.
pub fn show(shop: &Shop, id: ProductId) -> Result<String, CliError> {
    let product = shop.product(id)?;
    let related = shop.catalog.related(product, RELATED_LIMIT);
    Ok(render_product(product, &related))
}

/// Render every category with its slug and product count.
#[must_use]
pub fn categories(shop: &Shop) -> String {
    let mut out = String::new();
    for category in Category::ALL {
        let count = shop
            .catalog
            .products()
            .iter()
            .filter(|p| p.category == category)
            .count();
        let _ = writeln!(
            out,
            "{:<16} {:<16} {:>3} products (sold per {})",
            category.name(),
            category.slug(),
            count,
            category.selling_unit().label()
        );
    }
    out.trim_end().to_string()
}

fn render_listing(page: &CatalogPage<'_>) -> String {
    if page.no_results {
        return if page.query.is_empty() {
            "The catalog is empty.".to_string()
        } else {
            format!("No products match \"{}\".", page.query)
        };
    }

    let mut out = String::new();
    for product in &page.items {
        let _ = writeln!(out, "{}", product_row(product));
    }
    if page.items.is_empty() {
        let _ = writeln!(out, "(no products on this page)");
    }

    let links: Vec<String> = page
        .links
        .iter()
        .map(|link| match link {
            PageLink::Page { number } if *number == page.page => format!("[{number}]"),
            PageLink::Page { number } => number.to_string(),
            PageLink::Ellipsis => "...".to_string(),
        })
        .collect();
    let _ = write!(
        out,
        "\nPage {} of {} ({} products, sorted by {})",
        page.page,
        page.total_pages,
        page.total_items,
        page.sort.label()
    );
    if links.len() > 1 {
        let _ = write!(out, "  {}", links.join(" "));
    }
    out
}

fn product_row(product: &Product) -> String {
    format!(
        "{:>4}  {:<36} {:<16} {:>12}  {}",
        product.id,
        product.name,
        product.category.name(),
        product.price.display(),
        product.rating
    )
}

fn render_product(product: &Product, related: &[&Product]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} (#{})", product.name, product.id);
    let _ = writeln!(
        out,
        "{} | {} per {} | rated {} | {}",
        product.category,
        product.price.display(),
        product.category.selling_unit().label(),
        product.rating,
        if product.in_stock { "in stock" } else { "out of stock" }
    );
    let _ = writeln!(out, "\n{}", product.description);

    let _ = writeln!(out, "\nFeatures:");
    for feature in &product.features {
        let _ = writeln!(out, "  - {feature}");
    }

    let _ = writeln!(out, "\nSpecifications:");
    for (key, value) in product.specs.iter() {
        let _ = writeln!(out, "  {key}: {value}");
    }

    if !related.is_empty() {
        let _ = writeln!(out, "\nRelated products:");
        for other in related {
            let _ = writeln!(out, "{}", product_row(other));
        }
    }
    out.trim_end().to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use phantom_spares_storefront::config::StorefrontConfig;

    use super::*;

    fn shop() -> Shop {
        let config = StorefrontConfig {
            data_dir: None,
            catalog_seed: Some(5),
            ..StorefrontConfig::default()
        };
        Shop::open(config).unwrap()
    }

    #[test]
    fn test_list_first_page() {
        let shop = shop();
        let report = list(&shop, "", None, 1).unwrap();
        assert_eq!(report.lines().take_while(|l| !l.is_empty()).count(), 12);
        assert!(report.contains("Page 1 of 9 (100 products, sorted by Featured)"));
        assert!(report.contains("[1]"));
    }

    #[test]
    fn test_list_no_results() {
        let shop = shop();
        let report = list(&shop, "flux capacitor", None, 1).unwrap();
        assert_eq!(report, "No products match \"flux capacitor\".");
    }

    #[test]
    fn test_list_rejects_unknown_sort() {
        let shop = shop();
        assert!(matches!(
            list(&shop, "", Some("cheapest"), 1),
            Err(CliError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_show_unknown_product() {
        let shop = shop();
        assert!(matches!(
            show(&shop, ProductId::new(101)),
            Err(CliError::ProductNotFound(_))
        ));
    }

    #[test]
    fn test_show_includes_specs() {
        let shop = shop();
        let report = show(&shop, ProductId::new(1)).unwrap();
        assert!(report.contains("material: "));
        assert!(report.contains("warranty: "));
        assert!(report.contains("Features:"));
    }

    #[test]
    fn test_categories_lists_all() {
        let shop = shop();
        assert_eq!(categories(&shop).lines().count(), Category::ALL.len());
    }
}
