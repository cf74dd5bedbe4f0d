//! Catalog listing logic: search, sort and pagination.
//!
//! [`CatalogView`] holds the shopper's current listing state. Filtering and
//! sorting never mutate the catalog; they produce a new ordering of borrowed
//! products which is then sliced into pages.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use phantom_spares_core::Product;

/// Default number of products per listing page.
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// Error returned for an unknown sort key name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sort key {0:?} (expected one of: featured, price-low, price-high, name-asc, name-desc, rating)")]
pub struct SortKeyParseError(pub String);

/// Listing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Generation order, untouched.
    #[default]
    Featured,
    PriceLow,
    PriceHigh,
    NameAsc,
    NameDesc,
    /// Highest rated first.
    Rating,
}

impl SortKey {
    pub const ALL: [Self; 6] = [
        Self::Featured,
        Self::PriceLow,
        Self::PriceHigh,
        Self::NameAsc,
        Self::NameDesc,
        Self::Rating,
    ];

    /// Wire name (`price-low`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Featured => "featured",
            Self::PriceLow => "price-low",
            Self::PriceHigh => "price-high",
            Self::NameAsc => "name-asc",
            Self::NameDesc => "name-desc",
            Self::Rating => "rating",
        }
    }

    /// Human-readable label for a sort picker.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Featured => "Featured",
            Self::PriceLow => "Price: Low to High",
            Self::PriceHigh => "Price: High to Low",
            Self::NameAsc => "Name: A to Z",
            Self::NameDesc => "Name: Z to A",
            Self::Rating => "Highest Rated",
        }
    }

    /// Ordering between two products under this key.
    ///
    /// `Featured` treats everything as equal so a stable sort keeps
    /// generation order.
    #[must_use]
    pub fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            Self::Featured => Ordering::Equal,
            Self::PriceLow => a.price.cmp(&b.price),
            Self::PriceHigh => b.price.cmp(&a.price),
            Self::NameAsc => compare_names(&a.name, &b.name),
            Self::NameDesc => compare_names(&b.name, &a.name),
            Self::Rating => b.rating.cmp(&a.rating),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = SortKeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| SortKeyParseError(s.to_string()))
    }
}

/// Human-style name comparison: case-insensitive first, raw text as the
/// tiebreak so the order is total.
#[must_use]
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Products whose name or category contains `query`, ignoring case.
///
/// The query is matched as typed, whitespace included. An empty query keeps
/// everything.
#[must_use]
pub fn filter_products<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    let needle = query.to_lowercase();
    products
        .iter()
        .filter(|product| product.matches_lowercase(&needle))
        .collect()
}

/// Stable sort by `key`.
pub fn sort_products(products: &mut [&Product], key: SortKey) {
    if key != SortKey::Featured {
        products.sort_by(|a, b| key.compare(a, b));
    }
}

/// Number of pages needed for `len` items; zero for an empty list.
#[must_use]
pub const fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        0
    } else {
        len.div_ceil(page_size)
    }
}

/// Slice `[(page-1)*size, page*size)` clipped to `items`.
///
/// Pages are 1-based; page 0 is treated as page 1. A page past the end is
/// an empty slice.
#[must_use]
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let start = page.max(1).saturating_sub(1).saturating_mul(page_size);
    let end = start.saturating_add(page_size).min(items.len());
    items.get(start..end).unwrap_or(&[])
}

/// One entry of the pagination control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PageLink {
    Page { number: usize },
    Ellipsis,
}

/// Links for a pagination control: first, previous, current, next and last
/// page, with an ellipsis standing in for each gap.
///
/// `current` is clamped into `1..=total`. Returns nothing when there are no
/// pages.
#[must_use]
pub fn page_links(current: usize, total: usize) -> Vec<PageLink> {
    if total == 0 {
        return Vec::new();
    }
    let current = current.clamp(1, total);
    let page = |number| PageLink::Page { number };

    let mut links = vec![page(1)];
    if current > 2 {
        if current - 1 > 2 {
            links.push(PageLink::Ellipsis);
        }
        links.push(page(current - 1));
    }
    if current != 1 && current != total {
        links.push(page(current));
    }
    if current + 1 < total {
        links.push(page(current + 1));
        if current + 1 < total - 1 {
            links.push(PageLink::Ellipsis);
        }
    }
    if total != 1 {
        links.push(page(total));
    }
    links
}

/// One page of listing results.
#[derive(Debug, Serialize)]
pub struct CatalogPage<'a> {
    pub items: Vec<&'a Product>,
    pub query: String,
    pub sort: SortKey,
    pub page: usize,
    pub page_size: usize,
    /// Matches across all pages.
    pub total_items: usize,
    pub total_pages: usize,
    /// True when the search matched nothing at all.
    pub no_results: bool,
    pub links: Vec<PageLink>,
}

/// The shopper's listing state: search text, sort order and active page.
///
/// Changing the query or the sort key sends the shopper back to page 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogView {
    query: String,
    sort: SortKey,
    page: usize,
    page_size: usize,
}

impl Default for CatalogView {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl CatalogView {
    /// Fresh view on page 1 with no search and featured order.
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self {
            query: String::new(),
            sort: SortKey::Featured,
            page: 1,
            page_size: page_size.max(1),
        }
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub const fn sort(&self) -> SortKey {
        self.sort
    }

    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Replace the search text; resets to page 1 when it changes.
    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if query != self.query {
            self.query = query;
            self.page = 1;
        }
    }

    /// Replace the sort key; resets to page 1 when it changes.
    pub fn set_sort(&mut self, sort: SortKey) {
        if sort != self.sort {
            self.sort = sort;
            self.page = 1;
        }
    }

    /// Jump to a 1-based page. Page 0 becomes page 1; pages past the end are
    /// allowed and render empty.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Builder-style [`Self::set_query`].
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.set_query(query);
        self
    }

    /// Builder-style [`Self::set_sort`].
    #[must_use]
    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.set_sort(sort);
        self
    }

    /// Builder-style [`Self::set_page`].
    #[must_use]
    pub fn with_page(mut self, page: usize) -> Self {
        self.set_page(page);
        self
    }

    /// Filter, sort and slice `products` for the current state.
    #[must_use]
    pub fn apply<'a>(&self, products: &'a [Product]) -> CatalogPage<'a> {
        let mut matches = filter_products(products, &self.query);
        sort_products(&mut matches, self.sort);

        let total_items = matches.len();
        let total_pages = total_pages(total_items, self.page_size);
        let items = paginate(&matches, self.page, self.page_size).to_vec();

        CatalogPage {
            items,
            query: self.query.clone(),
            sort: self.sort,
            page: self.page,
            page_size: self.page_size,
            total_items,
            total_pages,
            no_results: total_items == 0,
            links: page_links(self.page, total_pages),
        }
    }
}
