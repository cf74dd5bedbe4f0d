//! Catalog product record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Category, Price, ProductId, Rating};

/// Free-form product attributes keyed by attribute name.
///
/// Generated products always carry `material` and `warranty`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductSpecs(BTreeMap<String, String>);

impl ProductSpecs {
    pub const MATERIAL: &'static str = "material";
    pub const WARRANTY: &'static str = "warranty";

    /// Specs with the two attributes every product has.
    #[must_use]
    pub fn new(material: impl Into<String>, warranty: impl Into<String>) -> Self {
        let mut specs = Self::default();
        specs.insert(Self::MATERIAL, material);
        specs.insert(Self::WARRANTY, warranty);
        specs
    }

    /// Add or replace an attribute.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn material(&self) -> Option<&str> {
        self.get(Self::MATERIAL)
    }

    #[must_use]
    pub fn warranty(&self) -> Option<&str> {
        self.get(Self::WARRANTY)
    }

    /// Iterate attributes in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// A product in the catalog.
///
/// Products are immutable once generated; ids are unique within one
/// generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: Category,
    pub price: Price,
    pub rating: Rating,
    /// Path of the product image, relative to the static asset root.
    pub image: String,
    pub in_stock: bool,
    pub description: String,
    pub features: Vec<String>,
    pub specs: ProductSpecs,
}

impl Product {
    /// Case-insensitive substring match against name or category.
    ///
    /// `needle` must already be lowercase.
    #[must_use]
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.name.to_lowercase().contains(needle)
            || self.category.name().to_lowercase().contains(needle)
    }
}
