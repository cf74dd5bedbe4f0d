//! Demo product generator.
//!
//! Stamps out products from a small set of templates with random prices,
//! ratings and specs. Pass a seeded RNG to [`generate_with`] for a
//! reproducible catalog; [`generate`] draws from the thread RNG and differs on
//! every call.

use rand::Rng;

use phantom_spares_core::{Category, Price, Product, ProductId, ProductSpecs, Rating};

/// Image used by every generated product.
pub const DEFAULT_IMAGE: &str = "/products/default-product.svg";

/// A prototype used to stamp out generated products.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductTemplate {
    pub name: &'static str,
    pub category: Category,
    pub image: &'static str,
    /// Lowest price, inclusive.
    pub min_price: u64,
    /// Highest price, inclusive.
    pub max_price: u64,
}

impl ProductTemplate {
    const fn new(name: &'static str, category: Category, min_price: u64, max_price: u64) -> Self {
        Self {
            name,
            category,
            image: DEFAULT_IMAGE,
            min_price,
            max_price,
        }
    }

    /// Whether `price` falls inside this template's range.
    #[must_use]
    pub fn covers(&self, price: Price) -> bool {
        (self.min_price..=self.max_price).contains(&price.amount())
    }

    /// Find the template a generated product name was stamped from.
    #[must_use]
    pub fn for_product_name(name: &str) -> Option<&'static Self> {
        TEMPLATES.iter().find(|t| {
            name.strip_prefix(t.name)
                .and_then(|rest| rest.strip_prefix(' '))
                .is_some_and(|suffix| !suffix.is_empty() && suffix.chars().all(|c| c.is_ascii_uppercase()))
        })
    }
}

/// Templates the generator picks from, uniformly.
pub const TEMPLATES: [ProductTemplate; 8] = [
    ProductTemplate::new("Premium Brake Pads", Category::Brakes, 8_000, 15_000),
    ProductTemplate::new("LED Headlight Kit", Category::Lighting, 15_000, 25_000),
    ProductTemplate::new("Alloy Wheel Set", Category::Wheels, 70_000, 100_000),
    ProductTemplate::new(
        "High-Performance Oil Filter",
        Category::EngineParts,
        2_000,
        5_000,
    ),
    ProductTemplate::new("Leather Seat Covers", Category::Interior, 20_000, 35_000),
    ProductTemplate::new(
        "Performance Shock Absorber",
        Category::Suspension,
        15_000,
        25_000,
    ),
    ProductTemplate::new("Premium Brake Rotors", Category::Brakes, 10_000, 18_000),
    ProductTemplate::new(
        "Sport Exhaust System",
        Category::ExhaustSystem,
        40_000,
        60_000,
    ),
];

const MATERIALS: [&str; 4] = [
    "Aircraft-grade Aluminum",
    "High-strength Steel",
    "Premium Composite",
    "Carbon Fiber",
];

const WARRANTIES: [&str; 4] = ["2 years", "3 years", "5 years", "Lifetime"];

const FEATURES: [&str; 4] = [
    "Premium quality materials",
    "Enhanced durability",
    "Superior performance",
    "Easy installation",
];

/// Generate `count` products with ids `1..=count` from the thread RNG.
#[must_use]
pub fn generate(count: u32) -> Vec<Product> {
    generate_with(count, &mut rand::rng())
}

/// Generate `count` products with ids `1..=count` from `rng`.
#[allow(clippy::indexing_slicing)] // every index is drawn from 0..len
pub fn generate_with<R: Rng + ?Sized>(count: u32, rng: &mut R) -> Vec<Product> {
    (1..=count)
        .map(|i| {
            let template = &TEMPLATES[rng.random_range(0..TEMPLATES.len())];
            let price = rng.random_range(template.min_price..=template.max_price);
            let rating = Rating::saturating_from_tenths(
                rng.random_range(Rating::MIN_TENTHS..=Rating::MAX_TENTHS),
            );
            let specs = ProductSpecs::new(
                MATERIALS[rng.random_range(0..MATERIALS.len())],
                WARRANTIES[rng.random_range(0..WARRANTIES.len())],
            );

            Product {
                id: ProductId::new(i),
                name: format!("{} {}", template.name, letter_suffix(i)),
                category: template.category,
                price: Price::new(price),
                rating,
                image: template.image.to_string(),
                in_stock: true,
                description: describe(template),
                features: FEATURES.iter().map(|f| (*f).to_string()).collect(),
                specs,
            }
        })
        .collect()
}

/// Bijective base-26 letter counter: 1 -> A, 26 -> Z, 27 -> AA, 703 -> AAA.
///
/// Returns an empty string for 0.
#[must_use]
pub fn letter_suffix(n: u32) -> String {
    let mut n = n;
    let mut letters = Vec::new();
    while n > 0 {
        n -= 1;
        let offset = u8::try_from(n % 26).unwrap_or_default();
        letters.push(char::from(b'A' + offset));
        n /= 26;
    }
    letters.iter().rev().collect()
}

fn describe(template: &ProductTemplate) -> String {
    format!(
        "Premium quality {} designed for superior performance and durability. \
         Features advanced technology and premium materials for optimal results. \
         Compatible with a wide range of vehicle makes and models.",
        template.name.to_lowercase()
    )
}
