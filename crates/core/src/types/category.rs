//! Product categories.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a string names no known category.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown category: {0}")]
pub struct CategoryParseError(pub String);

/// How a product is sold, shown next to its price ("/set", "/pair").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SellingUnit {
    Set,
    Pair,
    Piece,
}

impl SellingUnit {
    /// Lowercase label for display.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Set => "set",
            Self::Pair => "pair",
            Self::Piece => "piece",
        }
    }
}

/// The fixed set of catalog categories.
///
/// Serialized with the human-readable name ("Engine Parts") so persisted
/// cart lines stay readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Brakes,
    Wheels,
    Lighting,
    #[serde(rename = "Engine Parts")]
    EngineParts,
    #[serde(rename = "Body Parts")]
    BodyParts,
    Interior,
    Suspension,
    Transmission,
    #[serde(rename = "Cooling System")]
    CoolingSystem,
    #[serde(rename = "Exhaust System")]
    ExhaustSystem,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Self; 10] = [
        Self::Brakes,
        Self::Wheels,
        Self::Lighting,
        Self::EngineParts,
        Self::BodyParts,
        Self::Interior,
        Self::Suspension,
        Self::Transmission,
        Self::CoolingSystem,
        Self::ExhaustSystem,
    ];

    /// Human-readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Brakes => "Brakes",
            Self::Wheels => "Wheels",
            Self::Lighting => "Lighting",
            Self::EngineParts => "Engine Parts",
            Self::BodyParts => "Body Parts",
            Self::Interior => "Interior",
            Self::Suspension => "Suspension",
            Self::Transmission => "Transmission",
            Self::CoolingSystem => "Cooling System",
            Self::ExhaustSystem => "Exhaust System",
        }
    }

    /// URL slug: lowercase with spaces replaced by `-`.
    #[must_use]
    pub fn slug(self) -> String {
        self.name().to_lowercase().replace(' ', "-")
    }

    /// Unit the category's products are priced per.
    #[must_use]
    pub const fn selling_unit(self) -> SellingUnit {
        match self {
            Self::Wheels => SellingUnit::Set,
            Self::Brakes | Self::Lighting => SellingUnit::Pair,
            _ => SellingUnit::Piece,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = CategoryParseError;

    /// Accepts the display name or the slug, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(needle) || c.slug() == needle.to_lowercase())
            .ok_or_else(|| CategoryParseError(s.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_slug() {
        assert_eq!(Category::EngineParts.slug(), "engine-parts");
        assert_eq!(Category::Brakes.slug(), "brakes");
    }

    #[test]
    fn test_selling_unit() {
        assert_eq!(Category::Wheels.selling_unit(), SellingUnit::Set);
        assert_eq!(Category::Brakes.selling_unit(), SellingUnit::Pair);
        assert_eq!(Category::Lighting.selling_unit(), SellingUnit::Pair);
        assert_eq!(Category::Interior.selling_unit(), SellingUnit::Piece);
    }

    #[test]
    fn test_from_str_accepts_name_and_slug() {
        assert_eq!("Cooling System".parse::<Category>().unwrap(), Category::CoolingSystem);
        assert_eq!("cooling-system".parse::<Category>().unwrap(), Category::CoolingSystem);
        assert_eq!("BRAKES".parse::<Category>().unwrap(), Category::Brakes);
        assert!("Spoilers".parse::<Category>().is_err());
    }

    #[test]
    fn test_serde_uses_display_name() {
        assert_eq!(
            serde_json::to_string(&Category::ExhaustSystem).unwrap(),
            "\"Exhaust System\""
        );
        let parsed: Category = serde_json::from_str("\"Body Parts\"").unwrap();
        assert_eq!(parsed, Category::BodyParts);
    }
}
