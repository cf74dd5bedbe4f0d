//! Customer rating with one decimal place.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Rating`].
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RatingError {
    #[error("rating must be a finite number")]
    NotFinite,
    #[error("rating {0} is outside 3.5..=5.0")]
    OutOfRange(f64),
}

/// A product rating between 3.5 and 5.0 inclusive.
///
/// Stored as tenths so comparisons are exact; serialized as a decimal
/// number (`4.3`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "f64", try_from = "f64")]
pub struct Rating(u8);

impl Rating {
    /// Lowest rating, in tenths.
    pub const MIN_TENTHS: u8 = 35;
    /// Highest rating, in tenths.
    pub const MAX_TENTHS: u8 = 50;

    /// Build a rating from tenths of a star (`43` is 4.3).
    ///
    /// # Errors
    ///
    /// Returns `RatingError::OutOfRange` outside `35..=50`.
    pub fn from_tenths(tenths: u8) -> Result<Self, RatingError> {
        if (Self::MIN_TENTHS..=Self::MAX_TENTHS).contains(&tenths) {
            Ok(Self(tenths))
        } else {
            Err(RatingError::OutOfRange(f64::from(tenths) / 10.0))
        }
    }

    /// Build a rating from tenths, clamping into `35..=50`.
    #[must_use]
    pub fn saturating_from_tenths(tenths: u8) -> Self {
        Self(tenths.clamp(Self::MIN_TENTHS, Self::MAX_TENTHS))
    }

    /// Rating in tenths of a star.
    #[must_use]
    pub const fn tenths(self) -> u8 {
        self.0
    }

    /// Rating as a decimal number.
    #[must_use]
    pub fn value(self) -> f64 {
        f64::from(self.0) / 10.0
    }

    /// Number of whole stars to fill.
    #[must_use]
    pub const fn full_stars(self) -> u8 {
        self.0 / 10
    }
}

impl TryFrom<f64> for Rating {
    type Error = RatingError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() {
            return Err(RatingError::NotFinite);
        }
        let tenths = (value * 10.0).round();
        if tenths < f64::from(Self::MIN_TENTHS) || tenths > f64::from(Self::MAX_TENTHS) {
            return Err(RatingError::OutOfRange(value));
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // bounded to 35..=50 above
        Ok(Self(tenths as u8))
    }
}

impl From<Rating> for f64 {
    fn from(rating: Rating) -> Self {
        rating.value()
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.0 / 10, self.0 % 10)
    }
}
