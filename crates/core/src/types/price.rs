//! Integer price representation.
//!
//! Prices are whole amounts in the store currency (Kenyan shillings). All
//! arithmetic stays in integers so cart totals are exact.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, Mul};

use serde::{Deserialize, Serialize};

/// A price in the store's minor currency unit.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    /// Zero shillings.
    pub const ZERO: Self = Self(0);

    /// Currency symbol shown in front of formatted amounts.
    pub const CURRENCY_SYMBOL: &'static str = "Ksh";

    /// Create a new price.
    #[must_use]
    pub const fn new(amount: u64) -> Self {
        Self(amount)
    }

    /// The raw amount.
    #[must_use]
    pub const fn amount(self) -> u64 {
        self.0
    }

    /// Multiply by a line quantity, saturating at `u64::MAX`.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(u64::from(quantity)))
    }

    /// Format with thousands separators, e.g. `Ksh 12,500`.
    #[must_use]
    pub fn display(self) -> String {
        let digits = self.0.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        format!("{} {grouped}", Self::CURRENCY_SYMBOL)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl From<u64> for Price {
    fn from(amount: u64) -> Self {
        Self(amount)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Mul<u32> for Price {
    type Output = Self;

    fn mul(self, rhs: u32) -> Self {
        self.times(rhs)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_groups_thousands() {
        assert_eq!(Price::new(0).display(), "Ksh 0");
        assert_eq!(Price::new(999).display(), "Ksh 999");
        assert_eq!(Price::new(12_500).display(), "Ksh 12,500");
        assert_eq!(Price::new(1_000_000).display(), "Ksh 1,000,000");
    }

    #[test]
    fn test_line_arithmetic() {
        let total: Price = [Price::new(100) * 3, Price::new(50).times(2)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::new(400));
    }

    #[test]
    fn test_times_saturates() {
        assert_eq!(Price::new(u64::MAX).times(2), Price::new(u64::MAX));
    }
}
