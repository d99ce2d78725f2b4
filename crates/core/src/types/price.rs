//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are stored as SQLite `REAL` columns so that `ORDER BY price` sorts
//! numerically. Conversions to and from `f64` happen only at that boundary and
//! are rounded to cents on the way in.

use std::fmt;

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of decimal places kept for stored prices.
const CENT_SCALE: u32 = 2;

/// Errors that can occur when constructing a [`Price`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceError {
    /// The amount was below zero.
    #[error("price must not be negative (got {0})")]
    Negative(Decimal),

    /// The amount was above [`Price::MAX`].
    #[error("price must not exceed {max} (got {0})", max = Price::MAX.0)]
    TooLarge(Decimal),

    /// The floating point value could not be represented as a decimal.
    #[error("price is not a finite number")]
    NotFinite,
}

/// A unit price between zero and [`Price::MAX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// Zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Largest accepted price (one billion).
    ///
    /// Cent amounts up to this bound are exact in a `REAL` column, and
    /// `quantity * price` sums over `u32` quantities stay inside `Decimal` range.
    pub const MAX: Self = Self(Decimal::from_parts(1_000_000_000, 0, 0, false, 0));

    /// Create a new price.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::Negative` if `amount` is below zero and
    /// `PriceError::TooLarge` if it is above [`Price::MAX`].
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        if amount > Self::MAX.0 {
            return Err(PriceError::TooLarge(amount));
        }
        Ok(Self(amount))
    }

    /// Create a price from user input, rounded half away from zero to cents.
    ///
    /// `0.005` becomes `0.01`; `0.004` becomes `0.00`.
    ///
    /// # Errors
    ///
    /// Same as [`Price::new`], checked on the rounded amount.
    pub fn rounded(amount: Decimal) -> Result<Self, PriceError> {
        Self::new(
            amount.round_dp_with_strategy(CENT_SCALE, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Build a price from a stored `REAL` value, rounded to cents.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::NotFinite` for NaN or infinite values and
    /// `PriceError::Negative` for values below zero.
    pub fn from_f64(value: f64) -> Result<Self, PriceError> {
        let amount = Decimal::from_f64(value).ok_or(PriceError::NotFinite)?;
        Self::new(amount.round_dp(CENT_SCALE))
    }

    /// The value to bind to a `REAL` column.
    #[must_use]
    pub fn to_f64(self) -> f64 {
        // Decimal always fits in an f64 (with precision loss at the extremes).
        self.0.to_f64().unwrap_or_default()
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(self) -> Decimal {
        self.0
    }

    /// Multiply by a stock quantity, e.g. to value the inventory on hand.
    #[must_use]
    pub fn times(self, quantity: i64) -> Decimal {
        self.0 * Decimal::from(quantity)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0.round_dp(CENT_SCALE))
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_price_rejects_negative() {
        assert_eq!(Price::new(dec("-1")), Err(PriceError::Negative(dec("-1"))));
        assert_eq!(
            Price::new(dec("-0.01")),
            Err(PriceError::Negative(dec("-0.01")))
        );
    }

    #[test]
    fn test_price_accepts_zero_and_positive() {
        assert_eq!(Price::new(Decimal::ZERO).unwrap(), Price::ZERO);
        assert_eq!(Price::new(dec("19.99")).unwrap().amount(), dec("19.99"));
    }

    #[test]
    fn test_price_from_f64_rounds_to_cents() {
        let price = Price::from_f64(4.999).unwrap();
        assert_eq!(price.amount(), dec("5.00"));

        let price = Price::from_f64(12.5).unwrap();
        assert_eq!(price.amount(), dec("12.5"));
    }

    #[test]
    fn test_price_upper_bound() {
        assert_eq!(Price::new(dec("1000000000")).unwrap(), Price::MAX);
        assert_eq!(
            Price::new(dec("1000000000.01")),
            Err(PriceError::TooLarge(dec("1000000000.01")))
        );
        assert!(matches!(Price::new(Decimal::MAX), Err(PriceError::TooLarge(_))));
    }

    #[test]
    fn test_price_rounded_to_cents() {
        assert_eq!(Price::rounded(dec("0.005")).unwrap().amount(), dec("0.01"));
        assert_eq!(Price::rounded(dec("0.004")).unwrap(), Price::ZERO);
        assert_eq!(Price::rounded(dec("12.345")).unwrap().amount(), dec("12.35"));
        assert_eq!(Price::rounded(dec("12.5")).unwrap().amount(), dec("12.5"));
    }

    #[test]
    fn test_max_price_survives_real_column() {
        assert_eq!(Price::from_f64(Price::MAX.to_f64()).unwrap(), Price::MAX);
    }

    #[test]
    fn test_price_from_f64_rejects_nan() {
        assert_eq!(Price::from_f64(f64::NAN), Err(PriceError::NotFinite));
    }

    #[test]
    fn test_price_display() {
        assert_eq!(Price::new(dec("3")).unwrap().to_string(), "$3.00");
        assert_eq!(Price::new(dec("1049.5")).unwrap().to_string(), "$1049.50");
    }

    #[test]
    fn test_price_times_quantity() {
        let price = Price::new(dec("2.50")).unwrap();
        assert_eq!(price.times(4), dec("10.00"));
    }

    #[test]
    fn test_price_deserialize_rejects_negative() {
        let result: Result<Price, _> = serde_json::from_str("\"-5\"");
        assert!(result.is_err());
    }
}
