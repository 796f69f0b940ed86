//! Type-safe fixed-point money representation.

use core::fmt;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// Errors that can occur when converting an amount into a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount has sub-cent precision.
    #[error("amount has more than two decimal places")]
    Precision,
    /// The amount does not fit in 64-bit cents.
    #[error("amount is out of range")]
    OutOfRange,
    /// The input string is not a decimal number.
    #[error("invalid amount: {0}")]
    Invalid(String),
}

/// A monetary amount stored as integer cents.
///
/// Storing cents keeps arithmetic exact both in Rust and in SQL aggregates;
/// [`Decimal`] is used at the edges for parsing and display. Serialized form
/// is the two-decimal-place amount (e.g. `"19.99"`), not the raw cents.
///
/// ```
/// use storelab_core::Price;
///
/// let price: Price = "19.99".parse().unwrap();
/// assert_eq!(price.cents(), 1999);
/// assert_eq!(price.to_string(), "19.99");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(i64);

impl Price {
    /// Zero cents.
    pub const ZERO: Self = Self(0);

    /// Create a price from integer cents.
    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// The amount in integer cents.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Convert a decimal amount (e.g. `19.99`) into cents.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::Precision` if the amount has sub-cent digits and
    /// `PriceError::OutOfRange` if it does not fit in 64-bit cents.
    pub fn from_decimal(amount: Decimal) -> Result<Self, PriceError> {
        let cents = amount
            .checked_mul(Decimal::ONE_HUNDRED)
            .ok_or(PriceError::OutOfRange)?;
        if !cents.fract().is_zero() {
            return Err(PriceError::Precision);
        }
        cents.trunc().to_i64().map(Self).ok_or(PriceError::OutOfRange)
    }

    /// The amount as a scale-2 [`Decimal`].
    #[must_use]
    pub fn to_decimal(self) -> Decimal {
        Decimal::new(self.0, 2)
    }

    /// Whether the amount is below zero.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Multiply by a line quantity, `None` on overflow.
    #[must_use]
    pub const fn checked_mul(self, quantity: i64) -> Option<Self> {
        match self.0.checked_mul(quantity) {
            Some(cents) => Some(Self(cents)),
            None => None,
        }
    }

    /// Add another amount, `None` on overflow.
    #[must_use]
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Self(cents)),
            None => None,
        }
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::from_decimal(amount)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.to_decimal()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_decimal())
    }
}

impl std::str::FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount: Decimal = s
            .parse()
            .map_err(|_| PriceError::Invalid(s.to_owned()))?;
        Self::from_decimal(amount)
    }
}

// SQLx support (with sqlite feature): cents travel as a plain INTEGER.
#[cfg(feature = "sqlite")]
impl sqlx::Type<sqlx::Sqlite> for Price {
    fn type_info() -> sqlx::sqlite::SqliteTypeInfo {
        <i64 as sqlx::Type<sqlx::Sqlite>>::type_info()
    }

    fn compatible(ty: &sqlx::sqlite::SqliteTypeInfo) -> bool {
        <i64 as sqlx::Type<sqlx::Sqlite>>::compatible(ty)
    }
}

#[cfg(feature = "sqlite")]
impl<'r> sqlx::Decode<'r, sqlx::Sqlite> for Price {
    fn decode(value: sqlx::sqlite::SqliteValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let cents = <i64 as sqlx::Decode<'r, sqlx::Sqlite>>::decode(value)?;
        Ok(Self(cents))
    }
}

#[cfg(feature = "sqlite")]
impl<'q> sqlx::Encode<'q, sqlx::Sqlite> for Price {
    fn encode_by_ref(
        &self,
        buf: &mut Vec<sqlx::sqlite::SqliteArgumentValue<'q>>,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <i64 as sqlx::Encode<'q, sqlx::Sqlite>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_whole_and_fractional() {
        assert_eq!("10.00".parse::<Price>().unwrap().cents(), 1000);
        assert_eq!("749.99".parse::<Price>().unwrap().cents(), 74999);
        assert_eq!("0.5".parse::<Price>().unwrap().cents(), 50);
        assert_eq!("12".parse::<Price>().unwrap().cents(), 1200);
    }

    #[test]
    fn test_parse_rejects_sub_cent_precision() {
        assert_eq!("9.999".parse::<Price>(), Err(PriceError::Precision));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            "ten dollars".parse::<Price>(),
            Err(PriceError::Invalid(_))
        ));
    }

    #[test]
    fn test_display_two_places() {
        assert_eq!(Price::from_cents(1999).to_string(), "19.99");
        assert_eq!(Price::from_cents(50).to_string(), "0.50");
        assert_eq!(Price::from_cents(-500).to_string(), "-5.00");
    }

    #[test]
    fn test_checked_arithmetic() {
        let unit = Price::from_cents(1000);
        assert_eq!(unit.checked_mul(2), Some(Price::from_cents(2000)));
        assert_eq!(
            unit.checked_add(Price::from_cents(99)),
            Some(Price::from_cents(1099))
        );
        assert_eq!(Price::from_cents(i64::MAX).checked_mul(2), None);
    }

    #[test]
    fn test_serde_uses_decimal_form() {
        let price = Price::from_cents(1999);
        assert_eq!(serde_json::to_string(&price).unwrap(), "\"19.99\"");
        let parsed: Price = serde_json::from_str("\"19.99\"").unwrap();
        assert_eq!(parsed, price);
    }
}
