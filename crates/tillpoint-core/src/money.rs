//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Summing a cart in floating point:                                      │
//! │    9.99 * 5 = 49.949999999999996  ❌ WRONG!                             │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    999 cents * 5 = 4995 cents = $49.95                                  │
//! │                                                                         │
//! │  The backend speaks decimal JSON numbers. They are converted to cents  │
//! │  exactly once, at the DTO boundary, through rust_decimal.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tillpoint_core::money::Money;
//!
//! let price = Money::from_cents(999); // $9.99
//! let line = price * 5;               // $49.95
//! assert_eq!(line.to_string(), "$49.95");
//!
//! let paid: Money = "50.00".parse().unwrap();
//! assert!(paid >= line);
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use std::str::FromStr;

use crate::error::{CoreError, ValidationError};

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Where Money Flows
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Product.price ──┬──► CartLine.price ──► CartLine::line_total          │
/// │                  │                                                      │
/// │                  └──► Displayed as "$9.99" in the product table        │
/// │                                                                         │
/// │  Cart::total ──► payment field prefill ──► PaymentInfo.amount_paid     │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ```rust
    /// use tillpoint_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Converts a decimal amount in major units to cents.
    ///
    /// Sub-cent digits are rounded half away from zero, which is what a
    /// cashier expects when the backend hands back `9.995`.
    pub fn try_from_decimal(value: Decimal) -> Result<Self, CoreError> {
        value
            .checked_mul(Decimal::ONE_HUNDRED)
            .map(|cents| cents.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
            .and_then(|cents| cents.to_i64())
            .map(Money)
            .ok_or_else(|| CoreError::AmountOutOfRange(value.to_string()))
    }

    /// Returns the amount as a decimal in major units.
    #[inline]
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, 2)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity, saturating at the `i64` bounds.
    ///
    /// ```rust
    /// use tillpoint_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299); // $2.99
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 897);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Price × quantity, or `None` when it does not fit in cents.
    #[inline]
    pub const fn checked_multiply_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Sum of two amounts, or `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Formats the amount without a currency sign, e.g. `"49.95"`.
    ///
    /// This is the form used to pre-fill the payment amount field.
    pub fn amount_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.dollars().abs(), self.cents_part())
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows money the way the product table and notices print it.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

/// Parses user input such as `"12.5"`, `"12.50"` or `"$12.50"`.
impl FromStr for Money {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let raw = raw.strip_prefix('$').unwrap_or(raw);
        let value = Decimal::from_str(raw).map_err(|_| {
            ValidationError::invalid_format("amount", format!("'{}' is not a number", s.trim()))
        })?;
        Money::try_from_decimal(value)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

/// Multiplication by quantity. Saturates like [`Money::multiply_quantity`].
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Wire Format
// =============================================================================

/// Serde adapter for amounts that travel as JSON numbers in major units.
///
/// ```rust,ignore
/// #[serde(with = "crate::money::as_major_units")]
/// pub price: Money,
/// ```
pub mod as_major_units {
    use serde::{Deserializer, Serializer};

    use super::Money;

    // cents / 100 is a single correctly rounded division, so the number on
    // the wire is the closest f64 to the decimal amount.
    pub fn serialize<S>(money: &Money, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(money.cents() as f64 / 100.0)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Money, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = rust_decimal::serde::float::deserialize(deserializer)?;
        Money::try_from_decimal(value).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parts_and_display() {
        let widget = Money::from_cents(999);
        assert_eq!((widget.dollars(), widget.cents_part()), (9, 99));
        assert_eq!(widget.to_string(), "$9.99");
        assert_eq!(Money::from_cents(4000).to_string(), "$40.00");
        assert_eq!(Money::from_cents(-225).to_string(), "-$2.25");
        assert_eq!(Money::zero().to_string(), "$0.00");
    }

    #[test]
    fn test_amount_string() {
        assert_eq!(Money::zero().amount_string(), "0.00");
        assert_eq!(Money::from_cents(4995).amount_string(), "49.95");
        assert_eq!(Money::from_cents(7).amount_string(), "0.07");
    }

    #[test]
    fn test_parse_user_input() {
        assert_eq!("12.50".parse::<Money>().unwrap().cents(), 1250);
        assert_eq!("12.5".parse::<Money>().unwrap().cents(), 1250);
        assert_eq!(" $3 ".parse::<Money>().unwrap().cents(), 300);
        assert_eq!("0.005".parse::<Money>().unwrap().cents(), 1);
        assert!("twelve".parse::<Money>().is_err());
        assert!("".parse::<Money>().is_err());
    }

    #[test]
    fn test_decimal_round_trip_is_exact() {
        let price = Money::try_from_decimal(Decimal::new(999, 2)).unwrap();
        assert_eq!(price.cents(), 999);
        assert_eq!(price.to_decimal(), Decimal::new(999, 2));
    }

    #[test]
    fn test_cart_arithmetic() {
        let widget = Money::from_cents(999);
        let gadget = Money::from_cents(250);

        assert_eq!(widget.multiply_quantity(5), widget * 5);
        assert_eq!((widget * 5).to_string(), "$49.95");
        assert_eq!(Money::from_cents(5000) - widget * 5, Money::from_cents(5));

        let mut running = Money::zero();
        running += gadget;
        let total: Money = [widget * 2, gadget].into_iter().sum();
        assert_eq!(total + running, Money::from_cents(2498));
    }

    #[test]
    fn test_overflow_never_wraps() {
        let widget = Money::from_cents(999);
        let huge = i64::MAX / 100;

        assert_eq!(widget.checked_multiply_quantity(huge), None);
        assert_eq!(widget.checked_multiply_quantity(5), Some(Money::from_cents(4995)));
        assert_eq!(Money::from_cents(i64::MAX).checked_add(Money::from_cents(1)), None);

        assert!(!(widget * huge).is_negative());
        assert_eq!((widget * huge).cents(), i64::MAX);
        assert_eq!(Money::from_cents(i64::MAX) + widget, Money::from_cents(i64::MAX));
    }

    #[derive(Debug, Serialize, Deserialize)]
    struct Priced {
        #[serde(with = "as_major_units")]
        price: Money,
    }

    #[test]
    fn test_wire_format_uses_major_units() {
        let json = serde_json::to_string(&Priced {
            price: Money::from_cents(999),
        })
        .unwrap();
        assert_eq!(json, r#"{"price":9.99}"#);

        let parsed: Priced = serde_json::from_str(r#"{"price":12}"#).unwrap();
        assert_eq!(parsed.price.cents(), 1200);

        let parsed: Priced = serde_json::from_str(r#"{"price":0.1}"#).unwrap();
        assert_eq!(parsed.price.cents(), 10);
    }
}
