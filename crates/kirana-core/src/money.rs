//! # Money Module
//!
//! Provides the `Money` type for handling prices and cart totals.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Summing float prices:                                                  │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer minor units (paise, cents)                       │
//! │    Catalog JSON "price": 10.5  ──►  Money(1050)                         │
//! │    Every cart total is exact integer math                               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The catalog resource carries prices as plain JSON numbers in major units.
//! [`major_units`] converts at the serde boundary, so nothing past the loader
//! ever sees a float.
//!
//! ## Usage
//! ```rust
//! use kirana_core::money::Money;
//!
//! let price = Money::from_major_minor(10, 50); // ₹10.50
//! let line = price.multiply_quantity(3);       // ₹31.50
//! assert_eq!(line.minor_units(), 3150);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use ts_rs::TS;

/// Minor units per major unit.
pub const MINOR_PER_MAJOR: i64 = 100;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit.
///
/// ## Design Decisions
/// - **i64 (signed)**: cart math never needs it, but subtraction stays total
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Saturating arithmetic**: a catalog price near the i64 limit clamps
///   the line and cart totals at [`Money::MAX`] instead of overflowing
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Largest representable amount. Totals saturate here.
    pub const MAX: Money = Money(i64::MAX);

    /// Smallest representable amount.
    pub const MIN: Money = Money(i64::MIN);

    /// Creates a Money value from minor units.
    #[inline]
    pub const fn from_minor_units(minor: i64) -> Self {
        Money(minor)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// ## Example
    /// ```rust
    /// use kirana_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_minor(10, 99).minor_units(), 1099);
    /// assert_eq!(Money::from_major_minor(-5, 50).minor_units(), -550);
    /// ```
    ///
    /// For negative amounts only the major unit carries the sign.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * MINOR_PER_MAJOR - minor)
        } else {
            Money(major * MINOR_PER_MAJOR + minor)
        }
    }

    /// Converts a major-unit number (as found in catalog JSON) to Money.
    ///
    /// Rounds half away from zero to the nearest minor unit. Returns `None`
    /// for NaN, infinities and values outside the i64 range.
    ///
    /// ## Example
    /// ```rust
    /// use kirana_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_f64(10.0).unwrap().minor_units(), 1000);
    /// assert_eq!(Money::from_major_f64(0.125).unwrap().minor_units(), 13);
    /// assert!(Money::from_major_f64(f64::NAN).is_none());
    /// ```
    pub fn from_major_f64(major: f64) -> Option<Self> {
        if !major.is_finite() {
            return None;
        }
        let minor = (major * MINOR_PER_MAJOR as f64).round();
        if minor < i64::MIN as f64 || minor > i64::MAX as f64 {
            return None;
        }
        Some(Money(minor as i64))
    }

    /// Returns the value as a major-unit number, for serialization only.
    #[inline]
    pub fn to_major_f64(&self) -> f64 {
        self.0 as f64 / MINOR_PER_MAJOR as f64
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn minor_units(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion (truncated toward zero).
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / MINOR_PER_MAJOR
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % MINOR_PER_MAJOR).abs()
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

    /// Checks if the value has no minor part (e.g. ₹10 rather than ₹10.50).
    #[inline]
    pub const fn is_whole(&self) -> bool {
        self.0 % MINOR_PER_MAJOR == 0
    }

    /// Multiplies money by a quantity, saturating at [`Money::MAX`] /
    /// [`Money::MIN`].
    ///
    /// ## Example
    /// ```rust
    /// use kirana_core::money::Money;
    ///
    /// let unit_price = Money::from_minor_units(299);
    /// assert_eq!(unit_price.multiply_quantity(3).minor_units(), 897);
    /// assert_eq!(Money::MAX.multiply_quantity(2), Money::MAX);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain decimal rendering without a currency symbol: `10.50`, `-5.00`.
///
/// Symbol placement and whole-amount elision live in
/// [`CurrencyFormat`](crate::view::CurrencyFormat).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor_part())
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

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Major-unit serde adapter
// =============================================================================

/// Serde adapter for fields stored as major-unit JSON numbers.
///
/// ```rust,ignore
/// #[serde(with = "crate::money::major_units")]
/// pub price: Money,
/// ```
///
/// Whole amounts serialize as integers (`10`), others as floats (`10.5`),
/// so a catalog written back out looks like the one that was read.
pub mod major_units {
    use super::Money;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(money: &Money, serializer: S) -> Result<S::Ok, S::Error> {
        if money.is_whole() {
            serializer.serialize_i64(money.major())
        } else {
            serializer.serialize_f64(money.to_major_f64())
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        let major = f64::deserialize(deserializer)?;
        Money::from_major_f64(major)
            .ok_or_else(|| D::Error::custom(format!("price {} is not a representable amount", major)))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Priced {
        #[serde(with = "major_units")]
        price: Money,
    }

    #[test]
    fn test_from_major_minor() {
        let money = Money::from_major_minor(10, 99);
        assert_eq!(money.minor_units(), 1099);
        assert_eq!(money.major(), 10);
        assert_eq!(money.minor_part(), 99);
        assert!(!money.is_whole());
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_minor_units(1099).to_string(), "10.99");
        assert_eq!(Money::from_minor_units(500).to_string(), "5.00");
        assert_eq!(Money::from_minor_units(-550).to_string(), "-5.50");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let a = Money::from_minor_units(1000);
        let b = Money::from_minor_units(250);

        assert_eq!((a + b).minor_units(), 1250);
        assert_eq!((a - b).minor_units(), 750);
        assert_eq!((a * 3).minor_units(), 3000);

        let total: Money = vec![a, b, b].into_iter().sum();
        assert_eq!(total.minor_units(), 1500);
    }

    #[test]
    fn test_arithmetic_saturates_at_limits() {
        let huge = Money::from_minor_units(i64::MAX / 2 + 1);

        assert_eq!(huge.multiply_quantity(2), Money::MAX);
        assert_eq!(huge * 3, Money::MAX);
        assert_eq!(huge + huge, Money::MAX);
        assert_eq!(Money::MIN - Money::from_minor_units(1), Money::MIN);

        let total: Money = vec![huge, huge, Money::from_minor_units(1)].into_iter().sum();
        assert_eq!(total, Money::MAX);

        let mut acc = Money::MAX;
        acc += Money::from_minor_units(1);
        assert_eq!(acc, Money::MAX);
    }

    #[test]
    fn test_major_units_accepts_integers_and_floats() {
        let whole: Priced = serde_json::from_str(r#"{"price": 10}"#).unwrap();
        assert_eq!(whole.price.minor_units(), 1000);

        let fractional: Priced = serde_json::from_str(r#"{"price": 10.5}"#).unwrap();
        assert_eq!(fractional.price.minor_units(), 1050);
    }

    #[test]
    fn test_major_units_writes_whole_amounts_as_integers() {
        let json = serde_json::to_string(&Priced {
            price: Money::from_minor_units(1000),
        })
        .unwrap();
        assert_eq!(json, r#"{"price":10}"#);

        let json = serde_json::to_string(&Priced {
            price: Money::from_minor_units(1050),
        })
        .unwrap();
        assert_eq!(json, r#"{"price":10.5}"#);
    }

    #[test]
    fn test_major_units_rejects_non_numbers() {
        assert!(serde_json::from_str::<Priced>(r#"{"price": "ten"}"#).is_err());
    }
}
