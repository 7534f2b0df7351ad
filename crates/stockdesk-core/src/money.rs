//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  A dashboard form summing floats:                                       │
//! │    19.99 × 3 = 59.97000000000001                                        │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    1999 cents × 3 = 5997 cents                                          │
//! │    Floats exist only at the form boundary (see `input`)                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use stockdesk_core::money::Money;
//!
//! let price = Money::from_cents(1099); // $10.99
//! let line = price.multiply_quantity(2);
//! assert_eq!(line.cents(), 2198);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub};
use ts_rs::TS;

/// Fixed-point steps per percent point (1e-9 %).
const PERCENT_SCALE: i128 = 1_000_000_000;

/// Scaled percentages at or above this fall back to float math.
/// `i64::MAX * 1e18` still fits in i128.
const MAX_SCALED_PERCENT: f64 = 1e18;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents for USD).
///
/// ## Design Decisions
/// - **i64 (signed)**: differences can be negative even though every
///   pricing output is clamped to be non-negative
/// - **Saturating arithmetic**: a pasted `1e30` in a price field must not
///   panic or wrap, it pins at the representable maximum
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use stockdesk_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole currency units.
    #[inline]
    pub const fn from_major(major: i64) -> Self {
        Money(major.saturating_mul(100))
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns the value in major units as a float, for JSON payloads only.
    ///
    /// ```rust
    /// use stockdesk_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(22500).to_major(), 225.0);
    /// ```
    #[inline]
    pub fn to_major(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity, saturating at the i64 bounds.
    ///
    /// ## Example
    /// ```rust
    /// use stockdesk_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299);
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 897);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0.saturating_mul(qty as i64))
    }

    /// Returns `percent` percent of this amount, rounded once to the cent
    /// (half away from zero).
    ///
    /// The percentage is applied as a 1e-9 % fixed-point value over i128,
    /// so fractional rates like 33.333 % are not truncated before the
    /// multiply. Non-finite percentages give zero.
    ///
    /// ## Example
    /// ```rust
    /// use stockdesk_core::money::Money;
    ///
    /// let subtotal = Money::from_cents(25000); // $250.00
    /// assert_eq!(subtotal.percentage_of(10.0).cents(), 2500);
    /// assert_eq!(Money::from_major(10_000).percentage_of(33.333).cents(), 333_330);
    /// ```
    pub fn percentage_of(&self, percent: f64) -> Money {
        if !percent.is_finite() {
            return Money::zero();
        }

        let scaled = percent * PERCENT_SCALE as f64;
        if scaled.abs() >= MAX_SCALED_PERCENT {
            // `as` saturates
            return Money((self.0 as f64 * percent / 100.0).round() as i64);
        }

        let numerator = self.0 as i128 * scaled.round() as i128;
        Money(saturate_i128(div_round_half_away(numerator, 100 * PERCENT_SCALE)))
    }

    /// Saturating addition.
    #[inline]
    pub const fn saturating_add(self, other: Money) -> Money {
        Money(self.0.saturating_add(other.0))
    }

    /// Saturating subtraction.
    #[inline]
    pub const fn saturating_sub(self, other: Money) -> Money {
        Money(self.0.saturating_sub(other.0))
    }

    /// Clamps the value into `[min, max]`.
    ///
    /// Unlike `Ord::clamp` this never panics; when `min > max` the
    /// result is `min`.
    #[inline]
    pub fn clamp_between(self, min: Money, max: Money) -> Money {
        std::cmp::max(min, std::cmp::min(self, max))
    }
}

impl Money {
    /// Renders the amount with a currency symbol: `€12.05`, `-$5.50`.
    pub fn format_with(&self, symbol: &str) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!(
            "{}{}{}.{:02}",
            sign,
            symbol,
            self.dollars().unsigned_abs(),
            self.cents_part()
        )
    }
}

fn div_round_half_away(numerator: i128, denominator: i128) -> i128 {
    let half = denominator / 2;
    if numerator >= 0 {
        (numerator + half) / denominator
    } else {
        (numerator - half) / denominator
    }
}

fn saturate_i128(value: i128) -> i64 {
    if value > i64::MAX as i128 {
        i64::MAX
    } else if value < i64::MIN as i128 {
        i64::MIN
    } else {
        value as i64
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Debug-friendly `$10.99` rendering. The dashboard formats for locale.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with("$"))
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
        self.saturating_add(other)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        *self = self.saturating_add(other);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        self.saturating_sub(other)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc.saturating_add(m))
    }
}

// =============================================================================
// Serde Helpers
// =============================================================================

/// Serializes `Money` as a decimal number in major units (`225.0`).
///
/// The external order API expects plain decimal amounts, not cents.
pub mod as_major {
    use super::Money;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(money: &Money, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(money.to_major())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        let major = f64::deserialize(deserializer)?;
        Ok(crate::input::money_from_major(major).unwrap_or_default())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::zero()), "$0.00");
    }

    #[test]
    fn test_format_with_symbol() {
        assert_eq!(Money::from_cents(1_205).format_with("€"), "€12.05");
        assert_eq!(Money::from_cents(-50).format_with("£"), "-£0.50");
        assert_eq!(Money::from_cents(22_500).format_with(""), "225.00");
    }

    #[test]
    fn test_arithmetic_saturates() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);
        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);

        let max = Money::from_cents(i64::MAX);
        assert_eq!((max + a).cents(), i64::MAX);
        assert_eq!(max.multiply_quantity(9999).cents(), i64::MAX);
    }

    #[test]
    fn test_percentage_of() {
        let subtotal = Money::from_cents(25000);
        assert_eq!(subtotal.percentage_of(10.0).cents(), 2500);
        // $0.05 at 10% = 0.5 cent -> rounds up to 1 cent
        assert_eq!(Money::from_cents(5).percentage_of(10.0).cents(), 1);
        assert_eq!(Money::from_cents(-5).percentage_of(10.0).cents(), -1);
        assert_eq!(subtotal.percentage_of(f64::NAN), Money::zero());
    }

    #[test]
    fn test_percentage_of_keeps_fractional_rates() {
        // $1,000,000 at 0.004% = $40
        assert_eq!(Money::from_major(1_000_000).percentage_of(0.004).cents(), 4_000);
        // $10,000 at 33.333% = $3,333.30
        assert_eq!(Money::from_major(10_000).percentage_of(33.333).cents(), 333_330);
        // $99.99 at 7.125% = 712.43... cents
        assert_eq!(Money::from_cents(9_999).percentage_of(7.125).cents(), 712);
    }

    #[test]
    fn test_percentage_of_saturates() {
        let max = Money::from_cents(i64::MAX);
        assert_eq!(max.percentage_of(1e30).cents(), i64::MAX);
        assert_eq!(max.percentage_of(10_000.0).cents(), i64::MAX);
        assert_eq!(Money::from_cents(1).percentage_of(1e12).cents(), 10_000_000_000);
    }

    #[test]
    fn test_clamp_between() {
        let ten = Money::from_cents(1000);
        assert_eq!(Money::from_cents(5000).clamp_between(Money::zero(), ten), ten);
        assert_eq!(Money::from_cents(-1).clamp_between(Money::zero(), ten), Money::zero());
        assert_eq!(Money::from_cents(300).clamp_between(Money::zero(), ten).cents(), 300);
    }

    #[test]
    fn test_sum() {
        let total: Money = [100, 250, 50].iter().map(|c| Money::from_cents(*c)).sum();
        assert_eq!(total.cents(), 400);
    }

    #[test]
    fn test_as_major_serialization() {
        #[derive(Serialize, Deserialize)]
        struct Wrapper {
            #[serde(with = "as_major")]
            amount: Money,
        }

        let json = serde_json::to_string(&Wrapper { amount: Money::from_cents(22550) }).unwrap();
        assert_eq!(json, r#"{"amount":225.5}"#);

        let back: Wrapper = serde_json::from_str(r#"{"amount":12.34}"#).unwrap();
        assert_eq!(back.amount.cents(), 1234);
    }
}
