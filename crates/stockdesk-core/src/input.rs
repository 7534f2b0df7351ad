//! # Raw Form Input
//!
//! Coercion of not-yet-validated form values into numbers.
//!
//! ## Coercion Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Form field            Raw value        Coerced                         │
//! │  ──────────            ─────────        ───────                         │
//! │  quantity              ""  "abc"  null  1                               │
//! │  quantity              "2.7"            2     (whole units)             │
//! │  quantity              "0"   "-3"       1     (never below one)         │
//! │  unit price            ""  "abc"  null  $0.00                           │
//! │  unit price            "-4"             $0.00 (never negative)          │
//! │  any amount            "$1,250.5"       $1,250.50                       │
//! │  any amount            "NaN" "inf"      treated as unparseable          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! These functions never fail. The operator may be mid-keystroke, so the
//! dashboard always shows a sane number instead of blocking.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

/// A numeric form value exactly as the dashboard sent it.
///
/// Deserializes from a JSON number, a JSON string, or `null`/missing.
///
/// ```rust
/// use stockdesk_core::input::RawNumber;
///
/// let raw: RawNumber = serde_json::from_str("\"12.5\"").unwrap();
/// assert_eq!(raw.parse(), Some(12.5));
///
/// let raw: RawNumber = serde_json::from_str("null").unwrap();
/// assert_eq!(raw.parse(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(untagged)]
pub enum RawNumber {
    /// A JSON number.
    Number(f64),
    /// Text typed into an input.
    Text(String),
    /// Field absent or `null`.
    #[default]
    Missing,
}

impl RawNumber {
    /// Parses the raw value into a finite float.
    ///
    /// Text is trimmed; a leading `$` and `,` thousands separators are
    /// accepted. Returns `None` for empty, non-numeric, NaN or infinite.
    pub fn parse(&self) -> Option<f64> {
        let value = match self {
            RawNumber::Number(n) => *n,
            RawNumber::Text(s) => parse_text(s)?,
            RawNumber::Missing => return None,
        };
        value.is_finite().then_some(value)
    }

    /// Returns true if the field holds nothing the operator typed.
    pub fn is_blank(&self) -> bool {
        match self {
            RawNumber::Missing => true,
            RawNumber::Text(s) => s.trim().is_empty(),
            RawNumber::Number(_) => false,
        }
    }
}

fn parse_text(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    let trimmed = trimmed.strip_prefix('$').unwrap_or(trimmed).trim_start();
    if trimmed.is_empty() {
        return None;
    }
    let cleaned: String = trimmed.chars().filter(|c| *c != ',').collect();
    cleaned.parse::<f64>().ok()
}

impl From<f64> for RawNumber {
    fn from(n: f64) -> Self {
        RawNumber::Number(n)
    }
}

impl From<i32> for RawNumber {
    fn from(n: i32) -> Self {
        RawNumber::Number(f64::from(n))
    }
}

impl From<i64> for RawNumber {
    fn from(n: i64) -> Self {
        RawNumber::Number(n as f64)
    }
}

impl From<u32> for RawNumber {
    fn from(n: u32) -> Self {
        RawNumber::Number(f64::from(n))
    }
}

impl From<&str> for RawNumber {
    fn from(s: &str) -> Self {
        RawNumber::Text(s.to_string())
    }
}

impl From<String> for RawNumber {
    fn from(s: String) -> Self {
        RawNumber::Text(s)
    }
}

impl<T: Into<RawNumber>> From<Option<T>> for RawNumber {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(RawNumber::Missing)
    }
}

// =============================================================================
// Coercions
// =============================================================================

/// Converts a major-unit float to Money, rounding half away from zero.
///
/// Out-of-range values saturate; non-finite values return `None`.
pub fn money_from_major(major: f64) -> Option<Money> {
    if !major.is_finite() {
        return None;
    }
    // `as` saturates for out-of-range floats
    Some(Money::from_cents((major * 100.0).round() as i64))
}

/// Coerces a quantity field. Unparseable or below one becomes 1.
pub fn coerce_quantity(raw: &RawNumber) -> u32 {
    match raw.parse() {
        Some(q) if q.trunc() >= 1.0 => q.trunc() as u32,
        _ => 1,
    }
}

/// Coerces a non-negative amount field. Unparseable or negative becomes zero.
pub fn coerce_amount(raw: &RawNumber) -> Money {
    raw.parse()
        .and_then(money_from_major)
        .map(|m| std::cmp::max(m, Money::zero()))
        .unwrap_or_default()
}

/// Parses a discount value, unparseable becomes 0.0.
///
/// The sign is kept: a negative value simply fails the "> 0" check that
/// decides whether a discount applies.
pub fn coerce_discount_value(raw: &RawNumber) -> f64 {
    raw.parse().unwrap_or(0.0)
}

// =============================================================================
// Unit Tests
// =============================================================================
