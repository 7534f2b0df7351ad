//! # Order Pricing
//!
//! Subtotal, discount and grand total for an order form.
//!
//! ## Calculation Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     calculate_pricing()                                 │
//! │                                                                         │
//! │  items ──► coerce each (qty→1, price→0) ──► Σ qty × price = subtotal   │
//! │                                                  │                      │
//! │  discount ──► percentage? subtotal × value / 100 │                      │
//! │               fixed?      value                  ▼                      │
//! │               otherwise   0 ───────────► clamp to [0, subtotal]        │
//! │                                                  │                      │
//! │  shipping ──► max(0, parsed) ────────────────────┤                      │
//! │                                                  ▼                      │
//! │                     total = subtotal - discount + shipping              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The calculator never fails and never panics. Malformed input degrades to
//! the coercion defaults in [`crate::input`], one item at a time, so a bad
//! row cannot corrupt the others.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::input::{
    coerce_amount, coerce_discount_value, coerce_quantity, money_from_major, RawNumber,
};
use crate::money::{as_major, Money};
use crate::types::{DiscountSpec, DiscountType, LineItem};

/// Anything that contributes `quantity × unit price` to a subtotal.
pub trait PricedLine {
    fn raw_quantity(&self) -> &RawNumber;
    fn raw_unit_price(&self) -> &RawNumber;

    /// Extended price after coercion.
    fn line_total(&self) -> Money {
        coerce_amount(self.raw_unit_price()).multiply_quantity(coerce_quantity(self.raw_quantity()))
    }
}

impl PricedLine for LineItem {
    fn raw_quantity(&self) -> &RawNumber {
        &self.quantity
    }

    fn raw_unit_price(&self) -> &RawNumber {
        &self.unit_price
    }
}

/// A bare quantity/price pair, for callers without a full [`LineItem`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PricingLine {
    #[serde(default)]
    pub quantity: RawNumber,
    #[serde(default)]
    pub unit_price: RawNumber,
}

impl PricingLine {
    pub fn new(quantity: impl Into<RawNumber>, unit_price: impl Into<RawNumber>) -> Self {
        PricingLine {
            quantity: quantity.into(),
            unit_price: unit_price.into(),
        }
    }
}

impl PricedLine for PricingLine {
    fn raw_quantity(&self) -> &RawNumber {
        &self.quantity
    }

    fn raw_unit_price(&self) -> &RawNumber {
        &self.unit_price
    }
}

/// Derived totals for an order. Recomputed on demand, never stored alone.
///
/// ## Guarantees
/// - every field is non-negative
/// - `discount_amount <= subtotal`
/// - `total_amount == subtotal - discount_amount + shipping_fee`
///   (saturating at the Money maximum)
///
/// Serializes amounts in major units, like [`crate::OrderSubmission`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PricingResult {
    #[serde(with = "as_major")]
    #[ts(type = "number")]
    pub subtotal: Money,

    #[serde(with = "as_major")]
    #[ts(type = "number")]
    pub discount_amount: Money,

    #[serde(with = "as_major")]
    #[ts(type = "number")]
    pub shipping_fee: Money,

    #[serde(with = "as_major")]
    #[ts(type = "number")]
    pub total_amount: Money,
}

/// Computes order totals from raw form values.
///
/// ## Example
/// ```rust
/// use stockdesk_core::input::RawNumber;
/// use stockdesk_core::pricing::{calculate_pricing, PricingLine};
/// use stockdesk_core::types::DiscountSpec;
///
/// let items = [PricingLine::new(2, 100.0), PricingLine::new(1, 50.0)];
/// let result = calculate_pricing(&items, &DiscountSpec::percentage(10), &RawNumber::Missing);
///
/// assert_eq!(result.subtotal.cents(), 25_000);
/// assert_eq!(result.discount_amount.cents(), 2_500);
/// assert_eq!(result.total_amount.cents(), 22_500);
/// ```
pub fn calculate_pricing<L: PricedLine>(
    items: &[L],
    discount: &DiscountSpec,
    shipping_fee: &RawNumber,
) -> PricingResult {
    let subtotal: Money = items.iter().map(PricedLine::line_total).sum();
    let discount_amount = raw_discount(subtotal, discount).clamp_between(Money::zero(), subtotal);
    let shipping_fee = coerce_amount(shipping_fee);

    PricingResult {
        subtotal,
        discount_amount,
        shipping_fee,
        total_amount: (subtotal - discount_amount) + shipping_fee,
    }
}

/// Discount before clamping. Zero unless the type is active and value > 0.
fn raw_discount(subtotal: Money, discount: &DiscountSpec) -> Money {
    let value = coerce_discount_value(&discount.value);
    if value <= 0.0 {
        return Money::zero();
    }

    match discount.kind {
        DiscountType::Percentage => subtotal.percentage_of(value),
        DiscountType::Fixed => money_from_major(value).unwrap_or_default(),
        DiscountType::None => Money::zero(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_items() -> Vec<PricingLine> {
        vec![PricingLine::new(2, 100.0), PricingLine::new(1, 50.0)]
    }

    fn dollars(d: i64) -> Money {
        Money::from_major(d)
    }

    #[test]
    fn test_no_discount() {
        let r = calculate_pricing(&sample_items(), &DiscountSpec::none(), &RawNumber::from(0));
        assert_eq!(r.subtotal, dollars(250));
        assert_eq!(r.discount_amount, Money::zero());
        assert_eq!(r.total_amount, dollars(250));
    }

    #[test]
    fn test_percentage_discount() {
        let r = calculate_pricing(&sample_items(), &DiscountSpec::percentage(10), &RawNumber::Missing);
        assert_eq!(r.discount_amount, dollars(25));
        assert_eq!(r.total_amount, dollars(225));
    }

    #[test]
    fn test_fixed_discount_clamped_to_subtotal() {
        let r = calculate_pricing(&sample_items(), &DiscountSpec::fixed(500), &RawNumber::from(12));
        assert_eq!(r.discount_amount, dollars(250));
        assert_eq!(r.total_amount, dollars(12));
    }

    #[test]
    fn test_fixed_discount_with_shipping() {
        let r = calculate_pricing(&sample_items(), &DiscountSpec::fixed(100), &RawNumber::from(20));
        assert_eq!(r.discount_amount, dollars(100));
        assert_eq!(r.shipping_fee, dollars(20));
        assert_eq!(r.total_amount, dollars(170));
    }

    #[test]
    fn test_malformed_item_coerced() {
        let items = [PricingLine::new("", "abc")];
        let r = calculate_pricing(&items, &DiscountSpec::none(), &RawNumber::from("7.5"));
        assert_eq!(r.subtotal, Money::zero());
        assert_eq!(r.discount_amount, Money::zero());
        assert_eq!(r.total_amount.cents(), 750);
    }

    #[test]
    fn test_negative_percentage_ignored() {
        let r = calculate_pricing(&sample_items(), &DiscountSpec::percentage(-5), &RawNumber::Missing);
        assert_eq!(r.discount_amount, Money::zero());
        assert_eq!(r.total_amount, dollars(250));
    }

    #[test]
    fn test_none_ignores_stale_value() {
        let stale = DiscountSpec {
            kind: DiscountType::None,
            value: RawNumber::from(40),
        };
        let r = calculate_pricing(&sample_items(), &stale, &RawNumber::Missing);
        assert_eq!(r.discount_amount, Money::zero());
    }

    #[test]
    fn test_negative_shipping_is_zero() {
        let r = calculate_pricing(&sample_items(), &DiscountSpec::none(), &RawNumber::from(-15));
        assert_eq!(r.shipping_fee, Money::zero());
        assert_eq!(r.total_amount, dollars(250));
    }

    #[test]
    fn test_one_bad_row_does_not_poison_others() {
        let items = [
            PricingLine::new(2, 100.0),
            PricingLine::new("x", "NaN"),
            PricingLine::new(1, 50.0),
        ];
        let r = calculate_pricing(&items, &DiscountSpec::none(), &RawNumber::Missing);
        assert_eq!(r.subtotal, dollars(250));
    }

    #[test]
    fn test_empty_items() {
        let items: [PricingLine; 0] = [];
        let r = calculate_pricing(&items, &DiscountSpec::fixed(10), &RawNumber::from(5));
        assert_eq!(r.subtotal, Money::zero());
        assert_eq!(r.discount_amount, Money::zero());
        assert_eq!(r.total_amount, dollars(5));
    }

    #[test]
    fn test_percentage_rounds_to_cent() {
        // $9.99 at 12.5% = 124.875 cents -> 125
        let items = [PricingLine::new(1, 9.99)];
        let r = calculate_pricing(&items, &DiscountSpec::percentage("12.5"), &RawNumber::Missing);
        assert_eq!(r.discount_amount.cents(), 125);
        assert_eq!(r.total_amount.cents(), 874);
    }

    #[test]
    fn test_fractional_percentage_on_large_subtotal() {
        let items = [PricingLine::new(1, 1_000_000.0)];
        let r = calculate_pricing(&items, &DiscountSpec::percentage(0.004), &RawNumber::Missing);
        assert_eq!(r.discount_amount, dollars(40));
        assert_eq!(r.total_amount, dollars(999_960));

        let items = [PricingLine::new(1, 10_000.0)];
        let r = calculate_pricing(&items, &DiscountSpec::percentage("33.333"), &RawNumber::Missing);
        assert_eq!(r.discount_amount.cents(), 333_330);
        assert_eq!(r.total_amount.cents(), 666_670);
    }

    #[test]
    fn test_result_serializes_major_units() {
        let r = calculate_pricing(&sample_items(), &DiscountSpec::percentage(10), &RawNumber::Missing);
        let json = serde_json::to_value(r).unwrap();
        assert_eq!(json["subtotal"], 250.0);
        assert_eq!(json["discountAmount"], 25.0);
        assert_eq!(json["shippingFee"], 0.0);
        assert_eq!(json["totalAmount"], 225.0);

        let back: PricingResult = serde_json::from_value(json).unwrap();
        assert_eq!(back, r);
    }
}
