//! # Domain Types
//!
//! Order-related types shared by the pricing calculator, the order form
//! and the submission payload.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    LineItem     │   │  DiscountSpec   │   │  OrderStatus    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  product_id     │   │  kind           │   │  Pending        │       │
//! │  │  product_name   │   │  value (raw)    │   │  Processing     │       │
//! │  │  quantity (raw) │   └─────────────────┘   │  Shipped        │       │
//! │  │  unit_price     │                         │  Delivered      │       │
//! │  └─────────────────┘   ┌─────────────────┐   │  Cancelled      │       │
//! │                        │  DiscountType   │   └─────────────────┘       │
//! │                        │  None           │                              │
//! │                        │  Percentage     │   ┌─────────────────┐       │
//! │                        │  Fixed          │   │ PaymentStatus   │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! `product_name` and `unit_price` are captured when the line is added and
//! are never re-synced from the catalog. The operator may edit the price.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::input::RawNumber;

// =============================================================================
// Line Item
// =============================================================================

/// One product-quantity-price entry in an order form.
///
/// `quantity` and `unit_price` hold exactly what the operator typed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Catalog product identifier (opaque).
    pub product_id: String,

    /// Product name at time of adding (frozen).
    #[serde(default)]
    pub product_name: String,

    #[serde(default)]
    pub quantity: RawNumber,

    #[serde(default)]
    pub unit_price: RawNumber,
}

impl LineItem {
    pub fn new(
        product_id: impl Into<String>,
        product_name: impl Into<String>,
        unit_price: impl Into<RawNumber>,
        quantity: impl Into<RawNumber>,
    ) -> Self {
        LineItem {
            product_id: product_id.into(),
            product_name: product_name.into(),
            quantity: quantity.into(),
            unit_price: unit_price.into(),
        }
    }
}

// =============================================================================
// Discount
// =============================================================================

/// How a discount value is interpreted.
///
/// ## Canonical "no discount"
/// Older dashboard screens send `"none"`, others send `null` or omit the
/// field. Both deserialize to [`DiscountType::None`], which always
/// serializes as `"none"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DiscountType {
    #[default]
    None,
    /// Value is in percent points (10 = 10%).
    Percentage,
    /// Value is an absolute currency amount.
    Fixed,
}

impl DiscountType {
    /// Returns true for the types that carry a value.
    pub fn is_active(&self) -> bool {
        !matches!(self, DiscountType::None)
    }
}

impl fmt::Display for DiscountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscountType::None => write!(f, "none"),
            DiscountType::Percentage => write!(f, "percentage"),
            DiscountType::Fixed => write!(f, "fixed"),
        }
    }
}

impl std::str::FromStr for DiscountType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "none" => Ok(DiscountType::None),
            "percentage" | "percent" => Ok(DiscountType::Percentage),
            "fixed" | "amount" => Ok(DiscountType::Fixed),
            other => Err(format!(
                "Unknown discount type: '{}'. Valid options: none, percentage, fixed",
                other
            )),
        }
    }
}

impl<'de> Deserialize<'de> for DiscountType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(DiscountType::None),
            Some(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// A discount as entered in the order form.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiscountSpec {
    #[serde(rename = "type", default)]
    pub kind: DiscountType,

    /// Ignored when `kind` is `None`.
    #[serde(default)]
    pub value: RawNumber,
}

impl DiscountSpec {
    pub fn none() -> Self {
        DiscountSpec::default()
    }

    pub fn percentage(value: impl Into<RawNumber>) -> Self {
        DiscountSpec {
            kind: DiscountType::Percentage,
            value: value.into(),
        }
    }

    pub fn fixed(value: impl Into<RawNumber>) -> Self {
        DiscountSpec {
            kind: DiscountType::Fixed,
            value: value.into(),
        }
    }
}

// =============================================================================
// Order / Payment Status
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Unpaid,
    Paid,
    Refunded,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discount_type_accepts_null_and_none() {
        let from_null: DiscountSpec = serde_json::from_str(r#"{"type":null,"value":5}"#).unwrap();
        let from_none: DiscountSpec = serde_json::from_str(r#"{"type":"none","value":5}"#).unwrap();
        let absent: DiscountSpec = serde_json::from_str(r#"{"value":5}"#).unwrap();

        assert_eq!(from_null.kind, DiscountType::None);
        assert_eq!(from_none.kind, DiscountType::None);
        assert_eq!(absent.kind, DiscountType::None);
    }

    #[test]
    fn test_discount_type_serializes_canonically() {
        let json = serde_json::to_string(&DiscountSpec::none()).unwrap();
        assert_eq!(json, r#"{"type":"none","value":null}"#);
    }

    #[test]
    fn test_discount_type_rejects_unknown() {
        let result: Result<DiscountSpec, _> = serde_json::from_str(r#"{"type":"bogo"}"#);
        assert!(result.is_err());
        assert_eq!("Percent".parse::<DiscountType>(), Ok(DiscountType::Percentage));
    }

    #[test]
    fn test_line_item_camel_case() {
        let item: LineItem = serde_json::from_str(
            r#"{"productId":"p-1","productName":"Widget","quantity":"2","unitPrice":9.5}"#,
        )
        .unwrap();
        assert_eq!(item.product_id, "p-1");
        assert_eq!(item.quantity, RawNumber::from("2"));
        assert_eq!(item.unit_price, RawNumber::from(9.5));
    }

    #[test]
    fn test_status_defaults() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
        assert_eq!(PaymentStatus::default(), PaymentStatus::Unpaid);
    }
}
