//! # Order Form
//!
//! Mutable state of one order create/edit session.
//!
//! ## Recomputation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Order Form Operations                                │
//! │                                                                         │
//! │  Operator Action          Method                  State Change          │
//! │  ───────────────          ──────                  ────────────          │
//! │                                                                         │
//! │  Pick product ───────────► add_item() ──────────► items.push(line)     │
//! │  Edit quantity ──────────► set_quantity() ──────► items[i].quantity    │
//! │  Edit price ─────────────► set_unit_price() ────► items[i].unit_price  │
//! │  Change discount ────────► set_discount() ──────► discount             │
//! │  Edit shipping ──────────► set_shipping_fee() ──► shipping_fee         │
//! │                                                                         │
//! │  Any read of totals ─────► pricing() ───────────► (derived, no state)  │
//! │                                                                         │
//! │  pricing() runs the calculator over the current fields on every call,  │
//! │  so a displayed or submitted total can never lag the last edit.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::input::{coerce_quantity, RawNumber};
use crate::pricing::{calculate_pricing, PricingResult};
use crate::submission::OrderSubmission;
use crate::types::{DiscountSpec, DiscountType, LineItem, OrderStatus, PaymentStatus};
use crate::validation::validate_order_form;
use crate::{MAX_ITEM_QUANTITY, MAX_ORDER_ITEMS};

/// The order form.
///
/// ## Invariants
/// - lines are unique by `product_id` (adding the same product again
///   increases its quantity)
/// - at most [`MAX_ORDER_ITEMS`] lines
///
/// Quantities and prices are stored as typed; coercion happens in the
/// calculator and strict checks happen in [`validate_order_form`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderForm {
    #[serde(default)]
    customer_id: String,

    #[serde(default)]
    items: Vec<LineItem>,

    #[serde(default)]
    discount: DiscountSpec,

    #[serde(default)]
    shipping_fee: RawNumber,

    #[serde(default)]
    status: OrderStatus,

    #[serde(default)]
    payment_status: PaymentStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    notes: Option<String>,
}

impl OrderForm {
    /// Creates an empty form.
    pub fn new() -> Self {
        OrderForm::default()
    }

    // -------------------------------------------------------------------------
    // Customer
    // -------------------------------------------------------------------------

    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    pub fn set_customer(&mut self, customer_id: impl Into<String>) {
        self.customer_id = customer_id.into();
    }

    // -------------------------------------------------------------------------
    // Line Items
    // -------------------------------------------------------------------------

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn item(&self, product_id: &str) -> Option<&LineItem> {
        self.items.iter().find(|i| i.product_id == product_id)
    }

    fn item_mut(&mut self, product_id: &str) -> CoreResult<&mut LineItem> {
        self.items
            .iter_mut()
            .find(|i| i.product_id == product_id)
            .ok_or_else(|| CoreError::ItemNotFound(product_id.to_string()))
    }

    /// Adds a product or increases its quantity if already present.
    ///
    /// ## Behavior
    /// - new product: appended with the given name and price snapshot
    /// - existing product: quantity increases, the original price is kept
    ///
    /// ## Errors
    /// - `quantity` is zero
    /// - the combined quantity exceeds [`MAX_ITEM_QUANTITY`]
    /// - the form already has [`MAX_ORDER_ITEMS`] lines
    pub fn add_item(
        &mut self,
        product_id: impl Into<String>,
        product_name: impl Into<String>,
        unit_price: impl Into<RawNumber>,
        quantity: u32,
    ) -> CoreResult<()> {
        if quantity == 0 {
            return Err(ValidationError::OutOfRange {
                field: "quantity".to_string(),
                min: 1,
                max: i64::from(MAX_ITEM_QUANTITY),
            }
            .into());
        }

        let product_id = product_id.into();

        if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product_id) {
            let new_qty = u64::from(coerce_quantity(&item.quantity)) + u64::from(quantity);
            if new_qty > u64::from(MAX_ITEM_QUANTITY) {
                return Err(CoreError::QuantityTooLarge {
                    requested: new_qty,
                    max: MAX_ITEM_QUANTITY,
                });
            }
            // new_qty <= MAX_ITEM_QUANTITY fits in u32
            item.quantity = RawNumber::from(new_qty as u32);
            return Ok(());
        }

        if quantity > MAX_ITEM_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: u64::from(quantity),
                max: MAX_ITEM_QUANTITY,
            });
        }

        if self.items.len() >= MAX_ORDER_ITEMS {
            return Err(CoreError::TooManyItems {
                max: MAX_ORDER_ITEMS,
            });
        }

        self.items
            .push(LineItem::new(product_id, product_name, unit_price, quantity));
        Ok(())
    }

    /// Stores the quantity field exactly as typed.
    pub fn set_quantity(&mut self, product_id: &str, quantity: impl Into<RawNumber>) -> CoreResult<()> {
        self.item_mut(product_id)?.quantity = quantity.into();
        Ok(())
    }

    /// Stores the unit price field exactly as typed.
    pub fn set_unit_price(&mut self, product_id: &str, unit_price: impl Into<RawNumber>) -> CoreResult<()> {
        self.item_mut(product_id)?.unit_price = unit_price.into();
        Ok(())
    }

    pub fn remove_item(&mut self, product_id: &str) -> CoreResult<()> {
        let initial_len = self.items.len();
        self.items.retain(|i| i.product_id != product_id);

        if self.items.len() == initial_len {
            Err(CoreError::ItemNotFound(product_id.to_string()))
        } else {
            Ok(())
        }
    }

    /// Removes every line. Customer, discount and shipping are kept.
    pub fn clear_items(&mut self) {
        self.items.clear();
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Total units across lines, after quantity coercion.
    pub fn total_quantity(&self) -> u64 {
        self.items
            .iter()
            .map(|i| u64::from(coerce_quantity(&i.quantity)))
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    // -------------------------------------------------------------------------
    // Discount / Shipping
    // -------------------------------------------------------------------------

    pub fn discount(&self) -> &DiscountSpec {
        &self.discount
    }

    pub fn set_discount(&mut self, kind: DiscountType, value: impl Into<RawNumber>) {
        self.discount = DiscountSpec {
            kind,
            value: value.into(),
        };
    }

    /// Switches the discount type, keeping whatever value was typed.
    ///
    /// A value left behind under `None` is ignored by the calculator.
    pub fn set_discount_type(&mut self, kind: DiscountType) {
        self.discount.kind = kind;
    }

    pub fn shipping_fee(&self) -> &RawNumber {
        &self.shipping_fee
    }

    pub fn set_shipping_fee(&mut self, fee: impl Into<RawNumber>) {
        self.shipping_fee = fee.into();
    }

    // -------------------------------------------------------------------------
    // Status / Notes
    // -------------------------------------------------------------------------

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn set_status(&mut self, status: OrderStatus) {
        self.status = status;
    }

    pub fn payment_status(&self) -> PaymentStatus {
        self.payment_status
    }

    pub fn set_payment_status(&mut self, status: PaymentStatus) {
        self.payment_status = status;
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Sets notes; blank text clears them.
    pub fn set_notes(&mut self, notes: Option<String>) {
        self.notes = notes.filter(|n| !n.trim().is_empty());
    }

    // -------------------------------------------------------------------------
    // Derived
    // -------------------------------------------------------------------------

    /// Current totals. Recomputed from the form fields on every call.
    pub fn pricing(&self) -> PricingResult {
        calculate_pricing(&self.items, &self.discount, &self.shipping_fee)
    }

    /// Validates the form and builds the payload for the order API.
    ///
    /// ## Errors
    /// [`CoreError::InvalidSubmission`] with every field-level failure.
    pub fn to_submission(&self) -> CoreResult<OrderSubmission> {
        validate_order_form(self)?;
        Ok(OrderSubmission::from_form(self))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
