//! # Order Submission Payload
//!
//! The JSON body sent to the external order API when an order is created
//! or updated.
//!
//! ```json
//! {
//!   "customerId": "cus_1",
//!   "items": [{ "productId": "p-1", "productName": "Widget", "quantity": 2, "unitPrice": 100.0 }],
//!   "status": "pending",
//!   "paymentStatus": "unpaid",
//!   "subtotal": 250.0,
//!   "shippingFee": 0.0,
//!   "discountType": "percentage",
//!   "discountValue": 10.0,
//!   "discountAmount": 25.0,
//!   "totalAmount": 225.0
//! }
//! ```
//!
//! `discountValue` is only present while a discount is active.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::input::{coerce_amount, coerce_discount_value, coerce_quantity};
use crate::money::{as_major, Money};
use crate::order_form::OrderForm;
use crate::types::{DiscountType, OrderStatus, PaymentStatus};

/// One line of a submitted order, with coerced numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionItem {
    pub product_id: String,
    pub product_name: String,
    pub quantity: u32,
    #[serde(with = "as_major")]
    #[ts(type = "number")]
    pub unit_price: Money,
}

/// Payload for the order create/update endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderSubmission {
    pub customer_id: String,
    pub items: Vec<SubmissionItem>,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub notes: Option<String>,

    #[serde(with = "as_major")]
    #[ts(type = "number")]
    pub subtotal: Money,

    #[serde(with = "as_major")]
    #[ts(type = "number")]
    pub shipping_fee: Money,

    pub discount_type: DiscountType,

    /// Percent points or currency amount, depending on `discount_type`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub discount_value: Option<f64>,

    #[serde(with = "as_major")]
    #[ts(type = "number")]
    pub discount_amount: Money,

    #[serde(with = "as_major")]
    #[ts(type = "number")]
    pub total_amount: Money,
}

impl OrderSubmission {
    /// Builds the payload from a form. Callers validate first;
    /// see [`OrderForm::to_submission`].
    pub(crate) fn from_form(form: &OrderForm) -> Self {
        let pricing = form.pricing();
        let discount = form.discount();
        let value = coerce_discount_value(&discount.value);

        let (discount_type, discount_value) = if discount.kind.is_active() && value > 0.0 {
            (discount.kind, Some(value))
        } else {
            (DiscountType::None, None)
        };

        OrderSubmission {
            customer_id: form.customer_id().trim().to_string(),
            items: form
                .items()
                .iter()
                .map(|item| SubmissionItem {
                    product_id: item.product_id.clone(),
                    product_name: item.product_name.clone(),
                    quantity: coerce_quantity(&item.quantity),
                    unit_price: coerce_amount(&item.unit_price),
                })
                .collect(),
            status: form.status(),
            payment_status: form.payment_status(),
            notes: form.notes().map(str::to_string),
            subtotal: pricing.subtotal,
            shipping_fee: pricing.shipping_fee,
            discount_type,
            discount_value,
            discount_amount: pricing.discount_amount,
            total_amount: pricing.total_amount,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
