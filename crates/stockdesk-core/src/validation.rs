//! # Validation Module
//!
//! Form-schema validation that runs before an order is submitted.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Two Separate Layers                                │
//! │                                                                         │
//! │  While typing: pricing calculator                                      │
//! │  ├── coerces bad numbers to safe defaults                              │
//! │  └── always shows a total, never blocks                                │
//! │                                                                         │
//! │  On submit: THIS MODULE                                                │
//! │  ├── checks the raw values exactly as typed                            │
//! │  ├── collects every failure (one message per field)                    │
//! │  └── blocks submission until the form is clean                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use stockdesk_core::input::RawNumber;
//! use stockdesk_core::validation::{validate_customer_id, validate_quantity};
//!
//! assert!(validate_customer_id("cus_42").is_ok());
//! assert!(validate_quantity("items[0].quantity", &RawNumber::from("2.5")).is_err());
//! ```

use crate::error::{ValidationError, ValidationErrors};
use crate::input::RawNumber;
use crate::order_form::OrderForm;
use crate::types::{DiscountSpec, DiscountType};
use crate::{MAX_ITEM_QUANTITY, MAX_NOTES_LEN};

pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates the selected customer.
pub fn validate_customer_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "customer".to_string(),
        });
    }
    Ok(())
}

/// Validates a line's product reference.
pub fn validate_product_id(field: &str, id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates free-text order notes.
pub fn validate_notes(notes: &str) -> ValidationResult<()> {
    if notes.chars().count() > MAX_NOTES_LEN {
        return Err(ValidationError::TooLong {
            field: "notes".to_string(),
            max: MAX_NOTES_LEN,
        });
    }
    Ok(())
}

/// Validates a list search query and returns it trimmed.
///
/// Empty is allowed (no filtering); at most 100 characters.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > 100 {
        return Err(ValidationError::TooLong {
            field: "search".to_string(),
            max: 100,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Parses a required numeric field, distinguishing blank from garbage.
fn require_number(field: &str, raw: &RawNumber) -> ValidationResult<f64> {
    if raw.is_blank() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    raw.parse().ok_or_else(|| ValidationError::NotANumber {
        field: field.to_string(),
    })
}

/// Validates a quantity exactly as typed.
///
/// ## Rules
/// - required, numeric, whole
/// - between 1 and [`MAX_ITEM_QUANTITY`]
pub fn validate_quantity(field: &str, raw: &RawNumber) -> ValidationResult<()> {
    let qty = require_number(field, raw)?;

    if qty.fract() != 0.0 {
        return Err(ValidationError::NotWhole {
            field: field.to_string(),
        });
    }

    if qty < 1.0 || qty > f64::from(MAX_ITEM_QUANTITY) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 1,
            max: i64::from(MAX_ITEM_QUANTITY),
        });
    }

    Ok(())
}

/// Validates a unit price. Zero is allowed (free items).
pub fn validate_unit_price(field: &str, raw: &RawNumber) -> ValidationResult<()> {
    let price = require_number(field, raw)?;
    if price < 0.0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates the discount value when a discount type is selected.
///
/// Percentages are capped at 100. Fixed amounts larger than the subtotal
/// are accepted; the calculator clamps them.
pub fn validate_discount(discount: &DiscountSpec) -> ValidationResult<()> {
    if !discount.kind.is_active() {
        return Ok(());
    }

    let value = require_number("discountValue", &discount.value)?;
    if value < 0.0 {
        return Err(ValidationError::Negative {
            field: "discountValue".to_string(),
        });
    }

    if discount.kind == DiscountType::Percentage && value > 100.0 {
        return Err(ValidationError::OutOfRange {
            field: "discountValue".to_string(),
            min: 0,
            max: 100,
        });
    }

    Ok(())
}

/// Validates the shipping fee. Blank means no shipping.
pub fn validate_shipping_fee(raw: &RawNumber) -> ValidationResult<()> {
    if raw.is_blank() {
        return Ok(());
    }
    let fee = raw.parse().ok_or_else(|| ValidationError::NotANumber {
        field: "shippingFee".to_string(),
    })?;
    if fee < 0.0 {
        return Err(ValidationError::Negative {
            field: "shippingFee".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Form Validator
// =============================================================================

/// Validates a whole order form, collecting every failure.
///
/// ## Rules
/// - customer selected
/// - at least one line item; each line has a product, a whole quantity
///   in range and a non-negative price
/// - discount and shipping values are sane
/// - notes within length
pub fn validate_order_form(form: &OrderForm) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    errors.check(validate_customer_id(form.customer_id()));

    if form.items().is_empty() {
        errors.push(ValidationError::Required {
            field: "items".to_string(),
        });
    }

    for (i, item) in form.items().iter().enumerate() {
        errors.check(validate_product_id(&format!("items[{}].productId", i), &item.product_id));
        errors.check(validate_quantity(&format!("items[{}].quantity", i), &item.quantity));
        errors.check(validate_unit_price(&format!("items[{}].unitPrice", i), &item.unit_price));
    }

    errors.check(validate_discount(form.discount()));
    errors.check(validate_shipping_fee(form.shipping_fee()));

    if let Some(notes) = form.notes() {
        errors.check(validate_notes(notes));
    }

    errors.into_result()
}

// =============================================================================
// Unit Tests
// =============================================================================
