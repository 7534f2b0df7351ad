//! # stockdesk-core: Pure Business Logic for StockDesk
//!
//! Order pricing and order-form rules for the StockDesk administration
//! dashboard, as pure functions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        StockDesk Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Dashboard (browser)                          │   │
//! │  │    Order form ──► live totals ──► submit to order API           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON                                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ stockdesk-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌────────────┐ ┌──────────────┐    │   │
//! │  │   │  input   │ │ pricing  │ │ order_form │ │  validation  │    │   │
//! │  │   │ RawNumber│ │ Calculate│ │  OrderForm │ │  form rules  │    │   │
//! │  │   └──────────┘ └──────────┘ └────────────┘ └──────────────┘    │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌────────────┐                     │   │
//! │  │   │  money   │ │  query   │ │ submission │                     │   │
//! │  │   └──────────┘ └──────────┘ └────────────┘                     │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO CLOCK • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            stockdesk-draft (draft cache, configuration)         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic
//! - [`input`] - Raw form values and their coercion rules
//! - [`types`] - Line items, discounts, statuses
//! - [`pricing`] - The order pricing calculator
//! - [`order_form`] - Order form state with live totals
//! - [`submission`] - Payload for the order API
//! - [`validation`] - Pre-submission form validation
//! - [`query`] - Paginated list queries
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use stockdesk_core::{DiscountType, OrderForm};
//!
//! let mut form = OrderForm::new();
//! form.set_customer("cus_1");
//! form.add_item("p-1", "Widget", 100.0, 2).unwrap();
//! form.add_item("p-2", "Gadget", 50.0, 1).unwrap();
//! form.set_discount(DiscountType::Fixed, "100");
//! form.set_shipping_fee("20");
//!
//! assert_eq!(form.pricing().total_amount.cents(), 17_000);
//! ```

pub mod error;
pub mod input;
pub mod money;
pub mod order_form;
pub mod pricing;
pub mod query;
pub mod submission;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError, ValidationErrors};
pub use input::RawNumber;
pub use money::Money;
pub use order_form::OrderForm;
pub use pricing::{calculate_pricing, PricedLine, PricingLine, PricingResult};
pub use query::{ListQuery, Page, SortDirection};
pub use submission::{OrderSubmission, SubmissionItem};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct line items in one order.
pub const MAX_ORDER_ITEMS: usize = 100;

/// Maximum quantity of a single line item.
///
/// Catches a slipped key (10000 instead of 100) before it reaches the API.
pub const MAX_ITEM_QUANTITY: u32 = 9_999;

/// Maximum length of order notes, in characters.
pub const MAX_NOTES_LEN: usize = 1_000;

/// Default rows per list page.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Largest page size the list endpoints accept.
pub const MAX_PAGE_SIZE: u32 = 100;
