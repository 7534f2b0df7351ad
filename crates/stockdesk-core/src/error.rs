//! # Error Types
//!
//! Domain-specific error types for stockdesk-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  stockdesk-core errors (this file)                                     │
//! │  ├── CoreError         - Order form rule violations                    │
//! │  ├── ValidationError   - One field-level validation failure            │
//! │  └── ValidationErrors  - Every failure found in one pass               │
//! │                                                                         │
//! │  stockdesk-draft errors (separate crate)                               │
//! │  └── DraftError        - Draft cache and config failures               │
//! │                                                                         │
//! │  NOTE: the pricing calculator has no error type. Bad numbers are       │
//! │        coerced, never raised.                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use std::fmt;
use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Order form errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The product is not a line of this order.
    #[error("Product {0} is not in this order")]
    ItemNotFound(String),

    /// The order already has the maximum number of distinct lines.
    #[error("An order cannot have more than {max} line items")]
    TooManyItems { max: usize },

    /// Adding would push a line's quantity past the maximum.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: u64, max: u32 },

    /// A single-field check failed.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The form failed pre-submission validation.
    #[error("Order cannot be submitted: {0}")]
    InvalidSubmission(#[from] ValidationErrors),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Field-level validation failures, shown next to the offending input.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: String },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    #[error("{field} must be a number")]
    NotANumber { field: String },

    #[error("{field} must be a whole number")]
    NotWhole { field: String },

    #[error("{field} must not be negative")]
    Negative { field: String },
}

impl ValidationError {
    /// The form field path this error belongs to (e.g. `items[2].quantity`).
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooLong { field, .. }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::NotANumber { field }
            | ValidationError::NotWhole { field }
            | ValidationError::Negative { field } => field,
        }
    }
}

/// All validation failures for one form, in field order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn new() -> Self {
        ValidationErrors::default()
    }

    pub fn push(&mut self, err: ValidationError) {
        self.0.push(err);
    }

    /// Records the error of a single-field check, if any.
    pub fn check(&mut self, result: Result<(), ValidationError>) {
        if let Err(err) = result {
            self.push(err);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    /// Errors for one field path.
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a ValidationError> {
        self.0.iter().filter(move |e| e.field() == field)
    }

    /// `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::QuantityTooLarge {
            requested: 12000,
            max: 9999,
        };
        assert_eq!(err.to_string(), "Quantity 12000 exceeds maximum allowed (9999)");

        let err = ValidationError::Required {
            field: "customer".to_string(),
        };
        assert_eq!(err.to_string(), "customer is required");
    }

    #[test]
    fn test_validation_errors_collect_and_display() {
        let mut errors = ValidationErrors::new();
        errors.check(Ok(()));
        errors.check(Err(ValidationError::Required {
            field: "customer".into(),
        }));
        errors.push(ValidationError::NotWhole {
            field: "items[0].quantity".into(),
        });

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.for_field("items[0].quantity").count(), 1);
        assert_eq!(
            errors.to_string(),
            "customer is required; items[0].quantity must be a whole number"
        );
        assert!(errors.into_result().is_err());
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationErrors::new().into();
        assert!(matches!(core_err, CoreError::InvalidSubmission(_)));
    }

    #[test]
    fn test_validation_error_serializes_with_kind() {
        let err = ValidationError::Negative {
            field: "shippingFee".into(),
        };
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["kind"], "negative");
        assert_eq!(json["field"], "shippingFee");
    }
}
