//! # Error Types
//!
//! Domain-specific error types for tillpoint-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tillpoint-core errors (this file)                                     │
//! │  ├── CoreError        - Cart / checkout rule violations                │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  tillpoint-client errors (separate crate)                              │
//! │  └── ClientError      - Transport, backend status, lookup misses       │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ClientError → Notice              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every variant's `Display` text is what the cashier sees, so messages are
//! written as full sentences.

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// None of these ever reach the network: they are raised before a request
/// is built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Checkout was attempted with no lines in the cart.
    #[error("The cart is empty. Cannot checkout.")]
    EmptyCart,

    /// The tendered amount does not cover the cart total.
    ///
    /// ## User Workflow
    /// ```text
    /// Cart total: $49.95
    ///      │
    ///      ▼
    /// Amount paid: $40.00
    ///      │
    ///      ▼
    /// InsufficientPayment { paid: $40.00, total: $49.95 }
    ///      │
    ///      ▼
    /// Cart untouched, no request sent
    /// ```
    #[error("Amount paid ({paid}) is less than the total ({total}).")]
    InsufficientPayment { paid: Money, total: Money },

    /// An amount could not be represented in cents.
    #[error("Amount {0} is out of range")]
    AmountOutOfRange(String),

    /// Validation error (wraps ValidationError).
    #[error("{0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Invalid format (e.g., invalid date, invalid amount).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Shorthand for [`ValidationError::Required`].
    pub fn required(field: &str) -> Self {
        ValidationError::Required {
            field: field.to_string(),
        }
    }

    /// Shorthand for [`ValidationError::InvalidFormat`].
    pub fn invalid_format(field: &str, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_payment_message() {
        let err = CoreError::InsufficientPayment {
            paid: Money::from_cents(4000),
            total: Money::from_cents(4995),
        };
        assert_eq!(
            err.to_string(),
            "Amount paid ($40.00) is less than the total ($49.95)."
        );
    }

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(ValidationError::required("name").to_string(), "name is required");

        let err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be positive");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::required("name").into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert_eq!(core_err.to_string(), "name is required");
    }
}
