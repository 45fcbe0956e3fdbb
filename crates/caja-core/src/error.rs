//! # Error Types
//!
//! Domain-specific error types for caja-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  caja-core errors (this file)                                           │
//! │  ├── CoreError        - Business rule violations                        │
//! │  └── ValidationError  - Input validation failures                       │
//! │                                                                         │
//! │  caja-db errors (separate crate)                                        │
//! │  ├── DbError          - Database operation failures (incl. Busy)        │
//! │  └── ServiceError     - Domain | Db, what service callers match on      │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ServiceError → caller              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product id, stock figures)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

use crate::types::StockShortfall;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic failures.
/// They should be caught and translated to user-friendly messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product cannot be found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Sale cannot be found.
    #[error("Sale not found: {0}")]
    SaleNotFound(String),

    /// Caller has no right to act on the referenced product or sale.
    ///
    /// ## When This Occurs
    /// - An employee sells a product outside their manager's inventory
    /// - An employee cancels another user's sale
    /// - A non-admin adjusts stock or creates products
    #[error("User {user_id} may not {action}")]
    Forbidden { user_id: String, action: String },

    /// One or more line items exceed available stock.
    ///
    /// Carries the complete shortfall list so the caller can report every
    /// problem at once, not just the first.
    ///
    /// ## User Workflow
    /// ```text
    /// create_sale([{cola, 5}, {chips, 2}])
    ///      │
    ///      ▼
    /// Re-read stock under lock: cola=3, chips=0
    ///      │
    ///      ▼
    /// InsufficientStock { shortfalls: [cola 5/3, chips 2/0] }
    ///      │
    ///      ▼
    /// UI shows both lines as unavailable
    /// ```
    #[error("Insufficient stock for {} line item(s)", .shortfalls.len())]
    InsufficientStock { shortfalls: Vec<StockShortfall> },

    /// A stock mutation would drive stock below zero.
    #[error(
        "Stock for product {product_id} cannot go negative: current {current_stock}, delta {delta}"
    )]
    NegativeStock {
        product_id: String,
        current_stock: i64,
        delta: i64,
    },

    /// Cancellation attempted on an already-cancelled sale.
    ///
    /// Cancellation is one-way and not idempotent: retrying is an error,
    /// not a no-op, so callers learn the restore already happened.
    #[error("Sale {sale_id} is already cancelled")]
    AlreadyCancelled { sale_id: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Builds a `Forbidden` error without `to_string()` noise at call sites.
    pub fn forbidden(user_id: impl Into<String>, action: impl Into<String>) -> Self {
        CoreError::Forbidden {
            user_id: user_id.into(),
            action: action.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when caller input doesn't meet requirements.
/// Used for early validation before any storage is touched.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// A list has more entries than allowed.
    #[error("{field} cannot contain more than {max} entries")]
    TooMany { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} cannot be negative")]
    CannotBeNegative { field: String },

    /// Value must not be zero (signed deltas).
    #[error("{field} must not be zero")]
    MustBeNonZero { field: String },

    /// Invalid format (bad characters, malformed value).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// String could not be parsed as a monetary amount.
    #[error("'{input}' is not a valid monetary amount")]
    InvalidMoney { input: String },
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
    fn test_shortfall_error_message() {
        let err = CoreError::InsufficientStock {
            shortfalls: vec![
                StockShortfall {
                    product_id: "p1".to_string(),
                    requested: 5,
                    available: 3,
                },
                StockShortfall {
                    product_id: "p2".to_string(),
                    requested: 2,
                    available: 0,
                },
            ],
        };
        assert_eq!(err.to_string(), "Insufficient stock for 2 line item(s)");
    }

    #[test]
    fn test_negative_stock_message_names_figures() {
        let err = CoreError::NegativeStock {
            product_id: "p1".to_string(),
            current_stock: 3,
            delta: -100,
        };
        assert_eq!(
            err.to_string(),
            "Stock for product p1 cannot go negative: current 3, delta -100"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "items".to_string(),
        };
        assert_eq!(err.to_string(), "items is required");

        let err = ValidationError::MustBeNonZero {
            field: "delta".to_string(),
        };
        assert_eq!(err.to_string(), "delta must not be zero");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
