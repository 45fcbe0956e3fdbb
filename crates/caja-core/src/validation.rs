//! # Validation Module
//!
//! Input validation utilities for Caja POS.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Caller (API layer outside this workspace)                     │
//! │  ├── Basic format checks (empty, length)                                │
//! │  └── Immediate user feedback                                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE - business rule validation                        │
//! │  └── Runs before any lock is taken or storage touched                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                             │
//! │  ├── NOT NULL constraints                                               │
//! │  ├── UNIQUE constraints (product code)                                  │
//! │  └── CHECK constraints (stock >= 0, quantity > 0)                       │
//! │                                                                         │
//! │  Defense in depth: multiple layers catch different errors               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use caja_core::validation::{validate_quantity, validate_adjustment};
//!
//! // Validate a line quantity before any stock check
//! validate_quantity(5).unwrap();
//!
//! // Validate a manual adjustment request
//! validate_adjustment(-3, "damaged in transit").unwrap();
//! ```

use crate::error::ValidationError;
use crate::types::{NewProduct, SaleLine};
use crate::{MAX_LINE_QUANTITY, MAX_PRICE_CENTS, MAX_SALE_LINES};

use std::collections::BTreeMap;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Sale Line Validators
// =============================================================================

/// Validates and normalizes the line items of a sale request.
///
/// ## Rules
/// - The list must not be empty
/// - At most MAX_SALE_LINES (100) entries
/// - Every product id must be non-blank
/// - Every quantity must be in 1..=MAX_LINE_QUANTITY (999), also after
///   merging duplicates
///
/// ## Normalization
/// Duplicate product ids are merged by summing their quantities, and the
/// result is sorted by ascending product id. That order is load-bearing:
/// it is the order in which product rows are locked and the order in which
/// shortfalls are reported.
///
/// ## Example
/// ```rust
/// use caja_core::types::SaleLine;
/// use caja_core::validation::validate_sale_lines;
///
/// let lines = vec![
///     SaleLine { product_id: "b".into(), quantity: 2 },
///     SaleLine { product_id: "a".into(), quantity: 1 },
///     SaleLine { product_id: "b".into(), quantity: 3 },
/// ];
/// let merged = validate_sale_lines(&lines).unwrap();
/// assert_eq!(merged.len(), 2);
/// assert_eq!(merged[0].product_id, "a");
/// assert_eq!(merged[1].quantity, 5);
/// ```
pub fn validate_sale_lines(lines: &[SaleLine]) -> ValidationResult<Vec<SaleLine>> {
    if lines.is_empty() {
        return Err(ValidationError::Required {
            field: "items".to_string(),
        });
    }

    if lines.len() > MAX_SALE_LINES {
        return Err(ValidationError::TooMany {
            field: "items".to_string(),
            max: MAX_SALE_LINES,
        });
    }

    // BTreeMap gives the ascending product-id order for free.
    let mut merged: BTreeMap<&str, i64> = BTreeMap::new();

    for line in lines {
        let product_id = line.product_id.trim();
        if product_id.is_empty() {
            return Err(ValidationError::Required {
                field: "product_id".to_string(),
            });
        }

        validate_quantity(line.quantity)?;

        *merged.entry(product_id).or_insert(0) += line.quantity;
    }

    // Re-check the merged totals: 600 + 600 must not slip past the cap.
    for quantity in merged.values() {
        validate_quantity(*quantity)?;
    }

    Ok(merged
        .into_iter()
        .map(|(product_id, quantity)| SaleLine {
            product_id: product_id.to_string(),
            quantity,
        })
        .collect())
}

/// Validates a quantity value.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_LINE_QUANTITY (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

// =============================================================================
// Stock Adjustment Validators
// =============================================================================

/// Validates a manual stock adjustment request.
///
/// ## Rules
/// - `delta` must not be zero (a zero adjustment is meaningless and would
///   produce a movement with no direction)
/// - `reason` must be non-blank and at most 255 characters
///
/// ## Example
/// ```rust
/// use caja_core::validation::validate_adjustment;
///
/// assert!(validate_adjustment(-3, "damaged").is_ok());
/// assert!(validate_adjustment(0, "noop").is_err());
/// assert!(validate_adjustment(5, "   ").is_err());
/// ```
pub fn validate_adjustment(delta: i64, reason: &str) -> ValidationResult<()> {
    if delta == 0 {
        return Err(ValidationError::MustBeNonZero {
            field: "delta".to_string(),
        });
    }

    let reason = reason.trim();

    if reason.is_empty() {
        return Err(ValidationError::Required {
            field: "reason".to_string(),
        });
    }

    if reason.len() > 255 {
        return Err(ValidationError::TooLong {
            field: "reason".to_string(),
            max: 255,
        });
    }

    Ok(())
}

// =============================================================================
// Product Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - Must be between 1 and 100 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 100,
        });
    }

    Ok(())
}

/// Validates an explicit product code.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 100 characters
/// - Only letters, numbers, and hyphens (the shape generated codes have)
///
/// ## Example
/// ```rust
/// use caja_core::validation::validate_product_code;
///
/// assert!(validate_product_code("ELEC-LAPT-001").is_ok());
/// assert!(validate_product_code("has space").is_err());
/// ```
pub fn validate_product_code(code: &str) -> ValidationResult<()> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "code".to_string(),
        });
    }

    if code.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "code".to_string(),
            max: 100,
        });
    }

    if !code.chars().all(|c| c.is_alphanumeric() || c == '-') {
        return Err(ValidationError::InvalidFormat {
            field: "code".to_string(),
            reason: "must contain only letters, numbers, and hyphens".to_string(),
        });
    }

    Ok(())
}

/// Validates the full input for product creation.
///
/// ## Rules
/// - Valid name (see [`validate_product_name`])
/// - Category, when present, at most 50 characters
/// - Price valid per [`validate_price_cents`] (zero allowed, capped)
/// - Genesis stock must not be negative
/// - Explicit code, when present, must pass [`validate_product_code`]
pub fn validate_new_product(input: &NewProduct) -> ValidationResult<()> {
    validate_product_name(&input.name)?;

    if let Some(category) = &input.category {
        if category.len() > 50 {
            return Err(ValidationError::TooLong {
                field: "category".to_string(),
                max: 50,
            });
        }
    }

    validate_price_cents(input.price_cents)?;

    if input.initial_stock < 0 {
        return Err(ValidationError::CannotBeNegative {
            field: "stock".to_string(),
        });
    }

    if let Some(code) = &input.code {
        validate_product_code(code)?;
    }

    Ok(())
}

/// Validates a price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
/// - Must not exceed MAX_PRICE_CENTS ($1,000,000.00), which keeps every
///   subtotal and total comfortably inside i64
///
/// ## Example
/// ```rust
/// use caja_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents(1099).is_ok());  // $10.99
/// assert!(validate_price_cents(0).is_ok());     // Free item
/// assert!(validate_price_cents(-100).is_err()); // Invalid
/// ```
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::CannotBeNegative {
            field: "price".to_string(),
        });
    }

    if cents > MAX_PRICE_CENTS {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_PRICE_CENTS,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn line(product_id: &str, quantity: i64) -> SaleLine {
        SaleLine {
            product_id: product_id.to_string(),
            quantity,
        }
    }

    #[test]
    fn test_validate_sale_lines_rejects_empty() {
        assert!(validate_sale_lines(&[]).is_err());
    }

    #[test]
    fn test_validate_sale_lines_rejects_bad_quantities() {
        assert!(validate_sale_lines(&[line("p1", 0)]).is_err());
        assert!(validate_sale_lines(&[line("p1", -2)]).is_err());
        assert!(validate_sale_lines(&[line("p1", 1000)]).is_err());
    }

    #[test]
    fn test_validate_sale_lines_rejects_blank_product() {
        assert!(validate_sale_lines(&[line("", 1)]).is_err());
        assert!(validate_sale_lines(&[line("   ", 1)]).is_err());
    }

    #[test]
    fn test_validate_sale_lines_merges_and_sorts() {
        let merged =
            validate_sale_lines(&[line("b", 2), line("a", 1), line("b", 3)]).unwrap();
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].product_id, "a");
        assert_eq!(merged[0].quantity, 1);
        assert_eq!(merged[1].product_id, "b");
        assert_eq!(merged[1].quantity, 5);
    }

    #[test]
    fn test_validate_sale_lines_caps_merged_quantity() {
        // Each line passes on its own, the merged total does not.
        assert!(validate_sale_lines(&[line("p1", 600), line("p1", 600)]).is_err());
    }

    #[test]
    fn test_validate_sale_lines_rejects_too_many() {
        let lines: Vec<SaleLine> = (0..=MAX_SALE_LINES)
            .map(|i| line(&format!("p{i}"), 1))
            .collect();
        assert!(validate_sale_lines(&lines).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_adjustment() {
        assert!(validate_adjustment(-3, "damaged").is_ok());
        assert!(validate_adjustment(10, "recount after audit").is_ok());

        assert!(validate_adjustment(0, "noop").is_err());
        assert!(validate_adjustment(5, "").is_err());
        assert!(validate_adjustment(5, "   ").is_err());
        assert!(validate_adjustment(5, &"x".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Coca-Cola 330ml").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name(&"A".repeat(200)).is_err());
    }

    #[test]
    fn test_validate_product_code() {
        assert!(validate_product_code("ELEC-LAPT-001").is_ok());
        assert!(validate_product_code("ABC123").is_ok());

        assert!(validate_product_code("").is_err());
        assert!(validate_product_code("has space").is_err());
        assert!(validate_product_code(&"A".repeat(200)).is_err());
    }

    #[test]
    fn test_validate_new_product() {
        let input = NewProduct {
            name: "Laptop".to_string(),
            category: Some("Electronics".to_string()),
            price_cents: 99900,
            initial_stock: 10,
            code: None,
        };
        assert!(validate_new_product(&input).is_ok());

        let negative_price = NewProduct {
            price_cents: -1,
            ..input.clone()
        };
        assert!(validate_new_product(&negative_price).is_err());

        let absurd_price = NewProduct {
            price_cents: MAX_PRICE_CENTS + 1,
            ..input.clone()
        };
        assert!(validate_new_product(&absurd_price).is_err());

        let negative_stock = NewProduct {
            initial_stock: -5,
            ..input.clone()
        };
        assert!(validate_new_product(&negative_stock).is_err());

        let blank_name = NewProduct {
            name: "  ".to_string(),
            ..input
        };
        assert!(validate_new_product(&blank_name).is_err());
    }

    #[test]
    fn test_validate_price_cents() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(1099).is_ok());
        assert!(validate_price_cents(MAX_PRICE_CENTS).is_ok());

        assert!(validate_price_cents(-100).is_err());
        assert!(validate_price_cents(MAX_PRICE_CENTS + 1).is_err());
        assert!(validate_price_cents(i64::MAX).is_err());
    }
}
