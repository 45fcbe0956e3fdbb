//! # caja-core: Pure Business Logic for Caja POS
//!
//! This crate is the **heart** of Caja POS. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Caja POS Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │              Surrounding system (not this workspace)            │    │
//! │  │      HTTP endpoints ──► auth / JWT ──► capability resolution    │    │
//! │  └─────────────────────────────┬───────────────────────────────────┘    │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐    │
//! │  │               ★ caja-core (THIS CRATE) ★                        │    │
//! │  │                                                                 │    │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐    │    │
//! │  │   │   types   │  │   money   │  │  access   │  │ validation│    │    │
//! │  │   │  Product  │  │   Money   │  │   Actor   │  │   rules   │    │    │
//! │  │   │   Sale    │  │  (cents)  │  │ can_sell  │  │  checks   │    │    │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘    │    │
//! │  │                                                                 │    │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS            │    │
//! │  └─────────────────────────────┬───────────────────────────────────┘    │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐    │
//! │  │                    caja-db (Database Layer)                     │    │
//! │  │       SQLite repositories + transactional sale/stock services   │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Sale, InventoryMovement, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`access`] - Actor capability object (who may sell/cancel/adjust what)
//! - [`validation`] - Business rule validation
//! - [`code`] - Product code derivation (`ELEC-LAPT-001`)
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use caja_core::money::Money;
//!
//! // Create money from cents (never from floats!)
//! let unit_price = Money::from_cents(250); // $2.50
//!
//! // A line of 4 units
//! let subtotal = unit_price.multiply_quantity(4);
//! assert_eq!(subtotal.cents(), 1000); // $10.00
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod access;
pub mod code;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use caja_core::Money` instead of
// `use caja_core::money::Money`

pub use access::Actor;
pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum line items allowed in a single sale request.
///
/// ## Business Reason
/// Prevents runaway requests and keeps transactions (and their lock
/// footprint) a reasonable size.
pub const MAX_SALE_LINES: usize = 100;

/// Maximum quantity of a single line item.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_LINE_QUANTITY: i64 = 999;

/// Maximum unit price in cents ($1,000,000.00).
///
/// ## Business Reason
/// No small-business product costs a million dollars; a larger value is a
/// typo. It also keeps subtotal arithmetic far from i64 range even at the
/// largest possible sale (MAX_SALE_LINES × MAX_LINE_QUANTITY lines).
pub const MAX_PRICE_CENTS: i64 = 100_000_000;
