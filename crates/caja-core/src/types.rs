//! # Domain Types
//!
//! Core domain types used throughout Caja POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────────┐   │
//! │  │    Product      │   │      Sale       │   │  InventoryMovement  │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────────  │   │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)          │   │
//! │  │  code (business)│   │  total_cents    │   │  direction          │   │
//! │  │  price_cents    │   │  is_cancelled   │   │  quantity           │   │
//! │  │  stock          │   │  cancelled_by   │   │  note               │   │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────────┘   │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────────┐   │
//! │  │     User        │   │    SaleItem     │   │  MovementDirection  │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────────  │   │
//! │  │  role           │   │  price snapshot │   │  Entrada (+)        │   │
//! │  │  manager_id     │   │  subtotal       │   │  Salida  (−)        │   │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Every entity has:
//! - `id`: UUID v4 - immutable, used for database relations
//! - Business ID where one exists (product `code`) - human-readable

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::money::Money;

// =============================================================================
// Roles & Users
// =============================================================================

/// User role in the two-level ownership hierarchy.
///
/// Admins own an independent product inventory and manage employees;
/// employees transact against their manager's inventory but own nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Owns products, manages employees, may adjust stock.
    Admin,
    /// Sells from the assigned manager's inventory.
    Employee,
}

/// A user known to the engine.
///
/// Authentication lives outside this workspace; users are stored here so
/// ownership, cancellation audit fields, and the activity log can reference
/// real rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct User {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Login name, unique across the system.
    pub username: String,

    /// Role deciding ownership semantics.
    pub role: Role,

    /// The admin this employee belongs to. `None` for admins.
    ///
    /// The hierarchy is flat: exactly one manager, managers have none.
    pub manager_id: Option<String>,

    /// When the user was created.
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Product
// =============================================================================

/// A product in an admin's inventory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// The admin whose inventory this product belongs to.
    pub owner_id: String,

    /// Display name shown on receipts and movement history.
    pub name: String,

    /// Optional category, also feeds generated product codes.
    pub category: Option<String>,

    /// Unit price in cents (smallest currency unit). Never negative.
    pub price_cents: i64,

    /// Current stock level. `>= 0` after every committed operation.
    pub stock: i64,

    /// Business code, unique (e.g. `ELEC-LAPT-001`). Generated when the
    /// creator does not supply one.
    pub code: String,

    /// When the product was created.
    pub created_at: DateTime<Utc>,

    /// When the product row last changed (price edits, stock mutations).
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Movement Direction
// =============================================================================

/// Direction of an inventory movement.
///
/// The on-disk and wire values are the Spanish terms the original data set
/// uses: `entrada` (stock increase) and `salida` (stock decrease). Every
/// consumer of the movement log matches on these exact strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum MovementDirection {
    /// Stock increase (cancellations, positive adjustments).
    Entrada,
    /// Stock decrease (sales, negative adjustments).
    Salida,
}

impl MovementDirection {
    /// Derives the direction from a signed stock delta.
    ///
    /// Returns `None` for zero, which no caller may log.
    pub fn from_delta(delta: i64) -> Option<Self> {
        match delta {
            0 => None,
            d if d > 0 => Some(MovementDirection::Entrada),
            _ => Some(MovementDirection::Salida),
        }
    }

    /// The canonical lowercase name (`entrada` / `salida`).
    pub const fn as_str(&self) -> &'static str {
        match self {
            MovementDirection::Entrada => "entrada",
            MovementDirection::Salida => "salida",
        }
    }
}

impl fmt::Display for MovementDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Inventory Movement
// =============================================================================

/// One append-only entry in the inventory movement log.
///
/// Movements are never updated or deleted; the log is the audit trail that
/// reconciles every stock change back to a sale, cancellation, or manual
/// adjustment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct InventoryMovement {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Product whose stock changed.
    pub product_id: String,

    /// Whether stock went up (`entrada`) or down (`salida`).
    pub direction: MovementDirection,

    /// Magnitude of the change. Always positive; direction carries the sign.
    pub quantity: i64,

    /// Free-text reference: `Sale #<id>`, `Cancellation of sale #<id>`,
    /// `Manual adjustment: <reason>`.
    pub note: Option<String>,

    /// When the movement was recorded.
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Sale
// =============================================================================

/// A sale transaction.
///
/// Created atomically with its line items; afterwards the only permitted
/// mutation is the one-way cancellation transition, which stamps
/// `cancelled_at` / `cancelled_by` and never deletes anything.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Sale {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// The transacting user (admin or employee), regardless of who owns
    /// the products sold.
    pub user_id: String,

    /// Sum of line-item subtotals, in cents. Frozen at creation.
    pub total_cents: i64,

    /// Optional opaque payment tag ("cash", "card", ...). Never inspected
    /// by stock or total logic.
    pub payment_method: Option<String>,

    /// Whether the sale has been cancelled. One-way.
    pub is_cancelled: bool,

    /// When the sale was cancelled.
    pub cancelled_at: Option<DateTime<Utc>>,

    /// Who cancelled the sale.
    pub cancelled_by: Option<String>,

    /// When the sale was created.
    pub created_at: DateTime<Utc>,
}

impl Sale {
    /// Returns the total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Sale Item
// =============================================================================

/// A line item in a sale.
/// Uses snapshot pattern to freeze product data at time of sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SaleItem {
    pub id: String,
    pub sale_id: String,
    pub product_id: String,
    /// Product name at time of sale (frozen).
    pub name_snapshot: String,
    /// Quantity sold.
    pub quantity: i64,
    /// Unit price in cents at time of sale (frozen, independent of later
    /// price changes).
    pub unit_price_cents: i64,
    /// quantity × unit_price_cents.
    pub subtotal_cents: i64,
}

impl SaleItem {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Returns the subtotal as Money.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents)
    }
}

/// A sale together with its line items, as returned to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleWithItems {
    pub sale: Sale,
    pub items: Vec<SaleItem>,
}

// =============================================================================
// Service Inputs & Outputs
// =============================================================================

/// One requested line in a sale: which product, how many.
///
/// Duplicate product ids in a request are merged by summing quantities
/// before any stock is checked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleLine {
    pub product_id: String,
    pub quantity: i64,
}

/// One line item that failed the stock check.
///
/// `create_sale` reports every shortfall in the request, not just the first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockShortfall {
    pub product_id: String,
    /// Quantity the caller asked for.
    pub requested: i64,
    /// Stock available at the time of the locked read.
    pub available: i64,
}

/// Before/after stock levels from one mutation at the stock choke point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockChange {
    pub old_stock: i64,
    pub new_stock: i64,
}

/// Result of a manual stock adjustment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockAdjustment {
    pub product_id: String,
    pub old_stock: i64,
    pub new_stock: i64,
}

/// Input for creating a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub category: Option<String>,
    pub price_cents: i64,
    /// Genesis stock. Recorded directly on the product without a movement
    /// row; the movement log starts at the first sale or adjustment.
    pub initial_stock: i64,
    /// Explicit business code. When `None` a code is derived from the
    /// category and name.
    pub code: Option<String>,
}

// =============================================================================
// Activity Log
// =============================================================================

/// What kind of operation an activity entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum ActivityAction {
    CreateProduct,
    UpdatePrice,
    Sale,
    CancelSale,
    AdjustStock,
}

/// One row of the per-user audit trail.
///
/// Written in the same transaction as the operation it records, so a
/// rolled-back operation leaves no activity behind.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ActivityEntry {
    pub id: String,
    pub user_id: String,
    pub action: ActivityAction,
    /// Entity kind the entry points at ("sale", "product").
    pub entity_type: String,
    pub entity_id: String,
    /// JSON payload with operation-specific details.
    pub details: Option<String>,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================
