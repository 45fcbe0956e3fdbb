//! # Stock Ledger (the single choke point)
//!
//! Every stock mutation in the workspace funnels through
//! [`apply_stock_change`]. Nothing else writes `products.stock` or
//! `inventory_movements`.
//!
//! ## The Guarded Update
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  UPDATE products                                                         │
//! │  SET stock = stock + :delta, updated_at = :now                           │
//! │  WHERE id = :id AND stock + :delta >= 0                                  │
//! │  RETURNING stock                                                         │
//! │                                                                         │
//! │  One statement decides everything:                                       │
//! │   row returned   → mutation applied, new stock in hand                   │
//! │   no row         → either the product is gone or the delta would go      │
//! │                    negative; a follow-up read tells which                │
//! │                                                                         │
//! │  The check and the write cannot be separated by another writer, and     │
//! │  the movement row is appended on the same connection inside the same    │
//! │  transaction: no movement without mutation, no mutation without         │
//! │  movement.                                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Callers must already hold the transaction's write lock (see
//! `ProductRepository::lock_row`); the guard here is the last line of
//! defense, not the locking strategy.

use chrono::{DateTime, Utc};
use sqlx::SqliteConnection;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::ServiceResult;
use caja_core::error::ValidationError;
use caja_core::{CoreError, InventoryMovement, MovementDirection, StockChange};

/// Applies a stock delta to one product and appends the matching movement
/// row, atomically with respect to the caller's transaction.
///
/// ## Arguments
/// * `conn` - connection of an open transaction (`&mut *tx`)
/// * `delta` - signed change; positive restocks, negative consumes
/// * `note` - movement annotation (e.g. `Sale #<id>`)
///
/// ## Errors
/// * `CoreError::ProductNotFound` - no such product row
/// * `CoreError::NegativeStock` - delta would drive stock below zero;
///   carries the current stock and the rejected delta
pub(crate) async fn apply_stock_change(
    conn: &mut SqliteConnection,
    product_id: &str,
    delta: i64,
    note: &str,
    now: DateTime<Utc>,
) -> ServiceResult<StockChange> {
    let direction = MovementDirection::from_delta(delta).ok_or(ValidationError::MustBeNonZero {
        field: "delta".to_string(),
    })?;

    let new_stock: Option<i64> = sqlx::query_scalar(
        r#"
        UPDATE products
        SET stock = stock + ?2, updated_at = ?3
        WHERE id = ?1 AND stock + ?2 >= 0
        RETURNING stock
        "#,
    )
    .bind(product_id)
    .bind(delta)
    .bind(now)
    .fetch_optional(&mut *conn)
    .await?;

    let Some(new_stock) = new_stock else {
        // Guard refused. Re-read to tell a vanished product from a
        // negative-stock rejection.
        let current: Option<i64> = sqlx::query_scalar("SELECT stock FROM products WHERE id = ?1")
            .bind(product_id)
            .fetch_optional(&mut *conn)
            .await?;

        return Err(match current {
            None => CoreError::ProductNotFound(product_id.to_string()).into(),
            Some(current_stock) => {
                warn!(
                    product_id = %product_id,
                    current_stock = current_stock,
                    delta = delta,
                    "Stock ledger refused change: would go negative"
                );
                CoreError::NegativeStock {
                    product_id: product_id.to_string(),
                    current_stock,
                    delta,
                }
                .into()
            }
        });
    };

    let movement = InventoryMovement {
        id: Uuid::new_v4().to_string(),
        product_id: product_id.to_string(),
        direction,
        quantity: delta.abs(),
        note: Some(note.to_string()),
        created_at: now,
    };

    sqlx::query(
        r#"
        INSERT INTO inventory_movements (
            id, product_id, direction, quantity, note, created_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
    )
    .bind(&movement.id)
    .bind(&movement.product_id)
    .bind(movement.direction)
    .bind(movement.quantity)
    .bind(&movement.note)
    .bind(movement.created_at)
    .execute(&mut *conn)
    .await?;

    let change = StockChange {
        old_stock: new_stock - delta,
        new_stock,
    };

    debug!(
        product_id = %product_id,
        delta = delta,
        old_stock = change.old_stock,
        new_stock = change.new_stock,
        "Stock ledger applied change"
    );

    Ok(change)
}

// =============================================================================
// Unit Tests
// =============================================================================
