//! # Inventory Movement Repository
//!
//! Read access to the append-only movement log. Every committed stock
//! change has exactly one row here. The rows themselves are written by
//! [`crate::service::ledger`] inside the same transaction as the stock
//! mutation they describe; this repository deliberately exposes no insert,
//! update, or delete.

use sqlx::SqlitePool;

use crate::error::DbResult;
use caja_core::InventoryMovement;

/// Repository for the inventory movement log.
#[derive(Debug, Clone)]
pub struct MovementRepository {
    pool: SqlitePool,
}

impl MovementRepository {
    /// Creates a new MovementRepository.
    pub fn new(pool: SqlitePool) -> Self {
        MovementRepository { pool }
    }

    /// Lists a product's movements, newest first.
    pub async fn list_for_product(
        &self,
        product_id: &str,
        limit: u32,
    ) -> DbResult<Vec<InventoryMovement>> {
        let movements = sqlx::query_as::<_, InventoryMovement>(
            r#"
            SELECT id, product_id, direction, quantity, note, created_at
            FROM inventory_movements
            WHERE product_id = ?1
            ORDER BY created_at DESC, rowid DESC
            LIMIT ?2
            "#,
        )
        .bind(product_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(movements)
    }

    /// Net stock change for a product: Σ entrada − Σ salida.
    ///
    /// The audit reconciliation figure. For a product whose initial stock
    /// was S, current stock must equal S + net_change.
    pub async fn net_change(&self, product_id: &str) -> DbResult<i64> {
        let net: i64 = sqlx::query_scalar(
            r#"
            SELECT COALESCE(
                SUM(CASE direction WHEN 'entrada' THEN quantity ELSE -quantity END),
                0
            )
            FROM inventory_movements
            WHERE product_id = ?1
            "#,
        )
        .bind(product_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(net)
    }

    /// Counts a product's movements (for diagnostics).
    pub async fn count_for_product(&self, product_id: &str) -> DbResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM inventory_movements WHERE product_id = ?1")
                .bind(product_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }
}
