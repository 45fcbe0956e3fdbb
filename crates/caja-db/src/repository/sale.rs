//! # Sale Repository
//!
//! Database operations for sales and sale items.
//!
//! ## Sale Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Sale Lifecycle                                     │
//! │                                                                         │
//! │  1. CREATE (one transaction, SaleService)                               │
//! │     └── insert_sale() + insert_item() per line + stock decrements       │
//! │         All present after commit or none at all.                        │
//! │                                                                         │
//! │  2. (OPTIONAL) CANCEL — the only later mutation                          │
//! │     └── mark_cancelled() → one-way flag flip, guarded:                  │
//! │         UPDATE ... WHERE id = ? AND is_cancelled = 0                    │
//! │         Zero rows = already cancelled or no such sale; the service      │
//! │         reads the row afterwards to tell those apart.                   │
//! │                                                                         │
//! │  There is no edit, no delete. total_cents and the items are the         │
//! │  permanent historical record; cancellation compensates stock but        │
//! │  leaves both untouched.                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::{Executor, Sqlite, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use caja_core::{Sale, SaleItem, SaleWithItems};

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    // =========================================================================
    // Pool-bound reads
    // =========================================================================

    /// Gets a sale by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Sale>> {
        self.fetch(&self.pool, id).await
    }

    /// Gets all items for a sale, in the order the lines were written.
    pub async fn get_items(&self, sale_id: &str) -> DbResult<Vec<SaleItem>> {
        self.fetch_items(&self.pool, sale_id).await
    }

    /// Gets a sale together with its items.
    pub async fn get_with_items(&self, sale_id: &str) -> DbResult<Option<SaleWithItems>> {
        let Some(sale) = self.get_by_id(sale_id).await? else {
            return Ok(None);
        };
        let items = self.get_items(sale_id).await?;

        Ok(Some(SaleWithItems { sale, items }))
    }

    /// Lists the most recent sales, newest first.
    pub async fn list_recent(&self, limit: u32) -> DbResult<Vec<Sale>> {
        let sales = sqlx::query_as::<_, Sale>(
            r#"
            SELECT id, user_id, total_cents, payment_method,
                   is_cancelled, cancelled_at, cancelled_by, created_at
            FROM sales
            ORDER BY created_at DESC
            LIMIT ?1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }

    /// Lists one user's sales, newest first.
    pub async fn list_for_user(&self, user_id: &str, limit: u32) -> DbResult<Vec<Sale>> {
        let sales = sqlx::query_as::<_, Sale>(
            r#"
            SELECT id, user_id, total_cents, payment_method,
                   is_cancelled, cancelled_at, cancelled_by, created_at
            FROM sales
            WHERE user_id = ?1
            ORDER BY created_at DESC
            LIMIT ?2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }

    // =========================================================================
    // Transaction-composable operations
    // =========================================================================

    /// Gets a sale by ID on the given executor.
    pub async fn fetch<'e, E>(&self, executor: E, id: &str) -> DbResult<Option<Sale>>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let sale = sqlx::query_as::<_, Sale>(
            r#"
            SELECT id, user_id, total_cents, payment_method,
                   is_cancelled, cancelled_at, cancelled_by, created_at
            FROM sales
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(sale)
    }

    /// Gets a sale's items on the given executor.
    ///
    /// ## Ordering
    /// `rowid` = insertion order = the ascending-product-id order the
    /// creating transaction used.
    pub async fn fetch_items<'e, E>(&self, executor: E, sale_id: &str) -> DbResult<Vec<SaleItem>>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let items = sqlx::query_as::<_, SaleItem>(
            r#"
            SELECT id, sale_id, product_id, name_snapshot,
                   quantity, unit_price_cents, subtotal_cents
            FROM sale_items
            WHERE sale_id = ?1
            ORDER BY rowid
            "#,
        )
        .bind(sale_id)
        .fetch_all(executor)
        .await?;

        Ok(items)
    }

    /// Inserts a sale row.
    pub async fn insert_sale<'e, E>(&self, executor: E, sale: &Sale) -> DbResult<()>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        debug!(id = %sale.id, total_cents = sale.total_cents, "Inserting sale");

        sqlx::query(
            r#"
            INSERT INTO sales (
                id, user_id, total_cents, payment_method,
                is_cancelled, cancelled_at, cancelled_by, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&sale.id)
        .bind(&sale.user_id)
        .bind(sale.total_cents)
        .bind(&sale.payment_method)
        .bind(sale.is_cancelled)
        .bind(sale.cancelled_at)
        .bind(&sale.cancelled_by)
        .bind(sale.created_at)
        .execute(executor)
        .await?;

        Ok(())
    }

    /// Inserts a sale item.
    ///
    /// ## Snapshot Pattern
    /// Product name and unit price are copied onto the item at sale time.
    /// Later product edits never reach back into recorded sales.
    pub async fn insert_item<'e, E>(&self, executor: E, item: &SaleItem) -> DbResult<()>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        debug!(sale_id = %item.sale_id, product_id = %item.product_id, "Inserting sale item");

        sqlx::query(
            r#"
            INSERT INTO sale_items (
                id, sale_id, product_id, name_snapshot,
                quantity, unit_price_cents, subtotal_cents
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&item.id)
        .bind(&item.sale_id)
        .bind(&item.product_id)
        .bind(&item.name_snapshot)
        .bind(item.quantity)
        .bind(item.unit_price_cents)
        .bind(item.subtotal_cents)
        .execute(executor)
        .await?;

        Ok(())
    }

    /// Flips a sale to cancelled, exactly once.
    ///
    /// Guarded by `AND is_cancelled = 0`: of two racing cancellations only
    /// one affects a row. Also the first statement of the cancellation
    /// transaction, so it doubles as the write-lock acquisition.
    ///
    /// ## Returns
    /// * `Ok(true)` - this call performed the flip
    /// * `Ok(false)` - no live sale with this id (absent or already cancelled)
    pub async fn mark_cancelled<'e, E>(
        &self,
        executor: E,
        sale_id: &str,
        cancelled_by: &str,
        at: DateTime<Utc>,
    ) -> DbResult<bool>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query(
            r#"
            UPDATE sales
            SET is_cancelled = 1, cancelled_at = ?2, cancelled_by = ?3
            WHERE id = ?1 AND is_cancelled = 0
            "#,
        )
        .bind(sale_id)
        .bind(at)
        .bind(cancelled_by)
        .execute(executor)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
