//! # Product Repository
//!
//! Database operations for products: catalog reads, row locking for the
//! transaction services, inserts, price updates, and product-code lookups.
//!
//! ## What Is NOT Here
//! Stock mutation. The `stock` column is written in exactly one place,
//! [`crate::service::ledger`], so the movement log can never drift from the
//! stock it describes.
//!
//! ## Row Locking on SQLite
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │             Why lock_row() runs BEFORE any stock read                   │
//! │                                                                         │
//! │  SQLite has one write lock for the whole database. A transaction that   │
//! │  reads first and writes later can find the world changed in between     │
//! │  (or fail upgrading its snapshot under WAL).                            │
//! │                                                                         │
//! │  Tx A (sale of 3)              Tx B (sale of 3, same product, stock 5) │
//! │  ──────────────────            ─────────────────────────────────────── │
//! │  lock_row(p)  ← write lock                                              │
//! │  read stock → 5                lock_row(p)  ← waits (busy_timeout)      │
//! │  decrement to 2, commit        ...                                      │
//! │                                lock acquired                            │
//! │                                read stock → 2 (committed value!)        │
//! │                                2 < 3 → InsufficientStock                │
//! │                                                                         │
//! │  The loser sees the truth instead of a stale snapshot. Multi-product    │
//! │  operations call lock_row in ascending product-id order.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::{Executor, Sqlite, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use caja_core::Product;

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.products();
///
/// // Plain read
/// let product = repo.get_by_id("uuid-here").await?;
///
/// // Inside a service transaction
/// let mut tx = db.pool().begin().await?;
/// repo.lock_row(&mut *tx, "uuid-here").await?;
/// let product = repo.fetch(&mut *tx, "uuid-here").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    // =========================================================================
    // Pool-bound reads
    // =========================================================================

    /// Gets a product by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        self.fetch(&self.pool, id).await
    }

    /// Gets a product by its business code (e.g. "ELEC-LAPT-001").
    pub async fn get_by_code(&self, code: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, owner_id, name, category, price_cents, stock, code,
                   created_at, updated_at
            FROM products
            WHERE code = ?1
            "#,
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Lists the products of one inventory owner, sorted by name.
    pub async fn list_by_owner(&self, owner_id: &str, limit: u32) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, owner_id, name, category, price_cents, stock, code,
                   created_at, updated_at
            FROM products
            WHERE owner_id = ?1
            ORDER BY name
            LIMIT ?2
            "#,
        )
        .bind(owner_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Counts total products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    // =========================================================================
    // Transaction-composable operations
    // =========================================================================

    /// Acquires the write lock via a no-op touch UPDATE on one product row.
    ///
    /// Must be the first statement a mutating transaction runs, before any
    /// stock read. Multi-product callers invoke this per product in
    /// ascending product-id order.
    ///
    /// ## Returns
    /// * `Ok(true)` - row exists and is now covered by the write lock
    /// * `Ok(false)` - no such product
    pub async fn lock_row<'e, E>(&self, executor: E, id: &str) -> DbResult<bool>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("UPDATE products SET updated_at = updated_at WHERE id = ?1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Gets a product by ID on the given executor.
    pub async fn fetch<'e, E>(&self, executor: E, id: &str) -> DbResult<Option<Product>>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, owner_id, name, category, price_cents, stock, code,
                   created_at, updated_at
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(product)
    }

    /// Gets several products by ID in ascending-id order.
    ///
    /// Returns only the rows that exist; the caller compares lengths to
    /// detect missing ids.
    pub async fn fetch_many<'e, E>(&self, executor: E, ids: &[String]) -> DbResult<Vec<Product>>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder = sqlx::QueryBuilder::<Sqlite>::new(
            "SELECT id, owner_id, name, category, price_cents, stock, code, \
             created_at, updated_at FROM products WHERE id IN (",
        );
        {
            let mut separated = builder.separated(", ");
            for id in ids {
                separated.push_bind(id.as_str());
            }
        }
        builder.push(") ORDER BY id");

        let products = builder
            .build_query_as::<Product>()
            .fetch_all(executor)
            .await?;

        Ok(products)
    }

    /// Inserts a new product.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - code already exists
    pub async fn insert<'e, E>(&self, executor: E, product: &Product) -> DbResult<()>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        debug!(id = %product.id, code = %product.code, "Inserting product");

        let result = sqlx::query(
            r#"
            INSERT INTO products (
                id, owner_id, name, category, price_cents, stock, code,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&product.id)
        .bind(&product.owner_id)
        .bind(&product.name)
        .bind(&product.category)
        .bind(product.price_cents)
        .bind(product.stock)
        .bind(&product.code)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(executor)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) => {
                let db_err: DbError = e.into();
                if let DbError::UniqueViolation { field, .. } = &db_err {
                    if field.contains("code") {
                        return Err(DbError::duplicate("code", &product.code));
                    }
                }
                Err(db_err)
            }
        }
    }

    /// Updates a product's unit price. Existing sale items keep their
    /// snapshots; only future sales see the new price.
    pub async fn update_price<'e, E>(
        &self,
        executor: E,
        id: &str,
        price_cents: i64,
        now: DateTime<Utc>,
    ) -> DbResult<()>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        debug!(id = %id, price_cents = price_cents, "Updating product price");

        let result = sqlx::query(
            r#"
            UPDATE products SET price_cents = ?2, updated_at = ?3
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(price_cents)
        .bind(now)
        .execute(executor)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    // =========================================================================
    // Code derivation support
    // =========================================================================

    /// Returns the most recently inserted code starting with `prefix`.
    ///
    /// Prefix matching (not `prefix-%`): "ELEC-LAPT" also sees
    /// "ELEC-LAPTOP-003", matching how codes were sequenced historically.
    /// Prefixes contain only A-Z and '-', so no LIKE escaping is needed.
    pub async fn last_code_with_prefix<'e, E>(
        &self,
        executor: E,
        prefix: &str,
    ) -> DbResult<Option<String>>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let pattern = format!("{prefix}%");

        let code: Option<String> = sqlx::query_scalar(
            r#"
            SELECT code FROM products
            WHERE code LIKE ?1
            ORDER BY rowid DESC
            LIMIT 1
            "#,
        )
        .bind(pattern)
        .fetch_optional(executor)
        .await?;

        Ok(code)
    }

    /// True when a product with this exact code exists.
    pub async fn code_exists<'e, E>(&self, executor: E, code: &str) -> DbResult<bool>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM products WHERE code = ?1)")
                .bind(code)
                .fetch_one(executor)
                .await?;

        Ok(exists)
    }
}
