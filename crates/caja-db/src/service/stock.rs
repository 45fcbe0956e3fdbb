//! # Stock Adjustment Service
//!
//! Manual, non-sale stock corrections: damaged goods, recounts after an
//! audit, found inventory. Same choke point, same movement log, same
//! transaction discipline as sales — there is no second code path around
//! the `stock >= 0` invariant.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  adjust_stock(actor, product_id, delta, reason)                         │
//! │                                                                         │
//! │  1. Validate (delta ≠ 0, reason non-blank)  ← pure, storage untouched   │
//! │  2. BEGIN, lock_row()  ← write lock before the read                     │
//! │  3. Fetch product; actor.can_adjust() → Forbidden                       │
//! │  4. ledger::apply_stock_change(delta)                                   │
//! │     ├── delta > 0 → entrada movement                                    │
//! │     ├── delta < 0 → salida movement                                     │
//! │     └── would go negative → NegativeStockError, ROLLBACK                │
//! │  5. Activity row, COMMIT                                                │
//! │                                                                         │
//! │  Movement note: "Manual adjustment: <reason>"                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::error::ServiceResult;
use crate::pool::Database;
use crate::service::ledger;
use caja_core::validation::validate_adjustment;
use caja_core::{
    ActivityAction, ActivityEntry, Actor, CoreError, InventoryMovement, StockAdjustment,
};

/// Service for manual stock adjustments and movement-log reads.
#[derive(Debug, Clone)]
pub struct StockService {
    db: Database,
}

impl StockService {
    /// Creates a new StockService.
    pub fn new(db: Database) -> Self {
        StockService { db }
    }

    /// Adjusts a product's stock by a signed delta and logs the movement.
    ///
    /// ## Arguments
    /// * `delta` - signed change; positive restocks, negative removes
    /// * `reason` - mandatory free text, recorded in the movement note
    ///
    /// ## Errors
    /// * `CoreError::Validation` - zero delta or blank reason
    /// * `CoreError::ProductNotFound` - no such product
    /// * `CoreError::Forbidden` - actor is not the owning admin
    /// * `CoreError::NegativeStock` - the delta would drive stock below
    ///   zero; nothing is written
    pub async fn adjust_stock(
        &self,
        actor: &Actor,
        product_id: &str,
        delta: i64,
        reason: &str,
    ) -> ServiceResult<StockAdjustment> {
        validate_adjustment(delta, reason)?;
        let reason = reason.trim();

        let now = Utc::now();
        let products = self.db.products();

        let mut tx = self.db.pool().begin().await?;

        if !products.lock_row(&mut *tx, product_id).await? {
            return Err(CoreError::ProductNotFound(product_id.to_string()).into());
        }

        let product = products
            .fetch(&mut *tx, product_id)
            .await?
            .ok_or_else(|| CoreError::ProductNotFound(product_id.to_string()))?;

        if !actor.can_adjust(&product) {
            return Err(CoreError::forbidden(
                &actor.user_id,
                format!("adjust stock of product {product_id}"),
            )
            .into());
        }

        let note = format!("Manual adjustment: {reason}");
        let change = ledger::apply_stock_change(&mut tx, product_id, delta, &note, now).await?;

        self.db
            .activity()
            .insert(
                &mut *tx,
                &ActivityEntry {
                    id: Uuid::new_v4().to_string(),
                    user_id: actor.user_id.clone(),
                    action: ActivityAction::AdjustStock,
                    entity_type: "product".to_string(),
                    entity_id: product_id.to_string(),
                    details: Some(
                        json!({
                            "delta": delta,
                            "old_stock": change.old_stock,
                            "new_stock": change.new_stock,
                            "reason": reason,
                        })
                        .to_string(),
                    ),
                    created_at: now,
                },
            )
            .await?;

        tx.commit().await?;

        info!(
            product_id = %product_id,
            delta = delta,
            old_stock = change.old_stock,
            new_stock = change.new_stock,
            "Stock adjusted"
        );

        Ok(StockAdjustment {
            product_id: product_id.to_string(),
            old_stock: change.old_stock,
            new_stock: change.new_stock,
        })
    }

    /// Lists a product's movement history, newest first.
    pub async fn movement_history(
        &self,
        product_id: &str,
        limit: u32,
    ) -> ServiceResult<Vec<InventoryMovement>> {
        Ok(self.db.movements().list_for_product(product_id, limit).await?)
    }

    /// Net logged change for a product: Σ entrada − Σ salida.
    pub async fn net_change(&self, product_id: &str) -> ServiceResult<i64> {
        Ok(self.db.movements().net_change(product_id).await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
