//! # Sale Transaction Service
//!
//! The sale-creation and cancellation engine. Everything a sale touches —
//! stock checks, price snapshots, line items, movement log entries — happens
//! inside one transaction per call.
//!
//! ## create_sale, Step by Step
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  create_sale(actor, lines, payment)                                     │
//! │                                                                         │
//! │  1. Validate & normalize lines (pure; merged, sorted by product id)     │
//! │  2. BEGIN                                                               │
//! │  3. lock_row() per product, ascending id  ← write lock before any read  │
//! │  4. Fetch products; missing id → ProductNotFound                        │
//! │  5. actor.can_sell() per product → Forbidden                            │
//! │  6. Compare quantity vs stock per line, collecting EVERY shortfall      │
//! │     └── any shortfall → InsufficientStock { shortfalls }, ROLLBACK      │
//! │  7. Snapshot prices, compute subtotals, sum the total                   │
//! │  8. INSERT sale + one sale_item per line                                │
//! │  9. ledger::apply_stock_change(−qty) per line  ← stock + salida row     │
//! │  10. INSERT activity row                                                │
//! │  11. COMMIT ── only now is anything observable                          │
//! │                                                                         │
//! │  Every `?` between BEGIN and COMMIT rolls the whole thing back:         │
//! │  no sale without its stock effects, no stock effects without the sale.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cancellation is the exact inverse: restore each line's quantity with an
//! `entrada` movement, flip the one-way cancelled flag, keep the sale and
//! its items as the historical record.

use chrono::Utc;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::error::ServiceResult;
use crate::pool::Database;
use crate::service::ledger;
use caja_core::validation::validate_sale_lines;
use caja_core::{
    ActivityAction, ActivityEntry, Actor, CoreError, Sale, SaleItem, SaleLine, SaleWithItems,
    StockShortfall,
};

/// Service for sale creation and cancellation.
///
/// Holds a [`Database`] clone and opens one transaction per mutating call.
/// Cheap to clone; clones share the pool.
#[derive(Debug, Clone)]
pub struct SaleService {
    db: Database,
}

impl SaleService {
    /// Creates a new SaleService.
    pub fn new(db: Database) -> Self {
        SaleService { db }
    }

    // =========================================================================
    // create_sale
    // =========================================================================

    /// Creates a sale: validates stock, snapshots prices, writes the sale,
    /// its items, the stock decrements, and the `salida` movements — all
    /// atomically.
    ///
    /// ## Arguments
    /// * `actor` - resolved capabilities of the requesting user
    /// * `lines` - requested `{product_id, quantity}` pairs; duplicates merge
    /// * `payment_method` - opaque tag stored on the sale, never inspected
    ///
    /// ## Errors
    /// * `CoreError::Validation` - empty list, non-positive quantity, ...
    ///   (rejected before any lock is taken)
    /// * `CoreError::ProductNotFound` - a line references no product row
    /// * `CoreError::Forbidden` - a product is outside the actor's inventory
    /// * `CoreError::InsufficientStock` - at least one line exceeds stock;
    ///   carries the complete shortfall list
    /// * `DbError::Busy` - write lock unavailable within `busy_timeout`;
    ///   the caller may retry unchanged
    pub async fn create_sale(
        &self,
        actor: &Actor,
        lines: &[SaleLine],
        payment_method: Option<&str>,
    ) -> ServiceResult<SaleWithItems> {
        // Pure validation first; storage is untouched on rejection. The
        // returned lines are merged and sorted by ascending product id,
        // which fixes the lock order below.
        let lines = validate_sale_lines(lines)?;

        let now = Utc::now();
        let products = self.db.products();
        let sales = self.db.sales();

        let mut tx = self.db.pool().begin().await?;

        // Acquire the write lock before reading any stock, product by
        // product in ascending id order.
        for line in &lines {
            if !products.lock_row(&mut *tx, &line.product_id).await? {
                return Err(CoreError::ProductNotFound(line.product_id.clone()).into());
            }
        }

        // All rows exist (the locks proved it); fetch them under the lock.
        let locked = products
            .fetch_many(
                &mut *tx,
                &lines
                    .iter()
                    .map(|l| l.product_id.clone())
                    .collect::<Vec<_>>(),
            )
            .await?;
        debug_assert_eq!(locked.len(), lines.len());

        // Authorization before stock figures leak into error messages.
        for product in &locked {
            if !actor.can_sell(product) {
                return Err(CoreError::forbidden(
                    &actor.user_id,
                    format!("sell product {}", product.id),
                )
                .into());
            }
        }

        // Check every line and report every shortfall, not just the first.
        let mut shortfalls: Vec<StockShortfall> = Vec::new();
        for (line, product) in lines.iter().zip(&locked) {
            if line.quantity > product.stock {
                shortfalls.push(StockShortfall {
                    product_id: product.id.clone(),
                    requested: line.quantity,
                    available: product.stock,
                });
            }
        }
        if !shortfalls.is_empty() {
            return Err(CoreError::InsufficientStock { shortfalls }.into());
        }

        // Snapshot prices and build the lines.
        let sale_id = Uuid::new_v4().to_string();
        let mut items = Vec::with_capacity(lines.len());
        let mut total_cents: i64 = 0;

        for (line, product) in lines.iter().zip(&locked) {
            let subtotal = product.price().multiply_quantity(line.quantity);
            total_cents += subtotal.cents();

            items.push(SaleItem {
                id: Uuid::new_v4().to_string(),
                sale_id: sale_id.clone(),
                product_id: product.id.clone(),
                name_snapshot: product.name.clone(),
                quantity: line.quantity,
                unit_price_cents: product.price_cents,
                subtotal_cents: subtotal.cents(),
            });
        }

        let sale = Sale {
            id: sale_id,
            user_id: actor.user_id.clone(),
            total_cents,
            payment_method: payment_method.map(str::to_string),
            is_cancelled: false,
            cancelled_at: None,
            cancelled_by: None,
            created_at: now,
        };

        sales.insert_sale(&mut *tx, &sale).await?;
        for item in &items {
            sales.insert_item(&mut *tx, item).await?;
        }

        // Decrement stock and log one salida movement per line, through the
        // single choke point.
        let note = format!("Sale #{}", sale.id);
        for item in &items {
            ledger::apply_stock_change(&mut tx, &item.product_id, -item.quantity, &note, now)
                .await?;
        }

        self.db
            .activity()
            .insert(
                &mut *tx,
                &ActivityEntry {
                    id: Uuid::new_v4().to_string(),
                    user_id: actor.user_id.clone(),
                    action: ActivityAction::Sale,
                    entity_type: "sale".to_string(),
                    entity_id: sale.id.clone(),
                    details: Some(
                        json!({
                            "total_cents": total_cents,
                            "lines": items.len(),
                            "payment_method": payment_method,
                        })
                        .to_string(),
                    ),
                    created_at: now,
                },
            )
            .await?;

        tx.commit().await?;

        info!(
            sale_id = %sale.id,
            user_id = %actor.user_id,
            total_cents = total_cents,
            lines = items.len(),
            "Sale created"
        );

        Ok(SaleWithItems { sale, items })
    }

    // =========================================================================
    // cancel_sale
    // =========================================================================

    /// Cancels a sale: restores every line's stock with an `entrada`
    /// movement and flips the one-way cancelled flag, atomically.
    ///
    /// The sale and its items stay untouched as the historical record;
    /// `total_cents` is never recomputed.
    ///
    /// ## Errors
    /// * `CoreError::SaleNotFound` - no such sale
    /// * `CoreError::AlreadyCancelled` - the flag was already set; the
    ///   restore happened exactly once, on the first call
    /// * `CoreError::Forbidden` - the actor may not cancel this sale
    pub async fn cancel_sale(&self, actor: &Actor, sale_id: &str) -> ServiceResult<SaleWithItems> {
        let now = Utc::now();
        let sales = self.db.sales();

        let mut tx = self.db.pool().begin().await?;

        // The guarded flip is the first statement: it acquires the write
        // lock and settles the not-idempotent rule in one step. Of two
        // racing cancellations exactly one sees a row change.
        let flipped = sales
            .mark_cancelled(&mut *tx, sale_id, &actor.user_id, now)
            .await?;

        if !flipped {
            return Err(match sales.fetch(&mut *tx, sale_id).await? {
                None => CoreError::SaleNotFound(sale_id.to_string()).into(),
                Some(_) => CoreError::AlreadyCancelled {
                    sale_id: sale_id.to_string(),
                }
                .into(),
            });
        }

        let sale = sales
            .fetch(&mut *tx, sale_id)
            .await?
            .ok_or_else(|| CoreError::SaleNotFound(sale_id.to_string()))?;

        // Authorization after the flip is fine: an unauthorized caller rolls
        // the flip back with everything else.
        if !actor.can_cancel(&sale) {
            return Err(CoreError::forbidden(
                &actor.user_id,
                format!("cancel sale {sale_id}"),
            )
            .into());
        }

        // Restore stock per line. Items come back in insertion order, which
        // is the ascending-product-id order the creating transaction used,
        // so the lock order matches create_sale's.
        let items = sales.fetch_items(&mut *tx, sale_id).await?;
        let note = format!("Cancellation of sale #{sale_id}");
        for item in &items {
            ledger::apply_stock_change(&mut tx, &item.product_id, item.quantity, &note, now)
                .await?;
        }

        self.db
            .activity()
            .insert(
                &mut *tx,
                &ActivityEntry {
                    id: Uuid::new_v4().to_string(),
                    user_id: actor.user_id.clone(),
                    action: ActivityAction::CancelSale,
                    entity_type: "sale".to_string(),
                    entity_id: sale.id.clone(),
                    details: Some(
                        json!({
                            "total_cents": sale.total_cents,
                            "lines_restored": items.len(),
                        })
                        .to_string(),
                    ),
                    created_at: now,
                },
            )
            .await?;

        tx.commit().await?;

        info!(
            sale_id = %sale.id,
            cancelled_by = %actor.user_id,
            lines_restored = items.len(),
            "Sale cancelled"
        );

        Ok(SaleWithItems { sale, items })
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Gets a sale with its items.
    pub async fn get_sale(&self, sale_id: &str) -> ServiceResult<SaleWithItems> {
        self.db
            .sales()
            .get_with_items(sale_id)
            .await?
            .ok_or_else(|| CoreError::SaleNotFound(sale_id.to_string()).into())
    }

    /// Lists one user's sales, newest first.
    pub async fn list_for_user(&self, user_id: &str, limit: u32) -> ServiceResult<Vec<Sale>> {
        Ok(self.db.sales().list_for_user(user_id, limit).await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;
    use crate::testkit;
    use caja_core::MovementDirection;

    fn line(product_id: &str, quantity: i64) -> SaleLine {
        SaleLine {
            product_id: product_id.to_string(),
            quantity,
        }
    }

    #[tokio::test]
    async fn test_create_sale_decrements_stock_and_logs_movement() {
        let fixture = testkit::seeded_db().await;
        let cola = &fixture.products[0]; // $2.50, stock 10
        let service = fixture.sale_service();

        let result = service
            .create_sale(
                &fixture.employee_actor(),
                &[line(&cola.id, 4)],
                Some("cash"),
            )
            .await
            .unwrap();

        // total = 4 × $2.50 = $10.00
        assert_eq!(result.sale.total_cents, 1000);
        assert_eq!(result.sale.payment_method.as_deref(), Some("cash"));
        assert!(!result.sale.is_cancelled);
        assert_eq!(result.items.len(), 1);
        assert_eq!(result.items[0].quantity, 4);
        assert_eq!(result.items[0].unit_price_cents, 250);
        assert_eq!(result.items[0].subtotal_cents, 1000);
        assert_eq!(result.items[0].name_snapshot, "Cola 355ml");

        let fresh = fixture.db.products().get_by_id(&cola.id).await.unwrap();
        assert_eq!(fresh.unwrap().stock, 6);

        let movements = fixture
            .db
            .movements()
            .list_for_product(&cola.id, 10)
            .await
            .unwrap();
        assert_eq!(movements.len(), 1);
        assert_eq!(movements[0].direction, MovementDirection::Salida);
        assert_eq!(movements[0].quantity, 4);
        assert_eq!(
            movements[0].note.as_deref(),
            Some(format!("Sale #{}", result.sale.id).as_str())
        );
    }

    #[tokio::test]
    async fn test_create_sale_total_matches_item_subtotals() {
        let fixture = testkit::seeded_db().await;
        let cola = &fixture.products[0]; // $2.50, stock 10
        let chips = &fixture.products[1]; // $1.50, stock 5
        let service = fixture.sale_service();

        let result = service
            .create_sale(
                &fixture.admin_actor(),
                &[line(&cola.id, 2), line(&chips.id, 3)],
                None,
            )
            .await
            .unwrap();

        let sum: i64 = result.items.iter().map(|i| i.subtotal_cents).sum();
        assert_eq!(result.sale.total_cents, sum);
        assert_eq!(result.sale.total_cents, 2 * 250 + 3 * 150);
        for item in &result.items {
            assert_eq!(item.subtotal_cents, item.quantity * item.unit_price_cents);
        }
    }

    #[tokio::test]
    async fn test_create_sale_merges_duplicate_lines() {
        let fixture = testkit::seeded_db().await;
        let cola = &fixture.products[0]; // stock 10
        let service = fixture.sale_service();

        let result = service
            .create_sale(
                &fixture.admin_actor(),
                &[line(&cola.id, 2), line(&cola.id, 3)],
                None,
            )
            .await
            .unwrap();

        assert_eq!(result.items.len(), 1);
        assert_eq!(result.items[0].quantity, 5);

        let fresh = fixture.db.products().get_by_id(&cola.id).await.unwrap();
        assert_eq!(fresh.unwrap().stock, 5);
    }

    #[tokio::test]
    async fn test_create_sale_reports_every_shortfall_and_mutates_nothing() {
        let fixture = testkit::seeded_db().await;
        let cola = &fixture.products[0]; // stock 10 — this line would fit
        let chips = &fixture.products[1]; // stock 5
        let agua = &fixture.products[2]; // stock 0
        let service = fixture.sale_service();

        let err = service
            .create_sale(
                &fixture.admin_actor(),
                &[line(&cola.id, 4), line(&chips.id, 9), line(&agua.id, 1)],
                None,
            )
            .await
            .unwrap_err();

        match err {
            ServiceError::Domain(CoreError::InsufficientStock { mut shortfalls }) => {
                shortfalls.sort_by(|a, b| a.product_id.cmp(&b.product_id));
                let mut expected = vec![
                    StockShortfall {
                        product_id: chips.id.clone(),
                        requested: 9,
                        available: 5,
                    },
                    StockShortfall {
                        product_id: agua.id.clone(),
                        requested: 1,
                        available: 0,
                    },
                ];
                expected.sort_by(|a, b| a.product_id.cmp(&b.product_id));
                assert_eq!(shortfalls, expected);
            }
            other => panic!("unexpected error: {other:?}"),
        }

        // Nothing moved: not even the line that had enough stock.
        for product in &fixture.products {
            let fresh = fixture.db.products().get_by_id(&product.id).await.unwrap();
            assert_eq!(fresh.unwrap().stock, product.stock);
            assert_eq!(
                fixture
                    .db
                    .movements()
                    .count_for_product(&product.id)
                    .await
                    .unwrap(),
                0
            );
        }
        assert!(fixture
            .db
            .sales()
            .list_recent(10)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_activity_rows_commit_with_their_operation() {
        let fixture = testkit::seeded_db().await;
        let cola = &fixture.products[0]; // stock 10
        let service = fixture.sale_service();
        let admin = fixture.admin_actor();

        let sale = service
            .create_sale(&admin, &[line(&cola.id, 2)], None)
            .await
            .unwrap();

        let entries = fixture
            .db
            .activity()
            .list_recent(&admin.user_id, 10)
            .await
            .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, ActivityAction::Sale);
        assert_eq!(entries[0].entity_type, "sale");
        assert_eq!(entries[0].entity_id, sale.sale.id);

        // A rolled-back sale leaves no activity row behind either.
        service
            .create_sale(&admin, &[line(&cola.id, 999)], None)
            .await
            .unwrap_err();
        let entries = fixture
            .db
            .activity()
            .list_recent(&admin.user_id, 10)
            .await
            .unwrap();
        assert_eq!(entries.len(), 1);

        // Cancellation appends its own row, newest first.
        service.cancel_sale(&admin, &sale.sale.id).await.unwrap();
        let entries = fixture
            .db
            .activity()
            .list_recent(&admin.user_id, 10)
            .await
            .unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].action, ActivityAction::CancelSale);
    }

    #[tokio::test]
    async fn test_create_sale_rejects_empty_and_bad_input_before_storage() {
        let fixture = testkit::seeded_db().await;
        let service = fixture.sale_service();
        let actor = fixture.admin_actor();

        let err = service.create_sale(&actor, &[], None).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Domain(CoreError::Validation(_))
        ));

        let err = service
            .create_sale(&actor, &[line(&fixture.products[0].id, 0)], None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Domain(CoreError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_create_sale_unknown_product_is_not_found() {
        let fixture = testkit::seeded_db().await;

        let err = fixture
            .sale_service()
            .create_sale(&fixture.admin_actor(), &[line("no-such-id", 1)], None)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ServiceError::Domain(CoreError::ProductNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_create_sale_foreign_inventory_is_forbidden() {
        let fixture = testkit::seeded_db().await;
        let cola = &fixture.products[0]; // owned by admin, not outsider

        let err = fixture
            .sale_service()
            .create_sale(&fixture.outsider_actor(), &[line(&cola.id, 1)], None)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ServiceError::Domain(CoreError::Forbidden { .. })
        ));

        let fresh = fixture.db.products().get_by_id(&cola.id).await.unwrap();
        assert_eq!(fresh.unwrap().stock, 10);
    }

    #[tokio::test]
    async fn test_cancel_restores_stock_exactly_and_nets_to_zero() {
        let fixture = testkit::seeded_db().await;
        let cola = &fixture.products[0]; // stock 10
        let chips = &fixture.products[1]; // stock 5
        let service = fixture.sale_service();
        let employee = fixture.employee_actor();

        let sale = service
            .create_sale(&employee, &[line(&cola.id, 4), line(&chips.id, 2)], None)
            .await
            .unwrap();

        let cancelled = service.cancel_sale(&employee, &sale.sale.id).await.unwrap();

        assert!(cancelled.sale.is_cancelled);
        assert!(cancelled.sale.cancelled_at.is_some());
        assert_eq!(cancelled.sale.cancelled_by.as_deref(), Some(employee.user_id.as_str()));
        // Historical record untouched.
        assert_eq!(cancelled.sale.total_cents, sale.sale.total_cents);
        assert_eq!(cancelled.items.len(), 2);

        // Stock back to pre-sale values, movement log nets to zero.
        for product in [cola, chips] {
            let fresh = fixture.db.products().get_by_id(&product.id).await.unwrap();
            assert_eq!(fresh.unwrap().stock, product.stock);
            assert_eq!(
                fixture.db.movements().net_change(&product.id).await.unwrap(),
                0
            );
            assert_eq!(
                fixture
                    .db
                    .movements()
                    .count_for_product(&product.id)
                    .await
                    .unwrap(),
                2 // one salida + one entrada
            );
        }

        let entrada_note = format!("Cancellation of sale #{}", sale.sale.id);
        let movements = fixture
            .db
            .movements()
            .list_for_product(&cola.id, 10)
            .await
            .unwrap();
        assert!(movements
            .iter()
            .any(|m| m.direction == MovementDirection::Entrada
                && m.note.as_deref() == Some(entrada_note.as_str())));
    }

    #[tokio::test]
    async fn test_cancel_twice_fails_and_restores_once() {
        let fixture = testkit::seeded_db().await;
        let cola = &fixture.products[0]; // stock 10
        let service = fixture.sale_service();
        let admin = fixture.admin_actor();

        let sale = service
            .create_sale(&admin, &[line(&cola.id, 3)], None)
            .await
            .unwrap();

        service.cancel_sale(&admin, &sale.sale.id).await.unwrap();

        let err = service
            .cancel_sale(&admin, &sale.sale.id)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Domain(CoreError::AlreadyCancelled { .. })
        ));

        // Restored exactly once.
        let fresh = fixture.db.products().get_by_id(&cola.id).await.unwrap();
        assert_eq!(fresh.unwrap().stock, 10);
    }

    #[tokio::test]
    async fn test_cancel_unknown_sale_is_not_found() {
        let fixture = testkit::seeded_db().await;

        let err = fixture
            .sale_service()
            .cancel_sale(&fixture.admin_actor(), "no-such-sale")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ServiceError::Domain(CoreError::SaleNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_employee_cannot_cancel_someone_elses_sale() {
        let fixture = testkit::seeded_db().await;
        let cola = &fixture.products[0]; // stock 10
        let service = fixture.sale_service();

        let sale = service
            .create_sale(&fixture.admin_actor(), &[line(&cola.id, 3)], None)
            .await
            .unwrap();

        let err = service
            .cancel_sale(&fixture.employee_actor(), &sale.sale.id)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Domain(CoreError::Forbidden { .. })
        ));

        // The guarded flip rolled back with everything else.
        let fresh = service.get_sale(&sale.sale.id).await.unwrap();
        assert!(!fresh.sale.is_cancelled);
        let stock = fixture.db.products().get_by_id(&cola.id).await.unwrap();
        assert_eq!(stock.unwrap().stock, 7);

        // The admin can still cancel it afterwards.
        service
            .cancel_sale(&fixture.admin_actor(), &sale.sale.id)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_concurrent_sales_on_same_product_serialize() {
        // Two sales of 3 against stock 5: exactly one wins, final stock 2.
        let fixture = testkit::seeded_file_db().await;
        let chips = &fixture.products[1]; // stock 5
        let service = fixture.sale_service();
        let admin = fixture.admin_actor();

        let first = [line(&chips.id, 3)];
        let second = [line(&chips.id, 3)];
        let (a, b) = tokio::join!(
            service.create_sale(&admin, &first, None),
            service.create_sale(&admin, &second, None),
        );

        let successes = [&a, &b].iter().filter(|r| r.is_ok()).count();
        assert_eq!(successes, 1, "exactly one sale must win: {a:?} / {b:?}");

        let loser = if a.is_err() { a } else { b };
        match loser.unwrap_err() {
            ServiceError::Domain(CoreError::InsufficientStock { shortfalls }) => {
                assert_eq!(shortfalls.len(), 1);
                assert_eq!(shortfalls[0].requested, 3);
                assert_eq!(shortfalls[0].available, 2);
            }
            other => panic!("unexpected loser error: {other:?}"),
        }

        let fresh = fixture.db.products().get_by_id(&chips.id).await.unwrap();
        assert_eq!(fresh.unwrap().stock, 2);
    }

    #[tokio::test]
    async fn test_price_snapshot_survives_later_price_change() {
        let fixture = testkit::seeded_db().await;
        let cola = &fixture.products[0]; // $2.50
        let service = fixture.sale_service();
        let admin = fixture.admin_actor();

        let sale = service
            .create_sale(&admin, &[line(&cola.id, 1)], None)
            .await
            .unwrap();

        fixture
            .db
            .products()
            .update_price(fixture.db.pool(), &cola.id, 999, Utc::now())
            .await
            .unwrap();

        let reread = service.get_sale(&sale.sale.id).await.unwrap();
        assert_eq!(reread.items[0].unit_price_cents, 250);
        assert_eq!(reread.sale.total_cents, 250);
    }
}
