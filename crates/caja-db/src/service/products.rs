//! # Product Catalog Service
//!
//! Product creation and price edits. Genesis stock is written directly on
//! the product row with no movement (the movement log starts at the first
//! sale or adjustment), and the business code is derived here when the
//! caller does not supply one.
//!
//! After a product commits, a [`ProductCodeAssigned`](crate::events::EngineEvent)
//! event is emitted so the external QR/barcode generator can pick it up —
//! outside the transaction, never blocking it.
//!
//! [`ProductCodeAssigned`]: crate::events::EngineEvent::ProductCodeAssigned

use chrono::Utc;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::error::ServiceResult;
use crate::events::{EngineEvent, EventBus};
use crate::pool::Database;
use caja_core::code::{code_prefix, format_code, next_sequence};
use caja_core::validation::{validate_new_product, validate_price_cents};
use caja_core::{ActivityAction, ActivityEntry, Actor, CoreError, NewProduct, Product};

/// How many sequence bumps we try when a derived code collides with a row
/// inserted after the prefix lookup.
const MAX_CODE_ATTEMPTS: u32 = 50;

/// Service for product catalog operations.
#[derive(Debug, Clone)]
pub struct ProductService {
    db: Database,
    events: EventBus,
}

impl ProductService {
    /// Creates a new ProductService.
    pub fn new(db: Database, events: EventBus) -> Self {
        ProductService { db, events }
    }

    /// Creates a product in the actor's inventory.
    ///
    /// When `input.code` is `None` a code is derived from the category and
    /// name (`BEBI-COLA-002` style), sequenced after the latest existing
    /// code under the same prefix.
    ///
    /// ## Errors
    /// * `CoreError::Validation` - bad name, negative price/stock, bad code
    /// * `CoreError::Forbidden` - actor is not an admin
    /// * `DbError::UniqueViolation` - explicit code already taken
    pub async fn create_product(&self, actor: &Actor, input: NewProduct) -> ServiceResult<Product> {
        if !actor.can_manage_products() {
            return Err(CoreError::forbidden(&actor.user_id, "create products").into());
        }
        validate_new_product(&input)?;

        let now = Utc::now();
        let products = self.db.products();

        let mut tx = self.db.pool().begin().await?;

        let code = match &input.code {
            Some(code) => code.trim().to_string(),
            None => {
                let prefix = code_prefix(input.category.as_deref(), &input.name);
                let last = products.last_code_with_prefix(&mut *tx, &prefix).await?;
                let mut sequence = next_sequence(last.as_deref());

                // The prefix lookup sequences after the latest code, but a
                // hand-edited tail can leave earlier numbers occupied; probe
                // forward until a free one.
                let mut attempts = 0;
                loop {
                    let candidate = format_code(&prefix, sequence);
                    if !products.code_exists(&mut *tx, &candidate).await? {
                        break candidate;
                    }
                    sequence += 1;
                    attempts += 1;
                    if attempts >= MAX_CODE_ATTEMPTS {
                        return Err(crate::error::DbError::duplicate("code", candidate).into());
                    }
                }
            }
        };

        let product = Product {
            id: Uuid::new_v4().to_string(),
            owner_id: actor.inventory_owner_id.clone(),
            name: input.name.trim().to_string(),
            category: input.category.clone(),
            price_cents: input.price_cents,
            stock: input.initial_stock,
            code,
            created_at: now,
            updated_at: now,
        };

        products.insert(&mut *tx, &product).await?;

        self.db
            .activity()
            .insert(
                &mut *tx,
                &ActivityEntry {
                    id: Uuid::new_v4().to_string(),
                    user_id: actor.user_id.clone(),
                    action: ActivityAction::CreateProduct,
                    entity_type: "product".to_string(),
                    entity_id: product.id.clone(),
                    details: Some(
                        json!({
                            "code": product.code,
                            "price_cents": product.price_cents,
                            "initial_stock": product.stock,
                        })
                        .to_string(),
                    ),
                    created_at: now,
                },
            )
            .await?;

        tx.commit().await?;

        // Post-commit only: a subscriber that reacts can always read the row.
        self.events.emit(EngineEvent::ProductCodeAssigned {
            product_id: product.id.clone(),
            code: product.code.clone(),
        });

        info!(
            product_id = %product.id,
            code = %product.code,
            owner_id = %product.owner_id,
            "Product created"
        );

        Ok(product)
    }

    /// Updates a product's unit price.
    ///
    /// Recorded sales keep their price snapshots; only future sales see the
    /// new price.
    pub async fn update_price(
        &self,
        actor: &Actor,
        product_id: &str,
        price_cents: i64,
    ) -> ServiceResult<Product> {
        validate_price_cents(price_cents)?;

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

        if !actor.can_manage_products() || product.owner_id != actor.inventory_owner_id {
            return Err(CoreError::forbidden(
                &actor.user_id,
                format!("edit product {product_id}"),
            )
            .into());
        }

        products
            .update_price(&mut *tx, product_id, price_cents, now)
            .await?;

        self.db
            .activity()
            .insert(
                &mut *tx,
                &ActivityEntry {
                    id: Uuid::new_v4().to_string(),
                    user_id: actor.user_id.clone(),
                    action: ActivityAction::UpdatePrice,
                    entity_type: "product".to_string(),
                    entity_id: product_id.to_string(),
                    details: Some(
                        json!({
                            "old_price_cents": product.price_cents,
                            "new_price_cents": price_cents,
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
            old_price_cents = product.price_cents,
            new_price_cents = price_cents,
            "Product price updated"
        );

        Ok(Product {
            price_cents,
            updated_at: now,
            ..product
        })
    }

    /// Gets a product by id.
    pub async fn get_product(&self, product_id: &str) -> ServiceResult<Product> {
        self.db
            .products()
            .get_by_id(product_id)
            .await?
            .ok_or_else(|| CoreError::ProductNotFound(product_id.to_string()).into())
    }

    /// Lists the products visible to an actor (their inventory owner's).
    pub async fn list_inventory(&self, actor: &Actor, limit: u32) -> ServiceResult<Vec<Product>> {
        Ok(self
            .db
            .products()
            .list_by_owner(&actor.inventory_owner_id, limit)
            .await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DbError, ServiceError};
    use crate::testkit;

    fn new_product(name: &str, category: Option<&str>, code: Option<&str>) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            category: category.map(str::to_string),
            price_cents: 500,
            initial_stock: 8,
            code: code.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_create_product_derives_sequenced_code() {
        let fixture = testkit::seeded_db().await;
        let service = fixture.product_service();

        // Fixture already has BEBI-COLA-001; the derived prefix for
        // ("Bebidas", "Cola") sees it and continues at 002.
        let product = service
            .create_product(
                &fixture.admin_actor(),
                new_product("Cola", Some("Bebidas"), None),
            )
            .await
            .unwrap();

        assert_eq!(product.code, "BEBI-COLA-002");
        assert_eq!(product.stock, 8);
        assert_eq!(product.owner_id, fixture.admin.id);
    }

    #[tokio::test]
    async fn test_genesis_stock_writes_no_movement() {
        let fixture = testkit::seeded_db().await;
        let service = fixture.product_service();

        let product = service
            .create_product(
                &fixture.admin_actor(),
                new_product("Jugo Naranja", Some("Bebidas"), None),
            )
            .await
            .unwrap();

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

    #[tokio::test]
    async fn test_explicit_duplicate_code_is_rejected() {
        let fixture = testkit::seeded_db().await;
        let service = fixture.product_service();

        let err = service
            .create_product(
                &fixture.admin_actor(),
                new_product("Otra Cola", Some("Bebidas"), Some("BEBI-COLA-001")),
            )
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ServiceError::Db(DbError::UniqueViolation { .. })
        ));
    }

    #[tokio::test]
    async fn test_employees_may_not_create_products() {
        let fixture = testkit::seeded_db().await;

        let err = fixture
            .product_service()
            .create_product(
                &fixture.employee_actor(),
                new_product("Contrabando", None, None),
            )
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ServiceError::Domain(CoreError::Forbidden { .. })
        ));
    }

    #[tokio::test]
    async fn test_code_assigned_event_fires_after_commit() {
        let fixture = testkit::seeded_db().await;
        let service = fixture.product_service();
        let mut rx = service.events.subscribe();

        let product = service
            .create_product(
                &fixture.admin_actor(),
                new_product("Galletas", Some("Snacks"), None),
            )
            .await
            .unwrap();

        let event = rx.recv().await.unwrap();
        match event {
            EngineEvent::ProductCodeAssigned { product_id, code } => {
                assert_eq!(product_id, product.id);
                assert_eq!(code, product.code);
                // The row the event points at is already committed.
                let row = fixture.db.products().get_by_id(&product_id).await.unwrap();
                assert!(row.is_some());
            }
        }
    }

    #[tokio::test]
    async fn test_update_price_checks_ownership() {
        let fixture = testkit::seeded_db().await;
        let cola = &fixture.products[0];
        let service = fixture.product_service();

        let updated = service
            .update_price(&fixture.admin_actor(), &cola.id, 275)
            .await
            .unwrap();
        assert_eq!(updated.price_cents, 275);

        // Foreign admin and employees are rejected.
        for actor in [fixture.outsider_actor(), fixture.employee_actor()] {
            let err = service
                .update_price(&actor, &cola.id, 100)
                .await
                .unwrap_err();
            assert!(matches!(
                err,
                ServiceError::Domain(CoreError::Forbidden { .. })
            ));
        }

        let fresh = service.get_product(&cola.id).await.unwrap();
        assert_eq!(fresh.price_cents, 275);
    }

    #[tokio::test]
    async fn test_list_inventory_follows_the_manager_relation() {
        let fixture = testkit::seeded_db().await;
        let service = fixture.product_service();

        // Employee sees the manager's inventory, outsider sees nothing.
        let visible = service
            .list_inventory(&fixture.employee_actor(), 50)
            .await
            .unwrap();
        assert_eq!(visible.len(), 3);

        let foreign = service
            .list_inventory(&fixture.outsider_actor(), 50)
            .await
            .unwrap();
        assert!(foreign.is_empty());
    }
}
