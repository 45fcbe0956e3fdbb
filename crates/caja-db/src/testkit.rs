//! Shared fixtures for the crate's tests: a migrated database seeded with
//! a small user hierarchy and product set.
//!
//! Fixture layout:
//! - `admin` owns the inventory; `employee` reports to `admin`;
//!   `outsider` is a second admin with an empty, foreign inventory.
//! - products (owned by `admin`):
//!   `[0]` Cola 355ml    $2.50  stock 10
//!   `[1]` Chips Picantes $1.50 stock 5
//!   `[2]` Agua 1L       $1.00  stock 0

use chrono::Utc;
use std::path::PathBuf;
use uuid::Uuid;

use crate::events::EventBus;
use crate::pool::{Database, DbConfig};
use crate::service::{ProductService, SaleService, StockService};
use caja_core::{Actor, Product, Role, User};

pub(crate) struct Fixture {
    pub db: Database,
    pub admin: User,
    pub employee: User,
    pub outsider: User,
    pub products: Vec<Product>,
    /// Set for file-backed fixtures; the file is removed on drop.
    path: Option<PathBuf>,
}

impl Fixture {
    pub fn admin_actor(&self) -> Actor {
        Actor::from_user(&self.admin).unwrap()
    }

    pub fn employee_actor(&self) -> Actor {
        Actor::from_user(&self.employee).unwrap()
    }

    pub fn outsider_actor(&self) -> Actor {
        Actor::from_user(&self.outsider).unwrap()
    }

    pub fn sale_service(&self) -> SaleService {
        SaleService::new(self.db.clone())
    }

    pub fn stock_service(&self) -> StockService {
        StockService::new(self.db.clone())
    }

    pub fn product_service(&self) -> ProductService {
        ProductService::new(self.db.clone(), EventBus::new())
    }
}

impl Drop for Fixture {
    fn drop(&mut self) {
        if let Some(path) = &self.path {
            let _ = std::fs::remove_file(path);
            let _ = std::fs::remove_file(path.with_extension("db-wal"));
            let _ = std::fs::remove_file(path.with_extension("db-shm"));
        }
    }
}

/// In-memory database with the standard fixture. One pooled connection,
/// so don't hold a transaction while issuing pool-bound calls.
pub(crate) async fn seeded_db() -> Fixture {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    seed(db, None).await
}

/// File-backed database with the standard fixture, for tests that need
/// real concurrency (several pooled connections).
pub(crate) async fn seeded_file_db() -> Fixture {
    let path = std::env::temp_dir().join(format!("caja-test-{}.db", Uuid::new_v4()));
    let db = Database::new(DbConfig::new(&path)).await.unwrap();
    seed(db, Some(path)).await
}

async fn seed(db: Database, path: Option<PathBuf>) -> Fixture {
    let now = Utc::now();

    let admin = User {
        id: Uuid::new_v4().to_string(),
        username: "ana".to_string(),
        role: Role::Admin,
        manager_id: None,
        created_at: now,
    };
    let employee = User {
        id: Uuid::new_v4().to_string(),
        username: "beto".to_string(),
        role: Role::Employee,
        manager_id: Some(admin.id.clone()),
        created_at: now,
    };
    let outsider = User {
        id: Uuid::new_v4().to_string(),
        username: "carla".to_string(),
        role: Role::Admin,
        manager_id: None,
        created_at: now,
    };

    let users = db.users();
    users.insert(db.pool(), &admin).await.unwrap();
    users.insert(db.pool(), &employee).await.unwrap();
    users.insert(db.pool(), &outsider).await.unwrap();

    let catalog = [
        ("Cola 355ml", Some("Bebidas"), 250, 10, "BEBI-COLA-001"),
        ("Chips Picantes", Some("Snacks"), 150, 5, "SNAC-CHIP-001"),
        ("Agua 1L", Some("Bebidas"), 100, 0, "BEBI-AGUA-001"),
    ];

    let mut products = Vec::new();
    for (name, category, price_cents, stock, code) in catalog {
        let product = Product {
            id: Uuid::new_v4().to_string(),
            owner_id: admin.id.clone(),
            name: name.to_string(),
            category: category.map(str::to_string),
            price_cents,
            stock,
            code: code.to_string(),
            created_at: now,
            updated_at: now,
        };
        db.products().insert(db.pool(), &product).await.unwrap();
        products.push(product);
    }

    Fixture {
        db,
        admin,
        employee,
        outsider,
        products,
        path,
    }
}
