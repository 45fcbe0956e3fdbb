//! # caja-db: Database Layer for the Caja Backend
//!
//! This crate provides database access for the caja sale-transaction and
//! stock-consistency engine. It uses SQLite for storage with sqlx for async
//! operations, and hosts the transactional services that own every write.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Caja Data Flow                                   │
//! │                                                                         │
//! │  Caller (HTTP endpoint, CLI, tests) with a resolved Actor               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     caja-db (THIS CRATE)                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐   │   │
//! │  │   │   Services    │    │  Repositories │    │  Migrations  │   │   │
//! │  │   │ (service/*.rs)│    │ (repository/) │    │  (embedded)  │   │   │
//! │  │   │               │    │               │    │              │   │   │
//! │  │   │ SaleService   │───►│ ProductRepo   │    │ 001_init.sql │   │   │
//! │  │   │ StockService  │    │ SaleRepo      │    │ ...          │   │   │
//! │  │   │ ProductService│    │ MovementRepo  │    │              │   │   │
//! │  │   └───────┬───────┘    └───────────────┘    └──────────────┘   │   │
//! │  │           │                                                     │   │
//! │  │           └──► service::ledger — the ONLY stock writer          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database (WAL)                       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database and service error types
//! - [`repository`] - Repository implementations (product, sale, movement, ...)
//! - [`service`] - Transactional business operations (the engine itself)
//! - [`events`] - Post-commit notifications for external collaborators
//!
//! ## Usage
//!
//! ```rust,ignore
//! use caja_core::{Actor, SaleLine};
//! use caja_db::{Database, DbConfig, SaleService};
//!
//! let db = Database::new(DbConfig::new("path/to/caja.db")).await?;
//!
//! let actor = Actor::from_user(&user)?;
//! let sale = SaleService::new(db.clone())
//!     .create_sale(
//!         &actor,
//!         &[SaleLine { product_id: product.id.clone(), quantity: 4 }],
//!         Some("cash"),
//!     )
//!     .await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod events;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod service;

#[cfg(test)]
pub(crate) mod testkit;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, ServiceError, ServiceResult};
pub use events::{EngineEvent, EventBus};
pub use pool::{Database, DbConfig};

// Service re-exports for convenience
pub use service::{ProductService, SaleService, StockService};

// Repository re-exports for convenience
pub use repository::movement::MovementRepository;
pub use repository::product::ProductRepository;
pub use repository::sale::SaleRepository;
