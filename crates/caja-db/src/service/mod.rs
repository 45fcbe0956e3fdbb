//! # Transaction Services
//!
//! The business operations of the engine, each owning its transaction
//! boundary.
//!
//! ## Layering
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Caller (HTTP layer, CLI, tests)                                         │
//! │       │  passes an Actor (resolved capabilities) + request data          │
//! │       ▼                                                                  │
//! │  Services (THIS MODULE)                                                  │
//! │  ├── sales::SaleService      create_sale / cancel_sale / reads           │
//! │  ├── stock::StockService     adjust_stock / movement history             │
//! │  └── products::ProductService  create_product / update_price / reads     │
//! │       │                                                                  │
//! │       │  one sqlx transaction per mutating call,                         │
//! │       │  write lock first, commit or roll back atomically                │
//! │       ▼                                                                  │
//! │  ledger (stock choke point) + repositories                               │
//! │       │                                                                  │
//! │       ▼                                                                  │
//! │  SQLite                                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Transaction discipline
//! Every mutating service method follows the same shape:
//! 1. Validate input (pure, no storage touched).
//! 2. `begin()`, then make the FIRST statement a write so the SQLite write
//!    lock is held before any stock is read.
//! 3. Read state, authorize, apply changes through [`ledger`].
//! 4. Append the activity row, `commit()`.
//! 5. Only after commit: emit events, log at `info!`.
//!
//! Dropping a transaction without commit rolls it back; every `?` between
//! `begin()` and `commit()` is an abort path.

pub mod ledger;
pub mod products;
pub mod sales;
pub mod stock;

pub use products::ProductService;
pub use sales::SaleService;
pub use stock::StockService;
