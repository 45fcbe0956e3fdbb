//! # Repository Module
//!
//! Database repository implementations for the caja backend.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                          │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.   │
//! │                                                                         │
//! │  Service (SaleService::create_sale)                                     │
//! │       │                                                                 │
//! │       │  repo.fetch_many(&mut *tx, &ids)                                │
//! │       │  ↓                                                              │
//! │       ▼                                                                 │
//! │  ProductRepository                                                      │
//! │  ├── get_by_id(&self, id)              ← pool-bound reads               │
//! │  ├── fetch(&self, executor, id)        ← composes into transactions     │
//! │  ├── lock_row(&self, executor, id)                                      │
//! │  └── insert(&self, executor, product)                                   │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                        │
//! │                                                                         │
//! │  Two calling conventions:                                               │
//! │  • Plain reads take no executor and run on the pool.                    │
//! │  • Methods a service must run inside ITS transaction are generic over   │
//! │    `E: Executor<'e, Database = Sqlite>` and receive `&mut *tx`.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`product::ProductRepository`] - Product rows, catalog reads, code lookups
//! - [`sale::SaleRepository`] - Sales, sale items, the cancellation flip
//! - [`movement::MovementRepository`] - Append-only inventory movement log
//! - [`user::UserRepository`] - Users and the admin/employee hierarchy
//! - [`activity::ActivityLogRepository`] - Who-did-what audit rows
//!
//! Stock itself is NOT mutated here: every stock write goes through
//! [`crate::service::ledger`], which pairs the guarded UPDATE with its
//! movement row in one place.

pub mod activity;
pub mod movement;
pub mod product;
pub mod sale;
pub mod user;
