//! # rocket-db: Persisted Store for the RocketShoes Cart
//!
//! This crate provides the durable key-value string store the cart is saved
//! to. It uses SQLite for local storage with sqlx for async operations, and
//! ships an in-memory store for tests and throwaway sessions.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cart Persistence Flow                            │
//! │                                                                         │
//! │  CartStore::add_product(1)                                             │
//! │       │                                                                 │
//! │       ▼  store.set("@RocketShoes:cart", "[{...}]")                      │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     rocket-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │ KeyValueStore │    │   Database    │    │  Migrations  │  │   │
//! │  │   │   (trait)     │◄───│   (pool.rs)   │    │  (embedded)  │  │   │
//! │  │   │               │    │ KeyValueRepo  │    │ 001_kv.sql   │  │   │
//! │  │   │               │◄───│  MemoryStore  │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   ~/.local/share/rocketshoes-cart/cart.db                       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - The `KeyValueStore` seam the cart depends on
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`repository`] - SQL-backed key-value repository
//! - [`memory`] - In-memory store
//! - [`error`] - Database error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rocket_db::{Database, DbConfig, KeyValueStore};
//!
//! let db = Database::new(DbConfig::new("path/to/cart.db")).await?;
//!
//! db.set("@RocketShoes:cart", "[]").await?;
//! let saved = db.get("@RocketShoes:cart").await?;
//! ```

pub mod error;
pub mod memory;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod store;

pub use error::{DbError, DbResult};
pub use memory::MemoryStore;
pub use pool::{Database, DbConfig};
pub use repository::key_value::KeyValueRepository;
pub use store::KeyValueStore;
