//! # rocket-cart: Cart Store for RocketShoes
//!
//! The single component a storefront view talks to for cart state. Every
//! change is checked against the inventory service and persisted before it
//! becomes visible.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Cart Store Service                             │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                     CartStore (store.rs)                         │  │
//! │  │                                                                  │  │
//! │  │  Mutex<Cart> held for each whole operation                      │  │
//! │  │  add_product / remove_product / update_product_amount           │  │
//! │  └──────┬──────────────────────┬─────────────────────┬──────────────┘  │
//! │         ▼                      ▼                     ▼                  │
//! │  ┌──────────────┐   ┌────────────────────┐   ┌────────────────────┐    │
//! │  │ InventoryApi │   │  KeyValueStore     │   │  Notifier          │    │
//! │  │              │   │  (rocket-db)       │   │                    │    │
//! │  │ GET /stock   │   │                    │   │ TracingNotifier    │    │
//! │  │ GET /products│   │ "@RocketShoes:cart"│   │ ChannelNotifier    │    │
//! │  └──────────────┘   └────────────────────┘   └────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`store`] - `CartStore` and the operation outcomes
//! - [`inventory`] - `InventoryApi` trait and its reqwest client
//! - [`notify`] - Notification sinks
//! - [`config`] - `CartConfig` (TOML + environment)
//! - [`error`] - Error types
//!
//! ## Wiring
//! ```rust,ignore
//! let config = CartConfig::load(None)?;
//! let db = Database::new(DbConfig::new(path)).await?;
//!
//! let store = CartStore::load(
//!     Arc::new(HttpInventoryClient::new(&config.inventory)?),
//!     Arc::new(db),
//!     Arc::new(TracingNotifier),
//!     config.storage.key.clone(),
//! )
//! .await?;
//!
//! store.add_product(1).await;
//! ```

pub mod config;
pub mod error;
pub mod inventory;
pub mod notify;
pub mod store;

pub use config::{CartConfig, InventoryConfig, StorageConfig};
pub use error::{CartError, CartResult, ConfigError, InventoryError};
pub use inventory::{HttpInventoryClient, InventoryApi};
pub use notify::{ChannelNotifier, Notifier, TracingNotifier};
pub use store::{CartStore, Outcome, UpdateProductAmount};
