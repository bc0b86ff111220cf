//! # RocketShoes Cart CLI
//!
//! Runs one cart command against the persisted cart and prints the result.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         CLI Startup                                     │
//! │                                                                         │
//! │  1. Initialize Logging ───────────────────────────────────────────────► │
//! │     • tracing-subscriber with env filter, to stderr                     │
//! │     • Default: info,rocket=debug,sqlx=warn; override with RUST_LOG      │
//! │                                                                         │
//! │  2. Load Configuration ───────────────────────────────────────────────► │
//! │     • --config PATH, else platform config dir                           │
//! │     • ROCKET_* environment overrides                                    │
//! │                                                                         │
//! │  3. Open Storage ─────────────────────────────────────────────────────► │
//! │     • SQLite with WAL mode, pending migrations applied                  │
//! │                                                                         │
//! │  4. Load CartStore ───────────────────────────────────────────────────► │
//! │     • Restores "@RocketShoes:cart"                                      │
//! │                                                                         │
//! │  5. Run Command, Print Report ────────────────────────────────────────► │
//! │     • { outcome, cart, totals } as JSON on stdout                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod error;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use rocket_cart::{
    CartConfig, CartStore, HttpInventoryClient, InventoryApi, Notifier, Outcome,
    TracingNotifier, UpdateProductAmount,
};
use rocket_core::{Cart, CartTotals, ProductId};
use rocket_db::{Database, DbConfig, KeyValueStore};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::{AppError, AppResult};

/// Manage the RocketShoes shopping cart.
#[derive(Debug, Parser)]
#[command(name = "rocket-cart", version, about)]
pub struct Cli {
    /// Config file (default: platform config dir / cart.toml)
    #[arg(long, global = true, env = "ROCKET_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Print the cart
    Show,
    /// Add one unit of a product
    Add { id: ProductId },
    /// Remove a product from the cart
    Remove { id: ProductId },
    /// Set a product's quantity
    Update {
        id: ProductId,
        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },
}

/// What gets printed after a command.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// `None` for `show`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,
    pub cart: Cart,
    pub totals: CartTotals,
}

impl Report {
    pub fn is_rejected(&self) -> bool {
        self.outcome.is_some_and(|o| o.is_rejected())
    }
}

/// Loads configuration, opens storage and runs the command.
pub async fn run(cli: Cli) -> AppResult<Report> {
    let config = CartConfig::load(cli.config)?;
    info!(
        base_url = %config.inventory.base_url,
        key = %config.storage.key,
        "Configuration loaded"
    );

    let db_path = config.database_path().ok_or(AppError::NoDataDir)?;
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let db = Database::new(DbConfig::new(db_path)).await?;

    let inventory = HttpInventoryClient::new(&config.inventory)?;
    let store = open_store(
        Arc::new(inventory),
        Arc::new(db.clone()),
        Arc::new(TracingNotifier),
        &config,
    )
    .await?;

    let report = execute(&store, cli.command).await;
    db.close().await;
    Ok(report)
}

/// Builds the store from its collaborators.
pub async fn open_store(
    inventory: Arc<dyn InventoryApi>,
    storage: Arc<dyn KeyValueStore>,
    notifier: Arc<dyn Notifier>,
    config: &CartConfig,
) -> AppResult<CartStore> {
    let store = CartStore::load(inventory, storage, notifier, config.storage.key.clone()).await?;
    Ok(store)
}

/// Runs one command and snapshots the cart afterwards.
pub async fn execute(store: &CartStore, command: Command) -> Report {
    let outcome = match command {
        Command::Show => None,
        Command::Add { id } => Some(store.add_product(id).await),
        Command::Remove { id } => Some(store.remove_product(id).await),
        Command::Update { id, amount } => Some(
            store
                .update_product_amount(UpdateProductAmount {
                    product_id: id,
                    amount,
                })
                .await,
        ),
    };

    Report {
        outcome,
        cart: store.cart().await,
        totals: store.totals().await,
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so stdout stays valid JSON.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=rocket=trace` - Show trace for rocket crates only
/// - Default: `info,rocket=debug,sqlx=warn`
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,rocket=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
