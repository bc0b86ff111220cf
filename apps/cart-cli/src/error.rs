//! # CLI Error Type
//!
//! Failures that stop the CLI before a cart command can run. Failures inside
//! a command never get here; they come back as `Outcome::Rejected`.

use rocket_cart::{CartError, ConfigError, InventoryError};
use rocket_db::DbError;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Could not determine a data directory; set ROCKET_DB_PATH")]
    NoDataDir,

    #[error("Failed to prepare data directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] DbError),

    #[error("Inventory client error: {0}")]
    Inventory(#[from] InventoryError),

    #[error("Failed to load cart: {0}")]
    Cart(#[from] CartError),
}
