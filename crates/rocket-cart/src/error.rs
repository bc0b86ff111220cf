//! # Cart Error Types
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Cart Error Categories                             │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Cart rules     │  │   Inventory     │  │     Storage             │ │
//! │  │  (CoreError)    │  │ (InventoryError)│  │  (DbError, JSON)        │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  OutOfStock ────┼──┼─► OutOfStock    │  │                         │ │
//! │  │  NotInCart      │  │  Http           │  │  QueryFailed            │ │
//! │  │  Validation     │  │  Status         │  │  ConnectionFailed       │ │
//! │  │                 │  │  Decode         │  │  Serialization          │ │
//! │  └────────┬────────┘  └────────┬────────┘  └────────────┬────────────┘ │
//! │           └────────────────────┴────────────────────────┘              │
//! │                                │                                        │
//! │                                ▼                                        │
//! │             everything else ─► Notice::failure(operation)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Errors never leave a cart operation: [`CartError::notice`] turns each one
//! into the message the user sees.

use rocket_core::{CoreError, Notice, Operation, ProductId};
use rocket_db::DbError;
use thiserror::Error;

/// Result type alias for cart operations.
pub type CartResult<T> = Result<T, CartError>;

/// Failures talking to the inventory service.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// Request could not be sent or the response body could not be read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("Inventory returned {status} for {path}")]
    Status { status: u16, path: String },

    /// The response body was not the expected JSON shape.
    #[error("Failed to decode inventory response: {0}")]
    Decode(String),

    /// The configured base URL is unusable.
    #[error("Invalid inventory URL: {0}")]
    InvalidUrl(String),

    /// The service returned a record for a different product.
    #[error("Asked for product {requested}, inventory answered for {returned}")]
    MismatchedId {
        requested: ProductId,
        returned: ProductId,
    },
}

/// Any failure inside a cart operation.
#[derive(Debug, Error)]
pub enum CartError {
    /// A cart rule rejected the change.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A stock or product lookup failed.
    #[error("Inventory lookup failed: {0}")]
    Inventory(#[from] InventoryError),

    /// The persisted store failed.
    #[error("Storage failed: {0}")]
    Storage(#[from] DbError),

    /// The cart could not be encoded for storage.
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CartError {
    /// The notice shown to the user when `op` fails with this error.
    ///
    /// Out-of-stock has its own message; everything else collapses into the
    /// operation's generic failure.
    pub fn notice(&self, op: Operation) -> Notice {
        match self {
            CartError::Core(CoreError::OutOfStock { .. }) => Notice::OutOfStock,
            _ => Notice::failure(op),
        }
    }

    /// Whether this failure is the user's request being refused rather than
    /// something breaking.
    pub fn is_rejection(&self) -> bool {
        matches!(self, CartError::Core(_))
    }
}

/// Failures loading the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the config file.
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid TOML for `CartConfig`.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value failed validation.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_stock_keeps_its_notice() {
        let err = CartError::from(CoreError::OutOfStock {
            product_id: 1,
            available: 1,
            requested: 2,
        });

        assert_eq!(err.notice(Operation::Add), Notice::OutOfStock);
        assert_eq!(err.notice(Operation::UpdateAmount), Notice::OutOfStock);
        assert!(err.is_rejection());
    }

    #[test]
    fn test_other_errors_collapse_per_operation() {
        let not_in_cart = CartError::from(CoreError::NotInCart(4));
        assert_eq!(not_in_cart.notice(Operation::Remove), Notice::RemoveFailed);

        let inventory = CartError::from(InventoryError::Status {
            status: 500,
            path: "/stock/1".to_string(),
        });
        assert_eq!(inventory.notice(Operation::Add), Notice::AddFailed);
        assert_eq!(
            inventory.notice(Operation::UpdateAmount),
            Notice::UpdateFailed
        );
        assert!(!inventory.is_rejection());

        let storage = CartError::from(DbError::PoolExhausted);
        assert_eq!(storage.notice(Operation::Add), Notice::AddFailed);
    }

    #[test]
    fn test_error_messages() {
        let err = InventoryError::Status {
            status: 404,
            path: "/products/9".to_string(),
        };
        assert_eq!(err.to_string(), "Inventory returned 404 for /products/9");
    }
}
