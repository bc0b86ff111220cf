//! # Error Types
//!
//! Domain-specific error types for rocket-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  rocket-core errors (this file)                                        │
//! │  ├── CoreError        - Cart rule violations                           │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  rocket-db errors (separate crate)                                     │
//! │  └── DbError          - Persisted store failures                       │
//! │                                                                         │
//! │  rocket-cart errors (service crate)                                    │
//! │  ├── InventoryError   - Stock/product lookup failures                  │
//! │  └── CartError        - Everything above, mapped to a Notice           │
//! │                                                                         │
//! │  Flow: CoreError / DbError / InventoryError → CartError → Notice       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::types::ProductId;

// =============================================================================
// Core Error
// =============================================================================

/// Cart rule violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Requested quantity exceeds what the inventory reports as available.
    ///
    /// ## User Workflow
    /// ```text
    /// Click "add" (cart already holds 5)
    ///      │
    ///      ▼
    /// Stock lookup: available=5
    ///      │
    ///      ▼
    /// OutOfStock { product_id: 1, available: 5, requested: 6 }
    ///      │
    ///      ▼
    /// UI shows: "Quantidade solicitada fora de estoque"
    /// ```
    #[error("Out of stock for product {product_id}: available {available}, requested {requested}")]
    OutOfStock {
        product_id: ProductId,
        available: i64,
        requested: i64,
    },

    /// Product is not a line of the cart.
    #[error("Product {0} not in cart")]
    NotInCart(ProductId),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value exceeds the allowed maximum.
    #[error("{field} must be at most {max}")]
    TooLarge { field: String, max: i64 },

    /// Stored or received data could not be understood.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::OutOfStock {
            product_id: 3,
            available: 2,
            requested: 3,
        };
        assert_eq!(
            err.to_string(),
            "Out of stock for product 3: available 2, requested 3"
        );
        assert_eq!(CoreError::NotInCart(9).to_string(), "Product 9 not in cart");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "amount".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert_eq!(
            core_err.to_string(),
            "Validation error: amount must be positive"
        );
    }
}
