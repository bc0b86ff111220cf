//! # Validation Module
//!
//! Stock and amount rules applied before any cart change.
//!
//! ## Where Stock Is Checked
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Stock Check                                        │
//! │                                                                         │
//! │  add(id)              target = amount_of(id) + 1                        │
//! │  update_amount(id, n) target = n                                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  check_stock(id, target, &stock)                                        │
//! │  ├── target <= stock.amount  → Ok                                       │
//! │  └── target >  stock.amount  → CoreError::OutOfStock                    │
//! │                                                                         │
//! │  The check uses the stock observed for THIS operation only;             │
//! │  it is not re-checked when stock later changes.                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{ProductId, Stock};

/// Largest quantity a single cart line may hold.
///
/// Keeps line and cart totals far from the `i64` bounds whatever the stored
/// cart or the inventory service says.
pub const MAX_LINE_AMOUNT: i64 = 10_000;

/// Checks a requested cart amount against the observed stock.
///
/// ## Example
/// ```rust
/// use rocket_core::{Stock, CoreError};
/// use rocket_core::validation::check_stock;
///
/// let stock = Stock { id: 1, amount: 5 };
/// assert!(check_stock(1, 5, &stock).is_ok());
/// assert!(matches!(check_stock(1, 6, &stock), Err(CoreError::OutOfStock { .. })));
/// ```
pub fn check_stock(product_id: ProductId, requested: i64, stock: &Stock) -> CoreResult<()> {
    if requested > stock.amount {
        return Err(CoreError::OutOfStock {
            product_id,
            available: stock.amount,
            requested,
        });
    }
    Ok(())
}

/// Validates an amount the user typed into the quantity field.
pub fn validate_amount(amount: i64) -> Result<(), ValidationError> {
    if amount <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "amount".to_string(),
        });
    }
    if amount > MAX_LINE_AMOUNT {
        return Err(ValidationError::TooLarge {
            field: "amount".to_string(),
            max: MAX_LINE_AMOUNT,
        });
    }
    Ok(())
}

/// The amount an add would bring a line to.
///
/// A line that cannot grow any further is reported as out of stock.
pub fn add_target(product_id: ProductId, current: i64, stock: &Stock) -> CoreResult<i64> {
    let target = current.checked_add(1).ok_or(CoreError::OutOfStock {
        product_id,
        available: stock.amount,
        requested: current,
    })?;
    check_stock(product_id, target, stock)?;
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_stock_boundary() {
        let stock = Stock { id: 1, amount: 3 };

        assert!(check_stock(1, 1, &stock).is_ok());
        assert!(check_stock(1, 3, &stock).is_ok());
        assert_eq!(
            check_stock(1, 4, &stock),
            Err(CoreError::OutOfStock {
                product_id: 1,
                available: 3,
                requested: 4,
            })
        );
    }

    #[test]
    fn test_check_stock_empty_inventory() {
        let stock = Stock { id: 2, amount: 0 };
        assert!(check_stock(2, 1, &stock).is_err());
    }

    #[test]
    fn test_validate_amount() {
        assert!(validate_amount(1).is_ok());
        assert!(validate_amount(MAX_LINE_AMOUNT).is_ok());
        assert!(validate_amount(0).is_err());
        assert!(validate_amount(-3).is_err());
        assert_eq!(
            validate_amount(MAX_LINE_AMOUNT + 1),
            Err(ValidationError::TooLarge {
                field: "amount".to_string(),
                max: MAX_LINE_AMOUNT,
            })
        );
    }

    #[test]
    fn test_add_target() {
        let stock = Stock { id: 1, amount: 5 };
        assert_eq!(add_target(1, 0, &stock), Ok(1));
        assert_eq!(add_target(1, 4, &stock), Ok(5));
        assert!(matches!(
            add_target(1, 5, &stock),
            Err(CoreError::OutOfStock { requested: 6, .. })
        ));
    }

    #[test]
    fn test_add_target_at_i64_max_does_not_overflow() {
        let stock = Stock {
            id: 1,
            amount: i64::MAX,
        };
        assert_eq!(
            add_target(1, i64::MAX, &stock),
            Err(CoreError::OutOfStock {
                product_id: 1,
                available: i64::MAX,
                requested: i64::MAX,
            })
        );
    }
}
