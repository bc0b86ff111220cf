//! # Cart
//!
//! The ordered list of cart lines and the pure transitions between carts.
//!
//! ## Copy-on-Write Transitions
//! Every transition returns a *new* cart and leaves `self` untouched. The
//! service computes the candidate, persists it, and only then swaps it in,
//! so a failure at any step leaves the current cart byte-for-byte unchanged.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Transitions                                     │
//! │                                                                         │
//! │  Operation             Transition                 Fails with            │
//! │  ─────────             ──────────                 ──────────            │
//! │                                                                         │
//! │  add (new product) ──► with_new_line(product) ──► (never)               │
//! │                                                                         │
//! │  add (in cart) ──────► with_increment(id) ──────► NotInCart             │
//! │                                                                         │
//! │  update amount ──────► with_amount(id, n) ──────► NotInCart             │
//! │                                                                         │
//! │  remove ─────────────► without(id) ─────────────► NotInCart             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Lines are unique by product id
//! - Line order is the order products were first added
//! - Every line's amount is positive

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::{self, Money};
use crate::types::{Product, ProductId};
use crate::validation::{validate_amount, MAX_LINE_AMOUNT};

/// The shopping cart.
///
/// Serializes as a bare JSON array of [`Product`], which is the persisted
/// format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<Product>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Decodes a persisted cart.
    ///
    /// Rejects data that breaks the cart invariants instead of repairing it.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let lines: Vec<Product> =
            serde_json::from_str(json).map_err(|e| ValidationError::InvalidFormat {
                field: "cart".to_string(),
                reason: e.to_string(),
            })?;

        let mut seen = HashSet::with_capacity(lines.len());
        for line in &lines {
            if !seen.insert(line.id) {
                return Err(ValidationError::InvalidFormat {
                    field: "cart".to_string(),
                    reason: format!("duplicate product {}", line.id),
                }
                .into());
            }
            if line.amount <= 0 {
                return Err(ValidationError::MustBePositive {
                    field: format!("amount of product {}", line.id),
                }
                .into());
            }
            if line.amount > MAX_LINE_AMOUNT {
                return Err(ValidationError::TooLarge {
                    field: format!("amount of product {}", line.id),
                    max: MAX_LINE_AMOUNT,
                }
                .into());
            }
        }

        Ok(Cart { lines })
    }

    /// Encodes the cart for persistence.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Cart lines in insertion order.
    pub fn lines(&self) -> &[Product] {
        &self.lines
    }

    /// Returns the line for a product, if present.
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.lines.iter().find(|p| p.id == id)
    }

    /// Quantity held for a product, 0 when absent.
    pub fn amount_of(&self, id: ProductId) -> i64 {
        self.get(id).map_or(0, |p| p.amount)
    }

    /// Checks if the product is in the cart.
    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Appends a product as a new line with amount 1.
    ///
    /// If the product is already in the cart its line is incremented instead,
    /// keeping lines unique. The increment stops at [`MAX_LINE_AMOUNT`].
    pub fn with_new_line(&self, product: Product) -> Cart {
        if self.contains(product.id) {
            let amount = self
                .amount_of(product.id)
                .saturating_add(1)
                .min(MAX_LINE_AMOUNT);
            return self.with_amount_unchecked(product.id, amount);
        }

        let mut next = self.clone();
        next.lines.push(product.with_amount(1));
        next
    }

    /// Adds one unit to an existing line.
    pub fn with_increment(&self, id: ProductId) -> CoreResult<Cart> {
        let current = self.get(id).ok_or(CoreError::NotInCart(id))?.amount;
        let next = current.checked_add(1).ok_or(ValidationError::TooLarge {
            field: "amount".to_string(),
            max: MAX_LINE_AMOUNT,
        })?;
        validate_amount(next)?;
        Ok(self.with_amount_unchecked(id, next))
    }

    /// Sets the amount of an existing line.
    pub fn with_amount(&self, id: ProductId, amount: i64) -> CoreResult<Cart> {
        validate_amount(amount)?;
        if !self.contains(id) {
            return Err(CoreError::NotInCart(id));
        }
        Ok(self.with_amount_unchecked(id, amount))
    }

    /// Removes a line.
    pub fn without(&self, id: ProductId) -> CoreResult<Cart> {
        let lines: Vec<Product> = self.lines.iter().filter(|p| p.id != id).cloned().collect();

        if lines.len() == self.lines.len() {
            return Err(CoreError::NotInCart(id));
        }

        Ok(Cart { lines })
    }

    /// Derived totals for display.
    pub fn totals(&self) -> CartTotals {
        CartTotals::from(self)
    }

    fn with_amount_unchecked(&self, id: ProductId, amount: i64) -> Cart {
        let mut next = self.clone();
        for line in next.lines.iter_mut().filter(|p| p.id == id) {
            line.amount = amount;
        }
        next
    }
}

// =============================================================================
// Totals
// =============================================================================

/// Cart totals summary for the UI (header badge, cart page footer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    /// Distinct products in the cart.
    pub item_count: u32,

    /// Sum of all line amounts.
    #[ts(type = "number")]
    pub total_quantity: i64,

    /// Sum of price × amount.
    #[serde(with = "money::decimal")]
    #[ts(type = "number")]
    pub subtotal: Money,

    /// Subtotal formatted for display, e.g. `R$ 359,80`.
    pub subtotal_formatted: String,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        let subtotal: Money = cart.lines.iter().map(Product::subtotal).sum();
        CartTotals {
            item_count: u32::try_from(cart.len()).unwrap_or(u32::MAX),
            total_quantity: cart
                .lines
                .iter()
                .fold(0i64, |acc, p| acc.saturating_add(p.amount)),
            subtotal,
            subtotal_formatted: subtotal.format_brl(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: ProductId, price_cents: i64) -> Product {
        Product::new(
            id,
            format!("Tênis {}", id),
            Money::from_cents(price_cents),
            format!("tenis{}.jpg", id),
        )
    }

    #[test]
    fn test_new_line_starts_at_one() {
        let cart = Cart::new().with_new_line(product(1, 17990).with_amount(42));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.amount_of(1), 1);
    }

    #[test]
    fn test_new_line_keeps_insertion_order() {
        let cart = Cart::new()
            .with_new_line(product(3, 100))
            .with_new_line(product(1, 100))
            .with_new_line(product(2, 100));

        let ids: Vec<ProductId> = cart.lines().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_new_line_for_existing_product_increments() {
        let cart = Cart::new()
            .with_new_line(product(1, 100))
            .with_new_line(product(1, 100));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.amount_of(1), 2);
    }

    #[test]
    fn test_transitions_leave_original_untouched() {
        let cart = Cart::new().with_new_line(product(1, 100));
        let before = cart.clone();

        let _ = cart.with_increment(1).unwrap();
        let _ = cart.with_amount(1, 4).unwrap();
        let _ = cart.without(1).unwrap();

        assert_eq!(cart, before);
    }

    #[test]
    fn test_increment_and_set_amount() {
        let cart = Cart::new().with_new_line(product(1, 100));

        assert_eq!(cart.with_increment(1).unwrap().amount_of(1), 2);
        assert_eq!(cart.with_amount(1, 5).unwrap().amount_of(1), 5);
        assert_eq!(cart.with_increment(9), Err(CoreError::NotInCart(9)));
        assert_eq!(cart.with_amount(9, 2), Err(CoreError::NotInCart(9)));
        assert!(matches!(
            cart.with_amount(1, 0),
            Err(CoreError::Validation(ValidationError::MustBePositive { .. }))
        ));
    }

    #[test]
    fn test_without() {
        let cart = Cart::new()
            .with_new_line(product(1, 100))
            .with_new_line(product(2, 100));

        let removed = cart.without(1).unwrap();
        assert_eq!(removed.len(), 1);
        assert!(!removed.contains(1));
        assert!(removed.contains(2));

        assert_eq!(cart.without(7), Err(CoreError::NotInCart(7)));
    }

    #[test]
    fn test_totals() {
        let cart = Cart::new()
            .with_new_line(product(1, 17990))
            .with_new_line(product(2, 13990))
            .with_amount(2, 2)
            .unwrap();

        let totals = cart.totals();
        assert_eq!(totals.item_count, 2);
        assert_eq!(totals.total_quantity, 3);
        assert_eq!(totals.subtotal, Money::from_cents(45970));
        assert_eq!(totals.subtotal_formatted, "R$ 459,70");
    }

    #[test]
    fn test_json_is_bare_array() {
        let cart = Cart::new().with_new_line(product(1, 17990));
        let json = cart.to_json().unwrap();

        assert!(json.starts_with('['));
        assert!(json.contains(r#""imageUrl":"tenis1.jpg""#));
        assert_eq!(Cart::from_json(&json).unwrap(), cart);
    }

    #[test]
    fn test_from_json_rejects_broken_data() {
        assert!(Cart::from_json("not json").is_err());
        assert!(Cart::from_json(r#"{"id": 1}"#).is_err());

        let duplicate = r#"[
            {"id": 1, "name": "a", "price": 1, "imageUrl": "a", "amount": 1},
            {"id": 1, "name": "a", "price": 1, "imageUrl": "a", "amount": 2}
        ]"#;
        assert!(Cart::from_json(duplicate).is_err());

        let zero = r#"[{"id": 1, "name": "a", "price": 1, "imageUrl": "a", "amount": 0}]"#;
        assert!(Cart::from_json(zero).is_err());

        let huge = format!(
            r#"[{{"id": 1, "name": "a", "price": 1, "imageUrl": "a", "amount": {}}}]"#,
            i64::MAX
        );
        assert!(matches!(
            Cart::from_json(&huge),
            Err(CoreError::Validation(ValidationError::TooLarge { .. }))
        ));

        assert_eq!(Cart::from_json("[]").unwrap(), Cart::new());
    }

    #[test]
    fn test_increment_stops_at_line_maximum() {
        let cart = Cart::new()
            .with_new_line(product(1, 100))
            .with_amount(1, MAX_LINE_AMOUNT)
            .unwrap();

        assert!(matches!(
            cart.with_increment(1),
            Err(CoreError::Validation(ValidationError::TooLarge { .. }))
        ));
        assert!(cart.with_amount(1, MAX_LINE_AMOUNT + 1).is_err());
        assert_eq!(
            cart.with_new_line(product(1, 100)).amount_of(1),
            MAX_LINE_AMOUNT
        );
    }

    #[test]
    fn test_totals_with_extreme_price_saturate() {
        let json = r#"[{"id": 1, "name": "a", "price": 1e17, "imageUrl": "a", "amount": 2}]"#;
        let cart = Cart::from_json(json).unwrap();

        let totals = cart.totals();
        assert_eq!(totals.subtotal, Money::from_cents(i64::MAX));
        assert_eq!(totals.total_quantity, 2);
    }
}
