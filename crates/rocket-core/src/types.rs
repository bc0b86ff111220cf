//! # Domain Types
//!
//! The two records the inventory service hands us.
//!
//! ## Wire Shapes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Inventory Records                               │
//! │                                                                         │
//! │  GET /products/{id}                    GET /stock/{id}                  │
//! │  ┌─────────────────────────┐           ┌─────────────────────────┐      │
//! │  │    Product              │           │    Stock                │      │
//! │  │  ─────────────────────  │           │  ─────────────────────  │      │
//! │  │  id        1            │           │  id        1            │      │
//! │  │  name      "Tênis ..."  │           │  amount    5            │      │
//! │  │  price     179.9        │           └─────────────────────────┘      │
//! │  │  imageUrl  "https://.." │                                            │
//! │  │  amount    (absent)     │ ◄── set by the cart, not the API          │
//! │  └─────────────────────────┘                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The same `Product` shape is what the cart persists, with `amount` filled
//! in with the quantity held.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::{self, Money};

/// Numeric product identifier assigned by the inventory service.
pub type ProductId = u32;

// =============================================================================
// Product
// =============================================================================

/// A product, either as returned by the product lookup or as a cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Inventory identifier.
    pub id: ProductId,

    /// Display name. Older inventory payloads call this `title`.
    #[serde(alias = "title")]
    pub name: String,

    /// Unit price.
    #[serde(with = "money::decimal")]
    #[ts(type = "number")]
    pub price: Money,

    /// Product image. Older inventory payloads call this `image`.
    #[serde(alias = "image")]
    pub image_url: String,

    /// Quantity held in the cart. Absent in product lookups.
    #[serde(default)]
    #[ts(type = "number")]
    pub amount: i64,
}

impl Product {
    /// Creates a product with no quantity in the cart.
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        price: Money,
        image_url: impl Into<String>,
    ) -> Self {
        Product {
            id,
            name: name.into(),
            price,
            image_url: image_url.into(),
            amount: 0,
        }
    }

    /// Returns a copy carrying the given cart quantity.
    pub fn with_amount(mut self, amount: i64) -> Self {
        self.amount = amount;
        self
    }

    /// Price × amount for this line.
    #[inline]
    pub fn subtotal(&self) -> Money {
        self.price.multiply_quantity(self.amount)
    }
}

// =============================================================================
// Stock
// =============================================================================

/// Quantity available for a product at lookup time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Stock {
    /// Inventory identifier.
    pub id: ProductId,

    /// Units available.
    #[ts(type = "number")]
    pub amount: i64,
}
