//! # Cart Store
//!
//! The shopping cart shared by every view of the storefront session.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cart Operation                                   │
//! │                                                                         │
//! │  lock cart ──► stock lookup ──► check_stock ──► build next Cart         │
//! │      │              │                │               │                  │
//! │      │          transport        OutOfStock      (add: product          │
//! │      │           failure             │            lookup if new)        │
//! │      │              │                │               │                  │
//! │      │              ▼                ▼               ▼                  │
//! │      │         Rejected(op failure / OutOfStock)  persist next          │
//! │      │              │                                │                  │
//! │      │              │                      ok ◄──────┴────► failure     │
//! │      │              │                       │                 │         │
//! │      │              │               commit to memory   Rejected(op)     │
//! │      ▼              ▼                       ▼                 ▼         │
//! │  unlock ◄───────────┴───────────────────────┴─────────────────┘         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Guarantees
//! - The lock is held across the awaited lookups, so two operations on the
//!   same store never interleave their read-validate-write.
//! - Storage is written before memory. A failed write leaves both untouched.
//! - No error escapes an operation: every failure becomes a [`Notice`] on the
//!   notifier and an [`Outcome::Rejected`] for the caller.

use std::sync::Arc;

use rocket_core::validation::{add_target, check_stock};
use rocket_core::{Cart, CartTotals, Notice, Operation, ProductId};
use rocket_db::KeyValueStore;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::error::{CartError, CartResult};
use crate::inventory::InventoryApi;
use crate::notify::Notifier;

// =============================================================================
// Outcome
// =============================================================================

/// What a cart operation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "notice", rename_all = "snake_case")]
pub enum Outcome {
    /// The cart changed and was persisted.
    Committed,
    /// Nothing to do; cart untouched and nothing reported.
    Unchanged,
    /// The change did not happen; the notice was emitted.
    Rejected(Notice),
}

impl Outcome {
    pub fn is_rejected(&self) -> bool {
        matches!(self, Outcome::Rejected(_))
    }
}

/// Payload of the quantity field on the cart page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductAmount {
    pub product_id: ProductId,
    pub amount: i64,
}

// =============================================================================
// CartStore
// =============================================================================

/// Holds the session cart and applies the add/remove/update operations.
///
/// Construct once at startup with [`CartStore::load`] and share via `Arc`.
pub struct CartStore {
    cart: Mutex<Cart>,
    inventory: Arc<dyn InventoryApi>,
    storage: Arc<dyn KeyValueStore>,
    notifier: Arc<dyn Notifier>,
    storage_key: String,
}

impl CartStore {
    /// Creates the store, restoring the cart saved under `storage_key`.
    ///
    /// A missing entry gives an empty cart. An entry that does not decode is
    /// logged and also gives an empty cart; it is overwritten by the next
    /// committed operation.
    ///
    /// # Errors
    ///
    /// Returns error only if the storage read itself fails.
    pub async fn load(
        inventory: Arc<dyn InventoryApi>,
        storage: Arc<dyn KeyValueStore>,
        notifier: Arc<dyn Notifier>,
        storage_key: impl Into<String>,
    ) -> CartResult<Self> {
        let storage_key = storage_key.into();

        let cart = match storage.get(&storage_key).await? {
            Some(json) => match Cart::from_json(&json) {
                Ok(cart) => {
                    info!(key = %storage_key, lines = cart.len(), "Restored saved cart");
                    cart
                }
                Err(e) => {
                    warn!(key = %storage_key, error = %e, "Saved cart is unreadable, starting empty");
                    Cart::new()
                }
            },
            None => {
                debug!(key = %storage_key, "No saved cart, starting empty");
                Cart::new()
            }
        };

        Ok(CartStore {
            cart: Mutex::new(cart),
            inventory,
            storage,
            notifier,
            storage_key,
        })
    }

    /// Snapshot of the current cart.
    pub async fn cart(&self) -> Cart {
        self.cart.lock().await.clone()
    }

    /// Totals for the current cart.
    pub async fn totals(&self) -> CartTotals {
        self.cart.lock().await.totals()
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Adds one unit of a product.
    ///
    /// New products are looked up and appended with amount 1; products
    /// already in the cart are incremented. Fails with
    /// [`Notice::OutOfStock`] when the new amount exceeds stock.
    pub async fn add_product(&self, product_id: ProductId) -> Outcome {
        debug!(product_id, "add_product");

        let mut cart = self.cart.lock().await;
        let result = self.try_add(&cart, product_id).await.map(Some);
        self.settle(Operation::Add, product_id, &mut cart, result)
    }

    /// Removes a product's line. Fails with [`Notice::RemoveFailed`] when the
    /// product is not in the cart.
    pub async fn remove_product(&self, product_id: ProductId) -> Outcome {
        debug!(product_id, "remove_product");

        let mut cart = self.cart.lock().await;
        let result = self.try_remove(&cart, product_id).await.map(Some);
        self.settle(Operation::Remove, product_id, &mut cart, result)
    }

    /// Sets a product's amount.
    ///
    /// Amounts ≤ 0 are ignored. Fails with [`Notice::OutOfStock`] when the
    /// amount exceeds stock.
    pub async fn update_product_amount(&self, update: UpdateProductAmount) -> Outcome {
        let UpdateProductAmount { product_id, amount } = update;
        debug!(product_id, amount, "update_product_amount");

        let mut cart = self.cart.lock().await;
        let result = self.try_update(&cart, product_id, amount).await;
        self.settle(Operation::UpdateAmount, product_id, &mut cart, result)
    }

    async fn try_add(&self, cart: &Cart, product_id: ProductId) -> CartResult<Cart> {
        let stock = self.inventory.stock(product_id).await?;
        add_target(product_id, cart.amount_of(product_id), &stock)?;

        let next = if cart.contains(product_id) {
            cart.with_increment(product_id)?
        } else {
            let product = self.inventory.product(product_id).await?;
            cart.with_new_line(product)
        };

        self.persist(&next).await?;
        Ok(next)
    }

    async fn try_remove(&self, cart: &Cart, product_id: ProductId) -> CartResult<Cart> {
        let next = cart.without(product_id)?;
        self.persist(&next).await?;
        Ok(next)
    }

    async fn try_update(
        &self,
        cart: &Cart,
        product_id: ProductId,
        amount: i64,
    ) -> CartResult<Option<Cart>> {
        if amount <= 0 {
            debug!(product_id, amount, "Ignoring non-positive amount");
            return Ok(None);
        }

        let stock = self.inventory.stock(product_id).await?;
        check_stock(product_id, amount, &stock)?;

        if !cart.contains(product_id) {
            // Possible latent bug: the user gets no feedback here. Kept silent
            // to match what the storefront expects today.
            debug!(product_id, "Product not in cart, nothing to update");
            return Ok(None);
        }

        let next = cart.with_amount(product_id, amount)?;
        self.persist(&next).await?;
        Ok(Some(next))
    }

    async fn persist(&self, cart: &Cart) -> CartResult<()> {
        let json = cart.to_json()?;
        self.storage.set(&self.storage_key, &json).await?;
        Ok(())
    }

    /// Commits a successful result to memory or reports a failure.
    fn settle(
        &self,
        op: Operation,
        product_id: ProductId,
        cart: &mut Cart,
        result: CartResult<Option<Cart>>,
    ) -> Outcome {
        match result {
            Ok(Some(next)) => {
                *cart = next;
                info!(
                    %op,
                    product_id,
                    amount = cart.amount_of(product_id),
                    lines = cart.len(),
                    "Cart updated"
                );
                Outcome::Committed
            }
            Ok(None) => Outcome::Unchanged,
            Err(err) => {
                let notice = err.notice(op);
                match &err {
                    CartError::Storage(_) | CartError::Serialization(_) => {
                        error!(%op, product_id, error = %err, "Failed to persist cart")
                    }
                    _ if err.is_rejection() => {
                        warn!(%op, product_id, error = %err, "Cart change rejected")
                    }
                    _ => warn!(%op, product_id, error = %err, "Cart operation failed"),
                }
                self.notifier.notify(notice);
                Outcome::Rejected(notice)
            }
        }
    }
}
