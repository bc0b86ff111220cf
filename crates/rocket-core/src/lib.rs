//! # rocket-core: Pure Domain Logic for the RocketShoes Cart
//!
//! This crate holds the cart's domain model and rules as pure functions with
//! zero I/O dependencies. The service crate (`rocket-cart`) performs the
//! network reads and storage writes and calls in here to decide what the new
//! cart looks like.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     RocketShoes Cart Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Storefront UI                                │   │
//! │  │    Product grid ──► Cart page ──► Header badge                  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ add / remove / update                  │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 rocket-cart (CartStore)                         │   │
//! │  │    stock lookup ──► validate ──► persist ──► commit             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ rocket-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │   Cart    │  │   stock   │  │   │
//! │  │   │   Stock   │  │  (cents)  │  │  Totals   │  │   checks  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Wire types (Product, Stock)
//! - [`money`] - Money type with integer arithmetic
//! - [`cart`] - The ordered cart and its derived totals
//! - [`notice`] - User-facing notification messages
//! - [`validation`] - Stock and amount rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use rocket_core::{Cart, Product, Stock, Money};
//! use rocket_core::validation::check_stock;
//!
//! let mut cart = Cart::new();
//! let stock = Stock { id: 1, amount: 5 };
//!
//! let target = cart.amount_of(1) + 1;
//! check_stock(1, target, &stock).unwrap();
//!
//! let product = Product::new(1, "Tênis Runner", Money::from_cents(17990), "runner.jpg");
//! cart = cart.with_new_line(product);
//! assert_eq!(cart.amount_of(1), 1);
//! ```

pub mod cart;
pub mod error;
pub mod money;
pub mod notice;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartTotals};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use notice::{Notice, Operation};
pub use types::*;

/// Storage key the cart is persisted under.
///
/// Namespaced with the storefront name so several apps can share one store.
pub const CART_STORAGE_KEY: &str = "@RocketShoes:cart";
