//! # Repositories
//!
//! SQL-backed data access. Each repository owns a clone of the pool.
//!
//! - [`key_value`] - `key_value_store` table (the persisted cart)

pub mod key_value;
