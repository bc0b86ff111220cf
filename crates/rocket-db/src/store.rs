//! # Key-Value Store
//!
//! The seam between the cart and its persistence medium: string keys to
//! string values, nothing else. The cart encodes itself to JSON before it
//! reaches this layer.

use async_trait::async_trait;

use crate::error::DbResult;

/// A durable string-keyed store.
///
/// ## Implementations
/// - [`Database`](crate::Database) / [`KeyValueRepository`](crate::KeyValueRepository) - SQLite
/// - [`MemoryStore`](crate::MemoryStore) - process memory, for tests
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the value saved under `key`, or `None` if nothing was saved.
    async fn get(&self, key: &str) -> DbResult<Option<String>>;

    /// Saves `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> DbResult<()>;
}
