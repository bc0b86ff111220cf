//! # Key-Value Repository
//!
//! Database operations on the `key_value_store` table.
//!
//! ## Table
//! ```text
//! ┌──────────────────────┬────────────────────────────┬──────────────────────┐
//! │ key (PK)             │ value                      │ updated_at           │
//! ├──────────────────────┼────────────────────────────┼──────────────────────┤
//! │ @RocketShoes:cart    │ [{"id":1,"amount":2,...}]  │ 2026-10-19T12:00:00Z │
//! └──────────────────────┴────────────────────────────┴──────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;

/// Repository for the key-value table.
#[derive(Debug, Clone)]
pub struct KeyValueRepository {
    pool: SqlitePool,
}

impl KeyValueRepository {
    /// Creates a new KeyValueRepository.
    pub fn new(pool: SqlitePool) -> Self {
        KeyValueRepository { pool }
    }

    /// Reads the value stored under `key`.
    pub async fn get(&self, key: &str) -> DbResult<Option<String>> {
        debug!(key = %key, "Reading stored value");

        let value: Option<String> =
            sqlx::query_scalar("SELECT value FROM key_value_store WHERE key = ?1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        Ok(value)
    }

    /// Upserts the value stored under `key`.
    pub async fn set(&self, key: &str, value: &str) -> DbResult<()> {
        debug!(key = %key, bytes = value.len(), "Writing stored value");

        sqlx::query(
            r#"
            INSERT INTO key_value_store (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn test_get_missing_key() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert_eq!(db.key_values().get("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_then_overwrite() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.key_values();

        repo.set("@RocketShoes:cart", "[]").await.unwrap();
        repo.set("@RocketShoes:cart", r#"[{"id":1}]"#).await.unwrap();

        assert_eq!(
            repo.get("@RocketShoes:cart").await.unwrap().as_deref(),
            Some(r#"[{"id":1}]"#)
        );
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.key_values();

        repo.set("a", "1").await.unwrap();
        repo.set("b", "2").await.unwrap();

        assert_eq!(repo.get("a").await.unwrap().as_deref(), Some("1"));
        assert_eq!(repo.get("b").await.unwrap().as_deref(), Some("2"));
    }
}
