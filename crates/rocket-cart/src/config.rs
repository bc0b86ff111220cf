//! # Cart Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     ROCKET_API_URL=http://192.168.0.10:3333                            │
//! │     ROCKET_API_TIMEOUT_SECS=10                                         │
//! │     ROCKET_STORAGE_KEY=@RocketShoes:cart                               │
//! │     ROCKET_DB_PATH=/var/lib/rocketshoes/cart.db                        │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/cart/cart.toml (Linux)                                   │
//! │     ~/Library/Application Support/com.rocketshoes.cart/cart.toml       │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     http://localhost:3333, no timeout, platform data dir               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # cart.toml
//! [inventory]
//! base_url = "http://localhost:3333"
//! timeout_secs = 10  # absent = no timeout
//!
//! [storage]
//! key = "@RocketShoes:cart"
//! database_path = "/path/to/cart.db"  # absent = platform data dir
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};
use url::Url;

use rocket_core::CART_STORAGE_KEY;

use crate::error::ConfigError;

/// Default inventory service location (the storefront's dev API).
pub const DEFAULT_BASE_URL: &str = "http://localhost:3333";

// =============================================================================
// Sections
// =============================================================================

/// Inventory service settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryConfig {
    /// Base URL the `/stock` and `/products` paths hang off.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds. `None` waits indefinitely.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

/// Persisted cart settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Key the cart JSON is stored under.
    #[serde(default = "default_storage_key")]
    pub key: String,

    /// SQLite file. `None` uses the platform data directory.
    #[serde(default)]
    pub database_path: Option<PathBuf>,
}

fn default_storage_key() -> String {
    CART_STORAGE_KEY.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            key: default_storage_key(),
            database_path: None,
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete cart configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartConfig {
    #[serde(default)]
    pub inventory: InventoryConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

impl CartConfig {
    /// Loads configuration from file, then applies environment overrides.
    ///
    /// A missing file is not an error; defaults are used.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading cart config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Checks the values that would otherwise fail on first use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.inventory.base_url).map_err(|e| {
            ConfigError::Invalid(format!(
                "inventory.base_url '{}': {e}",
                self.inventory.base_url
            ))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid(format!(
                "inventory.base_url must be http or https, got '{}'",
                url.scheme()
            )));
        }

        if self.inventory.timeout_secs == Some(0) {
            return Err(ConfigError::Invalid(
                "inventory.timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.storage.key.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "storage.key must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// SQLite file to open: the configured path or the platform default.
    pub fn database_path(&self) -> Option<PathBuf> {
        self.storage
            .database_path
            .clone()
            .or_else(Self::default_database_path)
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var("ROCKET_API_URL") {
            debug!(url = %url, "Overriding inventory URL from environment");
            self.inventory.base_url = url;
        }

        if let Some(secs) = var("ROCKET_API_TIMEOUT_SECS") {
            match secs.parse::<u64>() {
                Ok(s) => self.inventory.timeout_secs = Some(s),
                Err(_) => warn!(value = %secs, "Ignoring non-numeric ROCKET_API_TIMEOUT_SECS"),
            }
        }

        if let Some(key) = var("ROCKET_STORAGE_KEY") {
            self.storage.key = key;
        }

        if let Some(path) = var("ROCKET_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.storage.database_path = Some(PathBuf::from(path));
        }
    }

    /// `cart.toml` in the platform config directory.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "rocketshoes", "cart")
            .map(|dirs| dirs.config_dir().join("cart.toml"))
    }

    fn default_database_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "rocketshoes", "cart")
            .map(|dirs| dirs.data_dir().join("cart.db"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = CartConfig::default();
        assert_eq!(config.inventory.base_url, "http://localhost:3333");
        assert_eq!(config.inventory.timeout_secs, None);
        assert_eq!(config.storage.key, "@RocketShoes:cart");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = CartConfig::default();

        config.inventory.base_url = "ftp://inventory".to_string();
        assert!(config.validate().is_err());

        config.inventory.base_url = "not a url".to_string();
        assert!(config.validate().is_err());

        config.inventory.base_url = "https://api.rocketshoes.com.br".to_string();
        assert!(config.validate().is_ok());

        config.inventory.timeout_secs = Some(0);
        assert!(config.validate().is_err());
        config.inventory.timeout_secs = Some(10);

        config.storage.key = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: CartConfig = toml::from_str(
            r#"
            [inventory]
            timeout_secs = 7
            "#,
        )
        .unwrap();

        assert_eq!(config.inventory.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.inventory.timeout_secs, Some(7));
        assert_eq!(config.storage, StorageConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.toml");
        std::fs::write(
            &path,
            r#"
            [inventory]
            base_url = "http://inventory.local:4000"

            [storage]
            key = "@RocketShoes:test"
            database_path = "/tmp/rocket-test.db"
            "#,
        )
        .unwrap();

        let mut config: CartConfig =
            toml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        config.apply_overrides(|_| None);

        assert_eq!(config.inventory.base_url, "http://inventory.local:4000");
        assert_eq!(config.storage.key, "@RocketShoes:test");
        assert_eq!(
            config.database_path(),
            Some(PathBuf::from("/tmp/rocket-test.db"))
        );
    }

    #[test]
    fn test_load_rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.toml");
        std::fs::write(&path, "[inventory\nbase_url = ").unwrap();

        assert!(matches!(
            CartConfig::load(Some(path)),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("ROCKET_API_URL", "http://10.0.0.5:3333"),
            ("ROCKET_API_TIMEOUT_SECS", "15"),
            ("ROCKET_STORAGE_KEY", "@RocketShoes:kiosk"),
            ("ROCKET_DB_PATH", "/data/cart.db"),
        ]
        .into_iter()
        .collect();

        let mut config = CartConfig::default();
        config.apply_overrides(|name| env.get(name).map(|v| v.to_string()));

        assert_eq!(config.inventory.base_url, "http://10.0.0.5:3333");
        assert_eq!(config.inventory.timeout_secs, Some(15));
        assert_eq!(config.storage.key, "@RocketShoes:kiosk");
        assert_eq!(
            config.storage.database_path,
            Some(PathBuf::from("/data/cart.db"))
        );
    }

    #[test]
    fn test_bad_timeout_override_is_ignored() {
        let mut config = CartConfig::default();
        config.apply_overrides(|name| {
            (name == "ROCKET_API_TIMEOUT_SECS").then(|| "soon".to_string())
        });
        assert_eq!(config.inventory.timeout_secs, None);
    }

    #[test]
    fn test_toml_serialization() {
        let config = CartConfig::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        let parsed: CartConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, config);
    }
}
