//! # Storefront Configuration
//!
//! ## Load Order (later overrides earlier)
//! ```text
//! ┌────────────────┐   ┌──────────────────────┐   ┌──────────────────────┐
//! │ 1. Defaults    │──►│ 2. storefront.toml   │──►│ 3. BOOKSTORE_* env   │──► validate()
//! └────────────────┘   └──────────────────────┘   └──────────────────────┘
//! ```
//!
//! ## Environment Variables
//! | Variable | Field | Example |
//! |---|---|---|
//! | `BOOKSTORE_API_URL` | `api.base_url` | `http://localhost:82/api` |
//! | `BOOKSTORE_TAX_RATE` | `cart.tax_rate_bps` (given as a percent) | `8.25` |
//! | `BOOKSTORE_PERSIST_CART` | `cart.persist` | `false` |
//! | `BOOKSTORE_DATA_DIR` | `cart.data_dir` | `/var/lib/bookstore` |

use std::path::PathBuf;
use std::time::Duration;

use bookstore_catalog::DEFAULT_API_BASE_URL;
use bookstore_core::TaxRate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{StorefrontError, StorefrontResult};

// =============================================================================
// API Settings
// =============================================================================

/// Where the catalog API lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout. Unset means the transport's own behavior.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

impl ApiSettings {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

// =============================================================================
// Cart Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSettings {
    /// Basis points: 1000 = 10%.
    #[serde(default = "default_tax_rate_bps")]
    pub tax_rate_bps: u32,

    /// Keep the cart between runs.
    #[serde(default = "default_true")]
    pub persist: bool,

    /// Where the persisted cart lives. Defaults to the platform data dir.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

fn default_tax_rate_bps() -> u32 {
    TaxRate::STANDARD.bps()
}

fn default_true() -> bool {
    true
}

impl Default for CartSettings {
    fn default() -> Self {
        CartSettings {
            tax_rate_bps: default_tax_rate_bps(),
            persist: true,
            data_dir: None,
        }
    }
}

// =============================================================================
// Storefront Config
// =============================================================================

/// Complete storefront configuration.
///
/// ## Example Config File
/// ```toml
/// [api]
/// base_url = "http://localhost:82/api"
/// timeout_secs = 10
///
/// [cart]
/// tax_rate_bps = 1000
/// persist = true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub cart: CartSettings,
}

impl StorefrontConfig {
    /// Loads defaults, then the config file, then the environment.
    pub fn load(config_path: Option<PathBuf>) -> StorefrontResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading storefront config from file");
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

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load storefront config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Writes the config as TOML, creating parent directories.
    pub fn save(&self, config_path: Option<PathBuf>) -> StorefrontResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| StorefrontError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Storefront config saved");
        Ok(())
    }

    pub fn validate(&self) -> StorefrontResult<()> {
        let url = &self.api.base_url;
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(StorefrontError::InvalidUrl(format!(
                "API URL must start with http:// or https://, got: {}",
                url
            )));
        }

        if self.cart.tax_rate_bps > 10_000 {
            return Err(StorefrontError::InvalidConfig(format!(
                "tax_rate_bps must be at most 10000, got: {}",
                self.cart.tax_rate_bps
            )));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies `BOOKSTORE_*` overrides read through `var`. Unparseable
    /// values are logged and skipped.
    pub fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var("BOOKSTORE_API_URL") {
            debug!(url = %url, "Overriding API URL from environment");
            self.api.base_url = url;
        }

        if let Some(rate) = var("BOOKSTORE_TAX_RATE") {
            match rate.trim().parse::<f64>() {
                Ok(pct) if pct.is_finite() && pct >= 0.0 => {
                    self.cart.tax_rate_bps = TaxRate::from_percentage(pct).bps();
                }
                _ => warn!(rate = %rate, "Ignoring invalid BOOKSTORE_TAX_RATE"),
            }
        }

        if let Some(persist) = var("BOOKSTORE_PERSIST_CART") {
            match persist.to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.cart.persist = true,
                "0" | "false" | "no" | "off" => self.cart.persist = false,
                _ => warn!(value = %persist, "Ignoring invalid BOOKSTORE_PERSIST_CART"),
            }
        }

        if let Some(dir) = var("BOOKSTORE_DATA_DIR") {
            self.cart.data_dir = Some(PathBuf::from(dir));
        }
    }

    /// `<config dir>/storefront.toml`.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "bookstore", "storefront")
            .map(|dirs| dirs.config_dir().join("storefront.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    pub fn tax_rate(&self) -> TaxRate {
        TaxRate::from_bps(self.cart.tax_rate_bps)
    }

    /// Directory for the persisted cart, if persistence is on and a
    /// directory can be found.
    pub fn data_dir(&self) -> Option<PathBuf> {
        if !self.cart.persist {
            return None;
        }
        self.cart.data_dir.clone().or_else(|| {
            directories::ProjectDirs::from("com", "bookstore", "storefront")
                .map(|dirs| dirs.data_dir().to_path_buf())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = StorefrontConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:82/api");
        assert_eq!(config.tax_rate(), TaxRate::STANDARD);
        assert!(config.cart.persist);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: StorefrontConfig = toml::from_str("[cart]\npersist = false\n").unwrap();
        assert!(!config.cart.persist);
        assert_eq!(config.cart.tax_rate_bps, 1000);
        assert_eq!(config.api, ApiSettings::default());
        assert_eq!(config.data_dir(), None);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = StorefrontConfig::default();
        config.apply_overrides(env(&[
            ("BOOKSTORE_API_URL", "https://books.example.com/api"),
            ("BOOKSTORE_TAX_RATE", "8.25"),
            ("BOOKSTORE_PERSIST_CART", "off"),
            ("BOOKSTORE_DATA_DIR", "/tmp/bookstore"),
        ]));

        assert_eq!(config.api.base_url, "https://books.example.com/api");
        assert_eq!(config.cart.tax_rate_bps, 825);
        assert!(!config.cart.persist);
        assert_eq!(config.cart.data_dir, Some(PathBuf::from("/tmp/bookstore")));
    }

    #[test]
    fn test_invalid_env_values_are_ignored() {
        let mut config = StorefrontConfig::default();
        config.apply_overrides(env(&[
            ("BOOKSTORE_TAX_RATE", "lots"),
            ("BOOKSTORE_PERSIST_CART", "maybe"),
        ]));
        assert_eq!(config, StorefrontConfig::default());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = StorefrontConfig::default();
        config.api.base_url = "ftp://books".to_string();
        assert!(matches!(config.validate(), Err(StorefrontError::InvalidUrl(_))));

        let mut config = StorefrontConfig::default();
        config.cart.tax_rate_bps = 10_001;
        assert!(matches!(config.validate(), Err(StorefrontError::InvalidConfig(_))));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conf/storefront.toml");

        let mut config = StorefrontConfig::default();
        config.api.timeout_secs = Some(5);
        config.cart.data_dir = Some(dir.path().join("data"));
        config.save(Some(path.clone())).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let loaded: StorefrontConfig = toml::from_str(&contents).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.api.timeout(), Some(Duration::from_secs(5)));
        assert_eq!(loaded.data_dir(), Some(dir.path().join("data")));
    }
}
