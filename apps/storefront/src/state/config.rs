//! # Storefront Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     KIRANA_CATALOG_SOURCE=https://shop.example/products.json           │
//! │     KIRANA_STOCK_POLICY=reject                                         │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     $KIRANA_CONFIG, or                                                 │
//! │     ~/.config/storefront/storefront.toml (Linux)                       │
//! │     ~/Library/Application Support/com.kirana.storefront/... (macOS)    │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     products.json, ₹, 1500ms / 500ms popup, oversell allowed           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # storefront.toml
//! [catalog]
//! source = "products.json"   # path, file:// URL or http(s) URL
//! timeout_secs = 10          # optional
//!
//! [popup]
//! show_ms = 1500
//! hide_ms = 500
//!
//! [currency]
//! symbol = "₹"
//! always_show_minor = false
//!
//! [cart]
//! stock_policy = "allow_oversell"   # allow_oversell | reject_oversell
//!
//! [display]
//! target = "console"   # console | log
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info, warn};

use kirana_catalog::{CatalogLoader, CatalogSource, DEFAULT_CATALOG};
use kirana_core::{CurrencyFormat, StockPolicy};

use crate::error::{ConfigError, ConfigResult};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "KIRANA_CONFIG";

// =============================================================================
// Catalog Settings
// =============================================================================

/// Where the product list comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSettings {
    /// Path, `file://` URL or `http(s)://` URL.
    #[serde(default = "default_catalog_source")]
    pub source: String,

    /// Upper bound on the load. Unset waits as long as the transport does.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_catalog_source() -> String {
    DEFAULT_CATALOG.to_string()
}

impl Default for CatalogSettings {
    fn default() -> Self {
        CatalogSettings {
            source: default_catalog_source(),
            timeout_secs: None,
        }
    }
}

impl CatalogSettings {
    pub fn parsed_source(&self) -> ConfigResult<CatalogSource> {
        self.source
            .parse()
            .map_err(|e: kirana_catalog::CatalogError| ConfigError::Invalid(e.to_string()))
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Builds the loader for the configured source.
    pub fn loader(&self) -> ConfigResult<CatalogLoader> {
        Ok(CatalogLoader::new(self.parsed_source()?).with_timeout(self.timeout()))
    }
}

// =============================================================================
// Popup Settings
// =============================================================================

/// Popup timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopupSettings {
    /// How long the popup stays fully shown (milliseconds).
    #[serde(default = "default_show_ms")]
    pub show_ms: u64,

    /// How long the hiding phase lasts before the popup is gone (milliseconds).
    #[serde(default = "default_hide_ms")]
    pub hide_ms: u64,
}

fn default_show_ms() -> u64 {
    1500
}

fn default_hide_ms() -> u64 {
    500
}

impl Default for PopupSettings {
    fn default() -> Self {
        PopupSettings {
            show_ms: default_show_ms(),
            hide_ms: default_hide_ms(),
        }
    }
}

impl PopupSettings {
    pub fn show_for(&self) -> Duration {
        Duration::from_millis(self.show_ms)
    }

    pub fn hide_for(&self) -> Duration {
        Duration::from_millis(self.hide_ms)
    }
}

// =============================================================================
// Cart Settings
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSettings {
    #[serde(default)]
    pub stock_policy: StockPolicy,
}

// =============================================================================
// Display Settings
// =============================================================================

/// Where the storefront regions are drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayTarget {
    /// Text regions on stdout.
    #[default]
    Console,

    /// Structured log events only, for hosts without a terminal.
    Log,
}

impl fmt::Display for DisplayTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayTarget::Console => write!(f, "console"),
            DisplayTarget::Log => write!(f, "log"),
        }
    }
}

impl FromStr for DisplayTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "console" | "stdout" => Ok(DisplayTarget::Console),
            "log" | "tracing" | "headless" => Ok(DisplayTarget::Log),
            other => Err(format!(
                "Unknown display target: '{}'. Valid options: console, log",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySettings {
    #[serde(default)]
    pub target: DisplayTarget,
}

// =============================================================================
// Main Storefront Configuration
// =============================================================================

/// Complete storefront configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    #[serde(default)]
    pub catalog: CatalogSettings,

    #[serde(default)]
    pub popup: PopupSettings,

    #[serde(default)]
    pub currency: CurrencyFormat,

    #[serde(default)]
    pub cart: CartSettings,

    #[serde(default)]
    pub display: DisplaySettings,
}

impl StorefrontConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (storefront.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading storefront config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = Self::from_toml(&contents)?;
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

    /// Parses a config file body. Missing sections take their defaults.
    pub fn from_toml(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        self.catalog.parsed_source()?;

        if self.catalog.timeout_secs == Some(0) {
            return Err(ConfigError::Invalid(
                "catalog.timeout_secs must be greater than 0".into(),
            ));
        }

        if self.currency.symbol.is_empty() {
            return Err(ConfigError::Invalid("currency.symbol must not be empty".into()));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies `KIRANA_*` overrides read through `lookup`.
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(source) = lookup("KIRANA_CATALOG_SOURCE") {
            debug!(source = %source, "Overriding catalog source from environment");
            self.catalog.source = source;
        }

        if let Some(policy) = lookup("KIRANA_STOCK_POLICY") {
            match policy.parse() {
                Ok(parsed) => self.cart.stock_policy = parsed,
                Err(_) => warn!(policy = %policy, "Unknown stock policy in environment"),
            }
        }

        if let Some(target) = lookup("KIRANA_DISPLAY") {
            match target.parse() {
                Ok(parsed) => self.display.target = parsed,
                Err(_) => warn!(display = %target, "Unknown display target in environment"),
            }
        }

        if let Some(symbol) = lookup("KIRANA_CURRENCY_SYMBOL") {
            self.currency.symbol = symbol;
        }

        if let Some(ms) = lookup("KIRANA_POPUP_SHOW_MS") {
            if let Ok(ms) = ms.parse::<u64>() {
                self.popup.show_ms = ms;
            }
        }

        if let Some(ms) = lookup("KIRANA_POPUP_HIDE_MS") {
            if let Ok(ms) = ms.parse::<u64>() {
                self.popup.hide_ms = ms;
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }

        directories::ProjectDirs::from("com", "kirana", "storefront")
            .map(|dirs| dirs.config_dir().join("storefront.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = StorefrontConfig::default();
        assert_eq!(config.catalog.source, "products.json");
        assert_eq!(config.catalog.timeout_secs, None);
        assert_eq!(config.popup.show_ms, 1500);
        assert_eq!(config.popup.hide_ms, 500);
        assert_eq!(config.currency.symbol, "₹");
        assert_eq!(config.cart.stock_policy, StockPolicy::AllowOversell);
        assert_eq!(config.display.target, DisplayTarget::Console);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = StorefrontConfig::from_toml(
            r#"
            [catalog]
            source = "https://shop.example/products.json"
            timeout_secs = 3

            [cart]
            stock_policy = "reject_oversell"

            [display]
            target = "log"
            "#,
        )
        .unwrap();

        assert_eq!(config.catalog.timeout(), Some(Duration::from_secs(3)));
        assert!(config.catalog.parsed_source().unwrap().is_remote());
        assert_eq!(config.cart.stock_policy, StockPolicy::RejectOversell);
        assert_eq!(config.display.target, DisplayTarget::Log);
        assert_eq!(config.popup, PopupSettings::default());
        assert_eq!(config.currency, CurrencyFormat::default());
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let err = StorefrontConfig::from_toml("[popup]\nshow_ms = \"soon\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_config_validation() {
        let mut config = StorefrontConfig::default();

        config.catalog.source = "ftp://shop.example/products.json".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        config.catalog.source = "products.json".to_string();
        config.catalog.timeout_secs = Some(0);
        assert!(config.validate().is_err());

        config.catalog.timeout_secs = None;
        config.currency.symbol = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overrides() {
        let mut config = StorefrontConfig::default();
        config.apply_overrides(lookup(&[
            ("KIRANA_CATALOG_SOURCE", "/srv/shop/catalog.json"),
            ("KIRANA_STOCK_POLICY", "strict"),
            ("KIRANA_CURRENCY_SYMBOL", "Rs."),
            ("KIRANA_DISPLAY", "headless"),
            ("KIRANA_POPUP_SHOW_MS", "200"),
            ("KIRANA_POPUP_HIDE_MS", "not-a-number"),
        ]));

        assert_eq!(config.catalog.source, "/srv/shop/catalog.json");
        assert_eq!(config.cart.stock_policy, StockPolicy::RejectOversell);
        assert_eq!(config.currency.symbol, "Rs.");
        assert_eq!(config.display.target, DisplayTarget::Log);
        assert_eq!(config.popup.show_ms, 200);
        // Unparseable values are ignored
        assert_eq!(config.popup.hide_ms, 500);
    }

    #[test]
    fn test_unknown_stock_policy_override_is_ignored() {
        let mut config = StorefrontConfig::default();
        config.apply_overrides(lookup(&[("KIRANA_STOCK_POLICY", "sometimes")]));
        assert_eq!(config.cart.stock_policy, StockPolicy::AllowOversell);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storefront.toml");
        let config = StorefrontConfig::load_or_default(Some(path));
        assert_eq!(config.popup, PopupSettings::default());
    }

    #[test]
    fn test_toml_serialization() {
        let toml_str = toml::to_string_pretty(&StorefrontConfig::default()).unwrap();
        assert!(toml_str.contains("[catalog]"));
        assert!(toml_str.contains("[popup]"));
        assert!(toml_str.contains("[currency]"));
    }
}
