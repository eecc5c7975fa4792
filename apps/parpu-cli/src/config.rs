//! # Shop Configuration
//!
//! Store identity and the pricing board, persisted as TOML.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     PARPU_STORE_NAME="Kacang Parpu Pak Mat"                            │
//! │     PARPU_CURRENCY_SYMBOL=RM                                           │
//! │     PARPU_BASE_PRICE=3.50                                              │
//! │                                                                         │
//! │  2. TOML Config File (--config, or the platform config dir)            │
//! │     ~/.config/pos/config.toml (Linux)                                  │
//! │     ~/Library/Application Support/com.parpu.pos/config.toml (macOS)    │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     RM 3.00 per piece, 2 for RM 5.00, 4 for RM 10.00                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [store]
//! name = "Kacang Parpu"
//! currency_symbol = "RM"
//!
//! [pricing]
//! base_price_cents = 300
//!
//! [[pricing.promos]]
//! id = "1"
//! quantity = 2
//! price_cents = 500
//! ```

use std::collections::HashSet;
use std::path::PathBuf;

use parpu_core::validation::{validate_base_price_cents, validate_promo_rule};
use parpu_core::{Money, PricingConfig};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{CliError, CliResult};

// =============================================================================
// Store Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSettings {
    #[serde(default = "default_store_name")]
    pub name: String,

    /// Printed before every amount, e.g. `"RM"`.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_store_name() -> String {
    "Kacang Parpu".to_string()
}

fn default_currency_symbol() -> String {
    "RM".to_string()
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            name: default_store_name(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

// =============================================================================
// Shop Configuration
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopConfig {
    #[serde(default)]
    pub store: StoreSettings,

    #[serde(default)]
    pub pricing: PricingConfig,
}

// =============================================================================
// Environment Overrides
// =============================================================================

/// `PARPU_*` values captured once at startup.
///
/// Kept apart from the file so that pricing edits never write an override
/// back to disk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverrides {
    pub store_name: Option<String>,
    pub currency_symbol: Option<String>,
    pub base_price: Option<String>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        EnvOverrides {
            store_name: lookup("PARPU_STORE_NAME"),
            currency_symbol: lookup("PARPU_CURRENCY_SYMBOL"),
            base_price: lookup("PARPU_BASE_PRICE"),
        }
    }
}

impl ShopConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (config.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>, overrides: &EnvOverrides) -> CliResult<Self> {
        let config = Self::load_file(config_path)?.with_overrides(overrides);
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>, overrides: &EnvOverrides) -> Self {
        Self::load(config_path, overrides).unwrap_or_else(|e| {
            warn!("Failed to load shop config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Defaults plus the config file, without environment overrides.
    ///
    /// This is what pricing edits start from and write back.
    pub fn load_file(config_path: Option<PathBuf>) -> CliResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading shop config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to file, creating parent directories.
    pub fn save(&self, config_path: Option<PathBuf>) -> CliResult<PathBuf> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or(CliError::NoDefaultPath("config"))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Shop config saved");
        Ok(path)
    }

    pub fn validate(&self) -> CliResult<()> {
        if self.store.currency_symbol.trim().is_empty() {
            return Err(CliError::InvalidConfig(
                "currency_symbol must not be empty".into(),
            ));
        }

        validate_base_price_cents(self.pricing.base_price_cents)?;

        let mut seen = HashSet::new();
        for promo in &self.pricing.promos {
            validate_promo_rule(promo.quantity, promo.price_cents)?;
            if !seen.insert(promo.id.as_str()) {
                return Err(CliError::InvalidConfig(format!(
                    "duplicate promo id '{}'",
                    promo.id
                )));
            }
        }

        Ok(())
    }

    /// A copy of this config with `overrides` applied on top.
    pub fn with_overrides(&self, overrides: &EnvOverrides) -> Self {
        let mut config = self.clone();

        if let Some(name) = &overrides.store_name {
            debug!(store_name = %name, "Overriding store name from environment");
            config.store.name = name.clone();
        }

        if let Some(symbol) = &overrides.currency_symbol {
            config.store.currency_symbol = symbol.clone();
        }

        if let Some(price) = &overrides.base_price {
            match Money::parse_decimal(price) {
                Ok(money) => {
                    debug!(base_price = %money, "Overriding base price from environment");
                    config.pricing.base_price_cents = money.cents();
                }
                Err(e) => warn!(value = %price, error = %e, "Ignoring PARPU_BASE_PRICE"),
            }
        }

        config
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "parpu", "pos")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Formats an amount in cents for display.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = ShopConfig::default();
    /// assert_eq!(config.format_currency(1234), "RM 12.34");
    /// assert_eq!(config.format_currency(-550), "-RM 5.50");
    /// ```
    pub fn format_currency(&self, cents: i64) -> String {
        format!(
            "{}{} {}",
            if cents < 0 { "-" } else { "" },
            self.store.currency_symbol,
            Money::from_cents(cents.saturating_abs())
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

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
    fn test_default_config() {
        let config = ShopConfig::default();
        assert_eq!(config.store.currency_symbol, "RM");
        assert_eq!(config.pricing, PricingConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_format_currency() {
        let config = ShopConfig::default();
        assert_eq!(config.format_currency(1234), "RM 12.34");
        assert_eq!(config.format_currency(500), "RM 5.00");
        assert_eq!(config.format_currency(0), "RM 0.00");
        assert_eq!(config.format_currency(-550), "-RM 5.50");
    }

    #[test]
    fn test_env_overrides() {
        let overrides = EnvOverrides::from_lookup(env(&[
            ("PARPU_STORE_NAME", "Pak Mat"),
            ("PARPU_CURRENCY_SYMBOL", "$"),
            ("PARPU_BASE_PRICE", "3.50"),
        ]));
        let file = ShopConfig::default();
        let config = file.with_overrides(&overrides);

        assert_eq!(config.store.name, "Pak Mat");
        assert_eq!(config.format_currency(350), "$ 3.50");
        assert_eq!(config.pricing.quote(1).total_cents, 350);
        assert_eq!(file, ShopConfig::default());
    }

    #[test]
    fn test_bad_base_price_override_is_ignored() {
        let overrides = EnvOverrides::from_lookup(env(&[("PARPU_BASE_PRICE", "three")]));
        let config = ShopConfig::default().with_overrides(&overrides);
        assert_eq!(config.pricing.base_price_cents, 300);
    }

    #[test]
    fn test_load_file_ignores_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[pricing]\nbase_price_cents = 350\n").unwrap();

        let overrides = EnvOverrides::from_lookup(env(&[("PARPU_BASE_PRICE", "1.00")]));
        let effective = ShopConfig::load(Some(path.clone()), &overrides).unwrap();
        assert_eq!(effective.pricing.base_price_cents, 100);

        let on_disk = ShopConfig::load_file(Some(path)).unwrap();
        assert_eq!(on_disk.pricing.base_price_cents, 350);
    }

    #[test]
    fn test_validation() {
        let mut config = ShopConfig::default();
        config.pricing.base_price_cents = -1;
        assert!(config.validate().is_err());

        let mut config = ShopConfig::default();
        config.pricing.promos[1].id = "1".to_string();
        assert!(matches!(config.validate(), Err(CliError::InvalidConfig(_))));

        let mut config = ShopConfig::default();
        config.pricing.promos[0].quantity = 0;
        assert!(matches!(config.validate(), Err(CliError::Validation(_))));

        let mut config = ShopConfig::default();
        config.store.currency_symbol = " ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_serialization() {
        let config = ShopConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[store]"));
        assert!(toml_str.contains("[[pricing.promos]]"));

        let parsed: ShopConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let parsed: ShopConfig = toml::from_str(
            r#"
            [pricing]
            base_price_cents = 350
            "#,
        )
        .unwrap();

        assert_eq!(parsed.store, StoreSettings::default());
        assert_eq!(parsed.pricing.base_price_cents, 350);
        assert_eq!(parsed.pricing.promos.len(), 2);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = ShopConfig::default();
        config.store.name = "Gerai Parpu".to_string();
        config.pricing.add_promo(10, Money::from_cents(2500)).unwrap();

        let written = config.save(Some(path.clone())).unwrap();
        assert_eq!(written, path);

        let contents = std::fs::read_to_string(&path).unwrap();
        let loaded: ShopConfig = toml::from_str(&contents).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[pricing\nbase_price_cents = ").unwrap();

        assert!(matches!(
            ShopConfig::load(Some(path.clone()), &EnvOverrides::default()),
            Err(CliError::ConfigParse(_))
        ));
        assert!(matches!(
            ShopConfig::load_file(Some(path)),
            Err(CliError::ConfigParse(_))
        ));
    }

    #[test]
    fn test_load_or_default_falls_back_on_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[pricing\nbase_price_cents = ").unwrap();

        let config = ShopConfig::load_or_default(Some(path.clone()), &EnvOverrides::default());
        assert_eq!(config, ShopConfig::default());

        // The broken file is left for the user to fix
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "[pricing\nbase_price_cents = "
        );
    }

    #[test]
    fn test_load_or_default_falls_back_on_invalid_override() {
        let overrides = EnvOverrides::from_lookup(env(&[("PARPU_CURRENCY_SYMBOL", "  ")]));
        let dir = tempfile::tempdir().unwrap();

        let config = ShopConfig::load_or_default(Some(dir.path().join("none.toml")), &overrides);
        assert_eq!(config.store.currency_symbol, "RM");
    }
}
