//! # Command Handlers
//!
//! ```text
//! commands/
//! ├── mod.rs        ◄─── Session (config + data files)
//! ├── sale.rs       ◄─── quote, sell, delete, history
//! ├── dashboard.rs  ◄─── stats, daily revenue
//! ├── report.rs     ◄─── day/month reports, CSV export
//! ├── booking.rs    ◄─── bulk-order bookings
//! ├── customer.rs   ◄─── customer directory
//! └── settings.rs   ◄─── pricing edits, config file
//! ```
//!
//! Handlers return the text to print so tests can assert on output without
//! capturing stdout. Mutating handlers load the sales file, apply one change
//! and write it back before returning.

pub mod booking;
pub mod customer;
pub mod dashboard;
pub mod report;
pub mod sale;
pub mod settings;

use std::path::PathBuf;

use tracing::debug;

use crate::config::{EnvOverrides, ShopConfig};
use crate::error::CliResult;
use crate::store::{JsonFile, SalesFile};

/// Everything a command needs: effective config and where data lives.
#[derive(Debug, Clone)]
pub struct Session {
    /// File config with `overrides` on top.
    pub config: ShopConfig,
    /// `--config` as given; `None` means the platform default.
    pub config_path: Option<PathBuf>,
    pub overrides: EnvOverrides,
    pub sales: SalesFile,
    pub bookings: JsonFile,
    pub customers: JsonFile,
}

impl Session {
    pub fn open(config_path: Option<PathBuf>, sales_path: Option<PathBuf>) -> CliResult<Self> {
        let overrides = EnvOverrides::from_env();
        let config = ShopConfig::load_or_default(config_path.clone(), &overrides);
        let sales = SalesFile::resolve(sales_path)?;
        debug!(sales = ?sales.path(), store = %config.store.name, "Session opened");

        Ok(Session {
            config,
            config_path,
            overrides,
            bookings: sales.sibling("bookings.json"),
            customers: sales.sibling("customers.json"),
            sales,
        })
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use parpu_core::PricingConfig;

    #[test]
    fn test_open_falls_back_on_malformed_config() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        std::fs::write(&config_path, "[pricing\nbase_price_cents = ").unwrap();

        let session = Session::open(Some(config_path), Some(dir.path().join("sales.json"))).unwrap();
        assert_eq!(session.config.pricing, PricingConfig::default());
        assert_eq!(session.bookings.path(), dir.path().join("bookings.json"));
        assert_eq!(session.customers.path(), dir.path().join("customers.json"));
    }
}
