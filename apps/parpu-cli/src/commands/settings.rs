//! # Settings Commands
//!
//! Pricing edits and the config file. Every edit is written back to the
//! config file immediately; recorded sales keep the prices they were sold at.
//!
//! ```text
//! config.toml ──► load_file ──► edit ──► save ──► config.toml
//!                                  │
//!                                  └──► with_overrides(PARPU_*) ──► session.config
//! ```
//!
//! Edits start from the file alone, so a `PARPU_*` override in effect for
//! this run is never written back.

use parpu_core::{Money, PricingConfig};
use tracing::{info, warn};

use super::Session;
use crate::config::ShopConfig;
use crate::error::{CliError, CliResult};

/// Base price plus bundles in quantity order.
pub fn show_pricing(session: &Session) -> String {
    let config = &session.config;
    let mut lines = vec![format!(
        "Base price  {} per piece",
        config.format_currency(config.pricing.base_price_cents)
    )];

    let promos = config.pricing.promos_by_quantity();
    if promos.is_empty() {
        lines.push("No bundle promos".to_string());
    }
    for promo in promos {
        lines.push(format!(
            "{:>3} pcs  {:>10}  [{}]",
            promo.quantity,
            config.format_currency(promo.price_cents),
            promo.id
        ));
    }

    lines.join("\n")
}

pub fn set_base_price(session: &mut Session, price: &str) -> CliResult<String> {
    let price = Money::parse_decimal(price)?;
    edit_pricing(session, |pricing| Ok(pricing.set_base_price(price)?))?;

    if let Some(value) = &session.overrides.base_price {
        warn!(value = %value, "PARPU_BASE_PRICE is set and still overrides the saved base price");
    }
    Ok(show_pricing(session))
}

pub fn add_promo(session: &mut Session, quantity: i64, price: &str) -> CliResult<String> {
    let price = Money::parse_decimal(price)?;
    let promo = edit_pricing(session, |pricing| Ok(pricing.add_promo(quantity, price)?))?;

    info!(promo_id = %promo.id, quantity, price = %price, "Promo saved");
    Ok(show_pricing(session))
}

pub fn remove_promo(session: &mut Session, id: &str) -> CliResult<String> {
    edit_pricing(session, |pricing| Ok(pricing.remove_promo(id)?))?;
    Ok(show_pricing(session))
}

pub fn reset_pricing(session: &mut Session) -> CliResult<String> {
    edit_pricing(session, |pricing| {
        pricing.restore_defaults();
        Ok(())
    })?;
    Ok(show_pricing(session))
}

/// Applies `edit` to the pricing in the config file, saves the file and
/// refreshes the session's effective config.
///
/// A malformed config file is an error here rather than being replaced.
fn edit_pricing<T, F>(session: &mut Session, edit: F) -> CliResult<T>
where
    F: FnOnce(&mut PricingConfig) -> CliResult<T>,
{
    let mut on_disk = ShopConfig::load_file(session.config_path.clone())?;
    let result = edit(&mut on_disk.pricing)?;
    on_disk.save(session.config_path.clone())?;

    session.config = on_disk.with_overrides(&session.overrides);
    Ok(result)
}

/// Effective config (file plus environment) as TOML.
pub fn show_config(session: &Session) -> CliResult<String> {
    Ok(toml::to_string_pretty(&session.config)?)
}

/// Writes a default config file unless one already exists.
pub fn init_config(session: &Session) -> CliResult<String> {
    let path = session
        .config_path
        .clone()
        .or_else(ShopConfig::default_config_path)
        .ok_or(CliError::NoDefaultPath("config"))?;

    if path.exists() {
        return Ok(format!("Config already exists at {}", path.display()));
    }

    let written = ShopConfig::default().save(Some(path))?;
    Ok(format!("Wrote default config to {}", written.display()))
}

// =============================================================================
// Unit Tests
// =============================================================================
