//! # Pricing Configuration
//!
//! The caller-owned object holding the current base price and bundle list.
//!
//! ## Why Not a Global?
//! Pricing is threaded into [`crate::pricing::quote`] at call time. The host
//! owns one `PricingConfig`, edits it from the settings screen, and passes it
//! (or its parts) to every quote. Nothing in this crate holds pricing state.
//!
//! ## Official Pricing
//! ```text
//! ┌───────────────────────────────┐
//! │  1 pc   ........  RM  3.00    │
//! │  2 pcs  ........  RM  5.00    │
//! │  4 pcs  ........  RM 10.00    │
//! └───────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::pricing::{quote, PriceQuote};
use crate::types::PromoRule;
use crate::validation::{validate_base_price_cents, validate_promo_rule};

/// Official unit price in cents (RM 3.00).
pub const OFFICIAL_BASE_PRICE_CENTS: i64 = 300;

/// Missing fields fall back to the official board; an explicit empty
/// `promos` list disables bundles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct PricingConfig {
    /// Standard unit price in cents.
    pub base_price_cents: i64,

    /// Bundle rules in match order.
    pub promos: Vec<PromoRule>,
}

impl Default for PricingConfig {
    /// The official price board.
    fn default() -> Self {
        PricingConfig {
            base_price_cents: OFFICIAL_BASE_PRICE_CENTS,
            promos: vec![
                PromoRule::new("1", 2, Money::from_cents(500)),
                PromoRule::new("2", 4, Money::from_cents(1000)),
            ],
        }
    }
}

impl PricingConfig {
    #[inline]
    pub fn base_price(&self) -> Money {
        Money::from_cents(self.base_price_cents)
    }

    /// Quotes `quantity` with this config's base price and promos.
    pub fn quote(&self, quantity: i64) -> PriceQuote {
        quote(quantity, self.base_price(), &self.promos)
    }

    /// Changes the base price. Recorded sales keep their frozen totals.
    pub fn set_base_price(&mut self, price: Money) -> CoreResult<()> {
        validate_base_price_cents(price.cents())?;
        debug!(old = %self.base_price(), new = %price, "Base price changed");
        self.base_price_cents = price.cents();
        Ok(())
    }

    /// Appends a bundle rule with a fresh id.
    ///
    /// Appending keeps the existing match order intact; a duplicate quantity
    /// added later never shadows an earlier rule.
    pub fn add_promo(&mut self, quantity: i64, price: Money) -> CoreResult<PromoRule> {
        validate_promo_rule(quantity, price.cents())?;

        let promo = PromoRule::new(Uuid::new_v4().to_string(), quantity, price);
        debug!(promo_id = %promo.id, quantity, price = %price, "Promo added");
        self.promos.push(promo.clone());
        Ok(promo)
    }

    pub fn remove_promo(&mut self, id: &str) -> CoreResult<PromoRule> {
        let index = self
            .promos
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| CoreError::PromoNotFound(id.to_string()))?;

        debug!(promo_id = %id, "Promo removed");
        Ok(self.promos.remove(index))
    }

    /// Promos sorted by quantity for display. The stored order is untouched.
    pub fn promos_by_quantity(&self) -> Vec<&PromoRule> {
        let mut sorted: Vec<&PromoRule> = self.promos.iter().collect();
        sorted.sort_by_key(|p| p.quantity);
        sorted
    }

    /// Resets to the official price board.
    pub fn restore_defaults(&mut self) {
        *self = PricingConfig::default();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
