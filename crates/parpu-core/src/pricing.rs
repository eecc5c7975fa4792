//! # Pricing Engine
//!
//! Turns a requested quantity into a charged total.
//!
//! ## Matching Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  EXACT MATCH ONLY                                                       │
//! │                                                                         │
//! │  Promos: 2pcs = RM 5, 4pcs = RM 10        Base: RM 3                    │
//! │                                                                         │
//! │    qty 2 ──► 2pcs Promo ──────────────► RM 5                            │
//! │    qty 3 ──► no rule for 3 ───────────► RM 9   (never 2pcs + 1)         │
//! │    qty 8 ──► no rule for 8 ───────────► RM 24  (never 2 × 4pcs)         │
//! │                                                                         │
//! │  The first rule in list order whose quantity equals the request wins.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Bundles are never combined, split or applied partially. Do not turn this
//! into a greedy or optimal packer: recorded sales and printed price boards
//! depend on the exact-match behavior.

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::money::Money;
use crate::types::PromoRule;

// =============================================================================
// Price Quote
// =============================================================================

/// Result of pricing one requested quantity.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PriceQuote {
    /// Charged amount in cents.
    pub total_cents: i64,
    /// Labels of the applied rule (at most one).
    pub applied: Vec<String>,
    /// `quantity × base_price`, ignoring promotions.
    pub standard_total_cents: i64,
    /// `standard_total - total`. Negative when the matched promo costs more
    /// than the standard price; reported as-is.
    pub savings_cents: i64,
}

impl PriceQuote {
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    #[inline]
    pub fn standard_total(&self) -> Money {
        Money::from_cents(self.standard_total_cents)
    }

    #[inline]
    pub fn savings(&self) -> Money {
        Money::from_cents(self.savings_cents)
    }

    /// True when a bundle rule set the price.
    #[inline]
    pub fn has_promo(&self) -> bool {
        !self.applied.is_empty()
    }

    /// True when the applied promo is dearer than buying at the base price,
    /// typically after the base price was lowered without updating promos.
    #[inline]
    pub fn is_negative_savings(&self) -> bool {
        self.savings_cents < 0
    }
}

// =============================================================================
// Quote
// =============================================================================

/// Prices `quantity` pieces at `base_price` under `promos`.
///
/// - `quantity <= 0` gives an all-zero quote.
/// - Otherwise the first promo with `promo.quantity == quantity` sets the
///   total; with no match the standard total is charged.
///
/// No input is validated and nothing can fail: negative base prices and odd
/// promo rules are processed arithmetically.
///
/// ```rust
/// use parpu_core::{quote, Money, PromoRule};
///
/// let promos = vec![
///     PromoRule::new("1", 2, Money::from_cents(500)),
///     PromoRule::new("2", 4, Money::from_cents(1000)),
/// ];
/// let base = Money::from_cents(300);
///
/// let q = quote(4, base, &promos);
/// assert_eq!(q.total_cents, 1000);
/// assert_eq!(q.applied, vec!["4pcs Promo".to_string()]);
/// assert_eq!(q.standard_total_cents, 1200);
/// assert_eq!(q.savings_cents, 200);
///
/// // No combination of 2pcs + 1
/// assert_eq!(quote(3, base, &promos).total_cents, 900);
/// ```
pub fn quote(quantity: i64, base_price: Money, promos: &[PromoRule]) -> PriceQuote {
    if quantity <= 0 {
        return PriceQuote::default();
    }

    let standard_total = base_price.multiply_quantity(quantity);

    match promos.iter().find(|promo| promo.quantity == quantity) {
        Some(promo) => {
            let savings = standard_total.saturating_sub(promo.price());
            if savings.is_negative() {
                debug!(
                    promo_id = %promo.id,
                    quantity,
                    standard_total = %standard_total,
                    promo_price = %promo.price(),
                    "Promo price exceeds standard total"
                );
            }

            PriceQuote {
                total_cents: promo.price_cents,
                applied: vec![promo.label()],
                standard_total_cents: standard_total.cents(),
                savings_cents: savings.cents(),
            }
        }
        None => PriceQuote {
            total_cents: standard_total.cents(),
            applied: Vec::new(),
            standard_total_cents: standard_total.cents(),
            savings_cents: 0,
        },
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: Money = Money::from_cents(300);

    fn official_promos() -> Vec<PromoRule> {
        vec![
            PromoRule::new("1", 2, Money::from_cents(500)),
            PromoRule::new("2", 4, Money::from_cents(1000)),
        ]
    }

    fn q(total: i64, applied: &[&str], standard: i64, savings: i64) -> PriceQuote {
        PriceQuote {
            total_cents: total,
            applied: applied.iter().map(|s| s.to_string()).collect(),
            standard_total_cents: standard,
            savings_cents: savings,
        }
    }

    #[test]
    fn test_non_positive_quantity_is_zero_quote() {
        let promos = official_promos();
        assert_eq!(quote(0, BASE, &promos), q(0, &[], 0, 0));
        assert_eq!(quote(-1, BASE, &promos), q(0, &[], 0, 0));
        assert_eq!(quote(-4, Money::from_cents(-300), &promos), q(0, &[], 0, 0));
    }

    #[test]
    fn test_no_promos_charges_standard_total() {
        for qty in [1, 2, 5, 17] {
            let expected = 300 * qty;
            assert_eq!(quote(qty, BASE, &[]), q(expected, &[], expected, 0));
        }
    }

    #[test]
    fn test_official_pricing_table() {
        let promos = official_promos();
        assert_eq!(quote(1, BASE, &promos), q(300, &[], 300, 0));
        assert_eq!(quote(2, BASE, &promos), q(500, &["2pcs Promo"], 600, 100));
        assert_eq!(quote(4, BASE, &promos), q(1000, &["4pcs Promo"], 1200, 200));
    }

    #[test]
    fn test_promos_are_never_combined() {
        let promos = official_promos();
        // 2pcs + 1pc would be 8.00
        assert_eq!(quote(3, BASE, &promos), q(900, &[], 900, 0));
        // 4pcs twice would be 20.00
        assert_eq!(quote(8, BASE, &promos), q(2400, &[], 2400, 0));
        // 4pcs + 2pcs would be 15.00
        assert_eq!(quote(6, BASE, &promos), q(1800, &[], 1800, 0));
    }

    #[test]
    fn test_first_matching_rule_wins() {
        let promos = vec![
            PromoRule::new("a", 2, Money::from_cents(550)),
            PromoRule::new("b", 2, Money::from_cents(400)),
        ];
        let result = quote(2, BASE, &promos);
        assert_eq!(result.total_cents, 550);
        assert_eq!(result.savings_cents, 50);

        let reversed: Vec<_> = promos.into_iter().rev().collect();
        assert_eq!(quote(2, BASE, &reversed).total_cents, 400);
    }

    #[test]
    fn test_negative_savings_is_not_clamped() {
        // Base price lowered to RM 2 after the 4pcs = RM 10 promo was created
        let base = Money::from_cents(200);
        let result = quote(4, base, &official_promos());

        assert_eq!(result, q(1000, &["4pcs Promo"], 800, -200));
        assert!(result.has_promo());
        assert!(result.is_negative_savings());
    }

    #[test]
    fn test_unvalidated_inputs_are_processed_arithmetically() {
        let negative_base = quote(2, Money::from_cents(-300), &[]);
        assert_eq!(negative_base, q(-600, &[], -600, 0));

        // A rule for a non-positive quantity can never match a positive request
        let odd = vec![PromoRule::new("x", -2, Money::from_cents(100))];
        assert_eq!(quote(2, BASE, &odd), q(600, &[], 600, 0));

        // Zero-priced bundle is accepted
        let free = vec![PromoRule::new("f", 1, Money::zero())];
        assert_eq!(quote(1, BASE, &free), q(0, &["1pcs Promo"], 300, 300));
    }

    #[test]
    fn test_large_quantity_does_not_panic() {
        let promos = official_promos();
        let result = quote(100_000_000_000_000_000, BASE, &promos);
        assert_eq!(result, q(i64::MAX, &[], i64::MAX, 0));

        let bulk = vec![PromoRule::new("b", i64::MAX, Money::from_cents(-500))];
        let result = quote(i64::MAX, BASE, &bulk);
        assert_eq!(result.total_cents, -500);
        assert_eq!(result.standard_total_cents, i64::MAX);
        assert_eq!(result.savings_cents, i64::MAX);
    }

    #[test]
    fn test_quote_is_idempotent() {
        let promos = official_promos();
        for qty in -2..10 {
            assert_eq!(quote(qty, BASE, &promos), quote(qty, BASE, &promos));
        }
    }

    #[test]
    fn test_money_accessors() {
        let result = quote(2, BASE, &official_promos());
        assert_eq!(result.total(), Money::from_cents(500));
        assert_eq!(result.standard_total(), Money::from_cents(600));
        assert_eq!(result.savings(), Money::from_cents(100));
        assert!(!result.is_negative_savings());
        assert!(!quote(1, BASE, &official_promos()).has_promo());
    }
}
