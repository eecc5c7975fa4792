//! # Domain Types
//!
//! Core domain types used throughout Parpu POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   PromoRule     │   │      Sale       │   │ PaymentMethod   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id (UUID)      │   │  Cash           │       │
//! │  │  quantity       │   │  customer_name  │   │  Qr             │       │
//! │  │  price_cents    │   │  quantity       │   └─────────────────┘       │
//! │  └─────────────────┘   │  total_price    │                             │
//! │                        │  payment_method │                             │
//! │                        │  timestamp      │                             │
//! │                        │  applied_promos │                             │
//! │                        └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Derived values (`PriceQuote`, `BusinessStats`, `DailyRevenue`) live next to
//! the functions that produce them in [`crate::pricing`] and [`crate::stats`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::ValidationError;
use crate::money::Money;
use crate::pricing::PriceQuote;
use crate::DEFAULT_CUSTOMER_NAME;

// =============================================================================
// Promo Rule
// =============================================================================

/// A bundle promotion: a fixed total price for an exact quantity.
///
/// `quantity >= 1` is a settings-screen rule (see
/// [`crate::validation::validate_promo_rule`]); the pricing engine takes
/// whatever it is given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PromoRule {
    /// Opaque identifier.
    pub id: String,

    /// Exact number of pieces this bundle applies to.
    pub quantity: i64,

    /// Bundle price in cents.
    pub price_cents: i64,
}

impl PromoRule {
    pub fn new(id: impl Into<String>, quantity: i64, price: Money) -> Self {
        PromoRule {
            id: id.into(),
            quantity,
            price_cents: price.cents(),
        }
    }

    /// Returns the bundle price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Label recorded on quotes and sales, e.g. `"2pcs Promo"`.
    pub fn label(&self) -> String {
        format!("{}pcs Promo", self.quantity)
    }
}

// =============================================================================
// Payment Method
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentMethod {
    /// Physical cash payment.
    Cash,
    /// DuitNow / e-wallet QR payment.
    Qr,
}

impl PaymentMethod {
    /// Wire/export name: `"CASH"` or `"QR"`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "CASH",
            PaymentMethod::Qr => "QR",
        }
    }
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::Cash
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive `"cash"` / `"qr"`.
impl std::str::FromStr for PaymentMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CASH" => Ok(PaymentMethod::Cash),
            "QR" => Ok(PaymentMethod::Qr),
            _ => Err(ValidationError::InvalidFormat {
                field: "payment method".to_string(),
                reason: "expected cash or qr".to_string(),
            }),
        }
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A finalized sale.
///
/// Uses the snapshot pattern: `total_price_cents` and `applied_promos` freeze
/// the quote that was shown at checkout. Later changes to the base price or
/// the promo list never touch recorded sales.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Sale {
    pub id: String,
    /// Display label, `"Guest Customer"` when none was given.
    pub customer_name: String,
    pub quantity: i64,
    /// Charged amount (post-discount) in cents.
    pub total_price_cents: i64,
    pub payment_method: PaymentMethod,
    #[ts(as = "String")]
    pub timestamp: DateTime<Utc>,
    /// Labels of the rule(s) that produced the price.
    pub applied_promos: Vec<String>,
}

impl Sale {
    /// Freezes a quote into a new sale record with a fresh UUID.
    ///
    /// ## User Workflow
    /// ```text
    /// New Order: qty 4, "siti", QR
    ///      │
    ///      ▼
    /// quote(4, RM 3.00, promos) ─► RM 10.00, ["4pcs Promo"]
    ///      │
    ///      ▼
    /// Sale::from_quote(..) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// ledger.record(sale)
    /// ```
    ///
    /// ```rust
    /// use chrono::Utc;
    /// use parpu_core::{quote, Money, PaymentMethod, PromoRule, Sale};
    ///
    /// let promos = vec![PromoRule::new("1", 2, Money::from_cents(500))];
    /// let q = quote(2, Money::from_cents(300), &promos);
    /// let sale = Sale::from_quote(None, 2, PaymentMethod::Cash, &q, Utc::now());
    ///
    /// assert_eq!(sale.customer_name, "Guest Customer");
    /// assert_eq!(sale.total_price_cents, 500);
    /// assert_eq!(sale.applied_promos, vec!["2pcs Promo".to_string()]);
    /// ```
    pub fn from_quote(
        customer_name: Option<&str>,
        quantity: i64,
        payment_method: PaymentMethod,
        quote: &PriceQuote,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let customer_name = customer_name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_CUSTOMER_NAME)
            .to_string();

        Sale {
            id: Uuid::new_v4().to_string(),
            customer_name,
            quantity,
            total_price_cents: quote.total_cents,
            payment_method,
            timestamp,
            applied_promos: quote.applied.clone(),
        }
    }

    /// Returns the charged amount as Money.
    #[inline]
    pub fn total_price(&self) -> Money {
        Money::from_cents(self.total_price_cents)
    }

    /// Customer name in title case with collapsed whitespace, for history
    /// views. The stored name is left as entered.
    pub fn display_customer_name(&self) -> String {
        title_case(&self.customer_name)
    }
}

/// Title-cases each word and collapses runs of whitespace.
pub(crate) fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// =============================================================================
// Unit Tests
// =============================================================================
