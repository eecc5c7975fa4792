//! # parpu-core: Pure Business Logic for Parpu POS
//!
//! Bundle pricing, sales aggregation and report projection for a single
//! product stall, plus bulk-order bookings and a customer directory. Every
//! function here is pure; hosts own storage.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Parpu POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Host (parpu CLI)                             │   │
//! │  │    quote ──► sell ──► history ──► dashboard ──► report ──►      │   │
//! │  │    booking ──► customer                                         │   │
//! │  │    shop config (TOML) · JSON data files                         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ parpu-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  pricing  │  │   stats   │  │  report   │  │  ledger   │  │   │
//! │  │   │  quote()  │  │summarize()│  │  build_   │  │ SaleLedger│  │   │
//! │  │   │PriceQuote │  │daily_rev()│  │  report() │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │   ┌───────────┐  ┌───────────┐                                 │   │
//! │  │   │  booking  │  │ customer  │                                 │   │
//! │  │   │BookingBook│  │ Customer- │                                 │   │
//! │  │   │  stats    │  │ Directory │                                 │   │
//! │  │   └───────────┘  └───────────┘                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  config   │  │ validation│  │   │
//! │  │   │ Sale,     │  │   Money   │  │ Pricing-  │  │   rules   │  │   │
//! │  │   │ PromoRule │  │  (cents)  │  │ Config    │  │   checks  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO FILES • NO NETWORK • NO GLOBAL STATE                      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`pricing`] - Bundle pricing engine
//! - [`stats`] - Business totals and the weekday revenue series
//! - [`report`] - Day/month report selection and row projection
//! - [`ledger`] - In-memory sale collection
//! - [`booking`] - Bulk-order bookings and their status workflow
//! - [`customer`] - Customer directory with purchase totals
//! - [`config`] - Base price and promo list
//! - [`types`] - Domain types (Sale, PromoRule, PaymentMethod)
//! - [`money`] - Money type with integer arithmetic
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use parpu_core::{quote, Money, PromoRule};
//!
//! let promos = vec![
//!     PromoRule::new("1", 2, Money::from_cents(500)),
//!     PromoRule::new("2", 4, Money::from_cents(1000)),
//! ];
//!
//! let q = quote(4, Money::from_cents(300), &promos);
//! assert_eq!(q.total_cents, 1000);
//! assert_eq!(q.savings_cents, 200);
//! assert_eq!(q.applied, vec!["4pcs Promo".to_string()]);
//!
//! // No promo for 3: plain multiplication
//! assert_eq!(quote(3, Money::from_cents(300), &promos).total_cents, 900);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod booking;
pub mod config;
pub mod customer;
pub mod error;
pub mod ledger;
pub mod money;
pub mod pricing;
pub mod report;
pub mod stats;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use booking::{
    booking_stats, Booking, BookingBook, BookingDraft, BookingPayment, BookingStats, BookingStatus,
};
pub use config::PricingConfig;
pub use customer::{Customer, CustomerDirectory, CustomerDraft, CustomerUpdate};
pub use error::{CoreError, CoreResult, ValidationError};
pub use ledger::SaleLedger;
pub use money::Money;
pub use pricing::{quote, PriceQuote};
pub use report::{build_report, ReportPeriod, ReportRow, SalesReport, REPORT_HEADERS};
pub use stats::{daily_revenue, daily_revenue_last_week, summarize, BusinessStats, DailyRevenue};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Stored name for sales recorded without a customer.
pub const DEFAULT_CUSTOMER_NAME: &str = "Guest Customer";

/// Length of the dashboard revenue window.
pub const DEFAULT_WINDOW_DAYS: u32 = 7;

/// Maximum pieces in a single order
///
/// ## Business Reason
/// Catches slips like typing 1000 instead of 10.
pub const MAX_ORDER_QUANTITY: i64 = 999;

/// Maximum customer name length in characters.
pub const MAX_CUSTOMER_NAME_LEN: usize = 100;
