//! # Sale Commands
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  parpu sell 4 --customer aminah --qr                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate_quantity / validate_customer_name                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  pricing.quote(4) ──► Sale::from_quote (total + promos frozen)         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  sales.json: load ──► ledger.record ──► save                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  customers.json: known name? ──► record_purchase(total)                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use parpu_core::validation::{validate_customer_name, validate_quantity, validate_uuid};
use parpu_core::{PaymentMethod, PriceQuote, Sale};
use serde::Serialize;
use tracing::info;

use super::customer::credit_purchase;
use super::Session;
use crate::config::ShopConfig;
use crate::error::CliResult;

/// `quote --json` payload.
#[derive(Debug, Serialize)]
struct QuoteOutput<'a> {
    quantity: i64,
    #[serde(flatten)]
    quote: &'a PriceQuote,
}

/// Prices `qty` without recording anything. Any integer is accepted.
pub fn quote(session: &Session, qty: i64, json: bool) -> CliResult<String> {
    let quote = session.config.pricing.quote(qty);

    if json {
        return Ok(serde_json::to_string_pretty(&QuoteOutput {
            quantity: qty,
            quote: &quote,
        })?);
    }

    Ok(render_quote(&session.config, qty, &quote))
}

fn render_quote(config: &ShopConfig, qty: i64, quote: &PriceQuote) -> String {
    let mut out = format!("{} pcs  {}", qty, config.format_currency(quote.total_cents));

    for label in &quote.applied {
        out.push_str(&format!("\n  {label}"));
    }
    if quote.has_promo() {
        out.push_str(&format!(
            "\n  You save {} (standard {})",
            config.format_currency(quote.savings_cents),
            config.format_currency(quote.standard_total_cents)
        ));
    }

    out
}

/// Validates, prices and records a sale.
pub fn sell(
    session: &Session,
    qty: i64,
    customer: Option<&str>,
    method: PaymentMethod,
    now: DateTime<Utc>,
) -> CliResult<Sale> {
    validate_quantity(qty)?;
    if let Some(name) = customer {
        validate_customer_name(name)?;
    }

    let quote = session.config.pricing.quote(qty);
    let sale = Sale::from_quote(customer, qty, method, &quote, now);

    let mut ledger = session.sales.load()?;
    ledger.record(sale.clone());
    session.sales.save(&ledger)?;

    if let Some(name) = customer {
        credit_purchase(session, name, sale.total_price())?;
    }

    info!(
        sale_id = %sale.id,
        quantity = qty,
        total = %sale.total_price(),
        method = %method,
        "Sale completed"
    );
    Ok(sale)
}

pub fn render_sale(config: &ShopConfig, sale: &Sale) -> String {
    let mut out = format!(
        "Recorded {}: {} pcs for {} ({}) - {}",
        sale.id,
        sale.quantity,
        config.format_currency(sale.total_price_cents),
        sale.payment_method,
        sale.display_customer_name()
    );
    if !sale.applied_promos.is_empty() {
        out.push_str(&format!("\n  {}", sale.applied_promos.join(", ")));
    }
    out
}

pub fn delete(session: &Session, id: &str) -> CliResult<Sale> {
    validate_uuid(id)?;

    let mut ledger = session.sales.load()?;
    let sale = ledger.delete(id)?;
    session.sales.save(&ledger)?;

    info!(sale_id = %id, total = %sale.total_price(), "Sale deleted");
    Ok(sale)
}

/// `history` filters. Dates are UTC calendar days, both ends inclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HistoryFilter {
    pub method: Option<PaymentMethod>,
    pub since: Option<NaiveDate>,
    pub until: Option<NaiveDate>,
}

impl HistoryFilter {
    /// `[since 00:00, until 23:59:59.999…]`, or `None` when neither is set.
    fn window(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        if self.since.is_none() && self.until.is_none() {
            return None;
        }

        let start = self
            .since
            .map(|day| Utc.from_utc_datetime(&day.and_time(NaiveTime::MIN)))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        let end = self
            .until
            .and_then(|day| day.and_hms_nano_opt(23, 59, 59, 999_999_999))
            .map(|end| Utc.from_utc_datetime(&end))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        Some((start, end))
    }
}

/// Most recent sales matching `filter`, newest first.
pub fn history(session: &Session, limit: usize, filter: HistoryFilter, json: bool) -> CliResult<String> {
    let ledger = session.sales.load()?;
    let selected: Vec<&Sale> = match (filter.method, filter.window()) {
        (None, None) => ledger.recent(limit).iter().collect(),
        (Some(method), None) => ledger.by_payment_method(method),
        (None, Some((start, end))) => ledger.between(start, end),
        (Some(method), Some((start, end))) => ledger
            .between(start, end)
            .into_iter()
            .filter(|sale| sale.payment_method == method)
            .collect(),
    };
    let recent: Vec<&Sale> = selected.into_iter().take(limit).collect();

    if json {
        return Ok(serde_json::to_string_pretty(&recent)?);
    }
    if recent.is_empty() {
        return Ok(if filter == HistoryFilter::default() {
            "No sales recorded yet.".to_string()
        } else {
            "No sales match.".to_string()
        });
    }

    let config = &session.config;
    let lines: Vec<String> = recent
        .iter()
        .map(|sale| {
            format!(
                "{}  {}  {:<20} {:>3} pcs  {:>10}  {:<4} {}",
                sale.id,
                sale.timestamp.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
                sale.display_customer_name(),
                sale.quantity,
                config.format_currency(sale.total_price_cents),
                sale.payment_method.as_str(),
                sale.applied_promos.join(", ")
            )
            .trim_end()
            .to_string()
        })
        .collect();

    Ok(lines.join("\n"))
}

// =============================================================================
// Unit Tests
// =============================================================================
