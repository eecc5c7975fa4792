//! # Reports
//!
//! Selects the sales of a calendar day or month and projects them into the
//! rows and totals that CSV/PDF exporters render.
//!
//! ## Report Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  "2024-05" ──► ReportPeriod::Month ──► build_report(sales, period)      │
//! │                                              │                          │
//! │                      ┌───────────────────────┼──────────────────┐       │
//! │                      ▼                       ▼                  ▼       │
//! │                 title/file_stem        BusinessStats       ReportRow[]  │
//! │          "Monthly Sales Report: ..."   (summarize)         (columns)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Periods match on the sale's **UTC** calendar date. This differs from the
//! dashboard chart, which buckets in the caller's time zone.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::stats::{summarize, BusinessStats};
use crate::types::Sale;

/// Column titles, in [`ReportRow::fields`] order.
pub const REPORT_HEADERS: [&str; 7] = [
    "ID",
    "Timestamp",
    "Customer Name",
    "Quantity",
    "Total Price (RM)",
    "Payment Method",
    "Promos",
];

// =============================================================================
// Report Period
// =============================================================================

/// A calendar day or month to report on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportPeriod {
    Day(NaiveDate),
    Month { year: i32, month: u32 },
}

impl ReportPeriod {
    /// True when the sale's UTC date falls inside the period.
    pub fn contains(&self, sale: &Sale) -> bool {
        let date = sale.timestamp.date_naive();
        match *self {
            ReportPeriod::Day(day) => date == day,
            ReportPeriod::Month { year, month } => date.year() == year && date.month() == month,
        }
    }

    pub fn title(&self) -> String {
        match self {
            ReportPeriod::Day(_) => format!("Daily Sales Report: {}", self),
            ReportPeriod::Month { .. } => format!("Monthly Sales Report: {}", self),
        }
    }

    /// Export file name without extension, e.g. `"Monthly_Report_2024-05"`.
    pub fn file_stem(&self) -> String {
        match self {
            ReportPeriod::Day(_) => format!("Daily_Report_{}", self),
            ReportPeriod::Month { .. } => format!("Monthly_Report_{}", self),
        }
    }
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportPeriod::Day(day) => write!(f, "{}", day.format("%Y-%m-%d")),
            ReportPeriod::Month { year, month } => write!(f, "{:04}-{:02}", year, month),
        }
    }
}

impl FromStr for ReportPeriod {
    type Err = CoreError;

    /// Accepts `YYYY-MM-DD` (day) or `YYYY-MM` (month).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || CoreError::InvalidPeriod {
            input: s.to_string(),
        };

        if let Ok(day) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Ok(ReportPeriod::Day(day));
        }

        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        if !(1..=12).contains(&month) {
            return Err(invalid());
        }

        Ok(ReportPeriod::Month { year, month })
    }
}

// =============================================================================
// Report Rows
// =============================================================================

/// One exported sale line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReportRow {
    pub id: String,
    #[ts(as = "String")]
    pub timestamp: DateTime<Utc>,
    pub customer_name: String,
    pub quantity: i64,
    /// Two-decimal amount, e.g. `"10.00"`.
    pub total_price: String,
    /// `"CASH"` or `"QR"`.
    pub payment_method: String,
    /// Applied promo labels joined with `"; "`.
    pub promos: String,
}

impl From<&Sale> for ReportRow {
    fn from(sale: &Sale) -> Self {
        ReportRow {
            id: sale.id.clone(),
            timestamp: sale.timestamp,
            customer_name: sale.customer_name.clone(),
            quantity: sale.quantity,
            total_price: sale.total_price().to_string(),
            payment_method: sale.payment_method.as_str().to_string(),
            promos: sale.applied_promos.join("; "),
        }
    }
}

impl ReportRow {
    /// Cell values in [`REPORT_HEADERS`] order.
    pub fn fields(&self) -> [String; 7] {
        [
            self.id.clone(),
            self.timestamp.to_rfc3339(),
            self.customer_name.clone(),
            self.quantity.to_string(),
            self.total_price.clone(),
            self.payment_method.clone(),
            self.promos.clone(),
        ]
    }
}

// =============================================================================
// Sales Report
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SalesReport {
    /// `"2024-05-01"` or `"2024-05"`.
    pub period: String,
    pub title: String,
    pub file_stem: String,
    pub stats: BusinessStats,
    pub rows: Vec<ReportRow>,
}

/// Builds the report for `period`, keeping the input order of `sales`.
///
/// Returns [`CoreError::NoSalesInPeriod`] when nothing matches, so callers
/// never export an empty file.
pub fn build_report(sales: &[Sale], period: ReportPeriod) -> CoreResult<SalesReport> {
    let selected: Vec<Sale> = sales.iter().filter(|s| period.contains(s)).cloned().collect();

    if selected.is_empty() {
        return Err(CoreError::NoSalesInPeriod {
            period: period.to_string(),
        });
    }

    Ok(SalesReport {
        period: period.to_string(),
        title: period.title(),
        file_stem: period.file_stem(),
        stats: summarize(&selected),
        rows: selected.iter().map(ReportRow::from).collect(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
