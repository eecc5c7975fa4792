//! # Stats Aggregator
//!
//! Reduces sale records into dashboard figures.
//!
//! ## Outputs
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Dashboard Figures                                 │
//! │                                                                         │
//! │  [Sale, Sale, Sale, ...]                                                │
//! │        │                                                                │
//! │        ├──► summarize() ─────► BusinessStats                            │
//! │        │                       total / cash / qr revenue, pcs, orders   │
//! │        │                                                                │
//! │        └──► daily_revenue() ─► [Mon 0.00, Tue 12.00, ..., Sun 5.00]     │
//! │                                one entry per day of the window          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Weekday Buckets
//! `daily_revenue` keys revenue by weekday, not by calendar date. Every sale
//! lands in its weekday bucket whatever its date, and two window slots that
//! share a weekday (any window longer than 7 days) show the same total.
//! The dashboard chart has always behaved this way; it is kept as-is.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, Local, TimeZone, Weekday};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{PaymentMethod, Sale};
use crate::DEFAULT_WINDOW_DAYS;

// =============================================================================
// Business Stats
// =============================================================================

/// Aggregate over a collection of sales. Recomputed on demand, never stored.
///
/// ## Invariant
/// `cash_revenue_cents + qr_revenue_cents == total_revenue_cents`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BusinessStats {
    pub total_revenue_cents: i64,
    pub total_quantity: i64,
    pub total_orders: usize,
    pub cash_revenue_cents: i64,
    pub qr_revenue_cents: i64,
    pub cash_orders: usize,
    pub qr_orders: usize,
}

impl BusinessStats {
    /// Folds one sale into the aggregate.
    pub fn record(&mut self, sale: &Sale) {
        self.total_revenue_cents += sale.total_price_cents;
        self.total_quantity += sale.quantity;
        self.total_orders += 1;

        match sale.payment_method {
            PaymentMethod::Cash => {
                self.cash_revenue_cents += sale.total_price_cents;
                self.cash_orders += 1;
            }
            PaymentMethod::Qr => {
                self.qr_revenue_cents += sale.total_price_cents;
                self.qr_orders += 1;
            }
        }
    }

    /// Combines two partial aggregates, for hosts that summarize sales in
    /// chunks (per file, per page of a remote query) and add them up.
    pub fn merge(self, other: BusinessStats) -> BusinessStats {
        BusinessStats {
            total_revenue_cents: self.total_revenue_cents + other.total_revenue_cents,
            total_quantity: self.total_quantity + other.total_quantity,
            total_orders: self.total_orders + other.total_orders,
            cash_revenue_cents: self.cash_revenue_cents + other.cash_revenue_cents,
            qr_revenue_cents: self.qr_revenue_cents + other.qr_revenue_cents,
            cash_orders: self.cash_orders + other.cash_orders,
            qr_orders: self.qr_orders + other.qr_orders,
        }
    }

    #[inline]
    pub fn total_revenue(&self) -> Money {
        Money::from_cents(self.total_revenue_cents)
    }

    #[inline]
    pub fn cash_revenue(&self) -> Money {
        Money::from_cents(self.cash_revenue_cents)
    }

    #[inline]
    pub fn qr_revenue(&self) -> Money {
        Money::from_cents(self.qr_revenue_cents)
    }

    /// Revenue per order, truncated to the sen. Zero when there are no orders.
    pub fn average_order_value(&self) -> Money {
        if self.total_orders == 0 {
            return Money::zero();
        }
        Money::from_cents(self.total_revenue_cents / self.total_orders as i64)
    }
}

/// Summarizes a collection of sales.
///
/// Order-independent; an empty slice gives all-zero stats.
///
/// ```rust
/// use parpu_core::summarize;
///
/// let stats = summarize(&[]);
/// assert_eq!(stats.total_orders, 0);
/// assert_eq!(stats.total_revenue_cents, 0);
/// ```
pub fn summarize(sales: &[Sale]) -> BusinessStats {
    sales.iter().fold(BusinessStats::default(), |mut acc, sale| {
        acc.record(sale);
        acc
    })
}

// =============================================================================
// Daily Revenue
// =============================================================================

/// One bar of the revenue chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DailyRevenue {
    /// Short weekday name, e.g. `"Mon"`.
    pub label: String,
    pub revenue_cents: i64,
}

impl DailyRevenue {
    #[inline]
    pub fn revenue(&self) -> Money {
        Money::from_cents(self.revenue_cents)
    }
}

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

fn weekday_label(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

/// Revenue per day for the `window_days` days ending on `reference`'s
/// calendar day, oldest first.
///
/// Days are taken in `reference`'s time zone, so pass `Local::now()` (or any
/// `DateTime<Tz>`) for the caller's local calendar. Always returns exactly
/// `window_days` entries; days without sales report zero.
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use parpu_core::daily_revenue;
///
/// // 2024-05-05 is a Sunday
/// let reference = Utc.with_ymd_and_hms(2024, 5, 5, 18, 0, 0).unwrap();
/// let series = daily_revenue(&[], 7, &reference);
///
/// let labels: Vec<_> = series.iter().map(|d| d.label.as_str()).collect();
/// assert_eq!(labels, ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]);
/// assert!(series.iter().all(|d| d.revenue_cents == 0));
/// ```
pub fn daily_revenue<Tz: TimeZone>(
    sales: &[Sale],
    window_days: u32,
    reference: &DateTime<Tz>,
) -> Vec<DailyRevenue> {
    let tz = reference.timezone();

    let mut by_weekday: HashMap<Weekday, Money> = HashMap::new();
    for sale in sales {
        let weekday = sale.timestamp.with_timezone(&tz).weekday();
        *by_weekday.entry(weekday).or_default() += sale.total_price();
    }

    let last = reference.weekday().num_days_from_monday();
    (0..window_days)
        .rev()
        .map(|days_back| {
            let index = (last + 7 - days_back % 7) % 7;
            let weekday = WEEKDAYS[index as usize];
            DailyRevenue {
                label: weekday_label(weekday).to_string(),
                revenue_cents: by_weekday.get(&weekday).copied().unwrap_or_default().cents(),
            }
        })
        .collect()
}

/// `daily_revenue` over the last 7 days ending now, in local time.
pub fn daily_revenue_last_week(sales: &[Sale]) -> Vec<DailyRevenue> {
    daily_revenue(sales, DEFAULT_WINDOW_DAYS, &Local::now())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    fn sale(id: &str, quantity: i64, total_cents: i64, method: PaymentMethod, at: DateTime<Utc>) -> Sale {
        Sale {
            id: id.to_string(),
            customer_name: "Guest Customer".to_string(),
            quantity,
            total_price_cents: total_cents,
            payment_method: method,
            timestamp: at,
            applied_promos: Vec::new(),
        }
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_summarize_empty() {
        assert_eq!(summarize(&[]), BusinessStats::default());
        assert!(summarize(&[]).average_order_value().is_zero());
    }

    #[test]
    fn test_summarize_same_day_sales() {
        let sales = vec![
            sale("1", 2, 500, PaymentMethod::Cash, at(2024, 5, 1, 9)),
            sale("2", 3, 700, PaymentMethod::Qr, at(2024, 5, 1, 15)),
        ];
        let stats = summarize(&sales);

        assert_eq!(stats.total_revenue_cents, 1200);
        assert_eq!(stats.total_quantity, 5);
        assert_eq!(stats.total_orders, 2);
        assert_eq!(stats.cash_revenue_cents, 500);
        assert_eq!(stats.qr_revenue_cents, 700);
        assert_eq!(stats.cash_orders, 1);
        assert_eq!(stats.qr_orders, 1);
        assert_eq!(stats.average_order_value(), Money::from_cents(600));
    }

    #[test]
    fn test_cash_plus_qr_equals_total() {
        let sales: Vec<Sale> = (0..50)
            .map(|i| {
                let method = if i % 3 == 0 { PaymentMethod::Qr } else { PaymentMethod::Cash };
                // 10 sen amounts that drift under floating point
                sale(&i.to_string(), 1, 10 + i * 20, method, at(2024, 5, 1, 10))
            })
            .collect();
        let stats = summarize(&sales);

        assert_eq!(stats.cash_revenue() + stats.qr_revenue(), stats.total_revenue());
        assert_eq!(stats.total_orders, sales.len());
        assert_eq!(stats.cash_orders + stats.qr_orders, stats.total_orders);
    }

    #[test]
    fn test_summarize_is_order_independent() {
        let mut sales = vec![
            sale("1", 1, 300, PaymentMethod::Cash, at(2024, 5, 1, 9)),
            sale("2", 4, 1000, PaymentMethod::Qr, at(2024, 5, 2, 9)),
            sale("3", 2, 500, PaymentMethod::Cash, at(2024, 5, 3, 9)),
        ];
        let forward = summarize(&sales);
        sales.reverse();
        assert_eq!(summarize(&sales), forward);
    }

    #[test]
    fn test_merge_matches_summarize() {
        let sales = vec![
            sale("1", 1, 300, PaymentMethod::Cash, at(2024, 5, 1, 9)),
            sale("2", 4, 1000, PaymentMethod::Qr, at(2024, 5, 2, 9)),
            sale("3", 2, 500, PaymentMethod::Cash, at(2024, 5, 3, 9)),
        ];
        let (left, right) = sales.split_at(1);
        assert_eq!(summarize(left).merge(summarize(right)), summarize(&sales));
    }

    #[test]
    fn test_daily_revenue_window_is_dense() {
        // 2024-05-08 is a Wednesday
        let reference = at(2024, 5, 8, 20);
        let sales = vec![
            sale("1", 2, 500, PaymentMethod::Cash, at(2024, 5, 8, 9)),
            sale("2", 3, 700, PaymentMethod::Qr, at(2024, 5, 8, 11)),
            sale("3", 1, 300, PaymentMethod::Cash, at(2024, 5, 6, 12)),
        ];
        let series = daily_revenue(&sales, 7, &reference);

        let labels: Vec<_> = series.iter().map(|d| d.label.as_str()).collect();
        assert_eq!(labels, ["Thu", "Fri", "Sat", "Sun", "Mon", "Tue", "Wed"]);

        let revenue: Vec<_> = series.iter().map(|d| d.revenue_cents).collect();
        assert_eq!(revenue, [0, 0, 0, 0, 300, 0, 1200]);
    }

    #[test]
    fn test_daily_revenue_entry_count_matches_window() {
        let reference = at(2024, 5, 8, 20);
        let sales = vec![sale("1", 1, 300, PaymentMethod::Cash, at(2024, 5, 8, 9))];

        for window in [0u32, 1, 3, 7, 10, 30] {
            assert_eq!(daily_revenue(&[], window, &reference).len(), window as usize);
            assert_eq!(daily_revenue(&sales, window, &reference).len(), window as usize);
        }
    }

    #[test]
    fn test_daily_revenue_uses_reference_time_zone() {
        // 2024-05-07 23:30 UTC is Wednesday 07:30 in UTC+8
        let late_tuesday_utc = Utc.with_ymd_and_hms(2024, 5, 7, 23, 30, 0).unwrap();
        let sales = vec![sale("1", 1, 300, PaymentMethod::Cash, late_tuesday_utc)];

        let kl = FixedOffset::east_opt(8 * 3600).unwrap();
        let reference = kl.with_ymd_and_hms(2024, 5, 8, 20, 0, 0).unwrap();
        let series = daily_revenue(&sales, 2, &reference);
        assert_eq!(series[0].label, "Tue");
        assert_eq!(series[0].revenue_cents, 0);
        assert_eq!(series[1].label, "Wed");
        assert_eq!(series[1].revenue_cents, 300);

        let utc_series = daily_revenue(&sales, 2, &at(2024, 5, 8, 20));
        assert_eq!(utc_series[0].revenue_cents, 300);
        assert_eq!(utc_series[1].revenue_cents, 0);
    }

    /// Known limitation: buckets are weekdays, not dates. A 14-day window
    /// shows each weekday twice with the same merged total, and sales from
    /// outside the window still count toward their weekday.
    #[test]
    fn test_daily_revenue_weekday_aliasing_is_preserved() {
        // 2024-05-06 and 2024-04-29 are both Mondays, 2024-03-04 is a Monday
        // well outside any two-week window ending 2024-05-08
        let sales = vec![
            sale("1", 1, 300, PaymentMethod::Cash, at(2024, 5, 6, 10)),
            sale("2", 2, 500, PaymentMethod::Qr, at(2024, 4, 29, 10)),
            sale("3", 4, 1000, PaymentMethod::Cash, at(2024, 3, 4, 10)),
        ];
        let series = daily_revenue(&sales, 14, &at(2024, 5, 8, 20));

        let mondays: Vec<_> = series.iter().filter(|d| d.label == "Mon").collect();
        assert_eq!(mondays.len(), 2);
        assert!(mondays.iter().all(|d| d.revenue_cents == 1800));
    }

    #[test]
    fn test_daily_revenue_last_week_has_seven_entries() {
        assert_eq!(daily_revenue_last_week(&[]).len(), DEFAULT_WINDOW_DAYS as usize);
    }
}
