//! # Dashboard Commands
//!
//! Totals and the weekday revenue chart, recomputed from the sales file on
//! every call.

use chrono::{DateTime, TimeZone};
use parpu_core::daily_revenue;

use super::Session;
use crate::error::CliResult;

/// Width of the longest bar in the text chart.
const CHART_WIDTH: i64 = 30;

pub fn stats(session: &Session, json: bool) -> CliResult<String> {
    let stats = session.sales.load()?.stats();

    if json {
        return Ok(serde_json::to_string_pretty(&stats)?);
    }

    let fmt = |cents| session.config.format_currency(cents);
    Ok([
        session.config.store.name.clone(),
        format!("Total revenue   {}", fmt(stats.total_revenue_cents)),
        format!("Orders          {}", stats.total_orders),
        format!("Pieces sold     {}", stats.total_quantity),
        format!("Average order   {}", fmt(stats.average_order_value().cents())),
        format!(
            "Cash            {} ({} orders)",
            fmt(stats.cash_revenue_cents),
            stats.cash_orders
        ),
        format!(
            "QR              {} ({} orders)",
            fmt(stats.qr_revenue_cents),
            stats.qr_orders
        ),
    ]
    .join("\n"))
}

/// Weekday revenue for the `days` ending at `reference`, oldest first.
pub fn daily<Tz: TimeZone>(
    session: &Session,
    days: u32,
    reference: &DateTime<Tz>,
    json: bool,
) -> CliResult<String> {
    let ledger = session.sales.load()?;
    let series = daily_revenue(ledger.list(), days, reference);

    if json {
        return Ok(serde_json::to_string_pretty(&series)?);
    }

    let peak = series.iter().map(|d| d.revenue_cents).max().unwrap_or(0);
    let lines: Vec<String> = series
        .iter()
        .map(|day| {
            let bar = if peak > 0 {
                "#".repeat((day.revenue_cents.max(0) * CHART_WIDTH / peak) as usize)
            } else {
                String::new()
            };
            format!(
                "{}  {:>10}  {}",
                day.label,
                session.config.format_currency(day.revenue_cents),
                bar
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::sale::sell;
    use crate::commands::test_support::session;
    use chrono::Utc;
    use parpu_core::{BusinessStats, DailyRevenue, PaymentMethod};

    #[test]
    fn test_stats_empty() {
        let dir = tempfile::tempdir().unwrap();
        let session = session(&dir);

        let parsed: BusinessStats = serde_json::from_str(&stats(&session, true).unwrap()).unwrap();
        assert_eq!(parsed, BusinessStats::default());

        let text = stats(&session, false).unwrap();
        assert!(text.contains("Total revenue   RM 0.00"));
        assert!(text.contains("Average order   RM 0.00"));
    }

    #[test]
    fn test_stats_after_sales() {
        let dir = tempfile::tempdir().unwrap();
        let session = session(&dir);
        sell(&session, 2, None, PaymentMethod::Cash, Utc::now()).unwrap();
        sell(&session, 4, None, PaymentMethod::Qr, Utc::now()).unwrap();

        let parsed: BusinessStats = serde_json::from_str(&stats(&session, true).unwrap()).unwrap();
        assert_eq!(parsed.total_revenue_cents, 1500);
        assert_eq!(parsed.total_quantity, 6);
        assert_eq!(parsed.cash_revenue_cents + parsed.qr_revenue_cents, 1500);

        let text = stats(&session, false).unwrap();
        assert!(text.contains("Cash            RM 5.00 (1 orders)"));
        assert!(text.contains("QR              RM 10.00 (1 orders)"));
    }

    #[test]
    fn test_daily_chart() {
        let dir = tempfile::tempdir().unwrap();
        let session = session(&dir);

        // 2024-05-08 is a Wednesday
        let wednesday = Utc.with_ymd_and_hms(2024, 5, 8, 10, 0, 0).unwrap();
        let monday = Utc.with_ymd_and_hms(2024, 5, 6, 10, 0, 0).unwrap();
        sell(&session, 4, None, PaymentMethod::Cash, wednesday).unwrap();
        sell(&session, 2, None, PaymentMethod::Qr, monday).unwrap();

        let reference = Utc.with_ymd_and_hms(2024, 5, 8, 20, 0, 0).unwrap();
        let series: Vec<DailyRevenue> =
            serde_json::from_str(&daily(&session, 7, &reference, true).unwrap()).unwrap();
        assert_eq!(series.len(), 7);
        assert_eq!(series[6].label, "Wed");
        assert_eq!(series[6].revenue_cents, 1000);
        assert_eq!(series[4].revenue_cents, 500);

        let text = daily(&session, 7, &reference, false).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 7);
        assert!(lines[6].ends_with(&"#".repeat(30)));
        assert!(lines[4].ends_with(&"#".repeat(15)));
        assert_eq!(lines[0], "Thu     RM 0.00");
    }
}
