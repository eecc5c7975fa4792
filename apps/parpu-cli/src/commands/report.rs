//! # Report Command
//!
//! Prints the day or month report as JSON, or its rows as CSV with the
//! standard column headers.

use csv::WriterBuilder;
use parpu_core::{build_report, ReportPeriod, SalesReport, REPORT_HEADERS};
use tracing::info;

use super::Session;
use crate::error::{CliError, CliResult};

fn load_report(session: &Session, period: &str) -> CliResult<SalesReport> {
    let period: ReportPeriod = period.parse()?;
    let ledger = session.sales.load()?;

    let report = build_report(ledger.list(), period)?;
    info!(
        period = %report.period,
        rows = report.rows.len(),
        revenue = %report.stats.total_revenue(),
        "Report built"
    );
    Ok(report)
}

pub fn report(session: &Session, period: &str) -> CliResult<String> {
    let report = load_report(session, period)?;
    Ok(serde_json::to_string_pretty(&report)?)
}

/// Header row plus one row per sale, ready for `> Daily_Report_2024-05-01.csv`.
pub fn report_csv(session: &Session, period: &str) -> CliResult<String> {
    let report = load_report(session, period)?;

    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    writer.write_record(REPORT_HEADERS)?;
    for row in &report.rows {
        writer.write_record(row.fields())?;
    }
    let bytes = writer.into_inner().map_err(|e| CliError::Io(e.into_error()))?;

    Ok(String::from_utf8_lossy(&bytes).trim_end().to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::sale::sell;
    use crate::commands::test_support::session;
    use crate::error::CliError;
    use chrono::{TimeZone, Utc};
    use parpu_core::{CoreError, PaymentMethod};

    #[test]
    fn test_monthly_report() {
        let dir = tempfile::tempdir().unwrap();
        let session = session(&dir);

        let may = Utc.with_ymd_and_hms(2024, 5, 3, 9, 0, 0).unwrap();
        let june = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();
        sell(&session, 2, Some("Ali"), PaymentMethod::Cash, may).unwrap();
        sell(&session, 4, None, PaymentMethod::Qr, june).unwrap();

        let parsed: SalesReport = serde_json::from_str(&report(&session, "2024-05").unwrap()).unwrap();
        assert_eq!(parsed.title, "Monthly Sales Report: 2024-05");
        assert_eq!(parsed.file_stem, "Monthly_Report_2024-05");
        assert_eq!(parsed.rows.len(), 1);
        assert_eq!(parsed.rows[0].total_price, "5.00");
        assert_eq!(parsed.stats.total_revenue_cents, 500);
    }

    #[test]
    fn test_report_errors() {
        let dir = tempfile::tempdir().unwrap();
        let session = session(&dir);

        assert!(matches!(
            report(&session, "May"),
            Err(CliError::Core(CoreError::InvalidPeriod { .. }))
        ));
        assert!(matches!(
            report(&session, "2024-05-01"),
            Err(CliError::Core(CoreError::NoSalesInPeriod { .. }))
        ));
    }

    #[test]
    fn test_report_csv() {
        let dir = tempfile::tempdir().unwrap();
        let session = session(&dir);

        let at = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
        let sale = sell(&session, 2, Some("Ali, Abu"), PaymentMethod::Qr, at).unwrap();

        let out = report_csv(&session, "2024-05-01").unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "ID,Timestamp,Customer Name,Quantity,Total Price (RM),Payment Method,Promos"
        );
        assert_eq!(
            lines[1],
            format!("{},2024-05-01T09:30:00+00:00,\"Ali, Abu\",2,5.00,QR,2pcs Promo", sale.id)
        );

        assert!(matches!(
            report_csv(&session, "2024-06"),
            Err(CliError::Core(CoreError::NoSalesInPeriod { .. }))
        ));
    }
}
