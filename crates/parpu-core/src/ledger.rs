//! # Sale Ledger
//!
//! In-memory collection of recorded sales, newest first.
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Ledger Operations                                    │
//! │                                                                         │
//! │  Checkout confirmed ─────► record(sale) ──────► sales.insert(0, sale)   │
//! │  History: delete ────────► delete(id) ────────► sales.remove(i)         │
//! │  History / Reports ──────► list(), between(), by_payment_method()       │
//! │  Dashboard ──────────────► stats() ───────────► summarize(sales)        │
//! │                                                                         │
//! │  Sales are never edited in place.                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The ledger does no I/O. Hosts load it from their store and write it back.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::stats::{summarize, BusinessStats};
use crate::types::{PaymentMethod, Sale};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaleLedger {
    /// Newest first.
    sales: Vec<Sale>,
}

impl SaleLedger {
    pub fn new() -> Self {
        SaleLedger { sales: Vec::new() }
    }

    /// Builds a ledger from sales in any order.
    pub fn from_sales(mut sales: Vec<Sale>) -> Self {
        sales.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        SaleLedger { sales }
    }

    /// Adds a finalized sale at the front.
    pub fn record(&mut self, sale: Sale) {
        debug!(
            sale_id = %sale.id,
            quantity = sale.quantity,
            total = %sale.total_price(),
            method = %sale.payment_method,
            "Sale recorded"
        );
        self.sales.insert(0, sale);
    }

    /// Removes and returns a sale.
    pub fn delete(&mut self, id: &str) -> CoreResult<Sale> {
        let index = self
            .sales
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| CoreError::SaleNotFound(id.to_string()))?;

        debug!(sale_id = %id, "Sale deleted");
        Ok(self.sales.remove(index))
    }

    pub fn get(&self, id: &str) -> Option<&Sale> {
        self.sales.iter().find(|s| s.id == id)
    }

    /// All sales, newest first.
    pub fn list(&self) -> &[Sale] {
        &self.sales
    }

    /// Sales with `start <= timestamp <= end`, newest first.
    pub fn between(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<&Sale> {
        self.sales
            .iter()
            .filter(|s| s.timestamp >= start && s.timestamp <= end)
            .collect()
    }

    pub fn by_payment_method(&self, method: PaymentMethod) -> Vec<&Sale> {
        self.sales
            .iter()
            .filter(|s| s.payment_method == method)
            .collect()
    }

    /// The `limit` most recently recorded sales.
    pub fn recent(&self, limit: usize) -> &[Sale] {
        &self.sales[..limit.min(self.sales.len())]
    }

    pub fn stats(&self) -> BusinessStats {
        summarize(&self.sales)
    }

    pub fn len(&self) -> usize {
        self.sales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sales.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn sale(id: &str, total_cents: i64, method: PaymentMethod, hours: i64) -> Sale {
        let base = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        Sale {
            id: id.to_string(),
            customer_name: "Guest Customer".to_string(),
            quantity: 1,
            total_price_cents: total_cents,
            payment_method: method,
            timestamp: base + Duration::hours(hours),
            applied_promos: Vec::new(),
        }
    }

    #[test]
    fn test_record_prepends() {
        let mut ledger = SaleLedger::new();
        ledger.record(sale("1", 300, PaymentMethod::Cash, 0));
        ledger.record(sale("2", 500, PaymentMethod::Qr, 1));

        let ids: Vec<_> = ledger.list().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["2", "1"]);
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn test_from_sales_sorts_newest_first() {
        let ledger = SaleLedger::from_sales(vec![
            sale("old", 300, PaymentMethod::Cash, 0),
            sale("new", 300, PaymentMethod::Cash, 5),
            sale("mid", 300, PaymentMethod::Cash, 2),
        ]);
        let ids: Vec<_> = ledger.list().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["new", "mid", "old"]);
    }

    #[test]
    fn test_delete() {
        let mut ledger = SaleLedger::new();
        ledger.record(sale("1", 300, PaymentMethod::Cash, 0));
        ledger.record(sale("2", 500, PaymentMethod::Qr, 1));

        let removed = ledger.delete("1").unwrap();
        assert_eq!(removed.id, "1");
        assert!(ledger.get("1").is_none());
        assert_eq!(ledger.len(), 1);

        assert!(matches!(ledger.delete("1"), Err(CoreError::SaleNotFound(id)) if id == "1"));
    }

    #[test]
    fn test_queries() {
        let ledger = SaleLedger::from_sales(vec![
            sale("1", 300, PaymentMethod::Cash, 0),
            sale("2", 500, PaymentMethod::Qr, 2),
            sale("3", 1000, PaymentMethod::Cash, 4),
        ]);

        let base = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        let window: Vec<_> = ledger
            .between(base + Duration::hours(2), base + Duration::hours(4))
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(window, ["3", "2"]);

        let cash: Vec<_> = ledger
            .by_payment_method(PaymentMethod::Cash)
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(cash, ["3", "1"]);

        assert_eq!(ledger.recent(2).len(), 2);
        assert_eq!(ledger.recent(2)[0].id, "3");
        assert_eq!(ledger.recent(10).len(), 3);
        assert!(ledger.recent(0).is_empty());
    }

    #[test]
    fn test_stats_tracks_mutations() {
        let mut ledger = SaleLedger::new();
        assert_eq!(ledger.stats(), BusinessStats::default());

        ledger.record(sale("1", 500, PaymentMethod::Cash, 0));
        ledger.record(sale("2", 700, PaymentMethod::Qr, 1));
        assert_eq!(ledger.stats().total_revenue_cents, 1200);

        ledger.delete("2").unwrap();
        let stats = ledger.stats();
        assert_eq!(stats.total_revenue_cents, 500);
        assert_eq!(stats.qr_revenue_cents, 0);
        assert_eq!(stats.total_orders, 1);
    }
}
