//! # Bulk Order Bookings
//!
//! Wholesale orders taken ahead of delivery, with a small status workflow.
//!
//! ## Status Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Booking Lifecycle                                    │
//! │                                                                         │
//! │  create / revise                                                        │
//! │     │                                                                   │
//! │     ├── paid online ──► Confirmed ──┐                                   │
//! │     │                               ├──► Completed  (counts as revenue) │
//! │     └── cash on delivery ► Pending ─┘                                   │
//! │                                                                         │
//! │  Any status ──► set_status() ──► any other status (incl. Cancelled)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Bookings are priced at the plain base price times quantity. Bundle promos
//! are a counter-sale thing and never apply here.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::title_case;
use crate::validation::validate_booking;

// =============================================================================
// Status & Payment
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 4] = [
        BookingStatus::Pending,
        BookingStatus::Confirmed,
        BookingStatus::Completed,
        BookingStatus::Cancelled,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    /// Pending or confirmed: money that is expected but not yet in hand.
    pub const fn is_open(&self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Confirmed)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BookingStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::InvalidFormat {
                field: "status".to_string(),
                reason: "expected pending, confirmed, completed or cancelled".to_string(),
            })
    }
}

/// How a booking will be paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum BookingPayment {
    /// Paid up front by bank transfer or e-wallet.
    Online,
    /// Cash on delivery.
    #[default]
    Cod,
}

impl BookingPayment {
    pub const fn as_str(&self) -> &'static str {
        match self {
            BookingPayment::Online => "online",
            BookingPayment::Cod => "cod",
        }
    }

    /// Status a booking takes whenever it is saved with this payment method.
    pub const fn initial_status(&self) -> BookingStatus {
        match self {
            BookingPayment::Online => BookingStatus::Confirmed,
            BookingPayment::Cod => BookingStatus::Pending,
        }
    }
}

impl fmt::Display for BookingPayment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingPayment {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "online" => Ok(BookingPayment::Online),
            "cod" => Ok(BookingPayment::Cod),
            _ => Err(ValidationError::InvalidFormat {
                field: "payment method".to_string(),
                reason: "expected online or cod".to_string(),
            }),
        }
    }
}

// =============================================================================
// Booking
// =============================================================================

/// The editable part of a booking, as typed into the booking form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BookingDraft {
    pub customer_name: String,
    pub phone: String,
    pub address: String,
    pub quantity: i64,
    pub payment_method: BookingPayment,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Booking {
    pub id: String,
    pub customer_name: String,
    pub phone: String,
    pub address: String,
    pub quantity: i64,
    pub payment_method: BookingPayment,
    pub status: BookingStatus,
    /// `quantity` × base price at the time of the last save.
    pub total_price_cents: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Validates `draft` and prices it at `base_price` per piece.
    ///
    /// ```rust
    /// use chrono::Utc;
    /// use parpu_core::{Booking, BookingDraft, BookingPayment, BookingStatus, Money};
    ///
    /// let draft = BookingDraft {
    ///     customer_name: "kedai runcit ah seng".into(),
    ///     phone: "012-3456789".into(),
    ///     address: "jalan 3, ipoh".into(),
    ///     quantity: 50,
    ///     payment_method: BookingPayment::Online,
    ///     notes: None,
    /// };
    /// let booking = Booking::new(draft, Money::from_cents(300), Utc::now()).unwrap();
    ///
    /// assert_eq!(booking.customer_name, "Kedai Runcit Ah Seng");
    /// assert_eq!(booking.total_price_cents, 15_000);
    /// assert_eq!(booking.status, BookingStatus::Confirmed);
    /// ```
    pub fn new(draft: BookingDraft, base_price: Money, now: DateTime<Utc>) -> CoreResult<Self> {
        validate_booking(&draft)?;

        let mut booking = Booking {
            id: Uuid::new_v4().to_string(),
            customer_name: String::new(),
            phone: String::new(),
            address: String::new(),
            quantity: 0,
            payment_method: draft.payment_method,
            status: draft.payment_method.initial_status(),
            total_price_cents: 0,
            notes: None,
            created_at: now,
            updated_at: now,
        };
        booking.fill(draft, base_price);

        Ok(booking)
    }

    /// Replaces the editable fields. The status is re-derived from the
    /// payment method, so a revised booking goes back to pending/confirmed.
    pub fn revise(&mut self, draft: BookingDraft, base_price: Money, now: DateTime<Utc>) -> CoreResult<()> {
        validate_booking(&draft)?;

        self.fill(draft, base_price);
        self.status = self.payment_method.initial_status();
        self.updated_at = now;
        Ok(())
    }

    fn fill(&mut self, draft: BookingDraft, base_price: Money) {
        self.customer_name = title_case(&draft.customer_name);
        self.phone = draft.phone.trim().to_string();
        self.address = title_case(&draft.address);
        self.quantity = draft.quantity;
        self.payment_method = draft.payment_method;
        self.total_price_cents = base_price.multiply_quantity(draft.quantity).cents();
        self.notes = draft
            .notes
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
    }

    #[inline]
    pub fn total_price(&self) -> Money {
        Money::from_cents(self.total_price_cents)
    }

    /// Case-insensitive match on the name, plain substring match on the phone.
    /// An empty term matches everything.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.trim();
        self.customer_name.to_lowercase().contains(&term.to_lowercase()) || self.phone.contains(term)
    }
}

// =============================================================================
// Booking Stats
// =============================================================================

/// Header cards on the booking screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BookingStats {
    pub total: usize,
    pub pending: usize,
    pub confirmed: usize,
    pub completed: usize,
    pub cancelled: usize,
    /// Sum over completed bookings.
    pub completed_revenue_cents: i64,
    /// Sum over pending and confirmed bookings.
    pub open_revenue_cents: i64,
}

pub fn booking_stats(bookings: &[Booking]) -> BookingStats {
    bookings.iter().fold(BookingStats::default(), |mut stats, b| {
        stats.total += 1;
        match b.status {
            BookingStatus::Pending => stats.pending += 1,
            BookingStatus::Confirmed => stats.confirmed += 1,
            BookingStatus::Completed => stats.completed += 1,
            BookingStatus::Cancelled => stats.cancelled += 1,
        }
        if b.status == BookingStatus::Completed {
            stats.completed_revenue_cents += b.total_price_cents;
        } else if b.status.is_open() {
            stats.open_revenue_cents += b.total_price_cents;
        }
        stats
    })
}

// =============================================================================
// Booking Book
// =============================================================================

/// All bookings, newest created first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingBook {
    bookings: Vec<Booking>,
}

impl BookingBook {
    pub fn new() -> Self {
        BookingBook { bookings: Vec::new() }
    }

    pub fn from_bookings(mut bookings: Vec<Booking>) -> Self {
        bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        BookingBook { bookings }
    }

    pub fn create(&mut self, draft: BookingDraft, base_price: Money, now: DateTime<Utc>) -> CoreResult<&Booking> {
        let booking = Booking::new(draft, base_price, now)?;
        debug!(
            booking_id = %booking.id,
            quantity = booking.quantity,
            status = %booking.status,
            "Booking created"
        );
        self.bookings.insert(0, booking);
        Ok(&self.bookings[0])
    }

    pub fn update(
        &mut self,
        id: &str,
        draft: BookingDraft,
        base_price: Money,
        now: DateTime<Utc>,
    ) -> CoreResult<&Booking> {
        let booking = self.get_mut(id)?;
        booking.revise(draft, base_price, now)?;
        debug!(booking_id = %id, status = %booking.status, "Booking updated");
        Ok(&*booking)
    }

    pub fn set_status(&mut self, id: &str, status: BookingStatus, now: DateTime<Utc>) -> CoreResult<&Booking> {
        let booking = self.get_mut(id)?;
        debug!(booking_id = %id, from = %booking.status, to = %status, "Booking status changed");
        booking.status = status;
        booking.updated_at = now;
        Ok(&*booking)
    }

    pub fn delete(&mut self, id: &str) -> CoreResult<Booking> {
        let index = self
            .bookings
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| CoreError::BookingNotFound(id.to_string()))?;

        debug!(booking_id = %id, "Booking deleted");
        Ok(self.bookings.remove(index))
    }

    pub fn get(&self, id: &str) -> Option<&Booking> {
        self.bookings.iter().find(|b| b.id == id)
    }

    fn get_mut(&mut self, id: &str) -> CoreResult<&mut Booking> {
        self.bookings
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| CoreError::BookingNotFound(id.to_string()))
    }

    pub fn list(&self) -> &[Booking] {
        &self.bookings
    }

    /// Bookings with the given status (all when `None`) whose name or phone
    /// matches `term`.
    pub fn search(&self, status: Option<BookingStatus>, term: &str) -> Vec<&Booking> {
        self.bookings
            .iter()
            .filter(|b| status.map_or(true, |s| b.status == s))
            .filter(|b| b.matches(term))
            .collect()
    }

    pub fn stats(&self) -> BookingStats {
        booking_stats(&self.bookings)
    }

    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
