//! # Booking Commands
//!
//! Bulk orders in `bookings.json`, priced at the current base price.
//!
//! ```text
//! parpu booking add --name .. --phone .. --address .. --qty 50 [--online]
//! parpu booking status <ID> completed
//! parpu booking list [--status pending] [--search 012]
//! parpu booking stats
//! ```

use chrono::{DateTime, Local, Utc};
use parpu_core::{Booking, BookingBook, BookingDraft, BookingStatus};
use tracing::info;

use super::Session;
use crate::config::ShopConfig;
use crate::error::CliResult;

fn load(session: &Session) -> CliResult<BookingBook> {
    Ok(BookingBook::from_bookings(session.bookings.read()?))
}

fn save(session: &Session, book: &BookingBook) -> CliResult<()> {
    session.bookings.write(book.list())
}

pub fn create(session: &Session, draft: BookingDraft, now: DateTime<Utc>) -> CliResult<Booking> {
    let mut book = load(session)?;
    let booking = book.create(draft, session.config.pricing.base_price(), now)?.clone();
    save(session, &book)?;

    info!(
        booking_id = %booking.id,
        quantity = booking.quantity,
        total = %booking.total_price(),
        status = %booking.status,
        "Booking created"
    );
    Ok(booking)
}

/// Replaces a booking's details; the status follows the payment method again.
pub fn update(session: &Session, id: &str, draft: BookingDraft, now: DateTime<Utc>) -> CliResult<Booking> {
    let mut book = load(session)?;
    let booking = book
        .update(id, draft, session.config.pricing.base_price(), now)?
        .clone();
    save(session, &book)?;

    Ok(booking)
}

pub fn set_status(session: &Session, id: &str, status: BookingStatus, now: DateTime<Utc>) -> CliResult<Booking> {
    let mut book = load(session)?;
    let booking = book.set_status(id, status, now)?.clone();
    save(session, &book)?;

    info!(booking_id = %id, status = %status, "Booking status changed");
    Ok(booking)
}

pub fn delete(session: &Session, id: &str) -> CliResult<Booking> {
    let mut book = load(session)?;
    let booking = book.delete(id)?;
    save(session, &book)?;

    info!(booking_id = %id, "Booking deleted");
    Ok(booking)
}

pub fn list(session: &Session, status: Option<BookingStatus>, search: &str, json: bool) -> CliResult<String> {
    let book = load(session)?;
    let found = book.search(status, search);

    if json {
        return Ok(serde_json::to_string_pretty(&found)?);
    }
    if found.is_empty() {
        return Ok(if book.is_empty() {
            "No bookings yet.".to_string()
        } else {
            "No bookings match.".to_string()
        });
    }

    Ok(found
        .iter()
        .map(|b| render_booking(&session.config, b))
        .collect::<Vec<_>>()
        .join("\n"))
}

pub fn render_booking(config: &ShopConfig, booking: &Booking) -> String {
    let mut out = format!(
        "{}  {}  {:<9} {:<20} {:<14} {:>4} pcs  {:>10}  {}",
        booking.id,
        booking.created_at.with_timezone(&Local).format("%Y-%m-%d"),
        booking.status.as_str(),
        booking.customer_name,
        booking.phone,
        booking.quantity,
        config.format_currency(booking.total_price_cents),
        booking.payment_method.as_str()
    );
    out.push_str(&format!("\n  {}", booking.address));
    if let Some(notes) = &booking.notes {
        out.push_str(&format!("\n  Note: {notes}"));
    }
    out
}

pub fn stats(session: &Session, json: bool) -> CliResult<String> {
    let stats = load(session)?.stats();

    if json {
        return Ok(serde_json::to_string_pretty(&stats)?);
    }

    let fmt = |cents| session.config.format_currency(cents);
    Ok([
        format!("Bookings        {}", stats.total),
        format!(
            "Pending         {} ({} open incl. confirmed)",
            stats.pending,
            fmt(stats.open_revenue_cents)
        ),
        format!("Confirmed       {}", stats.confirmed),
        format!(
            "Completed       {} ({})",
            stats.completed,
            fmt(stats.completed_revenue_cents)
        ),
        format!("Cancelled       {}", stats.cancelled),
    ]
    .join("\n"))
}

// =============================================================================
// Unit Tests
// =============================================================================
