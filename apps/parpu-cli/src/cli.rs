//! CLI command handling

use std::path::PathBuf;

use chrono::{Local, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use parpu_core::{
    BookingDraft, BookingPayment, BookingStatus, CustomerDraft, CustomerUpdate, Money, PaymentMethod,
    DEFAULT_WINDOW_DAYS,
};

use crate::commands::sale::HistoryFilter;
use crate::commands::{booking, customer, dashboard, report, sale, settings, Session};

/// Till for a kacang parpu stall: bundle pricing, sales log, reports, bookings and customers
#[derive(Parser)]
#[command(name = "parpu")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Config file (default: platform config dir)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Sales file (default: $PARPU_SALES_PATH or platform data dir)
    #[arg(long, global = true, value_name = "PATH")]
    sales: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a quantity without recording a sale
    Quote {
        #[arg(allow_negative_numbers = true)]
        qty: i64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Record a sale
    Sell {
        #[arg(allow_negative_numbers = true)]
        qty: i64,

        /// Customer name (default: Guest Customer)
        #[arg(long)]
        customer: Option<String>,

        /// Paid by QR instead of cash
        #[arg(long)]
        qr: bool,
    },

    /// Delete a recorded sale by id
    Delete { id: String },

    /// List recent sales, newest first
    History {
        /// Number of sales to show
        #[arg(long, default_value_t = 20)]
        limit: usize,

        /// Only sales paid this way (cash or qr)
        #[arg(long)]
        method: Option<PaymentMethod>,

        /// Only sales on or after this UTC day (YYYY-MM-DD)
        #[arg(long)]
        since: Option<NaiveDate>,

        /// Only sales on or before this UTC day (YYYY-MM-DD)
        #[arg(long)]
        until: Option<NaiveDate>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show revenue and order totals
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show revenue per weekday for the last N days
    Daily {
        #[arg(long, default_value_t = DEFAULT_WINDOW_DAYS)]
        days: u32,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the report for a day (YYYY-MM-DD) or month (YYYY-MM) as JSON
    Report {
        period: String,

        /// Print the rows as CSV instead
        #[arg(long)]
        csv: bool,
    },

    /// Bulk-order bookings
    Booking {
        #[command(subcommand)]
        action: BookingAction,
    },

    /// Registered customers
    Customer {
        #[command(subcommand)]
        action: CustomerAction,
    },

    /// Show or edit the base price and bundle promos
    Pricing {
        #[command(subcommand)]
        action: Option<PricingAction>,
    },

    /// Show the effective config
    Config {
        /// Write the default config file if none exists
        #[arg(long)]
        init: bool,
    },
}

#[derive(Subcommand)]
enum PricingAction {
    /// Set the price of one piece, e.g. 3.50
    SetBase { price: String },

    /// Add a bundle: QTY pieces for PRICE
    Add { qty: i64, price: String },

    /// Remove a bundle by id
    Remove { id: String },

    /// Restore the official price board
    Reset,
}

#[derive(Args)]
struct BookingFields {
    /// Customer or shop name
    #[arg(long)]
    name: String,

    #[arg(long)]
    phone: String,

    /// Delivery address
    #[arg(long)]
    address: String,

    #[arg(long)]
    qty: i64,

    /// Paid online up front (confirmed); default is cash on delivery (pending)
    #[arg(long)]
    online: bool,

    #[arg(long)]
    notes: Option<String>,
}

impl From<BookingFields> for BookingDraft {
    fn from(fields: BookingFields) -> Self {
        BookingDraft {
            customer_name: fields.name,
            phone: fields.phone,
            address: fields.address,
            quantity: fields.qty,
            payment_method: if fields.online {
                BookingPayment::Online
            } else {
                BookingPayment::Cod
            },
            notes: fields.notes,
        }
    }
}

#[derive(Subcommand)]
enum BookingAction {
    /// Take a new booking
    Add(BookingFields),

    /// Replace a booking's details
    Edit {
        id: String,

        #[command(flatten)]
        fields: BookingFields,
    },

    /// Move a booking to pending, confirmed, completed or cancelled
    Status { id: String, status: BookingStatus },

    /// Delete a booking by id
    Delete { id: String },

    /// List bookings, newest first
    List {
        #[arg(long)]
        status: Option<BookingStatus>,

        /// Match against name or phone
        #[arg(long, default_value = "")]
        search: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Counts per status and booking revenue
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum CustomerAction {
    /// Register a customer
    Add {
        name: String,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        address: Option<String>,
    },

    /// Change details; pass an empty value to clear a field
    Edit {
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        address: Option<String>,

        /// Overwrite the lifetime purchase total, e.g. 120.50
        #[arg(long, value_name = "AMOUNT")]
        total_purchases: Option<String>,
    },

    /// Remove a customer by id
    Delete { id: String },

    /// List customers
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        let mut session = Session::open(self.config, self.sales)?;

        let output = match self.command {
            Commands::Quote { qty, json } => sale::quote(&session, qty, json)?,
            Commands::Sell { qty, customer, qr } => {
                let method = if qr { PaymentMethod::Qr } else { PaymentMethod::Cash };
                let recorded = sale::sell(&session, qty, customer.as_deref(), method, Utc::now())?;
                sale::render_sale(&session.config, &recorded)
            }
            Commands::Delete { id } => {
                let removed = sale::delete(&session, &id)?;
                format!(
                    "Deleted {} ({})",
                    removed.id,
                    session.config.format_currency(removed.total_price_cents)
                )
            }
            Commands::History {
                limit,
                method,
                since,
                until,
                json,
            } => sale::history(&session, limit, HistoryFilter { method, since, until }, json)?,
            Commands::Stats { json } => dashboard::stats(&session, json)?,
            Commands::Daily { days, json } => dashboard::daily(&session, days, &Local::now(), json)?,
            Commands::Report { period, csv } => {
                if csv {
                    report::report_csv(&session, &period)?
                } else {
                    report::report(&session, &period)?
                }
            }
            Commands::Booking { action } => run_booking(&session, action)?,
            Commands::Customer { action } => run_customer(&session, action)?,
            Commands::Pricing { action } => match action {
                None => settings::show_pricing(&session),
                Some(PricingAction::SetBase { price }) => settings::set_base_price(&mut session, &price)?,
                Some(PricingAction::Add { qty, price }) => settings::add_promo(&mut session, qty, &price)?,
                Some(PricingAction::Remove { id }) => settings::remove_promo(&mut session, &id)?,
                Some(PricingAction::Reset) => settings::reset_pricing(&mut session)?,
            },
            Commands::Config { init } => {
                if init {
                    settings::init_config(&session)?
                } else {
                    settings::show_config(&session)?
                }
            }
        };

        println!("{output}");
        Ok(())
    }
}

fn run_booking(session: &Session, action: BookingAction) -> anyhow::Result<String> {
    let config = &session.config;
    Ok(match action {
        BookingAction::Add(fields) => {
            let created = booking::create(session, fields.into(), Utc::now())?;
            format!("Booked\n{}", booking::render_booking(config, &created))
        }
        BookingAction::Edit { id, fields } => {
            let updated = booking::update(session, &id, fields.into(), Utc::now())?;
            format!("Updated\n{}", booking::render_booking(config, &updated))
        }
        BookingAction::Status { id, status } => {
            let changed = booking::set_status(session, &id, status, Utc::now())?;
            booking::render_booking(config, &changed)
        }
        BookingAction::Delete { id } => {
            let removed = booking::delete(session, &id)?;
            format!("Deleted booking {} ({})", removed.id, removed.customer_name)
        }
        BookingAction::List { status, search, json } => booking::list(session, status, &search, json)?,
        BookingAction::Stats { json } => booking::stats(session, json)?,
    })
}

fn run_customer(session: &Session, action: CustomerAction) -> anyhow::Result<String> {
    let config = &session.config;
    Ok(match action {
        CustomerAction::Add {
            name,
            email,
            phone,
            address,
        } => {
            let draft = CustomerDraft {
                name,
                email,
                phone,
                address,
            };
            let added = customer::add_customer(session, draft, Utc::now())?;
            customer::render_customer(config, &added)
        }
        CustomerAction::Edit {
            id,
            name,
            email,
            phone,
            address,
            total_purchases,
        } => {
            let total_purchases_cents = total_purchases
                .map(|amount| Money::parse_decimal(&amount).map(|m| m.cents()))
                .transpose()?;
            let changes = CustomerUpdate {
                name,
                email,
                phone,
                address,
                total_purchases_cents,
            };
            let updated = customer::update_customer(session, &id, changes)?;
            customer::render_customer(config, &updated)
        }
        CustomerAction::Delete { id } => {
            let removed = customer::delete_customer(session, &id)?;
            format!("Deleted customer {} ({})", removed.id, removed.name)
        }
        CustomerAction::List { json } => customer::list_customers(session, json)?,
    })
}
