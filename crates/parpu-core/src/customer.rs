//! # Customer Directory
//!
//! Regulars the stall knows by name, with contact details and a running
//! purchase total.
//!
//! ```text
//! add(draft) ──► Customer { total_purchases: 0 }
//!                    │
//!   sell --customer "siti" ──► find_by_name() ──► record_purchase(total)
//!                    │
//! update(id, changes) / delete(id)
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::validation::validate_customer_record;

/// Fields for a new customer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CustomerDraft {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// A partial edit: `None` leaves the field as it is, `Some("")` clears an
/// optional field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CustomerUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub total_purchases_cents: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Customer {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Lifetime spend in cents.
    #[serde(default)]
    pub total_purchases_cents: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

fn optional(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl Customer {
    pub fn new(draft: CustomerDraft, now: DateTime<Utc>) -> CoreResult<Self> {
        validate_customer_record(&draft.name, draft.email.as_deref())?;

        Ok(Customer {
            id: Uuid::new_v4().to_string(),
            name: draft.name.trim().to_string(),
            email: optional(draft.email),
            phone: optional(draft.phone),
            address: optional(draft.address),
            total_purchases_cents: 0,
            created_at: now,
        })
    }

    #[inline]
    pub fn total_purchases(&self) -> Money {
        Money::from_cents(self.total_purchases_cents)
    }

    /// Applies `changes` all-or-nothing.
    pub fn apply(&mut self, changes: CustomerUpdate) -> CoreResult<()> {
        let name = changes.name.as_deref().unwrap_or(&self.name);
        let email = match &changes.email {
            Some(email) => Some(email.as_str()),
            None => self.email.as_deref(),
        };
        validate_customer_record(name, email)?;

        if let Some(name) = changes.name {
            self.name = name.trim().to_string();
        }
        if changes.email.is_some() {
            self.email = optional(changes.email);
        }
        if changes.phone.is_some() {
            self.phone = optional(changes.phone);
        }
        if changes.address.is_some() {
            self.address = optional(changes.address);
        }
        if let Some(total) = changes.total_purchases_cents {
            self.total_purchases_cents = total;
        }

        Ok(())
    }
}

// =============================================================================
// Customer Directory
// =============================================================================

/// Customers in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerDirectory {
    customers: Vec<Customer>,
}

impl CustomerDirectory {
    pub fn new() -> Self {
        CustomerDirectory { customers: Vec::new() }
    }

    pub fn from_customers(mut customers: Vec<Customer>) -> Self {
        customers.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        CustomerDirectory { customers }
    }

    pub fn add(&mut self, draft: CustomerDraft, now: DateTime<Utc>) -> CoreResult<&Customer> {
        let customer = Customer::new(draft, now)?;
        debug!(customer_id = %customer.id, "Customer added");
        self.customers.push(customer);
        Ok(&self.customers[self.customers.len() - 1])
    }

    pub fn update(&mut self, id: &str, changes: CustomerUpdate) -> CoreResult<&Customer> {
        let customer = self.get_mut(id)?;
        customer.apply(changes)?;
        debug!(customer_id = %id, "Customer updated");
        Ok(&*customer)
    }

    pub fn delete(&mut self, id: &str) -> CoreResult<Customer> {
        let index = self
            .customers
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| CoreError::CustomerNotFound(id.to_string()))?;

        debug!(customer_id = %id, "Customer deleted");
        Ok(self.customers.remove(index))
    }

    pub fn get(&self, id: &str) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == id)
    }

    fn get_mut(&mut self, id: &str) -> CoreResult<&mut Customer> {
        self.customers
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| CoreError::CustomerNotFound(id.to_string()))
    }

    /// First customer whose name equals `name`, ignoring case and spacing.
    pub fn find_by_name(&self, name: &str) -> Option<&Customer> {
        let wanted = normalize(name);
        if wanted.is_empty() {
            return None;
        }
        self.customers.iter().find(|c| normalize(&c.name) == wanted)
    }

    /// Adds a sale total to the customer's lifetime spend.
    pub fn record_purchase(&mut self, id: &str, amount: Money) -> CoreResult<&Customer> {
        let customer = self.get_mut(id)?;
        customer.total_purchases_cents = customer.total_purchases_cents.saturating_add(amount.cents());
        debug!(customer_id = %id, amount = %amount, "Purchase recorded");
        Ok(&*customer)
    }

    pub fn list(&self) -> &[Customer] {
        &self.customers
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }
}

fn normalize(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

// =============================================================================
// Unit Tests
// =============================================================================
