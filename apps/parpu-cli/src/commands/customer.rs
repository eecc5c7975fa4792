//! # Customer Commands
//!
//! Add, edit and remove regulars in `customers.json`. Sales recorded with a
//! matching `--customer` name add to that customer's purchase total.

use chrono::{DateTime, Local, Utc};
use parpu_core::{Customer, CustomerDirectory, CustomerDraft, CustomerUpdate, Money};
use tracing::info;

use super::Session;
use crate::config::ShopConfig;
use crate::error::CliResult;

fn load(session: &Session) -> CliResult<CustomerDirectory> {
    Ok(CustomerDirectory::from_customers(session.customers.read()?))
}

fn save(session: &Session, directory: &CustomerDirectory) -> CliResult<()> {
    session.customers.write(directory.list())
}

pub fn add_customer(session: &Session, draft: CustomerDraft, now: DateTime<Utc>) -> CliResult<Customer> {
    let mut directory = load(session)?;
    let customer = directory.add(draft, now)?.clone();
    save(session, &directory)?;

    info!(customer_id = %customer.id, "Customer added");
    Ok(customer)
}

pub fn update_customer(session: &Session, id: &str, changes: CustomerUpdate) -> CliResult<Customer> {
    let mut directory = load(session)?;
    let customer = directory.update(id, changes)?.clone();
    save(session, &directory)?;

    Ok(customer)
}

pub fn delete_customer(session: &Session, id: &str) -> CliResult<Customer> {
    let mut directory = load(session)?;
    let customer = directory.delete(id)?;
    save(session, &directory)?;

    info!(customer_id = %id, "Customer deleted");
    Ok(customer)
}

/// Adds `amount` to the registered customer called `name`, if there is one.
pub(crate) fn credit_purchase(session: &Session, name: &str, amount: Money) -> CliResult<Option<Customer>> {
    let mut directory = load(session)?;
    let Some(id) = directory.find_by_name(name).map(|c| c.id.clone()) else {
        return Ok(None);
    };

    let customer = directory.record_purchase(&id, amount)?.clone();
    save(session, &directory)?;
    Ok(Some(customer))
}

pub fn list_customers(session: &Session, json: bool) -> CliResult<String> {
    let directory = load(session)?;

    if json {
        return Ok(serde_json::to_string_pretty(directory.list())?);
    }
    if directory.is_empty() {
        return Ok("No customers yet.".to_string());
    }

    Ok(directory
        .list()
        .iter()
        .map(|c| render_customer(&session.config, c))
        .collect::<Vec<_>>()
        .join("\n"))
}

pub fn render_customer(config: &ShopConfig, customer: &Customer) -> String {
    let or_dash = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".to_string());
    format!(
        "{}  {:<24} {:<16} {:<24} {:>10}  since {}",
        customer.id,
        customer.name,
        or_dash(&customer.phone),
        or_dash(&customer.email),
        config.format_currency(customer.total_purchases_cents),
        customer.created_at.with_timezone(&Local).format("%Y-%m-%d")
    )
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::session;
    use crate::error::CliError;
    use parpu_core::CoreError;

    fn draft(name: &str) -> CustomerDraft {
        CustomerDraft {
            name: name.to_string(),
            phone: Some("012-3456789".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_add_and_list() {
        let dir = tempfile::tempdir().unwrap();
        let session = session(&dir);
        assert_eq!(list_customers(&session, false).unwrap(), "No customers yet.");

        let ali = add_customer(&session, draft("Ali"), Utc::now()).unwrap();
        add_customer(&session, draft("Abu"), Utc::now()).unwrap();

        let out = list_customers(&session, false).unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with(&ali.id));
        assert!(lines[0].contains("012-3456789"));
        assert!(lines[0].contains("RM 0.00"));

        let json: Vec<Customer> = serde_json::from_str(&list_customers(&session, true).unwrap()).unwrap();
        assert_eq!(json.len(), 2);
    }

    #[test]
    fn test_add_rejects_bad_email() {
        let dir = tempfile::tempdir().unwrap();
        let session = session(&dir);
        let bad = CustomerDraft {
            email: Some("ali-at-mail".to_string()),
            ..draft("Ali")
        };

        assert!(matches!(
            add_customer(&session, bad, Utc::now()),
            Err(CliError::Core(CoreError::Validation(_)))
        ));
        assert!(!session.customers.path().exists());
    }

    #[test]
    fn test_update_and_delete() {
        let dir = tempfile::tempdir().unwrap();
        let session = session(&dir);
        let id = add_customer(&session, draft("Ali"), Utc::now()).unwrap().id;

        let changes = CustomerUpdate {
            address: Some("Ipoh".to_string()),
            total_purchases_cents: Some(2500),
            ..Default::default()
        };
        let updated = update_customer(&session, &id, changes).unwrap();
        assert_eq!(updated.address.as_deref(), Some("Ipoh"));

        let stored = load(&session).unwrap();
        assert_eq!(stored.get(&id).unwrap().total_purchases_cents, 2500);

        delete_customer(&session, &id).unwrap();
        assert!(load(&session).unwrap().is_empty());
        assert!(matches!(
            delete_customer(&session, &id),
            Err(CliError::Core(CoreError::CustomerNotFound(_)))
        ));
    }

    #[test]
    fn test_credit_purchase_ignores_unknown_names() {
        let dir = tempfile::tempdir().unwrap();
        let session = session(&dir);

        assert!(credit_purchase(&session, "Nobody", Money::from_cents(500)).unwrap().is_none());
        assert!(!session.customers.path().exists());

        add_customer(&session, draft("Siti"), Utc::now()).unwrap();
        let credited = credit_purchase(&session, "siti", Money::from_cents(500)).unwrap().unwrap();
        assert_eq!(credited.total_purchases_cents, 500);
    }
}
