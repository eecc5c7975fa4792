//! # Validation Module
//!
//! Input checks the host runs before calling into the core.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend / CLI argument parsing                              │
//! │  ├── Type checks (quantity is an integer)                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Order quantity, customer name                                     │
//! │  └── Settings edits: base price, promo rules                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Pricing engine / aggregator                                  │
//! │  └── NO validation: every input has a defined result                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use parpu_core::validation::{validate_quantity, validate_promo_rule};
//!
//! assert!(validate_quantity(4).is_ok());
//! assert!(validate_quantity(0).is_err());
//! assert!(validate_promo_rule(2, 500).is_ok());
//! ```

use crate::booking::BookingDraft;
use crate::error::ValidationError;
use crate::{MAX_CUSTOMER_NAME_LEN, MAX_ORDER_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Order Validators
// =============================================================================

/// Validates the quantity of a new order.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  New Order                                                              │
/// │                                                                         │
/// │  Cashier enters quantity: 4                                            │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_quantity(4) ← THIS FUNCTION                                  │
/// │       │                                                                 │
/// │       ├── qty <= 0?  → Error: "quantity must be positive"              │
/// │       ├── qty > 999? → Error: "quantity must be between 1 and 999"     │
/// │       │                                                                 │
/// │       └── OK → quote + record sale                                     │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ORDER_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ORDER_QUANTITY,
        });
    }

    Ok(())
}

/// Validates an optional customer name. Empty is fine (guest checkout).
pub fn validate_customer_name(name: &str) -> ValidationResult<()> {
    if name.trim().chars().count() > MAX_CUSTOMER_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "customer name".to_string(),
            max: MAX_CUSTOMER_NAME_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Settings Validators
// =============================================================================

/// Validates the standard unit price. Zero is allowed (giveaway day).
pub fn validate_base_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "base price".to_string(),
        });
    }

    Ok(())
}

/// Validates a new bundle rule: both quantity and price must be positive.
pub fn validate_promo_rule(quantity: i64, price_cents: i64) -> ValidationResult<()> {
    if quantity <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "promo quantity".to_string(),
        });
    }

    if price_cents <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "promo price".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Booking & Customer Validators
// =============================================================================

fn required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Name, phone and address are required; bulk orders have no upper bound.
pub fn validate_booking(draft: &BookingDraft) -> ValidationResult<()> {
    required("customer name", &draft.customer_name)?;
    validate_customer_name(&draft.customer_name)?;
    required("phone", &draft.phone)?;
    required("address", &draft.address)?;

    if draft.quantity <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// A registered customer needs a name; contact details are optional.
pub fn validate_customer_record(name: &str, email: Option<&str>) -> ValidationResult<()> {
    required("customer name", name)?;
    validate_customer_name(name)?;

    if let Some(email) = email.map(str::trim).filter(|e| !e.is_empty()) {
        let valid = email
            .split_once('@')
            .is_some_and(|(user, domain)| !user.is_empty() && domain.contains('.') && !domain.starts_with('.'));
        if !valid {
            return Err(ValidationError::InvalidFormat {
                field: "email".to_string(),
                reason: "must look like name@example.com".to_string(),
            });
        }
    }

    Ok(())
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a sale id before a delete.
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
