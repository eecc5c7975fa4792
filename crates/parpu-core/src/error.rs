//! # Error Types
//!
//! Domain-specific error types for parpu-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  parpu-core errors (this file)                                         │
//! │  ├── CoreError        - Ledger, booking, customer and report failures  │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  parpu-cli errors (app crate)                                          │
//! │  └── CliError         - Config and sales file failures                 │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CliError → anyhow in main         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `quote`, `summarize` and `daily_revenue` never return these: they are
//! total functions with defined results for every degenerate input.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Sale id is not present in the ledger.
    #[error("Sale not found: {0}")]
    SaleNotFound(String),

    #[error("Booking not found: {0}")]
    BookingNotFound(String),

    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    /// Promo id is not present in the pricing configuration.
    #[error("Promo not found: {0}")]
    PromoNotFound(String),

    /// A report was requested for a period without any sales.
    ///
    /// ## User Workflow
    /// ```text
    /// Reports ─► pick 2024-05-01 ─► build_report()
    ///                                    │
    ///                                    ▼
    ///                         NoSalesInPeriod { period }
    ///                                    │
    ///                                    ▼
    ///               UI shows: "No data found for the selected period."
    /// ```
    #[error("No sales found for {period}")]
    NoSalesInPeriod { period: String },

    /// Report period string is neither `YYYY-MM-DD` nor `YYYY-MM`.
    #[error("Invalid report period '{input}': expected YYYY-MM-DD or YYYY-MM")]
    InvalidPeriod { input: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised by the checks the host runs before recording a sale or editing
/// pricing. The pricing engine itself never validates.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Invalid format (e.g., invalid UUID, malformed amount).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::NoSalesInPeriod {
            period: "2024-05-01".to_string(),
        };
        assert_eq!(err.to_string(), "No sales found for 2024-05-01");

        let err = CoreError::SaleNotFound("abc".to_string());
        assert_eq!(err.to_string(), "Sale not found: abc");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be positive");

        let err = ValidationError::TooLong {
            field: "customer name".to_string(),
            max: 100,
        };
        assert_eq!(err.to_string(), "customer name must be at most 100 characters");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "id".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
