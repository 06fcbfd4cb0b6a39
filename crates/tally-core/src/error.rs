//! # Error Types
//!
//! Domain-specific error types for tally-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tally-core errors (this file)                                         │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  tally-db errors (separate crate)                                      │
//! │  └── DbError          - Draft store failures                           │
//! │                                                                         │
//! │  tally-submit errors (separate crate)                                  │
//! │  └── SubmitError      - Remote submission failures                     │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → SubmitError → operator            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (buyer id, status, amounts)
//! 3. Errors are enum variants, never String
//! 4. Every pure component fails closed: errors are raised before any
//!    network effect can happen

use thiserror::Error;

use crate::money::Money;
use crate::order::OrderStatus;
use crate::types::{PayerIdentity, RoleClass};

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic failures.
/// They should be caught and translated to user-friendly messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The computed settlement leaves a credit balance, but the buyer/payer
    /// combination forbids deferred payment.
    ///
    /// ## When This Occurs
    /// - An Ordinary buyer underpays (never allowed)
    /// - A Guide or Dealer underpays without the matching credit flag
    ///
    /// This is a hard precondition checked before any persistence attempt,
    /// not a warning.
    #[error(
        "Credit of {credit_amount} not allowed for {role_class:?} buyer with {payer_identity:?} payment"
    )]
    CreditNotAllowed {
        role_class: RoleClass,
        payer_identity: PayerIdentity,
        credit_amount: Money,
    },

    /// A status transition was requested on a terminal order.
    ///
    /// ## When This Occurs
    /// - Advancing or voiding a `Completed` order
    /// - Advancing or voiding a `Void` order
    #[error("Order is {status:?}, no further transition is permitted")]
    TerminalStatus { status: OrderStatus },

    /// Cart has exceeded maximum allowed lines.
    #[error("Cart cannot have more than {max} lines")]
    CartTooLarge { max: usize },

    /// Line quantity exceeds maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when operator input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be a positive integer.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// The cart has no lines to settle.
    #[error("cart is empty")]
    EmptyCart,
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
    fn test_credit_not_allowed_message() {
        let err = CoreError::CreditNotAllowed {
            role_class: RoleClass::Ordinary,
            payer_identity: PayerIdentity::SelfPay,
            credit_amount: Money::from_units(140),
        };
        assert!(err.to_string().contains("Ordinary"));
        assert!(err.to_string().contains("$140"));
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "buyer".to_string(),
        };
        assert_eq!(err.to_string(), "buyer is required");

        let err = ValidationError::MustNotBeNegative {
            field: "tendered".to_string(),
        };
        assert_eq!(err.to_string(), "tendered must not be negative");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::EmptyCart;
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
