//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                    │
//! │  ├── CoreError        - Checkout preconditions                         │
//! │  └── ValidationError  - Checkout form failures (shown verbatim)        │
//! │                                                                         │
//! │  storefront-store errors (separate crate)                              │
//! │  └── StoreError       - Durable storage failures (always swallowed)    │
//! │                                                                         │
//! │  storefront-client errors (separate crate)                             │
//! │  ├── TransportError   - HTTP status / network failures                 │
//! │  └── CheckoutError    - What the checkout screen reports               │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CheckoutError → CLI / UI          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Errors are enum variants, never String
//! 3. Each validation variant has a stable machine code and a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised while turning a cart and a form into an order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The checkout form was rejected.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// There is nothing to order.
    #[error("Your cart is empty.")]
    EmptyCart,
}

// =============================================================================
// Validation Error
// =============================================================================

/// Checkout form validation failures.
///
/// Only the first failure is ever reported; see
/// [`crate::validation::validate_customer_form`] for the order checks run in.
/// The `Display` text is what the customer sees.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is empty.
    ///
    /// `field` is the wire name of the first empty field (e.g. `"phoneNumber"`).
    #[error("Please fill in all fields.")]
    MissingField { field: &'static str },

    /// Phone number is not an Egyptian mobile number.
    #[error("Invalid Egyptian phone number.")]
    InvalidPhone,

    /// Email is not shaped like `local@domain`.
    #[error("Invalid email format.")]
    InvalidEmail,
}

impl ValidationError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::MissingField { .. } => "missing_field",
            ValidationError::InvalidPhone => "invalid_phone",
            ValidationError::InvalidEmail => "invalid_email",
        }
    }
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
    fn test_validation_codes() {
        let err = ValidationError::MissingField {
            field: "phoneNumber",
        };
        assert_eq!(err.code(), "missing_field");
        assert_eq!(ValidationError::InvalidPhone.code(), "invalid_phone");
        assert_eq!(ValidationError::InvalidEmail.code(), "invalid_email");
    }

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(
            ValidationError::InvalidPhone.to_string(),
            "Invalid Egyptian phone number."
        );
        assert_eq!(
            ValidationError::MissingField { field: "city" }.to_string(),
            "Please fill in all fields."
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::InvalidEmail.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert_eq!(core_err.to_string(), "Invalid email format.");
    }
}
