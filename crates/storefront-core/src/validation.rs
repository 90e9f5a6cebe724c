//! # Validation Module
//!
//! Checkout form validation.
//!
//! ## Check Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  validate_customer_form(form)                                           │
//! │                                                                         │
//! │  1. Required fields (form order) ──► MissingField { field }             │
//! │           │ all filled                                                  │
//! │           ▼                                                             │
//! │  2. Phone: ^01[0125][0-9]{8}$ ─────► InvalidPhone                        │
//! │           │ ok                                                          │
//! │           ▼                                                             │
//! │  3. Email: local@domain ───────────► InvalidEmail                        │
//! │           │ ok                                                          │
//! │           ▼                                                             │
//! │        Ok(())                                                           │
//! │                                                                         │
//! │  First failure wins. Nothing after it is checked.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::validation::{validate_email, validate_phone_number};
//!
//! assert!(validate_phone_number("01012345678").is_ok());
//! assert!(validate_phone_number("02012345678").is_err());
//! assert!(validate_email("a@b.com").is_ok());
//! ```

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ValidationError;
use crate::types::CustomerForm;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Egyptian mobile: `01`, then one of 0/1/2/5, then 8 digits.
static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^01[0125][0-9]{8}$").expect("Invalid phone regex pattern"));

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9+_.-]+@(.+)$").expect("Invalid email regex pattern"));

/// Validates the whole checkout form.
///
/// A field holding only whitespace counts as empty.
///
/// ## Example
/// ```rust
/// use storefront_core::validation::validate_customer_form;
/// use storefront_core::{CustomerForm, ValidationError};
///
/// let form = CustomerForm {
///     email: "not-an-email".to_string(),
///     ..CustomerForm::default()
/// };
///
/// // Missing fields are reported before the bad email.
/// assert!(matches!(
///     validate_customer_form(&form),
///     Err(ValidationError::MissingField { field: "name" })
/// ));
/// ```
pub fn validate_customer_form(form: &CustomerForm) -> ValidationResult<()> {
    if let Some((field, _)) = form
        .fields()
        .into_iter()
        .find(|(_, value)| value.is_empty())
    {
        return Err(ValidationError::MissingField { field });
    }

    validate_phone_number(&form.phone_number)?;
    validate_email(&form.email)?;
    Ok(())
}

/// Validates an Egyptian mobile number (11 digits, no separators).
pub fn validate_phone_number(phone: &str) -> ValidationResult<()> {
    if PHONE_PATTERN.is_match(phone) {
        Ok(())
    } else {
        Err(ValidationError::InvalidPhone)
    }
}

/// Validates a basic `local@domain` email shape.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    if EMAIL_PATTERN.is_match(email) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> CustomerForm {
        CustomerForm {
            email: "mona@example.com".to_string(),
            name: "Mona".to_string(),
            city: "Cairo".to_string(),
            street: "Tahrir".to_string(),
            building_number: "12".to_string(),
            flat_number: "3".to_string(),
            phone_number: "01012345678".to_string(),
        }
    }

    #[test]
    fn test_valid_form_passes() {
        assert!(validate_customer_form(&valid_form()).is_ok());
    }

    #[test]
    fn test_validate_phone_number() {
        for ok in ["01012345678", "01112345678", "01212345678", "01512345678"] {
            assert!(validate_phone_number(ok).is_ok(), "{ok}");
        }
        for bad in [
            "02012345678",
            "01312345678",
            "01,12345678",
            "0101234567",
            "010123456789",
            "+201012345678",
            "",
        ] {
            assert_eq!(
                validate_phone_number(bad),
                Err(ValidationError::InvalidPhone),
                "{bad}"
            );
        }
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("a.b+c@shop.eg").is_ok());
        assert_eq!(validate_email("nobody"), Err(ValidationError::InvalidEmail));
        assert_eq!(validate_email("@shop.eg"), Err(ValidationError::InvalidEmail));
        assert_eq!(validate_email("a b@shop.eg"), Err(ValidationError::InvalidEmail));
    }

    #[test]
    fn test_missing_field_checked_before_phone_and_email() {
        let form = CustomerForm {
            phone_number: String::new(),
            email: "broken".to_string(),
            ..valid_form()
        };
        let err = validate_customer_form(&form).unwrap_err();
        assert_eq!(err.code(), "missing_field");
        assert_eq!(err, ValidationError::MissingField { field: "phoneNumber" });
    }

    #[test]
    fn test_phone_checked_before_email() {
        let form = CustomerForm {
            phone_number: "02012345678".to_string(),
            email: "broken".to_string(),
            ..valid_form()
        };
        assert_eq!(validate_customer_form(&form), Err(ValidationError::InvalidPhone));
    }

    #[test]
    fn test_whitespace_only_field_is_not_missing() {
        let form = CustomerForm {
            name: " ".to_string(),
            ..valid_form()
        };
        assert_eq!(validate_customer_form(&form), Ok(()));
    }

    #[test]
    fn test_invalid_email_reported_last() {
        let form = CustomerForm {
            email: "broken".to_string(),
            ..valid_form()
        };
        assert_eq!(validate_customer_form(&form), Err(ValidationError::InvalidEmail));
    }
}
