//! # Client Error Types
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Client Error Categories                           │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  ConfigError    │  │ TransportError  │  │     CheckoutError       │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  Read / Write   │  │  Status         │  │  Invalid (CoreError)    │ │
//! │  │  Parse          │  │  Network        │  │  AlreadySubmitting      │ │
//! │  │  Invalid        │  │  Decode         │  │  Failed { message }     │ │
//! │  │                 │  │  InvalidUrl     │  │                         │ │
//! │  └─────────────────┘  └────────┬────────┘  └─────────────────────────┘ │
//! │                                │                                        │
//! │                      ┌─────────▼─────────┐                              │
//! │                      │   ClientError     │  catalog + transport setup   │
//! │                      └───────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use storefront_core::CoreError;
use thiserror::Error;

/// Result type alias for transport calls.
pub type TransportResult<T> = Result<T, TransportError>;

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

// =============================================================================
// Transport Error
// =============================================================================

/// A failed request to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The backend answered with a non-success status.
    ///
    /// `message` is the `message` field of the backend's error body, when
    /// there was one.
    #[error("Request failed with status {status}{}", message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    Status { status: u16, message: Option<String> },

    /// No response: connection refused, timeout, TLS failure.
    #[error("Network error: {0}")]
    Network(String),

    /// The response body could not be decoded.
    #[error("Invalid response body: {0}")]
    Decode(String),

    /// The request path could not be joined onto the base URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl TransportError {
    /// The backend's own error message, if it sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            TransportError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// HTTP status, for status errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for 401/403, which the UI answers by sending the user to log in.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            TransportError::Decode(e.to_string())
        } else {
            TransportError::Network(e.to_string())
        }
    }
}

// =============================================================================
// Client Error
// =============================================================================

/// Errors from the catalog client and transport construction.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The HTTP client could not be built.
    #[error("Failed to build HTTP client: {0}")]
    Setup(String),

    /// The catalog has no product with this id.
    #[error("Product {0} not found")]
    ProductNotFound(String),
}

// =============================================================================
// Config Error
// =============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write config {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("No config path available")]
    NoConfigPath,
}

// =============================================================================
// Checkout Error
// =============================================================================

/// Why an order was not placed.
///
/// `Display` is the text shown to the customer.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Rejected before anything was sent: bad form or empty cart.
    #[error("{0}")]
    Invalid(#[from] CoreError),

    /// Another submission from this session hasn't finished yet.
    #[error("An order is already being placed.")]
    AlreadySubmitting,

    /// The backend refused the order or could not be reached.
    #[error("{message}")]
    Failed {
        message: String,
        #[source]
        source: TransportError,
    },
}

impl CheckoutError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            CheckoutError::Invalid(CoreError::Validation(e)) => e.code(),
            CheckoutError::Invalid(CoreError::EmptyCart) => "empty_cart",
            CheckoutError::AlreadySubmitting => "already_submitting",
            CheckoutError::Failed { .. } => "order_failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::ValidationError;

    #[test]
    fn test_status_error_display() {
        let with_message = TransportError::Status {
            status: 400,
            message: Some("Insufficient stock".to_string()),
        };
        assert_eq!(
            with_message.to_string(),
            "Request failed with status 400: Insufficient stock"
        );
        assert_eq!(with_message.server_message(), Some("Insufficient stock"));

        let bare = TransportError::Status {
            status: 500,
            message: None,
        };
        assert_eq!(bare.to_string(), "Request failed with status 500");
        assert_eq!(bare.server_message(), None);
    }

    #[test]
    fn test_auth_failures() {
        let forbidden = TransportError::Status {
            status: 403,
            message: None,
        };
        assert!(forbidden.is_auth_failure());
        assert!(!TransportError::Network("refused".to_string()).is_auth_failure());
    }

    #[test]
    fn test_checkout_error_codes() {
        let invalid = CheckoutError::Invalid(CoreError::Validation(ValidationError::InvalidPhone));
        assert_eq!(invalid.code(), "invalid_phone");
        assert_eq!(invalid.to_string(), "Invalid Egyptian phone number.");
        assert_eq!(
            CheckoutError::Invalid(CoreError::EmptyCart).code(),
            "empty_cart"
        );
    }
}
