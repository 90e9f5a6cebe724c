//! # CLI Error Type
//!
//! Unified error type for commands.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the CLI                                │
//! │                                                                         │
//! │  Command Function  ──► Result<String, CliError>                         │
//! │         │                                                               │
//! │         ├── ConfigError ───────────────► CONFIG_ERROR                   │
//! │         ├── StoreError ────────────────► STORAGE_ERROR                  │
//! │         ├── ClientError / Transport ───► NETWORK_ERROR | NOT_FOUND      │
//! │         └── CheckoutError                                               │
//! │               ├── Invalid ─────────────► VALIDATION_ERROR               │
//! │               ├── AlreadySubmitting ───► BUSY                           │
//! │               └── Failed ──────────────► ORDER_FAILED                   │
//! │                                                                         │
//! │  main prints "[CODE] message" on stderr and exits non-zero              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use serde::Serialize;
use storefront_client::{CheckoutError, ClientError, ConfigError, TransportError};
use storefront_store::StoreError;
use thiserror::Error;

/// Error returned from commands.
///
/// ## Serialization
/// ```json
/// { "code": "VALIDATION_ERROR", "message": "Invalid Egyptian phone number." }
/// ```
#[derive(Debug, Clone, Serialize, Error)]
#[serde(rename_all = "camelCase")]
#[error("[{code}] {message}")]
pub struct CliError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Bad input: checkout form, unknown size, empty cart
    ValidationError,
    /// Product or size does not exist
    NotFound,
    /// Backend unreachable or answered with an error
    NetworkError,
    /// Backend refused the order
    OrderFailed,
    /// An order is already being placed
    Busy,
    /// Configuration could not be loaded
    ConfigError,
    /// Local storage could not be opened
    StorageError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::NetworkError => "NETWORK_ERROR",
            ErrorCode::OrderFailed => "ORDER_FAILED",
            ErrorCode::Busy => "BUSY",
            ErrorCode::ConfigError => "CONFIG_ERROR",
            ErrorCode::StorageError => "STORAGE_ERROR",
        };
        f.write_str(code)
    }
}

impl CliError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        CliError {
            code,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::ValidationError, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::NotFound, message)
    }
}

impl From<TransportError> for CliError {
    fn from(err: TransportError) -> Self {
        let message = match err.server_message() {
            Some(message) => message.to_string(),
            None => err.to_string(),
        };
        CliError::new(ErrorCode::NetworkError, message)
    }
}

impl From<ClientError> for CliError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Transport(e) => e.into(),
            ClientError::Config(e) => e.into(),
            ClientError::Setup(message) => CliError::new(ErrorCode::NetworkError, message),
            ClientError::ProductNotFound(id) => {
                CliError::not_found(format!("Product not found: {id}"))
            }
        }
    }
}

impl From<CheckoutError> for CliError {
    fn from(err: CheckoutError) -> Self {
        let code = match &err {
            CheckoutError::Invalid(_) => ErrorCode::ValidationError,
            CheckoutError::AlreadySubmitting => ErrorCode::Busy,
            CheckoutError::Failed { .. } => ErrorCode::OrderFailed,
        };
        CliError::new(code, err.to_string())
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl From<StoreError> for CliError {
    fn from(err: StoreError) -> Self {
        tracing::error!("Storage error: {}", err);
        CliError::new(ErrorCode::StorageError, err.to_string())
    }
}
