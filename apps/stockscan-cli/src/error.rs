//! # Application Error Type
//!
//! Unified error type for console and CLI commands.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in StockScan                              │
//! │                                                                         │
//! │  Command Function  ──►  Result<T, AppError>                             │
//! │         │                                                               │
//! │         ├── CoreError::NothingSelected ────► NOTHING_SELECTED            │
//! │         ├── CoreError::IndexOutOfRange ────► NOT_FOUND                   │
//! │         ├── ValidationError ───────────────► VALIDATION_ERROR            │
//! │         ├── StoreError::Transport ─────────► STORE_UNAVAILABLE           │
//! │         ├── StoreError::Unauthorized ──────► UNAUTHORIZED                │
//! │         └── StoreError::Api / Decode / .. ─► STORE_ERROR                 │
//! │                                                                         │
//! │  Console prints `message`; `--json` output carries `code` as well.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use stockscan_core::{CoreError, ValidationError};
use stockscan_store::StoreError;

use crate::config::ConfigError;

/// Error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOTHING_SELECTED",
///   "message": "Select at least one barcode."
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable message for display
    pub message: String,
}

/// Error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Unknown row id or session position
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Save requested with nothing selected
    NothingSelected,

    /// The store rejected the access key
    Unauthorized,

    /// The store could not be reached
    StoreUnavailable,

    /// The store answered with an error
    StoreError,

    /// Startup configuration is missing or invalid
    ConfigError,

    /// Anything else
    Internal,
}

impl AppError {
    /// Creates a new error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        AppError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Internal, message)
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::validation(err.to_string())
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NothingSelected => AppError::new(
                ErrorCode::NothingSelected,
                "Select at least one barcode.",
            ),
            CoreError::IndexOutOfRange { index, .. } => {
                // Console positions are 1-based
                AppError::not_found("Scanned barcode", &(index + 1).to_string())
            }
            CoreError::Validation(e) => e.into(),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Transport(e) => {
                tracing::error!("Store unreachable: {}", e);
                AppError::new(
                    ErrorCode::StoreUnavailable,
                    "Could not reach the inventory store",
                )
            }
            StoreError::Unauthorized { status, .. } => AppError::new(
                ErrorCode::Unauthorized,
                format!("The inventory store rejected the access key ({})", status),
            ),
            StoreError::Validation(e) => e.into(),
            other => {
                // Log the details, show a generic message
                tracing::error!("Store operation failed: {}", other);
                AppError::new(ErrorCode::StoreError, "Inventory store operation failed")
            }
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {}
