//! # Store Error Types
//!
//! Error types for inventory store operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  reqwest::Error / non-2xx response      sqlx::Error                    │
//! │       │                                      │                          │
//! │       └──────────────┬───────────────────────┘                          │
//! │                      ▼                                                  │
//! │  StoreError (this module) ← Adds categorization                        │
//! │       │                                                                 │
//! │       ├── list / insert_batch ──► returned to the caller               │
//! │       │                                                                 │
//! │       └── update / remove / clear ──► logged and absorbed              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is no `NotFound`: updating or deleting an id that no
//! longer exists is indistinguishable from success at this layer.

use stockscan_core::ValidationError;
use thiserror::Error;

/// Inventory store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The remote store could not be reached.
    ///
    /// ## When This Occurs
    /// - DNS / TLS / connection refused
    /// - Connection dropped mid-request
    #[error("Transport error: {0}")]
    Transport(String),

    /// The access key was rejected (HTTP 401/403).
    #[error("Unauthorized ({status}): {body}")]
    Unauthorized { status: u16, body: String },

    /// The remote API answered with any other non-2xx status.
    #[error("Store API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// The response body did not match the expected row shape.
    #[error("Could not decode store response: {0}")]
    Decode(String),

    /// Local database connection failed.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Local schema migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Local query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Input rejected before anything was sent.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Anything else.
    #[error("Internal store error: {0}")]
    Internal(String),
}

impl StoreError {
    /// Builds the error for a non-2xx HTTP status.
    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        match status {
            401 | 403 => StoreError::Unauthorized { status, body },
            _ => StoreError::Api { status, body },
        }
    }

    /// True for failures that happened before the store saw the request.
    pub fn is_transport(&self) -> bool {
        matches!(self, StoreError::Transport(_) | StoreError::ConnectionFailed(_))
    }
}

/// Convert reqwest errors to StoreError.
///
/// ## Error Mapping
/// ```text
/// is_decode()           → StoreError::Decode
/// status() = Some(s)    → StoreError::from_status(s)
/// connect / timeout / … → StoreError::Transport
/// ```
impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return StoreError::Decode(err.to_string());
        }

        if let Some(status) = err.status() {
            return StoreError::from_status(status.as_u16(), err.to_string());
        }

        StoreError::Transport(err.to_string())
    }
}

/// Convert sqlx errors to StoreError.
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => StoreError::QueryFailed(db_err.message().to_string()),

            sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
                StoreError::Decode(err.to_string())
            }

            sqlx::Error::PoolTimedOut => {
                StoreError::ConnectionFailed("Connection pool exhausted".to_string())
            }

            sqlx::Error::PoolClosed => StoreError::ConnectionFailed("Pool is closed".to_string()),

            sqlx::Error::Io(_) => StoreError::ConnectionFailed(err.to_string()),

            _ => StoreError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        StoreError::MigrationFailed(err.to_string())
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
