//! # Error Types
//!
//! Domain-specific error types for stockscan-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  stockscan-core errors (this file)                                     │
//! │  ├── CoreError        - Scan session precondition failures             │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  stockscan-store errors (separate crate)                               │
//! │  └── StoreError       - Transport / database failures                  │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── AppError         - What the user sees                             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError / StoreError → AppError → User      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Scan session errors.
///
/// None of these mutate the session: an operation that fails leaves the
/// records exactly as they were.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Commit was requested with every record deselected (or no records).
    ///
    /// ## User Workflow
    /// ```text
    /// 3 barcodes scanned, all unticked
    ///      │
    ///      ▼
    /// save ──► commit() ──► NothingSelected
    ///      │
    ///      ▼
    /// "Select at least one barcode" (session untouched)
    /// ```
    #[error("No barcode selected; select at least one barcode to save")]
    NothingSelected,

    /// A record index from the UI no longer exists in the session.
    #[error("No scanned barcode at position {index} (session has {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., control characters in a barcode).
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
