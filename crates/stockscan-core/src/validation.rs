//! # Validation Module
//!
//! Input validation and coercion for StockScan.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Scan session                                                 │
//! │  └── coerce_quantity: typed input is clamped, never rejected           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Inventory store (before any request)                         │
//! │  └── validate_barcode / validate_quantity                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Remote table                                                 │
//! │  └── NOT NULL only; quantity >= 1 is NOT enforced server side          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::{MAX_BARCODE_LEN, MIN_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Quantity
// =============================================================================

/// Clamps a quantity to the floor of 1.
#[inline]
pub fn clamp_quantity(qty: i64) -> i64 {
    qty.max(MIN_QUANTITY)
}

/// Turns free-form quantity input into a usable quantity.
///
/// ## Rules
/// - Leading whitespace is ignored, then an optional sign and the leading
///   run of digits are read (`"12abc"` → 12)
/// - No digits, zero, or a negative number → 1
/// - Overflow saturates instead of failing
///
/// ## Example
/// ```rust
/// use stockscan_core::validation::coerce_quantity;
///
/// assert_eq!(coerce_quantity("7"), 7);
/// assert_eq!(coerce_quantity("12 boxes"), 12);
/// assert_eq!(coerce_quantity("abc"), 1);
/// assert_eq!(coerce_quantity("-4"), 1);
/// ```
pub fn coerce_quantity(input: &str) -> i64 {
    parse_leading_int(input).map(clamp_quantity).unwrap_or(MIN_QUANTITY)
}

/// Reads an optional sign followed by the leading digits of `input`.
///
/// Returns `None` when there are no digits to read.
pub fn parse_leading_int(input: &str) -> Option<i64> {
    let s = input.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits: &str = {
        let end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        &rest[..end]
    };

    if digits.is_empty() {
        return None;
    }

    let magnitude = digits.bytes().fold(0i64, |acc, b| {
        acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });

    Some(if negative { -magnitude } else { magnitude })
}

/// Validates a quantity bound for the store.
///
/// ## Rules
/// - Must be >= 1
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty < MIN_QUANTITY {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Barcode
// =============================================================================

/// Validates a barcode payload.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - At most [`MAX_BARCODE_LEN`] characters
/// - No control characters
///
/// ## Example
/// ```rust
/// use stockscan_core::validation::validate_barcode;
///
/// assert!(validate_barcode("8690012345678").is_ok());
/// assert!(validate_barcode("   ").is_err());
/// ```
pub fn validate_barcode(code: &str) -> ValidationResult<()> {
    if code.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "barcode".to_string(),
        });
    }

    if code.chars().count() > MAX_BARCODE_LEN {
        return Err(ValidationError::TooLong {
            field: "barcode".to_string(),
            max: MAX_BARCODE_LEN,
        });
    }

    if code.chars().any(char::is_control) {
        return Err(ValidationError::InvalidFormat {
            field: "barcode".to_string(),
            reason: "must not contain control characters".to_string(),
        });
    }

    Ok(())
}

/// Normalizes a search query.
///
/// Empty is allowed and means "everything".
pub fn normalize_search_query(query: &str) -> String {
    query.trim().to_lowercase()
}

// =============================================================================
// Unit Tests
// =============================================================================
