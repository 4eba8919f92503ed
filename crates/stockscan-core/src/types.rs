//! # Domain Types
//!
//! Core domain types used throughout StockScan.
//!
//! ## Type Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  camera / frame analyser                                               │
//! │       │  Detection { code, symbology }                                  │
//! │       ▼                                                                 │
//! │  ┌─────────────────┐  commit()  ┌──────────────────┐  insert  ┌──────┐ │
//! │  │ ScannedBarcode  │──────────► │ NewInventoryItem │────────► │ row  │ │
//! │  │ (session only)  │            │ (commit payload) │          │      │ │
//! │  └─────────────────┘            └──────────────────┘          └──┬───┘ │
//! │                                                                  │     │
//! │                                            select  ┌─────────────▼──┐  │
//! │                                       ◄────────────│ InventoryItem  │  │
//! │                                                    │ (persisted)    │  │
//! │                                                    └────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Serialization
//! Session records are camelCase (consumed by the screens). Inventory rows
//! are snake_case because they map 1:1 onto the `inventory_items` columns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Detection
// =============================================================================

/// A barcode reported by the camera or by the frame analyser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Detection {
    /// Decoded payload.
    pub code: String,

    /// Encoding scheme (`ean13`, `qr`, ...) or analyser label, when known.
    pub symbology: Option<String>,
}

impl Detection {
    /// Creates a detection.
    pub fn new(code: impl Into<String>, symbology: Option<&str>) -> Self {
        Detection {
            code: code.into(),
            symbology: symbology.map(str::to_string),
        }
    }
}

/// A detection whose product name was resolved before it entered the session.
///
/// Produced by the bulk "analyze frame" path, which resolves every name
/// first and then inserts the whole batch at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDetection {
    pub detection: Detection,
    pub product_name: String,
}

// =============================================================================
// Scanned Barcode
// =============================================================================

/// One record in the scan session.
///
/// ## States
/// ```text
///  add_detected()                 complete_analysis()
///  ──────────────► is_analyzing ─────────────────────► resolved
///                  product_name: None                 product_name: Some
///                  is_ai_generated: false             is_ai_generated: true
///
///  add_batch() ────────────────────────────────────► resolved
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ScannedBarcode {
    /// Scanner payload; unique within a session.
    pub code: String,

    /// Encoding scheme, if the source reported one.
    pub symbology: Option<String>,

    /// Whether this record goes into the next commit.
    pub selected: bool,

    /// Always >= 1.
    pub quantity: i64,

    /// Name produced by the naming stub.
    pub product_name: Option<String>,

    /// True once the name came from the (mock) AI step.
    pub is_ai_generated: bool,

    /// Transient: a name resolution is in flight.
    pub is_analyzing: bool,
}

impl ScannedBarcode {
    /// A freshly detected record awaiting its product name.
    pub fn pending(detection: Detection) -> Self {
        ScannedBarcode {
            code: detection.code,
            symbology: detection.symbology,
            selected: true,
            quantity: crate::MIN_QUANTITY,
            product_name: None,
            is_ai_generated: false,
            is_analyzing: true,
        }
    }

    /// A record whose name is already known.
    pub fn resolved(resolved: ResolvedDetection) -> Self {
        ScannedBarcode {
            code: resolved.detection.code,
            symbology: resolved.detection.symbology,
            selected: true,
            quantity: crate::MIN_QUANTITY,
            product_name: Some(resolved.product_name),
            is_ai_generated: true,
            is_analyzing: false,
        }
    }

    /// The commit payload for this record.
    pub fn to_new_item(&self) -> NewInventoryItem {
        NewInventoryItem {
            barcode: self.code.clone(),
            quantity: self.quantity,
            product_name: self.product_name.clone(),
            is_ai_generated: self.is_ai_generated,
        }
    }
}

// =============================================================================
// Inventory Items
// =============================================================================

/// What a commit hands to the inventory store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewInventoryItem {
    pub barcode: String,
    pub quantity: i64,
    pub product_name: Option<String>,
    pub is_ai_generated: bool,
}

/// A persisted row of `inventory_items`.
///
/// ## Dual Identity
/// - `id`: opaque, assigned by the store, used for update/delete
/// - `barcode`: NOT unique; scanning the same code twice yields two rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct InventoryItem {
    /// Store-assigned identifier.
    pub id: String,

    /// Scanned payload.
    pub barcode: String,

    /// Count on hand, >= 1 (enforced client side only).
    pub quantity: i64,

    /// When the scan was committed.
    #[ts(as = "String")]
    pub scanned_at: DateTime<Utc>,

    /// Name from the naming stub, if any.
    pub product_name: Option<String>,

    /// Older rows may carry NULL here; treated as false.
    #[serde(default, deserialize_with = "null_as_false")]
    pub is_ai_generated: bool,

    /// Store-managed.
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub created_at: Option<DateTime<Utc>>,

    /// Store-managed.
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub updated_at: Option<DateTime<Utc>>,
}

fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_record_defaults() {
        let record = ScannedBarcode::pending(Detection::new("123", Some("ean13")));

        assert!(record.selected);
        assert_eq!(record.quantity, 1);
        assert!(record.is_analyzing);
        assert!(!record.is_ai_generated);
        assert_eq!(record.product_name, None);
    }

    #[test]
    fn test_session_record_serializes_camel_case() {
        let record = ScannedBarcode::pending(Detection::new("123", None));
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["isAnalyzing"], true);
        assert_eq!(json["productName"], serde_json::Value::Null);
    }

    #[test]
    fn test_inventory_item_from_postgrest_row() {
        let json = r#"{
            "id": "5c7f0c7e-1b7a-4c55-9a3e-2f1d7a0e9b10",
            "barcode": "8690012345678",
            "quantity": 3,
            "scanned_at": "2024-05-01T10:15:00.123+00:00",
            "product_name": "LG Kırtasiye",
            "is_ai_generated": null,
            "created_at": "2024-05-01T10:15:00.200+00:00",
            "updated_at": null
        }"#;

        let item: InventoryItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.quantity, 3);
        assert!(!item.is_ai_generated);
        assert!(item.created_at.is_some());
        assert!(item.updated_at.is_none());
    }

    #[test]
    fn test_inventory_item_missing_optional_columns() {
        let json = r#"{
            "id": "a",
            "barcode": "1",
            "quantity": 1,
            "scanned_at": "2024-05-01T10:15:00Z"
        }"#;

        let item: InventoryItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.product_name, None);
        assert!(!item.is_ai_generated);
    }
}
