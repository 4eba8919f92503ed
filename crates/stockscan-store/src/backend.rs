//! # Inventory Backend
//!
//! The seam between the store facade and whatever actually holds the
//! `inventory_items` table.
//!
//! ```text
//! ┌──────────────────┐        ┌────────────────────────────┐
//! │  InventoryStore  │ ─────► │ dyn InventoryBackend        │
//! │  (mirror + policy│        │  ├── RestBackend   (hosted) │
//! │   per operation) │        │  └── SqliteBackend (local)  │
//! └──────────────────┘        └────────────────────────────┘
//! ```
//!
//! Backends are dumb: no mirror, no logging policy, no validation. They do
//! one request per call and report what happened.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use stockscan_core::{InventoryItem, NewInventoryItem};

use crate::error::StoreResult;

/// One row of an insert batch, as sent to the backend.
///
/// Field names match the table columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryInsert {
    pub barcode: String,
    pub quantity: i64,
    pub product_name: Option<String>,
    pub is_ai_generated: bool,
    pub scanned_at: DateTime<Utc>,
}

impl InventoryInsert {
    /// Stamps a commit payload row with its scan time.
    pub fn stamped(item: NewInventoryItem, scanned_at: DateTime<Utc>) -> Self {
        InventoryInsert {
            barcode: item.barcode,
            quantity: item.quantity,
            product_name: item.product_name,
            is_ai_generated: item.is_ai_generated,
            scanned_at,
        }
    }
}

/// Access to the `inventory_items` table.
#[async_trait]
pub trait InventoryBackend: Send + Sync {
    /// Short name for logs ("rest", "sqlite").
    fn name(&self) -> &'static str;

    /// Every row, newest `created_at` first.
    async fn select_all(&self) -> StoreResult<Vec<InventoryItem>>;

    /// Inserts all rows in one call; either all land or none do.
    async fn insert_rows(&self, rows: &[InventoryInsert]) -> StoreResult<()>;

    /// Sets `quantity` and `updated_at` on the row with `id`.
    ///
    /// A missing id is not an error.
    async fn update_quantity(
        &self,
        id: &str,
        quantity: i64,
        updated_at: DateTime<Utc>,
    ) -> StoreResult<()>;

    /// Deletes the row with `id`. A missing id is not an error.
    async fn delete_by_id(&self, id: &str) -> StoreResult<()>;

    /// Deletes every row whose id differs from `sentinel_id`.
    async fn delete_all_except(&self, sentinel_id: &str) -> StoreResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_row_serializes_as_columns() {
        let scanned_at = DateTime::parse_from_rfc3339("2024-05-01T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let row = InventoryInsert::stamped(
            NewInventoryItem {
                barcode: "123".to_string(),
                quantity: 2,
                product_name: None,
                is_ai_generated: false,
            },
            scanned_at,
        );

        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["barcode"], "123");
        assert_eq!(json["quantity"], 2);
        assert_eq!(json["is_ai_generated"], false);
        assert_eq!(json["scanned_at"], "2024-05-01T10:00:00Z");
    }
}
