//! # Inventory Helpers
//!
//! Pure functions over an inventory mirror: barcode search and the totals
//! shown above the inventory list.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::InventoryItem;
use crate::validation::normalize_search_query;

/// Totals over a set of inventory rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct InventorySummary {
    /// Number of rows.
    pub total_items: usize,

    /// Sum of quantities.
    pub total_quantity: i64,
}

impl InventorySummary {
    /// Computes totals for `items`.
    pub fn of<'a>(items: impl IntoIterator<Item = &'a InventoryItem>) -> Self {
        items
            .into_iter()
            .fold(InventorySummary::default(), |acc, item| InventorySummary {
                total_items: acc.total_items + 1,
                total_quantity: acc.total_quantity.saturating_add(item.quantity),
            })
    }
}

/// Case-insensitive substring match on the barcode.
///
/// An empty (or whitespace) query returns every row, in order.
pub fn filter_by_barcode<'a>(items: &'a [InventoryItem], query: &str) -> Vec<&'a InventoryItem> {
    let needle = normalize_search_query(query);
    if needle.is_empty() {
        return items.iter().collect();
    }

    items
        .iter()
        .filter(|item| item.barcode.to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn item(id: &str, barcode: &str, quantity: i64) -> InventoryItem {
        InventoryItem {
            id: id.to_string(),
            barcode: barcode.to_string(),
            quantity,
            scanned_at: Utc::now(),
            product_name: None,
            is_ai_generated: false,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_summary() {
        let items = vec![item("a", "1", 2), item("b", "2", 5)];
        let summary = InventorySummary::of(&items);

        assert_eq!(summary.total_items, 2);
        assert_eq!(summary.total_quantity, 7);
        let empty: Vec<InventoryItem> = Vec::new();
        assert_eq!(InventorySummary::of(&empty), InventorySummary::default());
    }

    #[test]
    fn test_summary_saturates() {
        let items = vec![item("a", "1", i64::MAX), item("b", "2", 3)];
        assert_eq!(InventorySummary::of(&items).total_quantity, i64::MAX);

        let items = vec![item("a", "1", i64::MIN), item("b", "2", -3)];
        assert_eq!(InventorySummary::of(&items).total_quantity, i64::MIN);
    }

    #[test]
    fn test_filter_by_barcode() {
        let items = vec![
            item("a", "8690012345678", 1),
            item("b", "ABC-777", 1),
            item("c", "4006381333931", 1),
        ];

        let hits = filter_by_barcode(&items, "869");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "a");

        let hits = filter_by_barcode(&items, "abc");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "b");

        assert_eq!(filter_by_barcode(&items, "  ").len(), 3);
        assert!(filter_by_barcode(&items, "zzz").is_empty());
    }
}
