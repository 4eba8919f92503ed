//! # Inventory Commands
//!
//! The inventory list screen: load and search, adjust quantities, remove
//! rows, wipe the table.
//!
//! Mutations go through [`InventoryStore`]'s absorb-and-log policy: a failed
//! update leaves the mirror as it was and the command still returns the
//! (stale) view. Only loading surfaces store errors.

use serde::Serialize;
use stockscan_core::validation::validate_quantity;
use stockscan_core::{InventoryItem, InventorySummary, MIN_QUANTITY};
use stockscan_store::InventoryStore;
use tracing::{debug, info};

use crate::error::AppError;
use crate::state::StoreState;

/// Inventory rows (optionally filtered) with totals over the whole table.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryView {
    pub items: Vec<InventoryItem>,
    pub summary: InventorySummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

impl InventoryView {
    /// Builds a view from the store's mirror.
    ///
    /// A blank query shows everything.
    pub async fn from_mirror(store: &InventoryStore, query: Option<&str>) -> Self {
        let query = query.map(str::trim).filter(|q| !q.is_empty());

        let items = match query {
            Some(q) => store.search(q).await,
            None => store.items().await,
        };

        InventoryView {
            items,
            summary: store.summary().await,
            query: query.map(str::to_string),
        }
    }
}

/// Loads the inventory (newest first), optionally filtered by barcode.
pub async fn load_inventory(store: &StoreState, query: Option<&str>) -> Result<InventoryView, AppError> {
    store.inner().list().await?;
    Ok(InventoryView::from_mirror(store.inner(), query).await)
}

/// Pull-to-refresh.
pub async fn refresh_inventory(
    store: &StoreState,
    query: Option<&str>,
) -> Result<InventoryView, AppError> {
    store.inner().refresh().await?;
    Ok(InventoryView::from_mirror(store.inner(), query).await)
}

/// The "+" button.
pub async fn increment_item(store: &StoreState, id: &str) -> Result<InventoryView, AppError> {
    let item = find_item(store.inner(), id).await?;

    store
        .inner()
        .update_quantity(id, item.quantity.saturating_add(1))
        .await;

    Ok(InventoryView::from_mirror(store.inner(), None).await)
}

/// The "-" button. Disabled at 1: nothing is sent.
pub async fn decrement_item(store: &StoreState, id: &str) -> Result<InventoryView, AppError> {
    let item = find_item(store.inner(), id).await?;

    if item.quantity <= MIN_QUANTITY {
        debug!(id = %id, "Quantity already at minimum");
    } else {
        store.inner().update_quantity(id, item.quantity - 1).await;
    }

    Ok(InventoryView::from_mirror(store.inner(), None).await)
}

/// Sets a row's quantity outright.
pub async fn set_item_quantity(
    store: &StoreState,
    id: &str,
    quantity: i64,
) -> Result<InventoryView, AppError> {
    validate_quantity(quantity)?;
    find_item(store.inner(), id).await?;

    store.inner().update_quantity(id, quantity).await;

    Ok(InventoryView::from_mirror(store.inner(), None).await)
}

/// Deletes one row.
pub async fn remove_item(store: &StoreState, id: &str) -> Result<InventoryView, AppError> {
    let item = find_item(store.inner(), id).await?;

    store.inner().remove(id).await;
    info!(id = %id, barcode = %item.barcode, "Inventory item removed");

    Ok(InventoryView::from_mirror(store.inner(), None).await)
}

/// Deletes every row.
pub async fn clear_inventory(store: &StoreState) -> InventoryView {
    store.inner().clear_all().await;
    InventoryView::from_mirror(store.inner(), None).await
}

/// Looks `id` up in the mirror, loading it first if needed.
async fn find_item(store: &InventoryStore, id: &str) -> Result<InventoryItem, AppError> {
    if let Some(item) = store.find(id).await {
        return Ok(item);
    }

    store.list().await?;
    store
        .find(id)
        .await
        .ok_or_else(|| AppError::not_found("Inventory item", id))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use std::sync::Arc;
    use stockscan_core::NewInventoryItem;
    use stockscan_store::{Database, DbConfig};

    async fn seeded_store(rows: &[(&str, i64)]) -> StoreState {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let store = InventoryStore::new(Arc::new(db.backend()));

        let items = rows
            .iter()
            .map(|(barcode, quantity)| NewInventoryItem {
                barcode: barcode.to_string(),
                quantity: *quantity,
                product_name: None,
                is_ai_generated: false,
            })
            .collect();
        store.insert_batch(items).await.unwrap();

        StoreState::new(store)
    }

    fn id_of(view: &InventoryView, barcode: &str) -> String {
        view.items
            .iter()
            .find(|i| i.barcode == barcode)
            .map(|i| i.id.clone())
            .unwrap()
    }

    fn quantity_of(view: &InventoryView, barcode: &str) -> i64 {
        view.items
            .iter()
            .find(|i| i.barcode == barcode)
            .map(|i| i.quantity)
            .unwrap()
    }

    #[tokio::test]
    async fn test_load_with_search_keeps_full_totals() {
        let store = seeded_store(&[("8690012345678", 2), ("4006381333931", 5)]).await;

        let view = load_inventory(&store, Some(" 869 ")).await.unwrap();

        assert_eq!(view.items.len(), 1);
        assert_eq!(view.query.as_deref(), Some("869"));
        assert_eq!(view.summary.total_items, 2);
        assert_eq!(view.summary.total_quantity, 7);

        let view = refresh_inventory(&store, Some("")).await.unwrap();
        assert_eq!(view.items.len(), 2);
        assert!(view.query.is_none());
    }

    #[tokio::test]
    async fn test_increment_and_decrement() {
        let store = seeded_store(&[("a", 2)]).await;
        let view = load_inventory(&store, None).await.unwrap();
        let id = id_of(&view, "a");

        let view = increment_item(&store, &id).await.unwrap();
        assert_eq!(quantity_of(&view, "a"), 3);

        decrement_item(&store, &id).await.unwrap();
        decrement_item(&store, &id).await.unwrap();
        let view = decrement_item(&store, &id).await.unwrap();
        assert_eq!(quantity_of(&view, "a"), 1);
    }

    #[tokio::test]
    async fn test_set_quantity_validates() {
        let store = seeded_store(&[("a", 2)]).await;
        let id = id_of(&load_inventory(&store, None).await.unwrap(), "a");

        let err = set_item_quantity(&store, &id, 0).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let view = set_item_quantity(&store, &id, 40).await.unwrap();
        assert_eq!(quantity_of(&view, "a"), 40);
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let store = seeded_store(&[("a", 1)]).await;

        let err = remove_item(&store, "missing").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err = increment_item(&store, "missing").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_find_loads_cold_mirror() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let writer = StoreState::new(InventoryStore::new(Arc::new(db.backend())));
        let id = {
            let item = NewInventoryItem {
                barcode: "b".to_string(),
                quantity: 1,
                product_name: None,
                is_ai_generated: false,
            };
            writer.inner().insert_batch(vec![item]).await.unwrap();
            writer.inner().items().await[0].id.clone()
        };

        // Same table, mirror never loaded
        let reader = StoreState::new(InventoryStore::new(Arc::new(db.backend())));
        assert!(reader.inner().items().await.is_empty());

        let view = increment_item(&reader, &id).await.unwrap();
        assert_eq!(quantity_of(&view, "b"), 2);
    }

    #[tokio::test]
    async fn test_clear_inventory() {
        let store = seeded_store(&[("a", 1), ("b", 3)]).await;

        let view = clear_inventory(&store).await;

        assert!(view.items.is_empty());
        assert_eq!(view.summary.total_quantity, 0);
        assert!(load_inventory(&store, None).await.unwrap().items.is_empty());
    }
}
