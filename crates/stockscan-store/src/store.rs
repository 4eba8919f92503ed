//! # Inventory Store
//!
//! The facade the rest of the app talks to. It owns the backend and a
//! read-only mirror of the table, refreshed by a full reload after every
//! successful mutation.
//!
//! ## Failure Policy
//! ```text
//! ┌────────────────────┬────────────────────────┬──────────────────────────┐
//! │ Operation          │ On success             │ On failure               │
//! ├────────────────────┼────────────────────────┼──────────────────────────┤
//! │ list / refresh     │ mirror replaced        │ Err returned             │
//! │ insert_batch       │ reload                 │ Err returned (all/none)  │
//! │ update_quantity    │ reload                 │ logged, mirror unchanged │
//! │ remove             │ reload                 │ logged, mirror unchanged │
//! │ clear_all          │ reload                 │ logged, mirror unchanged │
//! └────────────────────┴────────────────────────┴──────────────────────────┘
//! ```
//!
//! Nothing is retried. There is no optimistic local patching: the mirror
//! only ever holds what the last successful `list()` returned.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::Utc;
use stockscan_core::validation::{validate_barcode, validate_quantity};
use stockscan_core::{
    filter_by_barcode, InventoryItem, InventorySummary, NewInventoryItem, CLEAR_ALL_SENTINEL_ID,
};
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use crate::backend::{InventoryBackend, InventoryInsert};
use crate::error::StoreResult;

/// Inventory store with an in-memory mirror.
///
/// ## Usage
/// ```rust,ignore
/// let store = InventoryStore::new(Arc::new(RestBackend::new(url, key)));
/// store.list().await?;
/// store.insert_batch(session.commit()?).await?;
/// let summary = store.summary().await;
/// ```
pub struct InventoryStore {
    backend: Arc<dyn InventoryBackend>,
    mirror: RwLock<Vec<InventoryItem>>,
    /// In-flight `list()` calls.
    loading: AtomicUsize,
}

impl std::fmt::Debug for InventoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InventoryStore")
            .field("backend", &self.backend.name())
            .field("loading", &self.is_loading())
            .finish()
    }
}

impl InventoryStore {
    /// Creates a store with an empty mirror. Call [`list`](Self::list) to
    /// populate it.
    pub fn new(backend: Arc<dyn InventoryBackend>) -> Self {
        InventoryStore {
            backend,
            mirror: RwLock::new(Vec::new()),
            loading: AtomicUsize::new(0),
        }
    }

    /// Name of the backend in use.
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Fetches every row (newest first) and replaces the mirror.
    ///
    /// ## Errors
    /// Transport, auth and decode failures are returned as-is. The mirror
    /// keeps its previous contents.
    pub async fn list(&self) -> StoreResult<Vec<InventoryItem>> {
        let result = {
            let _loading = LoadingGuard::enter(&self.loading);
            self.backend.select_all().await
        };

        let items = result?;
        debug!(count = items.len(), backend = self.backend.name(), "Inventory loaded");

        *self.mirror.write().await = items.clone();
        Ok(items)
    }

    /// Re-issues [`list`](Self::list) (pull-to-refresh).
    pub async fn refresh(&self) -> StoreResult<Vec<InventoryItem>> {
        self.list().await
    }

    /// Snapshot of the mirror.
    pub async fn items(&self) -> Vec<InventoryItem> {
        self.mirror.read().await.clone()
    }

    /// Mirror rows whose barcode contains `query` (case-insensitive).
    pub async fn search(&self, query: &str) -> Vec<InventoryItem> {
        let mirror = self.mirror.read().await;
        filter_by_barcode(&mirror, query)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Looks up a mirrored row by id.
    pub async fn find(&self, id: &str) -> Option<InventoryItem> {
        self.mirror
            .read()
            .await
            .iter()
            .find(|item| item.id == id)
            .cloned()
    }

    /// Totals over the mirror.
    pub async fn summary(&self) -> InventorySummary {
        InventorySummary::of(self.mirror.read().await.iter())
    }

    /// True while a `list()` is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst) > 0
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Inserts committed session records as new rows.
    ///
    /// ## Behavior
    /// 1. Every row is validated (barcode present, quantity >= 1); one bad
    ///    row rejects the batch before anything is sent
    /// 2. All rows share one `scanned_at`
    /// 3. One backend call; all rows land or none do
    /// 4. Mirror reloaded
    ///
    /// A reload failure after a successful insert is logged, not returned:
    /// the rows are stored and reporting failure would invite a duplicate
    /// retry.
    pub async fn insert_batch(&self, items: Vec<NewInventoryItem>) -> StoreResult<usize> {
        if items.is_empty() {
            return Ok(0);
        }

        for item in &items {
            validate_barcode(&item.barcode)?;
            validate_quantity(item.quantity)?;
        }

        let scanned_at = Utc::now();
        let rows: Vec<InventoryInsert> = items
            .into_iter()
            .map(|item| InventoryInsert::stamped(item, scanned_at))
            .collect();

        if let Err(err) = self.backend.insert_rows(&rows).await {
            error!(error = %err, count = rows.len(), "Error adding items");
            return Err(err);
        }

        info!(count = rows.len(), "Inventory rows added");
        self.reload_after("insert").await;
        Ok(rows.len())
    }

    /// Sets a row's quantity. Failures are logged and absorbed.
    pub async fn update_quantity(&self, id: &str, quantity: i64) {
        if let Err(err) = validate_quantity(quantity) {
            warn!(id = %id, quantity, error = %err, "Refusing quantity update");
            return;
        }

        match self
            .backend
            .update_quantity(id, quantity, Utc::now())
            .await
        {
            Ok(()) => self.reload_after("update").await,
            Err(err) => error!(id = %id, error = %err, "Error updating quantity"),
        }
    }

    /// Deletes one row. Failures are logged and absorbed.
    pub async fn remove(&self, id: &str) {
        match self.backend.delete_by_id(id).await {
            Ok(()) => self.reload_after("remove").await,
            Err(err) => error!(id = %id, error = %err, "Error removing item"),
        }
    }

    /// Deletes every row. Failures are logged and absorbed.
    pub async fn clear_all(&self) {
        match self.backend.delete_all_except(CLEAR_ALL_SENTINEL_ID).await {
            Ok(()) => self.reload_after("clear").await,
            Err(err) => error!(error = %err, "Error clearing inventory"),
        }
    }

    async fn reload_after(&self, operation: &'static str) {
        if let Err(err) = self.list().await {
            error!(operation, error = %err, "Reload after mutation failed");
        }
    }
}

/// Counts one in-flight load for as long as it lives, including when the
/// `list()` future is dropped mid-await.
struct LoadingGuard<'a>(&'a AtomicUsize);

impl<'a> LoadingGuard<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        LoadingGuard(counter)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::pool::{Database, DbConfig};
    use async_trait::async_trait;
    use chrono::DateTime;
    use std::sync::atomic::AtomicUsize;

    async fn sqlite_store() -> InventoryStore {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        InventoryStore::new(Arc::new(db.backend()))
    }

    fn new_item(barcode: &str, quantity: i64) -> NewInventoryItem {
        NewInventoryItem {
            barcode: barcode.to_string(),
            quantity,
            product_name: Some(stockscan_core::derive_product_name(barcode)),
            is_ai_generated: true,
        }
    }

    /// Backend whose every call fails with a transport error.
    #[derive(Default)]
    struct UnreachableBackend {
        calls: AtomicUsize,
    }

    impl UnreachableBackend {
        fn fail<T>(&self) -> StoreResult<T> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(StoreError::Transport("connection refused".to_string()))
        }
    }

    #[async_trait]
    impl InventoryBackend for UnreachableBackend {
        fn name(&self) -> &'static str {
            "unreachable"
        }

        async fn select_all(&self) -> StoreResult<Vec<InventoryItem>> {
            self.fail()
        }

        async fn insert_rows(&self, _rows: &[InventoryInsert]) -> StoreResult<()> {
            self.fail()
        }

        async fn update_quantity(
            &self,
            _id: &str,
            _quantity: i64,
            _updated_at: DateTime<Utc>,
        ) -> StoreResult<()> {
            self.fail()
        }

        async fn delete_by_id(&self, _id: &str) -> StoreResult<()> {
            self.fail()
        }

        async fn delete_all_except(&self, _sentinel_id: &str) -> StoreResult<()> {
            self.fail()
        }
    }

    /// Backend whose first `select_all` never completes; later ones
    /// return an empty table.
    #[derive(Default)]
    struct StallFirstBackend {
        selects: AtomicUsize,
    }

    #[async_trait]
    impl InventoryBackend for StallFirstBackend {
        fn name(&self) -> &'static str {
            "stall-first"
        }

        async fn select_all(&self) -> StoreResult<Vec<InventoryItem>> {
            if self.selects.fetch_add(1, Ordering::SeqCst) == 0 {
                std::future::pending::<()>().await;
            }
            Ok(Vec::new())
        }

        async fn insert_rows(&self, _rows: &[InventoryInsert]) -> StoreResult<()> {
            Ok(())
        }

        async fn update_quantity(
            &self,
            _id: &str,
            _quantity: i64,
            _updated_at: DateTime<Utc>,
        ) -> StoreResult<()> {
            Ok(())
        }

        async fn delete_by_id(&self, _id: &str) -> StoreResult<()> {
            Ok(())
        }

        async fn delete_all_except(&self, _sentinel_id: &str) -> StoreResult<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_loading_tracks_overlapping_and_dropped_loads() {
        let store = InventoryStore::new(Arc::new(StallFirstBackend::default()));
        assert!(!store.is_loading());

        let mut stalled = Box::pin(store.list());
        let polled = tokio::time::timeout(std::time::Duration::from_millis(20), &mut stalled).await;
        assert!(polled.is_err());
        assert!(store.is_loading());

        // A second load finishing does not hide the one still in flight
        store.list().await.unwrap();
        assert!(store.is_loading());

        drop(stalled);
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_insert_batch_adds_exactly_n_rows() {
        let store = sqlite_store().await;
        store.insert_batch(vec![new_item("111", 1)]).await.unwrap();
        let before = store.list().await.unwrap();

        let added = store
            .insert_batch(vec![new_item("222", 2), new_item("111", 5)])
            .await
            .unwrap();
        assert_eq!(added, 2);

        let after = store.list().await.unwrap();
        assert_eq!(after.len(), before.len() + 2);
        for old in &before {
            assert!(after.iter().any(|row| row.id == old.id));
        }
        assert!(after.iter().all(|row| row.quantity >= 1));

        // The mirror was refreshed by the insert itself.
        assert_eq!(store.items().await.len(), 3);
    }

    #[tokio::test]
    async fn test_batch_rows_share_scanned_at() {
        let store = sqlite_store().await;
        store
            .insert_batch(vec![new_item("a", 1), new_item("b", 1)])
            .await
            .unwrap();

        let items = store.items().await;
        assert_eq!(items[0].scanned_at, items[1].scanned_at);
    }

    #[tokio::test]
    async fn test_insert_batch_rejects_bad_quantity() {
        let store = sqlite_store().await;

        let err = store
            .insert_batch(vec![new_item("a", 1), new_item("b", 0)])
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));

        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_batch_is_noop() {
        let store = sqlite_store().await;
        assert_eq!(store.insert_batch(Vec::new()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_update_remove_clear_refresh_mirror() {
        let store = sqlite_store().await;
        store
            .insert_batch(vec![new_item("a", 1), new_item("b", 1), new_item("c", 1)])
            .await
            .unwrap();

        let id = store.items().await[0].id.clone();
        store.update_quantity(&id, 4).await;
        assert_eq!(store.find(&id).await.unwrap().quantity, 4);
        assert_eq!(store.summary().await.total_quantity, 6);

        store.remove(&id).await;
        assert!(store.find(&id).await.is_none());
        assert_eq!(store.summary().await.total_items, 2);

        store.clear_all().await;
        assert!(store.items().await.is_empty());
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_below_one_is_refused() {
        let store = sqlite_store().await;
        store.insert_batch(vec![new_item("a", 3)]).await.unwrap();
        let id = store.items().await[0].id.clone();

        store.update_quantity(&id, 0).await;

        assert_eq!(store.list().await.unwrap()[0].quantity, 3);
    }

    #[tokio::test]
    async fn test_search_mirror() {
        let store = sqlite_store().await;
        store
            .insert_batch(vec![new_item("8690012345678", 1), new_item("4006381333931", 1)])
            .await
            .unwrap();

        let hits = store.search("869").await;
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].barcode, "8690012345678");
        assert_eq!(store.search("").await.len(), 2);
    }

    #[tokio::test]
    async fn test_list_and_insert_surface_errors() {
        let store = InventoryStore::new(Arc::new(UnreachableBackend::default()));

        assert!(store.list().await.unwrap_err().is_transport());
        assert!(store
            .insert_batch(vec![new_item("a", 1)])
            .await
            .unwrap_err()
            .is_transport());
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_mutation_failures_are_absorbed() {
        let backend = Arc::new(UnreachableBackend::default());
        let store = InventoryStore::new(backend.clone());

        store.update_quantity("x", 2).await;
        store.remove("x").await;
        store.clear_all().await;

        // One failed call each, no reload attempted.
        assert_eq!(backend.calls.load(Ordering::SeqCst), 3);
        assert!(store.items().await.is_empty());
    }

    #[tokio::test]
    async fn test_failed_mutation_keeps_stale_mirror() {
        let store = sqlite_store().await;
        store.insert_batch(vec![new_item("a", 2)]).await.unwrap();
        let snapshot = store.items().await;

        let failing = InventoryStore::new(Arc::new(UnreachableBackend::default()));
        *failing.mirror.write().await = snapshot.clone();
        failing.update_quantity(&snapshot[0].id, 7).await;

        assert_eq!(failing.items().await, snapshot);
    }
}
