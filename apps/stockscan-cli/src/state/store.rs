//! # Store State
//!
//! Wraps the [`InventoryStore`] for use in commands.
//!
//! ## Usage in Commands
//! ```rust,ignore
//! async fn load_inventory(store: &StoreState, search: Option<&str>)
//!     -> Result<InventoryView, AppError>
//! {
//!     store.inner().list().await?;
//!     Ok(InventoryView::filtered(store.inner(), search).await)
//! }
//! ```

use std::sync::Arc;

use stockscan_store::InventoryStore;

/// Shared handle to the inventory store.
#[derive(Debug, Clone)]
pub struct StoreState {
    store: Arc<InventoryStore>,
}

impl StoreState {
    /// Creates a StoreState wrapping the store.
    pub fn new(store: InventoryStore) -> Self {
        StoreState {
            store: Arc::new(store),
        }
    }

    /// Returns a reference to the inner store.
    pub fn inner(&self) -> &InventoryStore {
        &self.store
    }
}
