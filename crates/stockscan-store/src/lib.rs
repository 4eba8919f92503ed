//! # stockscan-store: Inventory Store for StockScan
//!
//! Persistence for scanned items. The hosted table is reached over
//! PostgREST; a local SQLite file can stand in for it.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        StockScan Data Flow                              │
//! │                                                                         │
//! │  save (scanner)        list / inc / dec / remove / clear (inventory)   │
//! │       │                                │                                │
//! │       ▼                                ▼                                │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  stockscan-store (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────────┐    ┌─────────────────────────────────┐    │   │
//! │  │   │ InventoryStore │───►│ dyn InventoryBackend            │    │   │
//! │  │   │  mirror        │    │  ├── RestBackend  (reqwest)     │    │   │
//! │  │   │  failure policy│    │  └── SqliteBackend (sqlx)       │    │   │
//! │  │   └────────────────┘    └─────────────────────────────────┘    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                │                                │
//! │       ▼                                ▼                                │
//! │  Supabase inventory_items        stockscan.db (WAL)                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - The mirror-holding facade and its failure policy
//! - [`backend`] - The backend trait and insert row type
//! - [`rest`] - PostgREST backend
//! - [`sqlite`] - SQLite backend
//! - [`pool`] - SQLite pool creation and configuration
//! - [`migrations`] - Embedded SQLite migrations
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use stockscan_store::{InventoryStore, RestBackend};
//!
//! let backend = RestBackend::new("https://xyz.supabase.co", anon_key);
//! let store = InventoryStore::new(Arc::new(backend));
//!
//! store.list().await?;
//! store.insert_batch(items).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod backend;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod rest;
pub mod sqlite;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use backend::{InventoryBackend, InventoryInsert};
pub use error::{StoreError, StoreResult};
pub use pool::{Database, DbConfig};
pub use rest::RestBackend;
pub use sqlite::SqliteBackend;
pub use store::InventoryStore;
