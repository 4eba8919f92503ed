//! # stockscan-core: Pure Scanning Logic for StockScan
//!
//! This crate holds everything about a scan that can be decided without
//! touching a camera, a clock or a network.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        StockScan Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │             Scanner console / Inventory commands                │   │
//! │  │     scan ──► toggle/qty ──► save          list/search/edit      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ stockscan-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  session  │  │  naming   │  │ validation│  │   │
//! │  │   │ Scanned-  │  │ ScanSess- │  │ brand +   │  │ quantity  │  │   │
//! │  │   │ Barcode   │  │ ion       │  │ category  │  │ barcode   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 stockscan-store (Inventory Store)               │   │
//! │  │          inventory_items over PostgREST or SQLite              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (ScannedBarcode, InventoryItem, Detection, ...)
//! - [`session`] - The scan session state machine
//! - [`naming`] - Deterministic product-name stub
//! - [`inventory`] - Search and totals over an inventory mirror
//! - [`validation`] - Input validation and quantity coercion
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use stockscan_core::ScanSession;
//!
//! let mut session = ScanSession::new();
//! assert!(session.add_detected("8690012345678", Some("ean13")));
//! assert!(!session.add_detected("8690012345678", None)); // deduped
//!
//! session.complete_analysis("8690012345678", "LG Kırtasiye");
//! let batch = session.commit().unwrap();
//! assert_eq!(batch.len(), 1);
//! assert_eq!(batch[0].quantity, 1);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod inventory;
pub mod naming;
pub mod session;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use inventory::{filter_by_barcode, InventorySummary};
pub use naming::derive_product_name;
pub use session::{ScanSession, SessionSummary};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Name of the remote table holding persisted scans.
pub const INVENTORY_TABLE: &str = "inventory_items";

/// An id no row will ever carry.
///
/// Bulk delete is expressed as `id != CLEAR_ALL_SENTINEL_ID` because the
/// hosted API refuses a DELETE without a filter.
pub const CLEAR_ALL_SENTINEL_ID: &str = "00000000-0000-0000-0000-000000000000";

/// Smallest quantity a session record or inventory row may hold.
pub const MIN_QUANTITY: i64 = 1;

/// Maximum accepted barcode payload length.
///
/// QR payloads can be long; anything past this is almost certainly a
/// misread rather than a product code.
pub const MAX_BARCODE_LEN: usize = 512;
