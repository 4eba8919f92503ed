//! # Commands Module
//!
//! Everything the two front ends (scanner console and one-shot CLI
//! subcommands) can ask for.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs        ◄─── You are here (exports)
//! ├── scanner.rs    ◄─── Scan session: detect, analyze, edit, save
//! └── inventory.rs  ◄─── Inventory list: search, adjust, remove, clear
//! ```
//!
//! ## State Injection
//! Each command takes only the state it needs:
//! ```rust,ignore
//! // Only the session
//! fn toggle_selected(session: &SessionState, index: usize)
//!
//! // Only the store
//! async fn remove_item(store: &StoreState, id: &str)
//!
//! // Both
//! async fn save_to_inventory(session: &SessionState, store: &StoreState)
//! ```
//!
//! Commands return view structs; formatting lives in [`crate::render`].

pub mod inventory;
pub mod scanner;

pub use inventory::InventoryView;
pub use scanner::SessionView;
