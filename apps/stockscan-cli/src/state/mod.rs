//! # State Module
//!
//! Process-lifetime state shared by the commands.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────────┐      ┌──────────────────────────────┐    │
//! │  │      SessionState        │      │         StoreState           │    │
//! │  │                          │      │                              │    │
//! │  │  Arc<Mutex<ScanSession>> │      │  Arc<InventoryStore>         │    │
//! │  │  (scanner console only)  │      │  (backend + mirror)          │    │
//! │  └──────────────────────────┘      └──────────────────────────────┘    │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • SessionState: std Mutex, never held across an await                 │
//! │  • StoreState: InventoryStore synchronizes its own mirror              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod session;
mod store;

pub use session::SessionState;
pub use store::StoreState;
