//! # Session State
//!
//! The scan session behind a mutex, shared between the console loop and the
//! background name-resolution tasks.
//!
//! Dedupe and insert happen inside one `with_session_mut` call, so two
//! detections of the same new code cannot both be added.

use std::sync::{Arc, Mutex, PoisonError};

use stockscan_core::ScanSession;

/// Thread-safe handle to the [`ScanSession`]. Cloning shares the session.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    session: Arc<Mutex<ScanSession>>,
}

impl SessionState {
    /// Creates a state holding an empty session.
    pub fn new() -> Self {
        SessionState::default()
    }

    /// Executes a function with read access to the session.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let summary = session_state.with_session(|s| s.summary());
    /// ```
    pub fn with_session<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&ScanSession) -> R,
    {
        // Session transitions cannot leave it half-updated
        let session = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        f(&session)
    }

    /// Executes a function with write access to the session.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// session_state.with_session_mut(|s| s.toggle_selected(0))?;
    /// ```
    pub fn with_session_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut ScanSession) -> R,
    {
        let mut session = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_the_session() {
        let state = SessionState::new();
        let other = state.clone();

        state.with_session_mut(|s| s.add_detected("123", None));

        assert!(other.with_session(|s| s.contains("123")));
    }

    #[test]
    fn test_concurrent_duplicate_detections_add_once() {
        let state = SessionState::new();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let state = state.clone();
                std::thread::spawn(move || {
                    state.with_session_mut(|s| s.add_detected("123456789012", Some("ean13")))
                })
            })
            .collect();

        let added = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|added| *added)
            .count();

        assert_eq!(added, 1);
        assert_eq!(state.with_session(|s| s.len()), 1);
    }
}
