//! # Scanner Commands
//!
//! The scan/review screen: live detections, frame analysis, selection and
//! quantity edits, and saving the selection to the inventory.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Scan Session Lifecycle                               │
//! │                                                                         │
//! │  ┌──────────┐  detect   ┌───────────┐  name ready  ┌──────────┐         │
//! │  │  Empty   │──────────►│ Analyzing │─────────────►│ Resolved │         │
//! │  └──────────┘           └───────────┘              └──────────┘         │
//! │       ▲   analyze_frame (names resolved first) ─────────►│              │
//! │       │                                                  │              │
//! │       │                        toggle / qty / inc / dec  │              │
//! │       │                                                  ▼              │
//! │       └──────────── save_to_inventory (store accepted) ──┘              │
//! │       └──────────── clear_session ───────────────────────┘              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use stockscan_core::validation::validate_barcode;
use stockscan_core::{Detection, ResolvedDetection, ScanSession, ScannedBarcode, SessionSummary};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::analyzer::Analyzer;
use crate::error::AppError;
use crate::state::{SessionState, StoreState};

/// Session records plus footer totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub records: Vec<ScannedBarcode>,
    pub summary: SessionSummary,
}

impl From<&ScanSession> for SessionView {
    fn from(session: &ScanSession) -> Self {
        SessionView {
            records: session.records().to_vec(),
            summary: session.summary(),
        }
    }
}

/// Current session contents.
pub fn get_session(session: &SessionState) -> SessionView {
    session.with_session(|s| SessionView::from(s))
}

/// Handles one barcode detection event.
///
/// ## Behavior
/// - Code already in the session: ignored, returns `Ok(None)`
/// - New code: added as a pending record, then its product name is
///   resolved on a spawned task. The task handle is returned.
///
/// Must be called inside a tokio runtime.
pub fn on_barcode_scanned(
    session: &SessionState,
    analyzer: &Analyzer,
    code: &str,
    symbology: Option<&str>,
) -> Result<Option<JoinHandle<bool>>, AppError> {
    let code = code.trim();
    validate_barcode(code)?;

    if !session.with_session_mut(|s| s.add_detected(code, symbology)) {
        debug!(code = %code, "Barcode already in session");
        return Ok(None);
    }

    info!(code = %code, symbology = ?symbology, "Barcode detected");

    let session = session.clone();
    let analyzer = analyzer.clone();
    let code = code.to_string();
    Ok(Some(tokio::spawn(async move {
        resolve_product_name(&session, &analyzer, &code).await
    })))
}

/// Generates a name for `code` and attaches it to its pending record.
///
/// Returns `false` if the record left the session while the name was
/// being generated.
pub async fn resolve_product_name(session: &SessionState, analyzer: &Analyzer, code: &str) -> bool {
    let name = analyzer.generate_product_name(code).await;
    let applied = session.with_session_mut(|s| s.complete_analysis(code, name));

    if !applied {
        debug!(code = %code, "Record gone before its name resolved");
    }
    applied
}

/// Runs frame analysis and adds every barcode not already scanned.
///
/// Names are resolved one by one before anything is added; the batch
/// then lands in a single session update. Returns how many records were
/// added.
pub async fn analyze_frame(session: &SessionState, analyzer: &Analyzer, frame: &[u8]) -> usize {
    let detections = analyzer.analyze_frame(frame).await;

    let fresh: Vec<Detection> = session.with_session(|s| {
        detections
            .into_iter()
            .filter(|d| !s.contains(&d.code))
            .collect()
    });

    let mut resolved = Vec::with_capacity(fresh.len());
    for detection in fresh {
        let product_name = analyzer.generate_product_name(&detection.code).await;
        resolved.push(ResolvedDetection {
            detection,
            product_name,
        });
    }

    let added = session.with_session_mut(|s| s.add_batch(resolved));
    info!(added, "Frame analysis finished");
    added
}

/// Flips selection of the record at `index` (0-based).
pub fn toggle_selected(session: &SessionState, index: usize) -> Result<SessionView, AppError> {
    session.with_session_mut(|s| {
        s.toggle_selected(index)?;
        Ok(SessionView::from(&*s))
    })
}

/// Sets a quantity from typed input. Unreadable or non-positive input
/// becomes 1.
pub fn set_quantity(
    session: &SessionState,
    index: usize,
    input: &str,
) -> Result<SessionView, AppError> {
    session.with_session_mut(|s| {
        let quantity = s.set_quantity_text(index, input)?;
        debug!(index, quantity, "Session quantity set");
        Ok(SessionView::from(&*s))
    })
}

pub fn increment_quantity(session: &SessionState, index: usize) -> Result<SessionView, AppError> {
    session.with_session_mut(|s| {
        s.increment(index)?;
        Ok(SessionView::from(&*s))
    })
}

/// Stops at 1.
pub fn decrement_quantity(session: &SessionState, index: usize) -> Result<SessionView, AppError> {
    session.with_session_mut(|s| {
        s.decrement(index)?;
        Ok(SessionView::from(&*s))
    })
}

/// Drops every scanned record.
pub fn clear_session(session: &SessionState) -> SessionView {
    session.with_session_mut(|s| {
        s.clear();
        SessionView::from(&*s)
    })
}

/// Saves the selected records as new inventory rows.
///
/// ## Behavior
/// 1. Nothing selected: `NOTHING_SELECTED`, session untouched
/// 2. Store rejects the batch: error returned, session untouched
/// 3. Store accepts: the whole session is cleared
///
/// Returns the number of rows saved.
pub async fn save_to_inventory(session: &SessionState, store: &StoreState) -> Result<usize, AppError> {
    let items = session.with_session(|s| s.commit())?;

    let saved = store.inner().insert_batch(items).await?;

    session.with_session_mut(|s| s.clear());
    info!(saved, "Scan session saved to inventory");
    Ok(saved)
}

// =============================================================================
// Unit Tests
// =============================================================================
