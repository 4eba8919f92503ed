//! # Scan Session
//!
//! The ordered set of barcodes detected since the scanner was last cleared
//! or saved.
//!
//! ## Session Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Scan Session Operations                              │
//! │                                                                         │
//! │  Event                    Transition              State Change          │
//! │  ─────                    ──────────              ────────────          │
//! │                                                                         │
//! │  Camera detects code ────► add_detected() ──────► push(pending)        │
//! │  Name stub returns ──────► complete_analysis() ─► record resolved      │
//! │  Frame analysed ─────────► add_batch() ─────────► push(resolved)*      │
//! │  Tick checkbox ──────────► toggle_selected() ───► selected = !selected │
//! │  Edit quantity ──────────► set_quantity*() ─────► quantity = max(n, 1) │
//! │  Trash icon ─────────────► clear() ─────────────► records.clear()      │
//! │  Save ───────────────────► commit() ────────────► (read only)          │
//! │                                                                         │
//! │  NOTE: commit() never mutates. The caller clears the session once      │
//! │        the store has accepted the batch.                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{Detection, NewInventoryItem, ResolvedDetection, ScannedBarcode};
use crate::validation::{clamp_quantity, coerce_quantity};
use crate::MIN_QUANTITY;

/// Footer totals for the selected records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SessionSummary {
    pub selected_count: usize,
    pub selected_quantity: i64,
}

/// The scan session.
///
/// ## Invariants
/// - Records are unique by `code`
/// - Every record has `quantity >= 1`
/// - Records keep detection order
///
/// Deserializing checks the first two invariants and rejects input that
/// breaks them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "SessionRecords")]
pub struct ScanSession {
    records: Vec<ScannedBarcode>,
}

/// Unchecked wire form of [`ScanSession`].
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionRecords {
    records: Vec<ScannedBarcode>,
}

impl TryFrom<SessionRecords> for ScanSession {
    type Error = CoreError;

    fn try_from(raw: SessionRecords) -> CoreResult<Self> {
        let mut session = ScanSession::new();

        for record in raw.records {
            if record.quantity < MIN_QUANTITY {
                return Err(ValidationError::MustBePositive {
                    field: "quantity".to_string(),
                }
                .into());
            }
            if session.contains(&record.code) {
                return Err(ValidationError::InvalidFormat {
                    field: "code".to_string(),
                    reason: format!("duplicate barcode {}", record.code),
                }
                .into());
            }
            session.records.push(record);
        }

        Ok(session)
    }
}

impl ScanSession {
    /// Creates an empty session.
    pub fn new() -> Self {
        ScanSession::default()
    }

    /// Records a live detection.
    ///
    /// ## Behavior
    /// - Code already present: no-op, returns `false`
    /// - Otherwise: appends a selected record with quantity 1 and
    ///   `is_analyzing = true`, returns `true`
    ///
    /// The caller is expected to resolve a product name and hand it to
    /// [`ScanSession::complete_analysis`].
    pub fn add_detected(&mut self, code: &str, symbology: Option<&str>) -> bool {
        if self.contains(code) {
            return false;
        }

        self.records
            .push(ScannedBarcode::pending(Detection::new(code, symbology)));
        true
    }

    /// Attaches a resolved product name to a pending record.
    ///
    /// Returns `false` if the code has left the session in the meantime
    /// (cleared or saved while the name was resolving).
    pub fn complete_analysis(&mut self, code: &str, product_name: impl Into<String>) -> bool {
        match self.records.iter_mut().find(|r| r.code == code) {
            Some(record) => {
                record.product_name = Some(product_name.into());
                record.is_ai_generated = true;
                record.is_analyzing = false;
                true
            }
            None => false,
        }
    }

    /// Adds already-resolved detections, skipping codes already present.
    ///
    /// Duplicates inside `batch` itself are also skipped, first one wins.
    /// Returns how many records were added.
    pub fn add_batch(&mut self, batch: impl IntoIterator<Item = ResolvedDetection>) -> usize {
        let before = self.records.len();

        for resolved in batch {
            if self.contains(&resolved.detection.code) {
                continue;
            }
            self.records.push(ScannedBarcode::resolved(resolved));
        }

        self.records.len() - before
    }

    /// Flips the `selected` flag of the record at `index`.
    pub fn toggle_selected(&mut self, index: usize) -> CoreResult<bool> {
        let record = self.record_mut(index)?;
        record.selected = !record.selected;
        Ok(record.selected)
    }

    /// Sets a quantity, clamping anything below 1 to 1.
    pub fn set_quantity(&mut self, index: usize, quantity: i64) -> CoreResult<i64> {
        let record = self.record_mut(index)?;
        record.quantity = clamp_quantity(quantity);
        Ok(record.quantity)
    }

    /// Sets a quantity from typed input; unreadable input becomes 1.
    pub fn set_quantity_text(&mut self, index: usize, input: &str) -> CoreResult<i64> {
        self.set_quantity(index, coerce_quantity(input))
    }

    /// The "+" button.
    pub fn increment(&mut self, index: usize) -> CoreResult<i64> {
        let record = self.record_mut(index)?;
        record.quantity = record.quantity.saturating_add(1);
        Ok(record.quantity)
    }

    /// The "-" button. Stops at 1.
    pub fn decrement(&mut self, index: usize) -> CoreResult<i64> {
        let record = self.record_mut(index)?;
        record.quantity = clamp_quantity(record.quantity - 1);
        Ok(record.quantity)
    }

    /// Drops every record.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Builds the payload for the inventory store from selected records.
    ///
    /// ## Returns
    /// - `Ok(items)` in session order
    /// - `Err(CoreError::NothingSelected)` if no record is selected
    pub fn commit(&self) -> CoreResult<Vec<NewInventoryItem>> {
        let items: Vec<NewInventoryItem> = self
            .records
            .iter()
            .filter(|r| r.selected)
            .map(ScannedBarcode::to_new_item)
            .collect();

        if items.is_empty() {
            return Err(CoreError::NothingSelected);
        }

        Ok(items)
    }

    /// Totals for the selected records.
    pub fn summary(&self) -> SessionSummary {
        self.records
            .iter()
            .filter(|r| r.selected)
            .fold(SessionSummary::default(), |acc, r| SessionSummary {
                selected_count: acc.selected_count + 1,
                selected_quantity: acc.selected_quantity.saturating_add(r.quantity),
            })
    }

    /// Whether `code` is already in the session.
    pub fn contains(&self, code: &str) -> bool {
        self.records.iter().any(|r| r.code == code)
    }

    /// Records in detection order.
    pub fn records(&self) -> &[ScannedBarcode] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Checks if the session is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn record_mut(&mut self, index: usize) -> CoreResult<&mut ScannedBarcode> {
        let len = self.records.len();
        self.records
            .get_mut(index)
            .ok_or(CoreError::IndexOutOfRange { index, len })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
