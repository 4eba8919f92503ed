//! Plain-text rendering of command views.

use std::fmt;

use stockscan_core::ScannedBarcode;

use crate::commands::{InventoryView, SessionView};

impl fmt::Display for SessionView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.records.is_empty() {
            return writeln!(f, "No barcodes scanned yet.");
        }

        for (position, record) in self.records.iter().enumerate() {
            writeln!(f, "{}", session_line(position + 1, record))?;
        }

        writeln!(
            f,
            "Selected: {} barcode(s), {} unit(s)",
            self.summary.selected_count, self.summary.selected_quantity
        )
    }
}

fn session_line(position: usize, record: &ScannedBarcode) -> String {
    let mark = if record.selected { "[x]" } else { "[ ]" };
    let name = match (&record.product_name, record.is_analyzing) {
        (_, true) => "(analyzing…)".to_string(),
        (Some(name), false) if record.is_ai_generated => format!("{name} (AI)"),
        (Some(name), false) => name.clone(),
        (None, false) => "-".to_string(),
    };
    let symbology = record.symbology.as_deref().unwrap_or("?");

    format!(
        "{position:>3}. {mark} {code} [{symbology}]  x{qty}  {name}",
        code = record.code,
        qty = record.quantity,
    )
}

impl fmt::Display for InventoryView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Total products: {}   Total quantity: {}",
            self.summary.total_items, self.summary.total_quantity
        )?;

        if self.items.is_empty() {
            return match &self.query {
                Some(query) => writeln!(f, "No items match \"{query}\"."),
                None => writeln!(f, "Inventory is empty."),
            };
        }

        for item in &self.items {
            writeln!(
                f,
                "{id}  {barcode:<16} x{qty:<5} {scanned}  {name}",
                id = item.id,
                barcode = item.barcode,
                qty = item.quantity,
                scanned = item.scanned_at.format("%Y-%m-%d %H:%M"),
                name = item.product_name.as_deref().unwrap_or("-"),
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockscan_core::{ScanSession, SessionSummary};

    #[test]
    fn test_session_rendering() {
        let mut session = ScanSession::new();
        session.add_detected("8690012345678", Some("ean13"));
        session.add_detected("111", None);
        session.complete_analysis("111", "Beko Gıda");
        session.toggle_selected(0).unwrap();

        let text = SessionView::from(&session).to_string();

        assert!(text.contains("  1. [ ] 8690012345678 [ean13]  x1  (analyzing…)"));
        assert!(text.contains("  2. [x] 111 [?]  x1  Beko Gıda (AI)"));
        assert!(text.contains("Selected: 1 barcode(s), 1 unit(s)"));
    }

    #[test]
    fn test_empty_views() {
        let session = SessionView {
            records: Vec::new(),
            summary: SessionSummary::default(),
        };
        assert_eq!(session.to_string(), "No barcodes scanned yet.\n");

        let inventory = InventoryView {
            items: Vec::new(),
            summary: Default::default(),
            query: Some("999".to_string()),
        };
        assert!(inventory.to_string().contains("No items match \"999\"."));
    }
}
