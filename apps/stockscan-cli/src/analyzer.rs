//! # Analyzer Stubs
//!
//! Stand-ins for the AI calls: product name generation and still-frame
//! barcode detection. Both only sleep and return derived or fixed data.
//!
//! ```text
//!  generate_product_name("8690012345678")
//!       │  sleep(name_delay)
//!       ▼
//!  derive_product_name ──► "LG Kırtasiye"
//!
//!  analyze_frame(bytes)
//!       │  sleep(frame_delay)
//!       ▼
//!  [8690012345678 STOK_KODU, 8690098765432 URUN_KODU]
//! ```

use std::time::Duration;

use stockscan_core::{derive_product_name, Detection};
use tokio::time::sleep;
use tracing::debug;

use crate::config::AppConfig;

/// Barcodes the frame stub always "finds".
const FRAME_DETECTIONS: [(&str, &str); 2] = [
    ("8690012345678", "STOK_KODU"),
    ("8690098765432", "URUN_KODU"),
];

/// Mock AI service with configurable latency.
#[derive(Debug, Clone)]
pub struct Analyzer {
    name_delay: Duration,
    frame_delay: Duration,
}

impl Analyzer {
    pub fn new(name_delay: Duration, frame_delay: Duration) -> Self {
        Analyzer {
            name_delay,
            frame_delay,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Analyzer::new(config.name_delay, config.frame_delay)
    }

    /// No latency at all. Used by tests.
    pub fn instant() -> Self {
        Analyzer::new(Duration::ZERO, Duration::ZERO)
    }

    /// Produces a product name for `barcode`.
    pub async fn generate_product_name(&self, barcode: &str) -> String {
        sleep(self.name_delay).await;
        derive_product_name(barcode)
    }

    /// Looks for barcodes in a captured frame.
    ///
    /// The frame content is ignored.
    pub async fn analyze_frame(&self, frame: &[u8]) -> Vec<Detection> {
        debug!(bytes = frame.len(), "Analyzing frame");
        sleep(self.frame_delay).await;

        FRAME_DETECTIONS
            .iter()
            .map(|&(code, label)| Detection::new(code, Some(label)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_generate_product_name_is_deterministic() {
        let analyzer = Analyzer::instant();

        assert_eq!(
            analyzer.generate_product_name("8690012345678").await,
            "LG Kırtasiye"
        );
        assert_eq!(
            analyzer.generate_product_name("8690012345678").await,
            analyzer.generate_product_name("869").await
        );
    }

    #[tokio::test]
    async fn test_analyze_frame_returns_fixed_codes() {
        let detections = Analyzer::instant().analyze_frame(&[]).await;

        assert_eq!(detections.len(), 2);
        assert_eq!(detections[0].code, "8690012345678");
        assert_eq!(detections[0].symbology.as_deref(), Some("STOK_KODU"));
        assert_eq!(detections[1].code, "8690098765432");
        assert_eq!(detections[1].symbology.as_deref(), Some("URUN_KODU"));
    }
}
