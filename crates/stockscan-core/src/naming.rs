//! # Product Name Stub
//!
//! Stands in for an AI classifier. The name is a brand/category pairing
//! picked from two fixed lists by the barcode's leading digits, so the
//! same barcode always yields the same name.
//!
//! ```text
//!  "8690012345678"
//!   ───
//!   869 ──► 869 % 7 = 1 ──► BRANDS[1]     = "LG"
//!       └─► 869 % 5 = 4 ──► CATEGORIES[4] = "Kırtasiye"
//!
//!  name = "LG Kırtasiye"
//! ```

use crate::validation::parse_leading_int;

/// Brand half of the generated name.
pub const BRANDS: [&str; 7] = [
    "Samsung", "LG", "Arçelik", "Vestel", "Bosch", "Grundig", "Beko",
];

/// Category half of the generated name.
pub const CATEGORIES: [&str; 5] = ["Elektronik", "Gıda", "Tekstil", "Ev Eşyası", "Kırtasiye"];

/// How many leading characters feed the index.
const PREFIX_CHARS: usize = 3;

/// Derives a product name from a barcode.
///
/// A prefix without digits (QR URLs, alphanumeric codes) indexes as 0.
///
/// ## Example
/// ```rust
/// use stockscan_core::derive_product_name;
///
/// assert_eq!(derive_product_name("8690012345678"), "LG Kırtasiye");
/// assert_eq!(derive_product_name("123456789012"), "Bosch Ev Eşyası");
/// ```
pub fn derive_product_name(barcode: &str) -> String {
    let prefix: String = barcode.chars().take(PREFIX_CHARS).collect();
    let n = parse_leading_int(&prefix).unwrap_or(0).unsigned_abs();

    let brand = BRANDS[(n % BRANDS.len() as u64) as usize];
    let category = CATEGORIES[(n % CATEGORIES.len() as u64) as usize];

    format!("{brand} {category}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_pairings() {
        assert_eq!(derive_product_name("8690012345678"), "LG Kırtasiye");
        assert_eq!(derive_product_name("8690098765432"), "LG Kırtasiye");
        assert_eq!(derive_product_name("123456789012"), "Bosch Ev Eşyası");
        assert_eq!(derive_product_name("000"), "Samsung Elektronik");
    }

    #[test]
    fn test_only_prefix_matters() {
        assert_eq!(
            derive_product_name("5901234123457"),
            derive_product_name("590999")
        );
    }

    #[test]
    fn test_short_and_non_numeric_codes() {
        // "7" → 7 % 7 = 0, 7 % 5 = 2
        assert_eq!(derive_product_name("7"), "Samsung Tekstil");
        // "12X..." reads 12: 12 % 7 = 5, 12 % 5 = 2
        assert_eq!(derive_product_name("12X-99"), "Grundig Tekstil");
        assert_eq!(derive_product_name("https://x"), "Samsung Elektronik");
        assert_eq!(derive_product_name(""), "Samsung Elektronik");
    }
}
