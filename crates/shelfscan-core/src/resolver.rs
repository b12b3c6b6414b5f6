//! # Barcode Resolver
//!
//! Maps a decoded barcode string to a product record in the current mirror
//! snapshot.
//!
//! ## Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    resolve(decoded, snapshot)                           │
//! │                                                                         │
//! │  • Exact match against each product's barcode field                    │
//! │  • First match in snapshot order wins (barcodes are not guaranteed     │
//! │    unique)                                                              │
//! │  • None when no product carries that exact barcode                     │
//! │                                                                         │
//! │  Pure function of its two inputs - no mutation, no I/O - so it is      │
//! │  unit-testable independent of camera or network concerns.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::types::{MirrorSnapshot, Product};

/// Resolves a decoded barcode string against the current mirror snapshot.
///
/// Returns the first product (in snapshot order) whose `barcode` field is an
/// exact match, or `None` when the barcode is unknown. A miss is a normal
/// negative result, not an error.
pub fn resolve<'a>(decoded_text: &str, snapshot: &'a MirrorSnapshot) -> Option<&'a Product> {
    snapshot
        .products()
        .iter()
        .find(|product| product.barcode == decoded_text)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, barcode: &str) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {id}"),
            price_cents: 500,
            stock: 10,
            barcode: barcode.to_string(),
            cost_cents: 300,
            category: "General".to_string(),
            unit: "pcs".to_string(),
            supplier: None,
        }
    }

    #[test]
    fn test_exact_match_returns_product() {
        let snapshot = MirrorSnapshot::new(vec![product("a", "12345"), product("b", "67890")]);
        let found = resolve("12345", &snapshot).unwrap();
        assert_eq!(found.id, "a");
    }

    #[test]
    fn test_unknown_barcode_is_a_miss() {
        let snapshot = MirrorSnapshot::new(vec![product("a", "12345")]);
        assert!(resolve("99999", &snapshot).is_none());
    }

    #[test]
    fn test_no_partial_or_prefix_matches() {
        let snapshot = MirrorSnapshot::new(vec![product("a", "12345")]);
        assert!(resolve("1234", &snapshot).is_none());
        assert!(resolve("123456", &snapshot).is_none());
        assert!(resolve("", &snapshot).is_none());
    }

    #[test]
    fn test_duplicate_barcodes_resolve_to_first_in_order() {
        let snapshot = MirrorSnapshot::new(vec![
            product("first", "111"),
            product("second", "111"),
        ]);
        assert_eq!(resolve("111", &snapshot).unwrap().id, "first");
    }

    #[test]
    fn test_empty_snapshot_never_matches() {
        assert!(resolve("12345", &MirrorSnapshot::empty()).is_none());
    }
}
