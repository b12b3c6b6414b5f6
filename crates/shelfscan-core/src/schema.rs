//! # Remote Payload Schema Check
//!
//! Explicit shape validation for remote update payloads.
//!
//! ## Payload Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Remote Payload Outcomes                              │
//! │                                                                         │
//! │  null / absent            ──►  Empty      (no update, keep snapshot,   │
//! │                                            connection still healthy)   │
//! │                                                                         │
//! │  JSON array of product-   ──►  Products   (snapshot replaced as a      │
//! │  shaped records                            whole)                       │
//! │                                                                         │
//! │  anything else            ──►  Rejected   (update ignored, prior       │
//! │  (object, string, record               snapshot retained, connection   │
//! │   with negative amounts)               still advances to connected)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The check returns a tagged result rather than assuming the shape by
//! structure, so callers never see a half-parsed collection.

use serde_json::Value;

use crate::types::Product;

// =============================================================================
// Payload Check Result
// =============================================================================

/// Outcome of validating a remote update payload.
#[derive(Debug, Clone, PartialEq)]
pub enum PayloadCheck {
    /// A valid sequence of product records, in payload order.
    Products(Vec<Product>),

    /// `null` or absent payload. Not an error: the connection is healthy,
    /// there is simply nothing to apply.
    Empty,

    /// The payload is not shaped as a sequence of product records.
    /// Carries a human-readable reason for the log line.
    Rejected(String),
}

impl PayloadCheck {
    /// Returns true if this outcome carries a usable product sequence.
    pub fn is_products(&self) -> bool {
        matches!(self, PayloadCheck::Products(_))
    }
}

// =============================================================================
// Schema Check
// =============================================================================

/// Validates the shape of a remote update payload.
///
/// The whole payload is accepted or rejected as a unit: a single malformed
/// record rejects the update so a partial payload can never replace the
/// mirror.
pub fn check_payload(payload: &Value) -> PayloadCheck {
    let records = match payload {
        Value::Null => return PayloadCheck::Empty,
        Value::Array(records) => records,
        other => {
            return PayloadCheck::Rejected(format!(
                "expected an array of products, got {}",
                json_kind(other)
            ));
        }
    };

    let mut products = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        let product: Product = match serde_json::from_value(record.clone()) {
            Ok(product) => product,
            Err(e) => {
                return PayloadCheck::Rejected(format!(
                    "record {index} is not product-shaped: {e}"
                ));
            }
        };

        // Monetary amounts and quantities are non-negative by contract.
        if product.price_cents < 0 || product.cost_cents < 0 || product.stock < 0 {
            return PayloadCheck::Rejected(format!(
                "record {index} ({}) has a negative amount",
                product.id
            ));
        }

        products.push(product);
    }

    PayloadCheck::Products(products)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
