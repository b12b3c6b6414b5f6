//! # Domain Types
//!
//! Core domain types used throughout Shelfscan.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │ MirrorSnapshot  │   │ ConnectionState │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (opaque)    │   │  Vec<Product>   │   │  Initializing   │       │
//! │  │  barcode        │   │  replaced as a  │   │  AwaitingConfig │       │
//! │  │  price_cents    │   │  whole, never   │   │  Connecting     │       │
//! │  │  stock          │   │  patched        │   │  Connected      │       │
//! │  └─────────────────┘   └─────────────────┘   │  SyncError      │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership Rules
//! - A `Product` is only ever created or overwritten by the sync channel;
//!   the client never mutates an individual product's fields in place.
//! - A `MirrorSnapshot` is replaced atomically as a whole. A partial or
//!   malformed remote payload must leave the previous snapshot untouched.

use serde::{Deserialize, Serialize};

// =============================================================================
// Product
// =============================================================================

/// A product record mirrored from the remote catalog.
///
/// Immutable from the client's perspective: records are only written by the
/// sync channel when it accepts a remote update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Opaque unique identifier assigned by the remote store.
    pub id: String,

    /// Display name shown in the catalog and on the detail view.
    pub name: String,

    /// Selling price in cents (smallest currency unit).
    pub price_cents: i64,

    /// Current stock quantity.
    pub stock: i64,

    /// Barcode (EAN-13, UPC-A, etc.). Treated as a lookup key but not
    /// guaranteed unique across the catalog.
    pub barcode: String,

    /// Cost in cents (for margin display).
    pub cost_cents: i64,

    /// Category label.
    pub category: String,

    /// Sales unit (e.g., "pcs", "kg").
    pub unit: String,

    /// Supplier name, when known.
    #[serde(default)]
    pub supplier: Option<String>,
}

// =============================================================================
// Mirror Snapshot
// =============================================================================

/// The remote collection as of the last successfully received update.
///
/// An ordered sequence of [`Product`]. Serializes transparently as a bare
/// JSON array, which is also the shape of the durable mirror slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MirrorSnapshot {
    products: Vec<Product>,
}

impl MirrorSnapshot {
    /// Creates a snapshot from a sequence of products.
    pub fn new(products: Vec<Product>) -> Self {
        MirrorSnapshot { products }
    }

    /// The empty snapshot (startup state, and the fallback for corrupt or
    /// missing persisted data).
    pub fn empty() -> Self {
        MirrorSnapshot::default()
    }

    /// Returns the products in snapshot order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Number of products in the snapshot.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Returns true if the snapshot holds no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

// =============================================================================
// Connection State
// =============================================================================

/// Lifecycle state of the remote subscription, as observed by the
/// presentation layer.
///
/// Exactly one snapshot is associated with `Connected`; earlier states have
/// no (or a stale) snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConnectionState {
    /// Process is starting; nothing has been attempted yet.
    Initializing,

    /// Waiting for a valid connection configuration.
    AwaitingConfig,

    /// Subscription is being established.
    Connecting,

    /// Subscription is live; the mirror tracks the remote collection.
    Connected,

    /// The subscription failed. Terminal for this session.
    SyncError,
}

impl Default for ConnectionState {
    fn default() -> Self {
        ConnectionState::Initializing
    }
}

impl std::fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectionState::Initializing => write!(f, "initializing"),
            ConnectionState::AwaitingConfig => write!(f, "awaiting-config"),
            ConnectionState::Connecting => write!(f, "connecting"),
            ConnectionState::Connected => write!(f, "connected"),
            ConnectionState::SyncError => write!(f, "sync-error"),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
