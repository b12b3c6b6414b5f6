//! # Shared Mirror State
//!
//! The single shared state of the client: the current mirror snapshot and
//! the connection lifecycle state, held by an explicit owned object rather
//! than ambient globals.
//!
//! ## Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        MirrorState Sharing                              │
//! │                                                                         │
//! │                      ┌──────────────────┐                               │
//! │   SyncChannel ──────►│   MirrorState    │◄────── ScanSession (read)     │
//! │   (sole writer)      │                  │◄────── Presentation (read)    │
//! │                      │  • snapshot      │                               │
//! │                      │  • conn state    │── watch ──► observers         │
//! │                      │  • last update   │                               │
//! │                      │  • last error    │                               │
//! │                      └──────────────────┘                               │
//! │                                                                         │
//! │  The writer claim is an atomic flag: only one sync channel may ever    │
//! │  subscribe against a given mirror in a process.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::watch;

use shelfscan_core::{ConnectionState, MirrorSnapshot};

// =============================================================================
// Mirror State
// =============================================================================

/// Shared state object observed by the sync channel, the scan pipeline and
/// the presentation layer.
#[derive(Debug)]
pub struct MirrorState {
    /// Current mirror snapshot. Single-writer (sync channel), shared-read.
    snapshot: RwLock<MirrorSnapshot>,

    /// Connection lifecycle state, observable via a watch channel.
    conn_tx: watch::Sender<ConnectionState>,

    /// When the last remote update was accepted.
    last_update_at: RwLock<Option<DateTime<Utc>>>,

    /// Human-readable failure message for the sync-error state.
    last_error: RwLock<Option<String>>,

    /// Set once the sync channel claims the writer role.
    writer_claimed: AtomicBool,
}

impl MirrorState {
    /// Creates a fresh state in `Initializing` with an empty snapshot.
    pub fn new() -> Self {
        let (conn_tx, _) = watch::channel(ConnectionState::Initializing);
        MirrorState {
            snapshot: RwLock::new(MirrorSnapshot::empty()),
            conn_tx,
            last_update_at: RwLock::new(None),
            last_error: RwLock::new(None),
            writer_claimed: AtomicBool::new(false),
        }
    }

    // =========================================================================
    // Snapshot Access
    // =========================================================================

    /// Returns a clone of the current snapshot.
    pub fn snapshot(&self) -> MirrorSnapshot {
        self.snapshot
            .read()
            .map(|s| s.clone())
            .unwrap_or_default()
    }

    /// Runs a closure against the current snapshot without cloning it.
    ///
    /// This is the read path used for barcode resolution on every decode
    /// event.
    pub fn with_snapshot<R>(&self, f: impl FnOnce(&MirrorSnapshot) -> R) -> R {
        match self.snapshot.read() {
            Ok(guard) => f(&guard),
            Err(_) => f(&MirrorSnapshot::empty()),
        }
    }

    /// Seeds the snapshot from the persisted mirror at startup.
    ///
    /// Does not count as an accepted remote update, so the last-update
    /// timestamp stays empty.
    pub fn seed_snapshot(&self, snapshot: MirrorSnapshot) {
        if let Ok(mut s) = self.snapshot.write() {
            *s = snapshot;
        }
    }

    /// Replaces the snapshot wholesale with an accepted remote update and
    /// records the acceptance time.
    pub fn accept_update(&self, snapshot: MirrorSnapshot) {
        if let Ok(mut s) = self.snapshot.write() {
            *s = snapshot;
        }
        if let Ok(mut t) = self.last_update_at.write() {
            *t = Some(Utc::now());
        }
    }

    // =========================================================================
    // Connection State
    // =========================================================================

    /// Returns the current connection state.
    pub fn connection_state(&self) -> ConnectionState {
        *self.conn_tx.borrow()
    }

    /// Advances the connection state and notifies observers.
    pub fn set_connection_state(&self, state: ConnectionState) {
        self.conn_tx.send_if_modified(|current| {
            if *current == state {
                false
            } else {
                *current = state;
                true
            }
        });
    }

    /// Subscribes to connection state changes.
    pub fn subscribe_connection(&self) -> watch::Receiver<ConnectionState> {
        self.conn_tx.subscribe()
    }

    /// Records a terminal subscription failure: stores the human-readable
    /// message and advances the state to `SyncError`.
    pub fn record_failure(&self, message: impl Into<String>) {
        if let Ok(mut e) = self.last_error.write() {
            *e = Some(message.into());
        }
        self.set_connection_state(ConnectionState::SyncError);
    }

    /// Claims the single writer role for this mirror. Returns false if a
    /// writer already exists.
    pub(crate) fn claim_writer(&self) -> bool {
        !self.writer_claimed.swap(true, Ordering::SeqCst)
    }

    // =========================================================================
    // Status Reporting
    // =========================================================================

    /// Returns a serializable status snapshot for the presentation layer.
    pub fn status(&self) -> SyncStatus {
        let connection_state = self.connection_state();
        SyncStatus {
            connection_state: connection_state.to_string(),
            product_count: self.with_snapshot(|s| s.len()),
            last_update_at: self
                .last_update_at
                .read()
                .ok()
                .and_then(|t| t.map(|t| t.to_rfc3339())),
            last_error: self.last_error.read().ok().and_then(|e| e.clone()),
            is_healthy: connection_state == ConnectionState::Connected,
        }
    }
}

impl Default for MirrorState {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Sync Status DTO
// =============================================================================

/// Serializable status snapshot consumed by the presentation layer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncStatus {
    /// Current connection state (kebab-case, e.g. "awaiting-config").
    pub connection_state: String,

    /// Number of products in the current mirror snapshot.
    pub product_count: usize,

    /// When the last remote update was accepted (RFC 3339).
    pub last_update_at: Option<String>,

    /// Last terminal failure message, if any.
    pub last_error: Option<String>,

    /// True when the subscription is live.
    pub is_healthy: bool,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use shelfscan_core::Product;

    fn product(barcode: &str) -> Product {
        Product {
            id: format!("prod-{barcode}"),
            name: "Cola 330ml".to_string(),
            price_cents: 150,
            stock: 24,
            barcode: barcode.to_string(),
            cost_cents: 90,
            category: "Drinks".to_string(),
            unit: "pcs".to_string(),
            supplier: None,
        }
    }

    #[test]
    fn test_initial_state() {
        let state = MirrorState::new();
        assert_eq!(state.connection_state(), ConnectionState::Initializing);
        assert!(state.snapshot().is_empty());

        let status = state.status();
        assert_eq!(status.connection_state, "initializing");
        assert_eq!(status.product_count, 0);
        assert!(!status.is_healthy);
        assert!(status.last_update_at.is_none());
    }

    #[test]
    fn test_seed_does_not_mark_an_update() {
        let state = MirrorState::new();
        state.seed_snapshot(MirrorSnapshot::new(vec![product("111")]));

        assert_eq!(state.snapshot().len(), 1);
        assert!(state.status().last_update_at.is_none());
    }

    #[test]
    fn test_accept_update_replaces_and_timestamps() {
        let state = MirrorState::new();
        state.seed_snapshot(MirrorSnapshot::new(vec![product("111")]));
        state.accept_update(MirrorSnapshot::new(vec![product("222"), product("333")]));

        assert_eq!(state.snapshot().len(), 2);
        assert_eq!(state.snapshot().products()[0].barcode, "222");
        assert!(state.status().last_update_at.is_some());
    }

    #[test]
    fn test_watch_observes_transitions() {
        let state = MirrorState::new();
        let rx = state.subscribe_connection();

        state.set_connection_state(ConnectionState::Connecting);
        state.set_connection_state(ConnectionState::Connected);

        assert_eq!(*rx.borrow(), ConnectionState::Connected);
        assert!(state.status().is_healthy);
    }

    #[test]
    fn test_record_failure_is_terminal_and_described() {
        let state = MirrorState::new();
        state.record_failure("permission denied by remote");

        assert_eq!(state.connection_state(), ConnectionState::SyncError);
        let status = state.status();
        assert_eq!(status.connection_state, "sync-error");
        assert_eq!(
            status.last_error.as_deref(),
            Some("permission denied by remote")
        );
    }

    #[test]
    fn test_writer_claim_is_exclusive() {
        let state = MirrorState::new();
        assert!(state.claim_writer());
        assert!(!state.claim_writer());
    }
}
