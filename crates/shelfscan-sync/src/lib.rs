//! # shelfscan-sync: Remote Sync Channel and Scan Pipeline
//!
//! This crate keeps the local product mirror reconciled with the remote
//! catalog and turns the raw decode stream into debounced product-found
//! notifications.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Shelfscan Data Flow                             │
//! │                                                                         │
//! │  RemoteConfig ──► SyncChannel ──► MirrorStore (durable slot)           │
//! │   (7 params)       │        └───► MirrorState (shared snapshot)        │
//! │                    │                    ▲            │                  │
//! │                    │   sole writer ─────┘            │ shared read      │
//! │                    │                                 ▼                  │
//! │   decode stream ──────────────────────────► ScanSession / ScanGate     │
//! │   (external camera/decoder)                          │                  │
//! │                                                      ▼                  │
//! │                                          ScanEventSink::product_found   │
//! │                                          (presentation layer)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`channel`] - WebSocket subscription, readiness probe, reconciliation
//! - [`state`] - Shared [`MirrorState`] and [`SyncStatus`] reporting
//! - [`scanner`] - [`ScanGate`] debounce and [`ScanSession`] resource scope
//! - [`error`] - Sync error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use shelfscan_core::RemoteConfig;
//! use shelfscan_store::MirrorStore;
//! use shelfscan_sync::{ChannelConfig, MirrorState, SyncChannel, PRODUCTS_COLLECTION};
//!
//! let remote = RemoteConfig::from_env()?;
//! let store = Arc::new(MirrorStore::open_default()?);
//! let state = Arc::new(MirrorState::new());
//! state.seed_snapshot(store.load());
//!
//! let config = ChannelConfig::for_collection(&remote, PRODUCTS_COLLECTION)?;
//! let handle = SyncChannel::new(config, state.clone(), store).subscribe()?;
//!
//! // ... later
//! handle.shutdown().await;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod channel;
pub mod error;
pub mod scanner;
pub mod state;

// =============================================================================
// Re-exports
// =============================================================================

pub use channel::{
    ChannelConfig, SyncChannel, SyncChannelHandle, MAX_READY_ATTEMPTS, PRODUCTS_COLLECTION,
    READY_BACKOFF,
};
pub use error::{SyncError, SyncResult};
pub use scanner::{BarcodeDecoder, DecodeEvent, ScanEventSink, ScanGate, ScanSession, SCAN_COOLDOWN};
pub use state::{MirrorState, SyncStatus};
