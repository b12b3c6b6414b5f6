//! # Scan Pipeline
//!
//! Consumes the raw decode stream from the external decoding collaborator
//! and emits at most one "product found" notification per physical scan.
//!
//! ## Debounce Algorithm
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Scan Debounce Gate                                 │
//! │                                                                         │
//! │  decode event ──► in cooldown? ── yes ──► discard silently             │
//! │                        │                  (even for a DIFFERENT        │
//! │                        no                  barcode: the cooldown is    │
//! │                        │                   time-based and global to    │
//! │                        ▼                   the scanning session)       │
//! │                  resolver match?                                        │
//! │                        │                                                │
//! │            ┌── no ─────┴───── yes ──┐                                  │
//! │            ▼                        ▼                                   │
//! │   transparent no-op          fire product-found,                        │
//! │   (no cooldown started,      enter cooldown for                         │
//! │    next matching frame       SCAN_COOLDOWN (1s)                         │
//! │    fires immediately)                                                   │
//! │                                                                         │
//! │  The cooldown is a stored deadline checked on each event, not a        │
//! │  scheduled timer, so teardown mid-cooldown can never leak a            │
//! │  perpetually-armed or perpetually-cooled state.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Resource Scoping
//! The camera/decode subsystem is an external resource acquired once per
//! scanning session. [`ScanSession`] owns it behind the [`BarcodeDecoder`]
//! trait and releases it on every exit path, including drops mid-cooldown.

use std::sync::Arc;

use tokio::time::{Duration, Instant};
use tracing::{debug, info};
use uuid::Uuid;

use shelfscan_core::{resolve, Product};

use crate::state::MirrorState;

// =============================================================================
// Constants
// =============================================================================

/// Cooldown window after a successful resolution. Decode events inside the
/// window are discarded regardless of barcode.
pub const SCAN_COOLDOWN: Duration = Duration::from_secs(1);

// =============================================================================
// External Collaborator Traits
// =============================================================================

/// The external decoding collaborator (camera stream + decoder).
///
/// Acquired once per scanning session; `release` stops the stream and resets
/// the decoder. The session guarantees exactly one release on every exit
/// path.
pub trait BarcodeDecoder: Send {
    /// Stops the camera stream and resets the decoder.
    fn release(&mut self);
}

/// Consumer of product-found notifications (the presentation layer).
pub trait ScanEventSink: Send + Sync {
    /// Invoked with the resolved product, at most once per physical scan.
    fn product_found(&self, product: &Product);
}

// =============================================================================
// Decode Events
// =============================================================================

/// One callback from the decode stream: either a successfully decoded string
/// or an error/no-result indication for that frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeEvent {
    /// A frame decoded to this barcode string.
    Decoded(String),

    /// The frame produced no decodable barcode. A normal occurrence while
    /// the camera feed is active, not an error.
    NoResult,
}

// =============================================================================
// Scan Gate
// =============================================================================

/// Suppresses repeated resolution + notification for the same physical scan.
#[derive(Debug, Default)]
pub struct ScanGate {
    /// Deadline until which decode events are discarded. `None` when armed.
    cooldown_until: Option<Instant>,
}

impl ScanGate {
    /// Creates an armed gate with no cooldown pending.
    pub fn new() -> Self {
        ScanGate::default()
    }

    /// Processes one decode event against the current mirror.
    ///
    /// Returns true when a product-found notification fired.
    pub fn on_decode(
        &mut self,
        event: &DecodeEvent,
        state: &MirrorState,
        sink: &dyn ScanEventSink,
    ) -> bool {
        let decoded = match event {
            DecodeEvent::Decoded(text) => text,
            // Transparent no-op: the next matching frame may fire immediately.
            DecodeEvent::NoResult => return false,
        };

        let now = Instant::now();
        if let Some(until) = self.cooldown_until {
            if now < until {
                debug!(barcode = %decoded, "Discarding decode event during cooldown");
                return false;
            }
            self.cooldown_until = None;
        }

        let product = state.with_snapshot(|snapshot| resolve(decoded, snapshot).cloned());
        match product {
            Some(product) => {
                info!(barcode = %decoded, product_id = %product.id, "Product found");
                sink.product_found(&product);
                self.cooldown_until = Some(now + SCAN_COOLDOWN);
                true
            }
            None => {
                // A miss is a normal negative result: no notification and no
                // cooldown, so scanning continues uninterrupted.
                debug!(barcode = %decoded, "No product with this barcode");
                false
            }
        }
    }
}

// =============================================================================
// Scan Session
// =============================================================================

/// One scanning session: owns the decoder resource and the debounce gate.
///
/// The decoder is released exactly once, on [`end`](Self::end) or on drop,
/// whichever comes first.
pub struct ScanSession<D: BarcodeDecoder> {
    id: Uuid,
    decoder: Option<D>,
    gate: ScanGate,
    state: Arc<MirrorState>,
    sink: Arc<dyn ScanEventSink>,
}

impl<D: BarcodeDecoder> ScanSession<D> {
    /// Begins a session, taking ownership of the acquired decoder.
    pub fn begin(decoder: D, state: Arc<MirrorState>, sink: Arc<dyn ScanEventSink>) -> Self {
        let id = Uuid::new_v4();
        info!(session = %id, "Scan session started");
        ScanSession {
            id,
            decoder: Some(decoder),
            gate: ScanGate::new(),
            state,
            sink,
        }
    }

    /// Session identifier for log correlation.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Feeds one decode-stream callback through the gate.
    ///
    /// Returns true when a product-found notification fired.
    pub fn handle_decode(&mut self, event: &DecodeEvent) -> bool {
        self.gate.on_decode(event, &self.state, self.sink.as_ref())
    }

    /// Ends the session, releasing the decoder.
    pub fn end(mut self) {
        self.release_decoder();
    }

    fn release_decoder(&mut self) {
        if let Some(mut decoder) = self.decoder.take() {
            decoder.release();
            info!(session = %self.id, "Scan session ended, decoder released");
        }
    }
}

impl<D: BarcodeDecoder> Drop for ScanSession<D> {
    fn drop(&mut self) {
        self.release_decoder();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
