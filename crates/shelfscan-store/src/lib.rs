//! # shelfscan-store: Durable Local Mirror Slot
//!
//! Persistence layer for the last-known product collection. One named slot
//! on disk holds the serialized mirror snapshot; it is read once at startup
//! (before the first remote update arrives) and written on every accepted
//! remote update.
//!
//! ## Failure Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Persistence Failure Policy                         │
//! │                                                                         │
//! │  load(): missing file, unreadable file, or a payload that fails the    │
//! │  schema check (not a sequence of product-shaped records) is treated    │
//! │  as "no data" - the empty snapshot is returned and a warning logged.   │
//! │  It is never a crash.                                                  │
//! │                                                                         │
//! │  save(): failure (quota, permissions) is surfaced as a StoreError so   │
//! │  the caller can log it, but callers must never let it corrupt the      │
//! │  in-memory snapshot being displayed.                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//! - [`mirror`] - The [`MirrorStore`](mirror::MirrorStore) slot
//! - [`error`] - Store error types

pub mod error;
pub mod mirror;

pub use error::{StoreError, StoreResult};
pub use mirror::MirrorStore;
