//! # Store Error Types
//!
//! Error types for mirror slot persistence.
//!
//! Store failures are recovered locally (empty-snapshot fallback on load,
//! logged-and-ignored on save); they never surface to the user as a hard
//! failure.

use thiserror::Error;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Mirror slot persistence errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the slot file failed.
    #[error("Mirror slot I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing the snapshot for the slot failed.
    #[error("Mirror slot serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// No platform data directory could be determined for the default slot.
    #[error("No data directory available for the mirror slot")]
    NoDataDir,
}
