//! # Sync Error Types
//!
//! Error types for the remote subscription.
//!
//! ## Propagation Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Sync Error Categories                             │
//! │                                                                         │
//! │  TERMINAL (surface to the user, state goes sync-error)                 │
//! │  ──────────────────────────────────────────────────────                │
//! │  • ConnectionFailed       - transport/permission error callback        │
//! │  • DependencyUnavailable  - readiness probe exhausted its bound        │
//! │  • InvalidUrl             - endpoint cannot be addressed at all        │
//! │                                                                         │
//! │  ABSORBED (logged, session continues)                                  │
//! │  ─────────────────────────────────────                                 │
//! │  • Malformed payloads     - handled in the channel, never an error     │
//! │  • Persistence failures   - handled via StoreError, never propagated   │
//! │                                                                         │
//! │  There is no internal retry loop: retry after a terminal error is      │
//! │  the responsibility of the surrounding process (full restart).         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Result type alias for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Sync error type covering subscription failures.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The remote subscription could not be established or emitted an error.
    /// Terminal for the session.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The remote endpoint never became reachable within the bounded
    /// readiness probe.
    #[error("Remote endpoint unavailable after {attempts} attempts: {last_error}")]
    DependencyUnavailable {
        /// Number of probe attempts made before giving up.
        attempts: u32,
        /// The failure reported by the final attempt.
        last_error: String,
    },

    /// The configured endpoint is not an addressable WebSocket URL.
    #[error("Invalid remote endpoint: {0}")]
    InvalidUrl(String),

    /// A subscription already exists for this mirror. Setup is idempotent:
    /// re-initialization must not create duplicate subscriptions.
    #[error("Sync channel already subscribed for this mirror")]
    AlreadySubscribed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SyncError::DependencyUnavailable {
            attempts: 5,
            last_error: "connection refused".into(),
        };
        assert_eq!(
            err.to_string(),
            "Remote endpoint unavailable after 5 attempts: connection refused"
        );
    }
}
