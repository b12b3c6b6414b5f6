//! # Error Types
//!
//! Domain-specific error types for shelfscan-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  shelfscan-core errors (this file)                                     │
//! │  └── ConfigError      - Connection parameter validation failures       │
//! │                                                                         │
//! │  shelfscan-store errors (separate crate)                               │
//! │  └── StoreError       - Mirror slot persistence failures               │
//! │                                                                         │
//! │  shelfscan-sync errors (separate crate)                                │
//! │  └── SyncError        - Subscription and transport failures            │
//! │                                                                         │
//! │  Only ConfigError and SyncError surface to the user; store failures    │
//! │  and rejected payloads are absorbed and logged.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field name, etc.)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Config Error
// =============================================================================

/// Connection configuration errors.
///
/// A config missing any required parameter is categorically invalid, never
/// "partially usable". Callers must treat this as terminal for the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A required connection parameter is missing or empty.
    #[error("Connection parameter {field} is not configured")]
    MissingField {
        /// Name of the missing parameter.
        field: &'static str,
    },
}

/// Convenience type alias for Results with ConfigError.
pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ConfigError::MissingField { field: "api_key" };
        assert_eq!(err.to_string(), "Connection parameter api_key is not configured");
    }
}
