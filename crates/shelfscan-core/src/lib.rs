//! # shelfscan-core: Pure Domain Logic for Shelfscan
//!
//! This crate is the **heart** of the handheld client. It contains the data
//! model and the pure decision logic as functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Shelfscan Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Presentation Layer (external)                  │   │
//! │  │    Catalog list ──► Scan view ──► Product detail               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            shelfscan-sync (channel + scan pipeline)             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ shelfscan-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  config   │  │  schema   │  │ resolver  │  │   │
//! │  │   │  Product  │  │ 7 params  │  │  payload  │  │  barcode  │  │   │
//! │  │   │  Snapshot │  │ validate  │  │  checks   │  │  lookup   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO FILESYSTEM • PURE FUNCTIONS         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, MirrorSnapshot, ConnectionState)
//! - [`config`] - Remote connection parameters and validation
//! - [`schema`] - Shape check for remote update payloads
//! - [`resolver`] - Barcode-to-product resolution
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: resolution and validation are deterministic
//! 2. **No I/O**: network, file system and hardware access are FORBIDDEN here
//! 3. **Integer Money**: all monetary values are in cents (i64)
//! 4. **Explicit Errors**: all errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod resolver;
pub mod schema;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use shelfscan_core::Product` instead of
// `use shelfscan_core::types::Product`

pub use config::RemoteConfig;
pub use error::ConfigError;
pub use resolver::resolve;
pub use schema::PayloadCheck;
pub use types::{ConnectionState, MirrorSnapshot, Product};
