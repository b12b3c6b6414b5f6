//! # Shelfscan Handheld Client
//!
//! Thin orchestration binary: resolves the connection configuration, seeds
//! the mirror from the durable slot, subscribes the sync channel and logs
//! connection state transitions until shutdown.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. tracing init (RUST_LOG aware)                                       │
//! │  2. RemoteConfig::from_env()  - invalid config is terminal, no retry   │
//! │  3. MirrorStore::open_default() + seed the shared state                 │
//! │  4. SyncChannel::subscribe()  - single subscription for the process    │
//! │  5. Observe state transitions until Ctrl-C or sync-error               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use shelfscan_core::{ConnectionState, RemoteConfig};
use shelfscan_store::MirrorStore;
use shelfscan_sync::{ChannelConfig, MirrorState, SyncChannel, PRODUCTS_COLLECTION};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Shelfscan handheld starting");

    let state = Arc::new(MirrorState::new());
    state.set_connection_state(ConnectionState::AwaitingConfig);

    // Invalid config is terminal for the session: the user must fix the
    // environment and restart the flow.
    let remote = match RemoteConfig::from_env() {
        Ok(remote) => remote,
        Err(e) => {
            error!(error = %e, "Connection configuration is invalid");
            eprintln!("{e}. Set the SHELFSCAN_* variables and restart.");
            std::process::exit(1);
        }
    };

    let store = match MirrorStore::open_default() {
        Ok(store) => Arc::new(store),
        Err(e) => {
            error!(error = %e, "Cannot locate the mirror slot");
            std::process::exit(1);
        }
    };

    // Last-known catalog is available immediately, before the first remote
    // update arrives.
    let persisted = store.load();
    info!(count = persisted.len(), "Seeded mirror from durable slot");
    state.seed_snapshot(persisted);

    let config = match ChannelConfig::for_collection(&remote, PRODUCTS_COLLECTION) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Remote endpoint is not addressable");
            std::process::exit(1);
        }
    };

    let handle = match SyncChannel::new(config, state.clone(), store).subscribe() {
        Ok(handle) => handle,
        Err(e) => {
            error!(error = %e, "Failed to subscribe");
            std::process::exit(1);
        }
    };

    let mut conn = state.subscribe_connection();
    loop {
        tokio::select! {
            changed = conn.changed() => {
                if changed.is_err() {
                    break;
                }
                let current = *conn.borrow();
                info!(state = %current, "Connection state changed");

                if current == ConnectionState::SyncError {
                    if let Some(message) = state.status().last_error {
                        error!(%message, "Synchronization failed; restart the client to reconnect");
                    }
                    break;
                }
            }

            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown requested");
                break;
            }
        }
    }

    handle.shutdown().await;
    info!("Shelfscan handheld stopped");
}
