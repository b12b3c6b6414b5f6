//! # Remote Sync Channel
//!
//! Subscribes to change notifications for one named remote collection and
//! reconciles incoming snapshots into the local mirror.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Subscription Lifecycle                               │
//! │                                                                         │
//! │  ┌──────┐  subscribe()  ┌────────────┐   probe ok   ┌────────────┐     │
//! │  │ idle │ ────────────► │ connecting │ ───────────► │ subscribed │     │
//! │  └──────┘               └─────┬──────┘              └─────┬──────┘     │
//! │                               │                           │            │
//! │                 probe bound   │             transport /   │            │
//! │                 exhausted     │             permission    │            │
//! │                               ▼             error         ▼            │
//! │                        ┌────────────┐              ┌────────────┐      │
//! │                        │ sync-error │ ◄─────────── │ sync-error │      │
//! │                        └────────────┘              └────────────┘      │
//! │                                                                         │
//! │  sync-error is TERMINAL for the session: the channel does not retry    │
//! │  internally. Retry is the responsibility of the surrounding process    │
//! │  (full reconnect/restart).                                             │
//! │                                                                         │
//! │  READINESS PROBE (before subscribing)                                  │
//! │  ─────────────────────────────────────                                 │
//! │  Attempt 1..=MAX_READY_ATTEMPTS with a fixed READY_BACKOFF between     │
//! │  attempts; exhausting the bound yields DependencyUnavailable.          │
//! │  Never an indefinite poll.                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Notification Handling
//! On each notification the payload is run through the schema check:
//! - valid array  -> snapshot replaced wholesale (store + shared state)
//! - null/absent  -> no update, prior snapshot retained
//! - malformed    -> no update, prior snapshot retained
//!
//! In every case the connection state still advances to `Connected`: the
//! connection itself is healthy even when a particular payload is unusable.

use std::sync::Arc;
use std::time::Duration;

use futures_util::StreamExt;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, error, info, warn};

use shelfscan_core::schema::{check_payload, PayloadCheck};
use shelfscan_core::{ConnectionState, MirrorSnapshot, RemoteConfig};
use shelfscan_store::MirrorStore;

use crate::error::{SyncError, SyncResult};
use crate::state::MirrorState;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

// =============================================================================
// Constants
// =============================================================================

/// Name of the remote collection holding the product catalog.
pub const PRODUCTS_COLLECTION: &str = "products";

/// Maximum readiness probe attempts before giving up with
/// `DependencyUnavailable`.
pub const MAX_READY_ATTEMPTS: u32 = 5;

/// Fixed backoff between readiness probe attempts.
pub const READY_BACKOFF: Duration = Duration::from_millis(400);

// =============================================================================
// Channel Configuration
// =============================================================================

/// Configuration for the remote subscription.
#[derive(Debug, Clone)]
pub struct ChannelConfig {
    /// WebSocket endpoint of the remote collection.
    pub endpoint: String,

    /// Per-attempt connection timeout for the readiness probe.
    pub connect_timeout: Duration,
}

impl ChannelConfig {
    /// Builds the subscription config for a named collection from a
    /// validated [`RemoteConfig`].
    pub fn for_collection(remote: &RemoteConfig, collection: &str) -> SyncResult<Self> {
        let endpoint = remote.collection_endpoint(collection);

        let parsed = url::Url::parse(&endpoint)
            .map_err(|e| SyncError::InvalidUrl(format!("{endpoint}: {e}")))?;
        if !matches!(parsed.scheme(), "ws" | "wss") {
            return Err(SyncError::InvalidUrl(format!(
                "endpoint must use ws:// or wss://, got: {endpoint}"
            )));
        }

        Ok(ChannelConfig {
            endpoint,
            connect_timeout: Duration::from_secs(10),
        })
    }
}

// =============================================================================
// Sync Channel
// =============================================================================

/// The sole writer of the local mirror: one subscription per process, torn
/// down only as a whole.
pub struct SyncChannel {
    config: ChannelConfig,
    state: Arc<MirrorState>,
    store: Arc<MirrorStore>,
}

/// Handle for tearing down a running subscription.
pub struct SyncChannelHandle {
    shutdown_tx: mpsc::Sender<()>,
    task: JoinHandle<()>,
}

impl SyncChannelHandle {
    /// Tears the subscription down and waits for the channel task to stop.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(()).await;
        let _ = self.task.await;
    }
}

impl SyncChannel {
    /// Creates a channel over the given shared state and mirror store.
    pub fn new(config: ChannelConfig, state: Arc<MirrorState>, store: Arc<MirrorStore>) -> Self {
        SyncChannel {
            config,
            state,
            store,
        }
    }

    /// Establishes the subscription and spawns the notification loop.
    ///
    /// Idempotent per mirror: a second subscription attempt against the same
    /// [`MirrorState`] fails with [`SyncError::AlreadySubscribed`] instead of
    /// creating a duplicate subscription.
    pub fn subscribe(self) -> SyncResult<SyncChannelHandle> {
        if !self.state.claim_writer() {
            return Err(SyncError::AlreadySubscribed);
        }

        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);
        let task = tokio::spawn(self.run(shutdown_rx));

        Ok(SyncChannelHandle { shutdown_tx, task })
    }

    /// Subscription loop: probe, then consume notifications until shutdown
    /// or a terminal transport error.
    async fn run(self, mut shutdown_rx: mpsc::Receiver<()>) {
        self.state.set_connection_state(ConnectionState::Connecting);

        let mut ws = match self.probe_and_connect().await {
            Ok(ws) => ws,
            Err(e) => {
                error!(endpoint = %self.config.endpoint, error = %e, "Subscription failed");
                self.state.record_failure(e.to_string());
                return;
            }
        };

        info!(endpoint = %self.config.endpoint, "Subscribed to remote collection");

        loop {
            tokio::select! {
                message = ws.next() => match message {
                    Some(Ok(WsMessage::Text(payload))) => {
                        self.apply_notification(payload.as_str());
                    }
                    Some(Ok(WsMessage::Close(_))) | None => {
                        let e = SyncError::ConnectionFailed("subscription closed by remote".into());
                        error!(endpoint = %self.config.endpoint, "{e}");
                        self.state.record_failure(e.to_string());
                        break;
                    }
                    Some(Ok(_)) => {
                        // Ping/pong and binary frames carry no notifications.
                    }
                    Some(Err(e)) => {
                        let e = SyncError::ConnectionFailed(e.to_string());
                        error!(endpoint = %self.config.endpoint, error = %e, "Subscription error");
                        self.state.record_failure(e.to_string());
                        break;
                    }
                },

                _ = shutdown_rx.recv() => {
                    debug!("Sync channel shutting down");
                    let _ = ws.close(None).await;
                    break;
                }
            }
        }
    }

    /// Readiness probe with an explicit attempt counter and fixed backoff.
    async fn probe_and_connect(&self) -> SyncResult<WsStream> {
        let mut attempt: u32 = 1;
        let mut last_error;

        loop {
            debug!(
                attempt,
                max = MAX_READY_ATTEMPTS,
                endpoint = %self.config.endpoint,
                "Probing remote endpoint"
            );

            match timeout(
                self.config.connect_timeout,
                connect_async(self.config.endpoint.as_str()),
            )
            .await
            {
                Ok(Ok((ws, _response))) => return Ok(ws),
                Ok(Err(e)) => last_error = e.to_string(),
                Err(_) => {
                    last_error = format!(
                        "connect timed out after {}s",
                        self.config.connect_timeout.as_secs()
                    );
                }
            }

            if attempt >= MAX_READY_ATTEMPTS {
                return Err(SyncError::DependencyUnavailable {
                    attempts: attempt,
                    last_error,
                });
            }

            warn!(attempt, error = %last_error, "Remote endpoint not ready, backing off");
            attempt += 1;
            tokio::time::sleep(READY_BACKOFF).await;
        }
    }

    /// Applies one change notification payload.
    ///
    /// A valid sequence replaces the snapshot wholesale; anything else is
    /// "no update" and leaves the prior snapshot untouched. The connection
    /// state advances to `Connected` either way.
    pub fn apply_notification(&self, payload: &str) {
        match serde_json::from_str(payload) {
            Ok(value) => match check_payload(&value) {
                PayloadCheck::Products(products) => {
                    let snapshot = MirrorSnapshot::new(products);
                    if let Err(e) = self.store.save(&snapshot) {
                        // The in-memory mirror still advances; durability
                        // catches up on the next successful save.
                        warn!(error = %e, "Failed to persist accepted update");
                    }
                    info!(count = snapshot.len(), "Accepted remote catalog update");
                    self.state.accept_update(snapshot);
                }
                PayloadCheck::Empty => {
                    debug!("Remote update carried no data");
                }
                PayloadCheck::Rejected(reason) => {
                    warn!(%reason, "Ignoring malformed remote update");
                }
            },
            Err(e) => {
                warn!(error = %e, "Ignoring unparseable remote update");
            }
        }

        self.state.set_connection_state(ConnectionState::Connected);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_channel(dir: &tempfile::TempDir) -> (SyncChannel, Arc<MirrorState>, Arc<MirrorStore>) {
        let state = Arc::new(MirrorState::new());
        let store = Arc::new(MirrorStore::new(dir.path().join("mirror.json")));
        let config = ChannelConfig {
            endpoint: "ws://127.0.0.1:1/products".to_string(),
            connect_timeout: Duration::from_millis(50),
        };
        (
            SyncChannel::new(config, state.clone(), store.clone()),
            state,
            store,
        )
    }

    fn product_record(barcode: &str) -> serde_json::Value {
        json!({
            "id": format!("prod-{barcode}"),
            "name": "Cola 330ml",
            "price_cents": 150,
            "stock": 24,
            "barcode": barcode,
            "cost_cents": 90,
            "category": "Drinks",
            "unit": "pcs"
        })
    }

    #[test]
    fn test_config_rejects_non_websocket_endpoints() {
        let remote = RemoteConfig {
            api_key: "k".into(),
            auth_domain: "d".into(),
            database_url: "https://catalog.example.com/db".into(),
            project_id: "p".into(),
            storage_bucket: "b".into(),
            messaging_sender_id: "s".into(),
            app_id: "a".into(),
        };
        assert!(matches!(
            ChannelConfig::for_collection(&remote, PRODUCTS_COLLECTION),
            Err(SyncError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_valid_update_replaces_snapshot_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let (channel, state, store) = test_channel(&dir);

        let payload = json!([product_record("111"), product_record("222")]).to_string();
        channel.apply_notification(&payload);

        assert_eq!(state.connection_state(), ConnectionState::Connected);
        assert_eq!(state.snapshot().len(), 2);
        assert_eq!(store.load().len(), 2);
    }

    #[test]
    fn test_null_update_keeps_snapshot_but_connects() {
        let dir = tempfile::tempdir().unwrap();
        let (channel, state, _store) = test_channel(&dir);

        let seeded = MirrorSnapshot::new(vec![serde_json::from_value(product_record("111"))
            .unwrap()]);
        state.seed_snapshot(seeded.clone());

        channel.apply_notification("null");

        assert_eq!(state.connection_state(), ConnectionState::Connected);
        assert_eq!(state.snapshot(), seeded);
    }

    #[test]
    fn test_malformed_update_keeps_snapshot_but_connects() {
        let dir = tempfile::tempdir().unwrap();
        let (channel, state, _store) = test_channel(&dir);

        let seeded = MirrorSnapshot::new(vec![serde_json::from_value(product_record("111"))
            .unwrap()]);
        state.seed_snapshot(seeded.clone());

        for payload in [r#"{"products": []}"#, "[{\"id\": 1}]", "not json at all"] {
            channel.apply_notification(payload);
            assert_eq!(state.snapshot(), seeded, "payload {payload:?} must not apply");
            assert_eq!(state.connection_state(), ConnectionState::Connected);
        }
    }

    #[test]
    fn test_empty_array_is_a_valid_replacement() {
        let dir = tempfile::tempdir().unwrap();
        let (channel, state, store) = test_channel(&dir);

        state.seed_snapshot(MirrorSnapshot::new(vec![serde_json::from_value(
            product_record("111"),
        )
        .unwrap()]));

        channel.apply_notification("[]");

        assert!(state.snapshot().is_empty());
        assert!(store.load().is_empty());
    }

    #[tokio::test]
    async fn test_second_subscription_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let (first, state, store) = test_channel(&dir);

        let handle = first.subscribe().unwrap();

        let config = ChannelConfig {
            endpoint: "ws://127.0.0.1:1/products".to_string(),
            connect_timeout: Duration::from_millis(50),
        };
        let second = SyncChannel::new(config, state, store);
        assert!(matches!(
            second.subscribe(),
            Err(SyncError::AlreadySubscribed)
        ));

        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_probe_bound_yields_dependency_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let (channel, state, _store) = test_channel(&dir);

        // Port 1 refuses connections; the paused clock auto-advances through
        // the backoff sleeps.
        let err = channel.probe_and_connect().await.unwrap_err();
        match err {
            SyncError::DependencyUnavailable { attempts, .. } => {
                assert_eq!(attempts, MAX_READY_ATTEMPTS);
            }
            other => panic!("expected DependencyUnavailable, got {other}"),
        }
        assert_eq!(state.connection_state(), ConnectionState::Initializing);
    }
}
