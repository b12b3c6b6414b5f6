//! # Mirror Slot
//!
//! A single named slot on disk holding the serialized mirror snapshot as a
//! JSON array of product records.
//!
//! ## Atomic Replace
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         save() sequence                                 │
//! │                                                                         │
//! │  1. serialize snapshot ──► mirror.json.tmp (sibling of the slot)       │
//! │  2. rename mirror.json.tmp ──► mirror.json                             │
//! │                                                                         │
//! │  The rename is the commit point: a crash mid-save leaves either the    │
//! │  old slot or the new slot, never a half-written payload.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Load Validation
//! The persisted payload is run through the same schema check as remote
//! updates: anything that is not a sequence of product-shaped records is
//! treated as "no data" and falls back to the empty snapshot.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use shelfscan_core::schema::{check_payload, PayloadCheck};
use shelfscan_core::MirrorSnapshot;

use crate::error::{StoreError, StoreResult};

/// File name of the mirror slot inside the data directory.
const SLOT_FILE_NAME: &str = "mirror.json";

// =============================================================================
// Mirror Store
// =============================================================================

/// Durable store for the last-known mirror snapshot.
#[derive(Debug, Clone)]
pub struct MirrorStore {
    /// Path of the slot file.
    path: PathBuf,
}

impl MirrorStore {
    /// Creates a store backed by the given slot file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        MirrorStore { path: path.into() }
    }

    /// Creates a store at the platform data directory
    /// (e.g. `~/.local/share/shelfscan/mirror.json` on Linux).
    pub fn open_default() -> StoreResult<Self> {
        let dirs = directories::ProjectDirs::from("com", "shelfscan", "handheld")
            .ok_or(StoreError::NoDataDir)?;
        Ok(MirrorStore::new(dirs.data_dir().join(SLOT_FILE_NAME)))
    }

    /// Returns the slot file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the last persisted snapshot.
    ///
    /// Returns the empty snapshot when the slot is missing, unreadable, or
    /// holds a payload that fails the schema check. Never errors out: a
    /// corrupt slot is "no data", not a crash.
    pub fn load(&self) -> MirrorSnapshot {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No persisted mirror yet");
                return MirrorSnapshot::empty();
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to read mirror slot");
                return MirrorSnapshot::empty();
            }
        };

        let payload = match serde_json::from_str(&contents) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Mirror slot is not valid JSON");
                return MirrorSnapshot::empty();
            }
        };

        match check_payload(&payload) {
            PayloadCheck::Products(products) => {
                debug!(count = products.len(), "Loaded persisted mirror");
                MirrorSnapshot::new(products)
            }
            PayloadCheck::Empty => MirrorSnapshot::empty(),
            PayloadCheck::Rejected(reason) => {
                warn!(path = %self.path.display(), %reason, "Discarding corrupt mirror slot");
                MirrorSnapshot::empty()
            }
        }
    }

    /// Persists the given snapshot as the new durable state, overwriting any
    /// prior value.
    ///
    /// Atomic from the caller's point of view: the payload is written to a
    /// sibling temp file and renamed over the slot.
    pub fn save(&self, snapshot: &MirrorSnapshot) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let payload = serde_json::to_vec(snapshot)?;

        let tmp_path = self.path.with_extension("json.tmp");
        std::fs::write(&tmp_path, payload)?;
        std::fs::rename(&tmp_path, &self.path)?;

        debug!(
            path = %self.path.display(),
            count = snapshot.len(),
            "Persisted mirror snapshot"
        );
        Ok(())
    }
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
            supplier: Some("Acme Beverages".to_string()),
        }
    }

    fn store_in(dir: &tempfile::TempDir) -> MirrorStore {
        MirrorStore::new(dir.path().join("mirror.json"))
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let snapshot = MirrorSnapshot::new(vec![product("111"), product("222")]);
        store.save(&snapshot).unwrap();

        assert_eq!(store.load(), snapshot);
    }

    #[test]
    fn test_empty_snapshot_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.save(&MirrorSnapshot::empty()).unwrap();
        assert_eq!(store.load(), MirrorSnapshot::empty());
    }

    #[test]
    fn test_save_overwrites_prior_value() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store
            .save(&MirrorSnapshot::new(vec![product("111")]))
            .unwrap();
        let replacement = MirrorSnapshot::new(vec![product("222"), product("333")]);
        store.save(&replacement).unwrap();

        assert_eq!(store.load(), replacement);
    }

    #[test]
    fn test_missing_slot_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(store_in(&dir).load(), MirrorSnapshot::empty());
    }

    #[test]
    fn test_corrupt_slot_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        std::fs::write(store.path(), "{not json").unwrap();
        assert_eq!(store.load(), MirrorSnapshot::empty());
    }

    #[test]
    fn test_non_array_slot_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        std::fs::write(store.path(), r#"{"products": []}"#).unwrap();
        assert_eq!(store.load(), MirrorSnapshot::empty());
    }

    #[test]
    fn test_array_of_wrong_records_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        std::fs::write(store.path(), r#"[{"id": "only-an-id"}]"#).unwrap();
        assert_eq!(store.load(), MirrorSnapshot::empty());
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = MirrorStore::new(dir.path().join("nested/deeper/mirror.json"));

        store
            .save(&MirrorSnapshot::new(vec![product("111")]))
            .unwrap();
        assert_eq!(store.load().len(), 1);
    }
}
