// # Auto-Update Registry
//
// Persisted mapping of tracked records to their provider identifiers,
// keyed `domain:record_name`. The whole mapping is loaded and saved as a
// unit; saves go through a temp file + rename so a reader never observes
// half-written JSON.
//
// Entry removal on record deletion is a caller-side responsibility: every
// deletion path must `untrack` the matching key.
//
// Within one process, mutations are serialized by an internal mutex.
// Across processes the file is last-writer-wins (atomic replace), which
// is the documented resolution for concurrent same-key modification.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::cache::temp_path;
use crate::error::Result;

/// Provider identifiers for one tracked record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedRecord {
    /// Zone the record lives in
    pub zone_id: String,
    /// The record's provider-assigned ID
    pub record_id: String,
}

/// Registry key for a (domain, record name) pair
pub fn domain_key(domain: &str, record_name: &str) -> String {
    format!("{}:{}", domain, record_name)
}

/// File-backed registry of records enrolled in auto-update
pub struct AutoUpdateRegistry {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl AutoUpdateRegistry {
    /// Create a registry backed by `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Load the full mapping
    ///
    /// A missing or corrupt backing file yields an empty mapping;
    /// corruption is logged, never surfaced to the caller.
    pub async fn load(&self) -> BTreeMap<String, TrackedRecord> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no registry file, starting empty");
                return BTreeMap::new();
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to read registry, starting empty");
                return BTreeMap::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(map) => map,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "corrupt registry, starting empty");
                BTreeMap::new()
            }
        }
    }

    /// Persist the full mapping atomically
    pub async fn save(&self, map: &BTreeMap<String, TrackedRecord>) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        self.save_unlocked(map).await
    }

    /// Enroll (or re-enroll) a record under `domain:record_name`
    pub async fn track(
        &self,
        domain: &str,
        record_name: &str,
        record: TrackedRecord,
    ) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut map = self.load().await;
        map.insert(domain_key(domain, record_name), record);
        self.save_unlocked(&map).await
    }

    /// Remove a record's registry entry; returns whether it was present
    pub async fn untrack(&self, domain: &str, record_name: &str) -> Result<bool> {
        let _guard = self.write_lock.lock().await;
        let mut map = self.load().await;
        let removed = map.remove(&domain_key(domain, record_name)).is_some();
        if removed {
            self.save_unlocked(&map).await?;
        }
        Ok(removed)
    }

    async fn save_unlocked(&self, map: &BTreeMap<String, TrackedRecord>) -> Result<()> {
        let json = serde_json::to_string_pretty(map)?;
        let temp = temp_path(&self.path);
        fs::write(&temp, json.as_bytes()).await?;
        fs::rename(&temp, &self.path).await?;
        Ok(())
    }
}
