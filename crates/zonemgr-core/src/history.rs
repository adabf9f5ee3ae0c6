// # IP History & Change Log
//
// Two append-only audit files:
// - `IpHistoryLog`: ordered JSON array of public-IP changes applied to
//   tracked records; entries are never mutated or deleted.
// - `ChangeLog`: plain-text log, one line per mutating action.
//
// Loss of either file is not self-healing, so single-process writers are
// serialized through a per-file mutex (stricter than the IP cache's
// accepted race).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::warn;

use crate::cache::temp_path;
use crate::error::Result;

/// One applied public-IP change, kept for audit/reporting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpHistoryEntry {
    /// Zone (domain) name
    pub domain: String,
    /// Record name within the zone
    pub record: String,
    /// The IP that was written
    pub ip: IpAddr,
    /// When the update was applied
    pub timestamp: DateTime<Utc>,
}

/// Append-only log of IP updates, backed by a JSON array file
pub struct IpHistoryLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl IpHistoryLog {
    /// Create a history log backed by `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Append one entry, rewriting the array atomically
    pub async fn append(&self, entry: IpHistoryEntry) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let mut entries = self.read_entries().await;
        entries.push(entry);

        let json = serde_json::to_string_pretty(&entries)?;
        let temp = temp_path(&self.path);
        fs::write(&temp, json.as_bytes()).await?;
        fs::rename(&temp, &self.path).await?;
        Ok(())
    }

    /// All recorded entries, oldest first
    ///
    /// Missing or corrupt files yield an empty list (logged).
    pub async fn entries(&self) -> Vec<IpHistoryEntry> {
        self.read_entries().await
    }

    async fn read_entries(&self) -> Vec<IpHistoryEntry> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to read IP history");
                return Vec::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "corrupt IP history, starting empty");
                Vec::new()
            }
        }
    }
}

/// Append-only text log of mutating actions
///
/// Format: `<RFC 3339 timestamp> <action> <domain:record> <details>`
pub struct ChangeLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl ChangeLog {
    /// Create a change log backed by `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Append one line for a mutating action
    pub async fn append(&self, action: &str, target: &str, details: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let line = format!(
            "{} {} {} {}\n",
            Utc::now().to_rfc3339(),
            action,
            target,
            details
        );

        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}
