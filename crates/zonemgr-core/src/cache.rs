// # IP Cache
//
// Time-boxed, file-backed cache of the last resolved public IP.
//
// ## Behavior
//
// - A fresh persisted entry (younger than the TTL) is served without any
//   network call.
// - A missing, stale, or unreadable entry triggers one resolution via the
//   injected `PublicIpResolver`; on success the entry is rewritten.
// - Staleness beyond the TTL is never silently served: resolver failure
//   propagates to the caller.
//
// ## Accepted race
//
// Two processes can miss concurrently and both write the cache file; the
// last writer wins. The cached value is advisory (re-resolved every TTL
// window) and resolution is idempotent, so no cross-process locking is
// used.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

use crate::error::Result;
use crate::traits::PublicIpResolver;

/// Default freshness window for the cached public IP (seconds)
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;

/// Persisted cache entry
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CacheEntry {
    ip: IpAddr,
    fetched_at: DateTime<Utc>,
}

/// Time-boxed public IP cache over a single persisted entry
pub struct IpCache {
    path: PathBuf,
    ttl: chrono::Duration,
    resolver: Box<dyn PublicIpResolver>,
}

impl IpCache {
    /// Create a cache backed by `path` with the given TTL
    pub fn new(
        path: impl Into<PathBuf>,
        ttl_secs: u64,
        resolver: Box<dyn PublicIpResolver>,
    ) -> Self {
        Self {
            path: path.into(),
            ttl: chrono::Duration::seconds(ttl_secs as i64),
            resolver,
        }
    }

    /// Return the public IP, from cache when fresh, resolving otherwise
    ///
    /// Cache read/write failures are logged and treated as a miss; only
    /// resolver failure is returned to the caller.
    pub async fn cached_public_ip(&self) -> Result<IpAddr> {
        if let Some(entry) = self.load_entry().await {
            let age = Utc::now().signed_duration_since(entry.fetched_at);
            if age < self.ttl {
                debug!(ip = %entry.ip, age_secs = age.num_seconds(), "serving cached public IP");
                return Ok(entry.ip);
            }
            debug!(age_secs = age.num_seconds(), "cached public IP expired");
        }

        let ip = self.resolver.resolve().await?;

        if let Err(e) = self.store_entry(ip).await {
            warn!(path = %self.path.display(), error = %e, "failed to write IP cache");
        }

        Ok(ip)
    }

    async fn load_entry(&self) -> Option<CacheEntry> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no IP cache file");
                return None;
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to read IP cache");
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "corrupt IP cache, treating as miss");
                None
            }
        }
    }

    /// Write the entry to a temp file, then rename into place
    async fn store_entry(&self, ip: IpAddr) -> Result<()> {
        let entry = CacheEntry {
            ip,
            fetched_at: Utc::now(),
        };
        let json = serde_json::to_string_pretty(&entry)?;

        let temp_path = temp_path(&self.path);
        fs::write(&temp_path, json.as_bytes()).await?;
        fs::rename(&temp_path, &self.path).await?;
        Ok(())
    }
}

pub(crate) fn temp_path(path: &Path) -> PathBuf {
    let mut temp = path.to_path_buf();
    temp.set_extension("tmp");
    temp
}
