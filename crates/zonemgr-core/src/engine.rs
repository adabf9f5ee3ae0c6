//! Auto-update engine
//!
//! For each tracked (zone, record) pair the engine compares the current
//! public IP against the record content and issues an update only on
//! drift. Repeated runs with an unchanged IP never write.
//!
//! ## Flow
//!
//! 1. Resolve the public IP through `IpCache` (failure: stop before any
//!    gateway call)
//! 2. Fetch the record fresh from the gateway
//! 3. Reject anything that is not an A record (reported, never a crash)
//! 4. Matching content → `UpToDate`, no write, no history entry
//! 5. Otherwise write the new content, preserving every other field;
//!    on success append the IP history entry, log the change, and fire
//!    a notification
//!
//! Dry-run performs steps 1–4 and then reports the intended change
//! without the write, the history entry, or the notification.

use chrono::Utc;
use std::collections::BTreeMap;
use std::net::IpAddr;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::cache::IpCache;
use crate::error::Result;
use crate::history::{ChangeLog, IpHistoryEntry, IpHistoryLog};
use crate::registry::{TrackedRecord, domain_key};
use crate::traits::{DnsGateway, NewRecord, Notifier, RecordType, Severity};

/// Outcome of one auto-update run for one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Record content already matches the public IP; nothing written
    UpToDate {
        /// The matching address
        current: IpAddr,
    },
    /// Record content was replaced
    Updated {
        /// Content before the update
        previous: String,
        /// The address that was written
        current: IpAddr,
    },
    /// Dry-run: an update would have been issued
    WouldUpdate {
        /// Content the record currently has
        previous: String,
        /// The address that would be written
        current: IpAddr,
    },
    /// The record is not an A record; auto-update refuses to touch it
    RejectedWrongType {
        /// The type the record actually has
        actual: RecordType,
    },
}

/// Drift-detection and update engine for tracked records
pub struct AutoUpdateEngine {
    gateway: Arc<dyn DnsGateway>,
    cache: IpCache,
    history: IpHistoryLog,
    change_log: ChangeLog,
    notifier: Arc<dyn Notifier>,
    dry_run: bool,
}

impl AutoUpdateEngine {
    /// Create an engine over the given collaborators
    pub fn new(
        gateway: Arc<dyn DnsGateway>,
        cache: IpCache,
        history: IpHistoryLog,
        change_log: ChangeLog,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            gateway,
            cache,
            history,
            change_log,
            notifier,
            dry_run: false,
        }
    }

    /// Toggle dry-run mode (report intended changes, write nothing)
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Run one auto-update for a single record
    ///
    /// Failures are returned as errors and never leave partial state:
    /// the provider record is the single source of truth, and the
    /// history entry is appended only after a successful write.
    pub async fn auto_update(
        &self,
        zone_id: &str,
        record_id: &str,
        domain: &str,
        record_name: &str,
    ) -> Result<UpdateOutcome> {
        let target = domain_key(domain, record_name);

        let current_ip = self.cache.cached_public_ip().await?;

        let record = self.gateway.get_record(zone_id, record_id).await?;

        if record.record_type != RecordType::A {
            warn!(
                target = %target,
                record_type = %record.record_type,
                "auto-update only supports A records"
            );
            return Ok(UpdateOutcome::RejectedWrongType {
                actual: record.record_type,
            });
        }

        if record.content == current_ip.to_string() {
            debug!(target = %target, ip = %current_ip, "record already up to date");
            return Ok(UpdateOutcome::UpToDate {
                current: current_ip,
            });
        }

        if self.dry_run {
            info!(
                target = %target,
                previous = %record.content,
                current = %current_ip,
                "dry-run: update skipped"
            );
            return Ok(UpdateOutcome::WouldUpdate {
                previous: record.content,
                current: current_ip,
            });
        }

        let payload = NewRecord::from_record_with_content(&record, current_ip.to_string());
        self.gateway
            .update_record(zone_id, record_id, &payload)
            .await?;

        let history_entry = IpHistoryEntry {
            domain: domain.to_string(),
            record: record_name.to_string(),
            ip: current_ip,
            timestamp: Utc::now(),
        };
        if let Err(e) = self.history.append(history_entry).await {
            warn!(target = %target, error = %e, "failed to append IP history entry");
        }

        let details = format!("{} -> {}", record.content, current_ip);
        if let Err(e) = self.change_log.append("auto-update", &target, &details).await {
            warn!(target = %target, error = %e, "failed to append change log line");
        }

        self.notifier
            .notify(
                "DNS record updated",
                &format!("{} now points to {} (was {})", target, current_ip, record.content),
                Severity::Info,
            )
            .await;

        info!(target = %target, previous = %record.content, current = %current_ip, "record updated");
        Ok(UpdateOutcome::Updated {
            previous: record.content,
            current: current_ip,
        })
    }

    /// Run auto-update for every registry entry, isolating failures
    ///
    /// One entry's failure never aborts the rest; the per-entry results
    /// are returned for display in registry order.
    pub async fn auto_update_all(
        &self,
        entries: &BTreeMap<String, TrackedRecord>,
    ) -> Vec<(String, Result<UpdateOutcome>)> {
        let mut results = Vec::with_capacity(entries.len());

        for (key, tracked) in entries {
            let Some((domain, record_name)) = key.split_once(':') else {
                warn!(key = %key, "skipping malformed registry key");
                continue;
            };

            let result = self
                .auto_update(&tracked.zone_id, &tracked.record_id, domain, record_name)
                .await;

            if let Err(ref e) = result {
                warn!(key = %key, error = %e, "auto-update failed for tracked record");
            }
            results.push((key.clone(), result));
        }

        results
    }
}
