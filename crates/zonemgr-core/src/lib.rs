// # zonemgr-core
//
// Core library for the zonemgr DNS management tool.
//
// ## Architecture Overview
//
// This library provides everything the CLI layer needs to manage DNS
// records in a single provider account:
// - **DnsGateway**: Trait for the provider's zone/record REST endpoints
// - **PublicIpResolver**: Trait for discovering the caller's public IP
// - **Notifier**: Trait for fire-and-forget operator notifications
// - **IpCache**: Time-boxed, file-backed cache of the resolved public IP
// - **AutoUpdateEngine**: Drift detection and record updates for tracked
//   (zone, record) pairs, with an append-only IP history
// - **fetch_all_zone_records**: Bounded concurrent multi-zone record fetch
//   with stable, enumeration-order results
// - **AutoUpdateRegistry**: Persisted mapping of tracked records
//
// ## Design Principles
//
// 1. **Capability seams**: the provider, IP source, and notifier are trait
//    objects with exactly one production implementation each
// 2. **Flat-file persistence**: every store is a small JSON or line file,
//    written atomically (temp file + rename)
// 3. **Degrade, don't crash**: corrupt local files are logged and treated
//    as empty; only missing credentials are fatal

pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod fetch;
pub mod history;
pub mod registry;
pub mod traits;

// Re-export core types for convenience
pub use cache::IpCache;
pub use config::{FilePaths, ManagerConfig};
pub use engine::{AutoUpdateEngine, UpdateOutcome};
pub use error::{Error, Result};
pub use fetch::{ZoneRecords, fetch_all_zone_records};
pub use history::{ChangeLog, IpHistoryEntry, IpHistoryLog};
pub use registry::{AutoUpdateRegistry, TrackedRecord, domain_key};
pub use traits::{
    DnsGateway, DnsRecord, NewRecord, NoopNotifier, Notifier, PublicIpResolver, RecordType,
    Severity, Zone,
};
