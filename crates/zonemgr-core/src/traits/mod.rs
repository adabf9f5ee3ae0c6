//! Capability traits for external collaborators
//!
//! The core stays provider-agnostic by talking to the outside world
//! through these three seams. Each has exactly one production
//! implementation (no speculative multi-provider machinery).

pub mod gateway;
pub mod ip_resolver;
pub mod notifier;

pub use gateway::{DnsGateway, DnsRecord, NewRecord, RecordType, Zone};
pub use ip_resolver::PublicIpResolver;
pub use notifier::{NoopNotifier, Notifier, Severity};
