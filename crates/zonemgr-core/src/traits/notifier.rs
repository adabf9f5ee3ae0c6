// # Notifier Trait
//
// Fire-and-forget operator notifications for mutating operations.
//
// ## Implementation
//
// - Webhook (Discord-compatible): `zonemgr-notify` crate
//
// Notification failure must never fail the underlying DNS operation:
// implementations log delivery errors and return normally, which is why
// `notify` does not return a `Result`.

use async_trait::async_trait;
use std::fmt;

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => f.write_str("info"),
            Severity::Warning => f.write_str("warning"),
            Severity::Error => f.write_str("error"),
        }
    }
}

/// Trait for notification sinks
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver a notification, swallowing (and logging) any failure
    async fn notify(&self, title: &str, message: &str, severity: Severity);
}

/// Notifier that discards everything; used when no sink is configured
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn notify(&self, _title: &str, _message: &str, _severity: Severity) {}
}
