// # Webhook Notifier
//
// `Notifier` implementation that POSTs a Discord-compatible embed to a
// configured webhook URL.
//
// Delivery is fire-and-forget: any failure (network, non-2xx) is logged
// and swallowed so a notification problem can never fail the DNS
// operation that triggered it.

use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, warn};

use zonemgr_core::traits::{Notifier, Severity};

/// Timeout for webhook delivery
const WEBHOOK_TIMEOUT: Duration = Duration::from_secs(10);

/// Embed sidebar colors per severity (Discord decimal RGB)
fn severity_color(severity: Severity) -> u32 {
    match severity {
        Severity::Info => 0x2e_cc71,    // green
        Severity::Warning => 0xe6_7e22, // orange
        Severity::Error => 0xe7_4c3c,   // red
    }
}

/// Discord-compatible webhook notification sink
pub struct WebhookNotifier {
    url: String,
    client: reqwest::Client,
}

impl WebhookNotifier {
    /// Create a notifier targeting `url`
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::builder()
                .timeout(WEBHOOK_TIMEOUT)
                .build()
                .unwrap_or_default(),
        }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn notify(&self, title: &str, message: &str, severity: Severity) {
        let payload = json!({
            "embeds": [{
                "title": title,
                "description": message,
                "color": severity_color(severity),
            }]
        });

        match self.client.post(&self.url).json(&payload).send().await {
            Ok(response) if response.status().is_success() => {
                debug!(title, severity = %severity, "notification delivered");
            }
            Ok(response) => {
                warn!(
                    title,
                    status = %response.status(),
                    "webhook rejected notification"
                );
            }
            Err(e) => {
                warn!(title, error = %e, "failed to deliver notification");
            }
        }
    }
}
