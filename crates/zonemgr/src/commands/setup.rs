//! Interactive setup wizard
//!
//! Collects the credential and optional settings, then writes the
//! configuration file. The only command that runs without an existing
//! configuration.

use dialoguer::{Input, Password};
use std::path::Path;

use zonemgr_core::ManagerConfig;

use crate::output;

pub async fn run(config_path: &Path) -> anyhow::Result<()> {
    output::plain("zonemgr setup");

    let api_token: String = Password::new()
        .with_prompt("Cloudflare API token")
        .interact()?;

    let account_id: String = Input::new()
        .with_prompt("Cloudflare account ID (optional)")
        .allow_empty(true)
        .interact_text()?;

    let webhook_url: String = Input::new()
        .with_prompt("Webhook URL for notifications (optional)")
        .allow_empty(true)
        .interact_text()?;

    let mut config = ManagerConfig::new(api_token);
    if !account_id.trim().is_empty() {
        config.account_id = Some(account_id.trim().to_string());
    }
    if !webhook_url.trim().is_empty() {
        config.webhook_url = Some(webhook_url.trim().to_string());
    }

    config.validate()?;
    config.save(config_path).await?;

    output::success(&format!("Configuration saved to {}", config_path.display()));
    Ok(())
}
