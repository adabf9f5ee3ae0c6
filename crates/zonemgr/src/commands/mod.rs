//! Command implementations
//!
//! `Ctx` wires the configured collaborators together; each submodule
//! implements a group of subcommands against it. The binary stays a thin
//! dispatch layer — everything with behavior worth testing lives in
//! zonemgr-core.

pub mod autoupdate;
pub mod records;
pub mod setup;
pub mod zones;

use std::sync::Arc;
use std::time::Duration;

use zonemgr_core::error::{Error, Result};
use zonemgr_core::traits::{DnsGateway, NoopNotifier, Notifier, Zone};
use zonemgr_core::{
    AutoUpdateEngine, AutoUpdateRegistry, ChangeLog, IpCache, IpHistoryLog, ManagerConfig,
};
use zonemgr_ip_http::HttpIpResolver;
use zonemgr_notify::WebhookNotifier;
use zonemgr_provider_cloudflare::CloudflareGateway;

use crate::cli::Command;

/// Base backoff between gateway rate-limit retries
const RETRY_BACKOFF: Duration = Duration::from_millis(500);

/// Configured collaborators for one invocation
pub struct Ctx {
    pub config: ManagerConfig,
    gateway: Arc<dyn DnsGateway>,
}

impl Ctx {
    /// Build the gateway from a validated configuration
    pub fn new(config: ManagerConfig) -> Result<Self> {
        let gateway = CloudflareGateway::new(config.api_token.as_str())?
            .with_retry(config.max_retries, RETRY_BACKOFF);
        Ok(Self {
            gateway: Arc::new(gateway),
            config,
        })
    }

    pub fn gateway(&self) -> Arc<dyn DnsGateway> {
        Arc::clone(&self.gateway)
    }

    pub fn registry(&self) -> AutoUpdateRegistry {
        AutoUpdateRegistry::new(&self.config.files.auto_update_registry)
    }

    pub fn change_log(&self) -> ChangeLog {
        ChangeLog::new(&self.config.files.change_log)
    }

    pub fn history(&self) -> IpHistoryLog {
        IpHistoryLog::new(&self.config.files.ip_history)
    }

    pub fn notifier(&self) -> Arc<dyn Notifier> {
        match &self.config.webhook_url {
            Some(url) => Arc::new(WebhookNotifier::new(url)),
            None => Arc::new(NoopNotifier),
        }
    }

    /// Wire an auto-update engine for this invocation
    pub fn engine(&self, dry_run: bool) -> AutoUpdateEngine {
        let cache = IpCache::new(
            &self.config.files.ip_cache,
            self.config.cache_ttl_secs,
            Box::new(HttpIpResolver::new()),
        );
        AutoUpdateEngine::new(
            self.gateway(),
            cache,
            self.history(),
            self.change_log(),
            self.notifier(),
        )
        .with_dry_run(dry_run)
    }

    /// Resolve a domain name to its zone, listing alternatives on a miss
    pub async fn resolve_zone(&self, domain: &str) -> Result<Zone> {
        let zones = self.gateway.list_zones().await?;

        if let Some(zone) = zones.iter().find(|z| z.name == domain) {
            return Ok(zone.clone());
        }

        let available: Vec<&str> = zones.iter().map(|z| z.name.as_str()).collect();
        let listing = if available.is_empty() {
            "none".to_string()
        } else {
            available.join(", ")
        };
        Err(Error::not_found(format!(
            "domain {} not found in this account (available: {})",
            domain, listing
        )))
    }
}

/// Route a parsed command to its implementation
pub async fn dispatch(ctx: Ctx, command: Command) -> anyhow::Result<()> {
    match command {
        Command::List { domain, json } => records::list(&ctx, &domain, json).await,
        Command::ListAll { json } => zones::list_all(&ctx, json).await,
        Command::Add {
            domain,
            record_type,
            name,
            content,
            ttl,
            proxied,
            track,
            dry_run,
        } => {
            records::add(
                &ctx,
                &domain,
                record_type,
                &name,
                &content,
                ttl,
                proxied,
                track,
                dry_run,
            )
            .await
        }
        Command::Edit {
            domain,
            record_id,
            content,
            ttl,
            proxied,
            dry_run,
        } => records::edit(&ctx, &domain, &record_id, content, ttl, proxied, dry_run).await,
        Command::Delete {
            domain,
            record_id,
            yes,
            dry_run,
        } => records::delete(&ctx, &domain, &record_id, yes, dry_run).await,
        Command::EnableProxy {
            domain,
            record_id,
            dry_run,
        } => records::set_proxied(&ctx, &domain, &record_id, true, dry_run).await,
        Command::DisableProxy {
            domain,
            record_id,
            dry_run,
        } => records::set_proxied(&ctx, &domain, &record_id, false, dry_run).await,
        Command::AutoUpdate {
            domain,
            record_id,
            record,
            dry_run,
        } => autoupdate::run_one(&ctx, &domain, &record_id, &record, dry_run).await,
        Command::AutoUpdateAll { dry_run } => autoupdate::run_tracked(&ctx, dry_run).await,
        Command::Track { domain, record } => autoupdate::track(&ctx, &domain, &record).await,
        Command::Untrack { domain, record } => autoupdate::untrack(&ctx, &domain, &record).await,
        Command::History => autoupdate::history(&ctx).await,
        Command::Backup { domain, output } => records::backup(&ctx, &domain, output).await,
        Command::BulkAdd {
            domain,
            file,
            dry_run,
        } => records::bulk_add(&ctx, &domain, &file, dry_run).await,
        Command::Search { domain, term } => records::search(&ctx, &domain, &term).await,
        Command::Stats { domain, json } => zones::stats(&ctx, &domain, json).await,
        Command::Watch { interval, dry_run } => autoupdate::watch(&ctx, interval, dry_run).await,
        Command::Setup => unreachable!("setup runs before configuration is loaded"),
    }
}
