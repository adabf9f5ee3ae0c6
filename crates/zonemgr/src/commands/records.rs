//! Record CRUD, search, backup, and bulk operations

use dialoguer::Confirm;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tokio::fs;

use zonemgr_core::registry::{TrackedRecord, domain_key};
use zonemgr_core::traits::{NewRecord, RecordType, Severity};
use zonemgr_core::error::Error;

use super::Ctx;
use crate::output;

/// List a zone's records as a table or JSON
pub async fn list(ctx: &Ctx, domain: &str, json: bool) -> anyhow::Result<()> {
    let zone = ctx.resolve_zone(domain).await?;
    let records = ctx.gateway().list_records(&zone.id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        output::plain("No records found.");
    } else {
        output::plain(&output::record_table(&records));
    }
    Ok(())
}

/// Create one record, optionally enrolling it for auto-update
#[allow(clippy::too_many_arguments)]
pub async fn add(
    ctx: &Ctx,
    domain: &str,
    record_type: RecordType,
    name: &str,
    content: &str,
    ttl: u32,
    proxied: bool,
    track: bool,
    dry_run: bool,
) -> anyhow::Result<()> {
    if track && record_type != RecordType::A {
        return Err(Error::invalid_record_type("A", record_type.as_str()).into());
    }

    let zone = ctx.resolve_zone(domain).await?;
    let payload = NewRecord {
        record_type,
        name: name.to_string(),
        content: content.to_string(),
        ttl,
        proxied,
    };

    if dry_run {
        output::dry_run(&format!(
            "would create {} record {} -> {} in {} (ttl {}, proxied {})",
            record_type, name, content, domain, ttl, proxied
        ));
        return Ok(());
    }

    let created = ctx.gateway().create_record(&zone.id, &payload).await?;
    let target = domain_key(domain, &created.name);

    ctx.change_log()
        .append(
            "add",
            &target,
            &format!("{} {}", created.record_type, created.content),
        )
        .await?;
    ctx.notifier()
        .notify(
            "DNS record created",
            &format!("{} {} -> {}", target, created.record_type, created.content),
            Severity::Info,
        )
        .await;
    output::success(&format!(
        "Created {} record {} -> {} (id {})",
        created.record_type, created.name, created.content, created.id
    ));

    if track {
        ctx.registry()
            .track(
                domain,
                &created.name,
                TrackedRecord {
                    zone_id: zone.id.clone(),
                    record_id: created.id.clone(),
                },
            )
            .await?;
        output::success(&format!("Enrolled {} for auto-update", target));
    }

    Ok(())
}

/// Edit a record, preserving every unspecified field
pub async fn edit(
    ctx: &Ctx,
    domain: &str,
    record_id: &str,
    content: Option<String>,
    ttl: Option<u32>,
    proxied: Option<bool>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let zone = ctx.resolve_zone(domain).await?;
    let record = ctx.gateway().get_record(&zone.id, record_id).await?;

    let payload = NewRecord {
        record_type: record.record_type,
        name: record.name.clone(),
        content: content.unwrap_or_else(|| record.content.clone()),
        ttl: ttl.unwrap_or(record.ttl),
        proxied: proxied.unwrap_or(record.proxied),
    };

    if dry_run {
        output::dry_run(&format!(
            "would update {}: content {} -> {}, ttl {} -> {}, proxied {} -> {}",
            record.name,
            record.content,
            payload.content,
            record.ttl,
            payload.ttl,
            record.proxied,
            payload.proxied
        ));
        return Ok(());
    }

    let updated = ctx.gateway().update_record(&zone.id, record_id, &payload).await?;
    let target = domain_key(domain, &updated.name);

    ctx.change_log()
        .append("edit", &target, &format!("content {}", updated.content))
        .await?;
    ctx.notifier()
        .notify(
            "DNS record edited",
            &format!("{} -> {}", target, updated.content),
            Severity::Info,
        )
        .await;
    output::success(&format!("Updated {} -> {}", updated.name, updated.content));
    Ok(())
}

/// Delete a record after confirmation, removing any registry entry
pub async fn delete(
    ctx: &Ctx,
    domain: &str,
    record_id: &str,
    yes: bool,
    dry_run: bool,
) -> anyhow::Result<()> {
    let zone = ctx.resolve_zone(domain).await?;
    let record = ctx.gateway().get_record(&zone.id, record_id).await?;
    let target = domain_key(domain, &record.name);

    if dry_run {
        output::dry_run(&format!(
            "would delete {} record {} -> {}",
            record.record_type, record.name, record.content
        ));
        return Ok(());
    }

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Delete {} record {} -> {}?",
                record.record_type, record.name, record.content
            ))
            .default(false)
            .interact()?;
        if !confirmed {
            output::plain("Aborted.");
            return Ok(());
        }
    }

    ctx.gateway().delete_record(&zone.id, record_id).await?;

    // Every deletion path drops the record from the auto-update registry
    if ctx.registry().untrack(domain, &record.name).await? {
        output::plain(&format!("Removed {} from auto-update tracking", target));
    }

    ctx.change_log()
        .append("delete", &target, &format!("was {}", record.content))
        .await?;
    ctx.notifier()
        .notify(
            "DNS record deleted",
            &format!("{} ({} -> {})", target, record.record_type, record.content),
            Severity::Warning,
        )
        .await;
    output::success(&format!("Deleted {} ({})", record.name, record_id));
    Ok(())
}

/// Enable or disable the provider proxy on a record
pub async fn set_proxied(
    ctx: &Ctx,
    domain: &str,
    record_id: &str,
    proxied: bool,
    dry_run: bool,
) -> anyhow::Result<()> {
    let action = if proxied { "enable-proxy" } else { "disable-proxy" };

    let zone = ctx.resolve_zone(domain).await?;
    let record = ctx.gateway().get_record(&zone.id, record_id).await?;

    if record.proxied == proxied {
        output::plain(&format!(
            "{} already has proxied = {}",
            record.name, proxied
        ));
        return Ok(());
    }

    if dry_run {
        output::dry_run(&format!("would set proxied = {} on {}", proxied, record.name));
        return Ok(());
    }

    let mut payload = NewRecord::from_record_with_content(&record, record.content.clone());
    payload.proxied = proxied;
    ctx.gateway().update_record(&zone.id, record_id, &payload).await?;

    let target = domain_key(domain, &record.name);
    ctx.change_log()
        .append(action, &target, &format!("proxied {}", proxied))
        .await?;
    output::success(&format!("Set proxied = {} on {}", proxied, record.name));
    Ok(())
}

/// Case-insensitive search over record names and content
pub async fn search(ctx: &Ctx, domain: &str, term: &str) -> anyhow::Result<()> {
    let zone = ctx.resolve_zone(domain).await?;
    let records = ctx.gateway().list_records(&zone.id).await?;

    let needle = term.to_lowercase();
    let matches: Vec<_> = records
        .into_iter()
        .filter(|r| {
            r.name.to_lowercase().contains(&needle) || r.content.to_lowercase().contains(&needle)
        })
        .collect();

    if matches.is_empty() {
        output::plain(&format!("No records matching '{}'.", term));
    } else {
        output::plain(&output::record_table(&matches));
    }
    Ok(())
}

/// Dump a zone's records to a JSON file
pub async fn backup(ctx: &Ctx, domain: &str, out: Option<PathBuf>) -> anyhow::Result<()> {
    let zone = ctx.resolve_zone(domain).await?;
    let records = ctx.gateway().list_records(&zone.id).await?;

    let path = out.unwrap_or_else(|| PathBuf::from(format!("{}_backup.json", domain)));
    fs::write(&path, serde_json::to_string_pretty(&records)?).await?;

    output::success(&format!(
        "Backed up {} record(s) from {} to {}",
        records.len(),
        domain,
        path.display()
    ));
    Ok(())
}

/// One entry of a bulk-add file; ttl and proxied are optional
#[derive(Debug, Deserialize)]
struct BulkRecord {
    #[serde(rename = "type")]
    record_type: RecordType,
    name: String,
    content: String,
    #[serde(default = "default_bulk_ttl")]
    ttl: u32,
    #[serde(default)]
    proxied: bool,
}

fn default_bulk_ttl() -> u32 {
    300
}

/// Create records from a JSON array file; one failure never aborts the rest
pub async fn bulk_add(ctx: &Ctx, domain: &str, file: &Path, dry_run: bool) -> anyhow::Result<()> {
    let content = fs::read_to_string(file).await?;
    let entries: Vec<BulkRecord> = serde_json::from_str(&content)?;

    if entries.is_empty() {
        output::plain("Nothing to do: the file contains no records.");
        return Ok(());
    }

    let zone = ctx.resolve_zone(domain).await?;
    let change_log = ctx.change_log();

    let mut created = 0usize;
    let mut failed = 0usize;
    for entry in entries {
        let payload = NewRecord {
            record_type: entry.record_type,
            name: entry.name.clone(),
            content: entry.content.clone(),
            ttl: entry.ttl,
            proxied: entry.proxied,
        };

        if dry_run {
            output::dry_run(&format!(
                "would create {} record {} -> {}",
                payload.record_type, payload.name, payload.content
            ));
            continue;
        }

        match ctx.gateway().create_record(&zone.id, &payload).await {
            Ok(record) => {
                change_log
                    .append(
                        "bulk-add",
                        &domain_key(domain, &record.name),
                        &format!("{} {}", record.record_type, record.content),
                    )
                    .await?;
                output::success(&format!("Created {} -> {}", record.name, record.content));
                created += 1;
            }
            Err(e) => {
                output::error(&format!("Failed to create {}: {}", entry.name, e));
                failed += 1;
            }
        }
    }

    if !dry_run {
        output::plain(&format!("Bulk add finished: {} created, {} failed", created, failed));
    }
    Ok(())
}
