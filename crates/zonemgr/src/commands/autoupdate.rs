//! Auto-update commands: single run, tracked sweep, registry management,
//! history display, and the interval watch mode

use std::time::Duration;
use tracing::info;

use zonemgr_core::UpdateOutcome;
use zonemgr_core::error::Error;
use zonemgr_core::registry::{TrackedRecord, domain_key};
use zonemgr_core::traits::RecordType;

use super::Ctx;
use crate::output;

/// Run one auto-update for a single record
pub async fn run_one(
    ctx: &Ctx,
    domain: &str,
    record_id: &str,
    record_name: &str,
    dry_run: bool,
) -> anyhow::Result<()> {
    let zone = ctx.resolve_zone(domain).await?;
    let outcome = ctx
        .engine(dry_run)
        .auto_update(&zone.id, record_id, domain, record_name)
        .await?;

    print_outcome(&domain_key(domain, record_name), &outcome);
    Ok(())
}

/// Run auto-update for every tracked record and print a summary
pub async fn run_tracked(ctx: &Ctx, dry_run: bool) -> anyhow::Result<()> {
    let entries = ctx.registry().load().await;
    if entries.is_empty() {
        output::plain("No tracked records. Enroll one with `zonemgr track`.");
        return Ok(());
    }

    let results = ctx.engine(dry_run).auto_update_all(&entries).await;

    let mut updated = 0usize;
    let mut unchanged = 0usize;
    let mut failed = 0usize;
    for (target, result) in &results {
        match result {
            Ok(outcome) => {
                print_outcome(target, outcome);
                match outcome {
                    UpdateOutcome::Updated { .. } | UpdateOutcome::WouldUpdate { .. } => {
                        updated += 1
                    }
                    UpdateOutcome::UpToDate { .. } => unchanged += 1,
                    UpdateOutcome::RejectedWrongType { .. } => failed += 1,
                }
            }
            Err(e) => {
                output::error(&format!("{}: {}", target, e));
                failed += 1;
            }
        }
    }

    output::plain(&format!(
        "{} tracked record(s): {} updated, {} unchanged, {} failed",
        results.len(),
        updated,
        unchanged,
        failed
    ));
    Ok(())
}

/// Enroll an existing A record for auto-update
pub async fn track(ctx: &Ctx, domain: &str, record_name: &str) -> anyhow::Result<()> {
    let zone = ctx.resolve_zone(domain).await?;
    let records = ctx.gateway().list_records(&zone.id).await?;

    // Accept the name as listed or relative to the zone
    let qualified = format!("{}.{}", record_name, domain);
    let record = records
        .iter()
        .find(|r| r.name == record_name || r.name == qualified)
        .ok_or_else(|| {
            Error::not_found(format!("record {} not found in {}", record_name, domain))
        })?;

    if record.record_type != RecordType::A {
        return Err(Error::invalid_record_type("A", record.record_type.as_str()).into());
    }

    ctx.registry()
        .track(
            domain,
            &record.name,
            TrackedRecord {
                zone_id: zone.id.clone(),
                record_id: record.id.clone(),
            },
        )
        .await?;

    output::success(&format!(
        "Enrolled {} for auto-update",
        domain_key(domain, &record.name)
    ));
    Ok(())
}

/// Remove a record from auto-update
pub async fn untrack(ctx: &Ctx, domain: &str, record_name: &str) -> anyhow::Result<()> {
    if ctx.registry().untrack(domain, record_name).await? {
        output::success(&format!(
            "Removed {} from auto-update",
            domain_key(domain, record_name)
        ));
    } else {
        output::plain(&format!(
            "{} was not tracked",
            domain_key(domain, record_name)
        ));
    }
    Ok(())
}

/// Show the recorded public-IP update history
pub async fn history(ctx: &Ctx) -> anyhow::Result<()> {
    let entries = ctx.history().entries().await;
    if entries.is_empty() {
        output::plain("No IP updates recorded yet.");
    } else {
        output::plain(&output::history_table(&entries));
    }
    Ok(())
}

/// Run the tracked sweep every `interval` seconds until Ctrl-C
pub async fn watch(ctx: &Ctx, interval: u64, dry_run: bool) -> anyhow::Result<()> {
    let interval = interval.max(1);
    output::plain(&format!(
        "Watching tracked records every {}s (Ctrl-C to stop)",
        interval
    ));

    loop {
        if let Err(e) = run_tracked(ctx, dry_run).await {
            // A failed sweep (e.g. transient enumeration error) does not
            // stop the watch loop
            output::error(&format!("Sweep failed: {}", e));
        }

        tokio::select! {
            _ = tokio::time::sleep(Duration::from_secs(interval)) => {}
            _ = tokio::signal::ctrl_c() => {
                info!("shutdown signal received");
                output::plain("Stopping.");
                return Ok(());
            }
        }
    }
}

fn print_outcome(target: &str, outcome: &UpdateOutcome) {
    let line = output::outcome_line(target, outcome);
    match outcome {
        UpdateOutcome::Updated { .. } => output::success(&line),
        UpdateOutcome::WouldUpdate { .. } => output::dry_run(&line),
        UpdateOutcome::UpToDate { .. } => output::plain(&line),
        UpdateOutcome::RejectedWrongType { .. } => output::error(&line),
    }
}
