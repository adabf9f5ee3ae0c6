//! Account-wide listings and per-zone statistics

use serde_json::json;
use std::collections::BTreeMap;

use zonemgr_core::fetch_all_zone_records;

use super::Ctx;
use crate::output;

/// Fetch every zone's records concurrently and print them grouped
///
/// Zones whose fetch failed show up with an empty record list; output
/// order always matches the account's zone enumeration order.
pub async fn list_all(ctx: &Ctx, json: bool) -> anyhow::Result<()> {
    let results = fetch_all_zone_records(ctx.gateway(), ctx.config.fetch_concurrency).await?;

    if json {
        let value: Vec<_> = results
            .iter()
            .map(|zr| json!({ "zone": zr.zone, "records": zr.records }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    for zr in &results {
        output::plain(&output::zone_heading(&zr.zone));
        if zr.records.is_empty() {
            output::plain("  (no records)");
        } else {
            output::plain(&output::record_table(&zr.records));
        }
        output::plain("");
    }
    Ok(())
}

/// Record counts by type, proxied count, and per-type shares
pub async fn stats(ctx: &Ctx, domain: &str, json: bool) -> anyhow::Result<()> {
    let zone = ctx.resolve_zone(domain).await?;
    let records = ctx.gateway().list_records(&zone.id).await?;

    if records.is_empty() {
        output::plain("No records found.");
        return Ok(());
    }

    let total = records.len();
    let proxied = records.iter().filter(|r| r.proxied).count();

    let mut by_type: BTreeMap<&'static str, usize> = BTreeMap::new();
    for record in &records {
        *by_type.entry(record.record_type.as_str()).or_default() += 1;
    }

    if json {
        let types: BTreeMap<_, _> = by_type
            .iter()
            .map(|(kind, count)| {
                (
                    *kind,
                    json!({ "count": count, "share": *count as f64 / total as f64 }),
                )
            })
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "domain": domain,
                "total": total,
                "proxied": proxied,
                "types": types,
            }))?
        );
        return Ok(());
    }

    output::plain(&format!(
        "{}: {} record(s), {} proxied",
        domain, total, proxied
    ));
    for (kind, count) in &by_type {
        let share = *count as f64 / total as f64 * 100.0;
        output::plain(&format!("  {:<5} {:>3}  ({:.1}%)", kind, count, share));
    }
    Ok(())
}
