//! Table rendering and colored status lines

use owo_colors::OwoColorize;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use zonemgr_core::traits::{DnsRecord, Zone};
use zonemgr_core::{IpHistoryEntry, UpdateOutcome};

/// One row of the records table
#[derive(Tabled)]
pub struct RecordRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    record_type: String,
    #[tabled(rename = "Content")]
    content: String,
    #[tabled(rename = "TTL")]
    ttl: u32,
    #[tabled(rename = "Proxied")]
    proxied: bool,
    #[tabled(rename = "ID")]
    id: String,
}

impl From<&DnsRecord> for RecordRow {
    fn from(record: &DnsRecord) -> Self {
        Self {
            name: record.name.clone(),
            record_type: record.record_type.to_string(),
            content: record.content.clone(),
            ttl: record.ttl,
            proxied: record.proxied,
            id: record.id.clone(),
        }
    }
}

/// One row of the IP history table
#[derive(Tabled)]
pub struct HistoryRow {
    #[tabled(rename = "Domain")]
    domain: String,
    #[tabled(rename = "Record")]
    record: String,
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "When (UTC)")]
    timestamp: String,
}

impl From<&IpHistoryEntry> for HistoryRow {
    fn from(entry: &IpHistoryEntry) -> Self {
        Self {
            domain: entry.domain.clone(),
            record: entry.record.clone(),
            ip: entry.ip.to_string(),
            timestamp: entry.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// Render a records table
pub fn record_table(records: &[DnsRecord]) -> String {
    Table::new(records.iter().map(RecordRow::from))
        .with(Style::sharp())
        .to_string()
}

/// Render the IP history table
pub fn history_table(entries: &[IpHistoryEntry]) -> String {
    Table::new(entries.iter().map(HistoryRow::from))
        .with(Style::sharp())
        .to_string()
}

/// Zone heading for grouped listings
pub fn zone_heading(zone: &Zone) -> String {
    format!("{} ({})", zone.name.bold(), zone.id)
}

/// Print a success line in green
pub fn success(message: &str) {
    println!("{}", message.green());
}

/// Print an informational line without decoration
pub fn plain(message: &str) {
    println!("{}", message);
}

/// Print an error line in red to stderr
pub fn error(message: &str) {
    eprintln!("{}", message.red());
}

/// Print a dry-run notice in yellow
pub fn dry_run(message: &str) {
    println!("{} {}", "[dry-run]".yellow(), message);
}

/// Human line for one auto-update outcome
pub fn outcome_line(target: &str, outcome: &UpdateOutcome) -> String {
    match outcome {
        UpdateOutcome::UpToDate { current } => {
            format!("{}: up to date ({})", target, current)
        }
        UpdateOutcome::Updated { previous, current } => {
            format!("{}: updated {} -> {}", target, previous, current)
        }
        UpdateOutcome::WouldUpdate { previous, current } => {
            format!("{}: would update {} -> {}", target, previous, current)
        }
        UpdateOutcome::RejectedWrongType { actual } => {
            format!(
                "{}: refused, auto-update only supports A records (found {})",
                target, actual
            )
        }
    }
}
