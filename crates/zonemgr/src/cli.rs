//! Command-line definitions
//!
//! One subcommand per action; `--dry-run` on every mutating action and
//! `--yes` on the destructive one. The interactive setup wizard lives
//! under `setup` and is the only command that runs without a loaded
//! configuration.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use zonemgr_core::config::DEFAULT_CONFIG_PATH;
use zonemgr_core::traits::RecordType;

#[derive(Debug, Parser)]
#[command(
    name = "zonemgr",
    version,
    about = "Manage DNS records in a Cloudflare account",
    long_about = "Manage DNS records in a Cloudflare account: listing, editing, \
                  dynamic-IP auto-update with local caching, bulk operations, \
                  backups, and webhook notifications."
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "ZONEMGR_LOG", default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List records in a zone
    List {
        /// Domain (zone) name to list
        #[arg(long)]
        domain: String,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Fetch records for every zone in the account
    ListAll {
        /// Emit JSON instead of tables
        #[arg(long)]
        json: bool,
    },

    /// Create a record
    Add {
        /// Domain (zone) name
        #[arg(long)]
        domain: String,
        /// Record type (A, AAAA, CNAME, TXT, MX, NS, SRV)
        #[arg(long = "type")]
        record_type: RecordType,
        /// Record name (e.g. www)
        #[arg(long)]
        name: String,
        /// Record content (e.g. 192.0.2.1)
        #[arg(long)]
        content: String,
        /// TTL in seconds
        #[arg(long, default_value_t = 300)]
        ttl: u32,
        /// Enable the provider proxy
        #[arg(long)]
        proxied: bool,
        /// Enroll the new record for IP auto-update (A records only)
        #[arg(long)]
        track: bool,
        /// Report the intended change without calling the provider
        #[arg(long)]
        dry_run: bool,
    },

    /// Edit a record, preserving unspecified fields
    Edit {
        #[arg(long)]
        domain: String,
        /// Record ID to edit
        #[arg(long)]
        record_id: String,
        /// New content
        #[arg(long)]
        content: Option<String>,
        /// New TTL in seconds
        #[arg(long)]
        ttl: Option<u32>,
        /// New proxy state (true/false)
        #[arg(long)]
        proxied: Option<bool>,
        #[arg(long)]
        dry_run: bool,
    },

    /// Delete a record (asks for confirmation unless --yes)
    Delete {
        #[arg(long)]
        domain: String,
        /// Record ID to delete
        #[arg(long)]
        record_id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
        #[arg(long)]
        dry_run: bool,
    },

    /// Enable the provider proxy on a record
    EnableProxy {
        #[arg(long)]
        domain: String,
        #[arg(long)]
        record_id: String,
        #[arg(long)]
        dry_run: bool,
    },

    /// Disable the provider proxy on a record
    DisableProxy {
        #[arg(long)]
        domain: String,
        #[arg(long)]
        record_id: String,
        #[arg(long)]
        dry_run: bool,
    },

    /// Update one A record to the current public IP if it drifted
    AutoUpdate {
        #[arg(long)]
        domain: String,
        #[arg(long)]
        record_id: String,
        /// Record name, used for the registry key and history
        #[arg(long)]
        record: String,
        #[arg(long)]
        dry_run: bool,
    },

    /// Run auto-update for every tracked record
    AutoUpdateAll {
        #[arg(long)]
        dry_run: bool,
    },

    /// Enroll an existing A record for auto-update
    Track {
        #[arg(long)]
        domain: String,
        /// Record name as listed (e.g. www.example.com)
        #[arg(long)]
        record: String,
    },

    /// Remove a record from auto-update
    Untrack {
        #[arg(long)]
        domain: String,
        #[arg(long)]
        record: String,
    },

    /// Show the recorded public-IP update history
    History,

    /// Dump a zone's records to a JSON file
    Backup {
        #[arg(long)]
        domain: String,
        /// Output path (defaults to <domain>_backup.json)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Create records from a JSON file
    BulkAdd {
        #[arg(long)]
        domain: String,
        /// JSON array of records to create
        #[arg(long)]
        file: PathBuf,
        #[arg(long)]
        dry_run: bool,
    },

    /// Search records by name or content
    Search {
        #[arg(long)]
        domain: String,
        /// Case-insensitive term matched against name and content
        term: String,
    },

    /// Show record counts and per-type shares for a zone
    Stats {
        #[arg(long)]
        domain: String,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Run auto-update for tracked records on an interval until Ctrl-C
    Watch {
        /// Seconds between runs
        #[arg(long, default_value_t = 300)]
        interval: u64,
        #[arg(long)]
        dry_run: bool,
    },

    /// Interactive setup wizard (writes the configuration file)
    Setup,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_add_with_type() {
        let cli = Cli::parse_from([
            "zonemgr", "add", "--domain", "example.com", "--type", "a", "--name", "www",
            "--content", "192.0.2.1", "--proxied", "--track",
        ]);
        match cli.command {
            Command::Add {
                record_type,
                proxied,
                track,
                ttl,
                dry_run,
                ..
            } => {
                assert_eq!(record_type, RecordType::A);
                assert!(proxied);
                assert!(track);
                assert_eq!(ttl, 300);
                assert!(!dry_run);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn delete_requires_record_id() {
        let result = Cli::try_parse_from(["zonemgr", "delete", "--domain", "example.com"]);
        assert!(result.is_err());
    }

    #[test]
    fn watch_defaults_to_300s() {
        let cli = Cli::parse_from(["zonemgr", "watch"]);
        match cli.command {
            Command::Watch { interval, dry_run } => {
                assert_eq!(interval, 300);
                assert!(!dry_run);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
