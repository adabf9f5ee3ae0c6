// # DNS Gateway Trait
//
// Defines the interface to the provider's zone and record endpoints.
//
// ## Implementation
//
// - Cloudflare: `zonemgr-provider-cloudflare` crate
//
// The core treats records as opaque values fetched fresh on each call;
// nothing below this trait is ever cached (only the public IP is, by
// `IpCache`).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// A DNS zone as enumerated by the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    /// Provider-assigned zone identifier
    pub id: String,
    /// Zone (domain) name
    pub name: String,
}

/// DNS record types the tool manages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    A,
    Aaaa,
    Cname,
    Txt,
    Mx,
    Ns,
    Srv,
}

impl RecordType {
    /// Canonical wire/display name (e.g. "AAAA")
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::Aaaa => "AAAA",
            RecordType::Cname => "CNAME",
            RecordType::Txt => "TXT",
            RecordType::Mx => "MX",
            RecordType::Ns => "NS",
            RecordType::Srv => "SRV",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "A" => Ok(RecordType::A),
            "AAAA" => Ok(RecordType::Aaaa),
            "CNAME" => Ok(RecordType::Cname),
            "TXT" => Ok(RecordType::Txt),
            "MX" => Ok(RecordType::Mx),
            "NS" => Ok(RecordType::Ns),
            "SRV" => Ok(RecordType::Srv),
            other => Err(Error::config(format!(
                "unsupported record type '{}' (valid: A, AAAA, CNAME, TXT, MX, NS, SRV)",
                other
            ))),
        }
    }
}

/// A DNS record as returned by the provider
///
/// Fetched fresh on every call; the core never caches these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecord {
    /// Provider-assigned record identifier
    pub id: String,
    /// Fully qualified record name
    pub name: String,
    /// Record type
    #[serde(rename = "type")]
    pub record_type: RecordType,
    /// Record content (IP address, target name, text, ...)
    pub content: String,
    /// Time-to-live in seconds
    pub ttl: u32,
    /// Whether the provider proxies this record
    #[serde(default)]
    pub proxied: bool,
}

/// Payload for creating or updating a record
///
/// On update, every field is sent; callers preserve unchanged fields
/// from the freshly fetched record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRecord {
    /// Record type
    #[serde(rename = "type")]
    pub record_type: RecordType,
    /// Record name
    pub name: String,
    /// Record content
    pub content: String,
    /// Time-to-live in seconds
    pub ttl: u32,
    /// Whether the provider should proxy this record
    pub proxied: bool,
}

impl NewRecord {
    /// Build an update payload from an existing record, replacing only
    /// the content
    pub fn from_record_with_content(record: &DnsRecord, content: impl Into<String>) -> Self {
        Self {
            record_type: record.record_type,
            name: record.name.clone(),
            content: content.into(),
            ttl: record.ttl,
            proxied: record.proxied,
        }
    }
}

/// Trait for the DNS provider's zone/record API
///
/// Implementations perform one HTTP call per method (plus any internal
/// rate-limit retries) and must be thread-safe across async tasks. All
/// failures carry the provider's HTTP status and message where
/// available.
#[async_trait]
pub trait DnsGateway: Send + Sync {
    /// Enumerate all zones in the account
    async fn list_zones(&self) -> Result<Vec<Zone>, Error>;

    /// List all records in a zone
    async fn list_records(&self, zone_id: &str) -> Result<Vec<DnsRecord>, Error>;

    /// Fetch a single record
    async fn get_record(&self, zone_id: &str, record_id: &str) -> Result<DnsRecord, Error>;

    /// Create a record in a zone
    async fn create_record(&self, zone_id: &str, record: &NewRecord) -> Result<DnsRecord, Error>;

    /// Replace an existing record
    async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        record: &NewRecord,
    ) -> Result<DnsRecord, Error>;

    /// Delete a record
    async fn delete_record(&self, zone_id: &str, record_id: &str) -> Result<(), Error>;
}
