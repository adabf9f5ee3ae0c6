// # Multi-Zone Fetch Orchestrator
//
// Fetches record lists for every zone in the account with bounded
// concurrency, returning results in zone enumeration order regardless of
// completion order (callers render tables and depend on stable ordering).
//
// A failure for one zone never aborts the others: that zone's slot gets
// an empty record list and the failure is logged. Only total enumeration
// failure (cannot list zones at all) is an error.

use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tracing::warn;

use crate::error::Result;
use crate::traits::{DnsGateway, DnsRecord, Zone};

/// Records of one zone, paired with the zone itself
#[derive(Debug, Clone)]
pub struct ZoneRecords {
    /// The zone the records belong to
    pub zone: Zone,
    /// All records in the zone; empty when the per-zone fetch failed
    pub records: Vec<DnsRecord>,
}

/// Fetch records for all zones, at most `concurrency` in flight at once
///
/// `buffered` both bounds the in-flight fetches and yields results in
/// input order, so no index bookkeeping is needed.
pub async fn fetch_all_zone_records(
    gateway: Arc<dyn DnsGateway>,
    concurrency: usize,
) -> Result<Vec<ZoneRecords>> {
    let zones = gateway.list_zones().await?;

    let results = stream::iter(zones.into_iter().map(|zone| {
        let gateway = Arc::clone(&gateway);
        async move {
            match gateway.list_records(&zone.id).await {
                Ok(records) => ZoneRecords { zone, records },
                Err(e) => {
                    warn!(zone = %zone.name, error = %e, "zone record fetch failed, returning empty list");
                    ZoneRecords {
                        zone,
                        records: Vec::new(),
                    }
                }
            }
        }
    }))
    .buffered(concurrency.max(1))
    .collect::<Vec<_>>()
    .await;

    Ok(results)
}
