//! Test doubles and helpers shared by the integration tests
//!
//! The mock gateway keeps records in memory, mutates them on update (so
//! repeated engine runs observe the written content), and counts calls so
//! tests can assert exactly how many writes were issued.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::net::IpAddr;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use zonemgr_core::error::{Error, Result};
use zonemgr_core::traits::{
    DnsGateway, DnsRecord, NewRecord, NoopNotifier, PublicIpResolver, RecordType, Zone,
};
use zonemgr_core::{AutoUpdateEngine, ChangeLog, IpCache, IpHistoryLog};

/// In-memory gateway with per-zone delays and injectable failures
#[derive(Default)]
pub struct MockGateway {
    zones: Vec<Zone>,
    records: Mutex<HashMap<String, Vec<DnsRecord>>>,
    delays: HashMap<String, Duration>,
    failing_zones: HashSet<String>,
    fail_zone_listing: bool,
    fail_updates: bool,
    get_calls: AtomicUsize,
    update_calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a zone with its records
    pub fn with_zone(mut self, id: &str, name: &str, records: Vec<DnsRecord>) -> Self {
        self.zones.push(Zone {
            id: id.to_string(),
            name: name.to_string(),
        });
        self.records
            .get_mut()
            .unwrap()
            .insert(id.to_string(), records);
        self
    }

    /// Delay `list_records` for a zone
    pub fn with_delay(mut self, zone_id: &str, delay: Duration) -> Self {
        self.delays.insert(zone_id.to_string(), delay);
        self
    }

    /// Make `list_records` fail for a zone
    pub fn with_failing_zone(mut self, zone_id: &str) -> Self {
        self.failing_zones.insert(zone_id.to_string());
        self
    }

    /// Make `list_zones` itself fail
    pub fn with_failing_zone_listing(mut self) -> Self {
        self.fail_zone_listing = true;
        self
    }

    /// Make every `update_record` fail
    pub fn with_failing_updates(mut self) -> Self {
        self.fail_updates = true;
        self
    }

    pub fn get_call_count(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    pub fn update_call_count(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    /// Highest number of concurrently running `list_records` calls
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn track_in_flight_start(&self) {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
    }

    fn track_in_flight_end(&self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl DnsGateway for MockGateway {
    async fn list_zones(&self) -> Result<Vec<Zone>> {
        if self.fail_zone_listing {
            return Err(Error::provider(503, None, "zone listing unavailable"));
        }
        Ok(self.zones.clone())
    }

    async fn list_records(&self, zone_id: &str) -> Result<Vec<DnsRecord>> {
        self.track_in_flight_start();
        if let Some(delay) = self.delays.get(zone_id) {
            tokio::time::sleep(*delay).await;
        }
        self.track_in_flight_end();

        if self.failing_zones.contains(zone_id) {
            return Err(Error::provider(500, None, "record listing failed"));
        }

        self.records
            .lock()
            .unwrap()
            .get(zone_id)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("zone {}", zone_id)))
    }

    async fn get_record(&self, zone_id: &str, record_id: &str) -> Result<DnsRecord> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        self.records
            .lock()
            .unwrap()
            .get(zone_id)
            .and_then(|records| records.iter().find(|r| r.id == record_id))
            .cloned()
            .ok_or_else(|| Error::not_found(format!("record {}", record_id)))
    }

    async fn create_record(&self, zone_id: &str, record: &NewRecord) -> Result<DnsRecord> {
        let created = DnsRecord {
            id: format!("created-{}", record.name),
            name: record.name.clone(),
            record_type: record.record_type,
            content: record.content.clone(),
            ttl: record.ttl,
            proxied: record.proxied,
        };
        self.records
            .lock()
            .unwrap()
            .entry(zone_id.to_string())
            .or_default()
            .push(created.clone());
        Ok(created)
    }

    async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        record: &NewRecord,
    ) -> Result<DnsRecord> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_updates {
            return Err(Error::provider(500, None, "update failed"));
        }

        let mut records = self.records.lock().unwrap();
        let stored = records
            .get_mut(zone_id)
            .and_then(|records| records.iter_mut().find(|r| r.id == record_id))
            .ok_or_else(|| Error::not_found(format!("record {}", record_id)))?;

        stored.content = record.content.clone();
        stored.ttl = record.ttl;
        stored.proxied = record.proxied;
        Ok(stored.clone())
    }

    async fn delete_record(&self, zone_id: &str, record_id: &str) -> Result<()> {
        let mut records = self.records.lock().unwrap();
        if let Some(zone_records) = records.get_mut(zone_id) {
            zone_records.retain(|r| r.id != record_id);
        }
        Ok(())
    }
}

/// Resolver returning a fixed address, counting calls
pub struct FixedResolver {
    ip: IpAddr,
    calls: Arc<AtomicUsize>,
}

impl FixedResolver {
    pub fn new(ip: &str) -> Self {
        Self {
            ip: ip.parse().unwrap(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl PublicIpResolver for FixedResolver {
    async fn resolve(&self) -> Result<IpAddr> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.ip)
    }
}

/// Resolver whose every attempt fails
pub struct FailingResolver;

#[async_trait]
impl PublicIpResolver for FailingResolver {
    async fn resolve(&self) -> Result<IpAddr> {
        Err(Error::ip_resolution("both sources unreachable"))
    }
}

/// Build an A record for tests
pub fn a_record(id: &str, name: &str, content: &str) -> DnsRecord {
    DnsRecord {
        id: id.to_string(),
        name: name.to_string(),
        record_type: RecordType::A,
        content: content.to_string(),
        ttl: 300,
        proxied: false,
    }
}

/// Build a CNAME record for tests
pub fn cname_record(id: &str, name: &str, target: &str) -> DnsRecord {
    DnsRecord {
        id: id.to_string(),
        name: name.to_string(),
        record_type: RecordType::Cname,
        content: target.to_string(),
        ttl: 300,
        proxied: false,
    }
}

/// Wire an engine over the mock gateway with files under `dir`
pub fn build_engine(
    dir: &Path,
    gateway: Arc<dyn DnsGateway>,
    resolver: Box<dyn PublicIpResolver>,
) -> AutoUpdateEngine {
    let cache = IpCache::new(dir.join("ip_cache.json"), 300, resolver);
    let history = IpHistoryLog::new(dir.join("ip_history.json"));
    let change_log = ChangeLog::new(dir.join("changes.log"));
    AutoUpdateEngine::new(gateway, cache, history, change_log, Arc::new(NoopNotifier))
}
