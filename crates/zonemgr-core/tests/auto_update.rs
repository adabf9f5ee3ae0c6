//! Auto-update engine behavior against a mutable in-memory gateway
//!
//! Covers the guarantees callers rely on: repeated runs never re-write,
//! non-A records are rejected without touching the gateway's write path,
//! dry-run leaves no trace, and IP resolution failure stops before any
//! gateway call.

mod common;

use common::*;
use std::collections::BTreeMap;
use std::sync::Arc;
use tempfile::tempdir;
use zonemgr_core::error::Error;
use zonemgr_core::{IpHistoryLog, TrackedRecord, UpdateOutcome};

#[tokio::test]
async fn drift_updates_once_then_noop() {
    let dir = tempdir().unwrap();
    let gateway = Arc::new(MockGateway::new().with_zone(
        "z1",
        "example.com",
        vec![a_record("r1", "www.example.com", "192.0.2.1")],
    ));

    let engine = build_engine(
        dir.path(),
        gateway.clone(),
        Box::new(FixedResolver::new("198.51.100.7")),
    );

    // First run: drift detected, one write
    let outcome = engine
        .auto_update("z1", "r1", "example.com", "www")
        .await
        .unwrap();
    assert_eq!(
        outcome,
        UpdateOutcome::Updated {
            previous: "192.0.2.1".to_string(),
            current: "198.51.100.7".parse().unwrap(),
        }
    );
    assert_eq!(gateway.update_call_count(), 1);

    // Second run: content now matches, zero further writes
    let outcome = engine
        .auto_update("z1", "r1", "example.com", "www")
        .await
        .unwrap();
    assert_eq!(
        outcome,
        UpdateOutcome::UpToDate {
            current: "198.51.100.7".parse().unwrap(),
        }
    );
    assert_eq!(gateway.update_call_count(), 1);

    // Exactly one history entry for the single applied update
    let history = IpHistoryLog::new(dir.path().join("ip_history.json"));
    let entries = history.entries().await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].domain, "example.com");
    assert_eq!(entries[0].ip, "198.51.100.7".parse::<std::net::IpAddr>().unwrap());
}

#[tokio::test]
async fn cname_is_rejected_without_write() {
    let dir = tempdir().unwrap();
    let gateway = Arc::new(MockGateway::new().with_zone(
        "z1",
        "example.com",
        vec![cname_record("r1", "alias.example.com", "www.example.com")],
    ));

    let engine = build_engine(
        dir.path(),
        gateway.clone(),
        Box::new(FixedResolver::new("198.51.100.7")),
    );

    let outcome = engine
        .auto_update("z1", "r1", "example.com", "alias")
        .await
        .unwrap();

    assert!(matches!(outcome, UpdateOutcome::RejectedWrongType { .. }));
    assert_eq!(gateway.update_call_count(), 0);
}

#[tokio::test]
async fn dry_run_reports_intended_change_without_side_effects() {
    let dir = tempdir().unwrap();
    let gateway = Arc::new(MockGateway::new().with_zone(
        "z1",
        "example.com",
        vec![a_record("r1", "www.example.com", "192.0.2.1")],
    ));

    let engine = build_engine(
        dir.path(),
        gateway.clone(),
        Box::new(FixedResolver::new("198.51.100.7")),
    )
    .with_dry_run(true);

    let outcome = engine
        .auto_update("z1", "r1", "example.com", "www")
        .await
        .unwrap();

    assert_eq!(
        outcome,
        UpdateOutcome::WouldUpdate {
            previous: "192.0.2.1".to_string(),
            current: "198.51.100.7".parse().unwrap(),
        }
    );
    assert_eq!(gateway.update_call_count(), 0);

    let history = IpHistoryLog::new(dir.path().join("ip_history.json"));
    assert!(history.entries().await.is_empty());
    assert!(!dir.path().join("changes.log").exists());
}

#[tokio::test]
async fn resolution_failure_stops_before_gateway() {
    let dir = tempdir().unwrap();
    let gateway = Arc::new(MockGateway::new().with_zone(
        "z1",
        "example.com",
        vec![a_record("r1", "www.example.com", "192.0.2.1")],
    ));

    let engine = build_engine(dir.path(), gateway.clone(), Box::new(FailingResolver));

    let err = engine
        .auto_update("z1", "r1", "example.com", "www")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::IpResolution(_)));
    assert_eq!(gateway.get_call_count(), 0, "gateway must not be contacted");
    assert_eq!(gateway.update_call_count(), 0);
}

#[tokio::test]
async fn failed_write_appends_no_history() {
    let dir = tempdir().unwrap();
    let gateway = Arc::new(
        MockGateway::new()
            .with_zone(
                "z1",
                "example.com",
                vec![a_record("r1", "www.example.com", "192.0.2.1")],
            )
            .with_failing_updates(),
    );

    let engine = build_engine(
        dir.path(),
        gateway.clone(),
        Box::new(FixedResolver::new("198.51.100.7")),
    );

    let err = engine
        .auto_update("z1", "r1", "example.com", "www")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Provider { .. }));

    let history = IpHistoryLog::new(dir.path().join("ip_history.json"));
    assert!(history.entries().await.is_empty());
}

#[tokio::test]
async fn auto_update_all_isolates_per_entry_failures() {
    let dir = tempdir().unwrap();
    let gateway = Arc::new(MockGateway::new().with_zone(
        "z1",
        "example.com",
        vec![a_record("r1", "www.example.com", "192.0.2.1")],
    ));

    let engine = build_engine(
        dir.path(),
        gateway.clone(),
        Box::new(FixedResolver::new("198.51.100.7")),
    );

    let mut entries = BTreeMap::new();
    entries.insert(
        "example.com:missing".to_string(),
        TrackedRecord {
            zone_id: "z1".to_string(),
            record_id: "no-such-record".to_string(),
        },
    );
    entries.insert(
        "example.com:www".to_string(),
        TrackedRecord {
            zone_id: "z1".to_string(),
            record_id: "r1".to_string(),
        },
    );

    let results = engine.auto_update_all(&entries).await;

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].0, "example.com:missing");
    assert!(matches!(results[0].1, Err(Error::NotFound(_))));
    assert_eq!(results[1].0, "example.com:www");
    assert!(matches!(
        results[1].1,
        Ok(UpdateOutcome::Updated { .. })
    ));
}
