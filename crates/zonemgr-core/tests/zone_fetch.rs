//! Multi-zone fetch: ordering, bounded concurrency, failure isolation

mod common;

use common::*;
use std::sync::Arc;
use std::time::Duration;
use zonemgr_core::fetch_all_zone_records;

#[tokio::test]
async fn results_follow_enumeration_order_not_completion_order() {
    // z1 finishes last, z2 first; output order must still be z1, z2, z3
    let gateway = Arc::new(
        MockGateway::new()
            .with_zone("z1", "alpha.example", vec![a_record("a1", "alpha.example", "192.0.2.1")])
            .with_zone("z2", "beta.example", vec![a_record("b1", "beta.example", "192.0.2.2")])
            .with_zone("z3", "gamma.example", vec![a_record("c1", "gamma.example", "192.0.2.3")])
            .with_delay("z1", Duration::from_millis(80))
            .with_delay("z3", Duration::from_millis(30)),
    );

    let results = fetch_all_zone_records(gateway, 5).await.unwrap();

    let names: Vec<&str> = results.iter().map(|zr| zr.zone.name.as_str()).collect();
    assert_eq!(names, ["alpha.example", "beta.example", "gamma.example"]);
    assert_eq!(results[0].records[0].content, "192.0.2.1");
    assert_eq!(results[2].records[0].content, "192.0.2.3");
}

#[tokio::test]
async fn one_failing_zone_gets_an_empty_slot() {
    let gateway = Arc::new(
        MockGateway::new()
            .with_zone("z1", "alpha.example", vec![a_record("a1", "alpha.example", "192.0.2.1")])
            .with_zone("z2", "beta.example", vec![a_record("b1", "beta.example", "192.0.2.2")])
            .with_zone("z3", "gamma.example", vec![a_record("c1", "gamma.example", "192.0.2.3")])
            .with_failing_zone("z2"),
    );

    let results = fetch_all_zone_records(gateway, 5).await.unwrap();

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].records.len(), 1);
    assert!(results[1].records.is_empty(), "failing zone yields empty list");
    assert_eq!(results[2].records.len(), 1);
}

#[tokio::test]
async fn enumeration_failure_is_an_error() {
    let gateway = Arc::new(MockGateway::new().with_failing_zone_listing());

    assert!(fetch_all_zone_records(gateway, 5).await.is_err());
}

#[tokio::test]
async fn in_flight_fetches_stay_within_bound() {
    let mut gateway = MockGateway::new();
    for i in 0..8 {
        let id = format!("z{}", i);
        let name = format!("zone{}.example", i);
        gateway = gateway
            .with_zone(&id, &name, vec![])
            .with_delay(&id, Duration::from_millis(25));
    }
    let gateway = Arc::new(gateway);

    let results = fetch_all_zone_records(gateway.clone(), 3).await.unwrap();

    assert_eq!(results.len(), 8);
    assert!(
        gateway.max_in_flight() <= 3,
        "expected at most 3 concurrent fetches, saw {}",
        gateway.max_in_flight()
    );
}
