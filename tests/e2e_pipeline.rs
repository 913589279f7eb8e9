//! End-to-end pipeline runs against the in-memory store and real directories.

use serde_json::{json, Value};
use std::path::Path;
use tempfile::TempDir;
use tracos_sync::file::DirectorySink;
use tracos_sync::store::MemoryStore;
use tracos_sync::{run_stages, BatchSummary, PipelineReport};

fn write_inbound(dir: &Path, name: &str, value: &Value) {
    std::fs::create_dir_all(dir).unwrap();
    std::fs::write(dir.join(name), serde_json::to_vec_pretty(value).unwrap()).unwrap();
}

fn read_outbound(dir: &Path, name: &str) -> Value {
    serde_json::from_str(&std::fs::read_to_string(dir.join(name)).unwrap()).unwrap()
}

#[tokio::test]
async fn test_on_hold_work_order_round_trip() {
    tracing_subscriber_init();

    let temp_dir = TempDir::new().unwrap();
    let inbound_dir = temp_dir.path().join("inbound");
    let outbound_dir = temp_dir.path().join("outbound");
    write_inbound(
        &inbound_dir,
        "1.json",
        &json!({
            "orderNo": 1,
            "summary": "Pump check",
            "creationDate": "2024-01-01T00:00:00Z",
            "lastUpdateDate": "2024-01-02T00:00:00Z",
            "isOnHold": true
        }),
    );

    let store = MemoryStore::new();
    let sink = DirectorySink::new(&outbound_dir);

    // Inbound alone, to observe the intermediate state.
    let inbound = tracos_sync::InboundSync::new(Some(&store))
        .run(&inbound_dir)
        .await
        .unwrap();
    assert_eq!(inbound, BatchSummary { succeeded: 1, failed: 0 });

    let stored = store.get(1).unwrap();
    assert_eq!(stored.get_i64("number").unwrap(), 1);
    assert_eq!(stored.get_str("status").unwrap(), "on_hold");
    assert_eq!(stored.get_str("title").unwrap(), "Pump check");
    assert!(!stored.get_bool("isSynced").unwrap());

    let outbound = tracos_sync::OutboundSync::new(Some(&store), &sink)
        .run()
        .await
        .unwrap();
    assert_eq!(outbound, BatchSummary { succeeded: 1, failed: 0 });

    let published = read_outbound(&outbound_dir, "1.json");
    assert_eq!(
        published,
        json!({
            "orderNo": 1,
            "isActive": true,
            "isCanceled": false,
            "isDeleted": false,
            "isDone": false,
            "isOnHold": true,
            "isPending": false,
            "isSynced": true,
            "summary": "Pump check",
            "creationDate": "2024-01-01T00:00:00Z",
            "lastUpdateDate": "2024-01-02T00:00:00Z",
            "deletedDate": null
        })
    );

    let stored = store.get(1).unwrap();
    assert!(stored.get_bool("isSynced").unwrap());
    assert!(stored.get_datetime("syncedAt").is_ok());
}

#[tokio::test]
async fn test_full_pipeline_with_mixed_batch() {
    tracing_subscriber_init();

    let temp_dir = TempDir::new().unwrap();
    let inbound_dir = temp_dir.path().join("inbound");
    let outbound_dir = temp_dir.path().join("outbound");

    write_inbound(
        &inbound_dir,
        "10.json",
        &json!({
            "orderNo": 10,
            "summary": "Calibrate sensor",
            "creationDate": "2024-03-01T08:00:00Z",
            "lastUpdateDate": "2024-03-02T08:00:00Z",
            "isDone": true,
            "isPending": true,
            "isDeleted": true,
            "deletedDate": "2024-03-03T08:00:00Z"
        }),
    );
    write_inbound(
        &inbound_dir,
        "11.json",
        &json!({
            "orderNo": 11,
            "summary": "Inspect conveyor",
            "creationDate": "2024-03-01T08:00:00Z",
            "lastUpdateDate": "2024-03-01T09:00:00Z"
        }),
    );
    write_inbound(&inbound_dir, "12.json", &json!({ "orderNo": 12, "summary": "" }));
    std::fs::write(inbound_dir.join("13.json"), "{ corrupt").unwrap();
    std::fs::write(inbound_dir.join("README.txt"), "not a work order").unwrap();

    let store = MemoryStore::new();
    let sink = DirectorySink::new(&outbound_dir);

    let report = run_stages(Some(&store), &inbound_dir, &sink).await;

    assert_eq!(
        report,
        PipelineReport {
            inbound: Some(BatchSummary { succeeded: 2, failed: 2 }),
            outbound: Some(BatchSummary { succeeded: 2, failed: 0 }),
        }
    );

    // Done wins over pending; deleted state is carried through.
    let done = read_outbound(&outbound_dir, "10.json");
    assert_eq!(done["isDone"], true);
    assert_eq!(done["isPending"], false);
    assert_eq!(done["isDeleted"], true);
    assert_eq!(done["deletedDate"], "2024-03-03T08:00:00Z");

    // No flags means in progress, which publishes with every flag false.
    let in_progress = read_outbound(&outbound_dir, "11.json");
    for flag in ["isCanceled", "isDone", "isOnHold", "isPending"] {
        assert_eq!(in_progress[flag], false, "{flag}");
    }
    assert_eq!(store.get(11).unwrap().get_str("status").unwrap(), "in_progress");

    assert!(!outbound_dir.join("12.json").exists());
    assert!(!outbound_dir.join("13.json").exists());

    // A second run has nothing new to publish, but re-ingesting the same
    // files queues them again.
    let second = run_stages(Some(&store), &inbound_dir, &sink).await;
    assert_eq!(second.outbound, Some(BatchSummary { succeeded: 2, failed: 0 }));
    assert_eq!(store.len(), 2);
}

#[tokio::test]
async fn test_missing_inbound_dir_still_runs_outbound() {
    tracing_subscriber_init();

    let temp_dir = TempDir::new().unwrap();
    let store = MemoryStore::new();
    store
        .insert_raw(bson::doc! {
            "number": 5_i64,
            "status": "pending",
            "title": "Grease bearings",
            "description": "Grease bearings",
            "createdAt": "2024-05-01T00:00:00Z",
            "updatedAt": "2024-05-01T00:00:00Z",
            "deleted": false,
            "isSynced": false,
        })
        .unwrap();
    let sink = DirectorySink::new(temp_dir.path().join("outbound"));

    let report = run_stages(Some(&store), &temp_dir.path().join("missing"), &sink).await;

    assert_eq!(report.inbound, None);
    assert_eq!(report.outbound, Some(BatchSummary { succeeded: 1, failed: 0 }));
    let published = read_outbound(&temp_dir.path().join("outbound"), "5.json");
    assert_eq!(published["isPending"], true);
    assert_eq!(published["creationDate"], "2024-05-01T00:00:00Z");
}

#[tokio::test]
async fn test_disconnected_pipeline_degrades() {
    tracing_subscriber_init();

    let temp_dir = TempDir::new().unwrap();
    let inbound_dir = temp_dir.path().join("inbound");
    write_inbound(
        &inbound_dir,
        "1.json",
        &json!({
            "orderNo": 1,
            "summary": "Pump check",
            "creationDate": "2024-01-01T00:00:00Z",
            "lastUpdateDate": "2024-01-02T00:00:00Z"
        }),
    );
    let sink = DirectorySink::new(temp_dir.path().join("outbound"));

    let report = run_stages::<MemoryStore, _>(None, &inbound_dir, &sink).await;

    assert_eq!(report.inbound, Some(BatchSummary { succeeded: 0, failed: 1 }));
    assert_eq!(report.outbound, None);
}

fn tracing_subscriber_init() {
    tracing_subscriber::fmt()
        .with_env_filter("tracos_sync=debug")
        .with_test_writer()
        .try_init()
        .ok();
}
