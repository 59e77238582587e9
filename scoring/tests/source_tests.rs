use common::test_helpers::generate_unique_driver_id;
use scoring::model::DriverTier;
use scoring::source::{JsonFileSource, MetricsSource, SnapshotDocument};
use std::path::PathBuf;

fn write_snapshot(name_hint: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "{}.json",
        generate_unique_driver_id(name_hint)
    ));
    std::fs::write(&path, contents).unwrap();
    path
}

fn snapshot_json() -> String {
    serde_json::json!({
        "drivers": [{
            "driver_id": "DRV-json",
            "total_deliveries": 100,
            "completed_deliveries": 95,
            "average_rating": 4.8,
            "total_ratings": 40,
            "on_time_deliveries": 90,
            "accepted_orders": 80,
            "offered_orders": 100,
            "cancelled_orders": 5,
            "fraud_flags": 0,
            "last_active_at": 1770000000,
            "account_created_at": 1740000000,
            "zone_id": "Z1"
        }],
        "zones": {
            "Z1": {
                "zone_id": "Z1",
                "average_rating": 4.5,
                "average_completion_rate": 90.0,
                "average_on_time_rate": 85.0,
                "average_acceptance_rate": 80.0,
                "average_cancellation_rate": 10.0,
                "driver_count": 25
            }
        },
        "rating_history": {
            "DRV-json": [5.0, 4.0, 5.0, 3.0]
        },
        "metric_history": {
            "DRV-json": { "daily_deliveries": [12.0, 14.0, 13.0] }
        },
        "score_history": {
            "DRV-json": [
                { "date": 1769000000, "score": 88.0, "tier": "platinum" },
                { "date": 1770000000, "score": 91.0, "tier": "diamond" }
            ]
        }
    })
    .to_string()
}

#[tokio::test]
async fn test_load_snapshot_document() {
    let path = write_snapshot("SNAP", &snapshot_json());
    let source = JsonFileSource::load(&path).await.unwrap();

    let drivers = source.driver_snapshots().await.unwrap();
    assert_eq!(drivers.len(), 1);
    assert_eq!(drivers[0].driver_id, "DRV-json");
    assert_eq!(drivers[0].total_deliveries, 100);
    assert_eq!(drivers[0].zone_id.as_deref(), Some("Z1"));

    let zone = source.zone_averages("Z1").await.unwrap().unwrap();
    assert_eq!(zone.driver_count, 25);
    assert!(source.zone_averages("Z9").await.unwrap().is_none());

    let driver_id = "DRV-json".to_string();
    let ratings = source.rating_history(&driver_id).await.unwrap();
    assert_eq!(ratings, vec![5.0, 4.0, 5.0, 3.0]);

    let history = source.metric_history(&driver_id).await.unwrap();
    assert_eq!(history["daily_deliveries"].len(), 3);

    let scores = source.score_history(&driver_id).await.unwrap();
    assert_eq!(scores.len(), 2);
    assert_eq!(scores[1].tier, DriverTier::Diamond);
}

#[tokio::test]
async fn test_unknown_driver_histories_default_empty() {
    let path = write_snapshot("SNAP-EMPTY", &snapshot_json());
    let source = JsonFileSource::load(&path).await.unwrap();

    let unknown = "DRV-unknown".to_string();
    assert!(source.rating_history(&unknown).await.unwrap().is_empty());
    assert!(source.metric_history(&unknown).await.unwrap().is_empty());
    assert!(source.score_history(&unknown).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_histories_are_optional_in_the_document() {
    let path = write_snapshot("SNAP-MIN", r#"{ "drivers": [] }"#);
    let source = JsonFileSource::load(&path).await.unwrap();
    assert!(source.driver_snapshots().await.unwrap().is_empty());
    assert!(source.zone_averages("Z1").await.unwrap().is_none());
}

#[tokio::test]
async fn test_malformed_document_is_an_error() {
    let path = write_snapshot("SNAP-BAD", "{ not json");
    assert!(JsonFileSource::load(&path).await.is_err());
}

#[tokio::test]
async fn test_missing_file_is_an_error() {
    let path = PathBuf::from("/nonexistent/atlas-snapshot.json");
    assert!(JsonFileSource::load(&path).await.is_err());
}

#[tokio::test]
async fn test_from_document() {
    let source = JsonFileSource::from_document(SnapshotDocument::default());
    assert!(source.driver_snapshots().await.unwrap().is_empty());
}
