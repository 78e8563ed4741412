//! Wagon board endpoint tests: the upstream join and its fail-open branches.

use std::sync::Arc;

use super::test_helpers::*;

/// Registry reachable, no photos stored.
#[actix_rt::test]
async fn test_wagons_lists_registry_records() {
    let url = start_mock_registry(serde_json::json!({
        "Vagons": [
            {
                "VagonNumber": "60088344",
                "VagonType": "Напіввагон",
                "CargoName": "Зерно",
                "OwnerName": "УЗ",
                "DepartureStationName": "Одеса-Порт"
            },
            { "VagonNumber": "60088345" }
        ]
    }))
    .await;

    let app = create_test_app(Arc::new(MemoryPhotoStore::new()), source_for(&url)).await;
    let (status, body) = get_json(&app, "/api/wagons").await;

    assert_eq!(status, 200);
    assert_eq!(body["wagons"].as_array().unwrap().len(), 2);
    assert_eq!(body["wagons"][0]["VagonNumber"], "60088344");
    assert_eq!(body["wagons"][0]["DepartureStationName"], "Одеса-Порт");
    assert_eq!(body["existingPhotos"], serde_json::json!({}));
}

/// Stored photos are joined by wagon number.
#[actix_rt::test]
async fn test_wagons_joins_stored_photos() {
    let url = start_mock_registry(serde_json::json!({
        "Vagons": [ { "VagonNumber": "12345" } ]
    }))
    .await;

    let store = MemoryPhotoStore::new().with_photo("12345.png");
    let app = create_test_app(Arc::new(store), source_for(&url)).await;
    let (status, body) = get_json(&app, "/api/wagons").await;

    assert_eq!(status, 200);
    assert_eq!(body["existingPhotos"]["12345"], "/uploads/12345.png");
}

/// Unreachable registry fails open: 200 with empty wagons, photos intact.
#[actix_rt::test]
async fn test_wagons_fail_open_when_registry_unreachable() {
    let store = MemoryPhotoStore::new().with_photo("12345.png");
    let app = create_test_app(Arc::new(store), unreachable_source()).await;
    let (status, body) = get_json(&app, "/api/wagons").await;

    assert_eq!(status, 200);
    assert_eq!(body["wagons"], serde_json::json!([]));
    assert_eq!(body["existingPhotos"]["12345"], "/uploads/12345.png");
}

/// A registry payload without a Vagons array is an empty list, not an error.
#[actix_rt::test]
async fn test_wagons_tolerates_malformed_envelope() {
    let url = start_mock_registry(serde_json::json!({ "Vagons": null })).await;

    let app = create_test_app(Arc::new(MemoryPhotoStore::new()), source_for(&url)).await;
    let (status, body) = get_json(&app, "/api/wagons").await;

    assert_eq!(status, 200);
    assert_eq!(body["wagons"], serde_json::json!([]));
}

/// An unreadable photo store degrades to an empty photo map.
#[actix_rt::test]
async fn test_wagons_fail_open_when_store_unreadable() {
    let url = start_mock_registry(serde_json::json!({
        "Vagons": [ { "VagonNumber": "12345" } ]
    }))
    .await;

    let app = create_test_app(Arc::new(MemoryPhotoStore::failing()), source_for(&url)).await;
    let (status, body) = get_json(&app, "/api/wagons").await;

    assert_eq!(status, 200);
    assert_eq!(body["wagons"].as_array().unwrap().len(), 1);
    assert_eq!(body["existingPhotos"], serde_json::json!({}));
}
