//! Photo listing endpoint tests.

use std::sync::Arc;

use tempfile::TempDir;
use vagon_photo_lib::services::photo_store::{FsPhotoStore, PhotoStore};

use super::test_helpers::*;

/// A store directory that does not exist yet lists as empty, not as an error.
#[actix_rt::test]
async fn test_photos_missing_directory_is_empty() {
    let dir = TempDir::new().unwrap();
    let store = FsPhotoStore::new(dir.path().join("never-created"));

    let app = create_test_app(Arc::new(store), unreachable_source()).await;
    let (status, body) = get_json(&app, "/api/photos").await;

    assert_eq!(status, 200);
    assert_eq!(body["images"], serde_json::json!([]));
}

/// Only files with allowed image extensions are listed.
#[actix_rt::test]
async fn test_photos_filters_non_image_files() {
    let dir = TempDir::new().unwrap();
    let store = FsPhotoStore::new(dir.path());

    store.put("12345", b"img".to_vec(), "png").await.unwrap();
    tokio::fs::write(dir.path().join("notes.txt"), b"not a photo")
        .await
        .unwrap();

    let app = create_test_app(Arc::new(store), unreachable_source()).await;
    let (status, body) = get_json(&app, "/api/photos").await;

    assert_eq!(status, 200);
    assert_eq!(body["images"], serde_json::json!(["12345.png"]));
}

/// A listing failure is a 500 with the same body shape.
#[actix_rt::test]
async fn test_photos_listing_failure_returns_empty_500() {
    let app = create_test_app(Arc::new(MemoryPhotoStore::failing()), unreachable_source()).await;
    let (status, body) = get_json(&app, "/api/photos").await;

    assert_eq!(status, 500);
    assert_eq!(body["images"], serde_json::json!([]));
}
