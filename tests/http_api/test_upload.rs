//! Photo upload endpoint tests.

use std::sync::Arc;

use actix_web::test;
use tempfile::TempDir;
use vagon_photo_lib::services::photo_store::FsPhotoStore;

use super::test_helpers::*;

fn file_part<'a>(file_name: &'a str, data: &'a [u8]) -> Part<'a> {
    Part {
        name: "file",
        file_name: Some(file_name),
        data,
    }
}

fn wagon_part(number: &str) -> Part<'_> {
    Part {
        name: "vagonNumber",
        file_name: None,
        data: number.as_bytes(),
    }
}

/// Full scenario: upload a photo, see it on disk, in the static route, and
/// joined into the wagon board.
#[actix_rt::test]
async fn test_upload_stores_photo_and_joins_board() {
    let dir = TempDir::new().unwrap();
    let store = FsPhotoStore::new(dir.path());
    let app = create_test_app_with_uploads(
        Arc::new(store),
        unreachable_source(),
        dir.path().to_path_buf(),
    )
    .await;

    let (status, body) =
        post_upload(&app, &[file_part("photo.png", b"png-bytes"), wagon_part("12345")]).await;
    assert_eq!(status, 200, "Upload should succeed: {:?}", body);
    assert_eq!(body["message"], "uploaded");

    // Stored under the wagon number, not the submitted filename
    let on_disk = tokio::fs::read(dir.path().join("12345.png")).await.unwrap();
    assert_eq!(on_disk, b"png-bytes");

    // Served statically
    let req = test::TestRequest::get()
        .uri("/uploads/12345.png")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    // Joined into the wagon board
    let (status, body) = get_json(&app, "/api/wagons").await;
    assert_eq!(status, 200);
    assert_eq!(body["existingPhotos"]["12345"], "/uploads/12345.png");
}

/// Uploading the same photo twice leaves exactly one file.
#[actix_rt::test]
async fn test_upload_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let store = FsPhotoStore::new(dir.path());
    let app = create_test_app(Arc::new(store), unreachable_source()).await;

    for _ in 0..2 {
        let (status, _) =
            post_upload(&app, &[file_part("photo.png", b"png-bytes"), wagon_part("12345")]).await;
        assert_eq!(status, 200);
    }

    let (_, body) = get_json(&app, "/api/photos").await;
    assert_eq!(body["images"], serde_json::json!(["12345.png"]));
}

/// Re-uploading with a different extension replaces the old file entirely.
#[actix_rt::test]
async fn test_upload_with_new_extension_replaces_old_photo() {
    let dir = TempDir::new().unwrap();
    let store = FsPhotoStore::new(dir.path());
    let app = create_test_app(Arc::new(store), unreachable_source()).await;

    let (status, _) =
        post_upload(&app, &[file_part("first.jpg", b"jpeg-bytes"), wagon_part("12345")]).await;
    assert_eq!(status, 200);

    let (status, _) =
        post_upload(&app, &[file_part("second.png", b"png-bytes"), wagon_part("12345")]).await;
    assert_eq!(status, 200);

    let (_, body) = get_json(&app, "/api/photos").await;
    assert_eq!(body["images"], serde_json::json!(["12345.png"]));
    assert!(!dir.path().join("12345.jpg").exists());
}

/// Missing file part is a 400 and the store stays untouched.
#[actix_rt::test]
async fn test_upload_without_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let store = FsPhotoStore::new(dir.path());
    let app = create_test_app(Arc::new(store), unreachable_source()).await;

    let (status, body) = post_upload(&app, &[wagon_part("12345")]).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "INVALID_INPUT");

    let (_, body) = get_json(&app, "/api/photos").await;
    assert_eq!(body["images"], serde_json::json!([]));
}

/// Missing or blank wagon number is a 400.
#[actix_rt::test]
async fn test_upload_without_wagon_number_is_rejected() {
    let dir = TempDir::new().unwrap();
    let store = FsPhotoStore::new(dir.path());
    let app = create_test_app(Arc::new(store), unreachable_source()).await;

    let (status, _) = post_upload(&app, &[file_part("photo.png", b"png-bytes")]).await;
    assert_eq!(status, 400);

    let (status, _) = post_upload(
        &app,
        &[file_part("photo.png", b"png-bytes"), wagon_part("   ")],
    )
    .await;
    assert_eq!(status, 400);
}

/// An empty file payload is a 400.
#[actix_rt::test]
async fn test_upload_empty_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let store = FsPhotoStore::new(dir.path());
    let app = create_test_app(Arc::new(store), unreachable_source()).await;

    let (status, _) = post_upload(&app, &[file_part("photo.png", b""), wagon_part("12345")]).await;
    assert_eq!(status, 400);
}

/// A filename without an extension is a 400.
#[actix_rt::test]
async fn test_upload_filename_without_extension_is_rejected() {
    let dir = TempDir::new().unwrap();
    let store = FsPhotoStore::new(dir.path());
    let app = create_test_app(Arc::new(store), unreachable_source()).await;

    let (status, _) = post_upload(&app, &[file_part("photo", b"bytes"), wagon_part("12345")]).await;
    assert_eq!(status, 400);
}

/// Payloads over the configured limit are a 413.
#[actix_rt::test]
async fn test_upload_oversized_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let store = FsPhotoStore::new(dir.path());
    let app = create_test_app(Arc::new(store), unreachable_source()).await;

    let oversized = vec![0u8; TEST_MAX_UPLOAD_SIZE + 1];
    let (status, body) =
        post_upload(&app, &[file_part("photo.png", &oversized), wagon_part("12345")]).await;
    assert_eq!(status, 413);
    assert_eq!(body["error"], "PAYLOAD_TOO_LARGE");
}

/// The upload resource only accepts POST.
#[actix_rt::test]
async fn test_upload_wrong_method_is_405() {
    let dir = TempDir::new().unwrap();
    let store = FsPhotoStore::new(dir.path());
    let app = create_test_app(Arc::new(store), unreachable_source()).await;

    let req = test::TestRequest::get().uri("/api/upload").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 405);
}
