//! Photo upload endpoint.
//!
//! Terminates one multipart submission into exactly one photo store write.
//! The submitted filename is used only to derive the extension; the stored
//! name is keyed by the wagon number field.

use actix_multipart::Multipart;
use actix_web::{HttpResponse, post, web};
use futures_util::StreamExt;
use serde::Serialize;
use tracing::info;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};
use crate::models::photo::extension_of;
use crate::services::photo_store::PhotoStore;

/// Multipart field carrying the photo payload.
const FILE_FIELD: &str = "file";

/// Multipart field carrying the wagon number.
const WAGON_FIELD: &str = "vagonNumber";

/// Upload acknowledgment.
#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    pub message: &'static str,
}

/// Upload a wagon photo.
///
/// POST /api/upload
/// Content-Type: multipart/form-data
///
/// Expects a `file` part (the image, filename used for the extension) and a
/// `vagonNumber` part (the wagon the photo belongs to). A successful call
/// creates or replaces exactly one file in the photo store; a failed call
/// leaves the store untouched.
///
/// Two concurrent uploads for the same wagon race; the store applies no
/// per-key locking and the last rename wins.
#[utoipa::path(
    post,
    path = "/api/upload",
    tag = "Photos",
    responses(
        (status = 200, description = "Photo stored", body = UploadResponse),
        (status = 400, description = "Missing wagon number or file", body = crate::error::ErrorResponse),
        (status = 413, description = "Photo exceeds the size limit", body = crate::error::ErrorResponse),
        (status = 500, description = "Photo could not be stored", body = crate::error::ErrorResponse)
    )
)]
#[post("/upload")]
pub async fn upload_photo(
    mut payload: Multipart,
    store: web::Data<dyn PhotoStore>,
    max_upload_size: web::Data<usize>,
) -> AppResult<HttpResponse> {
    let max_upload_size = *max_upload_size.get_ref();

    let mut vagon_number: Option<String> = None;
    let mut file_name: Option<String> = None;
    let mut file_data: Option<Vec<u8>> = None;

    // Fields may arrive in any order; unknown fields are drained and ignored.
    while let Some(item) = payload.next().await {
        let mut field =
            item.map_err(|e| AppError::InvalidInput(format!("Multipart error: {}", e)))?;

        let (field_name, part_file_name) = match field.content_disposition() {
            Some(cd) => (
                cd.get_name().map(str::to_owned),
                cd.get_filename().map(str::to_owned),
            ),
            None => (None, None),
        };

        match field_name.as_deref() {
            Some(FILE_FIELD) => {
                file_name = part_file_name;
                file_data = Some(read_field_bytes(&mut field, max_upload_size).await?);
            }
            Some(WAGON_FIELD) => {
                let raw = read_field_bytes(&mut field, max_upload_size).await?;
                vagon_number = Some(String::from_utf8_lossy(&raw).trim().to_string());
            }
            _ => drain_field(&mut field).await,
        }
    }

    let vagon_number = match vagon_number {
        Some(n) if !n.is_empty() => n,
        _ => {
            return Err(AppError::InvalidInput(
                "Missing required field: vagonNumber".to_string(),
            ));
        }
    };

    let file_data = file_data.ok_or_else(|| {
        AppError::InvalidInput("Missing required field: file".to_string())
    })?;

    if file_data.is_empty() {
        return Err(AppError::InvalidInput(
            "Uploaded file is empty".to_string(),
        ));
    }

    let extension = file_name
        .as_deref()
        .and_then(extension_of)
        .ok_or_else(|| {
            AppError::InvalidInput("Uploaded file name has no extension".to_string())
        })?
        .to_string();

    let photo = store.put(&vagon_number, file_data, &extension).await?;

    info!("Photo stored for wagon {}: {}", vagon_number, photo.file_name);

    Ok(HttpResponse::Ok().json(UploadResponse { message: "uploaded" }))
}

/// Read a multipart field into memory, enforcing the upload size limit.
async fn read_field_bytes(
    field: &mut actix_multipart::Field,
    max_size: usize,
) -> AppResult<Vec<u8>> {
    let mut data = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk.map_err(|e| AppError::InvalidInput(format!("Read error: {}", e)))?;
        if data.len() + chunk.len() > max_size {
            drain_field(field).await;
            return Err(AppError::PayloadTooLarge(format!(
                "Upload exceeds the {} byte limit",
                max_size
            )));
        }
        data.extend_from_slice(&chunk);
    }
    Ok(data)
}

/// Drain a multipart field without saving.
async fn drain_field(field: &mut actix_multipart::Field) {
    while let Some(chunk) = field.next().await {
        let _ = chunk;
    }
}

/// Configure upload routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(upload_photo);
}
