//! Photo gallery listing endpoint.

use actix_web::{HttpResponse, get, web};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

use crate::services::photo_store::PhotoStore;

/// Photo listing response.
#[derive(Debug, Serialize, ToSchema)]
pub struct PhotoListResponse {
    /// Stored photo filenames, e.g. `12345.png`.
    pub images: Vec<String>,
}

/// List stored photo filenames.
///
/// Only files with an allowed image extension appear. A missing upload
/// directory is an empty gallery; any other listing failure is a 500 with
/// the same body shape so the frontend never has to special-case it.
#[utoipa::path(
    get,
    path = "/api/photos",
    tag = "Photos",
    responses(
        (status = 200, description = "Stored photo filenames", body = PhotoListResponse),
        (status = 500, description = "Upload directory unreadable", body = PhotoListResponse)
    )
)]
#[get("/photos")]
pub async fn list_photos(store: web::Data<dyn PhotoStore>) -> HttpResponse {
    match store.list().await {
        Ok(photos) => HttpResponse::Ok().json(PhotoListResponse {
            images: photos.into_iter().map(|p| p.file_name).collect(),
        }),
        Err(e) => {
            error!("Failed to list photos: {}", e);
            HttpResponse::InternalServerError().json(PhotoListResponse { images: Vec::new() })
        }
    }
}

/// Configure photo routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(list_photos);
}
