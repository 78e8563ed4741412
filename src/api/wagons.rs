//! Wagon board endpoint: upstream records joined with stored photos.

use std::collections::HashMap;

use actix_web::{HttpResponse, get, web};
use serde::Serialize;
use tracing::warn;
use utoipa::ToSchema;

use crate::models::{StoredPhoto, WagonRecord};
use crate::services::photo_store::PhotoStore;
use crate::services::wagon_source::WagonSource;

/// Combined wagon board payload.
///
/// The two collections are independent: presentation decides per row whether
/// a wagon has a photo by key lookup, there is no relational merge here.
#[derive(Debug, Serialize, ToSchema)]
pub struct WagonBoardResponse {
    /// Wagon records from the upstream registry.
    pub wagons: Vec<WagonRecord>,
    /// Wagon number to public photo path.
    #[serde(rename = "existingPhotos")]
    pub existing_photos: HashMap<String, String>,
}

/// List wagons together with their stored photos.
///
/// Fails open on both sides: an unreachable registry yields an empty wagon
/// list, an unreadable photo directory yields an empty photo map. Either way
/// the response is a 200 - availability is deliberately favored over
/// completeness for this internal board.
#[utoipa::path(
    get,
    path = "/api/wagons",
    tag = "Wagons",
    responses(
        (status = 200, description = "Wagon list with photo index", body = WagonBoardResponse)
    )
)]
#[get("/wagons")]
pub async fn list_wagons(
    source: web::Data<WagonSource>,
    store: web::Data<dyn PhotoStore>,
) -> HttpResponse {
    let wagons = match source.fetch().await {
        Ok(wagons) => wagons,
        Err(e) => {
            warn!("Wagon registry unavailable, serving empty list: {}", e);
            Vec::new()
        }
    };

    let existing_photos = match store.list().await {
        Ok(photos) => index_by_wagon(photos),
        Err(e) => {
            warn!("Photo store unreadable, serving empty photo map: {}", e);
            HashMap::new()
        }
    };

    HttpResponse::Ok().json(WagonBoardResponse {
        wagons,
        existing_photos,
    })
}

/// Index stored photos by wagon number.
///
/// On a base-name collision the later-enumerated photo wins. The store's
/// delete-then-rename discipline keeps collisions from arising, so the order
/// dependence is not observable in practice.
pub(crate) fn index_by_wagon(photos: Vec<StoredPhoto>) -> HashMap<String, String> {
    photos
        .into_iter()
        .map(|photo| (photo.wagon_id, photo.public_path))
        .collect()
}

/// Configure wagon routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(list_wagons);
}
