//! OpenAPI documentation configuration.

use utoipa::OpenApi;

use crate::{api, error, models};

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Vagon Photo Server",
        version = "0.1.0",
        description = "API server for listing railway wagons and uploading wagon photos"
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    paths(
        // Health endpoints
        api::health::health,
        // Wagon board
        api::wagons::list_wagons,
        // Photos
        api::photos::list_photos,
        api::upload::upload_photo,
    ),
    components(
        schemas(
            // Common
            error::ErrorResponse,
            // Health
            api::health::HealthResponse,
            // Wagons
            models::WagonRecord,
            api::wagons::WagonBoardResponse,
            // Photos
            models::StoredPhoto,
            api::photos::PhotoListResponse,
            api::upload::UploadResponse,
        )
    ),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Wagons", description = "Wagon board"),
        (name = "Photos", description = "Wagon photo storage")
    )
)]
pub struct ApiDoc;
