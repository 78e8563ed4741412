//! API endpoint modules.

pub mod health;
pub mod openapi;
pub mod photos;
pub mod upload;
pub mod wagons;

pub use health::configure_health_routes;
pub use openapi::ApiDoc;
pub use photos::configure_routes as configure_photo_routes;
pub use upload::configure_routes as configure_upload_routes;
pub use wagons::configure_routes as configure_wagon_routes;
