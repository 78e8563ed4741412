//! Domain models for the Vagon Photo Server.

pub mod photo;
pub mod wagon;

// Re-export commonly used types
pub use photo::{StoredPhoto, extension_of, has_allowed_extension, public_path, wagon_id_of};
pub use wagon::WagonRecord;
