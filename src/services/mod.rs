//! Business logic services.

pub mod photo_store;
pub mod wagon_source;

pub use photo_store::{FsPhotoStore, PhotoStore, StoreError};
pub use wagon_source::{UpstreamError, WagonSource};
