//! Stored photo model and filename key derivation.
//!
//! A photo's association with a wagon is carried entirely by its filename:
//! the base name (everything before the first `.`) is the wagon number, the
//! extension identifies the image format. The upload directory listing IS the
//! index; there is no manifest file.

use serde::Serialize;
use utoipa::ToSchema;

use crate::config::UPLOADS_PUBLIC_PREFIX;

/// Image file extensions accepted by the store (matched case-insensitively).
pub const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// A photo file present in the upload directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct StoredPhoto {
    /// Full filename, e.g. `12345.png`.
    pub file_name: String,
    /// Wagon number derived from the base name.
    pub wagon_id: String,
    /// Public URL path the photo is served under, e.g. `/uploads/12345.png`.
    pub public_path: String,
}

impl StoredPhoto {
    /// Build a StoredPhoto from a directory entry name.
    pub fn from_file_name(file_name: impl Into<String>) -> Self {
        let file_name = file_name.into();
        let wagon_id = wagon_id_of(&file_name).to_string();
        let public_path = public_path(&file_name);
        StoredPhoto {
            file_name,
            wagon_id,
            public_path,
        }
    }
}

/// Wagon number of a stored file: the substring before the first `.`.
///
/// Single definition shared by every call site that maps filenames to wagons.
pub fn wagon_id_of(file_name: &str) -> &str {
    file_name.split('.').next().unwrap_or(file_name)
}

/// Extension of a filename: the substring after the last `.`, case preserved.
///
/// Returns None when the name has no dot or the extension is empty.
pub fn extension_of(file_name: &str) -> Option<&str> {
    match file_name.rsplit_once('.') {
        Some((base, ext)) if !base.is_empty() && !ext.is_empty() => Some(ext),
        _ => None,
    }
}

/// Check whether a filename carries one of the allowed image extensions.
pub fn has_allowed_extension(file_name: &str) -> bool {
    extension_of(file_name)
        .map(|ext| {
            let lower = ext.to_lowercase();
            ALLOWED_EXTENSIONS.contains(&lower.as_str())
        })
        .unwrap_or(false)
}

/// Public URL path for a stored file.
pub fn public_path(file_name: &str) -> String {
    format!("{}/{}", UPLOADS_PUBLIC_PREFIX, file_name)
}
