//! Directory-backed photo storage.
//!
//! One image file per wagon, named `<wagon_number>.<ext>` in a single flat
//! directory. Writes go to a temp file first and are renamed into place, so a
//! reader never observes a partially written photo under its final name.
//! There is no per-wagon locking: concurrent uploads for the same wagon race
//! and the last rename wins.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::models::photo::{StoredPhoto, has_allowed_extension, wagon_id_of};

/// Photo storage errors. None of these are retried by the store itself.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Upload directory could not be created
    #[error("Failed to create upload directory: {0}")]
    CreateDir(#[source] std::io::Error),

    /// Photo data could not be written to disk
    #[error("Failed to write photo: {0}")]
    Write(#[source] std::io::Error),

    /// Written photo could not be moved into place
    #[error("Failed to move photo into place: {0}")]
    Rename(#[source] std::io::Error),

    /// Upload directory could not be read
    #[error("Failed to list upload directory: {0}")]
    List(#[source] std::io::Error),
}

/// Keyed store holding at most one photo per wagon number.
///
/// Abstracted as a trait so tests can substitute an in-memory fake;
/// production binds [`FsPhotoStore`] to a real directory.
#[async_trait]
pub trait PhotoStore: Send + Sync {
    /// Enumerate stored photos, filtered to the allowed image extensions.
    ///
    /// A missing upload directory is an empty store, not an error.
    async fn list(&self) -> Result<Vec<StoredPhoto>, StoreError>;

    /// Store a photo for a wagon, replacing any previous one.
    ///
    /// The file is written as `<wagon_id>.<extension>` with the extension
    /// preserved verbatim. Any existing files sharing the base name are
    /// removed first, so a re-upload with a different extension does not
    /// leave a stale sibling behind.
    async fn put(
        &self,
        wagon_id: &str,
        data: Vec<u8>,
        extension: &str,
    ) -> Result<StoredPhoto, StoreError>;
}

/// Filesystem-backed photo store.
#[derive(Debug, Clone)]
pub struct FsPhotoStore {
    dir: PathBuf,
}

impl FsPhotoStore {
    /// Create a store rooted at the given directory.
    ///
    /// The directory is created lazily on the first `put`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FsPhotoStore { dir: dir.into() }
    }

    /// Root directory of the store.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Remove stored files whose base name equals `wagon_id`.
    ///
    /// Failures are logged and do not abort the put: the rename that follows
    /// still overwrites the same-extension file, which is the common case.
    async fn remove_existing(&self, wagon_id: &str) {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(_) => return,
        };

        while let Ok(Some(entry)) = entries.next_entry().await {
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };
            if wagon_id_of(name) == wagon_id && has_allowed_extension(name) {
                if let Err(e) = tokio::fs::remove_file(entry.path()).await {
                    warn!("Failed to remove stale photo {}: {}", name, e);
                }
            }
        }
    }
}

#[async_trait]
impl PhotoStore for FsPhotoStore {
    async fn list(&self) -> Result<Vec<StoredPhoto>, StoreError> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::List(e)),
        };

        let mut photos = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(StoreError::List)? {
            let file_type = entry.file_type().await.map_err(StoreError::List)?;
            if !file_type.is_file() {
                continue;
            }

            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };
            if has_allowed_extension(name) {
                photos.push(StoredPhoto::from_file_name(name));
            }
        }

        Ok(photos)
    }

    async fn put(
        &self,
        wagon_id: &str,
        data: Vec<u8>,
        extension: &str,
    ) -> Result<StoredPhoto, StoreError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(StoreError::CreateDir)?;

        let file_name = format!("{}.{}", wagon_id, extension);

        // Temp name carries a uuid so concurrent uploads never share one; the
        // .tmp suffix keeps it out of listings if a crash leaves it behind.
        let temp_path = self
            .dir
            .join(format!("{}.{}.tmp", wagon_id, Uuid::new_v4()));

        tokio::fs::write(&temp_path, data)
            .await
            .map_err(StoreError::Write)?;

        self.remove_existing(wagon_id).await;

        let final_path = self.dir.join(&file_name);
        if let Err(e) = tokio::fs::rename(&temp_path, &final_path).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(StoreError::Rename(e));
        }

        debug!("Stored photo {}", file_name);
        Ok(StoredPhoto::from_file_name(file_name))
    }
}
