use std::path::{Component, Path, PathBuf};

use tokio::fs;
use uuid::Uuid;

use crate::errors::StorageError;

pub const MAX_AVATAR_BYTES: usize = 5 * 1024 * 1024;
const AVATAR_DIR: &str = "avatars";
const ALLOWED_IMAGE_TYPES: [&str; 4] = ["image/png", "image/jpeg", "image/gif", "image/webp"];

/// Local filesystem store for uploaded avatars. Paths handed out are
/// relative to `root` and are what `persons.photo` stores.
#[derive(Debug, Clone)]
pub struct MediaStorage {
    root: PathBuf,
}

impl MediaStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        MediaStorage { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Stores an avatar under a fresh name and returns its relative path.
    pub async fn save_avatar(&self, bytes: &[u8]) -> Result<String, StorageError> {
        if bytes.is_empty() {
            return Err(StorageError::MissingFile);
        }
        if bytes.len() > MAX_AVATAR_BYTES {
            return Err(StorageError::FileTooLarge);
        }
        let extension = detect_image_extension(bytes)?;

        let dir = self.root.join(AVATAR_DIR);
        fs::create_dir_all(&dir).await?;

        let file_name = format!("{}.{}", Uuid::new_v4(), extension);
        fs::write(dir.join(&file_name), bytes).await?;

        let relative = format!("{AVATAR_DIR}/{file_name}");
        tracing::info!("Stored avatar {}", relative);
        Ok(relative)
    }

    /// Removes a previously stored file. Missing files and paths escaping
    /// the media root are ignored.
    pub async fn delete(&self, relative: &str) -> Result<(), StorageError> {
        let relative_path = Path::new(relative);
        let is_contained = relative_path
            .components()
            .all(|c| matches!(c, Component::Normal(_)));

        if relative.trim().is_empty() || !is_contained {
            tracing::warn!("Refusing to delete media path {:?}", relative);
            return Ok(());
        }

        match fs::remove_file(self.root.join(relative_path)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Io(e)),
        }
    }
}

/// Sniffs the image type from its magic bytes.
pub fn detect_image_extension(bytes: &[u8]) -> Result<&'static str, StorageError> {
    match infer::get(bytes) {
        Some(kind) if ALLOWED_IMAGE_TYPES.contains(&kind.mime_type()) => Ok(kind.extension()),
        Some(kind) => Err(StorageError::UnsupportedType(kind.mime_type().to_string())),
        None => Err(StorageError::UnsupportedType("unknown".to_string())),
    }
}
