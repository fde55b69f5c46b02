//! Committed photo storage under the public media root

use super::{is_plain_file_name, sanitized_extension};
use knmp_common::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::warn;
use uuid::Uuid;

/// Subdirectory of the media root holding person photos
pub const PHOTO_CATEGORY: &str = "missing_person_photos";

#[derive(Debug, Clone)]
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Store a photo as `missing_person_photos/<uuid><ext>`
    ///
    /// Returns the path relative to the media root, as recorded on the photo row.
    pub async fn store_photo(&self, original_name: &str, data: &[u8]) -> Result<String> {
        let dir = self.root.join(PHOTO_CATEGORY);
        tokio::fs::create_dir_all(&dir).await?;

        let file_name = format!("{}{}", Uuid::new_v4(), sanitized_extension(original_name));
        tokio::fs::write(dir.join(&file_name), data).await?;

        Ok(format!("{}/{}", PHOTO_CATEGORY, file_name))
    }

    /// Absolute path for a relative media path
    pub fn path_of(&self, relative: &str) -> Result<PathBuf> {
        let mut path = self.root.clone();
        for component in relative.split('/') {
            if !is_plain_file_name(component) {
                return Err(Error::InvalidPath(format!("Invalid media path: {}", relative)));
            }
            path.push(component);
        }
        Ok(path)
    }

    /// Best-effort removal of files written before a failed commit
    pub async fn discard(&self, relative_paths: &[String]) {
        for relative in relative_paths {
            let removed = match self.path_of(relative) {
                Ok(path) => tokio::fs::remove_file(path).await.map_err(Error::from),
                Err(e) => Err(e),
            };
            if let Err(e) = removed {
                warn!(file_path = %relative, "Failed to discard media file: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_store_and_discard() {
        let temp_dir = TempDir::new().unwrap();
        let media = MediaStore::new(temp_dir.path());

        let relative = media.store_photo("Face.PNG", b"png").await.unwrap();
        assert!(relative.starts_with("missing_person_photos/"));
        assert!(relative.ends_with(".png"));

        let path = media.path_of(&relative).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"png");

        media.discard(&[relative]).await;
        assert!(!path.exists());
    }

    #[test]
    fn test_path_of_rejects_traversal() {
        let media = MediaStore::new("/srv/media");
        assert!(media.path_of("missing_person_photos/../../etc").is_err());
        assert!(matches!(
            media.path_of("/etc/passwd"),
            Err(knmp_common::Error::InvalidPath(_))
        ));
    }
}
