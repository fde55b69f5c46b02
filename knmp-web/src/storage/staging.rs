//! Staging area for wizard uploads awaiting the final step

use super::{is_plain_file_name, sanitized_extension};
use knmp_common::{Error, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tracing::{debug, warn};
use uuid::Uuid;

/// Every staged file name starts with this prefix
pub const STAGED_PREFIX: &str = "temp_";

#[derive(Debug, Clone)]
pub struct PhotoStaging {
    dir: PathBuf,
}

impl PhotoStaging {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `data` under a fresh `temp_<uuid><ext>` name and return that name
    pub async fn stage(&self, original_name: &str, data: &[u8]) -> Result<String> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let name = format!(
            "{}{}{}",
            STAGED_PREFIX,
            Uuid::new_v4(),
            sanitized_extension(original_name)
        );
        tokio::fs::write(self.dir.join(&name), data).await?;
        debug!(staged_name = %name, bytes = data.len(), "Staged upload");

        Ok(name)
    }

    fn resolve(&self, name: &str) -> Result<PathBuf> {
        if !is_plain_file_name(name) || !name.starts_with(STAGED_PREFIX) {
            return Err(Error::InvalidPath(format!("Invalid staged file name: {}", name)));
        }
        Ok(self.dir.join(name))
    }

    pub async fn read(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.resolve(name)?;
        Ok(tokio::fs::read(path).await?)
    }

    pub fn exists(&self, name: &str) -> bool {
        self.resolve(name).map(|p| p.is_file()).unwrap_or(false)
    }

    /// Delete a staged file; a file that is already gone is not an error
    pub async fn delete(&self, name: &str) -> Result<()> {
        let path = self.resolve(name)?;
        match tokio::fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Delete each named file, logging and continuing past failures
    pub async fn delete_all<'a>(&self, names: impl IntoIterator<Item = &'a str>) {
        for name in names {
            if let Err(e) = self.delete(name).await {
                warn!(staged_name = %name, "Failed to delete staged file: {}", e);
            }
        }
    }

    /// Remove staged files last modified more than `max_age` ago
    ///
    /// Names in `in_use` are kept regardless of age. Returns the number of
    /// files removed.
    pub async fn sweep(&self, max_age: Duration, in_use: &HashSet<String>) -> Result<usize> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };

        let now = SystemTime::now();
        let mut removed = 0;

        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if !name.starts_with(STAGED_PREFIX) || in_use.contains(name) {
                continue;
            }

            let metadata = match entry.metadata().await {
                Ok(m) if m.is_file() => m,
                _ => continue,
            };
            let age = metadata
                .modified()
                .ok()
                .and_then(|modified| now.duration_since(modified).ok())
                .unwrap_or_default();

            if age > max_age {
                match tokio::fs::remove_file(entry.path()).await {
                    Ok(()) => removed += 1,
                    Err(e) => warn!(staged_name = %name, "Sweep failed to delete: {}", e),
                }
            }
        }

        Ok(removed)
    }
}
