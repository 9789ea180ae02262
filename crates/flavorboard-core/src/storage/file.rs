//! File-based storage for native platforms.

use super::{BoxFuture, Storage, StorageError, StorageResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Stores each key as `<key>.json` inside a base directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    base_path: PathBuf,
}

impl FileStorage {
    /// Open (and create if needed) a storage directory.
    pub fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();
        fs::create_dir_all(&base_path).map_err(|e| {
            StorageError::Io(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;
        Ok(Self { base_path })
    }

    /// Storage under the user's local data directory, e.g.
    /// `~/.local/share/flavorboard/boards` on Linux.
    pub fn default_location() -> StorageResult<Self> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| StorageError::Io("Could not determine data directory".to_string()))?;
        Self::new(base.join("flavorboard").join("boards"))
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Keys are mapped onto file names; anything outside `[A-Za-z0-9_-]`
    /// becomes `_`.
    fn key_path(&self, key: &str) -> PathBuf {
        let file_name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.base_path.join(format!("{}.json", file_name))
    }
}

impl Storage for FileStorage {
    fn save(&self, key: &str, json: &str) -> BoxFuture<'_, StorageResult<()>> {
        let path = self.key_path(key);
        let json = json.to_string();
        Box::pin(async move {
            fs::write(&path, json).map_err(|e| {
                StorageError::Io(format!("Failed to write {}: {}", path.display(), e))
            })
        })
    }

    fn load(&self, key: &str) -> BoxFuture<'_, StorageResult<String>> {
        let path = self.key_path(key);
        let key = key.to_string();
        Box::pin(async move {
            match fs::read_to_string(&path) {
                Ok(json) => Ok(json),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(StorageError::NotFound(key)),
                Err(e) => Err(StorageError::Io(format!("Failed to read {}: {}", path.display(), e))),
            }
        })
    }

    fn delete(&self, key: &str) -> BoxFuture<'_, StorageResult<()>> {
        let path = self.key_path(key);
        Box::pin(async move {
            match fs::remove_file(&path) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(StorageError::Io(format!("Failed to delete {}: {}", path.display(), e))),
            }
        })
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        let base = self.base_path.clone();
        Box::pin(async move {
            let entries = fs::read_dir(&base)
                .map_err(|e| StorageError::Io(format!("Failed to read directory: {}", e)))?;

            let keys = entries
                .flatten()
                .map(|entry| entry.path())
                .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
                .filter_map(|path| path.file_stem().and_then(|s| s.to_str()).map(str::to_string))
                .collect();
            Ok(keys)
        })
    }

    fn exists(&self, key: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let path = self.key_path(key);
        Box::pin(async move { Ok(path.is_file()) })
    }
}
