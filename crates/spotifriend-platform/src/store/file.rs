//! JSON-file store shared by the app and the widget process.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use spotifriend_common::PlatformError;
use tempfile::NamedTempFile;
use tracing::debug;

use super::KeyValueStore;

/// Store backed by a flat JSON object on disk.
///
/// Every read goes to disk so values written by another process are seen
/// immediately. Read-modify-write cycles hold an exclusive lock on a
/// sidecar `.lock` file, so writers in different processes never lose each
/// other's keys. Writes replace the file atomically and, on Unix, keep it
/// readable by the owner only.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock_path: PathBuf,
}

impl FileStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PlatformError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                PlatformError::StoreError(format!("failed to create {}: {e}", parent.display()))
            })?;
        }
        let lock_path = path.with_extension("json.lock");
        Ok(Self { path, lock_path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, PlatformError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(PlatformError::StoreError(format!(
                    "failed to read {}: {e}",
                    self.path.display()
                )))
            }
        };
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content).map_err(|e| {
            PlatformError::StoreError(format!("corrupt store {}: {e}", self.path.display()))
        })
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<(), PlatformError> {
        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| PlatformError::StoreError(e.to_string()))?;
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| {
            PlatformError::StoreError(format!("failed to create temp file in {}: {e}", dir.display()))
        })?;
        tmp.write_all(json.as_bytes())
            .and_then(|_| tmp.flush())
            .map_err(|e| PlatformError::StoreError(format!("failed to write temp store: {e}")))?;
        restrict_permissions(tmp.path())?;
        tmp.persist(&self.path).map_err(|e| {
            PlatformError::StoreError(format!("failed to replace {}: {}", self.path.display(), e.error))
        })?;
        debug!(path = %self.path.display(), keys = entries.len(), "store written");
        Ok(())
    }

    fn acquire_lock(&self) -> Result<File, PlatformError> {
        let file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.lock_path)
            .map_err(|e| {
                PlatformError::StoreError(format!("failed to open {}: {e}", self.lock_path.display()))
            })?;
        // Blocks until the other process releases it; released when the file drops.
        file.lock_exclusive().map_err(|e| {
            PlatformError::StoreError(format!("failed to lock {}: {e}", self.lock_path.display()))
        })?;
        Ok(file)
    }

    fn update<F>(&self, f: F) -> Result<(), PlatformError>
    where
        F: FnOnce(&mut BTreeMap<String, String>),
    {
        let _lock = self.acquire_lock()?;
        let mut entries = self.read_all()?;
        f(&mut entries);
        self.write_all(&entries)
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<(), PlatformError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
        .map_err(|e| PlatformError::StoreError(e.to_string()))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<(), PlatformError> {
    Ok(())
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, PlatformError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PlatformError> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<(), PlatformError> {
        self.update(|entries| {
            entries.remove(key);
        })
    }
}
