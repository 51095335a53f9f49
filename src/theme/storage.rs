//! Key-value storage port for the persisted theme slot.
//!
//! The theme context only needs string get/set under a key. Three backends:
//!
//! | Backend           | Use                                           |
//! |-------------------|-----------------------------------------------|
//! | `FileStorage`     | CLI: JSON object file on disk                 |
//! | `MemoryStorage`   | tests: shared in-process handle               |
//! | `DisabledStorage` | storage turned off; every call is unavailable |
//!
//! [`open`] picks the file backend, or the disabled one when no path is set.

use std::{collections::BTreeMap, fs, io, path::PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage is unavailable")]
    Unavailable,

    #[error("storage IO error at `{0}`")]
    Io(PathBuf, #[source] io::Error),

    #[error("storage file `{0}` is not a JSON object")]
    Json(PathBuf, #[source] serde_json::Error),
}

/// String key-value storage.
pub trait ThemeStorage {
    /// Read `key`; `Ok(None)` when the slot is empty.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl ThemeStorage for Box<dyn ThemeStorage> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

/// Storage for a configured path; `None` disables persistence.
pub fn open(path: Option<PathBuf>) -> Box<dyn ThemeStorage> {
    match path {
        Some(path) => Box::new(FileStorage::new(path)),
        None => Box::new(DisabledStorage),
    }
}

// ============================================================================
// File Storage
// ============================================================================

/// Storage backed by a JSON object file (`{"key": "value", ...}`).
///
/// A missing file reads as empty. Writes create parent directories.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(err) => return Err(StorageError::Io(self.path.clone(), err)),
        };
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content).map_err(|err| StorageError::Json(self.path.clone(), err))
    }
}

impl ThemeStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        // An unreadable file is replaced rather than blocking every write.
        let mut entries = self.read_all().unwrap_or_default();
        entries.insert(key.to_owned(), value.to_owned());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|err| StorageError::Io(parent.to_path_buf(), err))?;
        }
        let content = serde_json::to_string_pretty(&entries)
            .map_err(|err| StorageError::Json(self.path.clone(), err))?;
        fs::write(&self.path, content).map_err(|err| StorageError::Io(self.path.clone(), err))
    }
}

// ============================================================================
// Memory Storage
// ============================================================================

#[cfg(test)]
pub use memory::MemoryStorage;


// ============================================================================
// Disabled Storage
// ============================================================================

/// Storage that is never available.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledStorage;

impl ThemeStorage for DisabledStorage {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_file_storage_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("none.json"));
        assert_eq!(storage.get("k").unwrap(), None);
    }

    #[test]
    fn test_file_storage_roundtrip_creates_parents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state/nested/storage.json");
        let storage = FileStorage::new(&path);

        storage.set("theme", "{\"themeName\":\"dark\"}").unwrap();
        storage.set("other", "1").unwrap();

        assert!(path.exists());
        let reopened = FileStorage::new(&path);
        assert_eq!(
            reopened.get("theme").unwrap().as_deref(),
            Some("{\"themeName\":\"dark\"}")
        );
        assert_eq!(reopened.get("other").unwrap().as_deref(), Some("1"));
    }

    #[test]
    fn test_file_storage_corrupt_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "not json").unwrap();
        let storage = FileStorage::new(&path);

        assert!(matches!(storage.get("k"), Err(StorageError::Json(..))));
        // writes recover the file
        storage.set("k", "v").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_memory_storage_shared_between_clones() {
        let storage = MemoryStorage::new();
        let clone = storage.clone();
        storage.set("k", "v").unwrap();
        assert_eq!(clone.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_open_selects_backend() {
        let dir = tempdir().unwrap();
        let file = open(Some(dir.path().join("s.json")));
        file.set("k", "v").unwrap();
        assert_eq!(file.get("k").unwrap().as_deref(), Some("v"));

        let disabled = open(None);
        assert!(matches!(disabled.set("k", "v"), Err(StorageError::Unavailable)));
    }

    #[test]
    fn test_disabled_storage() {
        assert!(matches!(DisabledStorage.get("k"), Err(StorageError::Unavailable)));
        assert!(matches!(DisabledStorage.set("k", "v"), Err(StorageError::Unavailable)));
    }
}
