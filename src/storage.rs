//! Persistent key/value storage for user preferences.
//!
//! Mirrors the browser's `localStorage`: string keys, string values, and an
//! absent key reads as `None`.

use std::collections::HashMap;
use std::path::{
    Path,
    PathBuf,
};
use std::sync::{
    PoisonError,
    RwLock,
};

use serde_json::{
    Map,
    Value,
};
use thiserror::Error;

/// Errors produced by preference storage.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The backing store could not be read or written.
    #[error("Failed to access preference storage: {0}")]
    Io(#[from] std::io::Error),

    /// The backing store is not valid JSON.
    #[error("Failed to parse preference storage: {0}")]
    Parse(#[from] serde_json::Error),

    /// A stored value is not a string.
    #[error("Stored value for '{key}' is not a string")]
    InvalidValue {
        /// Offending key.
        key: String,
    },
}

/// Persistent string key/value store for client preferences.
pub trait PreferenceStorage: Send + Sync {
    /// Reads `key`. A missing key is `Ok(None)`.
    ///
    /// # Errors
    /// Returns an error if the backing store cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`.
    ///
    /// # Errors
    /// Returns an error if the backing store cannot be written.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    /// Returns an error if the backing store cannot be written.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// Storage kept in process memory.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    /// Stored items.
    items: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates storage pre-populated with `items`.
    #[must_use]
    pub fn with_items<'a>(items: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let items = items.into_iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Self { items: RwLock::new(items) }
    }
}

impl PreferenceStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let items = self.items.read().unwrap_or_else(PoisonError::into_inner);
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self.items.write().unwrap_or_else(PoisonError::into_inner);
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut items = self.items.write().unwrap_or_else(PoisonError::into_inner);
        items.remove(key);
        Ok(())
    }
}

/// Storage persisted as a flat JSON object file, e.g. `{"locale": "th"}`.
///
/// A missing file behaves like empty storage. Every write rewrites the file.
#[derive(Debug, Clone)]
pub struct FileStorage {
    /// Location of the JSON file.
    path: PathBuf,
}

impl FileStorage {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the whole file. Missing file yields an empty map.
    fn read_all(&self) -> Result<Map<String, Value>, StorageError> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Replaces the file content with `items`.
    fn write_all(&self, items: &Map<String, Value>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(items)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

impl PreferenceStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self.read_all()?.remove(key) {
            None => Ok(None),
            Some(Value::String(value)) => Ok(Some(value)),
            Some(_) => Err(StorageError::InvalidValue { key: key.to_string() }),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self.read_all()?;
        items.insert(key.to_string(), Value::String(value.to_string()));
        tracing::debug!(path = %self.path.display(), key, "Writing preference");
        self.write_all(&items)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut items = self.read_all()?;
        if items.remove(key).is_some() {
            self.write_all(&items)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use googletest::prelude::*;
    use rstest::*;
    use tempfile::TempDir;

    use super::*;

    #[googletest::test]
    fn memory_storage_round_trip() {
        let storage = MemoryStorage::new();

        expect_that!(storage.get_item("locale").unwrap(), none());

        storage.set_item("locale", "th").unwrap();
        expect_that!(storage.get_item("locale").unwrap(), some(eq("th")));

        storage.remove_item("locale").unwrap();
        expect_that!(storage.get_item("locale").unwrap(), none());
    }

    #[fixture]
    fn temp_dir() -> TempDir {
        TempDir::new().unwrap()
    }

    /// get_item: ファイルが存在しない場合は None
    #[rstest]
    fn file_storage_missing_file_reads_as_empty(temp_dir: TempDir) {
        let storage = FileStorage::new(temp_dir.path().join("prefs.json"));

        assert!(storage.get_item("locale").unwrap().is_none());
    }

    #[rstest]
    fn file_storage_reads_existing_value(temp_dir: TempDir) {
        let path = temp_dir.path().join("prefs.json");
        fs::write(&path, r#"{"locale": "th", "theme": "dark"}"#).unwrap();

        let storage = FileStorage::new(&path);

        assert_eq!(storage.get_item("locale").unwrap().as_deref(), Some("th"));
    }

    #[rstest]
    fn file_storage_set_creates_parent_directories(temp_dir: TempDir) {
        let path = temp_dir.path().join("nested/dir/prefs.json");
        let storage = FileStorage::new(&path);

        storage.set_item("locale", "th").unwrap();

        assert!(path.exists());
        assert_eq!(storage.get_item("locale").unwrap().as_deref(), Some("th"));
    }

    #[rstest]
    fn file_storage_write_preserves_other_keys(temp_dir: TempDir) {
        let path = temp_dir.path().join("prefs.json");
        fs::write(&path, r#"{"theme": "dark"}"#).unwrap();
        let storage = FileStorage::new(&path);

        storage.set_item("locale", "en").unwrap();
        storage.remove_item("locale").unwrap();

        assert_eq!(storage.get_item("theme").unwrap().as_deref(), Some("dark"));
        assert!(storage.get_item("locale").unwrap().is_none());
    }

    #[rstest]
    fn file_storage_malformed_file_is_an_error(temp_dir: TempDir) {
        let path = temp_dir.path().join("prefs.json");
        fs::write(&path, "not json").unwrap();

        let result = FileStorage::new(&path).get_item("locale");

        assert!(matches!(result, Err(StorageError::Parse(_))));
    }

    #[rstest]
    fn file_storage_non_string_value_is_an_error(temp_dir: TempDir) {
        let path = temp_dir.path().join("prefs.json");
        fs::write(&path, r#"{"locale": 42}"#).unwrap();

        let result = FileStorage::new(&path).get_item("locale");

        assert!(matches!(result, Err(StorageError::InvalidValue { key }) if key == "locale"));
    }
}
