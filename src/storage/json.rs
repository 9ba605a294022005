//! JSON file-based key-value backend.
//!
//! This module provides a simple, human-readable store using JSON
//! serialization. It uses atomic file writes (write-to-temp + rename) to
//! prevent corruption on crashes.
//!
//! # Performance Characteristics
//!
//! - **Read**: O(log n), the whole file is loaded into memory once
//! - **Write**: O(n), the whole map is serialized and written
//! - **Best for**: a handful of keys whose values are cached result pools

use crate::domain::error::{CatalogError, Result};
use crate::storage::backend::KeyValueStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// On-disk layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoreData {
    /// Version of the storage format for future migrations.
    version: u32,

    #[serde(default)]
    entries: BTreeMap<String, String>,
}

impl Default for StoreData {
    fn default() -> Self {
        Self {
            version: 1,
            entries: BTreeMap::new(),
        }
    }
}

/// JSON file key-value store.
///
/// Every mutation is written through immediately, and a
/// [`write_batch`](KeyValueStore::write_batch) costs one file write. The dirty
/// flag only matters when a write fails: the data stays marked dirty and is
/// retried on the next mutation and once more on drop.
///
/// # File Format
///
/// ```json
/// {
///   "version": 1,
///   "entries": {
///     "browse_search_query": "tower",
///     "browse_sort": "\"rank\""
///   }
/// }
/// ```
pub struct JsonKeyValueStore {
    file_path: PathBuf,
    data: StoreData,
    dirty: bool,
}

impl JsonKeyValueStore {
    /// Creates or opens the store at `file_path`.
    ///
    /// Parent directories are created automatically.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Parent directory creation fails
    /// - The file exists but is not valid JSON
    /// - File permissions prevent reading
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use manhwadex::storage::JsonKeyValueStore;
    /// use std::path::PathBuf;
    ///
    /// let store = JsonKeyValueStore::new(PathBuf::from("/tmp/manhwadex/views.json"))?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "initializing JSON key-value store");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            Self::load_from_file(&file_path)?
        } else {
            tracing::debug!("initializing new empty store");
            StoreData::default()
        };

        tracing::debug!(keys = data.entries.len(), "key-value store initialized");

        Ok(Self {
            file_path,
            data,
            dirty: false,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn load_from_file(path: &Path) -> Result<StoreData> {
        let contents = std::fs::read_to_string(path)?;
        let data: StoreData = serde_json::from_str(&contents)
            .map_err(|e| CatalogError::Storage(format!("failed to parse {}: {e}", path.display())))?;

        tracing::debug!(version = data.version, keys = data.entries.len(), "loaded key-value data");
        Ok(data)
    }

    /// Writes the map to disk if it changed since the last save.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary file cannot be written or renamed.
    pub fn save(&mut self) -> Result<()> {
        if !self.dirty {
            tracing::trace!("skipping save, no changes");
            return Ok(());
        }

        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| CatalogError::Storage(format!("failed to serialize JSON: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        self.dirty = false;
        tracing::trace!(path = ?self.file_path, "key-value store saved");
        Ok(())
    }
}

impl KeyValueStore for JsonKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.data.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let _span = tracing::trace_span!("kv_set", key = %key, len = value.len()).entered();

        if self.data.entries.get(key).map(String::as_str) == Some(value) {
            return Ok(());
        }

        self.data.entries.insert(key.to_string(), value.to_string());
        self.dirty = true;
        self.save()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let _span = tracing::trace_span!("kv_remove", key = %key).entered();

        if self.data.entries.remove(key).is_some() {
            self.dirty = true;
            self.save()?;
        }
        Ok(())
    }

    fn write_batch(&mut self, writes: &[(String, Option<String>)]) -> Result<()> {
        let _span = tracing::trace_span!("kv_write_batch", writes = writes.len()).entered();

        for (key, value) in writes {
            let changed = match value {
                Some(value) if self.data.entries.get(key) != Some(value) => {
                    self.data.entries.insert(key.clone(), value.clone());
                    true
                }
                Some(_) => false,
                None => self.data.entries.remove(key).is_some(),
            };
            self.dirty |= changed;
        }
        self.save()
    }
}

impl Drop for JsonKeyValueStore {
    fn drop(&mut self) {
        if self.dirty {
            tracing::debug!("saving dirty data on drop");
            if let Err(e) = self.save() {
                tracing::error!(error = %e, "failed to save on drop");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn values_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("views.json");

        {
            let mut store = JsonKeyValueStore::new(path.clone()).unwrap();
            store.set("browse_search_query", "solo").unwrap();
            store.set("browse_sort", "\"score\"").unwrap();
            store.remove("browse_sort").unwrap();
        }

        let store = JsonKeyValueStore::new(path).unwrap();
        assert_eq!(store.get("browse_search_query").unwrap().as_deref(), Some("solo"));
        assert!(store.get("browse_sort").unwrap().is_none());
    }

    #[test]
    fn no_temp_file_left_behind() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("views.json");

        let mut store = JsonKeyValueStore::new(path.clone()).unwrap();
        store.set("k", "v").unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn batch_sets_and_removes_in_one_write() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("views.json");
        let mut store = JsonKeyValueStore::new(path.clone()).unwrap();
        store.set("ranking_search_query", "old").unwrap();

        store
            .write_batch(&[
                ("ranking_sort".to_string(), Some("\"rank\"".to_string())),
                ("ranking_search_query".to_string(), None),
            ])
            .unwrap();

        assert!(!store.dirty);
        let reopened = JsonKeyValueStore::new(path).unwrap();
        assert_eq!(reopened.get("ranking_sort").unwrap().as_deref(), Some("\"rank\""));
        assert!(reopened.get("ranking_search_query").unwrap().is_none());
    }

    #[test]
    fn unreadable_file_is_a_storage_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("views.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = JsonKeyValueStore::new(path).err().unwrap();
        assert!(matches!(err, CatalogError::Storage(_)));
    }
}
