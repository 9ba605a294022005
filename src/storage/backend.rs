//! Key-value store abstraction.
//!
//! This module defines the [`KeyValueStore`] trait that abstracts over the
//! local blob store the listing pages persist into. Keys and values are plain
//! strings; callers decide how values are encoded.
//!
//! # Design Philosophy
//!
//! The trait is deliberately the shape of a browser's local storage: get, set,
//! remove. Anything richer (typed views, key naming) lives in
//! [`ViewStore`](crate::storage::ViewStore).

use crate::domain::error::Result;

/// Abstraction over string key-value backends.
///
/// # Implementations
///
/// - [`JsonKeyValueStore`](crate::storage::JsonKeyValueStore): one JSON file with atomic writes
/// - [`MemoryKeyValueStore`](crate::storage::MemoryKeyValueStore): process-local map
///
/// # Examples
///
/// ```
/// use manhwadex::storage::{KeyValueStore, MemoryKeyValueStore};
///
/// let mut store = MemoryKeyValueStore::default();
/// store.set("browse_sort", "\"score\"")?;
/// assert_eq!(store.get("browse_sort")?.as_deref(), Some("\"score\""));
/// store.remove("browse_sort")?;
/// assert!(store.get("browse_sort")?.is_none());
/// # Ok::<(), manhwadex::domain::CatalogError>(())
/// ```
pub trait KeyValueStore: Send {
    /// Reads the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Deletes `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn remove(&mut self, key: &str) -> Result<()>;

    /// Applies several writes at once: `Some(value)` sets, `None` removes.
    ///
    /// The default runs each write in turn. File backends override it to
    /// write the file once.
    ///
    /// # Errors
    ///
    /// Returns an error if any write fails.
    fn write_batch(&mut self, writes: &[(String, Option<String>)]) -> Result<()> {
        for (key, value) in writes {
            match value {
                Some(value) => self.set(key, value)?,
                None => self.remove(key)?,
            }
        }
        Ok(())
    }
}
