//! Document store abstraction and a JSON file backend.
//!
//! Documents are JSON objects grouped into named collections, addressed by a
//! string id. Collection names may contain `/` to express nesting, e.g.
//! `users/{uid}/readingLists/default/entries`; the store treats them as opaque.

use crate::domain::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// A stored document: a JSON object.
pub type Document = Map<String, Value>;

/// Sort direction for [`DocumentStore::query_ordered`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Ascending,
    Descending,
}

/// Minimal document database used by the forum and reading lists.
pub trait DocumentStore: Send {
    /// Inserts `doc` under a freshly generated id and returns that id.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn create(&mut self, collection: &str, doc: Document) -> Result<String>;

    /// Writes `doc` at `id`, merging its top-level fields into any existing
    /// document. Fields absent from `doc` are kept.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn upsert(&mut self, collection: &str, id: &str, doc: Document) -> Result<()>;

    /// Every document in `collection`, sorted by `field`.
    ///
    /// Documents missing the field sort last in either direction.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn query_ordered(&self, collection: &str, field: &str, order: Order) -> Result<Vec<(String, Document)>>;
}

/// Orders two optional field values; `None` always sorts after `Some`.
fn compare_fields(a: Option<&Value>, b: Option<&Value>, order: Order) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => {
            let ord = match (a, b) {
                (Value::Number(x), Value::Number(y)) => {
                    let x = x.as_f64().unwrap_or(0.0);
                    let y = y.as_f64().unwrap_or(0.0);
                    x.total_cmp(&y)
                }
                (Value::String(x), Value::String(y)) => x.cmp(y),
                _ => a.to_string().cmp(&b.to_string()),
            };
            match order {
                Order::Ascending => ord,
                Order::Descending => ord.reverse(),
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoreData {
    version: u32,
    /// Last issued document number.
    #[serde(default)]
    sequence: u64,
    #[serde(default)]
    collections: BTreeMap<String, BTreeMap<String, Document>>,
}

impl Default for StoreData {
    fn default() -> Self {
        Self {
            version: 1,
            sequence: 0,
            collections: BTreeMap::new(),
        }
    }
}

/// [`DocumentStore`] persisted to one JSON file with atomic writes.
///
/// Every mutation rewrites the file (temp file + rename). Changes are staged on
/// a copy and only become visible once the rename succeeds.
#[derive(Debug)]
pub struct JsonDocumentStore {
    file_path: PathBuf,
    data: StoreData,
}

impl JsonDocumentStore {
    /// Opens or creates the store at `file_path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created or the file
    /// exists but is not a valid store.
    pub fn open(file_path: PathBuf) -> Result<Self> {
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            let contents = std::fs::read_to_string(&file_path)?;
            serde_json::from_str(&contents).map_err(|e| {
                CatalogError::Storage(format!("failed to parse {}: {e}", file_path.display()))
            })?
        } else {
            StoreData::default()
        };

        tracing::debug!(path = ?file_path, collections = data.collections.len(), "document store opened");
        Ok(Self { file_path, data })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Writes `next` to disk and adopts it as the current data.
    fn commit(&mut self, next: StoreData) -> Result<()> {
        let json = serde_json::to_string_pretty(&next)?;
        let tmp_path = self.file_path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;
        self.data = next;
        Ok(())
    }
}

impl DocumentStore for JsonDocumentStore {
    fn create(&mut self, collection: &str, doc: Document) -> Result<String> {
        let _span = tracing::debug_span!("doc_create", collection = %collection).entered();

        let mut next = self.data.clone();
        next.sequence += 1;
        let id = format!("{:012}", next.sequence);
        next.collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.clone(), doc);
        self.commit(next)?;

        tracing::debug!(id = %id, "document created");
        Ok(id)
    }

    fn upsert(&mut self, collection: &str, id: &str, doc: Document) -> Result<()> {
        let _span = tracing::debug_span!("doc_upsert", collection = %collection, id = %id).entered();

        let mut next = self.data.clone();
        next.collections
            .entry(collection.to_string())
            .or_default()
            .entry(id.to_string())
            .or_default()
            .extend(doc);
        self.commit(next)
    }

    fn query_ordered(&self, collection: &str, field: &str, order: Order) -> Result<Vec<(String, Document)>> {
        let mut docs: Vec<(String, Document)> = self
            .data
            .collections
            .get(collection)
            .map(|c| c.iter().map(|(id, doc)| (id.clone(), doc.clone())).collect())
            .unwrap_or_default();

        docs.sort_by(|(_, a), (_, b)| compare_fields(a.get(field), b.get(field), order));
        Ok(docs)
    }
}
