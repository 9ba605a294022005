//! Per-page persistence of listing view state.
//!
//! Each page owns five keys, all prefixed with the page's key prefix:
//!
//! | key                       | encoding               |
//! |---------------------------|------------------------|
//! | `{prefix}_manhwas_cache`  | JSON array of items    |
//! | `{prefix}_search_query`   | raw text               |
//! | `{prefix}_selected_genres`| JSON array of strings  |
//! | `{prefix}_source`         | JSON string            |
//! | `{prefix}_sort`           | JSON string            |
//!
//! The cache key decides whether a page has persisted state at all. Without
//! it, [`ViewStore::load`] returns `None` and the page fetches afresh, while
//! [`ViewStore::load_criteria`] still restores filters and sort. An empty pool
//! is never cached, so a failed fetch is retried on the next mount. The
//! ranking page keeps no query. Values that fail to decode are logged and
//! treated as absent.

use crate::app::modes::PageKind;
use crate::app::state::ViewState;
use crate::domain::error::Result;
use crate::domain::CatalogItem;
use crate::storage::backend::KeyValueStore;
use serde::de::DeserializeOwned;

const CACHE: &str = "manhwas_cache";
const QUERY: &str = "search_query";
const GENRES: &str = "selected_genres";
const SOURCE: &str = "source";
const SORT: &str = "sort";

const ALL_KEYS: [&str; 5] = [CACHE, QUERY, GENRES, SOURCE, SORT];

fn key(page: PageKind, name: &str) -> String {
    format!("{}_{name}", page.key_prefix())
}

/// Typed view over a [`KeyValueStore`] for listing pages.
#[derive(Debug)]
pub struct ViewStore<K> {
    backend: K,
}

impl<K: KeyValueStore> ViewStore<K> {
    pub const fn new(backend: K) -> Self {
        Self { backend }
    }

    pub const fn backend(&self) -> &K {
        &self.backend
    }

    pub fn into_inner(self) -> K {
        self.backend
    }

    /// Restores the full state of `page`, or `None` when no non-empty pool is
    /// cached.
    ///
    /// # Errors
    ///
    /// Returns an error only if the backend itself fails.
    pub fn load(&self, page: PageKind) -> Result<Option<ViewState>> {
        let _span = tracing::debug_span!("view_store_load", page = page.key_prefix()).entered();

        let Some(pool) = self
            .decode::<Vec<CatalogItem>>(page, CACHE)?
            .filter(|pool| !pool.is_empty())
        else {
            tracing::debug!("no cached pool");
            return Ok(None);
        };

        let mut state = self.load_criteria(page)?;
        state.pool = pool;
        tracing::debug!(cached = state.pool.len(), "view state restored");
        Ok(Some(state))
    }

    /// Restores query, genres, source, and sort of `page`, leaving the pool empty.
    ///
    /// # Errors
    ///
    /// Returns an error only if the backend itself fails.
    pub fn load_criteria(&self, page: PageKind) -> Result<ViewState> {
        Ok(ViewState {
            pool: Vec::new(),
            query: if page.persists_query() {
                self.backend.get(&key(page, QUERY))?.unwrap_or_default()
            } else {
                String::new()
            },
            selected_genres: self.decode(page, GENRES)?.unwrap_or_default(),
            source: self.decode(page, SOURCE)?.unwrap_or_default(),
            sort: self.decode(page, SORT)?.unwrap_or_default(),
        })
    }

    /// Writes every key of `page` in one batch.
    ///
    /// An empty pool removes the cache key instead of caching it, and the
    /// ranking page's query key is removed.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the backend write fails.
    pub fn save(&mut self, page: PageKind, state: &ViewState) -> Result<()> {
        let _span = tracing::debug_span!("view_store_save",
            page = page.key_prefix(),
            pool = state.pool.len()
        )
        .entered();

        let pool = if state.pool.is_empty() {
            tracing::debug!("empty pool, dropping cache");
            None
        } else {
            Some(serde_json::to_string(&state.pool)?)
        };
        let query = page.persists_query().then(|| state.query.clone());

        self.backend.write_batch(&[
            (key(page, CACHE), pool),
            (key(page, QUERY), query),
            (key(page, GENRES), Some(serde_json::to_string(&state.selected_genres)?)),
            (key(page, SOURCE), Some(serde_json::to_string(&state.source)?)),
            (key(page, SORT), Some(serde_json::to_string(&state.sort)?)),
        ])
    }

    /// Removes every key of `page`. Other pages are untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend write fails.
    pub fn clear(&mut self, page: PageKind) -> Result<()> {
        tracing::debug!(page = page.key_prefix(), "clearing persisted view state");
        let removals: Vec<(String, Option<String>)> = ALL_KEYS.iter().map(|name| (key(page, name), None)).collect();
        self.backend.write_batch(&removals)
    }

    fn decode<T: DeserializeOwned>(&self, page: PageKind, name: &str) -> Result<Option<T>> {
        let key = key(page, name);
        let Some(raw) = self.backend.get(&key)? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "ignoring corrupt persisted value");
                Ok(None)
            }
        }
    }
}
