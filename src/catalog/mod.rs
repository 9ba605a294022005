//! Remote catalog access: HTTP client, wire types, and page aggregation.
//!
//! # Modules
//!
//! - [`client`]: `reqwest`-backed client for the Jikan API
//! - [`wire`]: JSON response shapes
//! - [`aggregator`]: multi-page top-list assembly with pacing and a page ceiling
//!
//! The [`CatalogSource`] trait is the seam between the network and everything
//! built on top of it (aggregation, suggestions, listing sessions), so those
//! layers can be exercised against an in-memory source.

pub mod aggregator;
pub mod client;
pub mod wire;

pub use aggregator::{Aggregator, DEFAULT_MAX_PAGES, DEFAULT_PAGE_PACING};
pub use client::{CatalogClient, DEFAULT_BASE_URL};

use crate::domain::CatalogItem;
use std::future::Future;

/// Read-only access to a manhwa catalog.
///
/// Implementations never fail: an unavailable catalog yields empty lists and
/// `None`. Every returned item has already passed the content policy.
pub trait CatalogSource: Send + Sync {
    /// One page (1-based) of the top-ranked manhwa list.
    fn fetch_top_page(&self, page: u32) -> impl Future<Output = Vec<CatalogItem>> + Send;

    /// Free-text search. An empty query returns nothing without any I/O.
    fn search(&self, query: &str) -> impl Future<Output = Vec<CatalogItem>> + Send;

    /// A single item, or `None` if unavailable, not a manhwa, or excluded.
    fn fetch_by_id(&self, id: u64) -> impl Future<Output = Option<CatalogItem>> + Send;
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory catalog used by unit tests across the crate.

    use super::CatalogSource;
    use crate::domain::CatalogItem;
    use std::sync::Mutex;

    /// Builds `count` items with ids and ranks starting at `first_id`.
    pub fn items(first_id: u64, count: usize) -> Vec<CatalogItem> {
        (0..count as u64)
            .map(|offset| {
                let id = first_id + offset;
                CatalogItem::new(id, format!("Title {id}")).with_rank(u32::try_from(id).unwrap_or(u32::MAX))
            })
            .collect()
    }

    #[derive(Debug, Default)]
    pub struct FakeCatalog {
        pub pages: Vec<Vec<CatalogItem>>,
        pub search_results: Vec<CatalogItem>,
        pub top_calls: Mutex<Vec<u32>>,
        pub search_calls: Mutex<Vec<String>>,
    }

    impl FakeCatalog {
        /// `page_count` full pages of `page_size` items each.
        pub fn with_pages(page_count: usize, page_size: usize) -> Self {
            let pages = (0..page_count)
                .map(|p| items((p * page_size) as u64 + 1, page_size))
                .collect();
            Self {
                pages,
                ..Self::default()
            }
        }

        pub fn with_search_results(mut self, results: Vec<CatalogItem>) -> Self {
            self.search_results = results;
            self
        }

        pub fn top_calls(&self) -> Vec<u32> {
            self.top_calls.lock().unwrap().clone()
        }

        pub fn search_calls(&self) -> Vec<String> {
            self.search_calls.lock().unwrap().clone()
        }
    }

    impl CatalogSource for FakeCatalog {
        async fn fetch_top_page(&self, page: u32) -> Vec<CatalogItem> {
            self.top_calls.lock().unwrap().push(page);
            (page as usize)
                .checked_sub(1)
                .and_then(|index| self.pages.get(index))
                .cloned()
                .unwrap_or_default()
        }

        async fn search(&self, query: &str) -> Vec<CatalogItem> {
            if query.is_empty() {
                return Vec::new();
            }
            self.search_calls.lock().unwrap().push(query.to_string());
            self.search_results.clone()
        }

        async fn fetch_by_id(&self, id: u64) -> Option<CatalogItem> {
            self.pages.iter().flatten().find(|item| item.id == id).cloned()
        }
    }
}
