//! Multi-page aggregation of the top-ranked list.
//!
//! The remote API serves the top list in fixed-size pages (25 items upstream).
//! Listing pages want larger pools (60, 120, 200), so the aggregator walks
//! pages in order until it has enough.
//!
//! # Stopping rules
//!
//! 1. The pool holds at least `target_count` items.
//! 2. A page comes back empty (source exhausted, or the request failed).
//! 3. The next page index would exceed `max_pages`.
//!
//! The ceiling wins over the target: with 25-item pages and the default ceiling
//! of 10, no caller ever gets more than 250 items. Pages are not deduplicated
//! against each other.

use super::CatalogSource;
use crate::domain::CatalogItem;
use std::sync::Arc;
use std::time::Duration;

/// Hard ceiling on pages fetched per aggregation.
pub const DEFAULT_MAX_PAGES: u32 = 10;

/// Delay inserted before every page after the first.
pub const DEFAULT_PAGE_PACING: Duration = Duration::from_millis(500);

/// Assembles a target-sized pool from a paginated [`CatalogSource`].
#[derive(Debug)]
pub struct Aggregator<S> {
    source: Arc<S>,
    max_pages: u32,
    pacing: Duration,
}

impl<S> Clone for Aggregator<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            max_pages: self.max_pages,
            pacing: self.pacing,
        }
    }
}

impl<S: CatalogSource> Aggregator<S> {
    /// Creates an aggregator with the default ceiling and pacing.
    pub const fn new(source: Arc<S>) -> Self {
        Self {
            source,
            max_pages: DEFAULT_MAX_PAGES,
            pacing: DEFAULT_PAGE_PACING,
        }
    }

    /// Overrides the page ceiling and the inter-page delay.
    #[must_use]
    pub const fn with_limits(mut self, max_pages: u32, pacing: Duration) -> Self {
        self.max_pages = max_pages;
        self.pacing = pacing;
        self
    }

    /// Fetches top-list pages until `target_count` items are collected.
    ///
    /// Returns at most `target_count` items in fetch order. Fewer come back
    /// when the source runs dry or the page ceiling is reached first.
    pub async fn fetch_many(&self, target_count: usize) -> Vec<CatalogItem> {
        let mut pool: Vec<CatalogItem> = Vec::with_capacity(target_count);
        let mut page: u32 = 1;

        while pool.len() < target_count {
            if page > self.max_pages {
                tracing::debug!(
                    target_count,
                    collected = pool.len(),
                    max_pages = self.max_pages,
                    "page ceiling reached before target"
                );
                break;
            }

            if page > 1 {
                tokio::time::sleep(self.pacing).await;
            }

            let batch = self.source.fetch_top_page(page).await;
            if batch.is_empty() {
                tracing::debug!(page, collected = pool.len(), "source exhausted");
                break;
            }

            pool.extend(batch);
            page += 1;
        }

        pool.truncate(target_count);
        tracing::debug!(target_count, returned = pool.len(), pages = page - 1, "aggregation finished");
        pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::testing::{items, FakeCatalog};
    use tokio::time::Instant;

    fn aggregator(catalog: FakeCatalog) -> (Arc<FakeCatalog>, Aggregator<FakeCatalog>) {
        let catalog = Arc::new(catalog);
        (Arc::clone(&catalog), Aggregator::new(Arc::clone(&catalog)))
    }

    #[tokio::test(start_paused = true)]
    async fn stops_once_target_is_reached_and_truncates() {
        let (catalog, aggregator) = aggregator(FakeCatalog::with_pages(8, 25));

        let pool = aggregator.fetch_many(60).await;

        assert_eq!(pool.len(), 60);
        assert_eq!(catalog.top_calls(), vec![1, 2, 3]);
        let ids: Vec<u64> = pool.iter().map(|i| i.id).collect();
        assert_eq!(ids, (1..=60).collect::<Vec<_>>());
    }

    #[tokio::test(start_paused = true)]
    async fn stops_on_first_empty_page() {
        let (catalog, aggregator) = aggregator(FakeCatalog::with_pages(2, 25));

        let pool = aggregator.fetch_many(120).await;

        assert_eq!(pool.len(), 50);
        assert_eq!(catalog.top_calls(), vec![1, 2, 3]);
    }

    #[tokio::test(start_paused = true)]
    async fn page_ceiling_caps_large_targets() {
        let (catalog, aggregator) = aggregator(FakeCatalog::with_pages(20, 25));

        let pool = aggregator.fetch_many(400).await;

        assert_eq!(pool.len(), 250);
        assert_eq!(catalog.top_calls(), (1..=10).collect::<Vec<_>>());
    }

    #[tokio::test(start_paused = true)]
    async fn paces_every_page_after_the_first() {
        let (_, aggregator) = aggregator(FakeCatalog::with_pages(8, 25));

        let started = Instant::now();
        aggregator.fetch_many(75).await;

        // Three pages, two pauses.
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(1000), "{elapsed:?}");
        assert!(elapsed < Duration::from_millis(1500), "{elapsed:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn single_page_needs_no_pacing() {
        let (_, aggregator) = aggregator(FakeCatalog::with_pages(1, 25));

        let started = Instant::now();
        let pool = aggregator.fetch_many(10).await;

        assert_eq!(pool.len(), 10);
        assert!(started.elapsed() < DEFAULT_PAGE_PACING);
    }

    #[tokio::test(start_paused = true)]
    async fn duplicates_across_pages_pass_through() {
        let mut catalog = FakeCatalog::default();
        catalog.pages = vec![items(1, 3), items(3, 3)];
        let (_, aggregator) = aggregator(catalog);

        let ids: Vec<u64> = aggregator.fetch_many(6).await.iter().map(|i| i.id).collect();

        assert_eq!(ids, vec![1, 2, 3, 3, 4, 5]);
    }

    #[tokio::test(start_paused = true)]
    async fn custom_limits_apply() {
        let (catalog, aggregator) = aggregator(FakeCatalog::with_pages(5, 10));
        let aggregator = aggregator.with_limits(2, Duration::from_millis(50));

        let started = Instant::now();
        let pool = aggregator.fetch_many(100).await;

        assert_eq!(pool.len(), 20);
        assert_eq!(catalog.top_calls(), vec![1, 2]);
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(50) && elapsed < Duration::from_millis(100), "{elapsed:?}");
    }
}
