//! Debounced search suggestions.
//!
//! Each keystroke calls [`SuggestionDebouncer::on_query_changed`]. Any pending
//! search is cancelled; short queries clear the suggestions on the spot; longer
//! ones schedule a single search once typing settles. A search that already
//! started is not aborted, but its results are discarded if the query changed
//! while it was in flight.

use super::timer::{Scheduler, TokioScheduler};
use crate::catalog::CatalogSource;
use crate::domain::CatalogItem;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Quiet period after the last keystroke before a search runs.
pub const DEFAULT_SETTLE_WINDOW: Duration = Duration::from_millis(300);

/// Queries shorter than this (in characters) never hit the network.
pub const MIN_QUERY_CHARS: usize = 2;

/// Which search box the suggestions feed; decides how many are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionBox {
    /// The large search field on the browse page.
    Full,
    /// The navigation bar search field.
    Compact,
}

impl SuggestionBox {
    #[must_use]
    pub const fn limit(self) -> usize {
        match self {
            Self::Full => 8,
            Self::Compact => 5,
        }
    }
}

/// Turns a stream of query edits into at most one search per burst.
pub struct SuggestionDebouncer<S, T: Scheduler = TokioScheduler> {
    source: Arc<S>,
    scheduler: T,
    window: Duration,
    limit: usize,
    pending: Option<T::Handle>,
    generation: Arc<AtomicU64>,
    suggestions: Arc<watch::Sender<Vec<CatalogItem>>>,
}

impl<S: CatalogSource + 'static> SuggestionDebouncer<S, TokioScheduler> {
    /// Creates a debouncer on the tokio runtime with the default window.
    pub fn new(source: Arc<S>, target: SuggestionBox) -> Self {
        Self::with_scheduler(source, TokioScheduler, target)
    }
}

impl<S: CatalogSource + 'static, T: Scheduler> SuggestionDebouncer<S, T> {
    /// Creates a debouncer driven by a custom scheduler.
    pub fn with_scheduler(source: Arc<S>, scheduler: T, target: SuggestionBox) -> Self {
        let (tx, _rx) = watch::channel(Vec::new());
        Self {
            source,
            scheduler,
            window: DEFAULT_SETTLE_WINDOW,
            limit: target.limit(),
            pending: None,
            generation: Arc::new(AtomicU64::new(0)),
            suggestions: Arc::new(tx),
        }
    }

    /// Overrides the settle window.
    #[must_use]
    pub const fn with_window(mut self, window: Duration) -> Self {
        self.window = window;
        self
    }

    /// Receiver that observes every suggestion update.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<CatalogItem>> {
        self.suggestions.subscribe()
    }

    /// Snapshot of the current suggestions.
    #[must_use]
    pub fn current(&self) -> Vec<CatalogItem> {
        self.suggestions.borrow().clone()
    }

    /// Handles one edit of the query text.
    pub fn on_query_changed(&mut self, query: &str) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        if query.chars().count() < MIN_QUERY_CHARS {
            tracing::trace!(query = %query, "query too short, clearing suggestions");
            self.suggestions.send_replace(Vec::new());
            return;
        }

        let source = Arc::clone(&self.source);
        let latest = Arc::clone(&self.generation);
        let suggestions = Arc::clone(&self.suggestions);
        let limit = self.limit;
        let query = query.to_owned();

        let task = Box::pin(async move {
            let mut results = source.search(&query).await;

            if latest.load(Ordering::SeqCst) != generation {
                tracing::debug!(query = %query, "suggestions superseded, dropping results");
                return;
            }

            results.truncate(limit);
            tracing::debug!(query = %query, count = results.len(), "suggestions updated");
            suggestions.send_replace(results);
        });

        self.pending = Some(self.scheduler.schedule(self.window, task));
    }
}

impl<S, T: Scheduler> Drop for SuggestionDebouncer<S, T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }
    }
}
