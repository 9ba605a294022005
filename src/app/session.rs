//! Runs listing events against real collaborators.
//!
//! [`ListingSession`] owns a page's [`ListingState`] and everything needed to
//! execute the handler's [`Action`]s. Dispatching an event runs the handler,
//! executes each action in order, feeds fetch results back in as
//! [`Event::ItemsLoaded`], and stops once no actions remain.

use super::handler::{handle_event, Event};
use super::modes::PageKind;
use super::state::ListingState;
use super::Action;
use crate::catalog::{Aggregator, CatalogSource};
use crate::domain::error::Result;
use crate::domain::CatalogItem;
use crate::storage::{KeyValueStore, ViewStore};
use crate::suggest::SuggestionDebouncer;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::watch;

/// Event loop for one listing page.
pub struct ListingSession<S, K> {
    state: ListingState,
    source: Arc<S>,
    aggregator: Aggregator<S>,
    store: ViewStore<K>,
    debouncer: Option<SuggestionDebouncer<S>>,
}

impl<S, K> ListingSession<S, K>
where
    S: CatalogSource + 'static,
    K: KeyValueStore,
{
    pub fn new(page: PageKind, source: Arc<S>, aggregator: Aggregator<S>, store: ViewStore<K>) -> Self {
        Self {
            state: ListingState::new(page),
            source,
            aggregator,
            store,
            debouncer: None,
        }
    }

    /// Routes `Suggest` actions to `debouncer`. Without one they are dropped.
    #[must_use]
    pub fn with_debouncer(mut self, debouncer: SuggestionDebouncer<S>) -> Self {
        self.debouncer = Some(debouncer);
        self
    }

    #[must_use]
    pub const fn state(&self) -> &ListingState {
        &self.state
    }

    #[must_use]
    pub fn displayed(&self) -> Vec<CatalogItem> {
        self.state.displayed()
    }

    pub const fn store(&self) -> &ViewStore<K> {
        &self.store
    }

    /// Receiver for live suggestions, if a debouncer is attached.
    #[must_use]
    pub fn suggestions(&self) -> Option<watch::Receiver<Vec<CatalogItem>>> {
        self.debouncer.as_ref().map(SuggestionDebouncer::subscribe)
    }

    /// Opens the page: restores persisted state, then fetches if needed.
    ///
    /// When no pool is cached, the persisted criteria are still applied
    /// before the fresh fetch.
    ///
    /// # Errors
    ///
    /// Returns an error if the view store cannot be read or written.
    pub async fn mount(&mut self, initial_query: Option<String>) -> Result<bool> {
        let page = self.state.page;
        let persisted = self.store.load(page)?;

        if persisted.is_none() {
            let criteria = self.store.load_criteria(page)?;
            self.state.view.adopt_criteria(&criteria);
        }

        self.dispatch(Event::Mount { persisted, initial_query }).await
    }

    /// Handles `event` and every follow-up it causes.
    ///
    /// Returns whether any step asked for a re-render.
    ///
    /// # Errors
    ///
    /// Returns the first handler or storage error; remaining actions are
    /// abandoned.
    pub async fn dispatch(&mut self, event: Event) -> Result<bool> {
        let mut queue = VecDeque::from([event]);
        let mut render = false;

        while let Some(event) = queue.pop_front() {
            let (needs_render, actions) = handle_event(&mut self.state, &event)?;
            render |= needs_render;

            for action in actions {
                if let Some(follow_up) = self.run(action).await? {
                    queue.push_back(follow_up);
                }
            }
        }

        Ok(render)
    }

    async fn run(&mut self, action: Action) -> Result<Option<Event>> {
        let page = self.state.page;
        tracing::trace!(page = page.key_prefix(), action = ?action, "running action");

        match action {
            Action::LoadTop { target } => {
                let items = self.aggregator.fetch_many(target).await;
                Ok(Some(Event::ItemsLoaded(items)))
            }
            Action::Search { query } => {
                let items = self.source.search(&query).await;
                Ok(Some(Event::ItemsLoaded(items)))
            }
            Action::Persist => {
                self.store.save(page, &self.state.view)?;
                Ok(None)
            }
            Action::ClearPersisted => {
                self.store.clear(page)?;
                Ok(None)
            }
            Action::Suggest { query } => {
                if let Some(debouncer) = self.debouncer.as_mut() {
                    debouncer.on_query_changed(&query);
                }
                Ok(None)
            }
        }
    }
}
