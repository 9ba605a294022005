//! Side effects requested by the event handler.
//!
//! The handler never performs I/O. It returns [`Action`]s and the session
//! driver executes them: fetches through the aggregator or the catalog
//! client, writes through the view store, and suggestion lookups through the
//! debouncer. Fetch results come back as
//! [`Event::ItemsLoaded`](super::Event::ItemsLoaded).

/// A side effect to execute after an event was handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Assemble a pool of `target` items from the top list.
    LoadTop {
        /// Number of items wanted.
        target: usize,
    },

    /// Replace the pool with remote search results.
    Search {
        /// Non-empty search text.
        query: String,
    },

    /// Write the current view state to the page's persisted keys.
    Persist,

    /// Drop every persisted key of the page.
    ClearPersisted,

    /// Feed the live query to the suggestion debouncer.
    Suggest {
        /// Query text as typed.
        query: String,
    },
}
