//! Search-as-you-type suggestions.
//!
//! - `timer`: cancellable single-shot timer abstraction
//! - `debouncer`: settle-window debouncing on top of a catalog source

pub mod debouncer;
pub mod timer;

pub use debouncer::{SuggestionBox, SuggestionDebouncer, DEFAULT_SETTLE_WINDOW, MIN_QUERY_CHARS};
pub use timer::{Scheduler, TokioScheduler, TokioTimer};
