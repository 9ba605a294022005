//! Page-level rendering entry points.
//!
//! Each function computes the view model for its page and returns the whole
//! page as one string, ready to print. Nothing here touches the terminal.

use crate::app::ListingState;
use crate::community::{ForumThread, ReadingEntry};
use crate::domain::{CatalogError, CatalogItem};
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{compute_detail, compute_listing, compute_suggestions, EmptyState};

/// Renders a listing page (browse, genres, or ranking).
#[must_use]
pub fn render_listing(state: &ListingState, theme: &Theme, cols: usize) -> String {
    let vm = compute_listing(state);
    let mut out = String::new();
    components::render_listing(&mut out, &vm, theme, cols);
    out
}

/// Renders the detail page for `item`, or the not-found page when it is
/// missing or hidden by the content policy.
#[must_use]
pub fn render_detail(id: u64, item: Option<&CatalogItem>, theme: &Theme, cols: usize) -> String {
    let mut out = String::new();
    match item {
        Some(item) => components::render_detail(&mut out, &compute_detail(item), theme, cols),
        None => {
            let not_found = EmptyState {
                message: "Manhwa not found".to_string(),
                subtitle: format!("No title with id {id} is available"),
            };
            components::render_empty_state(&mut out, &not_found, theme, cols);
        }
    }
    out
}

/// Renders the suggestion box for `query`.
///
/// Returns an empty string when there is nothing to suggest.
#[must_use]
pub fn render_suggestions(query: &str, items: &[CatalogItem], theme: &Theme, cols: usize) -> String {
    let rows = compute_suggestions(query, items);
    let mut out = String::new();
    components::render_suggestion_box(&mut out, query, &rows, theme, cols);
    out
}

#[must_use]
pub fn render_threads(threads: &[(String, ForumThread)], theme: &Theme, cols: usize) -> String {
    let mut out = String::new();
    if threads.is_empty() {
        let empty = EmptyState {
            message: "No discussions yet".to_string(),
            subtitle: "Start one with `forum post`".to_string(),
        };
        components::render_empty_state(&mut out, &empty, theme, cols);
    } else {
        components::render_threads(&mut out, threads, theme, cols);
    }
    out
}

#[must_use]
pub fn render_reading_list(entries: &[ReadingEntry], theme: &Theme, cols: usize) -> String {
    let mut out = String::new();
    if entries.is_empty() {
        let empty = EmptyState {
            message: "Your reading list is empty".to_string(),
            subtitle: "Add a title with `list set`".to_string(),
        };
        components::render_empty_state(&mut out, &empty, theme, cols);
    } else {
        components::render_reading_list(&mut out, entries, theme, cols);
    }
    out
}

/// Renders a one-line notification.
#[must_use]
pub fn render_notice(title: &str, description: &str, theme: &Theme) -> String {
    let mut out = String::new();
    components::render_notice(&mut out, title, description, theme);
    out
}

/// Renders an error: validation failures as notifications, anything else as
/// an error line.
#[must_use]
pub fn render_failure(error: &CatalogError, theme: &Theme) -> String {
    let mut out = String::new();
    match error {
        CatalogError::Validation { title, description } => {
            components::render_notice(&mut out, title, description, theme);
        }
        other => components::render_error(&mut out, &other.to_string(), theme),
    }
    out
}
