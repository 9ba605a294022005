//! Composable UI components.
//!
//! Each component appends its lines to a `String` buffer. Page layouts are
//! assembled in [`crate::ui::renderer`].
//!
//! # Components
//!
//! - `header`: page title and criteria line
//! - `table`: listing rows (`#`, TITLE, GENRE, SCORE, CH, RANK)
//! - `search`: suggestion box
//! - `detail`: single-title page
//! - `community`: forum threads and reading lists
//! - `empty`: loading, empty, and not-found messages
//! - `notice`: notifications and errors
//! - `footer`: list summary

mod community;
mod detail;
mod empty;
mod footer;
mod header;
mod notice;
mod search;
mod table;

pub use community::{render_reading_list, render_threads};
pub use detail::render_detail;
pub use empty::render_empty_state;
pub use notice::{render_error, render_notice};
pub use search::render_suggestion_box;

use crate::ui::helpers::push_rule;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ListingViewModel;

use footer::render_footer;
use header::render_header;
use table::{render_table_headers, render_table_rows};

/// Appends a full listing page.
///
/// ```text
/// [Header]
/// [Criteria]
/// [Rule]
/// [Table headers]      or   [Empty state]
/// [Table rows]
/// [Rule]
/// [Footer]
/// ```
pub fn render_listing(out: &mut String, vm: &ListingViewModel, theme: &Theme, cols: usize) {
    render_header(out, &vm.header, theme, cols);
    push_rule(out, theme, cols);

    if let Some(empty) = &vm.empty_state {
        render_empty_state(out, empty, theme, cols);
    } else {
        render_table_headers(out, theme, cols);
        render_table_rows(out, &vm.rows, theme, cols);
    }

    push_rule(out, theme, cols);
    render_footer(out, &vm.footer, theme, cols);
}
