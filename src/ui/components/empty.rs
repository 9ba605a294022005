//! Empty, loading, and not-found messages.

use crate::ui::helpers::center_offset;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Appends a centered two-line message surrounded by blank lines.
///
/// ```text
///
///            No manhwa found
///          Pick another genre
///
/// ```
pub fn render_empty_state(out: &mut String, empty: &EmptyState, theme: &Theme, cols: usize) {
    out.push('\n');

    out.push_str(&theme.fg(&theme.colors.empty_state_fg));
    out.push_str(&" ".repeat(center_offset(empty.message.chars().count(), cols)));
    out.push_str(&empty.message);
    out.push_str(theme.reset());
    out.push('\n');

    out.push_str(theme.dim());
    out.push_str(&theme.fg(&theme.colors.text_dim));
    out.push_str(&" ".repeat(center_offset(empty.subtitle.chars().count(), cols)));
    out.push_str(&empty.subtitle);
    out.push_str(theme.reset());
    out.push('\n');

    out.push('\n');
}
