//! Suggestion box shown under the search input.

use crate::ui::helpers::{push_highlighted, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SuggestionRow;

const BOX_MARGIN: usize = 2;

/// Appends a bordered box with the query on top and one suggestion per line.
///
/// Nothing is drawn when there are no suggestions.
pub fn render_suggestion_box(out: &mut String, query: &str, rows: &[SuggestionRow], theme: &Theme, cols: usize) {
    if rows.is_empty() {
        return;
    }

    let box_width = cols.saturating_sub(BOX_MARGIN * 2).max(20);
    let inner_width = box_width.saturating_sub(2);
    let margin = " ".repeat(BOX_MARGIN);
    let border = theme.fg(&theme.colors.border);

    out.push_str(&margin);
    out.push_str(&border);
    out.push_str(&format!("┌{}┐", "─".repeat(inner_width)));
    out.push_str(theme.reset());
    out.push('\n');

    let search_text = truncate(&format!(" Search: {query}"), inner_width);
    push_boxed_line(out, &margin, &border, theme, inner_width, |out| {
        out.push_str(&search_text);
        search_text.chars().count()
    });

    for row in rows {
        let score = format!("  {}", row.score);
        let title_room = inner_width.saturating_sub(score.chars().count() + 1);
        let title = truncate(&row.title, title_room);
        let visible = title.chars().count();
        let ranges: Vec<(usize, usize)> = row
            .highlight_ranges
            .iter()
            .filter(|(start, _)| *start < visible)
            .map(|&(start, end)| (start, end.min(visible)))
            .collect();

        push_boxed_line(out, &margin, &border, theme, inner_width, |out| {
            out.push(' ');
            push_highlighted(out, &title, &ranges, theme);
            out.push_str(&theme.fg(&theme.colors.score_fg));
            out.push_str(&score);
            out.push_str(&theme.fg(&theme.colors.text_normal));
            1 + visible + score.chars().count()
        });
    }

    out.push_str(&margin);
    out.push_str(&border);
    out.push_str(&format!("└{}┘", "─".repeat(inner_width)));
    out.push_str(theme.reset());
    out.push('\n');
}

/// Draws `│ content │`, where `content` returns how many columns it used.
fn push_boxed_line(
    out: &mut String,
    margin: &str,
    border: &str,
    theme: &Theme,
    inner_width: usize,
    content: impl FnOnce(&mut String) -> usize,
) {
    out.push_str(margin);
    out.push_str(border);
    out.push('│');
    out.push_str(&theme.fg(&theme.colors.text_normal));
    let used = content(out);
    out.push_str(&" ".repeat(inner_width.saturating_sub(used)));
    out.push_str(border);
    out.push('│');
    out.push_str(theme.reset());
    out.push('\n');
}
