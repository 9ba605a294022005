//! Listing table.
//!
//! ```text
//! #    TITLE                         GENRE          SCORE   CH    RANK
//! 1    Solo Leveling                 Action         8.70    201   #31
//! ```
//!
//! The title column takes whatever width the fixed columns leave over.

use crate::ui::helpers::{pad, push_highlighted, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ListingRow;

const POSITION_WIDTH: usize = 5;
const GENRE_WIDTH: usize = 15;
const SCORE_WIDTH: usize = 8;
const CHAPTERS_WIDTH: usize = 6;
const RANK_WIDTH: usize = 8;
const MIN_TITLE_WIDTH: usize = 12;

fn title_width(cols: usize) -> usize {
    cols.saturating_sub(POSITION_WIDTH + GENRE_WIDTH + SCORE_WIDTH + CHAPTERS_WIDTH + RANK_WIDTH)
        .max(MIN_TITLE_WIDTH)
}

pub fn render_table_headers(out: &mut String, theme: &Theme, cols: usize) {
    out.push_str(theme.bold());
    out.push_str(&theme.fg(&theme.colors.header_fg));
    out.push_str(&pad("#", POSITION_WIDTH));
    out.push_str(&pad("TITLE", title_width(cols)));
    out.push_str(&pad("GENRE", GENRE_WIDTH));
    out.push_str(&pad("SCORE", SCORE_WIDTH));
    out.push_str(&pad("CH", CHAPTERS_WIDTH));
    out.push_str("RANK");
    out.push_str(theme.reset());
    out.push('\n');
}

pub fn render_table_rows(out: &mut String, rows: &[ListingRow], theme: &Theme, cols: usize) {
    for row in rows {
        render_table_row(out, row, theme, cols);
    }
}

/// Webtoons get a marker after the position so the source filter is visible
/// at a glance.
fn render_table_row(out: &mut String, row: &ListingRow, theme: &Theme, cols: usize) {
    let width = title_width(cols);
    let cell_width = width.saturating_sub(2);

    out.push_str(&theme.fg(&theme.colors.text_dim));
    let marker = if row.is_webtoon { "*" } else { "" };
    out.push_str(&pad(&format!("{}{marker}", row.position), POSITION_WIDTH));
    out.push_str(theme.reset());

    let title = truncate(&row.title, cell_width);
    let visible = if title == row.title { cell_width } else { cell_width.saturating_sub(3) };
    let ranges: Vec<(usize, usize)> = row
        .highlight_ranges
        .iter()
        .filter(|(start, _)| *start < visible)
        .map(|&(start, end)| (start, end.min(visible)))
        .collect();

    out.push_str(&theme.fg(&theme.colors.text_normal));
    push_highlighted(out, &title, &ranges, theme);
    out.push_str(&theme.fg(&theme.colors.text_normal));
    out.push_str(&" ".repeat(width.saturating_sub(title.chars().count())));

    out.push_str(&pad(&truncate(&row.genre, GENRE_WIDTH - 1), GENRE_WIDTH));

    out.push_str(&theme.fg(&theme.colors.score_fg));
    out.push_str(&pad(&row.score, SCORE_WIDTH));

    out.push_str(&theme.fg(&theme.colors.text_normal));
    out.push_str(&pad(&row.chapters, CHAPTERS_WIDTH));

    out.push_str(&theme.fg(&theme.colors.rank_fg));
    out.push_str(&row.rank);
    out.push_str(theme.reset());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(title: &str) -> ListingRow {
        ListingRow {
            position: 1,
            id: 1,
            title: title.to_string(),
            genre: "Action".to_string(),
            author: "Chugong".to_string(),
            score: "8.70".to_string(),
            chapters: "201".to_string(),
            rank: "#31".to_string(),
            is_webtoon: true,
            highlight_ranges: vec![],
        }
    }

    #[test]
    fn row_lays_out_fixed_columns() {
        let mut out = String::new();
        render_table_rows(&mut out, &[row("Solo Leveling")], &Theme::plain(), 80);

        let expected = format!(
            "1*   {}Action         8.70    201   #31\n",
            pad("Solo Leveling", title_width(80))
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn long_titles_are_truncated() {
        let mut out = String::new();
        let long = "A".repeat(200);
        render_table_rows(&mut out, &[row(&long)], &Theme::plain(), 60);

        assert!(out.contains("..."));
        assert!(out.trim_end().ends_with("#31"));
    }
}
