//! Shared rendering utilities.
//!
//! Everything here works on character indices, not bytes, so titles with
//! non-ASCII text (Korean, accented romanizations) pad and highlight cleanly.

use crate::ui::theme::Theme;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// Character ranges of `text` matched by `query`, as `(start, end)` pairs.
///
/// Matching is Skim-style fuzzy and case-insensitive. Adjacent matched
/// characters are merged into one range. An empty or unmatched query yields
/// no ranges.
///
/// ```
/// use manhwadex::ui::helpers::match_ranges;
///
/// assert_eq!(match_ranges("Solo Leveling", "solo"), vec![(0, 4)]);
/// assert!(match_ranges("Solo Leveling", "").is_empty());
/// ```
#[must_use]
pub fn match_ranges(text: &str, query: &str) -> Vec<(usize, usize)> {
    let query = query.trim();
    if query.is_empty() {
        return Vec::new();
    }

    let matcher = SkimMatcherV2::default().ignore_case();
    let Some((_, indices)) = matcher.fuzzy_indices(text, query) else {
        return Vec::new();
    };

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for index in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == index => *end += 1,
            _ => ranges.push((index, index + 1)),
        }
    }
    ranges
}

/// Appends `text` to `out`, styling the given character ranges.
pub fn push_highlighted(out: &mut String, text: &str, ranges: &[(usize, usize)], theme: &Theme) {
    if ranges.is_empty() {
        out.push_str(text);
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < current_pos || start >= end {
            continue;
        }

        out.extend(&chars[current_pos..start]);
        out.push_str(&theme.fg(&theme.colors.match_highlight_fg));
        out.push_str(&theme.bg(&theme.colors.match_highlight_bg));
        out.extend(&chars[start..end]);
        out.push_str(theme.reset());

        current_pos = end;
    }

    out.extend(&chars[current_pos..]);
}

/// Shortens `text` to at most `width` characters, marking the cut with `...`.
///
/// ```
/// use manhwadex::ui::helpers::truncate;
///
/// assert_eq!(truncate("Omniscient Reader", 10), "Omnisci...");
/// assert_eq!(truncate("Lookism", 10), "Lookism");
/// ```
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width <= 3 {
        return text.chars().take(width).collect();
    }
    let mut cut: String = text.chars().take(width - 3).collect();
    cut.push_str("...");
    cut
}

/// Right-pads `text` with spaces to `width` characters.
#[must_use]
pub fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{text}{}", " ".repeat(width.saturating_sub(len)))
}

/// Left padding needed to center `len` characters in `cols`.
#[must_use]
pub const fn center_offset(len: usize, cols: usize) -> usize {
    cols.saturating_sub(len) / 2
}

/// Appends a horizontal rule followed by a newline.
pub fn push_rule(out: &mut String, theme: &Theme, cols: usize) {
    out.push_str(&theme.fg(&theme.colors.border));
    out.push_str(&"─".repeat(cols));
    out.push_str(theme.reset());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranges_merge_adjacent_characters() {
        let ranges = match_ranges("Tower of God", "tower");
        assert_eq!(ranges, vec![(0, 5)]);
    }

    #[test]
    fn unmatched_query_has_no_ranges() {
        assert!(match_ranges("Lookism", "xyz").is_empty());
    }

    #[test]
    fn highlighting_with_plain_theme_preserves_text() {
        let mut out = String::new();
        push_highlighted(&mut out, "나 혼자만 레벨업", &[(0, 1), (2, 5)], &Theme::plain());
        assert_eq!(out, "나 혼자만 레벨업");
    }

    #[test]
    fn highlighting_wraps_ranges_in_escapes() {
        let theme = Theme::default();
        let mut out = String::new();
        push_highlighted(&mut out, "abc", &[(1, 2)], &theme);

        let expected = format!(
            "a{}{}b{}c",
            theme.fg(&theme.colors.match_highlight_fg),
            theme.bg(&theme.colors.match_highlight_bg),
            theme.reset()
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate("전지적 독자 시점", 5), "전지...");
        assert_eq!(pad("전지", 4), "전지  ");
    }
}
