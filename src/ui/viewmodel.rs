//! Display-ready view models.
//!
//! View models are computed from application state and consumed by the
//! components. They hold no logic, only strings and highlight ranges.

use crate::app::{ListingState, PageKind, SortKey, SourceFilter};
use crate::domain::CatalogItem;
use crate::ui::helpers::match_ranges;

/// A listing page ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingViewModel {
    pub header: HeaderInfo,
    pub rows: Vec<ListingRow>,
    pub empty_state: Option<EmptyState>,
    pub footer: FooterInfo,
}

/// One title in a listing table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRow {
    /// 1-based position in the displayed list.
    pub position: usize,
    pub id: u64,
    pub title: String,
    pub genre: String,
    pub author: String,
    pub score: String,
    pub chapters: String,
    /// Global rank as `#N`, or `-` when unranked.
    pub rank: String,
    pub is_webtoon: bool,
    /// Character ranges of `title` to highlight.
    pub highlight_ranges: Vec<(usize, usize)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
    /// Active criteria, e.g. `genres: Action, Drama | source: webtoon | sort: score`.
    pub subtitle: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub summary: String,
}

/// Centered message shown instead of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

/// One row of the live suggestion box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionRow {
    pub id: u64,
    pub title: String,
    pub score: String,
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// A single title's detail page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailViewModel {
    pub title: String,
    /// Label and value pairs, in display order.
    pub facts: Vec<(&'static str, String)>,
    pub synopsis: String,
}

const fn source_label(source: SourceFilter) -> &'static str {
    match source {
        SourceFilter::All => "all",
        SourceFilter::Webtoon => "webtoon",
        SourceFilter::NonWebtoon => "MAL top",
    }
}

fn criteria_line(state: &ListingState) -> String {
    let view = &state.view;
    match state.page {
        PageKind::Browse => {
            let mut parts = Vec::new();
            if !view.query.trim().is_empty() {
                parts.push(format!("search: {}", view.query.trim()));
            }
            if !view.selected_genres.is_empty() {
                parts.push(format!("genres: {}", view.selected_genres.join(", ")));
            }
            parts.push(format!("source: {}", source_label(view.source)));
            parts.push(format!(
                "sort: {}",
                match view.sort {
                    SortKey::Rank => "rank",
                    SortKey::Score => "score",
                }
            ));
            parts.join(" | ")
        }
        PageKind::Genres => state
            .picked_genre()
            .map_or_else(|| "top titles".to_string(), |g| format!("genre: {g}")),
        PageKind::Ranking if view.query.is_empty() => "all ranked titles".to_string(),
        PageKind::Ranking => format!("filter: {}", view.query),
    }
}

fn listing_row(position: usize, item: &CatalogItem, highlight_query: Option<&str>) -> ListingRow {
    ListingRow {
        position,
        id: item.id,
        title: item.title.clone(),
        genre: item.primary_genre().to_string(),
        author: item.primary_author().unwrap_or("Unknown").to_string(),
        score: item.score_label(),
        chapters: item.chapters_label(),
        rank: item.rank.map_or_else(|| "-".to_string(), |r| format!("#{r}")),
        is_webtoon: item.is_webtoon(),
        highlight_ranges: highlight_query.map(|q| match_ranges(&item.title, q)).unwrap_or_default(),
    }
}

/// Builds the view model for a listing page.
///
/// Only the ranking page highlights titles, since it is the only page whose
/// query filters locally.
#[must_use]
pub fn compute_listing(state: &ListingState) -> ListingViewModel {
    let _span = tracing::debug_span!("compute_listing", page = state.page.key_prefix()).entered();

    let header = HeaderInfo {
        title: state.page.title().to_string(),
        subtitle: criteria_line(state),
    };
    let displayed = state.displayed();

    let empty_state = if state.is_loading() {
        Some(EmptyState {
            message: "Loading...".to_string(),
            subtitle: "Fetching titles from the catalog".to_string(),
        })
    } else if displayed.is_empty() {
        Some(EmptyState {
            message: "No manhwa found".to_string(),
            subtitle: match state.page {
                PageKind::Browse => "Try another search or clear the filters with --reset",
                PageKind::Genres => "Pick another genre",
                PageKind::Ranking => "No ranked title matches that filter",
            }
            .to_string(),
        })
    } else {
        None
    };

    let highlight_query = (state.page == PageKind::Ranking).then_some(state.view.query.as_str());
    let rows: Vec<ListingRow> = displayed
        .iter()
        .enumerate()
        .map(|(i, item)| listing_row(i + 1, item, highlight_query))
        .collect();

    let footer = FooterInfo {
        summary: format!("{} of {} titles", rows.len(), state.view.pool.len()),
    };

    ListingViewModel {
        header,
        rows,
        empty_state,
        footer,
    }
}

/// Builds suggestion rows for `items`, highlighting matches of `query`.
#[must_use]
pub fn compute_suggestions(query: &str, items: &[CatalogItem]) -> Vec<SuggestionRow> {
    items
        .iter()
        .map(|item| SuggestionRow {
            id: item.id,
            title: item.title.clone(),
            score: item.score_label(),
            highlight_ranges: match_ranges(&item.title, query),
        })
        .collect()
}

/// Builds the detail page for `item`.
#[must_use]
pub fn compute_detail(item: &CatalogItem) -> DetailViewModel {
    let join_or = |values: &[String], fallback: &str| {
        if values.is_empty() {
            fallback.to_string()
        } else {
            values.join(", ")
        }
    };

    let mut facts = vec![
        ("Score", item.score_label()),
        ("Rank", item.rank.map_or_else(|| "N/A".to_string(), |r| format!("#{r}"))),
        ("Chapters", item.chapters_label()),
        ("Status", if item.status.is_empty() { "Unknown".to_string() } else { item.status.clone() }),
        ("Authors", join_or(&item.authors, "Unknown")),
        ("Genres", join_or(&item.genres, item.primary_genre())),
    ];
    if item.is_webtoon() {
        facts.push(("Format", "Webtoon".to_string()));
    }

    DetailViewModel {
        title: item.title.clone(),
        facts,
        synopsis: item
            .synopsis
            .clone()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| "No synopsis available.".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::ListingPhase;

    fn ready(page: PageKind, pool: Vec<CatalogItem>) -> ListingState {
        let mut state = ListingState::new(page);
        state.view.pool = pool;
        state.phase = ListingPhase::Ready;
        state
    }

    #[test]
    fn loading_shows_empty_state() {
        let mut state = ListingState::new(PageKind::Browse);
        state.phase = ListingPhase::Loading;

        let vm = compute_listing(&state);

        assert_eq!(vm.empty_state.unwrap().message, "Loading...");
    }

    #[test]
    fn rows_follow_display_conventions() {
        let mut item = CatalogItem::new(1, "Lookism").with_genres(["Drama", "School"]).with_rank(12);
        item.authors = vec!["Park, Tae-jun".into(), "Other".into()];
        let state = ready(PageKind::Browse, vec![item, CatalogItem::new(2, "Unranked")]);

        let vm = compute_listing(&state);

        assert!(vm.empty_state.is_none());
        assert_eq!(vm.rows[0].genre, "Drama");
        assert_eq!(vm.rows[0].author, "Park, Tae-jun");
        assert_eq!(vm.rows[0].rank, "#12");
        assert_eq!(vm.rows[1].rank, "-");
        assert_eq!(vm.rows[1].genre, "Action");
        assert_eq!(vm.footer.summary, "2 of 2 titles");
    }

    #[test]
    fn ranking_filter_highlights_titles() {
        let mut state = ready(
            PageKind::Ranking,
            vec![CatalogItem::new(1, "Tower of God").with_rank(1), CatalogItem::new(2, "Lookism").with_rank(2)],
        );
        state.view.query = "tower".to_string();

        let vm = compute_listing(&state);

        assert_eq!(vm.rows.len(), 1);
        assert_eq!(vm.rows[0].highlight_ranges, vec![(0, 5)]);
        assert_eq!(vm.header.subtitle, "filter: tower");
        assert_eq!(vm.footer.summary, "1 of 2 titles");
    }

    #[test]
    fn browse_subtitle_lists_criteria() {
        let mut state = ready(PageKind::Browse, vec![]);
        state.view.selected_genres = vec!["Action".into(), "Drama".into()];
        state.view.source = SourceFilter::Webtoon;
        state.view.sort = SortKey::Score;

        let vm = compute_listing(&state);

        assert_eq!(vm.header.subtitle, "genres: Action, Drama | source: webtoon | sort: score");
        assert_eq!(vm.empty_state.unwrap().message, "No manhwa found");
    }

    #[test]
    fn detail_falls_back_for_missing_fields() {
        let vm = compute_detail(&CatalogItem::new(5, "Nano Machine"));

        assert_eq!(vm.synopsis, "No synopsis available.");
        assert!(vm.facts.contains(&("Score", "N/A".to_string())));
        assert!(vm.facts.contains(&("Authors", "Unknown".to_string())));
        assert!(!vm.facts.iter().any(|(label, _)| *label == "Format"));
    }
}
