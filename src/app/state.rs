//! Listing state and its derived view.
//!
//! [`ViewState`] is the persisted part: the fetched pool plus the criteria the
//! user picked. [`ListingState`] wraps it with the page it belongs to and the
//! load phase. The displayed list is never stored; it is recomputed from the
//! state by [`ListingState::displayed`].

use super::modes::{ListingPhase, PageKind, SortKey, SourceFilter};
use super::view::derive_view;
use crate::domain::CatalogItem;

/// Raw pool plus the filter, sort, and search criteria applied to it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    /// Items in fetch order.
    pub pool: Vec<CatalogItem>,

    /// Search box contents, exactly as typed.
    pub query: String,

    /// Selected genres in insertion order; never holds duplicates.
    pub selected_genres: Vec<String>,

    pub source: SourceFilter,

    pub sort: SortKey,
}

impl ViewState {
    /// Adds `genre` if absent, removes it if present.
    ///
    /// Returns `true` if the genre is selected afterwards.
    pub fn toggle_genre(&mut self, genre: &str) -> bool {
        if let Some(index) = self.selected_genres.iter().position(|g| g == genre) {
            self.selected_genres.remove(index);
            false
        } else {
            self.selected_genres.push(genre.to_string());
            true
        }
    }

    /// Copies the criteria (not the pool) from `other`.
    pub fn adopt_criteria(&mut self, other: &Self) {
        self.query.clone_from(&other.query);
        self.selected_genres.clone_from(&other.selected_genres);
        self.source = other.source;
        self.sort = other.sort;
    }
}

/// State of one listing page.
#[derive(Debug, Clone)]
pub struct ListingState {
    pub page: PageKind,
    pub view: ViewState,
    pub phase: ListingPhase,
}

impl ListingState {
    #[must_use]
    pub fn new(page: PageKind) -> Self {
        Self {
            page,
            view: ViewState::default(),
            phase: ListingPhase::Uninitialized,
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.phase == ListingPhase::Loading
    }

    /// The genre picked on the genres page, if any.
    #[must_use]
    pub fn picked_genre(&self) -> Option<&str> {
        self.view.selected_genres.first().map(String::as_str)
    }

    /// Items to show, derived from the pool and the page's criteria.
    ///
    /// - Browse applies genres, source, and sort. Its query drives a remote
    ///   search instead of a local filter.
    /// - Ranking filters titles by the query and keeps rank order.
    /// - Genres shows search results in the order they arrived.
    #[must_use]
    pub fn displayed(&self) -> Vec<CatalogItem> {
        let view = &self.view;
        match self.page {
            PageKind::Browse => derive_view(&view.pool, None, &view.selected_genres, view.source, view.sort),
            PageKind::Ranking => {
                derive_view(&view.pool, Some(&view.query), &[], SourceFilter::All, SortKey::Rank)
            }
            PageKind::Genres => view.pool.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggling_keeps_set_semantics_and_order() {
        let mut view = ViewState::default();

        assert!(view.toggle_genre("Action"));
        assert!(view.toggle_genre("Drama"));
        assert!(view.toggle_genre("Comedy"));
        assert!(!view.toggle_genre("Drama"));

        assert_eq!(view.selected_genres, vec!["Action", "Comedy"]);
    }

    #[test]
    fn genres_page_keeps_fetch_order() {
        let mut state = ListingState::new(PageKind::Genres);
        state.view.pool = vec![
            CatalogItem::new(1, "unranked"),
            CatalogItem::new(2, "ranked").with_rank(1),
        ];
        state.view.selected_genres = vec!["Horror".into()];

        let titles: Vec<_> = state.displayed().into_iter().map(|i| i.title).collect();

        assert_eq!(titles, vec!["unranked", "ranked"]);
    }

    #[test]
    fn browse_ignores_query_when_deriving() {
        let mut state = ListingState::new(PageKind::Browse);
        state.view.pool = vec![CatalogItem::new(1, "Solo Leveling")];
        state.view.query = "nothing like it".into();

        assert_eq!(state.displayed().len(), 1);
    }

    #[test]
    fn ranking_filters_by_title() {
        let mut state = ListingState::new(PageKind::Ranking);
        state.view.pool = vec![
            CatalogItem::new(1, "Solo Leveling").with_rank(1),
            CatalogItem::new(2, "Tower of God").with_rank(2),
        ];
        state.view.query = "tower".into();

        let shown = state.displayed();

        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].id, 2);
    }
}
