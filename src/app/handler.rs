//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only place listing state changes. It mutates the
//! [`ListingState`] it is given and returns the [`Action`]s the session driver
//! must run, plus a flag saying whether the page needs to be re-rendered.
//!
//! # Event Types
//!
//! - **Lifecycle**: `Mount`, `ItemsLoaded`
//! - **Search**: `QueryEdited`, `SubmitSearch`
//! - **Criteria**: `ToggleGenre`, `PickGenre`, `SetSource`, `SetSort`, `Reset`
//!
//! # Example
//!
//! ```rust
//! use manhwadex::app::{handle_event, Action, Event, ListingState};
//! use manhwadex::app::modes::PageKind;
//!
//! let mut state = ListingState::new(PageKind::Ranking);
//! let (render, actions) = handle_event(&mut state, &Event::Mount {
//!     persisted: None,
//!     initial_query: None,
//! })?;
//! assert!(render);
//! assert_eq!(actions, vec![Action::LoadTop { target: 200 }]);
//! # Ok::<(), manhwadex::domain::CatalogError>(())
//! ```

use super::modes::{ListingPhase, PageKind, SortKey, SourceFilter};
use super::state::{ListingState, ViewState};
use super::Action;
use crate::domain::error::Result;
use crate::domain::CatalogItem;

/// Something that happened on a listing page.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The page opened.
    Mount {
        /// State restored from the view store; `None` when nothing was cached.
        persisted: Option<ViewState>,
        /// Search text handed over by a deep link (browse only).
        initial_query: Option<String>,
    },

    /// The search box contents changed.
    QueryEdited(String),

    /// The search box was submitted.
    SubmitSearch,

    /// Adds or removes a genre from the browse filter.
    ToggleGenre(String),

    /// Picks a genre on the genres page; picking the current one deselects it.
    PickGenre(String),

    SetSource(SourceFilter),

    SetSort(SortKey),

    /// Clears every criterion and the cache, then reloads.
    Reset,

    /// A fetch finished. Failed fetches arrive as an empty list.
    ItemsLoaded(Vec<CatalogItem>),
}

/// Applies `event` to `state` and returns `(render, actions)`.
///
/// # Errors
///
/// Currently infallible; the `Result` leaves room for events that validate
/// their payload.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut ListingState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event",
        page = state.page.key_prefix(),
        event_type = event_name(event)
    )
    .entered();

    let page = state.page;

    match event {
        Event::Mount { persisted, initial_query } => {
            if let Some(restored) = persisted {
                state.view = restored.clone();
            }

            let deep_link = initial_query
                .as_deref()
                .map(str::trim)
                .filter(|q| !q.is_empty() && page == PageKind::Browse);

            if let Some(query) = deep_link {
                tracing::debug!(query = %query, "mounting with deep-link search");
                state.view.query = query.to_string();
                state.phase = ListingPhase::Loading;
                return Ok((true, vec![Action::Search { query: query.to_string() }]));
            }

            if persisted.is_some() {
                tracing::debug!(cached = state.view.pool.len(), "restored cached pool");
                state.phase = ListingPhase::Ready;
                return Ok((true, vec![]));
            }

            state.phase = ListingPhase::Loading;
            Ok((true, vec![Action::LoadTop { target: page.initial_target() }]))
        }

        Event::QueryEdited(text) => {
            match page {
                PageKind::Genres => Ok((false, vec![])),
                PageKind::Ranking => {
                    state.view.query.clone_from(text);
                    Ok((true, vec![]))
                }
                PageKind::Browse => {
                    state.view.query.clone_from(text);
                    tracing::trace!(query = %text, "search query updated");
                    Ok((true, vec![Action::Persist, Action::Suggest { query: text.clone() }]))
                }
            }
        }

        Event::SubmitSearch => {
            if page != PageKind::Browse {
                return Ok((false, vec![]));
            }

            state.phase = ListingPhase::Loading;
            let hide_suggestions = Action::Suggest { query: String::new() };
            let query = state.view.query.trim();

            if query.is_empty() {
                tracing::debug!("empty search, reloading top list");
                Ok((true, vec![hide_suggestions, Action::LoadTop { target: page.initial_target() }]))
            } else {
                tracing::debug!(query = %query, "search submitted");
                let search = Action::Search { query: query.to_string() };
                Ok((true, vec![hide_suggestions, search]))
            }
        }

        Event::ToggleGenre(genre) => {
            if page != PageKind::Browse {
                return Ok((false, vec![]));
            }
            let selected = state.view.toggle_genre(genre);
            tracing::debug!(genre = %genre, selected, "genre toggled");
            Ok((true, vec![Action::Persist]))
        }

        Event::PickGenre(genre) => {
            if page != PageKind::Genres {
                return Ok((false, vec![]));
            }

            state.phase = ListingPhase::Loading;

            if state.picked_genre() == Some(genre.as_str()) {
                tracing::debug!(genre = %genre, "genre deselected, reloading top list");
                state.view.selected_genres.clear();
                return Ok((true, vec![Action::LoadTop { target: page.initial_target() }]));
            }

            tracing::debug!(genre = %genre, "genre picked");
            state.view.selected_genres = vec![genre.clone()];
            Ok((true, vec![Action::Search { query: genre.clone() }]))
        }

        Event::SetSource(source) => {
            if state.view.source == *source {
                return Ok((false, vec![]));
            }
            state.view.source = *source;
            Ok((true, vec![Action::Persist]))
        }

        Event::SetSort(sort) => {
            if state.view.sort == *sort {
                return Ok((false, vec![]));
            }
            state.view.sort = *sort;
            Ok((true, vec![Action::Persist]))
        }

        Event::Reset => {
            tracing::debug!("resetting criteria and cache");
            state.view = ViewState::default();
            state.phase = ListingPhase::Loading;

            let mut actions = vec![Action::ClearPersisted];
            if page == PageKind::Browse {
                actions.push(Action::Suggest { query: String::new() });
            }
            actions.push(Action::LoadTop { target: page.initial_target() });
            Ok((true, actions))
        }

        Event::ItemsLoaded(items) => {
            tracing::debug!(count = items.len(), "pool replaced");
            state.view.pool.clone_from(items);
            state.phase = ListingPhase::Ready;
            Ok((true, vec![Action::Persist]))
        }
    }
}

const fn event_name(event: &Event) -> &'static str {
    match event {
        Event::Mount { .. } => "mount",
        Event::QueryEdited(_) => "query_edited",
        Event::SubmitSearch => "submit_search",
        Event::ToggleGenre(_) => "toggle_genre",
        Event::PickGenre(_) => "pick_genre",
        Event::SetSource(_) => "set_source",
        Event::SetSort(_) => "set_sort",
        Event::Reset => "reset",
        Event::ItemsLoaded(_) => "items_loaded",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mount(page: PageKind, persisted: Option<ViewState>, initial_query: Option<&str>) -> (ListingState, Vec<Action>) {
        let mut state = ListingState::new(page);
        let event = Event::Mount {
            persisted,
            initial_query: initial_query.map(String::from),
        };
        let (_, actions) = handle_event(&mut state, &event).unwrap();
        (state, actions)
    }

    fn cached() -> ViewState {
        ViewState {
            pool: vec![CatalogItem::new(7, "Cached")],
            query: "cached query".into(),
            selected_genres: vec!["Drama".into()],
            source: SourceFilter::Webtoon,
            sort: SortKey::Score,
        }
    }

    #[test]
    fn mount_without_cache_loads_page_target() {
        for (page, target) in [(PageKind::Browse, 120), (PageKind::Genres, 60), (PageKind::Ranking, 200)] {
            let (state, actions) = mount(page, None, None);
            assert_eq!(actions, vec![Action::LoadTop { target }]);
            assert_eq!(state.phase, ListingPhase::Loading);
        }
    }

    #[test]
    fn mount_with_cache_is_ready_without_fetching() {
        let (state, actions) = mount(PageKind::Browse, Some(cached()), None);

        assert!(actions.is_empty());
        assert_eq!(state.phase, ListingPhase::Ready);
        assert_eq!(state.view, cached());
    }

    #[test]
    fn deep_link_searches_even_with_cache() {
        let (state, actions) = mount(PageKind::Browse, Some(cached()), Some("solo leveling"));

        assert_eq!(actions, vec![Action::Search { query: "solo leveling".into() }]);
        assert_eq!(state.view.query, "solo leveling");
        assert_eq!(state.view.source, SourceFilter::Webtoon);
        assert_eq!(state.phase, ListingPhase::Loading);
    }

    #[test]
    fn blank_deep_link_is_ignored() {
        let (_, actions) = mount(PageKind::Browse, None, Some("   "));
        assert_eq!(actions, vec![Action::LoadTop { target: 120 }]);
    }

    #[test]
    fn empty_submit_reloads_top_list() {
        let (mut state, _) = mount(PageKind::Browse, Some(cached()), None);
        handle_event(&mut state, &Event::QueryEdited("  ".into())).unwrap();

        let (_, actions) = handle_event(&mut state, &Event::SubmitSearch).unwrap();

        assert!(actions.contains(&Action::LoadTop { target: 120 }));
        assert!(!actions.iter().any(|a| matches!(a, Action::Search { .. })));
    }

    #[test]
    fn editing_the_query_persists_and_suggests() {
        let (mut state, _) = mount(PageKind::Browse, None, None);

        let (render, actions) = handle_event(&mut state, &Event::QueryEdited("tow".into())).unwrap();

        assert!(render);
        assert_eq!(actions, vec![Action::Persist, Action::Suggest { query: "tow".into() }]);
        assert_eq!(state.view.query, "tow");
    }

    #[test]
    fn ranking_filter_is_not_persisted() {
        let (mut state, _) = mount(PageKind::Ranking, None, None);

        let (render, actions) = handle_event(&mut state, &Event::QueryEdited("tower".into())).unwrap();

        assert!(render);
        assert!(actions.is_empty());
        assert_eq!(state.view.query, "tower");
    }

    #[test]
    fn picking_the_same_genre_twice_reloads_top() {
        let (mut state, _) = mount(PageKind::Genres, None, None);

        let (_, first) = handle_event(&mut state, &Event::PickGenre("Horror".into())).unwrap();
        assert_eq!(first, vec![Action::Search { query: "Horror".into() }]);
        assert_eq!(state.picked_genre(), Some("Horror"));

        let (_, second) = handle_event(&mut state, &Event::PickGenre("Horror".into())).unwrap();
        assert_eq!(second, vec![Action::LoadTop { target: 60 }]);
        assert_eq!(state.picked_genre(), None);
    }

    #[test]
    fn unchanged_criteria_skip_render() {
        let (mut state, _) = mount(PageKind::Browse, None, None);

        let (render, actions) = handle_event(&mut state, &Event::SetSort(SortKey::Rank)).unwrap();
        assert!(!render);
        assert!(actions.is_empty());

        let (render, actions) = handle_event(&mut state, &Event::SetSource(SourceFilter::NonWebtoon)).unwrap();
        assert!(render);
        assert_eq!(actions, vec![Action::Persist]);
    }

    #[test]
    fn reset_clears_everything_and_reloads() {
        let (mut state, _) = mount(PageKind::Browse, Some(cached()), None);

        let (_, actions) = handle_event(&mut state, &Event::Reset).unwrap();

        assert_eq!(state.view, ViewState::default());
        assert_eq!(actions.first(), Some(&Action::ClearPersisted));
        assert_eq!(actions.last(), Some(&Action::LoadTop { target: 120 }));
    }

    #[test]
    fn loaded_items_replace_the_pool() {
        let (mut state, _) = mount(PageKind::Ranking, None, None);
        let items = vec![CatalogItem::new(1, "Fresh")];

        let (_, actions) = handle_event(&mut state, &Event::ItemsLoaded(items.clone())).unwrap();

        assert_eq!(state.view.pool, items);
        assert_eq!(state.phase, ListingPhase::Ready);
        assert_eq!(actions, vec![Action::Persist]);
    }

    #[test]
    fn page_specific_events_are_ignored_elsewhere() {
        let (mut ranking, _) = mount(PageKind::Ranking, None, None);
        assert_eq!(handle_event(&mut ranking, &Event::ToggleGenre("Action".into())).unwrap(), (false, vec![]));
        assert_eq!(handle_event(&mut ranking, &Event::SubmitSearch).unwrap(), (false, vec![]));

        let (mut browse, _) = mount(PageKind::Browse, None, None);
        assert_eq!(handle_event(&mut browse, &Event::PickGenre("Action".into())).unwrap(), (false, vec![]));
    }
}
