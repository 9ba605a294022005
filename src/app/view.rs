//! Pure derivation of the displayed list from a pool and its criteria.

use super::modes::{SortKey, SourceFilter};
use crate::domain::CatalogItem;
use std::cmp::Ordering;

/// Rank assumed for items the source has not ranked.
pub const UNRANKED: u32 = 99_999;

/// Filters and sorts `pool` without touching it.
///
/// Steps, in order:
///
/// 1. Genre filter: an item stays when `selected_genres` is empty or any
///    selected genre is a case-insensitive substring of any of its genres.
/// 2. Source filter: see [`CatalogItem::is_webtoon`].
/// 3. Title filter: when `query` is non-empty, the title must contain it
///    case-insensitively.
/// 4. Stable sort by `sort`.
///
/// # Examples
///
/// ```
/// use manhwadex::app::view::derive_view;
/// use manhwadex::app::modes::{SortKey, SourceFilter};
/// use manhwadex::domain::CatalogItem;
///
/// let pool = vec![
///     CatalogItem::new(1, "A").with_rank(2),
///     CatalogItem::new(2, "B").with_rank(1),
///     CatalogItem::new(3, "C"),
/// ];
/// let shown = derive_view(&pool, None, &[], SourceFilter::All, SortKey::Rank);
/// let titles: Vec<_> = shown.iter().map(|i| i.title.as_str()).collect();
/// assert_eq!(titles, ["B", "A", "C"]);
/// ```
#[must_use]
pub fn derive_view(
    pool: &[CatalogItem],
    query: Option<&str>,
    selected_genres: &[String],
    source: SourceFilter,
    sort: SortKey,
) -> Vec<CatalogItem> {
    let _span = tracing::trace_span!("derive_view",
        pool = pool.len(),
        genres = selected_genres.len(),
        source = %source,
        sort = %sort
    )
    .entered();

    let wanted: Vec<String> = selected_genres.iter().map(|g| g.to_lowercase()).collect();
    let needle = query
        .map(str::to_lowercase)
        .filter(|q| !q.is_empty());

    let mut shown: Vec<CatalogItem> = pool
        .iter()
        .filter(|item| matches_genres(item, &wanted))
        .filter(|item| match source {
            SourceFilter::All => true,
            SourceFilter::Webtoon => item.is_webtoon(),
            SourceFilter::NonWebtoon => !item.is_webtoon(),
        })
        .filter(|item| {
            needle
                .as_ref()
                .map_or(true, |q| item.title.to_lowercase().contains(q.as_str()))
        })
        .cloned()
        .collect();

    match sort {
        SortKey::Rank => shown.sort_by_key(|item| item.rank.unwrap_or(UNRANKED)),
        SortKey::Score => shown.sort_by(|a, b| by_score_descending(a, b)),
    }

    tracing::trace!(shown = shown.len(), "view derived");
    shown
}

fn matches_genres(item: &CatalogItem, wanted: &[String]) -> bool {
    if wanted.is_empty() {
        return true;
    }
    let genres: Vec<String> = item.genres.iter().map(|g| g.to_lowercase()).collect();
    wanted
        .iter()
        .any(|w| genres.iter().any(|g| g.contains(w.as_str())))
}

fn by_score_descending(a: &CatalogItem, b: &CatalogItem) -> Ordering {
    let left = a.score.unwrap_or(0.0);
    let right = b.score.unwrap_or(0.0);
    right.total_cmp(&left)
}
