//! Content policy applied to every result set.
//!
//! The catalog surfaces a fixed set of genres only. Any item carrying one of
//! the excluded genre names (compared case-insensitively, whole name) is
//! dropped before it reaches the UI.

use super::item::CatalogItem;
use std::collections::HashSet;

/// Genre names that are never surfaced.
pub const EXCLUDED_GENRES: [&str; 9] = [
    "boys love",
    "girls love",
    "yaoi",
    "yuri",
    "hentai",
    "erotica",
    "ecchi",
    "smut",
    "explicit genres",
];

/// Case-insensitive genre exclusion set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentPolicy {
    excluded: HashSet<String>,
}

impl Default for ContentPolicy {
    fn default() -> Self {
        Self::new(EXCLUDED_GENRES)
    }
}

impl ContentPolicy {
    /// Builds a policy from genre names; names are lowercased on the way in.
    pub fn new<I, G>(excluded: I) -> Self
    where
        I: IntoIterator<Item = G>,
        G: AsRef<str>,
    {
        Self {
            excluded: excluded.into_iter().map(|g| g.as_ref().to_lowercase()).collect(),
        }
    }

    /// Returns `true` if none of the item's genres are excluded.
    #[must_use]
    pub fn permits(&self, item: &CatalogItem) -> bool {
        !item
            .genres
            .iter()
            .any(|genre| self.excluded.contains(&genre.to_lowercase()))
    }

    /// Drops every item this policy does not permit, preserving order.
    ///
    /// # Examples
    ///
    /// ```
    /// use manhwadex::domain::{CatalogItem, ContentPolicy};
    ///
    /// let items = vec![
    ///     CatalogItem::new(1, "A").with_genres(["Yuri", "Romance"]),
    ///     CatalogItem::new(2, "B").with_genres(["Romance"]),
    /// ];
    /// let kept = ContentPolicy::default().filter_manhwa(items);
    /// assert_eq!(kept.len(), 1);
    /// assert_eq!(kept[0].id, 2);
    /// ```
    #[must_use]
    pub fn filter_manhwa(&self, items: Vec<CatalogItem>) -> Vec<CatalogItem> {
        let before = items.len();
        let kept: Vec<CatalogItem> = items.into_iter().filter(|item| self.permits(item)).collect();

        if kept.len() != before {
            tracing::debug!(
                dropped = before - kept.len(),
                kept = kept.len(),
                "content policy excluded items"
            );
        }

        kept
    }
}

/// Applies the default [`ContentPolicy`].
#[must_use]
pub fn filter_manhwa(items: Vec<CatalogItem>) -> Vec<CatalogItem> {
    ContentPolicy::default().filter_manhwa(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<CatalogItem> {
        vec![
            CatalogItem::new(1, "Solo Leveling").with_genres(["Action", "Fantasy"]),
            CatalogItem::new(2, "Hidden").with_genres(["Yuri", "Romance"]),
            CatalogItem::new(3, "Loud").with_genres(["ECCHI"]),
            CatalogItem::new(4, "Plain"),
            CatalogItem::new(5, "Spaced").with_genres(["Boys Love"]),
            CatalogItem::new(6, "Romantic").with_genres(["Romance", "Girls Love Adjacent"]),
        ]
    }

    #[test]
    fn excluded_genre_removes_item_regardless_of_other_genres() {
        let kept = filter_manhwa(vec![CatalogItem::new(9, "X").with_genres(["Yuri", "Romance"])]);
        assert!(kept.is_empty());
    }

    #[test]
    fn output_never_contains_excluded_genres() {
        let policy = ContentPolicy::default();
        let kept = policy.filter_manhwa(sample());

        for item in &kept {
            for genre in &item.genres {
                assert!(!EXCLUDED_GENRES.contains(&genre.to_lowercase().as_str()));
            }
        }
        assert_eq!(kept.iter().map(|i| i.id).collect::<Vec<_>>(), vec![1, 4, 6]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let policy = ContentPolicy::default();
        let once = policy.filter_manhwa(sample());
        let twice = policy.filter_manhwa(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn matching_is_whole_name_not_substring() {
        let policy = ContentPolicy::default();
        let item = CatalogItem::new(6, "Romantic").with_genres(["Girls Love Adjacent"]);
        assert!(policy.permits(&item));
    }
}
