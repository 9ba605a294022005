//! Catalog item domain model.
//!
//! A [`CatalogItem`] is one title's metadata record as reported by the remote
//! manga database. Items are immutable once fetched: the client filters, sorts,
//! and displays them but never edits them.

use serde::{Deserialize, Serialize};

/// Genre shown when an item reports no genres at all.
pub const FALLBACK_GENRE: &str = "Action";

/// One manhwa title from the remote catalog.
///
/// # Source conventions
///
/// These follow what the upstream API happens to return and are not enforced:
///
/// - `score` has no fixed range; it is whatever the source reports.
/// - Listings display only the first genre ([`CatalogItem::primary_genre`]) and
///   the first author ([`CatalogItem::primary_author`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Source-assigned unique identifier (`mal_id`).
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub synopsis: Option<String>,
    /// Cover image URL (WebP rendition).
    #[serde(default)]
    pub cover_url: String,
    #[serde(default)]
    pub score: Option<f64>,
    /// Global rank, 1 being the best.
    #[serde(default)]
    pub rank: Option<u32>,
    #[serde(default)]
    pub chapters: Option<u32>,
    /// Lifecycle status, e.g. `"Publishing"` or `"Finished"`.
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub genres: Vec<String>,
}

impl CatalogItem {
    /// Creates an item with only an id and a title; every other field is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use manhwadex::domain::CatalogItem;
    ///
    /// let item = CatalogItem::new(1, "Solo Leveling");
    /// assert!(item.rank.is_none());
    /// assert_eq!(item.primary_genre(), "Action");
    /// ```
    #[must_use]
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            synopsis: None,
            cover_url: String::new(),
            score: None,
            rank: None,
            chapters: None,
            status: String::new(),
            authors: Vec::new(),
            genres: Vec::new(),
        }
    }

    /// Builder-style setter for genres.
    #[must_use]
    pub fn with_genres<I, G>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = G>,
        G: Into<String>,
    {
        self.genres = genres.into_iter().map(Into::into).collect();
        self
    }

    /// Builder-style setter for the global rank.
    #[must_use]
    pub const fn with_rank(mut self, rank: u32) -> Self {
        self.rank = Some(rank);
        self
    }

    /// Builder-style setter for the score.
    #[must_use]
    pub const fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    /// First reported genre, or [`FALLBACK_GENRE`] when there are none.
    #[must_use]
    pub fn primary_genre(&self) -> &str {
        self.genres.first().map_or(FALLBACK_GENRE, String::as_str)
    }

    /// First reported author, if any.
    #[must_use]
    pub fn primary_author(&self) -> Option<&str> {
        self.authors.first().map(String::as_str)
    }

    /// Whether the item reads as a webtoon.
    ///
    /// True when any genre name or the title contains `"webtoon"`,
    /// case-insensitively.
    #[must_use]
    pub fn is_webtoon(&self) -> bool {
        const NEEDLE: &str = "webtoon";
        self.genres.iter().any(|g| g.to_lowercase().contains(NEEDLE))
            || self.title.to_lowercase().contains(NEEDLE)
    }

    /// Score rendered for listings: the number, or `"N/A"`.
    #[must_use]
    pub fn score_label(&self) -> String {
        self.score.map_or_else(|| "N/A".to_string(), |s| format!("{s:.2}"))
    }

    /// Chapter count rendered for listings: the number, or `"?"`.
    #[must_use]
    pub fn chapters_label(&self) -> String {
        self.chapters.map_or_else(|| "?".to_string(), |c| c.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn webtoon_by_genre_or_title() {
        let by_genre = CatalogItem::new(1, "Tower").with_genres(["Action", "Award Winning Webtoon"]);
        let by_title = CatalogItem::new(2, "The Webtoon Chronicles").with_genres(["Drama"]);
        let neither = CatalogItem::new(3, "Omniscient Reader").with_genres(["Fantasy"]);

        assert!(by_genre.is_webtoon());
        assert!(by_title.is_webtoon());
        assert!(!neither.is_webtoon());
    }

    #[test]
    fn display_conventions_use_first_entries() {
        let mut item = CatalogItem::new(7, "Lookism").with_genres(["Drama", "School"]);
        item.authors = vec!["Park, Tae-jun".into(), "Someone Else".into()];

        assert_eq!(item.primary_genre(), "Drama");
        assert_eq!(item.primary_author(), Some("Park, Tae-jun"));
        assert_eq!(item.score_label(), "N/A");
        assert_eq!(item.chapters_label(), "?");
    }

    #[test]
    fn cached_json_tolerates_missing_optional_fields() {
        let item: CatalogItem = serde_json::from_str(r#"{"id": 5, "title": "Noblesse"}"#).unwrap();
        assert_eq!(item, CatalogItem::new(5, "Noblesse"));
    }
}
