//! Page, phase, and criteria enums for the listing pages.
//!
//! These types decide which page a [`ListingState`](super::ListingState)
//! belongs to, where it is in its load cycle, and which source filter and sort
//! order it applies.
//!
//! # Example
//!
//! ```rust
//! use manhwadex::app::modes::{PageKind, SortKey, SourceFilter};
//!
//! let page = PageKind::Browse;
//! assert_eq!(page.initial_target(), 120);
//! assert_eq!("webtoon".parse::<SourceFilter>().ok(), Some(SourceFilter::Webtoon));
//! assert_eq!(SortKey::default(), SortKey::Rank);
//! ```

use crate::domain::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Genre shelf offered by the genres page and the browse filter.
pub const GENRES: [&str; 16] = [
    "Action",
    "Adventure",
    "Comedy",
    "Drama",
    "Fantasy",
    "Horror",
    "Martial Arts",
    "Mystery",
    "Psychological",
    "Romance",
    "School",
    "Sci-Fi",
    "Slice of Life",
    "Sports",
    "Supernatural",
    "Thriller",
];

/// Which listing page a state belongs to.
///
/// Each page keeps its own persisted state under its own key prefix and
/// requests its own initial pool size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKind {
    /// Search, multi-genre filter, source filter, and sort.
    Browse,
    /// One genre at a time, fetched as a remote search.
    Genres,
    /// The top list with a local title filter.
    Ranking,
}

impl PageKind {
    /// Prefix of every persisted key for this page.
    #[must_use]
    pub const fn key_prefix(self) -> &'static str {
        match self {
            Self::Browse => "browse",
            Self::Genres => "genres",
            Self::Ranking => "ranking",
        }
    }

    /// Pool size requested from the aggregator on a fresh load.
    #[must_use]
    pub const fn initial_target(self) -> usize {
        match self {
            Self::Browse => 120,
            Self::Genres => 60,
            Self::Ranking => 200,
        }
    }

    /// Whether the query outlives the session. The ranking filter is
    /// in-memory only.
    #[must_use]
    pub const fn persists_query(self) -> bool {
        !matches!(self, Self::Ranking)
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Browse => "Explore Manhwa",
            Self::Genres => "Browse by Genre",
            Self::Ranking => "Top Manhwa Ranking",
        }
    }
}

/// Load cycle of a listing page.
///
/// There is no error phase: a failed fetch lands in `Ready` with an empty pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListingPhase {
    /// Not mounted yet.
    #[default]
    Uninitialized,
    /// A fetch is outstanding.
    Loading,
    /// The pool reflects the last completed fetch (or the restored cache).
    Ready,
}

/// Keeps all items, only webtoons, or only non-webtoons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceFilter {
    #[default]
    All,
    Webtoon,
    /// Labelled "MAL Top" in the page header.
    #[serde(alias = "mal")]
    NonWebtoon,
}

impl SourceFilter {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Webtoon => "webtoon",
            Self::NonWebtoon => "non-webtoon",
        }
    }
}

impl fmt::Display for SourceFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceFilter {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "webtoon" | "webtoons" => Ok(Self::Webtoon),
            "non-webtoon" | "mal" => Ok(Self::NonWebtoon),
            other => Err(CatalogError::validation(
                "Unknown source",
                format!("'{other}' is not one of all, webtoon, non-webtoon"),
            )),
        }
    }
}

/// Display order of the derived list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Ascending rank; unranked items last.
    #[default]
    Rank,
    /// Descending score; unscored items count as zero.
    #[serde(alias = "rating")]
    Score,
}

impl SortKey {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rank => "rank",
            Self::Score => "score",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "rank" => Ok(Self::Rank),
            "score" | "rating" => Ok(Self::Score),
            other => Err(CatalogError::validation(
                "Unknown sort",
                format!("'{other}' is not one of rank, score"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_have_distinct_prefixes_and_targets() {
        let pages = [PageKind::Browse, PageKind::Genres, PageKind::Ranking];
        let prefixes: Vec<_> = pages.iter().map(|p| p.key_prefix()).collect();
        assert_eq!(prefixes, vec!["browse", "genres", "ranking"]);
        let targets: Vec<_> = pages.iter().map(|p| p.initial_target()).collect();
        assert_eq!(targets, vec![120, 60, 200]);
        let keeps_query: Vec<_> = pages.iter().map(|p| p.persists_query()).collect();
        assert_eq!(keeps_query, vec![true, true, false]);
    }

    #[test]
    fn source_filter_serializes_as_plain_names() {
        assert_eq!(serde_json::to_string(&SourceFilter::NonWebtoon).unwrap(), "\"non-webtoon\"");
        let legacy: SourceFilter = serde_json::from_str("\"mal\"").unwrap();
        assert_eq!(legacy, SourceFilter::NonWebtoon);
    }

    #[test]
    fn parsing_rejects_unknown_values() {
        assert_eq!("Rating".parse::<SortKey>().unwrap(), SortKey::Score);
        assert!("newest".parse::<SortKey>().unwrap_err().is_validation());
        assert!("manga".parse::<SourceFilter>().is_err());
    }
}
