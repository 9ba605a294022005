//! JSON wire types for the remote catalog API.
//!
//! The API wraps every payload in `{ "data": ... }`. Many fields are nullable
//! upstream, so everything except the identifier is optional here and is
//! flattened into a [`CatalogItem`] by the `From` impl.

use crate::domain::CatalogItem;
use serde::Deserialize;

/// Response envelope shared by every endpoint.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: Option<T>,
}

#[derive(Debug, Default, Deserialize)]
pub struct WireImageSet {
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct WireImages {
    #[serde(default)]
    pub webp: Option<WireImageSet>,
}

/// `{ "name": ... }` objects used for authors and genres.
#[derive(Debug, Deserialize)]
pub struct WireNamed {
    pub name: String,
}

/// One manga record as returned by the API.
#[derive(Debug, Deserialize)]
pub struct WireManga {
    pub mal_id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub synopsis: Option<String>,
    #[serde(default)]
    pub images: Option<WireImages>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub rank: Option<u32>,
    #[serde(default)]
    pub chapters: Option<u32>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub authors: Option<Vec<WireNamed>>,
    #[serde(default)]
    pub genres: Option<Vec<WireNamed>>,
    /// Declared publication type, e.g. `"Manhwa"`.
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

impl WireManga {
    /// Whether the declared type, when present, is manhwa (case-insensitive).
    #[must_use]
    pub fn declares_manhwa(&self) -> bool {
        self.kind
            .as_deref()
            .map_or(true, |kind| kind.eq_ignore_ascii_case("manhwa"))
    }
}

fn names(list: Option<Vec<WireNamed>>) -> Vec<String> {
    list.unwrap_or_default().into_iter().map(|n| n.name).collect()
}

impl From<WireManga> for CatalogItem {
    fn from(wire: WireManga) -> Self {
        let cover_url = wire
            .images
            .and_then(|images| images.webp)
            .and_then(|webp| webp.image_url)
            .unwrap_or_default();

        Self {
            id: wire.mal_id,
            title: wire.title.unwrap_or_default(),
            synopsis: wire.synopsis,
            cover_url,
            score: wire.score,
            rank: wire.rank,
            chapters: wire.chapters,
            status: wire.status.unwrap_or_default(),
            authors: names(wire.authors),
            genres: names(wire.genres),
        }
    }
}
