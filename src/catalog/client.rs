//! HTTP client for the remote manga catalog.
//!
//! Talks to a Jikan-compatible REST API. Every public method swallows its
//! failures: transport errors, non-success statuses, and undecodable bodies are
//! logged and surfaced as an empty list or `None`. Nothing is retried.

use super::wire::{Envelope, WireManga};
use super::CatalogSource;
use crate::domain::error::{CatalogError, Result};
use crate::domain::{CatalogItem, ContentPolicy};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::Instrument;

/// Public Jikan v4 endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.jikan.moe/v4";

/// Publication type requested from list endpoints.
const MANHWA_TYPE: &str = "manhwa";

const USER_AGENT_VALUE: &str = concat!("manhwadex/", env!("CARGO_PKG_VERSION"));

/// Catalog client bound to one API base URL.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: Url,
    policy: ContentPolicy,
}

impl CatalogClient {
    /// Creates a client for `base_url` with the default content policy.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Config`] if the URL cannot be parsed or cannot
    /// carry a path, and [`CatalogError::Http`] if the HTTP client fails to build.
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| CatalogError::Config(format!("invalid catalog base URL {base_url:?}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(CatalogError::Config(format!(
                "catalog base URL {base_url} cannot carry a path"
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let http = reqwest::Client::builder().default_headers(headers).build()?;

        Ok(Self {
            http,
            base_url,
            policy: ContentPolicy::default(),
        })
    }

    /// Replaces the content policy applied to results.
    #[must_use]
    pub fn with_policy(mut self, policy: ContentPolicy) -> Self {
        self.policy = policy;
        self
    }

    fn endpoint(&self, segments: &[&str], query: &[(&str, &str)]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        url
    }

    pub(crate) fn top_url(&self, page: u32) -> Url {
        let page = page.to_string();
        self.endpoint(&["top", "manga"], &[("type", MANHWA_TYPE), ("page", &page)])
    }

    pub(crate) fn search_url(&self, query: &str) -> Url {
        self.endpoint(&["manga"], &[("q", query), ("type", MANHWA_TYPE)])
    }

    pub(crate) fn item_url(&self, id: u64) -> Url {
        let id = id.to_string();
        self.endpoint(&["manga", &id], &[])
    }

    async fn fetch_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let response = self.http.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response.json::<T>().await?)
    }

    async fn fetch_list(&self, url: Url) -> Vec<CatalogItem> {
        match self.fetch_json::<Envelope<Vec<WireManga>>>(url.clone()).await {
            Ok(envelope) => {
                let items = envelope
                    .data
                    .unwrap_or_default()
                    .into_iter()
                    .map(CatalogItem::from)
                    .collect();
                self.policy.filter_manhwa(items)
            }
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "catalog list request failed");
                Vec::new()
            }
        }
    }

    /// Applies the single-item acceptance rules to a decoded record.
    pub(crate) fn accept_single(&self, wire: WireManga) -> Option<CatalogItem> {
        if !wire.declares_manhwa() {
            tracing::debug!(id = wire.mal_id, kind = ?wire.kind, "item is not a manhwa");
            return None;
        }
        let item = CatalogItem::from(wire);
        if !self.policy.permits(&item) {
            tracing::debug!(id = item.id, "item hidden by content policy");
            return None;
        }
        Some(item)
    }
}

impl CatalogSource for CatalogClient {
    async fn fetch_top_page(&self, page: u32) -> Vec<CatalogItem> {
        let items = self
            .fetch_list(self.top_url(page))
            .instrument(tracing::debug_span!("fetch_top_page", page))
            .await;
        tracing::debug!(page, count = items.len(), "top page fetched");
        items
    }

    async fn search(&self, query: &str) -> Vec<CatalogItem> {
        if query.is_empty() {
            return Vec::new();
        }

        let items = self.fetch_list(self.search_url(query)).await;
        tracing::debug!(query = %query, count = items.len(), "search completed");
        items
    }

    async fn fetch_by_id(&self, id: u64) -> Option<CatalogItem> {
        let url = self.item_url(id);
        match self.fetch_json::<Envelope<WireManga>>(url.clone()).await {
            Ok(envelope) => envelope.data.and_then(|wire| self.accept_single(wire)),
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "catalog item request failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> CatalogClient {
        CatalogClient::new(DEFAULT_BASE_URL).unwrap()
    }

    #[test]
    fn builds_top_url_with_type_and_page() {
        assert_eq!(
            client().top_url(3).as_str(),
            "https://api.jikan.moe/v4/top/manga?type=manhwa&page=3"
        );
    }

    #[test]
    fn search_url_encodes_query() {
        assert_eq!(
            client().search_url("solo & leveling").as_str(),
            "https://api.jikan.moe/v4/manga?q=solo+%26+leveling&type=manhwa"
        );
    }

    #[test]
    fn item_url_tolerates_trailing_slash_in_base() {
        let client = CatalogClient::new("http://localhost:8080/v4/").unwrap();
        assert_eq!(client.item_url(42).as_str(), "http://localhost:8080/v4/manga/42");
    }

    #[test]
    fn rejects_unusable_base_urls() {
        assert!(matches!(CatalogClient::new("not a url"), Err(CatalogError::Config(_))));
        assert!(matches!(CatalogClient::new("mailto:me@example.com"), Err(CatalogError::Config(_))));
    }

    #[test]
    fn single_item_rules() {
        let client = client();
        let parse = |json: &str| serde_json::from_str::<WireManga>(json).unwrap();

        let ok = parse(r#"{"mal_id": 1, "title": "Tower of God", "type": "Manhwa", "genres": [{"name": "Fantasy"}]}"#);
        let wrong_type = parse(r#"{"mal_id": 2, "title": "One Piece", "type": "Manga"}"#);
        let excluded = parse(r#"{"mal_id": 3, "title": "Hidden", "type": "Manhwa", "genres": [{"name": "Smut"}]}"#);

        assert_eq!(client.accept_single(ok).map(|i| i.id), Some(1));
        assert!(client.accept_single(wrong_type).is_none());
        assert!(client.accept_single(excluded).is_none());
    }

    #[tokio::test]
    async fn empty_search_short_circuits() {
        // Unroutable base: any request would fail, but none should be made.
        let client = CatalogClient::new("http://127.0.0.1:9/v4").unwrap();
        assert!(client.search("").await.is_empty());
    }

    #[tokio::test]
    async fn unreachable_api_degrades_to_empty_results() {
        let client = CatalogClient::new("http://127.0.0.1:9/v4").unwrap();
        assert!(client.fetch_top_page(1).await.is_empty());
        assert!(client.search("solo").await.is_empty());
        assert!(client.fetch_by_id(1).await.is_none());
    }
}
