//! Manhwadex: a terminal client for discovering manhwa.
//!
//! Manhwadex browses a Jikan-compatible manga catalog and provides:
//! - Paginated "top" aggregation into a target-sized pool with pacing
//! - A content policy that hides excluded genres everywhere
//! - Debounced live search suggestions
//! - Browse, genre, and ranking listings whose filter/sort state persists
//! - Local forum threads and per-user reading lists

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Terminal shim (main.rs)                            │  ← clap commands
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling                                   │
//! │  - Action execution (ListingSession)                │
//! │  - Pure view derivation                             │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Catalog       │   │ Storage       │   │ Suggest       │
//! │ (catalog/)    │   │ (storage/)    │   │ (suggest/)    │
//! │ - HTTP client │   │ - KV backends │   │ - Scheduler   │
//! │ - Aggregator  │   │ - ViewStore   │   │ - Debouncer   │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain, Community, Infrastructure, UI              │
//! │  - CatalogItem, content policy, errors (domain/)    │
//! │  - Forum and reading lists (community/)             │
//! │  - Data directory paths (infrastructure/)           │
//! │  - Plain-text rendering (ui/)                       │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry tracing to a rotating OTLP file    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: listing state machine with an event/action model
//! - [`catalog`]: remote catalog client and page aggregator
//! - [`community`]: forum threads and reading lists over a document store
//! - [`domain`]: catalog item, content policy, errors
//! - [`infrastructure`]: data directory resolution
//! - [`storage`]: key-value backends and the per-page view store
//! - [`suggest`]: cancellable timers and the suggestion debouncer
//! - [`ui`]: plain-text rendering
//! - [`observability`]: tracing setup
//!
//! # Configuration
//!
//! Settings come from an optional TOML file, overridden by command-line flags:
//!
//! ```toml
//! # ~/.config/manhwadex/config.toml
//! base_url = "https://api.jikan.moe/v4"
//! data_dir = "~/.local/share/manhwadex"
//! max_pages = 10
//! page_pacing_ms = 500
//! debounce_ms = 300
//! trace_level = "info"
//! theme = "catppuccin-mocha"
//! ```
//!
//! # Example
//!
//! ```no_run
//! use manhwadex::app::{Event, PageKind, SortKey};
//! use manhwadex::storage::MemoryKeyValueStore;
//! use manhwadex::{initialize, Config};
//!
//! # async fn run() -> manhwadex::Result<()> {
//! let context = initialize(Config::default())?;
//! let mut session = context.listing_session(PageKind::Browse, MemoryKeyValueStore::default());
//!
//! session.mount(None).await?;
//! session.dispatch(Event::SetSort(SortKey::Score)).await?;
//! println!("{}", manhwadex::ui::render_listing(session.state(), &context.theme, 100));
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod catalog;
pub mod community;
pub mod domain;
pub mod infrastructure;
pub mod storage;
pub mod suggest;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, Event, ListingSession, ListingState, PageKind};
pub use domain::{CatalogError, CatalogItem, Result};
pub use ui::Theme;

use catalog::{Aggregator, CatalogClient, DEFAULT_BASE_URL, DEFAULT_MAX_PAGES, DEFAULT_PAGE_PACING};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use storage::{KeyValueStore, ViewStore};
use suggest::{SuggestionBox, SuggestionDebouncer, DEFAULT_SETTLE_WINDOW};

/// Application configuration.
///
/// Every field has a default, so a config file only lists what it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root of the Jikan-compatible API. Default: [`DEFAULT_BASE_URL`]
    pub base_url: String,

    /// Where views, community documents, and traces are stored.
    ///
    /// A leading `~` is expanded. Default: see [`infrastructure::get_data_dir`]
    pub data_dir: Option<PathBuf>,

    /// Page-count ceiling for one aggregation. Default: 10
    pub max_pages: u32,

    /// Delay between aggregated pages, in milliseconds. Default: 500
    pub page_pacing_ms: u64,

    /// Suggestion settle window, in milliseconds. Default: 300
    pub debounce_ms: u64,

    /// Tracing level: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,

    /// Built-in theme name or path to a TOML theme. Default: `catppuccin-mocha`
    pub theme: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            data_dir: None,
            max_pages: DEFAULT_MAX_PAGES,
            page_pacing_ms: u64::try_from(DEFAULT_PAGE_PACING.as_millis()).unwrap_or(500),
            debounce_ms: u64::try_from(DEFAULT_SETTLE_WINDOW.as_millis()).unwrap_or(300),
            trace_level: None,
            theme: None,
        }
    }
}

/// Values given on the command line; each `Some` replaces the config value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub trace_level: Option<String>,
    pub theme: Option<String>,
}

impl Config {
    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Config`] on malformed TOML or mistyped fields.
    ///
    /// # Example
    ///
    /// ```rust
    /// use manhwadex::Config;
    ///
    /// let config = Config::from_toml_str("max_pages = 4\ntrace_level = \"debug\"")?;
    /// assert_eq!(config.max_pages, 4);
    /// assert_eq!(config.trace_level.as_deref(), Some("debug"));
    /// assert_eq!(config.debounce_ms, 300);
    /// # Ok::<(), manhwadex::CatalogError>(())
    /// ```
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| CatalogError::Config(format!("invalid configuration: {e}")))
    }

    /// Reads and parses a TOML config file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Config`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| CatalogError::Config(format!("failed to read config {}: {e}", path.display())))?;
        Self::from_toml_str(&contents)
    }

    /// Applies command-line overrides.
    #[must_use]
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(base_url) = overrides.base_url {
            self.base_url = base_url;
        }
        if let Some(data_dir) = overrides.data_dir {
            self.data_dir = Some(data_dir);
        }
        if overrides.trace_level.is_some() {
            self.trace_level = overrides.trace_level;
        }
        if overrides.theme.is_some() {
            self.theme = overrides.theme;
        }
        self
    }

    /// The effective data directory, with `~` expanded.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.as_ref().map_or_else(infrastructure::get_data_dir, |dir| {
            let home = std::env::var("HOME").ok();
            PathBuf::from(infrastructure::expand_tilde(&dir.to_string_lossy(), home.as_deref()))
        })
    }

    #[must_use]
    pub const fn page_pacing(&self) -> Duration {
        Duration::from_millis(self.page_pacing_ms)
    }

    #[must_use]
    pub const fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// Shared collaborators built from a [`Config`].
#[derive(Debug, Clone)]
pub struct Context {
    pub config: Config,
    pub catalog: Arc<CatalogClient>,
    pub theme: Theme,
}

impl Context {
    /// An aggregator over the shared client, honoring the configured limits.
    #[must_use]
    pub fn aggregator(&self) -> Aggregator<CatalogClient> {
        Aggregator::new(Arc::clone(&self.catalog)).with_limits(self.config.max_pages, self.config.page_pacing())
    }

    /// A suggestion debouncer with the configured settle window.
    #[must_use]
    pub fn debouncer(&self, target: SuggestionBox) -> SuggestionDebouncer<CatalogClient> {
        SuggestionDebouncer::new(Arc::clone(&self.catalog), target).with_window(self.config.debounce_window())
    }

    /// A listing session for `page` persisting through `backend`.
    ///
    /// The browse page gets a full-size suggestion box attached.
    #[must_use]
    pub fn listing_session<K: KeyValueStore>(&self, page: PageKind, backend: K) -> ListingSession<CatalogClient, K> {
        let session = ListingSession::new(page, Arc::clone(&self.catalog), self.aggregator(), ViewStore::new(backend));
        if page == PageKind::Browse {
            session.with_debouncer(self.debouncer(SuggestionBox::Full))
        } else {
            session
        }
    }

    #[must_use]
    pub fn views_path(&self) -> PathBuf {
        self.config.data_dir().join(infrastructure::VIEWS_FILE)
    }

    #[must_use]
    pub fn community_path(&self) -> PathBuf {
        self.config.data_dir().join(infrastructure::COMMUNITY_FILE)
    }
}

/// Builds the application context.
///
/// An unknown or unreadable theme falls back to the default with a warning;
/// an invalid base URL is an error.
///
/// # Errors
///
/// Returns [`CatalogError::Config`] if the catalog client cannot be built.
///
/// # Example
///
/// ```rust
/// use manhwadex::{initialize, Config};
///
/// let context = initialize(Config {
///     theme: Some("plain".to_string()),
///     ..Default::default()
/// })?;
/// assert_eq!(context.theme.name, "plain");
/// # Ok::<(), manhwadex::CatalogError>(())
/// ```
pub fn initialize(config: Config) -> Result<Context> {
    tracing::debug!(base_url = %config.base_url, "initializing manhwadex");

    let theme = config.theme.as_deref().map_or_else(Theme::default, |name| {
        Theme::resolve(name).unwrap_or_else(|e| {
            tracing::warn!(theme = %name, error = %e, "failed to load theme, using default");
            Theme::default()
        })
    });

    let catalog = Arc::new(CatalogClient::new(&config.base_url)?);

    Ok(Context { config, catalog, theme })
}
