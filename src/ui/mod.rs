//! Plain-text terminal rendering.
//!
//! ```text
//! ListingState / CatalogItem -> viewmodel -> components -> String
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: display-ready structs computed from state
//! - [`renderer`]: one entry point per page
//! - [`components`]: building blocks appending to a buffer
//! - [`helpers`]: fuzzy match ranges, truncation, padding
//! - [`theme`]: palettes and ANSI escapes
//!
//! # Example
//!
//! ```
//! use manhwadex::app::{ListingState, PageKind};
//! use manhwadex::ui::{render_listing, Theme};
//!
//! let state = ListingState::new(PageKind::Browse);
//! let page = render_listing(&state, &Theme::plain(), 80);
//! assert!(page.contains("Explore Manhwa"));
//! ```

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::{
    render_detail, render_failure, render_listing, render_notice, render_reading_list, render_suggestions,
    render_threads,
};
pub use theme::Theme;
pub use viewmodel::{DetailViewModel, EmptyState, FooterInfo, HeaderInfo, ListingRow, ListingViewModel, SuggestionRow};
