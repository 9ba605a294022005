//! Domain layer for manhwadex.
//!
//! This module contains the core domain types, independent of HTTP, storage,
//! or terminal concerns.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`item`]: Catalog item model
//! - [`policy`]: Genre-based content policy
//!
//! # Examples
//!
//! ```
//! use manhwadex::domain::{filter_manhwa, CatalogItem};
//!
//! let items = vec![CatalogItem::new(1, "Tower of God").with_genres(["Fantasy"])];
//! assert_eq!(filter_manhwa(items).len(), 1);
//! ```

pub mod error;
pub mod item;
pub mod policy;

pub use error::{CatalogError, Result};
pub use item::CatalogItem;
pub use policy::{filter_manhwa, ContentPolicy, EXCLUDED_GENRES};
