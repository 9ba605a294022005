//! Error types for manhwadex.
//!
//! This module defines the centralized error type [`CatalogError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.
//!
//! Network failures against the remote catalog never reach callers of the
//! catalog client; they are logged and collapsed into empty results there. The
//! variants below that describe them are only visible inside the client.

use thiserror::Error;

/// The main error type for manhwadex operations.
///
/// # Examples
///
/// ```
/// use manhwadex::domain::CatalogError;
///
/// fn post_without_title() -> Result<(), CatalogError> {
///     Err(CatalogError::validation("Missing Info", "Title and content are required."))
/// }
///
/// assert!(post_without_title().unwrap_err().is_validation());
/// ```
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Transport-level HTTP failure (connection refused, TLS, body decode).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote catalog answered with a non-success status code.
    #[error("catalog responded with status {status} for {url}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Request URL.
        url: String,
    },

    /// Storage operation failed.
    ///
    /// Occurs when reading from or writing to a local store fails for reasons
    /// other than plain I/O (missing key space, malformed file layout).
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// User input was rejected before any I/O took place.
    ///
    /// Rendered by the terminal client as a transient notification.
    #[error("{title}: {description}")]
    Validation {
        /// Short headline.
        title: String,
        /// Human-readable explanation.
        description: String,
    },

    /// A catalog item does not exist or is hidden by the content policy.
    #[error("catalog item {0} not found")]
    NotFound(u64),
}

impl CatalogError {
    /// Builds a [`CatalogError::Validation`] from a headline and description.
    pub fn validation(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::Validation {
            title: title.into(),
            description: description.into(),
        }
    }

    /// Returns `true` for input validation failures.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

/// A specialized `Result` type for manhwadex operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
