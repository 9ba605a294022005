//! Community features: forum threads and reading lists.
//!
//! Both sit on a [`DocumentStore`], a deliberately small document database
//! interface (create, merge-upsert, ordered query). The bundled
//! [`JsonDocumentStore`] keeps everything in one local file.
//!
//! Write operations take the signed-in [`User`] as an `Option` and reject
//! `None` with a validation error before touching the store.

pub mod forum;
pub mod reading_list;
pub mod store;

pub use forum::{create_thread, list_threads, ForumThread, NewThread};
pub use reading_list::{entries, set_status, ReadingEntry, ReadingStatus};
pub use store::{Document, DocumentStore, JsonDocumentStore, Order};

/// The signed-in reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub uid: String,
    pub email: Option<String>,
}

impl User {
    pub fn new(uid: impl Into<String>, email: Option<&str>) -> Self {
        Self {
            uid: uid.into(),
            email: email.map(String::from),
        }
    }

    /// Local part of the email address, or `"Anonymous"`.
    ///
    /// ```
    /// use manhwadex::community::User;
    ///
    /// assert_eq!(User::new("1", Some("reader@example.com")).display_name(), "reader");
    /// assert_eq!(User::new("1", None).display_name(), "Anonymous");
    /// assert_eq!(User::new("1", Some("@example.com")).display_name(), "Anonymous");
    /// ```
    #[must_use]
    pub fn display_name(&self) -> String {
        self.email
            .as_deref()
            .and_then(|email| email.split('@').next())
            .filter(|local| !local.is_empty())
            .unwrap_or("Anonymous")
            .to_string()
    }
}

/// Current UTC time with millisecond precision, e.g. `2025-03-01T12:00:00.000Z`.
///
/// The fixed width keeps lexicographic and chronological order identical.
pub(crate) fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
