//! Community forum threads.

use super::store::{Document, DocumentStore, Order};
use super::User;
use crate::domain::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};

/// Collection holding every thread.
pub const THREADS: &str = "forumThreads";

/// Category used when the author picks none.
pub const DEFAULT_CATEGORY: &str = "General";

/// A thread as typed into the "new discussion" form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewThread {
    pub title: String,
    pub content: String,
    pub category: String,
}

impl NewThread {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            category: DEFAULT_CATEGORY.to_string(),
        }
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }
}

/// A stored thread, field names matching the document layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForumThread {
    pub title: String,
    pub content: String,
    pub user_id: String,
    #[serde(default = "anonymous")]
    pub author_name: String,
    #[serde(default = "general")]
    pub category: String,
    /// RFC 3339 UTC timestamp.
    pub created_at: String,
    #[serde(default)]
    pub reply_count: u32,
    #[serde(default)]
    pub likes: u32,
}

fn anonymous() -> String {
    "Anonymous".to_string()
}

fn general() -> String {
    DEFAULT_CATEGORY.to_string()
}

/// Posts `draft` as `user` and returns the new thread's id with its contents.
///
/// # Errors
///
/// - `Validation` ("Login Required") when nobody is signed in
/// - `Validation` ("Missing Info") when title or content is blank
/// - any store error
///
/// Validation happens before anything is written.
pub fn create_thread<D: DocumentStore>(
    store: &mut D,
    user: Option<&User>,
    draft: &NewThread,
) -> Result<(String, ForumThread)> {
    let Some(user) = user else {
        return Err(CatalogError::validation(
            "Login Required",
            "Please sign in to start a new discussion.",
        ));
    };

    if draft.title.trim().is_empty() || draft.content.trim().is_empty() {
        return Err(CatalogError::validation("Missing Info", "Title and content are required."));
    }

    let category = if draft.category.trim().is_empty() {
        DEFAULT_CATEGORY.to_string()
    } else {
        draft.category.clone()
    };

    let thread = ForumThread {
        title: draft.title.clone(),
        content: draft.content.clone(),
        user_id: user.uid.clone(),
        author_name: user.display_name(),
        category,
        created_at: super::now_rfc3339(),
        reply_count: 0,
        likes: 0,
    };

    let id = store.create(THREADS, to_document(&thread)?)?;
    tracing::info!(thread_id = %id, category = %thread.category, "forum thread posted");
    Ok((id, thread))
}

/// Every thread, newest first.
///
/// Documents that do not decode as threads are logged and skipped.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn list_threads<D: DocumentStore>(store: &D) -> Result<Vec<(String, ForumThread)>> {
    let docs = store.query_ordered(THREADS, "createdAt", Order::Descending)?;

    Ok(docs
        .into_iter()
        .filter_map(|(id, doc)| match serde_json::from_value(doc.into()) {
            Ok(thread) => Some((id, thread)),
            Err(e) => {
                tracing::warn!(thread_id = %id, error = %e, "skipping malformed thread");
                None
            }
        })
        .collect())
}

pub(super) fn to_document<T: Serialize>(value: &T) -> Result<Document> {
    match serde_json::to_value(value)? {
        serde_json::Value::Object(map) => Ok(map),
        _ => Err(CatalogError::Storage("document must serialize to an object".into())),
    }
}
