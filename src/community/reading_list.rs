//! Per-user reading lists.
//!
//! Each user has one list (`default`). Entries are keyed by catalog item id,
//! so setting a status twice for the same title updates the entry in place.

use super::forum::to_document;
use super::store::{DocumentStore, Order};
use super::User;
use crate::domain::error::{CatalogError, Result};
use crate::domain::CatalogItem;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where a reader is with a title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadingStatus {
    #[serde(rename = "Currently Reading")]
    CurrentlyReading,
    Completed,
    #[serde(rename = "On Hold")]
    OnHold,
    #[serde(rename = "Plan to Read")]
    PlanToRead,
    Dropped,
}

impl ReadingStatus {
    pub const ALL: [Self; 5] = [
        Self::CurrentlyReading,
        Self::Completed,
        Self::OnHold,
        Self::PlanToRead,
        Self::Dropped,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::CurrentlyReading => "Currently Reading",
            Self::Completed => "Completed",
            Self::OnHold => "On Hold",
            Self::PlanToRead => "Plan to Read",
            Self::Dropped => "Dropped",
        }
    }
}

impl fmt::Display for ReadingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ReadingStatus {
    type Err = CatalogError;

    /// Accepts the display label or a kebab/snake-case form, case-insensitively.
    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();

        Self::ALL
            .into_iter()
            .find(|status| {
                status
                    .label()
                    .chars()
                    .filter(|c| c.is_alphanumeric())
                    .collect::<String>()
                    .to_lowercase()
                    == normalized
            })
            .ok_or_else(|| {
                CatalogError::validation(
                    "Unknown status",
                    format!("'{s}' is not one of: Currently Reading, Completed, On Hold, Plan to Read, Dropped"),
                )
            })
    }
}

/// One title on a reading list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingEntry {
    /// Catalog item id, as a decimal string.
    pub manhwa_id: String,
    pub title: String,
    #[serde(default)]
    pub cover_image_url: String,
    pub status: ReadingStatus,
    /// The item's score when the entry was written; 0 when unscored.
    #[serde(default)]
    pub score: f64,
    /// RFC 3339 UTC timestamp of the last change.
    pub updated_at: String,
    pub user_id: String,
}

/// Collection path of `uid`'s default list.
#[must_use]
pub fn entries_collection(uid: &str) -> String {
    format!("users/{uid}/readingLists/default/entries")
}

/// Checks that someone is signed in before a list change.
///
/// Callers that must fetch the item first use this to fail before any I/O.
///
/// # Errors
///
/// `Validation` ("Sign in required") when `user` is `None`.
pub fn require_user(user: Option<&User>) -> Result<&User> {
    user.ok_or_else(|| {
        CatalogError::validation("Sign in required", "Please log in to save manhwa to your list.")
    })
}

/// Records `status` for `item` on the signed-in user's list.
///
/// # Errors
///
/// `Validation` ("Sign in required") when nobody is signed in, or any store
/// error.
pub fn set_status<D: DocumentStore>(
    store: &mut D,
    user: Option<&User>,
    item: &CatalogItem,
    status: ReadingStatus,
) -> Result<ReadingEntry> {
    let user = require_user(user)?;

    let entry = ReadingEntry {
        manhwa_id: item.id.to_string(),
        title: item.title.clone(),
        cover_image_url: item.cover_url.clone(),
        status,
        score: item.score.unwrap_or(0.0),
        updated_at: super::now_rfc3339(),
        user_id: user.uid.clone(),
    };

    store.upsert(&entries_collection(&user.uid), &entry.manhwa_id, to_document(&entry)?)?;
    tracing::info!(item_id = item.id, status = %status, "reading list updated");
    Ok(entry)
}

/// The user's entries, most recently updated first.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn entries<D: DocumentStore>(store: &D, user: &User) -> Result<Vec<ReadingEntry>> {
    let docs = store.query_ordered(&entries_collection(&user.uid), "updatedAt", Order::Descending)?;

    Ok(docs
        .into_iter()
        .filter_map(|(id, doc)| {
            serde_json::from_value(doc.into())
                .map_err(|e| tracing::warn!(entry_id = %id, error = %e, "skipping malformed entry"))
                .ok()
        })
        .collect())
}
