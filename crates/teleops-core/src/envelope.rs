//! List response envelope.
//!
//! List endpoints of the operations backend answer either with a bare JSON
//! array or with a `{count, results}` page. [`ListEnvelope`] accepts both and
//! [`ListEnvelope::into_items`] is the one place that normalizes them.

use serde::{Deserialize, Serialize};

/// A list response in either of the two shapes the backend produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListEnvelope<T> {
    /// `{"count": 2, "results": [...]}`
    Page { count: u64, results: Vec<T> },
    /// `[...]`
    Items(Vec<T>),
}

impl<T> ListEnvelope<T> {
    /// Normalize to the contained items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        match self {
            Self::Page { results, .. } => results,
            Self::Items(items) => items,
        }
    }

    /// Total count reported by the server, or the number of items for bare arrays.
    #[must_use]
    pub fn total(&self) -> u64 {
        match self {
            Self::Page { count, .. } => *count,
            Self::Items(items) => items.len() as u64,
        }
    }
}
