use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A diary as supplied by the storage backend. Immutable input to one export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diary {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// One diary entry. `content` is sanitized HTML from the rich-text editor.
///
/// Entries are exported in the order supplied; the caller owns the sort order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entry {
    pub fn was_edited(&self) -> bool {
        self.updated_at != self.created_at
    }
}
