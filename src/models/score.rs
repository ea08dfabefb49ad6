use chrono::Utc;
use serde::{Deserialize, Serialize};

/// A recorded quiz result.
///
/// Entries are immutable once created. An entry without a user id or a
/// category is invalid and must never reach the persisted store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreEntry {
    pub user_id: String,
    pub name: String,
    pub score: u32,
    pub category: String,
    /// ISO-8601 creation time.
    pub timestamp: String,
}

impl ScoreEntry {
    /// Create an entry stamped with the current time.
    pub fn new(
        user_id: impl Into<String>,
        name: impl Into<String>,
        score: u32,
        category: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            name: name.into(),
            score,
            category: category.into(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    /// Whether the entry carries the fields the store requires.
    pub fn is_valid(&self) -> bool {
        !self.user_id.is_empty() && !self.category.is_empty()
    }
}
