//! The high-score log.

use std::cmp::Reverse;
use std::path::PathBuf;

use log::info;
use thiserror::Error;

use crate::models::ScoreEntry;

use super::PersistError;

/// The store never holds more than this many entries; the lowest-ranked
/// ones are dropped on insert.
pub const MAX_SCORE_ENTRIES: usize = 100;

#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("score entry is missing a user id or category")]
    InvalidEntry,
    #[error(transparent)]
    Persist(#[from] PersistError),
}

/// Capped, descending-sorted log of score entries.
pub struct ScoreStore {
    path: Option<PathBuf>,
    entries: Vec<ScoreEntry>,
}

impl ScoreStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = super::load_or(Some(path.as_path()), Vec::new);
        Self {
            path: Some(path),
            entries,
        }
    }

    pub fn in_memory() -> Self {
        Self {
            path: None,
            entries: Vec::new(),
        }
    }

    /// All entries, best score first. Ties keep insertion order.
    pub fn list(&self) -> &[ScoreEntry] {
        &self.entries
    }

    /// Record a result. Invalid entries are rejected outright; the
    /// store is the last line of defense against them.
    pub fn record(&mut self, entry: ScoreEntry) -> Result<(), ScoreError> {
        if !entry.is_valid() {
            return Err(ScoreError::InvalidEntry);
        }
        self.entries.push(entry);
        // Stable sort keeps earlier entries ahead on equal scores.
        self.entries.sort_by_key(|e| Reverse(e.score));
        self.entries.truncate(MAX_SCORE_ENTRIES);
        self.persist()
    }

    /// Delete every entry matching the user and category. Normally at
    /// most one exists, but duplicates are handled all the same.
    pub fn remove(&mut self, user_id: &str, category: &str) -> Result<usize, ScoreError> {
        let before = self.entries.len();
        self.entries
            .retain(|e| !(e.user_id == user_id && e.category == category));
        let removed = before - self.entries.len();
        if removed > 0 {
            self.persist()?;
        }
        Ok(removed)
    }

    /// Drop any previously stored entries lacking a user id or
    /// category, recovering from an earlier bug window.
    pub fn purge_invalid(&mut self) -> Result<usize, ScoreError> {
        let before = self.entries.len();
        self.entries.retain(ScoreEntry::is_valid);
        let removed = before - self.entries.len();
        if removed > 0 {
            info!("purged {} invalid score entries", removed);
            self.persist()?;
        }
        Ok(removed)
    }

    fn persist(&self) -> Result<(), ScoreError> {
        super::persist(self.path.as_deref(), &self.entries)?;
        Ok(())
    }
}
