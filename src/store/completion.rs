//! Per-user category-completion tracking.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use super::PersistError;

/// Which categories each user has attempted.
///
/// A category lands in the set the moment a session for it starts, not
/// when it finishes; this is the "one attempt only" gate, not a
/// finished marker.
pub struct CompletionTracker {
    path: Option<PathBuf>,
    attempted: BTreeMap<String, BTreeSet<String>>,
}

impl CompletionTracker {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let attempted = super::load_or(Some(path.as_path()), BTreeMap::new);
        Self {
            path: Some(path),
            attempted,
        }
    }

    pub fn in_memory() -> Self {
        Self {
            path: None,
            attempted: BTreeMap::new(),
        }
    }

    pub fn has_attempted(&self, user_id: &str, category: &str) -> bool {
        self.attempted
            .get(user_id)
            .is_some_and(|set| set.contains(category))
    }

    pub fn attempted_categories(&self, user_id: &str) -> Vec<&str> {
        self.attempted
            .get(user_id)
            .map(|set| set.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Idempotent add; only writes through when something changed.
    pub fn mark_attempted(&mut self, user_id: &str, category: &str) -> Result<(), PersistError> {
        let newly_added = self
            .attempted
            .entry(user_id.to_string())
            .or_default()
            .insert(category.to_string());
        if newly_added {
            self.persist()?;
        }
        Ok(())
    }

    /// Re-open the gate for a user, used by the admin score-removal
    /// flow so the category can be retaken.
    pub fn unmark(&mut self, user_id: &str, category: &str) -> Result<(), PersistError> {
        if let Some(set) = self.attempted.get_mut(user_id) {
            if set.remove(category) {
                self.persist()?;
            }
        }
        Ok(())
    }

    fn persist(&self) -> Result<(), PersistError> {
        super::persist(self.path.as_deref(), &self.attempted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_is_idempotent() {
        let mut tracker = CompletionTracker::in_memory();
        tracker.mark_attempted("1", "Math").unwrap();
        tracker.mark_attempted("1", "Math").unwrap();
        assert!(tracker.has_attempted("1", "Math"));
        assert_eq!(tracker.attempted_categories("1"), vec!["Math"]);
    }

    #[test]
    fn test_users_are_tracked_independently() {
        let mut tracker = CompletionTracker::in_memory();
        tracker.mark_attempted("1", "Math").unwrap();
        assert!(!tracker.has_attempted("2", "Math"));
        assert!(tracker.attempted_categories("2").is_empty());
    }

    #[test]
    fn test_unmark_reopens_the_gate() {
        let mut tracker = CompletionTracker::in_memory();
        tracker.mark_attempted("1", "Math").unwrap();
        tracker.unmark("1", "Math").unwrap();
        assert!(!tracker.has_attempted("1", "Math"));

        // Unmarking something never marked is fine.
        tracker.unmark("1", "History").unwrap();
        tracker.unmark("9", "Math").unwrap();
    }

    #[test]
    fn test_round_trips_through_disk() {
        let dir = std::env::temp_dir().join(format!("neon-quiz-completion-{}", std::process::id()));
        let path = dir.join("completed.json");

        let mut tracker = CompletionTracker::open(&path);
        tracker.mark_attempted("1234567890", "General").unwrap();

        let reloaded = CompletionTracker::open(&path);
        assert!(reloaded.has_attempted("1234567890", "General"));

        std::fs::remove_dir_all(&dir).ok();
    }
}
