//! Persisted stores.
//!
//! Each store is a single JSON document rewritten in full on every
//! mutation. A missing or corrupt document is recovered by falling back
//! to the default structure and logging, never by failing the caller.
//! Stores built without a backing path live purely in memory; tests use
//! this to stay off the filesystem.

mod bank;
mod completion;
mod scores;

use std::fs;
use std::io;
use std::path::Path;

use log::warn;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub use bank::{BankError, QuestionBank};
pub use completion::CompletionTracker;
pub use scores::{MAX_SCORE_ENTRIES, ScoreError, ScoreStore};

/// Failure while writing a store document back to disk.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("failed to write store document: {0}")]
    Io(#[from] io::Error),
    #[error("failed to serialize store document: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Read a store document, falling back to `default` if it is missing
/// or unparseable.
fn load_or<T, F>(path: Option<&Path>, default: F) -> T
where
    T: DeserializeOwned,
    F: FnOnce() -> T,
{
    let Some(path) = path else {
        return default();
    };

    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return default(),
        Err(err) => {
            warn!("{}: failed to read store, using defaults: {}", path.display(), err);
            return default();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(err) => {
            warn!("{}: corrupt store document, using defaults: {}", path.display(), err);
            default()
        }
    }
}

/// Write the whole document back. A `None` path means an in-memory store.
fn persist<T: Serialize>(path: Option<&Path>, value: &T) -> Result<(), PersistError> {
    let Some(path) = path else {
        return Ok(());
    };

    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)?;
        }
    }
    let raw = serde_json::to_string_pretty(value)?;
    fs::write(path, raw)?;
    Ok(())
}
