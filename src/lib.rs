//! # neon-quiz
//!
//! A terminal quiz application: timed multiple-choice questions drawn
//! from a category bank, with three lives, three consumable lifelines
//! and a persisted high-score table. An admin console maintains the
//! question bank and reviews recorded scores.
//!
//! The core is the session engine plus its stores; the terminal UI is
//! glue that drives the engine through its event subscription.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use neon_quiz::QuizSession;
//! use neon_quiz::store::{CompletionTracker, QuestionBank, ScoreStore};
//!
//! # fn main() -> Result<(), neon_quiz::QuizError> {
//! let bank = QuestionBank::open("data/bank.json");
//! let scores = ScoreStore::open("data/high_scores.json");
//! let completion = CompletionTracker::open("data/completed.json");
//!
//! let mut session = QuizSession::new(bank, scores, completion);
//! let mut events = session.subscribe();
//! session.start("1234567890", "Devi", "General")?;
//!
//! // Feed elapsed time and user input; react to events.
//! session.answer(2);
//! session.tick(std::time::Duration::from_millis(100));
//! while let Ok(event) = events.try_recv() {
//!     println!("{:?}", event);
//! }
//! # Ok(())
//! # }
//! ```

pub mod admin;
mod app;
pub mod models;
pub mod session;
pub mod store;
pub mod ui;

use std::io;

use thiserror::Error;

pub use app::{App, Feedback, LoginField, QuestionView, Screen};
pub use models::{NUM_OPTIONS, Question, ScoreEntry};
pub use session::{Lifelines, Phase, QuizSession, SessionError, SessionEvent};
pub use store::{BankError, CompletionTracker, QuestionBank, ScoreError, ScoreStore};

/// Top-level error type for quiz operations.
#[derive(Debug, Error)]
pub enum QuizError {
    #[error("question bank error: {0}")]
    Bank(#[from] BankError),
    #[error("score store error: {0}")]
    Score(#[from] ScoreError),
    #[error("session error: {0}")]
    Session(#[from] SessionError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
