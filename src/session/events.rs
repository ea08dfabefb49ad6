//! Events the session pushes to its subscribers.
//!
//! The presentation layer never polls the engine; it holds a receiver
//! and applies these as they arrive.

use std::time::Duration;

use crate::models::NUM_OPTIONS;

use super::state::Lifelines;

/// A state transition the presentation layer may care about.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// A new question is up. Clears any hint and re-enables all options.
    QuestionChanged {
        index: usize,
        total: usize,
        text: String,
        options: [String; NUM_OPTIONS],
        points: u32,
    },
    /// The per-question countdown moved.
    TimerTick { time_left: Duration, total: Duration },
    /// An answer (or a timeout) was judged.
    AnswerJudged {
        /// Selected option, or `None` when the timer ran out.
        selected: Option<usize>,
        correct_index: usize,
        correct: bool,
        score: u32,
    },
    LivesChanged { lives: u32 },
    LifelinesChanged { lifelines: Lifelines },
    /// 50/50 hid some wrong options; `hidden[i]` means option i is gone.
    OptionsHidden { hidden: [bool; NUM_OPTIONS] },
    HintRevealed { text: String },
    /// Terminal transition; fired exactly once per playthrough.
    SessionEnded {
        success: bool,
        final_score: u32,
        category: String,
    },
}
