//! The quiz session engine.
//!
//! State machine, timing rules and the event surface the presentation
//! layer subscribes to.

mod events;
mod session;
mod state;

pub use events::SessionEvent;
pub use session::{QuizSession, SessionError};
pub use state::{
    FEEDBACK_DELAY, Lifelines, NO_HINT_FALLBACK, Phase, QUESTION_TIME, STARTING_LIVES,
    timer_fraction, timer_seconds_label,
};
