//! Session phases, lifeline counters and timing rules.

use std::time::Duration;

/// Time allowed per question.
pub const QUESTION_TIME: Duration = Duration::from_secs(15);

/// Pause between judging an answer and moving on, so the presentation
/// can show the correct/incorrect feedback.
pub const FEEDBACK_DELAY: Duration = Duration::from_secs(1);

/// Lives at the start of every playthrough.
pub const STARTING_LIVES: u32 = 3;

/// Shown when a question carries no hint of its own.
pub const NO_HINT_FALLBACK: &str = "No hint available for this question.";

/// Where a playthrough currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No playthrough started yet.
    Idle,
    /// Questions are being presented.
    Running,
    /// Terminal: every question was consumed.
    Completed,
    /// Terminal: lives ran out or the user gave up early.
    Failed,
}

impl Phase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Completed | Phase::Failed)
    }
}

/// Remaining uses of each consumable aid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lifelines {
    pub fifty_fifty: u32,
    pub hint: u32,
    pub skip: u32,
}

impl Default for Lifelines {
    fn default() -> Self {
        Self {
            fifty_fifty: 1,
            hint: 1,
            skip: 2,
        }
    }
}

/// What a deferred continuation will do once the feedback pause runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum PendingAction {
    Advance,
    Fail,
}

/// A scheduled continuation, keyed to the playthrough that scheduled it
/// so a leftover from an ended playthrough can never act on a new one.
#[derive(Debug, Clone, Copy)]
pub(super) struct Pending {
    pub action: PendingAction,
    pub remaining: Duration,
    pub generation: u64,
}

/// Fraction of the question time still left, for a progress indicator.
pub fn timer_fraction(time_left: Duration, total: Duration) -> f64 {
    if total.is_zero() {
        return 0.0;
    }
    (time_left.as_secs_f64() / total.as_secs_f64()).clamp(0.0, 1.0)
}

/// Whole-seconds label, rounded up so the display never reads zero
/// while time remains.
pub fn timer_seconds_label(time_left: Duration) -> u64 {
    time_left.as_secs_f64().ceil() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_fraction_bounds() {
        assert_eq!(timer_fraction(QUESTION_TIME, QUESTION_TIME), 1.0);
        assert_eq!(timer_fraction(Duration::ZERO, QUESTION_TIME), 0.0);
        let half = timer_fraction(Duration::from_millis(7500), QUESTION_TIME);
        assert!((half - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_seconds_label_rounds_up() {
        assert_eq!(timer_seconds_label(Duration::from_millis(14_100)), 15);
        assert_eq!(timer_seconds_label(Duration::from_millis(900)), 1);
        assert_eq!(timer_seconds_label(Duration::ZERO), 0);
    }

    #[test]
    fn test_default_lifeline_budget() {
        let lifelines = Lifelines::default();
        assert_eq!(lifelines.fifty_fifty, 1);
        assert_eq!(lifelines.hint, 1);
        assert_eq!(lifelines.skip, 2);
    }
}
