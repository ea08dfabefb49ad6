//! The quiz session state machine.
//!
//! One `QuizSession` drives one playthrough at a time: question
//! sequencing, the per-question countdown, lives, lifelines and
//! scoring. The engine is synchronous and tick-driven; the binary's
//! event loop feeds it elapsed time and user input, and subscribers
//! receive [`SessionEvent`]s as state moves.

use std::time::Duration;

use log::warn;
use rand::seq::SliceRandom;
use rand::thread_rng;
use thiserror::Error;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::models::{NUM_OPTIONS, Question, ScoreEntry};
use crate::store::{CompletionTracker, PersistError, QuestionBank, ScoreStore};

use super::events::SessionEvent;
use super::state::{
    FEEDBACK_DELAY, Lifelines, NO_HINT_FALLBACK, Pending, PendingAction, Phase, QUESTION_TIME,
    STARTING_LIVES,
};

/// Why a session refused to start.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("category \"{0}\" has already been attempted")]
    AlreadyCompleted(String),
    #[error("no questions available for category \"{0}\"")]
    EmptyCategory(String),
    #[error(transparent)]
    Store(#[from] PersistError),
}

/// The session engine. Owns the store handles it needs; there are no
/// ambient singletons.
pub struct QuizSession {
    bank: QuestionBank,
    scores: ScoreStore,
    completion: CompletionTracker,

    user_id: String,
    display_name: String,
    category: String,
    /// Shuffled snapshot of the category's questions; bank edits made
    /// mid-playthrough do not reach a running session.
    questions: Vec<Question>,
    current: usize,
    score: u32,
    lives: u32,
    lifelines: Lifelines,
    time_left: Duration,
    hidden: [bool; NUM_OPTIONS],
    /// Latched once the current question has been answered (or timed
    /// out); answer, timer and skip input are ignored until advance.
    answered: bool,
    phase: Phase,
    pending: Option<Pending>,
    generation: u64,
    subscribers: Vec<UnboundedSender<SessionEvent>>,
}

impl QuizSession {
    pub fn new(bank: QuestionBank, scores: ScoreStore, completion: CompletionTracker) -> Self {
        Self {
            bank,
            scores,
            completion,
            user_id: String::new(),
            display_name: String::new(),
            category: String::new(),
            questions: Vec::new(),
            current: 0,
            score: 0,
            lives: STARTING_LIVES,
            lifelines: Lifelines::default(),
            time_left: QUESTION_TIME,
            hidden: [false; NUM_OPTIONS],
            answered: false,
            phase: Phase::Idle,
            pending: None,
            generation: 0,
            subscribers: Vec::new(),
        }
    }

    /// Register a subscriber. Events are delivered in registration
    /// order; closed receivers are pruned on the next broadcast.
    pub fn subscribe(&mut self) -> UnboundedReceiver<SessionEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(tx);
        rx
    }

    /// Begin a playthrough of `category` for the given user.
    ///
    /// The category is marked attempted immediately, not on completion;
    /// the one-attempt gate closes the moment the quiz starts.
    pub fn start(
        &mut self,
        user_id: &str,
        display_name: &str,
        category: &str,
    ) -> Result<(), SessionError> {
        if self.phase == Phase::Running {
            return Ok(());
        }
        if self.completion.has_attempted(user_id, category) {
            return Err(SessionError::AlreadyCompleted(category.to_string()));
        }

        let mut questions = self.bank.questions(category).to_vec();
        if questions.is_empty() {
            return Err(SessionError::EmptyCategory(category.to_string()));
        }
        // Unbiased Fisher-Yates.
        questions.shuffle(&mut thread_rng());

        self.user_id = user_id.to_string();
        self.display_name = display_name.to_string();
        self.category = category.to_string();
        self.questions = questions;
        self.current = 0;
        self.score = 0;
        self.lives = STARTING_LIVES;
        self.lifelines = Lifelines::default();
        self.time_left = QUESTION_TIME;
        self.hidden = [false; NUM_OPTIONS];
        self.answered = false;
        self.pending = None;
        self.generation += 1;
        self.phase = Phase::Running;

        self.completion.mark_attempted(user_id, category)?;

        self.emit(SessionEvent::LivesChanged { lives: self.lives });
        self.emit(SessionEvent::LifelinesChanged {
            lifelines: self.lifelines,
        });
        self.emit_question_changed();
        self.emit_timer_tick();
        Ok(())
    }

    /// Submit an answer for the current question. Ignored while the
    /// session is not running, once the question is already answered,
    /// or for an option 50/50 removed.
    pub fn answer(&mut self, selected: usize) {
        if self.phase != Phase::Running || self.answered {
            return;
        }
        if selected >= NUM_OPTIONS || self.hidden[selected] {
            return;
        }

        let question = &self.questions[self.current];
        let correct_index = question.correct_index;
        let points = question.points;
        let correct = selected == correct_index;

        self.answered = true;
        if correct {
            self.score += points;
        }
        self.emit(SessionEvent::AnswerJudged {
            selected: Some(selected),
            correct_index,
            correct,
            score: self.score,
        });

        if correct {
            self.schedule(PendingAction::Advance);
        } else {
            self.lose_life();
        }
    }

    /// Feed elapsed time into the engine. Drives the countdown and any
    /// pending feedback-pause continuation.
    pub fn tick(&mut self, dt: Duration) {
        if self.phase != Phase::Running {
            return;
        }

        if let Some(mut pending) = self.pending.take() {
            // A continuation scheduled by an earlier playthrough is a
            // guaranteed no-op.
            if pending.generation != self.generation {
                return;
            }
            if pending.remaining > dt {
                pending.remaining -= dt;
                self.pending = Some(pending);
            } else {
                match pending.action {
                    PendingAction::Advance => self.advance(),
                    PendingAction::Fail => self.finish(false),
                }
            }
            return;
        }

        self.time_left = self.time_left.saturating_sub(dt);
        self.emit_timer_tick();
        if self.time_left.is_zero() {
            self.on_time_expired();
        }
    }

    /// Timer expiry is judged like a wrong answer: one life gone, then
    /// advance or fail after the feedback pause. The `answered` latch
    /// guarantees it fires at most once per question.
    fn on_time_expired(&mut self) {
        let correct_index = self.questions[self.current].correct_index;
        self.answered = true;
        self.emit(SessionEvent::AnswerJudged {
            selected: None,
            correct_index,
            correct: false,
            score: self.score,
        });
        self.lose_life();
    }

    fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        self.emit(SessionEvent::LivesChanged { lives: self.lives });
        if self.lives == 0 {
            self.schedule(PendingAction::Fail);
        } else {
            self.schedule(PendingAction::Advance);
        }
    }

    fn schedule(&mut self, action: PendingAction) {
        self.pending = Some(Pending {
            action,
            remaining: FEEDBACK_DELAY,
            generation: self.generation,
        });
    }

    /// Move to the next question, or finish when none remain. Resets
    /// the countdown, clears the answered latch and re-enables every
    /// option.
    fn advance(&mut self) {
        self.current += 1;
        if self.current >= self.questions.len() {
            self.finish(true);
            return;
        }
        self.answered = false;
        self.hidden = [false; NUM_OPTIONS];
        self.time_left = QUESTION_TIME;
        self.emit_question_changed();
        self.emit_timer_tick();
    }

    /// Hide up to two wrong options for the current question. Never
    /// touches the correct option; repeat calls only consume wrong
    /// options still visible.
    pub fn use_fifty_fifty(&mut self) {
        if self.phase != Phase::Running || self.answered || self.lifelines.fifty_fifty == 0 {
            return;
        }

        let correct_index = self.questions[self.current].correct_index;
        let mut wrong: Vec<usize> = (0..NUM_OPTIONS)
            .filter(|&i| i != correct_index && !self.hidden[i])
            .collect();
        wrong.shuffle(&mut thread_rng());
        for &i in wrong.iter().take(2) {
            self.hidden[i] = true;
        }

        self.lifelines.fifty_fifty -= 1;
        self.emit(SessionEvent::OptionsHidden {
            hidden: self.hidden,
        });
        self.emit(SessionEvent::LifelinesChanged {
            lifelines: self.lifelines,
        });
    }

    /// Reveal the current question's hint, or a fallback when it has
    /// none.
    pub fn use_hint(&mut self) {
        if self.phase != Phase::Running || self.lifelines.hint == 0 {
            return;
        }

        let text = self.questions[self.current]
            .hint
            .clone()
            .unwrap_or_else(|| NO_HINT_FALLBACK.to_string());
        self.lifelines.hint -= 1;
        self.emit(SessionEvent::HintRevealed { text });
        self.emit(SessionEvent::LifelinesChanged {
            lifelines: self.lifelines,
        });
    }

    /// Jump to the next question without touching score or lives.
    pub fn use_skip(&mut self) {
        if self.phase != Phase::Running || self.answered || self.lifelines.skip == 0 {
            return;
        }
        self.lifelines.skip -= 1;
        self.emit(SessionEvent::LifelinesChanged {
            lifelines: self.lifelines,
        });
        self.advance();
    }

    /// End the playthrough early. Completed only if every question was
    /// already consumed, Failed otherwise. A second call is a no-op.
    pub fn end(&mut self) {
        if self.phase != Phase::Running {
            return;
        }
        self.finish(false);
    }

    /// The single terminal transition. Cancels the timer and any
    /// pending continuation, persists the score (even zero) exactly
    /// once, and re-marks completion idempotently.
    fn finish(&mut self, success: bool) {
        let success = success || self.current >= self.questions.len();
        self.pending = None;
        self.phase = if success {
            Phase::Completed
        } else {
            Phase::Failed
        };

        let entry = ScoreEntry::new(
            self.user_id.clone(),
            self.display_name.clone(),
            self.score,
            self.category.clone(),
        );
        if let Err(err) = self.scores.record(entry) {
            warn!("refusing to persist score entry: {}", err);
        }
        if let Err(err) = self.completion.mark_attempted(&self.user_id, &self.category) {
            warn!("failed to persist completion mark: {}", err);
        }

        self.emit(SessionEvent::SessionEnded {
            success,
            final_score: self.score,
            category: self.category.clone(),
        });
    }

    fn emit_question_changed(&mut self) {
        let question = &self.questions[self.current];
        let event = SessionEvent::QuestionChanged {
            index: self.current,
            total: self.questions.len(),
            text: question.text.clone(),
            options: question.options.clone(),
            points: question.points,
        };
        self.emit(event);
    }

    fn emit_timer_tick(&mut self) {
        self.emit(SessionEvent::TimerTick {
            time_left: self.time_left,
            total: QUESTION_TIME,
        });
    }

    fn emit(&mut self, event: SessionEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    // Read surface for the presentation layer and the admin flows.

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn lifelines(&self) -> Lifelines {
        self.lifelines
    }

    pub fn time_left(&self) -> Duration {
        self.time_left
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn current_question(&self) -> Option<&Question> {
        if self.phase == Phase::Running {
            self.questions.get(self.current)
        } else {
            None
        }
    }

    /// 1-based number of the question on screen.
    pub fn question_number(&self) -> usize {
        self.current + 1
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    /// The playthrough's shuffled snapshot.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn hidden_options(&self) -> [bool; NUM_OPTIONS] {
        self.hidden
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn scores(&self) -> &ScoreStore {
        &self.scores
    }

    pub fn completion(&self) -> &CompletionTracker {
        &self.completion
    }
}
