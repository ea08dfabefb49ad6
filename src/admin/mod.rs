//! Admin console: question-bank maintenance and score review.

mod commands;

pub use commands::{CommandResult, execute_command};

use log::info;

use crate::store::{CompletionTracker, QuestionBank, ScoreStore};

/// State behind the admin screen: the three stores plus the command
/// line and its scrollback.
pub struct AdminConsole {
    pub bank: QuestionBank,
    pub scores: ScoreStore,
    pub completion: CompletionTracker,
    pub command_input: String,
    pub command_history: Vec<String>,
    pub should_quit: bool,
}

impl AdminConsole {
    /// Build the console. Invalid score entries left behind by older
    /// versions are purged right away so listings stay clean.
    pub fn new(bank: QuestionBank, mut scores: ScoreStore, completion: CompletionTracker) -> Self {
        match scores.purge_invalid() {
            Ok(0) => {}
            Ok(removed) => info!("removed {} invalid score entries on startup", removed),
            Err(err) => log::warn!("score cleanup failed: {}", err),
        }

        Self {
            bank,
            scores,
            completion,
            command_input: String::new(),
            command_history: vec!["Type 'help' for available commands.".to_string()],
            should_quit: false,
        }
    }

    /// Execute whatever is on the command line and record the outcome.
    pub fn submit(&mut self) {
        let input = std::mem::take(&mut self.command_input);
        if input.trim().is_empty() {
            return;
        }
        self.add_to_history(format!("> {}", input.trim()));

        match execute_command(self, &input) {
            CommandResult::Ok(None) => {}
            CommandResult::Ok(Some(msg)) => self.add_to_history(msg),
            CommandResult::Error(msg) => self.add_to_history(format!("error: {}", msg)),
            CommandResult::Quit => self.should_quit = true,
        }
    }

    /// Append to the scrollback, splitting multi-line messages.
    pub fn add_to_history(&mut self, msg: String) {
        for line in msg.lines() {
            self.command_history.push(line.to_string());
        }
        // Keep only the last 200 lines.
        let overflow = self.command_history.len().saturating_sub(200);
        if overflow > 0 {
            self.command_history.drain(..overflow);
        }
    }
}
