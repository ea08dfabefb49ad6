//! Presentation state machine.
//!
//! Glue between terminal input and the session engine. The quiz screen
//! never reads engine internals directly; it renders a view model fed
//! by the engine's event subscription.

use std::time::Duration;

use crossterm::event::KeyCode;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::models::NUM_OPTIONS;
use crate::session::{Lifelines, QUESTION_TIME, QuizSession, STARTING_LIVES, SessionEvent};

/// Which screen is on display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Picker,
    Quiz,
    Result,
}

/// Which login field has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    UserId,
    Name,
}

/// Data for the question currently on screen.
#[derive(Debug, Clone)]
pub struct QuestionView {
    pub index: usize,
    pub total: usize,
    pub text: String,
    pub options: [String; NUM_OPTIONS],
    pub points: u32,
}

/// Outcome of the last judged answer, kept for the feedback pause.
#[derive(Debug, Clone, Copy)]
pub struct Feedback {
    pub selected: Option<usize>,
    pub correct_index: usize,
    pub correct: bool,
}

/// Terminal application state.
pub struct App {
    pub screen: Screen,
    session: QuizSession,
    events: UnboundedReceiver<SessionEvent>,

    // Login screen.
    pub id_input: String,
    pub name_input: String,
    pub login_field: LoginField,
    pub login_error: Option<String>,
    user_id: String,
    display_name: String,

    // Category picker.
    pub picker_selected: usize,
    pub picker_message: Option<String>,

    // Quiz view model, filled from session events.
    pub question: Option<QuestionView>,
    pub selected_option: usize,
    pub hidden: [bool; NUM_OPTIONS],
    pub hint: Option<String>,
    pub feedback: Option<Feedback>,
    pub lives: u32,
    pub score: u32,
    pub lifelines: Lifelines,
    pub time_left: Duration,

    // Result screen.
    pub result_success: bool,
    pub result_score: u32,
    pub result_category: String,

    pub should_quit: bool,
}

impl App {
    pub fn new(mut session: QuizSession) -> Self {
        let events = session.subscribe();
        Self {
            screen: Screen::Login,
            session,
            events,
            id_input: String::new(),
            name_input: String::new(),
            login_field: LoginField::UserId,
            login_error: None,
            user_id: String::new(),
            display_name: String::new(),
            picker_selected: 0,
            picker_message: None,
            question: None,
            selected_option: 0,
            hidden: [false; NUM_OPTIONS],
            hint: None,
            feedback: None,
            lives: STARTING_LIVES,
            score: 0,
            lifelines: Lifelines::default(),
            time_left: QUESTION_TIME,
            result_success: false,
            result_score: 0,
            result_category: String::new(),
            should_quit: false,
        }
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn categories(&self) -> Vec<&str> {
        self.session.bank().categories()
    }

    /// Feed elapsed time to the engine, then apply whatever events it
    /// produced.
    pub fn tick(&mut self, dt: Duration) {
        self.session.tick(dt);
        self.drain_events();
    }

    /// Handle one key press for the current screen.
    pub fn handle_key(&mut self, key: KeyCode) {
        match self.screen {
            Screen::Login => self.handle_login_key(key),
            Screen::Picker => self.handle_picker_key(key),
            Screen::Quiz => self.handle_quiz_key(key),
            Screen::Result => self.handle_result_key(key),
        }
        self.drain_events();
    }

    fn handle_login_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Tab | KeyCode::Up | KeyCode::Down => {
                self.login_field = match self.login_field {
                    LoginField::UserId => LoginField::Name,
                    LoginField::Name => LoginField::UserId,
                };
            }
            KeyCode::Char(c) => {
                self.login_error = None;
                match self.login_field {
                    LoginField::UserId => {
                        if c.is_ascii_digit() && self.id_input.len() < 10 {
                            self.id_input.push(c);
                        }
                    }
                    LoginField::Name => {
                        if self.name_input.len() < 24 {
                            self.name_input.push(c);
                        }
                    }
                }
            }
            KeyCode::Backspace => {
                self.login_error = None;
                match self.login_field {
                    LoginField::UserId => {
                        self.id_input.pop();
                    }
                    LoginField::Name => {
                        self.name_input.pop();
                    }
                }
            }
            KeyCode::Enter => self.submit_login(),
            KeyCode::Esc => self.should_quit = true,
            _ => {}
        }
    }

    /// The 10-digit shape is a login-form convention, not an engine
    /// rule; the engine takes any non-empty id.
    fn submit_login(&mut self) {
        if self.id_input.len() != 10 || !self.id_input.chars().all(|c| c.is_ascii_digit()) {
            self.login_error = Some("Please enter a valid 10-digit ID".to_string());
            return;
        }
        if self.name_input.trim().is_empty() {
            self.login_error = Some("Please enter your name".to_string());
            return;
        }
        self.user_id = self.id_input.clone();
        self.display_name = self.name_input.trim().to_string();
        self.screen = Screen::Picker;
    }

    fn handle_picker_key(&mut self, key: KeyCode) {
        let count = self.categories().len();
        match key {
            KeyCode::Up | KeyCode::Char('k') if count > 0 => {
                self.picker_selected = (self.picker_selected + count - 1) % count;
            }
            KeyCode::Down | KeyCode::Char('j') if count > 0 => {
                self.picker_selected = (self.picker_selected + 1) % count;
            }
            KeyCode::Enter => self.start_selected_category(),
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            _ => {}
        }
    }

    fn start_selected_category(&mut self) {
        let Some(category) = self
            .categories()
            .get(self.picker_selected)
            .map(|c| c.to_string())
        else {
            self.picker_message = Some("No categories available.".to_string());
            return;
        };

        match self.session.start(&self.user_id, &self.display_name, &category) {
            Ok(()) => {
                self.picker_message = None;
                self.screen = Screen::Quiz;
            }
            Err(err) => self.picker_message = Some(err.to_string()),
        }
    }

    fn handle_quiz_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Up | KeyCode::Char('k') => self.select_previous_option(),
            KeyCode::Down | KeyCode::Char('j') => self.select_next_option(),
            KeyCode::Enter | KeyCode::Char(' ') => self.session.answer(self.selected_option),
            KeyCode::Char('1') => self.session.use_fifty_fifty(),
            KeyCode::Char('2') => self.session.use_hint(),
            KeyCode::Char('3') => self.session.use_skip(),
            KeyCode::Char('e') => self.session.end(),
            KeyCode::Char('q') => {
                // Quitting mid-quiz still records the attempt.
                self.session.end();
                self.should_quit = true;
            }
            _ => {}
        }
    }

    fn handle_result_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Enter => {
                self.picker_message = None;
                self.picker_selected = 0;
                self.screen = Screen::Picker;
            }
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            _ => {}
        }
    }

    fn select_next_option(&mut self) {
        for _ in 0..NUM_OPTIONS {
            self.selected_option = (self.selected_option + 1) % NUM_OPTIONS;
            if !self.hidden[self.selected_option] {
                break;
            }
        }
    }

    fn select_previous_option(&mut self) {
        for _ in 0..NUM_OPTIONS {
            self.selected_option = (self.selected_option + NUM_OPTIONS - 1) % NUM_OPTIONS;
            if !self.hidden[self.selected_option] {
                break;
            }
        }
    }

    fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            self.apply_event(event);
        }
    }

    fn apply_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::QuestionChanged {
                index,
                total,
                text,
                options,
                points,
            } => {
                self.question = Some(QuestionView {
                    index,
                    total,
                    text,
                    options,
                    points,
                });
                self.selected_option = 0;
                self.hidden = [false; NUM_OPTIONS];
                self.hint = None;
                self.feedback = None;
            }
            SessionEvent::TimerTick { time_left, .. } => self.time_left = time_left,
            SessionEvent::AnswerJudged {
                selected,
                correct_index,
                correct,
                score,
            } => {
                self.feedback = Some(Feedback {
                    selected,
                    correct_index,
                    correct,
                });
                self.score = score;
            }
            SessionEvent::LivesChanged { lives } => self.lives = lives,
            SessionEvent::LifelinesChanged { lifelines } => self.lifelines = lifelines,
            SessionEvent::OptionsHidden { hidden } => {
                self.hidden = hidden;
                if self.hidden[self.selected_option] {
                    self.select_next_option();
                }
            }
            SessionEvent::HintRevealed { text } => self.hint = Some(text),
            SessionEvent::SessionEnded {
                success,
                final_score,
                category,
            } => {
                self.result_success = success;
                self.result_score = final_score;
                self.result_category = category;
                self.score = final_score;
                self.screen = Screen::Result;
            }
        }
    }
}
