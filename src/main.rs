use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::DefaultTerminal;

use neon_quiz::admin::AdminConsole;
use neon_quiz::store::{CompletionTracker, QuestionBank, ScoreStore};
use neon_quiz::{App, QuizError, QuizSession, ui};

/// How often the engine clock is advanced.
const TICK_RATE: Duration = Duration::from_millis(100);

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory holding the bank, score and completion documents
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Open the admin console instead of the quiz
    #[arg(long)]
    admin: bool,
}

#[tokio::main]
async fn main() -> Result<(), QuizError> {
    pretty_env_logger::init();
    let args = Args::parse();

    let terminal = ratatui::init();
    let result = if args.admin {
        run_admin(terminal, &args.data_dir)
    } else {
        run_quiz(terminal, &args.data_dir)
    };
    ratatui::restore();
    result
}

fn open_stores(data_dir: &Path) -> (QuestionBank, ScoreStore, CompletionTracker) {
    (
        QuestionBank::open(data_dir.join("bank.json")),
        ScoreStore::open(data_dir.join("high_scores.json")),
        CompletionTracker::open(data_dir.join("completed.json")),
    )
}

fn run_quiz(mut terminal: DefaultTerminal, data_dir: &Path) -> Result<(), QuizError> {
    let (bank, scores, completion) = open_stores(data_dir);
    let mut app = App::new(QuizSession::new(bank, scores, completion));
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|frame| ui::render(frame, &app))?;

        if event::poll(TICK_RATE)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key.code);
                }
            }
        }

        app.tick(last_tick.elapsed());
        last_tick = Instant::now();

        if app.should_quit {
            return Ok(());
        }
    }
}

fn run_admin(mut terminal: DefaultTerminal, data_dir: &Path) -> Result<(), QuizError> {
    let (bank, scores, completion) = open_stores(data_dir);
    let mut console = AdminConsole::new(bank, scores, completion);

    loop {
        terminal.draw(|frame| ui::render_admin(frame, &console))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char(c) => console.command_input.push(c),
                KeyCode::Backspace => {
                    console.command_input.pop();
                }
                KeyCode::Enter => console.submit(),
                KeyCode::Esc => return Ok(()),
                _ => {}
            }
        }

        if console.should_quit {
            return Ok(());
        }
    }
}
