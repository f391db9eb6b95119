//! # trivia-quiz
//!
//! A terminal trivia game backed by the Open Trivia Database.
//!
//! Five rounds per game, four choices per question, thirty seconds on the
//! clock. The session state machine lives in [`session`] and is fully
//! decoupled from the terminal host, so it can be driven (and tested)
//! without a UI.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use trivia_quiz::{Quiz, QuizError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), QuizError> {
//!     // None shows the difficulty selector on launch.
//!     let quiz = Quiz::new(None)?;
//!     quiz.run().await?;
//!     Ok(())
//! }
//! ```

mod app;
mod leaderboard;
mod models;
pub mod session;
mod source;
pub mod terminal;
mod ui;

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind};

pub use app::App;
pub use leaderboard::Leaderboard;
pub use models::{Difficulty, Question};
pub use session::{
    Controller, Round, RoundOutcome, Session, SessionError, SessionState, ROUND_SECONDS,
    TOTAL_ROUNDS,
};
pub use source::{BoxedSource, OpenTriviaSource, QuestionSource, SourceError, decode_html_entities};

/// Interval between countdown ticks.
const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Error type for quiz operations.
#[derive(Debug)]
pub enum QuizError {
    /// Failed to set up the question source.
    Source(SourceError),
    /// IO error during quiz execution.
    Io(io::Error),
}

impl std::fmt::Display for QuizError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuizError::Source(e) => write!(f, "Failed to set up question source: {}", e),
            QuizError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for QuizError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QuizError::Source(e) => Some(e),
            QuizError::Io(e) => Some(e),
        }
    }
}

impl From<SourceError> for QuizError {
    fn from(err: SourceError) -> Self {
        QuizError::Source(err)
    }
}

impl From<io::Error> for QuizError {
    fn from(err: io::Error) -> Self {
        QuizError::Io(err)
    }
}

/// A quiz instance that can be run in the terminal.
pub struct Quiz {
    app: App,
    preselected: Option<Difficulty>,
}

impl Quiz {
    /// Create a quiz backed by the Open Trivia Database.
    ///
    /// With `Some(difficulty)` the selector is skipped and round 1 loads
    /// immediately.
    pub fn new(preselected: Option<Difficulty>) -> Result<Self, QuizError> {
        let source = OpenTriviaSource::new()?;
        Ok(Self::with_source(Box::new(source), preselected))
    }

    /// Create a quiz over a custom question source.
    pub fn with_source(source: BoxedSource, preselected: Option<Difficulty>) -> Self {
        Self {
            app: App::new(source),
            preselected,
        }
    }

    /// Run the quiz in the terminal.
    ///
    /// This will take over the terminal, display the quiz UI, and return
    /// when the user quits.
    pub async fn run(mut self) -> Result<(), QuizError> {
        if let Some(difficulty) = self.preselected {
            self.app.preselect(difficulty);
            // A failure here falls back to the selector with a retry banner.
            self.app.confirm_difficulty().await;
        }

        let mut term = terminal::init()?;
        let result = run_event_loop(&mut term, &mut self.app).await;
        terminal::restore()?;
        result
    }

    /// Get a reference to the underlying app for custom handling.
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Get a mutable reference to the underlying app for custom handling.
    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}

async fn run_event_loop(
    terminal: &mut terminal::AppTerminal,
    app: &mut App,
) -> Result<(), QuizError> {
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        // Block on input at most until the next countdown tick is due.
        let timeout = TICK_INTERVAL.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_input(app, key.code).await;
                }
            }
        }

        if last_tick.elapsed() >= TICK_INTERVAL {
            app.tick();
            last_tick = Instant::now();
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

async fn handle_input(app: &mut App, key: KeyCode) {
    match app.session().state() {
        SessionState::SelectingDifficulty => handle_welcome_input(app, key).await,
        SessionState::AwaitingAnswer => handle_round_input(app, key),
        SessionState::RoundScored => handle_reveal_input(app, key).await,
        SessionState::GameOver => handle_result_input(app, key),
    }
}

async fn handle_welcome_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.select_previous_difficulty(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_difficulty(),
        KeyCode::Enter => app.confirm_difficulty().await,
        KeyCode::Char('q') | KeyCode::Char('Q') => app.should_quit = true,
        _ => {}
    }
}

fn handle_round_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.select_previous_option(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_option(),
        KeyCode::Enter | KeyCode::Char(' ') => app.submit_selected(),
        KeyCode::Char('q') | KeyCode::Char('Q') => app.should_quit = true,
        _ => {}
    }
}

async fn handle_reveal_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Enter | KeyCode::Char(' ') => app.next_round().await,
        KeyCode::Char('q') | KeyCode::Char('Q') => app.should_quit = true,
        _ => {}
    }
}

fn handle_result_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char('r') | KeyCode::Char('R') => app.restart(),
        KeyCode::Char('q') | KeyCode::Char('Q') => app.should_quit = true,
        _ => {}
    }
}
