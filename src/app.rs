//! Host application state.
//!
//! [`App`] glues the session controller, the leaderboard, and the cursor
//! state the TUI needs. It owns the session's lifetime: a new session per
//! game, with the finished score recorded before a replay.

use crate::leaderboard::Leaderboard;
use crate::models::Difficulty;
use crate::session::{Controller, Session, SessionError, SessionState};
use crate::source::BoxedSource;

const NUM_OPTIONS: usize = 4;

pub struct App {
    controller: Controller,
    leaderboard: Leaderboard,
    difficulty_cursor: usize,
    selected_option: usize,
    fetch_error: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new(source: BoxedSource) -> Self {
        Self {
            controller: Controller::new(source),
            leaderboard: Leaderboard::new(),
            difficulty_cursor: 0,
            selected_option: 0,
            fetch_error: None,
            should_quit: false,
        }
    }

    pub fn session(&self) -> &Session {
        self.controller.session()
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    /// The last fetch failure, shown as a retry banner.
    pub fn fetch_error(&self) -> Option<&str> {
        self.fetch_error.as_deref()
    }

    pub fn selected_option(&self) -> usize {
        self.selected_option
    }

    pub fn difficulty_cursor(&self) -> usize {
        self.difficulty_cursor
    }

    pub fn highlighted_difficulty(&self) -> Difficulty {
        Difficulty::ALL[self.difficulty_cursor]
    }

    /// Move the selector cursor onto the given difficulty.
    pub fn preselect(&mut self, difficulty: Difficulty) {
        if let Some(position) = Difficulty::ALL.iter().position(|d| *d == difficulty) {
            self.difficulty_cursor = position;
        }
    }

    pub fn select_next_difficulty(&mut self) {
        self.difficulty_cursor = (self.difficulty_cursor + 1) % Difficulty::ALL.len();
    }

    pub fn select_previous_difficulty(&mut self) {
        self.difficulty_cursor =
            (self.difficulty_cursor + Difficulty::ALL.len() - 1) % Difficulty::ALL.len();
    }

    pub fn select_next_option(&mut self) {
        self.selected_option = (self.selected_option + 1) % NUM_OPTIONS;
    }

    pub fn select_previous_option(&mut self) {
        self.selected_option = (self.selected_option + NUM_OPTIONS - 1) % NUM_OPTIONS;
    }

    /// Commit the highlighted difficulty and start the game. A fetch
    /// failure lands in the retry banner and the selector stays open.
    pub async fn confirm_difficulty(&mut self) {
        let difficulty = self.highlighted_difficulty();
        match self.controller.select_difficulty(difficulty).await {
            Ok(_) => {
                self.fetch_error = None;
                self.selected_option = 0;
            }
            Err(e) => self.note_session_error(e),
        }
    }

    /// Submit the highlighted choice for the live round.
    ///
    /// An `InvalidState` here means the countdown beat the keypress to the
    /// scoring; the round keeps its first outcome and the input is dropped.
    pub fn submit_selected(&mut self) {
        let Some(choice) = self
            .session()
            .current_round()
            .map(|round| round.question.choices[self.selected_option].clone())
        else {
            return;
        };

        if let Err(e) = self.controller.submit_answer(&choice) {
            log::debug!("submission ignored: {}", e);
        }
    }

    /// Move past the scored round. Records the final score on the
    /// leaderboard when this ends the game.
    pub async fn next_round(&mut self) {
        match self.controller.advance().await {
            Ok(session) => {
                self.fetch_error = None;
                self.selected_option = 0;
                if session.state() == SessionState::GameOver {
                    let score = session.score();
                    self.leaderboard.record(score);
                }
            }
            Err(e) => self.note_session_error(e),
        }
    }

    pub fn tick(&mut self) {
        self.controller.tick();
    }

    /// Start a fresh game after the summary screen.
    pub fn restart(&mut self) {
        self.controller.reset();
        self.difficulty_cursor = 0;
        self.selected_option = 0;
        self.fetch_error = None;
    }

    fn note_session_error(&mut self, err: SessionError) {
        match err {
            SessionError::QuestionUnavailable(source_err) => {
                log::warn!("question fetch failed: {}", source_err);
                self.fetch_error = Some(source_err.to_string());
            }
            other => log::debug!("ignored: {}", other),
        }
    }
}
