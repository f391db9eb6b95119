mod quiz;
mod result;
mod welcome;

use ratatui::{prelude::*, widgets::Block};

use crate::app::App;
use crate::session::SessionState;

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match app.session().state() {
        SessionState::SelectingDifficulty => welcome::render(frame, area, app),
        SessionState::AwaitingAnswer | SessionState::RoundScored => quiz::render(frame, area, app),
        SessionState::GameOver => result::render(frame, area, app),
    }
}
