use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::app::App;
use crate::models::Difficulty;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(14),
        Constraint::Fill(1),
    ])
    .split(area);

    let mut content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "TRIVIA QUIZ",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from("5 Rounds · 30 Seconds Each".fg(Color::DarkGray)),
        Line::from(""),
    ];

    for (index, difficulty) in Difficulty::ALL.iter().enumerate() {
        let is_selected = index == app.difficulty_cursor();
        let style = if is_selected {
            Style::default().fg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::Gray)
        };
        let marker = if is_selected { ">" } else { " " };
        content.push(Line::from(Span::styled(
            format!("{} {}", marker, difficulty.label()),
            style,
        )));
    }

    content.push(Line::from(""));
    if let Some(error) = app.fetch_error() {
        content.push(Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(Color::Red),
        )));
        content.push(Line::from("enter retry  ·  q quit".fg(Color::DarkGray)));
    } else {
        content.push(Line::from(
            "j/k choose  ·  enter start  ·  q quit".fg(Color::DarkGray),
        ));
    }

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray),
    );

    frame.render_widget(widget, chunks[1]);
}
