use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::app::App;
use crate::session::TOTAL_ROUNDS;

const PROMPT_PREVIEW_LENGTH: usize = 55;
const LEADERBOARD_DISPLAY_LIMIT: usize = 10;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let score = app.session().score();
    let percentage = (score as f64 / TOTAL_ROUNDS as f64) * 100.0;
    let grade_color = get_grade_color(percentage);

    let leaderboard_height =
        app.leaderboard().len().min(LEADERBOARD_DISPLAY_LIMIT) as u16 + 2;

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(6),
        Constraint::Fill(1),
        Constraint::Length(leaderboard_height),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    render_score_summary(frame, chunks[1], score, percentage, grade_color);
    render_round_breakdown(frame, chunks[2], app);
    render_leaderboard(frame, chunks[3], app);
    render_controls(frame, chunks[4]);
}

fn get_grade_color(percentage: f64) -> Color {
    match percentage as u32 {
        90..=100 => Color::Green,
        70..=89 => Color::Cyan,
        50..=69 => Color::Yellow,
        _ => Color::Red,
    }
}

fn render_score_summary(
    frame: &mut Frame,
    area: Rect,
    score: u32,
    percentage: f64,
    grade_color: Color,
) {
    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "GAME OVER",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} / {}  ({:.0}%)", score, TOTAL_ROUNDS, percentage),
            Style::default().fg(grade_color).bold(),
        )),
        Line::from(""),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_round_breakdown(frame: &mut Frame, area: Rect, app: &App) {
    let lines: Vec<Line> = app
        .session()
        .history()
        .iter()
        .map(|outcome| {
            let (symbol, color) = if outcome.was_correct {
                ("+", Color::Green)
            } else {
                ("-", Color::Red)
            };

            Line::from(vec![
                Span::styled(format!(" {} ", symbol), Style::default().fg(color)),
                Span::styled(
                    format!("{:2}. ", outcome.index),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    truncate_prompt(&outcome.prompt),
                    Style::default().fg(Color::Gray),
                ),
            ])
        })
        .collect();

    let widget =
        Paragraph::new(lines).block(Block::default().padding(Padding::horizontal(1)));
    frame.render_widget(widget, area);
}

fn render_leaderboard(frame: &mut Frame, area: Rect, app: &App) {
    let mut lines = vec![
        Line::from(Span::styled(
            " LEADERBOARD",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
    ];

    for (rank, score) in app
        .leaderboard()
        .ranked()
        .into_iter()
        .take(LEADERBOARD_DISPLAY_LIMIT)
        .enumerate()
    {
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {:2}. ", rank + 1),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(
                format!("{}/{}", score, TOTAL_ROUNDS),
                Style::default().fg(Color::Gray),
            ),
        ]));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn truncate_prompt(text: &str) -> String {
    let char_count = text.chars().count();
    if char_count > PROMPT_PREVIEW_LENGTH {
        let truncated: String = text.chars().take(PROMPT_PREVIEW_LENGTH).collect();
        format!("{}...", truncated)
    } else {
        text.to_string()
    }
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("r play again  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
