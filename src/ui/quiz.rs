use ratatui::{
    prelude::*,
    widgets::{Paragraph, Wrap},
};

use crate::app::App;
use crate::session::{Round, TOTAL_ROUNDS};

const OPTION_LABELS: [char; 4] = ['A', 'B', 'C', 'D'];

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(round) = app.session().current_round() else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(2),
        Constraint::Length(1),
    ])
    .margin(2)
    .split(area);

    render_status_line(frame, chunks[0], app, round);
    render_countdown(frame, chunks[1], round);
    render_prompt(frame, chunks[2], &round.question.prompt);
    render_choices(frame, chunks[3], app, round);
    render_verdict(frame, chunks[4], app, round);
    render_controls(frame, chunks[5], round);
}

fn render_status_line(frame: &mut Frame, area: Rect, app: &App, round: &Round) {
    let progress = format!("Round {}/{}", round.index, TOTAL_ROUNDS);
    let widget = Paragraph::new(progress).fg(Color::DarkGray);
    frame.render_widget(widget, area);

    let score = format!("Score: {}", app.session().score());
    let widget = Paragraph::new(score)
        .alignment(Alignment::Right)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

fn render_countdown(frame: &mut Frame, area: Rect, round: &Round) {
    let remaining = round.time_remaining_secs;
    let color = match remaining {
        0..=5 => Color::Red,
        6..=10 => Color::Yellow,
        _ => Color::Green,
    };

    let text = if round.is_scored && round.user_answer.is_none() {
        "Time's up!".to_string()
    } else {
        format!("Time left: {}s", remaining)
    };

    let widget = Paragraph::new(text)
        .alignment(Alignment::Right)
        .fg(color)
        .bold();
    frame.render_widget(widget, area);
}

fn render_prompt(frame: &mut Frame, area: Rect, prompt: &str) {
    let widget = Paragraph::new(prompt)
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(widget, area);
}

fn render_choices(frame: &mut Frame, area: Rect, app: &App, round: &Round) {
    let mut lines: Vec<Line> = Vec::with_capacity(round.question.choices.len() * 2);

    for (index, choice) in round.question.choices.iter().enumerate() {
        let is_selected = index == app.selected_option();
        let style = if round.is_scored {
            reveal_style(round, choice)
        } else if is_selected {
            Style::default().fg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::Gray)
        };
        let marker = if is_selected && !round.is_scored {
            ">"
        } else {
            " "
        };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(format!("{}. ", OPTION_LABELS[index]), style),
            Span::styled(choice.as_str(), style),
        ]));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn reveal_style(round: &Round, choice: &str) -> Style {
    if round.question.is_correct(choice) {
        Style::default().fg(Color::Green).bold()
    } else if round.user_answer.as_deref() == Some(choice) {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn render_verdict(frame: &mut Frame, area: Rect, app: &App, round: &Round) {
    if !round.is_scored {
        return;
    }

    let mut lines = Vec::new();
    match round.user_answer.as_deref() {
        Some(choice) if round.question.is_correct(choice) => {
            lines.push(Line::from(Span::styled(
                "Correct!",
                Style::default().fg(Color::Green).bold(),
            )));
        }
        Some(_) => {
            lines.push(Line::from(Span::styled(
                format!("Wrong! The correct answer was {}.", round.question.correct_answer),
                Style::default().fg(Color::Red),
            )));
        }
        None => {
            lines.push(Line::from(Span::styled(
                format!("Out of time! The correct answer was {}.", round.question.correct_answer),
                Style::default().fg(Color::Red),
            )));
        }
    }

    if let Some(error) = app.fetch_error() {
        lines.push(Line::from(Span::styled(
            format!("{} — press enter to retry", error),
            Style::default().fg(Color::Yellow),
        )));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_controls(frame: &mut Frame, area: Rect, round: &Round) {
    let text = if round.is_scored {
        "enter continue  ·  q quit"
    } else {
        "j/k navigate  ·  enter answer  ·  q quit"
    };
    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
