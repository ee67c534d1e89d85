mod detail;
mod generate;
mod history;
mod landing;
mod modal;
mod quiz;
mod quiz_display;
mod scorecard;

use ratatui::{
    prelude::*,
    widgets::{Block, Paragraph},
};

use crate::app::{App, Screen};

const APP_TITLE: &str = "AI WIKI QUIZ";

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match &app.screen {
        Screen::Landing(screen) => landing::render(frame, area, screen),
        Screen::Generate(screen) => generate::render(frame, area, screen),
        Screen::History(screen) => history::render(frame, area, screen),
        Screen::QuizDetail(screen) => detail::render(frame, area, screen),
        Screen::TakeQuiz(screen) => quiz::render(frame, area, screen),
        Screen::Scorecard(screen) => scorecard::render(frame, area, screen),
    }
}

fn render_controls(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

fn render_header(frame: &mut Frame, area: Rect, title: &str, right: &str) {
    let chunks = Layout::horizontal([Constraint::Fill(1), Constraint::Length(right.len() as u16)])
        .split(area);
    frame.render_widget(
        Paragraph::new(title).style(Style::default().fg(Color::Cyan).bold()),
        chunks[0],
    );
    frame.render_widget(
        Paragraph::new(right)
            .alignment(Alignment::Right)
            .fg(Color::DarkGray),
        chunks[1],
    );
}

fn truncate(text: &str, max_chars: usize) -> String {
    let char_count = text.chars().count();
    if char_count > max_chars {
        let truncated: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", truncated)
    } else {
        text.to_string()
    }
}
