use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::app::ScorecardScreen;
use crate::flow::{review_rows, Tier};
use crate::models::ScoreResult;

use super::quiz_display::quiz_lines;
use super::{render_controls, render_header, truncate};

const QUESTION_PREVIEW_LENGTH: usize = 60;

pub fn render(frame: &mut Frame, area: Rect, screen: &ScorecardScreen) {
    if screen.reviewing {
        render_review(frame, area, screen);
        return;
    }

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(8),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    render_score_summary(frame, chunks[1], &screen.result);
    render_question_breakdown(frame, chunks[2], &screen.result);
    render_controls(
        frame,
        chunks[3],
        "v view submission  ·  r retake  ·  enter dashboard  ·  q quit",
    );
}

fn tier_color(tier: Tier) -> Color {
    match tier {
        Tier::Top => Color::Green,
        Tier::Middle => Color::Yellow,
        Tier::Bottom => Color::Red,
    }
}

fn render_score_summary(frame: &mut Frame, area: Rect, result: &ScoreResult) {
    let tier = Tier::for_result(result);
    let color = tier_color(tier);

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "YOUR SCORE",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} / {}  ({:.0}%)", result.score, result.total, result.percentage()),
            Style::default().fg(color).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(tier.message(), Style::default().fg(color))),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_question_breakdown(frame: &mut Frame, area: Rect, result: &ScoreResult) {
    let lines: Vec<Line> = review_rows(result)
        .into_iter()
        .map(|row| {
            let (symbol, color) = if row.is_correct {
                ("+", Color::Green)
            } else {
                ("-", Color::Red)
            };

            Line::from(vec![
                Span::styled(format!(" {} ", symbol), Style::default().fg(color)),
                Span::styled(
                    format!("{:2}. ", row.number),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    truncate(&row.question.text, QUESTION_PREVIEW_LENGTH),
                    Style::default().fg(Color::Gray),
                ),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines).block(Block::default().padding(Padding::horizontal(1)));
    frame.render_widget(widget, area);
}

fn render_review(frame: &mut Frame, area: Rect, screen: &ScorecardScreen) {
    let result = &screen.result;
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    let score = format!("{} / {}", result.score, result.total);
    render_header(frame, chunks[0], "YOUR SUBMISSION REVIEW", &score);

    let widget = Paragraph::new(quiz_lines(&result.quiz.questions, Some(&result.answers)))
        .wrap(Wrap { trim: false })
        .scroll((screen.scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(format!(" {} ", result.quiz.title))
                .title_style(Style::default().fg(Color::Cyan))
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(widget, chunks[2]);
    render_controls(frame, chunks[3], "j/k scroll  ·  v / esc back to score  ·  q quit");
}
