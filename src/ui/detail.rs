use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::app::{DetailScreen, Loadable};
use crate::models::{KeyEntities, Quiz};

use super::quiz_display::quiz_lines;
use super::{render_controls, render_header};

pub fn render(frame: &mut Frame, area: Rect, screen: &DetailScreen) {
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    let id = screen.id.map(|id| format!("#{}", id)).unwrap_or_default();

    match &screen.quiz {
        Loadable::Loading => {
            render_header(frame, chunks[0], "QUIZ", &id);
            frame.render_widget(
                Paragraph::new("Loading quiz...").fg(Color::Yellow),
                chunks[2],
            );
            render_controls(frame, chunks[3], "esc back");
        }
        Loadable::Failed(message) => {
            render_header(frame, chunks[0], "QUIZ", &id);
            let content = vec![
                Line::from(Span::styled(message.as_str(), Style::default().fg(Color::Red))),
                Line::from(""),
                Line::from("Failed to load quiz. Press r to retry.".fg(Color::DarkGray)),
            ];
            frame.render_widget(Paragraph::new(content).wrap(Wrap { trim: true }), chunks[2]);
            render_controls(frame, chunks[3], "r retry  ·  h history  ·  esc back");
        }
        Loadable::Loaded(quiz) => {
            render_header(frame, chunks[0], &quiz.title, &id);
            render_subtitle(frame, chunks[1], quiz);
            render_body(frame, chunks[2], quiz, screen.scroll);
            render_controls(
                frame,
                chunks[3],
                "t take quiz  ·  j/k scroll  ·  h history  ·  esc back  ·  q quit",
            );
        }
    }
}

fn render_subtitle(frame: &mut Frame, area: Rect, quiz: &Quiz) {
    let mut text = quiz.url.clone();
    if let Some(date) = &quiz.date_generated {
        text.push_str(&format!("  ·  {}", date));
    }
    text.push_str(&format!("  ·  {} questions", quiz.total_questions()));
    frame.render_widget(Paragraph::new(text).fg(Color::DarkGray), area);
}

fn render_body(frame: &mut Frame, area: Rect, quiz: &Quiz, scroll: u16) {
    let mut lines = article_lines(quiz);
    lines.extend(quiz_lines(&quiz.questions, None));

    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(widget, area);
}

fn article_lines(quiz: &Quiz) -> Vec<Line<'static>> {
    let details = &quiz.details;
    let mut lines = Vec::new();

    if let Some(summary) = &details.summary {
        lines.push(section_title("Summary"));
        lines.push(Line::from(Span::styled(
            summary.clone(),
            Style::default().fg(Color::Gray),
        )));
        lines.push(Line::from(""));
    }

    if let Some(entities) = &details.key_entities {
        lines.push(section_title("Key entities"));
        lines.extend(entity_lines(entities));
        lines.push(Line::from(""));
    }

    if !details.sections.is_empty() {
        lines.push(section_title("Sections"));
        lines.push(Line::from(Span::styled(
            details.sections.join(", "),
            Style::default().fg(Color::Gray),
        )));
        lines.push(Line::from(""));
    }

    if !details.related_topics.is_empty() {
        lines.push(section_title("Related topics"));
        lines.push(Line::from(Span::styled(
            details.related_topics.join(", "),
            Style::default().fg(Color::Gray),
        )));
        lines.push(Line::from(""));
    }

    lines.push(section_title("Questions"));
    lines
}

fn entity_lines(entities: &KeyEntities) -> Vec<Line<'static>> {
    [
        ("People", &entities.people),
        ("Organizations", &entities.organizations),
        ("Locations", &entities.locations),
    ]
    .into_iter()
    .filter_map(|(label, names)| {
        let names = names.as_ref().filter(|n| !n.is_empty())?;
        Some(Line::from(vec![
            Span::styled(format!("{}: ", label), Style::default().fg(Color::DarkGray)),
            Span::styled(names.join(", "), Style::default().fg(Color::Gray)),
        ]))
    })
    .collect()
}

fn section_title(title: &'static str) -> Line<'static> {
    Line::from(Span::styled(title, Style::default().fg(Color::Cyan).bold()))
}
