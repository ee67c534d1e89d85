use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::app::GenerateScreen;
use crate::flow::{FieldErrors, GenerateState, QuizForm};
use crate::models::{ArticlePreview, SummaryContent};

use super::{modal, render_controls, render_header};

const URL_PLACEHOLDER: &str = "https://en.wikipedia.org/wiki/Alan_Turing";

pub fn render(frame: &mut Frame, area: Rect, screen: &GenerateScreen) {
    let state = screen.flow.state();
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    let status = format!("status: {}", state.status_label());
    render_header(frame, chunks[0], "GENERATE QUIZ", &status);

    match state {
        GenerateState::Idle { url_input, error } => {
            render_url_entry(frame, chunks[2], url_input, error.as_deref(), false);
            render_controls(frame, chunks[3], "type a URL  ·  enter validate & preview  ·  esc back");
        }
        GenerateState::Validating { url } => {
            render_url_entry(frame, chunks[2], url, None, true);
            render_controls(frame, chunks[3], "esc back");
        }
        GenerateState::PreviewReady {
            preview,
            form,
            field_errors,
            ..
        } => {
            render_configure(frame, chunks[2], preview, form, Some(field_errors), screen.section_cursor);
            render_controls(
                frame,
                chunks[3],
                "h/l difficulty  ·  j/k move  ·  space toggle section  ·  enter generate  ·  e edit url  ·  esc back",
            );
        }
        GenerateState::Submitting { preview, form, .. } => {
            render_configure(frame, chunks[2], preview, form, None, screen.section_cursor);
            render_submitting_modal(frame, area, preview);
        }
        GenerateState::Failed {
            preview,
            form,
            message,
            ..
        } => {
            render_configure(frame, chunks[2], preview, form, None, screen.section_cursor);
            modal::render(
                frame,
                area,
                "Quiz generation failed",
                Color::Red,
                vec![
                    Line::from(Span::styled(message.as_str(), Style::default().fg(Color::White))),
                    Line::from(""),
                    Line::from("enter / esc to close and retry".fg(Color::DarkGray)),
                ],
            );
        }
        GenerateState::Succeeded { .. } => {}
    }
}

fn render_url_entry(frame: &mut Frame, area: Rect, input: &str, error: Option<&str>, checking: bool) {
    let mut content = vec![
        Line::from("Wikipedia URL".fg(Color::Gray)),
        Line::from(""),
    ];

    if input.is_empty() {
        content.push(Line::from(vec![
            Span::styled("_", Style::default().fg(Color::Yellow)),
            Span::styled(URL_PLACEHOLDER, Style::default().fg(Color::DarkGray)),
        ]));
    } else {
        let cursor = if checking { "" } else { "_" };
        content.push(Line::from(vec![
            Span::styled(input, Style::default().fg(Color::Yellow)),
            Span::styled(cursor, Style::default().fg(Color::Yellow)),
        ]));
    }

    content.push(Line::from(""));
    if checking {
        content.push(Line::from("Checking...".fg(Color::Yellow)));
    } else if let Some(error) = error {
        content.push(Line::from(Span::styled(error, Style::default().fg(Color::Red))));
    }

    let widget = Paragraph::new(content).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .padding(Padding::uniform(1)),
    );
    frame.render_widget(widget, area);
}

fn render_configure(
    frame: &mut Frame,
    area: Rect,
    preview: &ArticlePreview,
    form: &QuizForm,
    field_errors: Option<&FieldErrors>,
    cursor: usize,
) {
    let errors = field_errors.cloned().unwrap_or_default();

    let mut content = vec![
        Line::from(vec![
            Span::styled("Title: ", Style::default().fg(Color::Gray)),
            Span::styled(preview.title.as_str(), Style::default().fg(Color::White).bold()),
        ]),
        Line::from(""),
    ];

    let difficulty = form
        .difficulty
        .map(|d| d.as_str())
        .unwrap_or("not selected");
    content.push(Line::from(vec![
        Span::styled("Difficulty: ", Style::default().fg(Color::Gray)),
        Span::styled(
            format!("< {} >", difficulty),
            Style::default().fg(Color::Cyan).bold(),
        ),
    ]));
    push_field_error(&mut content, errors.difficulty.as_deref());
    content.push(Line::from(""));

    content.push(Line::from(vec![
        Span::styled("Focus sections ", Style::default().fg(Color::Gray)),
        Span::styled(
            format!("({} selected)", form.sections.len()),
            Style::default().fg(Color::DarkGray),
        ),
    ]));
    push_field_error(&mut content, errors.sections.as_deref());
    push_field_error(&mut content, errors.url.as_deref());

    if preview.sections.is_empty() {
        content.push(Line::from("  No sections found for this article.".fg(Color::DarkGray)));
    }
    for (index, section) in preview.sections.iter().enumerate() {
        let is_cursor = index == cursor;
        let checked = if form.sections.contains(section) { "[x]" } else { "[ ]" };
        let style = if is_cursor {
            Style::default().fg(Color::Cyan).bold()
        } else if form.sections.contains(section) {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::Gray)
        };
        let marker = if is_cursor { ">" } else { " " };
        content.push(Line::from(Span::styled(
            format!(" {} {} {}", marker, checked, section),
            style,
        )));
    }

    // Keep the highlighted section in view on long lists.
    let visible = area.height.saturating_sub(4) as usize;
    let header_lines = content.len() - preview.sections.len();
    let scroll = (header_lines + cursor + 1).saturating_sub(visible) as u16;

    let widget = Paragraph::new(content).scroll((scroll, 0)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .padding(Padding::uniform(1)),
    );
    frame.render_widget(widget, area);
}

fn push_field_error(content: &mut Vec<Line>, error: Option<&str>) {
    if let Some(error) = error {
        content.push(Line::from(Span::styled(
            format!("  {}", error),
            Style::default().fg(Color::Red),
        )));
    }
}

fn render_submitting_modal(frame: &mut Frame, area: Rect, preview: &ArticlePreview) {
    let mut content = vec![
        Line::from(Span::styled(
            preview.title.as_str(),
            Style::default().fg(Color::White).bold(),
        )),
        Line::from(""),
    ];

    match &preview.summary {
        Some(SummaryContent::Text(text)) => {
            content.push(Line::from(Span::styled(text.as_str(), Style::default().fg(Color::Gray))));
        }
        Some(SummaryContent::Points(points)) => {
            for point in points {
                content.push(Line::from(Span::styled(
                    format!("• {}", point),
                    Style::default().fg(Color::Gray),
                )));
            }
        }
        None => {}
    }

    content.push(Line::from(""));
    content.push(Line::from(
        "Generating your quiz, this can take a minute...".fg(Color::Yellow),
    ));

    modal::render(frame, area, "Generating quiz", Color::Cyan, content);
}
