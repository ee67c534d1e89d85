use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::app::TakeQuizScreen;
use crate::models::Question;

use super::quiz_display::difficulty_color;
use super::{render_controls, render_header};

const OPTION_LABELS: [char; 8] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H'];

pub fn render(frame: &mut Frame, area: Rect, screen: &TakeQuizScreen) {
    let session = &screen.session;
    let (Some(question), Some(index)) = (session.current_question(), session.current_index()) else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(5),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    let progress = format!("{}/{}", index + 1, session.total_questions());
    render_header(frame, chunks[0], &session.quiz().title, &progress);
    render_badges(frame, chunks[1], question);
    render_question_text(frame, chunks[2], &question.text);
    render_options(frame, chunks[3], &question.options, screen.cursor);
    render_controls(frame, chunks[4], "j/k navigate  ·  enter select  ·  esc abandon  ·  q quit");
}

fn render_badges(frame: &mut Frame, area: Rect, question: &Question) {
    let mut spans = Vec::new();
    if let Some(label) = &question.difficulty {
        spans.push(Span::styled(
            format!("[{}]", label),
            Style::default().fg(difficulty_color(question.difficulty_level())),
        ));
    }
    if let Some(section) = &question.section {
        spans.push(Span::styled(
            format!("  {}", section),
            Style::default().fg(Color::DarkGray),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_question_text(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::White).bold())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(widget, area);
}

fn render_options(frame: &mut Frame, area: Rect, options: &[String], selected: usize) {
    let items: Vec<ListItem> = options
        .iter()
        .zip(OPTION_LABELS.iter().copied().chain(std::iter::repeat('-')))
        .map(|(option, label)| {
            ListItem::new(vec![Line::from(format!("{label}. {option}")), Line::from("")])
        })
        .collect();

    let list = List::new(items)
        .style(Style::default().fg(Color::Gray))
        .highlight_style(Style::default().fg(Color::Cyan).bold())
        .highlight_symbol("> ")
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Options ")
                .title_style(Style::default().fg(Color::Cyan))
                .padding(Padding::horizontal(1)),
        );

    let mut state = ListState::default().with_selected(Some(selected));
    frame.render_stateful_widget(list, area, &mut state);
}
