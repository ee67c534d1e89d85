use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::app::{LandingScreen, LANDING_ITEMS};

use super::APP_TITLE;

pub fn render(frame: &mut Frame, area: Rect, screen: &LandingScreen) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(13),
        Constraint::Fill(1),
    ])
    .split(area);

    let mut content = vec![
        Line::from(""),
        Line::from(Span::styled(
            APP_TITLE,
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from("Learn from Wikipedia with AI-generated quizzes.".fg(Color::DarkGray)),
        Line::from(""),
    ];

    for (index, item) in LANDING_ITEMS.iter().enumerate() {
        let is_selected = index == screen.selected;
        let style = if is_selected {
            Style::default().fg(Color::Green).bold()
        } else {
            Style::default().fg(Color::Gray)
        };
        let marker = if is_selected { ">" } else { " " };
        content.push(Line::from(Span::styled(
            format!("{} {} ", marker, item),
            style,
        )));
    }

    content.push(Line::from(""));
    match &screen.notice {
        Some(notice) => content.push(Line::from(Span::styled(
            notice.as_str(),
            Style::default().fg(Color::Yellow),
        ))),
        None => content.push(Line::from("")),
    }
    content.push(Line::from(
        "j/k navigate  ·  enter select  ·  g generate  ·  h history  ·  q quit".fg(Color::DarkGray),
    ));

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray),
    );

    frame.render_widget(widget, chunks[1]);
}

#[cfg(test)]
mod tests {
    use crate::app::App;
    use crate::ui::tests::render_to_string;

    #[test]
    fn test_landing_lists_menu() {
        let mut app = App::new();
        app.start_quiz(None);
        let text = render_to_string(&app, 100, 30);
        assert!(text.contains("AI WIKI QUIZ"));
        assert!(text.contains("> Generate Quiz"));
        assert!(text.contains("View History"));
        assert!(text.contains("Cannot take quiz"));
    }
}
