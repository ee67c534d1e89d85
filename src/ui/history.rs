use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::app::{HistoryScreen, Loadable};
use crate::models::HistoryEntry;

use super::{render_controls, render_header, truncate};

const TITLE_WIDTH: usize = 30;
const URL_WIDTH: usize = 44;

pub fn render(frame: &mut Frame, area: Rect, screen: &HistoryScreen) {
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    let count = match &screen.entries {
        Loadable::Loaded(entries) => format!("{} quizzes", entries.len()),
        _ => String::new(),
    };
    render_header(frame, chunks[0], "HISTORY", &count);

    let body = match &screen.entries {
        Loadable::Loading => Paragraph::new("Loading history...").fg(Color::Yellow),
        Loadable::Failed(message) => Paragraph::new(vec![
            Line::from(Span::styled(message.as_str(), Style::default().fg(Color::Red))),
            Line::from(""),
            Line::from("press r to retry".fg(Color::DarkGray)),
        ]),
        Loadable::Loaded(entries) if entries.is_empty() => {
            Paragraph::new("No data yet.").fg(Color::DarkGray)
        }
        Loadable::Loaded(entries) => entries_table(entries, screen.selected, chunks[2].height),
    };

    frame.render_widget(
        body.block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .padding(Padding::horizontal(1)),
        ),
        chunks[2],
    );
    render_controls(
        frame,
        chunks[3],
        "j/k navigate  ·  enter details  ·  r reload  ·  esc back  ·  q quit",
    );
}

fn entries_table(entries: &[HistoryEntry], selected: usize, height: u16) -> Paragraph<'static> {
    let mut lines = vec![Line::from(Span::styled(
        format!(
            "   {:<5} {:<tw$} {:<uw$} {}",
            "ID",
            "Title",
            "URL",
            "Date",
            tw = TITLE_WIDTH,
            uw = URL_WIDTH
        ),
        Style::default().fg(Color::Cyan).bold(),
    ))];

    for (index, entry) in entries.iter().enumerate() {
        let is_selected = index == selected;
        let style = if is_selected {
            Style::default().fg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::Gray)
        };
        let marker = if is_selected { ">" } else { " " };

        lines.push(Line::from(Span::styled(
            format!(
                " {} {:<5} {:<tw$} {:<uw$} {}",
                marker,
                entry.id,
                truncate(&entry.title, TITLE_WIDTH),
                truncate(&entry.url, URL_WIDTH),
                entry.date_generated,
                tw = TITLE_WIDTH,
                uw = URL_WIDTH
            ),
            style,
        )));
    }

    // Header plus borders.
    let visible = height.saturating_sub(3) as usize;
    let scroll = (selected + 1).saturating_sub(visible) as u16;
    Paragraph::new(lines).scroll((scroll, 0))
}

#[cfg(test)]
mod tests {
    use crate::app::{App, Response};
    use crate::models::{GeneratedAt, HistoryEntry};
    use crate::ui::tests::render_to_string;

    #[test]
    fn test_history_rows() {
        let mut app = App::new();
        app.open_history();
        app.apply(Response::History(Ok(vec![
            HistoryEntry {
                id: 1,
                url: "https://en.wikipedia.org/wiki/Alan_Turing".to_string(),
                title: "Alan Turing".to_string(),
                date_generated: GeneratedAt::parse("2025-11-06T10:15:30.5"),
            },
            HistoryEntry {
                id: 2,
                url: "https://en.wikipedia.org/wiki/Ada_Lovelace".to_string(),
                title: "Ada Lovelace".to_string(),
                date_generated: GeneratedAt::parse("not a date"),
            },
        ])));

        let text = render_to_string(&app, 120, 20);
        assert!(text.contains("2 quizzes"));
        assert!(text.contains("> 1"));
        assert!(text.contains("2025-11-06 10:15"));
        assert!(text.contains("not a date"));
        assert!(text.contains("Ada Lovelace"));
    }

    #[test]
    fn test_empty_history() {
        let mut app = App::new();
        app.open_history();
        app.apply(Response::History(Ok(Vec::new())));
        assert!(render_to_string(&app, 80, 12).contains("No data yet."));
    }
}
