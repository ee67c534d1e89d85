//! Centered overlay drawn on top of the current screen.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap},
};

const MODAL_WIDTH_PERCENT: u16 = 70;
/// Border plus padding on each side.
const FRAME_SIZE: u16 = 2;

/// Draws `content` in a box tall enough for its wrapped text, clamped to
/// `area`.
pub fn render(frame: &mut Frame, area: Rect, title: &str, accent: Color, content: Vec<Line>) {
    let column = centered_column(area, MODAL_WIDTH_PERCENT);
    let text_width = column.width.saturating_sub(2 * FRAME_SIZE);

    let paragraph = Paragraph::new(content).wrap(Wrap { trim: true });
    let text_height = u16::try_from(paragraph.line_count(text_width)).unwrap_or(u16::MAX);
    let height = text_height.saturating_add(2 * FRAME_SIZE).min(area.height);
    let popup = centered_row(column, height);

    let widget = paragraph.block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent))
            .title(format!(" {} ", title))
            .title_style(Style::default().fg(accent).bold())
            .padding(Padding::uniform(1)),
    );

    frame.render_widget(Clear, popup);
    frame.render_widget(widget, popup);
}

fn centered_column(area: Rect, width_percent: u16) -> Rect {
    Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .split(area)[1]
}

fn centered_row(column: Rect, height: u16) -> Rect {
    Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .split(column)[1]
}
