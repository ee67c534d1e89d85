//! Full-quiz listing shared by the detail screen and the submission review.

use ratatui::prelude::*;

use crate::flow::{mark_options, OptionMark};
use crate::models::{AnswerSet, Difficulty, Question};

/// Unrecognised labels are shown like easy ones.
pub fn difficulty_color(level: Option<Difficulty>) -> Color {
    match level {
        Some(Difficulty::Hard) => Color::Red,
        Some(Difficulty::Medium) => Color::Yellow,
        Some(Difficulty::Easy) | None => Color::Green,
    }
}

/// One block of lines per question. With `answers`, the user's picks are
/// marked against the correct option.
pub fn quiz_lines(questions: &[Question], answers: Option<&AnswerSet>) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for (index, question) in questions.iter().enumerate() {
        let selected = answers.and_then(|a| a.get(index));
        lines.extend(question_lines(index + 1, question, selected, answers.is_some()));
        lines.push(Line::from(""));
    }

    lines
}

fn question_lines(
    number: usize,
    question: &Question,
    selected: Option<&str>,
    reviewing: bool,
) -> Vec<Line<'static>> {
    let mut header = vec![Span::styled(
        format!("{}. {}", number, question.text),
        Style::default().fg(Color::White).bold(),
    )];
    if let Some(label) = &question.difficulty {
        header.push(Span::styled(
            format!("  [{}]", label),
            Style::default().fg(difficulty_color(question.difficulty_level())),
        ));
    }

    let mut lines = vec![Line::from(header)];
    if let Some(section) = &question.section {
        lines.push(Line::from(Span::styled(
            format!("   Section: {}", section),
            Style::default().fg(Color::DarkGray),
        )));
    }

    for (option, mark) in mark_options(question, selected) {
        let picked = selected == Some(option);
        let (symbol, style) = match mark {
            OptionMark::Correct => ("✓", Style::default().fg(Color::Green)),
            OptionMark::Incorrect => ("✗", Style::default().fg(Color::Red)),
            OptionMark::Plain => (" ", Style::default().fg(Color::Gray)),
        };
        let style = if picked { style.bold() } else { style };
        let suffix = if picked { "  (your answer)" } else { "" };

        lines.push(Line::from(vec![
            Span::styled(format!("   {} ", symbol), style),
            Span::styled(option.to_string(), style),
            Span::styled(suffix, Style::default().fg(Color::DarkGray)),
        ]));
    }

    if reviewing && selected.is_none() {
        lines.push(Line::from(Span::styled(
            "   Not answered",
            Style::default().fg(Color::DarkGray),
        )));
    }

    lines.push(Line::from(Span::styled(
        format!("   Correct: {}", question.answer),
        Style::default().fg(Color::Green),
    )));
    if let Some(explanation) = &question.explanation {
        lines.push(Line::from(Span::styled(
            format!("   {}", explanation),
            Style::default().fg(Color::DarkGray).italic(),
        )));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::session::tests::question;

    fn plain(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_review_marks_wrong_pick() {
        let questions = vec![question("Q1", &["A", "B"], "A")];
        let mut answers = AnswerSet::new(1);
        answers.record(0, "B".to_string());

        let text: Vec<String> = quiz_lines(&questions, Some(&answers)).iter().map(plain).collect();
        assert!(text.iter().any(|l| l.contains("✓ A")));
        assert!(text.iter().any(|l| l.contains("✗ B") && l.contains("(your answer)")));
        assert!(text.iter().any(|l| l.contains("Correct: A")));
    }

    #[test]
    fn test_display_without_answers_marks_only_correct() {
        let questions = vec![question("Q1", &["A", "B"], "B")];
        let text: Vec<String> = quiz_lines(&questions, None).iter().map(plain).collect();
        assert!(text.iter().any(|l| l.contains("✓ B")));
        assert!(!text.iter().any(|l| l.contains('✗')));
        assert!(!text.iter().any(|l| l.contains("Not answered")));
    }

    #[test]
    fn test_difficulty_colors() {
        let mut q = question("Q1", &["A"], "A");
        q.difficulty = Some(" Hard".to_string());
        assert_eq!(difficulty_color(q.difficulty_level()), Color::Red);
        q.difficulty = Some("medium".to_string());
        assert_eq!(difficulty_color(q.difficulty_level()), Color::Yellow);
        q.difficulty = Some("trivial".to_string());
        assert_eq!(difficulty_color(q.difficulty_level()), Color::Green);
    }
}
