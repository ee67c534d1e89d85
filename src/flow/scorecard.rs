//! Score bucketing and per-question review marks.

use crate::models::{Question, ScoreResult};

const TOP_TIER_RATIO: f64 = 0.8;
const MIDDLE_TIER_RATIO: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Top,
    Middle,
    Bottom,
}

impl Tier {
    pub fn for_ratio(ratio: f64) -> Self {
        if ratio >= TOP_TIER_RATIO {
            Self::Top
        } else if ratio >= MIDDLE_TIER_RATIO {
            Self::Middle
        } else {
            Self::Bottom
        }
    }

    pub fn for_result(result: &ScoreResult) -> Self {
        Self::for_ratio(result.ratio())
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::Top => "Excellent!",
            Self::Middle => "Nice work!",
            Self::Bottom => "Keep practicing!",
        }
    }
}

/// How an option is highlighted when a question is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionMark {
    /// The authoritative answer.
    Correct,
    /// Picked by the user but wrong.
    Incorrect,
    Plain,
}

/// Marks every option of `question`. The correct answer is always marked;
/// a wrong pick is marked only when `selected` is given.
pub fn mark_options<'a>(question: &'a Question, selected: Option<&str>) -> Vec<(&'a str, OptionMark)> {
    question
        .options
        .iter()
        .map(|option| {
            let mark = if question.is_correct(option) {
                OptionMark::Correct
            } else if selected == Some(option.as_str()) {
                OptionMark::Incorrect
            } else {
                OptionMark::Plain
            };
            (option.as_str(), mark)
        })
        .collect()
}

/// One question of the detailed review.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewRow<'a> {
    pub number: usize,
    pub question: &'a Question,
    pub selected: Option<&'a str>,
    pub is_correct: bool,
}

pub fn review_rows(result: &ScoreResult) -> Vec<ReviewRow<'_>> {
    result
        .quiz
        .questions
        .iter()
        .zip(result.answers.iter())
        .enumerate()
        .map(|(index, (question, selected))| ReviewRow {
            number: index + 1,
            question,
            selected,
            is_correct: selected.is_some_and(|s| question.is_correct(s)),
        })
        .collect()
}
