use std::fmt;

use serde::{Deserialize, Serialize};

/// Quiz difficulty chosen when requesting generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Parses a difficulty label without regard to case.
    pub fn parse_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "easy" => Some(Self::Easy),
            "medium" => Some(Self::Medium),
            "hard" => Some(Self::Hard),
            _ => None,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Easy => Self::Medium,
            Self::Medium => Self::Hard,
            Self::Hard => Self::Easy,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Self::Easy => Self::Hard,
            Self::Medium => Self::Easy,
            Self::Hard => Self::Medium,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `PUT /generate_quiz`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizRequest {
    pub url: String,
    pub difficulty: Difficulty,
    pub sections: Vec<String>,
}

/// Body of `POST /generate_quiz`.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct PreviewRequest<'a> {
    pub url: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization() {
        let request = QuizRequest {
            url: "https://en.wikipedia.org/wiki/Alan_Turing".to_string(),
            difficulty: Difficulty::Hard,
            sections: vec!["Early life".to_string(), "Legacy".to_string()],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["difficulty"], "Hard");
        assert_eq!(json["sections"][1], "Legacy");
    }

    #[test]
    fn test_difficulty_cycles() {
        let mut d = Difficulty::default();
        assert_eq!(d, Difficulty::Medium);
        for _ in 0..3 {
            d = d.next();
        }
        assert_eq!(d, Difficulty::Medium);
        assert_eq!(Difficulty::Easy.previous(), Difficulty::Hard);
        assert_eq!(Difficulty::parse_label(" MEDIUM "), Some(Difficulty::Medium));
        assert_eq!(Difficulty::parse_label("expert"), None);
    }
}
