use std::fmt;

use chrono::{DateTime, NaiveDateTime};
use serde::Deserialize;

use super::Question;

pub type QuizId = i64;

/// Generation timestamp as reported by the backend.
///
/// The backend stores naive UTC datetimes. Values that do not parse are kept
/// verbatim so they can still be displayed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum GeneratedAt {
    Parsed(NaiveDateTime),
    Raw(String),
}

impl GeneratedAt {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Self::Parsed(dt.naive_utc());
        }
        for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
            if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
                return Self::Parsed(dt);
            }
        }
        Self::Raw(raw.to_string())
    }
}

impl From<String> for GeneratedAt {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl fmt::Display for GeneratedAt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parsed(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M")),
            Self::Raw(raw) => f.write_str(raw),
        }
    }
}

/// Named entities the backend extracted from the article.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct KeyEntities {
    #[serde(default)]
    pub people: Option<Vec<String>>,
    #[serde(default)]
    pub organizations: Option<Vec<String>>,
    #[serde(default)]
    pub locations: Option<Vec<String>>,
}

impl KeyEntities {
    pub fn is_empty(&self) -> bool {
        [&self.people, &self.organizations, &self.locations]
            .iter()
            .all(|group| group.as_ref().is_none_or(|names| names.is_empty()))
    }
}

/// Article context that accompanies a generated quiz.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArticleDetails {
    pub summary: Option<String>,
    pub sections: Vec<String>,
    pub key_entities: Option<KeyEntities>,
    pub related_topics: Vec<String>,
}

/// A validated quiz that has not been assigned an identifier yet.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizDraft {
    pub url: String,
    pub title: String,
    pub date_generated: Option<GeneratedAt>,
    pub questions: Vec<Question>,
    pub details: ArticleDetails,
}

impl QuizDraft {
    pub fn with_id(self, id: QuizId) -> Quiz {
        Quiz {
            id,
            url: self.url,
            title: self.title,
            date_generated: self.date_generated,
            questions: self.questions,
            details: self.details,
        }
    }
}

/// A generated quiz. Immutable once received.
#[derive(Debug, Clone, PartialEq)]
pub struct Quiz {
    pub id: QuizId,
    pub url: String,
    pub title: String,
    pub date_generated: Option<GeneratedAt>,
    pub questions: Vec<Question>,
    pub details: ArticleDetails,
}

impl Quiz {
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }
}

/// Quiz object as serialized by the backend.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct QuizPayload {
    #[serde(default)]
    pub id: Option<QuizId>,
    #[serde(default)]
    pub url: String,
    pub title: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub key_entities: Option<KeyEntities>,
    #[serde(default)]
    pub sections: Option<Vec<String>>,
    #[serde(rename = "quiz")]
    pub questions: Vec<Question>,
    #[serde(default)]
    pub related_topics: Option<Vec<String>>,
    #[serde(default)]
    pub date_generated: Option<GeneratedAt>,
}

impl QuizPayload {
    /// Validates every question and splits off the optional identifier.
    pub fn into_draft(self) -> Result<(Option<QuizId>, QuizDraft), String> {
        for question in &self.questions {
            question.validate()?;
        }

        let draft = QuizDraft {
            url: self.url,
            title: self.title,
            date_generated: self.date_generated,
            questions: self.questions,
            details: ArticleDetails {
                summary: self.summary.filter(|s| !s.trim().is_empty()),
                sections: self.sections.unwrap_or_default(),
                key_entities: self.key_entities.filter(|e| !e.is_empty()),
                related_topics: self.related_topics.unwrap_or_default(),
            },
        };
        Ok((self.id, draft))
    }
}

/// One row of `GET /history`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HistoryEntry {
    pub id: QuizId,
    pub url: String,
    pub title: String,
    pub date_generated: GeneratedAt,
}
