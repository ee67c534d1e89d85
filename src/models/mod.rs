mod preview;
mod question;
mod quiz;
mod request;
mod score;

pub use preview::{ArticlePreview, SummaryContent};
pub use question::Question;
pub use quiz::{ArticleDetails, GeneratedAt, HistoryEntry, KeyEntities, Quiz, QuizDraft, QuizId};
pub use request::{Difficulty, QuizRequest};
pub use score::{AnswerSet, ScoreResult};

pub(crate) use quiz::QuizPayload;
pub(crate) use request::PreviewRequest;
