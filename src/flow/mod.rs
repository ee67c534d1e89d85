//! State machines behind the generate, take-quiz and scorecard screens.

pub mod generate;
pub mod scorecard;
pub mod session;

pub use generate::{
    validate_form, validate_wikipedia_url, FieldErrors, GenerateFlow, GenerateState, QuizForm,
    SectionSelection,
};
pub use scorecard::{mark_options, review_rows, OptionMark, ReviewRow, Tier};
pub use session::{QuizSession, SessionError, SessionState};
