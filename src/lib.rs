//! # wiki-quiz
//!
//! A terminal client for an AI quiz generator that builds multiple-choice
//! quizzes from Wikipedia articles.
//!
//! The backend does the heavy lifting (scraping, prompting, storage). This
//! crate previews an article, requests a quiz, lets the user take it one
//! question at a time and shows a scorecard with a detailed review.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use wiki_quiz::{Config, AppError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let config = Config::new("http://localhost:8000")?;
//!     wiki_quiz::run(config).await
//! }
//! ```
//!
//! The backend client and the state machines are usable on their own:
//!
//! ```rust,no_run
//! use wiki_quiz::{ApiClient, Config, QuizSession};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ApiClient::new(Config::new("http://localhost:8000")?)?;
//! let quiz = client.quiz(1).await?;
//!
//! let mut session = QuizSession::start(Some(quiz))?;
//! while let Some(question) = session.current_question() {
//!     let pick = question.options[0].clone();
//!     if let Some(result) = session.select(&pick)? {
//!         println!("{} / {}", result.score, result.total);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod flow;
pub mod input;
pub mod models;
mod runtime;
mod terminal;
mod ui;

pub use api::{ApiClient, GenerateOutcome};
pub use app::{App, Effect, Response};
pub use config::Config;
pub use error::{ApiError, AppError, ValidationError};
pub use flow::{GenerateFlow, GenerateState, QuizSession, SessionError, Tier};
pub use models::{ArticlePreview, Difficulty, HistoryEntry, Question, Quiz, QuizRequest, ScoreResult};
pub use runtime::{perform, run};
