//! Backend access.
//!
//! Four operations against the quiz-generation service: article preview,
//! quiz generation, history listing and quiz lookup.

mod client;

pub use client::{ApiClient, GenerateOutcome};
