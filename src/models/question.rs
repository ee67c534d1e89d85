use serde::Deserialize;

use super::Difficulty;

/// A single multiple-choice question as generated by the backend.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Question {
    #[serde(rename = "question")]
    pub text: String,
    pub options: Vec<String>,
    /// The correct option. Always one of `options` once the quiz is loaded.
    pub answer: String,
    /// Free-form label, usually "easy", "medium" or "hard".
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub section: Option<String>,
}

impl Question {
    pub fn is_correct(&self, option: &str) -> bool {
        self.answer == option
    }

    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }

    pub fn answer_index(&self) -> Option<usize> {
        self.options.iter().position(|o| *o == self.answer)
    }

    pub fn difficulty_level(&self) -> Option<Difficulty> {
        self.difficulty.as_deref().and_then(Difficulty::parse_label)
    }

    /// Checks that the question has options and that its answer is one of them.
    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.options.is_empty() {
            return Err(format!("question \"{}\" has no options", self.text));
        }
        if self.answer_index().is_none() {
            return Err(format!(
                "question \"{}\" names an answer that is not one of its options",
                self.text
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(answer: &str) -> Question {
        serde_json::from_value(serde_json::json!({
            "question": "Who proposed the imitation game?",
            "options": ["Turing", "Church", "Gödel", "von Neumann"],
            "answer": answer,
            "difficulty": "Hard",
        }))
        .unwrap()
    }

    #[test]
    fn test_answer_must_be_an_option() {
        assert!(question("Turing").validate().is_ok());
        assert!(question("Babbage").validate().is_err());
    }

    #[test]
    fn test_difficulty_label_is_case_insensitive() {
        assert_eq!(question("Turing").difficulty_level(), Some(Difficulty::Hard));
    }

    #[test]
    fn test_optional_fields_default_to_none() {
        let q = question("Church");
        assert_eq!(q.answer_index(), Some(1));
        assert!(q.explanation.is_none());
        assert!(q.section.is_none());
    }
}
