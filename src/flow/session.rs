//! Quiz-taking state machine.
//!
//! A session walks the questions in order. Each question is answered exactly
//! once; there is no going back and no skipping. Answering the last question
//! completes the session and yields the [`ScoreResult`].

use tracing::{debug, info};

use crate::models::{AnswerSet, Question, Quiz, ScoreResult};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("no quiz to take")]
    NoQuiz,

    #[error("quiz has no questions")]
    EmptyQuiz,

    #[error("question {} cannot be taken: {reason}", .index + 1)]
    InvalidQuestion { index: usize, reason: String },

    #[error("\"{option}\" is not an option of question {}", .index + 1)]
    UnknownOption { index: usize, option: String },

    #[error("quiz is already completed")]
    AlreadyCompleted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AtQuestion(usize),
    Completed,
}

#[derive(Debug, Clone)]
pub struct QuizSession {
    quiz: Quiz,
    answers: AnswerSet,
    score: usize,
    state: SessionState,
}

impl QuizSession {
    /// Starts at the first question. A missing or empty quiz is refused, as
    /// is one with a question that has no options or a foreign answer.
    pub fn start(quiz: Option<Quiz>) -> Result<Self, SessionError> {
        let quiz = quiz.ok_or(SessionError::NoQuiz)?;
        if quiz.questions.is_empty() {
            return Err(SessionError::EmptyQuiz);
        }
        for (index, question) in quiz.questions.iter().enumerate() {
            question
                .validate()
                .map_err(|reason| SessionError::InvalidQuestion { index, reason })?;
        }

        info!(quiz_id = quiz.id, questions = quiz.total_questions(), "quiz session started");
        Ok(Self {
            answers: AnswerSet::new(quiz.total_questions()),
            quiz,
            score: 0,
            state: SessionState::AtQuestion(0),
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    /// Running score over the questions answered so far.
    pub fn score(&self) -> usize {
        self.score
    }

    pub fn total_questions(&self) -> usize {
        self.quiz.total_questions()
    }

    pub fn current_question(&self) -> Option<&Question> {
        match self.state {
            SessionState::AtQuestion(index) => self.quiz.questions.get(index),
            SessionState::Completed => None,
        }
    }

    pub fn current_index(&self) -> Option<usize> {
        match self.state {
            SessionState::AtQuestion(index) => Some(index),
            SessionState::Completed => None,
        }
    }

    /// Records `option` for the current question and advances.
    ///
    /// Returns the final result when this was the last question. On error the
    /// session is left unchanged.
    pub fn select(&mut self, option: &str) -> Result<Option<ScoreResult>, SessionError> {
        let SessionState::AtQuestion(index) = self.state else {
            return Err(SessionError::AlreadyCompleted);
        };
        let question = &self.quiz.questions[index];
        if !question.has_option(option) {
            return Err(SessionError::UnknownOption {
                index,
                option: option.to_string(),
            });
        }

        let correct = question.is_correct(option);
        self.answers.record(index, option.to_string());
        if correct {
            self.score += 1;
        }
        debug!(question = index + 1, correct, score = self.score, "answer recorded");

        let next = index + 1;
        if next < self.quiz.total_questions() {
            self.state = SessionState::AtQuestion(next);
            return Ok(None);
        }

        self.state = SessionState::Completed;
        info!(
            quiz_id = self.quiz.id,
            score = self.score,
            total = self.quiz.total_questions(),
            "quiz session completed"
        );
        Ok(Some(ScoreResult {
            score: self.score,
            total: self.quiz.total_questions(),
            quiz: self.quiz.clone(),
            answers: self.answers.clone(),
        }))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::ArticleDetails;

    pub(crate) fn question(text: &str, options: &[&str], answer: &str) -> Question {
        Question {
            text: text.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            answer: answer.to_string(),
            difficulty: Some("easy".to_string()),
            explanation: None,
            section: None,
        }
    }

    pub(crate) fn quiz(questions: Vec<Question>) -> Quiz {
        Quiz {
            id: 1,
            url: "https://en.wikipedia.org/wiki/Alan_Turing".to_string(),
            title: "Alan Turing".to_string(),
            date_generated: None,
            questions,
            details: ArticleDetails::default(),
        }
    }

    fn count_correct(quiz: &Quiz, answers: &AnswerSet) -> usize {
        quiz.questions
            .iter()
            .zip(answers.iter())
            .filter(|(question, answer)| answer.is_some_and(|a| question.is_correct(a)))
            .count()
    }

    fn single_question_quiz() -> Quiz {
        quiz(vec![question("Q1", &["A", "B"], "A")])
    }

    #[test]
    fn test_correct_single_answer() {
        let mut session = QuizSession::start(Some(single_question_quiz())).unwrap();
        let result = session.select("A").unwrap().expect("last question completes");
        assert_eq!((result.score, result.total), (1, 1));
        assert_eq!(result.quiz.id, 1);
        assert_eq!(result.answers.get(0), Some("A"));
        assert_eq!(session.state(), SessionState::Completed);
    }

    #[test]
    fn test_wrong_single_answer() {
        let mut session = QuizSession::start(Some(single_question_quiz())).unwrap();
        let result = session.select("B").unwrap().unwrap();
        assert_eq!((result.score, result.total), (0, 1));
    }

    #[test]
    fn test_missing_or_empty_quiz_is_refused() {
        assert_eq!(QuizSession::start(None).unwrap_err(), SessionError::NoQuiz);
        assert_eq!(
            QuizSession::start(Some(quiz(Vec::new()))).unwrap_err(),
            SessionError::EmptyQuiz
        );
    }

    #[test]
    fn test_quiz_with_unanswerable_question_is_refused() {
        let no_options = quiz(vec![
            question("Q1", &["A", "B"], "A"),
            question("Q2", &[], "A"),
        ]);
        assert!(matches!(
            QuizSession::start(Some(no_options)).unwrap_err(),
            SessionError::InvalidQuestion { index: 1, .. }
        ));

        let foreign_answer = quiz(vec![question("Q1", &["A", "B"], "C")]);
        let err = QuizSession::start(Some(foreign_answer)).unwrap_err();
        assert!(err.to_string().starts_with("question 1 cannot be taken"));
    }

    #[test]
    fn test_unknown_option_leaves_state_alone() {
        let mut session = QuizSession::start(Some(single_question_quiz())).unwrap();
        let err = session.select("Z").unwrap_err();
        assert!(matches!(err, SessionError::UnknownOption { index: 0, .. }));
        assert_eq!(session.state(), SessionState::AtQuestion(0));
        assert_eq!(session.answers().answered(), 0);
    }

    #[test]
    fn test_no_selection_after_completion() {
        let mut session = QuizSession::start(Some(single_question_quiz())).unwrap();
        session.select("A").unwrap();
        assert_eq!(session.select("A").unwrap_err(), SessionError::AlreadyCompleted);
        assert_eq!(session.score(), 1);
    }

    #[test]
    fn test_walks_questions_in_order() {
        let mut session = QuizSession::start(Some(quiz(vec![
            question("Q1", &["A", "B"], "A"),
            question("Q2", &["C", "D"], "D"),
            question("Q3", &["E", "F"], "E"),
        ])))
        .unwrap();

        assert_eq!(session.current_question().unwrap().text, "Q1");
        assert!(session.select("A").unwrap().is_none());
        assert_eq!(session.state(), SessionState::AtQuestion(1));
        assert_eq!(session.current_question().unwrap().text, "Q2");
        assert!(session.select("C").unwrap().is_none());
        assert_eq!(session.score(), 1);

        let result = session.select("E").unwrap().unwrap();
        assert_eq!(result.score, 2);
        assert!(session.current_question().is_none());
    }

    #[test]
    fn test_score_matches_answer_set_for_every_choice_pattern() {
        let questions = vec![
            question("Q1", &["A", "B", "C"], "A"),
            question("Q2", &["A", "B", "C"], "B"),
            question("Q3", &["A", "B", "C"], "C"),
            question("Q4", &["A", "B", "C"], "A"),
        ];
        let n = questions.len();

        // Every combination of picks: 3^4 runs.
        for pattern in 0..3usize.pow(n as u32) {
            let mut session = QuizSession::start(Some(quiz(questions.clone()))).unwrap();
            let mut digits = pattern;
            let mut result = None;
            for _ in 0..n {
                let pick = ["A", "B", "C"][digits % 3];
                digits /= 3;
                result = session.select(pick).unwrap();
            }

            let result = result.expect("completed after the last question");
            assert_eq!(result.answers.len(), n);
            assert_eq!(result.answers.answered(), n);
            assert!(result.score <= result.total);
            assert_eq!(result.total, n);
            assert_eq!(result.score, count_correct(&result.quiz, &result.answers));
        }
    }
}
