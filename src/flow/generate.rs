//! Preview and quiz-generation state machine.
//!
//! The flow never talks to the network itself. Transitions that need the
//! backend hand back the request to perform, and the caller feeds the
//! response in through [`GenerateFlow::preview_loaded`] or
//! [`GenerateFlow::generation_finished`].

use tracing::{debug, info, warn};
use url::Url;

use crate::error::{ApiError, ValidationError};
use crate::models::{ArticlePreview, Difficulty, Quiz, QuizRequest};

const WIKIPEDIA_HOST_SUFFIX: &str = "wikipedia.org";

/// Client-side guard run before any preview request.
///
/// Accepts http(s) URLs whose host ends with `wikipedia.org`. The backend
/// remains the authority on whether the article exists.
pub fn validate_wikipedia_url(input: &str) -> Result<Url, ValidationError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ValidationError::Empty);
    }

    let url = Url::parse(input).map_err(|_| ValidationError::Malformed(input.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ValidationError::NotWikipedia);
    }

    match url.host_str() {
        Some(host) if host.to_ascii_lowercase().ends_with(WIKIPEDIA_HOST_SUFFIX) => Ok(url),
        _ => Err(ValidationError::NotWikipedia),
    }
}

/// Focus sections in the order they were picked. Picking a section twice
/// removes it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionSelection {
    sections: Vec<String>,
}

impl SectionSelection {
    pub fn toggle(&mut self, section: &str) {
        if let Some(pos) = self.sections.iter().position(|s| s == section) {
            self.sections.remove(pos);
        } else {
            self.sections.push(section.to_string());
        }
    }

    pub fn contains(&self, section: &str) -> bool {
        self.sections.iter().any(|s| s == section)
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.sections
    }
}

/// Choices made on top of a preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizForm {
    pub difficulty: Option<Difficulty>,
    pub sections: SectionSelection,
}

impl Default for QuizForm {
    fn default() -> Self {
        Self {
            difficulty: Some(Difficulty::default()),
            sections: SectionSelection::default(),
        }
    }
}

/// Per-field problems that block submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub url: Option<String>,
    pub difficulty: Option<String>,
    pub sections: Option<String>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.url.is_none() && self.difficulty.is_none() && self.sections.is_none()
    }
}

/// Checks every field at once and builds the generation request.
pub fn validate_form(url: &str, form: &QuizForm) -> Result<QuizRequest, FieldErrors> {
    let mut errors = FieldErrors::default();

    let url = match validate_wikipedia_url(url) {
        Ok(url) => Some(url),
        Err(e) => {
            errors.url = Some(e.to_string());
            None
        }
    };
    if form.difficulty.is_none() {
        errors.difficulty = Some("Please choose a difficulty".to_string());
    }
    if form.sections.is_empty() {
        errors.sections = Some("Please select at least one section".to_string());
    }

    match (url, form.difficulty) {
        (Some(url), Some(difficulty)) if errors.is_empty() => Ok(QuizRequest {
            url: url.to_string(),
            difficulty,
            sections: form.sections.as_slice().to_vec(),
        }),
        _ => Err(errors),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GenerateState {
    /// Editing the article URL.
    Idle {
        url_input: String,
        error: Option<String>,
    },
    /// Preview request in flight.
    Validating { url: String },
    /// Preview shown, difficulty and sections being chosen.
    PreviewReady {
        url: String,
        preview: ArticlePreview,
        form: QuizForm,
        field_errors: FieldErrors,
    },
    /// Generation request in flight.
    Submitting {
        url: String,
        preview: ArticlePreview,
        form: QuizForm,
        request: QuizRequest,
    },
    Succeeded { quiz: Quiz },
    Failed {
        url: String,
        preview: ArticlePreview,
        form: QuizForm,
        message: String,
    },
}

impl Default for GenerateState {
    fn default() -> Self {
        Self::Idle {
            url_input: String::new(),
            error: None,
        }
    }
}

impl GenerateState {
    /// Coarse status of the generation request.
    pub fn status_label(&self) -> &'static str {
        match self {
            Self::Idle { .. } | Self::Validating { .. } | Self::PreviewReady { .. } => {
                "NOT STARTED"
            }
            Self::Submitting { .. } => "STARTED",
            Self::Succeeded { .. } => "SUCCESS",
            Self::Failed { .. } => "FAILED",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GenerateFlow {
    state: GenerateState,
}

impl GenerateFlow {
    pub fn state(&self) -> &GenerateState {
        &self.state
    }

    pub fn push_url_char(&mut self, c: char) {
        if let GenerateState::Idle { url_input, error } = &mut self.state {
            url_input.push(c);
            *error = None;
        }
    }

    pub fn pop_url_char(&mut self) {
        if let GenerateState::Idle { url_input, error } = &mut self.state {
            url_input.pop();
            *error = None;
        }
    }

    pub fn set_url_input(&mut self, input: &str) {
        if let GenerateState::Idle { url_input, error } = &mut self.state {
            *url_input = input.to_string();
            *error = None;
        }
    }

    /// Validates the typed URL. Returns the URL to preview when it passes.
    pub fn request_preview(&mut self) -> Option<String> {
        let GenerateState::Idle { url_input, error } = &mut self.state else {
            return None;
        };

        match validate_wikipedia_url(url_input) {
            Ok(url) => {
                let url = url.to_string();
                info!(%url, "requesting article preview");
                self.state = GenerateState::Validating { url: url.clone() };
                Some(url)
            }
            Err(e) => {
                debug!(input = %url_input, error = %e, "url rejected before preview");
                *error = Some(e.to_string());
                None
            }
        }
    }

    pub fn preview_loaded(&mut self, result: Result<ArticlePreview, ApiError>) {
        let GenerateState::Validating { url } = &self.state else {
            debug!("dropping preview result outside of validation");
            return;
        };
        let url = url.clone();

        self.state = match result {
            Ok(preview) => {
                info!(title = %preview.title, sections = preview.sections.len(), "preview ready");
                GenerateState::PreviewReady {
                    url,
                    preview,
                    form: QuizForm::default(),
                    field_errors: FieldErrors::default(),
                }
            }
            Err(e) => {
                warn!(%url, error = %e, "preview failed");
                GenerateState::Idle {
                    url_input: url,
                    error: Some(e.user_message()),
                }
            }
        };
    }

    /// Goes back to URL entry, discarding the preview.
    pub fn edit_url(&mut self) {
        if let GenerateState::PreviewReady { url, .. } = &self.state {
            self.state = GenerateState::Idle {
                url_input: url.clone(),
                error: None,
            };
        }
    }

    pub fn set_difficulty(&mut self, difficulty: Option<Difficulty>) {
        if let GenerateState::PreviewReady {
            form, field_errors, ..
        } = &mut self.state
        {
            form.difficulty = difficulty;
            field_errors.difficulty = None;
        }
    }

    pub fn cycle_difficulty(&mut self, forward: bool) {
        if let GenerateState::PreviewReady { form, .. } = &self.state {
            let next = match form.difficulty {
                Some(d) if forward => d.next(),
                Some(d) => d.previous(),
                None => Difficulty::default(),
            };
            self.set_difficulty(Some(next));
        }
    }

    pub fn toggle_section(&mut self, section: &str) {
        if let GenerateState::PreviewReady {
            preview,
            form,
            field_errors,
            ..
        } = &mut self.state
        {
            if preview.sections.iter().any(|s| s == section) {
                form.sections.toggle(section);
                field_errors.sections = None;
            }
        }
    }

    /// Validates the form. Returns the request to send when every field is
    /// valid, otherwise records the field errors.
    pub fn submit(&mut self) -> Option<QuizRequest> {
        let GenerateState::PreviewReady {
            url,
            form,
            field_errors,
            ..
        } = &mut self.state
        else {
            return None;
        };

        match validate_form(url, form) {
            Ok(request) => {
                if let GenerateState::PreviewReady { url, preview, form, .. } =
                    std::mem::take(&mut self.state)
                {
                    info!(
                        %url,
                        difficulty = %request.difficulty,
                        sections = request.sections.len(),
                        "submitting quiz generation"
                    );
                    self.state = GenerateState::Submitting {
                        url,
                        preview,
                        form,
                        request: request.clone(),
                    };
                }
                Some(request)
            }
            Err(errors) => {
                debug!(?errors, "submission blocked by field errors");
                *field_errors = errors;
                None
            }
        }
    }

    pub fn generation_finished(&mut self, result: Result<Quiz, ApiError>) {
        if !matches!(self.state, GenerateState::Submitting { .. }) {
            debug!("dropping generation result outside of submission");
            return;
        }
        let GenerateState::Submitting { url, preview, form, .. } = std::mem::take(&mut self.state)
        else {
            return;
        };

        self.state = match result {
            Ok(quiz) => {
                info!(quiz_id = quiz.id, questions = quiz.total_questions(), "quiz generated");
                GenerateState::Succeeded { quiz }
            }
            Err(e) => {
                warn!(%url, error = %e, "quiz generation failed");
                GenerateState::Failed {
                    url,
                    preview,
                    form,
                    message: e.user_message(),
                }
            }
        };
    }

    /// Closes the failure modal, keeping the form so the user can retry.
    pub fn dismiss_failure(&mut self) {
        if !matches!(self.state, GenerateState::Failed { .. }) {
            return;
        }
        if let GenerateState::Failed { url, preview, form, .. } = std::mem::take(&mut self.state) {
            self.state = GenerateState::PreviewReady {
                url,
                preview,
                form,
                field_errors: FieldErrors::default(),
            };
        }
    }

    /// Hands the generated quiz over and resets the flow.
    pub fn take_quiz(&mut self) -> Option<Quiz> {
        if !matches!(self.state, GenerateState::Succeeded { .. }) {
            return None;
        }
        match std::mem::take(&mut self.state) {
            GenerateState::Succeeded { quiz } => Some(quiz),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::session::tests::{question, quiz};
    use crate::models::SummaryContent;

    const TURING: &str = "https://en.wikipedia.org/wiki/Alan_Turing";

    fn preview() -> ArticlePreview {
        ArticlePreview {
            title: "Alan Turing".to_string(),
            sections: vec!["Early life".to_string(), "Legacy".to_string()],
            summary: Some(SummaryContent::Text("Mathematician.".to_string())),
        }
    }

    fn ready_flow() -> GenerateFlow {
        let mut flow = GenerateFlow::default();
        flow.set_url_input(TURING);
        assert!(flow.request_preview().is_some());
        flow.preview_loaded(Ok(preview()));
        flow
    }

    #[test]
    fn test_url_validation() {
        assert!(validate_wikipedia_url(TURING).is_ok());
        assert!(validate_wikipedia_url("https://de.wikipedia.org/wiki/Berlin").is_ok());
        assert_eq!(
            validate_wikipedia_url("https://example.com/wiki/Alan_Turing"),
            Err(ValidationError::NotWikipedia)
        );
        assert_eq!(validate_wikipedia_url("   "), Err(ValidationError::Empty));
        assert!(matches!(
            validate_wikipedia_url("wikipedia.org/wiki/Alan_Turing"),
            Err(ValidationError::Malformed(_))
        ));
        assert_eq!(
            validate_wikipedia_url("ftp://en.wikipedia.org/wiki/Alan_Turing"),
            Err(ValidationError::NotWikipedia)
        );
    }

    #[test]
    fn test_invalid_url_never_leaves_idle() {
        let mut flow = GenerateFlow::default();
        flow.set_url_input("https://example.com/wiki/Alan_Turing");
        assert!(flow.request_preview().is_none());
        assert!(matches!(
            flow.state(),
            GenerateState::Idle { error: Some(_), .. }
        ));

        flow.push_url_char('x');
        assert!(matches!(flow.state(), GenerateState::Idle { error: None, .. }));
    }

    #[test]
    fn test_preview_failure_returns_to_idle_with_url() {
        let mut flow = GenerateFlow::default();
        flow.set_url_input(TURING);
        flow.request_preview();
        flow.preview_loaded(Err(ApiError::MissingIdentifier {
            url: TURING.to_string(),
        }));
        match flow.state() {
            GenerateState::Idle { url_input, error } => {
                assert_eq!(url_input, TURING);
                assert!(error.is_some());
            }
            other => panic!("unexpected state {other:?}"),
        }
    }

    #[test]
    fn test_section_selection_keeps_pick_order() {
        let mut selection = SectionSelection::default();
        selection.toggle("Legacy");
        selection.toggle("Early life");
        selection.toggle("Death");
        selection.toggle("Early life");
        assert_eq!(selection.as_slice(), ["Legacy", "Death"]);
        assert!(!selection.contains("Early life"));
    }

    #[test]
    fn test_field_errors_are_reported_together() {
        let form = QuizForm {
            difficulty: None,
            sections: SectionSelection::default(),
        };
        let errors = validate_form("", &form).unwrap_err();
        assert!(errors.url.is_some());
        assert!(errors.difficulty.is_some());
        assert!(errors.sections.is_some());
    }

    #[test]
    fn test_submit_blocked_without_sections() {
        let mut flow = ready_flow();
        assert!(flow.submit().is_none());
        match flow.state() {
            GenerateState::PreviewReady { field_errors, .. } => {
                assert!(field_errors.sections.is_some());
                assert!(field_errors.url.is_none());
            }
            other => panic!("unexpected state {other:?}"),
        }

        flow.toggle_section("Legacy");
        match flow.state() {
            GenerateState::PreviewReady { field_errors, .. } => assert!(field_errors.is_empty()),
            other => panic!("unexpected state {other:?}"),
        }
    }

    #[test]
    fn test_unknown_sections_are_ignored() {
        let mut flow = ready_flow();
        flow.toggle_section("Not a section");
        assert!(flow.submit().is_none());
    }

    #[test]
    fn test_submit_then_success() {
        let mut flow = ready_flow();
        flow.cycle_difficulty(true);
        flow.toggle_section("Legacy");

        let request = flow.submit().expect("valid form");
        assert_eq!(request.url, TURING);
        assert_eq!(request.difficulty, Difficulty::Hard);
        assert_eq!(request.sections, vec!["Legacy".to_string()]);
        assert_eq!(flow.state().status_label(), "STARTED");
        assert!(matches!(flow.state(), GenerateState::Submitting { .. }));

        flow.generation_finished(Ok(quiz(vec![question("Q1", &["A", "B"], "A")])));
        assert_eq!(flow.state().status_label(), "SUCCESS");

        let quiz = flow.take_quiz().expect("quiz handed over");
        assert_eq!(quiz.id, 1);
        assert_eq!(flow.state(), &GenerateState::default());
    }

    #[test]
    fn test_missing_identifier_fails_and_retry_keeps_form() {
        let mut flow = ready_flow();
        flow.toggle_section("Early life");
        flow.submit().unwrap();

        flow.generation_finished(Err(ApiError::MissingIdentifier {
            url: TURING.to_string(),
        }));
        assert_eq!(flow.state().status_label(), "FAILED");
        assert!(flow.take_quiz().is_none());

        flow.dismiss_failure();
        match flow.state() {
            GenerateState::PreviewReady { form, .. } => {
                assert_eq!(form.sections.as_slice(), ["Early life"]);
            }
            other => panic!("unexpected state {other:?}"),
        }
        assert!(flow.submit().is_some());
    }

    #[test]
    fn test_stray_results_are_dropped() {
        let mut flow = GenerateFlow::default();
        flow.preview_loaded(Ok(preview()));
        flow.generation_finished(Ok(quiz(Vec::new())));
        assert_eq!(flow.state(), &GenerateState::default());
    }
}
