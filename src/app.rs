//! Application state: which screen is showing and what it holds.
//!
//! Screens own their state exclusively. Moving between screens hands data
//! over explicitly (a quiz, a score result) or re-fetches it by id. Backend
//! calls are requested as [`Effect`]s and their outcomes come back as
//! [`Response`]s.

use tracing::{debug, info, warn};

use crate::error::ApiError;
use crate::flow::{GenerateFlow, GenerateState, QuizSession};
use crate::models::{ArticlePreview, HistoryEntry, Quiz, QuizId, QuizRequest, ScoreResult};

/// Tags a generate-screen request so its response can be matched to it.
pub type RequestId = u64;

/// A backend call the runtime should perform on behalf of the app.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Preview { id: RequestId, url: String },
    Generate { id: RequestId, request: QuizRequest },
    LoadHistory,
    LoadQuiz(QuizId),
}

/// Outcome of an [`Effect`].
#[derive(Debug)]
pub enum Response {
    Preview {
        id: RequestId,
        result: Result<ArticlePreview, ApiError>,
    },
    Generated {
        id: RequestId,
        result: Result<Quiz, ApiError>,
    },
    History(Result<Vec<HistoryEntry>, ApiError>),
    Quiz {
        id: QuizId,
        result: Result<Quiz, ApiError>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Loadable<T> {
    Loading,
    Loaded(T),
    Failed(String),
}

pub const LANDING_ITEMS: [&str; 3] = ["Generate Quiz", "View History", "Quit"];

#[derive(Debug, Clone, Default)]
pub struct LandingScreen {
    pub selected: usize,
    /// Shown once after being redirected here.
    pub notice: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct GenerateScreen {
    pub flow: GenerateFlow,
    /// Highlighted entry of the section list.
    pub section_cursor: usize,
    /// The request whose response this screen is waiting for.
    pub pending: Option<RequestId>,
}

#[derive(Debug, Clone)]
pub struct HistoryScreen {
    pub entries: Loadable<Vec<HistoryEntry>>,
    pub selected: usize,
}

#[derive(Debug, Clone)]
pub struct DetailScreen {
    pub id: Option<QuizId>,
    pub quiz: Loadable<Quiz>,
    pub scroll: u16,
}

#[derive(Debug, Clone)]
pub struct TakeQuizScreen {
    pub session: QuizSession,
    /// Highlighted option of the current question.
    pub cursor: usize,
}

#[derive(Debug, Clone)]
pub struct ScorecardScreen {
    pub result: ScoreResult,
    pub reviewing: bool,
    pub scroll: u16,
}

#[derive(Debug, Clone)]
pub enum Screen {
    Landing(LandingScreen),
    Generate(GenerateScreen),
    History(HistoryScreen),
    QuizDetail(DetailScreen),
    TakeQuiz(TakeQuizScreen),
    Scorecard(ScorecardScreen),
}

impl Screen {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Landing(_) => "landing",
            Self::Generate(_) => "generate",
            Self::History(_) => "history",
            Self::QuizDetail(_) => "quiz_detail",
            Self::TakeQuiz(_) => "take_quiz",
            Self::Scorecard(_) => "scorecard",
        }
    }
}

pub struct App {
    pub screen: Screen,
    pub should_quit: bool,
    last_request_id: RequestId,
}

impl App {
    pub fn new() -> Self {
        Self {
            screen: Screen::Landing(LandingScreen::default()),
            should_quit: false,
            last_request_id: 0,
        }
    }

    fn navigate(&mut self, screen: Screen) {
        debug!(from = self.screen.name(), to = screen.name(), "navigate");
        self.screen = screen;
    }

    pub fn go_landing(&mut self) {
        self.navigate(Screen::Landing(LandingScreen::default()));
    }

    fn redirect_landing(&mut self, notice: String) {
        self.navigate(Screen::Landing(LandingScreen {
            selected: 0,
            notice: Some(notice),
        }));
    }

    pub fn open_generate(&mut self) {
        self.navigate(Screen::Generate(GenerateScreen::default()));
    }

    /// Validates the typed URL and, when it passes, asks for its preview.
    pub fn request_preview(&mut self) -> Option<Effect> {
        let Screen::Generate(screen) = &mut self.screen else {
            return None;
        };
        let url = screen.flow.request_preview()?;
        self.last_request_id += 1;
        let id = self.last_request_id;
        screen.pending = Some(id);
        Some(Effect::Preview { id, url })
    }

    /// Validates the form and, when it passes, asks for quiz generation.
    pub fn submit_generation(&mut self) -> Option<Effect> {
        let Screen::Generate(screen) = &mut self.screen else {
            return None;
        };
        let request = screen.flow.submit()?;
        self.last_request_id += 1;
        let id = self.last_request_id;
        screen.pending = Some(id);
        Some(Effect::Generate { id, request })
    }

    pub fn open_history(&mut self) -> Effect {
        self.navigate(Screen::History(HistoryScreen {
            entries: Loadable::Loading,
            selected: 0,
        }));
        Effect::LoadHistory
    }

    /// Shows a quiz fetched by id.
    pub fn open_quiz(&mut self, id: QuizId) -> Effect {
        self.navigate(Screen::QuizDetail(DetailScreen {
            id: Some(id),
            quiz: Loadable::Loading,
            scroll: 0,
        }));
        Effect::LoadQuiz(id)
    }

    /// Shows a quiz already in hand.
    pub fn show_quiz(&mut self, quiz: Quiz) {
        self.navigate(Screen::QuizDetail(DetailScreen {
            id: Some(quiz.id),
            quiz: Loadable::Loaded(quiz),
            scroll: 0,
        }));
    }

    /// Starts taking a quiz. Without a usable quiz the app falls back to the
    /// landing screen.
    pub fn start_quiz(&mut self, quiz: Option<Quiz>) {
        match QuizSession::start(quiz) {
            Ok(session) => self.navigate(Screen::TakeQuiz(TakeQuizScreen { session, cursor: 0 })),
            Err(e) => {
                warn!(error = %e, "cannot start quiz, redirecting to landing");
                self.redirect_landing(format!("Cannot take quiz: {e}"));
            }
        }
    }

    pub fn show_score(&mut self, result: ScoreResult) {
        self.navigate(Screen::Scorecard(ScorecardScreen {
            result,
            reviewing: false,
            scroll: 0,
        }));
    }

    /// Applies the outcome of a backend call. Outcomes meant for a screen
    /// that is no longer showing are dropped.
    pub fn apply(&mut self, response: Response) {
        match (&mut self.screen, response) {
            (Screen::Generate(screen), Response::Preview { id, result })
                if screen.pending == Some(id) =>
            {
                screen.pending = None;
                screen.flow.preview_loaded(result);
                screen.section_cursor = 0;
            }
            (Screen::Generate(screen), Response::Generated { id, result })
                if screen.pending == Some(id) =>
            {
                screen.pending = None;
                screen.flow.generation_finished(result);
                if let Some(quiz) = screen.flow.take_quiz() {
                    info!(quiz_id = quiz.id, "routing generated quiz to detail");
                    self.show_quiz(quiz);
                }
            }
            (Screen::History(screen), Response::History(result)) => {
                screen.entries = match result {
                    Ok(entries) => {
                        screen.selected = screen.selected.min(entries.len().saturating_sub(1));
                        Loadable::Loaded(entries)
                    }
                    Err(e) => {
                        warn!(error = %e, "failed to load history");
                        Loadable::Failed(e.user_message())
                    }
                };
            }
            (Screen::QuizDetail(screen), Response::Quiz { id, result }) if screen.id == Some(id) => {
                screen.quiz = match result {
                    Ok(quiz) => Loadable::Loaded(quiz),
                    Err(e) => {
                        warn!(id, error = %e, "failed to load quiz");
                        Loadable::Failed(e.user_message())
                    }
                };
            }
            (screen, response) => {
                debug!(screen = screen.name(), ?response, "dropping stale response");
            }
        }
    }

    pub fn generate_state(&self) -> Option<&GenerateState> {
        match &self.screen {
            Screen::Generate(screen) => Some(screen.flow.state()),
            _ => None,
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::session::tests::{question, quiz};
    use crate::models::GeneratedAt;

    fn generate_screen(app: &App) -> &GenerateScreen {
        match &app.screen {
            Screen::Generate(screen) => screen,
            other => panic!("expected generate screen, got {}", other.name()),
        }
    }

    const TURING: &str = "https://en.wikipedia.org/wiki/Alan_Turing";
    const LOVELACE: &str = "https://en.wikipedia.org/wiki/Ada_Lovelace";

    fn preview(title: &str, section: &str) -> ArticlePreview {
        ArticlePreview {
            title: title.to_string(),
            sections: vec![section.to_string()],
            summary: None,
        }
    }

    fn start_preview(app: &mut App, url: &str) -> RequestId {
        app.open_generate();
        let Screen::Generate(screen) = &mut app.screen else {
            unreachable!()
        };
        screen.flow.set_url_input(url);
        match app.request_preview() {
            Some(Effect::Preview { id, .. }) => id,
            other => panic!("unexpected effect {other:?}"),
        }
    }

    fn submit(app: &mut App, section: &str) -> RequestId {
        let Screen::Generate(screen) = &mut app.screen else {
            unreachable!()
        };
        screen.flow.toggle_section(section);
        match app.submit_generation() {
            Some(Effect::Generate { id, .. }) => id,
            other => panic!("unexpected effect {other:?}"),
        }
    }

    fn submitting_app() -> (App, RequestId) {
        let mut app = App::new();
        let id = start_preview(&mut app, TURING);
        app.apply(Response::Preview {
            id,
            result: Ok(preview("Alan Turing", "Legacy")),
        });
        let id = submit(&mut app, "Legacy");
        (app, id)
    }

    #[test]
    fn test_generated_quiz_routes_to_detail() {
        let (mut app, id) = submitting_app();
        assert!(matches!(
            generate_screen(&app).flow.state(),
            GenerateState::Submitting { .. }
        ));
        app.apply(Response::Generated {
            id,
            result: Ok(quiz(vec![question("Q1", &["A", "B"], "A")])),
        });
        match &app.screen {
            Screen::QuizDetail(screen) => {
                assert_eq!(screen.id, Some(1));
                assert!(matches!(screen.quiz, Loadable::Loaded(_)));
            }
            other => panic!("unexpected screen {}", other.name()),
        }
    }

    #[test]
    fn test_generation_without_identifier_stays_put() {
        let (mut app, id) = submitting_app();
        app.apply(Response::Generated {
            id,
            result: Err(ApiError::MissingIdentifier {
                url: TURING.to_string(),
            }),
        });
        let screen = generate_screen(&app);
        assert!(matches!(screen.flow.state(), GenerateState::Failed { .. }));
        assert_eq!(screen.pending, None);
    }

    #[test]
    fn test_preview_from_abandoned_screen_is_dropped() {
        let mut app = App::new();
        let turing = start_preview(&mut app, TURING);
        app.go_landing();
        let lovelace = start_preview(&mut app, LOVELACE);
        assert_ne!(turing, lovelace);

        app.apply(Response::Preview {
            id: turing,
            result: Ok(preview("Alan Turing", "Legacy")),
        });
        assert!(matches!(
            app.generate_state(),
            Some(GenerateState::Validating { url }) if url == LOVELACE
        ));

        app.apply(Response::Preview {
            id: lovelace,
            result: Ok(preview("Ada Lovelace", "Analytical Engine")),
        });
        match app.generate_state() {
            Some(GenerateState::PreviewReady { url, preview, .. }) => {
                assert_eq!(url, LOVELACE);
                assert_eq!(preview.title, "Ada Lovelace");
            }
            other => panic!("unexpected state {other:?}"),
        }
    }

    #[test]
    fn test_generation_from_abandoned_screen_is_dropped() {
        let (mut app, stale) = submitting_app();
        app.go_landing();

        let id = start_preview(&mut app, LOVELACE);
        app.apply(Response::Preview {
            id,
            result: Ok(preview("Ada Lovelace", "Analytical Engine")),
        });
        let current = submit(&mut app, "Analytical Engine");

        app.apply(Response::Generated {
            id: stale,
            result: Ok(quiz(vec![question("Q1", &["A", "B"], "A")])),
        });
        assert!(matches!(
            app.generate_state(),
            Some(GenerateState::Submitting { url, .. }) if url == LOVELACE
        ));

        // A preview response cannot complete a submission either.
        app.apply(Response::Preview {
            id: stale,
            result: Ok(preview("Alan Turing", "Legacy")),
        });
        assert!(matches!(
            app.generate_state(),
            Some(GenerateState::Submitting { .. })
        ));

        let mut lovelace = quiz(vec![question("Q1", &["A", "B"], "A")]);
        lovelace.id = 2;
        lovelace.url = LOVELACE.to_string();
        app.apply(Response::Generated {
            id: current,
            result: Ok(lovelace),
        });
        match &app.screen {
            Screen::QuizDetail(screen) => assert_eq!(screen.id, Some(2)),
            other => panic!("unexpected screen {}", other.name()),
        }
    }

    #[test]
    fn test_start_without_quiz_redirects_to_landing() {
        let mut app = App::new();
        app.open_generate();
        app.start_quiz(None);
        match &app.screen {
            Screen::Landing(screen) => assert!(screen.notice.is_some()),
            other => panic!("unexpected screen {}", other.name()),
        }
    }

    #[test]
    fn test_stale_quiz_response_is_dropped() {
        let mut app = App::new();
        app.open_quiz(3);
        app.apply(Response::Quiz {
            id: 4,
            result: Ok(quiz(Vec::new())),
        });
        match &app.screen {
            Screen::QuizDetail(screen) => assert_eq!(screen.quiz, Loadable::Loading),
            other => panic!("unexpected screen {}", other.name()),
        }

        app.go_landing();
        app.apply(Response::Generated {
            id: 1,
            result: Ok(quiz(Vec::new())),
        });
        assert!(matches!(app.screen, Screen::Landing(_)));
    }

    #[test]
    fn test_history_selection_is_clamped() {
        let mut app = App::new();
        assert_eq!(app.open_history(), Effect::LoadHistory);
        if let Screen::History(screen) = &mut app.screen {
            screen.selected = 5;
        }
        app.apply(Response::History(Ok(vec![HistoryEntry {
            id: 1,
            url: "https://en.wikipedia.org/wiki/Alan_Turing".to_string(),
            title: "Alan Turing".to_string(),
            date_generated: GeneratedAt::parse("2025-11-06T10:15:30"),
        }])));
        match &app.screen {
            Screen::History(screen) => assert_eq!(screen.selected, 0),
            other => panic!("unexpected screen {}", other.name()),
        }
    }
}
