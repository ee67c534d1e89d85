//! HTTP client for the quiz-generation backend.

use std::time::Instant;

use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::ApiError;
use crate::models::{
    ArticlePreview, HistoryEntry, PreviewRequest, Quiz, QuizDraft, QuizId, QuizPayload,
    QuizRequest,
};

/// Result of `PUT /generate_quiz`.
///
/// Depending on the backend revision the generated quiz may or may not carry
/// its database identifier. Without one, it has to be recovered from the
/// history list before the quiz can be addressed.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerateOutcome {
    Identified(Quiz),
    NeedsLookup(QuizDraft),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum GenerateResponse {
    Wrapped { quiz: QuizPayload },
    Direct(QuizPayload),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum QuizResponse {
    Enveloped { title: String, quiz_data: QuizPayload },
    Direct(QuizPayload),
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

#[derive(Clone)]
pub struct ApiClient {
    config: Config,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(config: Config) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("wiki-quiz/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { config, http })
    }

    /// `POST /generate_quiz`: fetch title, sections and summary for an article.
    pub async fn preview_article(&self, url: &str) -> Result<ArticlePreview, ApiError> {
        let request = self
            .request(Method::POST, "generate_quiz")
            .json(&PreviewRequest { url });
        self.execute("POST /generate_quiz", request).await
    }

    /// `PUT /generate_quiz`: ask the backend to generate a quiz.
    pub async fn generate_quiz(&self, quiz_request: &QuizRequest) -> Result<GenerateOutcome, ApiError> {
        let endpoint = "PUT /generate_quiz";
        let request = self.request(Method::PUT, "generate_quiz").json(quiz_request);
        let response: GenerateResponse = self.execute(endpoint, request).await?;

        let payload = match response {
            GenerateResponse::Wrapped { quiz } => quiz,
            GenerateResponse::Direct(quiz) => quiz,
        };
        let (id, mut draft) = payload.into_draft().map_err(|message| ApiError::Decode {
            endpoint: endpoint.to_string(),
            message,
        })?;
        if draft.url.is_empty() {
            draft.url = quiz_request.url.clone();
        }

        Ok(match id {
            Some(id) => GenerateOutcome::Identified(draft.with_id(id)),
            None => GenerateOutcome::NeedsLookup(draft),
        })
    }

    /// Turns a generation outcome into an addressable quiz, consulting the
    /// history list when the identifier is missing.
    pub async fn resolve(&self, outcome: GenerateOutcome) -> Result<Quiz, ApiError> {
        let draft = match outcome {
            GenerateOutcome::Identified(quiz) => return Ok(quiz),
            GenerateOutcome::NeedsLookup(draft) => draft,
        };

        let history = self.history().await?;
        let id = history
            .iter()
            .filter(|entry| entry.url == draft.url)
            .map(|entry| entry.id)
            .max();

        match id {
            Some(id) => {
                debug!(id, url = %draft.url, "recovered quiz identifier from history");
                Ok(draft.with_id(id))
            }
            None => {
                warn!(url = %draft.url, "generated quiz has no identifier and no history match");
                Err(ApiError::MissingIdentifier { url: draft.url })
            }
        }
    }

    /// Generates a quiz and resolves its identifier in one step.
    pub async fn submit_quiz(&self, quiz_request: &QuizRequest) -> Result<Quiz, ApiError> {
        let outcome = self.generate_quiz(quiz_request).await?;
        self.resolve(outcome).await
    }

    /// `GET /history`: every quiz generated so far, in backend order.
    pub async fn history(&self) -> Result<Vec<HistoryEntry>, ApiError> {
        let request = self.request(Method::GET, "history");
        self.execute("GET /history", request).await
    }

    /// `GET /quiz/{id}`: a full quiz.
    pub async fn quiz(&self, id: QuizId) -> Result<Quiz, ApiError> {
        let endpoint = format!("GET /quiz/{id}");
        let request = self.request(Method::GET, &format!("quiz/{id}"));
        let response: QuizResponse = self.execute(&endpoint, request).await?;

        let (payload, envelope_title) = match response {
            QuizResponse::Enveloped { title, quiz_data } => (quiz_data, Some(title)),
            QuizResponse::Direct(payload) => (payload, None),
        };
        let (body_id, mut draft) = payload.into_draft().map_err(|message| ApiError::Decode {
            endpoint: endpoint.clone(),
            message,
        })?;
        if draft.title.is_empty() {
            if let Some(title) = envelope_title {
                draft.title = title;
            }
        }

        Ok(draft.with_id(body_id.unwrap_or(id)))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, self.config.endpoint(path))
            .timeout(self.config.request_timeout)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let started = Instant::now();
        let transport = |source| ApiError::Transport {
            endpoint: endpoint.to_string(),
            source,
        };

        let elapsed_ms = || started.elapsed().as_millis() as u64;
        let log_transport = |e: &reqwest::Error| {
            warn!(endpoint, elapsed_ms = elapsed_ms(), error = %e, "backend did not respond");
        };

        let response = request
            .send()
            .await
            .inspect_err(log_transport)
            .map_err(transport)?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .inspect_err(log_transport)
            .map_err(transport)?;
        let elapsed_ms = elapsed_ms();

        if !status.is_success() {
            warn!(endpoint, status = status.as_u16(), elapsed_ms, "backend returned error status");
            return Err(ApiError::Status {
                endpoint: endpoint.to_string(),
                status,
                detail: error_detail(&body, self.config.max_error_body_bytes),
            });
        }

        info!(endpoint, status = status.as_u16(), elapsed_ms, bytes = body.len(), "backend call finished");
        serde_json::from_slice(&body).map_err(|e| {
            warn!(endpoint, elapsed_ms, error = %e, "backend response did not decode");
            ApiError::Decode {
                endpoint: endpoint.to_string(),
                message: e.to_string(),
            }
        })
    }
}

/// Pulls a human-readable detail out of an error body.
///
/// Prefers a JSON `detail` field and falls back to the raw body text.
fn error_detail(body: &[u8], max_bytes: usize) -> Option<String> {
    if let Ok(parsed) = serde_json::from_slice::<ErrorBody>(body) {
        return match parsed.detail {
            serde_json::Value::String(detail) => Some(detail),
            serde_json::Value::Null => None,
            other => Some(other.to_string()),
        };
    }

    let body = &body[..body.len().min(max_bytes)];
    let text = String::from_utf8_lossy(body).trim().to_string();
    (!text.is_empty()).then_some(text)
}
