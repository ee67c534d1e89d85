use std::io;

use reqwest::StatusCode;

use crate::config::ConfigError;

/// Failure of a backend call.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No response was received (connect failure, timeout, reset).
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// The backend answered with a non-success status.
    #[error("{endpoint} returned {status}")]
    Status {
        endpoint: String,
        status: StatusCode,
        detail: Option<String>,
    },

    /// The backend answered with a body that is not in the expected shape.
    #[error("unexpected response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },

    /// Generation succeeded but no identifier could be recovered for the quiz.
    #[error("generated quiz for {url} has no identifier")]
    MissingIdentifier { url: String },
}

impl ApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message suitable for showing to the user in a modal or banner.
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport { .. } => "The server did not respond. It may be restarting or out of \
                 memory on its hosting plan; please retry in a minute."
                .to_string(),
            Self::Status { status, detail, .. } => match *status {
                StatusCode::INTERNAL_SERVER_ERROR => {
                    "The AI quiz generator ran out of memory while processing this request. \
                     Please try again in a few minutes or choose a shorter article."
                        .to_string()
                }
                StatusCode::BAD_GATEWAY => "The server is temporarily restarting, usually \
                     because of memory limits on its hosting plan. Please retry shortly."
                    .to_string(),
                StatusCode::TOO_MANY_REQUESTS => {
                    "The AI request quota has been exceeded. Please wait and try again later."
                        .to_string()
                }
                other => format!(
                    "Server error ({}): {}",
                    other.as_u16(),
                    detail.as_deref().unwrap_or("Unexpected issue occurred.")
                ),
            },
            Self::Decode { .. } => {
                "The server sent a response this client does not understand.".to_string()
            }
            Self::MissingIdentifier { .. } => {
                "The quiz was generated but no identifier came back; please retry.".to_string()
            }
        }
    }
}

/// Client-side rejection of a URL before any network call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please enter a Wikipedia URL")]
    Empty,

    #[error("\"{0}\" is not a valid URL")]
    Malformed(String),

    #[error("Only Wikipedia article URLs are supported")]
    NotWikipedia,
}

/// Error type for running the application.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
}
