use std::time::Duration;

use url::Url;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);
pub const DEFAULT_MAX_ERROR_BODY_BYTES: usize = 8 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid API base URL \"{url}\": {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("API base URL must use http or https, got \"{0}\"")]
    UnsupportedScheme(String),
}

/// Client configuration, passed explicitly to everything that talks to the
/// backend.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend root, always ending in `/` so endpoint paths join under it.
    pub api_base_url: Url,
    /// Per-request timeout. Quiz generation can take well over a minute.
    pub request_timeout: Duration,
    /// Upper bound on how much of an error body is kept for messages.
    pub max_error_body_bytes: usize,
}

impl Config {
    pub fn new(api_base_url: &str) -> Result<Self, ConfigError> {
        let trimmed = api_base_url.trim().trim_end_matches('/');
        let api_base_url =
            Url::parse(&format!("{trimmed}/")).map_err(|source| ConfigError::InvalidBaseUrl {
                url: api_base_url.to_string(),
                source,
            })?;

        if !matches!(api_base_url.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme(api_base_url.scheme().to_string()));
        }

        Ok(Self {
            api_base_url,
            request_timeout: DEFAULT_TIMEOUT,
            max_error_body_bytes: DEFAULT_MAX_ERROR_BODY_BYTES,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Joins a relative endpoint path onto the base URL.
    pub fn endpoint(&self, path: &str) -> Url {
        let mut url = self.api_base_url.clone();
        {
            let trimmed = url.path().trim_end_matches('/').to_string();
            url.set_path(&format!("{}/{}", trimmed, path.trim_start_matches('/')));
        }
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_tolerated() {
        let a = Config::new("http://localhost:8000").unwrap();
        let b = Config::new("http://localhost:8000/").unwrap();
        assert_eq!(a.endpoint("history"), b.endpoint("history"));
        assert_eq!(a.endpoint("history").as_str(), "http://localhost:8000/history");
    }

    #[test]
    fn test_base_path_is_kept() {
        let config = Config::new("https://quiz.example.com/api/v1").unwrap();
        assert_eq!(
            config.endpoint("/quiz/3").as_str(),
            "https://quiz.example.com/api/v1/quiz/3"
        );
    }

    #[test]
    fn test_invalid_base_urls() {
        assert!(matches!(
            Config::new("not a url"),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            Config::new("ftp://example.com"),
            Err(ConfigError::UnsupportedScheme(_))
        ));
    }
}
