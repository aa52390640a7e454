//! Client configuration.

use std::time::Duration;

use url::Url;

use crate::error::{ClientError, ClientResult};

/// Environment variable holding the API base URL.
pub const ENV_API_URL: &str = "CINEDESK_API_URL";
/// Environment variable holding the request timeout in seconds.
pub const ENV_HTTP_TIMEOUT_SECS: &str = "CINEDESK_HTTP_TIMEOUT_SECS";
/// Base URL used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// Settings for [`crate::ApiClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root; endpoints such as `/movies/` are appended to it verbatim.
    pub base_url: Url,
    /// Per-request timeout. `None` leaves requests unbounded.
    pub timeout: Option<Duration>,
    /// Value sent as `x-request-id` on every request.
    pub request_id: Option<String>,
}

impl ClientConfig {
    /// Build a configuration for `base_url` with no timeout.
    pub fn new(base_url: &str) -> ClientResult<Self> {
        let base_url = Url::parse(base_url).map_err(|source| ClientError::InvalidUrl {
            value: base_url.to_string(),
            source,
        })?;
        Ok(Self {
            base_url,
            timeout: None,
            request_id: None,
        })
    }

    /// Read `CINEDESK_API_URL` and `CINEDESK_HTTP_TIMEOUT_SECS`.
    ///
    /// A missing URL falls back to [`DEFAULT_API_URL`]; an unparsable timeout
    /// is ignored.
    pub fn from_env() -> ClientResult<Self> {
        let url = std::env::var(ENV_API_URL).unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let mut config = Self::new(&url)?;
        config.timeout = std::env::var(ENV_HTTP_TIMEOUT_SECS)
            .ok()
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);
        Ok(config)
    }

    /// Set the per-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the request identifier header value.
    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Join an endpoint (`/movies/?page=2`) onto the base URL.
    ///
    /// The endpoint is appended as text so a base with a path prefix
    /// (`https://host/api`) keeps that prefix.
    pub fn endpoint_url(&self, endpoint: &str) -> ClientResult<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let joined = if endpoint.starts_with('/') {
            format!("{base}{endpoint}")
        } else {
            format!("{base}/{endpoint}")
        };
        Url::parse(&joined).map_err(|source| ClientError::InvalidUrl {
            value: joined,
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_keeps_base_path_prefix() {
        let config = ClientConfig::new("https://cine.test/api/").expect("valid url");
        assert_eq!(
            config
                .endpoint_url("/movies/genres/?search=dra")
                .expect("joined")
                .as_str(),
            "https://cine.test/api/movies/genres/?search=dra"
        );
        assert_eq!(
            config.endpoint_url("auth/profile/").expect("joined").as_str(),
            "https://cine.test/api/auth/profile/"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = ClientConfig::new("not a url").expect_err("must fail");
        assert!(matches!(err, ClientError::InvalidUrl { .. }));
    }

    #[test]
    fn builder_sets_timeout_and_request_id() {
        let config = ClientConfig::new(DEFAULT_API_URL)
            .expect("valid url")
            .with_timeout(Some(Duration::from_secs(5)))
            .with_request_id("abc");
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
        assert_eq!(config.request_id.as_deref(), Some("abc"));
    }
}
