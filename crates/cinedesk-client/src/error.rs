//! Error types for client operations.

use cinedesk_api_models::ServerErrorBody;
use thiserror::Error;

/// Result alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Failures surfaced by [`crate::ApiClient`] and the resource handles.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a response (DNS, connect, TLS, abort).
    #[error("request failed")]
    Transport {
        /// Endpoint that was being called.
        endpoint: String,
        /// Underlying transport error.
        source: reqwest::Error,
    },
    /// The server answered with a non-2xx status.
    ///
    /// Displays as the raw JSON error body (`{}` when the body was not JSON)
    /// so callers can re-parse field errors from the message.
    #[error("{body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error body, re-serialised JSON.
        body: String,
    },
    /// A 2xx body did not match the expected shape.
    #[error("failed to decode response")]
    Decode {
        /// Endpoint that was being called.
        endpoint: String,
        /// Underlying serde error.
        source: serde_json::Error,
    },
    /// The base URL and endpoint did not form a valid URL.
    #[error("invalid request url")]
    InvalidUrl {
        /// Offending input.
        value: String,
        /// Underlying parse error.
        source: url::ParseError,
    },
    /// Reading or writing the session failed.
    #[error("session storage failed")]
    Session {
        /// Underlying session error.
        #[from]
        source: SessionError,
    },
}

impl ClientError {
    /// HTTP status for [`ClientError::Api`].
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Parsed error body for [`ClientError::Api`]; empty for other variants.
    #[must_use]
    pub fn server_body(&self) -> ServerErrorBody {
        match self {
            Self::Api { body, .. } => ServerErrorBody::parse(body),
            _ => ServerErrorBody::default(),
        }
    }

    /// Whether the server rejected the request's content (400/409/422).
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(self, Self::Api { status: 400 | 409 | 422, .. })
    }

    /// Whether the server rejected the credentials (401/403).
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api { status: 401 | 403, .. })
    }
}

/// Failures raised by session stores.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The session file could not be read or written.
    #[error("session file io failed")]
    Io {
        /// Operation identifier.
        operation: &'static str,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// Session contents could not be (de)serialised.
    #[error("session payload invalid")]
    Serde {
        /// Underlying serde error.
        source: serde_json::Error,
    },
    /// The backing store (browser storage, cookies) refused the operation.
    #[error("session storage unavailable: {detail}")]
    Unavailable {
        /// Store-specific detail.
        detail: String,
    },
}
