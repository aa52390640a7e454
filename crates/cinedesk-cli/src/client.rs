//! Application context, error types, and session wiring for the CLI.

use std::fmt::{self, Display, Formatter};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::anyhow;
use cinedesk_api_models::FieldErrors;
use cinedesk_client::{
    ApiClient, Auth, ClientConfig, ClientError, FileSessionStore, FetchOutcome, Genres, Movies,
    QueryCache, SessionStore, SharedSession, Users,
};
use url::Url;

/// CLI-level error type to distinguish validation from operational failures.
#[derive(Debug)]
pub(crate) enum CliError {
    Validation(String),
    Failure(anyhow::Error),
}

/// Convenience alias for functions returning a `CliError`.
pub(crate) type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn failure(error: impl Into<anyhow::Error>) -> Self {
        Self::Failure(error.into())
    }

    pub(crate) const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::Failure(_) => 3,
        }
    }

    pub(crate) fn display_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Failure(error) => format!("{error:#}"),
        }
    }
}

impl Display for CliError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.display_message())
    }
}

impl std::error::Error for CliError {}

impl From<FieldErrors> for CliError {
    fn from(errors: FieldErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}

impl From<ClientError> for CliError {
    fn from(error: ClientError) -> Self {
        classify_client_error(error)
    }
}

/// Map an API client failure onto the CLI taxonomy.
///
/// Rejected payloads (400/409/422) become validation errors carrying the
/// server's field messages; everything else is an operational failure.
pub(crate) fn classify_client_error(error: ClientError) -> CliError {
    let Some(status) = error.status() else {
        return CliError::failure(error);
    };
    let summary = error.server_body().summary();
    if error.is_rejection() {
        return CliError::validation(
            summary.unwrap_or_else(|| format!("request rejected with status {status}")),
        );
    }
    let message = summary.map_or_else(
        || format!("request failed with status {status}"),
        |summary| format!("{summary} (status {status})"),
    );
    if error.is_unauthorized() {
        CliError::failure(anyhow!("{message}; run `cinedesk login` to sign in again"))
    } else {
        CliError::failure(anyhow!(message))
    }
}

/// Unwrap a list fetch; the CLI never overlaps fetches, so a superseded
/// outcome means another process raced us on the same cache.
pub(crate) fn stored<T>(outcome: FetchOutcome<T>) -> CliResult<T> {
    outcome
        .into_stored()
        .ok_or_else(|| CliError::failure(anyhow!("list request was superseded")))
}

/// Connection settings collected from flags and environment.
#[derive(Debug, Clone)]
pub(crate) struct ConnectionSettings {
    pub(crate) api_url: Url,
    pub(crate) timeout_secs: Option<u64>,
    pub(crate) session_file: Option<PathBuf>,
    pub(crate) request_id: String,
}

/// Application context passed to command handlers.
#[derive(Clone)]
pub(crate) struct AppContext {
    pub(crate) session: SharedSession,
    pub(crate) auth: Auth,
    pub(crate) movies: Movies,
    pub(crate) genres: Genres,
    pub(crate) users: Users,
}

impl AppContext {
    /// Open the persisted session and build the resource handles.
    pub(crate) fn connect(settings: &ConnectionSettings) -> CliResult<Self> {
        let path = settings
            .session_file
            .clone()
            .unwrap_or_else(FileSessionStore::default_path);
        let store = FileSessionStore::open(path).map_err(|err| {
            CliError::failure(anyhow::Error::new(err).context("failed to open session file"))
        })?;
        let config = ClientConfig::new(settings.api_url.as_str())?
            .with_timeout(
                settings
                    .timeout_secs
                    .filter(|secs| *secs > 0)
                    .map(Duration::from_secs),
            )
            .with_request_id(settings.request_id.clone());
        Self::with_session(config, Arc::new(store))
    }

    /// Build the resource handles over an existing session store.
    pub(crate) fn with_session(config: ClientConfig, session: SharedSession) -> CliResult<Self> {
        let api = ApiClient::new(config, session.clone())?;
        let cache = QueryCache::new();
        Ok(Self {
            auth: Auth::new(api.clone(), cache.clone()),
            movies: Movies::new(api.clone(), cache.clone()),
            genres: Genres::new(api.clone(), cache.clone()),
            users: Users::new(api, cache),
            session,
        })
    }

    /// Fail fast when no access token is stored.
    pub(crate) fn require_session(&self) -> CliResult<()> {
        if self.session.is_authenticated() {
            Ok(())
        } else {
            Err(CliError::validation("not signed in (run `cinedesk login` first)"))
        }
    }
}

/// Parse the API URL provided to the CLI.
pub(crate) fn parse_url(input: &str) -> Result<Url, String> {
    input
        .parse::<Url>()
        .map_err(|err| format!("invalid URL '{input}': {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_becomes_validation_with_field_messages() {
        let err = classify_client_error(ClientError::Api {
            status: 400,
            body: r#"{"name":["genre with this name already exists."]}"#.to_string(),
        });
        assert_eq!(err.exit_code(), 2);
        assert_eq!(
            err.display_message(),
            "name: genre with this name already exists."
        );
    }

    #[test]
    fn server_errors_are_failures_with_status() {
        let err = classify_client_error(ClientError::Api {
            status: 500,
            body: "{}".to_string(),
        });
        assert_eq!(err.exit_code(), 3);
        assert_eq!(err.display_message(), "request failed with status 500");

        let unauthorized = classify_client_error(ClientError::Api {
            status: 401,
            body: r#"{"detail":"Token expired"}"#.to_string(),
        });
        assert!(unauthorized.display_message().starts_with("Token expired (status 401)"));
    }

    #[test]
    fn field_errors_map_to_validation() {
        let mut errors = FieldErrors::new();
        errors.insert("title", "Title is required");
        let err = CliError::from(errors);
        assert!(matches!(
            err,
            CliError::Validation(ref message) if message == "title: Title is required"
        ));
    }

    #[test]
    fn session_file_is_created_lazily() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("nested").join("session.json");
        let ctx = AppContext::connect(&ConnectionSettings {
            api_url: parse_url("http://127.0.0.1:9/api").map_err(anyhow::Error::msg)?,
            timeout_secs: Some(5),
            session_file: Some(path.clone()),
            request_id: "req-1".to_string(),
        })
        .map_err(|err| anyhow!(err.display_message()))?;
        assert!(!path.exists());
        assert!(ctx.require_session().is_err());
        ctx.session.set_tokens("acc", "ref")?;
        assert!(path.exists());
        assert!(ctx.require_session().is_ok());
        Ok(())
    }

    #[test]
    fn parse_url_reports_input() {
        let err = parse_url("nope").expect_err("invalid");
        assert!(err.contains("'nope'"));
    }
}
