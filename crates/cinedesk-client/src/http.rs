//! JSON-over-HTTP client for the admin API.

use cinedesk_api_models::fallback_error_body;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use reqwest::{Client, Method};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::session::SharedSession;

/// Header carrying the caller's request identifier.
pub const HEADER_REQUEST_ID: &str = "x-request-id";

/// Thin wrapper over [`reqwest::Client`] that knows the base URL and session.
///
/// Every call is a single attempt: no retry, no backoff.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    config: ClientConfig,
    session: SharedSession,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.config.base_url.as_str())
            .field("authenticated", &self.session.is_authenticated())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Build a client from configuration and a session store.
    pub fn new(config: ClientConfig, session: SharedSession) -> ClientResult<Self> {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = match config.timeout {
            Some(timeout) => builder.timeout(timeout),
            None => builder,
        };
        let http = builder.build().map_err(|source| ClientError::Transport {
            endpoint: String::new(),
            source,
        })?;
        Ok(Self {
            http,
            config,
            session,
        })
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Session store used for bearer tokens.
    #[must_use]
    pub fn session(&self) -> &SharedSession {
        &self.session
    }

    /// `GET endpoint`.
    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> ClientResult<T> {
        self.send(Method::GET, endpoint, None::<&()>).await
    }

    /// `POST endpoint` with an optional JSON body.
    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: Option<&B>,
    ) -> ClientResult<T> {
        self.send(Method::POST, endpoint, body).await
    }

    /// `PATCH endpoint` with a JSON body.
    pub async fn patch<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.send(Method::PATCH, endpoint, Some(body)).await
    }

    /// `DELETE endpoint`.
    pub async fn delete<T: DeserializeOwned>(&self, endpoint: &str) -> ClientResult<T> {
        self.send(Method::DELETE, endpoint, None::<&()>).await
    }

    async fn send<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
    ) -> ClientResult<T> {
        let url = self.config.endpoint_url(endpoint)?;
        debug!(method = %method, endpoint, "api request");

        let mut request = self
            .http
            .request(method.clone(), url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(token) = self.session.access_token().filter(|t| !t.is_empty()) {
            request = request.bearer_auth(token);
        }
        if let Some(request_id) = &self.config.request_id {
            request = request.header(HEADER_REQUEST_ID, request_id.as_str());
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|source| {
            warn!(method = %method, endpoint, error = %source, "api request failed");
            ClientError::Transport {
                endpoint: endpoint.to_string(),
                source,
            }
        })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|source| ClientError::Transport {
                endpoint: endpoint.to_string(),
                source,
            })?;

        if !status.is_success() {
            let body = serde_json::from_str::<serde_json::Value>(&text)
                .map_or_else(|_| fallback_error_body(), |value| value.to_string());
            warn!(method = %method, endpoint, status = status.as_u16(), "api rejected request");
            return Err(ClientError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let raw = if text.trim().is_empty() { "null" } else { &text };
        serde_json::from_str(raw).map_err(|source| ClientError::Decode {
            endpoint: endpoint.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{MemorySessionStore, SessionStore};
    use httpmock::prelude::*;
    use serde_json::json;

    fn client(server: &MockServer, session: SharedSession) -> ApiClient {
        let config = ClientConfig::new(&server.base_url())
            .expect("base url")
            .with_request_id("req-1");
        ApiClient::new(config, session).expect("client builds")
    }

    #[tokio::test]
    async fn attaches_bearer_token_when_signed_in() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/auth/profile/")
                .header("authorization", "Bearer tok-1")
                .header("x-request-id", "req-1");
            then.status(200).json_body(json!({"ok": true}));
        });

        let api = client(&server, MemorySessionStore::with_access_token("tok-1").shared());
        let body: serde_json::Value = api.get("/auth/profile/").await.expect("request succeeds");
        assert_eq!(body, json!({"ok": true}));
        mock.assert();
    }

    #[tokio::test]
    async fn omits_authorization_without_token() {
        let server = MockServer::start_async().await;
        let with_auth = server.mock(|when, then| {
            when.method(POST).path("/auth/login/").header_exists("authorization");
            then.status(500);
        });
        let without_auth = server.mock(|when, then| {
            when.method(POST)
                .path("/auth/login/")
                .json_body(json!({"email": "a@b.c"}));
            then.status(200).json_body(json!({"message": "ok"}));
        });

        let session = MemorySessionStore::new().shared();
        assert!(!session.is_authenticated());
        let api = client(&server, session);
        let _: serde_json::Value = api
            .post("/auth/login/", Some(&json!({"email": "a@b.c"})))
            .await
            .expect("login call");
        with_auth.assert_hits(0);
        without_auth.assert();
    }

    #[tokio::test]
    async fn non_success_status_carries_json_body() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/movies/genres/create/");
            then.status(400)
                .json_body(json!({"name": ["genre with this name already exists."]}));
        });

        let api = client(&server, MemorySessionStore::new().shared());
        let err = api
            .post::<_, serde_json::Value>("/movies/genres/create/", Some(&json!({"name": "Drama"})))
            .await
            .expect_err("400 must fail");
        assert_eq!(err.status(), Some(400));
        let reparsed: serde_json::Value =
            serde_json::from_str(&err.to_string()).expect("message is json");
        assert_eq!(reparsed["name"][0], "genre with this name already exists.");
    }

    #[tokio::test]
    async fn unparseable_error_body_becomes_empty_object() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(DELETE).path("/movies/m-1/delete/");
            then.status(502).body("<html>bad gateway</html>");
        });

        let api = client(&server, MemorySessionStore::new().shared());
        let err = api
            .delete::<serde_json::Value>("/movies/m-1/delete/")
            .await
            .expect_err("502 must fail");
        assert_eq!(err.to_string(), "{}");
    }

    #[tokio::test]
    async fn malformed_success_body_is_decode_error() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/movies/");
            then.status(200).body("not json");
        });

        let api = client(&server, MemorySessionStore::new().shared());
        let err = api
            .get::<serde_json::Value>("/movies/")
            .await
            .expect_err("decode must fail");
        assert!(matches!(err, ClientError::Decode { .. }));
    }
}
