use cinedesk_api_models::{
    LoginRequest, LoginResponse, LogoutRequest, LogoutResponse, ProfileResponse,
};
use tracing::{info, warn};

use super::Backend;
use crate::cache::{DEFAULT_STALE_TIME, QueryCache, QueryKey, Resource};
use crate::error::ClientResult;
use crate::http::ApiClient;

/// Authentication handle: login, logout, current profile.
#[derive(Debug, Clone)]
pub struct Auth {
    backend: Backend,
}

impl Auth {
    /// Handle over `api` sharing `cache`.
    #[must_use]
    pub const fn new(api: ApiClient, cache: QueryCache) -> Self {
        Self {
            backend: Backend::new(api, cache),
        }
    }

    /// Whether the session holds a usable access token.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.backend.api.session().is_authenticated()
    }

    /// Exchange credentials for tokens and persist them.
    ///
    /// Cached data from a previous session is dropped on success.
    pub async fn login(&self, request: &LoginRequest) -> ClientResult<LoginResponse> {
        let response: LoginResponse = self
            .backend
            .api
            .post("/auth/login/", Some(request))
            .await?;
        self.backend.api.session().store_login(&response)?;
        self.backend.cache.clear();
        info!(user_id = response.user.id, "signed in");
        Ok(response)
    }

    /// Revoke the refresh token server-side, then clear the local session.
    ///
    /// The server call is best effort; the local session is cleared even when
    /// it fails.
    pub async fn logout(&self) -> ClientResult<()> {
        let session = self.backend.api.session().clone();
        let body = LogoutRequest {
            refresh_token: session.refresh_token(),
        };
        if session.is_authenticated() {
            match self
                .backend
                .api
                .post::<_, LogoutResponse>("/auth/logout/", Some(&body))
                .await
            {
                Ok(response) => info!(message = %response.message, "signed out"),
                Err(err) => warn!(error = %err, "logout request failed; clearing local session"),
            }
        }
        self.backend.cache.clear();
        session.clear()?;
        Ok(())
    }

    /// Current user and profile, cached for five minutes.
    pub async fn profile(&self) -> ClientResult<ProfileResponse> {
        let key = QueryKey::whole(Resource::Profile);
        if let Some(profile) = self
            .backend
            .cache
            .get_fresh::<ProfileResponse>(&key, DEFAULT_STALE_TIME)
        {
            return Ok(profile);
        }
        let profile: ProfileResponse = self.backend.api.get("/auth/profile/").await?;
        self.backend.cache.insert(key, profile.clone());
        Ok(profile)
    }
}
