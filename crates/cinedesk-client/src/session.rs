//! Token session storage.
//!
//! # Design
//! - [`SessionStore`] is the only place tokens are written; every front end
//!   (CLI file, browser cookies/storage, in-memory) implements it.
//! - "Authenticated" means a non-empty access token is present. There is no
//!   refresh flow; expired tokens surface as server auth errors.

use std::sync::{Arc, Mutex, PoisonError};

use cinedesk_api_models::{LoginResponse, SessionProfile, User};
use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// Shared handle used by the HTTP client and resource handles.
pub type SharedSession = Arc<dyn SessionStore>;

/// Persistence for the signed-in session.
pub trait SessionStore: Send + Sync {
    /// Persist a new token pair.
    fn set_tokens(&self, access: &str, refresh: &str) -> Result<(), SessionError>;
    /// Current access token.
    fn access_token(&self) -> Option<String>;
    /// Current refresh token.
    fn refresh_token(&self) -> Option<String>;
    /// Persist the signed-in user.
    fn set_user(&self, user: &User) -> Result<(), SessionError>;
    /// Signed-in user, if stored.
    fn user(&self) -> Option<User>;
    /// Persist the customer profile returned at login.
    fn set_customer_profile(&self, profile: &SessionProfile) -> Result<(), SessionError>;
    /// Stored customer profile.
    fn customer_profile(&self) -> Option<SessionProfile>;
    /// Remove tokens, user and profile.
    fn clear(&self) -> Result<(), SessionError>;

    /// Whether a non-empty access token is present.
    fn is_authenticated(&self) -> bool {
        self.access_token().is_some_and(|token| !token.is_empty())
    }

    /// Store everything a successful login returned.
    ///
    /// The profile is only written when the response carries one.
    fn store_login(&self, response: &LoginResponse) -> Result<(), SessionError> {
        self.set_tokens(&response.access_token, &response.refresh_token)?;
        self.set_user(&response.user)?;
        if let Some(profile) = &response.customer_profile {
            self.set_customer_profile(profile)?;
        }
        Ok(())
    }
}

/// Serialisable snapshot of a session.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionState {
    /// Access token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    /// Refresh token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Signed-in user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    /// Customer profile.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_profile: Option<SessionProfile>,
}

/// Session kept in process memory.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    state: Mutex<SessionState>,
}

impl MemorySessionStore {
    /// Empty, signed-out session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Session pre-seeded with an access token.
    #[must_use]
    pub fn with_access_token(token: impl Into<String>) -> Self {
        Self {
            state: Mutex::new(SessionState {
                access_token: Some(token.into()),
                ..SessionState::default()
            }),
        }
    }

    /// Wrap into a [`SharedSession`].
    #[must_use]
    pub fn shared(self) -> SharedSession {
        Arc::new(self)
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut SessionState) -> R) -> R {
        let mut guard = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }
}

impl SessionStore for MemorySessionStore {
    fn set_tokens(&self, access: &str, refresh: &str) -> Result<(), SessionError> {
        self.with_state(|state| {
            state.access_token = Some(access.to_string());
            state.refresh_token = Some(refresh.to_string());
        });
        Ok(())
    }

    fn access_token(&self) -> Option<String> {
        self.with_state(|state| state.access_token.clone())
    }

    fn refresh_token(&self) -> Option<String> {
        self.with_state(|state| state.refresh_token.clone())
    }

    fn set_user(&self, user: &User) -> Result<(), SessionError> {
        self.with_state(|state| state.user = Some(user.clone()));
        Ok(())
    }

    fn user(&self) -> Option<User> {
        self.with_state(|state| state.user.clone())
    }

    fn set_customer_profile(&self, profile: &SessionProfile) -> Result<(), SessionError> {
        self.with_state(|state| state.customer_profile = Some(profile.clone()));
        Ok(())
    }

    fn customer_profile(&self) -> Option<SessionProfile> {
        self.with_state(|state| state.customer_profile.clone())
    }

    fn clear(&self) -> Result<(), SessionError> {
        self.with_state(|state| *state = SessionState::default());
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use file::{ENV_SESSION_FILE, FileSessionStore};

#[cfg(not(target_arch = "wasm32"))]
mod file {
    use std::fs;
    use std::path::{Path, PathBuf};
    use std::sync::{Mutex, PoisonError};

    use cinedesk_api_models::{SessionProfile, User};

    use super::{SessionState, SessionStore};
    use crate::error::SessionError;

    /// Environment variable overriding the session file location.
    pub const ENV_SESSION_FILE: &str = "CINEDESK_SESSION_FILE";

    /// Session persisted as a JSON file, used by the CLI between invocations.
    ///
    /// The file is re-read on construction and rewritten on every change; a
    /// cleared session removes the file.
    #[derive(Debug)]
    pub struct FileSessionStore {
        path: PathBuf,
        state: Mutex<SessionState>,
    }

    impl FileSessionStore {
        /// Open (or lazily create) the session file at `path`.
        pub fn open(path: impl Into<PathBuf>) -> Result<Self, SessionError> {
            let path = path.into();
            let state = match fs::read_to_string(&path) {
                Ok(raw) if raw.trim().is_empty() => SessionState::default(),
                Ok(raw) => serde_json::from_str(&raw)
                    .map_err(|source| SessionError::Serde { source })?,
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                    SessionState::default()
                }
                Err(source) => {
                    return Err(SessionError::Io {
                        operation: "session.read",
                        source,
                    });
                }
            };
            Ok(Self {
                path,
                state: Mutex::new(state),
            })
        }

        /// Resolve the default location: `CINEDESK_SESSION_FILE`, else
        /// `$XDG_CONFIG_HOME/cinedesk/session.json`, else
        /// `$HOME/.config/cinedesk/session.json`.
        #[must_use]
        pub fn default_path() -> PathBuf {
            if let Ok(explicit) = std::env::var(ENV_SESSION_FILE) {
                if !explicit.trim().is_empty() {
                    return PathBuf::from(explicit);
                }
            }
            let config_dir = std::env::var_os("XDG_CONFIG_HOME")
                .map(PathBuf::from)
                .or_else(|| std::env::var_os("HOME").map(|home| Path::new(&home).join(".config")))
                .unwrap_or_else(|| PathBuf::from("."));
            config_dir.join("cinedesk").join("session.json")
        }

        /// Location of the backing file.
        #[must_use]
        pub fn path(&self) -> &Path {
            &self.path
        }

        fn update(&self, f: impl FnOnce(&mut SessionState)) -> Result<(), SessionError> {
            let mut guard = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            f(&mut guard);
            self.persist(&guard)
        }

        fn read<R>(&self, f: impl FnOnce(&SessionState) -> R) -> R {
            let guard = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            f(&guard)
        }

        fn persist(&self, state: &SessionState) -> Result<(), SessionError> {
            if *state == SessionState::default() {
                return match fs::remove_file(&self.path) {
                    Ok(()) => Ok(()),
                    Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
                    Err(source) => Err(SessionError::Io {
                        operation: "session.remove",
                        source,
                    }),
                };
            }
            if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(|source| SessionError::Io {
                    operation: "session.create_dir",
                    source,
                })?;
            }
            let payload = serde_json::to_string_pretty(state)
                .map_err(|source| SessionError::Serde { source })?;
            fs::write(&self.path, payload).map_err(|source| SessionError::Io {
                operation: "session.write",
                source,
            })
        }
    }

    impl SessionStore for FileSessionStore {
        fn set_tokens(&self, access: &str, refresh: &str) -> Result<(), SessionError> {
            self.update(|state| {
                state.access_token = Some(access.to_string());
                state.refresh_token = Some(refresh.to_string());
            })
        }

        fn access_token(&self) -> Option<String> {
            self.read(|state| state.access_token.clone())
        }

        fn refresh_token(&self) -> Option<String> {
            self.read(|state| state.refresh_token.clone())
        }

        fn set_user(&self, user: &User) -> Result<(), SessionError> {
            self.update(|state| state.user = Some(user.clone()))
        }

        fn user(&self) -> Option<User> {
            self.read(|state| state.user.clone())
        }

        fn set_customer_profile(&self, profile: &SessionProfile) -> Result<(), SessionError> {
            self.update(|state| state.customer_profile = Some(profile.clone()))
        }

        fn customer_profile(&self) -> Option<SessionProfile> {
            self.read(|state| state.customer_profile.clone())
        }

        fn clear(&self) -> Result<(), SessionError> {
            self.update(|state| *state = SessionState::default())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use cinedesk_api_models::LoginResponse;

        fn login_response() -> LoginResponse {
            serde_json::from_value(serde_json::json!({
                "user": {"id": 3, "username": "ops", "email": "ops@cine.test",
                         "role": "admin", "is_admin": true},
                "access_token": "acc-1",
                "refresh_token": "ref-1",
                "customer_profile": null
            }))
            .expect("login decodes")
        }

        #[test]
        fn file_store_survives_reopen_and_clear_removes_file() {
            let dir = tempfile::tempdir().expect("tempdir");
            let path = dir.path().join("nested").join("session.json");

            let store = FileSessionStore::open(&path).expect("open");
            assert!(!store.is_authenticated());
            store.store_login(&login_response()).expect("store");
            assert!(path.exists());

            let reopened = FileSessionStore::open(&path).expect("reopen");
            assert_eq!(reopened.access_token().as_deref(), Some("acc-1"));
            assert_eq!(reopened.refresh_token().as_deref(), Some("ref-1"));
            assert_eq!(reopened.user().map(|u| u.username), Some("ops".to_string()));
            assert!(reopened.customer_profile().is_none());

            reopened.clear().expect("clear");
            assert!(!path.exists());
            assert!(!reopened.is_authenticated());
        }

        #[test]
        fn corrupt_file_is_reported() {
            let dir = tempfile::tempdir().expect("tempdir");
            let path = dir.path().join("session.json");
            std::fs::write(&path, "not json").expect("write");
            let err = FileSessionStore::open(&path).expect_err("must fail");
            assert!(matches!(err, SessionError::Serde { .. }));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn login(profile: bool) -> LoginResponse {
        let profile = if profile {
            serde_json::json!({"id": "p-1", "username": "ada", "email": "ada@cine.test",
                               "full_name": "Ada L", "loyalty_points": 40})
        } else {
            serde_json::Value::Null
        };
        serde_json::from_value(serde_json::json!({
            "user": {"id": 1, "username": "ada", "email": "ada@cine.test", "role": "customer"},
            "access_token": "access-abc",
            "refresh_token": "refresh-xyz",
            "customer_profile": profile
        }))
        .expect("login decodes")
    }

    #[test]
    fn store_login_persists_both_tokens_and_user() {
        let store = MemorySessionStore::new();
        store.store_login(&login(true)).expect("store");
        assert_eq!(store.access_token().as_deref(), Some("access-abc"));
        assert_eq!(store.refresh_token().as_deref(), Some("refresh-xyz"));
        assert!(store.is_authenticated());
        assert_eq!(store.user().map(|u| u.id), Some(1));
        assert_eq!(store.customer_profile().map(|p| p.loyalty_points), Some(40));
    }

    #[test]
    fn missing_profile_leaves_previous_untouched() {
        let store = MemorySessionStore::new();
        store.store_login(&login(true)).expect("first login");
        store.store_login(&login(false)).expect("second login");
        assert!(store.customer_profile().is_some());
    }

    #[test]
    fn empty_token_is_not_authenticated_and_clear_resets() {
        let store = MemorySessionStore::with_access_token("");
        assert!(!store.is_authenticated());
        store.set_tokens("a", "r").expect("tokens");
        assert!(store.is_authenticated());
        store.clear().expect("clear");
        assert!(store.access_token().is_none());
        assert!(store.refresh_token().is_none());
        assert!(store.user().is_none());
    }
}
