//! Browser-backed session store.
//!
//! # Design
//! - Tokens are written to cookies (so server-side routing can see them) and
//!   mirrored into local storage, which is what reads consult.
//! - The store holds no state of its own; every call goes to the browser.

use cinedesk_api_models::{SessionProfile, User};
use cinedesk_client::{SessionError, SessionStore};
use gloo::console;
use gloo::storage::{LocalStorage, Storage};
use serde::Serialize;
use serde::de::DeserializeOwned;
use wasm_bindgen::JsCast;
use web_sys::HtmlDocument;

pub(crate) const ACCESS_TOKEN_KEY: &str = "access_token";
pub(crate) const REFRESH_TOKEN_KEY: &str = "refresh_token";
pub(crate) const USER_KEY: &str = "user";
pub(crate) const CUSTOMER_PROFILE_KEY: &str = "customer_profile";

const ACCESS_TOKEN_MAX_AGE_SECS: u32 = 86_400;
const REFRESH_TOKEN_MAX_AGE_SECS: u32 = 2_592_000;

/// Session kept in cookies and local storage.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct BrowserSessionStore;

impl SessionStore for BrowserSessionStore {
    fn set_tokens(&self, access: &str, refresh: &str) -> Result<(), SessionError> {
        write_cookie(ACCESS_TOKEN_KEY, access, ACCESS_TOKEN_MAX_AGE_SECS)?;
        write_cookie(REFRESH_TOKEN_KEY, refresh, REFRESH_TOKEN_MAX_AGE_SECS)?;
        write_storage(ACCESS_TOKEN_KEY, access)?;
        write_storage(REFRESH_TOKEN_KEY, refresh)
    }

    fn access_token(&self) -> Option<String> {
        read_storage(ACCESS_TOKEN_KEY)
    }

    fn refresh_token(&self) -> Option<String> {
        read_storage(REFRESH_TOKEN_KEY)
    }

    fn set_user(&self, user: &User) -> Result<(), SessionError> {
        write_storage(USER_KEY, user)
    }

    fn user(&self) -> Option<User> {
        read_storage(USER_KEY)
    }

    fn set_customer_profile(&self, profile: &SessionProfile) -> Result<(), SessionError> {
        write_storage(CUSTOMER_PROFILE_KEY, profile)
    }

    fn customer_profile(&self) -> Option<SessionProfile> {
        read_storage(CUSTOMER_PROFILE_KEY)
    }

    fn clear(&self) -> Result<(), SessionError> {
        expire_cookie(ACCESS_TOKEN_KEY)?;
        expire_cookie(REFRESH_TOKEN_KEY)?;
        for key in [
            ACCESS_TOKEN_KEY,
            REFRESH_TOKEN_KEY,
            USER_KEY,
            CUSTOMER_PROFILE_KEY,
        ] {
            LocalStorage::delete(key);
        }
        Ok(())
    }
}

fn read_storage<T: DeserializeOwned>(key: &'static str) -> Option<T> {
    LocalStorage::get::<T>(key).ok()
}

fn write_storage<T: Serialize + ?Sized>(key: &'static str, value: &T) -> Result<(), SessionError> {
    LocalStorage::set(key, value).map_err(|err| {
        let detail = err.to_string();
        console::error!("session storage write failed", key, detail.clone());
        SessionError::Unavailable { detail }
    })
}

fn write_cookie(name: &str, value: &str, max_age_secs: u32) -> Result<(), SessionError> {
    set_cookie(&format!(
        "{name}={value}; max-age={max_age_secs}; path=/; SameSite=Lax"
    ))
}

fn expire_cookie(name: &str) -> Result<(), SessionError> {
    set_cookie(&format!("{name}=; max-age=0; path=/; SameSite=Lax"))
}

fn set_cookie(cookie: &str) -> Result<(), SessionError> {
    let document = gloo::utils::document()
        .dyn_into::<HtmlDocument>()
        .map_err(|_| SessionError::Unavailable {
            detail: "document does not support cookies".to_string(),
        })?;
    document
        .set_cookie(cookie)
        .map_err(|_| SessionError::Unavailable {
            detail: "cookie write rejected".to_string(),
        })
}
