//! Persistence and environment helpers for the app shell.

use gloo::console;
use gloo::storage::{LocalStorage, Storage};
use gloo::utils::{document, window};

pub(crate) const SIDEBAR_COLLAPSED_KEY: &str = "cinedesk.sidebar_collapsed";
const API_URL_META: &str = "cinedesk-api-url";
const FALLBACK_API_URL: &str = "http://localhost:8000/api";

/// API root: the `cinedesk-api-url` meta tag when present, else `<origin>/api`.
pub(crate) fn api_base_url() -> String {
    let from_meta = document()
        .query_selector(&format!("meta[name=\"{API_URL_META}\"]"))
        .ok()
        .flatten()
        .and_then(|meta| meta.get_attribute("content"))
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty());
    if let Some(url) = from_meta {
        return url;
    }
    window().location().origin().map_or_else(
        |_| FALLBACK_API_URL.to_string(),
        |origin| format!("{}/api", origin.trim_end_matches('/')),
    )
}

pub(crate) fn load_sidebar_collapsed() -> bool {
    LocalStorage::get::<bool>(SIDEBAR_COLLAPSED_KEY).unwrap_or(false)
}

pub(crate) fn persist_sidebar_collapsed(collapsed: bool) {
    if let Err(err) = LocalStorage::set(SIDEBAR_COLLAPSED_KEY, collapsed) {
        console::error!(
            "storage operation failed",
            SIDEBAR_COLLAPSED_KEY,
            err.to_string()
        );
    }
}

/// Current path and query string of the address bar.
pub(crate) fn current_location() -> (String, String) {
    let location = window().location();
    (
        location.pathname().unwrap_or_else(|_| "/".to_string()),
        location.search().unwrap_or_default(),
    )
}

/// Rewrite the query string in place without adding a history entry.
pub(crate) fn replace_query(query: &str) {
    let (path, current) = current_location();
    if current == query {
        return;
    }
    let url = format!("{path}{query}");
    if let Ok(history) = window().history()
        && history
            .replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&url))
            .is_err()
    {
        console::warn!("history update failed", url);
    }
}
