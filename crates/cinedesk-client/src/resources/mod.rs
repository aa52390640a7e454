//! Typed resource handles.
//!
//! Each handle pairs the [`ApiClient`] with the shared [`QueryCache`]: reads go
//! through the cache, writes go to the server and then invalidate or evict
//! the affected keys.

use std::time::Duration;

use cinedesk_api_models::{ListFilters, Page};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::cache::{FetchOutcome, QueryCache, QueryKey, Resource};
use crate::error::ClientResult;
use crate::http::ApiClient;

mod auth;
mod genres;
mod movies;
mod users;

pub use auth::Auth;
pub use genres::Genres;
pub use movies::Movies;
pub use users::Users;

/// Fetch slot used by list pages.
pub const LIST_SLOT: &str = "list";

/// Shared plumbing for the resource handles.
#[derive(Debug, Clone)]
pub(crate) struct Backend {
    pub(crate) api: ApiClient,
    pub(crate) cache: QueryCache,
}

impl Backend {
    pub(crate) const fn new(api: ApiClient, cache: QueryCache) -> Self {
        Self { api, cache }
    }

    /// Serve a list page from cache when fresh, otherwise fetch it under a
    /// new ticket for `slot`.
    ///
    /// A fetch superseded while in flight reports [`FetchOutcome::Superseded`]
    /// whether it succeeded or failed.
    pub(crate) async fn list<F, T>(
        &self,
        resource: Resource,
        slot: &'static str,
        base: &str,
        filters: &F,
        max_age: Duration,
    ) -> ClientResult<FetchOutcome<Page<T>>>
    where
        F: ListFilters,
        T: DeserializeOwned + Clone + Send + Sync + 'static,
    {
        let key = QueryKey::list(resource, filters);
        let ticket = self.cache.begin_fetch(resource, slot);
        if let Some(page) = self.cache.get_fresh::<Page<T>>(&key, max_age) {
            return Ok(FetchOutcome::Stored(page));
        }
        let endpoint = format!("{base}{}", filters.to_query_string());
        match self.api.get::<Page<T>>(&endpoint).await {
            Ok(page) => Ok(self.cache.complete(&ticket, key, page)),
            Err(err) if !self.cache.is_current(&ticket) => {
                debug!(
                    resource = %resource,
                    generation = ticket.generation(),
                    error = %err,
                    "dropping failure of superseded fetch"
                );
                Ok(FetchOutcome::Superseded)
            }
            Err(err) => Err(err),
        }
    }

    /// Serve one record from cache when fresh, otherwise fetch `endpoint`.
    pub(crate) async fn item<T>(
        &self,
        resource: Resource,
        id: &str,
        endpoint: &str,
        max_age: Duration,
    ) -> ClientResult<T>
    where
        T: DeserializeOwned + Clone + Send + Sync + 'static,
    {
        self.cached(QueryKey::item(resource, id), endpoint, max_age).await
    }

    /// Serve `key` from cache when fresh, otherwise fetch `endpoint` and store
    /// it. Concurrent fetches of one key store the same value, so no ticket is
    /// taken.
    pub(crate) async fn cached<T>(
        &self,
        key: QueryKey,
        endpoint: &str,
        max_age: Duration,
    ) -> ClientResult<T>
    where
        T: DeserializeOwned + Clone + Send + Sync + 'static,
    {
        if let Some(value) = self.cache.get_fresh::<T>(&key, max_age) {
            return Ok(value);
        }
        let value: T = self.api.get(endpoint).await?;
        self.cache.insert(key, value.clone());
        Ok(value)
    }
}
