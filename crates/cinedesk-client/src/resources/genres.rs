use cinedesk_api_models::{
    CreateGenreRequest, DeleteResponse, Genre, GenreDetail, GenreFilters, ListFilters, Page,
    UpdateGenreRequest,
};
use tracing::info;

use super::{Backend, LIST_SLOT};
use crate::cache::{
    DEFAULT_STALE_TIME, FetchOutcome, KeyPrefix, OPTIONS_STALE_TIME, QueryCache, QueryKey,
    Resource,
};
use crate::error::ClientResult;
use crate::http::ApiClient;

const BASE: &str = "/movies/genres/";

/// Genre handle.
#[derive(Debug, Clone)]
pub struct Genres {
    backend: Backend,
}

impl Genres {
    /// Handle over `api` sharing `cache`.
    #[must_use]
    pub const fn new(api: ApiClient, cache: QueryCache) -> Self {
        Self {
            backend: Backend::new(api, cache),
        }
    }

    /// One page of genres matching `filters`.
    pub async fn list(
        &self,
        filters: &GenreFilters,
    ) -> ClientResult<FetchOutcome<Page<GenreDetail>>> {
        self.backend
            .list(Resource::Genres, LIST_SLOT, BASE, filters, DEFAULT_STALE_TIME)
            .await
    }

    /// Unfiltered genre list for pickers, kept fresh for 30 minutes.
    ///
    /// Takes no fetch ticket, so it never supersedes a page fetch and is never
    /// superseded itself.
    pub async fn options(&self) -> ClientResult<Vec<Genre>> {
        let filters = GenreFilters::default();
        let page: Page<GenreDetail> = self
            .backend
            .cached(
                QueryKey::list(Resource::Genres, &filters),
                &format!("{BASE}{}", filters.to_query_string()),
                OPTIONS_STALE_TIME,
            )
            .await?;
        Ok(page.results.into_iter().map(Genre::from).collect())
    }

    /// Genre by id; `None` without a request when `id` is empty.
    pub async fn get(&self, id: &str) -> ClientResult<Option<GenreDetail>> {
        if id.is_empty() {
            return Ok(None);
        }
        self.backend
            .item(Resource::Genres, id, &format!("{BASE}{id}/"), DEFAULT_STALE_TIME)
            .await
            .map(Some)
    }

    /// Create a genre and invalidate every genre list.
    pub async fn create(&self, request: &CreateGenreRequest) -> ClientResult<Genre> {
        let genre: Genre = self
            .backend
            .api
            .post(&format!("{BASE}create/"), Some(request))
            .await?;
        self.backend.cache.invalidate(&KeyPrefix::Lists(Resource::Genres));
        info!(genre_id = %genre.id, "genre created");
        Ok(genre)
    }

    /// Rename a genre; invalidates the lists and the item.
    pub async fn update(&self, id: &str, request: &UpdateGenreRequest) -> ClientResult<Genre> {
        let genre: Genre = self
            .backend
            .api
            .patch(&format!("{BASE}{id}/update/"), request)
            .await?;
        self.backend.cache.invalidate(&KeyPrefix::Lists(Resource::Genres));
        self.backend
            .cache
            .invalidate(&KeyPrefix::item(Resource::Genres, id));
        info!(genre_id = %id, "genre updated");
        Ok(genre)
    }

    /// Delete a genre; invalidates the lists and evicts the item.
    pub async fn delete(&self, id: &str) -> ClientResult<DeleteResponse> {
        let response: DeleteResponse = self
            .backend
            .api
            .delete(&format!("{BASE}{id}/delete/"))
            .await?;
        self.backend.cache.invalidate(&KeyPrefix::Lists(Resource::Genres));
        self.backend.cache.evict(&KeyPrefix::item(Resource::Genres, id));
        info!(genre_id = %id, "genre deleted");
        Ok(response)
    }
}
