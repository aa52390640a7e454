use cinedesk_api_models::{
    BatchDeleteMoviesRequest, BatchDeleteMoviesResponse, CreateMovieRequest, DeleteResponse,
    Movie, MovieFilters, Page, UpdateMovieRequest,
};
use tracing::info;

use super::{Backend, LIST_SLOT};
use crate::cache::{DEFAULT_STALE_TIME, FetchOutcome, KeyPrefix, QueryCache, Resource};
use crate::error::ClientResult;
use crate::http::ApiClient;

const BASE: &str = "/movies/";

/// Movie catalogue handle.
#[derive(Debug, Clone)]
pub struct Movies {
    backend: Backend,
}

impl Movies {
    /// Handle over `api` sharing `cache`.
    #[must_use]
    pub const fn new(api: ApiClient, cache: QueryCache) -> Self {
        Self {
            backend: Backend::new(api, cache),
        }
    }

    /// One page of movies matching `filters`.
    pub async fn list(&self, filters: &MovieFilters) -> ClientResult<FetchOutcome<Page<Movie>>> {
        self.backend
            .list(Resource::Movies, LIST_SLOT, BASE, filters, DEFAULT_STALE_TIME)
            .await
    }

    /// Movie by id; `None` without a request when `id` is empty.
    pub async fn get(&self, id: &str) -> ClientResult<Option<Movie>> {
        if id.is_empty() {
            return Ok(None);
        }
        self.backend
            .item(Resource::Movies, id, &format!("{BASE}{id}/"), DEFAULT_STALE_TIME)
            .await
            .map(Some)
    }

    /// Create a movie and invalidate every movie list.
    pub async fn create(&self, request: &CreateMovieRequest) -> ClientResult<Movie> {
        let movie: Movie = self
            .backend
            .api
            .post(&format!("{BASE}create/"), Some(request))
            .await?;
        self.backend.cache.invalidate(&KeyPrefix::Lists(Resource::Movies));
        info!(movie_id = %movie.id, "movie created");
        Ok(movie)
    }

    /// Patch a movie; invalidates the lists and the item.
    pub async fn update(&self, id: &str, request: &UpdateMovieRequest) -> ClientResult<Movie> {
        let movie: Movie = self
            .backend
            .api
            .patch(&format!("{BASE}{id}/update/"), request)
            .await?;
        self.backend.cache.invalidate(&KeyPrefix::Lists(Resource::Movies));
        self.backend
            .cache
            .invalidate(&KeyPrefix::item(Resource::Movies, id));
        info!(movie_id = %id, "movie updated");
        Ok(movie)
    }

    /// Delete a movie; invalidates the lists and evicts the item.
    pub async fn delete(&self, id: &str) -> ClientResult<DeleteResponse> {
        let response: DeleteResponse = self
            .backend
            .api
            .delete(&format!("{BASE}{id}/delete/"))
            .await?;
        self.backend.cache.invalidate(&KeyPrefix::Lists(Resource::Movies));
        self.backend.cache.evict(&KeyPrefix::item(Resource::Movies, id));
        info!(movie_id = %id, "movie deleted");
        Ok(response)
    }

    /// Delete several movies in one call.
    pub async fn batch_delete(&self, ids: &[String]) -> ClientResult<BatchDeleteMoviesResponse> {
        let body = BatchDeleteMoviesRequest {
            movie_ids: ids.to_vec(),
        };
        let response: BatchDeleteMoviesResponse = self
            .backend
            .api
            .post(&format!("{BASE}batch-delete/"), Some(&body))
            .await?;
        self.backend.cache.invalidate(&KeyPrefix::Lists(Resource::Movies));
        for id in ids {
            self.backend.cache.evict(&KeyPrefix::item(Resource::Movies, id));
        }
        info!(deleted = response.deleted_count, "movies batch deleted");
        Ok(response)
    }
}
