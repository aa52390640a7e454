//! Movie requests issued by the page, mapped to what the view shows.

use cinedesk_api_models::{
    CreateMovieRequest, Genre, Movie, MovieFilters, Page, UpdateMovieRequest,
};
use gloo::console;

use crate::app::ApiCtx;
use crate::core::list::settle_fetch;
use crate::core::toast;

const NOUN: &str = "movie";

/// Load one page; `None` when a newer load replaced this one.
pub(crate) async fn load(
    ctx: &ApiCtx,
    filters: &MovieFilters,
) -> Option<Result<Page<Movie>, String>> {
    settle_fetch(ctx.handles.movies.list(filters).await, "movies")
}

/// Genres for the filter and the dialog picker. Failures leave the pickers
/// empty.
pub(crate) async fn genre_options(ctx: &ApiCtx) -> Vec<Genre> {
    match ctx.handles.genres.options().await {
        Ok(genres) => genres,
        Err(err) => {
            console::warn!("genre options unavailable", err.to_string());
            Vec::new()
        }
    }
}

/// Create a movie; `Ok` and `Err` both carry the toast text.
pub(crate) async fn create(ctx: &ApiCtx, request: &CreateMovieRequest) -> Result<String, String> {
    ctx.handles
        .movies
        .create(request)
        .await
        .map(|movie| toast::created(&movie.title))
        .map_err(|err| toast::mutation_failed(&err, "create", NOUN, "title"))
}

/// Patch a movie.
pub(crate) async fn update(
    ctx: &ApiCtx,
    id: &str,
    request: &UpdateMovieRequest,
) -> Result<String, String> {
    ctx.handles
        .movies
        .update(id, request)
        .await
        .map(|movie| toast::updated(&movie.title))
        .map_err(|err| toast::mutation_failed(&err, "update", NOUN, "title"))
}

/// Delete one movie.
pub(crate) async fn delete(ctx: &ApiCtx, movie: &Movie) -> Result<String, String> {
    ctx.handles
        .movies
        .delete(&movie.id)
        .await
        .map(|_| toast::deleted(&movie.title))
        .map_err(|err| toast::mutation_failed(&err, "delete", NOUN, "detail"))
}

/// Delete the selected movies in one request.
pub(crate) async fn batch_delete(ctx: &ApiCtx, ids: &[String]) -> Result<String, String> {
    ctx.handles
        .movies
        .batch_delete(ids)
        .await
        .map(|response| toast::batch_deleted(response.deleted_count, NOUN))
        .map_err(|err| toast::mutation_failed(&err, "delete", "movies", "detail"))
}
