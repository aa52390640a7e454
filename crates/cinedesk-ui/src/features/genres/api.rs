//! Genre requests issued by the page.

use cinedesk_api_models::{CreateGenreRequest, GenreDetail, GenreFilters, Page, UpdateGenreRequest};

use crate::app::ApiCtx;
use crate::core::list::settle_fetch;
use crate::core::toast;

const NOUN: &str = "genre";

pub(crate) async fn load(
    ctx: &ApiCtx,
    filters: &GenreFilters,
) -> Option<Result<Page<GenreDetail>, String>> {
    settle_fetch(ctx.handles.genres.list(filters).await, "genres")
}

pub(crate) async fn create(ctx: &ApiCtx, request: &CreateGenreRequest) -> Result<String, String> {
    ctx.handles
        .genres
        .create(request)
        .await
        .map(|genre| toast::created(&genre.name))
        .map_err(|err| toast::mutation_failed(&err, "create", NOUN, "name"))
}

pub(crate) async fn update(
    ctx: &ApiCtx,
    id: &str,
    request: &UpdateGenreRequest,
) -> Result<String, String> {
    ctx.handles
        .genres
        .update(id, request)
        .await
        .map(|genre| toast::updated(&genre.name))
        .map_err(|err| toast::mutation_failed(&err, "update", NOUN, "name"))
}

/// Delete a genre. A refusal's `detail` text becomes the toast.
pub(crate) async fn delete(ctx: &ApiCtx, genre: &GenreDetail) -> Result<String, String> {
    ctx.handles
        .genres
        .delete(&genre.id)
        .await
        .map(|_| toast::deleted(&genre.name))
        .map_err(|err| toast::mutation_failed(&err, "delete", NOUN, "detail"))
}
