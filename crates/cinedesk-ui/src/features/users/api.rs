//! User requests issued by the page.

use cinedesk_api_models::{CreateUserRequest, Page, UpdateUserRequest, User, UserFilters};

use crate::app::ApiCtx;
use crate::core::list::settle_fetch;
use crate::core::toast;

const NOUN: &str = "user";

pub(crate) async fn load(ctx: &ApiCtx, filters: &UserFilters) -> Option<Result<Page<User>, String>> {
    settle_fetch(ctx.handles.users.list(filters).await, "users")
}

/// Register an account from the add dialog.
pub(crate) async fn create(ctx: &ApiCtx, request: &CreateUserRequest) -> Result<String, String> {
    ctx.handles
        .users
        .create(request)
        .await
        .map(|user| toast::created(&user.username))
        .map_err(|err| toast::mutation_failed(&err, "create", NOUN, "username"))
}

pub(crate) async fn update(
    ctx: &ApiCtx,
    id: u64,
    request: &UpdateUserRequest,
) -> Result<String, String> {
    ctx.handles
        .users
        .update(id, request)
        .await
        .map(|user| toast::updated(&user.username))
        .map_err(|err| toast::mutation_failed(&err, "update", NOUN, "username"))
}

pub(crate) async fn delete(ctx: &ApiCtx, user: &User) -> Result<String, String> {
    ctx.handles
        .users
        .delete(user.id)
        .await
        .map(|_| toast::deleted(&user.username))
        .map_err(|err| toast::mutation_failed(&err, "delete", NOUN, "detail"))
}

pub(crate) async fn batch_delete(ctx: &ApiCtx, ids: &[u64]) -> Result<String, String> {
    ctx.handles
        .users
        .batch_delete(ids)
        .await
        .map(|response| toast::batch_deleted(response.deleted_count, NOUN))
        .map_err(|err| toast::mutation_failed(&err, "delete", "users", "detail"))
}
