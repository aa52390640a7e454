use cinedesk_api_models::{
    BatchDeleteUsersRequest, BatchDeleteUsersResponse, CreateUserRequest, DeleteResponse, Page,
    UpdateUserRequest, User, UserFilters,
};
use tracing::info;

use super::{Backend, LIST_SLOT};
use crate::cache::{DEFAULT_STALE_TIME, FetchOutcome, KeyPrefix, QueryCache, Resource};
use crate::error::ClientResult;
use crate::http::ApiClient;

const BASE: &str = "/auth/admin/users/";
const REGISTER: &str = "/auth/register/";

/// User administration handle.
#[derive(Debug, Clone)]
pub struct Users {
    backend: Backend,
}

impl Users {
    /// Handle over `api` sharing `cache`.
    #[must_use]
    pub const fn new(api: ApiClient, cache: QueryCache) -> Self {
        Self {
            backend: Backend::new(api, cache),
        }
    }

    /// One page of users matching `filters`.
    pub async fn list(&self, filters: &UserFilters) -> ClientResult<FetchOutcome<Page<User>>> {
        self.backend
            .list(Resource::Users, LIST_SLOT, BASE, filters, DEFAULT_STALE_TIME)
            .await
    }

    /// User by id; `None` without a request when `id` is zero.
    pub async fn get(&self, id: u64) -> ClientResult<Option<User>> {
        if id == 0 {
            return Ok(None);
        }
        self.backend
            .item(
                Resource::Users,
                &id.to_string(),
                &format!("{BASE}{id}/"),
                DEFAULT_STALE_TIME,
            )
            .await
            .map(Some)
    }

    /// Register a new account through the public registration endpoint.
    pub async fn create(&self, request: &CreateUserRequest) -> ClientResult<User> {
        let user: User = self.backend.api.post(REGISTER, Some(request)).await?;
        self.backend.cache.invalidate(&KeyPrefix::Lists(Resource::Users));
        info!(user_id = user.id, "user created");
        Ok(user)
    }

    /// Patch a user; invalidates the lists and the item.
    pub async fn update(&self, id: u64, request: &UpdateUserRequest) -> ClientResult<User> {
        let user: User = self
            .backend
            .api
            .patch(&format!("{BASE}{id}/"), request)
            .await?;
        self.backend.cache.invalidate(&KeyPrefix::Lists(Resource::Users));
        self.backend
            .cache
            .invalidate(&KeyPrefix::item(Resource::Users, id));
        info!(user_id = id, "user updated");
        Ok(user)
    }

    /// Delete a user; invalidates the lists and evicts the item.
    pub async fn delete(&self, id: u64) -> ClientResult<DeleteResponse> {
        let response: DeleteResponse = self.backend.api.delete(&format!("{BASE}{id}/")).await?;
        self.backend.cache.invalidate(&KeyPrefix::Lists(Resource::Users));
        self.backend.cache.evict(&KeyPrefix::item(Resource::Users, id));
        info!(user_id = id, "user deleted");
        Ok(response)
    }

    /// Delete several users in one call; evicts each id.
    pub async fn batch_delete(&self, ids: &[u64]) -> ClientResult<BatchDeleteUsersResponse> {
        let body = BatchDeleteUsersRequest {
            user_ids: ids.to_vec(),
        };
        let response: BatchDeleteUsersResponse = self
            .backend
            .api
            .post(&format!("{BASE}batch-delete/"), Some(&body))
            .await?;
        self.backend.cache.invalidate(&KeyPrefix::Lists(Resource::Users));
        for id in ids {
            self.backend.cache.evict(&KeyPrefix::item(Resource::Users, id));
        }
        info!(deleted = response.deleted_count, "users batch deleted");
        Ok(response)
    }
}
