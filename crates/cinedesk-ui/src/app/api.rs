//! API context for sharing one set of resource handles.
//!
//! # Design
//! - Create exactly one client and one query cache per app boot.
//! - Every handle shares the cache so mutations invalidate what lists read.

use std::rc::Rc;
use std::sync::Arc;

use cinedesk_client::{
    ApiClient, Auth, ClientConfig, ClientResult, Genres, Movies, QueryCache, SharedSession, Users,
};

use crate::app::session::BrowserSessionStore;

/// Resource handles bound to the browser session.
#[derive(Debug)]
pub(crate) struct ApiHandles {
    pub auth: Auth,
    pub movies: Movies,
    pub genres: Genres,
    pub users: Users,
    pub session: SharedSession,
}

/// Shared API context for feature pages.
#[derive(Clone, Debug)]
pub(crate) struct ApiCtx {
    pub handles: Rc<ApiHandles>,
}

impl ApiCtx {
    /// Build the handles for `base_url` over the browser session.
    pub(crate) fn new(base_url: &str) -> ClientResult<Self> {
        let session: SharedSession = Arc::new(BrowserSessionStore);
        let api = ApiClient::new(ClientConfig::new(base_url)?, session.clone())?;
        let cache = QueryCache::new();
        Ok(Self {
            handles: Rc::new(ApiHandles {
                auth: Auth::new(api.clone(), cache.clone()),
                movies: Movies::new(api.clone(), cache.clone()),
                genres: Genres::new(api.clone(), cache.clone()),
                users: Users::new(api, cache),
                session,
            }),
        })
    }
}

impl PartialEq for ApiCtx {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.handles, &other.handles)
    }
}
