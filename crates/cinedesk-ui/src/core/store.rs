//! App-wide yewdux store.
//!
//! # Design
//! - Only state shared across pages lives here: the signed-in user and the
//!   toast queue. List pages own their query and rows locally.
//! - Reducers are plain functions over [`AppStore`] so they run in native tests.

use cinedesk_api_models::User;
use yewdux::prelude::Dispatch;
use yewdux::store::Store;

use crate::core::toast::{ToastKind, ToastQueue};

/// Global application store.
#[derive(Clone, Debug, Default, PartialEq, Store)]
pub struct AppStore {
    /// Session slice.
    pub session: SessionSlice,
    /// Visible notifications.
    pub toasts: ToastQueue,
}

/// Who is signed in, as last read from the session store.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionSlice {
    /// Whether an access token is present.
    pub authenticated: bool,
    /// Signed-in user shown in the sidebar footer.
    pub user: Option<User>,
}

/// Dispatch handle for the global store.
#[must_use]
pub fn app_dispatch() -> Dispatch<AppStore> {
    Dispatch::<AppStore>::new()
}

/// Record a successful sign-in.
pub fn signed_in(store: &mut AppStore, user: Option<User>) {
    store.session.authenticated = true;
    store.session.user = user;
}

/// Forget the signed-in user.
pub fn signed_out(store: &mut AppStore) {
    store.session = SessionSlice::default();
}

/// Queue a toast.
pub fn notify(store: &mut AppStore, kind: ToastKind, message: impl Into<String>) -> u64 {
    store.toasts.push(kind, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_out_clears_user_and_flag() {
        let mut store = AppStore::default();
        signed_in(&mut store, None);
        assert!(store.session.authenticated);
        notify(&mut store, ToastKind::Success, "ok");
        signed_out(&mut store);
        assert_eq!(store.session, SessionSlice::default());
        assert_eq!(store.toasts.items().len(), 1);
    }
}
