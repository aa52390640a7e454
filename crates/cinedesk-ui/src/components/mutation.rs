//! Running a mutation from a dialog and reporting it as a toast.

use std::future::Future;

use yew::platform::spawn_local;
use yew::prelude::*;

use crate::core::store::{app_dispatch, notify};
use crate::core::toast::ToastKind;

/// Push a toast onto the shared queue.
pub(crate) fn push_toast(kind: ToastKind, message: impl Into<String>) {
    let message = message.into();
    app_dispatch().reduce_mut(move |store| {
        notify(store, kind, message);
    });
}

/// Await `request` with `busy` raised, toast its outcome and call
/// `on_success` when it succeeded.
///
/// `request` resolves to the toast text on both sides.
pub(crate) fn spawn_mutation<Fut>(
    busy: &UseStateHandle<bool>,
    on_success: Callback<()>,
    request: Fut,
) where
    Fut: Future<Output = Result<String, String>> + 'static,
{
    busy.set(true);
    let busy = busy.clone();
    spawn_local(async move {
        let outcome = request.await;
        busy.set(false);
        match outcome {
            Ok(message) => {
                push_toast(ToastKind::Success, message);
                on_success.emit(());
            }
            Err(message) => push_toast(ToastKind::Error, message),
        }
    });
}
