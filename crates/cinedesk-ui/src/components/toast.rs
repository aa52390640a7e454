use gloo::timers::callback::Timeout;
use yew::prelude::*;
use yewdux::prelude::use_selector;

use crate::core::store::{AppStore, app_dispatch};
use crate::core::toast::{TOAST_TIMEOUT_MS, Toast, ToastKind};

#[function_component(ToastHost)]
pub(crate) fn toast_host() -> Html {
    let toasts = use_selector(|store: &AppStore| store.toasts.items().to_vec());
    let on_dismiss = {
        let dispatch = app_dispatch();
        Callback::from(move |id: u64| dispatch.reduce_mut(|store| store.toasts.dismiss(id)))
    };
    {
        let on_dismiss = on_dismiss.clone();
        use_effect_with_deps(
            move |list: &std::rc::Rc<Vec<Toast>>| {
                let handles: Vec<Timeout> = list
                    .iter()
                    .map(|toast| {
                        let on_dismiss = on_dismiss.clone();
                        let id = toast.id;
                        Timeout::new(TOAST_TIMEOUT_MS, move || on_dismiss.emit(id))
                    })
                    .collect();
                move || drop(handles)
            },
            toasts.clone(),
        );
    }

    html! {
        <div class="toast-host" aria-live="polite" aria-atomic="true">
            {for toasts.iter().map(|toast| render_toast(toast, on_dismiss.clone()))}
        </div>
    }
}

fn render_toast(toast: &Toast, on_dismiss: Callback<u64>) -> Html {
    let class = match toast.kind {
        ToastKind::Info => "info",
        ToastKind::Success => "success",
        ToastKind::Error => "error",
    };
    let id = toast.id;
    let on_close = Callback::from(move |_| on_dismiss.emit(id));

    html! {
        <div class={classes!("toast", class)} role="status">
            <span>{toast.message.clone()}</span>
            <button class="ghost" aria-label="Dismiss" onclick={on_close}>{"✕"}</button>
        </div>
    }
}
