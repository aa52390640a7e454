//! Sign-in page.

use yew::platform::spawn_local;
use yew::prelude::*;

use super::logic::{LOGIN_SUCCESS, login_failure};
use crate::app::ApiCtx;
use crate::components::fields::TextField;
use crate::components::mutation::push_toast;
use crate::core::forms::LoginForm;
use crate::core::store::{app_dispatch, signed_in};
use crate::core::toast::ToastKind;

/// Credential form. A successful sign-in flips the store, and route gating
/// then moves the user to the dashboard.
#[function_component(LoginPage)]
pub(crate) fn login_page() -> Html {
    let api_ctx = use_context::<ApiCtx>();
    let form = use_state(LoginForm::default);
    let busy = use_state(|| false);

    let on_email = {
        let form = form.clone();
        Callback::from(move |email: String| {
            form.set(LoginForm {
                email,
                ..(*form).clone()
            });
        })
    };
    let on_password = {
        let form = form.clone();
        Callback::from(move |password: String| {
            form.set(LoginForm {
                password,
                ..(*form).clone()
            });
        })
    };
    let on_submit = {
        let form = form.clone();
        let busy = busy.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            if *busy {
                return;
            }
            let request = match form.validate() {
                Ok(request) => request,
                Err(message) => {
                    push_toast(ToastKind::Error, message);
                    return;
                }
            };
            let Some(ctx) = api_ctx.clone() else {
                return;
            };
            busy.set(true);
            let busy = busy.clone();
            spawn_local(async move {
                match ctx.handles.auth.login(&request).await {
                    Ok(response) => {
                        busy.set(false);
                        app_dispatch().reduce_mut(|store| signed_in(store, Some(response.user)));
                        push_toast(ToastKind::Success, LOGIN_SUCCESS);
                    }
                    Err(err) => {
                        busy.set(false);
                        push_toast(ToastKind::Error, login_failure(&err));
                    }
                }
            });
        })
    };

    html! {
        <div class="login-page">
            <form class="login-card" onsubmit={on_submit} novalidate=true>
                <header>
                    <h1>{"Cinedesk"}</h1>
                    <p class="muted">{"Sign in to the admin dashboard."}</p>
                </header>
                <TextField id="login-email" label="Email" input_type="email"
                    value={form.email.clone()} on_change={on_email} disabled={*busy}
                    placeholder={AttrValue::Static("admin@example.com")} />
                <TextField id="login-password" label="Password" input_type="password"
                    value={form.password.clone()} on_change={on_password} disabled={*busy} />
                <button class="btn btn-primary" type="submit" disabled={*busy}>
                    {if *busy { "Signing in..." } else { "Sign in" }}
                </button>
            </form>
        </div>
    }
}
