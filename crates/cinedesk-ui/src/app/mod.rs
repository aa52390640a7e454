use gloo::console;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::use_selector;

use crate::components::shell::AppShell;
use crate::components::status::ErrorPanel;
use crate::components::toast::ToastHost;
use crate::core::routes::{Gate, gate};
use crate::core::store::{AppStore, app_dispatch, notify, signed_in, signed_out};
use crate::core::toast::ToastKind;
use crate::features::auth::logic::LOGOUT_SUCCESS;
use crate::features::auth::view::LoginPage;
use crate::features::genres::view::GenresPage;
use crate::features::movies::view::MoviesPage;
use crate::features::users::view::UsersPage;
pub(crate) use api::ApiCtx;
use preferences::api_base_url;
pub(crate) use routes::Route;

mod api;
pub(crate) mod preferences;
mod routes;
mod session;

#[function_component(CinedeskApp)]
pub(crate) fn cinedesk_app() -> Html {
    let api_ctx = use_memo(
        |_| {
            let ctx = ApiCtx::new(&api_base_url());
            if let Ok(ctx) = &ctx {
                restore_session(ctx);
            }
            ctx
        },
        (),
    );

    match &*api_ctx {
        Ok(ctx) => html! {
            <ContextProvider<ApiCtx> context={ctx.clone()}>
                <BrowserRouter>
                    <Routed />
                </BrowserRouter>
                <ToastHost />
            </ContextProvider<ApiCtx>>
        },
        Err(err) => {
            console::error!("api client setup failed", err.to_string());
            html! {
                <ErrorPanel
                    title="Configuration error"
                    message="The dashboard could not reach its API configuration."
                />
            }
        }
    }
}

/// Seed the store from a session left by a previous visit, before the first
/// route is gated.
fn restore_session(ctx: &ApiCtx) {
    let session = &ctx.handles.session;
    if session.is_authenticated() {
        let user = session.user();
        app_dispatch().reduce_mut(|store| signed_in(store, user));
    }
}

/// Applies route gating, then renders the page inside the shell.
#[function_component(Routed)]
fn routed() -> Html {
    let route = use_route::<Route>().unwrap_or(Route::NotFound);
    let authenticated = use_selector(|store: &AppStore| store.session.authenticated);
    let user = use_selector(|store: &AppStore| store.session.user.clone());
    let api_ctx = use_context::<ApiCtx>();
    let logout_busy = use_state(|| false);

    if let Gate::Redirect(target) = gate(&route.to_path(), *authenticated) {
        return html! { <Redirect<Route> to={Route::from_gate_target(target)} /> };
    }

    let on_logout = {
        let logout_busy = logout_busy.clone();
        Callback::from(move |()| {
            let Some(api_ctx) = api_ctx.clone() else {
                return;
            };
            logout_busy.set(true);
            let logout_busy = logout_busy.clone();
            yew::platform::spawn_local(async move {
                if let Err(err) = api_ctx.handles.auth.logout().await {
                    console::warn!("logout request failed", err.to_string());
                }
                app_dispatch().reduce_mut(|store| {
                    signed_out(store);
                    notify(store, ToastKind::Info, LOGOUT_SUCCESS);
                });
                logout_busy.set(false);
            });
        })
    };

    let (title, page) = match route {
        Route::Login => return html! { <LoginPage /> },
        Route::Home => return html! { <Redirect<Route> to={Route::Dashboard} /> },
        Route::Dashboard | Route::Movies => ("Movies", html! { <MoviesPage /> }),
        Route::Genres => ("Genres", html! { <GenresPage /> }),
        Route::Users => ("Users", html! { <UsersPage /> }),
        Route::NotFound => (
            "Not found",
            html! {
                <ErrorPanel
                    title="Page not found"
                    message="Use the navigation to return to a supported view."
                />
            },
        ),
    };

    html! {
        <AppShell
            active={route}
            title={AttrValue::Static(title)}
            user={(*user).clone()}
            on_logout={on_logout}
            logout_busy={*logout_busy}
        >
            {page}
        </AppShell>
    }
}

/// Entrypoint invoked by Trunk for wasm32 builds.
pub fn run_app() {
    console_error_panic_hook::set_once();
    if let Some(root) = gloo::utils::document().get_element_by_id("root") {
        yew::Renderer::<CinedeskApp>::with_root(root).render();
    } else {
        yew::Renderer::<CinedeskApp>::new().render();
    }
}
