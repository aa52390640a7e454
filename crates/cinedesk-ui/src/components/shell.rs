use cinedesk_api_models::User;
use yew::prelude::*;
use yew_router::prelude::Link;

use crate::app::Route;
use crate::app::preferences::{load_sidebar_collapsed, persist_sidebar_collapsed};

#[derive(Properties, PartialEq)]
pub(crate) struct ShellProps {
    pub children: Children,
    pub active: Route,
    pub title: AttrValue,
    pub user: Option<User>,
    pub on_logout: Callback<()>,
    #[prop_or_default]
    pub logout_busy: bool,
}

#[function_component(AppShell)]
pub(crate) fn app_shell(props: &ShellProps) -> Html {
    let collapsed = use_state(load_sidebar_collapsed);
    let toggle_sidebar = {
        let collapsed = collapsed.clone();
        Callback::from(move |_| {
            let next = !*collapsed;
            persist_sidebar_collapsed(next);
            collapsed.set(next);
        })
    };
    let logout = {
        let on_logout = props.on_logout.clone();
        Callback::from(move |_| on_logout.emit(()))
    };

    html! {
        <div class="app-shell">
            <aside class={classes!("sidebar", if *collapsed { "closed" } else { "open" })}>
                <div class="brand">
                    <strong>{"Cinedesk"}</strong>
                    <span class="muted">{"Admin"}</span>
                </div>
                <nav>
                    {nav_item(Route::Movies, "Movies", &props.active)}
                    {nav_item(Route::Users, "Users", &props.active)}
                    {nav_item(Route::Genres, "Genres", &props.active)}
                </nav>
                <div class="sidebar-footer">
                    {props.user.as_ref().map(|user| html! {
                        <div class="current-user">
                            <strong>{user.display_name()}</strong>
                            <span class="muted">{user.email.clone()}</span>
                        </div>
                    }).unwrap_or_default()}
                    <button class="ghost" disabled={props.logout_busy} onclick={logout}>{"Log out"}</button>
                </div>
            </aside>
            <div class="main">
                <header class="topbar">
                    <button class="ghost" aria-label="Toggle navigation" onclick={toggle_sidebar}>{"☰"}</button>
                    <h2>{props.title.clone()}</h2>
                </header>
                <main>
                    {for props.children.iter()}
                </main>
            </div>
        </div>
    }
}

fn nav_item(route: Route, label: &'static str, active: &Route) -> Html {
    let is_active = *active == route
        || (route == Route::Movies && *active == Route::Dashboard);
    let classes = classes!("nav-item", is_active.then_some("active"));
    html! {
        <Link<Route> to={route} classes={classes}>{label}</Link<Route>>
    }
}
