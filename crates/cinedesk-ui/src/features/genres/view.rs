use cinedesk_api_models::{FieldErrors, GenreDetail, GenreFilters, GenreOrdering, SortKey};
use yew::platform::spawn_local;
use yew::prelude::*;

use super::api;
use super::logic::{created_label, delete_warning, updated_label};
use crate::app::ApiCtx;
use crate::components::dialog::{ConfirmDialog, FormActions, Modal};
use crate::components::fields::TextField;
use crate::components::list_controls::{OrderingSelect, SearchInput, ordering_options};
use crate::components::list_state::{ListAction, update_query, use_list_query};
use crate::components::mutation::{push_toast, spawn_mutation};
use crate::components::pagination::Pagination;
use crate::components::status::{EmptyRow, ErrorPanel, SkeletonRows};
use crate::core::forms::GenreForm;
use crate::core::list::{ListData, LoadState, PageView};
use crate::core::toast::{NO_CHANGES, ToastKind};

const COLUMNS: u32 = 5;

#[derive(Clone, PartialEq)]
enum Dialog {
    Closed,
    Create,
    Edit(GenreDetail),
    Delete(GenreDetail),
}

#[function_component(GenresPage)]
pub(crate) fn genres_page() -> Html {
    match use_context::<ApiCtx>() {
        Some(api) => html! { <GenresView api={api} /> },
        None => html! {
            <ErrorPanel title="Error loading genres" message="The API client is not available." />
        },
    }
}

#[derive(Properties, PartialEq)]
struct ViewProps {
    api: ApiCtx,
}

#[function_component(GenresView)]
fn genres_view(props: &ViewProps) -> Html {
    let query = use_list_query::<GenreFilters>();
    let data = use_reducer(ListData::<GenreDetail>::default);
    let dialog = use_state(|| Dialog::Closed);
    let refresh = use_state(|| 0_u32);
    let deleting = use_state(|| false);
    let last_filters = use_mut_ref(|| None::<GenreFilters>);

    {
        let ctx = props.api.clone();
        let dispatcher = data.dispatcher();
        use_effect_with_deps(
            move |(filters, _): &(GenreFilters, u32)| {
                let filters = filters.clone();
                let query_changed = last_filters.borrow().as_ref() != Some(&filters);
                *last_filters.borrow_mut() = Some(filters.clone());
                dispatcher.dispatch(ListAction::Begin { query_changed });
                spawn_local(async move {
                    if let Some(result) = api::load(&ctx, &filters).await {
                        dispatcher.dispatch(ListAction::Resolve(result));
                    }
                });
                || ()
            },
            (query.filters().clone(), *refresh),
        );
    }

    let close = {
        let dialog = dialog.clone();
        Callback::from(move |()| dialog.set(Dialog::Closed))
    };
    let saved = {
        let dialog = dialog.clone();
        let refresh = refresh.clone();
        Callback::from(move |()| {
            dialog.set(Dialog::Closed);
            refresh.set((*refresh).wrapping_add(1));
        })
    };
    let open = |next: Dialog| {
        let dialog = dialog.clone();
        Callback::from(move |_: MouseEvent| dialog.set(next.clone()))
    };

    let on_search = {
        let query = query.clone();
        Callback::from(move |search: String| update_query(&query, |next| next.commit_search(&search)))
    };
    let on_ordering = {
        let query = query.clone();
        Callback::from(move |value: String| {
            if let Some(ordering) = GenreOrdering::parse(&value) {
                update_query(&query, |next| next.set_ordering(ordering));
            }
        })
    };
    let on_page = {
        let query = query.clone();
        Callback::from(move |page: u32| update_query(&query, |next| next.set_page(page)))
    };
    let on_page_size = {
        let query = query.clone();
        Callback::from(move |size: u32| update_query(&query, |next| next.set_page_size(size)))
    };
    let on_confirm_delete = {
        let ctx = props.api.clone();
        let dialog = dialog.clone();
        let deleting = deleting.clone();
        let saved = saved.clone();
        Callback::from(move |()| {
            let Dialog::Delete(genre) = (*dialog).clone() else {
                return;
            };
            let ctx = ctx.clone();
            spawn_mutation(&deleting, saved.clone(), async move {
                api::delete(&ctx, &genre).await
            });
        })
    };

    let body = match data.state {
        LoadState::Loading => html! {
            <SkeletonRows rows={query.page_size()} columns={COLUMNS} />
        },
        LoadState::Error => {
            let message = data.error.clone().unwrap_or_default();
            return html! { <ErrorPanel title="Error loading genres" message={message} /> };
        }
        LoadState::Ready if data.rows().is_empty() => html! {
            <tbody><EmptyRow columns={COLUMNS} message="No genres found." /></tbody>
        },
        LoadState::Ready => html! {
            <tbody>
                {for data.rows().iter().map(|genre| html! {
                    <tr key={genre.id.clone()}>
                        <td>{genre.name.clone()}</td>
                        <td>{genre.movies_count.to_string()}</td>
                        <td>{created_label(genre)}</td>
                        <td>{updated_label(genre)}</td>
                        <td class="actions">
                            <button class="btn btn-ghost btn-sm"
                                onclick={open(Dialog::Edit(genre.clone()))}>{"Edit"}</button>
                            <button class="btn btn-ghost btn-sm text-error"
                                onclick={open(Dialog::Delete(genre.clone()))}>{"Delete"}</button>
                        </td>
                    </tr>
                })}
            </tbody>
        },
    };

    let pagination = data.page.as_ref().map(|page| {
        let view = PageView::new(page, query.page(), query.page_size());
        html! {
            <Pagination view={view} noun="genre" on_page={on_page} on_page_size={on_page_size} />
        }
    });

    let dialog_view = match &*dialog {
        Dialog::Closed => html! {},
        Dialog::Create => html! {
            <GenreDialog api={props.api.clone()} editing={None::<GenreDetail>}
                on_close={close.clone()} on_saved={saved.clone()} />
        },
        Dialog::Edit(genre) => html! {
            <GenreDialog api={props.api.clone()} editing={Some(genre.clone())}
                on_close={close.clone()} on_saved={saved.clone()} />
        },
        Dialog::Delete(genre) => html! {
            <ConfirmDialog
                title="Delete genre"
                body={format!("Are you sure you want to delete \"{}\"? This action cannot be undone.", genre.name)}
                detail={delete_warning(genre).map(AttrValue::from)}
                busy={*deleting}
                on_confirm={on_confirm_delete}
                on_cancel={close.clone()}
            />
        },
    };

    html! {
        <section class="list-page">
            <div class="list-header">
                <p class="muted">{"Manage the genres movies are tagged with."}</p>
                <button class="btn btn-primary" onclick={open(Dialog::Create)}>{"Add genre"}</button>
            </div>
            <div class="list-filters">
                <SearchInput
                    committed={AttrValue::from(query.search().to_string())}
                    placeholder="Search genres..."
                    on_commit={on_search}
                />
                <OrderingSelect
                    id="genre-ordering"
                    value={AttrValue::Static(query.ordering().as_str())}
                    options={ordering_options::<GenreOrdering>()}
                    on_change={on_ordering}
                />
            </div>
            <table class="table">
                <thead>
                    <tr>
                        <th>{"Name"}</th>
                        <th>{"Movies"}</th>
                        <th>{"Created"}</th>
                        <th>{"Updated"}</th>
                        <th class="actions">{"Actions"}</th>
                    </tr>
                </thead>
                {body}
            </table>
            {pagination.unwrap_or_default()}
            {dialog_view}
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct GenreDialogProps {
    api: ApiCtx,
    editing: Option<GenreDetail>,
    on_close: Callback<()>,
    on_saved: Callback<()>,
}

#[function_component(GenreDialog)]
fn genre_dialog(props: &GenreDialogProps) -> Html {
    let form = {
        let editing = props.editing.clone();
        use_state(move || {
            editing
                .as_ref()
                .map(|genre| GenreForm::with_name(&genre.name))
                .unwrap_or_default()
        })
    };
    let errors = use_state(FieldErrors::default);
    let busy = use_state(|| false);

    let on_name = {
        let form = form.clone();
        Callback::from(move |name: String| form.set(GenreForm { name }))
    };
    let on_submit = {
        let ctx = props.api.clone();
        let editing = props.editing.clone();
        let form = form.clone();
        let errors = errors.clone();
        let busy = busy.clone();
        let on_close = props.on_close.clone();
        let on_saved = props.on_saved.clone();
        Callback::from(move |()| {
            let ctx = ctx.clone();
            match &editing {
                None => match form.validate() {
                    Err(found) => errors.set(found),
                    Ok(request) => {
                        errors.set(FieldErrors::default());
                        spawn_mutation(&busy, on_saved.clone(), async move {
                            api::create(&ctx, &request).await
                        });
                    }
                },
                Some(genre) => match form.diff(&genre.name) {
                    Err(found) => errors.set(found),
                    Ok(None) => {
                        push_toast(ToastKind::Info, NO_CHANGES);
                        on_close.emit(());
                    }
                    Ok(Some(patch)) => {
                        errors.set(FieldErrors::default());
                        let id = genre.id.clone();
                        spawn_mutation(&busy, on_saved.clone(), async move {
                            api::update(&ctx, &id, &patch).await
                        });
                    }
                },
            }
        })
    };

    let (title, submit_label) = if props.editing.is_some() {
        ("Edit genre", "Save changes")
    } else {
        ("Add genre", "Create genre")
    };
    let actions = html! {
        <FormActions submit_label={submit_label} busy={*busy}
            on_cancel={props.on_close.clone()} on_submit={on_submit} />
    };

    html! {
        <Modal title={title} busy={*busy} on_close={props.on_close.clone()} actions={actions}>
            <TextField id="genre-name" label="Name" value={form.name.clone()} on_change={on_name}
                error={errors.get("name").map(str::to_string)} placeholder={AttrValue::Static("e.g. Drama")} />
        </Modal>
    }
}
