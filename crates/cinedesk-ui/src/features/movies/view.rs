//! Movie catalogue page and its add/edit dialog.

use cinedesk_api_models::{FieldErrors, Genre, Movie, MovieFilters, MovieOrdering, SortKey};
use yew::platform::spawn_local;
use yew::prelude::*;

use super::api;
use super::logic::{
    duration_label, genre_badges, genre_filter_value, rating_label, row_ids, set_genre_filter,
};
use crate::app::ApiCtx;
use crate::components::bulk_bar::BulkActionBar;
use crate::components::dialog::{ConfirmDialog, FormActions, Modal};
use crate::components::fields::{CheckboxField, SelectField, TextAreaField, TextField, static_options};
use crate::components::list_controls::{OrderingSelect, SearchInput, ordering_options};
use crate::components::list_state::{ListAction, update_query, use_list_query};
use crate::components::mutation::{push_toast, spawn_mutation};
use crate::components::pagination::Pagination;
use crate::components::select_all::SelectAllCheckbox;
use crate::components::status::{EmptyRow, ErrorPanel, SkeletonRows};
use crate::core::format::display_date;
use crate::core::forms::MovieForm;
use crate::core::list::{ListData, LoadState, PageView, STATUS_OPTIONS, parse_status, status_value};
use crate::core::selection::Selection;
use crate::core::toast::{NO_CHANGES, ToastKind};

const COLUMNS: u32 = 9;

#[derive(Clone, PartialEq)]
enum Dialog {
    Closed,
    Create,
    Edit(Movie),
    Delete(Movie),
    BatchDelete,
}

#[function_component(MoviesPage)]
pub(crate) fn movies_page() -> Html {
    match use_context::<ApiCtx>() {
        Some(api) => html! { <MoviesView api={api} /> },
        None => html! {
            <ErrorPanel title="Error loading movies" message="The API client is not available." />
        },
    }
}

#[derive(Properties, PartialEq)]
struct ViewProps {
    api: ApiCtx,
}

#[function_component(MoviesView)]
fn movies_view(props: &ViewProps) -> Html {
    let query = use_list_query::<MovieFilters>();
    let data = use_reducer(ListData::<Movie>::default);
    let selection = use_state(Selection::<String>::new);
    let dialog = use_state(|| Dialog::Closed);
    let refresh = use_state(|| 0_u32);
    let deleting = use_state(|| false);
    let genres = use_state(Vec::<Genre>::new);
    let last_filters = use_mut_ref(|| None::<MovieFilters>);

    {
        let ctx = props.api.clone();
        let genres = genres.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    genres.set(api::genre_options(&ctx).await);
                });
                || ()
            },
            (),
        );
    }

    {
        let ctx = props.api.clone();
        let dispatcher = data.dispatcher();
        use_effect_with_deps(
            move |(filters, _): &(MovieFilters, u32)| {
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

    let visible = row_ids(data.rows());
    {
        let selection = selection.clone();
        use_effect_with_deps(
            move |visible: &Vec<String>| {
                let mut next = (*selection).clone();
                next.retain_visible(visible);
                if next != *selection {
                    selection.set(next);
                }
                || ()
            },
            visible.clone(),
        );
    }

    let reload = {
        let refresh = refresh.clone();
        Callback::from(move |()| refresh.set((*refresh).wrapping_add(1)))
    };
    let close = {
        let dialog = dialog.clone();
        Callback::from(move |()| dialog.set(Dialog::Closed))
    };
    let saved = {
        let dialog = dialog.clone();
        let reload = reload.clone();
        Callback::from(move |()| {
            dialog.set(Dialog::Closed);
            reload.emit(());
        })
    };

    let on_search = {
        let query = query.clone();
        Callback::from(move |search: String| update_query(&query, |next| next.commit_search(&search)))
    };
    let on_ordering = {
        let query = query.clone();
        Callback::from(move |value: String| {
            if let Some(ordering) = MovieOrdering::parse(&value) {
                update_query(&query, |next| next.set_ordering(ordering));
            }
        })
    };
    let on_status = {
        let query = query.clone();
        Callback::from(move |value: String| {
            update_query(&query, |next| {
                next.update_filters(|filters| filters.is_active = parse_status(&value))
            });
        })
    };
    let on_genre = {
        let query = query.clone();
        Callback::from(move |value: String| {
            update_query(&query, |next| {
                next.update_filters(|filters| set_genre_filter(filters, &value))
            });
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

    let on_toggle_all = {
        let selection = selection.clone();
        let visible = visible.clone();
        Callback::from(move |()| {
            let mut next = (*selection).clone();
            next.toggle_all(&visible);
            selection.set(next);
        })
    };
    let on_clear_selection = {
        let selection = selection.clone();
        Callback::from(move |()| selection.set(Selection::new()))
    };
    let open = |next: Dialog| {
        let dialog = dialog.clone();
        Callback::from(move |_: MouseEvent| dialog.set(next.clone()))
    };

    let on_confirm_delete = {
        let ctx = props.api.clone();
        let dialog = dialog.clone();
        let deleting = deleting.clone();
        let saved = saved.clone();
        Callback::from(move |()| {
            let Dialog::Delete(movie) = (*dialog).clone() else {
                return;
            };
            let ctx = ctx.clone();
            spawn_mutation(&deleting, saved.clone(), async move {
                api::delete(&ctx, &movie).await
            });
        })
    };
    let on_confirm_batch = {
        let ctx = props.api.clone();
        let selection = selection.clone();
        let deleting = deleting.clone();
        let saved = saved.clone();
        Callback::from(move |()| {
            let ids = selection.ids();
            if ids.is_empty() {
                return;
            }
            let ctx = ctx.clone();
            let selection = selection.clone();
            let saved = saved.clone();
            let done = Callback::from(move |()| {
                selection.set(Selection::new());
                saved.emit(());
            });
            spawn_mutation(&deleting, done, async move {
                api::batch_delete(&ctx, &ids).await
            });
        })
    };
    let on_batch = {
        let dialog = dialog.clone();
        Callback::from(move |()| dialog.set(Dialog::BatchDelete))
    };

    let filters = query.filters();
    let mut genre_options = vec![(AttrValue::Static(""), AttrValue::Static("All genres"))];
    genre_options.extend(
        genres
            .iter()
            .map(|genre| (AttrValue::from(genre.id.clone()), AttrValue::from(genre.name.clone()))),
    );

    let body = match data.state {
        LoadState::Loading => html! {
            <SkeletonRows rows={query.page_size()} columns={COLUMNS} />
        },
        LoadState::Error => {
            let message = data.error.clone().unwrap_or_default();
            return html! { <ErrorPanel title="Error loading movies" message={message} /> };
        }
        LoadState::Ready if data.rows().is_empty() => html! {
            <tbody><EmptyRow columns={COLUMNS} message="No movies found." /></tbody>
        },
        LoadState::Ready => html! {
            <tbody>
                {for data.rows().iter().map(|movie| {
                    let toggle = {
                        let selection = selection.clone();
                        let id = movie.id.clone();
                        Callback::from(move |_: Event| {
                            let mut next = (*selection).clone();
                            next.toggle(id.clone());
                            selection.set(next);
                        })
                    };
                    movie_row(
                        movie,
                        selection.contains(&movie.id),
                        toggle,
                        open(Dialog::Edit(movie.clone())),
                        open(Dialog::Delete(movie.clone())),
                    )
                })}
            </tbody>
        },
    };

    let pagination = data.page.as_ref().map(|page| {
        let view = PageView::new(page, query.page(), query.page_size());
        html! {
            <Pagination view={view} noun="movie" on_page={on_page} on_page_size={on_page_size} />
        }
    });

    let dialog_view = match &*dialog {
        Dialog::Closed => html! {},
        Dialog::Create => html! {
            <MovieDialog api={props.api.clone()} editing={None::<Movie>}
                genres={(*genres).clone()} on_close={close.clone()} on_saved={saved.clone()} />
        },
        Dialog::Edit(movie) => html! {
            <MovieDialog api={props.api.clone()} editing={Some(movie.clone())}
                genres={(*genres).clone()} on_close={close.clone()} on_saved={saved.clone()} />
        },
        Dialog::Delete(movie) => html! {
            <ConfirmDialog
                title="Delete movie"
                body={format!("Are you sure you want to delete \"{}\"? This action cannot be undone.", movie.title)}
                busy={*deleting}
                on_confirm={on_confirm_delete}
                on_cancel={close.clone()}
            />
        },
        Dialog::BatchDelete => html! {
            <ConfirmDialog
                title="Delete movies"
                body={format!("Are you sure you want to delete {} movie(s)? This action cannot be undone.", selection.len())}
                busy={*deleting}
                on_confirm={on_confirm_batch}
                on_cancel={close.clone()}
            />
        },
    };

    html! {
        <section class="list-page">
            <div class="list-header">
                <p class="muted">{"Manage the movie catalogue."}</p>
                <button class="btn btn-primary" onclick={open(Dialog::Create)}>{"Add movie"}</button>
            </div>
            <div class="list-filters">
                <SearchInput
                    committed={AttrValue::from(query.search().to_string())}
                    placeholder="Search movies..."
                    on_commit={on_search}
                />
                <OrderingSelect
                    id="movie-ordering"
                    value={AttrValue::Static(query.ordering().as_str())}
                    options={ordering_options::<MovieOrdering>()}
                    on_change={on_ordering}
                />
                <SelectField
                    id="movie-status"
                    value={AttrValue::Static(status_value(filters.is_active))}
                    options={static_options(&STATUS_OPTIONS)}
                    on_change={on_status}
                />
                <SelectField
                    id="movie-genre"
                    value={AttrValue::from(genre_filter_value(filters).to_string())}
                    options={genre_options}
                    on_change={on_genre}
                />
            </div>
            <BulkActionBar count={selection.len()} noun="movie" on_delete={on_batch} on_clear={on_clear_selection} />
            <table class="table">
                <thead>
                    <tr>
                        <th>
                            <SelectAllCheckbox state={selection.state(&visible)} on_toggle={on_toggle_all} />
                        </th>
                        <th>{"Title"}</th>
                        <th>{"Description"}</th>
                        <th>{"Duration"}</th>
                        <th>{"Release Date"}</th>
                        <th>{"Rating"}</th>
                        <th>{"Genres"}</th>
                        <th>{"Status"}</th>
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

fn movie_row(
    movie: &Movie,
    selected: bool,
    on_toggle: Callback<Event>,
    on_edit: Callback<MouseEvent>,
    on_delete: Callback<MouseEvent>,
) -> Html {
    let (badges, hidden) = genre_badges(movie);
    html! {
        <tr key={movie.id.clone()} class={classes!(selected.then_some("selected"))}>
            <td>
                <input type="checkbox" aria-label={format!("Select {}", movie.title)}
                    checked={selected} onchange={on_toggle} />
            </td>
            <td class="title-cell">
                {(!movie.poster_image.is_empty()).then(|| html! {
                    <img class="poster" src={movie.poster_image.clone()} alt="" />
                }).unwrap_or_default()}
                <span>{movie.title.clone()}</span>
            </td>
            <td class="truncate">{movie.description.clone()}</td>
            <td>{duration_label(movie)}</td>
            <td>{display_date(&movie.release_date).unwrap_or_default()}</td>
            <td>
                {rating_label(movie).map_or_else(
                    || html! { <span class="muted">{"N/A"}</span> },
                    |rating| html! { <span>{format!("★ {rating}")}</span> },
                )}
            </td>
            <td>
                {for badges.into_iter().map(|name| html! { <span class="badge">{name}</span> })}
                {(hidden > 0).then(|| html! { <span class="badge muted">{format!("+{hidden}")}</span> }).unwrap_or_default()}
            </td>
            <td>
                <span class={classes!("badge", if movie.is_active { "badge-success" } else { "badge-ghost" })}>
                    {if movie.is_active { "Active" } else { "Inactive" }}
                </span>
            </td>
            <td class="actions">
                <button class="btn btn-ghost btn-sm" onclick={on_edit}>{"Edit"}</button>
                <button class="btn btn-ghost btn-sm text-error" onclick={on_delete}>{"Delete"}</button>
            </td>
        </tr>
    }
}

#[derive(Properties, PartialEq)]
struct MovieDialogProps {
    api: ApiCtx,
    editing: Option<Movie>,
    genres: Vec<Genre>,
    on_close: Callback<()>,
    on_saved: Callback<()>,
}

#[function_component(MovieDialog)]
fn movie_dialog(props: &MovieDialogProps) -> Html {
    let form = {
        let editing = props.editing.clone();
        use_state(move || editing.as_ref().map(MovieForm::from_movie).unwrap_or_default())
    };
    let errors = use_state(FieldErrors::default);
    let busy = use_state(|| false);

    let edit = |apply: fn(&mut MovieForm, String)| {
        let form = form.clone();
        Callback::from(move |value: String| {
            let mut next = (*form).clone();
            apply(&mut next, value);
            form.set(next);
        })
    };
    let flag = |apply: fn(&mut MovieForm, bool)| {
        let form = form.clone();
        Callback::from(move |checked: bool| {
            let mut next = (*form).clone();
            apply(&mut next, checked);
            form.set(next);
        })
    };
    let error = |field: &str| errors.get(field).map(str::to_string);

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
                Some(movie) => match form.diff(movie) {
                    Err(found) => errors.set(found),
                    Ok(None) => {
                        push_toast(ToastKind::Info, NO_CHANGES);
                        on_close.emit(());
                    }
                    Ok(Some(patch)) => {
                        errors.set(FieldErrors::default());
                        let id = movie.id.clone();
                        spawn_mutation(&busy, on_saved.clone(), async move {
                            api::update(&ctx, &id, &patch).await
                        });
                    }
                },
            }
        })
    };

    let (title, submit_label) = if props.editing.is_some() {
        ("Edit movie", "Save changes")
    } else {
        ("Add movie", "Create movie")
    };
    let actions = html! {
        <FormActions submit_label={submit_label} busy={*busy}
            on_cancel={props.on_close.clone()} on_submit={on_submit} />
    };

    html! {
        <Modal title={title} busy={*busy} on_close={props.on_close.clone()} actions={actions}>
            <TextField id="movie-title" label="Title" value={form.title.clone()}
                on_change={edit(|form, value| form.title = value)} error={error("title")} />
            <TextAreaField id="movie-description" label="Description" value={form.description.clone()}
                on_change={edit(|form, value| form.description = value)} error={error("description")} />
            <div class="field-row">
                <TextField id="movie-duration" label="Duration (minutes)" input_type="number"
                    value={form.duration.clone()}
                    on_change={edit(|form, value| form.duration = value)} error={error("duration")} />
                <TextField id="movie-release-date" label="Release date" input_type="date"
                    value={form.release_date.clone()}
                    on_change={edit(|form, value| form.release_date = value)} error={error("release_date")} />
                <TextField id="movie-rating" label="Rating" input_type="number"
                    value={form.rating.clone()}
                    on_change={edit(|form, value| form.rating = value)} error={error("rating")} />
            </div>
            <TextField id="movie-poster" label="Poster image URL" input_type="url"
                value={form.poster_image.clone()}
                on_change={edit(|form, value| form.poster_image = value)} error={error("poster_image")} />
            <TextField id="movie-trailer" label="Trailer URL" input_type="url"
                value={form.trailer_url.clone()}
                on_change={edit(|form, value| form.trailer_url = value)} error={error("trailer_url")} />
            <fieldset class="genre-picker">
                <legend>{"Genres"}</legend>
                {for props.genres.iter().map(|genre| {
                    let toggle = {
                        let form = form.clone();
                        let id = genre.id.clone();
                        Callback::from(move |_: bool| {
                            let mut next = (*form).clone();
                            next.toggle_genre(&id);
                            form.set(next);
                        })
                    };
                    html! {
                        <CheckboxField
                            id={format!("movie-genre-{}", genre.id)}
                            label={genre.name.clone()}
                            checked={form.genre_ids.contains(&genre.id)}
                            on_toggle={toggle}
                        />
                    }
                })}
                {error("genre_ids").map(|message| html! { <p class="field-error">{message}</p> }).unwrap_or_default()}
            </fieldset>
            <CheckboxField id="movie-active" label="Active" checked={form.is_active}
                on_toggle={flag(|form, checked| form.is_active = checked)} />
        </Modal>
    }
}
