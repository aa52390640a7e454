//! User administration page with add, edit and delete dialogs.

use cinedesk_api_models::{FieldErrors, Language, Role, SortKey, User, UserFilters, UserOrdering};
use yew::platform::spawn_local;
use yew::prelude::*;

use super::api;
use super::logic::{
    ROLE_OPTIONS, avatar_url, initial, joined_label, last_login_label, role_label, role_value,
    row_ids, status_label,
};
use crate::app::ApiCtx;
use crate::components::bulk_bar::BulkActionBar;
use crate::components::dialog::{ConfirmDialog, FormActions, Modal};
use crate::components::fields::{CheckboxField, SelectField, TextField, static_options};
use crate::components::list_controls::{OrderingSelect, SearchInput, ordering_options};
use crate::components::list_state::{ListAction, update_query, use_list_query};
use crate::components::mutation::{push_toast, spawn_mutation};
use crate::components::pagination::Pagination;
use crate::components::select_all::SelectAllCheckbox;
use crate::components::status::{EmptyRow, ErrorPanel, SkeletonRows};
use crate::core::forms::{NewUserForm, UserForm};
use crate::core::list::{ListData, LoadState, PageView, STATUS_OPTIONS, parse_status, status_value};
use crate::core::selection::Selection;
use crate::core::toast::{NO_CHANGES, ToastKind};

const COLUMNS: u32 = 8;

#[derive(Clone, PartialEq)]
enum Dialog {
    Closed,
    Create,
    Edit(User),
    Delete(User),
    BatchDelete,
}

#[function_component(UsersPage)]
pub(crate) fn users_page() -> Html {
    match use_context::<ApiCtx>() {
        Some(api) => html! { <UsersView api={api} /> },
        None => html! {
            <ErrorPanel title="Error loading users" message="The API client is not available." />
        },
    }
}

#[derive(Properties, PartialEq)]
struct ViewProps {
    api: ApiCtx,
}

#[function_component(UsersView)]
fn users_view(props: &ViewProps) -> Html {
    let query = use_list_query::<UserFilters>();
    let data = use_reducer(ListData::<User>::default);
    let selection = use_state(Selection::<u64>::new);
    let dialog = use_state(|| Dialog::Closed);
    let refresh = use_state(|| 0_u32);
    let deleting = use_state(|| false);
    let last_filters = use_mut_ref(|| None::<UserFilters>);

    {
        let ctx = props.api.clone();
        let dispatcher = data.dispatcher();
        use_effect_with_deps(
            move |(filters, _): &(UserFilters, u32)| {
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
            move |visible: &Vec<u64>| {
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
            if let Some(ordering) = UserOrdering::parse(&value) {
                update_query(&query, |next| next.set_ordering(ordering));
            }
        })
    };
    let on_role = {
        let query = query.clone();
        Callback::from(move |value: String| {
            update_query(&query, |next| {
                next.update_filters(|filters| filters.role = Role::parse(&value))
            });
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
    let on_batch = {
        let dialog = dialog.clone();
        Callback::from(move |()| dialog.set(Dialog::BatchDelete))
    };
    let on_confirm_delete = {
        let ctx = props.api.clone();
        let dialog = dialog.clone();
        let deleting = deleting.clone();
        let saved = saved.clone();
        Callback::from(move |()| {
            let Dialog::Delete(user) = (*dialog).clone() else {
                return;
            };
            let ctx = ctx.clone();
            spawn_mutation(&deleting, saved.clone(), async move {
                api::delete(&ctx, &user).await
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

    let body = match data.state {
        LoadState::Loading => html! {
            <SkeletonRows rows={query.page_size()} columns={COLUMNS} />
        },
        LoadState::Error => {
            let message = data.error.clone().unwrap_or_default();
            return html! { <ErrorPanel title="Error loading users" message={message} /> };
        }
        LoadState::Ready if data.rows().is_empty() => html! {
            <tbody><EmptyRow columns={COLUMNS} message="No users found." /></tbody>
        },
        LoadState::Ready => html! {
            <tbody>
                {for data.rows().iter().map(|user| {
                    let toggle = {
                        let selection = selection.clone();
                        let id = user.id;
                        Callback::from(move |_: Event| {
                            let mut next = (*selection).clone();
                            next.toggle(id);
                            selection.set(next);
                        })
                    };
                    user_row(
                        user,
                        selection.contains(&user.id),
                        toggle,
                        open(Dialog::Edit(user.clone())),
                        open(Dialog::Delete(user.clone())),
                    )
                })}
            </tbody>
        },
    };

    let pagination = data.page.as_ref().map(|page| {
        let view = PageView::new(page, query.page(), query.page_size());
        html! {
            <Pagination view={view} noun="user" on_page={on_page} on_page_size={on_page_size} />
        }
    });

    let dialog_view = match &*dialog {
        Dialog::Closed => html! {},
        Dialog::Create => html! {
            <NewUserDialog api={props.api.clone()} on_close={close.clone()} on_saved={saved.clone()} />
        },
        Dialog::Edit(user) => html! {
            <EditUserDialog api={props.api.clone()} user={user.clone()}
                on_close={close.clone()} on_saved={saved.clone()} />
        },
        Dialog::Delete(user) => html! {
            <ConfirmDialog
                title="Delete user"
                body={format!("Are you sure you want to delete \"{}\"? This action cannot be undone.", user.username)}
                busy={*deleting}
                on_confirm={on_confirm_delete}
                on_cancel={close.clone()}
            />
        },
        Dialog::BatchDelete => html! {
            <ConfirmDialog
                title="Delete users"
                body={format!("Are you sure you want to delete {} user(s)? This action cannot be undone.", selection.len())}
                busy={*deleting}
                on_confirm={on_confirm_batch}
                on_cancel={close.clone()}
            />
        },
    };

    let filters = query.filters();
    html! {
        <section class="list-page">
            <div class="list-header">
                <p class="muted">{"Manage customer and staff accounts."}</p>
                <button class="btn btn-primary" onclick={open(Dialog::Create)}>{"Add user"}</button>
            </div>
            <div class="list-filters">
                <SearchInput
                    committed={AttrValue::from(query.search().to_string())}
                    placeholder="Search users..."
                    on_commit={on_search}
                />
                <OrderingSelect
                    id="user-ordering"
                    value={AttrValue::Static(query.ordering().as_str())}
                    options={ordering_options::<UserOrdering>()}
                    on_change={on_ordering}
                />
                <SelectField
                    id="user-role"
                    value={AttrValue::Static(role_value(filters.role))}
                    options={static_options(&ROLE_OPTIONS)}
                    on_change={on_role}
                />
                <SelectField
                    id="user-status"
                    value={AttrValue::Static(status_value(filters.is_active))}
                    options={static_options(&STATUS_OPTIONS)}
                    on_change={on_status}
                />
            </div>
            <BulkActionBar count={selection.len()} noun="user" on_delete={on_batch} on_clear={on_clear_selection} />
            <table class="table">
                <thead>
                    <tr>
                        <th>
                            <SelectAllCheckbox state={selection.state(&visible)} on_toggle={on_toggle_all} />
                        </th>
                        <th>{"User"}</th>
                        <th>{"Email"}</th>
                        <th>{"Role"}</th>
                        <th>{"Status"}</th>
                        <th>{"Joined"}</th>
                        <th>{"Last Login"}</th>
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

fn user_row(
    user: &User,
    selected: bool,
    on_toggle: Callback<Event>,
    on_edit: Callback<MouseEvent>,
    on_delete: Callback<MouseEvent>,
) -> Html {
    let avatar = avatar_url(user).map_or_else(
        || html! { <span class="avatar placeholder">{initial(user)}</span> },
        |url| html! { <img class="avatar" src={url.to_string()} alt="" /> },
    );
    html! {
        <tr key={user.id.to_string()} class={classes!(selected.then_some("selected"))}>
            <td>
                <input type="checkbox" aria-label={format!("Select {}", user.username)}
                    checked={selected} onchange={on_toggle} />
            </td>
            <td class="user-cell">
                {avatar}
                <div>
                    <strong>{user.display_name()}</strong>
                    <span class="muted">{format!("@{}", user.username)}</span>
                </div>
            </td>
            <td>{user.email.clone()}</td>
            <td>
                <span class={classes!("badge", (user.role == Role::Admin).then_some("badge-primary"))}>
                    {role_label(user)}
                </span>
            </td>
            <td>
                <span class={classes!("badge", if user.is_active { "badge-success" } else { "badge-ghost" })}>
                    {status_label(user)}
                </span>
            </td>
            <td>{joined_label(user)}</td>
            <td>{last_login_label(user)}</td>
            <td class="actions">
                <button class="btn btn-ghost btn-sm" onclick={on_edit}>{"Edit"}</button>
                <button class="btn btn-ghost btn-sm text-error" onclick={on_delete}>{"Delete"}</button>
            </td>
        </tr>
    }
}

#[derive(Properties, PartialEq)]
struct NewUserDialogProps {
    api: ApiCtx,
    on_close: Callback<()>,
    on_saved: Callback<()>,
}

#[function_component(NewUserDialog)]
fn new_user_dialog(props: &NewUserDialogProps) -> Html {
    let form = use_state(NewUserForm::default);
    let errors = use_state(FieldErrors::default);
    let busy = use_state(|| false);

    let edit = |apply: fn(&mut NewUserForm, String)| {
        let form = form.clone();
        Callback::from(move |value: String| {
            let mut next = (*form).clone();
            apply(&mut next, value);
            form.set(next);
        })
    };
    let flag = |apply: fn(&mut NewUserForm, bool)| {
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
        let form = form.clone();
        let errors = errors.clone();
        let busy = busy.clone();
        let on_saved = props.on_saved.clone();
        Callback::from(move |()| match form.validate() {
            Err(found) => errors.set(found),
            Ok(request) => {
                errors.set(FieldErrors::default());
                let ctx = ctx.clone();
                spawn_mutation(&busy, on_saved.clone(), async move {
                    api::create(&ctx, &request).await
                });
            }
        })
    };
    let actions = html! {
        <FormActions submit_label="Create user" busy={*busy}
            on_cancel={props.on_close.clone()} on_submit={on_submit} />
    };

    html! {
        <Modal title="Add user" busy={*busy} on_close={props.on_close.clone()} actions={actions}>
            <div class="field-row">
                <TextField id="new-user-first-name" label="First name" value={form.first_name.clone()}
                    on_change={edit(|form, value| form.first_name = value)} error={error("first_name")} />
                <TextField id="new-user-last-name" label="Last name" value={form.last_name.clone()}
                    on_change={edit(|form, value| form.last_name = value)} error={error("last_name")} />
            </div>
            <TextField id="new-user-username" label="Username" value={form.username.clone()}
                on_change={edit(|form, value| form.username = value)} error={error("username")} />
            <TextField id="new-user-email" label="Email" input_type="email" value={form.email.clone()}
                on_change={edit(|form, value| form.email = value)} error={error("email")} />
            <TextField id="new-user-password" label="Password" input_type="password"
                value={form.password.clone()}
                on_change={edit(|form, value| form.password = value)} error={error("password")} />
            <TextField id="new-user-password-confirm" label="Confirm password" input_type="password"
                value={form.password_confirm.clone()}
                on_change={edit(|form, value| form.password_confirm = value)} error={error("password_confirm")} />
            <CheckboxField id="new-user-active" label="Active" checked={form.is_active}
                on_toggle={flag(|form, checked| form.is_active = checked)} />
            <CheckboxField id="new-user-staff" label="Staff" checked={form.is_staff}
                on_toggle={flag(|form, checked| form.is_staff = checked)} />
        </Modal>
    }
}

#[derive(Properties, PartialEq)]
struct EditUserDialogProps {
    api: ApiCtx,
    user: User,
    on_close: Callback<()>,
    on_saved: Callback<()>,
}

#[function_component(EditUserDialog)]
fn edit_user_dialog(props: &EditUserDialogProps) -> Html {
    let form = {
        let user = props.user.clone();
        use_state(move || UserForm::from_user(&user))
    };
    let errors = use_state(FieldErrors::default);
    let busy = use_state(|| false);

    let edit = |apply: fn(&mut UserForm, String)| {
        let form = form.clone();
        Callback::from(move |value: String| {
            let mut next = (*form).clone();
            apply(&mut next, value);
            form.set(next);
        })
    };
    let flag = |apply: fn(&mut UserForm, bool)| {
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
        let user = props.user.clone();
        let form = form.clone();
        let errors = errors.clone();
        let busy = busy.clone();
        let on_close = props.on_close.clone();
        let on_saved = props.on_saved.clone();
        Callback::from(move |()| match form.diff(&user) {
            Err(found) => errors.set(found),
            Ok(None) => {
                push_toast(ToastKind::Info, NO_CHANGES);
                on_close.emit(());
            }
            Ok(Some(patch)) => {
                errors.set(FieldErrors::default());
                let ctx = ctx.clone();
                let id = user.id;
                spawn_mutation(&busy, on_saved.clone(), async move {
                    api::update(&ctx, id, &patch).await
                });
            }
        })
    };
    let actions = html! {
        <FormActions submit_label="Save changes" busy={*busy}
            on_cancel={props.on_close.clone()} on_submit={on_submit} />
    };
    let languages = Language::ALL
        .iter()
        .map(|language| (AttrValue::Static(language.as_str()), AttrValue::Static(language.label())))
        .collect::<Vec<_>>();

    html! {
        <Modal title="Edit user" description={AttrValue::from(format!("@{}", props.user.username))}
            busy={*busy} on_close={props.on_close.clone()} actions={actions}>
            <div class="field-row">
                <TextField id="user-first-name" label="First name" value={form.first_name.clone()}
                    on_change={edit(|form, value| form.first_name = value)} error={error("first_name")} />
                <TextField id="user-last-name" label="Last name" value={form.last_name.clone()}
                    on_change={edit(|form, value| form.last_name = value)} error={error("last_name")} />
            </div>
            <TextField id="user-username" label="Username" value={form.username.clone()}
                on_change={edit(|form, value| form.username = value)} error={error("username")} />
            <TextField id="user-email" label="Email" input_type="email" value={form.email.clone()}
                on_change={edit(|form, value| form.email = value)} error={error("email")} />
            <div class="field-row">
                <TextField id="user-phone" label="Phone number" input_type="tel"
                    value={form.phone_number.clone()}
                    on_change={edit(|form, value| form.phone_number = value)} error={error("phone_number")} />
                <TextField id="user-birth-date" label="Date of birth" input_type="date"
                    value={form.date_of_birth.clone()}
                    on_change={edit(|form, value| form.date_of_birth = value)} error={error("date_of_birth")} />
            </div>
            <SelectField id="user-language" label={AttrValue::Static("Preferred language")}
                value={AttrValue::from(form.preferred_language.clone())} options={languages}
                on_change={edit(|form, value| form.preferred_language = value)}
                error={error("preferred_language")} />
            <TextField id="user-avatar" label="Avatar URL" input_type="url" value={form.avatar_url.clone()}
                on_change={edit(|form, value| form.avatar_url = value)} error={error("avatar_url")} />
            <div class="switches">
                <CheckboxField id="user-active" label="Active" checked={form.is_active}
                    on_toggle={flag(|form, checked| form.is_active = checked)} />
                <CheckboxField id="user-staff" label="Staff" checked={form.is_staff}
                    on_toggle={flag(|form, checked| form.is_staff = checked)} />
                <CheckboxField id="user-superuser" label="Superuser" checked={form.is_superuser}
                    on_toggle={flag(|form, checked| form.is_superuser = checked)} />
                <CheckboxField id="user-notifications" label="Booking notifications"
                    checked={form.receive_booking_notifications}
                    on_toggle={flag(|form, checked| form.receive_booking_notifications = checked)} />
            </div>
        </Modal>
    }
}
