//! Hooks shared by the list pages: address-bar query and load state.

use std::rc::Rc;

use cinedesk_api_models::Page;
use yew::prelude::*;

use crate::app::preferences::{current_location, replace_query};
use crate::core::list::{ListData, ListDefaults, ListQuery};

/// Transitions applied to a page's [`ListData`].
pub(crate) enum ListAction<T> {
    Begin { query_changed: bool },
    Resolve(Result<Page<T>, String>),
}

impl<T: Clone> Reducible for ListData<T> {
    type Action = ListAction<T>;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            ListAction::Begin { query_changed } => next.begin(query_changed),
            ListAction::Resolve(result) => next.resolve(result),
        }
        Rc::new(next)
    }
}

/// Query state seeded from the address bar and mirrored back into it.
#[hook]
pub(crate) fn use_list_query<F>() -> UseStateHandle<ListQuery<F>>
where
    F: ListDefaults + Clone + PartialEq + 'static,
{
    let query = use_state(|| ListQuery::<F>::from_query_string(&current_location().1));
    use_effect_with_deps(
        |query: &ListQuery<F>| {
            replace_query(&query.to_query_string());
            || ()
        },
        (*query).clone(),
    );
    query
}

/// Apply `change` to a copy of the query and store it when it differs.
pub(crate) fn update_query<F: ListDefaults + Clone>(
    query: &UseStateHandle<ListQuery<F>>,
    change: impl FnOnce(&mut ListQuery<F>) -> bool,
) {
    let mut next = (**query).clone();
    if change(&mut next) {
        query.set(next);
    }
}
