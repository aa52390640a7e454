//! Search box and sort picker shared by the list pages.

use cinedesk_api_models::SortKey;
use gloo::timers::callback::Timeout;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::components::fields::SelectField;
use crate::core::debounce::{SEARCH_DEBOUNCE_MS, SearchDebounce};

#[derive(Properties, PartialEq)]
pub(crate) struct SearchInputProps {
    /// Committed search term; external changes (back button) resync the box.
    pub committed: AttrValue,
    pub placeholder: AttrValue,
    pub on_commit: Callback<String>,
}

/// Debounced search box: commits after a quiet period or on Enter.
#[function_component(SearchInput)]
pub(crate) fn search_input(props: &SearchInputProps) -> Html {
    let debounce = use_mut_ref(|| SearchDebounce::new(&props.committed));
    let timer = use_mut_ref(|| None as Option<Timeout>);
    let text = use_state(|| props.committed.to_string());

    {
        let debounce = debounce.clone();
        let text = text.clone();
        use_effect_with_deps(
            move |committed: &AttrValue| {
                debounce.borrow_mut().sync(committed);
                text.set(debounce.borrow().input().to_string());
                || ()
            },
            props.committed.clone(),
        );
    }

    let on_input = {
        let debounce = debounce.clone();
        let timer = timer.clone();
        let text = text.clone();
        let on_commit = props.on_commit.clone();
        Callback::from(move |event: InputEvent| {
            let input: HtmlInputElement = event.target_unchecked_into();
            let value = input.value();
            let ticket = debounce.borrow_mut().edit(&value);
            text.set(value);
            let debounce = debounce.clone();
            let on_commit = on_commit.clone();
            let handle = Timeout::new(SEARCH_DEBOUNCE_MS, move || {
                let settled = debounce.borrow_mut().settle(ticket);
                if let Some(search) = settled {
                    on_commit.emit(search);
                }
            });
            *timer.borrow_mut() = Some(handle);
        })
    };

    let on_keydown = {
        let debounce = debounce.clone();
        let timer = timer.clone();
        let on_commit = props.on_commit.clone();
        Callback::from(move |event: KeyboardEvent| {
            if event.key() != "Enter" {
                return;
            }
            timer.borrow_mut().take();
            let flushed = debounce.borrow_mut().flush();
            if let Some(search) = flushed {
                on_commit.emit(search);
            }
        })
    };

    html! {
        <div class="search-input">
            <input
                type="search"
                placeholder={props.placeholder.clone()}
                value={(*text).clone()}
                oninput={on_input}
                onkeydown={on_keydown}
            />
        </div>
    }
}

/// Sort options for a resource, labelled for the picker.
pub(crate) fn ordering_options<S: SortKey>() -> Vec<(AttrValue, AttrValue)> {
    S::ALL
        .iter()
        .map(|ordering| {
            (
                AttrValue::Static(ordering.as_str()),
                AttrValue::Static(ordering.label()),
            )
        })
        .collect()
}

#[derive(Properties, PartialEq)]
pub(crate) struct OrderingSelectProps {
    pub id: AttrValue,
    pub value: AttrValue,
    pub options: Vec<(AttrValue, AttrValue)>,
    pub on_change: Callback<String>,
}

#[function_component(OrderingSelect)]
pub(crate) fn ordering_select(props: &OrderingSelectProps) -> Html {
    html! {
        <SelectField
            id={props.id.clone()}
            class={classes!("ordering-select")}
            value={props.value.clone()}
            options={props.options.clone()}
            on_change={props.on_change.clone()}
        />
    }
}
