//! Header checkbox with an indeterminate state for partial selections.

use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::core::selection::SelectAllState;

#[derive(Properties, PartialEq)]
pub(crate) struct SelectAllCheckboxProps {
    pub state: SelectAllState,
    pub on_toggle: Callback<()>,
}

#[function_component(SelectAllCheckbox)]
pub(crate) fn select_all_checkbox(props: &SelectAllCheckboxProps) -> Html {
    let node = use_node_ref();
    {
        let node = node.clone();
        use_effect_with_deps(
            move |state: &SelectAllState| {
                if let Some(input) = node.cast::<HtmlInputElement>() {
                    input.set_indeterminate(*state == SelectAllState::Some);
                }
                || ()
            },
            props.state,
        );
    }
    let on_change = {
        let on_toggle = props.on_toggle.clone();
        Callback::from(move |_: Event| on_toggle.emit(()))
    };
    html! {
        <input
            ref={node}
            type="checkbox"
            aria-label="Select all"
            checked={props.state == SelectAllState::All}
            onchange={on_change}
        />
    }
}
