//! Bulk action bar shown while rows are selected.

use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct BulkActionBarProps {
    pub count: usize,
    /// Singular noun (`movie`, `user`).
    pub noun: AttrValue,
    pub on_delete: Callback<()>,
    pub on_clear: Callback<()>,
}

#[function_component(BulkActionBar)]
pub(crate) fn bulk_action_bar(props: &BulkActionBarProps) -> Html {
    if props.count == 0 {
        return html! {};
    }
    let delete = {
        let on_delete = props.on_delete.clone();
        Callback::from(move |_: MouseEvent| on_delete.emit(()))
    };
    let clear = {
        let on_clear = props.on_clear.clone();
        Callback::from(move |_: MouseEvent| on_clear.emit(()))
    };
    html! {
        <div class="bulk-bar">
            <span>{format!("{} {}(s) selected", props.count, props.noun)}</span>
            <button class="btn btn-ghost btn-sm" onclick={clear}>{"Clear selection"}</button>
            <button class="btn btn-error btn-sm" onclick={delete}>{"Delete selected"}</button>
        </div>
    }
}
