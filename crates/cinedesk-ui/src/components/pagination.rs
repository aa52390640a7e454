//! Pagination footer: range caption, rows-per-page and page buttons.

use yew::prelude::*;

use crate::components::fields::SelectField;
use crate::core::list::{PAGE_SIZES, PageView};

#[derive(Properties, PartialEq)]
pub(crate) struct PaginationProps {
    pub view: PageView,
    /// Singular noun for the range caption (`genre`, `user`).
    pub noun: AttrValue,
    pub on_page: Callback<u32>,
    pub on_page_size: Callback<u32>,
}

#[function_component(Pagination)]
pub(crate) fn pagination(props: &PaginationProps) -> Html {
    let view = props.view;
    if view.count == 0 {
        return html! {};
    }
    let go = |page: u32| {
        let on_page = props.on_page.clone();
        Callback::from(move |_: MouseEvent| on_page.emit(page))
    };
    let on_size = {
        let on_page_size = props.on_page_size.clone();
        Callback::from(move |value: String| {
            if let Ok(size) = value.parse::<u32>() {
                on_page_size.emit(size);
            }
        })
    };
    let size_options = PAGE_SIZES
        .iter()
        .map(|size| (AttrValue::from(size.to_string()), AttrValue::from(size.to_string())))
        .collect::<Vec<_>>();

    html! {
        <div class="pagination">
            <span class="muted">{view.range_caption(&props.noun)}</span>
            <SelectField
                id="rows-per-page"
                label={AttrValue::Static("Rows per page")}
                class={classes!("page-size")}
                value={AttrValue::from(view.page_size.to_string())}
                options={size_options}
                on_change={on_size}
            />
            <span class="page-caption">{view.caption()}</span>
            <div class="join">
                <button class="btn btn-sm" aria-label="Go to first page"
                    disabled={!view.can_previous} onclick={go(1)}>{"«"}</button>
                <button class="btn btn-sm" aria-label="Go to previous page"
                    disabled={!view.can_previous} onclick={go(view.page.saturating_sub(1).max(1))}>{"‹"}</button>
                <button class="btn btn-sm" aria-label="Go to next page"
                    disabled={!view.can_next} onclick={go(view.page.saturating_add(1))}>{"›"}</button>
                <button class="btn btn-sm" aria-label="Go to last page"
                    disabled={!view.can_next} onclick={go(view.last_page())}>{"»"}</button>
            </div>
        </div>
    }
}
