//! Loading skeleton, error panel and empty row.

use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct SkeletonRowsProps {
    /// One skeleton row per requested page slot.
    pub rows: u32,
    pub columns: u32,
}

#[function_component(SkeletonRows)]
pub(crate) fn skeleton_rows(props: &SkeletonRowsProps) -> Html {
    html! {
        <tbody aria-busy="true">
            {for (0..props.rows).map(|_| html! {
                <tr class="skeleton-row">
                    {for (0..props.columns).map(|_| html! {
                        <td><div class="skeleton h-5 w-full" /></td>
                    })}
                </tr>
            })}
        </tbody>
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct ErrorPanelProps {
    pub title: AttrValue,
    pub message: AttrValue,
}

#[function_component(ErrorPanel)]
pub(crate) fn error_panel(props: &ErrorPanelProps) -> Html {
    html! {
        <div class="error-panel" role="alert">
            <h1 class="text-error">{props.title.clone()}</h1>
            <p class="muted">{props.message.clone()}</p>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct EmptyRowProps {
    pub columns: u32,
    pub message: AttrValue,
}

#[function_component(EmptyRow)]
pub(crate) fn empty_row(props: &EmptyRowProps) -> Html {
    html! {
        <tr>
            <td class="empty" colspan={props.columns.to_string()}>{props.message.clone()}</td>
        </tr>
    }
}
