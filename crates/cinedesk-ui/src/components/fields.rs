//! Labelled form controls with inline error text.
//!
//! # Design
//! - Controls are fully controlled: the value comes in as a prop and every
//!   edit goes out through `on_change`.
//! - Error text renders under the control only when present.

use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct TextFieldProps {
    pub id: AttrValue,
    pub label: AttrValue,
    pub value: AttrValue,
    pub on_change: Callback<String>,
    #[prop_or_default]
    pub error: Option<String>,
    #[prop_or(AttrValue::Static("text"))]
    pub input_type: AttrValue,
    #[prop_or_default]
    pub placeholder: Option<AttrValue>,
    #[prop_or_default]
    pub disabled: bool,
}

#[function_component(TextField)]
pub(crate) fn text_field(props: &TextFieldProps) -> Html {
    let on_input = {
        let on_change = props.on_change.clone();
        Callback::from(move |event: InputEvent| {
            let input: HtmlInputElement = event.target_unchecked_into();
            on_change.emit(input.value());
        })
    };
    html! {
        <div class={classes!("field", props.error.as_ref().map(|_| "has-error"))}>
            <label for={props.id.clone()}>{props.label.clone()}</label>
            <input
                id={props.id.clone()}
                type={props.input_type.clone()}
                value={props.value.clone()}
                placeholder={props.placeholder.clone()}
                disabled={props.disabled}
                aria-invalid={props.error.is_some().to_string()}
                oninput={on_input}
            />
            <FieldError error={props.error.clone()} />
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct TextAreaFieldProps {
    pub id: AttrValue,
    pub label: AttrValue,
    pub value: AttrValue,
    pub on_change: Callback<String>,
    #[prop_or_default]
    pub error: Option<String>,
    #[prop_or(4)]
    pub rows: u32,
}

#[function_component(TextAreaField)]
pub(crate) fn text_area_field(props: &TextAreaFieldProps) -> Html {
    let on_input = {
        let on_change = props.on_change.clone();
        Callback::from(move |event: InputEvent| {
            let input: HtmlTextAreaElement = event.target_unchecked_into();
            on_change.emit(input.value());
        })
    };
    html! {
        <div class={classes!("field", props.error.as_ref().map(|_| "has-error"))}>
            <label for={props.id.clone()}>{props.label.clone()}</label>
            <textarea
                id={props.id.clone()}
                rows={props.rows.to_string()}
                value={props.value.clone()}
                oninput={on_input}
            />
            <FieldError error={props.error.clone()} />
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct CheckboxFieldProps {
    pub id: AttrValue,
    pub label: AttrValue,
    pub checked: bool,
    pub on_toggle: Callback<bool>,
    #[prop_or_default]
    pub disabled: bool,
}

#[function_component(CheckboxField)]
pub(crate) fn checkbox_field(props: &CheckboxFieldProps) -> Html {
    let on_change = {
        let on_toggle = props.on_toggle.clone();
        Callback::from(move |event: Event| {
            let input: HtmlInputElement = event.target_unchecked_into();
            on_toggle.emit(input.checked());
        })
    };
    html! {
        <label class="checkbox-field" for={props.id.clone()}>
            <input
                id={props.id.clone()}
                type="checkbox"
                checked={props.checked}
                disabled={props.disabled}
                onchange={on_change}
            />
            <span>{props.label.clone()}</span>
        </label>
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct SelectFieldProps {
    pub id: AttrValue,
    #[prop_or_default]
    pub label: Option<AttrValue>,
    pub value: AttrValue,
    /// `(value, label)` pairs in display order.
    pub options: Vec<(AttrValue, AttrValue)>,
    pub on_change: Callback<String>,
    #[prop_or_default]
    pub error: Option<String>,
    #[prop_or_default]
    pub class: Classes,
}

#[function_component(SelectField)]
pub(crate) fn select_field(props: &SelectFieldProps) -> Html {
    let on_change = {
        let on_change = props.on_change.clone();
        Callback::from(move |event: Event| {
            let select: HtmlSelectElement = event.target_unchecked_into();
            on_change.emit(select.value());
        })
    };
    html! {
        <div class={classes!("field", props.class.clone())}>
            {props.label.clone().map(|label| html! {
                <label for={props.id.clone()}>{label}</label>
            }).unwrap_or_default()}
            <select id={props.id.clone()} onchange={on_change}>
                {for props.options.iter().map(|(value, label)| html! {
                    <option value={value.clone()} selected={*value == props.value}>
                        {label.clone()}
                    </option>
                })}
            </select>
            <FieldError error={props.error.clone()} />
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct FieldErrorProps {
    error: Option<String>,
}

#[function_component(FieldError)]
fn field_error(props: &FieldErrorProps) -> Html {
    props
        .error
        .as_ref()
        .map(|error| html! { <p class="field-error" role="alert">{error.clone()}</p> })
        .unwrap_or_default()
}

/// Static `(value, label)` pairs as select options.
pub(crate) fn static_options(pairs: &[(&'static str, &'static str)]) -> Vec<(AttrValue, AttrValue)> {
    pairs
        .iter()
        .map(|(value, label)| (AttrValue::Static(value), AttrValue::Static(label)))
        .collect()
}
