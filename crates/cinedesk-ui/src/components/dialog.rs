//! Modal dialog and delete confirmation.
//!
//! # Design
//! - Dialogs are controlled: the page decides when they are open.
//! - While `busy`, closing is blocked and the confirm button is disabled.

use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct ModalProps {
    pub title: AttrValue,
    #[prop_or_default]
    pub description: Option<AttrValue>,
    pub on_close: Callback<()>,
    #[prop_or_default]
    pub busy: bool,
    #[prop_or_default]
    pub children: Children,
    /// Footer buttons.
    #[prop_or_default]
    pub actions: Html,
}

#[function_component(Modal)]
pub(crate) fn modal(props: &ModalProps) -> Html {
    let on_backdrop = {
        let on_close = props.on_close.clone();
        let busy = props.busy;
        Callback::from(move |_: MouseEvent| {
            if !busy {
                on_close.emit(());
            }
        })
    };
    let on_keydown = {
        let on_close = props.on_close.clone();
        let busy = props.busy;
        Callback::from(move |event: KeyboardEvent| {
            if event.key() == "Escape" && !busy {
                on_close.emit(());
            }
        })
    };
    html! {
        <div class="modal-root" onkeydown={on_keydown}>
            <div class="modal-backdrop" onclick={on_backdrop} />
            <div class="modal-box" role="dialog" aria-modal="true" aria-label={props.title.clone()}>
                <header>
                    <h3>{props.title.clone()}</h3>
                    {props.description.clone().map(|text| html! { <p class="muted">{text}</p> }).unwrap_or_default()}
                </header>
                <div class="modal-body">{for props.children.iter()}</div>
                <footer class="modal-actions">{props.actions.clone()}</footer>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct ConfirmDialogProps {
    pub title: AttrValue,
    pub body: AttrValue,
    #[prop_or_default]
    pub detail: Option<AttrValue>,
    #[prop_or(AttrValue::Static("Delete"))]
    pub confirm_label: AttrValue,
    pub busy: bool,
    pub on_confirm: Callback<()>,
    pub on_cancel: Callback<()>,
}

#[function_component(ConfirmDialog)]
pub(crate) fn confirm_dialog(props: &ConfirmDialogProps) -> Html {
    let confirm = {
        let on_confirm = props.on_confirm.clone();
        Callback::from(move |_: MouseEvent| on_confirm.emit(()))
    };
    let cancel = {
        let on_cancel = props.on_cancel.clone();
        Callback::from(move |_: MouseEvent| on_cancel.emit(()))
    };
    let actions = html! {
        <>
            <button class="btn btn-ghost" disabled={props.busy} onclick={cancel}>{"Cancel"}</button>
            <button class="btn btn-error" disabled={props.busy} onclick={confirm}>
                {if props.busy { AttrValue::Static("Deleting...") } else { props.confirm_label.clone() }}
            </button>
        </>
    };
    html! {
        <Modal title={props.title.clone()} busy={props.busy} on_close={props.on_cancel.clone()} actions={actions}>
            <p>{props.body.clone()}</p>
            {props.detail.clone().map(|detail| html! { <p class="warning">{detail}</p> }).unwrap_or_default()}
        </Modal>
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct FormActionsProps {
    pub submit_label: AttrValue,
    pub busy: bool,
    pub on_cancel: Callback<()>,
    pub on_submit: Callback<()>,
}

/// Cancel/submit pair used by the add and edit dialogs.
#[function_component(FormActions)]
pub(crate) fn form_actions(props: &FormActionsProps) -> Html {
    let cancel = {
        let on_cancel = props.on_cancel.clone();
        Callback::from(move |_: MouseEvent| on_cancel.emit(()))
    };
    let submit = {
        let on_submit = props.on_submit.clone();
        Callback::from(move |_: MouseEvent| on_submit.emit(()))
    };
    html! {
        <>
            <button class="btn btn-ghost" disabled={props.busy} onclick={cancel}>{"Cancel"}</button>
            <button class="btn btn-primary" disabled={props.busy} onclick={submit}>
                {if props.busy { AttrValue::Static("Saving...") } else { props.submit_label.clone() }}
            </button>
        </>
    }
}
