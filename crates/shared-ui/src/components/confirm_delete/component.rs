use dioxus::prelude::*;

use crate::components::alert_dialog::{
    AlertDialogActions, AlertDialogContent, AlertDialogDescription, AlertDialogRoot,
    AlertDialogTitle,
};
use crate::components::button::{Button, ButtonVariant};

/// Delete confirmation dialog.
///
/// With `gated`, the confirm button stays disabled until the
/// acknowledgement checkbox is ticked. The dialog never deletes on its own:
/// `on_confirm` fires only from the confirm button.
#[component]
pub fn ConfirmDelete(
    open: bool,
    title: String,
    description: String,
    #[props(default = false)] gated: bool,
    #[props(default = false)] acknowledged: bool,
    #[props(default = "I understand this cannot be undone".to_string())] acknowledge_label: String,
    #[props(default = false)] deleting: bool,
    on_acknowledge: EventHandler<bool>,
    on_confirm: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    let can_confirm = !gated || acknowledged;

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        AlertDialogRoot {
            open: open,
            on_open_change: move |next: bool| {
                if !next && !deleting {
                    on_cancel.call(());
                }
            },
            AlertDialogContent {
                AlertDialogTitle { "{title}" }
                AlertDialogDescription { "{description}" }
                if gated {
                    label { class: "confirm-delete-ack",
                        input {
                            r#type: "checkbox",
                            checked: acknowledged,
                            disabled: deleting,
                            onchange: move |evt: FormEvent| on_acknowledge.call(evt.checked()),
                        }
                        span { "{acknowledge_label}" }
                    }
                }
                AlertDialogActions {
                    Button {
                        variant: ButtonVariant::Outline,
                        disabled: deleting,
                        onclick: move |_| on_cancel.call(()),
                        "Cancel"
                    }
                    Button {
                        variant: ButtonVariant::Destructive,
                        disabled: !can_confirm,
                        loading: deleting,
                        loading_label: "Deleting...",
                        onclick: move |_| on_confirm.call(()),
                        "Delete"
                    }
                }
            }
        }
    }
}
