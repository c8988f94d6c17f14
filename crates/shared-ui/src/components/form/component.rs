use dioxus::prelude::*;

/// Form wrapper that prevents default submission.
///
/// `busy` marks the form while its submit is in flight; inputs stay
/// editable but the browser exposes the state through `aria-busy`.
#[component]
pub fn Form(
    #[props(default)] onsubmit: EventHandler<FormEvent>,
    #[props(default = false)] busy: bool,
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    let base = vec![Attribute::new("class", "form", None, false)];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        form {
            "aria-busy": if busy { "true" } else { "false" },
            onsubmit: move |evt| {
                evt.prevent_default();
                onsubmit.call(evt);
            },
            ..merged,
            {children}
        }
    }
}

/// Two-column grid row inside a form.
#[component]
pub fn FormRow(children: Element) -> Element {
    rsx! {
        div { class: "form-row", {children} }
    }
}

/// Field-level error text under an input.
#[component]
pub fn FieldError(message: Option<String>) -> Element {
    match message {
        Some(text) if !text.is_empty() => rsx! {
            p { class: "field-error", role: "alert", "{text}" }
        },
        _ => rsx! {},
    }
}
