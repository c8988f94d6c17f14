use dioxus::prelude::*;

/// Page header container. Wraps a title and optional action buttons.
#[component]
pub fn PageHeader(children: Element) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "page-header",
            {children}
        }
    }
}

/// Title with an optional muted subtitle underneath.
#[component]
pub fn PageTitle(#[props(default)] subtitle: Option<String>, children: Element) -> Element {
    rsx! {
        div { class: "page-heading",
            h1 { class: "page-title", {children} }
            if let Some(text) = subtitle {
                p { class: "page-subtitle", "{text}" }
            }
        }
    }
}

#[component]
pub fn PageActions(children: Element) -> Element {
    rsx! {
        div { class: "page-actions", {children} }
    }
}
