use dioxus::prelude::*;

use crate::routes::Route;

/// Catch-all for unknown paths. Views are switched in-page, so the only
/// useful way out is back to the shell.
#[component]
pub fn NotFound(route: Vec<String>) -> Element {
    let path = format!("/{}", route.join("/"));
    use_hook({
        let path = path.clone();
        move || tracing::debug!(%path, "unknown route")
    });

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./not_found.css") }

        div { class: "not-found-page",
            div { class: "not-found-card",
                div { class: "not-found-code", "404" }
                h1 { class: "not-found-title", "Nothing here" }
                p { class: "not-found-message",
                    code { "{path}" }
                    " is not a page of the hospital console."
                }
                Link { to: Route::Dashboard {}, class: "not-found-link", "Go to my dashboard" }
            }
        }
    }
}
