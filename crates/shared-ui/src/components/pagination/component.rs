use dioxus::prelude::*;

use crate::components::button::{Button, ButtonVariant};

/// Page number and page count as shown to the user. An empty listing has
/// no pages but still reads as page 1 of 1.
pub fn page_label(page: usize, page_count: usize) -> (usize, usize) {
    let shown_count = page_count.max(1);
    (page.clamp(1, shown_count), shown_count)
}

/// Page-based Previous/Next controls. `page` is 1-based.
#[component]
pub fn Pagination(
    page: usize,
    page_count: usize,
    #[props(default)] total: Option<usize>,
    on_change: EventHandler<usize>,
) -> Element {
    let (current, count) = page_label(page, page_count);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "pagination",
            Button {
                variant: ButtonVariant::Outline,
                disabled: current <= 1,
                onclick: move |_| on_change.call(current.saturating_sub(1).max(1)),
                "Previous"
            }
            span { class: "pagination-info",
                "Page {current} of {count}"
                if let Some(total) = total {
                    " ({total} total)"
                }
            }
            Button {
                variant: ButtonVariant::Outline,
                disabled: current >= count,
                onclick: move |_| on_change.call(current + 1),
                "Next"
            }
        }
    }
}
