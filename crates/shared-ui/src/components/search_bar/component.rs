use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::LdSearch;
use dioxus_free_icons::Icon;

/// Search/filter bar. Emits the term on every keystroke. Extra filters and
/// the result count go in `children` next to the search field.
#[component]
pub fn SearchBar(
    value: String,
    on_search: EventHandler<String>,
    #[props(default = "Search...".to_string())] placeholder: String,
    children: Element,
) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "search-bar",
            label { class: "search-bar-field",
                Icon::<LdSearch> { icon: LdSearch, width: 16, height: 16 }
                input {
                    class: "search-bar-input",
                    r#type: "search",
                    value: value,
                    placeholder: placeholder,
                    oninput: move |evt: FormEvent| on_search.call(evt.value()),
                }
            }
            {children}
        }
    }
}
