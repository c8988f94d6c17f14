use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::LdX;
use dioxus_free_icons::Icon;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoticeTone {
    #[default]
    Success,
    Error,
}

impl NoticeTone {
    fn class(&self) -> &'static str {
        match self {
            NoticeTone::Success => "success",
            NoticeTone::Error => "error",
        }
    }
}

/// Dismissible status banner shown above a list.
#[component]
pub fn NoticeBanner(tone: NoticeTone, text: String, on_dismiss: EventHandler<()>) -> Element {
    let role = match tone {
        NoticeTone::Success => "status",
        NoticeTone::Error => "alert",
    };

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "notice-banner", "data-tone": tone.class(), role: role,
            span { class: "notice-banner-text", "{text}" }
            button {
                class: "notice-banner-dismiss",
                r#type: "button",
                "aria-label": "Dismiss",
                onclick: move |_| on_dismiss.call(()),
                Icon::<LdX> { icon: LdX, width: 14, height: 14 }
            }
        }
    }
}
