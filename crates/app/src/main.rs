use client::{ApiClient, SessionHolder};
use dioxus::prelude::*;

mod auth;
mod config;
mod format_helpers;
mod routes;
mod views;

use auth::{AuthState, BrowserTokenStore};
use routes::Route;

/// Backend client and list settings shared across all routes.
#[derive(Clone, Copy)]
pub struct HospitalContext {
    pub api: Signal<ApiClient>,
    pub page_size: usize,
}

impl HospitalContext {
    /// A handle on the shared client. Clones share the session.
    pub fn client(&self) -> ApiClient {
        self.api.peek().clone()
    }
}

pub fn use_hospital() -> HospitalContext {
    use_context::<HospitalContext>()
}

const THEME_BASE: Asset = asset!("/assets/theme-base.css");

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let settings = config::client_config();

    let ctx = use_context_provider(|| {
        let session = SessionHolder::new(BrowserTokenStore::new());
        HospitalContext {
            api: Signal::new(ApiClient::new(&settings.api, session)),
            page_size: settings.page_size(),
        }
    });

    let auth = use_context_provider(AuthState::new);

    // Whoever ends the session (sign out, a 401 anywhere), the UI follows.
    use_hook(move || {
        ctx.api.peek().session().on_end(move || auth.clear());
    });

    rsx! {
        document::Link { rel: "stylesheet", href: THEME_BASE }
        shared_ui::theme::ThemeSeed { default_theme: settings.ui.default_theme.clone(),
            Router::<Route> {}
        }
    }
}
