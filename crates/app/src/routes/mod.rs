pub mod dashboard;
pub mod login;
pub mod not_found;

use dioxus::prelude::*;

use crate::auth::{restore_token, use_auth};
use crate::use_hospital;

use dashboard::Dashboard;
use login::Login;
use not_found::NotFound;

/// Application routes. Everything past sign-in lives on `/`; the role's
/// views are switched in-page by the dashboard shell.
#[derive(Clone, Routable, Debug, PartialEq)]
pub enum Route {
    #[route("/login")]
    Login {},
    #[layout(AuthGuard)]
    #[route("/")]
    Dashboard {},
    #[end_layout]
    #[route("/:..route")]
    NotFound { route: Vec<String> },
}

/// Auth guard layout: resolves the stored token once, then either renders
/// the protected route or sends the visitor to `/login`.
#[component]
fn AuthGuard() -> Element {
    let ctx = use_hospital();
    let mut auth = use_auth();

    let check = use_resource(move || async move {
        if auth.user.peek().is_some() {
            return true;
        }
        let api = ctx.client();
        restore_token(api.session()).await;
        match api.session().resolve_session(&api).await {
            Ok(session) => {
                auth.set_user(session.user);
                true
            }
            Err(e) => {
                tracing::info!(reason = %e, "no usable session");
                false
            }
        }
    });

    if auth.is_authenticated() {
        return rsx! { Outlet::<Route> {} };
    }

    match check() {
        None => rsx! {
            div { class: "auth-guard-loading",
                p { "Loading..." }
            }
        },
        Some(_) => {
            navigator().replace(Route::Login {});
            rsx! {
                div { class: "auth-guard-loading",
                    p { "Redirecting to login..." }
                }
            }
        }
    }
}
