use crate::auth::use_auth;
use crate::routes::Route;
use crate::use_hospital;
use dioxus::prelude::*;
use shared_types::Credentials;
use shared_ui::components::{
    Button, Card, CardContent, CardDescription, CardHeader, CardTitle, Input,
};
use std::collections::HashMap;

/// Email/password sign-in.
///
/// Field problems are shown under their input; anything else (bad
/// credentials, unreachable backend) as one message above the form.
#[component]
pub fn Login() -> Element {
    let ctx = use_hospital();
    let mut auth = use_auth();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error_msg = use_signal(|| Option::<String>::None);
    let mut field_errors = use_signal(HashMap::<String, String>::new);
    let mut loading = use_signal(|| false);

    // Redirect to dashboard if already authenticated
    if auth.is_authenticated() {
        navigator().replace(Route::Dashboard {});
    }

    let handle_login = move |evt: FormEvent| async move {
        evt.prevent_default();
        if loading() {
            return;
        }
        loading.set(true);
        error_msg.set(None);
        field_errors.set(HashMap::new());

        let credentials = Credentials {
            email: email().trim().to_string(),
            password: password(),
        };
        let api = ctx.client();
        match api.session().login(&api, &credentials).await {
            Ok(session) => {
                tracing::info!(user_id = session.user.id, "signed in");
                auth.set_user(session.user);
                navigator().replace(Route::Dashboard {});
            }
            Err(e) => {
                tracing::debug!(error = %e, "sign-in failed");
                if e.field_errors.is_empty() {
                    error_msg.set(Some(e.friendly_message()));
                } else {
                    field_errors.set(e.field_errors);
                }
            }
        }
        loading.set(false);
    };

    let email_error = field_errors.read().get("email").cloned();
    let password_error = field_errors.read().get("password").cloned();

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./login.css") }

        div { class: "auth-page",
            Card {
                class: "auth-card",

                CardHeader {
                    CardTitle { "Sign In" }
                    CardDescription { "Hospital staff access" }
                }

                CardContent {
                    if let Some(err) = error_msg() {
                        div { class: "auth-error", role: "alert", "{err}" }
                    }

                    form { onsubmit: handle_login,
                        div { class: "auth-field",
                            Input {
                                label: "Email",
                                input_type: "email",
                                placeholder: "name@hospital.org",
                                value: email(),
                                error: email_error,
                                on_input: move |e: FormEvent| email.set(e.value()),
                            }
                        }
                        div { class: "auth-field",
                            Input {
                                label: "Password",
                                input_type: "password",
                                placeholder: "Enter your password",
                                value: password(),
                                error: password_error,
                                on_input: move |e: FormEvent| password.set(e.value()),
                            }
                        }
                        Button {
                            class: "auth-submit",
                            button_type: "submit",
                            loading: loading(),
                            loading_label: "Signing in...",
                            "Sign In"
                        }
                    }
                }
            }
        }
    }
}
