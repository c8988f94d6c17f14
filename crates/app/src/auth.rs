use client::{SessionHolder, TokenStore};
use dioxus::prelude::*;
use shared_types::{Role, UserProfile};
use std::sync::Mutex;

/// localStorage key holding the session token.
pub const TOKEN_STORAGE_KEY: &str = "token";

/// Global authentication state, mirrored from the session holder.
///
/// Backed by a sync signal so the session's end callback can clear it.
#[derive(Clone, Copy)]
pub struct AuthState {
    pub user: SyncSignal<Option<UserProfile>>,
}

impl AuthState {
    pub fn new() -> Self {
        Self {
            user: Signal::new_maybe_sync(None),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.read().is_some()
    }

    pub fn set_user(&mut self, user: UserProfile) {
        self.user.set(Some(user));
    }

    pub fn clear(&self) {
        let mut user = self.user;
        user.set(None);
    }

    /// Raw role string of the signed-in user, empty when signed out.
    pub fn role(&self) -> String {
        self.user
            .read()
            .as_ref()
            .map(|u| u.role.clone())
            .unwrap_or_default()
    }
}

/// Hook to access auth state.
pub fn use_auth() -> AuthState {
    use_context::<AuthState>()
}

/// Display name for a backend role string.
pub fn role_label(role: &str) -> String {
    Role::parse(role)
        .map(|r| r.display_name().to_string())
        .unwrap_or_else(|| role.to_string())
}

/// Token store backed by `localStorage`.
///
/// Reads are served from memory; writes go to memory and are mirrored to
/// the browser. The stored value is brought into memory by
/// [`restore_token`] before the first session check.
#[derive(Debug, Default)]
pub struct BrowserTokenStore {
    token: Mutex<Option<String>>,
}

impl BrowserTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for BrowserTokenStore {
    fn load(&self) -> Option<String> {
        self.token.lock().ok().and_then(|t| t.clone())
    }

    fn save(&self, token: &str) {
        if let Ok(mut slot) = self.token.lock() {
            *slot = Some(token.to_string());
        }
        document::eval(&save_script(token));
    }

    fn clear(&self) {
        if let Ok(mut slot) = self.token.lock() {
            *slot = None;
        }
        document::eval(&clear_script());
    }
}

/// Load the persisted token into the session, if it has none yet.
pub async fn restore_token(session: &SessionHolder) {
    if session.token().is_some() {
        return;
    }
    let mut eval = document::eval(&read_script());
    match eval.recv::<String>().await {
        Ok(token) if !token.is_empty() => session.set_token(&token),
        Ok(_) => tracing::debug!("no stored token"),
        Err(e) => tracing::warn!(error = ?e, "could not read the stored token"),
    }
}

fn read_script() -> String {
    format!(
        r#"
        var token = null;
        try {{ token = window.localStorage.getItem('{TOKEN_STORAGE_KEY}'); }} catch (e) {{}}
        dioxus.send(token || '');
        "#
    )
}

fn save_script(token: &str) -> String {
    // Tokens are opaque; embed as a JSON string literal.
    let literal = serde_json::Value::String(token.to_string()).to_string();
    format!(
        r#"try {{ window.localStorage.setItem('{TOKEN_STORAGE_KEY}', {literal}); }} catch (e) {{}}"#
    )
}

fn clear_script() -> String {
    format!(r#"try {{ window.localStorage.removeItem('{TOKEN_STORAGE_KEY}'); }} catch (e) {{}}"#)
}
