//! The single source of truth for who is signed in.
//!
//! Only the token is persisted, through a [`TokenStore`]. The profile is
//! re-derived from the backend by [`SessionHolder::resolve_session`] on
//! every page load and lives in memory.

use std::sync::{Arc, Mutex, RwLock};

use shared_types::{AppError, AuthError, Credentials, Session, UserProfile};
use validator::Validate;

use crate::api::ApiClient;

/// Where the session token is kept between page loads.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str);
    fn clear(&self);
}

/// Process-local token storage.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token.lock().ok().and_then(|t| t.clone())
    }

    fn save(&self, token: &str) {
        if let Ok(mut slot) = self.token.lock() {
            *slot = Some(token.to_string());
        }
    }

    fn clear(&self) {
        if let Ok(mut slot) = self.token.lock() {
            *slot = None;
        }
    }
}

type EndCallback = Arc<dyn Fn() + Send + Sync>;

struct Inner {
    store: Box<dyn TokenStore>,
    user: RwLock<Option<UserProfile>>,
    on_end: Mutex<Vec<EndCallback>>,
}

/// Shared handle to the current session. Clones share state.
#[derive(Clone)]
pub struct SessionHolder {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for SessionHolder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionHolder")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

impl PartialEq for SessionHolder {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl SessionHolder {
    pub fn new(store: impl TokenStore + 'static) -> Self {
        Self {
            inner: Arc::new(Inner {
                store: Box::new(store),
                user: RwLock::new(None),
                on_end: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Holder backed by a [`MemoryTokenStore`].
    pub fn in_memory() -> Self {
        Self::new(MemoryTokenStore::new())
    }

    pub fn token(&self) -> Option<String> {
        self.inner.store.load()
    }

    /// Adopt a token obtained elsewhere (login, restored storage). The
    /// profile stays unknown until the next [`Self::resolve_session`].
    pub fn set_token(&self, token: &str) {
        self.inner.store.save(token);
    }

    pub fn user(&self) -> Option<UserProfile> {
        self.inner.user.read().ok().and_then(|u| u.clone())
    }

    pub fn session(&self) -> Option<Session> {
        Some(Session {
            token: self.token()?,
            user: self.user()?,
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some() && self.user().is_some()
    }

    /// Register a callback fired by every [`Self::end_session`].
    pub fn on_end(&self, callback: impl Fn() + Send + Sync + 'static) {
        if let Ok(mut callbacks) = self.inner.on_end.lock() {
            callbacks.push(Arc::new(callback));
        }
    }

    /// Discard token and profile, then notify listeners.
    pub fn end_session(&self) {
        self.inner.store.clear();
        if let Ok(mut user) = self.inner.user.write() {
            *user = None;
        }
        let callbacks: Vec<EndCallback> = match self.inner.on_end.lock() {
            Ok(callbacks) => callbacks.clone(),
            Err(_) => Vec::new(),
        };
        tracing::debug!(listeners = callbacks.len(), "session ended");
        for callback in callbacks {
            callback();
        }
    }

    /// Exchange the stored token for the current user's profile.
    ///
    /// Any failure tears the session down before returning.
    pub async fn resolve_session(&self, api: &ApiClient) -> Result<Session, AuthError> {
        let Some(token) = self.token() else {
            self.end_session();
            return Err(AuthError::MissingToken);
        };
        match api.fetch_current_user(&token).await {
            Ok(user) => {
                if let Ok(mut slot) = self.inner.user.write() {
                    *slot = Some(user.clone());
                }
                tracing::info!(user_id = user.id, role = %user.role, "session resolved");
                Ok(Session { token, user })
            }
            Err(err) => {
                tracing::warn!(error = %err, "session check failed");
                self.end_session();
                Err(err.into())
            }
        }
    }

    /// `POST /login`, store the token, then resolve the profile.
    pub async fn login(&self, api: &ApiClient, credentials: &Credentials) -> Result<Session, AppError> {
        credentials.validate()?;
        let token = api.login(credentials).await.map_err(|err| {
            if err.message.trim().is_empty() {
                AppError::unauthorized("Login failed")
            } else {
                err
            }
        })?;
        self.set_token(&token);
        self.resolve_session(api).await.map_err(|err| match err {
            AuthError::Transport(msg) => AppError::network(msg),
            other => AppError::from(other),
        })
    }
}
