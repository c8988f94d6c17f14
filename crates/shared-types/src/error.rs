use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";
const NETWORK_FAILURE: &str = "Unable to reach the server. Check your connection and try again.";

/// Categorization of application errors.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AppErrorKind {
    NotFound,
    BadRequest,
    ValidationError,
    Conflict,
    Unauthorized,
    Forbidden,
    Network,
    InternalError,
}

impl fmt::Display for AppErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppErrorKind::NotFound => write!(f, "NotFound"),
            AppErrorKind::BadRequest => write!(f, "BadRequest"),
            AppErrorKind::ValidationError => write!(f, "ValidationError"),
            AppErrorKind::Conflict => write!(f, "Conflict"),
            AppErrorKind::Unauthorized => write!(f, "Unauthorized"),
            AppErrorKind::Forbidden => write!(f, "Forbidden"),
            AppErrorKind::Network => write!(f, "Network"),
            AppErrorKind::InternalError => write!(f, "InternalError"),
        }
    }
}

/// Structured application error shared by the API client and the UI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppError {
    pub kind: AppErrorKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub field_errors: HashMap<String, String>,
}

impl AppError {
    fn of(kind: AppErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            field_errors: HashMap::new(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::of(AppErrorKind::NotFound, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::of(AppErrorKind::BadRequest, message)
    }

    pub fn validation(message: impl Into<String>, field_errors: HashMap<String, String>) -> Self {
        Self {
            kind: AppErrorKind::ValidationError,
            message: message.into(),
            field_errors,
        }
    }

    /// Validation failure on a single field.
    pub fn invalid_field(field: &str, message: impl Into<String>) -> Self {
        let message = message.into();
        let mut field_errors = HashMap::new();
        field_errors.insert(field.to_string(), message.clone());
        Self::validation(message, field_errors)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::of(AppErrorKind::Conflict, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::of(AppErrorKind::Unauthorized, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::of(AppErrorKind::Forbidden, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::of(AppErrorKind::Network, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::of(AppErrorKind::InternalError, message)
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind == AppErrorKind::Unauthorized
    }

    /// Build an error from a non-success backend response.
    ///
    /// The backend answers failures with one of
    /// `{"message": "...", "errors": {"field": ["..."]}}`,
    /// `{"error": "..."}` or `{"error": {"message": "..."}}`.
    /// Anything else keeps the status mapping with an empty message, which
    /// [`AppError::friendly_message`] later replaces with a generic one.
    pub fn from_response(status: u16, body: &str) -> Self {
        let kind = Self::kind_for_status(status);
        let parsed: Option<Value> = serde_json::from_str(body).ok();

        let message = parsed
            .as_ref()
            .and_then(Self::backend_message)
            .unwrap_or_default();
        let field_errors = parsed
            .as_ref()
            .map(Self::backend_field_errors)
            .unwrap_or_default();

        Self {
            kind,
            message,
            field_errors,
        }
    }

    fn kind_for_status(status: u16) -> AppErrorKind {
        match status {
            401 => AppErrorKind::Unauthorized,
            403 => AppErrorKind::Forbidden,
            404 => AppErrorKind::NotFound,
            409 => AppErrorKind::Conflict,
            422 => AppErrorKind::ValidationError,
            400..=499 => AppErrorKind::BadRequest,
            _ => AppErrorKind::InternalError,
        }
    }

    fn backend_message(body: &Value) -> Option<String> {
        if let Some(msg) = body.get("message").and_then(Value::as_str) {
            return Some(msg.to_string());
        }
        match body.get("error") {
            Some(Value::String(msg)) => Some(msg.clone()),
            Some(nested) => nested
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string),
            None => None,
        }
    }

    /// First message per field from a Laravel-style `errors` object.
    fn backend_field_errors(body: &Value) -> HashMap<String, String> {
        let Some(errors) = body.get("errors").and_then(Value::as_object) else {
            return HashMap::new();
        };
        errors
            .iter()
            .filter_map(|(field, messages)| {
                let first = match messages {
                    Value::Array(items) => items.first()?.as_str()?.to_string(),
                    Value::String(msg) => msg.clone(),
                    _ => return None,
                };
                Some((field.clone(), first))
            })
            .collect()
    }

    /// The message to put in front of a user.
    ///
    /// Backend messages are surfaced verbatim. Network failures get a fixed
    /// connectivity hint, and empty messages fall back to a generic one.
    pub fn friendly_message(&self) -> String {
        match self.kind {
            AppErrorKind::Network => NETWORK_FAILURE.to_string(),
            _ if self.message.trim().is_empty() => GENERIC_FAILURE.to_string(),
            _ => self.message.clone(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for AppError {}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut field_errors = HashMap::new();
        for (field, errs) in errors.field_errors() {
            if let Some(first) = errs.first() {
                let msg = first
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for {}", field));
                field_errors.insert(field.to_string(), msg);
            }
        }
        // Surface one field message as the banner text, picking the
        // alphabetically first field so the text is stable.
        let message = field_errors
            .iter()
            .min_by(|a, b| a.0.cmp(b.0))
            .map(|(_, msg)| msg.clone())
            .unwrap_or_else(|| "Validation failed".to_string());
        AppError::validation(message, field_errors)
    }
}

/// Failure to establish or keep an authenticated session.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthError {
    /// No token is stored for this browser context.
    MissingToken,
    /// The backend refused the token or the credentials.
    Rejected(String),
    /// The request never produced a usable answer.
    Transport(String),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::MissingToken => write!(f, "No session token"),
            AuthError::Rejected(msg) => write!(f, "Session rejected: {msg}"),
            AuthError::Transport(msg) => write!(f, "Session check failed: {msg}"),
        }
    }
}

impl std::error::Error for AuthError {}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        match err.kind {
            AppErrorKind::Network => AuthError::Transport(err.message),
            _ => AuthError::Rejected(err.message),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        AppError::unauthorized(err.to_string())
    }
}

/// The role string has no configured dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRoleError {
    pub role: String,
}

impl fmt::Display for UnknownRoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "No dashboard available for role '{}'", self.role)
    }
}

impl std::error::Error for UnknownRoleError {}
