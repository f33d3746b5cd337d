use reqwest::StatusCode;
use thiserror::Error;

use crate::core::validation::ValidationErrors;

pub const FALLBACK_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

#[derive(Debug, Error)]
pub enum AdminError {
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),
    #[error("HTTP {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Api {
        status: StatusCode,
        message: Option<String>,
    },
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("JSON decode failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("a request is already in flight")]
    Busy,
}

pub type AdminResult<T> = Result<T, AdminError>;

impl From<ValidationErrors> for AdminError {
    fn from(errors: ValidationErrors) -> Self {
        AdminError::Validation(errors)
    }
}

impl AdminError {
    pub fn api(status: StatusCode, message: Option<String>) -> Self {
        AdminError::Api { status, message }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            AdminError::Api { status, .. } => Some(*status),
            AdminError::Request(err) => err.status(),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    /// Text for a user-facing toast: the server's own message when it sent
    /// one, the validation summary for local failures, otherwise `fallback`.
    pub fn toast_message(&self, fallback: &str) -> String {
        match self {
            AdminError::Api { message: Some(message), .. } if !message.trim().is_empty() => {
                message.clone()
            }
            AdminError::Validation(errors) if !errors.is_empty() => errors.to_string(),
            _ => fallback.to_string(),
        }
    }
}

/// Pulls a human readable message out of an error body. Backends differ on
/// the key (`detail`, `message`, `error`); FastAPI-style validation details
/// arrive as a list of objects carrying `msg`.
pub fn extract_server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    for key in ["detail", "message", "error"] {
        match value.get(key) {
            Some(serde_json::Value::String(s)) if !s.trim().is_empty() => {
                return Some(s.trim().to_string());
            }
            Some(serde_json::Value::Array(entries)) => {
                let joined = entries
                    .iter()
                    .filter_map(|e| e.get("msg").and_then(|m| m.as_str()))
                    .collect::<Vec<_>>()
                    .join("; ");
                if !joined.is_empty() {
                    return Some(joined);
                }
            }
            _ => {}
        }
    }
    None
}
