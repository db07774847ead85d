//! Client error types

use serde::Deserialize;
use thiserror::Error;

/// Errors returned by PowerScale API calls
#[derive(Debug, Error)]
pub enum ClientError {
    /// Missing or invalid connection settings
    #[error("Client configuration error: {0}")]
    Configuration(String),

    /// The request never produced a response (connection, TLS, timeout)
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The response body did not match the expected model
    #[error("Failed to parse response: {0}")]
    Decode(String),

    /// A successful response did not contain the requested entity
    #[error("{0} not found in response")]
    Missing(String),
}

impl ClientError {
    /// True if the API reported the entity as absent
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Api { status: 404, .. })
    }

    /// Build an API error from a status code and raw response body
    pub fn from_response(status: u16, body: &str) -> Self {
        ClientError::Api {
            status,
            message: error_message(body),
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Vec<ErrorItem>,
}

#[derive(Debug, Deserialize)]
struct ErrorItem {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Extract the human-readable message from a PowerScale error body
///
/// The API reports failures as `{"errors":[{"code":"...","message":"..."}]}`.
/// Bodies in any other shape are returned trimmed.
pub fn error_message(body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        let messages: Vec<String> = parsed
            .errors
            .into_iter()
            .filter_map(|e| match (e.code, e.message) {
                (_, Some(m)) if !m.is_empty() => Some(m),
                (Some(c), _) => Some(c),
                _ => None,
            })
            .collect();
        if !messages.is_empty() {
            return messages.join("; ");
        }
    }
    body.trim().to_string()
}
