use serde::Deserialize;
use thiserror::Error;

/// Alert text shown when a failure carries no server-provided message.
pub const FALLBACK_ALERT: &str = "Request failed";

/// Client-level error type.
/// Every variant collapses to a single user-facing alert via `alert_message`.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Scoring service error (status {status}): {}", .message.as_deref().unwrap_or(FALLBACK_ALERT))]
    Api {
        status: u16,
        message: Option<String>,
    },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported resume file: {0} (expected .pdf, .docx or .txt)")]
    UnsupportedFile(String),
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

impl MatchError {
    /// Builds an `Api` error from a non-success status and whatever body came back.
    pub fn from_response_body(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.error)
            .filter(|m| !m.is_empty());
        MatchError::Api { status, message }
    }

    /// The text shown to the user: the server's `error` field if it sent one.
    pub fn alert_message(&self) -> String {
        match self {
            MatchError::Api {
                message: Some(msg), ..
            } => msg.clone(),
            _ => FALLBACK_ALERT.to_string(),
        }
    }
}
