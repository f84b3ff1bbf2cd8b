use serde::Deserialize;
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Request(String),
    #[error("Repository not found.")]
    NotFound,
    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,
    #[error("GitHub API error: {status}{}", .message.as_deref().map(|m| format!(" {m}")).unwrap_or_default())]
    Status {
        status: u16,
        message: Option<String>,
    },
    #[error("Failed to parse response: {0}")]
    Decode(String),
    #[error("Invalid repository name: {0:?} (expected owner/name)")]
    InvalidRepository(String),
}

// Error bodies from GitHub look like {"message": "...", "documentation_url": "..."}.
#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl ApiError {
    /// Classify a non-success response.
    pub fn from_status(status: u16, body: &str) -> Self {
        match status {
            404 => ApiError::NotFound,
            403 | 429 => ApiError::RateLimited,
            _ => {
                let message = serde_json::from_str::<ErrorBody>(body)
                    .ok()
                    .map(|b| b.message)
                    .filter(|m| !m.trim().is_empty());
                ApiError::Status { status, message }
            }
        }
    }
}
