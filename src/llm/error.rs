use thiserror::Error;

/// Language-backend client errors.
#[derive(Debug, Clone, Error)]
pub enum BackendError {
    /// Request could not be assembled.
    #[error("AI API request could not be built: {0}")]
    Request(String),

    /// Network error (connection failed, timeout).
    #[error("AI API network error: {0}")]
    Network(String),

    /// Non-success response from the backend.
    #[error("AI API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response envelope did not parse.
    #[error("AI API returned an unreadable response: {0}")]
    Parse(String),

    /// Backend answered without any message content.
    #[error("AI API returned an empty response")]
    EmptyResponse,
}

pub type BackendResult<T> = Result<T, BackendError>;
