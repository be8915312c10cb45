use thiserror::Error;

/// Errors returned by search adapters.
///
/// Every variant names the provider so callers can tell which credential or
/// upstream to look at.
#[derive(Debug, Clone, Error)]
pub enum SearchError {
    /// Upstream answered with a non-success status.
    #[error("{provider} API error: {status} {message}")]
    Upstream {
        /// Provider display name.
        provider: &'static str,
        /// HTTP status code.
        status: u16,
        /// Upstream error body or message.
        message: String,
    },

    /// Request never produced a response (connect failure, timeout).
    #[error("{provider} request failed: {message}")]
    Network {
        provider: &'static str,
        message: String,
    },

    /// Response body did not match the provider's documented shape.
    #[error("{provider} returned an unreadable response: {message}")]
    Parse {
        provider: &'static str,
        message: String,
    },
}

impl SearchError {
    pub fn provider(&self) -> &'static str {
        match self {
            SearchError::Upstream { provider, .. }
            | SearchError::Network { provider, .. }
            | SearchError::Parse { provider, .. } => provider,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            SearchError::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub(crate) fn network(provider: &'static str, err: reqwest::Error) -> Self {
        SearchError::Network {
            provider,
            message: err.to_string(),
        }
    }

    pub(crate) fn parse(provider: &'static str, err: impl std::fmt::Display) -> Self {
        SearchError::Parse {
            provider,
            message: err.to_string(),
        }
    }
}

pub type SearchResult<T> = Result<T, SearchError>;
