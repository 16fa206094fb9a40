//! Search gateway error types

/// Search gateway error types
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    // Caller errors
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Admission denied by the local sliding-window limiter. Surfaced
    /// immediately to the caller; never retried inside the gateway.
    #[error("rate limit exceeded, please try again later")]
    RateLimited,

    // Configuration errors
    /// No provider credential configured. Returned before any network
    /// attempt is made.
    #[error("search provider unavailable: {0}")]
    ProviderUnavailable(String),

    // Provider/network errors
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    // Data errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SearchError {
    /// Whether this error is worth retrying.
    ///
    /// Transport failures and throttling/server-side API statuses are
    /// transient; everything else (bad input, missing credentials, local
    /// rate limiting, malformed payloads) is permanent and returned to the
    /// caller without retry.
    pub fn is_transient(&self) -> bool {
        match self {
            SearchError::Http(_) => true,
            SearchError::Api { status, .. } => matches!(status, 408 | 429 | 500..=599),
            _ => false,
        }
    }
}

/// Result type alias for search gateway operations
pub type Result<T> = std::result::Result<T, SearchError>;
