//! Error types for the character API clients.
//!
//! # Design
//! Three failure kinds exist: the round-trip never completed, the server
//! answered with a non-2xx status, or the body did not match the schema. The
//! repository collapses all three into its fallback path and keeps only the
//! rendered message, so variants carry strings rather than source errors.

/// Errors returned by transports, clients and character sources.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// DNS, connect, TLS, timeout or body read failure.
    #[error("transport failed: {0}")]
    Transport(String),

    /// The server returned a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("decode failed: {0}")]
    Decode(String),
}

impl ApiError {
    /// Whether the backend rejected the request signature or key.
    pub fn is_invalid_credentials(&self) -> bool {
        match self {
            ApiError::Http { status, body } => *status == 401 || body.contains("InvalidCredentials"),
            _ => false,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(value: serde_json::Error) -> Self {
        ApiError::Decode(value.to_string())
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(value: reqwest::Error) -> Self {
        ApiError::Transport(value.to_string())
    }
}
