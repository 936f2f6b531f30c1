//! Failure taxonomy for gateway calls.
//!
//! Three layers can fail: the transport (no response at all), the HTTP
//! status, and the application envelope inside a 2xx body. All of them
//! reject the call; none is retried.

/// Errors produced by the HTTP gateway and the domain calls built on it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// No response reached the client: refused, unreachable, or timed out.
    #[error("network error: {0}")]
    Transport(String),

    /// The server answered with a non-success HTTP status.
    #[error("request failed with status {status}")]
    Status { status: u16, message: Option<String> },

    /// The transport succeeded but the envelope code signals failure.
    #[error("{message}")]
    Domain { code: i64, message: String },

    /// The body was not the expected envelope or payload.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// The request could not be built (bad header value, body encoding).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    ClientBuild(String),
}

impl ApiError {
    /// HTTP status for `Status` failures.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}
