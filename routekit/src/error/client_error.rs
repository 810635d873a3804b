//! Transport and network errors.

use thiserror::Error;

/// Errors from the transport layer.
///
/// These are surfaced by a [`Transport`](crate::Transport) and propagated to
/// the caller unchanged; the dispatcher never retries or translates them.
#[derive(Debug, Error)]
pub enum ClientError {
    /// `reqwest` could not complete the exchange.
    #[error("Transport request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered outside the 2xx range.
    #[error("Server answered {status}: {message}")]
    HttpStatus {
        /// Status code.
        status: u16,
        /// Response body, or the status reason when the body is unreadable.
        message: String,
    },

    /// No response within the transport default or per-call timeout.
    #[error("No response within {duration_ms}ms")]
    Timeout {
        /// The timeout that elapsed, in milliseconds.
        duration_ms: u64,
    },

    /// The request could not be put on the wire, e.g. because a header
    /// name or value is not valid HTTP.
    #[error("Cannot send request: {0}")]
    Connection(String),

    /// A request interceptor rejected the outgoing call.
    #[error("Request rejected by interceptor: {0}")]
    Interceptor(String),
}

impl ClientError {
    /// Creates an interceptor rejection.
    pub fn interceptor(message: impl Into<String>) -> Self {
        Self::Interceptor(message.into())
    }

    /// Whether sending the same call again might succeed.
    ///
    /// Informational only: retry policy belongs to the caller.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout { .. } => true,
            Self::HttpStatus { status, .. } => *status >= 500 || *status == 429,
            Self::Request(e) => e.is_timeout() || e.is_connect(),
            Self::Connection(_) | Self::Interceptor(_) => false,
        }
    }

    /// The status code the server answered with, if it answered.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
