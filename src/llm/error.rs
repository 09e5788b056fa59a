//! Error types for the provider client.

use std::time::Duration;

use thiserror::Error;

/// Failures talking to the remote text-generation provider.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Transport-level failure (DNS, connect, TLS, body read).
    #[error("http client error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider did not answer within the configured timeout.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The provider rejected the credential.
    #[error("authentication rejected with status {0}")]
    Unauthorized(u16),

    /// The provider is throttling this key.
    #[error("rate limited by provider")]
    RateLimited,

    /// Any other non-success response.
    #[error("provider returned status {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, truncated.
        message: String,
    },

    /// The body decoded but carried no usable completion.
    #[error("malformed completion: {0}")]
    MalformedResponse(String),

    /// The body was not the expected JSON shape.
    #[error("json decode error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ModelError {
    /// Map a `reqwest` failure, folding timeouts into [`ModelError::Timeout`].
    #[must_use]
    pub fn from_transport(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout)
        } else {
            Self::Http(err)
        }
    }

    /// Map a non-success HTTP status and its body.
    #[must_use]
    pub fn from_status(status: u16, body: &str) -> Self {
        match status {
            401 | 403 => Self::Unauthorized(status),
            429 => Self::RateLimited,
            _ => Self::Status {
                status,
                message: truncate(body.trim(), MAX_ERROR_BODY_CHARS),
            },
        }
    }
}

const MAX_ERROR_BODY_CHARS: usize = 512;

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        text.chars().take(max_chars).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_classification() {
        assert!(matches!(ModelError::from_status(401, ""), ModelError::Unauthorized(401)));
        assert!(matches!(ModelError::from_status(403, ""), ModelError::Unauthorized(403)));
        assert!(matches!(ModelError::from_status(429, "slow down"), ModelError::RateLimited));

        match ModelError::from_status(503, "  overloaded \n") {
            ModelError::Status { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "overloaded");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_status_body_is_truncated() {
        let body = "x".repeat(2_000);
        match ModelError::from_status(500, &body) {
            ModelError::Status { message, .. } => assert_eq!(message.len(), MAX_ERROR_BODY_CHARS),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_display() {
        let err = ModelError::Timeout(Duration::from_secs(30));
        assert_eq!(err.to_string(), "request timed out after 30s");
    }
}
