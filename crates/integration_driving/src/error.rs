//! Driving error types

use thiserror::Error;

/// Errors that can occur while requesting driving directions
#[derive(Debug, Error)]
pub enum DrivingError {
    /// No API key configured
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Connection to the directions service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The service answered with a non-success status
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The API key was rejected
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Failed to parse the response body
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded, retry after {retry_after_secs:?} seconds")]
    RateLimitExceeded {
        /// Seconds to wait before retrying (if provided by API)
        retry_after_secs: Option<u64>,
    },

    /// The service found no drivable route
    #[error("No route found (code {code}): {message}")]
    NoRouteFound {
        /// Provider result code
        code: i32,
        /// Provider result message
        message: String,
    },

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },
}

impl DrivingError {
    /// Returns true if this error is retryable
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_)
                | Self::RequestFailed(_)
                | Self::Timeout { .. }
                | Self::RateLimitExceeded { .. }
        )
    }
}
