//! Driving error types

use thiserror::Error;

/// Errors that can occur during driving lookups
#[derive(Debug, Error)]
pub enum DrivingError {
    /// No API key configured; the provider was not called
    #[error("Kakao REST API key not configured")]
    MissingApiKey,

    /// Connection to the directions service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// HTTP request to the directions service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// API key rejected
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Failed to parse response from the directions service
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },

    /// The response contained no route
    #[error("No routes found")]
    NoRoutesFound,

    /// The route carries a non-zero result code
    #[error("Route not found (code {code}): {message}")]
    RouteFailed {
        /// Provider result code
        code: i64,
        /// Provider message
        message: String,
    },

    /// The route has no summary duration
    #[error("Route summary has no duration")]
    DurationUnavailable,

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}
