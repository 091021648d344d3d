//! Transit error types

use thiserror::Error;

/// Errors that can occur during transit lookups
///
/// Every variant means the same thing to the collector: no transit duration
/// for this route in this cycle.
#[derive(Debug, Error)]
pub enum TransitError {
    /// No API key configured; the provider was not called
    #[error("ODsay API key not configured")]
    MissingApiKey,

    /// Connection to the transit service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// HTTP request to transit service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse response from transit service
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },

    /// The provider answered with a non-success result code
    #[error("Provider error (code {code}): {message}")]
    ProviderError {
        /// Provider result code
        code: String,
        /// Provider message
        message: String,
    },

    /// The response contained no candidate path
    #[error("No path found")]
    NoPathFound,

    /// A path was found but no positive duration could be derived from it
    #[error("Could not derive a transit duration from the path")]
    DurationUnavailable,

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl TransitError {
    /// Whether the failure came from the provider's answer rather than transport
    #[must_use]
    pub const fn is_semantic(&self) -> bool {
        matches!(
            self,
            Self::ProviderError { .. } | Self::NoPathFound | Self::DurationUnavailable
        )
    }
}
