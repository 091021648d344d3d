//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// External service error
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Writing a report failed
    #[error("Output error: {0}")]
    Output(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Whether the error came from a provider lookup
    ///
    /// Such errors only make a single value absent; everything else fails
    /// the cycle.
    #[must_use]
    pub const fn is_lookup_failure(&self) -> bool {
        matches!(self, Self::ExternalService(_) | Self::Configuration(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = ApplicationError::Output("broken pipe".to_string());
        assert_eq!(err.to_string(), "Output error: broken pipe");
    }

    #[test]
    fn test_from_domain_error() {
        let err: ApplicationError = DomainError::ValidationError("bad".to_string()).into();
        assert!(matches!(err, ApplicationError::Domain(_)));
    }

    #[test]
    fn test_lookup_failure_classification() {
        assert!(ApplicationError::ExternalService("timeout".to_string()).is_lookup_failure());
        assert!(ApplicationError::Configuration("no key".to_string()).is_lookup_failure());
        assert!(!ApplicationError::Output("closed".to_string()).is_lookup_failure());
        assert!(!ApplicationError::Internal("oops".to_string()).is_lookup_failure());
    }
}
