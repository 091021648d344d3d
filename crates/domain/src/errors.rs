//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Coordinates outside the valid latitude/longitude ranges
    #[error("Invalid coordinates for {name}: {reason}")]
    InvalidCoordinates { name: String, reason: String },

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl DomainError {
    /// Create an invalid coordinates error
    pub fn invalid_coordinates(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidCoordinates {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
