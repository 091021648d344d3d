//! Named location value object

use serde::{Deserialize, Serialize};
use std::fmt;

use super::GeoLocation;
use crate::errors::DomainError;

/// A named point: the origin building or one of the destinations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Display name used in the emitted records
    pub name: String,
    /// Coordinates of the location
    pub position: GeoLocation,
}

impl Location {
    /// Create a new named location
    #[must_use]
    pub fn new(name: impl Into<String>, position: GeoLocation) -> Self {
        Self {
            name: name.into(),
            position,
        }
    }

    /// Check that the location can be used as a route endpoint
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::ValidationError`] for a blank name.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "location name must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Check that both coordinates lie within their valid ranges
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidCoordinates`] naming this location.
    pub fn check_coordinates(&self) -> Result<(), DomainError> {
        GeoLocation::new(self.position.latitude(), self.position.longitude())
            .map(|_| ())
            .map_err(|e| DomainError::invalid_coordinates(self.name.clone(), e.to_string()))
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.position)
    }
}
