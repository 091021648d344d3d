//! Public transit duration port
//!
//! Adapters in the infrastructure layer implement this port using a transit
//! path search API plus walking corrections.

use async_trait::async_trait;
use domain::GeoLocation;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for public transit travel time lookups
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TransitPort: Send + Sync {
    /// Corrected door-to-door transit time in seconds between two points
    async fn transit_duration_secs(
        &self,
        from: &GeoLocation,
        to: &GeoLocation,
    ) -> Result<u64, ApplicationError>;
}
