//! Driving duration port
//!
//! Adapters in the infrastructure layer implement this port using a
//! directions API.

use async_trait::async_trait;
use domain::GeoLocation;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for car travel time lookups
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DrivingPort: Send + Sync {
    /// Car travel time in seconds between two points
    ///
    /// Any failure (missing credential, transport, provider result) is an
    /// error; the caller decides how to degrade.
    async fn driving_duration_secs(
        &self,
        from: &GeoLocation,
        to: &GeoLocation,
    ) -> Result<u64, ApplicationError>;
}
