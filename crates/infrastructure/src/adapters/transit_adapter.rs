//! Transit adapter - Implements TransitPort using integration_transit

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::TransitPort;
use async_trait::async_trait;
use domain::GeoLocation;
use integration_transit::{OdsayTransitClient, TransitClient, TransitConfig, TransitError};
use tracing::{debug, instrument};

/// Adapter for public transit travel times using the ODsay path search
///
/// The duration reported is the walking-corrected estimate, not the
/// provider's raw total.
pub struct TransitAdapter {
    client: Arc<dyn TransitClient>,
}

impl std::fmt::Debug for TransitAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitAdapter")
            .field("client", &"TransitClient")
            .finish()
    }
}

impl TransitAdapter {
    /// Create an adapter backed by the ODsay client
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// fails to initialize.
    pub fn new(config: &TransitConfig) -> Result<Self, ApplicationError> {
        let client = OdsayTransitClient::new(config).map_err(map_transit_error)?;
        Ok(Self::with_client(Arc::new(client)))
    }

    /// Create an adapter around an existing client
    #[must_use]
    pub fn with_client(client: Arc<dyn TransitClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TransitPort for TransitAdapter {
    #[instrument(skip(self))]
    async fn transit_duration_secs(
        &self,
        from: &GeoLocation,
        to: &GeoLocation,
    ) -> Result<u64, ApplicationError> {
        let estimate = self
            .client
            .estimate_duration(from, to)
            .await
            .map_err(map_transit_error)?;

        debug!(%estimate, "Transit duration resolved");
        Ok(estimate.duration_secs())
    }
}

/// Map transit errors to application errors
fn map_transit_error(err: TransitError) -> ApplicationError {
    match err {
        TransitError::MissingApiKey | TransitError::ConfigurationError(_) => {
            ApplicationError::Configuration(format!("Transit lookup: {err}"))
        },
        _ if err.is_semantic() => {
            ApplicationError::ExternalService(format!("Transit provider found no usable path: {err}"))
        },
        _ => ApplicationError::ExternalService(format!("Transit lookup failed: {err}")),
    }
}
