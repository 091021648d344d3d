//! Driving adapter - Implements DrivingPort using integration_driving

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::DrivingPort;
use async_trait::async_trait;
use domain::GeoLocation;
use integration_driving::{DrivingClient, DrivingConfig, DrivingError, KakaoDrivingClient};
use tracing::{debug, instrument};

/// Adapter for car travel times using the Kakao Mobility directions API
pub struct DrivingAdapter {
    client: Arc<dyn DrivingClient>,
}

impl std::fmt::Debug for DrivingAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DrivingAdapter")
            .field("client", &"DrivingClient")
            .finish()
    }
}

impl DrivingAdapter {
    /// Create an adapter backed by the Kakao client
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// fails to initialize.
    pub fn new(config: &DrivingConfig) -> Result<Self, ApplicationError> {
        let client = KakaoDrivingClient::new(config).map_err(map_driving_error)?;
        Ok(Self::with_client(Arc::new(client)))
    }

    /// Create an adapter around an existing client
    #[must_use]
    pub fn with_client(client: Arc<dyn DrivingClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DrivingPort for DrivingAdapter {
    #[instrument(skip(self))]
    async fn driving_duration_secs(
        &self,
        from: &GeoLocation,
        to: &GeoLocation,
    ) -> Result<u64, ApplicationError> {
        let secs = self
            .client
            .driving_duration(from, to)
            .await
            .map_err(map_driving_error)?;

        debug!(secs, "Driving duration resolved");
        Ok(secs)
    }
}

/// Map driving errors to application errors
fn map_driving_error(err: DrivingError) -> ApplicationError {
    match err {
        DrivingError::MissingApiKey
        | DrivingError::AuthenticationFailed(_)
        | DrivingError::ConfigurationError(_) => {
            ApplicationError::Configuration(format!("Driving lookup: {err}"))
        },
        _ => ApplicationError::ExternalService(format!("Driving lookup failed: {err}")),
    }
}
