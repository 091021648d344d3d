//! Kakao Mobility directions client
//!
//! Looks up the recommended car route between two points and reports its
//! summary duration.

use std::time::Duration;

use async_trait::async_trait;
use domain::GeoLocation;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::config::DrivingConfig;
use crate::error::DrivingError;
use crate::models::DrivingRoute;

/// Trait for driving directions clients
#[async_trait]
pub trait DrivingClient: Send + Sync {
    /// Find the first route between two points
    async fn find_route(
        &self,
        from: &GeoLocation,
        to: &GeoLocation,
    ) -> Result<DrivingRoute, DrivingError>;

    /// Driving duration in seconds between two points
    async fn driving_duration(
        &self,
        from: &GeoLocation,
        to: &GeoLocation,
    ) -> Result<u64, DrivingError>;
}

/// Driving client backed by the Kakao Mobility directions API
#[derive(Debug)]
pub struct KakaoDrivingClient {
    client: Client,
    config: DrivingConfig,
}

impl KakaoDrivingClient {
    /// Create a new Kakao directions client
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: &DrivingConfig) -> Result<Self, DrivingError> {
        config
            .validate()
            .map_err(DrivingError::ConfigurationError)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DrivingError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Parse the directions response and return its first route
    fn parse_directions_response(body: &str) -> Result<DrivingRoute, DrivingError> {
        let raw: RawDirectionsResponse =
            serde_json::from_str(body).map_err(|e| DrivingError::ParseError(e.to_string()))?;

        raw.routes.into_iter().next().ok_or_else(|| {
            warn!("Kakao directions: no routes");
            DrivingError::NoRoutesFound
        })
    }

    /// Log the route summaries of a response body
    fn log_body(body: &str) {
        match serde_json::from_str::<RawDirectionsResponse>(body) {
            Ok(raw) => {
                let pretty = serde_json::to_string_pretty(&raw).unwrap_or_default();
                info!("Kakao response body:\n{pretty}");
            },
            Err(e) => info!(error = %e, "Kakao response body is not a directions response"),
        }
    }
}

#[async_trait]
impl DrivingClient for KakaoDrivingClient {
    #[instrument(skip(self))]
    async fn find_route(
        &self,
        from: &GeoLocation,
        to: &GeoLocation,
    ) -> Result<DrivingRoute, DrivingError> {
        let Some(api_key) = self.config.api_key() else {
            warn!("Kakao REST API key not set; driving duration will be skipped");
            return Err(DrivingError::MissingApiKey);
        };

        let url = format!("{}/v1/directions", self.config.base_url);

        let params = [
            ("origin", from.to_xy_string()),
            ("destination", to.to_xy_string()),
            ("summary", "true".to_string()),
            ("priority", self.config.priority.to_string()),
        ];

        debug!(?url, "Requesting driving directions");

        let response = self
            .client
            .get(&url)
            .query(&params)
            .header("Authorization", format!("KakaoAK {api_key}"))
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DrivingError::Timeout {
                        timeout_secs: self.config.timeout_secs,
                    }
                } else {
                    DrivingError::ConnectionFailed(e.to_string())
                }
            })?;

        let status = response.status();
        info!(%url, %status, "Kakao request completed");

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(DrivingError::AuthenticationFailed(
                "Invalid Kakao REST API key".to_string(),
            ));
        }

        if !status.is_success() {
            return Err(DrivingError::RequestFailed(format!("HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| DrivingError::ParseError(e.to_string()))?;

        if self.config.debug_response {
            Self::log_body(&body);
        }

        Self::parse_directions_response(&body)
    }

    async fn driving_duration(
        &self,
        from: &GeoLocation,
        to: &GeoLocation,
    ) -> Result<u64, DrivingError> {
        let route = self.find_route(from, to).await?;

        let summary = route.summary.clone().unwrap_or_default();
        info!(
            result_code = ?route.result_code,
            result_msg = ?route.result_msg,
            duration_sec = ?summary.duration,
            distance_m = ?summary.distance,
            "Kakao directions result"
        );

        if !route.is_success() {
            let message = route.result_msg.unwrap_or_default();
            warn!(%message, "Kakao directions result not successful");
            return Err(DrivingError::RouteFailed {
                code: route.result_code.unwrap_or(-1),
                message,
            });
        }

        summary.duration.ok_or(DrivingError::DurationUnavailable)
    }
}

// --- Raw API response types for deserialization ---

/// Only the fields the collector reads; the rest of the body (sections,
/// roads, guides) is ignored
#[derive(Debug, Default, Serialize, Deserialize)]
struct RawDirectionsResponse {
    #[serde(default)]
    routes: Vec<DrivingRoute>,
}
