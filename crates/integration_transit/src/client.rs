//! ODsay transit client
//!
//! Calls the public transit path search (`searchPubTransPathT`) and turns
//! the best candidate path into a corrected duration estimate.

use std::time::Duration;

use async_trait::async_trait;
use domain::GeoLocation;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::config::TransitConfig;
use crate::error::TransitError;
use crate::estimator;
use crate::models::{PathSegment, PathSummary, TrafficType, TransitEstimate, TransitPath};

/// Trait for transit service clients
#[async_trait]
pub trait TransitClient: Send + Sync {
    /// Search paths between two points and return the best candidate
    async fn search_path(
        &self,
        from: &GeoLocation,
        to: &GeoLocation,
    ) -> Result<TransitPath, TransitError>;

    /// Search paths and derive the corrected total duration of the best one
    async fn estimate_duration(
        &self,
        from: &GeoLocation,
        to: &GeoLocation,
    ) -> Result<TransitEstimate, TransitError>;
}

/// Transit client backed by the ODsay path search API
#[derive(Debug)]
pub struct OdsayTransitClient {
    client: Client,
    config: TransitConfig,
}

impl OdsayTransitClient {
    /// Create a new ODsay transit client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &TransitConfig) -> Result<Self, TransitError> {
        config
            .validate()
            .map_err(TransitError::ConfigurationError)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TransitError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Log the response body with the API key stripped
    fn log_body(body: &str) {
        let Ok(mut value) = serde_json::from_str::<Value>(body) else {
            info!(body, "ODsay response body (not JSON)");
            return;
        };
        if let Some(object) = value.as_object_mut() {
            object.remove("apiKey");
        }
        let pretty = serde_json::to_string_pretty(&value).unwrap_or_default();
        info!("ODsay response body:\n{pretty}");
    }

    /// Parse a path search response body and pick the first candidate path
    fn parse_path_response(body: &str) -> Result<TransitPath, TransitError> {
        let raw: RawSearchResponse =
            serde_json::from_str(body).map_err(|e| TransitError::ParseError(e.to_string()))?;

        if let Some(error) = raw.error.as_ref().filter(|e| !e.is_null()) {
            let err = provider_error(error);
            warn!(error = %err, "ODsay reported an error");
            return Err(err);
        }

        let result = raw.result.unwrap_or_default();
        let code = result.code.as_ref().map(value_to_string);

        if let Some(code) = code.filter(|code| code != "0") {
            let message = result
                .message
                .as_ref()
                .map_or_else(|| "unknown".to_string(), value_to_string);
            warn!(%code, %message, "ODsay result not successful");
            return Err(TransitError::ProviderError { code, message });
        }

        let candidates = result
            .path
            .filter(|paths| !paths.is_empty())
            .or_else(|| result.sub_path.filter(|paths| !paths.is_empty()))
            .unwrap_or_default();
        let path_count = candidates.len();

        let Some(first) = candidates.into_iter().next() else {
            warn!("ODsay response contains no path");
            return Err(TransitError::NoPathFound);
        };

        let path = Self::convert_path(first);
        let summary = &path.summary;
        info!(
            path_count,
            total_time_min = ?summary.total_time_min,
            payment = ?summary.payment,
            subway_transit_count = ?summary.subway_transit_count,
            bus_transit_count = ?summary.bus_transit_count,
            first_start_station = ?summary.first_start_station,
            last_end_station = ?summary.last_end_station,
            total_walk_m = ?summary.total_walk_m,
            total_walk_time_min = ?summary.total_walk_time_min,
            "ODsay path found"
        );

        Ok(path)
    }

    /// Convert a raw path, using the path object itself when `info` is missing
    fn convert_path(raw: RawPath) -> TransitPath {
        let summary = raw
            .info
            .map(Self::convert_summary)
            .filter(|summary| !summary.is_empty())
            .unwrap_or_else(|| Self::convert_summary(raw.inline));

        TransitPath {
            summary,
            segments: raw
                .sub_path
                .unwrap_or_default()
                .into_iter()
                .map(Self::convert_segment)
                .collect(),
        }
    }

    fn convert_summary(raw: RawInfo) -> PathSummary {
        PathSummary {
            total_time_min: raw.total_time,
            payment: raw.payment,
            subway_transit_count: raw.subway_transit_count,
            bus_transit_count: raw.bus_transit_count,
            first_start_station: raw.first_start_station,
            last_end_station: raw.last_end_station,
            total_walk_m: raw.total_walk,
            total_walk_time_min: raw.total_walk_time,
        }
    }

    fn convert_segment(raw: RawSubPath) -> PathSegment {
        let start = match (raw.start_x, raw.start_y) {
            (Some(x), Some(y)) => Some(GeoLocation::from_xy(x, y)),
            _ => None,
        };

        PathSegment {
            traffic_type: TrafficType::from_code(raw.traffic_type),
            section_time_min: raw.section_time,
            distance_m: raw.distance,
            start,
        }
    }
}

#[async_trait]
impl TransitClient for OdsayTransitClient {
    #[instrument(skip(self))]
    async fn search_path(
        &self,
        from: &GeoLocation,
        to: &GeoLocation,
    ) -> Result<TransitPath, TransitError> {
        let Some(api_key) = self.config.api_key() else {
            warn!("ODsay API key not set; transit duration will be skipped");
            return Err(TransitError::MissingApiKey);
        };

        let url = format!("{}/searchPubTransPathT", self.config.base_url);

        let params: [(&str, String); 7] = [
            ("apiKey", api_key.to_string()),
            ("SX", from.longitude().to_string()),
            ("SY", from.latitude().to_string()),
            ("EX", to.longitude().to_string()),
            ("EY", to.latitude().to_string()),
            ("OPT", self.config.search_option.to_string()),
            ("resultType", "json".to_string()),
        ];

        debug!(?url, "Searching transit paths");

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TransitError::Timeout {
                        timeout_secs: self.config.timeout_secs,
                    }
                } else {
                    TransitError::ConnectionFailed(e.to_string())
                }
            })?;

        let status = response.status();
        info!(%url, %status, "ODsay request completed");

        if !status.is_success() {
            return Err(TransitError::RequestFailed(format!("HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| TransitError::ParseError(e.to_string()))?;

        if self.config.debug_response {
            Self::log_body(&body);
        }

        Self::parse_path_response(&body)
    }

    async fn estimate_duration(
        &self,
        from: &GeoLocation,
        to: &GeoLocation,
    ) -> Result<TransitEstimate, TransitError> {
        let path = self.search_path(from, to).await?;

        estimator::estimate(&path, from, &self.config.estimator_settings()).ok_or_else(|| {
            warn!(
                segments = path.segments.len(),
                "Could not compute a transit total time"
            );
            TransitError::DurationUnavailable
        })
    }
}

/// Render a JSON scalar the way the provider means it (`"0"` and `0` alike)
fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Build an error from the provider's top-level `error` member, which is
/// either an object or a list of objects
fn provider_error(error: &Value) -> TransitError {
    let entry = error
        .as_array()
        .and_then(|entries| entries.first())
        .unwrap_or(error);

    let code = entry
        .get("code")
        .map_or_else(|| "unknown".to_string(), value_to_string);
    let message = entry
        .get("message")
        .or_else(|| entry.get("msg"))
        .map_or_else(|| "unknown".to_string(), value_to_string);

    TransitError::ProviderError { code, message }
}

// --- Raw API response types for deserialization ---

/// Field deserializers that turn wrong-typed values into "absent"
mod lenient {
    use serde::{Deserialize, Deserializer, de::DeserializeOwned};
    use serde_json::Value;

    #[allow(clippy::cast_possible_truncation)]
    fn as_int(value: &Value) -> Option<i64> {
        match value {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
            Value::String(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().map(|f| f as i64))
            },
            _ => None,
        }
    }

    fn as_float(value: &Value) -> Option<f64> {
        match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    pub fn int<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
        Ok(Option::<Value>::deserialize(deserializer)?
            .as_ref()
            .and_then(as_int))
    }

    pub fn float<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
        Ok(Option::<Value>::deserialize(deserializer)?
            .as_ref()
            .and_then(as_float))
    }

    pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        Ok(
            Option::<Value>::deserialize(deserializer)?.and_then(|value| match value {
                Value::String(s) => Some(s),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            }),
        )
    }

    /// A nested object; anything else is absent
    pub fn object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        Ok(Option::<Value>::deserialize(deserializer)?
            .filter(Value::is_object)
            .and_then(|value| serde_json::from_value(value).ok()))
    }

    /// A list of objects; entries that are not objects are skipped
    pub fn objects<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        Ok(
            Option::<Value>::deserialize(deserializer)?.and_then(|value| match value {
                Value::Array(items) => Some(
                    items
                        .into_iter()
                        .filter(Value::is_object)
                        .filter_map(|item| serde_json::from_value(item).ok())
                        .collect(),
                ),
                _ => None,
            }),
        )
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawSearchResponse {
    #[serde(default)]
    result: Option<RawResult>,
    #[serde(default)]
    error: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawResult {
    #[serde(default)]
    code: Option<Value>,
    #[serde(default)]
    message: Option<Value>,
    #[serde(default, deserialize_with = "lenient::objects")]
    path: Option<Vec<RawPath>>,
    #[serde(default, deserialize_with = "lenient::objects")]
    sub_path: Option<Vec<RawPath>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPath {
    #[serde(default, deserialize_with = "lenient::object")]
    info: Option<RawInfo>,
    #[serde(default, deserialize_with = "lenient::objects")]
    sub_path: Option<Vec<RawSubPath>>,
    #[serde(flatten)]
    inline: RawInfo,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawInfo {
    #[serde(default, deserialize_with = "lenient::int")]
    total_time: Option<i64>,
    #[serde(default, deserialize_with = "lenient::int")]
    payment: Option<i64>,
    #[serde(default, deserialize_with = "lenient::int")]
    subway_transit_count: Option<i64>,
    #[serde(default, deserialize_with = "lenient::int")]
    bus_transit_count: Option<i64>,
    #[serde(default, deserialize_with = "lenient::text")]
    first_start_station: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    last_end_station: Option<String>,
    #[serde(default, deserialize_with = "lenient::int")]
    total_walk: Option<i64>,
    #[serde(default, deserialize_with = "lenient::int")]
    total_walk_time: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSubPath {
    #[serde(default, deserialize_with = "lenient::int")]
    traffic_type: Option<i64>,
    #[serde(default, deserialize_with = "lenient::int")]
    section_time: Option<i64>,
    #[serde(default, deserialize_with = "lenient::int")]
    distance: Option<i64>,
    #[serde(default, deserialize_with = "lenient::float", rename = "startX")]
    start_x: Option<f64>,
    #[serde(default, deserialize_with = "lenient::float", rename = "startY")]
    start_y: Option<f64>,
}
