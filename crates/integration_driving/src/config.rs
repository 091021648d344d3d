//! Driving service configuration

use std::fmt;

use serde::{Deserialize, Serialize};

/// Route search priority hint sent to the directions API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoutePriority {
    /// Recommended route
    #[default]
    Recommend,
    /// Fastest route
    Time,
    /// Shortest route
    Distance,
}

impl RoutePriority {
    /// Query parameter value
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recommend => "RECOMMEND",
            Self::Time => "TIME",
            Self::Distance => "DISTANCE",
        }
    }
}

impl fmt::Display for RoutePriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for the Kakao Mobility directions API
#[derive(Clone, Serialize, Deserialize)]
pub struct DrivingConfig {
    /// Base URL for the directions API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// REST API key; lookups are skipped when absent
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Route search priority
    #[serde(default)]
    pub priority: RoutePriority,

    /// Log the route summaries of each response
    #[serde(default)]
    pub debug_response: bool,
}

impl fmt::Debug for DrivingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrivingConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .field("priority", &self.priority)
            .field("debug_response", &self.debug_response)
            .finish()
    }
}

fn default_base_url() -> String {
    "https://apis-navi.kakaomobility.com".to_string()
}

const fn default_timeout_secs() -> u64 {
    15
}

impl Default for DrivingConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
            priority: RoutePriority::default(),
            debug_response: false,
        }
    }
}

impl DrivingConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            api_key: Some("test-key".to_string()),
            timeout_secs: 5,
            ..Default::default()
        }
    }

    /// The API key, if one is configured and not blank
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|key| !key.trim().is_empty())
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("base_url must not be empty".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        Ok(())
    }
}
