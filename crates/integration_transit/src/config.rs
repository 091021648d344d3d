//! Transit service configuration

use serde::{Deserialize, Serialize};

use crate::estimator::EstimatorSettings;

/// Configuration for the ODsay public transit path search
#[derive(Clone, Serialize, Deserialize)]
pub struct TransitConfig {
    /// Base URL for the ODsay API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key; lookups are skipped when absent
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Path search option (`OPT`), 0 = recommended order
    #[serde(default)]
    pub search_option: u8,

    /// Known minimum walking minutes from the origin to the first station
    #[serde(default)]
    pub min_first_walk_minutes: Option<u32>,

    /// Log the full response body of each search
    #[serde(default)]
    pub debug_response: bool,
}

impl std::fmt::Debug for TransitConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .field("search_option", &self.search_option)
            .field("min_first_walk_minutes", &self.min_first_walk_minutes)
            .field("debug_response", &self.debug_response)
            .finish()
    }
}

fn default_base_url() -> String {
    "https://api.odsay.com/v1/api".to_string()
}

const fn default_timeout_secs() -> u64 {
    15
}

impl Default for TransitConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
            search_option: 0,
            min_first_walk_minutes: None,
            debug_response: false,
        }
    }
}

impl TransitConfig {
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

    /// Estimator tunables derived from this configuration
    #[must_use]
    pub const fn estimator_settings(&self) -> EstimatorSettings {
        EstimatorSettings {
            min_first_walk_minutes: self.min_first_walk_minutes,
        }
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
