//! Provider and location configuration

use domain::{GeoLocation, Location};
use integration_driving::{DrivingConfig, RoutePriority};
use integration_transit::TransitConfig;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// A named point given as longitude / latitude
///
/// Coordinates are taken as-is; values out of range only make the provider
/// lookups fail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationConfig {
    /// Display name used in the emitted records
    pub name: String,
    /// Longitude (x)
    pub longitude: f64,
    /// Latitude (y)
    pub latitude: f64,
}

impl LocationConfig {
    /// Convert to the domain `Location`
    #[must_use]
    pub fn to_location(&self) -> Location {
        Location::new(
            self.name.clone(),
            GeoLocation::from_xy(self.longitude, self.latitude),
        )
    }
}

// ==============================
// Driving (Kakao Mobility)
// ==============================

/// Kakao Mobility directions configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct DrivingAppConfig {
    /// REST API key (sensitive - uses `SecretString`)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Base URL of the directions API
    #[serde(default = "default_driving_base_url")]
    pub base_url: String,

    /// Request timeout in seconds (default: 15)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Route search priority (default: `RECOMMEND`)
    #[serde(default)]
    pub priority: RoutePriority,

    /// Log route summaries of each response
    #[serde(default)]
    pub debug_response: bool,
}

impl std::fmt::Debug for DrivingAppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DrivingAppConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("priority", &self.priority)
            .field("debug_response", &self.debug_response)
            .finish()
    }
}

fn default_driving_base_url() -> String {
    "https://apis-navi.kakaomobility.com".to_string()
}

const fn default_timeout_secs() -> u64 {
    15
}

impl Default for DrivingAppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_driving_base_url(),
            timeout_secs: default_timeout_secs(),
            priority: RoutePriority::default(),
            debug_response: false,
        }
    }
}

impl DrivingAppConfig {
    /// Convert to `integration_driving`'s `DrivingConfig`
    #[must_use]
    pub fn to_driving_config(&self) -> DrivingConfig {
        DrivingConfig {
            base_url: self.base_url.clone(),
            api_key: self
                .api_key
                .as_ref()
                .map(|key| key.expose_secret().to_string()),
            timeout_secs: self.timeout_secs,
            priority: self.priority,
            debug_response: self.debug_response,
        }
    }
}

// ==============================
// Transit (ODsay)
// ==============================

/// ODsay path search configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct TransitAppConfig {
    /// API key (sensitive - uses `SecretString`)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Base URL of the ODsay API
    #[serde(default = "default_transit_base_url")]
    pub base_url: String,

    /// Request timeout in seconds (default: 15)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Path search option (`OPT`)
    #[serde(default)]
    pub search_option: u8,

    /// Known minimum walking minutes from the origin to the first station
    #[serde(default)]
    pub min_first_walk_minutes: Option<u32>,

    /// Log the full body of each response
    #[serde(default)]
    pub debug_response: bool,
}

impl std::fmt::Debug for TransitAppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitAppConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("search_option", &self.search_option)
            .field("min_first_walk_minutes", &self.min_first_walk_minutes)
            .field("debug_response", &self.debug_response)
            .finish()
    }
}

fn default_transit_base_url() -> String {
    "https://api.odsay.com/v1/api".to_string()
}

impl Default for TransitAppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_transit_base_url(),
            timeout_secs: default_timeout_secs(),
            search_option: 0,
            min_first_walk_minutes: None,
            debug_response: false,
        }
    }
}

impl TransitAppConfig {
    /// Convert to `integration_transit`'s `TransitConfig`
    #[must_use]
    pub fn to_transit_config(&self) -> TransitConfig {
        TransitConfig {
            base_url: self.base_url.clone(),
            api_key: self
                .api_key
                .as_ref()
                .map(|key| key.expose_secret().to_string()),
            timeout_secs: self.timeout_secs,
            search_option: self.search_option,
            min_first_walk_minutes: self.min_first_walk_minutes,
            debug_response: self.debug_response,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_uses_x_as_longitude() {
        let config = LocationConfig {
            name: "서울역".to_string(),
            longitude: 126.9707,
            latitude: 37.5547,
        };
        let location = config.to_location();
        assert_eq!(location.name, "서울역");
        assert!((location.position.longitude() - 126.9707).abs() < f64::EPSILON);
        assert!((location.position.latitude() - 37.5547).abs() < f64::EPSILON);
        assert!(location.check_coordinates().is_ok());
    }

    #[test]
    fn driving_defaults() {
        let config = DrivingAppConfig::default();
        assert!(config.api_key.is_none());
        assert_eq!(config.timeout_secs, 15);
        let driving = config.to_driving_config();
        assert_eq!(driving.base_url, "https://apis-navi.kakaomobility.com");
        assert_eq!(driving.priority, RoutePriority::Recommend);
    }

    #[test]
    fn secrets_are_exposed_only_to_clients() {
        let config = TransitAppConfig {
            api_key: Some(SecretString::from("odsay-secret".to_string())),
            min_first_walk_minutes: Some(8),
            ..TransitAppConfig::default()
        };

        let debug = format!("{config:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("odsay-secret"));

        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("odsay-secret"));

        let transit = config.to_transit_config();
        assert_eq!(transit.api_key(), Some("odsay-secret"));
        assert_eq!(transit.min_first_walk_minutes, Some(8));
    }

    #[test]
    fn driving_debug_redacts_key() {
        let config = DrivingAppConfig {
            api_key: Some(SecretString::from("kakao-secret".to_string())),
            ..DrivingAppConfig::default()
        };
        assert!(!format!("{config:?}").contains("kakao-secret"));
    }
}
