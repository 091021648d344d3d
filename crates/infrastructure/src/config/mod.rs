//! Application configuration
//!
//! Sources, later ones overriding earlier ones:
//! 1. built-in defaults
//! 2. a TOML file (`config.toml` in the working directory, or an explicit path)
//! 3. environment variables prefixed `TRAVEL_TIME`, nested with `__`
//!    (e.g. `TRAVEL_TIME__TRANSIT__MIN_FIRST_WALK_MINUTES=8`)

mod integrations;
mod scheduler;

use std::path::Path;

use application::error::ApplicationError;
use domain::Location;
use serde::{Deserialize, Serialize};
use tracing::warn;
use tracing_subscriber::EnvFilter;

pub use integrations::{DrivingAppConfig, LocationConfig, TransitAppConfig};
pub use scheduler::SchedulerAppConfig;

use crate::telemetry::LoggingConfig;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "TRAVEL_TIME";

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where every route starts
    pub origin: LocationConfig,

    /// Route targets, in emission order
    #[serde(default)]
    pub destinations: Vec<LocationConfig>,

    /// Kakao Mobility directions
    #[serde(default)]
    pub driving: DrivingAppConfig,

    /// ODsay path search
    #[serde(default)]
    pub transit: TransitAppConfig,

    /// Loop timing
    #[serde(default)]
    pub scheduler: SchedulerAppConfig,

    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// Without an explicit path, `config.toml` in the working directory is
    /// read if it exists. An explicit path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let file = path.map_or_else(
            || config::File::with_name("config").required(false),
            |path| config::File::from(path).required(true),
        );

        let builder = config::Config::builder()
            // Start with defaults
            .set_default("scheduler.timezone", "Asia/Seoul")?
            .set_default("logging.filter", "info")?
            .add_source(file)
            // Override with environment variables
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    /// Parse configuration from a TOML document, without other sources
    pub fn from_toml_str(source: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    /// Check the configuration once before the first cycle
    ///
    /// Missing credentials are only warned about: the matching durations
    /// are then emitted as absent.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Configuration`] describing the first
    /// problem found.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        let origin = self.origin_location();
        origin
            .validate()
            .map_err(|e| ApplicationError::Configuration(format!("origin: {e}")))?;

        if self.destinations.is_empty() {
            return Err(ApplicationError::Configuration(
                "at least one destination must be configured".to_string(),
            ));
        }

        let destinations = self.destination_locations();
        for (index, destination) in destinations.iter().enumerate() {
            destination.validate().map_err(|e| {
                ApplicationError::Configuration(format!("destinations[{index}]: {e}"))
            })?;
        }

        for location in std::iter::once(&origin).chain(&destinations) {
            if let Err(e) = location.check_coordinates() {
                warn!(error = %e, "Lookups for this location will fail");
            }
        }

        self.driving
            .to_driving_config()
            .validate()
            .map_err(|e| ApplicationError::Configuration(format!("driving: {e}")))?;
        self.transit
            .to_transit_config()
            .validate()
            .map_err(|e| ApplicationError::Configuration(format!("transit: {e}")))?;

        self.scheduler
            .interval()
            .map_err(|e| ApplicationError::Configuration(format!("scheduler: {e}")))?;
        self.scheduler
            .timezone()
            .map_err(|e| ApplicationError::Configuration(format!("scheduler: {e}")))?;

        EnvFilter::try_new(&self.logging.filter).map_err(|e| {
            ApplicationError::Configuration(format!("logging.filter: {e}"))
        })?;

        if self.driving.api_key.is_none() {
            warn!("Kakao REST API key not set; car durations will be null");
        }
        if self.transit.api_key.is_none() {
            warn!("ODsay API key not set; transit durations will be null");
        }

        Ok(())
    }

    /// The origin as a domain location
    #[must_use]
    pub fn origin_location(&self) -> Location {
        self.origin.to_location()
    }

    /// The destinations as domain locations, in configured order
    #[must_use]
    pub fn destination_locations(&self) -> Vec<Location> {
        self.destinations
            .iter()
            .map(LocationConfig::to_location)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use secrecy::ExposeSecret;

    use super::*;

    const SAMPLE: &str = r#"
[origin]
name = "본사"
longitude = 127.0276
latitude = 37.4979

[[destinations]]
name = "서울역"
longitude = 126.9707
latitude = 37.5547

[[destinations]]
name = "판교"
longitude = 127.1112
latitude = 37.3947

[transit]
api_key = "odsay-key"
min_first_walk_minutes = 8
"#;

    #[test]
    fn parses_toml_with_defaults() {
        let config = AppConfig::from_toml_str(SAMPLE).unwrap();

        assert_eq!(config.origin.name, "본사");
        assert_eq!(config.destinations.len(), 2);
        assert_eq!(config.destinations[1].name, "판교");
        assert!(config.driving.api_key.is_none());
        assert_eq!(
            config.transit.api_key.as_ref().map(|k| k.expose_secret().to_string()),
            Some("odsay-key".to_string())
        );
        assert_eq!(config.transit.min_first_walk_minutes, Some(8));
        assert_eq!(config.transit.timeout_secs, 15);
        assert_eq!(config.scheduler.interval_minutes, 10);
        assert_eq!(config.scheduler.timezone, "Asia/Seoul");
        assert_eq!(config.logging.filter, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn destinations_keep_order() {
        let config = AppConfig::from_toml_str(SAMPLE).unwrap();
        let names: Vec<_> = config
            .destination_locations()
            .into_iter()
            .map(|l| l.name)
            .collect();
        assert_eq!(names, ["서울역", "판교"]);
        assert_eq!(config.origin_location().name, "본사");
    }

    #[test]
    fn missing_origin_fails_to_parse() {
        let result = AppConfig::from_toml_str("[[destinations]]\nname = \"a\"\nlongitude = 1.0\nlatitude = 1.0\n");
        assert!(result.is_err());
    }

    #[test]
    fn validation_requires_destinations() {
        let mut config = AppConfig::from_toml_str(SAMPLE).unwrap();
        config.destinations.clear();
        assert!(matches!(
            config.validate(),
            Err(ApplicationError::Configuration(_))
        ));
    }

    #[test]
    fn validation_rejects_blank_names() {
        let mut config = AppConfig::from_toml_str(SAMPLE).unwrap();
        config.destinations[1].name = "  ".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("destinations[1]"));
    }

    #[test]
    fn validation_rejects_bad_timezone() {
        let mut config = AppConfig::from_toml_str(SAMPLE).unwrap();
        config.scheduler.timezone = "Nowhere/Special".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validation_rejects_zero_timeout() {
        let mut config = AppConfig::from_toml_str(SAMPLE).unwrap();
        config.driving.timeout_secs = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("driving"));
    }

    #[test]
    fn out_of_range_coordinates_are_only_warned() {
        let mut config = AppConfig::from_toml_str(SAMPLE).unwrap();
        config.destinations[0].latitude = 126.9707;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn load_from_explicit_path() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let config = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.destinations.len(), 2);
    }

    #[test]
    fn load_from_missing_explicit_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(AppConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn secrets_are_not_serialized() {
        let config = AppConfig::from_toml_str(SAMPLE).unwrap();
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("odsay-key"));
    }
}
