//! Command-line arguments

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, builder::BoolishValueParser};
use infrastructure::AppConfig;
use secrecy::SecretString;
use tracing::warn;

/// Travel time collector
#[derive(Debug, Parser)]
#[command(name = "travel-time-collector")]
#[command(
    author,
    version,
    about = "Collects car and public transit travel times and prints them as JSON lines",
    long_about = None
)]
pub struct Cli {
    /// Verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to the configuration file (default: ./config.toml if present)
    #[arg(short, long, global = true, env = "TRAVEL_TIME_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: ProviderOverrides,

    #[command(subcommand)]
    pub command: Commands,
}

/// Provider settings that override the configuration file
#[derive(Debug, Default, Args)]
pub struct ProviderOverrides {
    /// Kakao REST API key
    #[arg(long, global = true, env = "KAKAO_REST_API_KEY", hide_env_values = true)]
    pub kakao_api_key: Option<String>,

    /// ODsay API key
    #[arg(long, global = true, env = "ODSAY_API_KEY", hide_env_values = true)]
    pub odsay_api_key: Option<String>,

    /// Known walking minutes from the origin to the first station
    ///
    /// Values that are not a whole number are ignored.
    #[arg(long, global = true, env = "ODSAY_FIRST_WALK_MIN")]
    pub first_walk_min: Option<String>,

    /// Log the route summaries of each Kakao response
    ///
    /// The environment value accepts 1/0, yes/no, on/off and true/false.
    #[arg(long, global = true, env = "KAKAO_DEBUG", value_parser = BoolishValueParser::new())]
    pub kakao_debug: bool,

    /// Log the full body of each ODsay response
    #[arg(long, global = true, env = "ODSAY_DEBUG", value_parser = BoolishValueParser::new())]
    pub odsay_debug: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run one collection cycle and exit
    Once,

    /// Run a cycle now, then every N minutes
    Interval {
        /// Minutes between cycles (default: scheduler.interval_minutes)
        #[arg(short, long)]
        minutes: Option<u64>,
    },

    /// Run a cycle at the top of every hour
    Hourly {
        /// Run one cycle right away before waiting for the first hour
        #[arg(long, env = "RUN_FIRST_IMMEDIATELY", value_parser = BoolishValueParser::new())]
        run_first_immediately: bool,

        /// IANA timezone defining the top of the hour (default: scheduler.timezone)
        #[arg(long)]
        timezone: Option<String>,
    },
}

impl ProviderOverrides {
    /// Apply the overrides on top of a loaded configuration
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(key) = non_blank(self.kakao_api_key.as_deref()) {
            config.driving.api_key = Some(SecretString::from(key.to_string()));
        }
        if let Some(key) = non_blank(self.odsay_api_key.as_deref()) {
            config.transit.api_key = Some(SecretString::from(key.to_string()));
        }

        if let Some(raw) = non_blank(self.first_walk_min.as_deref()) {
            match raw.parse::<u32>() {
                Ok(minutes) => config.transit.min_first_walk_minutes = Some(minutes),
                Err(_) => warn!(value = raw, "Ignoring non-numeric first walk minutes"),
            }
        }

        config.driving.debug_response |= self.kakao_debug;
        config.transit.debug_response |= self.odsay_debug;
    }
}

impl Commands {
    /// Apply subcommand options on top of a loaded configuration
    pub fn apply(&self, config: &mut AppConfig) {
        match self {
            Self::Once => {},
            Self::Interval { minutes } => {
                if let Some(minutes) = minutes {
                    config.scheduler.interval_minutes = *minutes;
                }
            },
            Self::Hourly {
                run_first_immediately,
                timezone,
            } => {
                config.scheduler.run_first_immediately |= *run_first_immediately;
                if let Some(timezone) = timezone {
                    config.scheduler.timezone.clone_from(timezone);
                }
            },
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Determine log filter from verbosity count
///
/// Without `-v` the configured filter applies.
pub const fn log_filter_from_verbosity(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}
