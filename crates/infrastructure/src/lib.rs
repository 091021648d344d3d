//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer.
//! Contains the provider adapters, the JSON-line report sink, configuration
//! loading, logging setup and the scheduler loops.

pub mod adapters;
pub mod config;
pub mod scheduler;
pub mod sink;
pub mod telemetry;

pub use adapters::*;
pub use config::{AppConfig, DrivingAppConfig, LocationConfig, SchedulerAppConfig, TransitAppConfig};
pub use scheduler::{HourlySchedule, SchedulerError, next_top_of_hour, run_cycle, run_hourly, run_interval};
pub use sink::JsonLineSink;
pub use telemetry::{LoggingConfig, TelemetryError, init_logging};
