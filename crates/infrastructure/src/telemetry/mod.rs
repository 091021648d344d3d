//! Logging infrastructure
//!
//! Diagnostics go to stderr through `tracing`; stdout carries only the
//! emitted reports.

mod logging;

pub use logging::{LoggingConfig, TelemetryError, init_logging};
