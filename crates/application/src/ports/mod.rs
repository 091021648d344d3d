//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod driving_port;
mod report_sink;
mod transit_port;

#[cfg(test)]
pub use driving_port::MockDrivingPort;
pub use driving_port::DrivingPort;
#[cfg(test)]
pub use report_sink::MockReportSink;
pub use report_sink::ReportSink;
#[cfg(test)]
pub use transit_port::MockTransitPort;
pub use transit_port::TransitPort;
