//! Application layer - Use cases and orchestration
//!
//! Defines the ports the collector talks to (driving lookup, transit lookup,
//! report output) and the [`CollectorService`] that runs one collection
//! cycle over them. Adapters in the infrastructure layer implement the ports.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
