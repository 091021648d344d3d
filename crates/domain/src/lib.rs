//! Domain layer for the travel time collector
//!
//! Contains the value objects and records shared by every layer: coordinates
//! with great-circle distance, named locations, per-route results and the
//! per-cycle collection report. This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
