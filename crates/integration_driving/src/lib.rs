//! Driving directions integration for the travel time collector
//!
//! Provides car travel times via the
//! [Kakao Mobility directions API](https://developers.kakaomobility.com/docs/navi-api/directions/).
//! [`DrivingClient`] defines the interface, implemented by
//! [`KakaoDrivingClient`]. Unlike transit, the provider's duration is used
//! as-is.

mod client;
mod config;
mod error;
mod models;

pub use client::{DrivingClient, KakaoDrivingClient};
pub use config::{DrivingConfig, RoutePriority};
pub use error::DrivingError;
pub use models::{DrivingRoute, RouteSummary};
