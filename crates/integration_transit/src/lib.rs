//! Public transit integration for the travel time collector
//!
//! Provides public transit travel times via the
//! [ODsay](https://lab.odsay.com) path search API (Seoul metropolitan
//! subway and bus network).
//!
//! # Architecture
//!
//! [`TransitClient`] defines the interface for path search and duration
//! estimation, implemented by [`OdsayTransitClient`]. The raw provider
//! response is parsed into a [`TransitPath`]; the [`estimator`] then derives
//! a corrected total duration from it, compensating for walking time the
//! provider tends to undercount.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain::GeoLocation;
//! use integration_transit::{OdsayTransitClient, TransitClient, TransitConfig};
//!
//! let config = TransitConfig {
//!     api_key: Some("my-key".to_string()),
//!     ..TransitConfig::default()
//! };
//! let client = OdsayTransitClient::new(&config)?;
//!
//! let estimate = client
//!     .estimate_duration(
//!         &GeoLocation::from_xy(127.0276, 37.4979), // origin (x = longitude)
//!         &GeoLocation::from_xy(126.9779, 37.5663), // destination
//!     )
//!     .await?;
//! println!("{} seconds", estimate.duration_secs());
//! ```

mod client;
mod config;
mod error;
pub mod estimator;
mod models;

pub use client::{OdsayTransitClient, TransitClient};
pub use config::TransitConfig;
pub use error::TransitError;
pub use estimator::{EstimatorSettings, TRAILING_WALK_THRESHOLD_M, WALKING_SPEED_M_PER_MIN};
pub use models::{
    FirstWalkCorrection, FirstWalkSource, PathSegment, PathSummary, TrafficType,
    TransitEstimate, TransitPath, WALK_TIME_NOT_PROVIDED,
};
