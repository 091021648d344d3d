//! Adapters implementing the application ports

mod driving_adapter;
mod transit_adapter;

pub use driving_adapter::DrivingAdapter;
pub use transit_adapter::TransitAdapter;
