//! Value Objects - Immutable, identity-less domain primitives

mod geo_location;
mod location;

pub use geo_location::{EARTH_RADIUS_M, GeoLocation, InvalidCoordinates};
pub use location::Location;
