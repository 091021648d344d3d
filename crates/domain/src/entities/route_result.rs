//! Per-destination travel time measurement

use serde::{Deserialize, Serialize};

/// Convert whole seconds to minutes, rounding up
///
/// An absent duration stays absent; it never becomes zero.
#[must_use]
pub const fn ceil_minutes(seconds: Option<u64>) -> Option<u64> {
    match seconds {
        Some(secs) => Some(secs.div_ceil(60)),
        None => None,
    }
}

/// Travel times from the origin to one destination
///
/// `None` means the corresponding provider lookup failed or returned no
/// usable data. It serialises as JSON `null`, distinct from a zero duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteResult {
    /// Destination display name
    pub destination: String,
    /// Driving duration in seconds
    pub car_duration_sec: Option<u64>,
    /// Public transit duration in seconds
    pub transit_duration_sec: Option<u64>,
    /// Driving duration in minutes (ceiling)
    pub car_duration_min: Option<u64>,
    /// Public transit duration in minutes (ceiling)
    pub transit_duration_min: Option<u64>,
}

impl RouteResult {
    /// Build a result from second values, deriving the minute fields
    #[must_use]
    pub fn new(
        destination: impl Into<String>,
        car_duration_sec: Option<u64>,
        transit_duration_sec: Option<u64>,
    ) -> Self {
        Self {
            destination: destination.into(),
            car_duration_sec,
            transit_duration_sec,
            car_duration_min: ceil_minutes(car_duration_sec),
            transit_duration_min: ceil_minutes(transit_duration_sec),
        }
    }

    /// Whether neither provider produced a duration
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.car_duration_sec.is_none() && self.transit_duration_sec.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ceil_minutes_rounds_up() {
        assert_eq!(ceil_minutes(Some(930)), Some(16));
        assert_eq!(ceil_minutes(Some(900)), Some(15));
        assert_eq!(ceil_minutes(Some(901)), Some(16));
        assert_eq!(ceil_minutes(Some(1)), Some(1));
    }

    #[test]
    fn ceil_minutes_keeps_zero_and_absent_apart() {
        assert_eq!(ceil_minutes(Some(0)), Some(0));
        assert_eq!(ceil_minutes(None), None);
    }

    #[test]
    fn new_derives_minutes() {
        let route = RouteResult::new("City Hall", Some(930), Some(2700));
        assert_eq!(route.car_duration_min, Some(16));
        assert_eq!(route.transit_duration_min, Some(45));
        assert!(!route.is_empty());
    }

    #[test]
    fn absent_seconds_serialise_as_null() {
        let route = RouteResult::new("City Hall", None, Some(60));
        assert!(!route.is_empty());

        let json = serde_json::to_value(&route).unwrap();
        assert!(json["car_duration_sec"].is_null());
        assert!(json["car_duration_min"].is_null());
        assert_eq!(json["transit_duration_min"], 1);
    }

    #[test]
    fn both_absent_is_empty() {
        assert!(RouteResult::new("Nowhere", None, None).is_empty());
    }
}
