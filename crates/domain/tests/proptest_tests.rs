//! Property-based tests for domain value objects
//!
//! These tests use proptest to verify invariants across many random inputs.

use domain::{GeoLocation, RouteResult, ceil_minutes};
use proptest::prelude::*;

// ============================================================================
// GeoLocation Property Tests
// ============================================================================

mod geo_location_tests {
    use super::*;

    proptest! {
        #[test]
        fn distance_to_self_is_zero(
            lat in -90.0f64..=90.0f64,
            lon in -180.0f64..=180.0f64
        ) {
            let loc = GeoLocation::new_unchecked(lat, lon);
            prop_assert!(loc.distance_m(&loc).abs() < 1e-6);
        }

        #[test]
        fn distance_is_symmetric(
            lat1 in -90.0f64..=90.0f64,
            lon1 in -180.0f64..=180.0f64,
            lat2 in -90.0f64..=90.0f64,
            lon2 in -180.0f64..=180.0f64
        ) {
            let a = GeoLocation::new_unchecked(lat1, lon1);
            let b = GeoLocation::new_unchecked(lat2, lon2);
            let d1 = a.distance_m(&b);
            let d2 = b.distance_m(&a);
            prop_assert!((d1 - d2).abs() < 1e-3, "{} != {}", d1, d2);
        }

        #[test]
        fn distance_is_bounded_by_half_circumference(
            lat1 in -90.0f64..=90.0f64,
            lon1 in -180.0f64..=180.0f64,
            lat2 in -90.0f64..=90.0f64,
            lon2 in -180.0f64..=180.0f64
        ) {
            let d = GeoLocation::new_unchecked(lat1, lon1)
                .distance_m(&GeoLocation::new_unchecked(lat2, lon2));
            prop_assert!(d >= 0.0);
            prop_assert!(d <= std::f64::consts::PI * domain::EARTH_RADIUS_M + 1e-3);
        }
    }
}

// ============================================================================
// Minute Conversion Property Tests
// ============================================================================

mod minute_conversion_tests {
    use super::*;

    proptest! {
        #[test]
        fn minutes_cover_seconds(secs in 0u64..10_000_000u64) {
            let mins = ceil_minutes(Some(secs)).unwrap();
            prop_assert!(mins * 60 >= secs);
            prop_assert!(mins * 60 < secs + 60);
        }

        #[test]
        fn route_minutes_follow_seconds(
            car in proptest::option::of(0u64..100_000u64),
            transit in proptest::option::of(0u64..100_000u64)
        ) {
            let route = RouteResult::new("Somewhere", car, transit);
            prop_assert_eq!(route.car_duration_min.is_some(), car.is_some());
            prop_assert_eq!(route.transit_duration_min.is_some(), transit.is_some());
            prop_assert_eq!(route.car_duration_min, ceil_minutes(car));
        }
    }
}
