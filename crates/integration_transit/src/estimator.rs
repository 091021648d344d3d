//! Transit-duration estimator
//!
//! The provider's claimed total frequently undercounts the walk from the
//! origin to the first station and from the last station to the
//! destination. The estimator starts from the claimed total and adds two
//! independent walking corrections, both based on a constant walking speed.
//! When no positive claimed total exists it falls back to the sum of segment
//! times, which excludes transfer waits.

use domain::GeoLocation;
use tracing::{debug, info};

use crate::models::{FirstWalkCorrection, FirstWalkSource, TransitEstimate, TransitPath};

/// Assumed walking speed
pub const WALKING_SPEED_M_PER_MIN: f64 = 80.0;

/// Total walking distance above which the trailing-walk correction applies
pub const TRAILING_WALK_THRESHOLD_M: i64 = 500;

/// Tunables for the estimator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EstimatorSettings {
    /// Known minimum walking minutes from the origin to the first station
    pub min_first_walk_minutes: Option<u32>,
}

/// Walking minutes for a distance, rounded up
#[must_use]
#[allow(clippy::cast_possible_truncation)] // ceil of a walking time fits i64
pub fn walk_minutes(distance_m: f64) -> i64 {
    (distance_m / WALKING_SPEED_M_PER_MIN).ceil() as i64
}

/// Derive the corrected total duration for a path
///
/// Returns `None` when neither the claimed total nor the segment sum is
/// positive.
#[must_use]
pub fn estimate(
    path: &TransitPath,
    origin: &GeoLocation,
    settings: &EstimatorSettings,
) -> Option<TransitEstimate> {
    log_walking_breakdown(path);

    let claimed_minutes = path.summary.total_time_min.filter(|&minutes| minutes > 0);

    let mut estimate = TransitEstimate {
        claimed_minutes,
        first_walk: None,
        trailing_walk_minutes: 0,
        used_segment_sum: false,
        total_minutes: 0,
    };

    if let Some(claimed) = claimed_minutes {
        info!(
            total_time_min = claimed,
            total_walk_time_min = ?path.summary.total_walk_time_min,
            "Claimed total includes walking, riding and transfer waits"
        );
        estimate.total_minutes = claimed;

        estimate.first_walk = first_walk_correction(path, origin, settings);
        if let Some(first) = &estimate.first_walk {
            estimate.total_minutes += first.added_minutes;
            info!(
                source = ?first.source,
                provider_min = first.provider_minutes,
                estimated_min = first.estimated_minutes,
                added_min = first.added_minutes,
                total_min = estimate.total_minutes,
                "Applied first-walk correction"
            );
        }

        estimate.trailing_walk_minutes = trailing_walk_correction(path);
        if estimate.trailing_walk_minutes > 0 {
            estimate.total_minutes += estimate.trailing_walk_minutes;
            info!(
                total_walk_m = ?path.summary.total_walk_m,
                added_min = estimate.trailing_walk_minutes,
                total_min = estimate.total_minutes,
                "Applied trailing-walk correction (walk time not provided)"
            );
        }
    }

    if estimate.total_minutes <= 0 {
        let sum = path.segment_minutes();
        if sum > 0 {
            info!(
                sum_min = sum,
                "Falling back to segment time sum (transfer waits not included)"
            );
            estimate.total_minutes = sum;
            estimate.used_segment_sum = true;
        }
    }

    (estimate.total_minutes > 0).then_some(estimate)
}

/// First-walk correction, trying the configured minimum, then the
/// straight-line distance to the first subway station, then the leading
/// walking segment's own distance
fn first_walk_correction(
    path: &TransitPath,
    origin: &GeoLocation,
    settings: &EstimatorSettings,
) -> Option<FirstWalkCorrection> {
    let leading = path.leading_walk();
    let provider_minutes = leading.map_or(0, |segment| segment.minutes());
    let leading_distance_m = leading.and_then(|segment| segment.distance_m).unwrap_or(0);

    let correction = |source: FirstWalkSource, estimated_minutes: i64| {
        (estimated_minutes > provider_minutes).then_some(FirstWalkCorrection {
            source,
            provider_minutes,
            estimated_minutes,
            added_minutes: estimated_minutes - provider_minutes,
        })
    };

    let configured = settings
        .min_first_walk_minutes
        .and_then(|minutes| correction(FirstWalkSource::Configured, i64::from(minutes)));
    if configured.is_some() {
        return configured;
    }

    if let Some(station) = path.first_station() {
        let distance_m = origin.distance_m(&station);
        return correction(
            FirstWalkSource::StationDistance { distance_m },
            walk_minutes(distance_m),
        );
    }

    if leading_distance_m > 0 {
        #[allow(clippy::cast_precision_loss)] // walking distances are small
        let estimated = walk_minutes(leading_distance_m as f64);
        return correction(
            FirstWalkSource::SegmentDistance {
                distance_m: leading_distance_m,
            },
            estimated,
        );
    }

    None
}

/// Minutes to add when the walking time is not reported but the walking
/// distance is long
fn trailing_walk_correction(path: &TransitPath) -> i64 {
    let walk_m = path.summary.total_walk_m.unwrap_or(0);
    if path.summary.reported_walk_time().is_none() && walk_m > TRAILING_WALK_THRESHOLD_M {
        #[allow(clippy::cast_precision_loss)] // walking distances are small
        return walk_minutes(walk_m as f64);
    }
    0
}

fn log_walking_breakdown(path: &TransitPath) {
    let first = path.leading_walk();
    let last = path.trailing_walk();
    debug!(
        first_walk_min = first.map_or(0, |s| s.minutes()),
        first_walk_m = first.and_then(|s| s.distance_m).unwrap_or(0),
        last_walk_min = last.map_or(0, |s| s.minutes()),
        last_walk_m = last.and_then(|s| s.distance_m).unwrap_or(0),
        total_walk_m = ?path.summary.total_walk_m,
        total_walk_time_min = ?path.summary.total_walk_time_min,
        walking_segments_min = path.walking_minutes(),
        "Walking breakdown"
    );
}
