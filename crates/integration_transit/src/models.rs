//! Transit data models
//!
//! Typed representations of an ODsay public transit path: the summary
//! block, the ordered segments and the corrected duration estimate derived
//! from them. Every provider field is optional; absence is explicit.

use std::fmt;

use domain::GeoLocation;
use serde::{Deserialize, Serialize};

/// Sentinel used by the provider when the total walking time is unknown
pub const WALK_TIME_NOT_PROVIDED: i64 = -1;

/// Segment classification as reported in `trafficType`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrafficType {
    /// Subway / rail (`1`)
    Subway,
    /// Bus (`2`)
    Bus,
    /// Walking (`3`)
    Walking,
    /// Any other provider code, carried through uninterpreted
    Other(i64),
    /// No `trafficType` in the segment
    Unknown,
}

impl TrafficType {
    /// Classify a raw provider code
    #[must_use]
    pub const fn from_code(code: Option<i64>) -> Self {
        match code {
            Some(1) => Self::Subway,
            Some(2) => Self::Bus,
            Some(3) => Self::Walking,
            Some(other) => Self::Other(other),
            None => Self::Unknown,
        }
    }

    /// Human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Subway => "subway",
            Self::Bus => "bus",
            Self::Walking => "walk",
            Self::Other(_) => "other",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for TrafficType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Other(code) => write!(f, "other({code})"),
            _ => write!(f, "{}", self.label()),
        }
    }
}

/// Summary block of a path (`info`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathSummary {
    /// Provider's claimed end-to-end time in minutes, including walking,
    /// in-vehicle time and transfer waits
    pub total_time_min: Option<i64>,
    /// Fare
    pub payment: Option<i64>,
    /// Number of subway legs
    pub subway_transit_count: Option<i64>,
    /// Number of bus legs
    pub bus_transit_count: Option<i64>,
    /// Name of the first boarding station
    pub first_start_station: Option<String>,
    /// Name of the last alighting station
    pub last_end_station: Option<String>,
    /// Total walking distance in meters
    pub total_walk_m: Option<i64>,
    /// Total walking minutes, or [`WALK_TIME_NOT_PROVIDED`]
    pub total_walk_time_min: Option<i64>,
}

impl PathSummary {
    /// Total walking minutes if the provider actually reported them
    #[must_use]
    pub fn reported_walk_time(&self) -> Option<i64> {
        self.total_walk_time_min
            .filter(|&minutes| minutes != WALK_TIME_NOT_PROVIDED)
    }

    /// Whether no summary field is present at all
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total_time_min.is_none()
            && self.payment.is_none()
            && self.subway_transit_count.is_none()
            && self.bus_transit_count.is_none()
            && self.first_start_station.is_none()
            && self.last_end_station.is_none()
            && self.total_walk_m.is_none()
            && self.total_walk_time_min.is_none()
    }
}

/// One segment of a path (`subPath` entry)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathSegment {
    /// Segment classification
    pub traffic_type: TrafficType,
    /// Segment duration in minutes
    pub section_time_min: Option<i64>,
    /// Segment distance in meters
    pub distance_m: Option<i64>,
    /// Start coordinates, present only when both `startX` and `startY` are
    pub start: Option<GeoLocation>,
}

impl PathSegment {
    /// Whether this segment is a walking segment
    #[must_use]
    pub fn is_walking(&self) -> bool {
        self.traffic_type == TrafficType::Walking
    }

    /// Section time with an absent value counted as zero
    #[must_use]
    pub fn minutes(&self) -> i64 {
        self.section_time_min.unwrap_or(0)
    }
}

/// The chosen candidate path of a search response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransitPath {
    /// Summary information
    pub summary: PathSummary,
    /// Ordered segments
    pub segments: Vec<PathSegment>,
}

impl TransitPath {
    /// The leading segment if it is a walking segment
    #[must_use]
    pub fn leading_walk(&self) -> Option<&PathSegment> {
        self.segments.first().filter(|s| s.is_walking())
    }

    /// The last walking segment of the path
    #[must_use]
    pub fn trailing_walk(&self) -> Option<&PathSegment> {
        self.segments.iter().rev().find(|s| s.is_walking())
    }

    /// Start coordinates of the first subway segment, if it carries them
    #[must_use]
    pub fn first_station(&self) -> Option<GeoLocation> {
        self.segments
            .iter()
            .find(|s| s.traffic_type == TrafficType::Subway)
            .and_then(|s| s.start)
    }

    /// Sum of walking segment minutes
    #[must_use]
    pub fn walking_minutes(&self) -> i64 {
        self.segments
            .iter()
            .filter(|s| s.is_walking())
            .map(PathSegment::minutes)
            .sum()
    }

    /// Sum of every segment's minutes (excludes transfer waits)
    #[must_use]
    pub fn segment_minutes(&self) -> i64 {
        self.segments.iter().map(PathSegment::minutes).sum()
    }
}

/// Where the first-walk correction came from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "source")]
pub enum FirstWalkSource {
    /// Configured minimum first-walk minutes
    Configured,
    /// Straight-line distance from the origin to the first subway station
    StationDistance {
        /// Great-circle distance in meters
        distance_m: f64,
    },
    /// Distance reported on the leading walking segment
    SegmentDistance {
        /// Segment distance in meters
        distance_m: i64,
    },
}

/// Correction applied to the walk from the origin to the first station
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FirstWalkCorrection {
    /// Source of the estimate
    #[serde(flatten)]
    pub source: FirstWalkSource,
    /// Walking minutes the provider reported for the leading segment
    pub provider_minutes: i64,
    /// Corrected walking minutes
    pub estimated_minutes: i64,
    /// Minutes added to the claimed total
    pub added_minutes: i64,
}

/// Result of the transit-duration estimator with its breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitEstimate {
    /// Provider's claimed total, when positive
    pub claimed_minutes: Option<i64>,
    /// First-walk correction, when one applied
    pub first_walk: Option<FirstWalkCorrection>,
    /// Minutes added for the trailing walk (0 if none)
    pub trailing_walk_minutes: i64,
    /// Whether the total came from summing segment minutes
    pub used_segment_sum: bool,
    /// Final corrected total in minutes (always positive)
    pub total_minutes: i64,
}

impl TransitEstimate {
    /// Final duration in whole seconds
    #[must_use]
    pub const fn duration_secs(&self) -> u64 {
        self.total_minutes.unsigned_abs() * 60
    }
}

impl fmt::Display for TransitEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}min", self.total_minutes)?;
        if self.used_segment_sum {
            return write!(f, " (segment sum)");
        }
        if let Some(claimed) = self.claimed_minutes {
            write!(f, " (claimed {claimed}min")?;
            if let Some(first) = &self.first_walk {
                write!(f, ", +{}min first walk", first.added_minutes)?;
            }
            if self.trailing_walk_minutes > 0 {
                write!(f, ", +{}min trailing walk", self.trailing_walk_minutes)?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(traffic: i64, minutes: i64) -> PathSegment {
        PathSegment {
            traffic_type: TrafficType::from_code(Some(traffic)),
            section_time_min: Some(minutes),
            distance_m: None,
            start: None,
        }
    }

    #[test]
    fn traffic_type_from_code() {
        assert_eq!(TrafficType::from_code(Some(1)), TrafficType::Subway);
        assert_eq!(TrafficType::from_code(Some(2)), TrafficType::Bus);
        assert_eq!(TrafficType::from_code(Some(3)), TrafficType::Walking);
        assert_eq!(TrafficType::from_code(Some(7)), TrafficType::Other(7));
        assert_eq!(TrafficType::from_code(None), TrafficType::Unknown);
        assert_eq!(TrafficType::Other(7).to_string(), "other(7)");
    }

    #[test]
    fn reported_walk_time_hides_sentinel() {
        let mut summary = PathSummary {
            total_walk_time_min: Some(-1),
            ..PathSummary::default()
        };
        assert_eq!(summary.reported_walk_time(), None);
        summary.total_walk_time_min = Some(12);
        assert_eq!(summary.reported_walk_time(), Some(12));
        assert!(!summary.is_empty());
        assert!(PathSummary::default().is_empty());
    }

    #[test]
    fn path_walk_helpers() {
        let path = TransitPath {
            summary: PathSummary::default(),
            segments: vec![segment(3, 4), segment(1, 20), segment(3, 2), segment(2, 10), segment(3, 6)],
        };
        assert_eq!(path.leading_walk().map(PathSegment::minutes), Some(4));
        assert_eq!(path.trailing_walk().map(PathSegment::minutes), Some(6));
        assert_eq!(path.walking_minutes(), 12);
        assert_eq!(path.segment_minutes(), 42);
        assert_eq!(path.first_station(), None);
    }

    #[test]
    fn leading_walk_requires_walking_first_segment() {
        let path = TransitPath {
            summary: PathSummary::default(),
            segments: vec![segment(2, 10), segment(3, 4)],
        };
        assert!(path.leading_walk().is_none());
    }

    #[test]
    fn estimate_display_and_seconds() {
        let estimate = TransitEstimate {
            claimed_minutes: Some(45),
            first_walk: None,
            trailing_walk_minutes: 12,
            used_segment_sum: false,
            total_minutes: 57,
        };
        assert_eq!(estimate.duration_secs(), 3420);
        assert_eq!(estimate.to_string(), "57min (claimed 45min, +12min trailing walk)");
    }
}
