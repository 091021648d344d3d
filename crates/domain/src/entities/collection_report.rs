//! One collection cycle's output record

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::RouteResult;

/// Constant service identifier carried by every emitted record
pub const SERVICE_NAME: &str = "travel-time-collector";

/// All route results of a single collection cycle
///
/// Created fresh each cycle, serialised once and dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionReport {
    /// Service identifier, always [`SERVICE_NAME`]
    pub service: String,
    /// Collection timestamp (UTC, ISO-8601)
    pub collect_time_iso: String,
    /// Origin display name
    pub origin: String,
    /// Results in configured destination order
    pub routes: Vec<RouteResult>,
}

impl CollectionReport {
    /// Build a report stamped with the given collection time
    #[must_use]
    pub fn new(origin: impl Into<String>, routes: Vec<RouteResult>, collected_at: DateTime<Utc>) -> Self {
        Self {
            service: SERVICE_NAME.to_string(),
            collect_time_iso: collected_at.to_rfc3339_opts(SecondsFormat::Micros, false),
            origin: origin.into(),
            routes,
        }
    }

    /// Serialise as a single-line JSON document
    ///
    /// # Errors
    ///
    /// Returns an error if serialisation fails.
    pub fn to_json_line(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn sample() -> CollectionReport {
        let at = Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap();
        CollectionReport::new(
            "본사",
            vec![
                RouteResult::new("강남역", Some(930), Some(2700)),
                RouteResult::new("서울역", None, None),
            ],
            at,
        )
    }

    #[test]
    fn timestamp_is_utc_iso8601() {
        let report = sample();
        assert_eq!(report.collect_time_iso, "2026-03-02T09:00:00.000000+00:00");
        assert_eq!(report.service, SERVICE_NAME);
    }

    #[test]
    fn json_line_keeps_order_and_non_ascii() {
        let line = sample().to_json_line().unwrap();
        assert!(!line.contains('\n'));
        assert!(line.contains("\"origin\":\"본사\""));
        let first = line.find("강남역").unwrap();
        let second = line.find("서울역").unwrap();
        assert!(first < second);
    }

    #[test]
    fn json_line_field_names() {
        let value: serde_json::Value = serde_json::from_str(&sample().to_json_line().unwrap()).unwrap();
        assert_eq!(value["service"], "travel-time-collector");
        assert_eq!(value["routes"][0]["car_duration_sec"], 930);
        assert_eq!(value["routes"][0]["car_duration_min"], 16);
        assert_eq!(value["routes"][0]["transit_duration_min"], 45);
        assert!(value["routes"][1]["transit_duration_sec"].is_null());
    }
}
