//! Driving route models

use serde::{Deserialize, Serialize};

/// Route result code meaning success
pub const RESULT_CODE_SUCCESS: i64 = 0;

/// Summary of a driving route
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteSummary {
    /// Travel time in seconds
    #[serde(default)]
    pub duration: Option<u64>,
    /// Travel distance in meters
    #[serde(default)]
    pub distance: Option<u64>,
}

/// One route of a directions response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrivingRoute {
    /// Result code, 0 on success
    #[serde(default)]
    pub result_code: Option<i64>,
    /// Result message
    #[serde(default)]
    pub result_msg: Option<String>,
    /// Route summary, present on success
    #[serde(default)]
    pub summary: Option<RouteSummary>,
}

impl DrivingRoute {
    /// Whether the provider reported success for this route
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.result_code == Some(RESULT_CODE_SUCCESS)
    }

    /// Duration in seconds, if present
    #[must_use]
    pub fn duration_secs(&self) -> Option<u64> {
        self.summary.as_ref().and_then(|summary| summary.duration)
    }
}
