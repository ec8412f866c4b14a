//! KPI tracking for a move.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// One logged observation of the primary KPI. Never edited once stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrackingUpdate {
    pub id: u64,
    pub value: f64,
    pub recorded_at: Timestamp,
}

/// Primary KPI with its baseline, target and observation log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tracking {
    /// Name of the primary KPI, fixed by the framework
    pub metric: String,
    pub baseline: Option<f64>,
    pub target: Option<f64>,
    /// Append-only, oldest first
    #[serde(default)]
    pub updates: Vec<TrackingUpdate>,
}

impl Tracking {
    /// Most recent observation, if any.
    pub fn latest(&self) -> Option<&TrackingUpdate> {
        self.updates.last()
    }
}
