//! The persisted move and its factory-side counterpart.

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};

use super::{ChecklistItem, MoveStatus, NewChecklistItem, Outcome, RunMode, Tracking};

/// Retrospective recorded when a move is completed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MoveResult {
    pub outcome: Outcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub learning: Option<String>,
}

/// A persisted, time-boxed execution plan derived from a framework.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Move {
    /// Unique identifier for the move
    pub id: u64,

    /// Display name
    pub name: String,

    /// Catalog id of the problem the move addresses
    pub problem_type: String,

    /// Catalog id of the framework the move was built from
    pub framework_id: String,

    /// Framework name at the time of launch
    pub framework_name: String,

    /// Optional link to an external campaign
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign_id: Option<u64>,

    /// Main distribution channel
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,

    #[serde(default)]
    pub run_mode: RunMode,

    /// Length of the move in days (at least 1)
    pub duration_days: u32,

    /// Generated tasks, in generation order
    #[serde(default)]
    pub checklist_items: Vec<ChecklistItem>,

    pub tracking: Tracking,

    pub status: MoveStatus,

    /// Present once the move is completed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<MoveResult>,

    /// First day of the move
    pub start_date: Date,

    /// Timestamp when the move was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the move was last modified (UTC)
    pub updated_at: Timestamp,
}

impl Move {
    /// Look up a checklist item by id.
    pub fn task(&self, task_id: u64) -> Option<&ChecklistItem> {
        self.checklist_items.iter().find(|t| t.id == task_id)
    }
}

/// Output of the move factory: everything needed to persist a new move.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMove {
    pub name: String,
    pub problem_type: String,
    pub framework_id: String,
    pub framework_name: String,
    pub campaign_id: Option<u64>,
    pub channel: Option<String>,
    pub run_mode: RunMode,
    pub duration_days: u32,
    pub checklist_items: Vec<NewChecklistItem>,
    pub metric: String,
    pub baseline: Option<f64>,
    pub target: Option<f64>,
    pub status: MoveStatus,
    pub start_date: Date,
}
