//! Move summary types and functionality.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::{Move, MoveHealth, MoveStatus};

/// Summary information about a move with derived progress figures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveSummary {
    /// Move ID
    pub id: u64,
    /// Name of the move
    pub name: String,
    /// Framework the move runs
    pub framework_name: String,
    /// Lifecycle status
    pub status: MoveStatus,
    /// Linked campaign, if any
    pub campaign_id: Option<u64>,
    /// Current day number on the reference date
    pub day: u32,
    /// Length of the move in days
    pub duration_days: u32,
    /// Total number of tasks
    pub total_tasks: u32,
    /// Number of completed tasks
    pub completed_tasks: u32,
    /// Progress classification on the reference date
    pub health: MoveHealth,
}

impl MoveSummary {
    /// Summarise a move as seen on `today`.
    pub fn on(mv: &Move, today: Date) -> Self {
        let progress = mv.progress();
        Self {
            id: mv.id,
            name: mv.name.clone(),
            framework_name: mv.framework_name.clone(),
            status: mv.status,
            campaign_id: mv.campaign_id,
            day: mv.day_number_on(today),
            duration_days: mv.duration_days,
            total_tasks: progress.total,
            completed_tasks: progress.completed,
            health: mv.health_on(today),
        }
    }
}
