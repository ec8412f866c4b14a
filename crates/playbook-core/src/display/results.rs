//! Result wrapper types for displaying operation outcomes.
//!
//! This module provides wrapper types that format the results of create,
//! update and delete operations with consistent messaging and resource
//! display.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::{
    models::{ChecklistItem, Move, TrackingUpdate},
    playbook::LaunchOutcome,
};

/// Wrapper type for displaying the result of create operations.
///
/// # Examples
///
/// ```rust
/// use playbook_core::{display::CreateResult, models::TrackingUpdate};
/// use jiff::Timestamp;
///
/// let update = TrackingUpdate {
///     id: 4,
///     value: 12.0,
///     recorded_at: Timestamp::now(),
/// };
/// let output = CreateResult::new(update).to_string();
/// assert!(output.starts_with("Logged 12 (update ID: 4)"));
/// ```
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    /// Create a new CreateResult wrapper.
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<TrackingUpdate> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Logged {} (update ID: {}) at {}",
            self.resource.value,
            self.resource.id,
            LocalDateTime(&self.resource.recorded_at)
        )
    }
}

/// Wrapper type for displaying the result of update operations.
///
/// The wrapper can track and display specific changes made during the update,
/// providing users with clear feedback about what was modified.
///
/// # Examples
///
/// ```rust
/// use playbook_core::{display::UpdateResult, models::ChecklistItem};
///
/// let task = ChecklistItem {
///     id: 3,
///     text: "Send 10 messages".to_string(),
///     done: true,
///     day: 2,
///     duration_minutes: None,
///     proof: None,
///     position: 1,
/// };
///
/// let result = UpdateResult::with_changes(task, vec!["Marked as done".to_string()]);
/// let output = result.to_string();
/// assert!(output.contains("Changes made:"));
/// assert!(output.contains("- [x] Send 10 messages"));
/// ```
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    /// Create a new UpdateResult wrapper.
    pub fn new(resource: T) -> Self {
        Self {
            resource,
            changes: Vec::new(),
        }
    }

    /// Create an UpdateResult with a list of changes made.
    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }

    fn fmt_changes(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.changes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Changes made:")?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
        }
        writeln!(f)
    }
}

impl fmt::Display for UpdateResult<Move> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated move with ID: {}", self.resource.id)?;
        self.fmt_changes(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for UpdateResult<ChecklistItem> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated task with ID: {}", self.resource.id)?;
        self.fmt_changes(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of delete operations.
pub struct DeleteResult<T> {
    pub resource: T,
}

impl<T> DeleteResult<T> {
    /// Create a new DeleteResult wrapper.
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for DeleteResult<Move> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted move '{}' (ID: {}) with {} tasks and {} tracking updates",
            self.resource.name,
            self.resource.id,
            self.resource.checklist_items.len(),
            self.resource.tracking.updates.len()
        )
    }
}

impl fmt::Display for LaunchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Launched { mv, warnings } => {
                for warning in warnings {
                    writeln!(f, "Warning: {warning}")?;
                }
                if !warnings.is_empty() {
                    writeln!(f)?;
                }
                writeln!(f, "Launched move with ID: {}", mv.id)?;
                writeln!(f)?;
                write!(f, "{mv}")
            }
            Self::Blocked { report } => {
                writeln!(f, "Move not launched. Fix the failing checks and try again.")?;
                writeln!(f)?;
                write!(f, "{report}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::{civil::date, Timestamp};

    use super::*;
    use crate::models::{MoveStatus, RunMode, Tracking};

    fn create_test_move() -> Move {
        Move {
            id: 5,
            name: "Smoke test".to_string(),
            problem_type: "validate-demand".to_string(),
            framework_id: "paid-smoke-test".to_string(),
            framework_name: "Paid Smoke Test".to_string(),
            campaign_id: None,
            channel: None,
            run_mode: RunMode::Team,
            duration_days: 14,
            checklist_items: vec![],
            tracking: Tracking {
                metric: "Signups".to_string(),
                baseline: None,
                target: None,
                updates: vec![],
            },
            status: MoveStatus::Pending,
            result: None,
            start_date: date(2026, 11, 2),
            created_at: Timestamp::now(),
            updated_at: Timestamp::now(),
        }
    }

    #[test]
    fn test_create_result_display() {
        let update = TrackingUpdate {
            id: 3,
            value: 7.5,
            recorded_at: Timestamp::now(),
        };
        let output = CreateResult::new(update).to_string();
        assert!(output.starts_with("Logged 7.5 (update ID: 3) at "));
    }

    #[test]
    fn test_update_result_without_changes() {
        let output = UpdateResult::new(create_test_move()).to_string();
        assert!(output.starts_with("Updated move with ID: 5\n\n# 5."));
        assert!(!output.contains("Changes made:"));
    }

    #[test]
    fn test_update_result_with_changes() {
        let output = UpdateResult::with_changes(
            create_test_move(),
            vec!["Status: pending → active".to_string()],
        )
        .to_string();
        assert!(output.contains("Changes made:\n- Status: pending → active\n"));
    }

    #[test]
    fn test_delete_result_display() {
        let output = DeleteResult::new(create_test_move()).to_string();
        assert_eq!(
            output,
            "Deleted move 'Smoke test' (ID: 5) with 0 tasks and 0 tracking updates\n"
        );
    }
}
