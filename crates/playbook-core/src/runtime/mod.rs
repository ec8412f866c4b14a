//! Lifecycle rules for launched moves.
//!
//! Everything here is a pure method on [`Move`]: derived views (day number,
//! progress, health, tasks per day) and validated in-memory mutations. The
//! service layer loads a move, applies one of these, and persists the part
//! that changed through the store.
//!
//! Once a move is completed every mutation fails with
//! [`PlaybookError::MoveCompleted`].

use std::collections::BTreeMap;

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};

use crate::{
    error::{PlaybookError, Result},
    models::{ChecklistItem, Move, MoveHealth, MoveResult, MoveStatus, Outcome, Proof},
};

#[cfg(test)]
mod tests;

/// How far behind the calendar a move may fall before it is off track.
const AT_RISK_MARGIN: f64 = 0.2;

/// Task completion counts of a move.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Progress {
    pub completed: u32,
    pub total: u32,
}

impl Progress {
    /// Completed share in `[0, 1]`; 0 for a move without tasks.
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            f64::from(self.completed) / f64::from(self.total)
        }
    }

    pub fn percent(&self) -> u8 {
        (self.ratio() * 100.0).round() as u8
    }
}

impl Move {
    /// 1-based day of the move on `today`, clamped to `[1, duration_days]`.
    pub fn day_number_on(&self, today: Date) -> u32 {
        let elapsed = self
            .start_date
            .until(today)
            .map_or(0, |span| i64::from(span.get_days()));
        let duration = i64::from(self.duration_days.max(1));
        (elapsed + 1).clamp(1, duration) as u32
    }

    pub fn progress(&self) -> Progress {
        Progress {
            completed: self.checklist_items.iter().filter(|t| t.done).count() as u32,
            total: self.checklist_items.len() as u32,
        }
    }

    /// Task progress measured against the share of days already behind us.
    pub fn health_on(&self, today: Date) -> MoveHealth {
        if self.status == MoveStatus::Completed {
            return MoveHealth::Done;
        }
        if today < self.start_date || self.checklist_items.is_empty() {
            return MoveHealth::OnTrack;
        }

        let elapsed = f64::from(self.day_number_on(today) - 1);
        let expected = elapsed / f64::from(self.duration_days.max(1));
        let behind = expected - self.progress().ratio();

        if behind <= 0.0 {
            MoveHealth::OnTrack
        } else if behind <= AT_RISK_MARGIN {
            MoveHealth::AtRisk
        } else {
            MoveHealth::OffTrack
        }
    }

    /// Tasks scheduled on `day`, in generation order.
    pub fn tasks_for_day(&self, day: u32) -> Vec<&ChecklistItem> {
        self.checklist_items.iter().filter(|t| t.day == day).collect()
    }

    /// Every task grouped by day, days ascending.
    pub fn tasks_by_day(&self) -> BTreeMap<u32, Vec<&ChecklistItem>> {
        let mut days: BTreeMap<u32, Vec<&ChecklistItem>> = BTreeMap::new();
        for task in &self.checklist_items {
            days.entry(task.day).or_default().push(task);
        }
        days
    }

    /// Fails with `MoveCompleted` once the move is closed.
    pub fn ensure_open(&self) -> Result<()> {
        if self.status.is_terminal() {
            Err(PlaybookError::MoveCompleted { id: self.id })
        } else {
            Ok(())
        }
    }

    /// Flip a task's done flag.
    pub fn toggle_task(&mut self, task_id: u64) -> Result<&ChecklistItem> {
        let task = self.open_task_mut(task_id)?;
        task.done = !task.done;
        Ok(task)
    }

    /// Move a task to another day of the move.
    pub fn set_task_day(&mut self, task_id: u64, day: u32) -> Result<&ChecklistItem> {
        let duration = self.duration_days;
        if !(1..=duration).contains(&day) {
            self.ensure_open()?;
            return Err(PlaybookError::invalid_input("day")
                .with_reason(format!("must be between 1 and {duration}")));
        }
        let task = self.open_task_mut(task_id)?;
        task.day = day;
        Ok(task)
    }

    /// Attach proof to a task, replacing any earlier proof. Independent of
    /// the done flag.
    pub fn attach_proof(&mut self, task_id: u64, proof: Proof) -> Result<&ChecklistItem> {
        if proof.is_empty() {
            self.ensure_open()?;
            return Err(PlaybookError::invalid_input("proof").with_reason("needs a url or a note"));
        }
        let task = self.open_task_mut(task_id)?;
        task.proof = Some(proof);
        Ok(task)
    }

    /// Check that an observation may be appended to the tracking log.
    pub fn validate_observation(&self, value: f64, recorded_at: Timestamp) -> Result<()> {
        self.ensure_open()?;
        if !value.is_finite() {
            return Err(PlaybookError::invalid_input("value").with_reason("must be a finite number"));
        }
        if let Some(latest) = self.tracking.latest() {
            if recorded_at < latest.recorded_at {
                return Err(PlaybookError::invalid_input("recorded_at")
                    .with_reason(format!("must not precede the latest update ({})", latest.recorded_at)));
            }
        }
        Ok(())
    }

    /// Move to `target` along the transition table. Returns the previous
    /// status. Completion has its own operation.
    pub fn transition_to(&mut self, target: MoveStatus) -> Result<MoveStatus> {
        self.ensure_open()?;
        let from = self.status;
        if target == MoveStatus::Completed || !from.can_transition_to(target) {
            return Err(PlaybookError::InvalidTransition { from, to: target });
        }
        self.status = target;
        Ok(from)
    }

    /// Close the move with an outcome. Returns the previous status.
    pub fn complete(&mut self, outcome: Outcome, learning: Option<String>) -> Result<MoveStatus> {
        self.ensure_open()?;
        let from = self.status;
        if !from.can_transition_to(MoveStatus::Completed) {
            return Err(PlaybookError::InvalidTransition {
                from,
                to: MoveStatus::Completed,
            });
        }
        self.status = MoveStatus::Completed;
        self.result = Some(MoveResult {
            outcome,
            learning: learning
                .map(|l| l.trim().to_string())
                .filter(|l| !l.is_empty()),
        });
        Ok(from)
    }

    /// Link or unlink a campaign.
    pub fn set_campaign(&mut self, campaign_id: Option<u64>) -> Result<()> {
        self.ensure_open()?;
        self.campaign_id = campaign_id;
        Ok(())
    }

    fn open_task_mut(&mut self, task_id: u64) -> Result<&mut ChecklistItem> {
        self.ensure_open()?;
        let move_id = self.id;
        self.checklist_items
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or(PlaybookError::TaskNotFound { move_id, task_id })
    }
}
