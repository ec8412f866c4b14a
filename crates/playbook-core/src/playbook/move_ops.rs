//! Runtime operations on launched moves.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{load, Playbook};
use crate::{
    display::MoveSummaries,
    error::{PlaybookError, Result},
    models::{ChecklistItem, Move, MoveFilter, MoveStatus, MoveSummary, Proof, TrackingUpdate},
    params::{
        AttachProof, CampaignLink, CompleteMove, DeleteMove, Id, ListMoves, LogTracking,
        SetStatus, SetTaskDay, TaskRef, TasksForDay,
    },
    store::MoveStore,
};

/// The tasks scheduled on one day of a move.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayTasks {
    pub move_id: u64,
    pub move_name: String,
    pub day: u32,
    pub duration_days: u32,
    pub tasks: Vec<ChecklistItem>,
}

impl<S: MoveStore> Playbook<S> {
    /// Gets a move with all its tasks and tracking updates.
    ///
    /// Returns `Ok(None)` if the move does not exist.
    pub async fn get_move(&self, params: &Id) -> Result<Option<Move>> {
        let id = params.id;
        self.run_blocking(move |store| store.get_move(id)).await
    }

    /// Lists moves as summaries evaluated on today's date.
    ///
    /// Completed moves are hidden unless `all` is set or a status filter is
    /// given.
    pub async fn list_moves_summary(&self, params: &ListMoves) -> Result<MoveSummaries> {
        let filter = MoveFilter::from(params);
        let today = self.today();
        let moves = self
            .run_blocking(move |store| store.list_moves(&filter))
            .await?;

        Ok(MoveSummaries(
            moves.iter().map(|mv| MoveSummary::on(mv, today)).collect(),
        ))
    }

    /// Flips a task between done and not done.
    ///
    /// # Errors
    ///
    /// `MoveNotFound`, `TaskNotFound`, or `MoveCompleted` once the move is
    /// closed.
    pub async fn toggle_task_done(&self, params: &TaskRef) -> Result<ChecklistItem> {
        let (move_id, task_id) = (params.move_id, params.task_id);
        self.run_blocking(move |store| {
            let mut mv = load(store, move_id)?;
            let task = mv.toggle_task(task_id)?.clone();
            store.update_task(move_id, &task)?;
            Ok(task)
        })
        .await
    }

    /// Reschedules a task to another day within the move's duration.
    pub async fn set_task_day(&self, params: &SetTaskDay) -> Result<ChecklistItem> {
        let (move_id, task_id, day) = (params.move_id, params.task_id, params.day);
        self.run_blocking(move |store| {
            let mut mv = load(store, move_id)?;
            let task = mv.set_task_day(task_id, day)?.clone();
            store.update_task(move_id, &task)?;
            Ok(task)
        })
        .await
    }

    /// Attaches a proof link and/or note to a task, replacing earlier proof.
    pub async fn attach_proof_to_task(&self, params: &AttachProof) -> Result<ChecklistItem> {
        let (move_id, task_id) = (params.move_id, params.task_id);
        let proof = Proof {
            url: clean(params.url.as_deref()),
            note: clean(params.note.as_deref()),
        };
        self.run_blocking(move |store| {
            let mut mv = load(store, move_id)?;
            let task = mv.attach_proof(task_id, proof)?.clone();
            store.update_task(move_id, &task)?;
            Ok(task)
        })
        .await
    }

    /// Appends an observation of the primary KPI, stamped now.
    pub async fn add_tracking_update(&self, params: &LogTracking) -> Result<TrackingUpdate> {
        let (move_id, value) = (params.move_id, params.value);
        let update = self
            .run_blocking(move |store| {
                let mv = load(store, move_id)?;
                let recorded_at = Timestamp::now();
                mv.validate_observation(value, recorded_at)?;
                store.append_tracking_update(move_id, value, recorded_at)
            })
            .await?;
        log::info!("Logged {value} for move {move_id}");
        Ok(update)
    }

    /// Changes the lifecycle status along the transition table.
    ///
    /// Completion is not reachable here; use [`Playbook::complete_move`].
    ///
    /// # Errors
    ///
    /// `InvalidTransition` for a move off the table (including when another
    /// writer changed the status in between), `MoveCompleted` for a closed
    /// move.
    pub async fn update_status(&self, params: &SetStatus) -> Result<Move> {
        let (id, to) = (params.id, params.status);
        let mv = self
            .run_blocking(move |store| {
                let mut mv = load(store, id)?;
                let from = mv.transition_to(to)?;
                if !store.transition_status(id, from, to)? {
                    return Err(lost_race(store, id, to));
                }
                load(store, id)
            })
            .await?;
        log::info!("Move {id} is now {}", mv.status);
        Ok(mv)
    }

    /// Closes a move with an outcome and optional learning. The move is
    /// read-only afterwards.
    pub async fn complete_move(&self, params: &CompleteMove) -> Result<Move> {
        let (id, outcome, learning) = (params.id, params.outcome, params.learning.clone());
        let mv = self
            .run_blocking(move |store| {
                let mut mv = load(store, id)?;
                let from = mv.complete(outcome, learning)?;
                let Some(result) = mv.result.as_ref() else {
                    return Err(PlaybookError::Configuration {
                        message: format!("Move {id} completed without a result"),
                    });
                };
                if !store.complete_move(id, from, result)? {
                    return Err(lost_race(store, id, MoveStatus::Completed));
                }
                load(store, id)
            })
            .await?;
        log::info!("Move {id} completed: {outcome}");
        Ok(mv)
    }

    /// Current day number of a move (1-based, clamped to its duration).
    pub async fn move_day_number(&self, params: &Id) -> Result<u32> {
        let id = params.id;
        let today = self.today();
        let mv = self.run_blocking(move |store| load(store, id)).await?;
        Ok(mv.day_number_on(today))
    }

    /// Tasks scheduled on a given day, defaulting to the move's current day.
    pub async fn move_tasks_for_day(&self, params: &TasksForDay) -> Result<DayTasks> {
        let id = params.id;
        let today = self.today();
        let mv = self.run_blocking(move |store| load(store, id)).await?;

        let day = params.day.unwrap_or_else(|| mv.day_number_on(today));
        if !(1..=mv.duration_days).contains(&day) {
            return Err(PlaybookError::invalid_input("day")
                .with_reason(format!("must be between 1 and {}", mv.duration_days)));
        }

        Ok(DayTasks {
            move_id: mv.id,
            move_name: mv.name.clone(),
            day,
            duration_days: mv.duration_days,
            tasks: mv.tasks_for_day(day).into_iter().cloned().collect(),
        })
    }

    /// Links a move to an external campaign.
    pub async fn attach_move_to_campaign(&self, params: &CampaignLink) -> Result<Move> {
        self.link_campaign(params.id, Some(params.campaign_id))
            .await
    }

    /// Removes a move's campaign link.
    pub async fn detach_move_from_campaign(&self, params: &Id) -> Result<Move> {
        self.link_campaign(params.id, None).await
    }

    /// Permanently deletes a move with its tasks and tracking log.
    ///
    /// Returns the deleted move.
    ///
    /// # Errors
    ///
    /// `InvalidInput` unless `confirmed` is set, `MoveNotFound` if the move
    /// does not exist.
    pub async fn delete_move(&self, params: &DeleteMove) -> Result<Move> {
        if !params.confirmed {
            return Err(PlaybookError::invalid_input("confirmed")
                .with_reason("deletion must be explicitly confirmed"));
        }

        let id = params.id;
        let mv = self
            .run_blocking(move |store| {
                let mv = load(store, id)?;
                if !store.delete_move(id)? {
                    return Err(PlaybookError::MoveNotFound { id });
                }
                Ok(mv)
            })
            .await?;
        log::info!("Deleted move {id} ({})", mv.name);
        Ok(mv)
    }

    async fn link_campaign(&self, id: u64, campaign_id: Option<u64>) -> Result<Move> {
        self.run_blocking(move |store| {
            let mut mv = load(store, id)?;
            mv.set_campaign(campaign_id)?;
            store.set_campaign(id, campaign_id)?;
            load(store, id)
        })
        .await
    }
}

/// Error for a compare-and-set that found a different status than the one
/// validated against.
fn lost_race<S: MoveStore>(store: &S, id: u64, to: MoveStatus) -> PlaybookError {
    match store.get_move(id) {
        Ok(Some(current)) if current.status.is_terminal() => PlaybookError::MoveCompleted { id },
        Ok(Some(current)) => PlaybookError::InvalidTransition {
            from: current.status,
            to,
        },
        Ok(None) => PlaybookError::MoveNotFound { id },
        Err(e) => e,
    }
}

fn clean(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
