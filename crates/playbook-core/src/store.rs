//! The persistence seam of the move runtime.

use jiff::Timestamp;

use crate::{
    error::Result,
    models::{ChecklistItem, Move, MoveFilter, MoveResult, MoveStatus, NewMove, TrackingUpdate},
};

/// Storage for launched moves.
///
/// Status writes are compare-and-set: they only apply while the stored
/// status still equals `from` and report whether they did. Task writes are
/// last-writer-wins. [`crate::db::Database`] is the SQLite implementation.
pub trait MoveStore: Send + 'static {
    /// Persist a new move with its checklist; ids are assigned here.
    fn create_move(&mut self, new_move: &NewMove) -> Result<Move>;

    fn get_move(&self, id: u64) -> Result<Option<Move>>;

    /// Moves matching the filter, newest first.
    fn list_moves(&self, filter: &MoveFilter) -> Result<Vec<Move>>;

    /// Overwrite a task's done flag, day and proof.
    fn update_task(&mut self, move_id: u64, task: &ChecklistItem) -> Result<()>;

    fn append_tracking_update(
        &mut self,
        move_id: u64,
        value: f64,
        recorded_at: Timestamp,
    ) -> Result<TrackingUpdate>;

    /// Set `to` if the stored status is still `from`.
    fn transition_status(&mut self, move_id: u64, from: MoveStatus, to: MoveStatus)
        -> Result<bool>;

    /// Record the result and mark the move completed if the stored status is
    /// still `from`.
    fn complete_move(&mut self, move_id: u64, from: MoveStatus, result: &MoveResult)
        -> Result<bool>;

    fn set_campaign(&mut self, move_id: u64, campaign_id: Option<u64>) -> Result<()>;

    /// Remove a move with its tasks and tracking log. Returns false if it
    /// did not exist.
    fn delete_move(&mut self, id: u64) -> Result<bool>;
}
