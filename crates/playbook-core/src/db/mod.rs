//! SQLite persistence for moves, checklist items and tracking updates.
//!
//! This module provides the [`Database`] handle implementing
//! [`MoveStore`](crate::store::MoveStore). The schema is embedded and applied
//! on open; triggers keep completed moves and recorded observations
//! immutable even when a stale session writes.

use std::path::Path;

use jiff::Timestamp;
use rusqlite::Connection;

use crate::{
    error::{DatabaseResultExt, PlaybookError, Result},
    models::{ChecklistItem, Move, MoveFilter, MoveResult, MoveStatus, NewMove, TrackingUpdate},
    store::MoveStore,
};

pub mod migrations;
pub mod move_queries;
pub mod task_queries;
pub mod tracking_queries;

/// Message raised by the schema triggers guarding completed moves.
const COMPLETED_TRIGGER_MESSAGE: &str = "move is completed";

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Map a write failure, recognising the completed-move triggers.
    fn write_error(move_id: u64, message: &str, error: rusqlite::Error) -> PlaybookError {
        match &error {
            rusqlite::Error::SqliteFailure(_, Some(reason))
                if reason.contains(COMPLETED_TRIGGER_MESSAGE) =>
            {
                PlaybookError::MoveCompleted { id: move_id }
            }
            _ => PlaybookError::database(message).with_source(error),
        }
    }
}

impl MoveStore for Database {
    fn create_move(&mut self, new_move: &NewMove) -> Result<Move> {
        log::debug!("store: create move '{}'", new_move.name);
        self.insert_move(new_move)
    }

    fn get_move(&self, id: u64) -> Result<Option<Move>> {
        log::debug!("store: get move {id}");
        self.select_move(id)
    }

    fn list_moves(&self, filter: &MoveFilter) -> Result<Vec<Move>> {
        log::debug!("store: list moves {filter:?}");
        self.select_moves(filter)
    }

    fn update_task(&mut self, move_id: u64, task: &ChecklistItem) -> Result<()> {
        log::debug!("store: update task {} of move {move_id}", task.id);
        self.write_task(move_id, task)
    }

    fn append_tracking_update(
        &mut self,
        move_id: u64,
        value: f64,
        recorded_at: Timestamp,
    ) -> Result<TrackingUpdate> {
        log::debug!("store: append tracking update {value} to move {move_id}");
        self.insert_tracking_update(move_id, value, recorded_at)
    }

    fn transition_status(
        &mut self,
        move_id: u64,
        from: MoveStatus,
        to: MoveStatus,
    ) -> Result<bool> {
        log::debug!("store: move {move_id} status {from} -> {to}");
        self.compare_and_set_status(move_id, from, to)
    }

    fn complete_move(
        &mut self,
        move_id: u64,
        from: MoveStatus,
        result: &MoveResult,
    ) -> Result<bool> {
        log::debug!("store: complete move {move_id} from {from}");
        self.compare_and_complete(move_id, from, result)
    }

    fn set_campaign(&mut self, move_id: u64, campaign_id: Option<u64>) -> Result<()> {
        log::debug!("store: move {move_id} campaign {campaign_id:?}");
        self.write_campaign(move_id, campaign_id)
    }

    fn delete_move(&mut self, id: u64) -> Result<bool> {
        log::debug!("store: delete move {id}");
        self.remove_move(id)
    }
}
