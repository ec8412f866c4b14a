//! Tracking log queries. Rows are only ever inserted.

use jiff::Timestamp;
use rusqlite::{params, types::Type};

use crate::{
    error::{DatabaseResultExt, PlaybookError, Result},
    models::TrackingUpdate,
};

const CHECK_MOVE_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM moves WHERE id = ?1)";
const INSERT_UPDATE_SQL: &str =
    "INSERT INTO tracking_updates (move_id, value, recorded_at) VALUES (?1, ?2, ?3)";
const SELECT_UPDATES_BY_MOVE_SQL: &str =
    "SELECT id, value, recorded_at FROM tracking_updates WHERE move_id = ?1 ORDER BY id";
const TOUCH_MOVE_SQL: &str = "UPDATE moves SET updated_at = ?1 WHERE id = ?2";

impl super::Database {
    /// Retrieves a move's observations, oldest first.
    pub(super) fn select_tracking_updates(&self, move_id: u64) -> Result<Vec<TrackingUpdate>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_UPDATES_BY_MOVE_SQL)
            .db_context("Failed to prepare query")?;

        let updates = stmt
            .query_map(params![move_id as i64], |row| {
                Ok(TrackingUpdate {
                    id: row.get::<_, i64>(0)? as u64,
                    value: row.get(1)?,
                    recorded_at: row.get::<_, String>(2)?.parse::<Timestamp>().map_err(|e| {
                        rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e))
                    })?,
                })
            })
            .db_context("Failed to query tracking updates")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch tracking updates")?;

        Ok(updates)
    }

    /// Appends one observation to a move's tracking log.
    pub(super) fn insert_tracking_update(
        &mut self,
        move_id: u64,
        value: f64,
        recorded_at: Timestamp,
    ) -> Result<TrackingUpdate> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let move_exists: bool = tx
            .query_row(CHECK_MOVE_EXISTS_SQL, params![move_id as i64], |row| {
                row.get(0)
            })
            .db_context("Failed to check move existence")?;

        if !move_exists {
            return Err(PlaybookError::MoveNotFound { id: move_id });
        }

        tx.execute(
            INSERT_UPDATE_SQL,
            params![move_id as i64, value, recorded_at.to_string()],
        )
        .map_err(|e| Self::write_error(move_id, "Failed to insert tracking update", e))?;

        let id = tx.last_insert_rowid() as u64;

        tx.execute(
            TOUCH_MOVE_SQL,
            params![Timestamp::now().to_string(), move_id as i64],
        )
        .map_err(|e| Self::write_error(move_id, "Failed to update move timestamp", e))?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(TrackingUpdate {
            id,
            value,
            recorded_at,
        })
    }
}
