//! Move CRUD operations and queries.

use jiff::{civil::Date, Timestamp};
use rusqlite::{params, params_from_iter, types::Type, OptionalExtension};

use crate::{
    error::{DatabaseResultExt, PlaybookError, Result},
    models::{
        ChecklistItem, Move, MoveFilter, MoveResult, MoveStatus, NewMove, Outcome, RunMode,
        Tracking,
    },
};

const INSERT_MOVE_SQL: &str = "INSERT INTO moves (name, problem_type, framework_id, framework_name, campaign_id, channel, run_mode, duration_days, metric, baseline, target, status, start_date, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)";
const INSERT_CHECKLIST_ITEM_SQL: &str = "INSERT INTO checklist_items (move_id, text, done, day, duration_minutes, position) VALUES (?1, ?2, 0, ?3, ?4, ?5)";
const MOVE_COLUMNS: &str = "id, name, problem_type, framework_id, framework_name, campaign_id, channel, run_mode, duration_days, metric, baseline, target, status, outcome, learning, start_date, created_at, updated_at";
const UPDATE_STATUS_CAS_SQL: &str =
    "UPDATE moves SET status = ?1, updated_at = ?2 WHERE id = ?3 AND status = ?4";
const COMPLETE_MOVE_CAS_SQL: &str = "UPDATE moves SET status = 'completed', outcome = ?1, learning = ?2, updated_at = ?3 WHERE id = ?4 AND status = ?5";
const UPDATE_CAMPAIGN_SQL: &str = "UPDATE moves SET campaign_id = ?1, updated_at = ?2 WHERE id = ?3";
const DELETE_MOVE_SQL: &str = "DELETE FROM moves WHERE id = ?1";

fn conversion_error(column: usize, message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(column, Type::Text, message.into())
}

fn parse_timestamp(row: &rusqlite::Row, column: usize) -> rusqlite::Result<Timestamp> {
    row.get::<_, String>(column)?
        .parse::<Timestamp>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(e)))
}

impl super::Database {
    /// Construct a move without its checklist and tracking log from a row
    /// selected with `MOVE_COLUMNS`.
    fn build_move_from_row(row: &rusqlite::Row) -> rusqlite::Result<Move> {
        let run_mode_str: String = row.get(7)?;
        let run_mode = run_mode_str
            .parse::<RunMode>()
            .map_err(|e| conversion_error(7, e))?;

        let status_str: String = row.get(12)?;
        let status = status_str
            .parse::<MoveStatus>()
            .map_err(|e| conversion_error(12, e))?;

        let outcome: Option<String> = row.get(13)?;
        let result = outcome
            .map(|o| o.parse::<Outcome>().map_err(|e| conversion_error(13, e)))
            .transpose()?
            .map(|outcome| -> rusqlite::Result<MoveResult> {
                Ok(MoveResult {
                    outcome,
                    learning: row.get(14)?,
                })
            })
            .transpose()?;

        let start_date = row
            .get::<_, String>(15)?
            .parse::<Date>()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(15, Type::Text, Box::new(e)))?;

        Ok(Move {
            id: row.get::<_, i64>(0)? as u64,
            name: row.get(1)?,
            problem_type: row.get(2)?,
            framework_id: row.get(3)?,
            framework_name: row.get(4)?,
            campaign_id: row.get::<_, Option<i64>>(5)?.map(|id| id as u64),
            channel: row.get(6)?,
            run_mode,
            duration_days: row.get::<_, i64>(8)? as u32,
            checklist_items: Vec::new(),
            tracking: Tracking {
                metric: row.get(9)?,
                baseline: row.get(10)?,
                target: row.get(11)?,
                updates: Vec::new(),
            },
            status,
            result,
            start_date,
            created_at: parse_timestamp(row, 16)?,
            updated_at: parse_timestamp(row, 17)?,
        })
    }

    /// Inserts a move and its checklist in one transaction.
    pub(super) fn insert_move(&mut self, new_move: &NewMove) -> Result<Move> {
        if let Some(item) = new_move
            .checklist_items
            .iter()
            .find(|i| i.day == 0 || i.day > new_move.duration_days)
        {
            return Err(PlaybookError::invalid_input("day").with_reason(format!(
                "task '{}' is scheduled outside 1..={}",
                item.text, new_move.duration_days
            )));
        }

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now();
        let now_str = now.to_string();

        tx.execute(
            INSERT_MOVE_SQL,
            params![
                &new_move.name,
                &new_move.problem_type,
                &new_move.framework_id,
                &new_move.framework_name,
                new_move.campaign_id.map(|id| id as i64),
                new_move.channel.as_deref(),
                new_move.run_mode.as_str(),
                new_move.duration_days as i64,
                &new_move.metric,
                new_move.baseline,
                new_move.target,
                new_move.status.as_str(),
                new_move.start_date.to_string(),
                &now_str,
                &now_str
            ],
        )
        .db_context("Failed to insert move")?;

        let id = tx.last_insert_rowid() as u64;

        let mut checklist_items = Vec::with_capacity(new_move.checklist_items.len());
        {
            let mut stmt = tx
                .prepare(INSERT_CHECKLIST_ITEM_SQL)
                .db_context("Failed to prepare checklist insert")?;
            for item in &new_move.checklist_items {
                stmt.execute(params![
                    id as i64,
                    &item.text,
                    item.day as i64,
                    item.duration_minutes.map(i64::from),
                    item.position as i64
                ])
                .db_context("Failed to insert checklist item")?;

                checklist_items.push(ChecklistItem {
                    id: tx.last_insert_rowid() as u64,
                    text: item.text.clone(),
                    done: false,
                    day: item.day,
                    duration_minutes: item.duration_minutes,
                    proof: None,
                    position: item.position,
                });
            }
        }

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Move {
            id,
            name: new_move.name.clone(),
            problem_type: new_move.problem_type.clone(),
            framework_id: new_move.framework_id.clone(),
            framework_name: new_move.framework_name.clone(),
            campaign_id: new_move.campaign_id,
            channel: new_move.channel.clone(),
            run_mode: new_move.run_mode,
            duration_days: new_move.duration_days,
            checklist_items,
            tracking: Tracking {
                metric: new_move.metric.clone(),
                baseline: new_move.baseline,
                target: new_move.target,
                updates: Vec::new(),
            },
            status: new_move.status,
            result: None,
            start_date: new_move.start_date,
            created_at: now,
            updated_at: now,
        })
    }

    /// Retrieves a move with its checklist and tracking log.
    pub(super) fn select_move(&self, id: u64) -> Result<Option<Move>> {
        let sql = format!("SELECT {MOVE_COLUMNS} FROM moves WHERE id = ?1");
        let mut stmt = self
            .connection
            .prepare(&sql)
            .db_context("Failed to prepare query")?;

        let mv = stmt
            .query_row(params![id as i64], Self::build_move_from_row)
            .optional()
            .db_context("Failed to get move")?;

        mv.map(|mv| self.hydrate(mv)).transpose()
    }

    /// Lists moves matching the filter, newest first.
    pub(super) fn select_moves(&self, filter: &MoveFilter) -> Result<Vec<Move>> {
        let mut conditions = Vec::new();
        let mut values: Vec<String> = Vec::new();

        if let Some(status) = filter.status {
            values.push(status.as_str().to_string());
            conditions.push(format!("status = ?{}", values.len()));
        }
        if let Some(campaign_id) = filter.campaign_id {
            values.push(campaign_id.to_string());
            conditions.push(format!("campaign_id = CAST(?{} AS INTEGER)", values.len()));
        }
        if filter.exclude_completed {
            conditions.push("status <> 'completed'".to_string());
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };
        let sql = format!("SELECT {MOVE_COLUMNS} FROM moves{where_clause} ORDER BY id DESC");

        let mut stmt = self
            .connection
            .prepare(&sql)
            .db_context("Failed to prepare query")?;

        let moves = stmt
            .query_map(params_from_iter(values.iter()), Self::build_move_from_row)
            .db_context("Failed to query moves")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch moves")?;

        moves.into_iter().map(|mv| self.hydrate(mv)).collect()
    }

    fn hydrate(&self, mut mv: Move) -> Result<Move> {
        mv.checklist_items = self.select_checklist_items(mv.id)?;
        mv.tracking.updates = self.select_tracking_updates(mv.id)?;
        Ok(mv)
    }

    /// Sets a new status if the stored one is still `from`.
    pub(super) fn compare_and_set_status(
        &mut self,
        move_id: u64,
        from: MoveStatus,
        to: MoveStatus,
    ) -> Result<bool> {
        let changed = self
            .connection
            .execute(
                UPDATE_STATUS_CAS_SQL,
                params![
                    to.as_str(),
                    Timestamp::now().to_string(),
                    move_id as i64,
                    from.as_str()
                ],
            )
            .map_err(|e| Self::write_error(move_id, "Failed to update move status", e))?;

        Ok(changed > 0)
    }

    /// Records the result and completes the move if the stored status is
    /// still `from`.
    pub(super) fn compare_and_complete(
        &mut self,
        move_id: u64,
        from: MoveStatus,
        result: &MoveResult,
    ) -> Result<bool> {
        let changed = self
            .connection
            .execute(
                COMPLETE_MOVE_CAS_SQL,
                params![
                    result.outcome.as_str(),
                    result.learning.as_deref(),
                    Timestamp::now().to_string(),
                    move_id as i64,
                    from.as_str()
                ],
            )
            .map_err(|e| Self::write_error(move_id, "Failed to complete move", e))?;

        Ok(changed > 0)
    }

    pub(super) fn write_campaign(&mut self, move_id: u64, campaign_id: Option<u64>) -> Result<()> {
        let changed = self
            .connection
            .execute(
                UPDATE_CAMPAIGN_SQL,
                params![
                    campaign_id.map(|id| id as i64),
                    Timestamp::now().to_string(),
                    move_id as i64
                ],
            )
            .map_err(|e| Self::write_error(move_id, "Failed to update campaign link", e))?;

        if changed == 0 {
            return Err(PlaybookError::MoveNotFound { id: move_id });
        }
        Ok(())
    }

    /// Deletes a move; tasks and tracking updates cascade.
    pub(super) fn remove_move(&mut self, id: u64) -> Result<bool> {
        let changed = self
            .connection
            .execute(DELETE_MOVE_SQL, params![id as i64])
            .db_context("Failed to delete move")?;

        Ok(changed > 0)
    }
}
