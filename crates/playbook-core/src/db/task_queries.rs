//! Checklist item queries.

use jiff::Timestamp;
use rusqlite::params;

use crate::{
    error::{DatabaseResultExt, PlaybookError, Result},
    models::{ChecklistItem, Proof},
};

const SELECT_ITEMS_BY_MOVE_SQL: &str = "SELECT id, text, done, day, duration_minutes, proof_url, proof_note, position FROM checklist_items WHERE move_id = ?1 ORDER BY position, id";
const UPDATE_ITEM_SQL: &str = "UPDATE checklist_items SET done = ?1, day = ?2, proof_url = ?3, proof_note = ?4 WHERE id = ?5 AND move_id = ?6";
const TOUCH_MOVE_SQL: &str = "UPDATE moves SET updated_at = ?1 WHERE id = ?2";

impl super::Database {
    fn build_item_from_row(row: &rusqlite::Row) -> rusqlite::Result<ChecklistItem> {
        let proof_url: Option<String> = row.get(5)?;
        let proof_note: Option<String> = row.get(6)?;
        let proof = (proof_url.is_some() || proof_note.is_some()).then_some(Proof {
            url: proof_url,
            note: proof_note,
        });

        Ok(ChecklistItem {
            id: row.get::<_, i64>(0)? as u64,
            text: row.get(1)?,
            done: row.get(2)?,
            day: row.get::<_, i64>(3)? as u32,
            duration_minutes: row.get::<_, Option<i64>>(4)?.map(|m| m as u32),
            proof,
            position: row.get::<_, i64>(7)? as u32,
        })
    }

    /// Retrieves a move's checklist in generation order.
    pub(super) fn select_checklist_items(&self, move_id: u64) -> Result<Vec<ChecklistItem>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_ITEMS_BY_MOVE_SQL)
            .db_context("Failed to prepare query")?;

        let items = stmt
            .query_map(params![move_id as i64], Self::build_item_from_row)
            .db_context("Failed to query checklist items")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch checklist items")?;

        Ok(items)
    }

    /// Overwrites the mutable fields of a checklist item and touches the
    /// move's `updated_at`.
    pub(super) fn write_task(&mut self, move_id: u64, task: &ChecklistItem) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let proof = task.proof.as_ref();
        let changed = tx
            .execute(
                UPDATE_ITEM_SQL,
                params![
                    task.done,
                    task.day as i64,
                    proof.and_then(|p| p.url.as_deref()),
                    proof.and_then(|p| p.note.as_deref()),
                    task.id as i64,
                    move_id as i64
                ],
            )
            .map_err(|e| Self::write_error(move_id, "Failed to update checklist item", e))?;

        if changed == 0 {
            return Err(PlaybookError::TaskNotFound {
                move_id,
                task_id: task.id,
            });
        }

        tx.execute(
            TOUCH_MOVE_SQL,
            params![Timestamp::now().to_string(), move_id as i64],
        )
        .map_err(|e| Self::write_error(move_id, "Failed to update move timestamp", e))?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(())
    }
}
