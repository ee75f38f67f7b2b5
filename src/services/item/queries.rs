use super::shared::{load_history, parse_column, to_local_datetime};
use super::ItemService;
use crate::models::history::AuditLog;
use crate::models::schedule_item::ScheduleItem;
use anyhow::{Context, Result};
use rusqlite::{self, OptionalExtension, Row};

const ITEM_COLUMNS: &str = "id, name, status, start_date, end_date, deadline,
                            user_id, user_name, updated_at";

impl<'a> ItemService<'a> {
    /// Every item owned by `user_id`, each with its full history.
    pub fn list_for_user(&self, user_id: &str) -> Result<Vec<ScheduleItem>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM schedule_items
             WHERE user_id = ?
             ORDER BY COALESCE(start_date, end_date, deadline) ASC, id ASC",
            ITEM_COLUMNS
        ))?;

        let mut items = stmt
            .query_map([user_id], map_item_row)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .with_context(|| format!("Failed to list items for user {}", user_id))?;

        for item in &mut items {
            item.history = load_history(self.conn, &item.id)?;
        }

        Ok(items)
    }

    pub(crate) fn find_row(&self, id: &str) -> Result<Option<ScheduleItem>> {
        let item = self
            .conn
            .query_row(
                &format!("SELECT {} FROM schedule_items WHERE id = ?", ITEM_COLUMNS),
                [id],
                map_item_row,
            )
            .optional()
            .with_context(|| format!("Failed to read item {}", id))?;
        Ok(item)
    }
}

fn map_item_row(row: &Row<'_>) -> Result<ScheduleItem, rusqlite::Error> {
    let updated_at = row
        .get::<_, Option<String>>(8)?
        .map(|value| to_local_datetime(8, value))
        .transpose()?;

    Ok(ScheduleItem {
        id: row.get(0)?,
        name: row.get(1)?,
        status: parse_column(2, row.get(2)?)?,
        start: row.get(3)?,
        end: row.get(4)?,
        deadline: row.get(5)?,
        user_id: row.get(6)?,
        user_name: row.get(7)?,
        history: AuditLog::new(),
        updated_at,
    })
}
