use super::shared::{append_history, load_history};
use super::ItemService;
use crate::models::history::AuditLog;
use crate::models::schedule_item::ScheduleItem;
use crate::models::vacation::VACATION_ID_PREFIX;
use anyhow::{anyhow, Context, Result};
use chrono::Local;
use rusqlite::params;

impl<'a> ItemService<'a> {
    /// Insert a new item together with any history it already carries.
    pub fn create(&self, mut item: ScheduleItem) -> Result<ScheduleItem> {
        item.validate().map_err(|e| anyhow!(e))?;
        if item.is_vacation() {
            return Err(anyhow!(
                "Vacation entries are stored as vacations, not schedule items"
            ));
        }
        if item.id.starts_with(VACATION_ID_PREFIX) {
            return Err(anyhow!(
                "Item id '{}' uses the reserved prefix '{}'",
                item.id,
                VACATION_ID_PREFIX
            ));
        }

        let now = Local::now();
        let tx = self
            .conn
            .unchecked_transaction()
            .context("Failed to start transaction")?;

        tx.execute(
            "INSERT INTO schedule_items (
                id, name, status, start_date, end_date, deadline,
                user_id, user_name, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                item.id,
                item.name,
                item.status.as_str(),
                item.start,
                item.end,
                item.deadline,
                item.user_id,
                item.user_name,
                now.to_rfc3339(),
                now.to_rfc3339(),
            ],
        )
        .with_context(|| format!("Failed to insert item {}", item.id))?;

        append_history(&tx, &item.id, item.history.entries())
            .context("Failed to insert item history")?;
        tx.commit().context("Failed to commit new item")?;

        item.updated_at = Some(now);
        Ok(item)
    }

    /// Retrieve an item and its history by ID.
    pub fn get(&self, id: &str) -> Result<Option<ScheduleItem>> {
        let Some(mut item) = self.find_row(id)? else {
            return Ok(None);
        };
        item.history = load_history(self.conn, id)
            .with_context(|| format!("Failed to load history for item {}", id))?;
        Ok(Some(item))
    }

    /// Delete an item; its history goes with it. Returns whether a row existed.
    pub fn delete(&self, id: &str) -> Result<bool> {
        let rows = self
            .conn
            .execute("DELETE FROM schedule_items WHERE id = ?", [id])
            .with_context(|| format!("Failed to delete item {}", id))?;
        Ok(rows > 0)
    }

    /// Stored history for an item, oldest first.
    pub fn history(&self, id: &str) -> Result<AuditLog> {
        load_history(self.conn, id).with_context(|| format!("Failed to load history for item {}", id))
    }
}
