//! Schedule item service entry point.
//! Database-backed item storage and the append-only history table,
//! organized across focused submodules.

use anyhow::{anyhow, Context, Result};
use rusqlite::{params, Connection};

use crate::schedule::ItemUpdate;

pub mod crud;
pub mod queries;
mod shared;

/// Service for managing schedule items stored in SQLite.
pub struct ItemService<'a> {
    pub(crate) conn: &'a Connection,
}

impl<'a> ItemService<'a> {
    /// Create a new ItemService with a database connection
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Write new dates and append history in one transaction.
    ///
    /// Fails when the item no longer exists; nothing is written in that case.
    pub fn apply_update(&self, item_id: &str, update: &ItemUpdate) -> Result<()> {
        let tx = self
            .conn
            .unchecked_transaction()
            .context("Failed to start update transaction")?;

        let rows = tx
            .execute(
                "UPDATE schedule_items
                 SET start_date = ?, end_date = ?, updated_at = ?
                 WHERE id = ?",
                params![
                    update.start,
                    update.end,
                    update.updated_at.to_rfc3339(),
                    item_id
                ],
            )
            .with_context(|| format!("Failed to update dates for item {}", item_id))?;

        if rows == 0 {
            return Err(anyhow!("Item {} no longer exists", item_id));
        }

        shared::append_history(&tx, item_id, &update.history_append)
            .with_context(|| format!("Failed to append history for item {}", item_id))?;

        tx.commit().context("Failed to commit item update")?;
        Ok(())
    }
}
