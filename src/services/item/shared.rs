use std::str::FromStr;

use chrono::{DateTime, Local};
use rusqlite::types::Type;
use rusqlite::{self, params, Connection, Result};

use crate::models::history::{AuditLog, HistoryEntry};

pub(crate) fn to_local_datetime(idx: usize, value: String) -> Result<DateTime<Local>> {
    DateTime::parse_from_rfc3339(&value)
        .map(|dt| dt.with_timezone(&Local))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Parses a text column through the type's `FromStr` impl.
pub(crate) fn parse_column<T>(idx: usize, value: String) -> Result<T>
where
    T: FromStr<Err = String>,
{
    value
        .parse::<T>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, e.into()))
}

/// Stored history for one item, oldest first.
pub(crate) fn load_history(conn: &Connection, item_id: &str) -> Result<AuditLog> {
    let mut stmt = conn.prepare(
        "SELECT field, old_value, new_value, actor, changed_at
         FROM item_history
         WHERE item_id = ?
         ORDER BY seq ASC",
    )?;

    let entries = stmt
        .query_map([item_id], |row| {
            Ok(HistoryEntry {
                field: row.get(0)?,
                old_value: row.get(1)?,
                new_value: row.get(2)?,
                actor: row.get(3)?,
                changed_at: to_local_datetime(4, row.get(4)?)?,
            })
        })?
        .collect::<Result<AuditLog>>()?;

    Ok(entries)
}

/// Appends entries after whatever is already stored for the item.
pub(crate) fn append_history(
    conn: &Connection,
    item_id: &str,
    entries: &[HistoryEntry],
) -> Result<()> {
    if entries.is_empty() {
        return Ok(());
    }

    let mut stmt = conn.prepare(
        "INSERT INTO item_history (item_id, field, old_value, new_value, actor, changed_at)
         VALUES (?, ?, ?, ?, ?, ?)",
    )?;

    for entry in entries {
        stmt.execute(params![
            item_id,
            entry.field,
            entry.old_value,
            entry.new_value,
            entry.actor,
            entry.changed_at.to_rfc3339(),
        ])?;
    }

    Ok(())
}
