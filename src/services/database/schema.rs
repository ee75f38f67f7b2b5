use anyhow::{Context, Result};
use rusqlite::Connection;

use super::migrations;

pub fn initialize_schema(conn: &Connection) -> Result<()> {
    create_schedule_items_table(conn)?;
    run_schedule_item_migrations(conn)?;
    create_item_history_table(conn)?;
    create_vacations_table(conn)?;
    Ok(())
}

fn create_schedule_items_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schedule_items (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'planned',
            deadline TEXT,
            user_id TEXT NOT NULL,
            user_name TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )
    .context("Failed to create schedule_items table")?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_schedule_items_user ON schedule_items (user_id)",
        [],
    )
    .context("Failed to create schedule_items user index")?;

    Ok(())
}

/// Items created before date ranges existed only have `deadline`.
fn run_schedule_item_migrations(conn: &Connection) -> Result<()> {
    migrations::ensure_column(
        conn,
        "schedule_items",
        "start_date",
        "ALTER TABLE schedule_items ADD COLUMN start_date TEXT",
    )?;

    migrations::ensure_column(
        conn,
        "schedule_items",
        "end_date",
        "ALTER TABLE schedule_items ADD COLUMN end_date TEXT",
    )?;

    migrations::ensure_column(
        conn,
        "schedule_items",
        "updated_at",
        "ALTER TABLE schedule_items ADD COLUMN updated_at TEXT",
    )?;

    Ok(())
}

fn create_item_history_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS item_history (
            seq INTEGER PRIMARY KEY AUTOINCREMENT,
            item_id TEXT NOT NULL REFERENCES schedule_items(id) ON DELETE CASCADE,
            field TEXT NOT NULL,
            old_value TEXT NOT NULL,
            new_value TEXT NOT NULL,
            actor TEXT NOT NULL,
            changed_at TEXT NOT NULL
        )",
        [],
    )
    .context("Failed to create item_history table")?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_item_history_item ON item_history (item_id, seq)",
        [],
    )
    .context("Failed to create item_history index")?;

    Ok(())
}

fn create_vacations_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS vacations (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            user_name TEXT NOT NULL DEFAULT '',
            start_date TEXT NOT NULL,
            end_date TEXT NOT NULL,
            kind TEXT NOT NULL DEFAULT 'annual',
            reason TEXT
        )",
        [],
    )
    .context("Failed to create vacations table")?;

    Ok(())
}
