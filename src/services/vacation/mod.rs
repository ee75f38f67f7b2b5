// Vacation service module
// Leave records owned by each user

use anyhow::{anyhow, Context, Result};
use rusqlite::types::Type;
use rusqlite::{self, params, Connection, Row};

use crate::models::vacation::{Vacation, VacationKind};

pub struct VacationService<'a> {
    conn: &'a Connection,
}

impl<'a> VacationService<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn create(&self, vacation: Vacation) -> Result<Vacation> {
        vacation.validate().map_err(|e| anyhow!(e))?;

        self.conn
            .execute(
                "INSERT INTO vacations (id, user_id, user_name, start_date, end_date, kind, reason)
                 VALUES (?, ?, ?, ?, ?, ?, ?)",
                params![
                    vacation.id,
                    vacation.user_id,
                    vacation.user_name,
                    vacation.start,
                    vacation.end,
                    vacation.kind.as_str(),
                    vacation.reason,
                ],
            )
            .with_context(|| format!("Failed to insert vacation {}", vacation.id))?;

        Ok(vacation)
    }

    pub fn list_for_user(&self, user_id: &str) -> Result<Vec<Vacation>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, user_name, start_date, end_date, kind, reason
             FROM vacations
             WHERE user_id = ?
             ORDER BY start_date ASC, id ASC",
        )?;

        let vacations = stmt
            .query_map([user_id], map_vacation_row)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .with_context(|| format!("Failed to list vacations for user {}", user_id))?;

        Ok(vacations)
    }

    pub fn delete(&self, id: &str) -> Result<bool> {
        let rows = self
            .conn
            .execute("DELETE FROM vacations WHERE id = ?", [id])
            .with_context(|| format!("Failed to delete vacation {}", id))?;
        Ok(rows > 0)
    }
}

fn map_vacation_row(row: &Row<'_>) -> Result<Vacation, rusqlite::Error> {
    let kind = row
        .get::<_, String>(5)?
        .parse::<VacationKind>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(5, Type::Text, e.into()))?;

    Ok(Vacation {
        id: row.get(0)?,
        user_id: row.get(1)?,
        user_name: row.get(2)?,
        start: row.get(3)?,
        end: row.get(4)?,
        kind,
        reason: row.get(6)?,
    })
}
