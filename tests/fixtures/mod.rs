// Test fixtures - reusable test data
// Provides consistent schedules across integration test files

#![allow(dead_code)]

use chrono::{DateTime, Local, NaiveDate, TimeZone};
use week_scheduler::models::schedule_item::ScheduleItem;
use week_scheduler::models::vacation::{Vacation, VacationKind};
use week_scheduler::services::database::Database;

/// Sample dates for testing
pub mod dates {
    use super::*;

    /// Monday Jan 6, 2025: first day of the reference week
    pub fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()
    }

    /// Day `offset` of the reference week (0 = Monday)
    pub fn weekday(offset: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 6 + offset).unwrap()
    }

    /// Wednesday Jan 8, 2025 at 10:30, the "now" of every scenario
    pub fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 1, 8, 10, 30, 0).unwrap()
    }
}

/// Sample schedule items for testing
pub mod items {
    use super::*;

    pub const USER: &str = "u-1";

    /// Item for the default user spanning `start..=end`
    pub fn task(id: &str, start: NaiveDate, end: NaiveDate) -> ScheduleItem {
        ScheduleItem::new(id, format!("Task {}", id), USER, "Alice", start, end).unwrap()
    }

    pub fn vacation(id: &str, start: NaiveDate, end: NaiveDate) -> Vacation {
        Vacation {
            id: id.to_string(),
            user_id: USER.to_string(),
            user_name: "Alice".to_string(),
            start,
            end,
            kind: VacationKind::Annual,
            reason: None,
        }
    }
}

/// Fresh in-memory database with the schema applied
pub fn memory_db() -> Database {
    let db = Database::new(":memory:").unwrap();
    db.initialize_schema().unwrap();
    db
}
