//! Collaborator contracts consumed by the schedule session.
//!
//! The SQLite services in [`crate::services`] implement these; tests
//! substitute mocks.

use anyhow::Result;
use chrono::{DateTime, Local, NaiveDate};

use crate::models::history::HistoryEntry;
use crate::models::schedule_item::ScheduleItem;
use crate::models::vacation::Vacation;

/// Partial update written by a reschedule.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemUpdate {
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Entries to append after whatever history is already stored
    pub history_append: Vec<HistoryEntry>,
    pub updated_at: DateTime<Local>,
}

/// Data access for schedule items and vacation records.
#[cfg_attr(test, mockall::automock)]
pub trait ItemStore {
    /// All items owned by `user_id`, including their history.
    fn fetch_items(&self, user_id: &str) -> Result<Vec<ScheduleItem>>;

    /// All vacation records owned by `user_id`.
    fn fetch_vacations(&self, user_id: &str) -> Result<Vec<Vacation>>;

    /// Current persisted record for one item, read immediately before a write.
    fn read_for_update(&self, item_id: &str) -> Result<Option<ScheduleItem>>;

    /// Apply `update` to one item.
    fn apply_update(&self, item_id: &str, update: &ItemUpdate) -> Result<()>;
}

/// Source of the current time.
pub trait Clock {
    fn now(&self) -> DateTime<Local>;

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Clock pinned to one instant, for tests and replays.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Local>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}
