//! SQLite-backed implementation of the schedule session's data contract.

use anyhow::Result;
use rusqlite::Connection;

use super::item::ItemService;
use super::vacation::VacationService;
use crate::models::schedule_item::ScheduleItem;
use crate::models::vacation::Vacation;
use crate::schedule::{ItemStore, ItemUpdate};

pub struct SqliteStore<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn items(&self) -> ItemService<'a> {
        ItemService::new(self.conn)
    }

    pub fn vacations(&self) -> VacationService<'a> {
        VacationService::new(self.conn)
    }
}

impl ItemStore for SqliteStore<'_> {
    fn fetch_items(&self, user_id: &str) -> Result<Vec<ScheduleItem>> {
        self.items().list_for_user(user_id)
    }

    fn fetch_vacations(&self, user_id: &str) -> Result<Vec<Vacation>> {
        self.vacations().list_for_user(user_id)
    }

    fn read_for_update(&self, item_id: &str) -> Result<Option<ScheduleItem>> {
        self.items().get(item_id)
    }

    fn apply_update(&self, item_id: &str, update: &ItemUpdate) -> Result<()> {
        self.items().apply_update(item_id, update)
    }
}
