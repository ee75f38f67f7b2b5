//! In-memory item set for one user and one visible week.
//!
//! The board is the single owner of the local copy. It is filled by a full
//! fetch, overwritten in place by the drag controller (last write wins) and
//! discarded on the next refresh. The store stays authoritative.

use chrono::NaiveDate;

use super::error::ScheduleError;
use super::store::ItemStore;
use crate::layout::{build_week_layout, LayoutGeometry, WeekLayout};
use crate::models::schedule_item::ScheduleItem;
use crate::models::week::WeekWindow;

#[derive(Debug, Clone, PartialEq)]
pub enum BoardStatus {
    /// Nothing fetched yet, or invalidated
    Stale,
    Loaded,
    /// Last fetch failed; no layout is produced until a refresh succeeds
    Failed(ScheduleError),
}

pub struct ScheduleBoard {
    user_id: String,
    week: WeekWindow,
    items: Vec<ScheduleItem>,
    status: BoardStatus,
}

impl ScheduleBoard {
    pub fn new(user_id: impl Into<String>, week: WeekWindow) -> Self {
        Self {
            user_id: user_id.into(),
            week,
            items: Vec::new(),
            status: BoardStatus::Stale,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn week(&self) -> WeekWindow {
        self.week
    }

    pub fn status(&self) -> &BoardStatus {
        &self.status
    }

    pub fn items(&self) -> &[ScheduleItem] {
        &self.items
    }

    pub fn item(&self, item_id: &str) -> Option<&ScheduleItem> {
        self.items.iter().find(|item| item.id == item_id)
    }

    /// Drop the local copy; the next layout needs a refresh first.
    pub fn invalidate(&mut self) {
        self.items.clear();
        self.status = BoardStatus::Stale;
    }

    /// Replace the local copy with the user's items and vacations.
    ///
    /// On failure the board holds no items, so no partial layout is shown.
    pub fn refresh<S>(&mut self, store: &S) -> Result<(), ScheduleError>
    where
        S: ItemStore + ?Sized,
    {
        match self.fetch_all(store) {
            Ok(items) => {
                log::debug!(
                    "Loaded {} schedule entries for user {}",
                    items.len(),
                    self.user_id
                );
                self.items = items;
                self.status = BoardStatus::Loaded;
                Ok(())
            }
            Err(err) => {
                log::error!("{}", err);
                self.items.clear();
                self.status = BoardStatus::Failed(err.clone());
                Err(err)
            }
        }
    }

    /// Switch to another week and refetch.
    pub fn show_week<S>(&mut self, week: WeekWindow, store: &S) -> Result<(), ScheduleError>
    where
        S: ItemStore + ?Sized,
    {
        self.week = week;
        self.refresh(store)
    }

    fn fetch_all<S>(&self, store: &S) -> Result<Vec<ScheduleItem>, ScheduleError>
    where
        S: ItemStore + ?Sized,
    {
        let mut items = store
            .fetch_items(&self.user_id)
            .map_err(|err| ScheduleError::fetch(&self.user_id, &err))?;

        let vacations = store
            .fetch_vacations(&self.user_id)
            .map_err(|err| ScheduleError::fetch(&self.user_id, &err))?;

        for vacation in vacations {
            match vacation.validate() {
                Ok(()) => items.push(vacation.to_schedule_item()),
                Err(reason) => {
                    log::warn!("Skipping vacation {}: {}", vacation.id, reason);
                }
            }
        }

        Ok(items)
    }

    /// Overwrite the local copy of one item, returning what was there.
    pub(crate) fn replace_item(&mut self, item: ScheduleItem) -> Option<ScheduleItem> {
        match self.items.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => Some(std::mem::replace(existing, item)),
            None => {
                self.items.push(item);
                None
            }
        }
    }

    /// Layout of the current week, or `None` unless the last fetch succeeded.
    pub fn layout(&self, geometry: &LayoutGeometry, today: NaiveDate) -> Option<WeekLayout> {
        match self.status {
            BoardStatus::Loaded => Some(build_week_layout(
                &self.items,
                &self.week,
                geometry,
                today,
            )),
            _ => None,
        }
    }
}
