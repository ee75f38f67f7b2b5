// Schedule item module
// A dated unit of work (or vacation day) belonging to one user

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::history::AuditLog;

/// Workflow status shown as a tag on each bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    Planned,
    InProgress,
    OnHold,
    Done,
    /// Pseudo-status for vacation records folded into the schedule
    Vacation,
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Planned => "planned",
            ItemStatus::InProgress => "in_progress",
            ItemStatus::OnHold => "on_hold",
            ItemStatus::Done => "done",
            ItemStatus::Vacation => "vacation",
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "planned" => Ok(ItemStatus::Planned),
            "in_progress" => Ok(ItemStatus::InProgress),
            "on_hold" => Ok(ItemStatus::OnHold),
            "done" => Ok(ItemStatus::Done),
            "vacation" => Ok(ItemStatus::Vacation),
            other => Err(format!("Unknown item status '{}'", other)),
        }
    }
}

/// Task, meeting or vacation day rendered on the weekly schedule.
///
/// Dates are optional because older records only carry a single
/// `deadline`; see [`crate::layout::normalize`] for how they resolve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleItem {
    pub id: String,
    pub name: String,
    pub status: ItemStatus,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    /// Legacy single-date field
    pub deadline: Option<NaiveDate>,
    pub user_id: String,
    pub user_name: String,
    #[serde(default)]
    pub history: AuditLog,
    pub updated_at: Option<DateTime<Local>>,
}

impl ScheduleItem {
    /// Create a single-range item with required fields.
    ///
    /// # Examples
    /// ```
    /// use week_scheduler::models::schedule_item::ScheduleItem;
    /// use chrono::NaiveDate;
    ///
    /// let day = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
    /// let item = ScheduleItem::new("t-1", "Inventory count", "u-1", "Alice", day, day).unwrap();
    /// assert_eq!(item.duration_days(), Some(0));
    /// ```
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        user_id: impl Into<String>,
        user_name: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Self, String> {
        Self::builder()
            .id(id)
            .name(name)
            .user(user_id, user_name)
            .dates(start, end)
            .build()
    }

    pub fn builder() -> ScheduleItemBuilder {
        ScheduleItemBuilder::new()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("Item id cannot be empty".to_string());
        }

        if self.name.trim().is_empty() {
            return Err("Item name cannot be empty".to_string());
        }

        if self.user_id.trim().is_empty() {
            return Err("Item must belong to a user".to_string());
        }

        if let (Some(start), Some(end)) = (self.start, self.end) {
            if end < start {
                return Err("Item end date cannot be before its start date".to_string());
            }
        }

        Ok(())
    }

    pub fn is_vacation(&self) -> bool {
        self.status == ItemStatus::Vacation
    }

    /// Vacation pseudo-items are edited through leave requests, not by dragging.
    pub fn is_draggable(&self) -> bool {
        !self.is_vacation()
    }

    /// Explicit start/end pair when both are present.
    pub fn explicit_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.start?, self.end?))
    }

    /// Whole days between start and end (0 for a single-day item).
    pub fn duration_days(&self) -> Option<i64> {
        self.explicit_range()
            .map(|(start, end)| (end - start).num_days())
    }
}

/// Builder for schedule items with optional fields
pub struct ScheduleItemBuilder {
    id: Option<String>,
    name: Option<String>,
    status: ItemStatus,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    deadline: Option<NaiveDate>,
    user_id: Option<String>,
    user_name: Option<String>,
    history: AuditLog,
}

impl ScheduleItemBuilder {
    pub fn new() -> Self {
        Self {
            id: None,
            name: None,
            status: ItemStatus::Planned,
            start: None,
            end: None,
            deadline: None,
            user_id: None,
            user_name: None,
            history: AuditLog::new(),
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn status(mut self, status: ItemStatus) -> Self {
        self.status = status;
        self
    }

    pub fn dates(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    pub fn start(mut self, start: NaiveDate) -> Self {
        self.start = Some(start);
        self
    }

    pub fn end(mut self, end: NaiveDate) -> Self {
        self.end = Some(end);
        self
    }

    /// Set the legacy single-date field
    pub fn deadline(mut self, deadline: NaiveDate) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn user(mut self, user_id: impl Into<String>, user_name: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self.user_name = Some(user_name.into());
        self
    }

    pub fn history(mut self, history: AuditLog) -> Self {
        self.history = history;
        self
    }

    pub fn build(self) -> Result<ScheduleItem, String> {
        let id = self.id.ok_or("Item id is required")?;
        let name = self.name.ok_or("Item name is required")?;
        let user_id = self.user_id.ok_or("Item owner is required")?;

        let item = ScheduleItem {
            id,
            name,
            status: self.status,
            start: self.start,
            end: self.end,
            deadline: self.deadline,
            user_id,
            user_name: self.user_name.unwrap_or_default(),
            history: self.history,
            updated_at: None,
        };

        item.validate()?;
        Ok(item)
    }
}

impl Default for ScheduleItemBuilder {
    fn default() -> Self {
        Self::new()
    }
}
