// Vacation module
// Leave records and their mapping onto the weekly schedule

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::history::AuditLog;
use crate::models::schedule_item::{ItemStatus, ScheduleItem};

/// Prefix that keeps vacation pseudo-item ids apart from task ids.
pub const VACATION_ID_PREFIX: &str = "vacation:";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VacationKind {
    Annual,
    HalfDayMorning,
    HalfDayAfternoon,
    Sick,
    Special,
}

impl VacationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            VacationKind::Annual => "annual",
            VacationKind::HalfDayMorning => "half_day_morning",
            VacationKind::HalfDayAfternoon => "half_day_afternoon",
            VacationKind::Sick => "sick",
            VacationKind::Special => "special",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            VacationKind::Annual => "Annual leave",
            VacationKind::HalfDayMorning => "Half day (AM)",
            VacationKind::HalfDayAfternoon => "Half day (PM)",
            VacationKind::Sick => "Sick leave",
            VacationKind::Special => "Special leave",
        }
    }

    pub fn is_half_day(&self) -> bool {
        matches!(
            self,
            VacationKind::HalfDayMorning | VacationKind::HalfDayAfternoon
        )
    }
}

impl fmt::Display for VacationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VacationKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "annual" => Ok(VacationKind::Annual),
            "half_day_morning" => Ok(VacationKind::HalfDayMorning),
            "half_day_afternoon" => Ok(VacationKind::HalfDayAfternoon),
            "sick" => Ok(VacationKind::Sick),
            "special" => Ok(VacationKind::Special),
            other => Err(format!("Unknown vacation kind '{}'", other)),
        }
    }
}

/// An approved leave record for one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vacation {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub kind: VacationKind,
    pub reason: Option<String>,
}

impl Vacation {
    pub fn validate(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("Vacation id cannot be empty".to_string());
        }
        if self.user_id.trim().is_empty() {
            return Err("Vacation must belong to a user".to_string());
        }
        if self.end < self.start {
            return Err("Vacation end date cannot be before its start date".to_string());
        }
        if self.kind.is_half_day() && self.start != self.end {
            return Err("Half-day vacations must cover a single day".to_string());
        }
        Ok(())
    }

    /// Fold this record into the schedule as a non-draggable pseudo-item.
    pub fn to_schedule_item(&self) -> ScheduleItem {
        let name = match self.reason.as_deref().map(str::trim) {
            Some(reason) if !reason.is_empty() => format!("{}: {}", self.kind.label(), reason),
            _ => self.kind.label().to_string(),
        };

        ScheduleItem {
            id: format!("{}{}", VACATION_ID_PREFIX, self.id),
            name,
            status: ItemStatus::Vacation,
            start: Some(self.start),
            end: Some(self.end),
            deadline: None,
            user_id: self.user_id.clone(),
            user_name: self.user_name.clone(),
            history: AuditLog::new(),
            updated_at: None,
        }
    }
}
