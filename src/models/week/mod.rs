// Week module
// The Monday-to-Sunday window currently on screen

use chrono::NaiveDate;
use serde::Serialize;

use crate::utils::date::{add_days, monday_of, weekday_label};

pub const DAYS_PER_WEEK: i64 = 7;

/// Inclusive [start, end] of the displayed week, always Monday through Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct WeekWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl WeekWindow {
    /// The week that contains `date`.
    pub fn containing(date: NaiveDate) -> Self {
        let start = monday_of(date);
        Self {
            start,
            end: add_days(start, DAYS_PER_WEEK - 1),
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn next(&self) -> Self {
        Self::containing(add_days(self.start, DAYS_PER_WEEK))
    }

    pub fn previous(&self) -> Self {
        Self::containing(add_days(self.start, -DAYS_PER_WEEK))
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// The seven dates of the week in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (0..DAYS_PER_WEEK).map(move |offset| add_days(self.start, offset))
    }

    /// Date of the column at `offset` (0 = Monday), if within the week.
    pub fn day_at(&self, offset: i64) -> Option<NaiveDate> {
        (0..DAYS_PER_WEEK)
            .contains(&offset)
            .then(|| add_days(self.start, offset))
    }
}

/// Column header for one day of the week view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayHeader {
    pub date: NaiveDate,
    pub label: &'static str,
    pub is_today: bool,
}

impl DayHeader {
    pub fn for_week(week: &WeekWindow, today: NaiveDate) -> Vec<DayHeader> {
        week.days()
            .map(|date| DayHeader {
                date,
                label: weekday_label(date),
                is_today: date == today,
            })
            .collect()
    }
}
