//! Clips intervals to the visible week and derives their column placement.

use chrono::NaiveDate;

use super::normalize::Interval;
use crate::models::week::WeekWindow;
use crate::utils::date::days_between;

/// An interval cut down to the visible week.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClampedInterval<'a> {
    /// Unclamped source interval
    pub interval: Interval<'a>,
    pub clamped_start: NaiveDate,
    pub clamped_end: NaiveDate,
    /// Column of the first visible day (0 = Monday)
    pub day_offset: i64,
    /// Number of visible days, inclusive (1..=7)
    pub day_span: i64,
}

impl<'a> ClampedInterval<'a> {
    /// True when the item started before the visible week.
    pub fn continues_before(&self) -> bool {
        self.interval.start < self.clamped_start
    }

    /// True when the item runs past the visible week.
    pub fn continues_after(&self) -> bool {
        self.interval.end > self.clamped_end
    }

    /// Whether the visible ranges of two intervals share at least one day.
    pub fn overlaps(&self, other: &ClampedInterval<'_>) -> bool {
        self.clamped_start <= other.clamped_end && other.clamped_start <= self.clamped_end
    }
}

/// Clip `interval` to `week`, or `None` when it lies entirely outside.
pub fn clamp_to_week<'a>(interval: Interval<'a>, week: &WeekWindow) -> Option<ClampedInterval<'a>> {
    let clamped_start = interval.start.max(week.start());
    let clamped_end = interval.end.min(week.end());

    if clamped_start > clamped_end {
        return None;
    }

    Some(ClampedInterval {
        interval,
        clamped_start,
        clamped_end,
        day_offset: days_between(week.start(), clamped_start),
        day_span: days_between(clamped_start, clamped_end) + 1,
    })
}

pub fn clamp_all<'a>(intervals: Vec<Interval<'a>>, week: &WeekWindow) -> Vec<ClampedInterval<'a>> {
    intervals
        .into_iter()
        .filter_map(|interval| clamp_to_week(interval, week))
        .collect()
}
