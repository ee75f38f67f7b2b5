//! Resolves the effective date range of each schedule item.
//!
//! Items created before explicit ranges existed only carry a single
//! `deadline`; those become single-day intervals. Items with no usable date
//! are not schedulable and are silently left out of the layout.

use chrono::NaiveDate;

use crate::models::schedule_item::ScheduleItem;

/// Uniform date range for one item, borrowing the source record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval<'a> {
    pub item: &'a ScheduleItem,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl<'a> Interval<'a> {
    /// Whole days between start and end (0 for a single day).
    pub fn duration_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

/// Effective start/end for an item, or `None` when it cannot be placed.
///
/// A missing end falls back to the start and vice versa; the legacy
/// deadline is used only when neither explicit date is present.
pub fn normalize(item: &ScheduleItem) -> Option<Interval<'_>> {
    let (start, end) = match (item.start, item.end, item.deadline) {
        (Some(start), Some(end), _) => (start, end),
        (Some(start), None, _) => (start, start),
        (None, Some(end), _) => (end, end),
        (None, None, Some(deadline)) => (deadline, deadline),
        (None, None, None) => {
            log::debug!("Item {} has no dates; not schedulable", item.id);
            return None;
        }
    };

    if end < start {
        log::warn!(
            "Item {} ends ({}) before it starts ({}); excluded from layout",
            item.id,
            end,
            start
        );
        return None;
    }

    Some(Interval { item, start, end })
}

/// Normalize every item, dropping the ones that are not schedulable.
pub fn normalize_all(items: &[ScheduleItem]) -> Vec<Interval<'_>> {
    items.iter().filter_map(normalize).collect()
}
