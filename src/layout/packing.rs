//! Greedy row assignment for the weekly schedule.
//!
//! Intervals are visited by original start date (longer items first on ties)
//! and dropped into the first row whose last occupant ended strictly before
//! the visible start of the new interval. Rows are tracked as a flat list of
//! end-date markers indexed by row number.

use std::cmp::Ordering;

use chrono::NaiveDate;

use super::clamp::ClampedInterval;

/// A clamped interval together with its assigned row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedInterval<'a> {
    pub clamped: ClampedInterval<'a>,
    pub row: usize,
}

/// Result of one packing pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackedRows<'a> {
    /// Placed intervals in packing order
    pub placed: Vec<PlacedInterval<'a>>,
    pub row_count: usize,
}

/// Packing order: earliest original start, then longest duration, then id.
///
/// The id comparison only matters for items with identical ranges and keeps
/// repeated runs over the same set stable regardless of fetch order.
fn packing_order(a: &ClampedInterval<'_>, b: &ClampedInterval<'_>) -> Ordering {
    a.interval
        .start
        .cmp(&b.interval.start)
        .then_with(|| {
            b.interval
                .duration_days()
                .cmp(&a.interval.duration_days())
        })
        .then_with(|| a.interval.item.id.cmp(&b.interval.item.id))
}

/// Assign each interval a row so that no two intervals in a row overlap.
pub fn pack_rows<'a>(mut intervals: Vec<ClampedInterval<'a>>) -> PackedRows<'a> {
    intervals.sort_by(packing_order);

    let mut row_ends: Vec<NaiveDate> = Vec::new();
    let mut placed = Vec::with_capacity(intervals.len());

    for clamped in intervals {
        let free_row = row_ends
            .iter()
            .position(|marker| *marker < clamped.clamped_start);

        let row = match free_row {
            Some(row) => {
                row_ends[row] = clamped.clamped_end;
                row
            }
            None => {
                row_ends.push(clamped.clamped_end);
                row_ends.len() - 1
            }
        };

        placed.push(PlacedInterval { clamped, row });
    }

    PackedRows {
        placed,
        row_count: row_ends.len(),
    }
}
