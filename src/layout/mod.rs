//! Weekly schedule layout.
//!
//! Raw items flow through normalization, week clamping, row packing and
//! positioning to produce a [`WeekLayout`]. The whole pass is pure and
//! synchronous; rerun it whenever the item set or the visible week changes.

use chrono::NaiveDate;
use serde::Serialize;

pub mod clamp;
pub mod normalize;
pub mod packing;
pub mod position;

pub use clamp::{clamp_all, clamp_to_week, ClampedInterval};
pub use normalize::{normalize, normalize_all, Interval};
pub use packing::{pack_rows, PackedRows, PlacedInterval};
pub use position::{BarPosition, LayoutGeometry, PixelRect};

use crate::models::schedule_item::{ItemStatus, ScheduleItem};
use crate::models::week::{DayHeader, WeekWindow};

/// One item ready to be drawn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaidOutItem {
    pub item_id: String,
    pub name: String,
    pub status: ItemStatus,
    pub user_name: String,
    /// Effective (unclamped) range
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub day_offset: i64,
    pub day_span: i64,
    pub row: usize,
    pub continues_before: bool,
    pub continues_after: bool,
    pub draggable: bool,
    pub position: BarPosition,
}

/// Everything needed to render one week for one user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekLayout {
    pub week: WeekWindow,
    pub days: Vec<DayHeader>,
    /// Bars in packing order
    pub bars: Vec<LaidOutItem>,
    pub row_count: usize,
    pub min_height: f32,
}

impl WeekLayout {
    pub fn bar(&self, item_id: &str) -> Option<&LaidOutItem> {
        self.bars.iter().find(|bar| bar.item_id == item_id)
    }

    /// Bars assigned to `row`, left to right.
    pub fn row(&self, row: usize) -> Vec<&LaidOutItem> {
        let mut bars: Vec<_> = self.bars.iter().filter(|bar| bar.row == row).collect();
        bars.sort_by_key(|bar| bar.day_offset);
        bars
    }
}

/// Run the full layout pipeline for `items` over `week`.
pub fn build_week_layout(
    items: &[ScheduleItem],
    week: &WeekWindow,
    geometry: &LayoutGeometry,
    today: NaiveDate,
) -> WeekLayout {
    let intervals = normalize_all(items);
    let clamped = clamp_all(intervals, week);
    let packed = pack_rows(clamped);

    let bars: Vec<LaidOutItem> = packed
        .placed
        .iter()
        .map(|placed| lay_out(placed, geometry))
        .collect();

    log::debug!(
        "Week of {}: {} of {} items placed in {} rows",
        week.start(),
        bars.len(),
        items.len(),
        packed.row_count
    );

    WeekLayout {
        week: *week,
        days: DayHeader::for_week(week, today),
        bars,
        row_count: packed.row_count,
        min_height: geometry.container_min_height(packed.row_count),
    }
}

fn lay_out(placed: &PlacedInterval<'_>, geometry: &LayoutGeometry) -> LaidOutItem {
    let clamped = &placed.clamped;
    let item = clamped.interval.item;

    LaidOutItem {
        item_id: item.id.clone(),
        name: item.name.clone(),
        status: item.status,
        user_name: item.user_name.clone(),
        start: clamped.interval.start,
        end: clamped.interval.end,
        day_offset: clamped.day_offset,
        day_span: clamped.day_span,
        row: placed.row,
        continues_before: clamped.continues_before(),
        continues_after: clamped.continues_after(),
        draggable: item.is_draggable(),
        position: geometry.position(clamped.day_offset, clamped.day_span, placed.row),
    }
}
