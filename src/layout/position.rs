//! Geometry for bars on the 7-column week grid.
//!
//! Horizontal placement is expressed as a fraction of the grid width (so it
//! survives resizing) plus a fixed pixel gutter; vertical placement is in
//! pixels from the top of the view.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::week::{WeekWindow, DAYS_PER_WEEK};

/// Fixed sizes used to place bars, configurable through `[geometry]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutGeometry {
    pub row_height: f32,
    pub row_margin: f32,
    pub header_height: f32,
    /// Extra space between the header and the first row
    pub top_offset: f32,
    /// Horizontal inset applied to both sides of every bar
    pub gutter: f32,
}

impl Default for LayoutGeometry {
    fn default() -> Self {
        Self {
            row_height: 24.0,
            row_margin: 4.0,
            header_height: 40.0,
            top_offset: 2.0,
            gutter: 2.0,
        }
    }
}

/// Resolution-independent position of one bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BarPosition {
    /// Left edge as a fraction of the grid width
    pub left_fraction: f32,
    /// Width as a fraction of the grid width
    pub width_fraction: f32,
    pub gutter: f32,
    pub top: f32,
    pub height: f32,
}

/// Absolute pixel rectangle for a container of known width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BarPosition {
    pub fn resolve(&self, container_width: f32) -> PixelRect {
        PixelRect {
            x: self.left_fraction * container_width + self.gutter,
            y: self.top,
            width: (self.width_fraction * container_width - 2.0 * self.gutter).max(0.0),
            height: self.height,
        }
    }
}

impl LayoutGeometry {
    fn row_pitch(&self) -> f32 {
        self.row_height + self.row_margin
    }

    /// Position of a bar starting in column `day_offset`, covering
    /// `day_span` columns, in row `row`.
    pub fn position(&self, day_offset: i64, day_span: i64, row: usize) -> BarPosition {
        let columns = DAYS_PER_WEEK as f32;
        BarPosition {
            left_fraction: day_offset as f32 / columns,
            width_fraction: day_span as f32 / columns,
            gutter: self.gutter,
            top: self.header_height + row as f32 * self.row_pitch() + self.top_offset,
            height: self.row_height,
        }
    }

    /// Smallest view height that shows `total_rows` rows without clipping.
    /// An empty week still reserves one row.
    pub fn container_min_height(&self, total_rows: usize) -> f32 {
        self.header_height + total_rows.max(1) as f32 * self.row_pitch() + self.top_offset
    }

    /// Day column under a pointer at `x`, or `None` outside the grid.
    pub fn day_at(&self, x: f32, container_width: f32, week: &WeekWindow) -> Option<NaiveDate> {
        if container_width <= 0.0 || x < 0.0 || x >= container_width {
            return None;
        }
        let column = (x / container_width * DAYS_PER_WEEK as f32).floor() as i64;
        week.day_at(column)
    }
}
