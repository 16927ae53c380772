//! Date ↔ geometry mapping.
//!
//! Two representations: percentages of a row's span (bar placement inside a
//! group row) and pixels (absolute layout, scrolling, pointer deltas). Every
//! function takes the zoom factor as an argument; nothing here caches it.

use chrono::NaiveDate;

use super::grid::CalendarGrid;
use crate::model::DateWindow;

/// Default minimum bar width, in percent of the row span.
pub const MIN_BAR_WIDTH_PERCENT: f32 = 2.0;

/// Bar placement as percentages of the grid span.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarGeometry {
    pub left: f32,
    pub width: f32,
}

impl BarGeometry {
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    /// Convert to pixels for a row `total_width` pixels wide.
    pub fn to_pixels(&self, total_width: f32) -> (f32, f32) {
        (
            percent_to_pixels(self.left, total_width),
            percent_to_pixels(self.width, total_width),
        )
    }
}

/// Bar placement in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
}

/// Locate `start..=end` in the grid and express it as percentages.
///
/// Items overhanging the window are clipped to 0%/100%; items entirely
/// outside it give `None`. Width never drops below `min_width` so short
/// items stay clickable.
pub fn bar_position(
    start: NaiveDate,
    end: NaiveDate,
    grid: &CalendarGrid,
    min_width: f32,
) -> Option<BarGeometry> {
    if grid.is_empty() {
        return None;
    }
    let total = grid.len() as f32;
    let first = grid.start_column(start)?;
    let last = grid.end_column(end)?;
    // A window that falls entirely between visible columns (e.g. a weekend
    // with weekends hidden) collapses to zero width at `first`.
    let covered = if last >= first {
        (last - first + 1) as f32
    } else {
        0.0
    };
    let left = first as f32 / total * 100.0;
    let width = (covered / total * 100.0)
        .max(min_width)
        .min(100.0 - left);
    Some(BarGeometry { left, width })
}

/// Inverse of [`bar_position`]: the dates a bar's percentages cover.
pub fn bar_dates(geometry: BarGeometry, grid: &CalendarGrid) -> Option<DateWindow> {
    if grid.is_empty() {
        return None;
    }
    let total = grid.len() as f32;
    let max_index = grid.len() - 1;
    let first = ((geometry.left / 100.0 * total).round().max(0.0) as usize).min(max_index);
    let end_edge = (geometry.right() / 100.0 * total).round().max(0.0) as usize;
    let last = end_edge.saturating_sub(1).clamp(first, max_index);
    Some(DateWindow::new(grid.date_at(first)?, grid.date_at(last)?))
}

/// Pixel offset of a grid column.
pub fn pixel_position(index: usize, pixels_per_day: f32) -> f32 {
    index as f32 * pixels_per_day
}

/// Whole days a pointer delta corresponds to.
pub fn pixels_to_days(delta_px: f32, pixels_per_day: f32) -> i64 {
    if pixels_per_day <= 0.0 {
        return 0;
    }
    (delta_px / pixels_per_day).round() as i64
}

/// Grid column under content x, or `None` when x falls outside the grid.
pub fn column_at(x: f32, pixels_per_day: f32, grid: &CalendarGrid) -> Option<usize> {
    if x < 0.0 || pixels_per_day <= 0.0 {
        return None;
    }
    let column = (x / pixels_per_day).floor() as usize;
    (column < grid.len()).then_some(column)
}

/// Full pixel width of the grid at the given zoom.
pub fn grid_width(grid: &CalendarGrid, pixels_per_day: f32) -> f32 {
    pixel_position(grid.len(), pixels_per_day)
}

pub fn percent_to_pixels(percent: f32, total_width: f32) -> f32 {
    percent / 100.0 * total_width
}

/// Absolute pixel rectangle of a bar placed in a row at `top`.
pub fn bar_pixel_rect(
    window: DateWindow,
    grid: &CalendarGrid,
    pixels_per_day: f32,
    top: f32,
    min_width_px: f32,
) -> Option<PixelRect> {
    let (first, last) = match grid.column_span(window) {
        Some(span) => span,
        None => {
            let first = grid.start_column(window.start)?;
            grid.end_column(window.end)?;
            (first, first)
        }
    };
    let left = pixel_position(first, pixels_per_day);
    let width = pixel_position(last - first + 1, pixels_per_day).max(min_width_px);
    Some(PixelRect { left, top, width })
}
