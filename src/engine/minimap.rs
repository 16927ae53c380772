//! Minimap and viewport synchronization.
//!
//! The minimap is a linear map of the whole project span. The main view is
//! laid out on grid columns, so conversions between the two go through
//! dates: scroll offset → visible center column → date → minimap percent,
//! and back for clicks.

use chrono::{Duration, NaiveDate};

use super::coords::{column_at, grid_width, pixel_position};
use super::grid::CalendarGrid;

const OFFSET_EPSILON: f32 = 0.5;

/// First and last date of the project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectSpan {
    pub min: NaiveDate,
    pub max: NaiveDate,
}

impl ProjectSpan {
    pub fn new(a: NaiveDate, b: NaiveDate) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn from_grid(grid: &CalendarGrid) -> Option<Self> {
        Some(Self::new(grid.first_date()?, grid.last_date()?))
    }

    pub fn total_days(&self) -> i64 {
        (self.max - self.min).num_days()
    }
}

/// Derived each frame from the main view's scroll position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    pub visible_center_date: NaiveDate,
    pub minimap_marker_percent: f32,
}

impl ViewportState {
    pub fn compute(
        grid: &CalendarGrid,
        span: ProjectSpan,
        scroll_x: f32,
        viewport_width: f32,
        pixels_per_day: f32,
    ) -> Option<Self> {
        let center = visible_center_date(grid, scroll_x, viewport_width, pixels_per_day)?;
        Some(Self {
            visible_center_date: center,
            minimap_marker_percent: marker_percent(center, span),
        })
    }
}

/// Date at the horizontal midpoint of the visible viewport.
pub fn visible_center_date(
    grid: &CalendarGrid,
    scroll_x: f32,
    viewport_width: f32,
    pixels_per_day: f32,
) -> Option<NaiveDate> {
    if grid.is_empty() {
        return None;
    }
    let center_x = scroll_x.max(0.0) + viewport_width.max(0.0) / 2.0;
    let column = column_at(center_x, pixels_per_day, grid).unwrap_or(grid.len() - 1);
    grid.date_at(column)
}

/// Position of `date` along the minimap, clamped to 0..=100.
pub fn marker_percent(date: NaiveDate, span: ProjectSpan) -> f32 {
    let total = span.total_days();
    if total <= 0 {
        return 0.0;
    }
    let offset = (date - span.min).num_days() as f32;
    (offset / total as f32 * 100.0).clamp(0.0, 100.0)
}

/// The today marker: same mapping, independent of scroll, always on screen.
pub fn today_marker_percent(today: NaiveDate, span: ProjectSpan) -> f32 {
    marker_percent(today, span)
}

/// Invert [`marker_percent`] for a click `x` pixels into a minimap
/// `minimap_width` pixels wide.
pub fn date_at_minimap_x(x: f32, minimap_width: f32, span: ProjectSpan) -> NaiveDate {
    if minimap_width <= 0.0 {
        return span.min;
    }
    let ratio = (x / minimap_width).clamp(0.0, 1.0);
    let days = (ratio * span.total_days() as f32).round() as i64;
    span.min + Duration::days(days)
}

/// Scroll offset that centers `date` in a viewport `viewport_width` wide,
/// clamped to the scrollable range.
pub fn center_scroll_offset(
    date: NaiveDate,
    grid: &CalendarGrid,
    pixels_per_day: f32,
    viewport_width: f32,
) -> f32 {
    let Some(index) = grid.nearest_index(date) else {
        return 0.0;
    };
    let column_center = pixel_position(index, pixels_per_day) + pixels_per_day / 2.0;
    let max_scroll = (grid_width(grid, pixels_per_day) - viewport_width).max(0.0);
    (column_center - viewport_width / 2.0).clamp(0.0, max_scroll)
}

/// Left and right edge of the visible region, in minimap percent.
pub fn visible_range_percent(
    grid: &CalendarGrid,
    span: ProjectSpan,
    scroll_x: f32,
    viewport_width: f32,
    pixels_per_day: f32,
) -> Option<(f32, f32)> {
    if grid.is_empty() {
        return None;
    }
    let last = grid.len() - 1;
    let first_col = column_at(scroll_x.max(0.0), pixels_per_day, grid).unwrap_or(last);
    let last_col =
        column_at(scroll_x.max(0.0) + viewport_width, pixels_per_day, grid).unwrap_or(last);
    Some((
        marker_percent(grid.date_at(first_col)?, span),
        marker_percent(grid.date_at(last_col)?, span),
    ))
}

/// One of the two horizontally linked scroll views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollPane {
    Main,
    /// The timeline header strip that scrolls with the chart.
    Companion,
}

impl ScrollPane {
    fn index(self) -> usize {
        match self {
            ScrollPane::Main => 0,
            ScrollPane::Companion => 1,
        }
    }

    pub fn other(self) -> ScrollPane {
        match self {
            ScrollPane::Main => ScrollPane::Companion,
            ScrollPane::Companion => ScrollPane::Main,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollCommand {
    pub pane: ScrollPane,
    pub offset: f32,
}

/// Bidirectional scroll link between the main view and its companion.
///
/// A pane only propagates scrolls the user made. Offsets this type asked a
/// pane to take are remembered per pane and swallowed when they echo back.
#[derive(Debug, Clone, Default)]
pub struct ScrollSync {
    offset: f32,
    last_seen: [Option<f32>; 2],
    expected: [Option<f32>; 2],
    pending: [Option<f32>; 2],
}

impl ScrollSync {
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Feed the offset a pane reported this frame. Unchanged offsets are
    /// ignored; changed ones go through [`ScrollSync::on_scroll`].
    pub fn observe(&mut self, pane: ScrollPane, offset: f32) -> Option<ScrollCommand> {
        let i = pane.index();
        let changed = self.last_seen[i].map_or(true, |seen| (seen - offset).abs() >= OFFSET_EPSILON);
        self.last_seen[i] = Some(offset);
        if changed {
            self.on_scroll(pane, offset)
        } else {
            None
        }
    }

    /// A scroll event from `pane`. Returns the mirror command for the other
    /// pane, or `None` when the event is the echo of our own command.
    pub fn on_scroll(&mut self, pane: ScrollPane, offset: f32) -> Option<ScrollCommand> {
        let i = pane.index();
        if let Some(expected) = self.expected[i].take() {
            if (expected - offset).abs() < OFFSET_EPSILON {
                return None;
            }
        }
        if (self.offset - offset).abs() < OFFSET_EPSILON {
            return None;
        }
        self.offset = offset;
        let other = pane.other();
        Some(self.command(other, offset))
    }

    /// Programmatic scroll of both panes, e.g. after a minimap click.
    pub fn jump_to(&mut self, offset: f32) -> [ScrollCommand; 2] {
        self.offset = offset;
        [
            self.command(ScrollPane::Main, offset),
            self.command(ScrollPane::Companion, offset),
        ]
    }

    /// Offset the host should apply to `pane` this frame, if any.
    pub fn take_pending(&mut self, pane: ScrollPane) -> Option<f32> {
        self.pending[pane.index()].take()
    }

    fn command(&mut self, pane: ScrollPane, offset: f32) -> ScrollCommand {
        self.expected[pane.index()] = Some(offset);
        self.pending[pane.index()] = Some(offset);
        ScrollCommand { pane, offset }
    }
}
