//! Drag-to-move and edge-resize state machine.
//!
//! Driven by abstract pointer events in chart content coordinates (scroll
//! offset already applied). Rendering reads [`InteractionMachine::preview`]
//! in place of committed data; nothing here touches the work-item store.
//!
//! ```text
//! Idle ──begin(Move)──────▶ Dragging ──release──▶ Click | Commit | Nothing
//!   └──begin(Resize(e))──▶ Resizing(e) ──release──▶ Commit | Nothing
//!              (any) ──cancel / release outside──▶ Idle
//! ```

use std::collections::HashMap;
use std::time::{Duration, Instant};

use chrono::Duration as ChronoDuration;

use super::coords::{column_at, pixels_to_days};
use super::grid::CalendarGrid;
use crate::error::{GanttError, Result};
use crate::model::{DateWindow, WorkItem};

/// Displacement below which a release counts as a click.
pub const DRAG_THRESHOLD_PX: f32 = 5.0;
/// Clicks this soon after a drag/resize commit are swallowed.
pub const CLICK_SUPPRESS_WINDOW: Duration = Duration::from_millis(100);

/// Pointer position in chart content coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pointer {
    pub x: f32,
    pub y: f32,
}

impl Pointer {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Start,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragMode {
    Move,
    Resize(Edge),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionState {
    Idle,
    Dragging,
    Resizing(Edge),
}

/// What the pointer went down on.
#[derive(Debug, Clone, PartialEq)]
pub struct BarTarget {
    pub item_id: String,
    pub window: DateWindow,
    pub mode: DragMode,
    /// Bar left edge and width in content pixels, used for the grab ratio.
    pub bar_left: f32,
    pub bar_width: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    Move,
    ResizeStart,
    ResizeEnd,
}

impl From<DragMode> for MutationKind {
    fn from(mode: DragMode) -> Self {
        match mode {
            DragMode::Move => MutationKind::Move,
            DragMode::Resize(Edge::Start) => MutationKind::ResizeStart,
            DragMode::Resize(Edge::End) => MutationKind::ResizeEnd,
        }
    }
}

/// A reschedule request for the owner of the work-item collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemMutation {
    pub item_id: String,
    pub kind: MutationKind,
    pub window: DateWindow,
}

impl ItemMutation {
    /// The updated item to hand back to the store.
    pub fn apply(&self, item: &WorkItem) -> WorkItem {
        item.rescheduled(self.window)
    }
}

/// Outcome of releasing the pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Release {
    /// Sub-threshold move: treat as a click on the item.
    Click(String),
    Commit(ItemMutation),
    /// Session ended without a valid, changed window.
    Nothing,
}

/// One live drag or resize.
#[derive(Debug, Clone)]
pub struct InteractionSession {
    pub item_id: String,
    pub mode: DragMode,
    pub anchor: Pointer,
    /// Where on the bar it was grabbed, 0 (left) to 1 (right).
    pub grab_ratio: f32,
    pub original: DateWindow,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionConfig {
    pub drag_threshold_px: f32,
    pub click_suppress: Duration,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            drag_threshold_px: DRAG_THRESHOLD_PX,
            click_suppress: CLICK_SUPPRESS_WINDOW,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct InteractionMachine {
    config: InteractionConfig,
    session: Option<InteractionSession>,
    previews: HashMap<String, DateWindow>,
    last_commit: Option<Instant>,
}

impl InteractionMachine {
    pub fn new(config: InteractionConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> InteractionConfig {
        self.config
    }

    pub fn state(&self) -> InteractionState {
        match self.session.as_ref().map(|s| s.mode) {
            None => InteractionState::Idle,
            Some(DragMode::Move) => InteractionState::Dragging,
            Some(DragMode::Resize(edge)) => InteractionState::Resizing(edge),
        }
    }

    pub fn session(&self) -> Option<&InteractionSession> {
        self.session.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Live-preview window for `item_id`, if it is being dragged.
    pub fn preview(&self, item_id: &str) -> Option<DateWindow> {
        self.previews.get(item_id).copied()
    }

    /// Pointer went down on a bar or one of its edge handles.
    pub fn begin(&mut self, target: BarTarget, at: Pointer) -> Result<()> {
        if let Some(active) = &self.session {
            tracing::warn!(
                active = %active.item_id,
                requested = %target.item_id,
                "rejecting interaction while another is in progress"
            );
            return Err(GanttError::SessionActive {
                item_id: active.item_id.clone(),
            });
        }
        let grab_ratio = if target.bar_width > 0.0 {
            ((at.x - target.bar_left) / target.bar_width).clamp(0.0, 1.0)
        } else {
            0.0
        };
        tracing::debug!(item = %target.item_id, mode = ?target.mode, grab_ratio, "interaction started");
        self.session = Some(InteractionSession {
            item_id: target.item_id,
            mode: target.mode,
            anchor: at,
            grab_ratio,
            original: target.window,
        });
        Ok(())
    }

    /// Pointer moved. Returns true when the preview changed.
    ///
    /// `pixels_per_day` is read per call so a zoom change is picked up
    /// immediately. Invalid candidates leave the previous preview alone.
    pub fn update(&mut self, at: Pointer, grid: &CalendarGrid, pixels_per_day: f32) -> bool {
        let Some(session) = &self.session else {
            return false;
        };
        let candidate = match session.mode {
            DragMode::Move => {
                if !self.past_threshold(session.anchor, at) {
                    return self.previews.remove(&session.item_id).is_some();
                }
                move_candidate(session, at, grid, pixels_per_day)
            }
            DragMode::Resize(edge) => {
                let days = pixels_to_days(at.x - session.anchor.x, pixels_per_day);
                resize_candidate(session.original, edge, days)
            }
        };
        let Some(candidate) = candidate else {
            return false;
        };
        let previous = self.previews.insert(session.item_id.clone(), candidate);
        previous != Some(candidate)
    }

    /// Pointer released over the chart. The session ends either way.
    pub fn release(&mut self, at: Pointer, now: Instant) -> Release {
        let Some(session) = self.session.take() else {
            return Release::Nothing;
        };
        let preview = self.previews.remove(&session.item_id);

        if session.mode == DragMode::Move && !self.past_threshold(session.anchor, at) {
            if !self.accepts_click(now) {
                tracing::debug!(item = %session.item_id, "click swallowed after a recent commit");
                return Release::Nothing;
            }
            tracing::debug!(item = %session.item_id, "release below drag threshold, treating as click");
            return Release::Click(session.item_id);
        }

        self.last_commit = Some(now);
        match preview {
            Some(window) if window != session.original => {
                let mutation = ItemMutation {
                    item_id: session.item_id,
                    kind: session.mode.into(),
                    window,
                };
                tracing::info!(
                    item = %mutation.item_id,
                    kind = ?mutation.kind,
                    start = %window.start,
                    end = %window.end,
                    "reschedule committed"
                );
                Release::Commit(mutation)
            }
            _ => {
                tracing::debug!(item = %session.item_id, "interaction ended without a change");
                Release::Nothing
            }
        }
    }

    /// Tear down the session without emitting anything.
    pub fn cancel(&mut self) -> bool {
        match self.session.take() {
            Some(session) => {
                self.previews.remove(&session.item_id);
                tracing::debug!(item = %session.item_id, "interaction cancelled");
                true
            }
            None => false,
        }
    }

    /// Whether a bar click at `now` is genuine rather than the tail of a
    /// drag or resize.
    pub fn accepts_click(&self, now: Instant) -> bool {
        match self.last_commit {
            Some(at) => now.saturating_duration_since(at) >= self.config.click_suppress,
            None => true,
        }
    }

    fn past_threshold(&self, anchor: Pointer, at: Pointer) -> bool {
        let t = self.config.drag_threshold_px;
        (at.x - anchor.x).abs() >= t || (at.y - anchor.y).abs() >= t
    }
}

/// Column under the pointer, minus the grab offset, keeping the duration.
fn move_candidate(
    session: &InteractionSession,
    at: Pointer,
    grid: &CalendarGrid,
    pixels_per_day: f32,
) -> Option<DateWindow> {
    let column = column_at(at.x, pixels_per_day, grid)?;
    let under_pointer = grid.date_at(column)?;
    let grab_offset = (session.original.span_days() as f32 * session.grab_ratio).round() as i64;
    Some(session.original.moved_to(under_pointer - ChronoDuration::days(grab_offset)))
}

/// Shift one edge by `days`, rejecting anything that would not keep start < end.
fn resize_candidate(original: DateWindow, edge: Edge, days: i64) -> Option<DateWindow> {
    match edge {
        Edge::Start => {
            let start = original.start + ChronoDuration::days(days);
            (start < original.end).then(|| DateWindow::new(start, original.end))
        }
        Edge::End => {
            let end = original.end + ChronoDuration::days(days);
            (end > original.start).then(|| DateWindow::new(original.start, end))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::grid::ProjectWindow;
    use chrono::NaiveDate;

    const PPD: f32 = 40.0;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    /// January 2025 with weekends; 2025-01-10 sits in column 9 (x = 360).
    fn january() -> CalendarGrid {
        CalendarGrid::build(ProjectWindow::new(d(2025, 1, 1), d(2025, 1, 31)), true, d(2025, 1, 1))
    }

    fn item_window() -> DateWindow {
        DateWindow::new(d(2025, 1, 10), d(2025, 1, 12))
    }

    fn target(mode: DragMode) -> BarTarget {
        BarTarget {
            item_id: "W1".into(),
            window: item_window(),
            mode,
            bar_left: 360.0,
            bar_width: 120.0,
        }
    }

    fn commit(release: Release) -> ItemMutation {
        match release {
            Release::Commit(m) => m,
            other => panic!("expected commit, got {:?}", other),
        }
    }

    #[test]
    fn test_move_five_days_forward() {
        let grid = january();
        let mut m = InteractionMachine::default();
        m.begin(target(DragMode::Move), Pointer::new(360.0, 10.0)).unwrap();
        assert_eq!(m.state(), InteractionState::Dragging);
        assert!(m.update(Pointer::new(560.0, 10.0), &grid, PPD));
        assert_eq!(m.preview("W1"), Some(DateWindow::new(d(2025, 1, 15), d(2025, 1, 17))));

        let mutation = commit(m.release(Pointer::new(560.0, 10.0), Instant::now()));
        assert_eq!(mutation.kind, MutationKind::Move);
        assert_eq!(mutation.window.start, d(2025, 1, 15));
        assert_eq!(mutation.window.end, d(2025, 1, 17));
        assert_eq!(m.state(), InteractionState::Idle);
        assert_eq!(m.preview("W1"), None);
    }

    #[test]
    fn test_move_keeps_grab_point_and_duration() {
        let grid = january();
        for (grab_x, expected_start) in [
            (360.0, d(2025, 1, 14)),
            (420.0, d(2025, 1, 14)),
            (479.0, d(2025, 1, 14)),
        ] {
            let mut m = InteractionMachine::default();
            m.begin(target(DragMode::Move), Pointer::new(grab_x, 0.0)).unwrap();
            m.update(Pointer::new(grab_x + 160.0, 0.0), &grid, PPD);
            let mutation = commit(m.release(Pointer::new(grab_x + 160.0, 0.0), Instant::now()));
            assert_eq!(mutation.window.start, expected_start, "grabbed at {grab_x}");
            assert_eq!(mutation.window.span_days(), item_window().span_days());
        }
    }

    #[test]
    fn test_small_displacement_is_a_click() {
        let grid = january();
        let mut m = InteractionMachine::default();
        m.begin(target(DragMode::Move), Pointer::new(400.0, 10.0)).unwrap();
        m.update(Pointer::new(403.0, 14.0), &grid, PPD);
        assert_eq!(m.preview("W1"), None);
        let release = m.release(Pointer::new(403.0, 14.0), Instant::now());
        assert_eq!(release, Release::Click("W1".into()));
        assert!(!m.is_active());
    }

    #[test]
    fn test_wandering_then_returning_is_still_a_click() {
        let grid = january();
        let mut m = InteractionMachine::default();
        m.begin(target(DragMode::Move), Pointer::new(400.0, 10.0)).unwrap();
        m.update(Pointer::new(700.0, 10.0), &grid, PPD);
        assert!(m.preview("W1").is_some());
        m.update(Pointer::new(401.0, 11.0), &grid, PPD);
        assert_eq!(m.preview("W1"), None);
        let release = m.release(Pointer::new(401.0, 11.0), Instant::now());
        assert!(matches!(release, Release::Click(_)));
    }

    #[test]
    fn test_vertical_drag_past_threshold_without_column_change() {
        let grid = january();
        let mut m = InteractionMachine::default();
        m.begin(target(DragMode::Move), Pointer::new(400.0, 10.0)).unwrap();
        m.update(Pointer::new(400.0, 40.0), &grid, PPD);
        assert_eq!(m.release(Pointer::new(400.0, 40.0), Instant::now()), Release::Nothing);
    }

    #[test]
    fn test_drag_outside_grid_is_ignored() {
        let grid = january();
        let mut m = InteractionMachine::default();
        m.begin(target(DragMode::Move), Pointer::new(360.0, 0.0)).unwrap();
        assert!(!m.update(Pointer::new(-50.0, 0.0), &grid, PPD));
        assert_eq!(m.preview("W1"), None);
        assert!(m.update(Pointer::new(400.0 + 40.0, 0.0), &grid, PPD));
        let kept = m.preview("W1");
        assert!(!m.update(Pointer::new(5000.0, 0.0), &grid, PPD));
        assert_eq!(m.preview("W1"), kept);
    }

    #[test]
    fn test_resize_left_edge_back_two_days() {
        let grid = january();
        let mut m = InteractionMachine::default();
        m.begin(target(DragMode::Resize(Edge::Start)), Pointer::new(360.0, 0.0)).unwrap();
        assert_eq!(m.state(), InteractionState::Resizing(Edge::Start));
        m.update(Pointer::new(280.0, 0.0), &grid, PPD);
        let mutation = commit(m.release(Pointer::new(280.0, 0.0), Instant::now()));
        assert_eq!(mutation.kind, MutationKind::ResizeStart);
        assert_eq!(mutation.window, DateWindow::new(d(2025, 1, 8), d(2025, 1, 12)));
    }

    #[test]
    fn test_resize_past_end_emits_nothing() {
        let grid = january();
        let mut m = InteractionMachine::default();
        m.begin(target(DragMode::Resize(Edge::Start)), Pointer::new(360.0, 0.0)).unwrap();
        assert!(!m.update(Pointer::new(760.0, 0.0), &grid, PPD));
        assert_eq!(m.preview("W1"), None);
        assert_eq!(m.release(Pointer::new(760.0, 0.0), Instant::now()), Release::Nothing);
    }

    #[test]
    fn test_invalid_resize_frame_keeps_last_valid_preview() {
        let grid = january();
        let mut m = InteractionMachine::default();
        m.begin(target(DragMode::Resize(Edge::Start)), Pointer::new(360.0, 0.0)).unwrap();
        m.update(Pointer::new(320.0, 0.0), &grid, PPD);
        m.update(Pointer::new(760.0, 0.0), &grid, PPD);
        assert_eq!(m.preview("W1"), Some(DateWindow::new(d(2025, 1, 9), d(2025, 1, 12))));
        let mutation = commit(m.release(Pointer::new(760.0, 0.0), Instant::now()));
        assert!(mutation.window.start < mutation.window.end);
        assert_eq!(mutation.window.start, d(2025, 1, 9));
    }

    #[test]
    fn test_resize_right_edge() {
        let grid = january();
        let mut m = InteractionMachine::default();
        m.begin(target(DragMode::Resize(Edge::End)), Pointer::new(480.0, 0.0)).unwrap();
        m.update(Pointer::new(600.0, 0.0), &grid, PPD);
        assert_eq!(m.preview("W1"), Some(DateWindow::new(d(2025, 1, 10), d(2025, 1, 15))));
        // Pulling the end onto the start is rejected.
        m.update(Pointer::new(400.0, 0.0), &grid, PPD);
        assert_eq!(m.preview("W1"), Some(DateWindow::new(d(2025, 1, 10), d(2025, 1, 15))));
        let mutation = commit(m.release(Pointer::new(400.0, 0.0), Instant::now()));
        assert_eq!(mutation.kind, MutationKind::ResizeEnd);
        assert!(mutation.window.start < mutation.window.end);
    }

    #[test]
    fn test_resize_rereads_zoom() {
        let grid = january();
        let mut m = InteractionMachine::default();
        m.begin(target(DragMode::Resize(Edge::End)), Pointer::new(480.0, 0.0)).unwrap();
        m.update(Pointer::new(640.0, 0.0), &grid, 40.0);
        assert_eq!(m.preview("W1").unwrap().end, d(2025, 1, 16));
        m.update(Pointer::new(640.0, 0.0), &grid, 80.0);
        assert_eq!(m.preview("W1").unwrap().end, d(2025, 1, 14));
    }

    #[test]
    fn test_second_session_is_rejected() {
        let mut m = InteractionMachine::default();
        m.begin(target(DragMode::Move), Pointer::new(360.0, 0.0)).unwrap();
        let mut other = target(DragMode::Resize(Edge::End));
        other.item_id = "W2".into();
        match m.begin(other, Pointer::new(0.0, 0.0)) {
            Err(GanttError::SessionActive { item_id }) => assert_eq!(item_id, "W1"),
            other => panic!("expected SessionActive, got {:?}", other),
        }
        assert_eq!(m.session().unwrap().item_id, "W1");
    }

    #[test]
    fn test_cancel_clears_preview_without_mutation() {
        let grid = january();
        let mut m = InteractionMachine::default();
        m.begin(target(DragMode::Move), Pointer::new(360.0, 0.0)).unwrap();
        m.update(Pointer::new(560.0, 0.0), &grid, PPD);
        assert!(m.preview("W1").is_some());
        assert!(m.cancel());
        assert_eq!(m.preview("W1"), None);
        assert_eq!(m.state(), InteractionState::Idle);
        assert_eq!(m.release(Pointer::new(560.0, 0.0), Instant::now()), Release::Nothing);
        assert!(!m.cancel());
    }

    #[test]
    fn test_clicks_suppressed_right_after_commit() {
        let grid = january();
        let mut m = InteractionMachine::default();
        let t0 = Instant::now();
        assert!(m.accepts_click(t0));
        m.begin(target(DragMode::Move), Pointer::new(360.0, 0.0)).unwrap();
        m.update(Pointer::new(560.0, 0.0), &grid, PPD);
        m.release(Pointer::new(560.0, 0.0), t0);
        assert!(!m.accepts_click(t0 + Duration::from_millis(50)));
        assert!(m.accepts_click(t0 + Duration::from_millis(150)));
    }

    #[test]
    fn test_click_release_does_not_start_suppression() {
        let mut m = InteractionMachine::default();
        let t0 = Instant::now();
        m.begin(target(DragMode::Move), Pointer::new(360.0, 0.0)).unwrap();
        m.release(Pointer::new(361.0, 0.0), t0);
        assert!(m.accepts_click(t0 + Duration::from_millis(10)));
    }

    #[test]
    fn test_click_release_within_suppression_window_is_nothing() {
        let grid = january();
        let mut m = InteractionMachine::default();
        let t0 = Instant::now();
        m.begin(target(DragMode::Move), Pointer::new(360.0, 0.0)).unwrap();
        m.update(Pointer::new(560.0, 0.0), &grid, PPD);
        assert!(matches!(m.release(Pointer::new(560.0, 0.0), t0), Release::Commit(_)));

        m.begin(target(DragMode::Move), Pointer::new(400.0, 0.0)).unwrap();
        assert_eq!(
            m.release(Pointer::new(401.0, 0.0), t0 + Duration::from_millis(40)),
            Release::Nothing
        );
        m.begin(target(DragMode::Move), Pointer::new(400.0, 0.0)).unwrap();
        assert_eq!(
            m.release(Pointer::new(401.0, 0.0), t0 + Duration::from_millis(200)),
            Release::Click("W1".into())
        );
    }

    #[test]
    fn test_mutation_applies_to_item() {
        let item = WorkItem::new("W1", "Bracket", d(2025, 1, 10), d(2025, 1, 12));
        let mutation = ItemMutation {
            item_id: "W1".into(),
            kind: MutationKind::Move,
            window: DateWindow::new(d(2025, 1, 15), d(2025, 1, 17)),
        };
        let updated = mutation.apply(&item);
        assert_eq!(updated.window().unwrap(), mutation.window);
        assert_eq!(updated.title, "Bracket");
    }
}
