//! `GanttEngine`: the component a host screen talks to.
//!
//! Holds the latest item snapshot, the cached grid and groups, and the
//! interaction machine. Entry points return [`ChartEvent`]s which the host
//! dispatches synchronously; the engine never writes to the item store.

use std::time::Instant;

use chrono::NaiveDate;

use super::coords::{bar_position, BarGeometry};
use super::filter::ItemFilter;
use super::grid::{CalendarGrid, ProjectWindow};
use super::grouping::{group_items, GroupingDimension, ResourceGroups};
use super::interaction::{
    BarTarget, DragMode, InteractionMachine, InteractionState, ItemMutation, Pointer, Release,
};
use super::minimap::{
    center_scroll_offset, date_at_minimap_x, today_marker_percent, visible_range_percent,
    ProjectSpan, ScrollCommand, ScrollSync, ViewportState,
};
use super::zoom::ZoomController;
use crate::config::ChartSettings;
use crate::error::Result;
use crate::model::{DateWindow, WorkItem};

/// Requests for the host, one per handled interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartEvent {
    Click(WorkItem),
    /// `item` already carries the new dates.
    Mutate {
        item: WorkItem,
        mutation: ItemMutation,
    },
    Edit(WorkItem),
    Duplicate(WorkItem),
    Delete(WorkItem),
}

/// A work item whose dates could not be laid out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleWarning {
    pub item_id: String,
    pub message: String,
}

/// One item row inside a group.
#[derive(Debug, Clone)]
pub struct ItemRow {
    pub item: WorkItem,
    /// Preview window while dragged, otherwise the committed one.
    pub window: Option<DateWindow>,
    /// `None` for bad dates or items outside the visible window.
    pub bar: Option<BarGeometry>,
    pub is_preview: bool,
}

#[derive(Debug, Clone)]
pub struct GroupRow {
    pub resource_name: String,
    pub utilization: f64,
    pub overbooked: bool,
    pub rows: Vec<ItemRow>,
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, Default)]
pub struct ChartLayout {
    pub groups: Vec<GroupRow>,
}

#[derive(Debug, Clone)]
pub struct GanttEngine {
    settings: ChartSettings,
    zoom: ZoomController,
    filter: ItemFilter,
    today: NaiveDate,
    explicit_window: Option<ProjectWindow>,
    items: Vec<WorkItem>,
    window: ProjectWindow,
    grid: CalendarGrid,
    groups: ResourceGroups,
    warnings: Vec<ScheduleWarning>,
    interaction: InteractionMachine,
    scroll: ScrollSync,
}

impl GanttEngine {
    pub fn new(settings: ChartSettings, today: NaiveDate) -> Self {
        let window = ProjectWindow::from_windows(
            std::iter::empty(),
            today,
            settings.window_padding_before,
            settings.window_padding_after,
        );
        let mut engine = Self {
            zoom: settings.zoom_controller(),
            interaction: InteractionMachine::new(settings.interaction_config()),
            grid: CalendarGrid::build(window, settings.show_weekends, today),
            settings,
            filter: ItemFilter::default(),
            today,
            explicit_window: None,
            items: Vec::new(),
            window,
            groups: ResourceGroups::default(),
            warnings: Vec::new(),
            scroll: ScrollSync::default(),
        };
        engine.regroup();
        engine
    }

    // ── Inputs ─────────────────────────────────────────────────────

    /// Take a new item snapshot. A session on an item that is still
    /// present carries on; one whose item vanished is cancelled.
    pub fn set_items(&mut self, items: Vec<WorkItem>) {
        self.items = items;
        let vanished = self
            .interaction
            .session()
            .map(|s| s.item_id.clone())
            .filter(|id| !self.items.iter().any(|i| &i.id == id));
        if let Some(item_id) = vanished {
            tracing::info!(item = %item_id, "dragged item disappeared, cancelling");
            self.interaction.cancel();
        }
        self.collect_warnings();
        self.refresh_window();
        self.regroup();
    }

    pub fn set_grouping(&mut self, grouping: GroupingDimension) {
        if self.settings.grouping != grouping {
            self.settings.grouping = grouping;
            self.regroup();
        }
    }

    pub fn set_show_weekends(&mut self, show_weekends: bool) {
        if self.settings.show_weekends != show_weekends {
            self.settings.show_weekends = show_weekends;
            self.rebuild_grid();
            self.regroup();
        }
    }

    pub fn set_filter(&mut self, filter: ItemFilter) {
        if self.filter != filter {
            self.filter = filter;
            self.regroup();
        }
    }

    /// Pin the visible window, or `None` to derive it from the items.
    pub fn set_window(&mut self, window: Option<ProjectWindow>) {
        self.explicit_window = window;
        self.refresh_window();
        self.regroup();
    }

    pub fn set_today(&mut self, today: NaiveDate) {
        if self.today != today {
            self.today = today;
            self.refresh_window();
            self.rebuild_grid();
            self.regroup();
        }
    }

    pub fn zoom(&mut self, zoom_in: bool) -> bool {
        self.zoom.zoom(zoom_in)
    }

    pub fn set_zoom(&mut self, pixels_per_day: f32) -> bool {
        self.zoom.set(pixels_per_day)
    }

    // ── Reads ──────────────────────────────────────────────────────

    pub fn items(&self) -> &[WorkItem] {
        &self.items
    }

    pub fn item(&self, item_id: &str) -> Option<&WorkItem> {
        self.items.iter().find(|i| i.id == item_id)
    }

    pub fn grid(&self) -> &CalendarGrid {
        &self.grid
    }

    pub fn window(&self) -> ProjectWindow {
        self.window
    }

    pub fn groups(&self) -> &ResourceGroups {
        &self.groups
    }

    pub fn warnings(&self) -> &[ScheduleWarning] {
        &self.warnings
    }

    pub fn filter(&self) -> &ItemFilter {
        &self.filter
    }

    pub fn grouping(&self) -> GroupingDimension {
        self.settings.grouping
    }

    pub fn show_weekends(&self) -> bool {
        self.settings.show_weekends
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn pixels_per_day(&self) -> f32 {
        self.zoom.pixels_per_day()
    }

    pub fn zoom_controller(&self) -> &ZoomController {
        &self.zoom
    }

    pub fn interaction_state(&self) -> InteractionState {
        self.interaction.state()
    }

    /// Current settings, including zoom, for persisting.
    pub fn settings(&self) -> ChartSettings {
        ChartSettings {
            pixels_per_day: self.zoom.pixels_per_day(),
            ..self.settings.clone()
        }
    }

    /// Window to draw for an item: the live preview if it is being
    /// dragged, otherwise its committed dates.
    pub fn display_window(&self, item: &WorkItem) -> Option<DateWindow> {
        self.interaction
            .preview(&item.id)
            .or_else(|| item.window().ok())
    }

    pub fn layout(&self) -> ChartLayout {
        let min_width = self.settings.min_bar_width_percent;
        let groups = self
            .groups
            .iter()
            .map(|group| GroupRow {
                resource_name: group.resource_name.clone(),
                utilization: group.utilization,
                overbooked: group.is_overbooked(),
                rows: group
                    .items
                    .iter()
                    .map(|item| {
                        let window = self.display_window(item);
                        ItemRow {
                            bar: window.and_then(|w| bar_position(w.start, w.end, &self.grid, min_width)),
                            window,
                            is_preview: self.interaction.preview(&item.id).is_some(),
                            item: item.clone(),
                        }
                    })
                    .collect(),
            })
            .collect();
        ChartLayout { groups }
    }

    // ── Pointer input ──────────────────────────────────────────────

    /// Pointer down on an item's bar (`DragMode::Move`) or edge handle.
    pub fn pointer_down(
        &mut self,
        item_id: &str,
        mode: DragMode,
        at: Pointer,
        bar_left: f32,
        bar_width: f32,
    ) -> Result<()> {
        let window = match self.item(item_id) {
            Some(item) => item.window()?,
            None => {
                tracing::debug!(item = item_id, "pointer down on unknown item");
                return Ok(());
            }
        };
        self.interaction.begin(
            BarTarget {
                item_id: item_id.to_string(),
                window,
                mode,
                bar_left,
                bar_width,
            },
            at,
        )
    }

    /// Returns true when the live preview changed.
    pub fn pointer_move(&mut self, at: Pointer) -> bool {
        let pixels_per_day = self.zoom.pixels_per_day();
        self.interaction.update(at, &self.grid, pixels_per_day)
    }

    /// Release. Outside the chart it cancels; otherwise it may produce a
    /// click or a mutation request.
    pub fn pointer_up(&mut self, at: Pointer, inside_chart: bool, now: Instant) -> Option<ChartEvent> {
        if !inside_chart {
            self.interaction.cancel();
            return None;
        }
        self.pointer_move(at);
        match self.interaction.release(at, now) {
            Release::Click(item_id) => self.item(&item_id).cloned().map(ChartEvent::Click),
            Release::Commit(mutation) => {
                let Some(item) = self.item(&mutation.item_id) else {
                    tracing::warn!(item = %mutation.item_id, "committed item no longer exists");
                    return None;
                };
                Some(ChartEvent::Mutate {
                    item: mutation.apply(item),
                    mutation,
                })
            }
            Release::Nothing => None,
        }
    }

    /// Escape key or lost pointer.
    pub fn cancel_interaction(&mut self) -> bool {
        self.interaction.cancel()
    }

    /// A click delivered separately from the pointer-up sequence.
    pub fn click(&self, item_id: &str, now: Instant) -> Option<ChartEvent> {
        if self.interaction.is_active() || !self.interaction.accepts_click(now) {
            return None;
        }
        self.item(item_id).cloned().map(ChartEvent::Click)
    }

    pub fn request_edit(&self, item_id: &str) -> Option<ChartEvent> {
        self.item(item_id).cloned().map(ChartEvent::Edit)
    }

    pub fn request_duplicate(&self, item_id: &str) -> Option<ChartEvent> {
        self.item(item_id).cloned().map(ChartEvent::Duplicate)
    }

    pub fn request_delete(&self, item_id: &str) -> Option<ChartEvent> {
        self.item(item_id).cloned().map(ChartEvent::Delete)
    }

    // ── Minimap / viewport ─────────────────────────────────────────

    pub fn span(&self) -> Option<ProjectSpan> {
        ProjectSpan::from_grid(&self.grid)
    }

    pub fn viewport_state(&self, scroll_x: f32, viewport_width: f32) -> Option<ViewportState> {
        ViewportState::compute(
            &self.grid,
            self.span()?,
            scroll_x,
            viewport_width,
            self.zoom.pixels_per_day(),
        )
    }

    pub fn visible_range_percent(&self, scroll_x: f32, viewport_width: f32) -> Option<(f32, f32)> {
        visible_range_percent(
            &self.grid,
            self.span()?,
            scroll_x,
            viewport_width,
            self.zoom.pixels_per_day(),
        )
    }

    pub fn today_marker_percent(&self) -> Option<f32> {
        Some(today_marker_percent(self.today, self.span()?))
    }

    /// Minimap click at `x`: scroll both panes so that date is centered.
    pub fn minimap_jump(
        &mut self,
        x: f32,
        minimap_width: f32,
        viewport_width: f32,
    ) -> Option<[ScrollCommand; 2]> {
        let target = date_at_minimap_x(x, minimap_width, self.span()?);
        let offset = center_scroll_offset(target, &self.grid, self.zoom.pixels_per_day(), viewport_width);
        tracing::debug!(%target, offset, "minimap jump");
        Some(self.scroll.jump_to(offset))
    }

    pub fn scroll_sync(&mut self) -> &mut ScrollSync {
        &mut self.scroll
    }

    // ── Recalculation ──────────────────────────────────────────────

    fn collect_warnings(&mut self) {
        self.warnings = self
            .items
            .iter()
            .filter_map(|item| {
                item.window().err().map(|e| ScheduleWarning {
                    item_id: item.id.clone(),
                    message: e.to_string(),
                })
            })
            .collect();
        for w in &self.warnings {
            tracing::warn!(item = %w.item_id, "{}", w.message);
        }
    }

    fn refresh_window(&mut self) {
        let window = self.explicit_window.unwrap_or_else(|| {
            ProjectWindow::from_windows(
                self.items.iter().filter_map(|i| i.window().ok()),
                self.today,
                self.settings.window_padding_before,
                self.settings.window_padding_after,
            )
        });
        if window != self.window {
            self.window = window;
            self.rebuild_grid();
        }
    }

    fn rebuild_grid(&mut self) {
        self.grid = CalendarGrid::build(self.window, self.settings.show_weekends, self.today);
        tracing::debug!(
            start = %self.window.start,
            end = %self.window.end,
            days = self.grid.len(),
            "calendar grid rebuilt"
        );
    }

    fn regroup(&mut self) {
        let visible = self.filter.apply(&self.items);
        self.groups = group_items(visible, self.settings.grouping, &self.grid);
        tracing::debug!(groups = self.groups.len(), grouping = ?self.settings.grouping, "items regrouped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::grouping::UNASSIGNED;
    use crate::engine::interaction::{Edge, MutationKind};
    use crate::error::GanttError;
    use crate::model::WorkStatus;
    use std::time::Duration;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn item(id: &str, start: NaiveDate, end: NaiveDate, machine: &str) -> WorkItem {
        let mut it = WorkItem::new(id, format!("Item {id}"), start, end);
        it.machines = vec![machine.to_string()];
        it
    }

    /// January 2025 pinned, weekends shown, 40 px/day: 2025-01-10 is x = 360.
    fn engine_with(items: Vec<WorkItem>) -> GanttEngine {
        let mut engine = GanttEngine::new(ChartSettings::default(), d(2025, 1, 15));
        engine.set_window(Some(ProjectWindow::new(d(2025, 1, 1), d(2025, 1, 31))));
        engine.set_items(items);
        engine
    }

    #[test]
    fn test_drag_end_to_end_emits_updated_item() {
        let mut engine = engine_with(vec![item("W1", d(2025, 1, 10), d(2025, 1, 12), "Laser-1")]);
        engine
            .pointer_down("W1", DragMode::Move, Pointer::new(360.0, 5.0), 360.0, 120.0)
            .unwrap();
        assert!(engine.pointer_move(Pointer::new(560.0, 5.0)));

        let layout = engine.layout();
        let row = &layout.groups[0].rows[0];
        assert!(row.is_preview);
        assert_eq!(row.window.unwrap().start, d(2025, 1, 15));
        // Committed data is untouched while previewing.
        assert_eq!(engine.item("W1").unwrap().planned_start, "2025-01-10");

        match engine.pointer_up(Pointer::new(560.0, 5.0), true, Instant::now()) {
            Some(ChartEvent::Mutate { item, mutation }) => {
                assert_eq!(mutation.kind, MutationKind::Move);
                assert_eq!(item.planned_start, "2025-01-15");
                assert_eq!(item.planned_end.as_deref(), Some("2025-01-17"));
            }
            other => panic!("expected mutation, got {:?}", other),
        }
        assert!(!engine.layout().groups[0].rows[0].is_preview);
    }

    #[test]
    fn test_release_outside_chart_cancels() {
        let mut engine = engine_with(vec![item("W1", d(2025, 1, 10), d(2025, 1, 12), "M")]);
        engine
            .pointer_down("W1", DragMode::Resize(Edge::End), Pointer::new(480.0, 0.0), 360.0, 120.0)
            .unwrap();
        engine.pointer_move(Pointer::new(600.0, 0.0));
        assert_eq!(engine.pointer_up(Pointer::new(600.0, 0.0), false, Instant::now()), None);
        assert_eq!(engine.interaction_state(), InteractionState::Idle);
        assert!(!engine.layout().groups[0].rows[0].is_preview);
    }

    #[test]
    fn test_tiny_drag_is_click() {
        let mut engine = engine_with(vec![item("W1", d(2025, 1, 10), d(2025, 1, 12), "M")]);
        engine
            .pointer_down("W1", DragMode::Move, Pointer::new(380.0, 5.0), 360.0, 120.0)
            .unwrap();
        let event = engine.pointer_up(Pointer::new(382.0, 7.0), true, Instant::now());
        assert!(matches!(event, Some(ChartEvent::Click(ref i)) if i.id == "W1"));
    }

    #[test]
    fn test_click_suppressed_after_commit() {
        let mut engine = engine_with(vec![item("W1", d(2025, 1, 10), d(2025, 1, 12), "M")]);
        let t0 = Instant::now();
        engine
            .pointer_down("W1", DragMode::Resize(Edge::Start), Pointer::new(360.0, 0.0), 360.0, 120.0)
            .unwrap();
        assert!(engine.pointer_up(Pointer::new(280.0, 0.0), true, t0).is_some());
        assert_eq!(engine.click("W1", t0 + Duration::from_millis(30)), None);
        assert!(engine.click("W1", t0 + Duration::from_millis(300)).is_some());
    }

    #[test]
    fn test_bar_click_right_after_resize_is_swallowed() {
        let mut engine = engine_with(vec![item("W1", d(2025, 1, 10), d(2025, 1, 12), "M")]);
        let t0 = Instant::now();
        engine
            .pointer_down("W1", DragMode::Resize(Edge::Start), Pointer::new(360.0, 0.0), 360.0, 120.0)
            .unwrap();
        assert!(engine.pointer_up(Pointer::new(280.0, 0.0), true, t0).is_some());

        engine
            .pointer_down("W1", DragMode::Move, Pointer::new(320.0, 5.0), 280.0, 200.0)
            .unwrap();
        assert_eq!(
            engine.pointer_up(Pointer::new(321.0, 5.0), true, t0 + Duration::from_millis(30)),
            None
        );
        assert_eq!(engine.interaction_state(), InteractionState::Idle);

        engine
            .pointer_down("W1", DragMode::Move, Pointer::new(320.0, 5.0), 280.0, 200.0)
            .unwrap();
        match engine.pointer_up(Pointer::new(321.0, 5.0), true, t0 + Duration::from_millis(300)) {
            Some(ChartEvent::Click(clicked)) => assert_eq!(clicked.id, "W1"),
            other => panic!("expected click, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_dates_warn_but_stay_listed() {
        let mut bad = item("BAD", d(2025, 1, 10), d(2025, 1, 12), "M");
        bad.planned_end = Some("2025-13-45".into());
        let engine = engine_with(vec![bad, item("OK", d(2025, 1, 1), d(2025, 1, 31), "M")]);

        assert_eq!(engine.warnings().len(), 1);
        assert_eq!(engine.warnings()[0].item_id, "BAD");
        let layout = engine.layout();
        let rows = &layout.groups[0].rows;
        assert_eq!(rows.len(), 2);
        let bad_row = rows.iter().find(|r| r.item.id == "BAD").unwrap();
        assert!(bad_row.bar.is_none());
        assert!((layout.groups[0].utilization - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_bad_item_cannot_be_dragged() {
        let mut bad = item("BAD", d(2025, 1, 10), d(2025, 1, 12), "M");
        bad.planned_start = "soon".into();
        let mut engine = engine_with(vec![bad]);
        let err = engine
            .pointer_down("BAD", DragMode::Move, Pointer::new(0.0, 0.0), 0.0, 40.0)
            .unwrap_err();
        assert!(matches!(err, GanttError::InvalidDate { .. }));
        assert_eq!(engine.interaction_state(), InteractionState::Idle);
    }

    #[test]
    fn test_filter_applies_before_grouping() {
        let mut a = item("A", d(2025, 1, 1), d(2025, 1, 10), "M");
        a.status = WorkStatus::Delayed;
        let b = item("B", d(2025, 1, 1), d(2025, 1, 10), "M");
        let mut engine = engine_with(vec![a, b]);
        assert!((engine.groups().get("M").unwrap().utilization - 20.0 / 31.0 * 100.0).abs() < 1e-9);

        engine.set_filter(ItemFilter {
            status: Some(WorkStatus::Delayed),
            ..Default::default()
        });
        let m = engine.groups().get("M").unwrap();
        assert_eq!(m.items.len(), 1);
        assert!((m.utilization - 10.0 / 31.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_new_snapshot_keeps_session_for_untouched_items() {
        let items = vec![
            item("W1", d(2025, 1, 10), d(2025, 1, 12), "M"),
            item("W2", d(2025, 1, 3), d(2025, 1, 4), "M"),
        ];
        let mut engine = engine_with(items.clone());
        engine
            .pointer_down("W1", DragMode::Move, Pointer::new(360.0, 0.0), 360.0, 120.0)
            .unwrap();
        engine.pointer_move(Pointer::new(560.0, 0.0));

        let mut refreshed = items.clone();
        refreshed[1].progress = 50;
        engine.set_items(refreshed);
        assert_eq!(engine.interaction_state(), InteractionState::Dragging);
        assert!(matches!(
            engine.pointer_up(Pointer::new(560.0, 0.0), true, Instant::now()),
            Some(ChartEvent::Mutate { .. })
        ));

        engine
            .pointer_down("W1", DragMode::Move, Pointer::new(360.0, 0.0), 360.0, 120.0)
            .unwrap();
        engine.set_items(vec![items[1].clone()]);
        assert_eq!(engine.interaction_state(), InteractionState::Idle);
    }

    #[test]
    fn test_weekend_toggle_rebuilds_grid_and_utilization() {
        let mut engine = engine_with(vec![item("W1", d(2025, 1, 1), d(2025, 1, 31), "M")]);
        assert_eq!(engine.grid().len(), 31);
        engine.set_show_weekends(false);
        assert_eq!(engine.grid().len(), 23);
        assert!(engine.grid().days().iter().all(|day| !day.is_weekend));
        assert!((engine.groups().get("M").unwrap().utilization - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_window_follows_items_when_not_pinned() {
        let mut engine = GanttEngine::new(ChartSettings::default(), d(2025, 1, 15));
        engine.set_items(vec![item("W1", d(2025, 3, 10), d(2025, 3, 12), "M")]);
        assert_eq!(engine.window().start, d(2025, 3, 3));
        assert_eq!(engine.window().end, d(2025, 4, 11));
        assert_eq!(engine.grid().first_date(), Some(d(2025, 3, 3)));
    }

    #[test]
    fn test_unassigned_and_grouping_switch() {
        let mut a = item("A", d(2025, 1, 1), d(2025, 1, 2), "M");
        a.assignee = Some("Ito".into());
        let mut engine = engine_with(vec![a, item("B", d(2025, 1, 1), d(2025, 1, 2), "M")]);
        assert_eq!(engine.groups().len(), 1);
        engine.set_grouping(GroupingDimension::Person);
        let names: Vec<_> = engine.layout().groups.iter().map(|g| g.resource_name.clone()).collect();
        assert_eq!(names, vec!["Ito".to_string(), UNASSIGNED.to_string()]);
    }

    #[test]
    fn test_minimap_jump_centers_target() {
        let mut engine = GanttEngine::new(ChartSettings::default(), d(2025, 1, 15));
        engine.set_window(Some(ProjectWindow::new(d(2025, 1, 1), d(2025, 4, 1))));
        let cmds = engine.minimap_jump(150.0, 300.0, 400.0).unwrap();
        assert!((cmds[0].offset - 1620.0).abs() < 1e-3);
        let state = engine.viewport_state(cmds[0].offset, 400.0).unwrap();
        assert_eq!(state.visible_center_date, d(2025, 2, 15));
        assert_eq!(engine.scroll_sync().take_pending(crate::engine::minimap::ScrollPane::Main), Some(cmds[0].offset));
    }

    #[test]
    fn test_zoom_is_read_live() {
        let mut engine = engine_with(vec![item("W1", d(2025, 1, 10), d(2025, 1, 12), "M")]);
        engine.set_zoom(1000.0);
        assert_eq!(engine.pixels_per_day(), 120.0);
        engine
            .pointer_down("W1", DragMode::Resize(Edge::End), Pointer::new(1440.0, 0.0), 1080.0, 360.0)
            .unwrap();
        engine.pointer_move(Pointer::new(1680.0, 0.0));
        match engine.pointer_up(Pointer::new(1680.0, 0.0), true, Instant::now()) {
            Some(ChartEvent::Mutate { mutation, .. }) => {
                assert_eq!(mutation.window.end, d(2025, 1, 14));
            }
            other => panic!("expected mutation, got {:?}", other),
        }
        assert_eq!(engine.settings().pixels_per_day, 120.0);
    }

    #[test]
    fn test_host_requests() {
        let engine = engine_with(vec![item("W1", d(2025, 1, 10), d(2025, 1, 12), "M")]);
        assert!(matches!(engine.request_edit("W1"), Some(ChartEvent::Edit(_))));
        assert!(matches!(engine.request_duplicate("W1"), Some(ChartEvent::Duplicate(_))));
        assert!(matches!(engine.request_delete("W1"), Some(ChartEvent::Delete(_))));
        assert_eq!(engine.request_edit("nope"), None);
        assert!(engine.today_marker_percent().unwrap() > 0.0);
    }
}
