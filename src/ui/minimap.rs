use egui::{Pos2, Rect, Rounding, Sense, Stroke, Ui, Vec2};
use shopfloor_gantt::engine::minimap::marker_percent;
use shopfloor_gantt::engine::GanttEngine;
use shopfloor_gantt::model::WorkItem;

use crate::ui::gantt_chart::ChartView;
use crate::ui::theme;

/// Overview strip of the whole project span. Returns `(x, width)` of a
/// click or drag so the caller can jump the chart there.
pub fn show_minimap(
    engine: &GanttEngine,
    items: &[WorkItem],
    view: &ChartView,
    ui: &mut Ui,
) -> Option<(f32, f32)> {
    let size = Vec2::new(ui.available_width(), theme::MINIMAP_HEIGHT);
    let (response, painter) = ui.allocate_painter(size, Sense::click_and_drag());
    let rect = response.rect;
    painter.rect_filled(rect, Rounding::same(4.0), theme::BG_DARK);

    let span = engine.span()?;
    let x_at = |percent: f32| rect.left() + percent / 100.0 * rect.width();

    // One thin lane per item, coloured by status
    let lanes = items.len().max(1) as f32;
    let lane_h = ((rect.height() - 6.0) / lanes).clamp(1.0, 4.0);
    for (i, item) in items.iter().enumerate() {
        let Ok(window) = item.window() else { continue };
        let left = x_at(marker_percent(window.start, span));
        let right = x_at(marker_percent(window.end, span)).max(left + 2.0);
        let top = rect.top() + 3.0 + (i as f32 * lane_h) % (rect.height() - 6.0);
        painter.rect_filled(
            Rect::from_min_max(Pos2::new(left, top), Pos2::new(right, top + lane_h)),
            0.0,
            theme::status_color(item.status),
        );
    }

    if let Some((from, to)) = engine.visible_range_percent(view.scroll_x, view.viewport_width) {
        let window_rect = Rect::from_min_max(
            Pos2::new(x_at(from), rect.top()),
            Pos2::new(x_at(to), rect.bottom()),
        );
        painter.rect_filled(window_rect, Rounding::same(3.0), theme::MINIMAP_WINDOW);
        painter.rect_stroke(window_rect, Rounding::same(3.0), Stroke::new(1.0, theme::ACCENT));
    }

    if let Some(state) = engine.viewport_state(view.scroll_x, view.viewport_width) {
        let x = x_at(state.minimap_marker_percent);
        painter.line_segment(
            [Pos2::new(x, rect.top() + 2.0), Pos2::new(x, rect.bottom() - 2.0)],
            Stroke::new(1.0, theme::TEXT_SECONDARY),
        );
        if response.hovered() {
            response.clone().on_hover_text(format!(
                "Centered on {}",
                state.visible_center_date.format("%d %b %Y")
            ));
        }
    }

    if let Some(percent) = engine.today_marker_percent() {
        let x = x_at(percent);
        painter.line_segment(
            [Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())],
            Stroke::new(1.5, theme::TODAY_LINE),
        );
    }

    if response.clicked() || response.dragged() {
        let pos = response.interact_pointer_pos()?;
        return Some((pos.x - rect.left(), rect.width()));
    }
    None
}
