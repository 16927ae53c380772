use std::time::Instant;

use chrono::Datelike;
use egui::scroll_area::ScrollBarVisibility;
use egui::{Color32, CursorIcon, Pos2, Rect, Rounding, Sense, Stroke, Ui, Vec2};
use shopfloor_gantt::engine::coords::{column_at, grid_width, pixel_position};
use shopfloor_gantt::engine::{
    CalendarGrid, ChartEvent, DragMode, Edge, GanttEngine, GroupRow, InteractionState, ItemRow,
    Pointer, ScrollPane,
};

use crate::ui::theme;

const ROW_HEIGHT: f32 = theme::ROW_HEIGHT;
const GROUP_ROW_HEIGHT: f32 = theme::GROUP_ROW_HEIGHT;
const HEADER_HEIGHT: f32 = theme::HEADER_HEIGHT;
const HANDLE_WIDTH: f32 = theme::HANDLE_WIDTH;

/// Horizontal scroll state of the chart, shared with the minimap.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChartView {
    pub scroll_x: f32,
    pub viewport_width: f32,
}

/// A drawn bar and where it sits on screen this frame.
struct BarHit {
    item_id: String,
    rect: Rect,
}

#[derive(Clone, Copy)]
enum MenuChoice {
    Edit,
    Duplicate,
    Delete,
}

/// Render the timeline header strip and the chart body below it.
pub fn show_gantt_chart(
    engine: &mut GanttEngine,
    view: &mut ChartView,
    selected: Option<&str>,
    ui: &mut Ui,
) -> Vec<ChartEvent> {
    let mut events = Vec::new();

    // Ctrl+wheel zooms
    let (scroll_delta, ctrl, escape) = ui.input(|i| {
        (
            i.smooth_scroll_delta.y,
            i.modifiers.ctrl,
            i.key_pressed(egui::Key::Escape),
        )
    });
    if ctrl && scroll_delta != 0.0 && ui.rect_contains_pointer(ui.max_rect()) {
        engine.zoom(scroll_delta > 0.0);
    }
    if escape && engine.cancel_interaction() {
        tracing::debug!("interaction cancelled with Escape");
    }

    let layout = engine.layout();
    let ppd = engine.pixels_per_day();
    let total_width = grid_width(engine.grid(), ppd);
    let content_width = total_width.max(ui.available_width());
    let rows_height: f32 = layout
        .groups
        .iter()
        .map(|g| GROUP_ROW_HEIGHT + g.rows.len() as f32 * ROW_HEIGHT)
        .sum();

    // ── Header companion strip ─────────────────────────────────────
    let mut header_area = egui::ScrollArea::horizontal()
        .id_salt("timeline_header")
        .scroll_bar_visibility(ScrollBarVisibility::AlwaysHidden)
        .drag_to_scroll(false)
        .auto_shrink([false, true]);
    if let Some(offset) = engine.scroll_sync().take_pending(ScrollPane::Companion) {
        header_area = header_area.horizontal_scroll_offset(offset);
    }
    let header_out = header_area.show(ui, |ui| {
        let (response, painter) =
            ui.allocate_painter(Vec2::new(content_width, HEADER_HEIGHT), Sense::hover());
        draw_timeline_header(&painter, response.rect.min, engine.grid(), ppd, content_width);
    });
    if engine
        .scroll_sync()
        .observe(ScrollPane::Companion, header_out.state.offset.x)
        .is_some()
    {
        ui.ctx().request_repaint();
    }

    // ── Chart body ─────────────────────────────────────────────────
    let mut body_area = egui::ScrollArea::both()
        .id_salt("chart_body")
        .drag_to_scroll(false)
        .auto_shrink([false, false]);
    if let Some(offset) = engine.scroll_sync().take_pending(ScrollPane::Main) {
        body_area = body_area.horizontal_scroll_offset(offset);
    }

    let mut menu_request: Option<(MenuChoice, String)> = None;
    let available_height = ui.available_height();
    let body_out = body_area.show(ui, |ui| {
        let height = rows_height.max(available_height);
        let (response, painter) =
            ui.allocate_painter(Vec2::new(content_width, height), Sense::click());
        let origin = response.rect.min;
        let visible = ui.clip_rect().intersect(response.rect);

        painter.rect_filled(response.rect, 0.0, theme::BG_DARK);
        draw_day_columns(&painter, origin, engine.grid(), ppd, height);

        let mut hits: Vec<BarHit> = Vec::new();
        let mut y = origin.y;
        for (group_idx, group) in layout.groups.iter().enumerate() {
            draw_group_row(&painter, origin.x, y, content_width, group);
            y += GROUP_ROW_HEIGHT;

            for (row_idx, row) in group.rows.iter().enumerate() {
                let row_rect = Rect::from_min_size(
                    Pos2::new(origin.x, y),
                    Vec2::new(content_width, ROW_HEIGHT),
                );
                if row_idx % 2 == 1 {
                    painter.rect_filled(row_rect, 0.0, Color32::from_white_alpha(3));
                }
                painter.line_segment(
                    [row_rect.left_bottom(), row_rect.right_bottom()],
                    Stroke::new(0.5, theme::BORDER_SUBTLE),
                );

                if let Some(bar_rect) = bar_rect(row, origin.x, y, total_width) {
                    let is_selected = selected == Some(row.item.id.as_str());
                    draw_bar(&painter, bar_rect, row, is_selected);

                    let bar_response = ui.interact(
                        bar_rect,
                        ui.make_persistent_id(("work-bar", group_idx, &row.item.id)),
                        Sense::click(),
                    );
                    if bar_response.double_clicked() {
                        menu_request = Some((MenuChoice::Edit, row.item.id.clone()));
                    }
                    if bar_response.hovered() && engine.interaction_state() == InteractionState::Idle {
                        show_bar_tooltip(ui, row, bar_rect);
                    }
                    bar_response.context_menu(|ui| {
                        if ui.button(format!("{}  Edit", egui_phosphor::regular::PENCIL_SIMPLE)).clicked() {
                            menu_request = Some((MenuChoice::Edit, row.item.id.clone()));
                            ui.close_menu();
                        }
                        if ui.button(format!("{}  Duplicate", egui_phosphor::regular::COPY)).clicked() {
                            menu_request = Some((MenuChoice::Duplicate, row.item.id.clone()));
                            ui.close_menu();
                        }
                        ui.separator();
                        if ui.button(format!("{}  Delete", egui_phosphor::regular::TRASH)).clicked() {
                            menu_request = Some((MenuChoice::Delete, row.item.id.clone()));
                            ui.close_menu();
                        }
                    });

                    hits.push(BarHit {
                        item_id: row.item.id.clone(),
                        rect: bar_rect,
                    });
                }
                y += ROW_HEIGHT;
            }
        }

        draw_today_line(&painter, origin, engine, height);

        route_pointer(engine, ui, origin, visible, &hits, &mut events);

        if response.hovered() && engine.interaction_state() == InteractionState::Idle {
            if let Some(pos) = response.hover_pos() {
                let over_bar = hits.iter().any(|h| h.rect.contains(pos));
                if !over_bar {
                    let column = column_at(pos.x - origin.x, ppd, engine.grid());
                    if let Some(date) = column.and_then(|c| engine.grid().date_at(c)) {
                        response.on_hover_text_at_pointer(date.format("%a %d %b %Y").to_string());
                    }
                }
            }
        }
    });

    view.scroll_x = body_out.state.offset.x;
    view.viewport_width = body_out.inner_rect.width();
    if engine
        .scroll_sync()
        .observe(ScrollPane::Main, body_out.state.offset.x)
        .is_some()
    {
        ui.ctx().request_repaint();
    }

    if let Some((choice, item_id)) = menu_request {
        let event = match choice {
            MenuChoice::Edit => engine.request_edit(&item_id),
            MenuChoice::Duplicate => engine.request_duplicate(&item_id),
            MenuChoice::Delete => engine.request_delete(&item_id),
        };
        events.extend(event);
    }

    events
}

/// Feed raw primary-button input to the engine in content coordinates.
fn route_pointer(
    engine: &mut GanttEngine,
    ui: &Ui,
    origin: Pos2,
    visible: Rect,
    hits: &[BarHit],
    events: &mut Vec<ChartEvent>,
) {
    let (pressed, released, pos) = ui.input(|i| {
        (
            i.pointer.primary_pressed(),
            i.pointer.primary_released(),
            i.pointer.latest_pos(),
        )
    });
    let to_content = |p: Pos2| Pointer::new(p.x - origin.x, p.y - origin.y);

    if pressed && engine.interaction_state() == InteractionState::Idle {
        if let Some(pos) = pos.filter(|p| visible.contains(*p)) {
            if let Some((hit, mode)) = hit_test(hits, pos) {
                let result = engine.pointer_down(
                    &hit.item_id,
                    mode,
                    to_content(pos),
                    hit.rect.left() - origin.x,
                    hit.rect.width(),
                );
                if let Err(e) = result {
                    tracing::warn!(item = %hit.item_id, error = %e, "cannot start interaction");
                }
            }
        }
    }

    match engine.interaction_state() {
        InteractionState::Idle => {
            if let Some((_, mode)) = pos.and_then(|p| hit_test(hits, p)) {
                ui.ctx().set_cursor_icon(match mode {
                    DragMode::Move => CursorIcon::Grab,
                    DragMode::Resize(_) => CursorIcon::ResizeHorizontal,
                });
            }
            return;
        }
        InteractionState::Dragging => ui.ctx().set_cursor_icon(CursorIcon::Grabbing),
        InteractionState::Resizing(_) => ui.ctx().set_cursor_icon(CursorIcon::ResizeHorizontal),
    }

    if let Some(p) = pos {
        if engine.pointer_move(to_content(p)) {
            ui.ctx().request_repaint();
        }
    }
    if released {
        let inside = pos.is_some_and(|p| visible.contains(p));
        let at = pos.map(to_content).unwrap_or_default();
        events.extend(engine.pointer_up(at, inside, Instant::now()));
        ui.ctx().request_repaint();
    }
}

/// Edge handles win over the bar body; later bars win over earlier ones.
fn hit_test(hits: &[BarHit], pos: Pos2) -> Option<(&BarHit, DragMode)> {
    hits.iter().rev().find_map(|hit| {
        let zone = hit.rect.expand2(Vec2::new(HANDLE_WIDTH * 0.5, 0.0));
        if !zone.contains(pos) {
            return None;
        }
        // Narrow bars are moved, not resized.
        if hit.rect.width() > HANDLE_WIDTH * 3.0 {
            if (pos.x - hit.rect.left()).abs() <= HANDLE_WIDTH {
                return Some((hit, DragMode::Resize(Edge::Start)));
            }
            if (pos.x - hit.rect.right()).abs() <= HANDLE_WIDTH {
                return Some((hit, DragMode::Resize(Edge::End)));
            }
        }
        hit.rect.contains(pos).then_some((hit, DragMode::Move))
    })
}

fn bar_rect(row: &ItemRow, left: f32, top: f32, total_width: f32) -> Option<Rect> {
    let (x, width) = row.bar?.to_pixels(total_width);
    Some(Rect::from_min_size(
        Pos2::new(left + x, top + theme::BAR_INSET),
        Vec2::new(width, ROW_HEIGHT - theme::BAR_INSET * 2.0),
    ))
}

fn draw_timeline_header(
    painter: &egui::Painter,
    origin: Pos2,
    grid: &CalendarGrid,
    ppd: f32,
    width: f32,
) {
    painter.rect_filled(
        Rect::from_min_size(origin, Vec2::new(width, HEADER_HEIGHT)),
        0.0,
        theme::BG_HEADER,
    );
    painter.line_segment(
        [
            Pos2::new(origin.x, origin.y + HEADER_HEIGHT),
            Pos2::new(origin.x + width, origin.y + HEADER_HEIGHT),
        ],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );

    let mut previous_month = None;
    for (i, day) in grid.days().iter().enumerate() {
        let x = origin.x + pixel_position(i, ppd);

        painter.line_segment(
            [
                Pos2::new(x, origin.y + HEADER_HEIGHT - 18.0),
                Pos2::new(x, origin.y + HEADER_HEIGHT),
            ],
            Stroke::new(0.5, theme::GRID_LINE),
        );

        let day_color = if day.is_today {
            theme::TODAY_LINE
        } else if day.is_weekend {
            theme::TEXT_DIM
        } else {
            theme::TEXT_SECONDARY
        };
        painter.text(
            Pos2::new(x + 3.0, origin.y + 30.0),
            egui::Align2::LEFT_CENTER,
            day.date.format("%d").to_string(),
            theme::font_sub(),
            day_color,
        );

        let month = (day.date.year(), day.date.month());
        if previous_month != Some(month) {
            previous_month = Some(month);
            painter.text(
                Pos2::new(x + 3.0, origin.y + 12.0),
                egui::Align2::LEFT_CENTER,
                day.date.format("%b %Y").to_string(),
                theme::font_header(),
                theme::TEXT_PRIMARY,
            );
        }
    }
}

fn draw_day_columns(painter: &egui::Painter, origin: Pos2, grid: &CalendarGrid, ppd: f32, height: f32) {
    for (i, day) in grid.days().iter().enumerate() {
        let x = origin.x + pixel_position(i, ppd);
        if day.is_weekend {
            painter.rect_filled(
                Rect::from_min_size(Pos2::new(x, origin.y), Vec2::new(ppd, height)),
                0.0,
                theme::BG_WEEKEND,
            );
        }
        painter.line_segment(
            [Pos2::new(x, origin.y), Pos2::new(x, origin.y + height)],
            Stroke::new(0.5, theme::GRID_LINE),
        );
    }
}

fn draw_group_row(painter: &egui::Painter, left: f32, top: f32, width: f32, group: &GroupRow) {
    let rect = Rect::from_min_size(Pos2::new(left, top), Vec2::new(width, GROUP_ROW_HEIGHT));
    painter.rect_filled(rect, 0.0, theme::BG_GROUP);
    if group.overbooked {
        painter.rect_filled(rect, 0.0, theme::BG_OVERBOOKED);
    }
    painter.line_segment(
        [rect.left_bottom(), rect.right_bottom()],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );
    painter.text(
        Pos2::new(left + 8.0, rect.center().y),
        egui::Align2::LEFT_CENTER,
        format!("{}  ·  {:.0}%", group.resource_name, group.utilization),
        theme::font_header(),
        if group.overbooked { theme::OVERBOOKED } else { theme::TEXT_SECONDARY },
    );
}

fn draw_bar(painter: &egui::Painter, bar_rect: Rect, row: &ItemRow, is_selected: bool) {
    let rounding = Rounding::same(theme::BAR_ROUNDING);
    let base = theme::status_color(row.item.status);
    let fill = if row.is_preview { base.gamma_multiply(0.75) } else { base };

    // Soft shadow
    painter.rect_filled(
        bar_rect.translate(Vec2::new(1.0, 2.0)),
        rounding,
        Color32::from_black_alpha(35),
    );
    painter.rect_filled(bar_rect, rounding, fill);

    let progress = row.item.progress_percent() as f32 / 100.0;
    if progress > 0.0 {
        let progress_rect = Rect::from_min_size(
            bar_rect.min,
            Vec2::new(bar_rect.width() * progress, bar_rect.height()),
        );
        painter.rect_filled(progress_rect, rounding, theme::PROGRESS_OVERLAY);
    }

    if row.is_preview {
        painter.rect_stroke(bar_rect.expand(1.0), rounding, Stroke::new(1.5, theme::HANDLE_COLOR));
    } else if is_selected {
        painter.rect_stroke(
            bar_rect.expand(1.5),
            Rounding::same(theme::BAR_ROUNDING + 1.5),
            Stroke::new(2.0, theme::BORDER_ACCENT),
        );
    }

    // Pill handles
    if is_selected || row.is_preview {
        let handle_h = bar_rect.height() * 0.55;
        let handle_y = bar_rect.center().y - handle_h / 2.0;
        for x in [bar_rect.left() - 1.5, bar_rect.right() - 2.5] {
            painter.rect_filled(
                Rect::from_min_size(Pos2::new(x, handle_y), Vec2::new(4.0, handle_h)),
                Rounding::same(2.0),
                theme::HANDLE_COLOR,
            );
        }
    }

    if bar_rect.width() > 30.0 {
        let galley = painter.layout_no_wrap(row.item.title.clone(), theme::font_bar(), theme::TEXT_ON_BAR);
        let text_y = bar_rect.top() + (bar_rect.height() - galley.size().y) / 2.0;
        painter
            .with_clip_rect(bar_rect)
            .galley(Pos2::new(bar_rect.left() + 6.0, text_y), galley, Color32::TRANSPARENT);
    }
}

fn show_bar_tooltip(ui: &Ui, row: &ItemRow, bar_rect: Rect) {
    egui::show_tooltip_at_pointer(
        ui.ctx(),
        ui.layer_id(),
        egui::Id::new(("work-tip", &row.item.id, bar_rect.top() as i32)),
        |ui| {
            ui.strong(&row.item.title);
            if let Some(order) = &row.item.order_number {
                ui.label(order);
            }
            if let Some(window) = row.window {
                ui.label(format!(
                    "{} → {}  ({} days)",
                    window.start.format("%d/%m/%Y"),
                    window.end.format("%d/%m/%Y"),
                    window.duration_days(),
                ));
            }
            ui.label(format!(
                "{} · {}% · {} {}",
                row.item.status.label(),
                row.item.progress_percent(),
                theme::priority_icon(row.item.priority),
                row.item.priority.label(),
            ));
        },
    );
}

fn draw_today_line(painter: &egui::Painter, origin: Pos2, engine: &GanttEngine, height: f32) {
    let Some(index) = engine.grid().index_of(engine.today()) else {
        return;
    };
    let ppd = engine.pixels_per_day();
    let x = origin.x + pixel_position(index, ppd) + ppd / 2.0;
    painter.line_segment(
        [Pos2::new(x, origin.y), Pos2::new(x, origin.y + height)],
        Stroke::new(1.5, theme::TODAY_LINE),
    );
}
