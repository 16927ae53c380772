use crate::ui::theme;
use egui::{Color32, RichText, Ui};
use shopfloor_gantt::engine::{GanttEngine, ResourceGroup};
use shopfloor_gantt::model::WorkItem;

/// Actions the resource panel can request.
pub enum PanelAction {
    None,
    Select(String),
    Edit(String),
}

/// Render the left-side resource panel: one collapsible section per
/// group with its utilization, then any items with unusable dates.
pub fn show_resource_panel(engine: &GanttEngine, selected: Option<&str>, ui: &mut Ui) -> PanelAction {
    let mut action = PanelAction::None;
    let groups = engine.groups();

    ui.add_space(2.0);
    ui.horizontal(|ui| {
        ui.label(
            RichText::new(engine.grouping().label())
                .strong()
                .size(15.0)
                .color(theme::TEXT_PRIMARY),
        );
        ui.add_space(4.0);
        ui.label(
            RichText::new(format!("({})", groups.len()))
                .size(11.0)
                .color(theme::TEXT_DIM),
        );
        if engine.filter().is_active() {
            ui.label(
                RichText::new(egui_phosphor::regular::FUNNEL)
                    .size(11.0)
                    .color(theme::ACCENT),
            )
            .on_hover_text("Filtered");
        }
    });
    ui.add_space(4.0);
    ui.separator();

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            if groups.is_empty() {
                ui.add_space(8.0);
                ui.label(RichText::new("No work items match.").color(theme::TEXT_DIM));
            }

            for group in groups.iter() {
                show_group(group, selected, ui, &mut action);
                ui.add_space(2.0);
            }

            let warnings = engine.warnings();
            if !warnings.is_empty() {
                ui.add_space(6.0);
                ui.separator();
                ui.label(
                    RichText::new(format!("{} Unscheduled", egui_phosphor::regular::WARNING))
                        .strong()
                        .color(theme::WARNING),
                );
                for warning in warnings {
                    let resp = ui.add(
                        egui::Label::new(RichText::new(&warning.message).size(10.5).color(theme::TEXT_SECONDARY))
                            .sense(egui::Sense::click()),
                    );
                    if resp.on_hover_text("Double-click to fix the dates").double_clicked() {
                        action = PanelAction::Edit(warning.item_id.clone());
                    }
                }
            }
        });

    action
}

fn show_group(group: &ResourceGroup, selected: Option<&str>, ui: &mut Ui, action: &mut PanelAction) {
    let header_color = if group.is_overbooked() {
        theme::OVERBOOKED
    } else if group.is_unassigned() {
        theme::TEXT_DIM
    } else {
        theme::TEXT_PRIMARY
    };

    let id = ui.make_persistent_id(("resource-group", &group.resource_name));
    egui::collapsing_header::CollapsingState::load_with_default_open(ui.ctx(), id, true)
        .show_header(ui, |ui| {
            ui.label(RichText::new(&group.resource_name).strong().color(header_color));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let bar = egui::ProgressBar::new((group.utilization / 100.0).clamp(0.0, 1.0) as f32)
                    .desired_width(70.0)
                    .fill(theme::utilization_color(group.utilization))
                    .text(RichText::new(format!("{:.0}%", group.utilization)).size(9.5))
                    .rounding(egui::Rounding::same(3.0));
                ui.add(bar).on_hover_text(format!(
                    "{} items, {:.1}% of the visible days",
                    group.items.len(),
                    group.utilization
                ));
            });
        })
        .body(|ui| {
            for (i, item) in group.items.iter().enumerate() {
                show_item_row(item, i, selected == Some(item.id.as_str()), &group.resource_name, ui, action);
            }
        });
}

fn show_item_row(
    item: &WorkItem,
    index: usize,
    is_selected: bool,
    resource: &str,
    ui: &mut Ui,
    action: &mut PanelAction,
) {
    let row_bg = if is_selected {
        theme::BG_SELECTED
    } else if index % 2 == 0 {
        theme::BG_PANEL
    } else {
        theme::BG_DARK
    };

    let frame = egui::Frame {
        fill: row_bg,
        rounding: egui::Rounding::same(4.0),
        inner_margin: egui::Margin::symmetric(6.0, 3.0),
        outer_margin: egui::Margin::ZERO,
        stroke: egui::Stroke::NONE,
        shadow: egui::epaint::Shadow::NONE,
    };

    let frame_resp = frame.show(ui, |ui| {
        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 6.0;

            let (dot_rect, _) = ui.allocate_exact_size(egui::vec2(6.0, 6.0), egui::Sense::hover());
            ui.painter()
                .circle_filled(dot_rect.center(), 3.0, theme::status_color(item.status));

            let name = RichText::new(&item.title).size(12.0).color(if is_selected {
                Color32::WHITE
            } else {
                theme::TEXT_PRIMARY
            });
            ui.add(egui::Label::new(name).truncate());

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let dates = match item.window() {
                    Ok(w) => format!("{} → {}", w.start.format("%m/%d"), w.end.format("%m/%d")),
                    Err(_) => "no dates".to_string(),
                };
                ui.label(RichText::new(dates).size(10.0).color(theme::TEXT_SECONDARY));
            });
        });
    });

    let row_click = ui.interact(
        frame_resp.response.rect,
        egui::Id::new(("item-row", resource, &item.id)),
        egui::Sense::click(),
    );
    if row_click.double_clicked() {
        *action = PanelAction::Edit(item.id.clone());
    } else if row_click.clicked() {
        *action = PanelAction::Select(item.id.clone());
    }
    ui.add_space(1.0);
}
