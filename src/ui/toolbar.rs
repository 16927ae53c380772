use crate::app::SchedulerApp;
use crate::ui::theme;
use egui::{menu, RichText, Ui};
use egui_phosphor::regular as icons;
use shopfloor_gantt::engine::GroupingDimension;
use shopfloor_gantt::model::{Priority, WorkStatus};

/// Render the top toolbar / menu bar.
pub fn show_toolbar(app: &mut SchedulerApp, ui: &mut Ui) {
    menu::bar(ui, |ui| {
        ui.menu_button(RichText::new("  File  ").font(theme::font_menu()), |ui| {
            if ui.button("  New Schedule").clicked() {
                app.new_snapshot();
                ui.close_menu();
            }
            if ui.button("  Open...").clicked() {
                app.open_snapshot();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Save          Ctrl+S").clicked() {
                app.save_snapshot();
                ui.close_menu();
            }
            if ui.button("  Save As...").clicked() {
                app.save_snapshot_as();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Import CSV...").clicked() {
                app.import_csv();
                ui.close_menu();
            }
            if ui.button("  Export CSV...").clicked() {
                app.export_csv();
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  View  ").font(theme::font_menu()), |ui| {
            if ui.button("  Zoom In        Ctrl++").clicked() {
                app.engine.zoom(true);
                ui.close_menu();
            }
            if ui.button("  Zoom Out      Ctrl+-").clicked() {
                app.engine.zoom(false);
                ui.close_menu();
            }
            ui.separator();
            let mut weekends = app.engine.show_weekends();
            if ui.checkbox(&mut weekends, "Show weekends").changed() {
                app.engine.set_show_weekends(weekends);
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Open Settings Folder").clicked() {
                app.open_config_folder();
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  Help  ").font(theme::font_menu()), |ui| {
            if ui.button("CSV Import Format").clicked() {
                app.show_csv_help = true;
                ui.close_menu();
            }
            if ui.button("About").clicked() {
                app.show_about = true;
                ui.close_menu();
            }
        });

        ui.separator();

        if ui
            .button(format!("{} Add", icons::PLUS))
            .on_hover_text("Add work item")
            .clicked()
        {
            app.add_item();
        }

        ui.separator();

        // Zoom
        let zoom = *app.engine.zoom_controller();
        if ui
            .add_enabled(zoom.can_zoom_out(), egui::Button::new(icons::MAGNIFYING_GLASS_MINUS))
            .on_hover_text("Zoom out")
            .clicked()
        {
            app.engine.zoom(false);
        }
        ui.label(
            RichText::new(format!("{:.0}%", zoom.percent_of_default()))
                .size(11.0)
                .color(theme::TEXT_SECONDARY),
        );
        if ui
            .add_enabled(zoom.can_zoom_in(), egui::Button::new(icons::MAGNIFYING_GLASS_PLUS))
            .on_hover_text("Zoom in")
            .clicked()
        {
            app.engine.zoom(true);
        }

        ui.separator();

        // Grouping
        let mut grouping = app.engine.grouping();
        egui::ComboBox::from_id_salt("grouping_combo")
            .selected_text(format!("{} {}", icons::ROWS, grouping.label()))
            .width(110.0)
            .show_ui(ui, |ui| {
                for dimension in GroupingDimension::all() {
                    ui.selectable_value(&mut grouping, *dimension, dimension.label());
                }
            });
        app.engine.set_grouping(grouping);

        ui.separator();

        // Filters
        let mut changed = false;
        ui.label(RichText::new(icons::MAGNIFYING_GLASS).color(theme::TEXT_DIM));
        changed |= ui
            .add(
                egui::TextEdit::singleline(&mut app.filter.search)
                    .hint_text("Search items...")
                    .desired_width(160.0),
            )
            .changed();

        let status_label = app.filter.status.map_or("Any status", |s| s.label());
        egui::ComboBox::from_id_salt("status_filter")
            .selected_text(status_label)
            .width(100.0)
            .show_ui(ui, |ui| {
                changed |= ui.selectable_value(&mut app.filter.status, None, "Any status").changed();
                for status in WorkStatus::all() {
                    changed |= ui
                        .selectable_value(&mut app.filter.status, Some(*status), status.label())
                        .changed();
                }
            });

        let priority_label = app.filter.priority.map_or("Any priority", |p| p.label());
        egui::ComboBox::from_id_salt("priority_filter")
            .selected_text(priority_label)
            .width(100.0)
            .show_ui(ui, |ui| {
                changed |= ui.selectable_value(&mut app.filter.priority, None, "Any priority").changed();
                for priority in Priority::all() {
                    let text = format!("{} {}", theme::priority_icon(*priority), priority.label());
                    changed |= ui
                        .selectable_value(&mut app.filter.priority, Some(*priority), text)
                        .changed();
                }
            });

        if app.filter.is_active() && ui.small_button(icons::X).on_hover_text("Clear filters").clicked() {
            app.filter = Default::default();
            changed = true;
        }
        if changed {
            app.apply_filter();
        }

        // Right-aligned schedule name
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let modified = if app.file_path.is_some() { "" } else { " (unsaved)" };
            ui.label(
                RichText::new(format!("{}{}", app.snapshot.name, modified))
                    .size(11.0)
                    .weak(),
            );
        });
    });
}
