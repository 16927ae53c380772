use crate::app::SchedulerApp;
use crate::ui::theme;
use egui::{RichText, Ui};

pub fn show_status_bar(app: &SchedulerApp, ui: &mut Ui) {
    ui.horizontal_centered(|ui| {
        ui.label(
            RichText::new(&app.status_message)
                .size(11.0)
                .color(theme::TEXT_SECONDARY),
        );
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let dim = |text: String| RichText::new(text).size(10.5).color(theme::TEXT_DIM);
            ui.label(dim(format!(
                "Zoom: {:.0}%",
                app.engine.zoom_controller().percent_of_default()
            )));
            ui.label(dim(" · ".to_string()));
            ui.label(dim(format!("Items: {}", app.snapshot.items.len())));

            let warnings = app.engine.warnings();
            if !warnings.is_empty() {
                ui.label(dim(" · ".to_string()));
                let text = RichText::new(format!(
                    "{} {} with bad dates",
                    egui_phosphor::regular::WARNING,
                    warnings.len()
                ))
                .size(10.5)
                .color(theme::WARNING);
                ui.label(text).on_hover_ui(|ui| {
                    for w in warnings {
                        ui.label(&w.message);
                    }
                });
            }

            let overbooked = app.engine.groups().overbooked().count();
            if overbooked > 0 {
                ui.label(dim(" · ".to_string()));
                ui.label(
                    RichText::new(format!("{} overbooked", overbooked))
                        .size(10.5)
                        .color(theme::OVERBOOKED),
                );
            }
        });
    });
}
