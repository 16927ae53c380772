use crate::app::SchedulerApp;
use crate::ui::theme;
use egui::{Context, RichText, Window};

pub fn show_about_dialog(app: &mut SchedulerApp, ctx: &Context) {
    let mut should_close = false;
    Window::new("About")
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([320.0, 200.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(12.0);
                ui.heading(RichText::new("Shop-floor Schedule").strong());
                ui.add_space(2.0);
                ui.label(
                    RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION")))
                        .color(theme::TEXT_SECONDARY),
                );
                ui.add_space(10.0);
                ui.label("Machine, operator and project schedules");
                ui.label("built with Rust and egui.");
                ui.add_space(6.0);
                ui.label(
                    RichText::new(format!(
                        "Settings: {}",
                        app.settings_store.path().display()
                    ))
                    .size(10.0)
                    .color(theme::TEXT_DIM),
                );
                ui.add_space(14.0);
                if ui.add_sized([100.0, 28.0], egui::Button::new("Close")).clicked() {
                    should_close = true;
                }
            });
        });
    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_about = false;
    }
}

pub fn show_csv_help_dialog(app: &mut SchedulerApp, ctx: &Context) {
    let mut should_close = false;

    Window::new(RichText::new("CSV Import Format").strong().size(14.0))
        .resizable(true)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .default_size([560.0, 480.0])
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(4.0);

                ui.label(RichText::new("Delimiters").strong());
                ui.label("The delimiter is auto-detected: comma (,), semicolon (;), or tab.");
                ui.add_space(8.0);

                ui.label(RichText::new("Columns").strong());
                ui.add_space(2.0);
                egui::Grid::new("csv_columns")
                    .num_columns(2)
                    .striped(true)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        let rows: &[(&str, &str)] = &[
                            ("Title *", "Title, Name, Task, Label, Description, Part"),
                            ("Start *", "Start, Start Date, Planned Start, Begin, From"),
                            ("End", "End, End Date, Planned End, Finish, To"),
                            ("Due", "Due, Due Date, Deadline, Delivery"),
                            ("Id", "Id, Item Id, Key (generated when missing)"),
                            ("Order", "Order, Order Number, Work Order, WO"),
                            ("Machines", "Machine, Machines, Work Center, Station, Resource"),
                            ("Assignee", "Assignee, Person, Operator, Owner, Assigned To"),
                            ("Project", "Project, Client, Customer"),
                            ("Progress", "Progress, Percent, Complete (0-100, 0.5 or 50%)"),
                            ("Status", "Planning / Data Prep / Processing / Finishing / Completed / Delayed"),
                            ("Priority", "Low / Medium / High"),
                        ];
                        ui.label(RichText::new("Field").underline());
                        ui.label(RichText::new("Accepted headers or values").underline());
                        ui.end_row();
                        for (field, accepted) in rows {
                            ui.label(RichText::new(*field).strong());
                            ui.label(*accepted);
                            ui.end_row();
                        }
                    });
                ui.add_space(8.0);

                ui.label(RichText::new("Notes").strong());
                ui.add_space(2.0);
                for note in [
                    "• Header matching is case-insensitive and ignores spaces, dots, hyphens and underscores.",
                    "• Multiple machines are separated by | , + or /.",
                    "• When End is empty the Due date is used instead.",
                    "• Rows without a title or start date are skipped.",
                    "• Unreadable dates are kept and listed under Unscheduled so they can be fixed.",
                    "• Dates: YYYY-MM-DD, DD/MM/YYYY, DD.MM.YYYY, YYYY/MM/DD or ISO timestamps.",
                ] {
                    ui.label(RichText::new(note).small());
                }
                ui.add_space(10.0);

                ui.label(RichText::new("Example (semicolon-delimited)").strong());
                ui.add_space(2.0);
                let example = "Work Order;Title;Planned Start;Planned End;Machine;Operator;Status\n\
                               WO-1;Bracket set;2025-01-10;2025-01-12;Laser-1;Ito;Processing\n\
                               WO-2;Frame welds;13/01/2025;17/01/2025;Weld-3|Press-2;Sato;Planning";
                egui::Frame::dark_canvas(ui.style()).show(ui, |ui| {
                    ui.add(
                        egui::TextEdit::multiline(&mut example.to_string())
                            .font(egui::TextStyle::Monospace)
                            .desired_width(f32::INFINITY)
                            .interactive(false),
                    );
                });
                ui.add_space(8.0);
            });

            ui.separator();
            ui.add_space(4.0);
            if ui.add_sized([80.0, 28.0], egui::Button::new("Close")).clicked() {
                should_close = true;
            }
        });

    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_csv_help = false;
    }
}
