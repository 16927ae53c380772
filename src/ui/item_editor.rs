use chrono::NaiveDate;
use egui::{Color32, Context, RichText, Ui, Window};
use shopfloor_gantt::model::{DateWindow, Priority, WorkItem, WorkStatus};

use crate::ui::theme;

/// Working copy edited by the dialog. Nothing reaches the item store until
/// the user saves.
pub struct ItemEditorState {
    draft: WorkItem,
    start: NaiveDate,
    end: NaiveDate,
    machines: String,
    assignee: String,
    project: String,
    order_number: String,
    is_new: bool,
    /// The original dates could not be parsed.
    had_bad_dates: bool,
}

pub enum EditorOutcome {
    Open,
    Cancelled,
    Saved { item: WorkItem, is_new: bool },
}

impl ItemEditorState {
    pub fn edit(item: WorkItem, today: NaiveDate) -> Self {
        Self::build(item, today, false)
    }

    pub fn new_item(item: WorkItem, today: NaiveDate) -> Self {
        Self::build(item, today, true)
    }

    fn build(item: WorkItem, today: NaiveDate, is_new: bool) -> Self {
        let window = item.window().ok();
        Self {
            start: window.map_or(today, |w| w.start),
            end: window.map_or(today, |w| w.end),
            machines: item.machines.join(", "),
            assignee: item.assignee.clone().unwrap_or_default(),
            project: item.project.clone().unwrap_or_default(),
            order_number: item.order_number.clone().unwrap_or_default(),
            had_bad_dates: window.is_none(),
            is_new,
            draft: item,
        }
    }

    fn finish(&self) -> WorkItem {
        let opt = |s: &str| Some(s.trim().to_string()).filter(|s| !s.is_empty());
        let mut item = self
            .draft
            .rescheduled(DateWindow::new(self.start, self.end.max(self.start)));
        if item.title.trim().is_empty() {
            item.title = "Untitled".to_string();
        }
        item.machines = self
            .machines
            .split(',')
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .collect();
        item.assignee = opt(&self.assignee);
        item.project = opt(&self.project);
        item.order_number = opt(&self.order_number);
        item
    }
}

fn field_label(ui: &mut Ui, text: &str) {
    ui.label(RichText::new(text).size(10.0).color(theme::TEXT_DIM).strong());
}

/// Render the work item dialog.
pub fn show_item_editor(state: &mut ItemEditorState, ctx: &Context) -> EditorOutcome {
    let mut outcome = EditorOutcome::Open;
    let title = if state.is_new { "Add Work Item" } else { "Edit Work Item" };

    Window::new(RichText::new(title).strong().size(14.0))
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([380.0, 0.0])
        .show(ctx, |ui| {
            ui.visuals_mut().extreme_bg_color = theme::BG_FIELD;
            ui.spacing_mut().item_spacing.y = 6.0;

            if state.had_bad_dates {
                ui.label(
                    RichText::new(format!(
                        "{} The stored dates were unreadable; pick new ones.",
                        egui_phosphor::regular::WARNING
                    ))
                    .size(11.0)
                    .color(theme::WARNING),
                );
            }

            egui::Grid::new("item_editor_grid")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    field_label(ui, "Title");
                    ui.add_sized(
                        [240.0, 24.0],
                        egui::TextEdit::singleline(&mut state.draft.title).hint_text("Work item title..."),
                    );
                    ui.end_row();

                    field_label(ui, "Order");
                    ui.add_sized([240.0, 24.0], egui::TextEdit::singleline(&mut state.order_number));
                    ui.end_row();

                    field_label(ui, "Start");
                    if ui
                        .add(egui_extras::DatePickerButton::new(&mut state.start).id_salt("dp_item_start"))
                        .changed()
                        && state.start > state.end
                    {
                        state.end = state.start;
                    }
                    ui.end_row();

                    field_label(ui, "End");
                    if ui
                        .add(egui_extras::DatePickerButton::new(&mut state.end).id_salt("dp_item_end"))
                        .changed()
                        && state.end < state.start
                    {
                        state.start = state.end;
                    }
                    ui.end_row();

                    field_label(ui, "Machines");
                    ui.add_sized(
                        [240.0, 24.0],
                        egui::TextEdit::singleline(&mut state.machines).hint_text("Laser-1, Press-2"),
                    );
                    ui.end_row();

                    field_label(ui, "Assignee");
                    ui.add_sized([240.0, 24.0], egui::TextEdit::singleline(&mut state.assignee));
                    ui.end_row();

                    field_label(ui, "Project");
                    ui.add_sized([240.0, 24.0], egui::TextEdit::singleline(&mut state.project));
                    ui.end_row();

                    field_label(ui, "Status");
                    egui::ComboBox::from_id_salt("item_status_combo")
                        .selected_text(state.draft.status.label())
                        .width(240.0)
                        .show_ui(ui, |ui| {
                            for status in WorkStatus::all() {
                                ui.selectable_value(&mut state.draft.status, *status, status.label());
                            }
                        });
                    ui.end_row();

                    field_label(ui, "Priority");
                    let current = state.draft.priority;
                    egui::ComboBox::from_id_salt("item_priority_combo")
                        .selected_text(format!("{} {}", theme::priority_icon(current), current.label()))
                        .width(240.0)
                        .show_ui(ui, |ui| {
                            for p in Priority::all() {
                                let label = format!("{} {}", theme::priority_icon(*p), p.label());
                                ui.selectable_value(&mut state.draft.priority, *p, label);
                            }
                        });
                    ui.end_row();

                    field_label(ui, "Progress");
                    ui.add(egui::Slider::new(&mut state.draft.progress, 0..=100).suffix("%"));
                    ui.end_row();
                });

            ui.add_space(6.0);
            ui.separator();
            ui.add_space(4.0);

            ui.horizontal(|ui| {
                let save = egui::Button::new(RichText::new("Save").color(Color32::WHITE))
                    .fill(theme::ACCENT)
                    .rounding(egui::Rounding::same(4.0));
                if ui.add_sized([90.0, 28.0], save).clicked() {
                    outcome = EditorOutcome::Saved {
                        item: state.finish(),
                        is_new: state.is_new,
                    };
                }
                if ui.add_sized([90.0, 28.0], egui::Button::new("Cancel")).clicked() {
                    outcome = EditorOutcome::Cancelled;
                }
            });
        });

    if matches!(outcome, EditorOutcome::Open) && ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        outcome = EditorOutcome::Cancelled;
    }
    outcome
}
