use std::path::PathBuf;
use std::time::Instant;

use chrono::{Duration, NaiveDate};
use shopfloor_gantt::config::{ChartSettings, SettingsStore};
use shopfloor_gantt::engine::{ChartEvent, GanttEngine, ItemFilter};
use shopfloor_gantt::io;
use shopfloor_gantt::model::{Priority, Snapshot, WorkItem, WorkStatus};

use crate::ui;
use crate::ui::gantt_chart::ChartView;
use crate::ui::item_editor::{EditorOutcome, ItemEditorState};

/// Main application state. Owns the work items; the engine only sees
/// copies handed over through [`SchedulerApp::sync_engine`].
pub struct SchedulerApp {
    pub snapshot: Snapshot,
    pub engine: GanttEngine,
    pub file_path: Option<PathBuf>,
    pub selected_item: Option<String>,
    pub filter: ItemFilter,
    pub chart_view: ChartView,

    // Dialog state
    pub editor: Option<ItemEditorState>,
    pub show_about: bool,
    pub show_csv_help: bool,

    pub status_message: String,

    pub settings_store: SettingsStore,
    saved_settings: ChartSettings,
}

impl SchedulerApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Register Phosphor icon font as a fallback so icons render inline with text
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);
        ui::theme::apply_theme(&cc.egui_ctx);

        let settings_store = SettingsStore::default_location();
        let settings = settings_store.load_or_default();
        let today = chrono::Local::now().date_naive();
        let snapshot = Self::sample_snapshot(today);

        let mut engine = GanttEngine::new(settings.clone(), today);
        engine.set_items(snapshot.items.clone());
        tracing::info!(items = snapshot.items.len(), "scheduler started");

        Self {
            snapshot,
            engine,
            file_path: None,
            selected_item: None,
            filter: ItemFilter::default(),
            chart_view: ChartView::default(),
            editor: None,
            show_about: false,
            show_csv_help: false,
            status_message: "Ready".to_string(),
            settings_store,
            saved_settings: settings,
        }
    }

    /// A small demo schedule around `today`.
    fn sample_snapshot(today: NaiveDate) -> Snapshot {
        let mut snapshot = Snapshot::new("Sample Schedule");
        let mut add = |id: &str,
                       title: &str,
                       from: i64,
                       to: i64,
                       machines: &[&str],
                       assignee: &str,
                       project: &str,
                       status: WorkStatus,
                       progress: u8| {
            let mut item = WorkItem::new(
                id,
                title,
                today + Duration::days(from),
                today + Duration::days(to),
            );
            item.order_number = Some(format!("WO-{}", id.trim_start_matches('W')));
            item.machines = machines.iter().map(|m| m.to_string()).collect();
            item.assignee = Some(assignee.to_string());
            item.project = Some(project.to_string());
            item.status = status;
            item.progress = progress;
            if status == WorkStatus::Delayed {
                item.priority = Priority::High;
            }
            snapshot.items.push(item);
        };

        add("W1001", "Bracket set", -6, -2, &["Laser-1"], "Ito", "Nordic Rail", WorkStatus::Completed, 100);
        add("W1002", "Frame welds", -2, 4, &["Weld-3"], "Sato", "Nordic Rail", WorkStatus::Processing, 45);
        add("W1003", "Cover panels", 0, 3, &["Laser-1", "Press-2"], "Ito", "Harbor Cranes", WorkStatus::Processing, 20);
        add("W1004", "Hinge blanks", 2, 9, &["Laser-1"], "Moreau", "Harbor Cranes", WorkStatus::DataPrep, 0);
        add("W1005", "Gusset plates", 1, 12, &["Press-2"], "Sato", "Nordic Rail", WorkStatus::Planning, 0);
        add("W1006", "Console housing", -3, 1, &["Press-2", "Weld-3"], "Okafor", "Atlas Pumps", WorkStatus::Delayed, 60);
        add("W1007", "Base plate", 5, 8, &["Mill-4"], "Okafor", "Atlas Pumps", WorkStatus::Planning, 0);
        add("W1008", "Shaft collars", 8, 15, &["Mill-4"], "Moreau", "Harbor Cranes", WorkStatus::Planning, 0);
        add("W1009", "Paint and pack", 10, 14, &[], "Ito", "Nordic Rail", WorkStatus::Finishing, 0);

        snapshot
    }

    /// Hand the engine a fresh copy of the item collection.
    pub fn sync_engine(&mut self) {
        self.engine.set_items(self.snapshot.items.clone());
        if let Some(id) = &self.selected_item {
            if !self.snapshot.items.iter().any(|i| &i.id == id) {
                self.selected_item = None;
            }
        }
    }

    // --- File operations ---

    pub fn new_snapshot(&mut self) {
        self.snapshot = Snapshot::default();
        self.file_path = None;
        self.selected_item = None;
        self.sync_engine();
        self.status_message = "New schedule created".to_string();
    }

    pub fn open_snapshot(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Schedule", &["json"])
            .pick_file()
        {
            match io::load_snapshot(&path) {
                Ok(snapshot) => {
                    self.snapshot = snapshot;
                    self.file_path = Some(path);
                    self.selected_item = None;
                    self.sync_engine();
                    self.status_message = format!("Loaded {} work items", self.snapshot.items.len());
                }
                Err(e) => {
                    tracing::error!(error = %e, "failed to load schedule");
                    self.status_message = format!("Error loading: {}", e);
                }
            }
        }
    }

    pub fn save_snapshot(&mut self) {
        match self.file_path.clone() {
            Some(path) => self.write_snapshot(path),
            None => self.save_snapshot_as(),
        }
    }

    pub fn save_snapshot_as(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Schedule", &["json"])
            .set_file_name(format!("{}.json", self.snapshot.name))
            .save_file()
        {
            self.write_snapshot(path);
        }
    }

    fn write_snapshot(&mut self, path: PathBuf) {
        self.snapshot.touch();
        match io::save_snapshot(&self.snapshot, &path) {
            Ok(()) => {
                self.file_path = Some(path);
                self.status_message = "Schedule saved".to_string();
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to save schedule");
                self.status_message = format!("Error saving: {}", e);
            }
        }
    }

    pub fn import_csv(&mut self) {
        if !self.snapshot.items.is_empty() {
            let confirm = rfd::MessageDialog::new()
                .set_title("Import CSV")
                .set_description("This will replace the current schedule. Continue?")
                .set_buttons(rfd::MessageButtons::YesNo)
                .show();
            if confirm != rfd::MessageDialogResult::Yes {
                return;
            }
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv", "txt"])
            .pick_file()
        {
            match io::import_csv(&path) {
                Ok(report) => {
                    let name = path
                        .file_stem()
                        .and_then(|s| s.to_str())
                        .unwrap_or("Imported Schedule")
                        .to_string();
                    let count = report.items.len();
                    self.snapshot = Snapshot::new(name);
                    self.snapshot.items = report.items;
                    self.file_path = None;
                    self.selected_item = None;
                    self.sync_engine();

                    self.status_message = if report.skipped > 0 {
                        format!("Imported {} work items ({} rows skipped)", count, report.skipped)
                    } else {
                        format!("Imported {} work items", count)
                    };
                }
                Err(e) => {
                    tracing::error!(error = %e, "CSV import failed");
                    self.status_message = format!("CSV import failed: {}", e);
                }
            }
        }
    }

    pub fn export_csv(&mut self) {
        if self.snapshot.items.is_empty() {
            self.status_message = "Nothing to export, the schedule is empty".to_string();
            return;
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_file_name(format!("{}.csv", self.snapshot.name))
            .save_file()
        {
            match io::export_csv(&self.snapshot.items, &path) {
                Ok(count) => self.status_message = format!("Exported {} work items to CSV", count),
                Err(e) => {
                    tracing::error!(error = %e, "CSV export failed");
                    self.status_message = format!("CSV export failed: {}", e);
                }
            }
        }
    }

    pub fn open_config_folder(&mut self) {
        if let Some(dir) = self.settings_store.config_dir() {
            if let Err(e) = std::fs::create_dir_all(dir).and_then(|_| open::that(dir)) {
                tracing::warn!(error = %e, "could not open settings folder");
                self.status_message = format!("Could not open settings folder: {}", e);
            }
        }
    }

    // --- Work item operations ---

    pub fn add_item(&mut self) {
        let today = self.engine.today();
        let id = uuid::Uuid::new_v4().to_string();
        let item = WorkItem::new(id, "New work item", today, today + Duration::days(2));
        self.editor = Some(ItemEditorState::new_item(item, today));
    }

    /// Dispatch one engine event against the item store.
    pub fn apply_event(&mut self, event: ChartEvent) {
        match event {
            ChartEvent::Click(item) => {
                self.status_message = format!("Selected '{}'", item.title);
                self.selected_item = Some(item.id);
            }
            ChartEvent::Mutate { item, mutation } => {
                let title = item.title.clone();
                if self.snapshot.replace_item(item) {
                    tracing::info!(item = %mutation.item_id, kind = ?mutation.kind, "work item rescheduled");
                    self.status_message = format!(
                        "Rescheduled '{}' ({} → {})",
                        title,
                        mutation.window.start.format("%Y-%m-%d"),
                        mutation.window.end.format("%Y-%m-%d")
                    );
                    self.selected_item = Some(mutation.item_id);
                    self.sync_engine();
                } else {
                    self.status_message = format!("'{}' no longer exists", title);
                }
            }
            ChartEvent::Edit(item) => {
                self.selected_item = Some(item.id.clone());
                self.editor = Some(ItemEditorState::edit(item, self.engine.today()));
            }
            ChartEvent::Duplicate(item) => {
                let mut copy = item.clone();
                copy.id = uuid::Uuid::new_v4().to_string();
                copy.title = format!("{} (copy)", item.title);
                let position = self
                    .snapshot
                    .items
                    .iter()
                    .position(|i| i.id == item.id)
                    .map(|p| p + 1)
                    .unwrap_or(self.snapshot.items.len());
                self.selected_item = Some(copy.id.clone());
                self.snapshot.items.insert(position, copy);
                self.snapshot.touch();
                self.sync_engine();
                self.status_message = format!("Duplicated '{}'", item.title);
            }
            ChartEvent::Delete(item) => {
                self.snapshot.items.retain(|i| i.id != item.id);
                self.snapshot.touch();
                self.sync_engine();
                self.status_message = format!("Deleted '{}'", item.title);
            }
        }
    }

    fn apply_editor(&mut self, outcome: EditorOutcome) {
        match outcome {
            EditorOutcome::Open => {}
            EditorOutcome::Cancelled => self.editor = None,
            EditorOutcome::Saved { item, is_new } => {
                self.editor = None;
                let title = item.title.clone();
                self.selected_item = Some(item.id.clone());
                if is_new {
                    self.snapshot.items.push(item);
                    self.snapshot.touch();
                    self.status_message = format!("Added '{}'", title);
                } else if self.snapshot.replace_item(item) {
                    self.status_message = format!("Updated '{}'", title);
                } else {
                    self.status_message = format!("'{}' no longer exists", title);
                }
                self.sync_engine();
            }
        }
    }

    pub fn request_edit_selected(&mut self) {
        if let Some(event) = self.selected_item.as_deref().and_then(|id| self.engine.request_edit(id)) {
            self.apply_event(event);
        }
    }

    pub fn apply_filter(&mut self) {
        self.engine.set_filter(self.filter.clone());
    }

    /// Write settings back when grouping, weekends or zoom changed.
    fn persist_settings(&mut self) {
        let current = self.engine.settings();
        if current != self.saved_settings {
            if let Err(e) = self.settings_store.save(&current) {
                tracing::warn!(error = %e, "could not save settings");
            }
            self.saved_settings = current;
        }
    }
}

impl eframe::App for SchedulerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.engine.set_today(chrono::Local::now().date_naive());

        // Keyboard shortcuts outside closures to avoid borrow issues
        let (should_save, zoom_in, zoom_out) = ctx.input(|i| {
            (
                i.modifiers.ctrl && i.key_pressed(egui::Key::S),
                i.modifiers.ctrl && i.key_pressed(egui::Key::Plus),
                i.modifiers.ctrl && i.key_pressed(egui::Key::Minus),
            )
        });
        if should_save {
            self.save_snapshot();
        }
        if zoom_in {
            self.engine.zoom(true);
        }
        if zoom_out {
            self.engine.zoom(false);
        }

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(ui::theme::STATUS_BAR_HEIGHT)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_HEADER)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui::status_bar::show_status_bar(self, ui);
            });

        let mut minimap_jump = None;
        egui::TopBottomPanel::bottom("minimap")
            .exact_height(ui::theme::MINIMAP_HEIGHT + 8.0)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_PANEL)
                    .inner_margin(egui::Margin::symmetric(8.0, 4.0)),
            )
            .show(ctx, |ui| {
                minimap_jump = ui::minimap::show_minimap(&self.engine, &self.snapshot.items, &self.chart_view, ui);
            });
        if let Some((x, width)) = minimap_jump {
            if self.engine.minimap_jump(x, width, self.chart_view.viewport_width).is_some() {
                ctx.request_repaint();
            }
        }

        let mut panel_action = ui::resource_panel::PanelAction::None;
        egui::SidePanel::left("resource_panel")
            .default_width(ui::theme::SIDE_PANEL_WIDTH)
            .min_width(220.0)
            .max_width(ui::theme::SIDE_PANEL_WIDTH * 2.0)
            .resizable(true)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_PANEL)
                    .inner_margin(egui::Margin::same(8.0))
                    .stroke(egui::Stroke::new(1.0, ui::theme::BORDER_SUBTLE)),
            )
            .show(ctx, |ui| {
                panel_action = ui::resource_panel::show_resource_panel(
                    &self.engine,
                    self.selected_item.as_deref(),
                    ui,
                );
            });

        let event = match panel_action {
            ui::resource_panel::PanelAction::Select(id) => self.engine.click(&id, Instant::now()),
            ui::resource_panel::PanelAction::Edit(id) => self.engine.request_edit(&id),
            ui::resource_panel::PanelAction::None => None,
        };
        if let Some(event) = event {
            self.apply_event(event);
        }

        let chart_frame = egui::Frame::default()
            .fill(ui::theme::BG_DARK)
            .inner_margin(egui::Margin::ZERO);
        let events = egui::CentralPanel::default()
            .frame(chart_frame)
            .show(ctx, |ui| {
                ui::gantt_chart::show_gantt_chart(
                    &mut self.engine,
                    &mut self.chart_view,
                    self.selected_item.as_deref(),
                    ui,
                )
            })
            .inner;
        for event in events {
            self.apply_event(event);
        }

        if let Some(editor) = self.editor.as_mut() {
            let outcome = ui::item_editor::show_item_editor(editor, ctx);
            self.apply_editor(outcome);
        }
        if self.show_about {
            ui::dialogs::show_about_dialog(self, ctx);
        }
        if self.show_csv_help {
            ui::dialogs::show_csv_help_dialog(self, ctx);
        }

        self.persist_settings();
    }
}
