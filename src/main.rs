#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod ui;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 800.0])
            .with_min_inner_size([900.0, 480.0])
            .with_title("Shop-floor Schedule"),
        ..Default::default()
    };

    eframe::run_native(
        "Shop-floor Schedule",
        options,
        Box::new(|cc| Ok(Box::new(app::SchedulerApp::new(cc)))),
    )
}
