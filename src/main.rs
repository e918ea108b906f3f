mod app;
mod canvas;
mod catalog;
mod config;
mod coordinate;
mod error;
mod export;
mod gesture;
mod grid;
mod marker;
mod patient;
mod planner;
mod planner_ui;
mod platform;
mod shortcuts;
mod summary;
mod template;
mod ui;
mod xray;

use app::ImplantPlannerApp;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = config::load_config();

    let native_options = eframe::NativeOptions {
        initial_window_size: Some(egui::vec2(1440.0, 900.0)),
        min_window_size: Some(egui::vec2(1024.0, 700.0)),
        ..Default::default()
    };

    eframe::run_native(
        "Implant Planner",
        native_options,
        Box::new(move |cc| Box::new(ImplantPlannerApp::new(cc, config))),
    )
}
