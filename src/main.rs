mod app;
mod classifier;
mod color;
mod config;
mod data;
mod report;
mod resources;
mod state;
mod ui;

use app::YeastLocalizerApp;
use config::AppConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = AppConfig::from_env();
    log::info!("Starting with {config:?}");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 850.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Protein Localization Site Predictor",
        options,
        Box::new(move |_cc| Ok(Box::new(YeastLocalizerApp::new(config)))),
    )
}
