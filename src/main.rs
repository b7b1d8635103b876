mod app;
mod data;
mod state;
mod ui;

use app::SmartSplitApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([560.0, 820.0])
            .with_min_inner_size([420.0, 520.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Smart Split – Routine Recommender",
        options,
        Box::new(|_cc| Ok(Box::new(SmartSplitApp::default()))),
    )
}
