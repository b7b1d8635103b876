use std::path::Path;

use eframe::egui;

use crate::state::AppState;
use crate::ui::panels;

/// Dataset picked up automatically from the working directory at startup.
pub const DEFAULT_DATA_FILE: &str = "routines.csv";

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SmartSplitApp {
    pub state: AppState,
}

impl Default for SmartSplitApp {
    fn default() -> Self {
        let mut state = AppState::default();
        let default_path = Path::new(DEFAULT_DATA_FILE);
        if default_path.exists() {
            state.load_from(default_path);
        } else {
            state.status_message = Some(format!(
                "No {DEFAULT_DATA_FILE} in the working directory. Use File → Open… to pick a dataset."
            ));
        }
        Self { state }
    }
}

impl eframe::App for SmartSplitApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Central panel: the questionnaire ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::form_panel(ui, &mut self.state);
        });
    }
}
