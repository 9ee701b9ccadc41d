// src/main.rs
use eframe::egui;
use anyhow::Result;

mod analysis;
mod app;
mod config;
mod errors;
mod file;
mod state;
mod ui;
mod utils;

use app::FailwatchApp;
use config::Settings;
use file::{FileHandler, SettingsFileHandler};

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let handler = SettingsFileHandler::new();
    let settings_path = SettingsFileHandler::default_path();

    // First run: leave an editable settings file behind
    if let Some(path) = settings_path.as_deref().filter(|p| !p.exists()) {
        match handler.save(&Settings::default(), path) {
            Ok(()) => tracing::info!("Wrote default settings to {}", path.display()),
            Err(e) => tracing::warn!("Could not write {}: {:#}", path.display(), e),
        }
    }

    let settings = handler.load_or_default(settings_path.as_deref());
    let app = FailwatchApp::new(&settings)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 820.0])
            .with_title("Failwatch"),
        ..Default::default()
    };

    eframe::run_native(
        "Failwatch",
        options,
        Box::new(move |_cc| Box::new(app)),
    ).map_err(|e| anyhow::anyhow!("Failed to run application: {}", e))
}
