//! Radar Lens - Technology Radar Analysis Dashboard
//!
//! Loads the radar dataset once at startup and opens the interactive dashboard.

use anyhow::{anyhow, Context, Result};
use eframe::egui;
use radar_lens::config::{DashboardConfig, CONFIG_FILE};
use radar_lens::data::{DataLoader, VolumeCatalog};
use radar_lens::gui::RadarApp;
use std::path::Path;

fn main() -> Result<()> {
    env_logger::init();

    let config = DashboardConfig::load_or_default(Path::new(CONFIG_FILE))?;

    // The dashboard cannot run without its dataset.
    let dataset = DataLoader::load_json(&config.data_path, VolumeCatalog::radar_editions())
        .inspect_err(|e| log::error!("Cannot start without radar data: {}", e))
        .with_context(|| format!("loading {}", config.data_path.display()))?;

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([900.0, 600.0])
            .with_title("Radar Lens"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Radar Lens",
        options,
        Box::new(move |cc| Ok(Box::new(RadarApp::new(cc, dataset, &config)))),
    )
    .map_err(|e| anyhow!("dashboard failed: {}", e))
}
