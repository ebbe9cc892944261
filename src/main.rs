mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::PathBuf;

use anyhow::Context;

use app::DashboardApp;
use eframe::egui;
use state::AppState;

/// Default dataset location; override with the first CLI argument.
const DEFAULT_DATA_PATH: &str = "data/subcounty_metrics.csv";

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // The dataset is loaded exactly once at startup; a missing or malformed
    // file aborts before any window opens.
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));
    let table = data::loader::load_csv(&path)
        .with_context(|| format!("loading metrics table from {}", path.display()))?;
    log::info!(
        "Loaded {} sub-counties across {} counties",
        table.len(),
        table.counties.len()
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Afya Dash – Sub-county Health Metrics",
        options,
        Box::new(move |_cc| Ok(Box::new(DashboardApp::new(AppState::new(table))))),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {e}"))?;

    Ok(())
}
