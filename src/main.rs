mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use anyhow::Context;
use app::LaunchDashApp;
use clap::Parser;
use config::DashConfig;
use eframe::egui;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = DashConfig::parse();
    log::debug!("{config:?}");

    // The table is loaded once; a missing or malformed file is fatal.
    let table = match data::loader::load_file(&config.data_path) {
        Ok(table) => table,
        Err(e) => {
            log::error!("Failed to load {}: {e:#}", config.data_path.display());
            return Err(e).with_context(|| {
                format!("loading launch records from {}", config.data_path.display())
            });
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([700.0, 450.0]),
        ..Default::default()
    };

    eframe::run_native(
        "SpaceX Launch Records Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(LaunchDashApp::new(table, config.initial_site)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
