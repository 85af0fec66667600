mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use std::path::PathBuf;

use anyhow::{Context, Result};
use app::SunspotApp;
use config::ViewerConfig;
use data::images::ImageCatalog;
use eframe::egui;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let mut config = ViewerConfig::from_env()?;
    if let Some(path) = std::env::args_os().nth(1) {
        config.data_path = Some(PathBuf::from(path));
    }

    let images = match &config.image_table {
        Some(path) => ImageCatalog::load(path),
        None => ImageCatalog::builtin(),
    }
    .context("loading image table")?;

    let mut state = AppState::new(&config, images).context("invalid configuration")?;
    if let Some(path) = &config.data_path {
        match data::loader::load_file(path) {
            Ok(table) => state.set_dataset(table, Some(path.clone())),
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                state.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Sunspot Viewer",
        options,
        Box::new(move |cc| {
            // Install image loaders so egui can fetch and decode the solar images.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(SunspotApp::new(state)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("running the viewer: {e}"))
}
