mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::Path;

use anyhow::anyhow;
use app::CircuitScopeApp;
use data::loader::{self, LoadError};
use eframe::egui;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // All input files are read from the working directory before any
    // window is created.
    let signals = match loader::load_all(Path::new(".")) {
        Ok(signals) => signals,
        Err(err @ LoadError::Missing(_)) => {
            println!("{err}");
            std::process::exit(1);
        }
        Err(err) => return Err(err.into()),
    };
    log::info!(
        "loaded {} baseline / {} reference samples",
        signals.baseline_t.len(),
        signals.reference_t.len()
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([800.0, 800.0])
            .with_min_inner_size([480.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Circuit Scope – Transient Viewer",
        options,
        Box::new(|_cc| Ok(Box::new(CircuitScopeApp::new(signals)))),
    )
    .map_err(|err| anyhow!("event loop failed: {err}"))
}
