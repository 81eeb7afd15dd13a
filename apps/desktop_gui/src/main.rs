mod backend_bridge;
mod config;
mod controller;
mod ui;

use anyhow::Context;
use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::config::{load_settings, Args, LoadedSettings};
use crate::controller::events::UiEvent;
use crate::ui::DeliveryFormApp;

const APP_TITLE: &str = "Actas de Entrega";

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let LoadedSettings { settings, ignored } = load_settings(&args)?;

    let filter = EnvFilter::try_new(&settings.log_filter).unwrap_or_else(|err| {
        eprintln!("invalid log filter '{}': {err}; using 'info'", settings.log_filter);
        EnvFilter::new("info")
    });
    tracing_subscriber::fmt().with_env_filter(filter).init();
    for entry in &ignored {
        tracing::warn!(entry = %entry, "ignoring invalid setting");
    }
    tracing::info!(?settings, "starting delivery form");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    backend_bridge::runtime::launch(cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_TITLE)
            .with_inner_size([settings.window_width, settings.window_height])
            .with_min_inner_size([420.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(move |_cc| Ok(Box::new(DeliveryFormApp::new(cmd_tx, ui_rx, &settings)))),
    )
    .map_err(|err| anyhow::anyhow!("{err}"))
    .context("failed to run the delivery form window")
}
