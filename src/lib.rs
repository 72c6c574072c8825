pub mod api;
pub mod cli;
pub mod format;
pub mod output;
pub mod settings;
pub mod tokens;
pub mod utils;
pub mod watcher;

use std::sync::Arc;

use anyhow::{Context, Result};
use log::info;

use api::FigmaClient;
pub use cli::Cli;
use settings::Settings;
use watcher::{UpdatePoller, WatchController};

/// Entry point: run the startup cycle, then keep polling when `--watch` is set.
///
/// Only startup problems (configuration, HTTP client) are returned as errors;
/// cycle failures are logged by the poller.
pub async fn run(cli: Cli) -> Result<()> {
    // Initialize logging (reads RUST_LOG env var)
    utils::logging::init();

    dotenvy::dotenv().ok();

    info!("Starting design token extraction from Figma...");

    let settings = Settings::load().context("failed to load configuration")?;
    info!("FIGMA_TOKEN: set");
    info!("FILE_KEY: {}", settings.file_key);
    log::debug!("{settings:?}");

    let client = FigmaClient::new(
        &settings.api_base_url,
        settings.figma_token.clone(),
        settings.request_timeout,
    )?;
    let poller = Arc::new(UpdatePoller::new(
        Arc::new(client),
        settings.file_key.clone(),
        settings.output_dir.clone(),
    ));

    poller.check_for_updates().await;

    if !cli.watch {
        info!("One-shot extraction finished. Run with --watch to keep polling for changes");
        return Ok(());
    }

    let mut controller = WatchController::new();
    controller.start_watching(poller, settings.update_interval)?;

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for ctrl-c")?;
    info!("Interrupt received, stopping watch loop");

    controller.stop_watching().await
}
