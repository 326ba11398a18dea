use std::sync::Arc;

use clap::Parser;
use lasso_capture::{CaptureSession, XcapBackend};
use lasso_config::Config;
use lasso_index::{NullDetector, NullRecognizer, TextRegionIndexer};
use lasso_search::ReverseImageClient;
use lasso_types::events::AppEvent;
use tokio::signal;
use tracing_subscriber::EnvFilter;

mod controller;
mod coordinator;
mod events;
mod headless;
mod state;
mod surface;

#[cfg(test)]
mod tests;

use crate::controller::AppController;
use crate::coordinator::OverlaySessionCoordinator;
use crate::events::Pipeline;
use crate::state::AppState;
use crate::surface::ResultDisplay;

#[derive(Parser)]
#[command(name = "lasso", about = "Draw over a screen capture to search it")]
struct Args {
    /// Trigger a capture immediately instead of waiting for an external trigger
    #[arg(long)]
    capture_on_start: bool,

    /// Override the reverse-image search upload endpoint
    #[arg(long)]
    search_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let mut config = Config::new();
    if let Some(url) = args.search_url {
        config.search.upload_url = url;
    }

    let session = Arc::new(CaptureSession::new(
        Arc::new(XcapBackend),
        config.capture.clone(),
    ));
    let search = ReverseImageClient::new(&config.search)?;
    let selection_config = config.selection.clone();
    let ocr_config = config.ocr.clone();

    let state = Arc::new(AppState::new(config));
    let controller = AppController::new(state.clone());
    let events = controller.event_sender();

    let indexer = TextRegionIndexer::new(
        Arc::new(NullRecognizer),
        Arc::new(NullDetector),
        events.clone(),
        &ocr_config,
    );

    let display: Arc<dyn ResultDisplay> = Arc::new(headless::LogDisplay);
    let coordinator = OverlaySessionCoordinator::new(
        Arc::new(headless::LogOverlay),
        display.clone(),
        Arc::new(headless::NoFocus),
        selection_config,
    );
    let pipeline = Pipeline {
        session,
        indexer,
        search,
        intents: Arc::new(headless::LogIntents),
        display,
    };

    let mut tasks = controller.spawn_tasks(pipeline, coordinator);

    if args.capture_on_start {
        events.send(AppEvent::CaptureRequested).await?;
    }

    tokio::select! {
        _ = signal::ctrl_c() => {
            tracing::info!("shutdown requested");
            controller.shutdown();
        }
        Some(result) = tasks.join_next() => {
            match result {
                Ok(Ok(())) => tracing::warn!("event loop exited"),
                Ok(Err(err)) => tracing::error!("event loop failed: {err}"),
                Err(err) => tracing::error!("event loop panicked: {err}"),
            }
        }
    }

    while tasks.join_next().await.is_some() {}
    Ok(())
}
