use std::sync::Arc;

use kanal::AsyncReceiver;
use lasso_capture::CaptureSession;
use lasso_index::TextRegionIndexer;
use lasso_search::ReverseImageClient;
use lasso_types::events::AppEvent;
use tokio_util::sync::CancellationToken;

use crate::coordinator::OverlaySessionCoordinator;
use crate::state::AppState;
use crate::surface::{IntentResolver, ResultDisplay};

pub mod capture;
pub mod gesture;

/// The service objects the interaction loop drives. Constructed once at
/// startup and handed in explicitly; nothing here is global.
pub struct Pipeline {
    pub session: Arc<CaptureSession>,
    pub indexer: TextRegionIndexer,
    pub search: ReverseImageClient,
    pub intents: Arc<dyn IntentResolver>,
    pub display: Arc<dyn ResultDisplay>,
}

/// Interaction context. All mutation of the coordinator and selection state
/// happens here; background tasks only post immutable snapshots into `rx`.
pub async fn event_loop(
    state: Arc<AppState>,
    rx: AsyncReceiver<AppEvent>,
    cancel: CancellationToken,
    pipeline: Pipeline,
    mut coordinator: OverlaySessionCoordinator,
) -> anyhow::Result<()> {
    tracing::info!("event loop started");
    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                coordinator.cancel().await;
                return Ok(());
            }
            event = rx.recv() => {
                handle_event(&state, &pipeline, &mut coordinator, event?).await;
            }
        }
    }
}

pub(crate) async fn handle_event(
    state: &Arc<AppState>,
    pipeline: &Pipeline,
    coordinator: &mut OverlaySessionCoordinator,
    event: AppEvent,
) {
    match event {
        AppEvent::CaptureRequested => {
            capture::handle_capture_request(pipeline, coordinator).await;
        }
        AppEvent::Gesture(gesture) => {
            gesture::handle_gesture(state, pipeline, coordinator, gesture).await;
        }
        AppEvent::RegionsReady {
            frame,
            quality,
            regions,
        } => coordinator.apply_regions(frame, quality, regions),
        AppEvent::BarcodesReady { frame, barcodes } => {
            coordinator.apply_barcodes(frame, barcodes);
        }
        AppEvent::FocusRegained => coordinator.focus_regained().await,
    }
}
