use std::sync::Arc;

use lasso_core::route::RoutedQuery;
use lasso_search::crop_to_png;
use lasso_types::events::GestureEvent;

use crate::coordinator::OverlaySessionCoordinator;
use crate::events::Pipeline;
use crate::state::AppState;

pub async fn handle_gesture(
    state: &Arc<AppState>,
    pipeline: &Pipeline,
    coordinator: &mut OverlaySessionCoordinator,
    gesture: GestureEvent,
) {
    match gesture {
        GestureEvent::StrokeMoved(points) => coordinator.extend_stroke(&points),
        GestureEvent::Tap(point) => {
            coordinator.tap(point);
            let query = coordinator.route_current();
            dispatch(state, pipeline, coordinator, query).await;
        }
        GestureEvent::StrokeEnded => {
            coordinator.end_stroke();
            let query = coordinator.route_current();
            dispatch(state, pipeline, coordinator, query).await;
        }
        GestureEvent::HandleDragged { handle, point } => {
            coordinator.drag_handle(handle, point);
            // Refinement re-issues the text query; the overlay stays up.
            if let Some(text) = coordinator.selected_text() {
                pipeline.display.show_text(&text).await;
            }
        }
        GestureEvent::Escape => coordinator.cancel().await,
    }
}

/// Act on a routed query. Text and barcode results keep the overlay alive;
/// a degenerate gesture tears it down. The reverse-image upload runs in the
/// background so the interaction loop never waits on the network.
async fn dispatch(
    state: &Arc<AppState>,
    pipeline: &Pipeline,
    coordinator: &mut OverlaySessionCoordinator,
    query: RoutedQuery,
) {
    match query {
        RoutedQuery::BarcodeIntent(payload) => {
            tracing::info!("routing selection to a barcode intent");
            if let Err(err) = pipeline.intents.resolve(payload).await {
                tracing::warn!(error = %err, "barcode intent failed");
                pipeline
                    .display
                    .show_error("Could not complete the barcode action.")
                    .await;
            }
        }
        RoutedQuery::TextQuery(text) => {
            tracing::info!(chars = text.len(), "routing selection to a text query");
            pipeline.display.show_text(&text).await;
        }
        RoutedQuery::ImageSearch(crop) => {
            let enabled = { state.config.read().await.search.enabled };
            if !enabled {
                pipeline
                    .display
                    .show_error("Reverse image search is disabled.")
                    .await;
                return;
            }
            let Some(frame) = coordinator.active_frame().cloned() else {
                return;
            };
            tracing::info!(?crop, "routing selection to reverse image search");
            let display = pipeline.display.clone();
            let client = pipeline.search.clone();
            tokio::spawn(async move {
                let url = match crop_to_png(&frame, crop) {
                    Ok(png) => client.search(png).await,
                    Err(err) => Err(err),
                };
                match url {
                    Ok(url) => display.show_url(&url).await,
                    Err(err) => {
                        tracing::warn!(error = %err, "reverse image search failed");
                        display.show_error("Search failed.").await;
                    }
                }
            });
        }
        RoutedQuery::Nothing => {
            tracing::debug!("gesture resolved to nothing, tearing the overlay down");
            coordinator.cancel().await;
        }
    }
}
