use lasso_capture::CaptureError;

use crate::coordinator::OverlaySessionCoordinator;
use crate::events::Pipeline;

/// One capture trigger: run the session, hand the frame to the overlay, and
/// start recognition on it. Failures surface as a remediation message, never
/// as a crash of the loop.
pub async fn handle_capture_request(
    pipeline: &Pipeline,
    coordinator: &mut OverlaySessionCoordinator,
) {
    if coordinator.is_active() {
        tracing::debug!("overlay already open, ignoring capture trigger");
        return;
    }

    let frame = match pipeline.session.start().await {
        Ok(frame) => frame,
        Err(CaptureError::AlreadyActive) => return,
        Err(err) => {
            let message = err.remediation().unwrap_or("Screen capture failed.");
            pipeline.display.show_error(message).await;
            return;
        }
    };

    let shown = coordinator.show(frame.clone()).await;
    // Frame ownership has passed to the coordinator (or the frame is about to
    // drop); the session can accept the next trigger either way.
    pipeline.session.release();
    match shown {
        Ok(true) => {
            pipeline.indexer.scan(frame.clone());
            pipeline.indexer.detect_barcodes(frame);
        }
        Ok(false) => {}
        Err(err) => tracing::warn!(error = %err, "failed to show the overlay"),
    }
}
