use std::sync::Arc;

use lasso_config::selection::SelectionConfig;
use lasso_core::route::{self, RoutedQuery};
use lasso_core::selection::SelectionEngine;
use lasso_core::words::build_words;
use lasso_types::events::SelectionHandle;
use lasso_types::frame::{CapturedFrame, FrameId};
use lasso_types::geometry::{Point, Size};
use lasso_types::observation::{DetectedBarcode, RecognitionQuality, TextRegion};

use crate::surface::{AppHandle, Focus, Overlay, ResultDisplay};

/// Orchestrates the single interactive overlay: at most one is ever open,
/// recognition snapshots are applied only for the live frame, and teardown
/// always restores the result display and previous-application focus.
pub struct OverlaySessionCoordinator {
    overlay: Arc<dyn Overlay>,
    display: Arc<dyn ResultDisplay>,
    focus: Arc<dyn Focus>,
    selection_config: SelectionConfig,
    active: Option<ActiveSession>,
}

/// Everything scoped to one capture. Dropped wholesale on dismissal, which
/// frees the frame and all recognition results together.
struct ActiveSession {
    frame: CapturedFrame,
    viewport: Size,
    engine: SelectionEngine,
    barcodes: Vec<DetectedBarcode>,
    previous_app: Option<AppHandle>,
}

impl OverlaySessionCoordinator {
    pub fn new(
        overlay: Arc<dyn Overlay>,
        display: Arc<dyn ResultDisplay>,
        focus: Arc<dyn Focus>,
        selection_config: SelectionConfig,
    ) -> Self {
        Self {
            overlay,
            display,
            focus,
            selection_config,
            active: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn frame_id(&self) -> Option<FrameId> {
        self.active.as_ref().map(|s| s.frame.id)
    }

    pub fn active_frame(&self) -> Option<&CapturedFrame> {
        self.active.as_ref().map(|s| &s.frame)
    }

    /// Take ownership of a captured frame and open the overlay for it.
    /// Returns false (and leaves the new frame to drop) if one is already
    /// open.
    pub async fn show(&mut self, frame: CapturedFrame) -> anyhow::Result<bool> {
        if self.active.is_some() {
            tracing::warn!(frame = %frame.id, "overlay already active, rejecting new frame");
            return Ok(false);
        }
        let previous_app = self.focus.previous_application();
        let viewport = self.overlay.show(&frame).await?;
        tracing::debug!(frame = %frame.id, ?viewport, "overlay shown");
        self.active = Some(ActiveSession {
            engine: SelectionEngine::new(&self.selection_config),
            frame,
            viewport,
            barcodes: Vec::new(),
            previous_app,
        });
        Ok(true)
    }

    /// Apply an OCR snapshot. Snapshots for anything but the live frame are
    /// dropped by identity, not timing.
    pub fn apply_regions(
        &mut self,
        frame: FrameId,
        quality: RecognitionQuality,
        regions: Vec<TextRegion>,
    ) {
        let Some(session) = self.active.as_mut() else {
            tracing::debug!(%frame, "dropping OCR snapshot, no overlay is open");
            return;
        };
        if session.frame.id != frame {
            tracing::debug!(stale = %frame, live = %session.frame.id, "dropping stale OCR snapshot");
            return;
        }
        let words = build_words(&regions, session.viewport);
        tracing::debug!(
            ?quality,
            regions = regions.len(),
            words = words.len(),
            "applying OCR snapshot"
        );
        session.engine.set_words(words);
    }

    pub fn apply_barcodes(&mut self, frame: FrameId, barcodes: Vec<DetectedBarcode>) {
        let Some(session) = self.active.as_mut() else {
            return;
        };
        if session.frame.id != frame {
            tracing::debug!(stale = %frame, "dropping stale barcode detections");
            return;
        }
        session.barcodes = barcodes;
    }

    pub fn extend_stroke(&mut self, points: &[Point]) {
        if let Some(session) = self.active.as_mut() {
            session.engine.on_stroke(points);
        }
    }

    pub fn tap(&mut self, point: Point) {
        if let Some(session) = self.active.as_mut() {
            session.engine.on_tap(point);
        }
    }

    pub fn end_stroke(&mut self) {
        if let Some(session) = self.active.as_mut() {
            session.engine.on_stroke_end();
        }
    }

    pub fn drag_handle(&mut self, handle: SelectionHandle, point: Point) {
        if let Some(session) = self.active.as_mut() {
            session.engine.drag_handle(handle, point);
        }
    }

    pub fn selected_text(&self) -> Option<String> {
        self.active.as_ref().and_then(|s| s.engine.selected_text())
    }

    /// Resolve the current selection state against the routing priority.
    pub fn route_current(&self) -> RoutedQuery {
        let Some(session) = self.active.as_ref() else {
            return RoutedQuery::Nothing;
        };
        route::route(
            &session.barcodes,
            session.engine.selected_text().as_deref(),
            session.engine.fallback_path(),
            session.frame.size(),
            session.viewport,
        )
    }

    /// Tear the overlay down. Always hides the result display first, then
    /// restores focus to the previously active application; runs the same
    /// way for cancellation and for normal dismissal.
    pub async fn cancel(&mut self) {
        let Some(mut session) = self.active.take() else {
            return;
        };
        tracing::debug!(frame = %session.frame.id, "dismissing overlay");
        session.engine.clear();
        session.barcodes.clear();
        self.overlay.dismiss().await;
        self.display.hide().await;
        if let Some(app) = session.previous_app
            && let Err(err) = self.focus.reactivate(&app)
        {
            tracing::warn!(error = %err, "failed to restore focus to the previous application");
        }
    }

    /// Liveness only: reassert overlay focus after the process regained
    /// foreground activation (workspace switches). Failures are logged.
    pub async fn focus_regained(&self) {
        if self.active.is_none() {
            return;
        }
        if let Err(err) = self.overlay.focus().await {
            tracing::warn!(error = %err, "failed to reassert overlay focus");
        }
    }
}
