//! Log-only collaborator implementations. Real overlay and result-display
//! surfaces plug in through the same traits; these keep the binary usable
//! on a bare terminal.

use async_trait::async_trait;
use lasso_types::frame::CapturedFrame;
use lasso_types::geometry::Size;
use lasso_types::observation::BarcodePayload;

use crate::surface::{AppHandle, Focus, IntentResolver, Overlay, ResultDisplay};

pub struct LogOverlay;

#[async_trait]
impl Overlay for LogOverlay {
    async fn show(&self, frame: &CapturedFrame) -> anyhow::Result<Size> {
        tracing::info!(frame = %frame.id, "overlay shown (headless)");
        Ok(frame.size())
    }

    async fn dismiss(&self) {
        tracing::info!("overlay dismissed (headless)");
    }

    async fn focus(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

pub struct LogDisplay;

#[async_trait]
impl ResultDisplay for LogDisplay {
    async fn show_text(&self, query: &str) {
        tracing::info!(query, "result: text query");
    }

    async fn show_url(&self, url: &str) {
        tracing::info!(url, "result: url");
    }

    async fn show_error(&self, message: &str) {
        tracing::warn!(message, "result: error");
    }

    async fn hide(&self) {}
}

pub struct NoFocus;

impl Focus for NoFocus {
    fn previous_application(&self) -> Option<AppHandle> {
        None
    }

    fn reactivate(&self, _app: &AppHandle) -> anyhow::Result<()> {
        Ok(())
    }
}

pub struct LogIntents;

#[async_trait]
impl IntentResolver for LogIntents {
    async fn resolve(&self, payload: BarcodePayload) -> anyhow::Result<()> {
        tracing::info!(?payload, "barcode intent resolved (headless)");
        Ok(())
    }
}
